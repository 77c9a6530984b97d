//! Client entity model and DTOs.

use gobarber_core::clients::validate_client;
use gobarber_core::error::CoreError;
use gobarber_core::types::DbId;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `clients` table.
///
/// Dates stay as the stored `YYYY-MM-DD` text so that one malformed legacy
/// row cannot fail a whole listing; they are parsed where they are used.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Client {
    pub id: DbId,
    pub name: String,
    pub phone: Option<String>,
    pub birthday: String,
    pub last_cut: Option<String>,
}

/// DTO for creating a client, also used for full-replacement updates.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateClient {
    pub name: String,
    pub phone: Option<String>,
    pub birthday: String,
    #[serde(alias = "lastCut")]
    pub last_cut: Option<String>,
}

/// Full-replacement update payload (`PUT /clients/{id}`).
pub type UpdateClient = CreateClient;

impl CreateClient {
    /// Validate the payload.
    pub fn validate(&self) -> Result<(), CoreError> {
        validate_client(&self.name, &self.birthday, self.last_cut.as_deref())
    }

    /// Trimmed name for storage.
    pub fn name(&self) -> &str {
        self.name.trim()
    }

    /// Phone for storage; blank becomes `NULL`.
    pub fn phone(&self) -> Option<&str> {
        non_blank(self.phone.as_deref())
    }

    /// Birthday for storage, reduced to its `YYYY-MM-DD` prefix.
    pub fn birthday(&self) -> &str {
        date_prefix(self.birthday.trim())
    }

    /// Last cut for storage; blank becomes `NULL`.
    pub fn last_cut(&self) -> Option<&str> {
        non_blank(self.last_cut.as_deref()).map(date_prefix)
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

fn date_prefix(value: &str) -> &str {
    value.get(..10).unwrap_or(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn storage_accessors_normalise_input() {
        let input = CreateClient {
            name: "  Bruno ".to_string(),
            phone: Some("   ".to_string()),
            birthday: "1991-03-04T00:00:00.000Z".to_string(),
            last_cut: Some(String::new()),
        };
        assert_eq!(input.name(), "Bruno");
        assert_eq!(input.phone(), None);
        assert_eq!(input.birthday(), "1991-03-04");
        assert_eq!(input.last_cut(), None);
    }

    #[test]
    fn accepts_camel_case_last_cut() {
        let input: CreateClient = serde_json::from_str(
            r#"{"name":"Caio","birthday":"1990-01-01","lastCut":"2024-01-01"}"#,
        )
        .unwrap();
        assert_eq!(input.last_cut(), Some("2024-01-01"));
    }
}
