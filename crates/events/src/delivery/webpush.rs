//! Web Push delivery via VAPID-signed, `aes128gcm`-encrypted messages.
//!
//! [`WebPushTransport`] wraps the `web-push` crate's isahc client.
//! Configuration is loaded from environment variables; if either VAPID key
//! is missing, [`VapidConfig::from_env`] returns `None` and push delivery
//! is disabled for the whole process.

use std::time::Duration;

use async_trait::async_trait;
use gobarber_db::models::push_subscription::PushSubscription;
use web_push::{
    ContentEncoding, IsahcWebPushClient, SubscriptionInfo, VapidSignatureBuilder, WebPushClient,
    WebPushError, WebPushMessage, WebPushMessageBuilder, URL_SAFE_NO_PAD,
};

use super::{PushError, PushTransport};

// ---------------------------------------------------------------------------
// VapidConfig
// ---------------------------------------------------------------------------

/// Default VAPID `sub` claim when `VAPID_SUBJECT` is not set.
const DEFAULT_SUBJECT: &str = "mailto:admin@gobarber.app";

/// Default per-attempt delivery timeout in seconds.
const DEFAULT_PUSH_TIMEOUT_SECS: u64 = 10;

/// VAPID credentials and delivery settings.
#[derive(Debug, Clone)]
pub struct VapidConfig {
    /// URL-safe base64 public key, handed to browsers for subscribing.
    pub public_key: String,
    /// URL-safe base64 raw private key used to sign the VAPID JWT.
    pub private_key: String,
    /// Contact URI placed in the JWT `sub` claim.
    pub subject: String,
    /// Upper bound for a single delivery attempt.
    pub timeout: Duration,
}

impl VapidConfig {
    /// Load configuration from environment variables.
    ///
    /// Returns `None` if either key is missing or blank, signalling that
    /// push delivery is not configured.
    ///
    /// | Variable            | Required | Default                     |
    /// |---------------------|----------|-----------------------------|
    /// | `VAPID_PUBLIC_KEY`  | yes      |                             |
    /// | `VAPID_PRIVATE_KEY` | yes      |                             |
    /// | `VAPID_SUBJECT`     | no       | `mailto:admin@gobarber.app` |
    /// | `PUSH_TIMEOUT_SECS` | no       | `10`                        |
    pub fn from_env() -> Option<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Option<Self> {
        let non_blank = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let public_key = non_blank("VAPID_PUBLIC_KEY")?;
        let private_key = non_blank("VAPID_PRIVATE_KEY")?;

        Some(Self {
            public_key,
            private_key,
            subject: non_blank("VAPID_SUBJECT").unwrap_or_else(|| DEFAULT_SUBJECT.to_string()),
            timeout: Duration::from_secs(
                lookup("PUSH_TIMEOUT_SECS")
                    .and_then(|v| v.parse().ok())
                    .filter(|secs| *secs > 0)
                    .unwrap_or(DEFAULT_PUSH_TIMEOUT_SECS),
            ),
        })
    }
}

// ---------------------------------------------------------------------------
// WebPushTransport
// ---------------------------------------------------------------------------

/// Sends push messages to browser push services.
pub struct WebPushTransport {
    client: IsahcWebPushClient,
    private_key: String,
    subject: String,
}

impl WebPushTransport {
    /// Build the transport and its HTTP client.
    pub fn new(config: &VapidConfig) -> Result<Self, PushError> {
        let client = IsahcWebPushClient::new().map_err(classify)?;
        Ok(Self {
            client,
            private_key: config.private_key.clone(),
            subject: config.subject.clone(),
        })
    }
}

#[async_trait]
impl PushTransport for WebPushTransport {
    async fn send(&self, subscription: &PushSubscription, payload: &str) -> Result<(), PushError> {
        let message = build_message(&self.private_key, &self.subject, subscription, payload)?;
        self.client.send(message).await.map_err(classify)
    }
}

/// Sign and encrypt `payload` for one subscription.
fn build_message(
    private_key: &str,
    subject: &str,
    subscription: &PushSubscription,
    payload: &str,
) -> Result<WebPushMessage, PushError> {
    let info = SubscriptionInfo::new(
        subscription.endpoint.as_str(),
        subscription.keys_p256dh.as_str(),
        subscription.keys_auth.as_str(),
    );

    let mut signature =
        VapidSignatureBuilder::from_base64(private_key, URL_SAFE_NO_PAD, &info).map_err(classify)?;
    signature.add_claim("sub", subject);
    let signature = signature.build().map_err(classify)?;

    let mut builder = WebPushMessageBuilder::new(&info);
    builder.set_payload(ContentEncoding::Aes128Gcm, payload.as_bytes());
    builder.set_vapid_signature(signature);
    builder.build().map_err(classify)
}

/// Map a `web-push` error onto the permanent/transient split.
fn classify(err: WebPushError) -> PushError {
    let message = err.to_string();
    match err {
        WebPushError::EndpointNotFound => PushError::from_status(404, message),
        WebPushError::EndpointNotValid => PushError::from_status(410, message),
        WebPushError::Unauthorized => PushError::from_status(401, message),
        WebPushError::BadRequest(detail) => {
            PushError::from_status(400, detail.unwrap_or(message))
        }
        WebPushError::PayloadTooLarge => PushError::from_status(413, message),
        WebPushError::ServerError(_) => PushError::from_status(500, message),
        _ => PushError::Transport(message),
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use assert_matches::assert_matches;

    use super::*;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn missing_keys_disable_push() {
        assert!(VapidConfig::from_lookup(lookup(&[])).is_none());
        assert!(VapidConfig::from_lookup(lookup(&[("VAPID_PUBLIC_KEY", "pub")])).is_none());
        assert!(VapidConfig::from_lookup(lookup(&[
            ("VAPID_PUBLIC_KEY", "pub"),
            ("VAPID_PRIVATE_KEY", "  "),
        ]))
        .is_none());
    }

    #[test]
    fn defaults_apply() {
        let config = VapidConfig::from_lookup(lookup(&[
            ("VAPID_PUBLIC_KEY", "pub"),
            ("VAPID_PRIVATE_KEY", "priv"),
        ]))
        .unwrap();
        assert_eq!(config.subject, DEFAULT_SUBJECT);
        assert_eq!(config.timeout, Duration::from_secs(DEFAULT_PUSH_TIMEOUT_SECS));
    }

    #[test]
    fn overrides_apply() {
        let config = VapidConfig::from_lookup(lookup(&[
            ("VAPID_PUBLIC_KEY", "pub"),
            ("VAPID_PRIVATE_KEY", "priv"),
            ("VAPID_SUBJECT", "mailto:ops@example.com"),
            ("PUSH_TIMEOUT_SECS", "3"),
        ]))
        .unwrap();
        assert_eq!(config.subject, "mailto:ops@example.com");
        assert_eq!(config.timeout, Duration::from_secs(3));
    }

    #[test]
    fn invalid_timeout_uses_default() {
        let config = VapidConfig::from_lookup(lookup(&[
            ("VAPID_PUBLIC_KEY", "pub"),
            ("VAPID_PRIVATE_KEY", "priv"),
            ("PUSH_TIMEOUT_SECS", "0"),
        ]))
        .unwrap();
        assert_eq!(config.timeout, Duration::from_secs(DEFAULT_PUSH_TIMEOUT_SECS));
    }

    const PRIVATE_KEY: &str = "IQ9Ur0ykXoHS9gzfYX0aBjy9lvdrjx_PFUXmie9YRcY";

    fn subscription(p256dh: &str) -> PushSubscription {
        PushSubscription {
            id: 1,
            endpoint: "https://updates.push.services.mozilla.com/wpush/v2/gAAAAABaso4V".to_string(),
            keys_p256dh: p256dh.to_string(),
            keys_auth: "sBXU5_tIYz-5w7G2B25BEw".to_string(),
        }
    }

    #[test]
    fn builds_signed_encrypted_message() {
        let sub = subscription(
            "BH1HTeKM7-NwaLGHEqxeu2IamQaVVLkcsFHPIHmsCnqxcBHPQBprF41bEMOr3O1hUQ2jU1opNEm1F_lZV_sxMP8",
        );
        let message = build_message(
            PRIVATE_KEY,
            DEFAULT_SUBJECT,
            &sub,
            r#"{"title":"2 alerts","body":"...","url":"/"}"#,
        )
        .unwrap();

        assert_eq!(message.endpoint.to_string(), sub.endpoint);
        let payload = message.payload.expect("encrypted payload");
        assert!(!payload.content.is_empty());
    }

    #[test]
    fn bad_private_key_is_transient() {
        let sub = subscription(
            "BH1HTeKM7-NwaLGHEqxeu2IamQaVVLkcsFHPIHmsCnqxcBHPQBprF41bEMOr3O1hUQ2jU1opNEm1F_lZV_sxMP8",
        );
        let err = build_message("not-a-key", DEFAULT_SUBJECT, &sub, "{}").unwrap_err();
        assert_eq!(err, PushError::Transport(WebPushError::InvalidCryptoKeys.to_string()));
    }

    #[test]
    fn gone_endpoints_are_permanent() {
        assert_eq!(
            classify(WebPushError::EndpointNotFound),
            PushError::EndpointGone { status: 404 }
        );
        assert_eq!(
            classify(WebPushError::EndpointNotValid),
            PushError::EndpointGone { status: 410 }
        );
    }

    #[test]
    fn rejections_keep_their_status() {
        for (err, status) in [
            (WebPushError::Unauthorized, 401),
            (WebPushError::BadRequest(None), 400),
            (WebPushError::PayloadTooLarge, 413),
            (WebPushError::ServerError(None), 500),
        ] {
            let classified = classify(err);
            assert!(!classified.is_permanent());
            assert_eq!(classified.status(), Some(status));
        }
        assert_matches!(
            classify(WebPushError::BadRequest(Some("bad ttl".to_string()))),
            PushError::Rejected { status: 400, message } if message == "bad ttl"
        );
    }

    #[test]
    fn unclassified_errors_are_transient() {
        let err = classify(WebPushError::Unspecified);
        assert!(!err.is_permanent());
        assert_eq!(err.status(), None);
    }
}
