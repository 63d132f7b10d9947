//! Webhook signature verification.
//!
//! Verifies the `Stripe-Signature` header with HMAC-SHA256 over
//! `"<timestamp>.<raw body>"`, compared in constant time. Timestamps are
//! checked against a tolerance window to limit replay.

use hmac::{Hmac, Mac};
use secrecy::{ExposeSecret, SecretString};
use sha2::Sha256;
use subtle::ConstantTimeEq;

use super::processor_event::{ProcessorEvent, StripeEvent};
use super::webhook_errors::WebhookError;

/// Maximum allowed age for webhook events (5 minutes).
const MAX_EVENT_AGE_SECS: i64 = 300;

/// Maximum allowed clock skew for future events (1 minute).
const MAX_CLOCK_SKEW_SECS: i64 = 60;

/// Parsed components from the Stripe-Signature header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignatureHeader {
    /// Unix timestamp when the signature was generated.
    pub timestamp: i64,
    /// Every `v1` signature. The processor sends several during secret rotation.
    pub v1_signatures: Vec<Vec<u8>>,
    /// Optional v0 legacy signature. Never used for verification.
    pub v0_signature: Option<Vec<u8>>,
}

impl SignatureHeader {
    /// Parses a Stripe-Signature header string.
    ///
    /// Format: `t=<timestamp>,v1=<signature>[,v1=<signature>...][,v0=<legacy>]`
    ///
    /// # Errors
    ///
    /// Returns `WebhookError::ParseError` if the header format is invalid or
    /// no `v1` entry decodes. Undecodable `v1` entries are skipped.
    pub fn parse(header: &str) -> Result<Self, WebhookError> {
        let mut timestamp: Option<i64> = None;
        let mut v1_signatures: Vec<Vec<u8>> = Vec::new();
        let mut v0_signature: Option<Vec<u8>> = None;

        for part in header.split(',') {
            let (key, value) = part
                .trim()
                .split_once('=')
                .ok_or_else(|| WebhookError::ParseError("invalid header format".to_string()))?;

            match key {
                "t" => {
                    timestamp = Some(value.parse().map_err(|_| {
                        WebhookError::ParseError("invalid timestamp".to_string())
                    })?);
                }
                "v1" => match hex::decode(value) {
                    Ok(signature) => v1_signatures.push(signature),
                    Err(_) => tracing::debug!("Skipping undecodable v1 signature"),
                },
                "v0" => {
                    v0_signature = hex::decode(value).ok();
                }
                _ => {
                    // Unknown schemes are ignored
                }
            }
        }

        let timestamp =
            timestamp.ok_or_else(|| WebhookError::ParseError("missing timestamp".to_string()))?;
        if v1_signatures.is_empty() {
            return Err(WebhookError::ParseError("no usable v1 signature".to_string()));
        }

        Ok(SignatureHeader {
            timestamp,
            v1_signatures,
            v0_signature,
        })
    }
}

/// Whether inbound webhooks must carry a valid signature.
///
/// Chosen once at startup from configuration.
#[derive(Clone)]
pub enum VerificationPolicy {
    /// Verify every delivery against the signing secret.
    Enforced(SecretString),
    /// Parse bodies without verification. Insecure; non-production only.
    Disabled,
}

impl VerificationPolicy {
    pub fn is_enforced(&self) -> bool {
        matches!(self, Self::Enforced(_))
    }
}

impl std::fmt::Debug for VerificationPolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Enforced(_) => f.write_str("Enforced([REDACTED])"),
            Self::Disabled => f.write_str("Disabled"),
        }
    }
}

/// Turns a raw webhook delivery into a routed [`ProcessorEvent`].
#[derive(Debug, Clone)]
pub struct WebhookVerifier {
    policy: VerificationPolicy,
}

impl WebhookVerifier {
    pub fn new(policy: VerificationPolicy) -> Self {
        Self { policy }
    }

    pub fn policy(&self) -> &VerificationPolicy {
        &self.policy
    }

    /// Verifies the delivery (when enforced) and routes the event.
    ///
    /// # Errors
    ///
    /// - `MissingSignature` - Enforced and no header present
    /// - `InvalidSignature` - No `v1` signature matched
    /// - `TimestampOutOfRange` - Signed more than 5 minutes ago
    /// - `InvalidTimestamp` - Signed in the future beyond skew tolerance
    /// - `ParseError` - Header or payload could not be parsed
    pub fn verify(
        &self,
        payload: &[u8],
        signature_header: Option<&str>,
    ) -> Result<ProcessorEvent, WebhookError> {
        self.verify_at(payload, signature_header, chrono::Utc::now().timestamp())
    }

    fn verify_at(
        &self,
        payload: &[u8],
        signature_header: Option<&str>,
        now: i64,
    ) -> Result<ProcessorEvent, WebhookError> {
        match &self.policy {
            VerificationPolicy::Enforced(secret) => {
                let header = signature_header.ok_or(WebhookError::MissingSignature)?;
                let header = SignatureHeader::parse(header)?;

                validate_timestamp(header.timestamp, now)?;

                let expected = compute_signature(secret, header.timestamp, payload)?;
                let matched = header
                    .v1_signatures
                    .iter()
                    .any(|candidate| constant_time_compare(&expected, candidate));
                if !matched {
                    return Err(WebhookError::InvalidSignature);
                }

                let event: StripeEvent = serde_json::from_slice(payload)
                    .map_err(|e| WebhookError::ParseError(e.to_string()))?;
                ProcessorEvent::from_envelope(&event)
            }
            VerificationPolicy::Disabled => match serde_json::from_slice::<StripeEvent>(payload) {
                Ok(event) => ProcessorEvent::from_envelope(&event),
                Err(e) => {
                    tracing::debug!(error = %e, "Unverified webhook body is not an event");
                    Ok(ProcessorEvent::Other {
                        event_type: "unknown".to_string(),
                    })
                }
            },
        }
    }
}

/// Validates that the timestamp is within acceptable bounds.
fn validate_timestamp(timestamp: i64, now: i64) -> Result<(), WebhookError> {
    let age = now.saturating_sub(timestamp);

    if age > MAX_EVENT_AGE_SECS {
        return Err(WebhookError::TimestampOutOfRange);
    }

    if age < -MAX_CLOCK_SKEW_SECS {
        return Err(WebhookError::InvalidTimestamp);
    }

    Ok(())
}

/// HMAC-SHA256 over `"<timestamp>.<payload>"`.
fn compute_signature(
    secret: &SecretString,
    timestamp: i64,
    payload: &[u8],
) -> Result<Vec<u8>, WebhookError> {
    let mut mac = Hmac::<Sha256>::new_from_slice(secret.expose_secret().as_bytes())
        .map_err(|_| WebhookError::InvalidSignature)?;
    mac.update(timestamp.to_string().as_bytes());
    mac.update(b".");
    mac.update(payload);
    Ok(mac.finalize().into_bytes().to_vec())
}

fn constant_time_compare(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    a.ct_eq(b).into()
}

/// Builds a `Stripe-Signature` header value for test fixtures.
#[cfg(test)]
pub fn compute_test_signature(secret: &str, timestamp: i64, payload: &str) -> String {
    let mut mac =
        Hmac::<Sha256>::new_from_slice(secret.as_bytes()).expect("HMAC accepts any key");
    mac.update(format!("{}.{}", timestamp, payload).as_bytes());
    format!("t={},v1={}", timestamp, hex::encode(mac.finalize().into_bytes()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::payment::processor_event::StripeEventBuilder;

    const TEST_SECRET: &str = "whsec_test_secret_12345";
    const NOW: i64 = 1_700_000_000;

    fn enforced() -> WebhookVerifier {
        WebhookVerifier::new(VerificationPolicy::Enforced(SecretString::new(
            TEST_SECRET.to_string(),
        )))
    }

    // ══════════════════════════════════════════════════════════════
    // SignatureHeader Parsing Tests
    // ══════════════════════════════════════════════════════════════

    #[test]
    fn parse_header_with_v1_only() {
        let header_str = format!("t=1234567890,v1={}", "a".repeat(64));

        let header = SignatureHeader::parse(&header_str).unwrap();

        assert_eq!(header.timestamp, 1234567890);
        assert_eq!(header.v1_signatures.len(), 1);
        assert_eq!(header.v1_signatures[0].len(), 32);
        assert!(header.v0_signature.is_none());
    }

    #[test]
    fn parse_header_collects_every_v1() {
        let header_str = format!(
            "t=1234567890,v1={},v1={},v0={}",
            "a".repeat(64),
            "c".repeat(64),
            "b".repeat(64)
        );

        let header = SignatureHeader::parse(&header_str).unwrap();

        assert_eq!(header.v1_signatures.len(), 2);
        assert!(header.v0_signature.is_some());
    }

    #[test]
    fn parse_header_ignores_unknown_fields() {
        let header_str = format!("t=1234567890,v1={},v2=future,scheme=hmac", "a".repeat(64));

        let header = SignatureHeader::parse(&header_str).unwrap();

        assert_eq!(header.v1_signatures.len(), 1);
    }

    #[test]
    fn parse_header_missing_timestamp_fails() {
        let result = SignatureHeader::parse(&format!("v1={}", "a".repeat(64)));
        assert!(matches!(result, Err(WebhookError::ParseError(_))));
    }

    #[test]
    fn parse_header_missing_v1_fails() {
        let result = SignatureHeader::parse("t=1234567890");
        assert!(matches!(result, Err(WebhookError::ParseError(_))));
    }

    #[test]
    fn parse_header_rejects_garbage() {
        assert!(SignatureHeader::parse("not a header").is_err());
        assert!(SignatureHeader::parse("t=abc,v1=aa").is_err());
        assert!(SignatureHeader::parse("t=1,v1=zz").is_err());
    }

    #[test]
    fn parse_header_skips_undecodable_v1() {
        let header_str = format!("t=1234567890,v1=not-hex,v1={}", "a".repeat(64));

        let header = SignatureHeader::parse(&header_str).unwrap();

        assert_eq!(header.v1_signatures, vec![vec![0xaa; 32]]);
    }

    #[test]
    fn parse_header_with_only_undecodable_v1_fails() {
        let result = SignatureHeader::parse("t=1234567890,v1=zz,v1=xyz");
        assert!(matches!(result, Err(WebhookError::ParseError(_))));
    }

    // ══════════════════════════════════════════════════════════════
    // Enforced Verification Tests
    // ══════════════════════════════════════════════════════════════

    #[test]
    fn valid_signature_routes_event() {
        let payload = StripeEventBuilder::new().to_json();
        let header = compute_test_signature(TEST_SECRET, NOW, &payload);

        let event = enforced()
            .verify_at(payload.as_bytes(), Some(&header), NOW)
            .unwrap();

        assert!(matches!(event, ProcessorEvent::PaymentIntentSucceeded(_)));
    }

    #[test]
    fn any_matching_v1_is_accepted() {
        let payload = StripeEventBuilder::new().to_json();
        let valid = compute_test_signature(TEST_SECRET, NOW, &payload);
        let valid_sig = valid.split_once(",v1=").unwrap().1;
        let header = format!("t={},v1={},v1={}", NOW, "0".repeat(64), valid_sig);

        let result = enforced().verify_at(payload.as_bytes(), Some(&header), NOW);

        assert!(result.is_ok());
    }

    #[test]
    fn undecodable_v1_does_not_hide_a_valid_one() {
        let payload = StripeEventBuilder::new().to_json();
        let valid = compute_test_signature(TEST_SECRET, NOW, &payload);
        let valid_sig = valid.split_once(",v1=").unwrap().1;
        let header = format!("t={},v1=garbage,v1={}", NOW, valid_sig);

        let result = enforced().verify_at(payload.as_bytes(), Some(&header), NOW);

        assert!(result.is_ok());
    }

    #[test]
    fn missing_header_is_rejected() {
        let payload = StripeEventBuilder::new().to_json();

        let result = enforced().verify_at(payload.as_bytes(), None, NOW);

        assert_eq!(result.unwrap_err(), WebhookError::MissingSignature);
    }

    #[test]
    fn wrong_secret_is_rejected() {
        let payload = StripeEventBuilder::new().to_json();
        let header = compute_test_signature("whsec_other", NOW, &payload);

        let result = enforced().verify_at(payload.as_bytes(), Some(&header), NOW);

        assert_eq!(result.unwrap_err(), WebhookError::InvalidSignature);
    }

    #[test]
    fn tampered_payload_is_rejected() {
        let payload = StripeEventBuilder::new().to_json();
        let header = compute_test_signature(TEST_SECRET, NOW, &payload);
        let tampered = payload.replace("4999", "1");

        let result = enforced().verify_at(tampered.as_bytes(), Some(&header), NOW);

        assert_eq!(result.unwrap_err(), WebhookError::InvalidSignature);
    }

    #[test]
    fn stale_timestamp_is_rejected() {
        let payload = StripeEventBuilder::new().to_json();
        let signed_at = NOW - MAX_EVENT_AGE_SECS - 1;
        let header = compute_test_signature(TEST_SECRET, signed_at, &payload);

        let result = enforced().verify_at(payload.as_bytes(), Some(&header), NOW);

        assert_eq!(result.unwrap_err(), WebhookError::TimestampOutOfRange);
    }

    #[test]
    fn extreme_timestamps_are_rejected_without_overflow() {
        let payload = StripeEventBuilder::new().to_json();
        let sig = "a".repeat(64);

        let oldest = format!("t={},v1={}", i64::MIN, sig);
        let result = enforced().verify_at(payload.as_bytes(), Some(&oldest), NOW);
        assert_eq!(result.unwrap_err(), WebhookError::TimestampOutOfRange);

        let newest = format!("t={},v1={}", i64::MAX, sig);
        let result = enforced().verify_at(payload.as_bytes(), Some(&newest), NOW);
        assert_eq!(result.unwrap_err(), WebhookError::InvalidTimestamp);

        let result = enforced().verify(payload.as_bytes(), Some(&oldest));
        assert_eq!(result.unwrap_err(), WebhookError::TimestampOutOfRange);
    }

    #[test]
    fn timestamp_at_edge_of_window_is_accepted() {
        let payload = StripeEventBuilder::new().to_json();
        let header = compute_test_signature(TEST_SECRET, NOW - MAX_EVENT_AGE_SECS, &payload);

        assert!(enforced()
            .verify_at(payload.as_bytes(), Some(&header), NOW)
            .is_ok());
    }

    #[test]
    fn future_timestamp_beyond_skew_is_rejected() {
        let payload = StripeEventBuilder::new().to_json();
        let signed_at = NOW + MAX_CLOCK_SKEW_SECS + 1;
        let header = compute_test_signature(TEST_SECRET, signed_at, &payload);

        let result = enforced().verify_at(payload.as_bytes(), Some(&header), NOW);

        assert_eq!(result.unwrap_err(), WebhookError::InvalidTimestamp);
    }

    #[test]
    fn small_future_skew_is_accepted() {
        let payload = StripeEventBuilder::new().to_json();
        let header = compute_test_signature(TEST_SECRET, NOW + 30, &payload);

        assert!(enforced()
            .verify_at(payload.as_bytes(), Some(&header), NOW)
            .is_ok());
    }

    #[test]
    fn signed_non_json_payload_is_parse_error() {
        let payload = "not json";
        let header = compute_test_signature(TEST_SECRET, NOW, payload);

        let result = enforced().verify_at(payload.as_bytes(), Some(&header), NOW);

        assert!(matches!(result, Err(WebhookError::ParseError(_))));
    }

    #[test]
    fn verify_uses_wall_clock() {
        let payload = StripeEventBuilder::new().to_json();
        let header =
            compute_test_signature(TEST_SECRET, chrono::Utc::now().timestamp(), &payload);

        assert!(enforced().verify(payload.as_bytes(), Some(&header)).is_ok());
    }

    // ══════════════════════════════════════════════════════════════
    // Disabled Policy Tests
    // ══════════════════════════════════════════════════════════════

    #[test]
    fn disabled_policy_parses_without_signature() {
        let payload = StripeEventBuilder::new()
            .event_type("payment_intent.payment_failed")
            .to_json();
        let verifier = WebhookVerifier::new(VerificationPolicy::Disabled);

        let event = verifier.verify(payload.as_bytes(), None).unwrap();

        assert!(matches!(event, ProcessorEvent::PaymentIntentFailed(_)));
    }

    #[test]
    fn disabled_policy_ignores_bogus_signature() {
        let payload = StripeEventBuilder::new().to_json();
        let verifier = WebhookVerifier::new(VerificationPolicy::Disabled);

        assert!(verifier.verify(payload.as_bytes(), Some("t=1,v1=00")).is_ok());
    }

    #[test]
    fn disabled_policy_acknowledges_unparseable_body() {
        let verifier = WebhookVerifier::new(VerificationPolicy::Disabled);

        let event = verifier.verify(b"\x00garbage", None).unwrap();

        assert!(matches!(event, ProcessorEvent::Other { .. }));
    }

    #[test]
    fn policy_debug_redacts_secret() {
        let policy = VerificationPolicy::Enforced(SecretString::new(TEST_SECRET.to_string()));
        assert!(!format!("{:?}", policy).contains(TEST_SECRET));
        assert!(policy.is_enforced());
        assert!(!VerificationPolicy::Disabled.is_enforced());
    }
}
