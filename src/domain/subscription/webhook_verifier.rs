//! Creem webhook signature verification.
//!
//! Creem signs the raw request body with HMAC-SHA256 keyed by the webhook
//! secret and sends the lowercase hex digest in the `creem-signature`
//! header. Verification is mandatory whenever a signature is present;
//! missing material rejects the request unless the verifier was explicitly
//! built to allow unsigned deliveries.

use std::fmt;

use hmac::{Hmac, Mac};
use secrecy::{ExposeSecret, Secret};
use sha2::Sha256;
use subtle::ConstantTimeEq;

use super::webhook_errors::WebhookError;

/// Why a request failed verification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RejectionReason {
    MissingSecret,
    MissingSignature,
    MalformedSignature,
    SignatureMismatch,
}

impl RejectionReason {
    pub fn as_str(&self) -> &'static str {
        match self {
            RejectionReason::MissingSecret => "missing signing secret",
            RejectionReason::MissingSignature => "missing signature header",
            RejectionReason::MalformedSignature => "signature is not hex",
            RejectionReason::SignatureMismatch => "signature mismatch",
        }
    }
}

impl fmt::Display for RejectionReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<RejectionReason> for WebhookError {
    fn from(reason: RejectionReason) -> Self {
        match reason {
            RejectionReason::MissingSecret | RejectionReason::MissingSignature => {
                WebhookError::MissingVerificationMaterial
            }
            RejectionReason::MalformedSignature | RejectionReason::SignatureMismatch => {
                WebhookError::SignatureRejected
            }
        }
    }
}

/// Outcome of checking one request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WebhookVerificationResult {
    Verified,
    Rejected(RejectionReason),
    /// Verification material was missing and unsigned delivery is allowed.
    Skipped(String),
}

impl WebhookVerificationResult {
    /// True when processing may continue.
    pub fn may_proceed(&self) -> bool {
        !matches!(self, WebhookVerificationResult::Rejected(_))
    }
}

/// Verifier for Creem webhook signatures.
pub struct CreemWebhookVerifier {
    secret: Secret<String>,
    allow_unsigned: bool,
}

impl CreemWebhookVerifier {
    /// Creates a fail-closed verifier with the given webhook secret.
    pub fn new(secret: impl Into<String>) -> Self {
        Self {
            secret: Secret::new(secret.into()),
            allow_unsigned: false,
        }
    }

    /// Lets requests without verification material through as `Skipped`.
    ///
    /// A present signature is still checked.
    pub fn allow_unsigned(mut self, allow: bool) -> Self {
        self.allow_unsigned = allow;
        self
    }

    /// Verifies `signature` against the exact request body bytes.
    pub fn verify(&self, payload: &[u8], signature: Option<&str>) -> WebhookVerificationResult {
        let secret = self.secret.expose_secret();
        let signature = signature.map(str::trim).filter(|s| !s.is_empty());

        let missing = if secret.is_empty() {
            Some(RejectionReason::MissingSecret)
        } else if signature.is_none() {
            Some(RejectionReason::MissingSignature)
        } else {
            None
        };
        if let Some(reason) = missing {
            return if self.allow_unsigned {
                WebhookVerificationResult::Skipped(reason.to_string())
            } else {
                WebhookVerificationResult::Rejected(reason)
            };
        }

        let provided = match signature.map(hex::decode) {
            Some(Ok(bytes)) => bytes,
            _ => {
                return WebhookVerificationResult::Rejected(RejectionReason::MalformedSignature)
            }
        };

        let expected = hmac_sha256(secret.as_bytes(), payload);
        if constant_time_compare(&expected, &provided) {
            WebhookVerificationResult::Verified
        } else {
            WebhookVerificationResult::Rejected(RejectionReason::SignatureMismatch)
        }
    }
}

/// Computes the hex-encoded signature Creem sends for `payload`.
pub fn compute_signature(secret: &str, payload: &[u8]) -> String {
    hex::encode(hmac_sha256(secret.as_bytes(), payload))
}

fn hmac_sha256(key: &[u8], payload: &[u8]) -> Vec<u8> {
    let mut mac = Hmac::<Sha256>::new_from_slice(key).expect("HMAC accepts any key");
    mac.update(payload);
    mac.finalize().into_bytes().to_vec()
}

/// Performs constant-time comparison of two byte slices.
fn constant_time_compare(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    a.ct_eq(b).into()
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    const TEST_SECRET: &str = "whsec_test_secret_12345";
    const PAYLOAD: &str = r#"{"event_type":"subscription.activated","user_email":"a@b.com"}"#;

    // ══════════════════════════════════════════════════════════════
    // Signature Verification Tests
    // ══════════════════════════════════════════════════════════════

    #[test]
    fn verify_valid_signature() {
        let verifier = CreemWebhookVerifier::new(TEST_SECRET);
        let signature = compute_signature(TEST_SECRET, PAYLOAD.as_bytes());

        let result = verifier.verify(PAYLOAD.as_bytes(), Some(&signature));

        assert_eq!(result, WebhookVerificationResult::Verified);
    }

    #[test]
    fn verify_accepts_uppercase_hex_and_surrounding_whitespace() {
        let verifier = CreemWebhookVerifier::new(TEST_SECRET);
        let signature = format!(
            " {} ",
            compute_signature(TEST_SECRET, PAYLOAD.as_bytes()).to_uppercase()
        );

        let result = verifier.verify(PAYLOAD.as_bytes(), Some(&signature));

        assert_eq!(result, WebhookVerificationResult::Verified);
    }

    #[test]
    fn verify_known_vector() {
        // RFC 4231 test case 2
        let signature = compute_signature("Jefe", b"what do ya want for nothing?");
        assert_eq!(
            signature,
            "5bdcc146bf60754e6a042426089575c75a003f089d2739839dec58b964ec3843"
        );
    }

    #[test]
    fn verify_wrong_secret_fails() {
        let verifier = CreemWebhookVerifier::new("wrong_secret");
        let signature = compute_signature(TEST_SECRET, PAYLOAD.as_bytes());

        let result = verifier.verify(PAYLOAD.as_bytes(), Some(&signature));

        assert_eq!(
            result,
            WebhookVerificationResult::Rejected(RejectionReason::SignatureMismatch)
        );
    }

    #[test]
    fn verify_tampered_payload_fails() {
        let verifier = CreemWebhookVerifier::new(TEST_SECRET);
        let signature = compute_signature(TEST_SECRET, PAYLOAD.as_bytes());
        let tampered = PAYLOAD.replace("a@b.com", "x@b.com");

        let result = verifier.verify(tampered.as_bytes(), Some(&signature));

        assert_eq!(
            result,
            WebhookVerificationResult::Rejected(RejectionReason::SignatureMismatch)
        );
    }

    #[test]
    fn verify_non_hex_signature_fails() {
        let verifier = CreemWebhookVerifier::new(TEST_SECRET);

        let result = verifier.verify(PAYLOAD.as_bytes(), Some("not_valid_hex"));

        assert_eq!(
            result,
            WebhookVerificationResult::Rejected(RejectionReason::MalformedSignature)
        );
    }

    #[test]
    fn verify_truncated_signature_fails() {
        let verifier = CreemWebhookVerifier::new(TEST_SECRET);
        let signature = compute_signature(TEST_SECRET, PAYLOAD.as_bytes());

        let result = verifier.verify(PAYLOAD.as_bytes(), Some(&signature[..32]));

        assert_eq!(
            result,
            WebhookVerificationResult::Rejected(RejectionReason::SignatureMismatch)
        );
    }

    // ══════════════════════════════════════════════════════════════
    // Missing Material Policy Tests
    // ══════════════════════════════════════════════════════════════

    #[test]
    fn missing_signature_is_rejected_by_default() {
        let verifier = CreemWebhookVerifier::new(TEST_SECRET);

        assert_eq!(
            verifier.verify(PAYLOAD.as_bytes(), None),
            WebhookVerificationResult::Rejected(RejectionReason::MissingSignature)
        );
        assert_eq!(
            verifier.verify(PAYLOAD.as_bytes(), Some("   ")),
            WebhookVerificationResult::Rejected(RejectionReason::MissingSignature)
        );
    }

    #[test]
    fn missing_secret_is_rejected_by_default() {
        let verifier = CreemWebhookVerifier::new("");
        let signature = compute_signature("", PAYLOAD.as_bytes());

        let result = verifier.verify(PAYLOAD.as_bytes(), Some(&signature));

        assert_eq!(
            result,
            WebhookVerificationResult::Rejected(RejectionReason::MissingSecret)
        );
    }

    #[test]
    fn missing_signature_is_skipped_when_unsigned_allowed() {
        let verifier = CreemWebhookVerifier::new(TEST_SECRET).allow_unsigned(true);

        let result = verifier.verify(PAYLOAD.as_bytes(), None);

        assert!(matches!(result, WebhookVerificationResult::Skipped(_)));
        assert!(result.may_proceed());
    }

    #[test]
    fn present_signature_is_still_checked_when_unsigned_allowed() {
        let verifier = CreemWebhookVerifier::new(TEST_SECRET).allow_unsigned(true);

        let result = verifier.verify(PAYLOAD.as_bytes(), Some(&"a".repeat(64)));

        assert_eq!(
            result,
            WebhookVerificationResult::Rejected(RejectionReason::SignatureMismatch)
        );
        assert!(!result.may_proceed());
    }

    #[test]
    fn rejection_reasons_map_to_webhook_errors() {
        assert!(matches!(
            WebhookError::from(RejectionReason::MissingSignature),
            WebhookError::MissingVerificationMaterial
        ));
        assert!(matches!(
            WebhookError::from(RejectionReason::MissingSecret),
            WebhookError::MissingVerificationMaterial
        ));
        assert!(matches!(
            WebhookError::from(RejectionReason::SignatureMismatch),
            WebhookError::SignatureRejected
        ));
        assert!(matches!(
            WebhookError::from(RejectionReason::MalformedSignature),
            WebhookError::SignatureRejected
        ));
    }

    // ══════════════════════════════════════════════════════════════
    // Constant Time Comparison Tests
    // ══════════════════════════════════════════════════════════════

    #[test]
    fn constant_time_compare_equal_values() {
        assert!(constant_time_compare(&[1, 2, 3], &[1, 2, 3]));
    }

    #[test]
    fn constant_time_compare_different_values() {
        assert!(!constant_time_compare(&[1, 2, 3], &[1, 2, 4]));
    }

    #[test]
    fn constant_time_compare_different_lengths() {
        assert!(!constant_time_compare(&[1, 2, 3], &[1, 2, 3, 4]));
    }

    // ══════════════════════════════════════════════════════════════
    // Properties
    // ══════════════════════════════════════════════════════════════

    proptest! {
        #[test]
        fn computed_signature_always_verifies(
            secret in "[a-zA-Z0-9_]{1,64}",
            body in proptest::collection::vec(any::<u8>(), 0..512),
        ) {
            let verifier = CreemWebhookVerifier::new(secret.clone());
            let signature = compute_signature(&secret, &body);
            prop_assert_eq!(
                verifier.verify(&body, Some(&signature)),
                WebhookVerificationResult::Verified
            );
        }

        #[test]
        fn single_bit_flip_in_body_is_rejected(
            body in proptest::collection::vec(any::<u8>(), 1..512),
            index in any::<proptest::sample::Index>(),
            bit in 0u8..8,
        ) {
            let verifier = CreemWebhookVerifier::new(TEST_SECRET);
            let signature = compute_signature(TEST_SECRET, &body);
            let mut mutated = body.clone();
            let i = index.index(mutated.len());
            mutated[i] ^= 1 << bit;

            prop_assert!(!verifier.verify(&mutated, Some(&signature)).may_proceed());
        }

        #[test]
        fn single_bit_flip_in_signature_is_rejected(
            body in proptest::collection::vec(any::<u8>(), 0..512),
            index in any::<proptest::sample::Index>(),
            bit in 0u8..8,
        ) {
            let verifier = CreemWebhookVerifier::new(TEST_SECRET);
            let mut digest = hmac_sha256(TEST_SECRET.as_bytes(), &body);
            let i = index.index(digest.len());
            digest[i] ^= 1 << bit;

            prop_assert_eq!(
                verifier.verify(&body, Some(&hex::encode(digest))),
                WebhookVerificationResult::Rejected(RejectionReason::SignatureMismatch)
            );
        }
    }
}
