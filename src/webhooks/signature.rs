//! GitHub webhook signature verification using HMAC-SHA256.
//!
//! GitHub signs webhook payloads using HMAC-SHA256 with a shared secret.
//! The signature is provided in the `X-Hub-Signature-256` header as `sha256=<hex>`.
//!
//! Verification always runs over the exact bytes received on the wire, before
//! any JSON parsing. Re-serializing a parsed payload changes whitespace and key
//! order and would not reproduce the signed bytes.

use hmac::{Hmac, Mac};
use sha2::Sha256;
use thiserror::Error;

type HmacSha256 = Hmac<Sha256>;

/// Errors from signature verification.
///
/// These are configuration faults, not verification failures: a bad signature
/// yields `Ok(false)`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SignatureError {
    /// No webhook secret is configured.
    #[error("webhook secret is empty; refusing to verify signatures")]
    EmptySecret,
}

/// Parses a GitHub signature header (e.g., "sha256=abc123...") into raw bytes.
///
/// Returns `None` for malformed headers (missing prefix, invalid hex, etc.).
/// Never panics.
///
/// # Examples
///
/// ```
/// use launch_readiness::webhooks::parse_signature_header;
///
/// // Valid header
/// assert!(parse_signature_header("sha256=abcd1234").is_some());
///
/// // Invalid: missing prefix
/// assert!(parse_signature_header("abcd1234").is_none());
///
/// // Invalid: wrong algorithm
/// assert!(parse_signature_header("sha1=abcd1234").is_none());
///
/// // Invalid: bad hex
/// assert!(parse_signature_header("sha256=xyz").is_none());
/// ```
pub fn parse_signature_header(header: &str) -> Option<Vec<u8>> {
    let hex_sig = header.strip_prefix("sha256=")?;
    hex::decode(hex_sig).ok()
}

/// Computes the HMAC-SHA256 signature of a payload using the given secret.
///
/// Used to sign fixtures and by tests to produce expected signatures.
pub fn compute_signature(payload: &[u8], secret: &[u8]) -> Vec<u8> {
    let mut mac = HmacSha256::new_from_slice(secret).expect("HMAC can take key of any size");
    mac.update(payload);
    mac.finalize().into_bytes().to_vec()
}

/// Formats a signature as a GitHub-style header value.
///
/// Returns a string in the format "sha256=<hex>".
pub fn format_signature_header(signature: &[u8]) -> String {
    format!("sha256={}", hex::encode(signature))
}

/// Verifies a GitHub webhook signature against the payload and secret.
///
/// Returns `Ok(true)` if the signature is valid and `Ok(false)` otherwise,
/// including for headers without the `sha256=` prefix.
/// Uses constant-time comparison to prevent timing attacks.
///
/// # Errors
///
/// Returns [`SignatureError::EmptySecret`] if `secret` is empty. An empty
/// secret is a deployment mistake and must not silently accept or reject
/// every delivery.
///
/// # Arguments
///
/// * `payload` - The raw webhook payload bytes
/// * `signature_header` - The value of the `X-Hub-Signature-256` header (e.g., "sha256=...")
/// * `secret` - The webhook secret configured in GitHub
///
/// # Examples
///
/// ```
/// use launch_readiness::webhooks::{compute_signature, format_signature_header, verify_signature};
///
/// let payload = b"Hello, World!";
/// let secret = b"my-secret-key";
///
/// let header = format_signature_header(&compute_signature(payload, secret));
///
/// assert_eq!(verify_signature(payload, &header, secret), Ok(true));
/// assert_eq!(verify_signature(payload, &header, b"wrong-secret"), Ok(false));
/// assert!(verify_signature(payload, &header, b"").is_err());
/// ```
pub fn verify_signature(
    payload: &[u8],
    signature_header: &str,
    secret: &[u8],
) -> Result<bool, SignatureError> {
    if secret.is_empty() {
        return Err(SignatureError::EmptySecret);
    }

    let expected_signature = match parse_signature_header(signature_header) {
        Some(sig) => sig,
        None => return Ok(false),
    };

    let mut mac = HmacSha256::new_from_slice(secret).map_err(|_| SignatureError::EmptySecret)?;
    mac.update(payload);

    // Constant-time comparison via the HMAC library
    Ok(mac.verify_slice(&expected_signature).is_ok())
}
