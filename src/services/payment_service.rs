//! Verification of payment-provider callbacks.
//!
//! The provider signs every callback body with HMAC-SHA512 keyed by the
//! shared secret and sends the lowercase hex digest in the
//! `x-paystack-signature` header.

use hmac::{Hmac, Mac};
use sha2::Sha512;

use crate::error::AppError;

type HmacSha512 = Hmac<Sha512>;

/// Header carrying the callback signature.
pub const SIGNATURE_HEADER: &str = "x-paystack-signature";

/// Check `signature` against the body in constant time.
///
/// # Errors
///
/// `InvalidSignature` if the header is missing, not hex, or does not match.
pub fn verify_signature(
    secret: &str,
    body: &[u8],
    signature: Option<&str>,
) -> Result<(), AppError> {
    let signature = signature.ok_or(AppError::InvalidSignature)?;
    let expected = hex::decode(signature.trim()).map_err(|_| AppError::InvalidSignature)?;

    let mut mac =
        HmacSha512::new_from_slice(secret.as_bytes()).map_err(|_| AppError::InvalidSignature)?;
    mac.update(body);
    mac.verify_slice(&expected)
        .map_err(|_| AppError::InvalidSignature)
}
