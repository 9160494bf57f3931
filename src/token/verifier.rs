// src/token/verifier.rs
//! DID token verification.
//!
//! Confirms that a token's claim was signed by the private key behind the
//! address embedded in its issuer, and that the token is inside its
//! validity window. Verification is a pure linear pipeline: decode,
//! re-serialize, recover the signer, compare addresses, check the time
//! bounds. Each step either fails with a distinct [`DidTokenError`] or
//! falls through to the next; no state survives the call.
//!
//! Cryptography:
//! - the claim is re-serialized compactly in its recorded key order, so
//!   the bytes match what the issuer signed
//! - the message is hashed with the Ethereum personal-message convention
//!   (`"\x19Ethereum Signed Message:\n" + len`, then Keccak-256)
//! - the signer address is recovered from the 65-byte `r || s || v` proof
//!   over secp256k1, no public key needed in advance

use ethers_core::types::Address;
use ethers_core::utils::{hash_message, hex, keccak256, to_checksum};
use k256::ecdsa::{RecoveryId, Signature, VerifyingKey};
use k256::elliptic_curve::sec1::ToEncodedPoint;

use crate::config::DEFAULT_NBF_GRACE_PERIOD_S;
use crate::error::DidTokenError;
use crate::token::codec::{self, Claim};
use crate::utils::time::{apply_nbf_grace_period, epoch_time_now};

/// Verifies DID tokens against their embedded issuer and validity window.
///
/// Stateless apart from the configured `nbf` grace period; a single
/// instance is safe to share across threads and every call is
/// independent.
#[derive(Clone, Debug)]
pub struct TokenVerifier {
    /// Seconds subtracted from `nbf` to absorb issuer/verifier clock
    /// skew. Never applied to `ext`.
    nbf_grace_period_s: i64,
}

impl Default for TokenVerifier {
    fn default() -> Self {
        TokenVerifier::new(DEFAULT_NBF_GRACE_PERIOD_S)
    }
}

impl TokenVerifier {
    /// Constructs a verifier with the given `nbf` grace period in
    /// seconds.
    pub fn new(nbf_grace_period_s: i64) -> Self {
        TokenVerifier { nbf_grace_period_s }
    }

    /// Validates a DID token against the current wall-clock time.
    ///
    /// # Errors
    /// - any [`DidTokenError`] the codec raises while decoding
    /// - [`DidTokenError::SignatureMismatch`] if the recovered signer
    ///   differs from the address in the issuer
    /// - [`DidTokenError::TokenExpired`] if `now > ext`
    /// - [`DidTokenError::TokenNotYetValid`] if `now < nbf - grace`
    pub fn validate(&self, did_token: &str) -> Result<(), DidTokenError> {
        self.validate_at(did_token, epoch_time_now())
    }

    /// Validates a DID token as of an explicit epoch time. [`validate`]
    /// delegates here after reading the clock once; callers replaying
    /// historical requests can pass their own timestamp.
    ///
    /// [`validate`]: TokenVerifier::validate
    pub fn validate_at(&self, did_token: &str, now_s: i64) -> Result<(), DidTokenError> {
        let (proof, claim) = codec::decode(did_token)?;

        // Byte-exact re-serialization of the signed payload: compact
        // separators, keys in the order recorded at parse time.
        let message = serde_json::to_string(&claim).map_err(|e| {
            DidTokenError::MalformedToken {
                reason: format!("Given claim could not be re-serialized. ({e})"),
            }
        })?;

        let recovered_address = recover_address(&message, &proof)?;
        let expected_address =
            codec::parse_public_address_from_issuer(&codec::issuer_from_claim(&claim)?)?;

        // Lowercase-hex normalization on both sides; the issuer and the
        // recovery primitive may disagree on checksum casing.
        if to_checksum(&recovered_address, None).to_lowercase()
            != expected_address.to_lowercase()
        {
            return Err(DidTokenError::SignatureMismatch);
        }

        if now_s > timestamp_field(&claim, "ext")? {
            return Err(DidTokenError::TokenExpired);
        }

        let nbf = timestamp_field(&claim, "nbf")?;
        if now_s < apply_nbf_grace_period(nbf, self.nbf_grace_period_s) {
            return Err(DidTokenError::TokenNotYetValid);
        }

        log::debug!("validated DID token for issuer {}", expected_address);

        Ok(())
    }
}

fn timestamp_field(claim: &Claim, field: &str) -> Result<i64, DidTokenError> {
    claim[field]
        .as_i64()
        .ok_or_else(|| DidTokenError::MalformedToken {
            reason: format!("Field {field:?} should be an integer epoch timestamp."),
        })
}

/// Recovers the Ethereum address that produced `proof` over the
/// personal-message hash of `message`.
///
/// The proof is a hex string (optional `0x` prefix) of 65 bytes:
/// `r || s || v`, with `v` either a raw recovery id (0/1) or the
/// Ethereum-style 27/28.
///
/// # Errors
/// - [`DidTokenError::MalformedToken`] if the proof is not 65 hex bytes
/// - [`DidTokenError::SignatureMismatch`] if the signature scalars or
///   recovery id are cryptographically invalid, since such a proof can
///   never match any issuer
fn recover_address(message: &str, proof: &str) -> Result<Address, DidTokenError> {
    let bytes = hex::decode(proof.strip_prefix("0x").unwrap_or(proof)).map_err(|e| {
        DidTokenError::MalformedToken {
            reason: format!(
                "Given proof should be a hex-encoded [r || s || v] signature. ({e})"
            ),
        }
    })?;

    if bytes.len() != 65 {
        return Err(DidTokenError::MalformedToken {
            reason: format!(
                "Given proof should be a 65-byte [r || s || v] signature, got {} bytes.",
                bytes.len()
            ),
        });
    }

    let signature =
        Signature::from_slice(&bytes[..64]).map_err(|_| DidTokenError::SignatureMismatch)?;
    // Recovery requires low-S form; eth_sign produces it, but normalize
    // anyway so a high-S proof fails on the address comparison instead.
    let signature = signature.normalize_s().unwrap_or(signature);

    let v = bytes[64];
    let recovery_id = RecoveryId::from_byte(if v >= 27 { v - 27 } else { v })
        .ok_or(DidTokenError::SignatureMismatch)?;

    let digest = hash_message(message);
    let verifying_key =
        VerifyingKey::recover_from_prehash(digest.as_bytes(), &signature, recovery_id)
            .map_err(|_| DidTokenError::SignatureMismatch)?;

    Ok(address_from_verifying_key(&verifying_key))
}

/// Derives an Ethereum address from a secp256k1 verifying key: the last
/// 20 bytes of the Keccak-256 hash of the uncompressed public key.
fn address_from_verifying_key(key: &VerifyingKey) -> Address {
    let point = key.to_encoded_point(false);
    let hash = keccak256(&point.as_bytes()[1..]);
    Address::from_slice(&hash[12..])
}
