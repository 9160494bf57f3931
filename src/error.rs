// src/error.rs
//! Error types for the Magic admin SDK.
//!
//! Two layers:
//! - [`DidTokenError`]: every way a DID token can fail verification. Each
//!   failure mode is a distinct variant so callers can discriminate
//!   "malformed" from "expired" from "signature mismatch" and map them to
//!   different user-facing outcomes.
//! - [`MagicError`]: the SDK-level error surfaced by resource operations,
//!   wrapping token errors and the Magic API's HTTP failure modes.
//!
//! Nothing here is fatal to the process; every variant is expected and
//! recoverable by the caller.

use thiserror::Error;

/// A DID token verification failure.
///
/// Produced by the token codec and verifier. Verification is deterministic,
/// so retrying with the same input yields the same variant (except across
/// the expiration boundary, which is time-dependent).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DidTokenError {
    /// The token could not be decoded into `[proof, claim]`: invalid
    /// base64/UTF-8, invalid JSON, wrong arity, or a claim that is not
    /// itself a JSON-serialized string. `reason` names the sub-case and
    /// carries the underlying decode failure for diagnostics.
    #[error("DID token is malformed. {reason}")]
    MalformedToken { reason: String },

    /// One or more required claim fields are absent. The list is sorted
    /// for a stable, reproducible message.
    #[error("DID token is missing required field(s): {0:?}")]
    MissingClaimFields(Vec<String>),

    /// The issuer has fewer than three colon-delimited segments.
    #[error(
        "given issuer {issuer:?} is malformed. It has to follow the \
         did:method-name:method-specific-id format."
    )]
    MalformedIssuer { issuer: String },

    /// The address recovered from the proof does not match the address
    /// embedded in the claim's issuer.
    #[error(
        "signature mismatch between \"proof\" and \"claim\". Please \
         generate a new token with an intended issuer."
    )]
    SignatureMismatch,

    /// The current time is past the token's `ext` timestamp.
    #[error("given DID token has expired. Please generate a new one.")]
    TokenExpired,

    /// The current time is before the token's `nbf` timestamp, even after
    /// applying the clock-skew grace period.
    #[error(
        "given DID token cannot be used at this time. Please check the \
         \"nbf\" field and regenerate a new token with a suitable value."
    )]
    TokenNotYetValid,
}

/// An SDK-level failure: either a DID token error or a Magic API failure.
#[derive(Debug, Error)]
pub enum MagicError {
    /// A DID token failed decoding or verification.
    #[error(transparent)]
    DidToken(#[from] DidTokenError),

    /// The API rejected the secret key (HTTP 401), or no key was configured.
    #[error("authentication error: {0}")]
    Authentication(String),

    /// The API rejected the request parameters (HTTP 400).
    #[error("bad request: {0}")]
    BadRequest(String),

    /// The API refused the operation (HTTP 403).
    #[error("forbidden: {0}")]
    Forbidden(String),

    /// The API rate limit was hit (HTTP 429).
    #[error("rate limited by the Magic API: {0}")]
    RateLimiting(String),

    /// Any other non-2xx API response.
    #[error("Magic API error (status {status}): {message}")]
    Api { status: u16, message: String },

    /// The API could not be reached at the transport level.
    #[error("failed to reach the Magic API: {0}")]
    ApiConnection(#[from] reqwest::Error),
}
