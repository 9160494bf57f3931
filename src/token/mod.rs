// src/token/mod.rs
//! DID token handling: the wire-format codec and the cryptographic
//! verifier.

pub mod codec;
pub mod verifier;

pub use codec::Claim;
pub use verifier::TokenVerifier;
