// src/resources/mod.rs
//! Resource operations over the Magic admin API.
//!
//! Thin pass-through wrappers: each operation resolves its identity
//! argument (issuer, public address, or DID token) via the token codec
//! and forwards it to a REST endpoint through the shared [`HttpClient`].
//!
//! [`HttpClient`]: crate::http_client::HttpClient

pub mod nft;
pub mod user;

pub use nft::Nft;
pub use user::User;
