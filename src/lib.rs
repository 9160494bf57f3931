// src/lib.rs
//! # Magic admin SDK
//!
//! Server-side SDK for [Magic](https://magic.link) authentication. The
//! core is a self-contained DID token verifier:
//!
//! 1. **Codec** ([`token::codec`]): decodes the base64url wire format
//!    into a signed proof and an order-preserving claim map, and checks
//!    the required claim fields.
//! 2. **Verifier** ([`token::verifier`]): recovers the secp256k1 signer
//!    of the claim, compares it against the address embedded in the
//!    issuer, and enforces the `nbf`/`ext` validity window with a
//!    configurable clock-skew grace period.
//!
//! Around that core sit thin collaborators: an HTTP client for the Magic
//! admin API, user and NFT resource operations, and bearer-header
//! parsing.
//!
//! ## Quick start
//! ```no_run
//! use magic_admin::{Config, Magic};
//!
//! # fn main() -> Result<(), magic_admin::MagicError> {
//! let magic = Magic::new(Config::new("sk_live_..."))?;
//!
//! match magic.token.validate("WyIweGY4...") {
//!     Ok(()) => println!("token is valid"),
//!     Err(e) => println!("rejected: {e}"),
//! }
//! # Ok(())
//! # }
//! ```
//!
//! The verifier is stateless; every call is independent and safe to run
//! in parallel. Its only I/O is reading the wall clock once per call.

pub mod config;
pub mod error;
pub mod http_client;
pub mod magic;
pub mod resources;
pub mod token;
pub mod utils;

pub use crate::config::Config;
pub use crate::error::{DidTokenError, MagicError};
pub use crate::http_client::MagicResponse;
pub use crate::magic::Magic;
pub use crate::token::{Claim, TokenVerifier};
