// src/magic.rs
//! Top-level SDK client.

use std::sync::Arc;

use crate::config::Config;
use crate::error::MagicError;
use crate::http_client::HttpClient;
use crate::resources::{Nft, User};
use crate::token::TokenVerifier;

/// The Magic admin client: an explicit struct of named resource handles.
///
/// ```no_run
/// use magic_admin::{Config, Magic};
///
/// # fn main() -> Result<(), magic_admin::MagicError> {
/// let magic = Magic::new(Config::new("sk_live_..."))?;
/// magic.token.validate("WyIweGY4...")?;
/// # Ok(())
/// # }
/// ```
#[derive(Clone, Debug)]
pub struct Magic {
    /// DID token verifier, configured with the SDK's `nbf` grace period.
    pub token: TokenVerifier,
    /// User metadata and logout operations.
    pub user: User,
    /// ERC721/ERC1155 minting operations.
    pub nft: Nft,
}

impl Magic {
    /// Builds a client from an explicit configuration.
    ///
    /// # Errors
    /// [`MagicError::ApiConnection`] if the HTTP client cannot be
    /// constructed.
    pub fn new(config: Config) -> Result<Self, MagicError> {
        let client = Arc::new(HttpClient::new(&config)?);

        Ok(Magic {
            token: TokenVerifier::new(config.nbf_grace_period_s),
            user: User::new(client.clone()),
            nft: Nft::new(client),
        })
    }

    /// Builds a client from the `MAGIC_API_SECRET_KEY` environment
    /// variable.
    pub fn from_env() -> Result<Self, MagicError> {
        Magic::new(Config::from_env()?)
    }
}
