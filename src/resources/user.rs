// src/resources/user.rs
//! User resource: metadata lookup and logout.

use std::sync::Arc;

use reqwest::Method;
use serde_json::json;

use crate::error::MagicError;
use crate::http_client::{HttpClient, MagicResponse};
use crate::token::codec;

const V1_USER_INFO: &str = "/v1/admin/auth/user/get";
const V2_USER_LOGOUT: &str = "/v2/admin/auth/user/logout";

/// Handle for user operations. Obtained from [`Magic`](crate::Magic);
/// every variant of each operation normalizes its argument to an issuer
/// or public address before hitting the API.
#[derive(Clone, Debug)]
pub struct User {
    client: Arc<HttpClient>,
}

impl User {
    pub(crate) fn new(client: Arc<HttpClient>) -> Self {
        User { client }
    }

    /// Fetches metadata for the user identified by a DID issuer string.
    pub async fn get_metadata_by_issuer(
        &self,
        issuer: &str,
    ) -> Result<MagicResponse, MagicError> {
        self.client
            .request(Method::GET, V1_USER_INFO, Some(&[("issuer", issuer)]), None)
            .await
    }

    /// Fetches metadata for the user identified by an Ethereum public
    /// address.
    pub async fn get_metadata_by_public_address(
        &self,
        public_address: &str,
    ) -> Result<MagicResponse, MagicError> {
        self.get_metadata_by_issuer(&codec::construct_issuer_with_public_address(
            public_address,
        ))
        .await
    }

    /// Fetches metadata for the user identified by a DID token.
    ///
    /// Decodes the token to extract its issuer; the token is not
    /// otherwise verified here.
    pub async fn get_metadata_by_token(
        &self,
        did_token: &str,
    ) -> Result<MagicResponse, MagicError> {
        let issuer = codec::get_issuer(did_token)?;
        self.get_metadata_by_issuer(&issuer).await
    }

    /// Logs out the user identified by an Ethereum public address,
    /// invalidating their sessions.
    pub async fn logout_by_public_address(
        &self,
        public_address: &str,
    ) -> Result<MagicResponse, MagicError> {
        self.client
            .request(
                Method::POST,
                V2_USER_LOGOUT,
                None,
                Some(&json!({ "public_address": public_address })),
            )
            .await
    }

    /// Logs out the user identified by a DID issuer string.
    pub async fn logout_by_issuer(&self, issuer: &str) -> Result<MagicResponse, MagicError> {
        let public_address = codec::parse_public_address_from_issuer(issuer)?;
        self.logout_by_public_address(&public_address).await
    }

    /// Logs out the user identified by a DID token.
    pub async fn logout_by_token(&self, did_token: &str) -> Result<MagicResponse, MagicError> {
        let public_address = codec::get_public_address(did_token)?;
        self.logout_by_public_address(&public_address).await
    }
}
