// src/resources/nft.rs
//! NFT resource: ERC721 and ERC1155 minting.

use std::sync::Arc;

use reqwest::Method;
use serde_json::json;

use crate::error::MagicError;
use crate::http_client::{HttpClient, MagicResponse};

const V1_START_MINT721: &str = "/v1/admin/nft/mint/721_mint";
const V1_START_MINT1155: &str = "/v1/admin/nft/mint/1155_mint";

/// Handle for NFT minting operations. Obtained from
/// [`Magic`](crate::Magic); each operation forwards its parameters to
/// the minting endpoint and returns the API's `request_id` payload.
#[derive(Clone, Debug)]
pub struct Nft {
    client: Arc<HttpClient>,
}

impl Nft {
    pub(crate) fn new(client: Arc<HttpClient>) -> Self {
        Nft { client }
    }

    /// Starts minting `quantity` ERC721 tokens from the given contract to
    /// the destination address.
    pub async fn start_mint721(
        &self,
        contract_id: &str,
        quantity: u64,
        destination_address: &str,
    ) -> Result<MagicResponse, MagicError> {
        self.client
            .request(
                Method::POST,
                V1_START_MINT721,
                None,
                Some(&json!({
                    "contract_id": contract_id,
                    "quantity": quantity,
                    "destination_address": destination_address,
                })),
            )
            .await
    }

    /// Starts minting `quantity` ERC1155 tokens with the given token id
    /// from the given contract to the destination address.
    pub async fn start_mint1155(
        &self,
        contract_id: &str,
        quantity: u64,
        token_id: u64,
        destination_address: &str,
    ) -> Result<MagicResponse, MagicError> {
        self.client
            .request(
                Method::POST,
                V1_START_MINT1155,
                None,
                Some(&json!({
                    "contract_id": contract_id,
                    "quantity": quantity,
                    "token_id": token_id,
                    "destination_address": destination_address,
                })),
            )
            .await
    }
}
