//! NFT holdings index over the Alchemy NFT API (v3)
//!
//! `getNFTsForOwner` is paginated; pages are followed through `pageKey`
//! until the index reports no continuation, preserving the reported order.

use std::time::Duration;

use anyhow::{Context, Result};
use async_trait::async_trait;
use floorswap_config::{Secret, SwapConfig};
use floorswap_types::{Address, UnitId};
use serde::Deserialize;
use swap_orchestrator::{CollaboratorError, CollaboratorResult, HoldingsIndex};
use tracing::debug;

use crate::error::http_error;

const PAGE_SIZE: u32 = 100;

/// Guards against an index that keeps returning continuation keys
const MAX_PAGES: usize = 1_000;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct OwnedNftsPage {
    owned_nfts: Vec<OwnedNft>,
    #[serde(default)]
    page_key: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct OwnedNft {
    token_id: String,
}

/// Holdings index client
pub struct AlchemyHoldings {
    client: reqwest::Client,
    base_url: String,
    api_key: Secret,
}

impl AlchemyHoldings {
    pub fn new(base_url: impl Into<String>, api_key: Secret) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .context("Failed to create HTTP client")?;
        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            api_key,
        })
    }

    pub fn from_config(config: &SwapConfig) -> Result<Self> {
        let api_key = config
            .holdings
            .api_key
            .clone()
            .context("holdings.api_key is required for the holdings index")?;
        Self::new(config.holdings_endpoint(), api_key)
    }

    async fn fetch_page(
        &self,
        owner: Address,
        collection: Address,
        page_key: Option<&str>,
    ) -> CollaboratorResult<OwnedNftsPage> {
        let url = format!(
            "{}/nft/v3/{}/getNFTsForOwner",
            self.base_url,
            self.api_key.expose()
        );
        let mut query = vec![
            ("owner", format!("{owner:#x}")),
            ("contractAddresses[]", format!("{collection:#x}")),
            ("withMetadata", "false".to_string()),
            ("pageSize", PAGE_SIZE.to_string()),
        ];
        if let Some(key) = page_key {
            query.push(("pageKey", key.to_string()));
        }

        let response = self
            .client
            .get(url)
            .query(&query)
            .send()
            .await
            .map_err(http_error)?;

        let status = response.status();
        if !status.is_success() {
            return Err(CollaboratorError::Transport(format!(
                "holdings index returned HTTP {status}"
            )));
        }
        response.json().await.map_err(http_error)
    }
}

#[async_trait]
impl HoldingsIndex for AlchemyHoldings {
    async fn units_owned_by(
        &self,
        owner: Address,
        collection: Address,
    ) -> CollaboratorResult<Vec<UnitId>> {
        let mut units = Vec::new();
        let mut page_key: Option<String> = None;

        for page in 0..MAX_PAGES {
            let batch = self
                .fetch_page(owner, collection, page_key.as_deref())
                .await?;
            for nft in &batch.owned_nfts {
                let unit = UnitId::parse(&nft.token_id)
                    .map_err(|err| CollaboratorError::Malformed(err.to_string()))?;
                units.push(unit);
            }
            debug!(page, received = batch.owned_nfts.len(), "holdings page");

            match batch.page_key {
                Some(next) if !next.is_empty() => page_key = Some(next),
                _ => return Ok(units),
            }
        }

        Err(CollaboratorError::Malformed(format!(
            "holdings index still paginating after {MAX_PAGES} pages"
        )))
    }
}
