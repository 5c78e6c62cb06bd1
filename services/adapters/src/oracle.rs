//! Attestation oracle over the Reservoir token status API

use std::time::Duration;

use anyhow::{Context, Result};
use async_trait::async_trait;
use floorswap_config::{Secret, SwapConfig};
use floorswap_types::{Address, Attestation, Bytes, SignedMessage, UnitId, H256, U256};
use serde::Deserialize;
use swap_orchestrator::{AttestationOracle, CollaboratorError, CollaboratorResult};
use tracing::debug;

use crate::error::http_error;

const STATUS_PATH: &str = "/oracle/tokens/status/v2";
const API_KEY_HEADER: &str = "x-api-key";

#[derive(Debug, Deserialize)]
struct StatusResponse {
    messages: Vec<TokenMessage>,
}

#[derive(Debug, Deserialize)]
struct TokenMessage {
    /// `<collection>:<token id>`
    token: String,
    message: WireMessage,
}

#[derive(Debug, Deserialize)]
struct WireMessage {
    id: H256,
    payload: Bytes,
    timestamp: u64,
    signature: Bytes,
}

impl TokenMessage {
    /// Attestation for a unit of `collection`; messages for any other collection are rejected
    fn into_attestation(self, collection: Address) -> CollaboratorResult<Attestation> {
        let (contract, token_id) = self
            .token
            .rsplit_once(':')
            .ok_or_else(|| CollaboratorError::Malformed(format!("token key '{}'", self.token)))?;
        let contract: Address = contract.parse().map_err(|_| {
            CollaboratorError::Malformed(format!("token key '{}'", self.token))
        })?;
        if contract != collection {
            return Err(CollaboratorError::Malformed(format!(
                "attestation for {contract:?} while requesting {collection:?}"
            )));
        }
        let unit_id =
            UnitId::parse(token_id).map_err(|err| CollaboratorError::Malformed(err.to_string()))?;

        Ok(Attestation {
            unit_id,
            message: SignedMessage {
                id: self.message.id,
                payload: self.message.payload,
                timestamp: U256::from(self.message.timestamp),
                signature: self.message.signature,
            },
        })
    }
}

/// Oracle client authenticated by a shared API key
pub struct ReservoirOracle {
    client: reqwest::Client,
    base_url: String,
    api_key: Secret,
}

impl ReservoirOracle {
    pub fn new(base_url: impl Into<String>, api_key: Secret, timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .context("Failed to create HTTP client")?;
        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            api_key,
        })
    }

    pub fn from_config(config: &SwapConfig) -> Result<Self> {
        Self::new(
            config.oracle.endpoint.clone(),
            config.oracle_api_key.clone(),
            Duration::from_millis(config.oracle.timeout_ms),
        )
    }
}

#[async_trait]
impl AttestationOracle for ReservoirOracle {
    async fn fetch(
        &self,
        collection: Address,
        units: &[UnitId],
    ) -> CollaboratorResult<Vec<Attestation>> {
        let query: Vec<(&str, String)> = units
            .iter()
            .map(|unit| ("tokens", format!("{collection:#x}:{unit}")))
            .collect();

        let response = self
            .client
            .get(format!("{}{}", self.base_url, STATUS_PATH))
            .header(API_KEY_HEADER, self.api_key.expose())
            .query(&query)
            .send()
            .await
            .map_err(http_error)?;

        let status = response.status();
        if !status.is_success() {
            return Err(CollaboratorError::Transport(format!(
                "oracle returned HTTP {status}"
            )));
        }

        let body: StatusResponse = response.json().await.map_err(http_error)?;
        debug!(
            requested = units.len(),
            received = body.messages.len(),
            "oracle status"
        );
        body.messages
            .into_iter()
            .map(|message| message.into_attestation(collection))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::Matcher;

    const COLLECTION: &str = "0xc1a308d95344716054d4c078831376fc78c4fd72";

    fn message_json(token: &str, id_byte: &str) -> String {
        format!(
            r#"{{"token":"{COLLECTION}:{token}","message":{{"id":"0x{}","payload":"0x0102","timestamp":1670000000,"signature":"0x{}"}}}}"#,
            id_byte.repeat(32),
            "1b".repeat(65)
        )
    }

    #[tokio::test]
    async fn test_fetch_sends_key_and_tokens() {
        let mut server = mockito::Server::new_async().await;
        let body = format!(
            r#"{{"messages":[{},{}]}}"#,
            message_json("9", "aa"),
            message_json("5", "bb")
        );
        let mock = server
            .mock("GET", STATUS_PATH)
            .match_header(API_KEY_HEADER, "demo-api-key")
            .match_query(Matcher::AllOf(vec![
                Matcher::UrlEncoded("tokens".into(), format!("{COLLECTION}:5")),
                Matcher::UrlEncoded("tokens".into(), format!("{COLLECTION}:9")),
            ]))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(body)
            .create_async()
            .await;

        let oracle = ReservoirOracle::new(
            server.url(),
            Secret::new("demo-api-key"),
            Duration::from_secs(5),
        )
        .unwrap();
        let attestations = oracle
            .fetch(
                COLLECTION.parse().unwrap(),
                &[UnitId::from(5), UnitId::from(9)],
            )
            .await
            .unwrap();

        mock.assert_async().await;
        // Response order is passed through untouched
        assert_eq!(attestations[0].unit_id, UnitId::from(9));
        assert_eq!(attestations[1].unit_id, UnitId::from(5));
        assert_eq!(attestations[1].message.id, H256::repeat_byte(0xbb));
        assert_eq!(attestations[1].message.payload, Bytes::from(vec![1, 2]));
        assert_eq!(
            attestations[1].message.timestamp,
            U256::from(1_670_000_000u64)
        );
    }

    #[tokio::test]
    async fn test_message_for_other_collection_is_malformed() {
        let mut server = mockito::Server::new_async().await;
        let foreign = format!(
            r#"{{"token":"0x{}:5","message":{{"id":"0x{}","payload":"0x01","timestamp":1670000000,"signature":"0x{}"}}}}"#,
            "dd".repeat(20),
            "aa".repeat(32),
            "1b".repeat(65)
        );
        server
            .mock("GET", STATUS_PATH)
            .match_query(Matcher::Any)
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(format!(r#"{{"messages":[{foreign}]}}"#))
            .create_async()
            .await;

        let oracle = ReservoirOracle::new(
            server.url(),
            Secret::new("demo-api-key"),
            Duration::from_secs(5),
        )
        .unwrap();
        let err = oracle
            .fetch(COLLECTION.parse().unwrap(), &[UnitId::from(5)])
            .await
            .unwrap_err();
        assert!(matches!(err, CollaboratorError::Malformed(_)));
    }

    #[tokio::test]
    async fn test_rejected_key_is_transport_failure() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", STATUS_PATH)
            .match_query(Matcher::Any)
            .with_status(401)
            .create_async()
            .await;

        let oracle =
            ReservoirOracle::new(server.url(), Secret::new("bad"), Duration::from_secs(5))
                .unwrap();
        let err = oracle
            .fetch(COLLECTION.parse().unwrap(), &[UnitId::from(5)])
            .await
            .unwrap_err();
        assert!(matches!(err, CollaboratorError::Transport(_)));
    }
}
