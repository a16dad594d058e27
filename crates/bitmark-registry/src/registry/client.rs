//! Registry HTTP client
//!
//! Provides a blocking HTTP client for the bitmark ledger registry.

use super::api::{
    BitmarkCollectionPayload, BitmarkPayload, BlockSummary, Envelope, RawPayload,
    TransactionPayload,
};
use super::endpoint::{Endpoint, Query};
use crate::config::{ClientConfig, ConfigError};
use reqwest::blocking::Client;
use reqwest::StatusCode;
use thiserror::Error;
use tracing::{debug, trace};
use url::Url;

/// Error message used when a failed response carries no `message`
pub const SERVER_ERROR_FALLBACK: &str = "registry request failed";

/// Errors that can occur during registry operations
#[derive(Debug, Error)]
pub enum RegistryError {
    /// Bad base URL or HTTP client setup
    #[error("Invalid registry configuration: {0}")]
    Config(String),

    /// Rejected [`ClientConfig`]
    #[error("Invalid registry configuration: {0}")]
    InvalidConfig(#[from] ConfigError),

    /// Network, TLS or timeout failure
    #[error("HTTP error: {0}")]
    Transport(#[source] reqwest::Error),

    /// Response stream ended before the body was read
    #[error("can not read response body: {0}")]
    BodyRead(#[source] reqwest::Error),

    /// Body is not a valid envelope
    #[error("error when parsing response body: {}", String::from_utf8_lossy(.body))]
    Parse {
        /// Response body as received
        body: Vec<u8>,
        /// Decoder failure
        #[source]
        source: serde_json::Error,
    },

    /// Non-200 response; displays as the server message
    #[error("{message}")]
    Server {
        /// HTTP status code
        status: u16,
        /// Server message, or [`SERVER_ERROR_FALLBACK`]
        message: String,
    },

    /// A collection that must hold at least one element was empty
    #[error("registry returned no {0}")]
    EmptyResult(&'static str),
}

/// Fieldless discriminant of [`RegistryError`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Bad base URL or configuration, raised at construction
    Config,
    /// Network, TLS or timeout failure
    Transport,
    /// Incomplete response body
    BodyRead,
    /// Body is not a valid envelope or payload
    Parse,
    /// Non-200 response
    Server,
    /// Required collection was empty
    EmptyResult,
}

impl RegistryError {
    /// Kind of failure
    pub fn kind(&self) -> ErrorKind {
        match self {
            RegistryError::Config(_) | RegistryError::InvalidConfig(_) => ErrorKind::Config,
            RegistryError::Transport(_) => ErrorKind::Transport,
            RegistryError::BodyRead(_) => ErrorKind::BodyRead,
            RegistryError::Parse { .. } => ErrorKind::Parse,
            RegistryError::Server { .. } => ErrorKind::Server,
            RegistryError::EmptyResult(_) => ErrorKind::EmptyResult,
        }
    }

    /// HTTP status of a [`RegistryError::Server`] error
    pub fn status(&self) -> Option<u16> {
        match self {
            RegistryError::Server { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Raw response body of a [`RegistryError::Parse`] error
    pub fn body(&self) -> Option<&[u8]> {
        match self {
            RegistryError::Parse { body, .. } => Some(body),
            _ => None,
        }
    }
}

/// Registry client for querying bitmarks, transactions and blocks
///
/// Holds no per-call state; clones share the underlying connection pool.
#[derive(Debug, Clone)]
pub struct RegistryClient {
    /// HTTP client
    client: Client,

    /// Base URL for the registry
    base_url: Url,

    config: ClientConfig,
}

impl RegistryClient {
    /// Create a new registry client with default timeouts
    pub fn new(base_uri: &str) -> Result<Self, RegistryError> {
        Self::with_config(base_uri, ClientConfig::default())
    }

    /// Create a new registry client with a custom configuration
    ///
    /// Performs no network I/O.
    pub fn with_config(base_uri: &str, config: ClientConfig) -> Result<Self, RegistryError> {
        config.validate()?;

        let base_url = parse_base_url(base_uri)?;

        trace!(
            connect = ?config.connect_timeout,
            tls = ?config.tls_timeout,
            request = ?config.request_timeout,
            "configuring registry transport"
        );

        let client = Client::builder()
            .timeout(config.request_timeout)
            .connect_timeout(config.establish_timeout())
            .user_agent(config.user_agent.clone())
            .build()
            .map_err(|e| RegistryError::Config(format!("failed to build HTTP client: {}", e)))?;

        Ok(Self {
            client,
            base_url,
            config,
        })
    }

    /// Base URL requests are resolved against
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Active configuration
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Get a transaction
    ///
    /// GET /v1/txs/{txId}
    pub fn get_transaction(&self, tx_id: &str) -> Result<TransactionPayload, RegistryError> {
        self.fetch_payload(Endpoint::Transaction, Some(tx_id), &Query::default())
    }

    /// Get a bitmark
    ///
    /// GET /v1/bitmarks/{bitmarkId}?pending=true&provenance=true
    pub fn get_bitmark(
        &self,
        bitmark_id: &str,
        pending: bool,
        provenance: bool,
    ) -> Result<BitmarkPayload, RegistryError> {
        self.fetch_payload(
            Endpoint::Bitmark,
            Some(bitmark_id),
            &Query::flags(pending, provenance),
        )
    }

    /// List bitmarks, optionally filtered by owner
    ///
    /// GET /v1/bitmarks?owner={owner}&pending=true&provenance=true
    ///
    /// An empty `owner` applies no owner filter.
    pub fn get_bitmarks_by_owner(
        &self,
        owner: &str,
        pending: bool,
        provenance: bool,
    ) -> Result<BitmarkCollectionPayload, RegistryError> {
        self.fetch_payload(
            Endpoint::BitmarksByOwner,
            None,
            &Query::flags(pending, provenance).with_owner(owner),
        )
    }

    /// Get the height of the latest block
    ///
    /// GET /v1/blocks, returning the `number` of the first block listed.
    pub fn get_latest_block_number(&self) -> Result<i64, RegistryError> {
        let (payload, body) = self.fetch(Endpoint::Blocks, None, &Query::default())?;

        let blocks: Vec<BlockSummary> = payload
            .parse()
            .map_err(|source| RegistryError::Parse { body, source })?;

        blocks
            .first()
            .map(|block| block.number)
            .ok_or(RegistryError::EmptyResult("blocks"))
    }

    /// Get a bitmark through the pre-v1 registry path
    ///
    /// GET /registry/v1/bitmarks/{txId}
    pub fn get_legacy_bitmark(&self, tx_id: &str) -> Result<BitmarkPayload, RegistryError> {
        self.fetch_payload(Endpoint::LegacyBitmark, Some(tx_id), &Query::default())
    }

    fn fetch_payload(
        &self,
        endpoint: Endpoint,
        id: Option<&str>,
        query: &Query<'_>,
    ) -> Result<RawPayload, RegistryError> {
        self.fetch(endpoint, id, query).map(|(payload, _)| payload)
    }

    /// Issue one GET and unwrap its envelope
    ///
    /// Returns the payload together with the raw body, which callers that
    /// decode the payload further need for [`RegistryError::Parse`].
    fn fetch(
        &self,
        endpoint: Endpoint,
        id: Option<&str>,
        query: &Query<'_>,
    ) -> Result<(RawPayload, Vec<u8>), RegistryError> {
        let url = endpoint.url(&self.base_url, id, query);
        debug!(%endpoint, %url, "registry request");

        let response = self
            .client
            .get(url)
            .send()
            .map_err(RegistryError::Transport)?;

        let status = response.status();

        // Consumes the response, releasing the connection on every path below.
        let body = response.bytes().map_err(RegistryError::BodyRead)?.to_vec();
        debug!(%endpoint, status = status.as_u16(), len = body.len(), "registry response");

        let mut envelope = match Envelope::from_slice(&body) {
            Ok(envelope) => envelope,
            Err(source) => return Err(RegistryError::Parse { body, source }),
        };

        if status != StatusCode::OK {
            return Err(server_error(status, envelope.message()));
        }

        let payload = envelope.take_payload(endpoint.payload_key());
        Ok((payload, body))
    }
}

fn server_error(status: StatusCode, message: String) -> RegistryError {
    let message = if message.is_empty() {
        SERVER_ERROR_FALLBACK.to_string()
    } else {
        message
    };

    RegistryError::Server {
        status: status.as_u16(),
        message,
    }
}

/// Parse and check a registry base URL
fn parse_base_url(base_uri: &str) -> Result<Url, RegistryError> {
    let url = Url::parse(base_uri)
        .map_err(|e| RegistryError::Config(format!("{}: {}", base_uri, e)))?;

    if url.cannot_be_a_base() {
        return Err(RegistryError::Config(format!(
            "{}: URL cannot carry a path",
            base_uri
        )));
    }

    match url.scheme() {
        "http" | "https" => Ok(url),
        scheme => Err(RegistryError::Config(format!(
            "{}: unsupported scheme '{}'",
            base_uri, scheme
        ))),
    }
}
