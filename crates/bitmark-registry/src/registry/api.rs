//! Registry API types
//!
//! Wire types for the bitmark registry API. Payloads are kept as raw JSON:
//! the registry owns their schema, the client only validates the envelope.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::value::RawValue;
use std::collections::HashMap;
use std::fmt;

/// Unparsed JSON payload taken verbatim from a response envelope
#[derive(Clone)]
pub struct RawPayload(Box<RawValue>);

/// One bitmark record (asset, ownership and status)
pub type BitmarkPayload = RawPayload;

/// One ledger transaction
pub type TransactionPayload = RawPayload;

/// A list of bitmarks, as returned by owner-filtered queries
pub type BitmarkCollectionPayload = RawPayload;

impl RawPayload {
    pub(crate) fn new(raw: Box<RawValue>) -> Self {
        Self(raw)
    }

    pub(crate) fn null() -> Self {
        Self(RawValue::NULL.to_owned())
    }

    /// Raw JSON text exactly as the registry sent it
    pub fn get(&self) -> &str {
        self.0.get()
    }

    /// Raw JSON bytes exactly as the registry sent them
    pub fn as_bytes(&self) -> &[u8] {
        self.0.get().as_bytes()
    }

    /// Take ownership of the raw JSON bytes
    pub fn into_bytes(self) -> Vec<u8> {
        Box::<str>::from(self.0).into_string().into_bytes()
    }

    /// Deserialize the payload into a caller-defined type
    pub fn parse<T: DeserializeOwned>(&self) -> Result<T, serde_json::Error> {
        serde_json::from_str(self.0.get())
    }

    /// Whether the payload is JSON `null`
    pub fn is_null(&self) -> bool {
        self.0.get() == "null"
    }
}

impl fmt::Debug for RawPayload {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("RawPayload").field(&self.0.get()).finish()
    }
}

impl fmt::Display for RawPayload {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.0.get())
    }
}

impl PartialEq for RawPayload {
    fn eq(&self, other: &Self) -> bool {
        self.0.get() == other.0.get()
    }
}

impl Eq for RawPayload {}

impl AsRef<[u8]> for RawPayload {
    fn as_ref(&self) -> &[u8] {
        self.as_bytes()
    }
}

impl From<RawPayload> for Vec<u8> {
    fn from(payload: RawPayload) -> Self {
        payload.into_bytes()
    }
}

/// Response envelope shared by every endpoint
///
/// `{"<payload-key>": <payload>, "message": "<string>"}`
#[derive(Debug, Deserialize)]
#[serde(transparent)]
pub struct Envelope {
    fields: HashMap<String, Box<RawValue>>,
}

impl Envelope {
    /// Decode an envelope from a response body
    pub fn from_slice(body: &[u8]) -> Result<Self, serde_json::Error> {
        serde_json::from_slice(body)
    }

    /// Server-supplied message; empty when missing or not a string
    pub fn message(&self) -> String {
        self.fields
            .get("message")
            .and_then(|raw| serde_json::from_str::<String>(raw.get()).ok())
            .unwrap_or_default()
    }

    /// Remove and return the payload stored under `key`
    ///
    /// A missing key yields a JSON `null` payload.
    pub fn take_payload(&mut self, key: &str) -> RawPayload {
        self.fields
            .remove(key)
            .map(RawPayload::new)
            .unwrap_or_else(RawPayload::null)
    }
}

/// Block header summary from GET /v1/blocks
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BlockSummary {
    /// Block height
    pub number: i64,

    /// Block hash
    #[serde(default)]
    pub hash: String,

    /// Account that mined the block
    #[serde(default)]
    pub owner: String,

    /// Bitmark issued for the block reward
    #[serde(default)]
    pub bitmark_id: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_payload_preserved_verbatim() {
        let body = br#"{"bitmark": {"id":"bm1",  "head_id" : "tx7"}, "message": ""}"#;
        let mut envelope = Envelope::from_slice(body).unwrap();
        let payload = envelope.take_payload("bitmark");
        assert_eq!(payload.get(), r#"{"id":"bm1",  "head_id" : "tx7"}"#);
    }

    #[test]
    fn test_message_decoded() {
        let envelope = Envelope::from_slice(br#"{"message": "bitmark not found"}"#).unwrap();
        assert_eq!(envelope.message(), "bitmark not found");
    }

    #[test]
    fn test_message_missing_or_not_string() {
        let envelope = Envelope::from_slice(br#"{"tx": {}}"#).unwrap();
        assert_eq!(envelope.message(), "");

        let envelope = Envelope::from_slice(br#"{"message": null}"#).unwrap();
        assert_eq!(envelope.message(), "");
    }

    #[test]
    fn test_missing_payload_is_null() {
        let mut envelope = Envelope::from_slice(br#"{"message": ""}"#).unwrap();
        assert!(envelope.take_payload("tx").is_null());
    }

    #[test]
    fn test_non_object_body_rejected() {
        assert!(Envelope::from_slice(b"[1, 2]").is_err());
        assert!(Envelope::from_slice(br#"{"bitmark":"#).is_err());
    }

    #[test]
    fn test_payload_parse() {
        #[derive(Deserialize)]
        struct Bitmark {
            id: String,
        }

        let mut envelope = Envelope::from_slice(br#"{"bitmark": {"id": "bm1"}}"#).unwrap();
        let bitmark: Bitmark = envelope.take_payload("bitmark").parse().unwrap();
        assert_eq!(bitmark.id, "bm1");
    }

    #[test]
    fn test_deserialize_block_summary() {
        let json = r#"{
            "number": 12345,
            "hash": "00000000a1b2",
            "owner": "e1pFRPqPhY2gpgJTpCiwXDnVeouY9EjHY6STtKwdN6Z4bp4sog",
            "bitmarkId": "5a1e"
        }"#;

        let block: BlockSummary = serde_json::from_str(json).unwrap();
        assert_eq!(block.number, 12345);
        assert_eq!(block.bitmark_id, "5a1e");
    }

    #[test]
    fn test_block_summary_number_only() {
        let block: BlockSummary = serde_json::from_str(r#"{"number": 7}"#).unwrap();
        assert_eq!(block.number, 7);
        assert!(block.hash.is_empty());
    }
}
