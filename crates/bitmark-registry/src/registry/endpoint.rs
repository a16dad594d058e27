//! Registry endpoint table
//!
//! Every query the client issues is described by one [`Endpoint`]: where it
//! lives, which envelope key carries its payload, and which query flags it
//! accepts.

use url::Url;

/// A registry GET endpoint
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Endpoint {
    /// GET /v1/txs/{txId}
    Transaction,
    /// GET /v1/bitmarks/{bitmarkId}
    Bitmark,
    /// GET /v1/bitmarks
    BitmarksByOwner,
    /// GET /v1/blocks
    Blocks,
    /// GET /registry/v1/bitmarks/{txId}
    LegacyBitmark,
}

impl Endpoint {
    /// Fixed path segments preceding the optional id segment
    pub fn prefix(self) -> &'static [&'static str] {
        match self {
            Endpoint::Transaction => &["v1", "txs"],
            Endpoint::Bitmark | Endpoint::BitmarksByOwner => &["v1", "bitmarks"],
            Endpoint::Blocks => &["v1", "blocks"],
            Endpoint::LegacyBitmark => &["registry", "v1", "bitmarks"],
        }
    }

    /// Whether the path ends with a caller-supplied id
    pub fn takes_id(self) -> bool {
        matches!(
            self,
            Endpoint::Transaction | Endpoint::Bitmark | Endpoint::LegacyBitmark
        )
    }

    /// Envelope key holding the payload
    pub fn payload_key(self) -> &'static str {
        match self {
            Endpoint::Transaction => "tx",
            Endpoint::Bitmark | Endpoint::LegacyBitmark => "bitmark",
            Endpoint::BitmarksByOwner => "bitmarks",
            Endpoint::Blocks => "blocks",
        }
    }

    /// Whether `pending` / `provenance` flags are honoured
    pub fn accepts_flags(self) -> bool {
        matches!(self, Endpoint::Bitmark | Endpoint::BitmarksByOwner)
    }

    /// Whether the `owner` filter is honoured
    pub fn accepts_owner(self) -> bool {
        matches!(self, Endpoint::BitmarksByOwner)
    }

    /// Build the request URL for this endpoint
    ///
    /// The base URL's own path, query and fragment are replaced. `id` is
    /// appended as a single path segment (percent-encoded) and is ignored by
    /// endpoints that do not take one.
    pub fn url(self, base: &Url, id: Option<&str>, query: &Query<'_>) -> Url {
        let mut url = base.clone();
        url.set_fragment(None);
        url.set_query(None);

        // Base URLs are checked for cannot-be-a-base at client construction.
        if let Ok(mut segments) = url.path_segments_mut() {
            segments.clear().extend(self.prefix());
            if self.takes_id() {
                segments.push(id.unwrap_or_default());
            }
        }

        let pairs = query.pairs(self);
        if !pairs.is_empty() {
            url.query_pairs_mut().extend_pairs(pairs);
        }

        url
    }
}

impl std::fmt::Display for Endpoint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Endpoint::Transaction => "transaction",
            Endpoint::Bitmark => "bitmark",
            Endpoint::BitmarksByOwner => "bitmarks-by-owner",
            Endpoint::Blocks => "blocks",
            Endpoint::LegacyBitmark => "legacy-bitmark",
        };
        f.write_str(name)
    }
}

/// Optional query parameters
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Query<'a> {
    /// Owner account filter; empty means no filter
    pub owner: Option<&'a str>,

    /// Include not-yet-confirmed records
    pub pending: bool,

    /// Include the ownership-transfer chain
    pub provenance: bool,
}

impl<'a> Query<'a> {
    /// Query with only the flag set
    pub fn flags(pending: bool, provenance: bool) -> Self {
        Self {
            owner: None,
            pending,
            provenance,
        }
    }

    /// Set the owner filter
    pub fn with_owner(mut self, owner: &'a str) -> Self {
        self.owner = Some(owner);
        self
    }

    /// Key/value pairs this query contributes to `endpoint`
    ///
    /// Flags are only ever emitted as `true`; a cleared flag is omitted.
    fn pairs(&self, endpoint: Endpoint) -> Vec<(&'static str, &'a str)> {
        let mut pairs = Vec::new();

        if endpoint.accepts_owner() {
            if let Some(owner) = self.owner.filter(|o| !o.is_empty()) {
                pairs.push(("owner", owner));
            }
        }

        if endpoint.accepts_flags() {
            if self.pending {
                pairs.push(("pending", "true"));
            }
            if self.provenance {
                pairs.push(("provenance", "true"));
            }
        }

        pairs
    }
}
