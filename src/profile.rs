//! Collection profile: every host, gateway and path the loader needs.
//!
//! The defaults describe the Bitcoin Pepe collection on Stacks. A config
//! file can override any field; see [`crate::config`].

use serde::{Deserialize, Serialize};

use crate::providers::EndpointCandidateList;

/// Everything that identifies one collection and where its data lives.
///
/// Endpoint templates may use the placeholders `{base}`, `{stacks}`,
/// `{contract}`, `{slug}` and (token endpoints only) `{limit}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CollectionProfile {
    /// Display name, also used for default token names (`"<name> #<id>"`).
    pub name: String,
    /// Fully qualified contract id.
    pub contract_id: String,
    /// Marketplace slug.
    pub slug: String,
    /// Marketplace API base URL (`{base}`).
    pub api_base: String,
    /// Stacks indexer base URL (`{stacks}`).
    pub stacks_api: String,
    /// Gateway used for `ipfs://` URIs (no trailing slash).
    pub ipfs_gateway: String,
    /// Gateway used for `ar://` URIs (no trailing slash).
    pub arweave_gateway: String,
    /// Content hash of the collection's image folder.
    pub content_hash: String,
    /// Image folder URL for bare filenames and hash-bearing values.
    pub image_gateway: String,
    /// Host prefixed to site-relative paths.
    pub site_host: String,
    /// Local image shown when a token has no image at all.
    pub placeholder_image: String,
    /// Token page prefix; the permalink is `{permalink_base}/{id}`.
    pub permalink_base: String,
    /// Candidate endpoints for the collection overview, in preference order.
    pub collection_endpoints: EndpointCandidateList,
    /// Candidate endpoints for token lists, in preference order.
    pub token_endpoints: EndpointCandidateList,
}

const DEFAULT_CONTENT_HASH: &str = "QmcvM2naXyg15WFaVdB7qjnqRdsPrfrjGne7wHQojmAZNP";

impl Default for CollectionProfile {
    fn default() -> Self {
        Self {
            name: "Bitcoin Pepe".to_string(),
            contract_id: "SP16SRR777TVB1WS5XSS9QT3YEZEC9JQFKYZENRAJ.bitcoin-pepe".to_string(),
            slug: "bitcoin-pepe".to_string(),
            api_base: "https://api.gamma.io".to_string(),
            stacks_api: "https://stacks-mainnet.gamma.io".to_string(),
            ipfs_gateway: "https://stxnft.mypinata.cloud/ipfs".to_string(),
            arweave_gateway: "https://arweave.net".to_string(),
            content_hash: DEFAULT_CONTENT_HASH.to_string(),
            image_gateway: format!("https://images.gamma.io/ipfs/{DEFAULT_CONTENT_HASH}/images"),
            site_host: "https://stacks.gamma.io".to_string(),
            placeholder_image: "/img/52aa708e19d541f9a9786e1b164fad82-removebg-preview-1.png"
                .to_string(),
            permalink_base: "https://gamma.io/stacks/collections/bitcoin-pepe/items".to_string(),
            collection_endpoints: EndpointCandidateList::new([
                "{base}/collections/{contract}",
                "{stacks}/collections/{contract}",
                "{base}/v1/collections/{slug}",
                "{stacks}/api/collections/{slug}",
                "https://gql.stxnft.com/v1/collections/{contract}",
            ]),
            token_endpoints: EndpointCandidateList::new([
                "{base}/collections/{contract}/tokens?limit={limit}",
                "{stacks}/api/v1/tokens?contract_id={contract}&limit={limit}",
                "{base}/v1/collections/{slug}/tokens?limit={limit}",
                "https://gql.stxnft.com/v1/tokens?collection={contract}&limit={limit}",
                "{stacks}/tokens?collection={contract}&limit={limit}",
            ]),
        }
    }
}

impl CollectionProfile {
    /// Point both API hosts at one base URL (for testing with wiremock).
    pub fn with_hosts(mut self, api_base: impl Into<String>, stacks_api: impl Into<String>) -> Self {
        self.api_base = api_base.into();
        self.stacks_api = stacks_api.into();
        self
    }

    /// Replace the collection endpoint templates.
    pub fn with_collection_endpoints(mut self, endpoints: EndpointCandidateList) -> Self {
        self.collection_endpoints = endpoints;
        self
    }

    /// Replace the token endpoint templates.
    pub fn with_token_endpoints(mut self, endpoints: EndpointCandidateList) -> Self {
        self.token_endpoints = endpoints;
        self
    }

    /// Concrete collection URLs, in preference order.
    pub fn collection_urls(&self) -> Vec<String> {
        self.collection_endpoints.render(&self.vars(None))
    }

    /// Concrete token-list URLs for `limit` entries, in preference order.
    pub fn token_urls(&self, limit: usize) -> Vec<String> {
        self.token_endpoints.render(&self.vars(Some(limit)))
    }

    /// Marketplace page for a token.
    pub fn permalink(&self, id: &str) -> String {
        format!("{}/{id}", self.permalink_base)
    }

    /// Default display name for a token with no reported name.
    pub fn default_token_name(&self, id: &str) -> String {
        format!("{} #{id}", self.name)
    }

    fn vars(&self, limit: Option<usize>) -> Vec<(&'static str, String)> {
        let mut vars = vec![
            ("base", self.api_base.clone()),
            ("stacks", self.stacks_api.clone()),
            ("contract", self.contract_id.clone()),
            ("slug", self.slug.clone()),
        ];
        if let Some(limit) = limit {
            vars.push(("limit", limit.to_string()));
        }
        vars
    }
}
