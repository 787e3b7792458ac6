pub mod dex;
pub mod species;
pub mod tiers;
pub mod writer;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("missing key: nothing at JSON pointer '{0}'")]
    MissingKey(String),

    #[error("value at JSON pointer '{0}' is not a list")]
    NotAList(String),

    #[error("malformed species entry {index} under '{pointer}': {source}")]
    Species {
        pointer: String,
        index: usize,
        #[source]
        source: serde_json::Error,
    },
}
