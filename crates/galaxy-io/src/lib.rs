//! Galaxy interchange: the API payload, `config.json` discovery and galaxy sources.
#![forbid(unsafe_code)]

pub mod discovery;
pub mod payload;
pub mod source;

pub use discovery::{
    DiscoveryConfig, DiscoveryError, probe_free_port, read_discovery, write_discovery,
};
pub use payload::{GalaxyMetadata, GalaxyPayload, read_payload, write_payload};
pub use source::{GalaxySource, SourceError};
