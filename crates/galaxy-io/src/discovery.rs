//! `config.json`: how a client finds the galaxy API.

use std::net::TcpListener;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DiscoveryConfig {
    pub server_port: u16,
    pub api_base_url: String,
}

impl DiscoveryConfig {
    pub fn for_port(port: u16) -> Self {
        Self {
            server_port: port,
            api_base_url: format!("http://localhost:{}/api", port),
        }
    }

    /// URL of the galaxy endpoint for `seed`.
    pub fn galaxy_url(&self, seed: &str) -> String {
        format!("{}/galaxy/{}", self.api_base_url.trim_end_matches('/'), seed)
    }
}

#[derive(Debug)]
pub enum DiscoveryError {
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },
    NoFreePort {
        base: u16,
        attempts: u16,
    },
}

impl std::fmt::Display for DiscoveryError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DiscoveryError::Io { path, source } => write!(f, "{}: {}", path.display(), source),
            DiscoveryError::Parse { path, source } => {
                write!(f, "bad discovery file {}: {}", path.display(), source)
            }
            DiscoveryError::NoFreePort { base, attempts } => {
                write!(f, "no free port in {} tries from {}", attempts, base)
            }
        }
    }
}

impl std::error::Error for DiscoveryError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            DiscoveryError::Io { source, .. } => Some(source),
            DiscoveryError::Parse { source, .. } => Some(source),
            DiscoveryError::NoFreePort { .. } => None,
        }
    }
}

/// First port at or above `base` that can be bound on localhost.
pub fn probe_free_port(base: u16, attempts: u16) -> Result<u16, DiscoveryError> {
    for offset in 0..attempts {
        let Some(port) = base.checked_add(offset) else {
            break;
        };
        match TcpListener::bind(("127.0.0.1", port)) {
            Ok(_listener) => {
                if offset > 0 {
                    log::info!("port {} busy; using {}", base, port);
                }
                return Ok(port);
            }
            Err(e) => log::debug!("port {} unavailable: {}", port, e),
        }
    }
    Err(DiscoveryError::NoFreePort { base, attempts })
}

pub fn write_discovery(path: &Path, cfg: &DiscoveryConfig) -> Result<(), DiscoveryError> {
    let json = serde_json::to_string_pretty(cfg).map_err(|source| DiscoveryError::Parse {
        path: path.to_path_buf(),
        source,
    })?;
    std::fs::write(path, json).map_err(|source| DiscoveryError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    log::info!("discovery: {} -> {}", path.display(), cfg.api_base_url);
    Ok(())
}

pub fn read_discovery(path: &Path) -> Result<DiscoveryConfig, DiscoveryError> {
    let s = std::fs::read_to_string(path).map_err(|source| DiscoveryError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&s).map_err(|source| DiscoveryError::Parse {
        path: path.to_path_buf(),
        source,
    })
}
