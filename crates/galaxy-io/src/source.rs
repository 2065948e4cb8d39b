use std::path::{Path, PathBuf};

use galaxy_gen::{GalaxyGenParams, GeneratedGalaxy, generate_with};

use crate::payload::read_payload;

/// Where a galaxy comes from.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum GalaxySource {
    /// Generate locally from a seed string.
    Generate { seed: String },
    /// Load a previously exported API payload.
    File(PathBuf),
}

impl GalaxySource {
    pub fn seed(seed: impl Into<String>) -> Self {
        GalaxySource::Generate { seed: seed.into() }
    }

    pub fn file(path: impl AsRef<Path>) -> Self {
        GalaxySource::File(path.as_ref().to_path_buf())
    }

    pub fn describe(&self) -> String {
        match self {
            GalaxySource::Generate { seed } => format!("seed {:?}", seed),
            GalaxySource::File(path) => format!("file {}", path.display()),
        }
    }

    /// Produce the galaxy. Generation cannot fail; file loads can.
    pub fn load(&self, params: &GalaxyGenParams) -> Result<GeneratedGalaxy, SourceError> {
        match self {
            GalaxySource::Generate { seed } => Ok(generate_with(seed, params)),
            GalaxySource::File(path) => read_payload(path)?.into_galaxy(),
        }
    }
}

#[derive(Debug)]
pub enum SourceError {
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },
    Invalid(String),
}

impl std::fmt::Display for SourceError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SourceError::Io { path, source } => {
                write!(f, "cannot read {}: {}", path.display(), source)
            }
            SourceError::Parse { path, source } => {
                write!(f, "bad galaxy payload in {}: {}", path.display(), source)
            }
            SourceError::Invalid(msg) => write!(f, "invalid galaxy payload: {}", msg),
        }
    }
}

impl std::error::Error for SourceError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SourceError::Io { source, .. } => Some(source),
            SourceError::Parse { source, .. } => Some(source),
            SourceError::Invalid(_) => None,
        }
    }
}
