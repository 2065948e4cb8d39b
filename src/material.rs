//! Star material setup with graceful fallback.
//!
//! Tiers are tried best first; each failure is logged and the next tier is
//! attempted. The flat tier cannot fail, so startup always gets a material.

use std::fmt;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum MaterialTier {
    /// Point sprites with the full density-wave shader.
    Full,
    /// Reduced shader for older GL profiles.
    Compatibility,
    /// Unshaded flat colour.
    Flat,
}

impl MaterialTier {
    pub const ALL: [MaterialTier; 3] = [
        MaterialTier::Full,
        MaterialTier::Compatibility,
        MaterialTier::Flat,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            MaterialTier::Full => "full",
            MaterialTier::Compatibility => "compat",
            MaterialTier::Flat => "flat",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "full" => Some(MaterialTier::Full),
            "compat" | "compatibility" => Some(MaterialTier::Compatibility),
            "flat" => Some(MaterialTier::Flat),
            _ => None,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum MaterialError {
    Compile { tier: MaterialTier, log: String },
    Unsupported(MaterialTier),
}

impl fmt::Display for MaterialError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MaterialError::Compile { tier, log } => {
                write!(f, "{} shader failed to compile: {}", tier.as_str(), log)
            }
            MaterialError::Unsupported(tier) => {
                write!(f, "{} shader not supported by this backend", tier.as_str())
            }
        }
    }
}

impl std::error::Error for MaterialError {}

/// Material handle produced by a backend.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StarMaterial {
    pub tier: MaterialTier,
    pub label: String,
}

/// A rendering backend able to build the star material at each tier.
pub trait MaterialBackend {
    fn init_full(&mut self) -> Result<StarMaterial, MaterialError>;
    fn init_compatibility(&mut self) -> Result<StarMaterial, MaterialError>;
    fn init_flat(&mut self) -> StarMaterial;
}

/// Build the best material the backend supports.
pub fn init_star_material(backend: &mut dyn MaterialBackend) -> StarMaterial {
    match backend.init_full() {
        Ok(m) => return m,
        Err(e) => log::warn!("star material: {}; trying compatibility tier", e),
    }
    match backend.init_compatibility() {
        Ok(m) => return m,
        Err(e) => log::warn!("star material: {}; using flat colour", e),
    }
    backend.init_flat()
}

/// Backend without a GPU. It "supports" whichever tiers it is told to.
#[derive(Clone, Debug)]
pub struct HeadlessBackend {
    supported: Vec<MaterialTier>,
    attempts: Vec<MaterialTier>,
}

impl Default for HeadlessBackend {
    fn default() -> Self {
        Self::new(MaterialTier::ALL.to_vec())
    }
}

impl HeadlessBackend {
    pub fn new(supported: Vec<MaterialTier>) -> Self {
        Self {
            supported,
            attempts: Vec::new(),
        }
    }

    /// Tiers tried so far, in order.
    pub fn attempts(&self) -> &[MaterialTier] {
        &self.attempts
    }

    fn try_tier(&mut self, tier: MaterialTier) -> Result<StarMaterial, MaterialError> {
        self.attempts.push(tier);
        if self.supported.contains(&tier) {
            Ok(StarMaterial {
                tier,
                label: format!("headless-{}", tier.as_str()),
            })
        } else {
            Err(MaterialError::Unsupported(tier))
        }
    }
}

impl MaterialBackend for HeadlessBackend {
    fn init_full(&mut self) -> Result<StarMaterial, MaterialError> {
        self.try_tier(MaterialTier::Full)
    }

    fn init_compatibility(&mut self) -> Result<StarMaterial, MaterialError> {
        self.try_tier(MaterialTier::Compatibility)
    }

    fn init_flat(&mut self) -> StarMaterial {
        self.attempts.push(MaterialTier::Flat);
        StarMaterial {
            tier: MaterialTier::Flat,
            label: "headless-flat".to_string(),
        }
    }
}
