//! JSON body of `GET /api/galaxy/:seed`.

use std::path::Path;

use galaxy_gen::{BlackHole, GalaxyPhysics, GalaxyType, GeneratedGalaxy, Particle};
use serde::{Deserialize, Serialize};

use crate::source::SourceError;

/// Physics fields flattened alongside the summary fields.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GalaxyMetadata {
    #[serde(flatten)]
    pub physics: GalaxyPhysics,
    pub galaxy_type: GalaxyType,
    pub has_bar: bool,
    pub total_particles: usize,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GalaxyPayload {
    pub seed: String,
    pub particles: Vec<Particle>,
    pub black_holes: Vec<BlackHole>,
    pub metadata: GalaxyMetadata,
}

impl GalaxyPayload {
    pub fn from_galaxy(galaxy: &GeneratedGalaxy) -> Self {
        Self {
            seed: galaxy.seed.clone(),
            particles: galaxy.particles.clone(),
            black_holes: galaxy.black_holes.clone(),
            metadata: GalaxyMetadata {
                physics: galaxy.physics.clone(),
                galaxy_type: galaxy.galaxy_type,
                has_bar: galaxy.has_bar(),
                total_particles: galaxy.total_particles(),
            },
        }
    }

    /// Compact JSON. Same galaxy, same bytes.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    pub fn from_json(s: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(s)
    }

    /// Check the summary fields against the body and rebuild the galaxy.
    pub fn into_galaxy(self) -> Result<GeneratedGalaxy, SourceError> {
        let meta = &self.metadata;
        if meta.total_particles != self.particles.len() {
            return Err(SourceError::Invalid(format!(
                "totalParticles is {} but {} particles present",
                meta.total_particles,
                self.particles.len()
            )));
        }
        if meta.has_bar != meta.physics.bar.is_some() {
            return Err(SourceError::Invalid(format!(
                "hasBar is {} but barParams {}",
                meta.has_bar,
                if meta.physics.bar.is_some() { "present" } else { "absent" }
            )));
        }
        let mut seen = vec![false; self.particles.len()];
        for p in &self.particles {
            let slot = p.index as usize;
            match seen.get_mut(slot) {
                Some(flag) if !*flag => *flag = true,
                _ => {
                    return Err(SourceError::Invalid(format!(
                        "particle index {} duplicated or out of range",
                        p.index
                    )));
                }
            }
            if !p.position.is_finite() {
                return Err(SourceError::Invalid(format!(
                    "particle {} has a non-finite position",
                    p.index
                )));
            }
        }
        Ok(GeneratedGalaxy {
            seed: self.seed,
            galaxy_type: self.metadata.galaxy_type,
            physics: self.metadata.physics,
            particles: self.particles,
            black_holes: self.black_holes,
        })
    }
}

pub fn write_payload(path: &Path, payload: &GalaxyPayload) -> Result<(), SourceError> {
    let json = payload.to_json().map_err(|source| SourceError::Parse {
        path: path.to_path_buf(),
        source,
    })?;
    std::fs::write(path, json).map_err(|source| SourceError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    log::info!(
        "wrote galaxy {:?} ({} particles) to {}",
        payload.seed,
        payload.particles.len(),
        path.display()
    );
    Ok(())
}

pub fn read_payload(path: &Path) -> Result<GalaxyPayload, SourceError> {
    let s = std::fs::read_to_string(path).map_err(|source| SourceError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    GalaxyPayload::from_json(&s).map_err(|source| SourceError::Parse {
        path: path.to_path_buf(),
        source,
    })
}
