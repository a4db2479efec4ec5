// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Configuration files for raga-alap.
//!
//! A raga file carries one raga description plus optional generation
//! settings. Files ending in `.toml` are parsed as TOML, everything else
//! as YAML.

use std::fs;
use std::path::Path;

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::generators::GenerationRequest;
use crate::music::swara::Swara;
use crate::raga::{RagaDescriptor, RagaModel, WeightedNotePool};

/// Root configuration for one raga
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RagaFile {
    /// Raga description
    pub raga: RagaDescriptor,
    /// Generation settings
    #[serde(default)]
    pub generation: GenerationRequest,
}

impl RagaFile {
    /// Create a raga file with default generation settings
    pub fn new(raga: RagaDescriptor) -> Self {
        Self {
            raga,
            generation: GenerationRequest::default(),
        }
    }

    /// Load a raga file, choosing the format by extension
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read raga file: {:?}", path))?;

        let is_toml = path
            .extension()
            .map_or(false, |ext| ext.eq_ignore_ascii_case("toml"));
        if is_toml {
            Self::from_toml(&contents)
        } else {
            Self::from_yaml(&contents)
        }
    }

    /// Parse a raga file from YAML string
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        serde_yaml::from_str(yaml).context("Failed to parse YAML raga file")
    }

    /// Parse a raga file from TOML string
    pub fn from_toml(text: &str) -> Result<Self> {
        toml::from_str(text).context("Failed to parse TOML raga file")
    }

    /// Serialize to YAML string
    pub fn to_yaml(&self) -> Result<String> {
        serde_yaml::to_string(self).context("Failed to serialize raga file to YAML")
    }

    /// Save to a YAML file
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let yaml = self.to_yaml()?;
        fs::write(path.as_ref(), yaml)
            .with_context(|| format!("Failed to write raga file: {:?}", path.as_ref()))
    }

    /// Check the settings and emphasis degrees.
    ///
    /// A degenerate scale is accepted with a warning, since generation
    /// then simply produces an empty timeline.
    pub fn validate(&self) -> Result<()> {
        if self.raga.name.trim().is_empty() {
            bail!("Raga name must not be empty");
        }

        let duration = self.generation.duration_secs;
        if !duration.is_finite() || duration <= 0.0 {
            bail!("Duration must be a positive number of seconds, got {}", duration);
        }

        if self.raga.is_degenerate() {
            warn!(raga = %self.raga.name, "raga has no fixed scale");
            return Ok(());
        }

        let model = RagaModel::new(&self.raga, self.generation.tonic);
        let pool = WeightedNotePool::build(&model);

        for (label, degree) in [
            ("primary", &self.raga.primary),
            ("secondary", &self.raga.secondary),
        ] {
            let Some(text) = degree else { continue };
            let swara = Swara::parse(text)
                .with_context(|| format!("Invalid {} degree in raga {}", label, self.raga.name))?;
            if pool.get(swara.base()).is_none() {
                bail!(
                    "The {} degree {} is not in the scale of raga {}",
                    label,
                    text,
                    self.raga.name
                );
            }
        }

        Ok(())
    }
}

/// Load and validate a raga file
pub fn validate_config<P: AsRef<Path>>(path: P) -> Result<RagaFile> {
    let file = RagaFile::load(path)?;
    file.validate()?;
    Ok(file)
}
