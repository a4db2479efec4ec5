// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Raga descriptions and the derived note pool.
//!
//! A [`RagaDescriptor`] is the declarative input: ascending and descending
//! patterns, the full scale, and the emphasized degrees, all written in
//! swara notation. [`RagaModel`] normalizes it once per generation call and
//! [`WeightedNotePool`] annotates each degree with its selection weight.

pub mod catalog;
pub mod model;
pub mod pool;

pub use catalog::RagaCatalog;
pub use model::RagaModel;
pub use pool::{Candidates, NotePoolEntry, Role, WeightedNotePool};

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::music::swara;

/// Melodic direction a phase is allowed to move in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    /// Only degrees from the ascending pattern (aroha)
    Ascending,
    /// Only degrees from the descending pattern (avaroha)
    Descending,
    /// Either, switching at random between notes
    Both,
}

impl Direction {
    /// The opposite direction; `Both` is its own reverse
    pub fn reversed(self) -> Self {
        match self {
            Direction::Ascending => Direction::Descending,
            Direction::Descending => Direction::Ascending,
            Direction::Both => Direction::Both,
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Direction::Ascending => write!(f, "ascending"),
            Direction::Descending => write!(f, "descending"),
            Direction::Both => write!(f, "both"),
        }
    }
}

/// Declarative description of one raga
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RagaDescriptor {
    /// Raga name
    pub name: String,
    /// Ascending pattern (aroha)
    #[serde(default, alias = "aroha")]
    pub ascending: String,
    /// Descending pattern (avaroha)
    #[serde(default, alias = "avaroha")]
    pub descending: String,
    /// Full scale; derived from both patterns when omitted
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scale: Option<String>,
    /// Primary emphasis degree (vadi)
    #[serde(default, alias = "vadi", skip_serializing_if = "Option::is_none")]
    pub primary: Option<String>,
    /// Secondary emphasis degree (samvadi)
    #[serde(default, alias = "samvadi", skip_serializing_if = "Option::is_none")]
    pub secondary: Option<String>,
}

impl RagaDescriptor {
    /// Create a descriptor from its two patterns
    pub fn new(
        name: impl Into<String>,
        ascending: impl Into<String>,
        descending: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            ascending: ascending.into(),
            descending: descending.into(),
            scale: None,
            primary: None,
            secondary: None,
        }
    }

    /// Set an explicit full scale
    pub fn with_scale(mut self, scale: impl Into<String>) -> Self {
        self.scale = Some(scale.into());
        self
    }

    /// Set the primary (vadi) degree
    pub fn with_primary(mut self, primary: impl Into<String>) -> Self {
        self.primary = Some(primary.into());
        self
    }

    /// Set the secondary (samvadi) degree
    pub fn with_secondary(mut self, secondary: impl Into<String>) -> Self {
        self.secondary = Some(secondary.into());
        self
    }

    /// Full scale text: the explicit scale, or both patterns joined.
    ///
    /// An explicit but empty or "Flexible" scale stays degenerate.
    pub fn full_scale(&self) -> String {
        match &self.scale {
            Some(scale) => scale.clone(),
            None => {
                let parts: Vec<&str> = [self.ascending.as_str(), self.descending.as_str()]
                    .into_iter()
                    .filter(|p| !swara::is_degenerate(p))
                    .collect();
                parts.join(" ")
            }
        }
    }

    /// Whether the raga has no usable scale at all
    pub fn is_degenerate(&self) -> bool {
        swara::is_degenerate(&self.full_scale())
    }
}
