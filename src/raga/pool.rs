// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Weighted note pool: the distinct degrees a melody may draw from.
//!
//! The pool is built in two passes. The first collects one entry per base
//! degree with an ordinary weight; the second annotates the primary and
//! secondary degrees by explicit priority, so a raga whose vadi and
//! samvadi coincide always ends up with the primary weight.

use std::collections::BTreeSet;

use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::model::RagaModel;
use super::Direction;
use crate::music::notation::{self, Pitch};

/// Selection weight for the primary (vadi) degree
pub const PRIMARY_WEIGHT: u32 = 3;

/// Selection weight for the secondary (samvadi) degree
pub const SECONDARY_WEIGHT: u32 = 2;

/// Selection weight for every other degree
pub const ORDINARY_WEIGHT: u32 = 1;

/// Musical role of a degree within the raga
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Primary,
    Secondary,
    #[default]
    Ordinary,
}

impl Role {
    pub fn is_primary(self) -> bool {
        self == Role::Primary
    }

    pub fn is_secondary(self) -> bool {
        self == Role::Secondary
    }

    /// Selection weight for this role
    pub fn weight(self) -> u32 {
        match self {
            Role::Primary => PRIMARY_WEIGHT,
            Role::Secondary => SECONDARY_WEIGHT,
            Role::Ordinary => ORDINARY_WEIGHT,
        }
    }
}

/// One distinct degree of the raga with its weight
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotePoolEntry {
    /// Base symbol, octave markers stripped
    pub symbol: &'static str,
    /// Semitones above the tonic
    pub semitone: u8,
    /// Absolute pitch at octave shift zero
    pub pitch: Pitch,
    /// Selection weight
    pub weight: u32,
    pub is_primary: bool,
    pub is_secondary: bool,
}

impl NotePoolEntry {
    /// Role implied by the flags, primary taking precedence
    pub fn role(&self) -> Role {
        if self.is_primary {
            Role::Primary
        } else if self.is_secondary {
            Role::Secondary
        } else {
            Role::Ordinary
        }
    }
}

/// Degrees available to the melody generator
#[derive(Debug, Clone, PartialEq, Default)]
pub struct WeightedNotePool {
    entries: Vec<NotePoolEntry>,
    ascending: BTreeSet<&'static str>,
    descending: BTreeSet<&'static str>,
}

impl WeightedNotePool {
    /// Build the pool for a raga model
    pub fn build(model: &RagaModel) -> Self {
        // Pass 1: one ordinary entry per distinct base degree
        let mut entries: Vec<NotePoolEntry> = model
            .distinct_degrees()
            .into_iter()
            .map(|swara| NotePoolEntry {
                symbol: swara.base(),
                semitone: swara.semitone(),
                pitch: notation::pitch_for(swara.semitone(), 0, model.tonic()),
                weight: ORDINARY_WEIGHT,
                is_primary: false,
                is_secondary: false,
            })
            .collect();

        // Pass 2: annotate roles, primary checked first
        for entry in &mut entries {
            if model.primary() == Some(entry.symbol) {
                entry.is_primary = true;
                entry.weight = PRIMARY_WEIGHT;
            } else if model.secondary() == Some(entry.symbol) {
                entry.is_secondary = true;
                entry.weight = SECONDARY_WEIGHT;
            }
        }

        debug!(
            raga = model.name(),
            degrees = entries.len(),
            "built note pool"
        );

        Self {
            entries,
            ascending: model.ascending_set(),
            descending: model.descending_set(),
        }
    }

    /// All entries in scale order
    pub fn entries(&self) -> &[NotePoolEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Look up an entry by base symbol
    pub fn get(&self, symbol: &str) -> Option<&NotePoolEntry> {
        self.entries.iter().find(|e| e.symbol == symbol)
    }

    /// Whether a base symbol is allowed when moving in `direction`
    pub fn allows(&self, symbol: &str, direction: Direction) -> bool {
        match direction {
            Direction::Ascending => self.ascending.contains(symbol),
            Direction::Descending => self.descending.contains(symbol),
            Direction::Both => self.ascending.contains(symbol) || self.descending.contains(symbol),
        }
    }

    /// Entries valid for a direction.
    ///
    /// Falls back to the whole pool when no entry qualifies; the returned
    /// [`Candidates`] records that the fallback was taken.
    pub fn candidates(&self, direction: Direction) -> Candidates<'_> {
        let filtered: Vec<&NotePoolEntry> = self
            .entries
            .iter()
            .filter(|e| self.allows(e.symbol, direction))
            .collect();

        if filtered.is_empty() && !self.entries.is_empty() {
            debug!(%direction, "no degrees match direction, using full pool");
            return Candidates {
                entries: self.entries.iter().collect(),
                fallback: true,
            };
        }

        Candidates {
            entries: filtered,
            fallback: false,
        }
    }
}

/// A direction-filtered slice of the pool, ready for weighted draws
#[derive(Debug, Clone)]
pub struct Candidates<'a> {
    entries: Vec<&'a NotePoolEntry>,
    fallback: bool,
}

impl<'a> Candidates<'a> {
    pub fn entries(&self) -> &[&'a NotePoolEntry] {
        &self.entries
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Whether the direction filter was abandoned for the full pool
    pub fn fallback(&self) -> bool {
        self.fallback
    }

    /// Sum of candidate weights
    pub fn total_weight(&self) -> u32 {
        self.entries.iter().map(|e| e.weight).sum()
    }

    /// Roulette-wheel draw proportional to weight
    pub fn draw(&self, rng: &mut impl Rng) -> Option<&'a NotePoolEntry> {
        let total = self.total_weight();
        if total == 0 {
            return None;
        }

        let mut roll = rng.gen_range(0..total);
        for &entry in &self.entries {
            if roll < entry.weight {
                return Some(entry);
            }
            roll -= entry.weight;
        }
        self.entries.last().copied()
    }
}
