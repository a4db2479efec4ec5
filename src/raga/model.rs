// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Normalized, per-call view of a raga.

use std::collections::BTreeSet;

use tracing::debug;

use super::RagaDescriptor;
use crate::music::note::Note;
use crate::music::swara::{self, Swara};

/// Degree used when a raga names no primary note
pub const DEFAULT_PRIMARY: &str = "S";

/// Degree used when a raga names no secondary note
pub const DEFAULT_SECONDARY: &str = "P";

/// Parse swara text, skipping unknown symbols
fn parse_pattern(text: &str) -> Vec<Swara> {
    if swara::is_degenerate(text) {
        return Vec::new();
    }

    swara::tokenize(text)
        .filter_map(|token| match Swara::parse(token) {
            Ok(s) => Some(s),
            Err(err) => {
                debug!(%err, "skipping swara in pattern");
                None
            }
        })
        .collect()
}

/// Resolve an emphasis degree to its base symbol
fn parse_degree(text: Option<&str>, default: &'static str) -> Option<&'static str> {
    match text {
        Some(t) if !t.trim().is_empty() => Swara::parse(t).ok().map(|s| s.base()),
        _ => Some(default),
    }
}

/// A raga's patterns, scale, and emphasis degrees, resolved to swaras
#[derive(Debug, Clone, PartialEq)]
pub struct RagaModel {
    name: String,
    tonic: Note,
    ascending: Vec<Swara>,
    descending: Vec<Swara>,
    scale: Vec<Swara>,
    primary: Option<&'static str>,
    secondary: Option<&'static str>,
}

impl RagaModel {
    /// Build the model for one generation call
    pub fn new(descriptor: &RagaDescriptor, tonic: Note) -> Self {
        Self {
            name: descriptor.name.clone(),
            tonic,
            ascending: parse_pattern(&descriptor.ascending),
            descending: parse_pattern(&descriptor.descending),
            scale: parse_pattern(&descriptor.full_scale()),
            primary: parse_degree(descriptor.primary.as_deref(), DEFAULT_PRIMARY),
            secondary: parse_degree(descriptor.secondary.as_deref(), DEFAULT_SECONDARY),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn tonic(&self) -> Note {
        self.tonic
    }

    /// Ascending pattern in order, octave markers kept
    pub fn ascending(&self) -> &[Swara] {
        &self.ascending
    }

    /// Descending pattern in order, octave markers kept
    pub fn descending(&self) -> &[Swara] {
        &self.descending
    }

    /// Full scale as written, possibly with repeats across octaves
    pub fn scale(&self) -> &[Swara] {
        &self.scale
    }

    /// Base symbol of the primary degree
    pub fn primary(&self) -> Option<&'static str> {
        self.primary
    }

    /// Base symbol of the secondary degree
    pub fn secondary(&self) -> Option<&'static str> {
        self.secondary
    }

    /// Octave-stripped base symbols of the ascending pattern
    pub fn ascending_set(&self) -> BTreeSet<&'static str> {
        self.ascending.iter().map(|s| s.base()).collect()
    }

    /// Octave-stripped base symbols of the descending pattern
    pub fn descending_set(&self) -> BTreeSet<&'static str> {
        self.descending.iter().map(|s| s.base()).collect()
    }

    /// Distinct base degrees of the full scale in first-seen order
    pub fn distinct_degrees(&self) -> Vec<Swara> {
        let mut seen = BTreeSet::new();
        self.scale
            .iter()
            .filter(|s| seen.insert(s.semitone()))
            .map(|s| Swara::new(s.semitone(), 0))
            .collect()
    }
}
