// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Melody sources and the note event contract they share.
//!
//! Every source, rule-based or external, produces an [`EventTimeline`] of
//! [`NoteEvent`]s so that downstream consumers do not care which source
//! produced a melody.

pub mod alap;
pub mod phrase;
pub mod timeline;

pub use alap::{AlapGenerator, AlapResult, Phase, PhaseReport, PhaseScheduler, ALAP_PHASES};
pub use phrase::{Phrase, PhraseGenerator};
pub use timeline::{EventTimeline, TimelineSummary};

use serde::{Deserialize, Serialize};

use crate::error::TimelineError;
use crate::music::notation::Pitch;
use crate::music::note::Note;
use crate::raga::{RagaDescriptor, Role};

/// Largest velocity a note event may carry
pub const MAX_VELOCITY: u8 = 100;

/// One timed note of a generated melody
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NoteEvent {
    /// Absolute pitch number (middle C = 60)
    pub pitch: Pitch,
    /// Start offset in seconds from the beginning of the melody
    pub start: f64,
    /// Duration in seconds
    pub duration: f64,
    /// Velocity (0-100)
    pub velocity: u8,
    /// Role of the originating degree
    #[serde(default)]
    pub role: Role,
    /// Octave shift relative to the middle octave
    #[serde(default)]
    pub octave_shift: i32,
    /// Base swara symbol, when known
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub symbol: Option<String>,
    /// Set when direction filtering fell back to the full pool
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub fallback: bool,
}

impl NoteEvent {
    /// Create a new ordinary note event
    pub fn new(pitch: Pitch, start: f64, duration: f64, velocity: u8) -> Self {
        Self {
            pitch,
            start,
            duration,
            velocity,
            role: Role::Ordinary,
            octave_shift: 0,
            symbol: None,
            fallback: false,
        }
    }

    /// Set the role for this event
    pub fn with_role(mut self, role: Role) -> Self {
        self.role = role;
        self
    }

    pub fn is_primary(&self) -> bool {
        self.role.is_primary()
    }

    pub fn is_secondary(&self) -> bool {
        self.role.is_secondary()
    }

    /// Time at which the note stops sounding
    pub fn end(&self) -> f64 {
        self.start + self.duration
    }

    /// Pitch as a MIDI note number, if it fits the 0-127 range
    pub fn midi_note(&self) -> Option<u8> {
        u8::try_from(self.pitch).ok().filter(|n| *n <= 127)
    }
}

/// Parameters for one generation call
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerationRequest {
    /// Total requested duration in seconds
    #[serde(default = "default_duration")]
    pub duration_secs: f64,
    /// Pitch class that "Sa" maps to
    #[serde(default)]
    pub tonic: Note,
    /// Seed for reproducible output; fresh entropy when absent
    #[serde(default)]
    pub seed: Option<u64>,
}

fn default_duration() -> f64 {
    60.0
}

impl Default for GenerationRequest {
    fn default() -> Self {
        Self {
            duration_secs: default_duration(),
            tonic: Note::default(),
            seed: None,
        }
    }
}

impl GenerationRequest {
    /// Create a request for a duration and tonic
    pub fn new(duration_secs: f64, tonic: Note) -> Self {
        Self {
            duration_secs,
            tonic,
            seed: None,
        }
    }

    /// Fix the seed for reproducible output
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }
}

/// Anything that can produce a melody for a raga
pub trait MelodySource {
    /// Produce a timeline for the raga
    fn generate(&mut self, raga: &RagaDescriptor, request: &GenerationRequest) -> EventTimeline;

    /// Get the source type name
    fn name(&self) -> &'static str;
}

/// A melody produced elsewhere, such as by a language model, admitted
/// once its events satisfy the timeline contract
#[derive(Debug, Clone)]
pub struct ExternalMelody {
    timeline: EventTimeline,
}

impl ExternalMelody {
    /// Validate externally produced events
    pub fn new(events: Vec<NoteEvent>) -> Result<Self, TimelineError> {
        Ok(Self {
            timeline: EventTimeline::from_external(events)?,
        })
    }
}

impl MelodySource for ExternalMelody {
    fn generate(&mut self, _raga: &RagaDescriptor, _request: &GenerationRequest) -> EventTimeline {
        self.timeline.clone()
    }

    fn name(&self) -> &'static str {
        "external"
    }
}
