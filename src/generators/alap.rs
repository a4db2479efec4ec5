// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Alap structure: six phases exploring the registers of a raga.
//!
//! The requested duration is split across a fixed sequence of phases that
//! climb from the lower octave through the middle to the upper octave and
//! then descend back to the tonic. Each phase is filled by the
//! [`PhraseGenerator`]; a short silence separates consecutive phases.

use std::ops::RangeInclusive;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::{debug, warn};

use super::phrase::{sample_rest, PhraseGenerator};
use super::{EventTimeline, GenerationRequest, MelodySource};
use crate::raga::{Direction, RagaDescriptor, RagaModel, WeightedNotePool};

/// One structural segment of the alap
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Phase {
    /// Phase name
    pub name: &'static str,
    /// Fraction of the total duration
    pub share: f64,
    /// Lowest octave shift, inclusive
    pub min_octave: i32,
    /// Highest octave shift, inclusive
    pub max_octave: i32,
    /// Allowed melodic direction
    pub direction: Direction,
}

impl Phase {
    /// Octave shifts available to this phase, lowest first even if the
    /// bounds were given in the wrong order
    pub fn octave_range(&self) -> RangeInclusive<i32> {
        let low = self.min_octave.min(self.max_octave);
        let high = self.min_octave.max(self.max_octave);
        low..=high
    }

    /// Whether an octave shift lies inside this phase's range
    pub fn contains_octave(&self, octave: i32) -> bool {
        self.octave_range().contains(&octave)
    }
}

/// The six alap phases in performance order; shares sum to 1.0
pub const ALAP_PHASES: [Phase; 6] = [
    Phase {
        name: "mandra",
        share: 0.30,
        min_octave: -1,
        max_octave: 0,
        direction: Direction::Ascending,
    },
    Phase {
        name: "aroha",
        share: 0.15,
        min_octave: 0,
        max_octave: 0,
        direction: Direction::Ascending,
    },
    Phase {
        name: "madhya",
        share: 0.25,
        min_octave: 0,
        max_octave: 0,
        direction: Direction::Both,
    },
    Phase {
        name: "taar",
        share: 0.15,
        min_octave: 0,
        max_octave: 1,
        direction: Direction::Ascending,
    },
    Phase {
        name: "avaroha",
        share: 0.10,
        min_octave: 0,
        max_octave: 1,
        direction: Direction::Descending,
    },
    Phase {
        name: "sam",
        share: 0.05,
        min_octave: 0,
        max_octave: 0,
        direction: Direction::Descending,
    },
];

/// What happened in one phase of a generation call
#[derive(Debug, Clone, PartialEq)]
pub struct PhaseReport {
    /// Phase name
    pub name: &'static str,
    /// Clock time at which the phase began
    pub start: f64,
    /// Time the phase was asked to fill
    pub target: f64,
    /// Time the phase actually consumed, notes and rests
    pub elapsed: f64,
    /// Number of notes generated
    pub notes: usize,
    /// Whether the phase fell back to the full pool
    pub fallback: bool,
}

/// Timeline plus per-phase reports
#[derive(Debug, Clone, PartialEq, Default)]
pub struct AlapResult {
    pub timeline: EventTimeline,
    pub phases: Vec<PhaseReport>,
}

impl AlapResult {
    /// Summed phase time, excluding the silences between phases
    pub fn phase_time(&self) -> f64 {
        self.phases.iter().map(|p| p.elapsed).sum()
    }
}

/// Runs a fixed phase sequence over a note pool
#[derive(Debug, Clone, Copy)]
pub struct PhaseScheduler<'a> {
    pool: &'a WeightedNotePool,
    phases: &'a [Phase],
}

impl<'a> PhaseScheduler<'a> {
    /// Scheduler using the standard alap phases
    pub fn new(pool: &'a WeightedNotePool) -> Self {
        Self::with_phases(pool, &ALAP_PHASES)
    }

    /// Scheduler using a custom phase sequence
    pub fn with_phases(pool: &'a WeightedNotePool, phases: &'a [Phase]) -> Self {
        Self { pool, phases }
    }

    pub fn phases(&self) -> &[Phase] {
        self.phases
    }

    /// Generate the full timeline for `total` seconds.
    ///
    /// A non-finite duration is treated like zero: every phase is reported
    /// with no notes.
    pub fn run(&self, total: f64, rng: &mut impl Rng) -> AlapResult {
        let total = if total.is_finite() {
            total
        } else {
            warn!(total, "non-finite duration, generating nothing");
            0.0
        };
        let generator = PhraseGenerator::new(self.pool);
        let mut result = AlapResult::default();
        let mut clock = 0.0;

        for (index, phase) in self.phases.iter().enumerate() {
            if index > 0 {
                clock += 2.0 * sample_rest(rng);
            }

            let target = total * phase.share;
            let phrase = generator.generate(phase, target, clock, rng);

            debug!(
                phase = phase.name,
                start = clock,
                target_secs = target,
                elapsed = phrase.elapsed,
                notes = phrase.events.len(),
                fallback = phrase.fallback,
                "phase complete"
            );

            result.phases.push(PhaseReport {
                name: phase.name,
                start: clock,
                target,
                elapsed: phrase.elapsed,
                notes: phrase.events.len(),
                fallback: phrase.fallback,
            });
            result.timeline.extend(phrase.events);
            clock += phrase.elapsed;
        }

        result
    }
}

/// Build the pool for a raga and run the alap phases over it
pub fn generate_alap(
    raga: &RagaDescriptor,
    request: &GenerationRequest,
    rng: &mut impl Rng,
) -> AlapResult {
    let model = RagaModel::new(raga, request.tonic);
    let pool = WeightedNotePool::build(&model);
    if pool.is_empty() {
        warn!(raga = %raga.name, "raga has no usable scale degrees");
    }
    PhaseScheduler::new(&pool).run(request.duration_secs, rng)
}

/// Rule-based melody source producing an alap
#[derive(Debug, Clone)]
pub struct AlapGenerator {
    rng: StdRng,
}

impl AlapGenerator {
    /// Create a generator with a fixed seed
    pub fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Create a generator seeded from entropy
    pub fn from_entropy() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }

    /// Create a generator honoring the request's seed, if any
    pub fn for_request(request: &GenerationRequest) -> Self {
        match request.seed {
            Some(seed) => Self::new(seed),
            None => Self::from_entropy(),
        }
    }

    /// Generate with per-phase reports
    pub fn generate_with_report(
        &mut self,
        raga: &RagaDescriptor,
        request: &GenerationRequest,
    ) -> AlapResult {
        generate_alap(raga, request, &mut self.rng)
    }
}

impl MelodySource for AlapGenerator {
    fn generate(&mut self, raga: &RagaDescriptor, request: &GenerationRequest) -> EventTimeline {
        self.generate_with_report(raga, request).timeline
    }

    fn name(&self) -> &'static str {
        "alap"
    }
}
