// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Phrase generator: fills one alap phase with notes.
//!
//! Notes are drawn from the direction-filtered pool with roulette-wheel
//! selection, placed in a random octave of the phase's range, and given a
//! duration and velocity according to their role. A rest follows every
//! note. The loop stops once the elapsed time reaches the phase target, so
//! the last note may run past it.

use std::ops::RangeInclusive;

use rand::Rng;

use super::alap::Phase;
use super::{NoteEvent, MAX_VELOCITY};
use crate::raga::{Direction, Role, WeightedNotePool};

/// Velocity of an unaccented note
pub const BASE_VELOCITY: u8 = 70;

/// Accent added to primary notes
pub const PRIMARY_ACCENT: u8 = 15;

/// Accent added to secondary notes
pub const SECONDARY_ACCENT: u8 = 8;

/// Exclusive upper bound of the random jitter on ordinary notes
pub const ORDINARY_JITTER: u8 = 10;

/// Chance of switching direction after each note in a two-way phase
pub const FLIP_PROBABILITY: f64 = 0.3;

/// Range of the rest that follows every note, in seconds
pub const REST_RANGE: RangeInclusive<f64> = 0.2..=1.5;

/// Duration range in seconds for a note of the given role
pub fn duration_range(role: Role) -> RangeInclusive<f64> {
    match role {
        Role::Primary => 2.0..=4.0,
        Role::Secondary => 1.5..=3.0,
        Role::Ordinary => 0.5..=2.0,
    }
}

/// Sample a rest length
pub fn sample_rest(rng: &mut impl Rng) -> f64 {
    rng.gen_range(REST_RANGE)
}

/// Velocity for a note of the given role
pub fn velocity_for(role: Role, rng: &mut impl Rng) -> u8 {
    match role {
        Role::Primary => BASE_VELOCITY.saturating_add(PRIMARY_ACCENT).min(MAX_VELOCITY),
        Role::Secondary => BASE_VELOCITY
            .saturating_add(SECONDARY_ACCENT)
            .min(MAX_VELOCITY),
        Role::Ordinary => {
            let jitter = rng.gen_range(0..ORDINARY_JITTER);
            BASE_VELOCITY.saturating_add(jitter).min(MAX_VELOCITY)
        }
    }
}

/// Notes generated for one phase
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Phrase {
    /// Events in start order
    pub events: Vec<NoteEvent>,
    /// Time consumed by notes and their rests
    pub elapsed: f64,
    /// Whether any draw fell back to the full pool
    pub fallback: bool,
}

/// Generates phrases over a note pool
#[derive(Debug, Clone, Copy)]
pub struct PhraseGenerator<'a> {
    pool: &'a WeightedNotePool,
}

impl<'a> PhraseGenerator<'a> {
    /// Create a generator drawing from `pool`
    pub fn new(pool: &'a WeightedNotePool) -> Self {
        Self { pool }
    }

    /// Generate notes for `phase` until `target` seconds have elapsed.
    ///
    /// Event start times are offset by `start`. An empty pool or a
    /// non-finite target yields an empty phrase.
    pub fn generate(&self, phase: &Phase, target: f64, start: f64, rng: &mut impl Rng) -> Phrase {
        let mut phrase = Phrase::default();
        if self.pool.is_empty() || !target.is_finite() {
            return phrase;
        }

        let mut direction = match phase.direction {
            Direction::Both => Direction::Ascending,
            fixed => fixed,
        };

        while phrase.elapsed < target {
            let candidates = self.pool.candidates(direction);
            let Some(entry) = candidates.draw(rng) else {
                break;
            };

            let role = entry.role();
            let octave = rng.gen_range(phase.octave_range());
            let duration = rng.gen_range(duration_range(role));
            let velocity = velocity_for(role, rng);

            phrase.events.push(NoteEvent {
                pitch: entry.pitch + octave * 12,
                start: start + phrase.elapsed,
                duration,
                velocity,
                role,
                octave_shift: octave,
                symbol: Some(entry.symbol.to_string()),
                fallback: candidates.fallback(),
            });
            phrase.fallback |= candidates.fallback();
            phrase.elapsed += duration + sample_rest(rng);

            if phase.direction == Direction::Both && rng.gen_bool(FLIP_PROBABILITY) {
                direction = direction.reversed();
            }
        }

        phrase
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generators::alap::ALAP_PHASES;
    use crate::music::note::Note;
    use crate::raga::{RagaDescriptor, RagaModel};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn yaman_pool() -> WeightedNotePool {
        let raga = RagaDescriptor::new("Yaman", ".N R G M D N S'", "S' N D P M G R S")
            .with_primary("G")
            .with_secondary("N");
        WeightedNotePool::build(&RagaModel::new(&raga, Note::C))
    }

    fn phase(direction: Direction, min_octave: i32, max_octave: i32) -> Phase {
        Phase {
            name: "test",
            share: 1.0,
            min_octave,
            max_octave,
            direction,
        }
    }

    #[test]
    fn test_velocity_by_role() {
        let mut rng = StdRng::seed_from_u64(7);
        assert_eq!(velocity_for(Role::Primary, &mut rng), 85);
        assert_eq!(velocity_for(Role::Secondary, &mut rng), 78);
        for _ in 0..100 {
            let v = velocity_for(Role::Ordinary, &mut rng);
            assert!((70..80).contains(&v));
        }
    }

    #[test]
    fn test_phrase_fills_target() {
        let pool = yaman_pool();
        let generator = PhraseGenerator::new(&pool);
        let mut rng = StdRng::seed_from_u64(1);

        let phrase = generator.generate(&ALAP_PHASES[2], 20.0, 0.0, &mut rng);
        assert!(!phrase.events.is_empty());
        assert!(phrase.elapsed >= 20.0);
        // At most one note and rest past the target
        assert!(phrase.elapsed < 20.0 + 4.0 + 1.5);
    }

    #[test]
    fn test_phrase_starts_at_offset() {
        let pool = yaman_pool();
        let generator = PhraseGenerator::new(&pool);
        let mut rng = StdRng::seed_from_u64(2);

        let phrase = generator.generate(&ALAP_PHASES[0], 10.0, 30.0, &mut rng);
        assert_eq!(phrase.events[0].start, 30.0);
        for pair in phrase.events.windows(2) {
            assert!(pair[0].start < pair[1].start);
        }
    }

    #[test]
    fn test_ascending_phrase_uses_aroha_degrees() {
        let pool = yaman_pool();
        let generator = PhraseGenerator::new(&pool);
        let mut rng = StdRng::seed_from_u64(3);

        let phrase = generator.generate(&phase(Direction::Ascending, 0, 0), 500.0, 0.0, &mut rng);
        assert!(!phrase.fallback);
        for event in &phrase.events {
            // Pa is absent from Yaman's aroha
            assert_ne!(event.symbol.as_deref(), Some("P"));
        }
    }

    #[test]
    fn test_durations_and_octaves_in_bounds() {
        let pool = yaman_pool();
        let generator = PhraseGenerator::new(&pool);
        let mut rng = StdRng::seed_from_u64(4);

        let phrase = generator.generate(&phase(Direction::Both, -1, 1), 300.0, 0.0, &mut rng);
        for event in &phrase.events {
            assert!(duration_range(event.role).contains(&event.duration));
            assert!((-1..=1).contains(&event.octave_shift));
            let base = pool.get(event.symbol.as_deref().unwrap()).unwrap();
            assert_eq!(event.pitch, base.pitch + event.octave_shift * 12);
        }
    }

    #[test]
    fn test_two_way_phrase_visits_both_directions() {
        let pool = yaman_pool();
        let generator = PhraseGenerator::new(&pool);
        let mut rng = StdRng::seed_from_u64(5);

        let phrase = generator.generate(&phase(Direction::Both, 0, 0), 400.0, 0.0, &mut rng);
        // Pa only appears once the phrase has turned downward
        assert!(phrase
            .events
            .iter()
            .any(|e| e.symbol.as_deref() == Some("P")));
    }

    #[test]
    fn test_two_way_phrase_flip_rate() {
        // Disjoint aroha and avaroha, so every note reveals its direction
        let raga = RagaDescriptor::new("Split", "S R G", "P D N");
        let model = RagaModel::new(&raga, Note::C);
        let pool = WeightedNotePool::build(&model);
        let ascending = model.ascending_set();
        let generator = PhraseGenerator::new(&pool);
        let mut rng = StdRng::seed_from_u64(9);

        let phrase = generator.generate(&phase(Direction::Both, 0, 0), 4000.0, 0.0, &mut rng);
        assert!(!phrase.fallback);
        assert!(phrase.events.len() >= 1000, "only {} notes", phrase.events.len());

        let upward: Vec<bool> = phrase
            .events
            .iter()
            .map(|e| ascending.contains(e.symbol.as_deref().unwrap()))
            .collect();
        assert!(upward[0], "phrase must open ascending");

        let switches: Vec<bool> = upward.windows(2).map(|w| w[0] != w[1]).collect();
        let rate = switches.iter().filter(|s| **s).count() as f64 / switches.len() as f64;
        assert!((rate - FLIP_PROBABILITY).abs() <= 0.05, "switch rate {}", rate);

        // A switch is no more or less likely right after another switch
        let after_switch: Vec<bool> = switches
            .windows(2)
            .filter(|w| w[0])
            .map(|w| w[1])
            .collect();
        let repeat = after_switch.iter().filter(|s| **s).count() as f64 / after_switch.len() as f64;
        assert!((repeat - FLIP_PROBABILITY).abs() <= 0.08, "switch after switch {}", repeat);
    }

    #[test]
    fn test_non_finite_target_yields_empty_phrase() {
        let pool = yaman_pool();
        let generator = PhraseGenerator::new(&pool);
        let mut rng = StdRng::seed_from_u64(10);

        let phrase = generator.generate(&ALAP_PHASES[2], f64::INFINITY, 0.0, &mut rng);
        assert!(phrase.events.is_empty());
    }

    #[test]
    fn test_fallback_flagged() {
        let raga = RagaDescriptor::new("Up", "S R G", "").with_scale("S R G P");
        let pool = WeightedNotePool::build(&RagaModel::new(&raga, Note::C));
        let generator = PhraseGenerator::new(&pool);
        let mut rng = StdRng::seed_from_u64(6);

        let phrase = generator.generate(&phase(Direction::Descending, 0, 0), 10.0, 0.0, &mut rng);
        assert!(!phrase.events.is_empty());
        assert!(phrase.fallback);
        assert!(phrase.events.iter().all(|e| e.fallback));
    }

    #[test]
    fn test_empty_pool_yields_empty_phrase() {
        let pool = WeightedNotePool::default();
        let generator = PhraseGenerator::new(&pool);
        let mut rng = StdRng::seed_from_u64(8);

        let phrase = generator.generate(&ALAP_PHASES[0], 10.0, 0.0, &mut rng);
        assert!(phrase.events.is_empty());
        assert_eq!(phrase.elapsed, 0.0);
        assert!(!phrase.fallback);
    }
}
