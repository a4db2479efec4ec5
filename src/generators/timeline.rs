// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! The ordered event timeline handed to downstream encoders.

use std::collections::BTreeSet;
use std::fmt;

use serde::{Deserialize, Serialize};

use super::{NoteEvent, MAX_VELOCITY};
use crate::error::TimelineError;

/// Note events in non-decreasing start order.
///
/// Serialized as a plain list; deserializing goes through
/// [`EventTimeline::from_external`].
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(try_from = "Vec<NoteEvent>", into = "Vec<NoteEvent>")]
pub struct EventTimeline {
    events: Vec<NoteEvent>,
}

impl TryFrom<Vec<NoteEvent>> for EventTimeline {
    type Error = TimelineError;

    fn try_from(events: Vec<NoteEvent>) -> Result<Self, Self::Error> {
        Self::from_external(events)
    }
}

impl From<EventTimeline> for Vec<NoteEvent> {
    fn from(timeline: EventTimeline) -> Self {
        timeline.events
    }
}

impl EventTimeline {
    /// Create an empty timeline
    pub fn new() -> Self {
        Self::default()
    }

    /// Admit events from an outside source, checking the contract
    pub fn from_external(events: Vec<NoteEvent>) -> Result<Self, TimelineError> {
        let mut previous: Option<f64> = None;
        for (index, event) in events.iter().enumerate() {
            if !event.start.is_finite() || event.start < 0.0 {
                return Err(TimelineError::InvalidStart {
                    index,
                    start: event.start,
                });
            }
            if !event.duration.is_finite() || event.duration < 0.0 {
                return Err(TimelineError::InvalidDuration {
                    index,
                    duration: event.duration,
                });
            }
            if event.velocity > MAX_VELOCITY {
                return Err(TimelineError::InvalidVelocity {
                    index,
                    velocity: event.velocity,
                });
            }
            if let Some(prev) = previous {
                if event.start < prev {
                    return Err(TimelineError::OutOfOrder {
                        index,
                        start: event.start,
                        previous: prev,
                    });
                }
            }
            previous = Some(event.start);
        }

        Ok(Self { events })
    }

    /// Append events produced after everything already in the timeline
    pub(crate) fn extend(&mut self, events: impl IntoIterator<Item = NoteEvent>) {
        for event in events {
            debug_assert!(self.events.last().map_or(true, |last| last.start <= event.start));
            self.events.push(event);
        }
    }

    pub fn events(&self) -> &[NoteEvent] {
        &self.events
    }

    pub fn iter(&self) -> std::slice::Iter<'_, NoteEvent> {
        self.events.iter()
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn into_events(self) -> Vec<NoteEvent> {
        self.events
    }

    /// Time at which the last sounding note ends
    pub fn end_time(&self) -> f64 {
        self.events.iter().map(|e| e.end()).fold(0.0, f64::max)
    }

    /// Aggregate view for logging
    pub fn summary(&self) -> TimelineSummary {
        let degrees: BTreeSet<i32> = self.events.iter().map(|e| e.pitch.rem_euclid(12)).collect();

        TimelineSummary {
            note_count: self.events.len(),
            total_duration: self.end_time(),
            primary_count: self.events.iter().filter(|e| e.is_primary()).count(),
            secondary_count: self.events.iter().filter(|e| e.is_secondary()).count(),
            distinct_degrees: degrees.len(),
        }
    }
}

impl<'a> IntoIterator for &'a EventTimeline {
    type Item = &'a NoteEvent;
    type IntoIter = std::slice::Iter<'a, NoteEvent>;

    fn into_iter(self) -> Self::IntoIter {
        self.events.iter()
    }
}

/// Read-only aggregate over a timeline
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct TimelineSummary {
    /// Number of notes
    pub note_count: usize,
    /// Seconds from the start to the end of the last note
    pub total_duration: f64,
    /// Notes on the primary degree
    pub primary_count: usize,
    /// Notes on the secondary degree
    pub secondary_count: usize,
    /// Distinct pitch classes, one per scale degree for a fixed tonic
    pub distinct_degrees: usize,
}

impl fmt::Display for TimelineSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} notes over {:.1}s ({} primary, {} secondary, {} degrees)",
            self.note_count,
            self.total_duration,
            self.primary_count,
            self.secondary_count,
            self.distinct_degrees
        )
    }
}
