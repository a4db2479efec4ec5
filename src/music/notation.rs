// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Conversion from swara notation to absolute pitch numbers and Western
//! note names, relative to a chosen tonic.

use tracing::debug;

use super::note::Note;
use super::swara::{self, Swara};
use crate::error::NotationError;

/// Absolute pitch number type (MIDI numbering, middle C = 60)
pub type Pitch = i32;

/// Pitch of "Sa" in the middle octave when the tonic is C
pub const REFERENCE_PITCH: Pitch = 60;

/// A single swara resolved against a tonic
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConvertedSwara {
    /// Parsed swara
    pub swara: Swara,
    /// Absolute pitch number
    pub pitch: Pitch,
    /// Western note name of the pitch
    pub note: Note,
    /// Semitones above the tonic (0-11)
    pub semitone: u8,
    /// Net octave shift
    pub octave_shift: i32,
}

/// Absolute pitch for a semitone offset and octave shift over a tonic
pub fn pitch_for(semitone: u8, octave_shift: i32, tonic: Note) -> Pitch {
    let pitch_class = (semitone as Pitch + tonic.pitch_class() as Pitch).rem_euclid(12);
    REFERENCE_PITCH + pitch_class + octave_shift * 12
}

/// Convert one swara token, e.g. `"G"` or `"S'"`, against a tonic
pub fn convert(symbol: &str, tonic: Note) -> Result<ConvertedSwara, NotationError> {
    let swara = Swara::parse(symbol)?;
    Ok(resolve(swara, tonic))
}

/// Resolve an already parsed swara against a tonic
pub fn resolve(swara: Swara, tonic: Note) -> ConvertedSwara {
    ConvertedSwara {
        swara,
        pitch: pitch_for(swara.semitone(), swara.octave_shift(), tonic),
        note: tonic.transpose(swara.semitone() as i32),
        semitone: swara.semitone(),
        octave_shift: swara.octave_shift(),
    }
}

/// A swara sequence resolved against a tonic
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ConvertedScale {
    tonic: Note,
    swaras: Vec<ConvertedSwara>,
}

impl ConvertedScale {
    /// Tonic used for the conversion
    pub fn tonic(&self) -> Note {
        self.tonic
    }

    /// Resolved swaras in input order
    pub fn swaras(&self) -> &[ConvertedSwara] {
        &self.swaras
    }

    pub fn len(&self) -> usize {
        self.swaras.len()
    }

    pub fn is_empty(&self) -> bool {
        self.swaras.is_empty()
    }

    /// Western note names in input order
    pub fn note_names(&self) -> Vec<String> {
        self.swaras.iter().map(|s| s.note.to_string()).collect()
    }

    /// Absolute pitch numbers in input order
    pub fn pitches(&self) -> Vec<Pitch> {
        self.swaras.iter().map(|s| s.pitch).collect()
    }

    /// Semitone steps between consecutive pitches; downward steps wrap
    /// by adding an octave
    pub fn intervals(&self) -> Vec<i32> {
        self.pitches()
            .windows(2)
            .map(|pair| {
                let step = pair[1] - pair[0];
                if step < 0 {
                    step + 12
                } else {
                    step
                }
            })
            .collect()
    }
}

/// Convert delimited swara text into pitches.
///
/// Unknown symbols are dropped; the "Flexible" sentinel and empty text
/// yield an empty scale.
pub fn convert_scale(text: &str, tonic: Note) -> ConvertedScale {
    if swara::is_degenerate(text) {
        return ConvertedScale {
            tonic,
            swaras: Vec::new(),
        };
    }

    let swaras = swara::tokenize(text)
        .filter_map(|token| match convert(token, tonic) {
            Ok(converted) => Some(converted),
            Err(err) => {
                debug!(%err, "dropping swara");
                None
            }
        })
        .collect();

    ConvertedScale { tonic, swaras }
}

/// Chromatic note names that the scale does not use, in order from C
pub fn avoid_notes(text: &str, tonic: Note) -> Vec<String> {
    let used = convert_scale(text, tonic);
    Note::ALL
        .iter()
        .filter(|note| !used.swaras.iter().any(|s| s.note == **note))
        .map(|note| note.to_string())
        .collect()
}
