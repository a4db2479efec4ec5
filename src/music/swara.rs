// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Swara symbols: the twelve scale degrees of the raga pitch system.
//!
//! A swara is written as one of twelve case-sensitive base symbols,
//! optionally decorated with octave markers. Lowercase letters are the
//! flattened (komal) variants, `M` is the sharpened (tivra) fourth:
//!
//! ```text
//! S  r  R  g  G  m  M  P  d  D  n  N
//! 0  1  2  3  4  5  6  7  8  9  10 11
//! ```
//!
//! `'` raises a swara by one octave and `.` lowers it by one; markers may
//! appear on either side of the symbol and are counted independently.

use std::fmt;
use std::str::FromStr;

use crate::error::NotationError;

/// Marker raising a swara one octave (taar saptak)
pub const OCTAVE_UP: char = '\'';

/// Marker lowering a swara one octave (mandra saptak)
pub const OCTAVE_DOWN: char = '.';

/// The twelve base degrees in semitone order
pub const BASE_SYMBOLS: [&str; 12] = ["S", "r", "R", "g", "G", "m", "M", "P", "d", "D", "n", "N"];

/// Sentinel used by raga data for scales without a fixed note set
pub const FLEXIBLE_SENTINEL: &str = "Flexible";

/// Semitone offset from the tonic for a base symbol
pub fn semitone_of(base: &str) -> Option<u8> {
    BASE_SYMBOLS
        .iter()
        .position(|&s| s == base)
        .map(|i| i as u8)
}

/// Remove octave markers from a token
pub fn strip_octave(token: &str) -> String {
    token
        .trim()
        .chars()
        .filter(|&c| c != OCTAVE_UP && c != OCTAVE_DOWN)
        .collect()
}

/// Split swara text on whitespace and commas
pub fn tokenize(text: &str) -> impl Iterator<Item = &str> {
    text.split(|c: char| c.is_whitespace() || c == ',')
        .filter(|t| !t.is_empty())
}

/// Whether a whole scale string is the degenerate "no fixed scale" marker
pub fn is_degenerate(text: &str) -> bool {
    let trimmed = text.trim();
    trimmed.is_empty() || trimmed.eq_ignore_ascii_case(FLEXIBLE_SENTINEL)
}

/// A parsed swara: base degree plus net octave shift
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Swara {
    semitone: u8,
    octave_shift: i32,
}

impl Swara {
    /// Create a swara from a semitone (0-11) and an octave shift
    pub fn new(semitone: u8, octave_shift: i32) -> Self {
        Self {
            semitone: semitone % 12,
            octave_shift,
        }
    }

    /// Parse one token such as `"S'"`, `".n"` or `"M"`.
    ///
    /// Up and down markers are netted, so `"S'."` is a plain `S`.
    pub fn parse(token: &str) -> Result<Self, NotationError> {
        let token = token.trim();
        let ups = token.chars().filter(|&c| c == OCTAVE_UP).count() as i32;
        let downs = token.chars().filter(|&c| c == OCTAVE_DOWN).count() as i32;
        let base = strip_octave(token);

        let semitone =
            semitone_of(&base).ok_or_else(|| NotationError::UnknownSymbol(token.to_string()))?;

        Ok(Self::new(semitone, ups - downs))
    }

    /// Semitone offset from the tonic (0-11)
    pub fn semitone(&self) -> u8 {
        self.semitone
    }

    /// Net octave shift relative to the middle octave
    pub fn octave_shift(&self) -> i32 {
        self.octave_shift
    }

    /// Base symbol without octave markers
    pub fn base(&self) -> &'static str {
        BASE_SYMBOLS[self.semitone as usize]
    }
}

impl FromStr for Swara {
    type Err = NotationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Swara::parse(s)
    }
}

impl fmt::Display for Swara {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.octave_shift < 0 {
            for _ in 0..-self.octave_shift {
                write!(f, "{}", OCTAVE_DOWN)?;
            }
        }
        write!(f, "{}", self.base())?;
        for _ in 0..self.octave_shift.max(0) {
            write!(f, "{}", OCTAVE_UP)?;
        }
        Ok(())
    }
}
