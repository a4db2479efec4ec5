// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Music theory utilities for raga-alap.
//!
//! This module provides Western pitch classes, swara parsing, and the
//! notation layer that resolves swaras to absolute pitches.

pub mod notation;
pub mod note;
pub mod swara;

pub use notation::{avoid_notes, convert, convert_scale, ConvertedScale, ConvertedSwara, Pitch};
pub use note::Note;
pub use swara::Swara;
