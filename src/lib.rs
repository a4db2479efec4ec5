// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Raga-constrained melody generation.
//!
//! Turns a declarative raga description into a timed sequence of note
//! events shaped like an alap: a slow exploration of the raga's lower,
//! middle, and upper registers that honors its ascending and descending
//! grammar and dwells on its emphasized degrees.
//!
//! ```no_run
//! use raga_alap::generators::{AlapGenerator, GenerationRequest, MelodySource};
//! use raga_alap::music::Note;
//! use raga_alap::raga::RagaCatalog;
//!
//! let catalog = RagaCatalog::with_builtins();
//! let yaman = catalog.get("yaman").unwrap();
//! let request = GenerationRequest::new(60.0, Note::C).with_seed(1);
//! let timeline = AlapGenerator::for_request(&request).generate(yaman, &request);
//! println!("{}", timeline.summary());
//! ```

pub mod config;
pub mod error;
pub mod generators;
pub mod music;
pub mod raga;

pub use error::{NotationError, TimelineError};
pub use generators::{AlapGenerator, EventTimeline, GenerationRequest, MelodySource, NoteEvent};
pub use raga::{RagaCatalog, RagaDescriptor};
