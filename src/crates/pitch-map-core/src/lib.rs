//! Note-to-pitch lookup tables for Machinedrum machines
//!
//! The Machinedrum's PTCH parameter does not track note frequency in any
//! predictable way, so the tables are built from measured values: each machine
//! supplies a note range and one pitch value per note, and the builder pairs
//! them up by position.
//!
//! # Examples
//!
//! ```
//! use pitch_map_core::{MachineSpec, PitchMapBuilder};
//!
//! let specs = vec![MachineSpec::new("TRX", "BD", "A-1", "B-1", vec![1, 4, 7])];
//! let map = PitchMapBuilder::new().build_machine_pitch_map(&specs).unwrap();
//!
//! assert_eq!(map.pitch_for("TRX", "BD", "A#1"), Some(4));
//! ```
//!
//! # Main Components
//!
//! - **notes**: the canonical 108-note universe (C-1 through B-9)
//! - **MachineSpec**: one machine's note range and measured pitch values
//! - **PitchMapBuilder**: validates specs and pairs notes with pitches
//! - **PitchMap**: the grouped result, with lookups and JSON rendering

pub mod builder;
pub mod machines;
pub mod map;
pub mod notes;

pub use builder::PitchMapBuilder;
pub use machines::{builtin_machines, MachineSpec};
pub use map::{PitchEntry, PitchMap, DEFAULT_INDENT};
pub use notes::{full_note_range, NOTE_COUNT};

use std::path::PathBuf;

/// Errors raised while building or writing a pitch map
#[derive(Debug, thiserror::Error)]
pub enum PitchMapError {
    #[error("Note not found: {note}")]
    NoteNotFound { note: String },

    #[error("Invalid note range: {min} is above {max}")]
    InvertedRange { min: String, max: String },

    #[error(
        "Cannot create {group}/{machine} pitch map: note range has {notes} notes but {pitches} pitch values were given"
    )]
    LengthMismatch {
        group: String,
        machine: String,
        notes: usize,
        pitches: usize,
    },

    #[error("IO error on {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, PitchMapError>;
