use tracing::debug;

use crate::machines::MachineSpec;
use crate::map::{PitchEntry, PitchMap};
use crate::notes::{full_note_range, note_index};
use crate::{PitchMapError, Result};

/// Pairs each machine's note range with its measured pitch values
#[derive(Debug, Clone, Copy)]
pub struct PitchMapBuilder {
    note_range: &'static [String],
}

impl Default for PitchMapBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl PitchMapBuilder {
    pub fn new() -> Self {
        Self {
            note_range: full_note_range(),
        }
    }

    /// Build a map holding only `spec`
    pub fn for_machine(spec: &MachineSpec) -> Result<PitchMap> {
        Self::new().build_machine_pitch_map(std::slice::from_ref(spec))
    }

    /// The notes from `min_note` to `max_note`, both inclusive
    pub fn machine_note_range(&self, min_note: &str, max_note: &str) -> Result<&'static [String]> {
        let start = self.index_of(min_note)?;
        let end = self.index_of(max_note)?;

        if start > end {
            return Err(PitchMapError::InvertedRange {
                min: min_note.to_string(),
                max: max_note.to_string(),
            });
        }

        Ok(&self.note_range[start..=end])
    }

    /// Zip a machine's note range with its pitch values
    pub fn machine_entries(&self, spec: &MachineSpec) -> Result<Vec<PitchEntry>> {
        let notes = self.machine_note_range(&spec.min_note, &spec.max_note)?;

        // Never zip-shortest: a length difference means the table is wrong
        if notes.len() != spec.pitches.len() {
            return Err(PitchMapError::LengthMismatch {
                group: spec.group.clone(),
                machine: spec.name.clone(),
                notes: notes.len(),
                pitches: spec.pitches.len(),
            });
        }

        Ok(notes
            .iter()
            .zip(&spec.pitches)
            .map(|(note, &pitch)| PitchEntry(note.clone(), pitch))
            .collect())
    }

    /// Build the grouped map for every spec, in order.
    ///
    /// Any bad spec fails the whole build. When two specs share a group and
    /// name, the first one is kept.
    pub fn build_machine_pitch_map(&self, specs: &[MachineSpec]) -> Result<PitchMap> {
        let mut map = PitchMap::new();

        for spec in specs {
            let entries = self.machine_entries(spec)?;
            let count = entries.len();

            if map.insert_if_absent(&spec.group, &spec.name, entries) {
                debug!(
                    "Built {} pitch map ({} notes, {}..{})",
                    spec.label(),
                    count,
                    spec.min_note,
                    spec.max_note
                );
            } else {
                debug!("Ignoring duplicate machine {}", spec.label());
            }
        }

        Ok(map)
    }

    fn index_of(&self, note: &str) -> Result<usize> {
        note_index(note).ok_or_else(|| PitchMapError::NoteNotFound {
            note: note.to_string(),
        })
    }
}
