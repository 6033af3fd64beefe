use std::sync::OnceLock;

/// Pitch classes in chromatic order, padded to two characters the way the
/// Machinedrum displays them
pub const PITCH_CLASSES: [&str; 12] = [
    "C-", "C#", "D-", "D#", "E-", "F-", "F#", "G-", "G#", "A-", "A#", "B-",
];

pub const MIN_OCTAVE: u8 = 1;
pub const MAX_OCTAVE: u8 = 9;

/// Size of the note universe (12 pitch classes over 9 octaves)
pub const NOTE_COUNT: usize = PITCH_CLASSES.len() * (MAX_OCTAVE - MIN_OCTAVE + 1) as usize;

/// The full note range, C-1 through B-9 in ascending order.
///
/// Built on first use and shared for the life of the process.
pub fn full_note_range() -> &'static [String] {
    static NOTES: OnceLock<Vec<String>> = OnceLock::new();
    NOTES.get_or_init(|| {
        (MIN_OCTAVE..=MAX_OCTAVE)
            .flat_map(|octave| {
                PITCH_CLASSES
                    .iter()
                    .map(move |class| format!("{}{}", class, octave))
            })
            .collect()
    })
}

/// Position of a note name within the full range
pub fn note_index(note: &str) -> Option<usize> {
    full_note_range().iter().position(|n| n == note)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_range_bounds() {
        let notes = full_note_range();
        assert_eq!(notes.len(), NOTE_COUNT);
        assert_eq!(notes.len(), 108);
        assert_eq!(notes[0], "C-1");
        assert_eq!(notes[11], "B-1");
        assert_eq!(notes[12], "C-2");
        assert_eq!(notes[107], "B-9");
    }

    #[test]
    fn test_every_class_octave_pair_once() {
        let notes = full_note_range();
        for octave in MIN_OCTAVE..=MAX_OCTAVE {
            for class in PITCH_CLASSES {
                let name = format!("{}{}", class, octave);
                assert_eq!(notes.iter().filter(|n| **n == name).count(), 1, "{}", name);
            }
        }
    }

    #[test]
    fn test_ascending_order() {
        // Ascending pitch means octave-major, then chromatic class order
        for (idx, note) in full_note_range().iter().enumerate() {
            let class = &note[..2];
            let octave: usize = note[2..].parse().unwrap();
            let class_idx = PITCH_CLASSES.iter().position(|c| *c == class).unwrap();
            assert_eq!((octave - 1) * 12 + class_idx, idx);
        }
    }

    #[test]
    fn test_note_index() {
        assert_eq!(note_index("C-1"), Some(0));
        assert_eq!(note_index("A#3"), Some(34));
        assert_eq!(note_index("C-10"), None);
        assert_eq!(note_index("C-0"), None);
        assert_eq!(note_index("c-1"), None);
    }
}
