use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::{PitchMapError, Result};

/// Indentation used for the rendered JSON unless told otherwise
pub const DEFAULT_INDENT: usize = 4;

/// A note paired with its pitch value. Serializes as `["B-1", 1]`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PitchEntry(pub String, pub u8);

impl PitchEntry {
    pub fn note(&self) -> &str {
        &self.0
    }

    pub fn pitch(&self) -> u8 {
        self.1
    }
}

/// Pitch tables grouped by machine group, then machine name.
///
/// Both levels are sorted by key; entries within a machine stay in ascending
/// note order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PitchMap {
    groups: BTreeMap<String, BTreeMap<String, Vec<PitchEntry>>>,
}

impl PitchMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a machine's entries unless that group/name is already present.
    /// Returns false when the existing entries were kept.
    pub(crate) fn insert_if_absent(
        &mut self,
        group: &str,
        name: &str,
        entries: Vec<PitchEntry>,
    ) -> bool {
        let machines = self.groups.entry(group.to_string()).or_default();
        if machines.contains_key(name) {
            return false;
        }
        machines.insert(name.to_string(), entries);
        true
    }

    pub fn groups(&self) -> impl Iterator<Item = (&str, &BTreeMap<String, Vec<PitchEntry>>)> {
        self.groups.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn machine(&self, group: &str, name: &str) -> Option<&[PitchEntry]> {
        self.groups
            .get(group)
            .and_then(|machines| machines.get(name))
            .map(Vec::as_slice)
    }

    /// Pitch value that tunes the machine to `note`
    pub fn pitch_for(&self, group: &str, name: &str, note: &str) -> Option<u8> {
        self.machine(group, name)?
            .iter()
            .find(|entry| entry.note() == note)
            .map(PitchEntry::pitch)
    }

    /// Note produced by an exact pitch value
    pub fn note_for(&self, group: &str, name: &str, pitch: u8) -> Option<&str> {
        self.machine(group, name)?
            .iter()
            .find(|entry| entry.pitch() == pitch)
            .map(PitchEntry::note)
    }

    /// Number of machines across all groups
    pub fn len(&self) -> usize {
        self.groups.values().map(BTreeMap::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn write_json<W: Write>(&self, writer: W, indent: usize) -> Result<()> {
        let indent = " ".repeat(indent);
        let formatter = serde_json::ser::PrettyFormatter::with_indent(indent.as_bytes());
        let mut ser = serde_json::Serializer::with_formatter(writer, formatter);
        self.serialize(&mut ser)?;
        Ok(())
    }

    pub fn to_json_string(&self, indent: usize) -> Result<String> {
        let mut buf = Vec::new();
        self.write_json(&mut buf, indent)?;
        // serde_json only emits valid UTF-8
        Ok(String::from_utf8_lossy(&buf).into_owned())
    }

    /// Write the rendered map to `path`, replacing any existing file
    pub fn write_json_file(&self, path: &Path, indent: usize) -> Result<()> {
        let io_err = |source: std::io::Error| PitchMapError::Io {
            path: path.to_path_buf(),
            source,
        };

        let file = File::create(path).map_err(io_err)?;
        let mut writer = BufWriter::new(file);
        self.write_json(&mut writer, indent).map_err(|err| match err {
            PitchMapError::Json(err) if err.is_io() => io_err(std::io::Error::from(err)),
            other => other,
        })?;
        writeln!(writer).map_err(io_err)?;
        writer.flush().map_err(io_err)?;
        Ok(())
    }

    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entries(pairs: &[(&str, u8)]) -> Vec<PitchEntry> {
        pairs
            .iter()
            .map(|(note, pitch)| PitchEntry(note.to_string(), *pitch))
            .collect()
    }

    fn sample_map() -> PitchMap {
        let mut map = PitchMap::new();
        map.insert_if_absent("TRX", "SD", entries(&[("F-4", 3), ("F#4", 13)]));
        map.insert_if_absent("TRX", "BD", entries(&[("B-1", 1), ("C-2", 7)]));
        map.insert_if_absent("EFM", "BD", entries(&[("G#1", 1)]));
        map
    }

    #[test]
    fn test_insert_if_absent_keeps_first() {
        let mut map = PitchMap::new();
        assert!(map.insert_if_absent("TRX", "BD", entries(&[("B-1", 1)])));
        assert!(!map.insert_if_absent("TRX", "BD", entries(&[("C-1", 99)])));
        assert_eq!(map.machine("TRX", "BD").unwrap(), entries(&[("B-1", 1)]).as_slice());
        assert_eq!(map.len(), 1);
    }

    #[test]
    fn test_lookups() {
        let map = sample_map();
        assert_eq!(map.pitch_for("TRX", "SD", "F#4"), Some(13));
        assert_eq!(map.pitch_for("TRX", "SD", "G-4"), None);
        assert_eq!(map.pitch_for("TRX", "CP", "F#4"), None);
        assert_eq!(map.note_for("TRX", "BD", 7), Some("C-2"));
        assert_eq!(map.note_for("TRX", "BD", 8), None);
        assert_eq!(map.len(), 3);
        assert!(!map.is_empty());
        assert!(PitchMap::new().is_empty());
    }

    #[test]
    fn test_groups_sorted() {
        let map = sample_map();
        let groups: Vec<&str> = map.groups().map(|(g, _)| g).collect();
        assert_eq!(groups, ["EFM", "TRX"]);
    }

    #[test]
    fn test_json_layout() {
        let mut map = PitchMap::new();
        map.insert_if_absent("TRX", "BD", entries(&[("B-1", 1), ("C-2", 7)]));
        let json = map.to_json_string(DEFAULT_INDENT).unwrap();
        let expected = r#"{
    "TRX": {
        "BD": [
            [
                "B-1",
                1
            ],
            [
                "C-2",
                7
            ]
        ]
    }
}"#;
        assert_eq!(json, expected);
    }

    #[test]
    fn test_json_keys_sorted() {
        let json = sample_map().to_json_string(2).unwrap();
        let efm = json.find("\"EFM\"").unwrap();
        let trx = json.find("\"TRX\"").unwrap();
        let bd = json.find("\"BD\"").unwrap();
        let sd = json.find("\"SD\"").unwrap();
        assert!(efm < trx);
        assert!(bd < sd);
        assert!(json.contains("\n  \"EFM\""));
    }

    #[test]
    fn test_json_round_trip() {
        let map = sample_map();
        let json = map.to_json_string(DEFAULT_INDENT).unwrap();
        assert_eq!(PitchMap::from_json_str(&json).unwrap(), map);
    }

    #[test]
    fn test_write_json_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("pitch_map.json");
        let map = sample_map();

        map.write_json_file(&path, DEFAULT_INDENT).unwrap();
        let written = std::fs::read_to_string(&path).unwrap();
        assert!(written.ends_with("}\n"));
        assert_eq!(PitchMap::from_json_str(&written).unwrap(), map);
    }

    #[test]
    fn test_write_json_file_bad_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("no_such_dir").join("out.json");
        match sample_map().write_json_file(&path, DEFAULT_INDENT) {
            Err(PitchMapError::Io { path: p, .. }) => assert_eq!(p, path),
            other => panic!("expected IO error, got {:?}", other),
        }
    }
}
