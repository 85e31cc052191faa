//! YAML/JSON note readers and the JSON snapshot writer

use std::fs;
use std::path::Path;

use crate::io::{IoError, IoResult, Reader, Writer, read_structured};
use crate::notes::NoteSet;
use crate::snapshot::LayoutSnapshot;

/// Reads note sets from YAML files
///
/// ```yaml
/// bbox_side_length: 400
/// notes:
///   - label: A
///     importance: 1
///     pull_weights: [0.5, 0, 0.5, 0, 0, 0]
/// ```
#[derive(Debug, Default)]
pub struct YamlReader;

impl YamlReader {
    pub fn new() -> Self {
        Self
    }
}

impl Reader for YamlReader {
    fn read(&self, input: &Path) -> IoResult<NoteSet> {
        let text = fs::read_to_string(input)?;
        serde_yaml::from_str(&text).map_err(|e| IoError::Parse(format!("{}: {e}", input.display())))
    }

    fn supported_extensions(&self) -> &[&str] {
        &["yaml", "yml"]
    }
}

/// Reads note sets from JSON files with the same shape as [`YamlReader`]
#[derive(Debug, Default)]
pub struct JsonReader;

impl JsonReader {
    pub fn new() -> Self {
        Self
    }
}

impl Reader for JsonReader {
    fn read(&self, input: &Path) -> IoResult<NoteSet> {
        read_structured(input)
    }

    fn supported_extensions(&self) -> &[&str] {
        &["json"]
    }
}

/// Writes a snapshot as pretty-printed JSON
#[derive(Debug, Default)]
pub struct JsonWriter;

impl JsonWriter {
    pub fn new() -> Self {
        Self
    }
}

impl Writer for JsonWriter {
    fn write(&self, snapshot: &LayoutSnapshot, output: &Path) -> IoResult<()> {
        let json =
            serde_json::to_string_pretty(snapshot).map_err(|e| IoError::Write(e.to_string()))?;
        if let Some(parent) = output.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        fs::write(output, json)?;
        Ok(())
    }

    fn format_id(&self) -> &str {
        "json"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SimulationConfig;
    use crate::notes::NoteLayout;
    use crate::vector::Vector2D;

    #[test]
    fn yaml_reader_parses_note_set() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("notes.yml");
        fs::write(
            &path,
            "bbox_side_length: 300\nnotes:\n  - label: A\n    pull_weights: [0.5, 0, 0.5, 0, 0, 0]\n",
        )
        .unwrap();

        let set = YamlReader::new().read(&path).unwrap();
        assert_eq!(set.bbox_side_length, Some(300.0));
        assert_eq!(set.notes.len(), 1);
        assert_eq!(set.notes[0].label, "A");
        assert_eq!(set.notes[0].importance, 1.0);
    }

    #[test]
    fn json_reader_parses_note_set() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("notes.json");
        fs::write(
            &path,
            r#"{"notes":[{"label":"Z","importance":2.5,"pull_weights":[0,0,0,0,0,1]}]}"#,
        )
        .unwrap();

        let set = JsonReader::new().read(&path).unwrap();
        assert_eq!(set.bbox_side_length, None);
        assert_eq!(set.notes[0].importance, 2.5);
        assert_eq!(set.notes[0].pull_weights[5], 1.0);
    }

    #[test]
    fn reader_reports_wrong_weight_count_as_parse_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("notes.yaml");
        fs::write(&path, "notes:\n  - label: A\n    pull_weights: [1, 0]\n").unwrap();

        assert!(matches!(
            YamlReader::new().read(&path),
            Err(IoError::Parse(_))
        ));
    }

    #[test]
    fn json_writer_creates_parent_dirs_and_keeps_positions() {
        let layout = NoteLayout::new(200.0).unwrap();
        let notes = vec![crate::notes::NoteDescriptor::new(
            "A",
            1.0,
            [0.5, 0.0, 0.5, 0.0, 0.0, 0.0],
        )];
        let sim = layout
            .simulation(&notes, SimulationConfig::default(), 3)
            .unwrap();
        let snapshot = sim.snapshot();

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("layout.json");
        JsonWriter::new().write(&snapshot, &path).unwrap();

        let back: LayoutSnapshot =
            serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(back.step, 0);
        assert_eq!(back.edges, snapshot.edges);
        assert_eq!(back.vertices.len(), snapshot.vertices.len());
        for (read, written) in back.vertices.iter().zip(&snapshot.vertices) {
            assert_eq!(read.kind, written.kind);
            assert!(Vector2D::distance(read.position, written.position) < 1e-9);
        }
    }
}
