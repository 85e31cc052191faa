//! Reader/Writer traits and format dispatch
//!
//! Readers load a [`NoteSet`] from an input file; writers export a
//! [`LayoutSnapshot`] for a renderer or for later inspection. Both are picked
//! by file extension through a [`FormatRegistry`].

use std::fs;
use std::path::Path;

use serde::de::DeserializeOwned;
use thiserror::Error;

use crate::config::SimulationConfig;
use crate::formats::{JsonReader, JsonWriter, YamlReader};
use crate::notes::NoteSet;
use crate::snapshot::LayoutSnapshot;
use crate::svg_writer::{RenderOptions, SvgWriter};

/// Errors that can occur during reading or writing
#[derive(Error, Debug)]
pub enum IoError {
    /// The file format is not supported
    #[error("unsupported format: {0}")]
    UnsupportedFormat(String),

    /// The file extension could not be determined
    #[error("could not determine file format from path: {0}")]
    UnknownExtension(String),

    /// An I/O error occurred
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A parsing error occurred
    #[error("parse error: {0}")]
    Parse(String),

    /// A rendering/writing error occurred
    #[error("write error: {0}")]
    Write(String),
}

/// Result type for reader/writer operations
pub type IoResult<T> = Result<T, IoError>;

/// A reader parses an input file into a note set
pub trait Reader: Send + Sync {
    /// Parse the input file
    fn read(&self, input: &Path) -> IoResult<NoteSet>;

    /// File extensions this reader can handle (e.g., ["yaml", "yml"])
    fn supported_extensions(&self) -> &[&str];

    /// Check if this reader can handle the given file extension
    fn supports_extension(&self, ext: &str) -> bool {
        self.supported_extensions()
            .iter()
            .any(|e| e.eq_ignore_ascii_case(ext))
    }
}

/// A writer exports a layout snapshot to a specific format
pub trait Writer: Send + Sync {
    /// Write the snapshot to the output path
    fn write(&self, snapshot: &LayoutSnapshot, output: &Path) -> IoResult<()>;

    /// Identifier for this output format, also its file extension
    fn format_id(&self) -> &str;
}

/// Registry of available readers and writers
pub struct FormatRegistry {
    readers: Vec<Box<dyn Reader>>,
    writers: Vec<Box<dyn Writer>>,
}

impl Default for FormatRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl FormatRegistry {
    /// Create a new empty registry
    pub fn new() -> Self {
        Self {
            readers: Vec::new(),
            writers: Vec::new(),
        }
    }

    /// Create a registry with all default readers and writers registered
    ///
    /// Currently registers:
    /// - Readers: `YamlReader` (yaml, yml), `JsonReader` (json)
    /// - Writers: `SvgWriter` (svg), `JsonWriter` (json)
    pub fn with_defaults(render: RenderOptions) -> Self {
        let mut registry = Self::new();
        registry.register_reader(Box::new(YamlReader::new()));
        registry.register_reader(Box::new(JsonReader::new()));
        registry.register_writer(Box::new(SvgWriter::new(render)));
        registry.register_writer(Box::new(JsonWriter::new()));
        registry
    }

    pub fn register_reader(&mut self, reader: Box<dyn Reader>) {
        self.readers.push(reader);
    }

    pub fn register_writer(&mut self, writer: Box<dyn Writer>) {
        self.writers.push(writer);
    }

    /// Find a reader for the given file extension
    pub fn reader_for_extension(&self, ext: &str) -> Option<&dyn Reader> {
        self.readers
            .iter()
            .find(|r| r.supports_extension(ext))
            .map(|r| r.as_ref())
    }

    /// Find a writer by format ID
    pub fn writer_for_format(&self, format_id: &str) -> Option<&dyn Writer> {
        self.writers
            .iter()
            .find(|w| w.format_id().eq_ignore_ascii_case(format_id))
            .map(|w| w.as_ref())
    }

    /// Get file extension from a path
    pub fn extension_from_path(path: &Path) -> Option<&str> {
        path.extension().and_then(|e| e.to_str())
    }

    /// Find a reader for the given path based on its extension
    pub fn reader_for_path(&self, path: &Path) -> IoResult<&dyn Reader> {
        let ext = Self::extension_from_path(path)
            .ok_or_else(|| IoError::UnknownExtension(path.display().to_string()))?;

        self.reader_for_extension(ext)
            .ok_or_else(|| IoError::UnsupportedFormat(ext.to_string()))
    }

    /// Find a writer for the given path based on its extension
    pub fn writer_for_path(&self, path: &Path) -> IoResult<&dyn Writer> {
        let ext = Self::extension_from_path(path)
            .ok_or_else(|| IoError::UnknownExtension(path.display().to_string()))?;

        self.writer_for_format(ext)
            .ok_or_else(|| IoError::UnsupportedFormat(ext.to_string()))
    }
}

/// Deserialize a YAML or JSON file, chosen by extension
pub(crate) fn read_structured<T: DeserializeOwned>(path: &Path) -> IoResult<T> {
    let ext = FormatRegistry::extension_from_path(path)
        .ok_or_else(|| IoError::UnknownExtension(path.display().to_string()))?
        .to_ascii_lowercase();
    let text = fs::read_to_string(path)?;
    match ext.as_str() {
        "yaml" | "yml" => serde_yaml::from_str(&text).map_err(|e| IoError::Parse(e.to_string())),
        "json" => serde_json::from_str(&text).map_err(|e| IoError::Parse(e.to_string())),
        other => Err(IoError::UnsupportedFormat(other.to_string())),
    }
}

/// Load a simulation config from a YAML or JSON file
pub fn load_config(path: &Path) -> IoResult<SimulationConfig> {
    read_structured(path)
}
