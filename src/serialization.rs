//! Output writers for generated admin configuration.
//!
//! This module writes an [`AdminConfig`] as JSON, YAML or NDJSON.

use crate::config::OutputFormat;
use crate::descriptor::FieldMap;
use crate::loader::AdminConfig;
use serde::Serialize;
use std::io::Write;

/// Error type for serialization operations
#[derive(Debug)]
pub enum SerializationError {
    JsonError(serde_json::Error),
    YamlError(serde_yaml::Error),
    IoError(std::io::Error),
}

impl From<serde_json::Error> for SerializationError {
    fn from(err: serde_json::Error) -> Self {
        SerializationError::JsonError(err)
    }
}

impl From<serde_yaml::Error> for SerializationError {
    fn from(err: serde_yaml::Error) -> Self {
        SerializationError::YamlError(err)
    }
}

impl From<std::io::Error> for SerializationError {
    fn from(err: std::io::Error) -> Self {
        SerializationError::IoError(err)
    }
}

impl std::fmt::Display for SerializationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SerializationError::JsonError(e) => write!(f, "JSON error: {}", e),
            SerializationError::YamlError(e) => write!(f, "YAML error: {}", e),
            SerializationError::IoError(e) => write!(f, "IO error: {}", e),
        }
    }
}

impl std::error::Error for SerializationError {}

/// One NDJSON line: an entity class with its field descriptors
#[derive(Debug, Serialize)]
pub struct EntityRecord<'a> {
    pub entity: &'a str,
    pub fields: &'a FieldMap,
}

/// NDJSON (Newline Delimited JSON) writer
///
/// Writes records as NDJSON, one JSON object per line.
pub struct NdjsonWriter<W: Write> {
    writer: W,
}

impl<W: Write> NdjsonWriter<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    /// Write a single record as an NDJSON line
    pub fn write<T: Serialize>(&mut self, record: &T) -> Result<(), SerializationError> {
        let json = serde_json::to_string(record)?;
        writeln!(self.writer, "{}", json)?;
        Ok(())
    }

    pub fn flush(&mut self) -> Result<(), SerializationError> {
        self.writer.flush()?;
        Ok(())
    }
}

/// Write a whole admin configuration in the requested format.
///
/// `pretty` only affects JSON output.
pub fn write_config<W: Write>(
    mut writer: W,
    config: &AdminConfig,
    format: OutputFormat,
    pretty: bool,
) -> Result<(), SerializationError> {
    match format {
        OutputFormat::Json => {
            if pretty {
                serde_json::to_writer_pretty(&mut writer, config)?;
            } else {
                serde_json::to_writer(&mut writer, config)?;
            }
            writeln!(writer)?;
            writer.flush()?;
        }
        OutputFormat::Yaml => {
            serde_yaml::to_writer(&mut writer, config)?;
            writer.flush()?;
        }
        OutputFormat::Ndjson => {
            let mut ndjson = NdjsonWriter::new(writer);
            for (entity, fields) in config {
                ndjson.write(&EntityRecord { entity, fields })?;
            }
            ndjson.flush()?;
        }
    }

    Ok(())
}
