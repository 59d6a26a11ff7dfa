use crate::domain::model::CompanyRecord;
use crate::utils::error::{RegistryError, Result};
use serde::Serialize;
use serde_json::{Map, Value};
use std::path::Path;

pub const DEFAULT_DELIMITER: char = '|';
pub const CANONICAL_HEADER: [&str; 4] = ["id", "name", "address", "budget"];

/// File encoding, chosen purely by extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Format {
    Delimited,
    Csv,
    Json,
}

impl Format {
    /// `.json` and `.csv` (any case) map to their formats; everything else,
    /// including no extension, is delimited text.
    pub fn from_path(path: &Path) -> Self {
        match path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| ext.to_ascii_lowercase())
            .as_deref()
        {
            Some("json") => Format::Json,
            Some("csv") => Format::Csv,
            _ => Format::Delimited,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Format::Delimited => "delimited text",
            Format::Csv => "CSV",
            Format::Json => "JSON",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Codec {
    delimiter: char,
}

impl Default for Codec {
    fn default() -> Self {
        Self::new(DEFAULT_DELIMITER)
    }
}

impl Codec {
    pub fn new(delimiter: char) -> Self {
        Self { delimiter }
    }

    pub fn delimiter(&self) -> char {
        self.delimiter
    }

    /// Parses file bytes into raw rows. `source` only labels errors.
    ///
    /// Rows are left as JSON values so that every format feeds the same
    /// normalizer; a JSON element that is not an object is passed through and
    /// skipped there.
    pub fn parse(&self, format: Format, source: &str, bytes: &[u8]) -> Result<Vec<Value>> {
        match format {
            Format::Json => parse_json(source, bytes),
            Format::Csv => parse_csv(source, bytes),
            Format::Delimited => self.parse_delimited(source, bytes),
        }
    }

    pub fn encode(&self, format: Format, records: &[CompanyRecord]) -> Result<Vec<u8>> {
        match format {
            Format::Json => encode_json(records),
            Format::Csv => encode_csv(records),
            Format::Delimited => Ok(self.encode_delimited(records).into_bytes()),
        }
    }

    fn parse_delimited(&self, source: &str, bytes: &[u8]) -> Result<Vec<Value>> {
        let text = decode_utf8(source, bytes)?;
        let mut rows = Vec::new();

        for (index, line) in text.lines().enumerate() {
            let line = line.trim();
            if line.is_empty() {
                continue;
            }

            let parts: Vec<&str> = line.split(self.delimiter).collect();
            if parts.len() < CANONICAL_HEADER.len() {
                tracing::debug!(
                    "Ignoring line {} of {}: {} fields, need {}",
                    index + 1,
                    source,
                    parts.len(),
                    CANONICAL_HEADER.len()
                );
                continue;
            }

            let row: Map<String, Value> = CANONICAL_HEADER
                .iter()
                .zip(parts)
                .map(|(key, part)| (key.to_string(), Value::String(part.to_string())))
                .collect();
            rows.push(Value::Object(row));
        }

        Ok(rows)
    }

    fn encode_delimited(&self, records: &[CompanyRecord]) -> String {
        let d = self.delimiter;
        records
            .iter()
            .map(|r| format!("{}{d}{}{d}{}{d}{}\n", r.id, r.name, r.address, r.budget))
            .collect()
    }
}

fn decode_utf8<'a>(source: &str, bytes: &'a [u8]) -> Result<&'a str> {
    let text = std::str::from_utf8(bytes).map_err(|e| RegistryError::MalformedInput {
        path: source.to_string(),
        message: format!("file is not valid UTF-8: {}", e),
    })?;
    Ok(text.strip_prefix('\u{feff}').unwrap_or(text))
}

fn parse_json(source: &str, bytes: &[u8]) -> Result<Vec<Value>> {
    let value: Value = serde_json::from_slice(bytes).map_err(|e| RegistryError::MalformedInput {
        path: source.to_string(),
        message: format!("Invalid JSON format: {}", e),
    })?;

    match value {
        Value::Array(rows) => Ok(rows),
        other => Err(RegistryError::MalformedInput {
            path: source.to_string(),
            message: format!("expected a JSON array of objects, found {}", json_kind(&other)),
        }),
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

fn parse_csv(source: &str, bytes: &[u8]) -> Result<Vec<Value>> {
    let malformed = |e: csv::Error| RegistryError::MalformedInput {
        path: source.to_string(),
        message: e.to_string(),
    };

    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(bytes);

    let headers = reader.headers().map_err(malformed)?.clone();
    let mut rows = Vec::new();

    for result in reader.records() {
        let record = result.map_err(malformed)?;
        // Short rows leave the trailing keys absent; extra cells have no header and are dropped.
        let row: Map<String, Value> = headers
            .iter()
            .zip(record.iter())
            .map(|(key, cell)| (key.to_string(), Value::String(cell.to_string())))
            .collect();
        rows.push(Value::Object(row));
    }

    Ok(rows)
}

fn encode_csv(records: &[CompanyRecord]) -> Result<Vec<u8>> {
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(Vec::new());

    writer.write_record(CANONICAL_HEADER)?;
    for record in records {
        let budget = record.budget.to_string();
        writer.write_record([
            record.id.as_str(),
            record.name.as_str(),
            record.address.as_str(),
            budget.as_str(),
        ])?;
    }

    writer
        .into_inner()
        .map_err(|e| RegistryError::IoError(e.into_error()))
}

fn encode_json(records: &[CompanyRecord]) -> Result<Vec<u8>> {
    let mut buffer = Vec::new();
    let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
    let mut serializer = serde_json::Serializer::with_formatter(&mut buffer, formatter);
    records.serialize(&mut serializer)?;
    Ok(buffer)
}
