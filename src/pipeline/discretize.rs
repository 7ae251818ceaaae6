/*
 * Galileo Network Analytics (GNA) Toolkit
 *
 * Copyright 2024-2025 Fidelis Farm & Technologies, LLC
 * All Rights Reserved.
 * See license information in LICENSE.
 */

use crate::model::binning::umcc::{BinAssignment, F64UmccBinner, UmccBinner};
use crate::model::binning::value::UmccValue;
use crate::pipeline::resolve_options;
use crate::pipeline::FileProcessor;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::io::{Error, ErrorKind};
use std::path::Path;

/// Field read from JSON Lines input when no column is given
pub const DEFAULT_JSON_FIELD: &str = "value";

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FileFormat {
    Csv,
    JsonLines,
}

impl FileFormat {
    pub fn from_path(path: &str) -> Result<FileFormat, Error> {
        match Path::new(path).extension().and_then(|ext| ext.to_str()) {
            Some("csv") => Ok(FileFormat::Csv),
            Some("jsonl") => Ok(FileFormat::JsonLines),
            _ => Err(Error::new(
                ErrorKind::InvalidInput,
                format!("unsupported file type '{}', expected .csv or .jsonl", path),
            )),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum BinValue {
    Index(usize),
    Scaled(f64),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssignmentRecord {
    pub value: f64,
    pub bin: BinValue,
}

pub struct DiscretizeProcessor {
    pub command: String,
    pub input: String,
    pub output: String,
    pub column: Option<String>,
    pub input_format: FileFormat,
    pub output_format: FileFormat,
    pub binner: F64UmccBinner,
}

impl DiscretizeProcessor {
    pub fn new(
        command: &str,
        input: &str,
        output: &str,
        column: Option<&str>,
        options_string: &str,
    ) -> Result<Self, Error> {
        let options_string = resolve_options(options_string);
        let binner = UmccBinner::from_options(&options_string)
            .map_err(|e| Error::new(ErrorKind::InvalidInput, e))?;
        println!(
            "{}: [max_contrast={}] [min_samples={}] [scale={}]",
            command, binner.max_contrast, binner.min_samples, binner.scale
        );

        Ok(Self {
            command: command.to_string(),
            input: input.to_string(),
            output: output.to_string(),
            column: column.map(|c| c.to_string()),
            input_format: FileFormat::from_path(input)?,
            output_format: FileFormat::from_path(output)?,
            binner,
        })
    }

    pub fn read_values(&self) -> Result<Vec<f64>, Error> {
        match self.input_format {
            FileFormat::Csv => self.read_csv(),
            FileFormat::JsonLines => self.read_json_lines(),
        }
    }

    fn read_csv(&self) -> Result<Vec<f64>, Error> {
        let mut reader = csv::Reader::from_path(&self.input).map_err(|e| {
            Error::new(
                ErrorKind::Other,
                format!("failed to open CSV {}: {}", self.input, e),
            )
        })?;

        let headers = reader
            .headers()
            .map_err(|e| Error::new(ErrorKind::InvalidData, format!("CSV header error: {}", e)))?
            .clone();
        let index = match &self.column {
            Some(column) => headers.iter().position(|h| h == column).ok_or_else(|| {
                Error::new(
                    ErrorKind::InvalidInput,
                    format!(
                        "column '{}' not found, available columns: {:?}",
                        column,
                        headers.iter().collect::<Vec<_>>()
                    ),
                )
            })?,
            None => 0,
        };

        let mut values = Vec::new();
        for (row, record) in reader.records().enumerate() {
            let record = record.map_err(|e| {
                Error::new(ErrorKind::InvalidData, format!("CSV record error: {}", e))
            })?;
            let field = record.get(index).unwrap_or("");
            let value = field.trim().parse::<f64>().map_err(|e| {
                // header is line 1
                Error::new(
                    ErrorKind::InvalidData,
                    format!("line {}: invalid number '{}': {}", row + 2, field, e),
                )
            })?;
            values.push(value);
        }
        Ok(values)
    }

    fn read_json_lines(&self) -> Result<Vec<f64>, Error> {
        let field = self.column.as_deref().unwrap_or(DEFAULT_JSON_FIELD);
        let mut values = Vec::new();
        for (row, record) in serde_jsonlines::json_lines(&self.input)?.enumerate() {
            let record: Value = record?;
            let value = record.get(field).and_then(Value::as_f64).ok_or_else(|| {
                Error::new(
                    ErrorKind::InvalidData,
                    format!("line {}: missing numeric field '{}'", row + 1, field),
                )
            })?;
            values.push(value);
        }
        Ok(values)
    }

    pub fn write_assignment(&self, values: &[f64], assignment: &BinAssignment) -> Result<(), Error> {
        let bins: Vec<BinValue> = match assignment {
            BinAssignment::Index(bins) => bins.iter().map(|&b| BinValue::Index(b)).collect(),
            BinAssignment::Scaled(bins) => bins.iter().map(|&b| BinValue::Scaled(b)).collect(),
        };
        let records = values
            .iter()
            .zip(bins)
            .map(|(&value, bin)| AssignmentRecord { value, bin });

        // write to a hidden file and rename once complete
        let output_path = Path::new(&self.output);
        let file_name = output_path
            .file_name()
            .map(|name| name.to_string_lossy().to_string())
            .unwrap_or_default();
        let tmp_path = output_path.with_file_name(format!(".{}", file_name));

        match self.output_format {
            FileFormat::Csv => {
                let mut writer = csv::Writer::from_path(&tmp_path).map_err(|e| {
                    Error::new(ErrorKind::Other, format!("failed to create CSV: {}", e))
                })?;
                for record in records {
                    writer.serialize(record).map_err(|e| {
                        Error::new(ErrorKind::Other, format!("CSV write error: {}", e))
                    })?;
                }
                writer.flush()?;
            }
            FileFormat::JsonLines => {
                serde_jsonlines::write_json_lines(&tmp_path, records)?;
            }
        }

        std::fs::rename(&tmp_path, output_path)
    }
}

impl FileProcessor for DiscretizeProcessor {
    fn process(&mut self) -> Result<usize, Error> {
        let values = self.read_values()?;
        let invalid = values.iter().filter(|v| !v.is_valid()).count();
        if invalid > 0 {
            println!(
                "{}: warning: {} non-finite value(s) in {}",
                self.command, invalid, self.input
            );
        }

        let result = self.binner.fit(&values);
        println!(
            "{}: {} record(s), {} edge(s), {} forced split(s)",
            self.command,
            values.len(),
            result.edges.len(),
            result.forced_splits()
        );
        for (lower, upper, count) in self.binner.bin_report(&result) {
            println!(
                "{}: bin [{}, {}) count {}",
                self.command,
                lower.map_or("-inf".to_string(), |v| v.to_string()),
                upper.map_or("inf".to_string(), |v| v.to_string()),
                count
            );
        }

        let assignment = self.binner.assign(&result, &values);
        self.write_assignment(&values, &assignment)?;
        Ok(values.len())
    }

    fn get_command(&self) -> &String {
        &self.command
    }

    fn get_input(&self) -> &String {
        &self.input
    }

    fn get_output(&self) -> &String {
        &self.output
    }
}
