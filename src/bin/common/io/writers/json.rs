use std::{
    collections::BTreeMap,
    fs::File,
    io::{BufWriter, Write},
};

use chrono::{DateTime, Utc};
use firespread::models::output::{Output, OutputVariableName};
use serde_derive::Serialize;
use strum::EnumProperty;

use crate::common::helpers::AppError;

use super::prelude::OutputSink;

#[derive(Debug, Serialize)]
struct VariableRecord<'a> {
    long_name: &'a str,
    units: &'a str,
    values: Vec<f64>,
}

#[derive(Debug, Serialize)]
struct StepRecord<'a> {
    time: DateTime<Utc>,
    lats: &'a [f64],
    lons: &'a [f64],
    variables: BTreeMap<String, VariableRecord<'a>>,
}

/// Writes one JSON line per time step with the requested variables.
pub struct JsonLinesWriter {
    file: BufWriter<File>,
    variables: Vec<OutputVariableName>,
}

impl JsonLinesWriter {
    pub fn new(path: &str, variables: &[OutputVariableName]) -> Result<Self, AppError> {
        let file = File::create(path)
            .map_err(|err| format!("Cannot create output file {}: {}", path, err))?;
        Ok(Self {
            file: BufWriter::new(file),
            variables: variables.to_vec(),
        })
    }
}

impl OutputSink for JsonLinesWriter {
    fn write(&mut self, output: &Output, lats: &[f64], lons: &[f64]) -> Result<(), AppError> {
        let variables = self
            .variables
            .iter()
            .filter_map(|var| {
                let values = output.get(var)?;
                Some((
                    var.to_string(),
                    VariableRecord {
                        long_name: var.get_str("long_name").unwrap_or_default(),
                        units: var.get_str("units").unwrap_or_default(),
                        values: values.to_vec(),
                    },
                ))
            })
            .collect();

        let record = StepRecord {
            time: output.time,
            lats,
            lons,
            variables,
        };
        serde_json::to_writer(&mut self.file, &record)
            .map_err(|err| format!("Cannot serialize output at {}: {}", output.time, err))?;
        writeln!(self.file).map_err(|err| format!("Cannot write output: {}", err))?;
        self.file
            .flush()
            .map_err(|err| format!("Cannot flush output: {}", err))?;
        Ok(())
    }
}

/// Write a whole collection as a pretty printed JSON document.
pub fn write_json<T: serde::Serialize + ?Sized>(path: &str, value: &T) -> Result<(), AppError> {
    let file =
        File::create(path).map_err(|err| format!("Cannot create output file {}: {}", path, err))?;
    serde_json::to_writer_pretty(BufWriter::new(file), value)
        .map_err(|err| format!("Cannot write {}: {}", path, err))?;
    Ok(())
}
