use std::{collections::BTreeMap, fs::File, io::BufReader};

use chrono::{DateTime, Utc};
use firespread::models::input::InputElement;
use log::{debug, warn};
use serde_derive::Deserialize;

use crate::common::helpers::AppError;

use super::prelude::InputHandler;

/// One observation time of the weather file.
#[derive(Debug, Deserialize)]
pub struct WeatherRecord {
    pub time: DateTime<Utc>,
    pub cells: Vec<InputElement>,
}

/// Daily weather read from a JSON array of [`WeatherRecord`]s.
pub struct JsonInputHandler {
    path: String,
    data: BTreeMap<DateTime<Utc>, Vec<InputElement>>,
}

impl JsonInputHandler {
    pub fn new(path: &str, cells: usize) -> Result<Self, AppError> {
        let file = File::open(path)
            .map_err(|err| format!("Cannot open weather file {}: {}", path, err))?;
        let records: Vec<WeatherRecord> = serde_json::from_reader(BufReader::new(file))
            .map_err(|err| format!("Cannot parse weather file {}: {}", path, err))?;

        let mut data = BTreeMap::new();
        for record in records {
            if record.cells.len() != cells {
                warn!(
                    "{}: {} cells at {}, expected {}",
                    path,
                    record.cells.len(),
                    record.time,
                    cells
                );
            }
            if data.insert(record.time, record.cells).is_some() {
                debug!("{}: duplicated time {}, keeping the last one", path, record.time);
            }
        }
        Ok(Self {
            path: path.to_owned(),
            data,
        })
    }
}

impl InputHandler for JsonInputHandler {
    fn get_values(&self, date: &DateTime<Utc>) -> Option<Vec<InputElement>> {
        self.data.get(date).cloned()
    }

    fn get_timeline(&self) -> Vec<DateTime<Utc>> {
        self.data.keys().copied().collect()
    }

    fn info_input(&self) -> String {
        let timeline = self.get_timeline();
        match (timeline.first(), timeline.last()) {
            (Some(first), Some(last)) => format!(
                "{}: {} steps from {} to {}",
                self.path,
                timeline.len(),
                first.format("%Y-%m-%d %H:%M"),
                last.format("%Y-%m-%d %H:%M")
            ),
            _ => format!("{}: no data", self.path),
        }
    }
}
