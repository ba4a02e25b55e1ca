use chrono::{DateTime, Utc};
use firespread::models::input::InputElement;

/// Trait defining the behavior of an InputHandler for the daily driver
pub trait InputHandler {
    /// get the observations of every cell at the desired date
    fn get_values(&self, date: &DateTime<Utc>) -> Option<Vec<InputElement>>;

    /// Returns the timeline of the input data
    fn get_timeline(&self) -> Vec<DateTime<Utc>>;

    /// Human readable description of the loaded input
    fn info_input(&self) -> String;
}
