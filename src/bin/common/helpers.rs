use std::fmt::Display;

use chrono::{DateTime, Utc};
use ndarray::Array1;
use firespread::models::input::{Input, InputElement};

use crate::common::io::readers::prelude::InputHandler;

/// Get the input data of `time` from the input handler, one element per cell.
/// Cells missing from the handler are left as NODATAVAL.
pub fn get_input(handler: &dyn InputHandler, time: &DateTime<Utc>, len: usize) -> Input {
    let mut data: Array1<InputElement> = Array1::default(len);
    if let Some(values) = handler.get_values(time) {
        data.iter_mut()
            .zip(values)
            .for_each(|(dst, src)| *dst = src);
    }
    Input { time: *time, data }
}

#[derive(Debug)]
pub struct AppError {
    msg: String,
}

impl From<String> for AppError {
    fn from(msg: String) -> Self {
        AppError { msg }
    }
}

impl From<AppError> for String {
    fn from(value: AppError) -> String {
        value.msg
    }
}

impl From<&str> for AppError {
    fn from(msg: &str) -> Self {
        AppError { msg: msg.into() }
    }
}

impl Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.msg)
    }
}

impl std::error::Error for AppError {}
