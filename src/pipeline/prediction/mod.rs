pub mod client;
pub mod upload;

pub use client::*;
pub use upload::*;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum PredictionError {
    #[error("Prediction service is not reachable at {0}")]
    Connection(String),

    #[error("Prediction service returned error (status {status}): {body}")]
    Service { status: u16, body: String },

    #[error("HTTP client error: {0}")]
    HttpClient(String),

    #[error("Response parsing error: {0}")]
    ResponseParsing(String),

    #[error("File too large: {size} bytes (max {max})")]
    FileTooLarge { size: u64, max: u64 },

    #[error("Not an image file: {0}")]
    NotAnImage(String),

    #[error("Empty file: {0}")]
    EmptyFile(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
