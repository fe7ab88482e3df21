pub mod gemini;
pub mod prompt;
pub mod types;

pub use gemini::*;
pub use prompt::*;
pub use types::*;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum GenerativeError {
    #[error("Generative service is not reachable at {0}")]
    Connection(String),

    #[error("Generative service returned error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("HTTP client error: {0}")]
    HttpClient(String),

    #[error("Response parsing error: {0}")]
    ResponseParsing(String),

    #[error("Generative service returned no text")]
    EmptyResponse,

    #[error("No API key configured for the generative service")]
    MissingApiKey,
}
