pub mod generative; // Gemini guidance text
pub mod guidance; // Three-tier guidance extraction
pub mod orchestrator; // Upload → prediction → guidance
pub mod prediction; // Scan classification service
