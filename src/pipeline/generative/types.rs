use super::GenerativeError;

/// Text-generation backend used to obtain guidance for a diagnosis.
pub trait GenerativeClient {
    /// Send a prompt and return the generated text.
    fn generate(&self, prompt: &str) -> Result<String, GenerativeError>;
}

/// Mock generative client for testing. Returns a configurable response.
pub struct MockGenerativeClient {
    response: Result<String, String>,
    calls: std::sync::Mutex<Vec<String>>,
}

impl MockGenerativeClient {
    pub fn new(response: &str) -> Self {
        Self {
            response: Ok(response.to_string()),
            calls: std::sync::Mutex::new(Vec::new()),
        }
    }

    /// A client whose every call fails with an API error carrying `message`.
    pub fn failing(message: &str) -> Self {
        Self {
            response: Err(message.to_string()),
            calls: std::sync::Mutex::new(Vec::new()),
        }
    }

    /// Prompts received so far.
    pub fn prompts(&self) -> Vec<String> {
        self.calls.lock().map(|c| c.clone()).unwrap_or_default()
    }
}

impl GenerativeClient for MockGenerativeClient {
    fn generate(&self, prompt: &str) -> Result<String, GenerativeError> {
        if let Ok(mut calls) = self.calls.lock() {
            calls.push(prompt.to_string());
        }
        match &self.response {
            Ok(text) => Ok(text.clone()),
            Err(message) => Err(GenerativeError::Api {
                status: 500,
                message: message.clone(),
            }),
        }
    }
}
