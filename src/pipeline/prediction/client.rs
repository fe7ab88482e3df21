use reqwest::blocking::multipart::{Form, Part};

use super::upload::ScanUpload;
use super::PredictionError;
use crate::models::PredictionResponse;

pub const DEFAULT_PREDICT_URL: &str = "https://medscanbackend.onrender.com/predict";

/// The service reads the image from either field depending on its version.
const UPLOAD_FIELDS: [&str; 2] = ["file", "scan"];

/// Longest slice of an error body kept in an error message.
const MAX_ERROR_BODY_CHARS: usize = 200;

/// Image classification backend.
pub trait PredictionClient {
    fn predict(&self, upload: &ScanUpload) -> Result<PredictionResponse, PredictionError>;
}

/// Multipart HTTP client for the prediction service.
pub struct HttpPredictionClient {
    url: String,
    client: reqwest::blocking::Client,
    timeout_secs: u64,
}

impl HttpPredictionClient {
    pub fn new(url: &str, timeout_secs: u64) -> Result<Self, PredictionError> {
        let client = reqwest::blocking::Client::builder()
            .timeout(std::time::Duration::from_secs(timeout_secs))
            .build()
            .map_err(|e| PredictionError::HttpClient(e.to_string()))?;

        Ok(Self {
            url: url.to_string(),
            client,
            timeout_secs,
        })
    }

    fn build_form(upload: &ScanUpload) -> Result<Form, PredictionError> {
        let mut form = Form::new();
        for field in UPLOAD_FIELDS {
            let part = Part::bytes(upload.bytes.clone())
                .file_name(upload.file_name.clone())
                .mime_str(&upload.mime_type)
                .map_err(|e| PredictionError::HttpClient(e.to_string()))?;
            form = form.part(field, part);
        }
        Ok(form)
    }
}

impl PredictionClient for HttpPredictionClient {
    fn predict(&self, upload: &ScanUpload) -> Result<PredictionResponse, PredictionError> {
        tracing::debug!(
            url = %self.url,
            file = %upload.file_name,
            bytes = upload.len(),
            "Sending scan for prediction"
        );

        let response = self
            .client
            .post(&self.url)
            .multipart(Self::build_form(upload)?)
            .send()
            .map_err(|e| {
                if e.is_connect() {
                    PredictionError::Connection(self.url.clone())
                } else if e.is_timeout() {
                    PredictionError::HttpClient(format!(
                        "Request timed out after {}s",
                        self.timeout_secs
                    ))
                } else {
                    PredictionError::HttpClient(e.to_string())
                }
            })?;

        let status = response.status().as_u16();
        let body = response
            .text()
            .map_err(|e| PredictionError::ResponseParsing(e.to_string()))?;

        interpret_prediction(status, &body)
    }
}

/// Turn a raw HTTP status and body from the prediction service into a
/// prediction. Individual fields are read leniently; only a non-object
/// body is a parse error.
pub fn interpret_prediction(
    status: u16,
    body: &str,
) -> Result<PredictionResponse, PredictionError> {
    if !(200..300).contains(&status) {
        return Err(PredictionError::Service {
            status,
            body: body.chars().take(MAX_ERROR_BODY_CHARS).collect(),
        });
    }

    let value: serde_json::Value = serde_json::from_str(body)
        .map_err(|e| PredictionError::ResponseParsing(e.to_string()))?;
    if !value.is_object() {
        return Err(PredictionError::ResponseParsing(
            "Expected a JSON object".into(),
        ));
    }

    Ok(PredictionResponse::from_value(&value))
}

/// Mock prediction client for testing. Returns a fixed prediction.
pub struct MockPredictionClient {
    response: PredictionResponse,
}

impl MockPredictionClient {
    pub fn new(label: &str, confidence: f64) -> Self {
        Self {
            response: PredictionResponse {
                label: Some(label.to_string()),
                confidence: Some(confidence),
                filename: None,
            },
        }
    }
}

impl PredictionClient for MockPredictionClient {
    fn predict(&self, upload: &ScanUpload) -> Result<PredictionResponse, PredictionError> {
        let mut response = self.response.clone();
        if response.filename.is_none() {
            response.filename = Some(upload.file_name.clone());
        }
        Ok(response)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn upload() -> ScanUpload {
        ScanUpload::from_bytes("scan.png".into(), "image/png".into(), vec![1, 2, 3], 1024).unwrap()
    }

    #[test]
    fn parses_success_body() {
        let body = r#"{"label": "Glioma", "confidence": 93.4, "filename": "scan.png"}"#;
        let prediction = interpret_prediction(200, body).unwrap();
        assert_eq!(prediction.label.as_deref(), Some("Glioma"));
        assert_eq!(prediction.confidence, Some(93.4));
        assert_eq!(prediction.filename.as_deref(), Some("scan.png"));
    }

    #[test]
    fn missing_fields_are_tolerated() {
        let prediction = interpret_prediction(200, "{}").unwrap();
        assert_eq!(prediction, PredictionResponse::default());
    }

    #[test]
    fn error_status_is_service_error() {
        let err = interpret_prediction(503, "Service Unavailable").unwrap_err();
        assert!(matches!(err, PredictionError::Service { status: 503, .. }));
    }

    #[test]
    fn error_body_is_truncated() {
        let body = "é".repeat(1000);
        match interpret_prediction(500, &body).unwrap_err() {
            PredictionError::Service { status, body } => {
                assert_eq!(status, 500);
                assert_eq!(body.chars().count(), MAX_ERROR_BODY_CHARS);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn non_object_body_is_parse_error() {
        assert!(matches!(
            interpret_prediction(200, "[1, 2]").unwrap_err(),
            PredictionError::ResponseParsing(_)
        ));
        assert!(matches!(
            interpret_prediction(200, "not json").unwrap_err(),
            PredictionError::ResponseParsing(_)
        ));
    }

    #[test]
    fn form_builds_for_valid_upload() {
        assert!(HttpPredictionClient::build_form(&upload()).is_ok());
    }

    #[test]
    fn mock_echoes_filename() {
        let client = MockPredictionClient::new("Meningioma", 80.0);
        let prediction = client.predict(&upload()).unwrap();
        assert_eq!(prediction.label.as_deref(), Some("Meningioma"));
        assert_eq!(prediction.filename.as_deref(), Some("scan.png"));
    }
}
