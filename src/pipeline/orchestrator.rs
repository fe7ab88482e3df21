use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

use super::generative::{build_guidance_prompt, GenerativeClient, GenerativeError};
use super::guidance::extract_guidance;
use super::prediction::{PredictionClient, PredictionError, ScanUpload};
use crate::models::{DiagnosisResult, Guidance};
use crate::result_store::ResultStore;

#[derive(Error, Debug)]
pub enum AnalysisError {
    #[error("Prediction failed: {0}")]
    Prediction(#[from] PredictionError),
}

/// Everything shown for one upload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScanReport {
    pub result: DiagnosisResult,
    /// `None` when the scan shows no disease.
    pub guidance: Option<Guidance>,
}

/// Runs one upload through the pipeline:
/// predict → (skip if no disease) → prompt → generate → extract guidance
pub struct ScanAnalyzer {
    predictor: Box<dyn PredictionClient + Send + Sync>,
    generator: Option<Box<dyn GenerativeClient + Send + Sync>>,
}

impl ScanAnalyzer {
    pub fn new(
        predictor: Box<dyn PredictionClient + Send + Sync>,
        generator: Option<Box<dyn GenerativeClient + Send + Sync>>,
    ) -> Self {
        Self {
            predictor,
            generator,
        }
    }

    /// Analyse one upload.
    ///
    /// Only a prediction failure is an error. A failed or unconfigured
    /// generative call is recorded on the result and guidance falls back to
    /// generic content.
    pub fn analyze(&self, upload: &ScanUpload) -> Result<ScanReport, AnalysisError> {
        let _span = tracing::info_span!("analyze_scan", file = %upload.file_name).entered();

        let prediction = self.predictor.predict(upload)?;
        let mut result = DiagnosisResult::from_prediction(&prediction);
        tracing::info!(
            run_id = %result.run_id,
            diagnosis = %result.diagnosis,
            confidence = result.confidence,
            no_disease = result.no_disease,
            "Prediction received"
        );

        if result.no_disease {
            return Ok(ScanReport {
                result,
                guidance: None,
            });
        }

        match self.request_guidance(&result) {
            Ok(text) => result.guidance_text = Some(text),
            Err(e) => {
                tracing::warn!(
                    run_id = %result.run_id,
                    error = %e,
                    "Guidance request failed, using generic guidance"
                );
                result.generative_error = Some(e.to_string());
            }
        }

        let guidance = extract_guidance(result.guidance_text.as_deref(), &result.context());
        tracing::debug!(run_id = %result.run_id, source = ?guidance.source, "Guidance extracted");

        Ok(ScanReport {
            result,
            guidance: Some(guidance),
        })
    }

    /// Analyse an upload on behalf of a session, replacing its last report.
    ///
    /// The session's previous report is cleared before the upload starts, so
    /// a failed analysis never leaves a stale result behind.
    pub fn analyze_for_session(
        &self,
        store: &ResultStore,
        session: Uuid,
        upload: &ScanUpload,
    ) -> Result<ScanReport, AnalysisError> {
        store.begin_upload(session);
        let report = self.analyze(upload)?;
        store.record(session, report.clone());
        Ok(report)
    }

    fn request_guidance(&self, result: &DiagnosisResult) -> Result<String, GenerativeError> {
        let generator = self
            .generator
            .as_ref()
            .ok_or(GenerativeError::MissingApiKey)?;
        let prompt = build_guidance_prompt(result);
        generator.generate(&prompt)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::models::{GuidanceSource, PredictionResponse, SectionKind};
    use crate::pipeline::generative::MockGenerativeClient;
    use crate::pipeline::prediction::MockPredictionClient;

    /// Shares a mock between the analyzer and the test body.
    struct SharedGenerator(Arc<MockGenerativeClient>);

    impl GenerativeClient for SharedGenerator {
        fn generate(&self, prompt: &str) -> Result<String, GenerativeError> {
            self.0.generate(prompt)
        }
    }

    fn upload() -> ScanUpload {
        ScanUpload::from_bytes("scan.png".into(), "image/png".into(), vec![7; 16], 1024).unwrap()
    }

    fn analyzer(
        label: &str,
        generator: MockGenerativeClient,
    ) -> (ScanAnalyzer, Arc<MockGenerativeClient>) {
        let generator = Arc::new(generator);
        let analyzer = ScanAnalyzer::new(
            Box::new(MockPredictionClient::new(label, 88.0)),
            Some(Box::new(SharedGenerator(Arc::clone(&generator)))),
        );
        (analyzer, generator)
    }

    const GUIDANCE: &str = "1. What are the common symptoms of this disease?
* Headaches
2. What are the primary causes of this disease?
* Unknown in most cases
3. How is this disease typically diagnosed?
* MRI
4. What treatment options are available for this disease?
* Surgery";

    #[test]
    fn disease_label_gets_parsed_guidance() {
        let (analyzer, generator) = analyzer("Glioma", MockGenerativeClient::new(GUIDANCE));
        let report = analyzer.analyze(&upload()).unwrap();

        assert_eq!(report.result.diagnosis, "Glioma");
        assert_eq!(report.result.guidance_text.as_deref(), Some(GUIDANCE));
        assert_eq!(report.result.filename.as_deref(), Some("scan.png"));

        let guidance = report.guidance.unwrap();
        assert_eq!(guidance.source, GuidanceSource::Parsed);
        assert_eq!(guidance.points(SectionKind::Diagnosis), ["MRI"]);

        let prompts = generator.prompts();
        assert_eq!(prompts.len(), 1);
        assert!(prompts[0].contains("Disease: Glioma"));
    }

    #[test]
    fn no_disease_skips_generation() {
        let (analyzer, generator) = analyzer("No_Disease", MockGenerativeClient::new(GUIDANCE));
        let report = analyzer.analyze(&upload()).unwrap();

        assert!(report.result.no_disease);
        assert!(report.guidance.is_none());
        assert!(report.result.guidance_text.is_none());
        assert!(generator.prompts().is_empty());
    }

    #[test]
    fn generation_failure_falls_back_to_generic() {
        let (analyzer, _) = analyzer("Glioma", MockGenerativeClient::failing("quota exceeded"));
        let report = analyzer.analyze(&upload()).unwrap();

        assert!(report.result.guidance_text.is_none());
        assert!(report
            .result
            .generative_error
            .as_deref()
            .unwrap()
            .contains("quota exceeded"));
        let guidance = report.guidance.unwrap();
        assert_eq!(guidance.source, GuidanceSource::Generic);
        assert!(guidance.points(SectionKind::Causes)[0].contains("Glioma"));
    }

    #[test]
    fn missing_generator_falls_back_to_generic() {
        let analyzer = ScanAnalyzer::new(Box::new(MockPredictionClient::new("Glioma", 70.0)), None);
        let report = analyzer.analyze(&upload()).unwrap();
        assert!(report.result.generative_error.is_some());
        assert_eq!(report.guidance.unwrap().source, GuidanceSource::Generic);
    }

    #[test]
    fn session_analysis_replaces_last_report() {
        let store = ResultStore::new();
        let session = Uuid::new_v4();
        let (analyzer, _) = analyzer("Glioma", MockGenerativeClient::new(GUIDANCE));

        let first = analyzer.analyze_for_session(&store, session, &upload()).unwrap();
        let second = analyzer.analyze_for_session(&store, session, &upload()).unwrap();

        assert_ne!(first.result.run_id, second.result.run_id);
        let last = store.last(session).unwrap();
        assert_eq!(last.result.run_id, second.result.run_id);
    }

    struct FailingPredictor;

    impl PredictionClient for FailingPredictor {
        fn predict(&self, _upload: &ScanUpload) -> Result<PredictionResponse, PredictionError> {
            Err(PredictionError::Connection("http://localhost:9".into()))
        }
    }

    #[test]
    fn prediction_failure_clears_session_slot() {
        let store = ResultStore::new();
        let session = Uuid::new_v4();

        let (ok, _) = analyzer("Glioma", MockGenerativeClient::new(GUIDANCE));
        ok.analyze_for_session(&store, session, &upload()).unwrap();
        assert!(store.last(session).is_some());

        let failing = ScanAnalyzer::new(Box::new(FailingPredictor), None);
        let err = failing.analyze_for_session(&store, session, &upload()).unwrap_err();
        assert!(matches!(err, AnalysisError::Prediction(PredictionError::Connection(_))));
        assert!(store.last(session).is_none());
    }
}
