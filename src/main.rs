//! MedScan command-line front end.

use std::io::Read;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use uuid::Uuid;

use medscan::config::{self, MedscanConfig};
use medscan::models::{DiagnosisContext, DiagnosisResult, PredictionResponse};
use medscan::pipeline::generative::{build_guidance_prompt, GeminiClient, GenerativeClient};
use medscan::pipeline::guidance::extract_guidance;
use medscan::pipeline::orchestrator::ScanAnalyzer;
use medscan::pipeline::prediction::{HttpPredictionClient, ScanUpload};
use medscan::render::{render_guidance, render_report};
use medscan::result_store::ResultStore;

/// The CLI keeps a single session slot across invocations.
const CLI_SESSION: Uuid = Uuid::nil();

#[derive(Parser)]
#[command(name = "medscan", version)]
#[command(about = "Scan classification with structured health guidance", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Classify a scan image and build guidance for the result
    Analyze {
        /// Image file to upload
        image: PathBuf,

        /// Print the report as JSON
        #[arg(long)]
        json: bool,
    },

    /// Extract guidance sections from generated text
    Extract {
        /// Text file to read (stdin when omitted)
        file: Option<PathBuf>,

        /// Diagnosis label used for generic fallback content
        #[arg(short, long)]
        diagnosis: String,

        /// Print the guidance as JSON
        #[arg(long)]
        json: bool,
    },

    /// Print the guidance prompt for a diagnosis
    Prompt {
        /// Diagnosis label
        #[arg(short, long)]
        diagnosis: String,

        /// Confidence percentage
        #[arg(short, long, default_value_t = 100.0)]
        confidence: f64,
    },

    /// Show the last stored report
    Show {
        /// Print the report as JSON
        #[arg(long)]
        json: bool,
    },
}

fn main() -> Result<()> {
    medscan::init_tracing();
    let cli = Cli::parse();

    match cli.command {
        Commands::Analyze { image, json } => analyze(&image, json),
        Commands::Extract {
            file,
            diagnosis,
            json,
        } => extract(file, &diagnosis, json),
        Commands::Prompt {
            diagnosis,
            confidence,
        } => {
            let result = DiagnosisResult::from_prediction(&PredictionResponse {
                label: Some(diagnosis),
                confidence: Some(confidence),
                filename: None,
            });
            print!("{}", build_guidance_prompt(&result));
            Ok(())
        }
        Commands::Show { json } => show(json),
    }
}

fn analyze(image: &Path, json: bool) -> Result<()> {
    let config = MedscanConfig::from_env().context("Invalid configuration")?;
    tracing::info!(
        version = config::APP_VERSION,
        predict_url = %config.predict_url,
        model = %config.gemini_model,
        "{} analyze",
        config::APP_NAME
    );

    let upload = ScanUpload::from_path(image, config.max_upload_bytes)
        .with_context(|| format!("Cannot upload {}", image.display()))?;
    let predictor = HttpPredictionClient::new(&config.predict_url, config.timeout_secs)?;
    let analyzer = ScanAnalyzer::new(Box::new(predictor), generator(&config));

    let store_path = config::last_result_path();
    let store = load_store(&store_path);
    let outcome = analyzer.analyze_for_session(&store, CLI_SESSION, &upload);

    // Persist even on failure so a stale report is not shown later.
    if let Err(e) = store.save_json(&store_path) {
        tracing::warn!(path = %store_path.display(), error = %e, "Failed to save last result");
    }

    let report = outcome.context("Analysis failed")?;
    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print!("{}", render_report(&report));
    }
    Ok(())
}

fn generator(config: &MedscanConfig) -> Option<Box<dyn GenerativeClient + Send + Sync>> {
    let Some(api_key) = config.gemini_api_key.as_deref() else {
        tracing::warn!(
            "{} not set, guidance will use generic content",
            config::ENV_GEMINI_API_KEY
        );
        return None;
    };

    match GeminiClient::new(
        &config.gemini_base_url,
        &config.gemini_model,
        api_key,
        config.timeout_secs,
    ) {
        Ok(client) => Some(Box::new(client)),
        Err(e) => {
            tracing::warn!(
                error = %e,
                "Gemini client unavailable, guidance will use generic content"
            );
            None
        }
    }
}

fn extract(file: Option<PathBuf>, diagnosis: &str, json: bool) -> Result<()> {
    let text = match file {
        Some(path) => std::fs::read_to_string(&path)
            .with_context(|| format!("Cannot read {}", path.display()))?,
        None => {
            let mut buf = String::new();
            std::io::stdin()
                .read_to_string(&mut buf)
                .context("Cannot read stdin")?;
            buf
        }
    };

    let guidance = extract_guidance(Some(&text), &DiagnosisContext::new(diagnosis));
    if json {
        println!("{}", serde_json::to_string_pretty(&guidance)?);
    } else {
        print!("{}", render_guidance(&guidance));
    }
    Ok(())
}

fn show(json: bool) -> Result<()> {
    let store_path = config::last_result_path();
    let store = ResultStore::load_json(&store_path)
        .with_context(|| format!("Cannot load {}", store_path.display()))?;

    let Some(report) = store.last(CLI_SESSION) else {
        bail!("No stored report. Run `medscan analyze <IMAGE>` first.");
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print!("{}", render_report(&report));
    }
    Ok(())
}

/// Load the persisted store, starting fresh when the snapshot is unreadable.
fn load_store(path: &Path) -> ResultStore {
    ResultStore::load_json(path).unwrap_or_else(|e| {
        tracing::warn!(path = %path.display(), error = %e, "Discarding unreadable result snapshot");
        ResultStore::new()
    })
}
