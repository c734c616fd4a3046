//! Magic Wand - Main Entry Point
//!
//! Host build of the wand: accelerometer replayed from CSV, button presses
//! read from stdin, indicator written to the log.

mod logic;
pub mod constants;

use anyhow::Context;

use logic::capture::CaptureScheduler;
use logic::cloud::{CloudClient, CloudConfig};
use logic::config::AppConfig;
use logic::control_loop::{ControlLoop, LoopSettings, MonotonicClock};
use logic::model::{LocalClassifier, OnnxClassifier, ThresholdConfig};
use logic::pipeline::GesturePipeline;
use logic::response::{LogIndicator, ResultReconciler};
use logic::sensor::ReplaySource;
use logic::trigger::StdinTrigger;

fn load_classifier(config: &AppConfig) -> OnnxClassifier {
    let labels: Vec<String> = constants::LABELS.iter().map(|l| l.to_string()).collect();

    match OnnxClassifier::load(&config.model_path, labels.clone()) {
        Ok(classifier) => {
            if let Some(meta) = classifier.metadata() {
                log::info!(
                    "ONNX model loaded successfully from {} ({} features, labels {:?}, at {})",
                    meta.model_path,
                    meta.features,
                    meta.labels,
                    meta.loaded_at.format("%H:%M:%S")
                );
            }
            classifier
        }
        Err(e) => {
            log::warn!("ONNX model not loaded ({}) - gestures will fail classification", e);
            OnnxClassifier::unloaded(labels)
        }
    }
}

fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    log::info!("Starting {} v{}...", constants::APP_NAME, constants::APP_VERSION);

    let config = AppConfig::from_env();
    log::info!("Device ID: {}", config.device_id);
    log::info!("Predict URL: {}", config.predict_url);
    log::info!("Log URL: {}", config.log_url);

    let classifier = load_classifier(&config);
    log::info!("Engine status: {}", serde_json::to_string(&classifier.status())?);

    let cloud = CloudConfig {
        predict_url: config.predict_url.clone(),
        log_url: config.log_url.clone(),
        timeout_seconds: config.request_timeout_secs,
    };

    let sensor = ReplaySource::from_csv(&config.replay_csv)
        .with_context(|| format!("failed to open accelerometer replay {}", config.replay_csv))?;

    let classifier: Box<dyn LocalClassifier> = Box::new(classifier);
    let pipeline = GesturePipeline::new(
        classifier,
        Box::new(CloudClient::new(cloud.clone())),
        ResultReconciler::new(Box::new(CloudClient::new(cloud)), config.device_id.clone()),
        ThresholdConfig::default(),
    );

    let settings = LoopSettings {
        capture_feedback: config.capture_feedback,
        result_hold_ms: config.result_hold_ms,
        ..LoopSettings::default()
    };

    let mut control = ControlLoop::new(
        CaptureScheduler::default(),
        pipeline,
        Box::new(sensor),
        Box::new(StdinTrigger::spawn()),
        Box::new(LogIndicator::new()),
        Box::new(MonotonicClock::new()),
        settings,
    );

    control.run()
}
