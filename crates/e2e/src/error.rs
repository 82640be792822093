//! Error types for E2E testing

use thiserror::Error;

#[derive(Error, Debug)]
pub enum E2eError {
    #[error("Playwright not found. Install with: npm install playwright @playwright/test && npx playwright install")]
    PlaywrightNotFound,

    #[error("Test spec parse error: {0}")]
    SpecParse(String),

    #[error("Unknown target: {0}")]
    UnknownTarget(String),

    #[error("Step failed: {step} - {reason}")]
    StepFailed { step: String, reason: String },

    #[error("Timeout waiting for: {0}")]
    Timeout(String),

    #[error(transparent)]
    Shop(#[from] musictech_common::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Config error: {0}")]
    Config(#[from] toml::de::Error),
}

pub type E2eResult<T> = Result<T, E2eError>;
