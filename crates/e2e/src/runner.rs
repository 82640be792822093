//! Test runner: plans specs, renders scripts and drives Playwright

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing::{debug, error, info, warn};

use crate::error::{E2eError, E2eResult};
use crate::plan::plan_spec;
use crate::playwright::{self, PlaywrightConfig, PlaywrightHandle, StepResult};
use crate::spec::TestSpec;

/// Result of running a single test
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TestResult {
    pub name: String,
    pub success: bool,
    /// Planned and rendered but not executed (dry run)
    #[serde(default)]
    pub skipped: bool,
    pub duration_ms: u64,
    pub steps: Vec<StepResult>,
    pub error: Option<String>,
    #[serde(default)]
    pub script_path: Option<PathBuf>,
}

impl TestResult {
    fn failed(name: &str, error: String) -> Self {
        Self {
            name: name.to_string(),
            success: false,
            skipped: false,
            duration_ms: 0,
            steps: vec![],
            error: Some(error),
            script_path: None,
        }
    }
}

/// Result of running all tests
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TestSuiteResult {
    pub started_at: DateTime<Utc>,
    pub total: usize,
    pub passed: usize,
    pub failed: usize,
    pub skipped: usize,
    pub duration_ms: u64,
    pub results: Vec<TestResult>,
}

impl TestSuiteResult {
    pub fn from_results(
        started_at: DateTime<Utc>,
        duration_ms: u64,
        results: Vec<TestResult>,
    ) -> Self {
        let skipped = results.iter().filter(|r| r.skipped).count();
        let passed = results.iter().filter(|r| r.success && !r.skipped).count();
        let failed = results.iter().filter(|r| !r.success).count();
        Self {
            started_at,
            total: results.len(),
            passed,
            failed,
            skipped,
            duration_ms,
            results,
        }
    }

    pub fn all_passed(&self) -> bool {
        self.failed == 0
    }
}

/// Configuration for the test runner
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RunnerConfig {
    pub playwright: PlaywrightConfig,
    pub specs_dir: PathBuf,
    pub output_dir: PathBuf,
    /// Render scripts into `<output_dir>/scripts` without launching a browser
    pub dry_run: bool,
}

impl Default for RunnerConfig {
    fn default() -> Self {
        Self {
            playwright: PlaywrightConfig::default(),
            specs_dir: PathBuf::from("specs"),
            output_dir: PathBuf::from("test-results"),
            dry_run: false,
        }
    }
}

impl RunnerConfig {
    /// Load configuration from file, falling back to defaults when absent
    pub fn load(path: &Path) -> E2eResult<Self> {
        if path.exists() {
            let content = std::fs::read_to_string(path)?;
            let config: Self = toml::from_str(&content)?;
            Ok(config)
        } else {
            Ok(Self::default())
        }
    }
}

/// Main E2E test runner
pub struct TestRunner {
    config: RunnerConfig,
}

impl Default for TestRunner {
    fn default() -> Self {
        Self::new()
    }
}

impl TestRunner {
    /// Create a new test runner with default configuration
    pub fn new() -> Self {
        Self::with_config(RunnerConfig::default())
    }

    /// Create a test runner with custom configuration
    pub fn with_config(config: RunnerConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &RunnerConfig {
        &self.config
    }

    /// Run all tests in the specs directory
    pub async fn run_all(&self) -> E2eResult<TestSuiteResult> {
        let specs = TestSpec::load_all(&self.config.specs_dir)?;
        self.run_specs(&specs).await
    }

    /// Run tests matching a tag
    pub async fn run_tagged(&self, tag: &str) -> E2eResult<TestSuiteResult> {
        let specs = TestSpec::load_all(&self.config.specs_dir)?;
        let filtered: Vec<TestSpec> =
            TestSpec::filter_by_tag(&specs, tag).into_iter().cloned().collect();
        if filtered.is_empty() {
            warn!("No tests tagged '{}' in {}", tag, self.config.specs_dir.display());
        }
        self.run_specs(&filtered).await
    }

    /// Run a specific test by name
    pub async fn run_test(&self, name: &str) -> E2eResult<TestSuiteResult> {
        let specs = TestSpec::load_all(&self.config.specs_dir)?;
        let spec = specs
            .into_iter()
            .find(|s| s.name == name)
            .ok_or_else(|| E2eError::SpecParse(format!("Test not found: {}", name)))?;

        self.run_specs(std::slice::from_ref(&spec)).await
    }

    /// Run a list of test specs, one at a time
    pub async fn run_specs(&self, specs: &[TestSpec]) -> E2eResult<TestSuiteResult> {
        let started_at = Utc::now();
        let start = Instant::now();

        if !self.config.dry_run {
            PlaywrightHandle::check_playwright_installed(&self.config.playwright.npx)?;
        }

        info!("Running {} test(s)...", specs.len());

        let mut results = Vec::with_capacity(specs.len());
        for spec in specs {
            let result = match self.run_spec(spec).await {
                Ok(result) => result,
                Err(e) => TestResult::failed(&spec.name, e.to_string()),
            };

            if result.skipped {
                info!("- {} (rendered, not run)", result.name);
            } else if result.success {
                info!("✓ {} ({} ms)", result.name, result.duration_ms);
            } else {
                let reason = result.error.as_deref().unwrap_or("unknown error");
                error!("✗ {} - {}", result.name, reason);
            }
            results.push(result);
        }

        let duration_ms = start.elapsed().as_millis() as u64;
        let suite = TestSuiteResult::from_results(started_at, duration_ms, results);

        info!(
            "Test Results: {} passed, {} failed, {} skipped ({} ms)",
            suite.passed, suite.failed, suite.skipped, suite.duration_ms
        );

        Ok(suite)
    }

    /// Run a single test spec
    pub async fn run_spec(&self, spec: &TestSpec) -> E2eResult<TestResult> {
        let start = Instant::now();
        debug!("Running test: {}", spec.name);

        let steps = plan_spec(spec)?;
        debug!("'{}' planned into {} action(s)", spec.name, steps.len());

        let playwright = PlaywrightHandle::new(self.config.playwright.clone(), spec.viewport);
        let script = playwright.build_script(&steps);

        if self.config.dry_run {
            let path = playwright::write_script(&self.scripts_dir(), &spec.name, &script)?;
            return Ok(TestResult {
                name: spec.name.clone(),
                success: true,
                skipped: true,
                duration_ms: start.elapsed().as_millis() as u64,
                steps: vec![],
                error: None,
                script_path: Some(path),
            });
        }

        let outcome = playwright.run_script(&spec.name, &script).await?;
        let error = outcome.error();

        Ok(TestResult {
            name: spec.name.clone(),
            success: error.is_none(),
            skipped: false,
            duration_ms: start.elapsed().as_millis() as u64,
            steps: outcome.step_results(&steps),
            error,
            script_path: None,
        })
    }

    fn scripts_dir(&self) -> PathBuf {
        self.config.output_dir.join("scripts")
    }

    /// Write test results to JSON file
    pub fn write_results(&self, results: &TestSuiteResult) -> E2eResult<PathBuf> {
        std::fs::create_dir_all(&self.config.output_dir)?;

        let path = self.config.output_dir.join("test-results.json");
        let json = serde_json::to_string_pretty(results)?;
        std::fs::write(&path, json)?;

        info!("Results written to: {}", path.display());
        Ok(path)
    }
}
