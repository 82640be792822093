//! Playwright script generation and execution
//!
//! A planned test becomes one Node script. The script reports progress on
//! stdout as one JSON object per line (`step`, `pass`, `fail`, `log`,
//! `done`), which is how per-step results are recovered.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};
use std::str::FromStr;
use std::time::Duration;
use tokio::process::Command as TokioCommand;
use tracing::{debug, info, warn};

use crate::error::{E2eError, E2eResult};
use crate::locator::js_string;
use crate::plan::{Action, Check, PlannedStep};
use crate::spec::Viewport;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Browser {
    #[default]
    Chromium,
    Firefox,
    Webkit,
}

impl Browser {
    pub fn as_str(&self) -> &'static str {
        match self {
            Browser::Chromium => "chromium",
            Browser::Firefox => "firefox",
            Browser::Webkit => "webkit",
        }
    }
}

impl FromStr for Browser {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "chromium" | "chrome" => Ok(Browser::Chromium),
            "firefox" => Ok(Browser::Firefox),
            "webkit" | "safari" => Ok(Browser::Webkit),
            other => Err(format!("unknown browser '{}'", other)),
        }
    }
}

/// Configuration for Playwright
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PlaywrightConfig {
    pub base_url: String,
    pub browser: Browser,
    pub headless: bool,
    pub screenshot_dir: PathBuf,
    /// `node_modules` holding `playwright` and `@playwright/test`
    pub node_modules: PathBuf,
    /// Launcher that runs `playwright --version` to find the CLI
    pub npx: PathBuf,
    pub action_timeout_ms: u64,
    pub expect_timeout_ms: u64,
    /// Wall-clock limit for one spec's script
    pub test_timeout_ms: u64,
}

impl Default for PlaywrightConfig {
    fn default() -> Self {
        Self {
            base_url: "https://music-tech-shop.vercel.app".to_string(),
            browser: Browser::Chromium,
            headless: true,
            screenshot_dir: PathBuf::from("test-results/screenshots"),
            node_modules: PathBuf::from("node_modules"),
            npx: PathBuf::from("npx"),
            action_timeout_ms: 10_000,
            expect_timeout_ms: 5_000,
            test_timeout_ms: 120_000,
        }
    }
}

/// Result of executing a test step
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StepResult {
    pub index: usize,
    pub step_name: String,
    pub success: bool,
    pub error: Option<String>,
}

/// One progress line printed by a generated script
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum ScriptEvent {
    Step { index: usize, name: String },
    Pass { index: usize },
    Fail { index: i64, error: String },
    Log { message: String },
    Done,
}

/// What a script run reported
#[derive(Debug, Clone, Default)]
pub struct ScriptOutcome {
    pub events: Vec<ScriptEvent>,
    pub exit_success: bool,
    pub stderr: String,
}

impl ScriptOutcome {
    /// Parse the event lines of a script's stdout; other lines are ignored
    pub fn parse(stdout: &str, stderr: &str, exit_success: bool) -> Self {
        let events = stdout
            .lines()
            .filter_map(|line| serde_json::from_str::<ScriptEvent>(line.trim()).ok())
            .collect();
        Self {
            events,
            exit_success,
            stderr: stderr.to_string(),
        }
    }

    pub fn completed(&self) -> bool {
        self.exit_success && self.events.contains(&ScriptEvent::Done)
    }

    /// Per-step results for the steps the script reached
    pub fn step_results(&self, steps: &[PlannedStep]) -> Vec<StepResult> {
        let mut results = Vec::new();
        for event in &self.events {
            match event {
                ScriptEvent::Pass { index } => results.push(StepResult {
                    index: *index,
                    step_name: step_name(steps, *index),
                    success: true,
                    error: None,
                }),
                ScriptEvent::Fail { index, error } => {
                    let index = usize::try_from(*index).unwrap_or(0);
                    results.push(StepResult {
                        index,
                        step_name: step_name(steps, index),
                        success: false,
                        error: Some(error.clone()),
                    });
                }
                ScriptEvent::Log { message } => info!("[TEST LOG] {}", message),
                ScriptEvent::Step { .. } | ScriptEvent::Done => {}
            }
        }
        results
    }

    /// First failure message, falling back to stderr when the script died
    /// without reporting one
    pub fn error(&self) -> Option<String> {
        if self.completed() {
            return None;
        }
        self.events
            .iter()
            .find_map(|e| match e {
                ScriptEvent::Fail { error, .. } => Some(error.clone()),
                _ => None,
            })
            .or_else(|| Some(format!("script exited early: {}", self.stderr.trim())))
    }
}

fn step_name(steps: &[PlannedStep], index: usize) -> String {
    steps
        .get(index)
        .map(|s| s.name.clone())
        .unwrap_or_else(|| format!("step {}", index + 1))
}

/// Playwright script builder and runner
pub struct PlaywrightHandle {
    config: PlaywrightConfig,
    viewport: Viewport,
}

impl PlaywrightHandle {
    /// Create a new Playwright handle
    pub fn new(mut config: PlaywrightConfig, viewport: Viewport) -> Self {
        // node runs from a temp dir, so screenshot paths must not be relative
        config.screenshot_dir = absolute(&config.screenshot_dir);
        Self { config, viewport }
    }

    /// Check if Playwright is installed
    pub fn check_playwright_installed(npx: &Path) -> E2eResult<()> {
        let output = Command::new(npx)
            .args(["playwright", "--version"])
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status();

        match output {
            Ok(status) if status.success() => Ok(()),
            _ => Err(E2eError::PlaywrightNotFound),
        }
    }

    /// Build the Playwright script for a planned test
    pub fn build_script(&self, steps: &[PlannedStep]) -> String {
        let mut script = String::new();

        // Header
        script.push_str(&format!(
            r#"const {{ chromium, firefox, webkit }} = require('playwright');
const {{ expect }} = require('@playwright/test');

const check = expect.configure({{ timeout: {expect_timeout} }});
const emit = (event) => console.log(JSON.stringify(event));

(async () => {{
  const browser = await {browser}.launch({{ headless: {headless} }});
  const context = await browser.newContext({{
    baseURL: {base_url},
    viewport: {{ width: {width}, height: {height} }},
  }});
  context.setDefaultTimeout({action_timeout});
  const page = await context.newPage();
  let current = -1;

  try {{
"#,
            browser = self.config.browser.as_str(),
            headless = self.config.headless,
            base_url = js_string(&self.config.base_url),
            width = self.viewport.width,
            height = self.viewport.height,
            action_timeout = self.config.action_timeout_ms,
            expect_timeout = self.config.expect_timeout_ms,
        ));

        // Generate step code
        for (i, step) in steps.iter().enumerate() {
            script.push_str(&format!(
                "\n    // Step {}: {}\n    current = {};\n    emit({{ event: 'step', index: {}, name: {} }});\n",
                i + 1,
                comment_text(&step.name),
                i,
                i,
                js_string(&step.name),
            ));
            script.push_str(&self.action_to_js(&step.action));
            script.push_str(&format!("\n    emit({{ event: 'pass', index: {} }});\n", i));
        }

        // Footer
        script.push_str(
            r#"
    emit({ event: 'done' });
  } catch (error) {
    emit({ event: 'fail', index: current, error: String(error && error.message ? error.message : error) });
    process.exitCode = 1;
  } finally {
    await browser.close();
  }
})();
"#,
        );

        script
    }

    /// Convert an action to JavaScript code
    fn action_to_js(&self, action: &Action) -> String {
        match action {
            Action::Goto { path } => format!("    await page.goto({});", js_string(path)),
            Action::Click { target, timeout_ms } => match timeout_ms {
                Some(ms) => {
                    format!("    await {}.click({{ timeout: {} }});", target.to_js("page"), ms)
                }
                None => format!("    await {}.click();", target.to_js("page")),
            },
            Action::Fill { target, value } => {
                format!("    await {}.fill({});", target.to_js("page"), js_string(value))
            }
            Action::Press { target, key } => match target {
                Some(target) => {
                    format!("    await {}.press({});", target.to_js("page"), js_string(key))
                }
                None => format!("    await page.keyboard.press({});", js_string(key)),
            },
            Action::SelectOption { target, label } => format!(
                "    await {}.selectOption({{ label: {} }});",
                target.to_js("page"),
                js_string(label)
            ),
            Action::WaitFor { target, state, timeout_ms } => format!(
                "    await {}.waitFor({{ state: '{}', timeout: {} }});",
                target.to_js("page"),
                state.as_str(),
                timeout_ms
            ),
            Action::Expect { target, check } => {
                let subject = format!("check({})", target.to_js("page"));
                let assertion = match check {
                    Check::Visible => "toBeVisible()".to_string(),
                    Check::Hidden => "toBeHidden()".to_string(),
                    Check::Enabled => "toBeEnabled()".to_string(),
                    Check::Disabled => "toBeDisabled()".to_string(),
                    Check::HasText { text } => format!("toHaveText({})", text.to_js()),
                    Check::ContainsText { text } => format!("toContainText({})", text.to_js()),
                    Check::Count { count } => format!("toHaveCount({})", count),
                };
                format!("    await {}.{};", subject, assertion)
            }
            Action::ExpectUrl { url } => {
                format!("    await check(page).toHaveURL({});", url.to_js())
            }
            Action::ExpectPattern { target, pattern } => format!(
                "    await check({}).toHaveText(new RegExp({}));",
                target.to_js("page"),
                js_string(pattern)
            ),
            Action::Screenshot { name, target, full_page } => {
                let path = self.screenshot_path(name);
                let path = js_string(&path.to_string_lossy());
                match target {
                    Some(target) => format!(
                        "    await {}.screenshot({{ path: {} }});",
                        target.to_js("page"),
                        path
                    ),
                    None => format!(
                        "    await page.screenshot({{ path: {}, fullPage: {} }});",
                        path, full_page
                    ),
                }
            }
            Action::Log { message } => {
                format!("    emit({{ event: 'log', message: {} }});", js_string(message))
            }
        }
    }

    pub fn screenshot_path(&self, name: &str) -> PathBuf {
        self.config.screenshot_dir.join(format!("{}.png", file_stem(name)))
    }

    /// Execute a script via Node, bounded by the configured test timeout
    pub async fn run_script(&self, name: &str, script: &str) -> E2eResult<ScriptOutcome> {
        std::fs::create_dir_all(&self.config.screenshot_dir)?;

        // Write script to temp file
        let temp_dir = tempfile::tempdir()?;
        let script_path = temp_dir.path().join(format!("{}.js", file_stem(name)));
        std::fs::write(&script_path, script)?;

        debug!("Running Playwright script: {}", script_path.display());

        let node_modules = std::fs::canonicalize(&self.config.node_modules)
            .unwrap_or_else(|_| self.config.node_modules.clone());

        let child = TokioCommand::new("node")
            .arg(&script_path)
            .env("NODE_PATH", &node_modules)
            .current_dir(temp_dir.path())
            .kill_on_drop(true)
            .output();

        let output = tokio::time::timeout(Duration::from_millis(self.config.test_timeout_ms), child)
            .await
            .map_err(|_| {
                E2eError::Timeout(format!("'{}' after {} ms", name, self.config.test_timeout_ms))
            })??;

        let stdout = String::from_utf8_lossy(&output.stdout);
        let stderr = String::from_utf8_lossy(&output.stderr);
        if !output.status.success() {
            warn!("Script for '{}' exited with {}", name, output.status);
        }

        Ok(ScriptOutcome::parse(&stdout, &stderr, output.status.success()))
    }
}

fn absolute(path: &Path) -> PathBuf {
    if path.is_absolute() {
        return path.to_path_buf();
    }
    std::env::current_dir()
        .map(|cwd| cwd.join(path))
        .unwrap_or_else(|_| path.to_path_buf())
}

/// Text safe inside a JS `//` comment: every line terminator becomes a space
fn comment_text(text: &str) -> String {
    text.chars()
        .map(|c| match c {
            '\n' | '\r' | '\u{2028}' | '\u{2029}' => ' ',
            c => c,
        })
        .collect()
}

/// Turn a test or screenshot name into a safe file stem
pub fn file_stem(name: &str) -> String {
    let stem: String = name
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() || c == '-' || c == '_' { c } else { '-' })
        .collect();
    if stem.is_empty() {
        "unnamed".to_string()
    } else {
        stem
    }
}

/// Write a script next to the results for inspection
pub fn write_script(dir: &Path, name: &str, script: &str) -> E2eResult<PathBuf> {
    std::fs::create_dir_all(dir)?;
    let path = dir.join(format!("{}.js", file_stem(name)));
    std::fs::write(&path, script)?;
    Ok(path)
}
