//! E2E test harness entry point
//!
//! This file is the test binary that runs E2E tests from YAML specs.
//! Run with: cargo test --package musictech-e2e --test e2e -- --dry-run

use clap::Parser;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

use musictech_e2e::playwright::Browser;
use musictech_e2e::runner::RunnerConfig;
use musictech_e2e::{E2eResult, TestRunner};

#[derive(Parser, Debug)]
#[command(name = "musictech-e2e")]
#[command(about = "E2E test runner for the Music-Tech Shop")]
struct Args {
    /// Optional TOML configuration; flags below override it
    #[arg(short, long, default_value = "musictech-e2e.toml")]
    config: PathBuf,

    /// Path to test specs directory
    #[arg(short, long, env = "E2E_SPECS")]
    specs: Option<PathBuf>,

    /// Run only tests matching this tag
    #[arg(short, long)]
    tag: Option<String>,

    /// Run only a specific test by name
    #[arg(short, long)]
    name: Option<String>,

    /// Shop under test
    #[arg(long, env = "BASE_URL")]
    base_url: Option<String>,

    /// Browser to use (chromium, firefox, webkit)
    #[arg(long)]
    browser: Option<Browser>,

    /// Run in headless mode
    #[arg(long)]
    headless: Option<bool>,

    /// Default timeout for clicks, fills and navigation
    #[arg(long)]
    action_timeout_ms: Option<u64>,

    /// Default timeout for expectations
    #[arg(long)]
    expect_timeout_ms: Option<u64>,

    /// Output directory for results
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Render scripts without launching a browser
    #[arg(long)]
    dry_run: bool,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,

    /// Flags cargo passes to test binaries
    #[arg(long, hide = true)]
    nocapture: bool,
}

fn main() {
    let args = Args::parse();

    // Initialize logging
    let default_level = if args.verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    // Run async main
    let rt = tokio::runtime::Runtime::new().expect("Failed to create tokio runtime");
    let result = rt.block_on(async_main(args));

    match result {
        Ok(true) => std::process::exit(0),
        Ok(false) => std::process::exit(1),
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(2);
        }
    }
}

fn build_config(args: &Args) -> E2eResult<RunnerConfig> {
    let mut config = RunnerConfig::load(&args.config)?;

    if let Some(specs) = &args.specs {
        config.specs_dir = specs.clone();
    }
    if let Some(output) = &args.output {
        config.output_dir = output.clone();
    }
    if let Some(base_url) = &args.base_url {
        config.playwright.base_url = base_url.clone();
    }
    if let Some(browser) = args.browser {
        config.playwright.browser = browser;
    }
    if let Some(headless) = args.headless {
        config.playwright.headless = headless;
    }
    if let Some(ms) = args.action_timeout_ms {
        config.playwright.action_timeout_ms = ms;
    }
    if let Some(ms) = args.expect_timeout_ms {
        config.playwright.expect_timeout_ms = ms;
    }
    config.playwright.screenshot_dir = config.output_dir.join("screenshots");
    config.dry_run |= args.dry_run;

    Ok(config)
}

async fn async_main(args: Args) -> E2eResult<bool> {
    let runner = TestRunner::with_config(build_config(&args)?);

    // Run tests
    let results = if let Some(name) = &args.name {
        runner.run_test(name).await?
    } else if let Some(tag) = &args.tag {
        runner.run_tagged(tag).await?
    } else {
        runner.run_all().await?
    };

    // Write results
    runner.write_results(&results)?;

    Ok(results.all_passed())
}
