//! Music-Tech Shop E2E Test Framework
//!
//! Declarative YAML scenarios are expanded into concrete browser actions and
//! run through Playwright:
//! - `spec` parses the YAML into generic and shop-specific steps
//! - `plan` expands shop steps, computing expected counts, ranges and prices
//!   with `musictech_common`
//! - `playwright` renders the plan as a Node script and runs it
//! - `runner` loads, filters and runs specs and writes `test-results.json`
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  TestSpec (YAML)                                            │
//! │    ├── navigate / click / fill / assert / screenshot ...    │
//! │    └── select_category / go_to_page / assert_catalog_page   │
//! │        assert_price / assert_total / login / submit_contact │
//! │        search / calculate_shipping / assert_url             │
//! ├─────────────────────────────────────────────────────────────┤
//! │  Planner ── CatalogView ──> [PlannedStep { name, action }]  │
//! ├─────────────────────────────────────────────────────────────┤
//! │  PlaywrightHandle                                           │
//! │    ├── build_script(steps) -> Node script                   │
//! │    └── run_script() -> step / pass / fail JSON events       │
//! ├─────────────────────────────────────────────────────────────┤
//! │  TestRunner -> TestSuiteResult -> test-results.json         │
//! └─────────────────────────────────────────────────────────────┘
//! ```

pub mod error;
pub mod locator;
pub mod pages;
pub mod plan;
pub mod playwright;
pub mod runner;
pub mod spec;

pub use error::{E2eError, E2eResult};
pub use locator::{Locator, TextMatch};
pub use plan::{plan_spec, PlannedStep, Planner};
pub use runner::{RunnerConfig, TestRunner, TestSuiteResult};
pub use spec::{TestSpec, TestStep};
