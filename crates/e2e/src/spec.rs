//! Declarative YAML test scenarios

use serde::{Deserialize, Serialize};
use std::path::Path;

use musictech_common::validation::is_non_empty;

use crate::error::{E2eError, E2eResult};
use crate::locator::{Locator, TextMatch};
use crate::pages;

/// A complete test scenario parsed from YAML
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TestSpec {
    /// Unique name for this test
    pub name: String,

    /// Human-readable description
    #[serde(default)]
    pub description: String,

    /// Tags for filtering tests
    #[serde(default)]
    pub tags: Vec<String>,

    /// Viewport size for the browser
    #[serde(default = "default_viewport")]
    pub viewport: Viewport,

    /// Steps to execute in order
    pub steps: Vec<TestStep>,
}

fn default_viewport() -> Viewport {
    Viewport { width: 1280, height: 720 }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
}

/// Element a step acts on: a page-object reference such as
/// `products.product_cards`, or an inline locator
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Target {
    Named(String),
    Locator(Locator),
}

impl Target {
    pub fn resolve(&self) -> E2eResult<Locator> {
        match self {
            Target::Named(name) => pages::resolve(name),
            Target::Locator(locator) => Ok(locator.clone()),
        }
    }
}

impl From<&str> for Target {
    fn from(name: &str) -> Self {
        Target::Named(name.to_string())
    }
}

/// A single step in a test
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum TestStep {
    /// Navigate to a page by name (`products`) or path (`/products/3`)
    Navigate {
        to: String,
    },

    /// Click an element
    Click {
        target: Target,
        #[serde(default)]
        timeout_ms: Option<u64>,
    },

    /// Fill an input field
    Fill {
        target: Target,
        value: String,
        #[serde(default)]
        clear_first: bool,
    },

    /// Press a key, on an element or the page
    Press {
        #[serde(default)]
        target: Option<Target>,
        key: String,
    },

    /// Select a dropdown option by its visible label
    Select {
        target: Target,
        label: String,
    },

    /// Wait for an element to reach a state
    Wait {
        target: Target,
        #[serde(default = "default_wait_timeout")]
        timeout_ms: u64,
        #[serde(default)]
        state: WaitState,
    },

    /// Assert something about an element
    Assert {
        target: Target,
        #[serde(default)]
        visible: Option<bool>,
        #[serde(default)]
        enabled: Option<bool>,
        #[serde(default)]
        text: Option<TextMatch>,
        #[serde(default)]
        text_contains: Option<TextMatch>,
        #[serde(default)]
        count: Option<u32>,
    },

    /// Assert the page URL; plain strings resolve against the base URL
    AssertUrl {
        url: TextMatch,
    },

    /// Take a screenshot
    Screenshot {
        name: String,
        #[serde(default)]
        target: Option<Target>,
        #[serde(default)]
        full_page: bool,
    },

    /// Log a message (for debugging)
    Log {
        message: String,
    },

    /// Pick a category in the listing filter; returns to page 1
    SelectCategory {
        label: String,
    },

    /// Reset the category filter to all products
    ClearCategory,

    /// Pick a sort order in the listing
    SelectSort {
        label: String,
    },

    /// Jump to a listing page with the numbered pagination buttons
    GoToPage {
        page: u32,
    },

    NextPage,

    PreviousPage,

    /// Check card count, results total and pagination controls against
    /// the current filter and page
    AssertCatalogPage,

    /// Element text must look like `$X,XXX.XX`
    AssertPriceFormat {
        target: Target,
    },

    /// Element shows a price: a literal amount or a fixture product's price
    AssertPrice {
        target: Target,
        #[serde(default)]
        amount: Option<f64>,
        #[serde(default)]
        product: Option<String>,
    },

    /// Submit a query with the header search box. `product` searches for a
    /// fixture product's name and expects its card; an empty `query` lists
    /// the whole catalog.
    Search {
        #[serde(default)]
        query: Option<String>,
        #[serde(default)]
        product: Option<String>,
        #[serde(default = "default_expect_results")]
        expect_results: bool,
    },

    /// Open a fixture product's detail page
    OpenProduct {
        product: String,
    },

    /// Open a fixture product and add `quantity` units to the cart
    AddToCart {
        product: String,
        #[serde(default = "default_quantity")]
        quantity: u32,
    },

    /// Element shows `quantity` times a unit price
    AssertTotal {
        target: Target,
        #[serde(default)]
        unit_price: Option<String>,
        #[serde(default)]
        product: Option<String>,
        quantity: u32,
    },

    /// Sign in with a fixture account and check the outcome
    Login {
        account: String,
    },

    /// Submit a fixture contact payload and check the outcome
    SubmitContact {
        form: String,
    },

    /// Enter a ZIP in the shipping calculator and check the outcome
    CalculateShipping {
        zip: String,
    },
}

fn default_wait_timeout() -> u64 {
    5000
}

fn default_quantity() -> u32 {
    1
}

fn default_expect_results() -> bool {
    true
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WaitState {
    #[default]
    Visible,
    Hidden,
    Attached,
    Detached,
}

impl WaitState {
    pub fn as_str(&self) -> &'static str {
        match self {
            WaitState::Visible => "visible",
            WaitState::Hidden => "hidden",
            WaitState::Attached => "attached",
            WaitState::Detached => "detached",
        }
    }
}

impl TestSpec {
    /// Parse a test spec from YAML string
    pub fn from_yaml(yaml: &str) -> E2eResult<Self> {
        let spec: Self = serde_yaml::from_str(yaml)?;
        spec.validate()?;
        Ok(spec)
    }

    /// Parse a test spec from a YAML file
    pub fn from_file(path: &Path) -> E2eResult<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml(&content)
            .map_err(|e| E2eError::SpecParse(format!("{}: {}", path.display(), e)))
    }

    /// Load all test specs from a directory, ordered by path
    pub fn load_all(dir: &Path) -> E2eResult<Vec<Self>> {
        let mut specs = Vec::new();

        for entry in walkdir::WalkDir::new(dir)
            .sort_by_file_name()
            .into_iter()
            .filter_map(|e| e.ok())
            .filter(|e| {
                e.path()
                    .extension()
                    .map(|ext| ext == "yaml" || ext == "yml")
                    .unwrap_or(false)
            })
        {
            let spec = Self::from_file(entry.path())?;
            specs.push(spec);
        }

        Ok(specs)
    }

    /// Filter specs by tag
    pub fn filter_by_tag<'a>(specs: &'a [Self], tag: &str) -> Vec<&'a Self> {
        specs.iter().filter(|s| s.has_tag(tag)).collect()
    }

    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.iter().any(|t| t == tag)
    }

    fn validate(&self) -> E2eResult<()> {
        if !is_non_empty(&self.name) {
            return Err(E2eError::SpecParse("test name cannot be empty".to_string()));
        }
        if self.steps.is_empty() {
            return Err(E2eError::SpecParse(format!("'{}' has no steps", self.name)));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_simple_spec() {
        let yaml = r#"
name: login-flow
description: Sign in with the customer account
tags:
  - auth
  - smoke
steps:
  - action: navigate
    to: login
  - action: fill
    target: login.email_input
    value: user@test.com
  - action: screenshot
    name: login-form
"#;
        let spec = TestSpec::from_yaml(yaml).unwrap();
        assert_eq!(spec.name, "login-flow");
        assert_eq!(spec.steps.len(), 3);
        assert!(spec.has_tag("smoke"));
        assert_eq!(spec.viewport, Viewport { width: 1280, height: 720 });
    }

    #[test]
    fn test_parse_domain_steps() {
        let yaml = r#"
name: studio-recording-pages
viewport:
  width: 1920
  height: 1080
steps:
  - action: navigate
    to: products
  - action: select_category
    label: Studio Recording
  - action: assert_catalog_page
  - action: next_page
  - action: assert_total
    target: cart.order_summary
    product: condenser
    quantity: 2
"#;
        let spec = TestSpec::from_yaml(yaml).unwrap();
        assert_eq!(spec.viewport.width, 1920);
        assert!(matches!(spec.steps[2], TestStep::AssertCatalogPage));
        assert!(matches!(
            &spec.steps[4],
            TestStep::AssertTotal { product: Some(p), quantity: 2, .. } if p == "condenser"
        ));
    }

    #[test]
    fn test_parse_search_and_url_steps() {
        let yaml = r#"
name: search
steps:
  - action: search
    query: zzzznonexistentxyz
    expect_results: false
  - action: search
    product: micro_freak
  - action: assert_url
    url:
      pattern: /products
"#;
        let spec = TestSpec::from_yaml(yaml).unwrap();
        assert!(matches!(
            &spec.steps[0],
            TestStep::Search { query: Some(q), product: None, expect_results: false }
                if q == "zzzznonexistentxyz"
        ));
        assert!(matches!(&spec.steps[1], TestStep::Search { expect_results: true, .. }));
        assert!(matches!(
            &spec.steps[2],
            TestStep::AssertUrl { url: TextMatch::Pattern { .. } }
        ));
    }

    #[test]
    fn test_inline_locator_target() {
        let yaml = r#"
name: inline
steps:
  - action: assert
    target:
      by: text
      text:
        pattern: 'thank you|successfully'
        ignore_case: true
    visible: true
"#;
        let spec = TestSpec::from_yaml(yaml).unwrap();
        let TestStep::Assert { target, visible, .. } = &spec.steps[0] else {
            panic!("expected assert step");
        };
        assert_eq!(*visible, Some(true));
        assert_eq!(
            target.resolve().unwrap(),
            Locator::text(TextMatch::pattern_ci("thank you|successfully"))
        );
    }

    #[test]
    fn test_rejects_blank_name_and_empty_steps() {
        assert!(matches!(
            TestSpec::from_yaml("name: '  '\nsteps:\n  - action: next_page\n"),
            Err(E2eError::SpecParse(_))
        ));
        assert!(matches!(
            TestSpec::from_yaml("name: empty\nsteps: []\n"),
            Err(E2eError::SpecParse(_))
        ));
    }

    #[test]
    fn test_unknown_action_is_a_yaml_error() {
        let result = TestSpec::from_yaml("name: x\nsteps:\n  - action: teleport\n");
        assert!(matches!(result, Err(E2eError::Yaml(_))));
    }

    #[test]
    fn test_load_all_sorted() {
        let dir = tempfile::tempdir().unwrap();
        let steps = "steps:\n  - action: next_page\n";
        std::fs::write(dir.path().join("b.yaml"), format!("name: second\n{}", steps)).unwrap();
        std::fs::write(dir.path().join("a.yml"), format!("name: first\n{}", steps)).unwrap();
        std::fs::write(dir.path().join("notes.txt"), "ignored").unwrap();

        let specs = TestSpec::load_all(dir.path()).unwrap();
        let names: Vec<&str> = specs.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, vec!["first", "second"]);
    }
}
