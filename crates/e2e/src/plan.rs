//! Expansion of spec steps into primitive browser actions
//!
//! Domain steps (`select_category`, `assert_catalog_page`, `login`, ...) carry
//! no literal expectations. The planner tracks what the storefront should be
//! showing and computes the expected counts, prices and outcomes with the
//! shared helpers, so every planned action is concrete.

use serde::Serialize;
use tracing::debug;

use musictech_common::fixtures::{self, ContactField, Product};
use musictech_common::price::{self, PRICE_PATTERN};
use musictech_common::validation::{is_non_empty, is_valid_us_zip};
use musictech_common::{Catalog, CatalogView};

use crate::error::{E2eError, E2eResult};
use crate::locator::{Locator, TextMatch};
use crate::pages::{
    self, ContactPage, Header, LoginPage, ProductDetailPage, ProductsPage, ShippingPage,
};
use crate::spec::{Target, TestSpec, TestStep, WaitState};

/// A single browser-level expectation
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "check", rename_all = "snake_case")]
pub enum Check {
    Visible,
    Hidden,
    Enabled,
    Disabled,
    HasText { text: TextMatch },
    ContainsText { text: TextMatch },
    Count { count: u32 },
}

/// A primitive action the script builder knows how to render
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Action {
    Goto { path: String },
    Click { target: Locator, timeout_ms: Option<u64> },
    Fill { target: Locator, value: String },
    Press { target: Option<Locator>, key: String },
    SelectOption { target: Locator, label: String },
    WaitFor { target: Locator, state: WaitState, timeout_ms: u64 },
    Expect { target: Locator, check: Check },
    ExpectUrl { url: TextMatch },
    /// Element text must match the canonical price pattern
    ExpectPattern { target: Locator, pattern: String },
    Screenshot { name: String, target: Option<Locator>, full_page: bool },
    Log { message: String },
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlannedStep {
    pub name: String,
    pub action: Action,
}

/// Text shown after a successful contact submission
const CONTACT_SUCCESS: &str = r"thank you|message.*sent|successfully";
/// Validation feedback on the contact form
const CONTACT_ERROR: &str = r"required|fill|enter|invalid|valid";
/// Rates shown by the shipping calculator
const SHIPPING_RESULT: &str = r"\$[\d,]+\.\d{2}|free|shipping";

/// Stateful expander for one spec
pub struct Planner<'a> {
    view: CatalogView<'a>,
    steps: Vec<PlannedStep>,
}

impl<'a> Planner<'a> {
    pub fn new(catalog: &'a Catalog) -> Self {
        Self {
            view: catalog.view(),
            steps: Vec::new(),
        }
    }

    /// Expand every step of `spec`
    pub fn plan(mut self, spec: &TestSpec) -> E2eResult<Vec<PlannedStep>> {
        for (i, step) in spec.steps.iter().enumerate() {
            self.expand(step).map_err(|e| match e {
                E2eError::StepFailed { .. } => e,
                other => E2eError::StepFailed {
                    step: format!("{} step {}", spec.name, i + 1),
                    reason: other.to_string(),
                },
            })?;
        }
        debug!(
            "Planned '{}': {} step(s) -> {} action(s)",
            spec.name,
            spec.steps.len(),
            self.steps.len()
        );
        Ok(self.steps)
    }

    fn push(&mut self, name: impl Into<String>, action: Action) {
        self.steps.push(PlannedStep {
            name: name.into(),
            action,
        });
    }

    fn expect(&mut self, name: impl Into<String>, target: Locator, check: Check) {
        self.push(name, Action::Expect { target, check });
    }

    fn click(&mut self, name: impl Into<String>, target: Locator) {
        self.push(name, Action::Click { target, timeout_ms: None });
    }

    fn fill(&mut self, name: impl Into<String>, target: Locator, value: impl Into<String>) {
        self.push(name, Action::Fill { target, value: value.into() });
    }

    fn select(&mut self, name: impl Into<String>, target: Locator, label: impl Into<String>) {
        self.push(name, Action::SelectOption { target, label: label.into() });
    }

    fn goto(&mut self, path: String) {
        // a fresh load of the listing starts unfiltered on page 1
        if path == "/products" {
            self.view.clear_category();
        }
        self.push(format!("navigate:{}", path), Action::Goto { path });
    }

    fn expand(&mut self, step: &TestStep) -> E2eResult<()> {
        match step {
            TestStep::Navigate { to } => {
                let path = pages::route(to)?;
                self.goto(path);
            }
            TestStep::Click { target, timeout_ms } => {
                let target = target.resolve()?;
                let timeout_ms = *timeout_ms;
                self.push(format!("click:{}", target), Action::Click { target, timeout_ms });
            }
            TestStep::Fill { target, value, clear_first } => {
                let target = target.resolve()?;
                if *clear_first {
                    self.fill(format!("clear:{}", target), target.clone(), "");
                }
                self.fill(format!("fill:{}", target), target, value.as_str());
            }
            TestStep::Press { target, key } => {
                let target = target.as_ref().map(Target::resolve).transpose()?;
                self.push(format!("press:{}", key), Action::Press { target, key: key.clone() });
            }
            TestStep::Select { target, label } => {
                let target = target.resolve()?;
                self.select(format!("select:{}={}", target, label), target, label.as_str());
            }
            TestStep::Wait { target, timeout_ms, state } => {
                let target = target.resolve()?;
                self.push(
                    format!("wait:{}", target),
                    Action::WaitFor { target, state: *state, timeout_ms: *timeout_ms },
                );
            }
            TestStep::Assert { target, visible, enabled, text, text_contains, count } => {
                self.expand_assert(target, *visible, *enabled, text, text_contains, *count)?;
            }
            TestStep::AssertUrl { url } => {
                self.push(format!("url {}", url), Action::ExpectUrl { url: url.clone() });
            }
            TestStep::Screenshot { name, target, full_page } => {
                let target = target.as_ref().map(Target::resolve).transpose()?;
                self.push(
                    format!("screenshot:{}", name),
                    Action::Screenshot { name: name.clone(), target, full_page: *full_page },
                );
            }
            TestStep::Log { message } => {
                let short: String = message.chars().take(30).collect();
                self.push(format!("log:{}", short), Action::Log { message: message.clone() });
            }
            TestStep::SelectCategory { label } => {
                self.view.select_category(label)?;
                self.select(
                    format!("select category {}", label),
                    ProductsPage::category_filter(),
                    label.as_str(),
                );
            }
            TestStep::ClearCategory => {
                self.view.clear_category();
                self.select("select category All", ProductsPage::category_filter(), "All");
            }
            TestStep::SelectSort { label } => {
                if !fixtures::SORT_OPTIONS.contains(&label.as_str()) {
                    return Err(E2eError::UnknownTarget(format!("sort option '{}'", label)));
                }
                let name = format!("sort by {}", label);
                self.select(name, ProductsPage::sort_filter(), label.as_str());
            }
            TestStep::GoToPage { page } => {
                self.view.go_to_page(*page)?;
                self.click(format!("go to page {}", page), ProductsPage::page_button(*page));
            }
            TestStep::NextPage => {
                if !self.view.next_page() {
                    return Err(self.no_such_page("next"));
                }
                let name = format!("next page ({})", self.view.page());
                self.click(name, ProductsPage::next_page_button());
            }
            TestStep::PreviousPage => {
                if !self.view.previous_page() {
                    return Err(self.no_such_page("previous"));
                }
                let name = format!("previous page ({})", self.view.page());
                self.click(name, ProductsPage::previous_page_button());
            }
            TestStep::AssertCatalogPage => self.expand_catalog_page()?,
            TestStep::AssertPriceFormat { target } => {
                let target = target.resolve()?;
                self.push(
                    format!("price format:{}", target),
                    Action::ExpectPattern { target, pattern: PRICE_PATTERN.to_string() },
                );
            }
            TestStep::AssertPrice { target, amount, product } => {
                let text = match (amount, product) {
                    (Some(amount), None) => price::format_price(*amount)?,
                    (None, Some(key)) => fixtures::product(key)?.price.to_string(),
                    _ => return Err(E2eError::SpecParse(
                        "assert_price needs exactly one of `amount` or `product`".to_string(),
                    )),
                };
                let target = target.resolve()?;
                let name = format!("price {}", text);
                self.expect(name, target, Check::HasText { text: text.into() });
            }
            TestStep::Search { query, product, expect_results } => {
                self.expand_search(query.as_deref(), product.as_deref(), *expect_results)?;
            }
            TestStep::OpenProduct { product } => {
                let product = fixtures::product(product)?;
                self.open_product(product);
            }
            TestStep::AddToCart { product, quantity } => {
                let product = fixtures::product(product)?;
                self.open_product(product);
                self.fill(
                    format!("quantity {}", quantity),
                    ProductDetailPage::quantity_input(),
                    quantity.to_string(),
                );
                self.click(
                    format!("add {} x {} to cart", quantity, product.name),
                    ProductDetailPage::add_to_cart_button(),
                );
            }
            TestStep::AssertTotal { target, unit_price, product, quantity } => {
                let unit = match (unit_price, product) {
                    (Some(text), None) => text.clone(),
                    (None, Some(key)) => fixtures::product(key)?.price.to_string(),
                    _ => return Err(E2eError::SpecParse(
                        "assert_total needs exactly one of `unit_price` or `product`".to_string(),
                    )),
                };
                let total = price::calculate_total(&unit, *quantity)?;
                let target = target.resolve()?;
                self.expect(
                    format!("total {} x {} = {}", quantity, unit, total),
                    target,
                    Check::ContainsText { text: total.into() },
                );
            }
            TestStep::Login { account } => self.expand_login(account)?,
            TestStep::SubmitContact { form } => self.expand_contact(form)?,
            TestStep::CalculateShipping { zip } => self.expand_shipping(zip),
        }
        Ok(())
    }

    fn no_such_page(&self, direction: &str) -> E2eError {
        E2eError::StepFailed {
            step: format!("{}_page", direction),
            reason: format!(
                "no {} page from page {} of {}",
                direction,
                self.view.page(),
                self.view.total_pages()
            ),
        }
    }

    fn expand_assert(
        &mut self,
        target: &Target,
        visible: Option<bool>,
        enabled: Option<bool>,
        text: &Option<TextMatch>,
        text_contains: &Option<TextMatch>,
        count: Option<u32>,
    ) -> E2eResult<()> {
        let target = target.resolve()?;
        let mut checks = Vec::new();
        match visible {
            Some(true) => checks.push(Check::Visible),
            Some(false) => checks.push(Check::Hidden),
            None => {}
        }
        match enabled {
            Some(true) => checks.push(Check::Enabled),
            Some(false) => checks.push(Check::Disabled),
            None => {}
        }
        if let Some(text) = text {
            checks.push(Check::HasText { text: text.clone() });
        }
        if let Some(text) = text_contains {
            checks.push(Check::ContainsText { text: text.clone() });
        }
        if let Some(count) = count {
            checks.push(Check::Count { count });
        }
        if checks.is_empty() {
            return Err(E2eError::SpecParse(format!("assert on {} has nothing to check", target)));
        }
        for check in checks {
            self.expect(format!("assert:{}", target), target.clone(), check);
        }
        Ok(())
    }

    fn expand_catalog_page(&mut self) -> E2eResult<()> {
        let expected = self.view.expected_card_count();
        let total = self.view.visible_total();
        let page = self.view.page();

        let range = self.view.range()?;
        let label = if range.is_empty() {
            format!("page {}: no items", page)
        } else {
            format!("page {}: items {}-{} of {}", page, range.start, range.end, total)
        };

        self.expect(
            format!("{} cards", label),
            ProductsPage::product_cards(),
            Check::Count { count: expected },
        );
        if expected > 0 {
            self.expect(
                format!("results total {}", total),
                ProductsPage::results_info(),
                Check::ContainsText { text: total.to_string().into() },
            );
        }

        if self.view.pagination_visible() {
            let previous = if self.view.has_previous() { Check::Enabled } else { Check::Disabled };
            let next = if self.view.has_next() { Check::Enabled } else { Check::Disabled };
            self.expect("previous page button", ProductsPage::previous_page_button(), previous);
            self.expect("next page button", ProductsPage::next_page_button(), next);
        } else {
            self.expect("pagination hidden", ProductsPage::previous_page_button(), Check::Hidden);
        }
        Ok(())
    }

    fn expand_search(
        &mut self,
        query: Option<&str>,
        product: Option<&str>,
        expect_results: bool,
    ) -> E2eResult<()> {
        let (text, product) = match (query, product) {
            (Some(query), None) => (query, None),
            (None, Some(key)) => {
                let product = fixtures::product(key)?;
                (product.name, Some(product))
            }
            _ => {
                return Err(E2eError::SpecParse(
                    "search needs exactly one of `query` or `product`".to_string(),
                ))
            }
        };

        self.fill(format!("search {:?}", text), Header::search_input(), text);
        self.click("submit search", Header::search_button());
        self.push("on products", Action::ExpectUrl { url: TextMatch::pattern("/products") });

        let cards = ProductsPage::product_cards();
        if let Some(product) = product {
            self.expect(
                format!("{} found", product.name),
                ProductsPage::product_card(product.name).first(),
                Check::Visible,
            );
        } else if !is_non_empty(text) {
            // a blank query lists the unfiltered catalog
            self.view.clear_category();
            let expected = self.view.expected_card_count();
            let name = format!("all products ({})", expected);
            self.expect(name, cards, Check::Count { count: expected });
        } else if expect_results {
            self.expect(format!("results for {:?}", text), cards.first(), Check::Visible);
        } else {
            self.expect(format!("no results for {:?}", text), cards, Check::Count { count: 0 });
        }
        Ok(())
    }

    fn open_product(&mut self, product: &Product) {
        self.goto(product.path());
        self.expect(
            format!("product name {}", product.name),
            pages::page_heading(),
            Check::HasText { text: product.name.into() },
        );
        self.expect(
            format!("product price {}", product.price),
            ProductDetailPage::product_price(),
            Check::HasText { text: product.price.into() },
        );
    }

    fn expand_login(&mut self, account: &str) -> E2eResult<()> {
        let creds = fixtures::user(account)?;
        self.goto("/login".to_string());
        self.fill("fill email", LoginPage::email_input(), creds.email);
        self.fill("fill password", LoginPage::password_input(), creds.password);
        self.click("sign in", LoginPage::sign_in_button());

        if creds.role.is_some() {
            self.push("redirected home", Action::ExpectUrl { url: TextMatch::pattern(r"/$") });
        } else {
            self.push("still on login", Action::ExpectUrl { url: TextMatch::pattern("/login") });
        }
        Ok(())
    }

    fn expand_contact(&mut self, key: &str) -> E2eResult<()> {
        let form = fixtures::contact_form(key)?;
        self.goto("/contact".to_string());
        for (field, value) in form.fields() {
            if !value.is_empty() {
                let label = field.label();
                self.fill(format!("fill {}", label), ContactPage::field(label), value);
            }
        }
        self.click("submit contact form", ContactPage::submit_button());

        let errors = form.validation_errors();
        if errors.is_empty() {
            self.expect(
                "contact form accepted",
                Locator::text(TextMatch::pattern_ci(CONTACT_SUCCESS)).first(),
                Check::Visible,
            );
        } else {
            let fields: Vec<&str> = errors.iter().map(ContactField::label).collect();
            self.expect(
                format!("contact form rejects {}", fields.join(", ")),
                Locator::text(TextMatch::pattern_ci(CONTACT_ERROR)).first(),
                Check::Visible,
            );
        }
        Ok(())
    }

    fn expand_shipping(&mut self, zip: &str) {
        self.goto("/shipping".to_string());
        self.fill(format!("enter ZIP {:?}", zip), ShippingPage::zip_code_input(), zip);

        if is_valid_us_zip(zip) {
            self.expect("calculate enabled", ShippingPage::calculate_button(), Check::Enabled);
            self.click("calculate", ShippingPage::calculate_button());
            self.expect(
                "shipping rates shown",
                Locator::text(TextMatch::pattern_ci(SHIPPING_RESULT)).first(),
                Check::Visible,
            );
        } else {
            self.expect("calculate disabled", ShippingPage::calculate_button(), Check::Disabled);
        }
    }
}

/// Plan a spec against the storefront catalog
pub fn plan_spec(spec: &TestSpec) -> E2eResult<Vec<PlannedStep>> {
    let catalog = fixtures::shop_catalog()?;
    Planner::new(&catalog).plan(spec)
}
