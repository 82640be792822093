//! Page objects for the Music-Tech Shop storefront
//!
//! Each page exposes its elements as [`Locator`]s built from accessible roles
//! and names. Specs address them as `"<page>.<element>"`, e.g.
//! `"products.next_page_button"`; elements shared by every page (heading,
//! notifications, header, footer) resolve on any page.

use crate::error::{E2eError, E2eResult};
use crate::locator::{Locator, TextMatch};

/// A page or reusable component with named elements
pub trait PageObject: Sync {
    /// Name used in spec targets
    fn name(&self) -> &'static str;

    /// Route relative to the base URL; `None` for components
    fn path(&self) -> Option<&'static str>;

    /// Look up a named element
    fn element(&self, name: &str) -> Option<Locator>;
}

/// Level-1 heading of the current page
pub fn page_heading() -> Locator {
    Locator::role("heading").level(1)
}

/// Live region used for toast messages
pub fn notifications_region() -> Locator {
    Locator::role_named("region", "Notifications")
}

/// First "404" / "not found" style message on the page
pub fn not_found_message() -> Locator {
    Locator::text(TextMatch::pattern_ci(r"404|not found|page doesn.?t exist")).first()
}

fn base_element(name: &str) -> Option<Locator> {
    match name {
        "page_heading" => Some(page_heading()),
        "notifications" => Some(notifications_region()),
        "not_found_message" => Some(not_found_message()),
        _ => None,
    }
}

pub struct Header;

impl Header {
    pub fn main_nav() -> Locator {
        Locator::role_named("navigation", "Main navigation")
    }

    pub fn nav_link(name: &str) -> Locator {
        Locator::role_named("link", name).within(Self::main_nav())
    }

    pub fn search_input() -> Locator {
        Locator::role_named("searchbox", "Search products")
    }

    pub fn search_button() -> Locator {
        Locator::role_named("button", "Search").within(Locator::role("search"))
    }

    pub fn cart_link() -> Locator {
        Locator::role_named("link", TextMatch::pattern(r"Shopping cart with \d+ items"))
    }
}

impl PageObject for Header {
    fn name(&self) -> &'static str {
        "header"
    }

    fn path(&self) -> Option<&'static str> {
        None
    }

    fn element(&self, name: &str) -> Option<Locator> {
        let locator = match name {
            "home_link" => Self::nav_link("Home"),
            "products_link" => Self::nav_link("Products"),
            "api_test_link" => Self::nav_link("API Test"),
            "logo_link" => Locator::role_named("link", "Music-Tech Shop Home"),
            "search_input" => Self::search_input(),
            "search_button" => Self::search_button(),
            "theme_toggle" => Locator::role_named("button", "Toggle theme"),
            "login_link" => Locator::role_named("link", "Login to your account"),
            "user_menu_button" => Locator::role_named("button", "User menu"),
            "cart_link" => Self::cart_link(),
            "wishlist_link" => {
                Locator::role_named("link", TextMatch::pattern(r"Wishlist with \d+ items"))
            }
            _ => return None,
        };
        Some(locator)
    }
}

pub struct Footer;

impl Footer {
    pub fn region() -> Locator {
        Locator::role("contentinfo")
    }

    fn link(name: &str) -> Locator {
        Locator::role_named("link", name).within(Self::region())
    }
}

impl PageObject for Footer {
    fn name(&self) -> &'static str {
        "footer"
    }

    fn path(&self) -> Option<&'static str> {
        None
    }

    fn element(&self, name: &str) -> Option<Locator> {
        let locator = match name {
            "region" => Self::region(),
            "electronics_link" => Self::link("Electronics"),
            "photography_link" => Self::link("Photography"),
            "accessories_link" => Self::link("Accessories"),
            "about_us_link" => Self::link("About Us"),
            "shipping_policy_link" => Self::link("Shipping Policy"),
            "returns_link" => Self::link("Returns & Refunds"),
            "terms_link" => Self::link("Terms of Service"),
            "contact_link" => Self::link("Contact Us"),
            "privacy_policy_link" => Self::link("Privacy Policy"),
            "cookie_settings_button" => {
                Locator::role_named("button", "Cookie Settings").within(Self::region())
            }
            _ => return None,
        };
        Some(locator)
    }
}

pub struct HomePage;

impl PageObject for HomePage {
    fn name(&self) -> &'static str {
        "home"
    }

    fn path(&self) -> Option<&'static str> {
        Some("/")
    }

    fn element(&self, name: &str) -> Option<Locator> {
        let locator = match name {
            "hero_heading" => Locator::role_named("heading", "Music-Tech Shop").level(1),
            "shop_now_link" => Locator::role_named("link", "Shop Now"),
            "featured_products_heading" => Locator::role_named("heading", "Featured Products"),
            "featured_product_cards" => Locator::role("article"),
            "view_all_products_link" => Locator::role_named("link", "View All Products"),
            "categories_heading" => Locator::role_named("heading", "Shop by Category"),
            "newsletter_email_input" => Locator::role_named("textbox", "Email address"),
            "subscribe_button" => Locator::role_named("button", "Subscribe"),
            _ => return None,
        };
        Some(locator)
    }
}

pub struct ProductsPage;

impl ProductsPage {
    pub fn category_filter() -> Locator {
        Locator::role_named("combobox", "Category")
    }

    pub fn sort_filter() -> Locator {
        Locator::role_named("combobox", "Sort by")
    }

    pub fn product_cards() -> Locator {
        Locator::role("article")
    }

    pub fn product_card(name: &str) -> Locator {
        Self::product_cards().has_text(name)
    }

    /// "Showing X of Y products (Page N of M)"
    pub fn results_info() -> Locator {
        Locator::text(TextMatch::pattern(r"Showing \d+ of \d+ products"))
    }

    pub fn pagination_nav() -> Locator {
        Locator::role_named("navigation", "Pagination")
    }

    pub fn previous_page_button() -> Locator {
        Locator::role_named("button", "Go to previous page")
    }

    pub fn next_page_button() -> Locator {
        Locator::role_named("button", "Go to next page")
    }

    pub fn page_button(page: u32) -> Locator {
        Locator::role_named("button", format!("Go to page {}", page))
    }
}

impl PageObject for ProductsPage {
    fn name(&self) -> &'static str {
        "products"
    }

    fn path(&self) -> Option<&'static str> {
        Some("/products")
    }

    fn element(&self, name: &str) -> Option<Locator> {
        let locator = match name {
            "search_input" => Header::search_input(),
            "category_filter" => Self::category_filter(),
            "sort_filter" => Self::sort_filter(),
            "product_cards" => Self::product_cards(),
            "first_card_price" => Locator::text(TextMatch::pattern(r"^\$[\d,]+\.\d{2}$"))
                .first()
                .within(Self::product_cards().first()),
            "results_info" => Self::results_info(),
            "pagination_nav" => Self::pagination_nav(),
            "previous_page_button" => Self::previous_page_button(),
            "next_page_button" => Self::next_page_button(),
            _ => return None,
        };
        Some(locator)
    }
}

pub struct ProductDetailPage;

impl ProductDetailPage {
    pub fn product_price() -> Locator {
        Locator::test_id("product-price")
    }

    pub fn quantity_input() -> Locator {
        Locator::role_named("spinbutton", "Product quantity")
    }

    pub fn add_to_cart_button() -> Locator {
        Locator::role_named("button", TextMatch::pattern(r"Add \d+ .+ to cart"))
    }
}

impl PageObject for ProductDetailPage {
    fn name(&self) -> &'static str {
        "product_detail"
    }

    // the route needs a product id, see `Product::path`
    fn path(&self) -> Option<&'static str> {
        None
    }

    fn element(&self, name: &str) -> Option<Locator> {
        let locator = match name {
            "product_name" => page_heading(),
            "product_price" => Self::product_price(),
            "product_description" => Locator::role_named("region", "Product description"),
            "quantity_input" => Self::quantity_input(),
            "decrease_quantity_button" => Locator::role_named("button", "Decrease quantity"),
            "increase_quantity_button" => Locator::role_named("button", "Increase quantity"),
            "add_to_cart_button" => Self::add_to_cart_button(),
            "add_to_favorites_button" => {
                Locator::role_named("button", TextMatch::pattern(r"Add .+ to favorites"))
            }
            "continue_shopping_button" => Locator::role_named("button", "Continue Shopping"),
            "spec_terms" => Locator::role("term"),
            "spec_definitions" => Locator::role("definition"),
            _ => return None,
        };
        Some(locator)
    }
}

pub struct CartPage;

impl CartPage {
    pub fn cart_item(product_name: &str) -> Locator {
        Locator::role_named("article", TextMatch::pattern(regex::escape(product_name)))
    }

    pub fn remove_button(product_name: &str) -> Locator {
        Locator::role_named("button", format!("Remove {} from cart", product_name))
    }

    pub fn order_summary() -> Locator {
        Locator::role_named("region", "Order summary")
    }
}

impl PageObject for CartPage {
    fn name(&self) -> &'static str {
        "cart"
    }

    fn path(&self) -> Option<&'static str> {
        Some("/cart")
    }

    fn element(&self, name: &str) -> Option<Locator> {
        let locator = match name {
            "checkout_heading" => Locator::role_named("heading", "Checkout").level(1),
            "empty_cart_heading" => Locator::role_named("heading", "Your cart is empty"),
            "explore_products_link" => Locator::role_named("link", "Explore Products"),
            "items_heading" => {
                Locator::role_named("heading", TextMatch::pattern(r"Your Items \(\d+\)"))
            }
            "cart_items" => Locator::role("article"),
            "order_summary" => Self::order_summary(),
            "proceed_to_checkout_button" => {
                Locator::role_named("button", "Proceed to checkout and complete purchase")
            }
            _ => return None,
        };
        Some(locator)
    }
}

pub struct LoginPage;

impl LoginPage {
    pub fn email_input() -> Locator {
        Locator::role_named("textbox", "Email")
    }

    pub fn password_input() -> Locator {
        Locator::role_named("textbox", "Password")
    }

    pub fn sign_in_button() -> Locator {
        Locator::role_named("button", "Sign in to your account")
    }
}

impl PageObject for LoginPage {
    fn name(&self) -> &'static str {
        "login"
    }

    fn path(&self) -> Option<&'static str> {
        Some("/login")
    }

    fn element(&self, name: &str) -> Option<Locator> {
        let locator = match name {
            "email_input" => Self::email_input(),
            "password_input" => Self::password_input(),
            "show_password_button" => Locator::role_named("button", "Show password"),
            "sign_in_button" => Self::sign_in_button(),
            "use_admin_account_button" => {
                Locator::role_named("button", "Use This Account").first()
            }
            "use_customer_account_button" => {
                Locator::role_named("button", "Use This Account").nth(1)
            }
            "continue_as_guest_link" => Locator::role_named("link", "Continue as Guest"),
            _ => return None,
        };
        Some(locator)
    }
}

pub struct ContactPage;

impl ContactPage {
    /// Text box for a form field, by its visible label
    pub fn field(label: &str) -> Locator {
        Locator::role_named("textbox", label)
    }

    pub fn submit_button() -> Locator {
        Locator::role_named("button", "Submit contact form")
    }
}

impl PageObject for ContactPage {
    fn name(&self) -> &'static str {
        "contact"
    }

    fn path(&self) -> Option<&'static str> {
        Some("/contact")
    }

    fn element(&self, name: &str) -> Option<Locator> {
        let locator = match name {
            "full_name_input" => Self::field("Full Name"),
            "email_input" => Self::field("Email Address"),
            "subject_input" => Self::field("Subject"),
            "message_input" => Self::field("Message"),
            "submit_button" => Self::submit_button(),
            _ => return None,
        };
        Some(locator)
    }
}

pub struct ShippingPage;

impl ShippingPage {
    pub fn zip_code_input() -> Locator {
        Locator::role_named("textbox", "ZIP code input")
    }

    pub fn calculate_button() -> Locator {
        Locator::role_named("button", "Calculate")
    }
}

impl PageObject for ShippingPage {
    fn name(&self) -> &'static str {
        "shipping"
    }

    fn path(&self) -> Option<&'static str> {
        Some("/shipping")
    }

    fn element(&self, name: &str) -> Option<Locator> {
        let locator = match name {
            "zip_code_input" => Self::zip_code_input(),
            "calculate_button" => Self::calculate_button(),
            "standard_shipping_heading" => Locator::role_named("heading", "Standard Shipping"),
            "express_shipping_heading" => Locator::role_named("heading", "Express Shipping"),
            "overnight_shipping_heading" => Locator::role_named("heading", "Overnight Shipping"),
            _ => return None,
        };
        Some(locator)
    }
}

pub struct AboutPage;

impl PageObject for AboutPage {
    fn name(&self) -> &'static str {
        "about"
    }

    fn path(&self) -> Option<&'static str> {
        Some("/about")
    }

    fn element(&self, name: &str) -> Option<Locator> {
        let locator = match name {
            "mission_heading" => Locator::role_named("heading", "Our Mission"),
            "vision_heading" => Locator::role_named("heading", "Our Vision"),
            "values_heading" => Locator::role_named("heading", "Our Values"),
            "explore_products_link" => Locator::role_named("link", "Explore Our Products"),
            _ => return None,
        };
        Some(locator)
    }
}

pub struct ReturnsPage;

impl PageObject for ReturnsPage {
    fn name(&self) -> &'static str {
        "returns"
    }

    fn path(&self) -> Option<&'static str> {
        Some("/returns")
    }

    fn element(&self, name: &str) -> Option<Locator> {
        let locator = match name {
            "return_steps" => Locator::role("listitem"),
            "warranty_headings" => Locator::role("heading").level(3),
            "find_more_locations_button" => Locator::role_named("button", "Find More Locations"),
            "view_my_orders_link" => Locator::role_named("link", "View My Orders"),
            "contact_support_button" => Locator::role_named("button", "Contact Support"),
            _ => return None,
        };
        Some(locator)
    }
}

pub struct TermsPage;

impl TermsPage {
    /// Numbered section titles, in page order
    pub const SECTIONS: [&'static str; 10] = [
        "1. Agreement to Terms",
        "2. Intellectual Property",
        "3. User Responsibilities",
        "4. Product Information",
        "5. Pricing and Payment",
        "6. Shipping and Delivery",
        "7. Returns and Refunds",
        "8. Limitation of Liability",
        "9. Governing Law",
        "10. User Accounts",
    ];

    pub fn section_headings() -> Locator {
        Locator::role("heading").level(2)
    }

    /// Heading of section `number`, counted from 1
    pub fn section_heading(number: usize) -> Option<Locator> {
        let title = Self::SECTIONS.get(number.checked_sub(1)?)?;
        Some(Locator::role_named("heading", *title))
    }
}

impl PageObject for TermsPage {
    fn name(&self) -> &'static str {
        "terms"
    }

    fn path(&self) -> Option<&'static str> {
        Some("/terms")
    }

    fn element(&self, name: &str) -> Option<Locator> {
        if name == "section_headings" {
            return Some(Self::section_headings());
        }
        // section_1 .. section_10
        let number = name.strip_prefix("section_")?.parse().ok()?;
        Self::section_heading(number)
    }
}

pub struct OrdersPage;

impl PageObject for OrdersPage {
    fn name(&self) -> &'static str {
        "orders"
    }

    fn path(&self) -> Option<&'static str> {
        Some("/orders")
    }

    fn element(&self, name: &str) -> Option<Locator> {
        let locator = match name {
            "order_history_heading" => Locator::role_named("heading", "Order History").level(1),
            "no_orders_heading" => Locator::role_named("heading", "No orders found"),
            "start_shopping_link" => Locator::role_named("link", "Start Shopping"),
            "order_articles" => Locator::role("article"),
            _ => return None,
        };
        Some(locator)
    }
}

pub struct ApiTestPage;

impl ApiTestPage {
    /// Collapsible group of console actions, e.g. "Cart Tests"
    pub fn accordion(group: &str) -> Locator {
        Locator::role_named("button", TextMatch::pattern_ci(regex::escape(group)))
    }

    pub fn response_heading() -> Locator {
        Locator::role_named("heading", "API Response")
    }
}

impl PageObject for ApiTestPage {
    fn name(&self) -> &'static str {
        "api_test"
    }

    fn path(&self) -> Option<&'static str> {
        Some("/api-test")
    }

    fn element(&self, name: &str) -> Option<Locator> {
        let locator = match name {
            "console_heading" => Locator::role_named("heading", "API Testing Console").level(1),
            "email_input" => Locator::css(r#"input[type="email"]"#),
            "password_input" => Locator::css(r#"input[type="password"]"#),
            "product_id_input" => Locator::placeholder("1").exact().first(),
            "quantity_input" => Locator::role("spinbutton"),
            "search_term_input" => Locator::placeholder("headphones"),
            "category_input" => Locator::placeholder("Electronics"),
            "auth_tests_accordion" => Self::accordion("Authentication Tests"),
            "product_tests_accordion" => Self::accordion("Product Tests"),
            "cart_tests_accordion" => Self::accordion("Cart Tests"),
            "order_tests_accordion" => Self::accordion("Order Tests"),
            "utility_tests_accordion" => Self::accordion("Utility Tests"),
            "response_heading" => Self::response_heading(),
            "login_button" => Locator::role_named("button", "Login").exact(),
            "get_user_button" => Locator::role_named("button", "Get User"),
            "logout_button" => Locator::test_id("auth-logout-button"),
            "get_products_button" => Locator::test_id("products-get-all-button"),
            "get_product_button" => Locator::test_id("products-get-single-button"),
            _ => return None,
        };
        Some(locator)
    }
}

/// Every page object, components first
pub static PAGES: &[&dyn PageObject] = &[
    &Header,
    &Footer,
    &HomePage,
    &ProductsPage,
    &ProductDetailPage,
    &CartPage,
    &LoginPage,
    &ContactPage,
    &ShippingPage,
    &AboutPage,
    &ReturnsPage,
    &TermsPage,
    &OrdersPage,
    &ApiTestPage,
];

pub fn page(name: &str) -> E2eResult<&'static dyn PageObject> {
    PAGES
        .iter()
        .copied()
        .find(|p| p.name() == name)
        .ok_or_else(|| E2eError::UnknownTarget(format!("no page named '{}'", name)))
}

/// Route for a page name, or the input itself when it is already a path
pub fn route(to: &str) -> E2eResult<String> {
    if to.starts_with('/') {
        return Ok(to.to_string());
    }
    page(to)?
        .path()
        .map(String::from)
        .ok_or_else(|| E2eError::UnknownTarget(format!("'{}' has no route of its own", to)))
}

/// Resolve a `"<page>.<element>"` target
pub fn resolve(target: &str) -> E2eResult<Locator> {
    let (page_name, element) = target
        .split_once('.')
        .ok_or_else(|| {
            E2eError::UnknownTarget(format!("expected '<page>.<element>', got '{}'", target))
        })?;

    let page = page(page_name)?;
    page.element(element)
        .or_else(|| base_element(element))
        .ok_or_else(|| E2eError::UnknownTarget(target.to_string()))
}
