//! Music-Tech Shop Common Library
//!
//! Pure helpers used to compute the values the storefront scenarios assert
//! against: pagination arithmetic, US price strings, form field validation,
//! plus the catalog model and static fixtures.

pub mod catalog;
pub mod error;
pub mod fixtures;
pub mod pagination;
pub mod price;
pub mod validation;

// Re-export commonly used types
pub use catalog::{Catalog, CatalogView, Category};
pub use error::{Error, Result};
pub use pagination::{items_on_page, page_range, total_pages, PageRange};
pub use price::{calculate_total, format_price, is_valid_price_format, parse_price};
pub use validation::{is_non_empty, is_valid_email, is_valid_us_zip};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
