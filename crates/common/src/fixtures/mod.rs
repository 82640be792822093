//! Static test data for the Music-Tech Shop storefront
//!
//! The application serves a fixed 50-product catalog from an in-memory
//! backend, so these tables stay valid across deployments.

pub mod contact;
pub mod products;
pub mod shipping;
pub mod users;

use crate::catalog::{Catalog, Category};
use crate::error::Result;

pub use contact::{contact_form, ContactField, ContactForm, VALID_CONTACT, VALID_CONTACT_ALT};
pub use products::{product, Product, PRODUCTS};
pub use shipping::{ShippingZip, BOUNDARY_ZIPS, INVALID_ZIPS, VALID_ZIPS};
pub use users::{user, Credentials, Role, ADMIN_USER, CUSTOMER_USER};

/// Products listed across all categories
pub const TOTAL_PRODUCTS: u32 = 50;

/// Product cards per listing page
pub const PRODUCTS_PER_PAGE: u32 = 16;

/// Category labels and the number of products each should list
pub const CATEGORIES: &[(&str, u32)] = &[
    ("Electronics", 5),
    ("Photography", 4),
    ("Accessories", 6),
    ("Synthesizers", 15),
    ("Studio Recording", 20),
];

/// Sort options offered by the listing page
pub const SORT_OPTIONS: &[&str] = &[
    "Name (A-Z)",
    "Name (Z-A)",
    "Price (Low to High)",
    "Price (High to Low)",
];

/// The storefront catalog
pub fn shop_catalog() -> Result<Catalog> {
    Catalog::new(TOTAL_PRODUCTS, PRODUCTS_PER_PAGE)?.with_categories(
        CATEGORIES
            .iter()
            .map(|(label, count)| Category::new(*label, *count)),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shop_catalog() {
        let catalog = shop_catalog().unwrap();
        assert_eq!(catalog.total_pages(), 4);
        assert_eq!(catalog.categories().len(), 5);
        assert_eq!(catalog.category("Studio Recording").unwrap().expected_count, 20);
    }

    #[test]
    fn test_category_counts_cover_catalog() {
        let sum: u32 = CATEGORIES.iter().map(|(_, count)| count).sum();
        assert_eq!(sum, TOTAL_PRODUCTS);
    }
}
