//! Known products used as assertion targets

use serde::Serialize;

use crate::error::{Error, Result};
use crate::price;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Product {
    pub key: &'static str,
    pub id: u32,
    pub name: &'static str,
    pub price: &'static str,
    pub category: &'static str,
    pub badge: Option<&'static str>,
}

impl Product {
    /// Route of the product detail page
    pub fn path(&self) -> String {
        format!("/products/{}", self.id)
    }

    pub fn price_amount(&self) -> Option<f64> {
        price::parse_price(self.price)
    }
}

/// One or more representative products per category
pub const PRODUCTS: &[Product] = &[
    Product {
        key: "sd_card",
        id: 1,
        name: "128GB UHS-II SD Card",
        price: "$39.99",
        category: "Photography",
        badge: Some("Best Seller"),
    },
    Product {
        key: "monitor",
        id: 2,
        name: "27\" 4K UHD Monitor",
        price: "$449.99",
        category: "Electronics",
        badge: Some("Best Seller"),
    },
    Product {
        key: "mirrorless_camera",
        id: 3,
        name: "4K Mirrorless Camera",
        price: "$1,299.99",
        category: "Photography",
        badge: Some("Best Seller"),
    },
    Product {
        key: "lens",
        id: 4,
        name: "50mm f/1.8 Lens",
        price: "$249.99",
        category: "Photography",
        badge: Some("Best Seller"),
    },
    Product {
        key: "usb_hub",
        id: 5,
        name: "7-in-1 USB-C Hub",
        price: "$69.99",
        category: "Accessories",
        badge: None,
    },
    Product {
        key: "studio_monitors",
        id: 6,
        name: "Adam Audio A7X Studio Monitors (Pair)",
        price: "$1,599.99",
        category: "Studio Recording",
        badge: None,
    },
    Product {
        key: "audio_interface",
        id: 7,
        name: "Apogee Duet 3 Audio Interface",
        price: "$649.99",
        category: "Studio Recording",
        badge: None,
    },
    Product {
        key: "micro_freak",
        id: 8,
        name: "Arturia MicroFreak",
        price: "$349.99",
        category: "Synthesizers",
        badge: Some("New Arrival"),
    },
    Product {
        key: "condenser",
        id: 10,
        name: "Audio-Technica AT2020",
        price: "$99.99",
        category: "Studio Recording",
        badge: None,
    },
    Product {
        key: "monitor_stand",
        id: 15,
        name: "Dual Monitor Stand",
        price: "$99.99",
        category: "Accessories",
        badge: None,
    },
];

/// Look up a product by its fixture key
pub fn product(key: &str) -> Result<&'static Product> {
    PRODUCTS
        .iter()
        .find(|p| p.key == key)
        .ok_or_else(|| Error::unknown_fixture("product", key))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::shop_catalog;
    use crate::price::is_valid_price_format;

    #[test]
    fn test_product_prices_are_canonical() {
        for p in PRODUCTS {
            assert!(is_valid_price_format(p.price), "{}: {}", p.key, p.price);
            assert!(p.price_amount().is_some());
        }
    }

    #[test]
    fn test_products_belong_to_known_categories() {
        let catalog = shop_catalog().unwrap();
        for p in PRODUCTS {
            assert!(catalog.category(p.category).is_some(), "{}", p.category);
        }
    }

    #[test]
    fn test_product_lookup() {
        let camera = product("mirrorless_camera").unwrap();
        assert_eq!(camera.price_amount(), Some(1299.99));
        assert_eq!(camera.path(), "/products/3");
        assert!(product("turntable").is_err());
    }
}
