//! ZIP codes for the `/shipping` calculator

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ShippingZip {
    pub zip_code: &'static str,
    pub description: &'static str,
}

const fn zip(zip_code: &'static str, description: &'static str) -> ShippingZip {
    ShippingZip { zip_code, description }
}

pub const VALID_ZIPS: &[ShippingZip] = &[
    zip("10001", "New York, NY"),
    zip("90210", "Beverly Hills, CA"),
    zip("60601", "Chicago, IL"),
    zip("33101", "Miami, FL"),
    zip("98101", "Seattle, WA"),
];

/// Inputs the calculator treats as suspicious. `00000` and `99999` are
/// well-formed and only interesting as boundaries.
pub const INVALID_ZIPS: &[ShippingZip] = &[
    zip("", "Empty input"),
    zip("123", "Too short (3 digits)"),
    zip("1234567", "Too long (7 digits)"),
    zip("ABCDE", "Non-numeric characters"),
    zip("00000", "All zeros boundary"),
    zip("99999", "Upper boundary"),
];

pub const BOUNDARY_ZIPS: &[ShippingZip] = &[
    zip("00501", "Lowest valid US ZIP (Holtsville, NY)"),
    zip("99950", "Highest valid US ZIP (Ketchikan, AK)"),
];
