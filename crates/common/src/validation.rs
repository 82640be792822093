//! Structural validation of form inputs
//!
//! These checks look at the shape of a value only. They never fail; a
//! non-matching input is simply `false`.

use once_cell::sync::Lazy;
use regex::Regex;

static EMAIL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern is valid"));

static US_ZIP_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[0-9]{5}$").expect("zip pattern is valid"));

/// Loose email check: `local@domain.tld` with no whitespace and a single `@`
/// between the parts. Far more permissive than RFC 5322.
pub fn is_valid_email(email: &str) -> bool {
    EMAIL_RE.is_match(email)
}

/// Exactly five ASCII digits. `00000` passes; whether the code is assigned
/// is for the application to decide.
pub fn is_valid_us_zip(zip: &str) -> bool {
    US_ZIP_RE.is_match(zip)
}

/// A required field has a value after trimming
pub fn is_non_empty(value: &str) -> bool {
    !value.trim().is_empty()
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test_case("jane.doe@example.com" => true)]
    #[test_case("admin@test.com" => true)]
    #[test_case("a@b.c" => true)]
    #[test_case("not-an-email" => false)]
    #[test_case("" => false)]
    #[test_case("jane doe@example.com" => false ; "whitespace in local part")]
    #[test_case("jane@@example.com" => false)]
    #[test_case("jane@example" => false ; "missing dot")]
    #[test_case("' OR 1=1 --" => false)]
    #[test_case("<script>alert(\"xss\")</script>@test.com" => true ; "xss payload passes")]
    fn test_is_valid_email(email: &str) -> bool {
        is_valid_email(email)
    }

    #[test]
    fn test_email_is_permissive() {
        assert!(is_valid_email("a@b.c.d"));
        assert!(is_valid_email("ünïcode@exämple.de"));
    }

    #[test_case("10001" => true)]
    #[test_case("90210" => true)]
    #[test_case("00000" => true ; "all zeros is structurally valid")]
    #[test_case("99999" => true)]
    #[test_case("00501" => true)]
    #[test_case("123" => false)]
    #[test_case("1234567" => false)]
    #[test_case("ABCDE" => false)]
    #[test_case("" => false)]
    #[test_case("12345\n" => false ; "trailing newline")]
    #[test_case("١٢٣٤٥" => false ; "non ascii digits")]
    fn test_is_valid_us_zip(zip: &str) -> bool {
        is_valid_us_zip(zip)
    }

    #[test]
    fn test_is_non_empty() {
        assert!(!is_non_empty(""));
        assert!(!is_non_empty("   "));
        assert!(!is_non_empty("\t\n"));
        assert!(is_non_empty(" a "));
        assert!(is_non_empty("Jane Doe"));
    }
}
