//! Contact form payloads for the `/contact` page

use serde::Serialize;

use crate::error::{Error, Result};
use crate::validation::{is_non_empty, is_valid_email};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ContactForm {
    pub full_name: &'static str,
    pub email: &'static str,
    pub subject: &'static str,
    pub message: &'static str,
}

/// Form fields, labelled as the page renders them
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ContactField {
    FullName,
    Email,
    Subject,
    Message,
}

impl ContactField {
    pub fn label(&self) -> &'static str {
        match self {
            ContactField::FullName => "Full Name",
            ContactField::Email => "Email Address",
            ContactField::Subject => "Subject",
            ContactField::Message => "Message",
        }
    }
}

impl ContactForm {
    /// Fields the form should reject, in display order
    pub fn validation_errors(&self) -> Vec<ContactField> {
        let mut errors = Vec::new();
        if !is_non_empty(self.full_name) {
            errors.push(ContactField::FullName);
        }
        if !is_valid_email(self.email) {
            errors.push(ContactField::Email);
        }
        if !is_non_empty(self.subject) {
            errors.push(ContactField::Subject);
        }
        if !is_non_empty(self.message) {
            errors.push(ContactField::Message);
        }
        errors
    }

    pub fn is_valid(&self) -> bool {
        self.validation_errors().is_empty()
    }

    pub fn fields(&self) -> [(ContactField, &'static str); 4] {
        [
            (ContactField::FullName, self.full_name),
            (ContactField::Email, self.email),
            (ContactField::Subject, self.subject),
            (ContactField::Message, self.message),
        ]
    }
}

pub const VALID_CONTACT: ContactForm = ContactForm {
    full_name: "Jane Doe",
    email: "jane.doe@example.com",
    subject: "Product Inquiry",
    message: "Hello, I would like more information about your studio recording equipment.",
};

pub const VALID_CONTACT_ALT: ContactForm = ContactForm {
    full_name: "John Smith",
    email: "john.smith@example.com",
    subject: "Order Support",
    message: "I need help with my recent order. Can you assist?",
};

const INVALID_CONTACT: &[(&str, ContactForm)] = &[
    (
        "all_empty",
        ContactForm {
            full_name: "",
            email: "",
            subject: "",
            message: "",
        },
    ),
    (
        "invalid_email",
        ContactForm {
            full_name: "Jane Doe",
            email: "not-an-email",
            subject: "Test",
            message: "Checking email validation.",
        },
    ),
    (
        "missing_name",
        ContactForm {
            full_name: "",
            email: "jane.doe@example.com",
            subject: "Test",
            message: "Missing name field.",
        },
    ),
    (
        "xss_payload",
        ContactForm {
            full_name: "Test User",
            email: "xss@example.com",
            subject: "XSS Test",
            message: "<script>alert(\"xss\")</script>",
        },
    ),
];

/// Resolve `valid`, `valid_alt` or one of the invalid payload keys
pub fn contact_form(key: &str) -> Result<ContactForm> {
    match key {
        "valid" => Ok(VALID_CONTACT),
        "valid_alt" => Ok(VALID_CONTACT_ALT),
        _ => INVALID_CONTACT
            .iter()
            .find(|(name, _)| *name == key)
            .map(|(_, form)| *form)
            .ok_or_else(|| Error::unknown_fixture("contact form", key)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_payloads() {
        assert!(VALID_CONTACT.is_valid());
        assert!(VALID_CONTACT_ALT.is_valid());
    }

    #[test]
    fn test_validation_errors() {
        assert_eq!(
            contact_form("all_empty").unwrap().validation_errors(),
            vec![
                ContactField::FullName,
                ContactField::Email,
                ContactField::Subject,
                ContactField::Message
            ]
        );
        assert_eq!(
            contact_form("invalid_email").unwrap().validation_errors(),
            vec![ContactField::Email]
        );
        assert_eq!(
            contact_form("missing_name").unwrap().validation_errors(),
            vec![ContactField::FullName]
        );
    }

    #[test]
    fn test_xss_payload_is_structurally_valid() {
        // the payload must reach the server for the escaping check
        assert!(contact_form("xss_payload").unwrap().is_valid());
    }

    #[test]
    fn test_unknown_payload() {
        assert!(matches!(
            contact_form("spam"),
            Err(Error::UnknownFixture { .. })
        ));
    }
}
