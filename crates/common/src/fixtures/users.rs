//! Pre-configured accounts and credential payloads for negative tests

use serde::Serialize;

use crate::error::{Error, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Admin,
    Customer,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Credentials {
    pub email: &'static str,
    pub password: &'static str,
    /// `None` for payloads that must not authenticate
    pub role: Option<Role>,
}

pub const ADMIN_USER: Credentials = Credentials {
    email: "admin@test.com",
    password: "admin123",
    role: Some(Role::Admin),
};

pub const CUSTOMER_USER: Credentials = Credentials {
    email: "user@test.com",
    password: "user123",
    role: Some(Role::Customer),
};

const INVALID_USERS: &[(&str, Credentials)] = &[
    (
        "wrong_password",
        Credentials {
            email: "user@test.com",
            password: "wrongpassword",
            role: None,
        },
    ),
    (
        "wrong_email",
        Credentials {
            email: "nonexistent@test.com",
            password: "user123",
            role: None,
        },
    ),
    (
        "empty_fields",
        Credentials {
            email: "",
            password: "",
            role: None,
        },
    ),
    (
        "invalid_email_format",
        Credentials {
            email: "not-an-email",
            password: "user123",
            role: None,
        },
    ),
    (
        "sql_injection",
        Credentials {
            email: "' OR 1=1 --",
            password: "' OR 1=1 --",
            role: None,
        },
    ),
    (
        "xss_payload",
        Credentials {
            email: "<script>alert(\"xss\")</script>@test.com",
            password: "<script>alert(\"xss\")</script>",
            role: None,
        },
    ),
];

/// Resolve `admin`, `customer` or one of the invalid payload keys
pub fn user(key: &str) -> Result<Credentials> {
    match key {
        "admin" => Ok(ADMIN_USER),
        "customer" => Ok(CUSTOMER_USER),
        _ => INVALID_USERS
            .iter()
            .find(|(name, _)| *name == key)
            .map(|(_, creds)| *creds)
            .ok_or_else(|| Error::unknown_fixture("user", key)),
    }
}
