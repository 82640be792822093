//! Declarative element locators rendered to Playwright locator code

use serde::{Deserialize, Serialize};
use std::fmt;

/// Text to match against an accessible name or rendered text
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TextMatch {
    /// Plain string, substring match unless the locator asks for `exact`
    Exact(String),
    /// Regular expression, optionally case-insensitive
    Pattern {
        pattern: String,
        #[serde(default)]
        ignore_case: bool,
    },
}

impl TextMatch {
    pub fn pattern(pattern: impl Into<String>) -> Self {
        TextMatch::Pattern {
            pattern: pattern.into(),
            ignore_case: false,
        }
    }

    pub fn pattern_ci(pattern: impl Into<String>) -> Self {
        TextMatch::Pattern {
            pattern: pattern.into(),
            ignore_case: true,
        }
    }

    /// JavaScript expression for this match
    pub fn to_js(&self) -> String {
        match self {
            TextMatch::Exact(text) => js_string(text),
            TextMatch::Pattern { pattern, ignore_case } => {
                let flags = if *ignore_case { ", 'i'" } else { "" };
                format!("new RegExp({}{})", js_string(pattern), flags)
            }
        }
    }
}

impl From<&str> for TextMatch {
    fn from(text: &str) -> Self {
        TextMatch::Exact(text.to_string())
    }
}

impl From<String> for TextMatch {
    fn from(text: String) -> Self {
        TextMatch::Exact(text)
    }
}

impl fmt::Display for TextMatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TextMatch::Exact(text) => write!(f, "{:?}", text),
            TextMatch::Pattern { pattern, ignore_case } => {
                write!(f, "/{}/{}", pattern, if *ignore_case { "i" } else { "" })
            }
        }
    }
}

/// How to find an element, mirroring Playwright's `getBy*` family
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "by", rename_all = "snake_case")]
pub enum Locator {
    Role {
        role: String,
        #[serde(default)]
        name: Option<TextMatch>,
        #[serde(default)]
        exact: bool,
        #[serde(default)]
        level: Option<u8>,
    },
    Text {
        text: TextMatch,
    },
    Label {
        text: TextMatch,
    },
    Placeholder {
        text: TextMatch,
        #[serde(default)]
        exact: bool,
    },
    TestId {
        id: String,
    },
    Css {
        selector: String,
    },
    /// `child` searched inside `parent`
    Within {
        parent: Box<Locator>,
        child: Box<Locator>,
    },
    Filter {
        base: Box<Locator>,
        has_text: TextMatch,
    },
    /// Index into the matches; negative counts from the end
    Nth {
        base: Box<Locator>,
        index: i32,
    },
}

impl Locator {
    pub fn role(role: &str) -> Self {
        Locator::Role {
            role: role.to_string(),
            name: None,
            exact: false,
            level: None,
        }
    }

    pub fn role_named(role: &str, name: impl Into<TextMatch>) -> Self {
        Self::role(role).named(name)
    }

    pub fn text(text: impl Into<TextMatch>) -> Self {
        Locator::Text { text: text.into() }
    }

    pub fn placeholder(text: impl Into<TextMatch>) -> Self {
        Locator::Placeholder {
            text: text.into(),
            exact: false,
        }
    }

    pub fn test_id(id: &str) -> Self {
        Locator::TestId { id: id.to_string() }
    }

    pub fn css(selector: &str) -> Self {
        Locator::Css {
            selector: selector.to_string(),
        }
    }

    /// Set the accessible name on a role locator; other locators are unchanged
    pub fn named(mut self, accessible_name: impl Into<TextMatch>) -> Self {
        if let Locator::Role { name, .. } = &mut self {
            *name = Some(accessible_name.into());
        }
        self
    }

    /// Whole-string name or placeholder match
    pub fn exact(mut self) -> Self {
        if let Locator::Role { exact, .. } | Locator::Placeholder { exact, .. } = &mut self {
            *exact = true;
        }
        self
    }

    pub fn level(mut self, heading_level: u8) -> Self {
        if let Locator::Role { level, .. } = &mut self {
            *level = Some(heading_level);
        }
        self
    }

    pub fn within(self, parent: Locator) -> Self {
        Locator::Within {
            parent: Box::new(parent),
            child: Box::new(self),
        }
    }

    pub fn has_text(self, text: impl Into<TextMatch>) -> Self {
        Locator::Filter {
            base: Box::new(self),
            has_text: text.into(),
        }
    }

    pub fn nth(self, index: i32) -> Self {
        Locator::Nth {
            base: Box::new(self),
            index,
        }
    }

    pub fn first(self) -> Self {
        self.nth(0)
    }

    pub fn last(self) -> Self {
        self.nth(-1)
    }

    /// Render as a Playwright locator expression rooted at `root`
    pub fn to_js(&self, root: &str) -> String {
        match self {
            Locator::Role { role, name, exact, level } => {
                let mut options = Vec::new();
                if let Some(name) = name {
                    options.push(format!("name: {}", name.to_js()));
                }
                if *exact {
                    options.push("exact: true".to_string());
                }
                if let Some(level) = level {
                    options.push(format!("level: {}", level));
                }
                if options.is_empty() {
                    format!("{}.getByRole({})", root, js_string(role))
                } else {
                    format!("{}.getByRole({}, {{ {} }})", root, js_string(role), options.join(", "))
                }
            }
            Locator::Text { text } => format!("{}.getByText({})", root, text.to_js()),
            Locator::Label { text } => format!("{}.getByLabel({})", root, text.to_js()),
            Locator::Placeholder { text, exact: false } => {
                format!("{}.getByPlaceholder({})", root, text.to_js())
            }
            Locator::Placeholder { text, exact: true } => {
                format!("{}.getByPlaceholder({}, {{ exact: true }})", root, text.to_js())
            }
            Locator::TestId { id } => format!("{}.getByTestId({})", root, js_string(id)),
            Locator::Css { selector } => format!("{}.locator({})", root, js_string(selector)),
            Locator::Within { parent, child } => child.to_js(&parent.to_js(root)),
            Locator::Filter { base, has_text } => {
                format!("{}.filter({{ hasText: {} }})", base.to_js(root), has_text.to_js())
            }
            Locator::Nth { base, index } => match index {
                0 => format!("{}.first()", base.to_js(root)),
                -1 => format!("{}.last()", base.to_js(root)),
                i => format!("{}.nth({})", base.to_js(root), i),
            },
        }
    }
}

impl fmt::Display for Locator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Locator::Role { role, name: Some(name), .. } => write!(f, "{}[{}]", role, name),
            Locator::Role { role, .. } => write!(f, "{}", role),
            Locator::Text { text } => write!(f, "text={}", text),
            Locator::Label { text } => write!(f, "label={}", text),
            Locator::Placeholder { text, .. } => write!(f, "placeholder={}", text),
            Locator::TestId { id } => write!(f, "testid={}", id),
            Locator::Css { selector } => write!(f, "css={}", selector),
            Locator::Within { parent, child } => write!(f, "{} >> {}", parent, child),
            Locator::Filter { base, has_text } => write!(f, "{}:has-text({})", base, has_text),
            Locator::Nth { base, index } => write!(f, "{}[{}]", base, index),
        }
    }
}

/// Quote a string as a JavaScript literal
pub fn js_string(s: &str) -> String {
    serde_json::Value::String(s.to_string()).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_locator_js() {
        let search = Locator::role_named("button", "Search").within(Locator::role("search"));
        assert_eq!(
            search.to_js("page"),
            r#"page.getByRole("search").getByRole("button", { name: "Search" })"#
        );
    }

    #[test]
    fn test_heading_level_and_exact() {
        let heading = Locator::role_named("heading", "Checkout").exact().level(1);
        assert_eq!(
            heading.to_js("page"),
            r#"page.getByRole("heading", { name: "Checkout", exact: true, level: 1 })"#
        );
    }

    #[test]
    fn test_pattern_and_nth() {
        let price = Locator::text(TextMatch::pattern(r"^\$[\d,]+\.\d{2}$")).first();
        assert_eq!(
            price.to_js("card"),
            r#"card.getByText(new RegExp("^\\$[\\d,]+\\.\\d{2}$")).first()"#
        );
        assert_eq!(
            Locator::role("article").last().to_js("page"),
            r#"page.getByRole("article").last()"#
        );
        assert_eq!(
            Locator::role("article").nth(2).to_js("page"),
            r#"page.getByRole("article").nth(2)"#
        );
    }

    #[test]
    fn test_quotes_are_escaped() {
        let monitor = Locator::role("article").has_text("27\" 4K UHD Monitor");
        assert_eq!(
            monitor.to_js("page"),
            r#"page.getByRole("article").filter({ hasText: "27\" 4K UHD Monitor" })"#
        );
    }

    #[test]
    fn test_case_insensitive_pattern() {
        let toast = Locator::text(TextMatch::pattern_ci("invalid credentials"));
        assert_eq!(
            toast.to_js("page"),
            r#"page.getByText(new RegExp("invalid credentials", 'i'))"#
        );
    }

    #[test]
    fn test_placeholder_locator() {
        assert_eq!(
            Locator::placeholder("headphones").to_js("page"),
            r#"page.getByPlaceholder("headphones")"#
        );
        assert_eq!(
            Locator::placeholder("1").exact().first().to_js("page"),
            r#"page.getByPlaceholder("1", { exact: true }).first()"#
        );
    }

    #[test]
    fn test_deserialize_from_yaml() {
        let yaml = r#"
by: role
role: link
name:
  pattern: 'Shopping cart with \d+ items'
"#;
        let locator: Locator = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(
            locator,
            Locator::role_named("link", TextMatch::pattern(r"Shopping cart with \d+ items"))
        );

        let css: Locator = serde_yaml::from_str("by: css\nselector: '#root'").unwrap();
        assert_eq!(css, Locator::css("#root"));
    }

    #[test]
    fn test_display() {
        let link = Locator::role_named("link", "Home").within(Locator::role("navigation"));
        assert_eq!(link.to_string(), r#"navigation >> link["Home"]"#);
    }
}
