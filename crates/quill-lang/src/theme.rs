//! Highlighting themes: the category-to-style lookup used when rendering spans.
//!
//! A theme document maps category names to styles; the `text` entry styles uncategorized text
//! and any category the theme leaves out.
//!
//! ```json
//! { "highlighting": { "text": { "color": "#d4d4d4" }, "comment.line": { "color": "#6a9955", "italic": true } } }
//! ```

use quill_grammar::Category;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use thiserror::Error;

/// Key of the default style in a theme document.
pub const TEXT_STYLE_KEY: &str = "text";

/// The theme shipped with the crate.
pub const DEFAULT_THEME_JSON: &str = include_str!("../themes/default.json");

#[derive(Debug, Error)]
/// Errors produced while loading a theme.
pub enum ThemeError {
    #[error("JSON parse error: {0}")]
    /// The document is not valid theme JSON.
    Json(#[from] serde_json::Error),

    #[error("YAML parse error: {0}")]
    /// The document is not valid theme YAML.
    Yaml(#[from] serde_yaml::Error),

    #[error("unknown category '{0}' in theme")]
    /// A style is keyed by something that is neither a category nor `text`.
    UnknownCategory(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
/// Visual attributes of one category. Unset attributes take the defaults (white, no decoration).
pub struct Style {
    /// CSS color value.
    pub color: String,
    /// Bold weight.
    pub bold: bool,
    /// Italic.
    pub italic: bool,
    /// Line-through decoration.
    pub strikethrough: bool,
    /// Underline decoration.
    pub underline: bool,
}

impl Default for Style {
    fn default() -> Self {
        Self {
            color: "#ffffff".to_string(),
            bold: false,
            italic: false,
            strikethrough: false,
            underline: false,
        }
    }
}

impl Style {
    /// CSS declarations for this style, e.g. `color: #fff;font-weight: bold;`.
    pub fn css(&self) -> String {
        let mut css = format!("color: {};", self.color);
        if self.bold {
            css.push_str("font-weight: bold;");
        }
        if self.italic {
            css.push_str("font-style: italic;");
        }
        if self.strikethrough {
            css.push_str("text-decoration: line-through;");
        }
        if self.underline {
            css.push_str("text-decoration: underline;");
        }
        css
    }
}

#[derive(Debug, Deserialize)]
struct ThemeDocument {
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    highlighting: HashMap<String, Style>,
}

#[derive(Debug, Clone, Default, PartialEq)]
/// A resolved theme.
pub struct Theme {
    name: Option<String>,
    text: Style,
    styles: HashMap<Category, Style>,
}

impl Theme {
    /// Parse a JSON theme document.
    pub fn from_json(text: &str) -> Result<Self, ThemeError> {
        Self::from_document(serde_json::from_str(text)?)
    }

    /// Parse a YAML theme document.
    pub fn from_yaml(text: &str) -> Result<Self, ThemeError> {
        Self::from_document(serde_yaml::from_str(text)?)
    }

    /// The theme shipped with the crate.
    pub fn builtin_default() -> Result<Self, ThemeError> {
        Self::from_json(DEFAULT_THEME_JSON)
    }

    fn from_document(document: ThemeDocument) -> Result<Self, ThemeError> {
        let mut theme = Theme {
            name: document.name,
            ..Theme::default()
        };
        for (key, style) in document.highlighting {
            if key == TEXT_STYLE_KEY {
                theme.text = style;
                continue;
            }
            let category = key
                .parse::<Category>()
                .map_err(|_| ThemeError::UnknownCategory(key.clone()))?;
            theme.styles.insert(category, style);
        }
        tracing::debug!(
            theme = theme.name.as_deref().unwrap_or("<unnamed>"),
            styles = theme.styles.len(),
            "loaded theme"
        );
        Ok(theme)
    }

    /// Display name, if the document has one.
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Style of uncategorized text.
    pub fn text_style(&self) -> &Style {
        &self.text
    }

    /// Style for a span category; `None` and categories without an entry use the text style.
    pub fn style_of(&self, category: Option<Category>) -> &Style {
        category
            .and_then(|category| self.styles.get(&category))
            .unwrap_or(&self.text)
    }

    /// Set (or replace) the style of one category.
    pub fn set_style(&mut self, category: Category, style: Style) {
        self.styles.insert(category, style);
    }
}
