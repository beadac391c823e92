use serde::{Deserialize, Serialize};

/// One run of styled text as the store returns it.
///
/// Only the fields a renderer needs are kept; mention and equation payloads
/// are represented by their `plain_text` and `kind`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RichText {
    #[serde(rename = "type", default = "default_kind")]
    pub kind: String,
    #[serde(default)]
    pub plain_text: String,
    #[serde(default)]
    pub href: Option<String>,
    #[serde(default)]
    pub annotations: Annotations,
}

fn default_kind() -> String {
    "text".to_string()
}

impl RichText {
    /// Unstyled text run, mostly useful for building fixtures.
    pub fn plain(text: impl Into<String>) -> Self {
        Self {
            kind: default_kind(),
            plain_text: text.into(),
            href: None,
            annotations: Annotations::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Annotations {
    #[serde(default)]
    pub bold: bool,
    #[serde(default)]
    pub italic: bool,
    #[serde(default)]
    pub strikethrough: bool,
    #[serde(default)]
    pub underline: bool,
    #[serde(default)]
    pub code: bool,
    #[serde(default = "default_color")]
    pub color: String,
}

impl Default for Annotations {
    fn default() -> Self {
        Self {
            bold: false,
            italic: false,
            strikethrough: false,
            underline: false,
            code: false,
            color: default_color(),
        }
    }
}

pub(crate) fn default_color() -> String {
    "default".to_string()
}

/// Concatenates the plain text of every run.
pub fn plain_text(items: &[RichText]) -> String {
    items.iter().map(|item| item.plain_text.as_str()).collect()
}
