//! Widget configuration read from the host page.
//!
//! The host may embed a JSON block
//! `<script type="application/json" id="chat-widget-config">` with any of the
//! [`WidgetConfig`] fields; missing fields take their defaults. Without the
//! block the widget talks to `/history` and `/chat` and renders the
//! `chat-form`, `user-input` and `chat-messages` element ids.

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

use serde::Deserialize;

/// Element id of the optional JSON config block in the host page.
pub const CONFIG_ELEMENT_ID: &str = "chat-widget-config";

pub const DEFAULT_HISTORY_URL: &str = "/history";
pub const DEFAULT_CHAT_URL: &str = "/chat";
pub const DEFAULT_APOLOGY: &str = "Sorry, an error occurred. Please try again.";

/// Error returned by [`WidgetConfig::from_json`].
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid widget config: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("widget config field `{0}` must not be empty")]
    Empty(&'static str),
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct WidgetConfig {
    pub history_url: String,
    pub chat_url: String,
    /// Assistant bubble shown when a chat request fails.
    pub apology: String,
    /// Entity-escape assistant text before markdown conversion.
    pub escape_html: bool,
    pub form_id: String,
    pub input_id: String,
    pub messages_id: String,
}

impl Default for WidgetConfig {
    fn default() -> Self {
        Self {
            history_url: DEFAULT_HISTORY_URL.to_owned(),
            chat_url: DEFAULT_CHAT_URL.to_owned(),
            apology: DEFAULT_APOLOGY.to_owned(),
            escape_html: false,
            form_id: "chat-form".to_owned(),
            input_id: "user-input".to_owned(),
            messages_id: "chat-messages".to_owned(),
        }
    }
}

impl WidgetConfig {
    /// Parse a config block.
    ///
    /// # Errors
    ///
    /// Returns an error for malformed JSON, unknown fields, or empty
    /// endpoint URLs.
    pub fn from_json(raw: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(raw)?;
        if config.history_url.trim().is_empty() {
            return Err(ConfigError::Empty("history_url"));
        }
        if config.chat_url.trim().is_empty() {
            return Err(ConfigError::Empty("chat_url"));
        }
        Ok(config)
    }

    /// Resolve config from an optional raw block, falling back to defaults
    /// when the block is absent, blank, or invalid.
    pub fn resolve(raw: Option<&str>) -> Self {
        let Some(raw) = raw.map(str::trim).filter(|r| !r.is_empty()) else {
            return Self::default();
        };
        match Self::from_json(raw) {
            Ok(config) => config,
            Err(e) => {
                log::warn!("{e}; using default widget config");
                Self::default()
            }
        }
    }

    /// Read the config block from the current document.
    pub fn from_host_page() -> Self {
        #[cfg(feature = "csr")]
        {
            let raw = web_sys::window()
                .and_then(|w| w.document())
                .and_then(|doc| doc.get_element_by_id(CONFIG_ELEMENT_ID))
                .and_then(|el| el.text_content());
            Self::resolve(raw.as_deref())
        }
        #[cfg(not(feature = "csr"))]
        {
            Self::default()
        }
    }

    pub fn converter(&self) -> markdown_lite::Converter {
        markdown_lite::Converter::with_escaping(self.escape_html)
    }
}
