//! HTML rendering
//!
//! Views are plain functions from data to a `String`. Every piece of
//! user-supplied text passes through [`escape_html`] before it is embedded.

pub mod alerts;
pub mod analytics;
pub mod components;
pub mod dashboard;
pub mod layout;
pub mod upload;

/// Escape text for use in element content and quoted attributes
#[must_use]
pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

/// Tone of a transient notification
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationKind {
    /// Action succeeded
    Success,
    /// Action failed
    Error,
}

/// Message shown once at the top of a page
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    /// Tone
    pub kind: NotificationKind,
    /// Text, unescaped
    pub message: String,
}

impl Notification {
    /// Success message
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            kind: NotificationKind::Success,
            message: message.into(),
        }
    }

    /// Error message
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            kind: NotificationKind::Error,
            message: message.into(),
        }
    }

    /// Render as a banner
    #[must_use]
    pub fn render(&self) -> String {
        let class = match self.kind {
            NotificationKind::Success => "notification success",
            NotificationKind::Error => "notification error",
        };
        format!(
            r#"<div class="{class}" role="status">{}</div>"#,
            escape_html(&self.message)
        )
    }
}
