//! Rendering of received messages.
//!
//! A received message becomes a [`MessageEntry`], a structured value that
//! knows how to draw itself as markup or as terminal text. Sender name and
//! message text are always escaped for the target, so content that looks
//! like markup (or terminal control sequences) is displayed literally.

use murmur_shared::{time::format_local_timestamp, wire::IncomingMessage};

const SEPARATOR: &str = "------------------------------------------------------------";

/// One rendered line of the conversation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MessageEntry {
    pub name: String,
    pub message: String,
    /// Client clock reading when the message was rendered (Unix millis)
    pub received_at: i64,
}

impl MessageEntry {
    pub fn new(incoming: IncomingMessage, received_at: i64) -> Self {
        Self {
            name: incoming.name,
            message: incoming.message,
            received_at,
        }
    }

    pub fn timestamp_text(&self) -> String {
        format_local_timestamp(self.received_at)
    }

    /// Markup fragment for an HTML message list
    pub fn to_html(&self) -> String {
        format!(
            "<div class=\"text\"><span><strong>{}</strong>: {}</span><span class=\"muted\">{}</span></div>",
            escape_html(&self.name),
            escape_html(&self.message),
            escape_html(&self.timestamp_text())
        )
    }

    /// Block printed by the terminal message list
    pub fn to_terminal(&self) -> String {
        format!(
            "\n{}\n{}: {}\n{}\n{}\n",
            SEPARATOR,
            escape_terminal(&self.name),
            escape_terminal(&self.message),
            self.timestamp_text(),
            SEPARATOR
        )
    }
}

/// Escape text for inclusion in HTML element content or attribute values
pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            c => escaped.push(c),
        }
    }
    escaped
}

/// Make control characters visible so they cannot drive the terminal
pub fn escape_terminal(text: &str) -> String {
    text.chars()
        .map(|c| {
            if c.is_control() {
                c.escape_default().to_string()
            } else {
                c.to_string()
            }
        })
        .collect()
}
