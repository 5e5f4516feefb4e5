//! Local chat composer. Messages are only appended to the page.

use crate::templates;

pub const SENT_CLASS: &str = "message sent";

/// Trimmed message text, or `None` for a blank input.
pub fn compose_message(input: &str) -> Option<String> {
    let text = input.trim();
    (!text.is_empty()).then(|| text.to_owned())
}

pub fn sent_message_html(text: &str) -> String {
    templates::chat_message(text)
}
