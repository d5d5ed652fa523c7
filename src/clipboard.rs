//! Colour exchange through the system clipboard

use crate::color::Color;
use thiserror::Error;
use tracing::warn;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ClipboardError {
    #[error("clipboard unavailable: {0}")]
    Unavailable(String),
    #[error("clipboard does not hold a colour")]
    NoColor,
}

/// A colour travelling through the clipboard, with an optional display name
#[derive(Debug, Clone, PartialEq)]
pub struct NamedColor {
    pub color: Color,
    pub name: Option<String>,
}

/// Anything that can hand out and accept a single colour
pub trait ColorClipboard {
    fn get_color(&mut self) -> Result<NamedColor, ClipboardError>;

    /// `text` is the already formatted representation of `color`
    fn set_color(&mut self, color: Color, text: &str) -> Result<(), ClipboardError>;

    fn has_color(&mut self) -> bool {
        self.get_color().is_ok()
    }
}

/// Parse clipboard text: a colour, optionally followed by a name
///
/// `#ff0000 Red` yields the colour with name `Red`.
pub fn parse_clipboard_text(text: &str) -> Option<NamedColor> {
    let text = text.trim();
    if let Some(color) = Color::parse(text) {
        return Some(NamedColor { color, name: None });
    }
    let (head, tail) = text.split_once(char::is_whitespace)?;
    let color = Color::parse(head)?;
    let name = tail.trim();
    Some(NamedColor {
        color,
        name: (!name.is_empty()).then(|| name.to_string()),
    })
}

/// System clipboard backed by arboard
#[derive(Debug, Default)]
pub struct SystemClipboard;

impl SystemClipboard {
    fn open() -> Result<arboard::Clipboard, ClipboardError> {
        arboard::Clipboard::new().map_err(|e| {
            warn!(error = %e, "clipboard unavailable");
            ClipboardError::Unavailable(e.to_string())
        })
    }
}

impl ColorClipboard for SystemClipboard {
    fn get_color(&mut self) -> Result<NamedColor, ClipboardError> {
        let text = Self::open()?.get_text().map_err(read_error)?;
        parse_clipboard_text(&text).ok_or(ClipboardError::NoColor)
    }

    fn set_color(&mut self, _color: Color, text: &str) -> Result<(), ClipboardError> {
        Self::open()?.set_text(text).map_err(|e| {
            warn!(error = %e, "failed to write clipboard");
            ClipboardError::Unavailable(e.to_string())
        })
    }
}

/// Empty or non-text content means no colour; anything else is unavailability
fn read_error(e: arboard::Error) -> ClipboardError {
    match e {
        arboard::Error::ContentNotAvailable => ClipboardError::NoColor,
        e => {
            warn!(error = %e, "failed to read clipboard");
            ClipboardError::Unavailable(e.to_string())
        }
    }
}


#[cfg(test)]
mod tests {
    use super::testing::MemoryClipboard;
    use super::*;

    #[test]
    fn test_parse_plain_colour() {
        let parsed = parse_clipboard_text("  #00ff00\n").unwrap();
        assert_eq!(parsed.color, Color::from_rgb8(0, 255, 0));
        assert_eq!(parsed.name, None);
    }

    #[test]
    fn test_parse_colour_with_name() {
        let parsed = parse_clipboard_text("#ff0000 Fire Engine").unwrap();
        assert_eq!(parsed.color, Color::from_rgb8(255, 0, 0));
        assert_eq!(parsed.name.as_deref(), Some("Fire Engine"));
    }

    #[test]
    fn test_parse_rejects_text() {
        assert_eq!(parse_clipboard_text("hello world"), None);
        assert_eq!(parse_clipboard_text(""), None);
    }

    #[test]
    fn test_memory_clipboard_roundtrip() {
        let mut clipboard = MemoryClipboard::default();
        assert!(!clipboard.has_color());
        clipboard.set_color(Color::WHITE, "#ffffff").unwrap();
        assert_eq!(clipboard.get_color().unwrap().color, Color::WHITE);
    }

    #[test]
    fn test_read_error_mapping() {
        assert_eq!(
            read_error(arboard::Error::ContentNotAvailable),
            ClipboardError::NoColor
        );
        assert!(matches!(
            read_error(arboard::Error::ClipboardOccupied),
            ClipboardError::Unavailable(_)
        ));
        assert!(matches!(
            read_error(arboard::Error::ClipboardNotSupported),
            ClipboardError::Unavailable(_)
        ));
    }
}
