//! Text drawing with the standard Type1 Helvetica font

use crate::constants::{BASE_FONT, FONT_RESOURCE_NAME, HELVETICA_CHAR_WIDTH_RATIO};
use lopdf::{Dictionary, Object};

/// Font dictionary for the built-in font, shared by every page
pub fn font_dictionary() -> Dictionary {
    let mut font_dict = Dictionary::new();
    font_dict.set("Type", Object::Name(b"Font".to_vec()));
    font_dict.set("Subtype", Object::Name(b"Type1".to_vec()));
    font_dict.set("BaseFont", Object::Name(BASE_FONT.as_bytes().to_vec()));
    font_dict.set("Encoding", Object::Name(b"WinAnsiEncoding".to_vec()));
    font_dict
}

/// Escape text for a PDF literal string.
///
/// Characters outside printable ASCII become `?`.
pub fn escape_text(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '(' | ')' | '\\' => {
                escaped.push('\\');
                escaped.push(ch);
            }
            ' '..='~' => escaped.push(ch),
            _ => escaped.push('?'),
        }
    }
    escaped
}

/// Approximate rendered width of `text` at `font_size`
pub fn text_width(text: &str, font_size: f32) -> f32 {
    text.chars().count() as f32 * font_size * HELVETICA_CHAR_WIDTH_RATIO
}

/// Shorten `text` with a trailing ellipsis until it fits in `max_width`
pub fn truncate_to_width(text: &str, font_size: f32, max_width: f32) -> String {
    if text_width(text, font_size) <= max_width {
        return text.to_string();
    }

    let mut chars: Vec<char> = text.chars().collect();
    while !chars.is_empty() {
        chars.pop();
        let candidate: String = chars.iter().collect::<String>() + "...";
        if text_width(&candidate, font_size) <= max_width {
            return candidate;
        }
    }
    String::new()
}

/// Content stream operators drawing `text` with its baseline starting at (x, y)
pub fn text_op(x: f32, y: f32, font_size: f32, text: &str) -> String {
    format!(
        "BT /{} {} Tf {:.2} {:.2} Td ({}) Tj ET\n",
        FONT_RESOURCE_NAME,
        font_size,
        x,
        y,
        escape_text(text)
    )
}

/// Text horizontally centered on `center_x`
pub fn centered_text_op(center_x: f32, y: f32, font_size: f32, text: &str) -> String {
    text_op(center_x - text_width(text, font_size) / 2.0, y, font_size, text)
}

/// Text ending at `right_x`
pub fn right_aligned_text_op(right_x: f32, y: f32, font_size: f32, text: &str) -> String {
    text_op(right_x - text_width(text, font_size), y, font_size, text)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_text() {
        assert_eq!(escape_text("plain"), "plain");
        assert_eq!(escape_text("a (b) c\\d"), "a \\(b\\) c\\\\d");
        assert_eq!(escape_text("café"), "caf?");
        assert_eq!(escape_text("tab\there"), "tab?here");
    }

    #[test]
    fn test_text_width() {
        assert_eq!(text_width("", 10.0), 0.0);
        assert_eq!(text_width("abcd", 10.0), 20.0);
    }

    #[test]
    fn test_truncate_to_width() {
        assert_eq!(truncate_to_width("short", 10.0, 100.0), "short");
        // 10 chars fit at size 10 in 50pt
        let truncated = truncate_to_width("a_very_long_file_name", 10.0, 50.0);
        assert_eq!(truncated, "a_very_...");
        assert_eq!(truncate_to_width("abc", 10.0, 1.0), "");
    }

    #[test]
    fn test_text_ops() {
        assert_eq!(
            text_op(10.0, 20.0, 9.0, "Hi"),
            "BT /F1 9 Tf 10.00 20.00 Td (Hi) Tj ET\n"
        );
        // width of "Hi" at 10pt is 10
        assert_eq!(
            centered_text_op(100.0, 0.0, 10.0, "Hi"),
            "BT /F1 10 Tf 95.00 0.00 Td (Hi) Tj ET\n"
        );
        assert_eq!(
            right_aligned_text_op(100.0, 0.0, 10.0, "Hi"),
            "BT /F1 10 Tf 90.00 0.00 Td (Hi) Tj ET\n"
        );
    }
}
