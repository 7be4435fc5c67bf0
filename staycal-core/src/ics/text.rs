//! TEXT value checks done before values are handed to the icalendar crate.
//!
//! The crate escapes `\`, `;`, `,` and LF when writing TEXT properties, but
//! leaves CR and other control characters untouched.

use crate::error::{StayCalError, StayCalResult};

/// Prepare a TEXT value for writing.
///
/// CRLF and lone CR become LF so every line break is written as `\n`. Other
/// control characters (except TAB) cannot be represented and are rejected.
pub fn prepare_text(value: &str) -> StayCalResult<String> {
    let mut prepared = String::with_capacity(value.len());
    let mut chars = value.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            '\r' => {
                if chars.peek() == Some(&'\n') {
                    chars.next();
                }
                prepared.push('\n');
            }
            '\n' | '\t' => prepared.push(c),
            c if c < ' ' || c == '\u{7f}' => {
                return Err(StayCalError::Serialization(format!(
                    "control character U+{:04X} cannot be written to a text value",
                    c as u32
                )));
            }
            c => prepared.push(c),
        }
    }

    Ok(prepared)
}

/// Like [`prepare_text`], but blank values are an error too.
pub fn prepare_required_text(field: &str, value: &str) -> StayCalResult<String> {
    if value.trim().is_empty() {
        return Err(StayCalError::Serialization(format!("{field} must not be empty")));
    }
    prepare_text(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn line_breaks_are_normalized_to_lf() {
        assert_eq!(prepare_text("a\nb\r\nc\rd").unwrap(), "a\nb\nc\nd");
        assert_eq!(prepare_text("trailing\r").unwrap(), "trailing\n");
    }

    #[test]
    fn special_characters_pass_through_for_the_writer() {
        assert_eq!(
            prepare_text(r"Smith, John; VIP \ Zoë	Müller").unwrap(),
            r"Smith, John; VIP \ Zoë	Müller"
        );
    }

    #[test]
    fn rejects_other_control_characters() {
        assert!(matches!(
            prepare_text("bell\u{7}"),
            Err(StayCalError::Serialization(_))
        ));
        assert!(prepare_text("nul\u{0}").is_err());
        assert!(prepare_text("del\u{7f}").is_err());
    }

    #[test]
    fn required_text_rejects_blank() {
        assert!(prepare_required_text("SUMMARY", "  ").is_err());
        assert_eq!(prepare_required_text("SUMMARY", "Occupied").unwrap(), "Occupied");
    }
}
