//! Six-box one-time code input.

use serde::{Deserialize, Serialize};

/// Number of digits in a one-time code
pub const OTP_LENGTH: usize = 6;

/// What a one-time code authorizes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum OtpPurpose {
    RegisterVerify,
    PasswordReset,
}

/// State of the six single-digit boxes plus which box has focus
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OtpInput {
    digits: [Option<char>; OTP_LENGTH],
    focus: usize,
}

impl OtpInput {
    pub fn new() -> Self {
        Self::default()
    }

    /// Index of the focused box
    pub fn focus(&self) -> usize {
        self.focus
    }

    pub fn digit(&self, index: usize) -> Option<char> {
        self.digits.get(index).copied().flatten()
    }

    /// Type a character into box `index`.
    ///
    /// Digits fill the box and move focus to the next one; anything else is
    /// ignored. Returns whether the box changed.
    pub fn type_char(&mut self, index: usize, value: char) -> bool {
        if index >= OTP_LENGTH || !value.is_ascii_digit() {
            return false;
        }
        self.digits[index] = Some(value);
        self.focus = (index + 1).min(OTP_LENGTH - 1);
        true
    }

    /// Backspace in box `index`: clears a filled box, or moves focus back
    /// from an empty one.
    pub fn backspace(&mut self, index: usize) {
        if index >= OTP_LENGTH {
            return;
        }
        if self.digits[index].is_some() {
            self.digits[index] = None;
            self.focus = index;
        } else if index > 0 {
            self.focus = index - 1;
        }
    }

    /// Paste a code. Digit-only text fills boxes from the first one and
    /// clears the rest; any other content leaves every box untouched.
    pub fn paste(&mut self, text: &str) -> bool {
        if text.is_empty() || !text.chars().all(|c| c.is_ascii_digit()) {
            return false;
        }

        let pasted: Vec<char> = text.chars().take(OTP_LENGTH).collect();
        for (index, slot) in self.digits.iter_mut().enumerate() {
            *slot = pasted.get(index).copied();
        }
        self.focus = pasted.len() - 1;
        true
    }

    pub fn filled_count(&self) -> usize {
        self.digits.iter().filter(|d| d.is_some()).count()
    }

    pub fn is_complete(&self) -> bool {
        self.filled_count() == OTP_LENGTH
    }

    /// The full code, only when all six boxes are filled
    pub fn code(&self) -> Option<String> {
        if self.is_complete() {
            Some(self.digits.iter().flatten().collect())
        } else {
            None
        }
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_typing_advances_focus() {
        let mut otp = OtpInput::new();
        assert!(otp.type_char(0, '4'));
        assert_eq!(otp.focus(), 1);
        assert!(!otp.type_char(1, 'a'));
        assert_eq!(otp.digit(1), None);
        assert_eq!(otp.focus(), 1);

        otp.type_char(5, '9');
        assert_eq!(otp.focus(), 5);
    }

    #[test]
    fn test_backspace() {
        let mut otp = OtpInput::new();
        otp.type_char(0, '1');
        otp.type_char(1, '2');

        // Box 2 is empty: focus moves back
        otp.backspace(2);
        assert_eq!(otp.focus(), 1);

        // Box 1 is filled: it is cleared in place
        otp.backspace(1);
        assert_eq!(otp.digit(1), None);
        assert_eq!(otp.focus(), 1);

        otp.backspace(0);
        otp.backspace(0);
        assert_eq!(otp.focus(), 0);
        assert_eq!(otp.filled_count(), 0);
    }

    #[test]
    fn test_paste_fills_exactly_l_boxes() {
        for len in 1..=OTP_LENGTH {
            let mut otp = OtpInput::new();
            otp.type_char(5, '7');
            let text: String = "123456".chars().take(len).collect();
            assert!(otp.paste(&text));
            assert_eq!(otp.filled_count(), len);
            for index in 0..OTP_LENGTH {
                assert_eq!(otp.digit(index).is_some(), index < len);
            }
            assert_eq!(otp.focus(), len - 1);
        }
    }

    #[test]
    fn test_long_paste_focuses_last_box() {
        let mut otp = OtpInput::new();
        assert!(otp.paste("12345678"));
        assert_eq!(otp.code().as_deref(), Some("123456"));
        assert_eq!(otp.focus(), OTP_LENGTH - 1);
    }

    #[test]
    fn test_non_digit_paste_is_ignored() {
        let mut otp = OtpInput::new();
        otp.paste("123");
        let before = otp.clone();

        assert!(!otp.paste("12a456"));
        assert!(!otp.paste(""));
        assert!(!otp.paste("code: 123456"));
        assert_eq!(otp, before);
    }

    #[test]
    fn test_whitespace_around_digits_is_not_a_code() {
        let mut otp = OtpInput::new();
        otp.paste("98");
        let before = otp.clone();

        assert!(!otp.paste(" 123456 "));
        assert!(!otp.paste("123456\n"));
        assert!(!otp.paste("123 456"));
        assert!(!otp.paste("١٢٣٤٥٦"));
        assert_eq!(otp, before);
    }

    #[test]
    fn test_code_requires_six_digits() {
        let mut otp = OtpInput::new();
        otp.paste("12345");
        assert_eq!(otp.code(), None);
        otp.type_char(5, '6');
        assert_eq!(otp.code().as_deref(), Some("123456"));
        otp.clear();
        assert_eq!(otp.filled_count(), 0);
    }
}
