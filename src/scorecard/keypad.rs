/// Keypad layout as shown on screen
pub const KEYPAD_ROWS: [[u8; 5]; 2] = [[1, 2, 3, 4, 5], [6, 7, 8, 9, 0]];

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum KeypadError {
    #[error("keypad has no key {0}")]
    InvalidDigit(u8),
}

/// Strokes typed digit by digit on the keypad
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StrokeCounter {
    count: u32,
}

impl StrokeCounter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn count(&self) -> u32 {
        self.count
    }

    /// Append a digit: `count * 10 + digit`.
    ///
    /// A `0` on an empty count is ignored so the count never starts with a
    /// leading zero. There is no upper bound; the value saturates instead of
    /// overflowing.
    pub fn press(&mut self, digit: u8) -> Result<u32, KeypadError> {
        if digit > 9 {
            return Err(KeypadError::InvalidDigit(digit));
        }
        if digit == 0 && self.count == 0 {
            return Ok(0);
        }

        self.count = self
            .count
            .saturating_mul(10)
            .saturating_add(u32::from(digit));
        Ok(self.count)
    }

    pub fn reset(&mut self) {
        self.count = 0;
    }
}
