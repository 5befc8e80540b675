/// A key as seen by the input handler.
///
/// Windowing backends translate their own key codes into this; anything the
/// game does not care about becomes `Other`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    /// A printable key, lowercased.
    Char(char),
    Other,
}

impl Key {
    pub fn from_char(c: char) -> Self {
        Self::Char(c.to_ascii_lowercase())
    }

    /// The weapon slot a digit key selects, if any.
    pub fn digit(self) -> Option<u8> {
        match self {
            Self::Char(c) => c.to_digit(10).and_then(|d| u8::try_from(d).ok()),
            Self::Other => None,
        }
    }
}

/// A discrete input event, in surface-local pixel coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    KeyDown(Key),
    PointerMoved { x: f64, y: f64 },
    Resized { width: u32, height: u32 },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_char_lowercases() {
        assert_eq!(Key::from_char('F'), Key::Char('f'));
        assert_eq!(Key::from_char('3'), Key::Char('3'));
    }

    #[test]
    fn digit_keys() {
        assert_eq!(Key::Char('1').digit(), Some(1));
        assert_eq!(Key::Char('0').digit(), Some(0));
        assert_eq!(Key::Char('f').digit(), None);
        assert_eq!(Key::Other.digit(), None);
    }
}
