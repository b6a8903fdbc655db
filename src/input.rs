use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Character to append to a text field, if `key` is plain typing.
/// Control and Alt chords are commands, not text.
pub fn typed_char(key: &KeyEvent) -> Option<char> {
    if key
        .modifiers
        .intersects(KeyModifiers::CONTROL | KeyModifiers::ALT)
    {
        return None;
    }
    match key.code {
        KeyCode::Char(ch) => Some(ch),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_and_shifted_chars_are_typed() {
        assert_eq!(
            typed_char(&KeyEvent::new(KeyCode::Char('a'), KeyModifiers::NONE)),
            Some('a')
        );
        assert_eq!(
            typed_char(&KeyEvent::new(KeyCode::Char('A'), KeyModifiers::SHIFT)),
            Some('A')
        );
    }

    #[test]
    fn chords_are_not_typed() {
        assert_eq!(
            typed_char(&KeyEvent::new(KeyCode::Char('x'), KeyModifiers::ALT)),
            None
        );
        assert_eq!(
            typed_char(&KeyEvent::new(KeyCode::Char('u'), KeyModifiers::CONTROL)),
            None
        );
        assert_eq!(
            typed_char(&KeyEvent::new(KeyCode::Enter, KeyModifiers::NONE)),
            None
        );
    }
}
