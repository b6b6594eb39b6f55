/// A key press, already decoded by the frontend.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Char(char),
    Enter,
    Esc,
    Up,
    Down,
    Tab,
    Backspace,
    CtrlC,
}

impl Key {
    pub(crate) fn is_up(self) -> bool {
        matches!(self, Key::Up | Key::Char('k'))
    }

    pub(crate) fn is_down(self) -> bool {
        matches!(self, Key::Down | Key::Char('j'))
    }

    pub(crate) fn is_select(self) -> bool {
        matches!(self, Key::Enter | Key::Char(' '))
    }

    /// `u`, `b` or `esc`.
    pub(crate) fn is_back(self) -> bool {
        matches!(self, Key::Esc | Key::Char('u') | Key::Char('b'))
    }
}

/// Single-line text field.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TextInput {
    pub text: String,
    pub placeholder: String,
}

impl TextInput {
    pub fn with_placeholder(placeholder: impl Into<String>) -> Self {
        Self {
            text: String::new(),
            placeholder: placeholder.into(),
        }
    }

    /// Apply an editing key. Returns false for keys that do not edit.
    pub fn handle(&mut self, key: Key) -> bool {
        match key {
            Key::Char(c) => {
                self.text.push(c);
                true
            }
            Key::Backspace => {
                self.text.pop();
                true
            }
            _ => false,
        }
    }

    pub fn value(&self) -> &str {
        self.text.trim()
    }

    pub fn is_empty(&self) -> bool {
        self.value().is_empty()
    }

    pub fn clear(&mut self) {
        self.text.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_text_input_editing() {
        let mut input = TextInput::with_placeholder("npub or hex...");
        for c in " ab".chars() {
            assert!(input.handle(Key::Char(c)));
        }
        assert!(input.handle(Key::Backspace));
        assert!(!input.handle(Key::Enter));
        assert_eq!(input.value(), "a");
        input.clear();
        assert!(input.is_empty());
    }
}
