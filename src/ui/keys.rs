//! Key encoding for pager input
//!
//! Converts key events to VT sequences for the pager's pseudo-terminal.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Key encoder for converting key events to bytes
pub struct KeyEncoder;

impl KeyEncoder {
    /// Encode a crossterm KeyEvent as bytes for the child's terminal.
    ///
    /// Returns an empty vector for events with no byte representation.
    pub fn encode(event: &KeyEvent) -> Vec<u8> {
        let mods = event.modifiers;

        match event.code {
            KeyCode::Char(ch) => Self::encode_char(ch, mods),

            KeyCode::Enter => vec![0x0D],

            KeyCode::Backspace => {
                if mods.contains(KeyModifiers::ALT) {
                    vec![0x1B, 0x7F]
                } else {
                    vec![0x7F]
                }
            }

            KeyCode::Tab => {
                if mods.contains(KeyModifiers::SHIFT) {
                    b"\x1b[Z".to_vec()
                } else {
                    vec![0x09]
                }
            }

            KeyCode::Esc => vec![0x1B],

            KeyCode::Up => Self::arrow_key(b'A', mods),
            KeyCode::Down => Self::arrow_key(b'B', mods),
            KeyCode::Right => Self::arrow_key(b'C', mods),
            KeyCode::Left => Self::arrow_key(b'D', mods),

            KeyCode::Home => Self::special_key(b'H', mods),
            KeyCode::End => Self::special_key(b'F', mods),
            KeyCode::PageUp => Self::tilde_key(5, mods),
            KeyCode::PageDown => Self::tilde_key(6, mods),
            KeyCode::Insert => Self::tilde_key(2, mods),
            KeyCode::Delete => Self::tilde_key(3, mods),

            _ => vec![],
        }
    }

    /// Encode a character with modifiers
    fn encode_char(ch: char, mods: KeyModifiers) -> Vec<u8> {
        // Ctrl + letter = control character
        if mods.contains(KeyModifiers::CONTROL) && !mods.contains(KeyModifiers::ALT) {
            if ch.is_ascii_lowercase() {
                return vec![(ch as u8) - b'a' + 1];
            } else if ch.is_ascii_uppercase() {
                return vec![(ch as u8) - b'A' + 1];
            } else {
                match ch {
                    '@' | '`' | ' ' => return vec![0x00],
                    '[' => return vec![0x1B],
                    '\\' => return vec![0x1C],
                    ']' => return vec![0x1D],
                    '^' | '~' => return vec![0x1E],
                    '_' | '?' => return vec![0x1F],
                    _ => {}
                }
            }
        }

        // Alt + key = ESC + key
        if mods.contains(KeyModifiers::ALT) && !mods.contains(KeyModifiers::CONTROL) {
            let mut bytes = vec![0x1B];
            bytes.extend(ch.to_string().as_bytes());
            return bytes;
        }

        ch.to_string().into_bytes()
    }

    /// Arrow key sequence
    fn arrow_key(key: u8, mods: KeyModifiers) -> Vec<u8> {
        if mods.is_empty() {
            vec![0x1B, b'[', key]
        } else {
            let mod_code = Self::modifier_code(mods);
            format!("\x1b[1;{}{}", mod_code, key as char).into_bytes()
        }
    }

    /// Special key (Home, End) sequence
    fn special_key(key: u8, mods: KeyModifiers) -> Vec<u8> {
        if mods.is_empty() {
            vec![0x1B, b'[', key]
        } else {
            let mod_code = Self::modifier_code(mods);
            format!("\x1b[1;{}{}", mod_code, key as char).into_bytes()
        }
    }

    /// Tilde key sequence (PageUp, PageDown, Insert, Delete)
    fn tilde_key(code: u8, mods: KeyModifiers) -> Vec<u8> {
        if mods.is_empty() {
            format!("\x1b[{}~", code).into_bytes()
        } else {
            let mod_code = Self::modifier_code(mods);
            format!("\x1b[{};{}~", code, mod_code).into_bytes()
        }
    }

    /// Calculate xterm modifier code
    fn modifier_code(mods: KeyModifiers) -> u8 {
        1 + if mods.contains(KeyModifiers::SHIFT) { 1 } else { 0 }
            + if mods.contains(KeyModifiers::ALT) { 2 } else { 0 }
            + if mods.contains(KeyModifiers::CONTROL) { 4 } else { 0 }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key_event(code: KeyCode, mods: KeyModifiers) -> KeyEvent {
        KeyEvent::new(code, mods)
    }

    #[test]
    fn test_char_keys() {
        // Normal character
        let event = key_event(KeyCode::Char('a'), KeyModifiers::NONE);
        assert_eq!(KeyEncoder::encode(&event), b"a".to_vec());

        // Ctrl+C
        let event = key_event(KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert_eq!(KeyEncoder::encode(&event), vec![0x03]);

        // Alt+x
        let event = key_event(KeyCode::Char('x'), KeyModifiers::ALT);
        assert_eq!(KeyEncoder::encode(&event), vec![0x1B, b'x']);
    }

    #[test]
    fn test_arrow_keys() {
        let event = key_event(KeyCode::Up, KeyModifiers::NONE);
        assert_eq!(KeyEncoder::encode(&event), b"\x1b[A".to_vec());

        let event = key_event(KeyCode::Up, KeyModifiers::CONTROL);
        assert_eq!(KeyEncoder::encode(&event), b"\x1b[1;5A".to_vec());
    }

    #[test]
    fn test_paging_keys() {
        let event = key_event(KeyCode::PageUp, KeyModifiers::NONE);
        assert_eq!(KeyEncoder::encode(&event), b"\x1b[5~".to_vec());

        let event = key_event(KeyCode::PageDown, KeyModifiers::NONE);
        assert_eq!(KeyEncoder::encode(&event), b"\x1b[6~".to_vec());

        let event = key_event(KeyCode::End, KeyModifiers::NONE);
        assert_eq!(KeyEncoder::encode(&event), b"\x1b[F".to_vec());
    }

    #[test]
    fn test_enter_and_escape() {
        let event = key_event(KeyCode::Enter, KeyModifiers::NONE);
        assert_eq!(KeyEncoder::encode(&event), vec![0x0D]);

        let event = key_event(KeyCode::Esc, KeyModifiers::NONE);
        assert_eq!(KeyEncoder::encode(&event), vec![0x1B]);
    }
}
