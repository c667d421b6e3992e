use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Decode bytes typed into a remote pty into key events. Unknown escape
/// sequences are dropped.
pub fn decode_keys(bytes: &[u8]) -> Vec<KeyEvent> {
    let mut out = Vec::new();
    let mut i = 0;
    while i < bytes.len() {
        let b = bytes[i];
        match b {
            0x1b => {
                let (key, used) = decode_escape(&bytes[i + 1..]);
                if let Some(key) = key {
                    out.push(key);
                }
                i += 1 + used;
                continue;
            }
            b'\r' | b'\n' => out.push(plain(KeyCode::Enter)),
            b'\t' => out.push(plain(KeyCode::Tab)),
            0x7f | 0x08 => out.push(plain(KeyCode::Backspace)),
            0x01..=0x1a => {
                let c = (b - 1 + b'a') as char;
                out.push(KeyEvent::new(KeyCode::Char(c), KeyModifiers::CONTROL));
            }
            0x00..=0x1f => {}
            _ => {
                let len = utf8_len(b);
                if let Some(c) = bytes
                    .get(i..i + len)
                    .and_then(|s| std::str::from_utf8(s).ok())
                    .and_then(|s| s.chars().next())
                {
                    out.push(plain(KeyCode::Char(c)));
                }
                i += len;
                continue;
            }
        }
        i += 1;
    }
    out
}

fn plain(code: KeyCode) -> KeyEvent {
    KeyEvent::new(code, KeyModifiers::NONE)
}

fn utf8_len(first: u8) -> usize {
    match first {
        0xc0..=0xdf => 2,
        0xe0..=0xef => 3,
        0xf0..=0xf7 => 4,
        _ => 1,
    }
}

// `rest` starts right after ESC. Returns the key (if any) and how many bytes
// of `rest` it consumed.
fn decode_escape(rest: &[u8]) -> (Option<KeyEvent>, usize) {
    match rest.first() {
        None | Some(0x1b) => (Some(plain(KeyCode::Esc)), 0),
        Some(b'[') => decode_csi(&rest[1..]),
        Some(b'O') => {
            let key = match rest.get(1) {
                Some(b'A') => KeyCode::Up,
                Some(b'B') => KeyCode::Down,
                Some(b'C') => KeyCode::Right,
                Some(b'D') => KeyCode::Left,
                Some(b'H') => KeyCode::Home,
                Some(b'F') => KeyCode::End,
                Some(_) => return (None, 2),
                None => return (Some(KeyEvent::new(KeyCode::Char('O'), KeyModifiers::ALT)), 1),
            };
            (Some(plain(key)), 2)
        }
        Some(&c) if c.is_ascii_graphic() => (
            Some(KeyEvent::new(KeyCode::Char(c as char), KeyModifiers::ALT)),
            1,
        ),
        Some(_) => (Some(plain(KeyCode::Esc)), 0),
    }
}

// `rest` starts after "ESC [".
fn decode_csi(rest: &[u8]) -> (Option<KeyEvent>, usize) {
    // Parameters and intermediates run until a final byte in 0x40..=0x7e.
    let Some(end) = rest.iter().position(|b| (0x40..=0x7e).contains(b)) else {
        return (None, 1 + rest.len());
    };
    let params = &rest[..end];
    let used = 1 + end + 1;
    let code = match (rest[end], params) {
        (b'A', _) => KeyCode::Up,
        (b'B', _) => KeyCode::Down,
        (b'C', _) => KeyCode::Right,
        (b'D', _) => KeyCode::Left,
        (b'H', _) => KeyCode::Home,
        (b'F', _) => KeyCode::End,
        (b'Z', _) => KeyCode::BackTab,
        (b'~', b"1") | (b'~', b"7") => KeyCode::Home,
        (b'~', b"4") | (b'~', b"8") => KeyCode::End,
        (b'~', b"3") => KeyCode::Delete,
        (b'~', b"5") => KeyCode::PageUp,
        (b'~', b"6") => KeyCode::PageDown,
        _ => return (None, used),
    };
    (Some(plain(code)), used)
}

#[cfg(test)]
#[path = "../tests/tui_shell/keys_tests.rs"]
mod tests;
