use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Ctrl+Q opens the quit prompt from anywhere.
pub fn is_quit_chord(k: &KeyEvent) -> bool {
    k.modifiers.contains(KeyModifiers::CONTROL) && matches!(k.code, KeyCode::Char('q' | 'Q'))
}

/// Ctrl+S submits the script from inside the editor.
pub fn is_submit_chord(k: &KeyEvent) -> bool {
    k.modifiers.contains(KeyModifiers::CONTROL) && matches!(k.code, KeyCode::Char('s' | 'S'))
}

/// Printable key without Ctrl/Alt (Shift is fine).
pub fn typed_char(k: &KeyEvent) -> Option<char> {
    match k.code {
        KeyCode::Char(c) if !k.modifiers.intersects(KeyModifiers::CONTROL | KeyModifiers::ALT) => Some(c),
        _ => None,
    }
}
