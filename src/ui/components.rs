use ratatui::{
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders},
};
use std::time::Instant;
use textwrap::core::display_width;

use crate::defaults::Defaults;

/// Multi-line editor buffer. `cursor` is a byte offset kept on a char boundary.
#[derive(Clone, Default)]
pub struct TextArea {
    pub text: String,
    pub cursor: usize,
}

impl TextArea {
    pub fn with(text: &str) -> Self {
        Self { text: text.into(), cursor: text.len() }
    }

    pub fn is_blank(&self) -> bool { self.text.trim().is_empty() }

    pub fn insert_char(&mut self, c: char) {
        self.text.insert(self.cursor, c);
        self.cursor += c.len_utf8();
    }

    pub fn newline(&mut self) { self.insert_char('\n'); }

    /// Insert pasted text, normalising CRLF / CR line endings.
    pub fn insert_str(&mut self, s: &str) {
        let normalized = s.replace("\r\n", "\n").replace('\r', "\n");
        self.text.insert_str(self.cursor, &normalized);
        self.cursor += normalized.len();
    }

    pub fn backspace(&mut self) {
        let prev = self.prev_boundary();
        if prev < self.cursor {
            self.text.replace_range(prev..self.cursor, "");
            self.cursor = prev;
        }
    }

    pub fn delete(&mut self) {
        let next = self.next_boundary();
        if next > self.cursor {
            self.text.replace_range(self.cursor..next, "");
        }
    }

    pub fn move_left(&mut self) { self.cursor = self.prev_boundary(); }
    pub fn move_right(&mut self) { self.cursor = self.next_boundary(); }
    pub fn home(&mut self) { self.cursor = self.line_start(self.cursor); }
    pub fn end(&mut self) { self.cursor = self.line_end(self.cursor); }

    pub fn move_up(&mut self) {
        let start = self.line_start(self.cursor);
        if start == 0 {
            self.cursor = 0;
            return;
        }
        let col = self.text[start..self.cursor].chars().count();
        let prev_start = self.line_start(start - 1);
        self.cursor = self.offset_in_line(prev_start, col);
    }

    pub fn move_down(&mut self) {
        let end = self.line_end(self.cursor);
        if end == self.text.len() {
            self.cursor = end;
            return;
        }
        let col = self.text[self.line_start(self.cursor)..self.cursor].chars().count();
        self.cursor = self.offset_in_line(end + 1, col);
    }

    fn prev_boundary(&self) -> usize {
        self.text[..self.cursor].char_indices().next_back().map(|(i, _)| i).unwrap_or(0)
    }

    fn next_boundary(&self) -> usize {
        self.text[self.cursor..].chars().next().map(|c| self.cursor + c.len_utf8()).unwrap_or(self.cursor)
    }

    fn line_start(&self, at: usize) -> usize {
        self.text[..at].rfind('\n').map(|i| i + 1).unwrap_or(0)
    }

    fn line_end(&self, at: usize) -> usize {
        self.text[at..].find('\n').map(|i| at + i).unwrap_or(self.text.len())
    }

    // Byte offset of char column `col` in the line starting at `start`, clamped to its end.
    fn offset_in_line(&self, start: usize, col: usize) -> usize {
        let end = self.line_end(start);
        self.text[start..end].char_indices().nth(col).map(|(i, _)| start + i).unwrap_or(end)
    }

    /// Hard-wrap to `width` display columns (one column is kept for the cursor).
    /// Returns the rendered rows and the row holding the cursor.
    pub fn render(&self, width: u16, focused: bool) -> (Vec<Line<'static>>, usize) {
        let max = (width as usize).saturating_sub(1).max(1);
        let mut rows: Vec<Line<'static>> = Vec::new();
        let mut cursor_row = 0;
        let mut offset = 0;

        for line in self.text.split('\n') {
            let segments = wrap_segments(line, max);
            let last = segments.len() - 1;
            for (i, (s, e)) in segments.into_iter().enumerate() {
                let (start, end) = (offset + s, offset + e);
                let here = (start..end).contains(&self.cursor) || (i == last && self.cursor == end);
                if focused && here {
                    cursor_row = rows.len();
                    rows.push(cursor_line(&self.text[start..end], self.cursor - start));
                } else {
                    rows.push(Line::from(self.text[start..end].to_string()));
                }
            }
            offset += line.len() + 1;
        }
        (rows, cursor_row)
    }
}

// Byte ranges of `line` that each fit in `max` display columns. Always at least one.
fn wrap_segments(line: &str, max: usize) -> Vec<(usize, usize)> {
    let mut out = Vec::new();
    let (mut start, mut width) = (0, 0);
    let mut buf = [0u8; 4];
    for (i, ch) in line.char_indices() {
        let w = display_width(ch.encode_utf8(&mut buf));
        if width + w > max && i > start {
            out.push((start, i));
            start = i;
            width = 0;
        }
        width += w;
    }
    out.push((start, line.len()));
    out
}

// Block cursor that covers the char under it (no shifting).
fn cursor_line(row: &str, at: usize) -> Line<'static> {
    let block = |s: &str| {
        Span::styled(
            s.to_string(),
            Style::default().fg(Color::Black).bg(Color::Cyan).add_modifier(Modifier::BOLD),
        )
    };
    let (left, rest) = row.split_at(at);
    match rest.chars().next() {
        Some(ch) => Line::from(vec![
            Span::raw(left.to_string()),
            block(&ch.to_string()),
            Span::raw(rest[ch.len_utf8()..].to_string()),
        ]),
        None => Line::from(vec![Span::raw(left.to_string()), block(" ")]),
    }
}

/// Transient "copied" confirmation on the result screen.
#[derive(Debug, Default, Clone, Copy)]
pub struct CopyFlash {
    since: Option<Instant>,
}

impl CopyFlash {
    pub fn trigger(&mut self, now: Instant) { self.since = Some(now); }
    pub fn clear(&mut self) { self.since = None; }

    pub fn is_active(&self, now: Instant) -> bool {
        self.since.is_some_and(|t| now.duration_since(t) < Defaults::COPY_CONFIRM)
    }
}

pub fn draw_frame_title(title: &str) -> Block<'_> {
    Block::default().borders(Borders::ALL).title(title)
}

/// Yellow label line followed by `text` wrapped to `width`.
pub fn labeled_section(label: &str, text: &str, width: usize) -> Vec<Line<'static>> {
    let mut lines = vec![Line::from(Span::styled(
        label.to_string(),
        Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
    ))];
    for seg in textwrap::wrap(text, width.max(1)) {
        lines.push(Line::from(seg.into_owned()));
    }
    lines
}
