// style.rs
use ratatui::{
    style::{Color, Modifier, Style},
    text::{Line, Span},
};
use std::borrow::Cow;
use textwrap::core::display_width;

pub fn span_key(s: &'static str) -> Span<'static> {
    Span::styled(s, Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD))
}
pub fn span_sep() -> Span<'static> {
    Span::styled("  |  ", Style::default().fg(Color::DarkGray))
}
pub fn span_text(s: &'static str) -> Span<'static> {
    Span::raw(s)
}

pub fn heading(s: impl Into<Cow<'static, str>>) -> Span<'static> {
    Span::styled(s.into(), Style::default().fg(Color::LightBlue).add_modifier(Modifier::BOLD))
}

pub fn muted(s: impl Into<Cow<'static, str>>) -> Span<'static> {
    Span::styled(s.into(), Style::default().fg(Color::Gray))
}

pub fn error_style() -> Style {
    Style::default().fg(Color::LightRed).add_modifier(Modifier::BOLD)
}

/* ---------- Buttons: blue brackets, red when selected, green when confirmed ---------- */

const ACCENT_BRACKET: Color = Color::Blue;
const SELECTED_TEXT: Color = Color::Red;
const IDLE_TEXT: Color = Color::Blue;
const CONFIRMED_TEXT: Color = Color::Green;

/// Core painter: "< " + LABEL + " >"
pub fn button_spans<S: Into<Cow<'static, str>>>(label: S, selected: bool) -> Vec<Span<'static>> {
    paint_button(label.into(), if selected { SELECTED_TEXT } else { IDLE_TEXT })
}

/// Button after a successful action (e.g. "copied")
pub fn button_spans_confirmed<S: Into<Cow<'static, str>>>(label: S) -> Vec<Span<'static>> {
    paint_button(label.into(), CONFIRMED_TEXT)
}

/// Same look, but visually "disabled"
pub fn button_spans_disabled<S: Into<Cow<'static, str>>>(label: S) -> Vec<Span<'static>> {
    vec![
        Span::styled("< ", Style::default().fg(Color::DarkGray)),
        Span::styled(label.into(), Style::default().fg(Color::Gray)),
        Span::styled(" >", Style::default().fg(Color::DarkGray)),
    ]
}

fn paint_button(label: Cow<'static, str>, fg: Color) -> Vec<Span<'static>> {
    vec![
        Span::styled("< ", Style::default().fg(ACCENT_BRACKET).add_modifier(Modifier::BOLD)),
        Span::styled(label, Style::default().fg(fg).add_modifier(Modifier::BOLD)),
        Span::styled(" >", Style::default().fg(ACCENT_BRACKET).add_modifier(Modifier::BOLD)),
    ]
}

/// Several buttons on one line, three spaces apart.
pub fn buttons_line(buttons: Vec<Vec<Span<'static>>>) -> Line<'static> {
    let mut spans = Vec::new();
    for (i, b) in buttons.into_iter().enumerate() {
        if i > 0 {
            spans.push(Span::raw("   "));
        }
        spans.extend(b);
    }
    Line::from(spans)
}

/// One numbered topic: "▶ 2. topic" when selected, grey when disabled.
/// Long topics wrap to `width`, continuation rows aligned under the text.
pub fn topic_lines(index: usize, topic: &str, selected: bool, enabled: bool, width: usize) -> Vec<Line<'static>> {
    let marker = if selected { "▶ " } else { "  " };
    let style = match (enabled, selected) {
        (false, _) => Style::default().fg(Color::DarkGray),
        (true, true) => Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
        (true, false) => Style::default().fg(Color::White),
    };
    let prefix = format!("{marker}{}. ", index + 1);
    let indent = " ".repeat(display_width(&prefix));
    let opts = textwrap::Options::new(width.max(display_width(&prefix) + 1))
        .initial_indent(&prefix)
        .subsequent_indent(&indent);
    textwrap::wrap(topic, opts)
        .into_iter()
        .map(|row| Line::from(Span::styled(row.into_owned(), style)))
        .collect()
}
