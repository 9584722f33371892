use ratatui::{
    text::Line,
    widgets::{Block, Borders, Paragraph, Wrap},
};

use super::style::{span_key, span_sep, span_text};

fn help_bar<'a>(line: Line<'a>) -> Paragraph<'a> {
    Paragraph::new(line).block(Block::default().borders(Borders::ALL)).wrap(Wrap { trim: true })
}

pub fn help_input<'a>() -> Paragraph<'a> {
    help_bar(Line::from(vec![
        span_key("Ctrl+S"), span_text(" Analyze"), span_sep(),
        span_key("Tab"), span_text(" Editor/Button"), span_sep(),
        span_key("Enter"), span_text(" Newline (Analyze on button)"), span_sep(),
        span_key("←/→/↑/↓/Home/End"), span_text(" Cursor"), span_sep(),
        span_key("Ctrl+Q"), span_text(" Quit"),
    ]))
}

pub fn help_analysis<'a>() -> Paragraph<'a> {
    help_bar(Line::from(vec![
        span_key("↑/↓/Tab"), span_text(" Navigate"), span_sep(),
        span_key("1-9"), span_text(" Pick topic"), span_sep(),
        span_key("Enter"), span_text(" Select"), span_sep(),
        span_key("Esc"), span_text(" Start over"), span_sep(),
        span_key("Ctrl+Q"), span_text(" Quit"),
    ]))
}

pub fn help_result<'a>() -> Paragraph<'a> {
    help_bar(Line::from(vec![
        span_key("↑/↓/PgUp/PgDn"), span_text(" Scroll"), span_sep(),
        span_key("←/→/Tab"), span_text(" Buttons"), span_sep(),
        span_key("C"), span_text(" Copy"), span_sep(),
        span_key("Esc"), span_text(" Other topics"), span_sep(),
        span_key("Ctrl+Q"), span_text(" Quit"),
    ]))
}
