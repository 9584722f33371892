use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Margin, Rect},
    prelude::Frame,
    text::Line,
    widgets::{Block, Borders, Clear, Paragraph},
};
use textwrap::core::display_width;

use crate::app::{AppCtx, ScreenWidget, Transition};
use crate::ui::layout::centered_rect_abs;
use crate::ui::style;

const MESSAGE: &str = "Script Cloner를 종료할까요? 작업 내용은 저장되지 않습니다.";
const STAY_LABEL: &str = "계속하기";
const QUIT_LABEL: &str = "종료";

pub struct ConfirmQuitScreen {
    selected: usize, // 0 = stay, 1 = quit
}

impl ConfirmQuitScreen {
    pub fn new() -> Self {
        Self { selected: 0 }
    }
}

impl Default for ConfirmQuitScreen {
    fn default() -> Self { Self::new() }
}

impl ScreenWidget for ConfirmQuitScreen {
    fn title(&self) -> &str {
        "" // continuous top border
    }

    fn draw(&self, f: &mut Frame<'_>, size: Rect, _ctx: &AppCtx) {
        // "< " + label + " >"
        let btn_w = |label: &str| 4 + display_width(label);
        let buttons_w = btn_w(STAY_LABEL) + 3 + btn_w(QUIT_LABEL);

        let inner_width = (display_width(MESSAGE).max(buttons_w) as u16).max(36);
        let area = centered_rect_abs(inner_width + 4, 7, size);
        let inner = area.inner(&Margin { horizontal: 2, vertical: 1 });

        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(1); 4])
            .split(inner);

        let buttons = style::buttons_line(vec![
            style::button_spans(STAY_LABEL, self.selected == 0),
            style::button_spans(QUIT_LABEL, self.selected == 1),
        ]);

        f.render_widget(Clear, area);
        f.render_widget(Block::default().borders(Borders::ALL).title(self.title()), area);
        f.render_widget(Paragraph::new(Line::from(MESSAGE)).alignment(Alignment::Center), rows[1]);
        f.render_widget(Paragraph::new(buttons).alignment(Alignment::Center), rows[3]);
    }

    fn on_key(&mut self, k: KeyEvent, _ctx: &AppCtx) -> Transition {
        match k.code {
            KeyCode::Esc => return Transition::Pop,
            KeyCode::Left | KeyCode::Right | KeyCode::Tab | KeyCode::Char(' ') => {
                self.selected = 1 - self.selected;
            }
            KeyCode::Enter => {
                return if self.selected == 1 { Transition::Quit } else { Transition::Pop };
            }
            _ => {}
        }
        Transition::Stay
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyModifiers;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn defaults_to_staying() {
        let ctx = AppCtx::default();
        let mut s = ConfirmQuitScreen::new();
        assert!(matches!(s.on_key(key(KeyCode::Enter), &ctx), Transition::Pop));
    }

    #[test]
    fn toggling_then_enter_quits() {
        let ctx = AppCtx::default();
        let mut s = ConfirmQuitScreen::new();
        s.on_key(key(KeyCode::Tab), &ctx);
        assert!(matches!(s.on_key(key(KeyCode::Enter), &ctx), Transition::Quit));
        assert!(matches!(s.on_key(key(KeyCode::Esc), &ctx), Transition::Pop));
    }
}
