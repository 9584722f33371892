use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    prelude::Frame,
    text::Line,
    widgets::{Block, Borders, Paragraph, Wrap},
};

use crate::app::{AppCtx, Intent, ScreenWidget, Transition};
use crate::ui::common_nav::{is_submit_chord, typed_char};
use crate::ui::components::{draw_frame_title, TextArea};
use crate::ui::help::help_input;
use crate::ui::layout::three_box_layout;
use crate::ui::style::{button_spans, button_spans_disabled, heading, muted};

const SUBMIT_LABEL: &str = "대본 분석하고 주제 추천받기";
const LOADING_LABEL: &str = "분석 중...";

#[derive(Clone, Copy, PartialEq, Eq)]
enum Focus {
    Editor,
    Submit,
}

pub struct InputScreen {
    editor: TextArea,
    focus: Focus,
}

impl InputScreen {
    pub fn new(script: &str) -> Self {
        Self { editor: TextArea::with(script), focus: Focus::Editor }
    }

    fn submit_enabled(&self, ctx: &AppCtx) -> bool {
        !self.editor.is_blank() && !ctx.state.is_loading
    }

    fn edited(&self) -> Transition {
        Transition::Intent(Intent::EditScript(self.editor.text.clone()))
    }
}

impl ScreenWidget for InputScreen {
    fn title(&self) -> &str { "대본" }

    fn draw(&self, f: &mut Frame<'_>, size: Rect, ctx: &AppCtx) {
        let regions = three_box_layout(size, 6, 8);

        f.render_widget(Block::default().borders(Borders::ALL), regions.top);
        let header = vec![
            Line::from(heading("당신의 성공 공식을 복제하세요")),
            Line::from(muted(
                "기존에 반응이 좋았던 대본을 붙여넣으세요. AI가 구조와 톤을 분석하여 새로운 대본을 만들어드립니다.",
            )),
        ];
        f.render_widget(
            Paragraph::new(header).alignment(Alignment::Center).wrap(Wrap { trim: true }),
            regions.top_inner,
        );

        let middle = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(3), Constraint::Length(1)])
            .split(regions.middle_inner);

        let editor_block = draw_frame_title(self.title());
        let editor_inner = editor_block.inner(middle[0]);
        let focused = self.focus == Focus::Editor && !ctx.state.is_loading;
        let (mut rows, cursor_row) = self.editor.render(editor_inner.width, focused);
        if self.editor.text.is_empty() && !focused {
            rows = vec![Line::from(muted("여기에 대본을 붙여넣으세요... (예: 오프닝 멘트부터 클로징까지)"))];
        }
        // keep the cursor row in view
        let scroll = (cursor_row as u16).saturating_sub(editor_inner.height.saturating_sub(1));
        f.render_widget(Block::default().borders(Borders::ALL), regions.middle);
        f.render_widget(Paragraph::new(rows).block(editor_block).scroll((scroll, 0)), middle[0]);

        let button = if ctx.state.is_loading {
            button_spans_disabled(LOADING_LABEL)
        } else if self.submit_enabled(ctx) {
            button_spans(SUBMIT_LABEL, self.focus == Focus::Submit)
        } else {
            button_spans_disabled(SUBMIT_LABEL)
        };
        f.render_widget(Paragraph::new(Line::from(button)).alignment(Alignment::Center), middle[1]);

        f.render_widget(help_input(), regions.bottom);
    }

    fn on_key(&mut self, k: KeyEvent, ctx: &AppCtx) -> Transition {
        // Ctrl+S bypasses the button so a blank submit still reports why.
        if is_submit_chord(&k) {
            if ctx.state.is_loading {
                return Transition::Stay;
            }
            return Transition::Intent(Intent::SubmitScript(self.editor.text.clone()));
        }

        match k.code {
            KeyCode::Tab | KeyCode::BackTab => {
                self.focus = match self.focus {
                    Focus::Editor => Focus::Submit,
                    Focus::Submit => Focus::Editor,
                };
                return Transition::Stay;
            }
            KeyCode::Enter if self.focus == Focus::Submit => {
                if self.submit_enabled(ctx) {
                    return Transition::Intent(Intent::SubmitScript(self.editor.text.clone()));
                }
                return Transition::Stay;
            }
            _ => {}
        }

        if self.focus != Focus::Editor || ctx.state.is_loading {
            return Transition::Stay;
        }

        match k.code {
            // Cursor movement
            KeyCode::Left => self.editor.move_left(),
            KeyCode::Right => self.editor.move_right(),
            KeyCode::Up => self.editor.move_up(),
            KeyCode::Down => self.editor.move_down(),
            KeyCode::Home => self.editor.home(),
            KeyCode::End => self.editor.end(),

            // Editing
            KeyCode::Enter => {
                self.editor.newline();
                return self.edited();
            }
            KeyCode::Backspace => {
                self.editor.backspace();
                return self.edited();
            }
            KeyCode::Delete => {
                self.editor.delete();
                return self.edited();
            }
            _ => {
                if let Some(c) = typed_char(&k) {
                    self.editor.insert_char(c);
                    return self.edited();
                }
            }
        }
        Transition::Stay
    }

    fn on_paste(&mut self, text: &str, ctx: &AppCtx) -> Transition {
        if ctx.state.is_loading {
            return Transition::Stay;
        }
        self.editor.insert_str(text);
        self.focus = Focus::Editor;
        self.edited()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyModifiers;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn intent(t: Transition) -> Option<Intent> {
        match t {
            Transition::Intent(i) => Some(i),
            _ => None,
        }
    }

    #[test]
    fn typing_raises_edit_intents() {
        let ctx = AppCtx::default();
        let mut s = InputScreen::new("");
        intent(s.on_key(key(KeyCode::Char('H')), &ctx));
        let last = intent(s.on_key(key(KeyCode::Char('i')), &ctx));
        assert_eq!(last, Some(Intent::EditScript("Hi".into())));
        assert_eq!(intent(s.on_key(key(KeyCode::Enter), &ctx)), Some(Intent::EditScript("Hi\n".into())));
    }

    #[test]
    fn button_is_disabled_for_blank_text() {
        let ctx = AppCtx::default();
        let mut s = InputScreen::new("   ");
        s.on_key(key(KeyCode::Tab), &ctx);
        assert!(intent(s.on_key(key(KeyCode::Enter), &ctx)).is_none());
    }

    #[test]
    fn button_submits_current_text() {
        let ctx = AppCtx::default();
        let mut s = InputScreen::new("Hello world script");
        s.on_key(key(KeyCode::Tab), &ctx);
        assert_eq!(
            intent(s.on_key(key(KeyCode::Enter), &ctx)),
            Some(Intent::SubmitScript("Hello world script".into()))
        );
    }

    #[test]
    fn editing_is_frozen_while_loading() {
        let mut ctx = AppCtx::default();
        ctx.state.is_loading = true;
        let mut s = InputScreen::new("draft");
        assert!(intent(s.on_key(key(KeyCode::Char('x')), &ctx)).is_none());
        assert!(intent(s.on_paste("more", &ctx)).is_none());
        let ctrl_s = KeyEvent::new(KeyCode::Char('s'), KeyModifiers::CONTROL);
        assert!(intent(s.on_key(ctrl_s, &ctx)).is_none());
        assert_eq!(s.editor.text, "draft");
    }
}
