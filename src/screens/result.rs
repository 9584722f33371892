use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    prelude::Frame,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
};

use crate::app::{AppCtx, Intent, ScreenWidget, Transition};
use crate::ui::components::draw_frame_title;
use crate::ui::help::help_result;
use crate::ui::layout::three_box_layout;
use crate::ui::style::{button_spans, button_spans_confirmed, buttons_line, heading, muted};

const NEW_LABEL: &str = "새로 만들기";
const COPY_LABEL: &str = "대본 복사하기";
const COPIED_LABEL: &str = "복사 완료!";
const PAGE: u16 = 10;

#[derive(Clone, Copy, Default, PartialEq, Eq)]
enum Focus {
    New,
    #[default]
    Copy,
}

/// Generated script, shown verbatim.
#[derive(Default)]
pub struct ResultScreen {
    scroll: u16,
    focus: Focus,
}

impl ScreenWidget for ResultScreen {
    fn title(&self) -> &str { "생성된 대본" }

    fn draw(&self, f: &mut Frame<'_>, size: Rect, ctx: &AppCtx) {
        let (Some(script), Some(topic)) = (ctx.state.generated_script.as_deref(), ctx.state.selected_topic.as_deref())
        else {
            return;
        };

        let regions = three_box_layout(size, 7, 8);

        f.render_widget(Block::default().borders(Borders::ALL), regions.top);
        let header = vec![
            Line::from(vec![heading(self.title().to_string()), Span::raw("   "), muted("주제: "), heading(topic.to_string())]),
            Line::from(""),
            Line::from(muted(
                "💡 이 대본은 AI가 기존 스타일을 분석하여 생성했습니다. 실제 촬영 시에는 본인의 말투에 맞게 조금 더 자연스럽게 수정해서 사용하는 것을 추천합니다.",
            )),
        ];
        f.render_widget(Paragraph::new(header).wrap(Wrap { trim: true }), regions.top_inner);

        let middle = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(3), Constraint::Length(1)])
            .split(regions.middle_inner);

        f.render_widget(Block::default().borders(Borders::ALL), regions.middle);
        f.render_widget(
            Paragraph::new(script.to_string())
                .block(draw_frame_title(""))
                .wrap(Wrap { trim: false })
                .scroll((self.scroll, 0)),
            middle[0],
        );

        let copy = if ctx.copied() {
            button_spans_confirmed(COPIED_LABEL)
        } else {
            button_spans(COPY_LABEL, self.focus == Focus::Copy)
        };
        let buttons = buttons_line(vec![button_spans(NEW_LABEL, self.focus == Focus::New), copy]);
        f.render_widget(Paragraph::new(buttons).alignment(Alignment::Center), middle[1]);

        f.render_widget(help_result(), regions.bottom);
    }

    fn on_key(&mut self, k: KeyEvent, ctx: &AppCtx) -> Transition {
        if ctx.state.generated_script.is_none() {
            return Transition::Stay;
        }

        match k.code {
            KeyCode::Esc => return Transition::Intent(Intent::SoftReset),

            // Scrolling
            KeyCode::Up => self.scroll = self.scroll.saturating_sub(1),
            KeyCode::Down => self.scroll = self.scroll.saturating_add(1),
            KeyCode::PageUp => self.scroll = self.scroll.saturating_sub(PAGE),
            KeyCode::PageDown => self.scroll = self.scroll.saturating_add(PAGE),
            KeyCode::Home => self.scroll = 0,

            // Buttons
            KeyCode::Left | KeyCode::Right | KeyCode::Tab | KeyCode::BackTab => {
                self.focus = match self.focus {
                    Focus::New => Focus::Copy,
                    Focus::Copy => Focus::New,
                };
            }
            KeyCode::Char('c' | 'C') => return Transition::Intent(Intent::CopyScript),
            KeyCode::Enter => {
                return Transition::Intent(match self.focus {
                    Focus::Copy => Intent::CopyScript,
                    Focus::New => Intent::SoftReset,
                });
            }
            _ => {}
        }
        Transition::Stay
    }
}
