use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::Rect,
    prelude::Frame,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};

use crate::app::{AppCtx, Intent, ScreenWidget, Transition};
use crate::types::AnalysisResult;
use crate::ui::components::labeled_section;
use crate::ui::help::help_analysis;
use crate::ui::layout::three_box_layout;
use crate::ui::style::{button_spans, button_spans_disabled, heading, muted, topic_lines};

const RESET_LABEL: &str = "처음으로 돌아가기";

/// Analysis summary plus the topic picker. `selected` runs over the topics,
/// then one extra slot for the reset button.
#[derive(Default)]
pub struct AnalysisScreen {
    selected: usize,
}

impl AnalysisScreen {
    fn slots(analysis: &AnalysisResult) -> usize {
        analysis.suggested_topics.len() + 1
    }

    fn summary_lines(analysis: &AnalysisResult, width: usize) -> Vec<Line<'static>> {
        let sections = [
            ("구조적 특징", analysis.structure.as_str()),
            ("톤앤매너", analysis.tone.as_str()),
            ("후킹 전략", analysis.hook_strategy.as_str()),
            ("타겟 시청자", analysis.target_audience.as_str()),
        ];
        let mut lines = vec![Line::from(heading("🔍 대본 분석 결과")), Line::from("")];
        for (i, (label, text)) in sections.into_iter().enumerate() {
            if i > 0 {
                lines.push(Line::from(""));
            }
            lines.extend(labeled_section(label, text, width));
        }
        lines
    }
}

impl ScreenWidget for AnalysisScreen {
    fn title(&self) -> &str { "분석" }

    fn draw(&self, f: &mut Frame<'_>, size: Rect, ctx: &AppCtx) {
        let Some(analysis) = ctx.state.analysis.as_ref() else { return };
        let loading = ctx.state.is_loading;

        let text_width = size.width.saturating_sub(2 + 2 + 4) as usize;
        let summary = Self::summary_lines(analysis, text_width);
        let topics: Vec<Vec<Line<'static>>> = analysis
            .suggested_topics
            .iter()
            .enumerate()
            .map(|(i, topic)| topic_lines(i, topic, self.selected == i, !loading, text_width))
            .collect();
        let topic_rows: usize = topics.iter().map(Vec::len).sum();
        let regions = three_box_layout(size, summary.len() as u16 + 2, topic_rows as u16 + 6);

        f.render_widget(Block::default().borders(Borders::ALL), regions.top);
        f.render_widget(Paragraph::new(summary), regions.top_inner);

        let mut lines = vec![
            Line::from(vec![
                heading("다음 영상을 위한 추천 주제 "),
                muted("(하나를 선택하여 대본을 생성하세요)"),
            ]),
            Line::from(""),
        ];
        // last row of the selected slot
        let mut selected_row = lines.len() + topic_rows + 1;
        for (i, rows) in topics.into_iter().enumerate() {
            lines.extend(rows);
            if i == self.selected {
                selected_row = lines.len() - 1;
            }
        }
        lines.push(Line::from(""));
        let reset_selected = self.selected == analysis.suggested_topics.len();
        let reset: Vec<Span<'static>> = if loading {
            button_spans_disabled(RESET_LABEL)
        } else {
            button_spans(RESET_LABEL, reset_selected)
        };
        lines.push(Line::from(reset));

        f.render_widget(Block::default().borders(Borders::ALL), regions.middle);
        // keep the selection visible on short terminals
        let scroll = (selected_row as u16 + 1).saturating_sub(regions.middle_inner.height);
        f.render_widget(Paragraph::new(lines).scroll((scroll, 0)), regions.middle_inner);

        f.render_widget(help_analysis(), regions.bottom);
    }

    fn on_key(&mut self, k: KeyEvent, ctx: &AppCtx) -> Transition {
        let Some(analysis) = ctx.state.analysis.as_ref() else { return Transition::Stay };
        if ctx.state.is_loading {
            return Transition::Stay;
        }
        let slots = Self::slots(analysis);
        let topics = &analysis.suggested_topics;

        match k.code {
            KeyCode::Esc => return Transition::Intent(Intent::Reset),

            // Navigation
            KeyCode::Up | KeyCode::BackTab => {
                self.selected = if self.selected == 0 { slots - 1 } else { self.selected - 1 };
            }
            KeyCode::Down | KeyCode::Tab => self.selected = (self.selected + 1) % slots,

            KeyCode::Char(c @ '1'..='9') => {
                let idx = c as usize - '1' as usize;
                if let Some(topic) = topics.get(idx) {
                    self.selected = idx;
                    return Transition::Intent(Intent::SelectTopic(topic.clone()));
                }
            }

            KeyCode::Enter => {
                return match topics.get(self.selected) {
                    Some(topic) => Transition::Intent(Intent::SelectTopic(topic.clone())),
                    None => Transition::Intent(Intent::Reset),
                };
            }
            _ => {}
        }
        Transition::Stay
    }
}
