use anyhow::{Context, Result};
use crossterm::{
    event::{self, DisableBracketedPaste, EnableBracketedPaste, Event, KeyEvent, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::{Backend, CrosstermBackend},
    layout::{Alignment, Rect},
    prelude::Frame,
    text::Line,
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Terminal,
};
use std::io::{self, Stdout};
use std::sync::Arc;
use std::time::Instant;
use tokio::sync::mpsc::{unbounded_channel, UnboundedReceiver, UnboundedSender};
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use crate::clipboard::Clipboard;
use crate::defaults::Defaults;
use crate::gemini::ScriptService;
use crate::screens::{screen_for, ConfirmQuitScreen};
use crate::types::{WorkflowState, WorkflowStep};
use crate::ui::common_nav::is_quit_chord;
use crate::ui::components::CopyFlash;
use crate::ui::layout::{banner_split, centered_rect_abs};
use crate::ui::style;
use crate::workflow::{self, Begin, Outcome, Request};

/// User actions raised by screens. Only the app loop acts on them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Intent {
    EditScript(String),
    SubmitScript(String),
    SelectTopic(String),
    Reset,
    SoftReset,
    CopyScript,
}

pub enum Transition {
    Stay,
    Push(Box<dyn ScreenWidget>),
    Pop,
    Intent(Intent),
    Quit,
}

/// Read-only view of the app handed to screens.
#[derive(Default)]
pub struct AppCtx {
    pub state: WorkflowState,
    pub copy_flash: CopyFlash,
}

impl AppCtx {
    pub fn copied(&self) -> bool {
        self.copy_flash.is_active(Instant::now())
    }
}

pub trait ScreenWidget {
    fn title(&self) -> &str { Defaults::APP_TITLE }
    fn draw(&self, f: &mut Frame<'_>, area: Rect, ctx: &AppCtx);
    fn on_key(&mut self, key: KeyEvent, ctx: &AppCtx) -> Transition;

    /// Bracketed paste. Only the editor cares.
    fn on_paste(&mut self, _text: &str, _ctx: &AppCtx) -> Transition { Transition::Stay }
}

type Ticketed = (u64, Outcome);

pub struct App {
    service: Arc<dyn ScriptService>,
    clipboard: Box<dyn Clipboard>,
    ctx: AppCtx,
    view: Box<dyn ScreenWidget>,
    view_step: WorkflowStep,
    modals: Vec<Box<dyn ScreenWidget>>,
    // Outcomes carry the ticket of the request that produced them; only the
    // current ticket is applied.
    ticket: u64,
    in_flight: Option<JoinHandle<()>>,
    tx: UnboundedSender<Ticketed>,
    rx: UnboundedReceiver<Ticketed>,
}

impl App {
    pub fn new(service: Arc<dyn ScriptService>, clipboard: Box<dyn Clipboard>) -> Self {
        let ctx = AppCtx::default();
        let view = screen_for(&ctx.state);
        let (tx, rx) = unbounded_channel();
        Self {
            service,
            clipboard,
            view_step: ctx.state.step,
            ctx,
            view,
            modals: Vec::new(),
            ticket: 0,
            in_flight: None,
            tx,
            rx,
        }
    }

    /// Returns `true` when the app should exit.
    pub fn handle_key(&mut self, k: KeyEvent) -> bool {
        if is_quit_chord(&k) {
            if self.modals.is_empty() {
                self.modals.push(Box::new(ConfirmQuitScreen::new()));
            }
            return false;
        }

        let t = if let Some(top) = self.modals.last_mut() {
            top.on_key(k, &self.ctx)
        } else if self.overlay_active() {
            Transition::Stay
        } else {
            self.view.on_key(k, &self.ctx)
        };
        self.apply(t)
    }

    pub fn handle_paste(&mut self, text: &str) {
        if self.modals.is_empty() && !self.overlay_active() {
            let t = self.view.on_paste(text, &self.ctx);
            self.apply(t);
        }
    }

    fn apply(&mut self, t: Transition) -> bool {
        match t {
            Transition::Stay => {}
            Transition::Push(s) => self.modals.push(s),
            Transition::Pop => {
                self.modals.pop();
            }
            Transition::Intent(intent) => self.dispatch(intent),
            Transition::Quit => return true,
        }
        false
    }

    pub fn dispatch(&mut self, intent: Intent) {
        match intent {
            Intent::EditScript(text) => self.ctx.state = workflow::set_script(&self.ctx.state, text),
            Intent::SubmitScript(text) => {
                let begun = workflow::submit_script(&self.ctx.state, &text);
                self.begin(begun);
            }
            Intent::SelectTopic(topic) => {
                let begun = workflow::select_topic(&self.ctx.state, &topic);
                self.begin(begun);
            }
            Intent::Reset => {
                self.cancel_in_flight();
                self.ctx.state = workflow::reset();
                self.ctx.copy_flash.clear();
            }
            Intent::SoftReset => match workflow::soft_reset(&self.ctx.state) {
                Ok(next) => {
                    self.ctx.state = next;
                    self.ctx.copy_flash.clear();
                }
                Err(e) => warn!("soft reset rejected: {e}"),
            },
            Intent::CopyScript => {
                let Some(script) = self.ctx.state.generated_script.as_deref() else { return };
                match self.clipboard.set_text(script) {
                    Ok(()) => self.ctx.copy_flash.trigger(Instant::now()),
                    Err(e) => warn!("copy to clipboard failed: {e:#}"),
                }
            }
        }
        self.sync_view();
    }

    fn begin(&mut self, begun: Begin) {
        match begun {
            Ok((next, request)) => {
                self.ctx.state = next;
                if let Some(request) = request {
                    self.spawn(request);
                }
            }
            Err(e) => warn!("request rejected: {e}"),
        }
    }

    fn spawn(&mut self, request: Request) {
        self.ticket += 1;
        let ticket = self.ticket;
        let tx = self.tx.clone();
        let service = Arc::clone(&self.service);
        debug!(ticket, "spawning request");
        self.in_flight = Some(tokio::spawn(async move {
            let outcome = workflow::execute(service.as_ref(), request).await;
            let _ = tx.send((ticket, outcome));
        }));
    }

    fn cancel_in_flight(&mut self) {
        if let Some(handle) = self.in_flight.take() {
            handle.abort();
            self.ticket += 1;
            info!("cancelled outstanding request");
        }
    }

    /// Apply every finished request without blocking.
    pub fn drain_outcomes(&mut self) {
        while let Ok((ticket, outcome)) = self.rx.try_recv() {
            self.apply_outcome(ticket, outcome);
        }
    }

    fn apply_outcome(&mut self, ticket: u64, outcome: Outcome) {
        if ticket != self.ticket {
            debug!(ticket, current = self.ticket, "dropping outcome of cancelled request");
            return;
        }
        self.in_flight = None;
        self.ctx.state = workflow::complete(&self.ctx.state, outcome);
        self.sync_view();
    }

    // One screen per step; it is rebuilt whenever the step changes.
    fn sync_view(&mut self) {
        if self.ctx.state.step != self.view_step {
            debug!(from = ?self.view_step, to = ?self.ctx.state.step, "step changed");
            self.view = screen_for(&self.ctx.state);
            self.view_step = self.ctx.state.step;
        }
    }

    fn overlay_active(&self) -> bool {
        self.ctx.state.is_loading && self.ctx.state.step != WorkflowStep::Input
    }

    pub fn draw(&self, f: &mut Frame<'_>) {
        let size = f.size();
        let area = match &self.ctx.state.error {
            Some(err) => {
                let (banner, rest) = banner_split(size);
                let p = Paragraph::new(Line::from(format!("⚠ {err}")))
                    .style(style::error_style())
                    .block(Block::default().borders(Borders::ALL))
                    .wrap(Wrap { trim: true });
                f.render_widget(p, banner);
                rest
            }
            None => size,
        };

        self.view.draw(f, area, &self.ctx);

        if self.overlay_active() {
            draw_loading_overlay(f, size);
        }
        for m in &self.modals {
            m.draw(f, size, &self.ctx);
        }
    }

    fn run<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> Result<()> {
        loop {
            self.drain_outcomes();
            terminal.draw(|f| self.draw(f))?;

            if event::poll(Defaults::POLL_INTERVAL)? {
                match event::read()? {
                    Event::Key(k) if k.kind == KeyEventKind::Press => {
                        if self.handle_key(k) {
                            break;
                        }
                    }
                    Event::Paste(text) => self.handle_paste(&text),
                    _ => {}
                }
            }
        }
        self.cancel_in_flight();
        Ok(())
    }
}

fn draw_loading_overlay(f: &mut Frame<'_>, size: Rect) {
    let area = centered_rect_abs(44, 7, size);
    let lines = vec![
        Line::from(""),
        Line::from(style::heading("대본 작성 중...")),
        Line::from(""),
        Line::from(style::muted("당신의 스타일로 글을 쓰고 있습니다.")),
    ];
    f.render_widget(Clear, area);
    f.render_widget(
        Paragraph::new(lines)
            .alignment(Alignment::Center)
            .block(Block::default().borders(Borders::ALL)),
        area,
    );
}

fn setup_terminal() -> Result<Terminal<CrosstermBackend<Stdout>>> {
    enable_raw_mode().context("enabling raw mode")?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableBracketedPaste).context("entering alternate screen")?;
    let mut terminal = Terminal::new(CrosstermBackend::new(stdout))?;
    terminal.clear()?;
    Ok(terminal)
}

fn restore_terminal(terminal: &mut Terminal<CrosstermBackend<Stdout>>) -> Result<()> {
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), DisableBracketedPaste, LeaveAlternateScreen)?;
    terminal.show_cursor()?;
    Ok(())
}

/// Run the interactive workflow until the user quits.
pub async fn run_tui(service: Arc<dyn ScriptService>, clipboard: Box<dyn Clipboard>) -> Result<()> {
    let mut terminal = match setup_terminal() {
        Ok(t) => t,
        Err(e) => {
            let _ = disable_raw_mode();
            return Err(e.context("initialising terminal"));
        }
    };
    info!("TUI started");

    let mut app = App::new(service, clipboard);
    let res = app.run(&mut terminal);

    // restore even when the loop failed
    restore_terminal(&mut terminal)?;
    info!("TUI stopped");
    res
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ServiceError;
    use crate::workflow::tests::{sample_analysis, FakeService};
    use crossterm::event::{KeyCode, KeyModifiers};
    use ratatui::backend::TestBackend;
    use std::sync::Mutex;

    #[derive(Clone, Default)]
    struct RecordingClipboard(Arc<Mutex<Vec<String>>>);

    impl Clipboard for RecordingClipboard {
        fn set_text(&mut self, text: &str) -> Result<()> {
            self.0.lock().unwrap().push(text.to_string());
            Ok(())
        }
    }

    fn app_with(service: FakeService) -> (App, RecordingClipboard) {
        let clip = RecordingClipboard::default();
        (App::new(Arc::new(service), Box::new(clip.clone())), clip)
    }

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn ctrl(c: char) -> KeyEvent {
        KeyEvent::new(KeyCode::Char(c), KeyModifiers::CONTROL)
    }

    async fn settle(app: &mut App) {
        let (ticket, outcome) = app.rx.recv().await.expect("outcome");
        app.apply_outcome(ticket, outcome);
    }

    fn screen_text(app: &App) -> String {
        let mut terminal = Terminal::new(TestBackend::new(100, 40)).unwrap();
        terminal.draw(|f| app.draw(f)).unwrap();
        terminal.backend().buffer().content.iter().map(|c| c.symbol()).collect()
    }

    #[tokio::test]
    async fn typing_and_ctrl_s_runs_the_full_flow() {
        let service = FakeService::ok();
        let (mut app, clip) = app_with(service.clone());

        app.handle_paste("Hello world script");
        assert_eq!(app.ctx.state.original_script, "Hello world script");

        app.handle_key(ctrl('s'));
        assert!(app.ctx.state.is_loading);
        settle(&mut app).await;
        assert_eq!(app.ctx.state.step, WorkflowStep::Analysis);
        assert!(screen_text(&app).contains("t5"));

        // second topic
        app.handle_key(key(KeyCode::Down));
        app.handle_key(key(KeyCode::Enter));
        assert_eq!(app.ctx.state.selected_topic.as_deref(), Some("t2"));
        settle(&mut app).await;

        let s = &app.ctx.state;
        assert_eq!(s.step, WorkflowStep::Generation);
        assert_eq!(s.generated_script.as_deref(), Some("Generated script text"));
        assert!(screen_text(&app).contains("Generated script text"));

        app.handle_key(key(KeyCode::Char('c')));
        assert_eq!(clip.0.lock().unwrap().as_slice(), ["Generated script text"]);
        assert!(app.ctx.copied());

        app.handle_key(key(KeyCode::Esc));
        assert_eq!(app.ctx.state.step, WorkflowStep::Analysis);
        assert!(app.ctx.state.generated_script.is_none());
        assert!(!app.ctx.copied());
        assert_eq!(service.calls(), 2);
    }

    #[tokio::test]
    async fn second_submit_while_loading_is_rejected() {
        let service = FakeService::ok();
        let (mut app, _) = app_with(service.clone());

        app.dispatch(Intent::SubmitScript("Hello world script".into()));
        app.dispatch(Intent::SubmitScript("Hello world script".into()));
        settle(&mut app).await;

        assert_eq!(service.calls(), 1);
        assert_eq!(app.ctx.state.step, WorkflowStep::Analysis);
    }

    #[tokio::test]
    async fn failed_generation_shows_banner_and_keeps_topics() {
        let service = FakeService {
            script: Err(ServiceError::GenerationFailed("HTTP 503".into())),
            ..FakeService::ok()
        };
        let (mut app, _) = app_with(service);

        app.dispatch(Intent::SubmitScript("Hello world script".into()));
        settle(&mut app).await;
        app.dispatch(Intent::SelectTopic("t1".into()));
        settle(&mut app).await;

        assert_eq!(app.ctx.state.step, WorkflowStep::Analysis);
        assert!(app.ctx.state.selected_topic.is_none());
        assert_eq!(app.ctx.state.analysis, Some(sample_analysis()));
        assert_eq!(app.ctx.state.error.as_deref(), Some(Defaults::MSG_GENERATION_FAILED));
        assert!(screen_text(&app).contains("t3"));
    }

    #[tokio::test]
    async fn reset_while_loading_discards_late_outcome() {
        let (mut app, _) = app_with(FakeService::ok());

        app.dispatch(Intent::SubmitScript("Hello world script".into()));
        let stale_ticket = app.ticket;
        app.dispatch(Intent::Reset);
        assert_eq!(app.ctx.state, WorkflowState::default());

        app.apply_outcome(stale_ticket, Outcome::Analyzed(Ok(sample_analysis())));
        assert_eq!(app.ctx.state, WorkflowState::default());
    }

    #[tokio::test]
    async fn keys_are_blocked_while_generating() {
        let (mut app, _) = app_with(FakeService::ok());
        app.dispatch(Intent::SubmitScript("Hello world script".into()));
        settle(&mut app).await;

        app.dispatch(Intent::SelectTopic("t1".into()));
        assert!(app.overlay_active());
        app.handle_key(key(KeyCode::Esc));
        assert_eq!(app.ctx.state.step, WorkflowStep::Analysis);
        assert!(app.ctx.state.is_loading);
        settle(&mut app).await;
        assert_eq!(app.ctx.state.step, WorkflowStep::Generation);
    }

    #[tokio::test]
    async fn ctrl_q_then_enter_on_quit_exits() {
        let (mut app, _) = app_with(FakeService::ok());
        assert!(!app.handle_key(ctrl('q')));
        assert!(!app.handle_key(key(KeyCode::Right)));
        assert!(app.handle_key(key(KeyCode::Enter)));
    }

    #[tokio::test]
    async fn blank_submit_shows_error_banner() {
        let (mut app, _) = app_with(FakeService::ok());
        app.handle_key(ctrl('s'));
        assert_eq!(app.ctx.state.error.as_deref(), Some(Defaults::MSG_EMPTY_SCRIPT));
        assert!(!app.ctx.state.is_loading);
        assert!(app.rx.try_recv().is_err());
    }
}
