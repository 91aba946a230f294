use std::io;
use std::mem;
use std::rc::Rc;
use std::sync::mpsc::Sender;
use std::sync::Arc;

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use ratatui::{backend::Backend, Terminal};
use tracing::{debug, info};

use crate::analysis::{self, GenerativeClient};
use crate::clock::{ClockId, TickScheduler};
use crate::dashboard::SessionStats;
use crate::runtime::{AppEvent, EventSource, FrameClock, Runner};
use crate::session::{QuestionStatus, Session, Subject};
use crate::setup::{SessionStart, SetupForm};
use crate::stopwatch::Stopwatch;
use crate::timer::QuestionTimer;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    pub fn from_dark(dark: bool) -> Self {
        if dark {
            Theme::Dark
        } else {
            Theme::Light
        }
    }

    pub fn toggle(self) -> Self {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }
}

/// Which entry point the app was launched into
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Start {
    Session(SetupForm),
    Stopwatch,
}

/// A session whose current question is being timed
#[derive(Debug)]
pub struct ActiveSession {
    pub session: Session,
    pub timer: QuestionTimer,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AnalysisState {
    Idle,
    Pending { request: u64 },
    Ready(String),
}

/// A finished session on the dashboard. The session is no longer mutable here.
#[derive(Debug)]
pub struct Review {
    session: Session,
    stats: SessionStats,
    pub analysis: AnalysisState,
    pub scroll: usize,
}

impl Review {
    pub fn new(session: Session) -> Self {
        let stats = SessionStats::from_records(session.records());
        Self {
            session,
            stats,
            analysis: AnalysisState::Idle,
            scroll: 0,
        }
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn stats(&self) -> &SessionStats {
        &self.stats
    }
}

#[derive(Debug)]
pub enum Stage {
    Setup(SetupForm),
    Question(ActiveSession),
    Dashboard(Review),
    Stopwatch(Stopwatch),
}

pub struct App {
    pub stage: Stage,
    pub theme: Theme,
    scheduler: Rc<dyn TickScheduler>,
    client: Arc<dyn GenerativeClient>,
    events: Sender<AppEvent>,
    next_request: u64,
    should_quit: bool,
}

impl App {
    pub fn new(
        start: Start,
        theme: Theme,
        scheduler: Rc<dyn TickScheduler>,
        client: Arc<dyn GenerativeClient>,
        events: Sender<AppEvent>,
    ) -> Self {
        let stage = match start {
            Start::Session(form) => Stage::Setup(form),
            Start::Stopwatch => Stage::Stopwatch(Stopwatch::new(Rc::clone(&scheduler))),
        };
        Self {
            stage,
            theme,
            scheduler,
            client,
            events,
            next_request: 1,
            should_quit: false,
        }
    }

    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    pub fn handle_event(&mut self, event: AppEvent) {
        match event {
            AppEvent::Key(key) => self.on_key(key),
            AppEvent::Tick(clock) => self.on_tick(clock),
            AppEvent::Analysis { request, text } => self.on_analysis(request, text),
            AppEvent::Resize | AppEvent::Frame => {}
        }
    }

    fn on_tick(&mut self, clock: ClockId) {
        match &mut self.stage {
            Stage::Question(active) => {
                active.timer.on_tick(clock);
            }
            Stage::Stopwatch(stopwatch) => {
                stopwatch.on_tick(clock);
            }
            Stage::Setup(_) | Stage::Dashboard(_) => {}
        }
    }

    fn on_analysis(&mut self, request: u64, text: String) {
        match &mut self.stage {
            Stage::Dashboard(review) if review.analysis == AnalysisState::Pending { request } => {
                review.analysis = AnalysisState::Ready(text);
            }
            _ => debug!(request, "dropping analysis for a dashboard that is gone"),
        }
    }

    fn on_key(&mut self, key: KeyEvent) {
        if key.kind != KeyEventKind::Press {
            return;
        }
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            self.quit();
            return;
        }
        if key.code == KeyCode::Esc {
            self.quit();
            return;
        }

        // the setup form takes every printable key as chapter text
        if !matches!(self.stage, Stage::Setup(_)) && key.code == KeyCode::Char('d') {
            self.theme = self.theme.toggle();
            return;
        }

        match &mut self.stage {
            Stage::Setup(form) => match key.code {
                KeyCode::Tab | KeyCode::Right => form.next_subject(),
                KeyCode::BackTab | KeyCode::Left => form.prev_subject(),
                KeyCode::Backspace => form.backspace(),
                KeyCode::Enter => self.submit_setup(),
                KeyCode::Char(c) => form.push_char(c),
                _ => {}
            },
            Stage::Question(active) => match key.code {
                KeyCode::Char('c') => self.classify(QuestionStatus::Correct),
                KeyCode::Char('w') | KeyCode::Char('x') => self.classify(QuestionStatus::Incorrect),
                KeyCode::Char('s') => self.classify(QuestionStatus::Skipped),
                KeyCode::Char('p') | KeyCode::Char(' ') => active.timer.toggle_pause(),
                KeyCode::Char('e') => self.end_session(),
                _ => {}
            },
            Stage::Dashboard(review) => match key.code {
                KeyCode::Char('a') => self.request_analysis(),
                KeyCode::Char('n') => {
                    let subject = review.session().subject();
                    self.stage = Stage::Setup(SetupForm::new(subject));
                }
                KeyCode::Up => review.scroll = review.scroll.saturating_sub(1),
                KeyCode::Down => {
                    let last = review.session().records().len().saturating_sub(1);
                    review.scroll = (review.scroll + 1).min(last);
                }
                _ => {}
            },
            Stage::Stopwatch(stopwatch) => match key.code {
                KeyCode::Char(' ') | KeyCode::Enter => stopwatch.start_stop(),
                KeyCode::Char('r') => stopwatch.reset(),
                _ => {}
            },
        }
    }

    /// Start a session from the setup form. Does nothing while the chapter is blank.
    pub fn submit_setup(&mut self) {
        let Stage::Setup(form) = &self.stage else {
            return;
        };
        if let Some(start) = form.submit() {
            self.start_session(start);
        }
    }

    fn start_session(&mut self, start: SessionStart) {
        let SessionStart { subject, chapter } = start;
        info!(%subject, %chapter, "session started");
        self.stage = Stage::Question(ActiveSession {
            session: Session::new(subject, chapter),
            timer: QuestionTimer::start(Rc::clone(&self.scheduler)),
        });
    }

    pub fn classify(&mut self, status: QuestionStatus) {
        if let Stage::Question(active) = &mut self.stage {
            let done = active.timer.complete(status);
            let record = active.session.record(done.time_in_seconds, done.status);
            debug!(
                question = record.question_number,
                seconds = record.time_in_seconds,
                status = %record.status,
                "question recorded"
            );
        }
    }

    pub fn end_session(&mut self) {
        let Stage::Question(_) = self.stage else {
            return;
        };
        let placeholder = Stage::Setup(SetupForm::new(Subject::default()));
        if let Stage::Question(ActiveSession { session, timer }) =
            mem::replace(&mut self.stage, placeholder)
        {
            let discarded = timer.finish();
            info!(
                questions = session.records().len(),
                discarded_seconds = discarded,
                "session ended"
            );
            self.stage = Stage::Dashboard(Review::new(session));
        }
    }

    pub fn request_analysis(&mut self) {
        let Stage::Dashboard(review) = &mut self.stage else {
            return;
        };
        if matches!(review.analysis, AnalysisState::Pending { .. }) {
            return;
        }

        let request = self.next_request;
        self.next_request += 1;
        info!(request, "requesting session analysis");
        analysis::spawn_analysis(
            Arc::clone(&self.client),
            review.session().clone(),
            request,
            self.events.clone(),
        );
        review.analysis = AnalysisState::Pending { request };
    }

    /// Stop every tick source and mark the app for exit
    pub fn quit(&mut self) {
        match &mut self.stage {
            Stage::Question(active) => active.timer.pause(),
            Stage::Stopwatch(stopwatch) => stopwatch.stop(),
            Stage::Setup(_) | Stage::Dashboard(_) => {}
        }
        self.should_quit = true;
    }
}

/// Drive the app until it asks to quit, redrawing after every event
pub fn run<B, E, F>(
    terminal: &mut Terminal<B>,
    app: &mut App,
    runner: &Runner<E, F>,
) -> io::Result<()>
where
    B: Backend,
    E: EventSource,
    F: FrameClock,
{
    terminal.draw(|f| f.render_widget(&*app, f.area()))?;
    while !app.should_quit() {
        let event = runner.step();
        app.handle_event(event);
        terminal.draw(|f| f.render_widget(&*app, f.area()))?;
    }
    Ok(())
}
