use std::rc::Rc;
use std::sync::{mpsc, Arc};
use std::time::{Duration, Instant};

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{backend::TestBackend, Terminal};

use qpace::analysis::GenerativeClient;
use qpace::app::{self, AnalysisState, App, Stage, Start, Theme};
use qpace::clock::{ClockId, ManualScheduler, ThreadScheduler};
use qpace::error::AnalysisError;
use qpace::runtime::{AppEvent, FixedFrameClock, Runner, TestEventSource};
use qpace::session::{QuestionStatus, Subject};
use qpace::setup::SetupForm;
use qpace::stopwatch::StopwatchState;

struct CannedCoach;

impl GenerativeClient for CannedCoach {
    fn generate(&self, prompt: &str) -> Result<Option<String>, AnalysisError> {
        assert!(prompt.contains("Chapter: Kinematics"));
        Ok(Some("Spend less time on skipped questions.".into()))
    }
}

fn key(code: KeyCode) -> AppEvent {
    AppEvent::Key(KeyEvent::new(code, KeyModifiers::NONE))
}

fn send_str(tx: &mpsc::Sender<AppEvent>, s: &str) {
    for c in s.chars() {
        tx.send(key(KeyCode::Char(c))).unwrap();
    }
}

// Drives the full session flow through the real event loop and renderer without a TTY
#[test]
fn headless_session_flow_reaches_dashboard() {
    let scheduler = ManualScheduler::new();
    let (tx, rx) = mpsc::channel();
    let mut app = App::new(
        Start::Session(SetupForm::new(Subject::Physics)),
        Theme::Dark,
        Rc::new(scheduler.clone()),
        Arc::new(CannedCoach),
        tx.clone(),
    );

    send_str(&tx, "Kinematics");
    tx.send(key(KeyCode::Enter)).unwrap();
    for _ in 0..30 {
        tx.send(AppEvent::Tick(ClockId::Question)).unwrap();
    }
    tx.send(key(KeyCode::Char('c'))).unwrap();
    for _ in 0..45 {
        tx.send(AppEvent::Tick(ClockId::Question)).unwrap();
    }
    tx.send(key(KeyCode::Char('w'))).unwrap();
    tx.send(key(KeyCode::Char('p'))).unwrap();
    for _ in 0..10 {
        // paused: these must not count
        tx.send(AppEvent::Tick(ClockId::Question)).unwrap();
    }
    tx.send(key(KeyCode::Char('p'))).unwrap();
    for _ in 0..20 {
        tx.send(AppEvent::Tick(ClockId::Question)).unwrap();
    }
    tx.send(key(KeyCode::Char('s'))).unwrap();
    tx.send(AppEvent::Tick(ClockId::Question)).unwrap();
    tx.send(key(KeyCode::Char('e'))).unwrap();
    tx.send(key(KeyCode::Esc)).unwrap();

    let runner = Runner::new(
        TestEventSource::new(rx),
        FixedFrameClock::new(Duration::from_millis(5)),
    );
    let mut terminal = Terminal::new(TestBackend::new(100, 34)).unwrap();
    app::run(&mut terminal, &mut app, &runner).unwrap();

    assert!(app.should_quit());
    assert_eq!(scheduler.live_count(), 0);

    let Stage::Dashboard(review) = &app.stage else {
        panic!("expected the dashboard");
    };
    let records = review.session().records();
    assert_eq!(records.len(), 3);
    assert_eq!(
        records.iter().map(|r| r.time_in_seconds).collect::<Vec<_>>(),
        vec![30, 45, 20]
    );
    assert_eq!(records[2].status, QuestionStatus::Skipped);

    let stats = review.stats();
    assert_eq!(stats.total_time, 95);
    assert_eq!(stats.avg_time, 31.7);
    assert_eq!(stats.accuracy, 33);

    let content: String = terminal
        .backend()
        .buffer()
        .content
        .iter()
        .map(|c| c.symbol())
        .collect();
    assert!(content.contains("1m 35s"));
    assert!(content.contains("Detailed Breakdown"));
}

#[test]
fn headless_analysis_round_trip() {
    let (tx, rx) = mpsc::channel();
    let mut app = App::new(
        Start::Session(SetupForm::new(Subject::Physics).with_chapter("Kinematics")),
        Theme::Light,
        Rc::new(ManualScheduler::new()),
        Arc::new(CannedCoach),
        tx,
    );
    app.submit_setup();
    app.classify(QuestionStatus::Correct);
    app.end_session();
    app.request_analysis();

    let runner = Runner::new(
        TestEventSource::new(rx),
        FixedFrameClock::new(Duration::from_millis(10)),
    );
    let deadline = Instant::now() + Duration::from_secs(5);
    while Instant::now() < deadline {
        let event = runner.step();
        let done = matches!(event, AppEvent::Analysis { .. });
        app.handle_event(event);
        if done {
            break;
        }
    }

    let Stage::Dashboard(review) = &app.stage else {
        panic!("expected the dashboard");
    };
    assert_eq!(
        review.analysis,
        AnalysisState::Ready("Spend less time on skipped questions.".into())
    );
}

// Real tick threads: the stopwatch must advance on its own and stop cleanly
#[test]
fn headless_stopwatch_with_thread_ticks() {
    let (tx, rx) = mpsc::channel();
    let mut app = App::new(
        Start::Stopwatch,
        Theme::Light,
        Rc::new(ThreadScheduler::new(tx.clone())),
        Arc::new(CannedCoach),
        tx,
    );
    let runner = Runner::new(
        TestEventSource::new(rx),
        FixedFrameClock::new(Duration::from_millis(20)),
    );

    app.handle_event(key(KeyCode::Char('r')));
    let deadline = Instant::now() + Duration::from_secs(5);
    let elapsed = loop {
        app.handle_event(runner.step());
        let Stage::Stopwatch(sw) = &app.stage else {
            panic!("expected the stopwatch");
        };
        if sw.elapsed() >= 1 || Instant::now() > deadline {
            break sw.elapsed();
        }
    };
    assert!(elapsed >= 1, "stopwatch never ticked");

    app.handle_event(key(KeyCode::Char(' ')));
    let Stage::Stopwatch(sw) = &app.stage else {
        panic!("expected the stopwatch");
    };
    assert_eq!(sw.state(), StopwatchState::Stopped);
    let frozen = sw.elapsed();

    // anything already queued is drained; nothing further may advance the count
    let until = Instant::now() + Duration::from_millis(1300);
    while Instant::now() < until {
        app.handle_event(runner.step());
    }
    let Stage::Stopwatch(sw) = &app.stage else {
        panic!("expected the stopwatch");
    };
    assert_eq!(sw.elapsed(), frozen);
}
