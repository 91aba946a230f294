use std::rc::Rc;

use qpace::analysis::{analyze_session, GenerativeClient, ERROR_FALLBACK, NO_CONTENT_FALLBACK};
use qpace::clock::{ClockId, ManualScheduler};
use qpace::dashboard::{chart_series, SessionStats};
use qpace::error::AnalysisError;
use qpace::session::{QuestionStatus, Session, Subject};
use qpace::setup::SetupForm;
use qpace::timer::{QuestionTimer, TimerState};

fn run_session(plan: &[(usize, QuestionStatus)]) -> Session {
    let start = SetupForm::new(Subject::Chemistry)
        .with_chapter("Chemical Bonding")
        .submit()
        .expect("valid setup");
    let mut session = Session::new(start.subject, start.chapter);
    let mut timer = QuestionTimer::start(Rc::new(ManualScheduler::new()));

    for &(ticks, status) in plan {
        for _ in 0..ticks {
            timer.on_tick(ClockId::Question);
        }
        let done = timer.complete(status);
        session.record(done.time_in_seconds, done.status);
        assert_eq!(timer.state(), TimerState::Running);
        assert_eq!(timer.elapsed(), 0);
    }
    timer.finish();
    session
}

#[test]
fn statistics_match_recorded_questions() {
    let session = run_session(&[
        (12, QuestionStatus::Correct),
        (40, QuestionStatus::Correct),
        (95, QuestionStatus::Incorrect),
        (5, QuestionStatus::Skipped),
    ]);

    let stats = SessionStats::from_records(session.records());
    assert_eq!(stats.total_time, 152);
    assert_eq!(stats.avg_time, 38.0);
    assert_eq!(stats.accuracy, 50);
    assert_eq!(stats.counts.total(), 4);

    let bars = chart_series(session.records());
    let numbers: Vec<u32> = bars.iter().map(|b| b.question_number).collect();
    assert_eq!(numbers, vec![1, 2, 3, 4]);
}

struct Fixed(Result<Option<&'static str>, ()>);

impl GenerativeClient for Fixed {
    fn generate(&self, _prompt: &str) -> Result<Option<String>, AnalysisError> {
        match self.0 {
            Ok(text) => Ok(text.map(str::to_string)),
            Err(()) => Err(AnalysisError::MissingApiKey),
        }
    }
}

#[test]
fn analysis_always_resolves_to_text() {
    let session = run_session(&[(3, QuestionStatus::Skipped)]);

    assert_eq!(
        analyze_session(&Fixed(Ok(Some("Nice work"))), &session),
        "Nice work"
    );
    assert_eq!(
        analyze_session(&Fixed(Ok(None)), &session),
        NO_CONTENT_FALLBACK
    );
    assert_eq!(analyze_session(&Fixed(Err(())), &session), ERROR_FALLBACK);
}
