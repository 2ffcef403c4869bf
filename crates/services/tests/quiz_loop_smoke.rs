use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use quiz_core::model::{
    Feedback, HistoryEntry, HistoryEntryId, MCQ_QUESTIONS, NUMERIC_QUESTIONS, NewHistoryEntry,
    Round,
};
use quiz_core::time::fixed_now;
use services::{
    Advance, Clock, HistoryService, QuizController, QuizError, QuizEvent, QuizLoopService,
    QuizPhase, QuizSession, QuizSettings, Tick,
};
use storage::repository::{HistoryRepository, InMemoryRepository, StorageError};

fn loop_service(repo: &InMemoryRepository) -> QuizLoopService {
    QuizLoopService::new(HistoryService::new(
        Clock::fixed(fixed_now()),
        Arc::new(repo.clone()),
    ))
}

/// Run the countdown down to expiry without any user input.
async fn expire(svc: &QuizLoopService, session: &mut QuizSession) {
    loop {
        match svc.tick(session).await.unwrap() {
            services::TickOutcome::Counting(_) => {}
            services::TickOutcome::Expired(_) => break,
        }
    }
}

#[tokio::test]
async fn timed_out_session_with_two_correct_answers_is_recorded_once() {
    let repo = InMemoryRepository::new();
    let svc = loop_service(&repo);
    let mut session = QuizSession::new(30);

    assert_eq!(session.select_option("B) Mercury").unwrap(), Feedback::Correct);
    assert_eq!(session.score(), 1);
    svc.advance(&mut session).await.unwrap();

    // Let the timer run out on the remaining multiple-choice questions.
    for _ in 1..MCQ_QUESTIONS.len() {
        expire(&svc, &mut session).await;
    }
    assert_eq!(session.score(), 1);
    assert_eq!(session.phase(), QuizPhase::InRound(Round::Numeric));
    assert_eq!(session.question_index(), 0);

    // Jump to the car question and answer it.
    while session.current_question().unwrap().id() != NUMERIC_QUESTIONS[4].id {
        svc.advance(&mut session).await.unwrap();
    }
    session.set_numeric_input("120").unwrap();
    assert_eq!(session.submit_numeric().unwrap(), Feedback::Correct);
    assert_eq!(session.score(), 2);

    let outcome = svc.advance(&mut session).await.unwrap();
    assert_eq!(outcome.advance, Advance::Completed { score: 2 });
    assert!(session.is_complete());

    let entries = repo.list_all().await.unwrap();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].score(), 2);
    assert_eq!(entries[0].recorded_at(), fixed_now());
}

#[tokio::test]
async fn countdown_expiry_equals_explicit_advance() {
    let repo = InMemoryRepository::new();
    let svc = loop_service(&repo);
    let mut by_timer = QuizSession::new(5);
    let mut by_click = QuizSession::new(5);

    expire(&svc, &mut by_timer).await;
    svc.advance(&mut by_click).await.unwrap();
    assert_eq!(by_timer, by_click);

    assert_eq!(by_timer.tick().unwrap(), Tick::Counting(4));
}

#[tokio::test]
async fn restart_after_completion_keeps_history() {
    let repo = InMemoryRepository::new();
    let svc = loop_service(&repo);
    let mut session = QuizSession::new(30);
    while !session.is_complete() {
        svc.advance(&mut session).await.unwrap();
    }

    session.restart();
    assert_eq!(session.phase(), QuizPhase::InRound(Round::MultipleChoice));
    assert_eq!(session.question_index(), 0);
    assert_eq!(session.score(), 0);
    assert_eq!(repo.list_all().await.unwrap().len(), 1);
}

struct FailingHistoryRepo;

#[async_trait::async_trait]
impl HistoryRepository for FailingHistoryRepo {
    async fn initialize(&self) -> Result<(), StorageError> {
        Err(StorageError::Connection("fail".to_string()))
    }

    async fn append(&self, _entry: &NewHistoryEntry) -> Result<HistoryEntryId, StorageError> {
        Err(StorageError::Connection("fail".to_string()))
    }

    async fn list_all(&self) -> Result<Vec<HistoryEntry>, StorageError> {
        Err(StorageError::Connection("fail".to_string()))
    }

    async fn clear_all(&self) -> Result<(), StorageError> {
        Err(StorageError::Connection("fail".to_string()))
    }
}

#[tokio::test]
async fn storage_failure_surfaces_as_history_unavailable_and_keeps_score() {
    let svc = QuizLoopService::new(HistoryService::new(
        Clock::fixed(fixed_now()),
        Arc::new(FailingHistoryRepo),
    ));
    let mut session = QuizSession::new(30);
    session.select_option("B) Mercury").unwrap();

    let mut last = Ok(());
    while !session.is_complete() {
        last = svc.advance(&mut session).await.map(|_| ());
    }

    let err = last.unwrap_err();
    assert!(err.is_history_unavailable(), "unexpected error {err:?}");
    assert!(matches!(err, QuizError::HistoryUnavailable(_)));
    assert!(session.is_complete());
    assert_eq!(session.score(), 1);
    assert_eq!(session.history_entry_id(), None);
}

/// Fails every call until switched to healthy, then delegates to memory.
#[derive(Default)]
struct FlakyHistoryRepo {
    healthy: AtomicBool,
    inner: InMemoryRepository,
}

impl FlakyHistoryRepo {
    fn check(&self) -> Result<(), StorageError> {
        if self.healthy.load(Ordering::SeqCst) {
            Ok(())
        } else {
            Err(StorageError::Connection("down".to_string()))
        }
    }
}

#[async_trait::async_trait]
impl HistoryRepository for FlakyHistoryRepo {
    async fn initialize(&self) -> Result<(), StorageError> {
        self.check()?;
        self.inner.initialize().await
    }

    async fn append(&self, entry: &NewHistoryEntry) -> Result<HistoryEntryId, StorageError> {
        self.check()?;
        self.inner.append(entry).await
    }

    async fn list_all(&self) -> Result<Vec<HistoryEntry>, StorageError> {
        self.check()?;
        self.inner.list_all().await
    }

    async fn clear_all(&self) -> Result<(), StorageError> {
        self.check()?;
        self.inner.clear_all().await
    }
}

#[tokio::test(start_paused = true)]
async fn retry_after_storage_recovers_appends_score_once() {
    let repo = Arc::new(FlakyHistoryRepo::default());
    let workflow = Arc::new(QuizLoopService::new(HistoryService::new(
        Clock::fixed(fixed_now()),
        repo.clone(),
    )));
    let settings = QuizSettings::new(30, Duration::from_secs(1));
    let (mut ctrl, _ticks) = QuizController::new(workflow, settings);
    ctrl.start();
    ctrl.select_option(MCQ_QUESTIONS[0].answer).unwrap();

    let mut last = Ok(QuizEvent::Ignored);
    while !ctrl.session().is_complete() {
        last = ctrl.advance().await;
    }
    let err = last.unwrap_err();
    assert!(err.is_history_unavailable(), "unexpected error {err:?}");
    assert!(!ctrl.timer_running());
    assert_eq!(ctrl.session().history_entry_id(), None);

    // Still down: retrying fails without touching the session.
    assert!(ctrl.retry_history().await.unwrap_err().is_history_unavailable());
    assert!(repo.inner.list_all().await.unwrap().is_empty());

    repo.healthy.store(true, Ordering::SeqCst);
    let completion = ctrl.retry_history().await.unwrap();
    assert_eq!(completion.score, 1);
    assert_eq!(completion.history.len(), 1);
    assert_eq!(completion.history[0].score, 1);
    assert_eq!(ctrl.session().history_entry_id(), Some(completion.entry_id));

    // A second retry only re-reads the list.
    let again = ctrl.retry_history().await.unwrap();
    assert_eq!(again.entry_id, completion.entry_id);
    assert_eq!(again.history.len(), 1);

    let entries = repo.inner.list_all().await.unwrap();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].score(), 1);
}
