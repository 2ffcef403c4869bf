use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use quiz_core::model::{HistoryEntry, HistoryEntryId, MCQ_QUESTIONS, NewHistoryEntry};
use quiz_core::time::fixed_now;
use storage::repository::{HistoryRepository, InMemoryRepository, StorageError};

use super::test_harness::{setup_view_harness, setup_view_harness_with_history_repo};
use crate::vm::QuizIntent;

#[tokio::test(flavor = "current_thread", start_paused = true)]
async fn quiz_page_smoke_renders_first_question() {
    let mut harness = setup_view_harness();
    harness.rebuild();
    harness.settle().await;

    let html = harness.render();
    assert!(html.contains("Quiz Platform"), "missing title in {html}");
    assert!(html.contains("🧠 Multiple-Choice Questions"), "missing round in {html}");
    assert!(html.contains("⏳ Time Left: 30s"), "missing timer in {html}");
    assert!(html.contains(MCQ_QUESTIONS[0].prompt), "missing prompt in {html}");
    assert!(html.contains("B) Mercury"), "missing option in {html}");
    assert!(html.contains("📜 Quiz History"), "missing history title in {html}");
    assert!(html.contains("No quiz history available."), "missing empty text in {html}");
}

#[tokio::test(flavor = "current_thread", start_paused = true)]
async fn history_panel_smoke_renders_attempts() {
    let mut harness = setup_view_harness();
    for score in [3, 7] {
        let entry = NewHistoryEntry::new(fixed_now(), score).unwrap();
        harness.history.append(&entry).await.expect("append entry");
    }

    harness.rebuild();
    harness.settle().await;
    let html = harness.render();
    assert!(html.contains("Attempt 1: 3/10 on"), "missing first attempt in {html}");
    assert!(html.contains("Attempt 2: 7/10 on"), "missing second attempt in {html}");
    assert!(!html.contains("No quiz history available."), "unexpected empty text in {html}");
}

#[tokio::test(flavor = "current_thread", start_paused = true)]
async fn quiz_page_smoke_countdown_ticks() {
    let mut harness = setup_view_harness();
    harness.rebuild();
    harness.settle().await;

    tokio::time::sleep(Duration::from_secs(1)).await;
    harness.settle().await;
    let html = harness.render();
    assert!(html.contains("⏳ Time Left: 29s"), "missing ticked timer in {html}");
}

#[tokio::test(flavor = "current_thread", start_paused = true)]
async fn quiz_page_smoke_answer_shows_feedback() {
    let mut harness = setup_view_harness();
    harness.rebuild();
    harness.settle().await;

    harness
        .send(QuizIntent::SelectOption("A) Venus".to_string()))
        .await;
    let html = harness.render();
    assert!(html.contains("❌ Wrong answer!"), "missing feedback in {html}");

    harness
        .send(QuizIntent::SelectOption(MCQ_QUESTIONS[0].answer.to_string()))
        .await;
    let html = harness.render();
    assert!(html.contains("✅ Correct!"), "missing feedback in {html}");
}

#[tokio::test(flavor = "current_thread", start_paused = true)]
async fn quiz_page_smoke_full_run_records_history_and_restarts() {
    let mut harness = setup_view_harness();
    harness.rebuild();
    harness.settle().await;

    harness
        .send(QuizIntent::SelectOption(MCQ_QUESTIONS[0].answer.to_string()))
        .await;
    for _ in 0..9 {
        harness.send(QuizIntent::Next).await;
    }
    harness.send(QuizIntent::InputChanged("120".to_string())).await;
    harness.send(QuizIntent::SubmitNumeric).await;
    harness.send(QuizIntent::Next).await;
    assert!(harness.is_complete());

    let html = harness.render();
    assert!(html.contains("🎉 Quiz Completed!"), "missing score card in {html}");
    assert!(html.contains("Your Score: 2/10"), "missing score in {html}");
    assert!(html.contains("Attempt 1: 2/10 on"), "missing history in {html}");
    assert_eq!(harness.history.list_all().await.unwrap().len(), 1);

    harness.send(QuizIntent::Restart).await;
    assert!(!harness.is_complete());
    let html = harness.render();
    assert!(html.contains("🧠 Multiple-Choice Questions"), "missing round in {html}");
    assert!(html.contains("⏳ Time Left: 30s"), "missing timer in {html}");
    assert!(html.contains("Attempt 1: 2/10 on"), "history lost in {html}");
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

#[tokio::test(flavor = "current_thread", start_paused = true)]
async fn quiz_page_smoke_renders_history_unavailable() {
    let mut harness = setup_view_harness_with_history_repo(Arc::new(FailingHistoryRepo));
    harness.rebuild();
    harness.settle().await;

    let html = harness.render();
    assert!(
        html.contains("Quiz history is unavailable right now."),
        "missing history error in {html}"
    );
    assert!(html.contains("Retry"), "missing retry in {html}");
    // The quiz itself keeps working without history.
    assert!(html.contains("⏳ Time Left: 30s"), "missing timer in {html}");

    for _ in 0..10 {
        harness.send(QuizIntent::Next).await;
    }
    assert!(harness.is_complete());
    let html = harness.render();
    assert!(html.contains("🎉 Quiz Completed!"), "missing score card in {html}");
    assert!(html.contains("Your Score: 0/10"), "missing score in {html}");
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

#[tokio::test(flavor = "current_thread", start_paused = true)]
async fn quiz_page_smoke_retry_stores_score_after_recovery() {
    let repo = Arc::new(FlakyHistoryRepo::default());
    let mut harness = setup_view_harness_with_history_repo(repo.clone());
    harness.rebuild();
    harness.settle().await;

    harness
        .send(QuizIntent::SelectOption(MCQ_QUESTIONS[0].answer.to_string()))
        .await;
    for _ in 0..10 {
        harness.send(QuizIntent::Next).await;
    }
    assert!(harness.is_complete());
    let html = harness.render();
    assert!(
        html.contains("Quiz history is unavailable right now."),
        "missing history warning in {html}"
    );

    repo.healthy.store(true, Ordering::SeqCst);
    harness.send(QuizIntent::RetryHistory).await;
    let html = harness.render();
    assert!(
        !html.contains("Quiz history is unavailable right now."),
        "warning still shown in {html}"
    );
    assert!(html.contains("Your Score: 1/10"), "missing score in {html}");
    assert!(html.contains("Attempt 1: 1/10 on"), "missing stored attempt in {html}");
    assert_eq!(repo.inner.list_all().await.unwrap().len(), 1);

    harness.send(QuizIntent::RetryHistory).await;
    assert_eq!(repo.inner.list_all().await.unwrap().len(), 1);
    assert!(!harness.render().contains("Attempt 2:"));
}

/// Delays every append so the completing intent stays in flight.
#[derive(Default)]
struct SlowHistoryRepo {
    inner: InMemoryRepository,
}

#[async_trait::async_trait]
impl HistoryRepository for SlowHistoryRepo {
    async fn initialize(&self) -> Result<(), StorageError> {
        self.inner.initialize().await
    }

    async fn append(&self, entry: &NewHistoryEntry) -> Result<HistoryEntryId, StorageError> {
        tokio::time::sleep(Duration::from_millis(10)).await;
        self.inner.append(entry).await
    }

    async fn list_all(&self) -> Result<Vec<HistoryEntry>, StorageError> {
        self.inner.list_all().await
    }

    async fn clear_all(&self) -> Result<(), StorageError> {
        self.inner.clear_all().await
    }
}

#[tokio::test(flavor = "current_thread", start_paused = true)]
async fn quiz_page_smoke_restart_during_save_is_not_lost() {
    let repo = Arc::new(SlowHistoryRepo::default());
    let mut harness = setup_view_harness_with_history_repo(repo.clone());
    harness.rebuild();
    harness.settle().await;

    for _ in 0..9 {
        harness.send(QuizIntent::Next).await;
    }
    harness
        .send_all(vec![QuizIntent::Next, QuizIntent::Restart])
        .await;

    assert!(!harness.is_complete());
    assert_eq!(repo.inner.list_all().await.unwrap().len(), 1);
    let html = harness.render();
    assert!(html.contains("🧠 Multiple-Choice Questions"), "missing round in {html}");
    assert!(html.contains("Question 1 of 5"), "missing progress in {html}");
    assert!(html.contains("Attempt 1: 0/10 on"), "missing stored attempt in {html}");
}
