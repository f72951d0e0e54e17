//! Mock Assistant Service for testing.
//!
//! Provides a configurable mock implementation of the AssistantService port,
//! allowing orchestrator and HTTP tests to run without calling the real API.
//!
//! # Features
//!
//! - Scripted thread ids, run statuses and message lists (consumed in order)
//! - Error injection per operation
//! - Simulated per-call latency for budget testing
//! - Call tracking for verification, including posted messages per thread
//!
//! # Example
//!
//! ```ignore
//! let service = MockAssistantService::new()
//!     .with_statuses([RunStatus::Queued, RunStatus::InProgress, RunStatus::Completed])
//!     .with_messages(vec![ThreadMessage::text(MessageRole::Assistant, "Hi there")]);
//! ```

use async_trait::async_trait;
use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::time::sleep;

use crate::domain::{MessageRole, Run, RunId, RunStatus, ThreadId, ThreadMessage};
use crate::ports::{AssistantError, AssistantService};

/// One recorded call against the mock, in arrival order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecordedCall {
    CreateThread,
    PostMessage {
        thread: ThreadId,
        role: MessageRole,
        text: String,
    },
    CreateRun {
        thread: ThreadId,
        assistant_id: String,
    },
    RunStatus {
        thread: ThreadId,
        run: RunId,
    },
    ListMessages {
        thread: ThreadId,
    },
}

/// Scripted outcomes, consumed front to back.
#[derive(Debug)]
struct Scripts {
    thread_ids: VecDeque<Result<ThreadId, AssistantError>>,
    post_results: VecDeque<Result<(), AssistantError>>,
    run_results: VecDeque<Result<RunId, AssistantError>>,
    statuses: VecDeque<Result<RunStatus, AssistantError>>,
    message_lists: VecDeque<Result<Vec<ThreadMessage>, AssistantError>>,
    /// Repeated once `statuses` runs dry, so a run can sit in one state
    /// for as many polls as a test needs.
    last_status: RunStatus,
    counter: u32,
}

impl Default for Scripts {
    fn default() -> Self {
        Self {
            thread_ids: VecDeque::new(),
            post_results: VecDeque::new(),
            run_results: VecDeque::new(),
            statuses: VecDeque::new(),
            message_lists: VecDeque::new(),
            last_status: RunStatus::Completed,
            counter: 0,
        }
    }
}

/// Mock assistant service for testing.
///
/// Clones share the same scripts, call log and thread store.
#[derive(Debug, Clone, Default)]
pub struct MockAssistantService {
    scripts: Arc<Mutex<Scripts>>,
    /// Messages posted per thread, in arrival order.
    threads: Arc<Mutex<HashMap<ThreadId, Vec<(MessageRole, String)>>>>,
    /// Call history for verification.
    calls: Arc<Mutex<Vec<RecordedCall>>>,
    /// Simulated latency per call.
    delay: Duration,
}

impl MockAssistantService {
    /// Creates a new mock with no scripted outcomes.
    pub fn new() -> Self {
        Self::default()
    }

    /// Scripts the id returned by the next `create_thread` call.
    pub fn with_thread_id(self, id: impl Into<String>) -> Self {
        self.scripts
            .lock()
            .unwrap()
            .thread_ids
            .push_back(Ok(ThreadId::new(id)));
        self
    }

    /// Scripts a failure for the next `create_thread` call.
    pub fn with_thread_error(self, error: AssistantError) -> Self {
        self.scripts
            .lock()
            .unwrap()
            .thread_ids
            .push_back(Err(error));
        self
    }

    /// Scripts a failure for the next `post_message` call.
    pub fn with_post_error(self, error: AssistantError) -> Self {
        self.scripts
            .lock()
            .unwrap()
            .post_results
            .push_back(Err(error));
        self
    }

    /// Scripts a failure for the next `create_run` call.
    pub fn with_run_error(self, error: AssistantError) -> Self {
        self.scripts
            .lock()
            .unwrap()
            .run_results
            .push_back(Err(error));
        self
    }

    /// Scripts the next status observation (first one is the initial status
    /// returned by `create_run`).
    pub fn with_status(self, status: RunStatus) -> Self {
        self.scripts.lock().unwrap().statuses.push_back(Ok(status));
        self
    }

    /// Scripts a sequence of status observations.
    pub fn with_statuses(self, statuses: impl IntoIterator<Item = RunStatus>) -> Self {
        {
            let mut scripts = self.scripts.lock().unwrap();
            for status in statuses {
                scripts.statuses.push_back(Ok(status));
            }
        }
        self
    }

    /// Scripts a failure for the next status observation.
    pub fn with_status_error(self, error: AssistantError) -> Self {
        self.scripts.lock().unwrap().statuses.push_back(Err(error));
        self
    }

    /// Scripts the list returned by the next `list_messages` call.
    pub fn with_messages(self, messages: Vec<ThreadMessage>) -> Self {
        self.scripts
            .lock()
            .unwrap()
            .message_lists
            .push_back(Ok(messages));
        self
    }

    /// Scripts a failure for the next `list_messages` call.
    pub fn with_messages_error(self, error: AssistantError) -> Self {
        self.scripts
            .lock()
            .unwrap()
            .message_lists
            .push_back(Err(error));
        self
    }

    /// Sets simulated latency per call.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    /// Returns the number of calls made to this service.
    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    /// Returns all recorded calls.
    pub fn get_calls(&self) -> Vec<RecordedCall> {
        self.calls.lock().unwrap().clone()
    }

    /// Returns how many threads `create_thread` has issued.
    pub fn created_thread_count(&self) -> usize {
        self.calls
            .lock()
            .unwrap()
            .iter()
            .filter(|call| matches!(call, RecordedCall::CreateThread))
            .count()
    }

    /// Returns the messages posted to a thread, in arrival order.
    pub fn posted_messages(&self, thread: &ThreadId) -> Vec<(MessageRole, String)> {
        self.threads
            .lock()
            .unwrap()
            .get(thread)
            .cloned()
            .unwrap_or_default()
    }

    fn record(&self, call: RecordedCall) {
        self.calls.lock().unwrap().push(call);
    }

    async fn simulate_latency(&self) {
        if !self.delay.is_zero() {
            sleep(self.delay).await;
        }
    }
}

#[async_trait]
impl AssistantService for MockAssistantService {
    async fn create_thread(&self) -> Result<ThreadId, AssistantError> {
        self.record(RecordedCall::CreateThread);
        self.simulate_latency().await;

        let next = {
            let mut scripts = self.scripts.lock().unwrap();
            scripts.thread_ids.pop_front().unwrap_or_else(|| {
                scripts.counter += 1;
                Ok(ThreadId::new(format!("thread_mock_{}", scripts.counter)))
            })
        };
        let id = next?;
        self.threads
            .lock()
            .unwrap()
            .entry(id.clone())
            .or_default();
        Ok(id)
    }

    async fn post_message(
        &self,
        thread: &ThreadId,
        role: MessageRole,
        text: &str,
    ) -> Result<(), AssistantError> {
        self.record(RecordedCall::PostMessage {
            thread: thread.clone(),
            role,
            text: text.to_string(),
        });
        self.simulate_latency().await;

        let next = self
            .scripts
            .lock()
            .unwrap()
            .post_results
            .pop_front()
            .unwrap_or(Ok(()));
        next?;

        self.threads
            .lock()
            .unwrap()
            .entry(thread.clone())
            .or_default()
            .push((role, text.to_string()));
        Ok(())
    }

    async fn create_run(
        &self,
        thread: &ThreadId,
        assistant_id: &str,
    ) -> Result<Run, AssistantError> {
        self.record(RecordedCall::CreateRun {
            thread: thread.clone(),
            assistant_id: assistant_id.to_string(),
        });
        self.simulate_latency().await;

        let mut scripts = self.scripts.lock().unwrap();
        let id = match scripts.run_results.pop_front() {
            Some(result) => result?,
            None => {
                scripts.counter += 1;
                RunId::new(format!("run_mock_{}", scripts.counter))
            }
        };
        let status = match scripts.statuses.pop_front() {
            Some(Ok(status)) => {
                scripts.last_status = status;
                status
            }
            Some(Err(error)) => return Err(error),
            None => scripts.last_status,
        };
        Ok(Run::new(id, status))
    }

    async fn run_status(
        &self,
        thread: &ThreadId,
        run: &RunId,
    ) -> Result<RunStatus, AssistantError> {
        self.record(RecordedCall::RunStatus {
            thread: thread.clone(),
            run: run.clone(),
        });
        self.simulate_latency().await;

        let mut scripts = self.scripts.lock().unwrap();
        match scripts.statuses.pop_front() {
            Some(Ok(status)) => {
                scripts.last_status = status;
                Ok(status)
            }
            Some(Err(error)) => Err(error),
            None => Ok(scripts.last_status),
        }
    }

    async fn list_messages(&self, thread: &ThreadId) -> Result<Vec<ThreadMessage>, AssistantError> {
        self.record(RecordedCall::ListMessages {
            thread: thread.clone(),
        });
        self.simulate_latency().await;

        let next = self.scripts.lock().unwrap().message_lists.pop_front();
        match next {
            Some(result) => result,
            None => Ok(vec![ThreadMessage::text(
                MessageRole::Assistant,
                "Mock reply",
            )]),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn issues_sequential_thread_ids_by_default() {
        let service = MockAssistantService::new();

        let t1 = service.create_thread().await.unwrap();
        let t2 = service.create_thread().await.unwrap();

        assert_eq!(t1.as_str(), "thread_mock_1");
        assert_eq!(t2.as_str(), "thread_mock_2");
        assert_eq!(service.created_thread_count(), 2);
    }

    #[tokio::test]
    async fn scripted_thread_id_is_used_first() {
        let service = MockAssistantService::new().with_thread_id("thread_scripted");

        let id = service.create_thread().await.unwrap();
        assert_eq!(id.as_str(), "thread_scripted");
    }

    #[tokio::test]
    async fn statuses_are_consumed_in_order_then_repeat() {
        let service = MockAssistantService::new()
            .with_statuses([RunStatus::Queued, RunStatus::InProgress, RunStatus::Completed]);
        let thread = ThreadId::new("thread_1");

        let run = service.create_run(&thread, "asst_1").await.unwrap();
        assert_eq!(run.status, RunStatus::Queued);

        let s1 = service.run_status(&thread, &run.id).await.unwrap();
        let s2 = service.run_status(&thread, &run.id).await.unwrap();
        let s3 = service.run_status(&thread, &run.id).await.unwrap();

        assert_eq!(s1, RunStatus::InProgress);
        assert_eq!(s2, RunStatus::Completed);
        // Queue exhausted: the last status repeats.
        assert_eq!(s3, RunStatus::Completed);
    }

    #[tokio::test]
    async fn posted_messages_accumulate_per_thread() {
        let service = MockAssistantService::new();
        let thread = service.create_thread().await.unwrap();

        service
            .post_message(&thread, MessageRole::User, "hello")
            .await
            .unwrap();
        service
            .post_message(&thread, MessageRole::User, "again")
            .await
            .unwrap();

        let posted = service.posted_messages(&thread);
        assert_eq!(
            posted,
            vec![
                (MessageRole::User, "hello".to_string()),
                (MessageRole::User, "again".to_string()),
            ]
        );
    }

    #[tokio::test]
    async fn scripted_error_surfaces_and_message_is_not_stored() {
        let service = MockAssistantService::new().with_post_error(AssistantError::Status {
            status: 500,
            body: "boom".to_string(),
        });
        let thread = ThreadId::new("thread_1");

        let result = service
            .post_message(&thread, MessageRole::User, "hello")
            .await;
        assert!(matches!(
            result,
            Err(AssistantError::Status { status: 500, .. })
        ));
        assert!(service.posted_messages(&thread).is_empty());
    }

    #[tokio::test]
    async fn default_message_list_contains_an_assistant_reply() {
        let service = MockAssistantService::new();
        let thread = ThreadId::new("thread_1");

        let messages = service.list_messages(&thread).await.unwrap();
        assert_eq!(messages.len(), 1);
        assert!(messages[0].role.is_assistant());
    }

    #[tokio::test]
    async fn records_calls_in_order() {
        let service = MockAssistantService::new();
        let thread = service.create_thread().await.unwrap();
        service
            .post_message(&thread, MessageRole::User, "hi")
            .await
            .unwrap();
        service.create_run(&thread, "asst_1").await.unwrap();

        let calls = service.get_calls();
        assert_eq!(calls.len(), 3);
        assert_eq!(calls[0], RecordedCall::CreateThread);
        assert!(matches!(calls[1], RecordedCall::PostMessage { .. }));
        assert!(matches!(calls[2], RecordedCall::CreateRun { .. }));
    }
}
