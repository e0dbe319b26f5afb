//! Integration tests for [`Responder`] over the in-memory assistant API.

use std::sync::Arc;
use std::time::Duration;

use assistant_client::testing::FakeAssistantApi;
use assistant_client::{AssistantClient, RunWaiter};
use gateway_core::{MessageRole, RunStatus};
use responder::{
    AssistantProfile, AssistantProfiles, Responder, ASSISTANT_UNAVAILABLE, NO_RESPONSE,
    PROCESSING_ERROR, RUN_FAILED,
};
use tokio::time::Instant;
use tokio_util::sync::CancellationToken;

fn responder_for(api: &Arc<FakeAssistantApi>) -> Responder {
    Responder::new(
        AssistantClient::new(api.clone()),
        RunWaiter::new(Duration::from_secs(1), Duration::from_secs(30)),
    )
}

fn primary() -> AssistantProfile {
    AssistantProfiles::new("asst_primary", "asst_analyzer").primary
}

/// **Test: Happy path returns the assistant's newest message.**
///
/// **Setup:** Run completes on the third poll; thread reply "Hi, how can I help?".
///
/// **Expected:** Reply text returned; the user message was appended to "T1".
#[tokio::test(start_paused = true)]
async fn test_process_response_returns_reply() {
    let api = Arc::new(
        FakeAssistantApi::new()
            .complete_on_poll(3)
            .await
            .with_reply("Hi, how can I help?")
            .await,
    );

    let reply = responder_for(&api)
        .process_response(&primary(), "T1", MessageRole::User, "hello")
        .await
        .expect("append succeeds");

    assert_eq!(reply, "Hi, how can I help?");
    assert_eq!(FakeAssistantApi::count(&api.run_polls), 3);
    let (thread, role, text) = api.last_message().await.expect("message appended");
    assert_eq!(thread, "T1");
    assert_eq!(role, MessageRole::User);
    assert_eq!(text, "hello");
}

/// **Test: A failed append propagates and starts no run.**
#[tokio::test]
async fn test_append_failure_propagates() {
    let api = Arc::new(FakeAssistantApi::new().failing_create_message());

    let result = responder_for(&api)
        .process_response(&primary(), "T1", MessageRole::User, "hello")
        .await;

    assert!(result.is_err());
    assert_eq!(FakeAssistantApi::count(&api.runs_created), 0);
}

/// **Test: A run that never completes yields the execution fallback after the timeout.**
#[tokio::test(start_paused = true)]
async fn test_timeout_yields_run_failed() {
    let api = Arc::new(FakeAssistantApi::new().with_reply("late").await);

    let start = Instant::now();
    let reply = responder_for(&api)
        .process_response(&primary(), "T1", MessageRole::User, "hello")
        .await
        .unwrap();

    assert_eq!(reply, RUN_FAILED);
    assert!(start.elapsed() >= Duration::from_secs(30));
}

/// **Test: A terminal failure status yields the execution fallback.**
#[tokio::test(start_paused = true)]
async fn test_failed_run_yields_run_failed() {
    let api = Arc::new(
        FakeAssistantApi::new()
            .with_statuses(vec![Some(RunStatus::Expired)])
            .await,
    );

    let reply = responder_for(&api).execute_and_fetch("T1", &primary()).await;

    assert_eq!(reply, RUN_FAILED);
}

/// **Test: An unavailable assistant yields the assistant fallback and starts no run.**
#[tokio::test]
async fn test_missing_assistant_yields_fallback() {
    let api = Arc::new(FakeAssistantApi::new().failing_assistant());

    let reply = responder_for(&api)
        .process_response(&primary(), "T1", MessageRole::User, "hello")
        .await
        .unwrap();

    assert_eq!(reply, ASSISTANT_UNAVAILABLE);
    assert_eq!(FakeAssistantApi::count(&api.runs_created), 0);
}

/// **Test: A completed run on an empty thread yields the no-response fallback.**
#[tokio::test(start_paused = true)]
async fn test_empty_thread_yields_no_response() {
    let api = Arc::new(FakeAssistantApi::new().complete_on_poll(1).await);

    let reply = responder_for(&api).execute_and_fetch("T1", &primary()).await;

    assert_eq!(reply, NO_RESPONSE);
}

/// **Test: Run creation and message listing errors yield the generic fallback.**
#[tokio::test(start_paused = true)]
async fn test_api_errors_yield_processing_error() {
    let api = Arc::new(FakeAssistantApi::new().failing_create_run());
    assert_eq!(
        responder_for(&api).execute_and_fetch("T1", &primary()).await,
        PROCESSING_ERROR
    );

    let api = Arc::new(
        FakeAssistantApi::new()
            .complete_on_poll(1)
            .await
            .failing_list_messages(),
    );
    assert_eq!(
        responder_for(&api).execute_and_fetch("T1", &primary()).await,
        PROCESSING_ERROR
    );
}

/// **Test: Shutdown cancels an in-flight wait and returns the execution fallback.**
#[tokio::test(start_paused = true)]
async fn test_shutdown_cancels_wait() {
    let api = Arc::new(FakeAssistantApi::new());
    let shutdown = CancellationToken::new();
    let responder = responder_for(&api).with_shutdown(shutdown.clone());

    let trigger = shutdown.clone();
    tokio::spawn(async move {
        tokio::time::sleep(Duration::from_secs(2)).await;
        trigger.cancel();
    });

    let start = Instant::now();
    let reply = responder.execute_and_fetch("T1", &primary()).await;

    assert_eq!(reply, RUN_FAILED);
    assert!(start.elapsed() < Duration::from_secs(3));
}

/// **Test: The analyzer profile runs the analyzer assistant.**
#[tokio::test(start_paused = true)]
async fn test_analyzer_profile_uses_its_credential() {
    let api = Arc::new(
        FakeAssistantApi::new()
            .complete_on_poll(1)
            .await
            .with_reply("summary")
            .await,
    );
    let responder = responder_for(&api);
    let profiles = AssistantProfiles::new("asst_primary", "asst_analyzer");

    let reply = responder
        .process_response(&profiles.analyzer, "TA", MessageRole::User, "analyze")
        .await
        .unwrap();

    assert_eq!(reply, "summary");
    let cached = responder.client().get_assistant("asst_analyzer").await;
    assert_eq!(cached.map(|a| a.id), Some("asst_analyzer".to_string()));
    assert_eq!(FakeAssistantApi::count(&api.assistant_fetches), 1);
}

/// **Test: Fallback replies carry the exact fixed texts callers match on.**
#[tokio::test(start_paused = true)]
async fn test_fallback_texts_are_fixed() {
    let never_completes = Arc::new(FakeAssistantApi::new());
    let reply = responder_for(&never_completes)
        .process_response(&primary(), "T1", MessageRole::User, "hello")
        .await
        .unwrap();
    assert_eq!(reply, "execution timed out/failed");

    let no_assistant = Arc::new(FakeAssistantApi::new().failing_assistant());
    assert_eq!(
        responder_for(&no_assistant).execute_and_fetch("T1", &primary()).await,
        "assistant retrieval failed"
    );

    let empty = Arc::new(FakeAssistantApi::new().complete_on_poll(1).await);
    assert_eq!(
        responder_for(&empty).execute_and_fetch("T1", &primary()).await,
        "no response received"
    );

    let broken = Arc::new(FakeAssistantApi::new().failing_create_run());
    assert_eq!(
        responder_for(&broken).execute_and_fetch("T1", &primary()).await,
        "error processing request"
    );
}
