use std::sync::Arc;
use std::time::Duration;

use lexdoc::application::ports::{LlmClient, TOP_P};
use lexdoc::application::services::ChatService;
use lexdoc::domain::{
    AnalysisConfig, AnalysisConfigUpdate, AnalysisType, Language, Message, MessageRole, Session,
    SessionError, SessionState,
};

use crate::support::{
    FailingLlmClient, RecordingLlmClient, StalledLlmClient, session_with_document,
};

fn chat_service<L: LlmClient + 'static>(client: Arc<L>, replay_history: bool) -> ChatService<L> {
    ChatService::new(client, replay_history, Duration::ZERO)
}

#[tokio::test]
async fn given_loaded_session_when_asking_then_appends_question_and_answer() {
    let client = Arc::new(RecordingLlmClient::new("The term is 12 months."));
    let service = chat_service(Arc::clone(&client), true);
    let mut session = session_with_document("The lease term is twelve months.");

    let exchange = service.ask(&mut session, "What is the term?").await.unwrap();

    assert_eq!(exchange.question.content, "What is the term?");
    assert_eq!(exchange.answer.content, "The term is 12 months.");
    let roles: Vec<MessageRole> = session.messages().iter().map(|m| m.role).collect();
    assert_eq!(roles, vec![MessageRole::User, MessageRole::Assistant]);
}

#[tokio::test]
async fn given_live_config_when_asking_then_prompt_and_params_follow_it() {
    let client = Arc::new(RecordingLlmClient::new("ok"));
    let service = chat_service(Arc::clone(&client), true);
    let mut session = session_with_document("Indemnity clause.");
    session
        .config
        .apply(AnalysisConfigUpdate {
            analysis_type: Some(AnalysisType::RiskAssessment),
            language: Some(Language::German),
            temperature: Some(0.7),
            max_output_tokens: Some(500),
        })
        .unwrap();

    service.ask(&mut session, "Any risks?").await.unwrap();

    let call = &client.calls()[0];
    assert!(call.prompt.contains("Indemnity clause."));
    assert!(call.prompt.contains("Always respond in German."));
    assert!(call.prompt.contains(AnalysisType::RiskAssessment.directive()));
    assert!(call.prompt.ends_with("User question: Any risks?"));
    assert_eq!(call.params.temperature, 0.7);
    assert_eq!(call.params.max_output_tokens, 500);
    assert_eq!(call.params.top_p, TOP_P);
}

#[tokio::test]
async fn given_failing_provider_when_asking_then_answer_is_error_string() {
    let service = chat_service(Arc::new(FailingLlmClient), true);
    let mut session = session_with_document("Text");

    let exchange = service.ask(&mut session, "Question").await.unwrap();

    assert!(exchange.answer.content.starts_with("Error: "));
    assert_eq!(session.messages().len(), 2);
    assert_eq!(session.state(), SessionState::DocumentLoaded);
}

#[tokio::test]
async fn given_no_document_when_asking_then_rejects_without_calling_provider() {
    let client = Arc::new(RecordingLlmClient::new("unused"));
    let service = chat_service(Arc::clone(&client), true);
    let mut session = Session::new(AnalysisConfig::default());

    let result = service.ask(&mut session, "Hello?").await;

    assert_eq!(result.unwrap_err(), SessionError::NoDocument);
    assert!(client.calls().is_empty());
    assert!(session.messages().is_empty());
}

#[tokio::test]
async fn given_whitespace_question_when_asking_then_rejects_as_empty() {
    let client = Arc::new(RecordingLlmClient::new("unused"));
    let service = chat_service(Arc::clone(&client), true);
    let mut session = session_with_document("Text");

    let result = service.ask(&mut session, " \n\t ").await;

    assert_eq!(result.unwrap_err(), SessionError::EmptyQuestion);
    assert!(client.calls().is_empty());
}

#[tokio::test]
async fn given_prior_turns_when_replay_enabled_then_history_skips_introduction() {
    let client = Arc::new(RecordingLlmClient::new("answer"));
    let service = chat_service(Arc::clone(&client), true);
    let mut session = session_with_document("Text");
    session.append_message(Message::assistant("I've analyzed the document..."));

    service.ask(&mut session, "First?").await.unwrap();
    service.ask(&mut session, "Second?").await.unwrap();

    let calls = client.calls();
    assert!(calls[0].history.is_empty());
    assert_eq!(
        calls[1].history,
        vec![
            (MessageRole::User, "First?".to_string()),
            (MessageRole::Assistant, "answer".to_string()),
        ]
    );
}

#[tokio::test]
async fn given_prior_turns_when_replay_disabled_then_history_is_empty() {
    let client = Arc::new(RecordingLlmClient::new("answer"));
    let service = chat_service(Arc::clone(&client), false);
    let mut session = session_with_document("Text");

    service.ask(&mut session, "First?").await.unwrap();
    service.ask(&mut session, "Second?").await.unwrap();

    assert!(client.calls().iter().all(|call| call.history.is_empty()));
}

#[tokio::test]
async fn given_cleared_history_when_asking_then_provider_sees_no_prior_turns() {
    let client = Arc::new(RecordingLlmClient::new("answer"));
    let service = chat_service(Arc::clone(&client), true);
    let mut session = session_with_document("Text");
    service.ask(&mut session, "First?").await.unwrap();

    session.clear_history();
    service.ask(&mut session, "Again?").await.unwrap();

    assert!(client.calls()[1].history.is_empty());
    assert_eq!(session.messages().len(), 2);
}

#[tokio::test]
async fn given_turn_dropped_while_waiting_for_provider_when_done_then_history_is_unchanged() {
    let service = chat_service(Arc::new(StalledLlmClient), true);
    let mut session = session_with_document("Rent is due monthly.");
    session.append_message(Message::assistant("Intro"));

    let outcome =
        tokio::time::timeout(Duration::from_millis(50), service.ask(&mut session, "First?")).await;

    assert!(outcome.is_err());
    let contents: Vec<&str> = session.messages().iter().map(|m| m.content.as_str()).collect();
    assert_eq!(contents, vec!["Intro"]);
    assert_eq!(session.state(), SessionState::DocumentLoaded);
}

#[tokio::test]
async fn given_turn_dropped_during_pacing_delay_when_done_then_history_is_unchanged() {
    let client = Arc::new(RecordingLlmClient::new("answer"));
    let service = ChatService::new(Arc::clone(&client), true, Duration::from_secs(5));
    let mut session = session_with_document("Rent is due monthly.");

    let outcome =
        tokio::time::timeout(Duration::from_millis(50), service.ask(&mut session, "First?")).await;

    assert!(outcome.is_err());
    assert_eq!(client.calls().len(), 1);
    assert!(session.messages().is_empty());
}
