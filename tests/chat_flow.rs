//! Integration tests for the geminius chat core.
//!
//! Most tests drive sessions from synthetic fragment streams and need no
//! network. The live tests at the bottom require GEMINIUS_API_KEY in the
//! environment and skip themselves otherwise.

use futures::stream;

use geminius::chat::{ChatConfig, ChatSession, Renderer, SessionId, SessionRegistry};
use geminius::{
    Config, Content, Error, Gemini, GenerateContentRequest, KnownModel, Model, Result, Role,
    SharedClient, TextFragment,
};

/// Renderer that captures everything in memory.
#[derive(Default)]
struct CaptureRenderer {
    messages: Vec<(Role, String)>,
    errors: Vec<String>,
    current: Option<(Role, String)>,
}

impl Renderer for CaptureRenderer {
    fn begin_message(&mut self, role: Role) {
        self.current = Some((role, String::new()));
    }

    fn print_text(&mut self, text: &str) {
        if let Some((_, body)) = self.current.as_mut() {
            body.push_str(text);
        }
    }

    fn finish_message(&mut self) {
        if let Some(message) = self.current.take() {
            self.messages.push(message);
        }
    }

    fn print_info(&mut self, _info: &str) {}

    fn print_error(&mut self, error: &str) {
        self.errors.push(error.to_string());
    }
}

fn test_client() -> SharedClient {
    SharedClient::from_client(Gemini::new(Some("test-key".to_string())).unwrap())
}

fn test_session() -> ChatSession {
    ChatSession::new(test_client(), ChatConfig::default())
}

fn ok_fragments(parts: &[&str]) -> Vec<Result<TextFragment>> {
    parts.iter().map(|p| Ok(p.to_string())).collect()
}

#[tokio::test]
async fn message_log_alternates_and_grows_two_per_turn() {
    let mut session = test_session();
    let mut renderer = CaptureRenderer::default();

    for i in 0..4 {
        let prompt = format!("question {i}");
        let source = stream::iter(ok_fragments(&["answer ", &i.to_string()]));
        session.stream_turn(&prompt, source, &mut renderer).await;
        assert_eq!(session.message_count(), (i + 1) * 2);
    }

    for (i, message) in session.messages().iter().enumerate() {
        let expected = if i % 2 == 0 { Role::User } else { Role::Model };
        assert_eq!(message.role, expected);
    }
}

#[tokio::test]
async fn rendered_text_matches_logged_reply() {
    let mut session = test_session();
    let mut renderer = CaptureRenderer::default();
    let source = stream::iter(ok_fragments(&["The answer", " is ", "42."]));

    let outcome = session
        .stream_turn("what is the answer?", source, &mut renderer)
        .await;

    assert_eq!(outcome.text(), "The answer is 42.");
    assert_eq!(
        renderer.messages,
        vec![(Role::Model, "The answer is 42.".to_string())]
    );
    assert_eq!(session.messages()[1].content, "The answer is 42.");
}

#[tokio::test]
async fn interruption_keeps_partial_as_final_reply() {
    let mut session = test_session();
    let mut renderer = CaptureRenderer::default();
    let mut source = ok_fragments(&["partial ", "reply"]);
    source.push(Err(Error::stream_interrupted("connection reset", None)));
    source.push(Ok("never delivered".to_string()));

    let outcome = session
        .stream_turn("hello", stream::iter(source), &mut renderer)
        .await;

    assert!(outcome.is_interrupted());
    // The partial text is logged exactly as a complete reply would be.
    assert_eq!(session.message_count(), 2);
    assert_eq!(session.messages()[1].content, "partial reply");
    // The interruption is reported through the outcome, never the log or
    // the transcript.
    assert!(renderer.errors.is_empty());
    assert!(
        session
            .messages()
            .iter()
            .all(|m| !m.content.contains("connection reset"))
    );
}

#[tokio::test]
async fn reset_discards_history_from_later_requests() {
    let mut session = test_session();
    let mut renderer = CaptureRenderer::default();

    let source = stream::iter(ok_fragments(&["old reply"]));
    session.stream_turn("old prompt", source, &mut renderer).await;
    session.reset();

    let source = stream::iter(ok_fragments(&["new reply"]));
    session.stream_turn("new prompt", source, &mut renderer).await;

    let messages = session.messages();
    assert_eq!(messages.len(), 2);
    assert!(messages.iter().all(|m| !m.content.contains("old")));
}

#[tokio::test]
async fn replay_reproduces_the_whole_transcript() {
    let mut session = test_session();
    let mut live = CaptureRenderer::default();

    let source = stream::iter(ok_fragments(&["hi there"]));
    session.stream_turn("hello", source, &mut live).await;
    let source = stream::iter(ok_fragments(&["still here"]));
    session.stream_turn("you there?", source, &mut live).await;

    let mut replayed = CaptureRenderer::default();
    session.replay(&mut replayed);
    assert_eq!(
        replayed.messages,
        vec![
            (Role::User, "hello".to_string()),
            (Role::Model, "hi there".to_string()),
            (Role::User, "you there?".to_string()),
            (Role::Model, "still here".to_string()),
        ]
    );
}

#[test]
fn shared_client_clones_are_referentially_equal() {
    let client = test_client();
    let clone = client.clone();
    assert!(client.same_client(&clone));

    let other = test_client();
    assert!(!client.same_client(&other));
}

#[test]
fn registry_isolates_logs_but_shares_the_client() {
    let mut registry = SessionRegistry::new(test_client(), ChatConfig::default());

    registry.get_or_create("alice");
    registry.get_or_create("bob");

    let alice_id = SessionId::new("alice");
    let bob_id = SessionId::new("bob");
    {
        let alice = registry.get(&alice_id).unwrap();
        let bob = registry.get(&bob_id).unwrap();
        assert!(alice.client().same_client(bob.client()));
    }

    assert!(registry.destroy(&bob_id));
    assert!(registry.get(&bob_id).is_none());
    assert!(registry.get(&alice_id).is_some());
}

#[test]
fn placeholder_api_key_is_rejected() {
    let err = Config::from_toml_str(
        r#"
            [gemini]
            api_key = "your-api-key-here"
        "#,
        "secrets.toml",
    )
    .unwrap_err();
    assert!(err.is_config_placeholder());
    assert!(err.to_string().contains("secrets.toml"));
}

#[test]
fn malformed_store_is_a_config_error() {
    let err = Config::from_toml_str("[gemini\napi_key = \"k\"", "secrets.toml").unwrap_err();
    assert!(err.is_config());
    assert!(err.is_config_missing());
    assert!(err.to_string().contains("secrets.toml"));
}

#[test]
fn missing_api_key_is_reported_with_instruction() {
    let err = Config::from_toml_str("[gemini]\n", "secrets.toml").unwrap_err();
    assert!(err.is_config_missing());
    assert!(err.to_string().contains("api_key"));
}

#[test]
fn configured_model_and_temperature_flow_into_sessions() {
    let config = Config::from_toml_str(
        r#"
            [gemini]
            api_key = "k"
            model = "gemini-2.5-flash"
            temperature = 0.3
        "#,
        "secrets.toml",
    )
    .unwrap();
    let session = ChatSession::new(test_client(), ChatConfig::from_config(&config));
    assert_eq!(session.model(), &Model::Known(KnownModel::Gemini25Flash));
    assert_eq!(session.temperature(), 0.3);
}

// Live tests below require GEMINIUS_API_KEY to be set.

#[tokio::test]
#[ignore] // Requires a real API key in GEMINIUS_API_KEY
async fn live_generate_round_trip() {
    let api_key = std::env::var("GEMINIUS_API_KEY").ok();
    if api_key.is_none() {
        eprintln!("Skipping test: GEMINIUS_API_KEY not set");
        return;
    }

    let client = Gemini::new(api_key).expect("Failed to create client");
    let request =
        GenerateContentRequest::new(vec![Content::user("Say 'test passed' and nothing else")]);
    let response = client
        .generate(&Model::Known(KnownModel::Gemini20Flash), request)
        .await;
    assert!(response.is_ok(), "Request should succeed with valid API key");
}

#[tokio::test]
#[ignore] // Requires a real API key in GEMINIUS_API_KEY
async fn live_streaming_request_opens() {
    let api_key = std::env::var("GEMINIUS_API_KEY").ok();
    if api_key.is_none() {
        eprintln!("Skipping test: GEMINIUS_API_KEY not set");
        return;
    }

    let client = Gemini::new(api_key).expect("Failed to create client");
    let request = GenerateContentRequest::new(vec![Content::user("Count to 3")]);
    let stream = client
        .stream_generate(&Model::Known(KnownModel::Gemini20Flash), request)
        .await;
    assert!(stream.is_ok(), "Stream request should succeed");
}
