use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use skipper::{
    dispatch::{
        error::{DispatchError, internal_error},
        registry::{CommentHandlerPort, InMemoryHandlerRegistry},
    },
    forge::types::{CommentAction, CommentEvent, IssueState, Repo},
    protocol::{ClientMessage, parse_client_message},
};

#[derive(Default)]
struct RecordingHandler {
    seen: Mutex<Vec<CommentEvent>>,
}

impl RecordingHandler {
    fn seen_events(&self) -> Vec<CommentEvent> {
        self.seen.lock().expect("lock").clone()
    }
}

#[async_trait]
impl CommentHandlerPort for RecordingHandler {
    fn name(&self) -> &'static str {
        "recording"
    }

    async fn handle(&self, event: &CommentEvent) -> Result<(), DispatchError> {
        self.seen.lock().expect("lock").push(event.clone());
        Ok(())
    }
}

struct AlwaysFailingHandler;

#[async_trait]
impl CommentHandlerPort for AlwaysFailingHandler {
    fn name(&self) -> &'static str {
        "broken"
    }

    async fn handle(&self, _event: &CommentEvent) -> Result<(), DispatchError> {
        Err(internal_error("this handler always fails"))
    }
}

fn event() -> CommentEvent {
    CommentEvent {
        repo: Repo::new("acme", "widget"),
        number: 7,
        is_pull_request: true,
        issue_state: IssueState::Open,
        action: CommentAction::Created,
        body: "/skip".to_string(),
        html_url: "https://forge.example/acme/widget/pull/7#comment-9".to_string(),
        author: "bob".to_string(),
    }
}

#[tokio::test]
async fn failing_handler_does_not_starve_the_others() {
    let registry = InMemoryHandlerRegistry::new();
    let recording = Arc::new(RecordingHandler::default());

    // "broken" sorts before "recording", so the failure happens first.
    registry
        .register(Arc::new(AlwaysFailingHandler))
        .expect("registration should succeed");
    registry
        .register(Arc::clone(&recording) as Arc<dyn CommentHandlerPort>)
        .expect("registration should succeed");

    registry.dispatch(&event()).await;

    let seen = recording.seen_events();
    assert_eq!(seen.len(), 1);
    assert_eq!(seen[0].number, 7);
}

#[tokio::test]
async fn parsed_envelope_reaches_registered_handlers() {
    let registry = InMemoryHandlerRegistry::new();
    let recording = Arc::new(RecordingHandler::default());
    registry
        .register(Arc::clone(&recording) as Arc<dyn CommentHandlerPort>)
        .expect("registration should succeed");

    let line = r#"{
        "type": "comment",
        "repo": {"org": "acme", "name": "widget"},
        "number": 7,
        "is_pull_request": true,
        "issue_state": "open",
        "action": "created",
        "body": "/skip",
        "html_url": "https://forge.example/acme/widget/pull/7#comment-9",
        "author": "bob"
    }"#;
    let ClientMessage::Comment(parsed) =
        parse_client_message(line).expect("envelope should parse")
    else {
        panic!("expected a comment message");
    };

    registry.dispatch(&parsed).await;

    let seen = recording.seen_events();
    assert_eq!(seen.len(), 1);
    assert_eq!(seen[0].repo.full_name(), "acme/widget");
    assert_eq!(seen[0].body, "/skip");
}
