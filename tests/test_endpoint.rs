use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use ed25519_dalek::{Signer as _, SigningKey};
use interactions::builder::{CreateAttachment, CreateInteractionResponseMessage};
use interactions::constants::{SIGNATURE_HEADER, TIMESTAMP_HEADER};
use interactions::http::{Request, Transport};
use interactions::interactions_endpoint::{
    Endpoint,
    EndpointRequest,
    EndpointResponse,
    InteractionHandler,
    Settings,
};
use interactions::model::application::{Interaction, TimeWindow};
use interactions::{Error, Result};
use serde_json::{json, Value};

const TIMESTAMP: &str = "1700000000";

struct NoTransport;

#[async_trait]
impl Transport for NoTransport {
    async fn request(&self, _: Request<'_>) -> Result<Option<Value>> {
        Ok(None)
    }
}

#[derive(Clone, Copy)]
enum Behaviour {
    Reply,
    ReplyWithFile,
    Ignore,
    ReplyLate,
}

/// Counts its calls and keeps the outcome of every reply it attempted.
#[derive(Clone)]
struct Handler {
    behaviour: Behaviour,
    calls: Arc<Mutex<Vec<Result<()>>>>,
}

impl Handler {
    fn new(behaviour: Behaviour) -> Self {
        Self {
            behaviour,
            calls: Arc::default(),
        }
    }

    fn outcomes(&self) -> Vec<Result<()>> {
        std::mem::take(&mut *self.calls.lock().unwrap())
    }
}

#[async_trait]
impl InteractionHandler for Handler {
    async fn interaction(&self, mut interaction: Interaction) {
        let message = CreateInteractionResponseMessage::new().content("Pong!").unwrap();
        let outcome = match self.behaviour {
            Behaviour::Reply => interaction.reply(message).await,
            Behaviour::ReplyWithFile => {
                let file = CreateAttachment::bytes(b"hello".to_vec(), "hello.txt");
                interaction.reply(message.add_file(file)).await
            },
            Behaviour::Ignore => Ok(()),
            Behaviour::ReplyLate => {
                tokio::time::sleep(Duration::from_secs(5)).await;
                interaction.reply(message).await
            },
        };
        self.calls.lock().unwrap().push(outcome);
    }
}

struct Signed {
    key: SigningKey,
}

impl Signed {
    fn new() -> Self {
        Self {
            key: SigningKey::from_bytes(&[42; 32]),
        }
    }

    fn public_key(&self) -> String {
        hex(self.key.verifying_key().as_bytes())
    }

    fn sign(&self, body: &[u8]) -> String {
        hex(&self.key.sign(&[TIMESTAMP.as_bytes(), body].concat()).to_bytes())
    }

    fn endpoint(&self, handler: &Handler) -> Endpoint {
        Endpoint::new(&self.public_key(), Arc::new(NoTransport), handler.clone()).unwrap()
    }
}

fn hex(bytes: &[u8]) -> String {
    bytes.iter().map(|b| format!("{b:02x}")).collect()
}

/// Swaps the first hex digit for a different one, changing a single signature byte.
fn flip_first_digit(signature: &str) -> String {
    let replacement = if signature.starts_with('0') { "1" } else { "0" };
    format!("{replacement}{}", &signature[1..])
}

fn command() -> Vec<u8> {
    serde_json::to_vec(&json!({
        "id": "100",
        "application_id": "200",
        "type": 2,
        "token": "tok",
        "data": {"id": "1", "name": "ping"},
    }))
    .unwrap()
}

async fn send(signed: &Signed, endpoint: &Endpoint, body: &[u8]) -> EndpointResponse {
    let signature = signed.sign(body);
    endpoint.handle(EndpointRequest::new(Some(&signature), Some(TIMESTAMP), body)).await
}

fn json_body(response: &EndpointResponse) -> Value {
    serde_json::from_slice(&response.body).unwrap()
}

#[tokio::test]
async fn rejects_bad_signatures() {
    let signed = Signed::new();
    let handler = Handler::new(Behaviour::Reply);
    let endpoint = signed.endpoint(&handler);
    let body = command();
    let signature = signed.sign(&body);
    let tampered = flip_first_digit(&signature);

    let requests = [
        EndpointRequest::new(None, Some(TIMESTAMP), &body),
        EndpointRequest::new(Some(&signature), None, &body),
        EndpointRequest::new(Some(&signature), Some("1700000001"), &body),
        EndpointRequest::new(Some(&signature), Some(TIMESTAMP), br#"{"type":1}"#),
        EndpointRequest::new(Some("not hex"), Some(TIMESTAMP), &body),
        EndpointRequest::new(Some(&tampered), Some(TIMESTAMP), &body),
    ];
    for request in requests {
        let response = endpoint.handle(request).await;
        assert_eq!(response.status, 401);
        assert_eq!(response.body, b"invalid request signature");
        assert_eq!(response.content_type(), "text/plain; charset=utf-8");
    }

    assert!(handler.outcomes().is_empty());
}

#[tokio::test]
async fn answers_pings() {
    let signed = Signed::new();
    let handler = Handler::new(Behaviour::Reply);
    let endpoint = signed.endpoint(&handler);

    let body = br#"{"id":"1","application_id":"2","type":1,"token":"tok","version":1}"#;
    let response = send(&signed, &endpoint, body).await;
    assert_eq!(response.status, 200);
    assert_eq!(response.content_type(), "application/json");
    assert_eq!(json_body(&response), json!({"type": 1}));

    tokio::task::yield_now().await;
    assert!(handler.outcomes().is_empty());
}

#[tokio::test]
async fn rejects_malformed_payloads() {
    let signed = Signed::new();
    let handler = Handler::new(Behaviour::Reply);
    let endpoint = signed.endpoint(&handler);

    let bodies: [&[u8]; 3] = [b"{not json", br#"{"type":2}"#, b"[]"];
    for body in bodies {
        let response = send(&signed, &endpoint, body).await;
        assert_eq!(response.status, 400);
        assert_eq!(response.body, b"invalid interaction payload");
    }

    let body = br#"{"id":"1","application_id":"2","type":42,"token":"tok"}"#;
    let response = send(&signed, &endpoint, body).await;
    assert_eq!(response.status, 400);
    assert_eq!(response.body, b"unsupported interaction type");

    assert!(handler.outcomes().is_empty());
}

#[tokio::test]
async fn replies_become_the_response() {
    let signed = Signed::new();
    let handler = Handler::new(Behaviour::Reply);
    let endpoint = signed.endpoint(&handler);

    let body = command();
    let signature = signed.sign(&body);
    let headers = [(SIGNATURE_HEADER, signature.as_str()), (TIMESTAMP_HEADER, TIMESTAMP)];
    let request = EndpointRequest::from_headers(
        |name| headers.iter().find(|(header, _)| *header == name).map(|(_, value)| *value),
        &body,
    );

    let response = endpoint.handle(request).await;
    assert_eq!(response.status, 200);
    assert_eq!(json_body(&response), json!({"type": 4, "data": {"content": "Pong!"}}));
    assert!(response.files.is_empty());

    tokio::task::yield_now().await;
    let outcomes = handler.outcomes();
    assert_eq!(outcomes.len(), 1);
    assert!(outcomes[0].is_ok());
}

#[tokio::test]
async fn files_are_returned_separately() {
    let signed = Signed::new();
    let handler = Handler::new(Behaviour::ReplyWithFile);
    let endpoint = signed.endpoint(&handler);

    let response = send(&signed, &endpoint, &command()).await;
    assert_eq!(response.status, 200);
    assert_eq!(
        json_body(&response),
        json!({"type": 4, "data": {
            "content": "Pong!",
            "attachments": [{"id": 0, "filename": "hello.txt"}],
        }})
    );
    assert_eq!(response.files.len(), 1);
    assert_eq!(response.files[0].data, b"hello");
}

#[tokio::test]
async fn unacknowledged_interactions_fail() {
    let signed = Signed::new();
    let handler = Handler::new(Behaviour::Ignore);
    let endpoint = signed.endpoint(&handler);

    let response = send(&signed, &endpoint, &command()).await;
    assert_eq!(response.status, 500);
    assert_eq!(response.body, b"interaction was not acknowledged");
}

#[tokio::test(start_paused = true)]
async fn late_replies_fail() {
    let signed = Signed::new();
    let handler = Handler::new(Behaviour::ReplyLate);
    let endpoint = signed.endpoint(&handler);

    let response = send(&signed, &endpoint, &command()).await;
    assert_eq!(response.status, 500);
    assert_eq!(response.body, b"interaction was not acknowledged in time");

    // The handler finds out once it tries to reply.
    tokio::time::sleep(Duration::from_secs(5)).await;
    let outcomes = handler.outcomes();
    assert_eq!(outcomes.len(), 1);
    assert!(matches!(outcomes[0], Err(Error::TimeWindowExpired(TimeWindow::Acknowledgement))));
}

#[tokio::test(start_paused = true)]
async fn custom_deadline() {
    let signed = Signed::new();
    let handler = Handler::new(Behaviour::ReplyLate);
    let settings = Settings::new().acknowledgement_deadline(Duration::from_secs(10));
    let endpoint = signed.endpoint(&handler).settings(settings);

    let response = send(&signed, &endpoint, &command()).await;
    assert_eq!(response.status, 200);
    assert_eq!(json_body(&response)["type"], 4);
}

#[test]
fn invalid_public_key() {
    let handler = Handler::new(Behaviour::Reply);
    let result = Endpoint::new("not a key", Arc::new(NoTransport), handler);
    assert!(matches!(result, Err(Error::InvalidKey(_))));
}
