use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use interactions::builder::{
    CreateActionRow,
    CreateAttachment,
    CreateAutocompleteChoice,
    CreateInputText,
    CreateInteractionResponseMessage,
    CreateModal,
};
use interactions::http::{LightMethod, Request, Transport};
use interactions::interactions_endpoint::Settings;
use interactions::model::application::{
    IllegalTransition,
    InputTextStyle,
    Interaction,
    InteractionType,
    ResponseState,
    TimeWindow,
    Transition,
};
use interactions::model::id::MessageId;
use interactions::model::ValidationError;
use interactions::{Error, Result};
use serde_json::{json, Value};

#[derive(Debug)]
struct Call {
    method: LightMethod,
    url: String,
    body: Option<Value>,
    files: Vec<String>,
}

/// Records every request and answers like Discord would.
#[derive(Default)]
struct Recorder {
    calls: Mutex<Vec<Call>>,
}

impl Recorder {
    fn take(&self) -> Vec<Call> {
        std::mem::take(&mut *self.calls.lock().unwrap())
    }
}

#[async_trait]
impl Transport for Recorder {
    async fn request(&self, request: Request<'_>) -> Result<Option<Value>> {
        let call = Call {
            method: request.method(),
            url: request.url(),
            body: request.body_ref().map(|body| serde_json::from_slice(body).unwrap()),
            files: request.files_ref().iter().map(|file| file.filename.clone()).collect(),
        };

        let response = if call.method == LightMethod::Delete || call.url.ends_with("/callback") {
            None
        } else {
            Some(json!({"id": "900", "channel_id": "400", "content": "ok"}))
        };

        self.calls.lock().unwrap().push(call);
        Ok(response)
    }
}

fn payload(kind: InteractionType, data: Value) -> Value {
    json!({
        "id": "100",
        "application_id": "200",
        "type": u8::from(kind),
        "token": "tok",
        "channel_id": "400",
        "user": {"id": "500", "username": "ferris"},
        "data": data,
    })
}

fn interaction(kind: InteractionType, data: Value) -> (Interaction, Arc<Recorder>) {
    let recorder = Arc::new(Recorder::default());
    let interaction =
        Interaction::new(payload(kind, data), recorder.clone(), &Settings::default()).unwrap();
    (interaction, recorder)
}

fn command() -> (Interaction, Arc<Recorder>) {
    interaction(InteractionType::Command, json!({"id": "1", "name": "greet"}))
}

fn text(content: &str) -> CreateInteractionResponseMessage {
    CreateInteractionResponseMessage::new().content(content).unwrap()
}

#[tokio::test]
async fn reply_once() {
    let (mut interaction, recorder) = command();

    interaction.reply(text("hello").ephemeral(true)).await.unwrap();
    assert_eq!(interaction.state(), ResponseState::Acknowledged);

    let calls = recorder.take();
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].method, LightMethod::Post);
    assert_eq!(calls[0].url, "https://discord.com/api/v10/interactions/100/tok/callback");
    assert_eq!(calls[0].body, Some(json!({"type": 4, "data": {"content": "hello", "flags": 64}})));

    let err = interaction.reply(text("again")).await.unwrap_err();
    assert!(matches!(
        err,
        Error::IllegalTransition(IllegalTransition::AlreadyAcknowledged {
            attempted: Transition::Reply
        })
    ));

    // The state is checked before the payload.
    let err = interaction.defer_reply(false).await.unwrap_err();
    assert!(matches!(err, Error::IllegalTransition(_)));
    let err = interaction.reply(CreateInteractionResponseMessage::new()).await.unwrap_err();
    assert!(matches!(err, Error::IllegalTransition(_)));

    assert!(recorder.take().is_empty());
}

#[tokio::test]
async fn responses_must_fit_the_interaction_type() {
    let (mut modal, recorder) = interaction(
        InteractionType::Modal,
        json!({"custom_id": "feedback", "components": []}),
    );
    let form = CreateModal::new("again", "Again").unwrap().add_row(row("field")).unwrap();
    let err = modal.show_modal(form).await.unwrap_err();
    assert!(matches!(
        err,
        Error::IllegalTransition(IllegalTransition::WrongInteractionType {
            attempted: Transition::ShowModal,
            kind: InteractionType::Modal,
        })
    ));
    assert!(matches!(modal.defer_update().await, Err(Error::IllegalTransition(_))));

    let (mut autocomplete, _) = interaction(InteractionType::Autocomplete, json!({"name": "x"}));
    assert!(matches!(autocomplete.reply(text("no")).await, Err(Error::IllegalTransition(_))));

    let (mut command, _) = command();
    assert!(matches!(command.update(text("no")).await, Err(Error::IllegalTransition(_))));
    assert!(matches!(command.send_autocomplete([]).await, Err(Error::IllegalTransition(_))));

    // A rejected response leaves the interaction unacknowledged.
    assert_eq!(modal.state(), ResponseState::Unsent);
    modal.reply(text("thanks")).await.unwrap();
    assert_eq!(recorder.take().len(), 1);
}

#[tokio::test]
async fn empty_messages_are_rejected() {
    let (mut interaction, recorder) = command();

    let err = interaction.reply(CreateInteractionResponseMessage::new()).await.unwrap_err();
    assert!(matches!(err, Error::Validation(ValidationError::EmptyMessage)));
    assert_eq!(interaction.state(), ResponseState::Unsent);

    interaction.defer_reply(true).await.unwrap();
    let err = interaction.follow_up(CreateInteractionResponseMessage::new()).await.unwrap_err();
    assert!(matches!(err, Error::Validation(ValidationError::EmptyMessage)));

    let calls = recorder.take();
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].body, Some(json!({"type": 5, "data": {"flags": 64}})));
}

#[tokio::test]
async fn edits_and_follow_ups() {
    let (mut interaction, recorder) = command();
    interaction.defer_reply(false).await.unwrap();
    recorder.take();

    for i in 0..3 {
        let message = interaction.edit_reply(text(&format!("step {i}"))).await.unwrap();
        assert_eq!(message.id, Some(MessageId::new(900)));
    }

    let follow_up = interaction.follow_up(text("more")).await.unwrap();
    let id = follow_up.id.unwrap();
    interaction.edit_follow_up(id, text("edited")).await.unwrap();
    interaction.delete_follow_up(id).await.unwrap();
    interaction.delete_reply().await.unwrap();

    let calls = recorder.take();
    let summary: Vec<_> = calls.iter().map(|call| (call.method, call.url.as_str())).collect();
    let original = "https://discord.com/api/v10/webhooks/200/tok/messages/@original";
    assert_eq!(summary, [
        (LightMethod::Patch, original),
        (LightMethod::Patch, original),
        (LightMethod::Patch, original),
        (LightMethod::Post, "https://discord.com/api/v10/webhooks/200/tok?wait=true"),
        (LightMethod::Patch, "https://discord.com/api/v10/webhooks/200/tok/messages/900"),
        (LightMethod::Delete, "https://discord.com/api/v10/webhooks/200/tok/messages/900"),
        (LightMethod::Delete, original),
    ]);
    assert_eq!(calls[2].body, Some(json!({"content": "step 2"})));
    assert_eq!(calls[5].body, None);
}

#[tokio::test]
async fn component_updates() {
    let (mut interaction, recorder) = interaction(
        InteractionType::Component,
        json!({"custom_id": "next", "component_type": 2}),
    );
    interaction.update(text("page 2")).await.unwrap();

    let calls = recorder.take();
    assert_eq!(calls[0].body, Some(json!({"type": 7, "data": {"content": "page 2"}})));
    assert!(matches!(interaction.defer_update().await, Err(Error::IllegalTransition(_))));
}

fn row(custom_id: &str) -> CreateActionRow {
    CreateActionRow::input_text(
        CreateInputText::new(InputTextStyle::Paragraph, "Feedback", custom_id).unwrap(),
    )
}

#[tokio::test]
async fn modal_round_trip() {
    let (mut interaction, recorder) = command();
    let modal = CreateModal::new("feedback", "Tell us").unwrap().add_row(row("text")).unwrap();
    interaction.show_modal(modal).await.unwrap();

    let calls = recorder.take();
    let body = calls[0].body.as_ref().unwrap();
    assert_eq!(body["type"], 9);
    assert_eq!(body["data"]["custom_id"], "feedback");
    assert_eq!(body["data"]["components"][0]["components"][0]["custom_id"], "text");

    // The submission arrives as a new interaction carrying the same custom ids.
    let (submission, _) = interaction_from_submission();
    assert_eq!(submission.custom_id.as_deref(), Some("feedback"));
    let fields = submission.modal_components().unwrap();
    assert_eq!(fields.get_value_by_id("text"), Some("Great library"));
    assert_eq!(fields.get_data_by_id("missing"), None);
}

fn interaction_from_submission() -> (Interaction, Arc<Recorder>) {
    interaction(
        InteractionType::Modal,
        json!({
            "custom_id": "feedback",
            "components": [{
                "type": 1,
                "components": [{"type": 4, "custom_id": "text", "value": "Great library"}],
            }],
        }),
    )
}

#[tokio::test]
async fn autocomplete_choices() {
    let (mut interaction, recorder) = interaction(
        InteractionType::Autocomplete,
        json!({
            "name": "search",
            "options": [{"name": "query", "type": 3, "value": "ru", "focused": true}],
        }),
    );

    let focused = interaction.options().unwrap().get_focused().unwrap();
    assert_eq!(focused.name, "query");
    assert_eq!(focused.value.as_str(), Some("ru"));

    let choices = ["rust", "ruby"].map(|name| CreateAutocompleteChoice::new(name, name).unwrap());
    interaction.send_autocomplete(choices).await.unwrap();

    let calls = recorder.take();
    assert_eq!(
        calls[0].body,
        Some(json!({"type": 8, "data": {"choices": [
            {"name": "rust", "value": "rust"},
            {"name": "ruby", "value": "ruby"},
        ]}}))
    );
}

#[tokio::test]
async fn files_are_uploaded() {
    let (mut interaction, recorder) = command();
    interaction.defer_reply(false).await.unwrap();
    recorder.take();

    let message = CreateInteractionResponseMessage::new()
        .add_file(CreateAttachment::bytes(b"a,b".to_vec(), "report.csv"));
    interaction.edit_reply(message).await.unwrap();

    let calls = recorder.take();
    assert_eq!(calls[0].files, ["report.csv"]);
    assert_eq!(
        calls[0].body,
        Some(json!({"attachments": [{"id": 0, "filename": "report.csv"}]}))
    );
}

#[tokio::test(start_paused = true)]
async fn acknowledgement_deadline() {
    let (mut interaction, recorder) = command();

    tokio::time::advance(Duration::from_secs(4)).await;
    let err = interaction.reply(text("late")).await.unwrap_err();
    assert!(matches!(err, Error::TimeWindowExpired(TimeWindow::Acknowledgement)));
    assert_eq!(interaction.state(), ResponseState::Unsent);
    assert!(recorder.take().is_empty());

    // Follow-ups only depend on the token.
    interaction.follow_up(text("still here")).await.unwrap();
}

#[tokio::test(start_paused = true)]
async fn token_lifetime() {
    let (mut interaction, recorder) = command();
    interaction.defer_reply(false).await.unwrap();

    tokio::time::advance(Duration::from_secs(14 * 60)).await;
    interaction.edit_reply(text("done")).await.unwrap();

    tokio::time::advance(Duration::from_secs(60)).await;
    let err = interaction.edit_reply(text("too late")).await.unwrap_err();
    assert!(matches!(err, Error::TimeWindowExpired(TimeWindow::Token)));
    assert!(matches!(
        interaction.delete_reply().await,
        Err(Error::TimeWindowExpired(TimeWindow::Token))
    ));
    assert_eq!(recorder.take().len(), 2);
}

#[tokio::test(start_paused = true)]
async fn custom_settings() {
    let recorder = Arc::new(Recorder::default());
    let settings = Settings::new().acknowledgement_deadline(Duration::from_millis(100));
    let mut interaction = Interaction::new(
        payload(InteractionType::Command, json!({"name": "x"})),
        recorder.clone(),
        &settings,
    )
    .unwrap();

    tokio::time::advance(Duration::from_millis(150)).await;
    assert!(matches!(
        interaction.defer_reply(false).await,
        Err(Error::TimeWindowExpired(TimeWindow::Acknowledgement))
    ));
}
