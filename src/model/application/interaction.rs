use std::fmt;
use std::sync::Arc;

use serde::de::{Deserialize, DeserializeOwned};
use tokio::sync::oneshot;
use tokio::time::Instant;
#[cfg(feature = "tracing_instrument")]
use tracing::instrument;
use tracing::debug;

use super::{
    ComponentType,
    IllegalTransition,
    InteractionOptions,
    ModalComponents,
    ResponseState,
    TimeWindow,
    Transition,
};
use crate::builder::{
    CreateAutocompleteChoice,
    CreateInteractionResponse,
    CreateInteractionResponseMessage,
    CreateModal,
    Validate,
};
use crate::http::{LightMethod, Request, Route, Transport};
use crate::interactions_endpoint::Settings;
use crate::internal::prelude::*;
use crate::json::{decode_lenient, from_value};
use crate::model::channel::Message;
use crate::model::guild::GuildContext;
use crate::model::id::{ApplicationId, ChannelId, CommandId, GuildId, InteractionId, MessageId};
use crate::model::user::{Member, User};
use crate::model::Permissions;

enum_number! {
    /// The type of an Interaction.
    ///
    /// [Discord docs](https://discord.com/developers/docs/interactions/receiving-and-responding#interaction-object-interaction-type).
    #[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, PartialOrd, Ord, Deserialize, Serialize)]
    #[serde(from = "u8", into = "u8")]
    #[non_exhaustive]
    pub enum InteractionType {
        /// Sent by Discord to check the endpoint.
        Ping = 1,
        /// A slash command, or a user or message context menu command.
        Command = 2,
        /// A click on a button, or a choice in a select menu.
        Component = 3,
        /// A user typing into a command option with autocomplete.
        Autocomplete = 4,
        /// A modal form being submitted.
        Modal = 5,
        _ => Unknown(u8),
    }
}

/// Where the initial response goes.
enum Responder {
    /// Back through the pending HTTP response of the interactions endpoint.
    Webhook(Option<oneshot::Sender<CreateInteractionResponse>>),
    /// To the interaction callback route of the REST API.
    Callback,
}

#[derive(Deserialize)]
struct Identity {
    id: InteractionId,
    application_id: ApplicationId,
    #[serde(rename = "type")]
    kind: InteractionType,
    token: String,
}

/// An interaction received through the interactions endpoint, together with the means to answer
/// it.
///
/// Every interaction takes exactly one initial response ([`Self::reply`], [`Self::defer_reply`],
/// [`Self::defer_update`], [`Self::update`], [`Self::show_modal`] or
/// [`Self::send_autocomplete`]) within the acknowledgement deadline. Afterwards the reply can be
/// edited and follow-up messages sent for as long as the token is valid.
///
/// [Discord docs](https://discord.com/developers/docs/interactions/receiving-and-responding#interaction-object).
#[non_exhaustive]
pub struct Interaction {
    /// Id of the interaction.
    pub id: InteractionId,
    /// Id of the application this interaction is for.
    pub application_id: ApplicationId,
    /// The type of interaction.
    pub kind: InteractionType,
    /// A continuation token for responding to the interaction.
    pub token: String,
    /// The name of the invoked command.
    pub command_name: Option<String>,
    /// The Id of the invoked command.
    pub command_id: Option<CommandId>,
    /// The custom id of the clicked component or the submitted modal.
    pub custom_id: Option<String>,
    /// The type of the component that was interacted with.
    pub component_type: Option<ComponentType>,
    /// The values chosen in a select menu. Empty for anything else.
    pub values: Vec<String>,
    /// The guild the interaction was sent from, if any.
    pub guild: Option<GuildContext>,
    /// The user who invoked the interaction, taken from the member object in guilds.
    pub user: Option<User>,
    /// The member who invoked the interaction. Only present for interactions in guilds.
    pub member: Option<Member>,
    /// The channel the interaction was sent from.
    pub channel_id: Option<ChannelId>,
    /// The selected language of the invoking user.
    pub locale: Option<String>,
    /// The permissions the app or bot has within the channel the interaction was sent from.
    pub app_permissions: Option<Permissions>,
    /// The message the component was attached to.
    pub message: Option<Message>,
    /// The raw `data` object of the interaction.
    pub data: Option<Value>,
    options: Option<InteractionOptions>,
    modal_components: Option<ModalComponents>,
    state: ResponseState,
    received_at: Instant,
    settings: Settings,
    responder: Responder,
    http: Arc<dyn Transport>,
}

impl fmt::Debug for Interaction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Interaction")
            .field("id", &self.id)
            .field("application_id", &self.application_id)
            .field("kind", &self.kind)
            .field("command_name", &self.command_name)
            .field("custom_id", &self.custom_id)
            .field("guild", &self.guild)
            .field("channel_id", &self.channel_id)
            .field("state", &self.state)
            .finish_non_exhaustive()
    }
}

fn field<T: DeserializeOwned>(map: &mut JsonMap, key: &'static str) -> Option<T> {
    decode_lenient(key, map.remove(key)?)
}

impl Interaction {
    /// Builds an interaction whose initial response is sent through `http`, to the interaction
    /// callback route.
    ///
    /// Use this when the interaction reaches the application some other way than through
    /// [`Endpoint`]. The deadlines count from the moment of this call.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Json`] if the payload is not an object with a valid `id`,
    /// `application_id`, `type` and `token`. Malformed nested objects are discarded instead.
    ///
    /// [`Endpoint`]: crate::interactions_endpoint::Endpoint
    pub fn new(payload: Value, http: Arc<dyn Transport>, settings: &Settings) -> Result<Self> {
        Self::from_payload(payload, http, settings, Responder::Callback)
    }

    pub(crate) fn with_sender(
        payload: Value,
        http: Arc<dyn Transport>,
        settings: &Settings,
        sender: oneshot::Sender<CreateInteractionResponse>,
    ) -> Result<Self> {
        Self::from_payload(payload, http, settings, Responder::Webhook(Some(sender)))
    }

    fn from_payload(
        payload: Value,
        http: Arc<dyn Transport>,
        settings: &Settings,
        responder: Responder,
    ) -> Result<Self> {
        let identity = Identity::deserialize(&payload)?;
        let mut map = match payload {
            Value::Object(map) => map,
            _ => JsonMap::new(),
        };

        let data = map.remove("data").filter(Value::is_object);

        let member: Option<Member> = field(&mut map, "member");
        let user = field::<User>(&mut map, "user")
            .or_else(|| member.as_ref().and_then(|member| member.user.clone()));
        let app_permissions = field(&mut map, "app_permissions");
        let guild = field::<GuildId>(&mut map, "guild_id").map(|id| {
            GuildContext::new(id, field(&mut map, "guild_locale"), app_permissions)
        });

        let mut data_map = match &data {
            Some(Value::Object(data)) => data.clone(),
            _ => JsonMap::new(),
        };

        let options = matches!(identity.kind, InteractionType::Command | InteractionType::Autocomplete)
            .then(|| InteractionOptions::from_raw(data_map.remove("options")));
        let modal_components = (identity.kind == InteractionType::Modal)
            .then(|| ModalComponents::from_raw(data_map.remove("components")));

        Ok(Self {
            id: identity.id,
            application_id: identity.application_id,
            kind: identity.kind,
            token: identity.token,
            command_name: field(&mut data_map, "name"),
            command_id: field(&mut data_map, "id"),
            custom_id: field(&mut data_map, "custom_id"),
            component_type: field(&mut data_map, "component_type"),
            values: field(&mut data_map, "values").unwrap_or_default(),
            member: if guild.is_some() { member } else { None },
            guild,
            user,
            channel_id: field(&mut map, "channel_id"),
            locale: field(&mut map, "locale"),
            app_permissions,
            message: field(&mut map, "message"),
            data,
            options,
            modal_components,
            state: ResponseState::Unsent,
            received_at: Instant::now(),
            settings: settings.clone(),
            responder,
            http,
        })
    }

    /// Whether the initial response has been sent.
    #[must_use]
    pub fn state(&self) -> ResponseState {
        self.state
    }

    /// The options of a command or autocomplete interaction.
    #[must_use]
    pub fn options(&self) -> Option<&InteractionOptions> {
        self.options.as_ref()
    }

    /// The submitted fields of a modal interaction.
    #[must_use]
    pub fn modal_components(&self) -> Option<&ModalComponents> {
        self.modal_components.as_ref()
    }

    #[must_use]
    pub fn is_ping(&self) -> bool {
        self.kind == InteractionType::Ping
    }

    #[must_use]
    pub fn is_command(&self) -> bool {
        self.kind == InteractionType::Command
    }

    #[must_use]
    pub fn is_component(&self) -> bool {
        self.kind == InteractionType::Component
    }

    #[must_use]
    pub fn is_autocomplete(&self) -> bool {
        self.kind == InteractionType::Autocomplete
    }

    #[must_use]
    pub fn is_modal(&self) -> bool {
        self.kind == InteractionType::Modal
    }

    /// Whether the interaction was sent from a guild, rather than a direct message.
    #[must_use]
    pub fn is_in_guild(&self) -> bool {
        self.guild.is_some()
    }

    /// Responds with a message.
    ///
    /// # Errors
    ///
    /// Returns [`Error::IllegalTransition`] if the interaction was already acknowledged or is an
    /// autocomplete interaction, [`Error::Validation`] if the message is empty or invalid, and
    /// [`Error::TimeWindowExpired`] if the acknowledgement deadline has passed.
    #[cfg_attr(feature = "tracing_instrument", instrument(skip(self, message), fields(id = %self.id)))]
    pub async fn reply(&mut self, message: CreateInteractionResponseMessage) -> Result<()> {
        self.respond(Transition::Reply, CreateInteractionResponse::Message(message)).await
    }

    /// Acknowledges the interaction and shows the user a loading state. The actual reply is sent
    /// later with [`Self::edit_reply`].
    ///
    /// # Errors
    ///
    /// See [`Self::reply`].
    pub async fn defer_reply(&mut self, ephemeral: bool) -> Result<()> {
        let response = CreateInteractionResponse::Defer {
            ephemeral,
        };
        self.respond(Transition::DeferReply, response).await
    }

    /// Acknowledges a component interaction without a loading state. The message can be edited
    /// later with [`Self::edit_reply`].
    ///
    /// # Errors
    ///
    /// Returns [`Error::IllegalTransition`] for anything other than an unacknowledged component
    /// interaction, and [`Error::TimeWindowExpired`] if the acknowledgement deadline has passed.
    pub async fn defer_update(&mut self) -> Result<()> {
        self.respond(Transition::DeferUpdate, CreateInteractionResponse::Acknowledge).await
    }

    /// Edits the message the component was attached to.
    ///
    /// # Errors
    ///
    /// See [`Self::defer_update`]. Also returns [`Error::Validation`] for an empty or invalid
    /// message.
    pub async fn update(&mut self, message: CreateInteractionResponseMessage) -> Result<()> {
        self.respond(Transition::Update, CreateInteractionResponse::UpdateMessage(message)).await
    }

    /// Responds with a popup modal. Not available for modal submissions.
    ///
    /// # Errors
    ///
    /// Returns [`Error::IllegalTransition`] unless this is an unacknowledged command or component
    /// interaction, [`Error::Validation`] for an invalid modal, and
    /// [`Error::TimeWindowExpired`] if the acknowledgement deadline has passed.
    #[cfg_attr(feature = "tracing_instrument", instrument(skip(self, modal), fields(id = %self.id)))]
    pub async fn show_modal(&mut self, modal: CreateModal) -> Result<()> {
        self.respond(Transition::ShowModal, CreateInteractionResponse::Modal(modal)).await
    }

    /// Responds to an autocomplete interaction with up to 25 choices.
    ///
    /// # Errors
    ///
    /// Returns [`Error::IllegalTransition`] unless this is an unacknowledged autocomplete
    /// interaction, [`Error::Validation`] for too many choices, and
    /// [`Error::TimeWindowExpired`] if the acknowledgement deadline has passed.
    pub async fn send_autocomplete(
        &mut self,
        choices: impl IntoIterator<Item = CreateAutocompleteChoice>,
    ) -> Result<()> {
        let response = CreateInteractionResponse::Autocomplete(choices.into_iter().collect());
        self.respond(Transition::AutocompleteResult, response).await
    }

    async fn respond(
        &mut self,
        transition: Transition,
        mut response: CreateInteractionResponse,
    ) -> Result<()> {
        if self.state == ResponseState::Acknowledged {
            return Err(IllegalTransition::AlreadyAcknowledged {
                attempted: transition,
            }
            .into());
        }

        if !transition.allowed_for(self.kind) {
            return Err(IllegalTransition::WrongInteractionType {
                attempted: transition,
                kind: self.kind,
            }
            .into());
        }

        response.validate()?;

        if self.received_at.elapsed() >= self.settings.acknowledgement_deadline {
            return Err(TimeWindow::Acknowledgement.into());
        }

        debug_assert_eq!(response.kind(), transition.response_type());

        match &mut self.responder {
            Responder::Webhook(sender) => {
                // The endpoint drops the receiver once it stops waiting.
                let sender = sender.take().ok_or(TimeWindow::Acknowledgement)?;
                sender.send(response).map_err(|_| TimeWindow::Acknowledgement)?;
            },
            Responder::Callback => {
                let route = Route::InteractionResponse {
                    interaction_id: self.id,
                    token: &self.token,
                };
                let files = response.take_files();
                let request = Request::new(LightMethod::Post, route).json(&response)?.files(files);
                self.http.request(request).await?;
            },
        }

        self.state = ResponseState::Acknowledged;
        debug!("Sent {} response to interaction {}", transition, self.id);
        Ok(())
    }

    fn check_token(&self) -> Result<()> {
        if self.received_at.elapsed() >= self.settings.token_lifetime {
            return Err(TimeWindow::Token.into());
        }
        Ok(())
    }

    /// Edits the initial response, or sends the actual reply after [`Self::defer_reply`].
    ///
    /// # Errors
    ///
    /// Returns [`Error::Validation`] for an empty or invalid message,
    /// [`Error::TimeWindowExpired`] once the token expired, and [`Error::Http`] if Discord
    /// rejected the edit.
    #[cfg_attr(feature = "tracing_instrument", instrument(skip(self, message), fields(id = %self.id)))]
    pub async fn edit_reply(&self, message: CreateInteractionResponseMessage) -> Result<Message> {
        let route = Route::WebhookOriginalInteractionResponse {
            application_id: self.application_id,
            token: &self.token,
        };
        self.send_message(Request::new(LightMethod::Patch, route), message).await
    }

    /// Deletes the initial response.
    ///
    /// # Errors
    ///
    /// Returns [`Error::TimeWindowExpired`] once the token expired, and [`Error::Http`] if Discord
    /// rejected the request.
    pub async fn delete_reply(&self) -> Result<()> {
        self.check_token()?;
        let route = Route::WebhookOriginalInteractionResponse {
            application_id: self.application_id,
            token: &self.token,
        };
        self.http.request(Request::new(LightMethod::Delete, route)).await?;
        Ok(())
    }

    /// Sends a follow-up message.
    ///
    /// # Errors
    ///
    /// See [`Self::edit_reply`].
    #[cfg_attr(feature = "tracing_instrument", instrument(skip(self, message), fields(id = %self.id)))]
    pub async fn follow_up(&self, message: CreateInteractionResponseMessage) -> Result<Message> {
        let route = Route::WebhookFollowupMessages {
            application_id: self.application_id,
            token: &self.token,
        };
        let request = Request::new(LightMethod::Post, route).param("wait", "true");
        self.send_message(request, message).await
    }

    /// Edits a follow-up message.
    ///
    /// # Errors
    ///
    /// See [`Self::edit_reply`].
    pub async fn edit_follow_up(
        &self,
        message_id: impl Into<MessageId>,
        message: CreateInteractionResponseMessage,
    ) -> Result<Message> {
        let route = Route::WebhookFollowupMessage {
            application_id: self.application_id,
            token: &self.token,
            message_id: message_id.into(),
        };
        self.send_message(Request::new(LightMethod::Patch, route), message).await
    }

    /// Deletes a follow-up message.
    ///
    /// # Errors
    ///
    /// See [`Self::delete_reply`].
    pub async fn delete_follow_up(&self, message_id: impl Into<MessageId>) -> Result<()> {
        self.check_token()?;
        let route = Route::WebhookFollowupMessage {
            application_id: self.application_id,
            token: &self.token,
            message_id: message_id.into(),
        };
        self.http.request(Request::new(LightMethod::Delete, route)).await?;
        Ok(())
    }

    async fn send_message(
        &self,
        request: Request<'_>,
        mut message: CreateInteractionResponseMessage,
    ) -> Result<Message> {
        message.validate()?;
        self.check_token()?;

        let files = message.take_files();
        let request = request.json(&message)?.files(files);
        let value = self.http.request(request).await?;
        from_value(value.unwrap_or(Value::Null))
    }
}

#[cfg(test)]
mod tests {
    use async_trait::async_trait;

    use super::*;
    use crate::json::json;
    use crate::model::id::UserId;

    struct NoTransport;

    #[async_trait]
    impl Transport for NoTransport {
        async fn request(&self, _: Request<'_>) -> Result<Option<Value>> {
            panic!("unexpected request")
        }
    }

    fn parse(payload: Value) -> Result<Interaction> {
        Interaction::new(payload, Arc::new(NoTransport), &Settings::default())
    }

    fn base(kind: u8) -> Value {
        json!({
            "id": "100",
            "application_id": "200",
            "type": kind,
            "token": "token",
        })
    }

    #[test]
    fn interaction_type() {
        assert_eq!(InteractionType::from(5), InteractionType::Modal);
        assert_eq!(InteractionType::from(42), InteractionType::Unknown(42));
    }

    #[tokio::test]
    async fn guild_command() {
        let mut payload = base(2);
        payload["guild_id"] = json!("300");
        payload["guild_locale"] = json!("de");
        payload["app_permissions"] = json!("2048");
        payload["channel_id"] = json!("400");
        payload["locale"] = json!("en-US");
        payload["member"] = json!({"user": {"id": "500", "username": "ferris"}, "roles": []});
        payload["data"] = json!({
            "id": "600",
            "name": "greet",
            "options": [{"name": "who", "type": 3, "value": "world"}],
        });

        let interaction = parse(payload).unwrap();
        assert!(interaction.is_command());
        assert!(interaction.is_in_guild());
        assert_eq!(interaction.command_name.as_deref(), Some("greet"));
        assert_eq!(interaction.command_id, Some(CommandId::new(600)));
        assert_eq!(interaction.guild.as_ref().unwrap().id, GuildId::new(300));
        assert_eq!(interaction.guild.as_ref().unwrap().locale.as_deref(), Some("de"));
        assert_eq!(interaction.app_permissions, Some(Permissions::SEND_MESSAGES));
        assert_eq!(interaction.user.as_ref().unwrap().id, Some(UserId::new(500)));
        assert!(interaction.member.is_some());
        assert_eq!(interaction.channel_id, Some(ChannelId::new(400)));
        assert_eq!(interaction.locale.as_deref(), Some("en-US"));

        let options = interaction.options().unwrap();
        assert_eq!(options.get_string_option("who").unwrap().value.as_str(), Some("world"));
        assert!(interaction.modal_components().is_none());
        assert_eq!(interaction.state(), ResponseState::Unsent);
    }

    #[tokio::test]
    async fn direct_message_component() {
        let mut payload = base(3);
        payload["user"] = json!({"id": "500"});
        payload["member"] = json!({"user": {"id": "501"}});
        payload["message"] = json!({"id": "700", "content": "pick one"});
        payload["data"] = json!({
            "custom_id": "colour",
            "component_type": 3,
            "values": ["red", "blue"],
        });

        let interaction = parse(payload).unwrap();
        assert!(interaction.is_component());
        assert!(!interaction.is_in_guild());
        assert!(interaction.member.is_none());
        assert_eq!(interaction.user.as_ref().unwrap().id, Some(UserId::new(500)));
        assert_eq!(interaction.custom_id.as_deref(), Some("colour"));
        assert_eq!(interaction.component_type, Some(ComponentType::StringSelect));
        assert_eq!(interaction.values, ["red", "blue"]);
        assert_eq!(interaction.message.as_ref().unwrap().content, "pick one");
        assert!(interaction.options().is_none());
    }

    #[tokio::test]
    async fn modal_submit() {
        let mut payload = base(5);
        payload["data"] = json!({
            "custom_id": "feedback",
            "components": [{"type": 1, "components": [
                {"type": 4, "custom_id": "text", "value": "great"},
            ]}],
        });

        let interaction = parse(payload).unwrap();
        assert!(interaction.is_modal());
        let fields = interaction.modal_components().unwrap();
        assert_eq!(fields.get_value_by_id("text"), Some("great"));
        assert!(interaction.values.is_empty());
    }

    #[tokio::test]
    async fn lenient_nested_objects() {
        let mut payload = base(2);
        payload["user"] = json!("not a user");
        payload["member"] = json!([1, 2]);
        payload["message"] = json!(5);
        payload["guild_id"] = json!({"nested": true});

        let interaction = parse(payload).unwrap();
        assert!(interaction.user.is_none());
        assert!(interaction.member.is_none());
        assert!(interaction.message.is_none());
        assert!(interaction.guild.is_none());
        assert!(interaction.options().unwrap().is_empty());
    }

    #[tokio::test]
    async fn identity_fields_are_required() {
        for key in ["id", "application_id", "type", "token"] {
            let mut payload = base(2);
            payload.as_object_mut().unwrap().remove(key);
            assert!(matches!(parse(payload), Err(Error::Json(_))), "missing {key}");
        }

        assert!(matches!(parse(json!([])), Err(Error::Json(_))));
    }

    #[tokio::test]
    async fn unknown_types_are_kept() {
        let interaction = parse(base(9)).unwrap();
        assert_eq!(interaction.kind, InteractionType::Unknown(9));
    }
}
