use std::borrow::Cow;

use crate::model::id::*;

/// A macro for defining routes. Takes as input a list of route definitions, and generates a
/// definition for the `Route` enum and implements methods on it.
macro_rules! routes {
    ($lt:lifetime, {
        $(
            $(#[doc = $doc:literal])*
            $name:ident { $($field_name:ident: $field_type:ty),* },
            $path:expr;
        )+
    }) => {
        #[derive(Clone, Copy, Debug, Eq, PartialEq)]
        #[non_exhaustive]
        pub enum Route<$lt> {
            $(
                $(#[doc = $doc])*
                $name { $($field_name: $field_type),* },
            )+
        }

        impl<$lt> Route<$lt> {
            /// The full url of the route, without query parameters.
            #[must_use]
            pub fn path(self) -> Cow<'static, str> {
                match self {
                    $(
                        Self::$name { $($field_name),* } => $path.into(),
                    )+
                }
            }
        }
    };
}

// This macro takes as input a list of route definitions, represented in the following way:
// 1. The first line defines an enum variant representing an endpoint.
// 2. The second line provides the url for that endpoint.
routes! ('a, {
    /// The initial response to an interaction.
    InteractionResponse { interaction_id: InteractionId, token: &'a str },
    api!("/interactions/{}/{}/callback", interaction_id, token);

    /// The message created by the initial response.
    WebhookOriginalInteractionResponse { application_id: ApplicationId, token: &'a str },
    api!("/webhooks/{}/{}/messages/@original", application_id, token);

    /// A single follow-up message.
    WebhookFollowupMessage { application_id: ApplicationId, token: &'a str, message_id: MessageId },
    api!("/webhooks/{}/{}/messages/{}", application_id, token, message_id);

    /// Creates follow-up messages.
    WebhookFollowupMessages { application_id: ApplicationId, token: &'a str },
    api!("/webhooks/{}/{}", application_id, token);
});

impl Route<'_> {
    /// The path with the interaction token masked, for logging.
    #[must_use]
    pub fn redacted_path(self) -> String {
        let token = match self {
            Self::InteractionResponse {
                token, ..
            }
            | Self::WebhookOriginalInteractionResponse {
                token, ..
            }
            | Self::WebhookFollowupMessage {
                token, ..
            }
            | Self::WebhookFollowupMessages {
                token, ..
            } => token,
        };

        let path = self.path();
        if token.is_empty() {
            path.into_owned()
        } else {
            path.replace(token, "{token}")
        }
    }
}
