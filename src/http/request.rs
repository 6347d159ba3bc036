use super::routing::Route;
use super::LightMethod;
use crate::builder::CreateAttachment;
use crate::internal::prelude::*;
use crate::json;

/// A single REST call, ready to be performed by a [`Transport`].
///
/// [`Transport`]: super::Transport
#[derive(Clone, Debug)]
#[must_use]
pub struct Request<'a> {
    pub(super) method: LightMethod,
    pub(super) route: Route<'a>,
    pub(super) body: Option<Vec<u8>>,
    pub(super) files: Vec<CreateAttachment>,
    pub(super) params: Vec<(&'static str, String)>,
}

impl<'a> Request<'a> {
    pub fn new(method: LightMethod, route: Route<'a>) -> Self {
        Self {
            method,
            route,
            body: None,
            files: Vec::new(),
            params: Vec::new(),
        }
    }

    /// Serializes `payload` as the JSON body of the request.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Json`] if the payload cannot be serialized.
    pub fn json(mut self, payload: &impl serde::Serialize) -> Result<Self> {
        self.body = Some(json::to_string(payload)?.into_bytes());
        Ok(self)
    }

    /// Files to upload. A request with files is sent as `multipart/form-data`, with the JSON body
    /// in the `payload_json` part.
    pub fn files(mut self, files: Vec<CreateAttachment>) -> Self {
        self.files = files;
        self
    }

    /// Adds a query parameter.
    pub fn param(mut self, key: &'static str, value: impl Into<String>) -> Self {
        self.params.push((key, value.into()));
        self
    }

    #[must_use]
    pub fn method(&self) -> LightMethod {
        self.method
    }

    #[must_use]
    pub fn route(&self) -> Route<'a> {
        self.route
    }

    #[must_use]
    pub fn body_ref(&self) -> Option<&[u8]> {
        self.body.as_deref()
    }

    #[must_use]
    pub fn files_ref(&self) -> &[CreateAttachment] {
        &self.files
    }

    #[must_use]
    pub fn params_ref(&self) -> &[(&'static str, String)] {
        &self.params
    }

    /// The full url, including query parameters.
    #[must_use]
    pub fn url(&self) -> String {
        let mut url = self.route.path().into_owned();
        for (i, (key, value)) in self.params.iter().enumerate() {
            url.push(if i == 0 { '?' } else { '&' });
            url.push_str(key);
            url.push('=');
            url.push_str(value);
        }
        url
    }
}
