use reqwest::multipart::{Form, Part};

use super::HttpError;
use crate::builder::CreateAttachment;
use crate::internal::prelude::*;

/// Holder for multipart body. Contains files and the `payload_json` for creating requests with
/// attachments.
#[derive(Clone, Debug)]
pub(super) struct Multipart<'a> {
    pub files: &'a [CreateAttachment],
    /// JSON body that will be set as the form value as `payload_json`.
    pub payload_json: Option<&'a [u8]>,
}

impl Multipart<'_> {
    pub(super) fn build_form(&self) -> Result<Form> {
        let mut multipart = Form::new();

        for (file_num, file) in self.files.iter().enumerate() {
            // The part names must match the ids of the `attachments` metadata in the payload.
            let part = Part::bytes(file.data.clone()).file_name(file.filename.clone());
            multipart = multipart.part(format!("files[{file_num}]"), guess_mime_str(part, &file.filename)?);
        }

        if let Some(payload_json) = self.payload_json {
            let part = Part::bytes(payload_json.to_vec())
                .mime_str("application/json")
                .map_err(HttpError::from)?;
            multipart = multipart.part("payload_json", part);
        }

        Ok(multipart)
    }
}

fn guess_mime_str(part: Part, filename: &str) -> Result<Part> {
    // The mime type chosen is the same as what reqwest does internally when using Part::file(),
    // but it is not done for any of the other methods we use.
    // https://datatracker.ietf.org/doc/html/rfc7578#section-4.4
    let mime_type = mime_guess::from_path(filename).first_or_octet_stream();
    part.mime_str(mime_type.essence_str()).map_err(|e| HttpError::from(e).into())
}
