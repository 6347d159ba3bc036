use std::path::Path;

use tokio::fs::File;
use tokio::io::AsyncReadExt;

use crate::error::Result;

/// A file to upload along with a message.
///
/// Files are sent as `multipart/form-data` parts named `files[n]`. To show an uploaded image in an
/// embed, refer to it with [`CreateEmbed::attachment`].
///
/// [Discord docs](https://discord.com/developers/docs/reference#uploading-files)
///
/// [`CreateEmbed::attachment`]: super::CreateEmbed::attachment
#[derive(Clone, Debug, PartialEq, Eq)]
#[non_exhaustive]
#[must_use]
pub struct CreateAttachment {
    pub data: Vec<u8>,
    pub filename: String,
    pub description: Option<String>,
}

impl CreateAttachment {
    /// Builds an [`CreateAttachment`] from the raw attachment data.
    pub fn bytes(data: impl Into<Vec<u8>>, filename: impl Into<String>) -> CreateAttachment {
        CreateAttachment {
            data: data.into(),
            filename: filename.into(),
            description: None,
        }
    }

    /// Builds an [`CreateAttachment`] by reading a local file.
    ///
    /// # Errors
    ///
    /// [`Error::Io`] if reading the file fails.
    ///
    /// [`Error::Io`]: crate::Error::Io
    pub async fn path(path: impl AsRef<Path>) -> Result<CreateAttachment> {
        let mut file = File::open(path.as_ref()).await?;
        let mut data = Vec::new();
        file.read_to_end(&mut data).await?;

        let filename = path.as_ref().file_name().ok_or_else(|| {
            std::io::Error::new(
                std::io::ErrorKind::Other,
                "attachment path must not be a directory",
            )
        })?;

        Ok(CreateAttachment::bytes(data, filename.to_string_lossy()))
    }

    /// Sets a description for the file (max 1024 characters), used as alt text.
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

/// The `attachments` entry Discord expects in the JSON payload for every uploaded file.
#[derive(Clone, Debug, Serialize)]
pub(crate) struct AttachmentMetadata<'a> {
    pub id: usize,
    pub filename: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<&'a str>,
}

pub(crate) fn attachment_metadata(files: &[CreateAttachment]) -> Vec<AttachmentMetadata<'_>> {
    files
        .iter()
        .enumerate()
        .map(|(id, file)| AttachmentMetadata {
            id,
            filename: &file.filename,
            description: file.description.as_deref(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::json::{json, to_value};

    #[test]
    fn metadata() {
        let files = [
            CreateAttachment::bytes(b"a".to_vec(), "a.txt"),
            CreateAttachment::bytes(b"png".to_vec(), "chart.png").description("A chart"),
        ];

        assert_eq!(
            to_value(attachment_metadata(&files)).unwrap(),
            json!([
                {"id": 0, "filename": "a.txt"},
                {"id": 1, "filename": "chart.png", "description": "A chart"},
            ])
        );
    }

    #[tokio::test]
    async fn from_path() {
        let path = std::env::temp_dir().join("interactions-attachment-test.txt");
        std::fs::write(&path, b"hello").unwrap();

        let attachment = CreateAttachment::path(&path).await.unwrap();
        assert_eq!(attachment.data, b"hello");
        assert_eq!(attachment.filename, "interactions-attachment-test.txt");

        std::fs::remove_file(path).unwrap();
    }
}
