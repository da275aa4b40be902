//! Input resolution, transformation dispatch, and reply delivery.
//!
//! One linear pipeline per invocation: resolve the input to a payload,
//! validate the extension, transform, then branch on size for delivery.
//! Any failure terminates the pipeline with a single user-visible message.

use crate::fetch::{FetchError, FileFetcher};
use shroud_core::{CodePayload, FileKind, INLINE_REPLY_LIMIT};
use shroud_transform::TransformError;
use std::path::PathBuf;
use std::sync::Arc;
use thiserror::Error;

/// Usage guidance embedded in the no-input error reply.
pub const USAGE: &str = "You must provide either a code snippet using the `code` option or upload a file using the `file` option.\n\n**Example usage:**\n- `/obf code: console.log(\"Hello\")`\n- `/obf file: myscript.js`";

/// An uploaded file reference: its reported name and a fetchable URL.
#[derive(Clone, Debug)]
pub struct RemoteFile {
    pub name: String,
    pub url: String,
}

/// The two optional command options; zero, one, or both may be present.
#[derive(Clone, Debug, Default)]
pub struct ObfInput {
    pub code: Option<String>,
    pub file: Option<RemoteFile>,
}

/// A finished reply: inline code block or downloadable attachment.
#[derive(Clone, Debug)]
pub enum ObfReply {
    Inline { content: String },
    Attachment { filename: String, bytes: Vec<u8> },
}

/// Dispatcher error; `Display` is the user-facing reply text.
#[derive(Debug, Error)]
pub enum DispatchError {
    #[error("{}", USAGE)]
    NoInput,

    #[error("unsupported file type: `{0}`")]
    UnsupportedType(String),

    #[error("failed to fetch file: {0}")]
    Fetch(#[from] FetchError),

    #[error("failed to process code:\n```\n{0}\n```")]
    Transform(#[from] TransformError),

    #[error("failed to prepare attachment: {0}")]
    Spool(String),
}

/// Runs command invocations end to end.
pub struct Dispatcher {
    fetcher: Arc<dyn FileFetcher>,
    spool_dir: PathBuf,
}

impl Dispatcher {
    pub fn new(fetcher: Arc<dyn FileFetcher>, spool_dir: impl Into<PathBuf>) -> Self {
        Self {
            fetcher,
            spool_dir: spool_dir.into(),
        }
    }

    /// Handle one invocation: resolve, transform, deliver.
    pub async fn handle(&self, input: ObfInput) -> Result<ObfReply, DispatchError> {
        let payload = self.resolve(input).await?;
        let result = shroud_transform::transform(payload.kind, &payload.source)?;
        self.deliver(payload.kind, result).await
    }

    // An uploaded file takes precedence: it determines the kind, and any
    // inline text is ignored without a warning once a file is supplied.
    async fn resolve(&self, input: ObfInput) -> Result<CodePayload, DispatchError> {
        if let Some(file) = input.file {
            let ext = extension_of(&file.name);
            let kind = FileKind::from_extension(&ext)
                .ok_or(DispatchError::UnsupportedType(ext))?;
            let source = self.fetcher.fetch_text(&file.url).await?;
            return Ok(CodePayload::from_file(kind, source));
        }
        match input.code {
            Some(code) => Ok(CodePayload::inline(code)),
            None => Err(DispatchError::NoInput),
        }
    }

    // Short results go inline as a fenced code block. Long results are
    // spooled to a timestamp-named file, read back for the attachment, and
    // the spool file is removed before the reply is returned; removal is
    // unconditional, not deferred past the reply.
    async fn deliver(&self, kind: FileKind, result: String) -> Result<ObfReply, DispatchError> {
        if result.chars().count() <= INLINE_REPLY_LIMIT {
            return Ok(ObfReply::Inline {
                content: format!("```{}\n{}\n```", kind.fence_tag(), result),
            });
        }

        let millis = time::OffsetDateTime::now_utc().unix_timestamp_nanos() / 1_000_000;
        let path = self
            .spool_dir
            .join(format!("output-{millis}{}", kind.extension()));

        tokio::fs::write(&path, &result)
            .await
            .map_err(|e| DispatchError::Spool(e.to_string()))?;
        let bytes = tokio::fs::read(&path).await;
        if let Err(e) = tokio::fs::remove_file(&path).await {
            tracing::warn!(path = %path.display(), error = %e, "failed to remove spool file");
        }
        let bytes = bytes.map_err(|e| DispatchError::Spool(e.to_string()))?;

        Ok(ObfReply::Attachment {
            filename: format!("obfuscated{}", kind.extension()),
            bytes,
        })
    }
}

// Extension including its leading dot, lowercased; empty when the name has
// no dot.
fn extension_of(name: &str) -> String {
    match name.rfind('.') {
        Some(i) => name[i..].to_ascii_lowercase(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extension_of_takes_the_last_dot() {
        assert_eq!(extension_of("archive.tar.css"), ".css");
        assert_eq!(extension_of("INDEX.HTML"), ".html");
        assert_eq!(extension_of("noext"), "");
    }

    #[test]
    fn no_input_error_carries_both_usage_examples() {
        let message = DispatchError::NoInput.to_string();
        assert!(message.contains("/obf code: console.log(\"Hello\")"));
        assert!(message.contains("/obf file: myscript.js"));
    }

    #[test]
    fn unsupported_type_error_names_the_extension() {
        let message = DispatchError::UnsupportedType(".txt".to_string()).to_string();
        assert!(message.contains("`.txt`"), "got: {message}");
    }
}
