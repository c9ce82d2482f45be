//! The createPost action: truncation, publishing, and error wording.

use async_trait::async_trait;
use thiserror::Error;
use tracing::{error, info};

/// Longest status X accepts, in characters.
pub const MAX_STATUS_CHARS: usize = 280;
/// Characters kept from an over-long status before the ellipsis.
const TRUNCATED_CHARS: usize = 275;

/// Failure to publish a post. The Display text is what the model sees.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PostError {
    #[error("Twitter API: Authentication failed. Please check your API keys and tokens.")]
    Authentication,

    #[error("Twitter API: Rate limit exceeded. Please try again later.")]
    RateLimited,

    #[error("Twitter API: {0}")]
    Rejected(String),

    #[error("Failed to create tweet: {0}")]
    Failed(String),
}

/// A post the platform accepted.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PostOutcome {
    pub id: Option<String>,
    /// Text as stored by the platform.
    pub text: String,
}

/// Something that can publish a status text.
#[async_trait]
pub trait PostPublisher: Send + Sync {
    async fn publish(&self, text: &str) -> Result<PostOutcome, PostError>;
}

/// Cut `status` to 275 characters plus `...` when it is longer than 280.
pub fn truncate_status(status: &str) -> String {
    if status.chars().count() <= MAX_STATUS_CHARS {
        return status.to_string();
    }
    let mut truncated: String = status.chars().take(TRUNCATED_CHARS).collect();
    truncated.push_str("...");
    truncated
}

/// Publish `status` and return the text reported back to the caller.
pub async fn create_post(publisher: &dyn PostPublisher, status: &str) -> Result<String, PostError> {
    info!(chars = status.chars().count(), "publishing post");

    match publisher.publish(&truncate_status(status)).await {
        Ok(outcome) if outcome.text.is_empty() => Ok("Post created".to_string()),
        Ok(outcome) => {
            info!(id = ?outcome.id, "post published");
            Ok(format!("Tweeted: {status}"))
        }
        Err(err) => {
            error!(error = %err, "publishing post failed");
            Err(err)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    struct RecordingPublisher {
        published: Mutex<Vec<String>>,
        reply: Result<PostOutcome, PostError>,
    }

    impl RecordingPublisher {
        fn replying(reply: Result<PostOutcome, PostError>) -> Self {
            Self {
                published: Mutex::new(Vec::new()),
                reply,
            }
        }
    }

    #[async_trait]
    impl PostPublisher for RecordingPublisher {
        async fn publish(&self, text: &str) -> Result<PostOutcome, PostError> {
            self.published.lock().unwrap().push(text.to_string());
            self.reply.clone()
        }
    }

    fn accepted(text: &str) -> Result<PostOutcome, PostError> {
        Ok(PostOutcome {
            id: Some("1".into()),
            text: text.into(),
        })
    }

    #[test]
    fn status_of_280_chars_is_unchanged() {
        let status = "a".repeat(280);
        assert_eq!(truncate_status(&status), status);
    }

    #[test]
    fn status_of_281_chars_is_cut_to_275_plus_ellipsis() {
        let truncated = truncate_status(&"a".repeat(281));
        assert_eq!(truncated.chars().count(), 278);
        assert_eq!(truncated, format!("{}...", "a".repeat(275)));
    }

    #[test]
    fn truncation_counts_characters_not_bytes() {
        let status = "é".repeat(280);
        assert_eq!(truncate_status(&status), status);
    }

    #[tokio::test]
    async fn success_reports_requested_status() {
        let publisher = RecordingPublisher::replying(accepted("hello world"));
        let text = create_post(&publisher, "hello world").await.unwrap();
        assert_eq!(text, "Tweeted: hello world");
        assert_eq!(publisher.published.lock().unwrap().as_slice(), &["hello world".to_string()]);
    }

    #[tokio::test]
    async fn long_status_is_truncated_before_publishing() {
        let publisher = RecordingPublisher::replying(accepted("x"));
        create_post(&publisher, &"b".repeat(300)).await.unwrap();
        let published = publisher.published.lock().unwrap();
        assert_eq!(published[0].chars().count(), 278);
        assert!(published[0].ends_with("..."));
    }

    #[tokio::test]
    async fn empty_outcome_falls_back_to_post_created() {
        let publisher = RecordingPublisher::replying(Ok(PostOutcome::default()));
        assert_eq!(create_post(&publisher, "hi").await.unwrap(), "Post created");
    }

    #[tokio::test]
    async fn errors_keep_their_wording() {
        let publisher = RecordingPublisher::replying(Err(PostError::RateLimited));
        let err = create_post(&publisher, "hi").await.unwrap_err();
        assert_eq!(
            err.to_string(),
            "Twitter API: Rate limit exceeded. Please try again later."
        );
        assert_eq!(
            PostError::Failed("No response data".into()).to_string(),
            "Failed to create tweet: No response data"
        );
    }
}
