use async_trait::async_trait;

use super::errors::FeedbackSourceError;
use crate::domain::models::FeedbackRecord;

/// Port for the collection of stored feedback records
///
/// Implementations read the whole collection into memory. The returned
/// records are in a reproducible order since the quality-score trend follows
/// load order.
#[async_trait]
pub trait FeedbackSource: Send + Sync {
    /// Human-readable location of the collection (used in notices and errors)
    fn location(&self) -> String;

    /// Load every record in the collection
    ///
    /// # Returns
    /// * `Ok(records)` - possibly empty; an empty collection is not an error
    /// * `Err(FeedbackSourceError::Malformed)` - a record could not be parsed;
    ///   the whole load fails rather than skipping it
    /// * `Err(FeedbackSourceError::Unreadable)` - the collection could not be read
    async fn load(&self) -> Result<Vec<FeedbackRecord>, FeedbackSourceError>;
}
