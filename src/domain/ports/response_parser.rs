use super::errors::ResponseParseError;
use crate::domain::models::RewriteResponse;

/// Port for decomposing a rewrite reply into its three parts
///
/// Callers depend on this trait only, so the free-text marker format can be
/// replaced by a structured one without touching the pipeline.
pub trait RewriteResponseParser: Send + Sync {
    /// Text appended to the rewrite request telling the service how to answer
    fn format_instructions(&self) -> String;

    /// Split `text` into new prompt, improvement statements and impact
    fn parse(&self, text: &str) -> Result<RewriteResponse, ResponseParseError>;
}
