//! Investment memo generation.
//!
//! Fills the memo prompt template with a company profile and sends it to the
//! text-generation service in a single call.

use std::sync::Arc;
use tracing::{info, instrument};

use crate::domain::ports::{GenerationError, TextGenerator};

/// Built-in memo prompt; also the default "original prompt" for rewrites.
pub const DEFAULT_MEMO_TEMPLATE: &str = include_str!("../prompts/deal_memo.txt");

/// Website content beyond this many characters is dropped from the prompt.
pub const MAX_WEBSITE_CONTENT_CHARS: usize = 8000;

/// Public information about a company, gathered ahead of time.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CompanyProfile {
    pub url: String,
    pub name: Option<String>,
    pub description: Option<String>,
    pub website_content: String,
}

impl CompanyProfile {
    /// File-name friendly identifier derived from the URL host.
    ///
    /// `https://www.scale.com/about` becomes `scale`, `acme.io` becomes `acme_io`.
    pub fn slug(&self) -> String {
        let host = self
            .url
            .trim()
            .trim_start_matches("https://")
            .trim_start_matches("http://")
            .trim_start_matches("www.")
            .split('/')
            .next()
            .unwrap_or_default();

        host.replace(".com", "").replace('.', "_")
    }
}

/// Normalize user input into an absolute URL.
pub fn normalize_url(raw: &str) -> String {
    let trimmed = raw.trim();
    if trimmed.starts_with("http") {
        trimmed.to_string()
    } else {
        format!("https://{trimmed}")
    }
}

/// Fill the `{company_url}`, `{company_name}`, `{description}` and
/// `{website_content}` placeholders of `template`.
///
/// Substitution is a single pass over the template: placeholder text inside
/// the substituted values is left as is.
pub fn render_memo_prompt(template: &str, company: &CompanyProfile) -> String {
    let content: String = company
        .website_content
        .chars()
        .take(MAX_WEBSITE_CONTENT_CHARS)
        .collect();
    let values = [
        ("{company_url}", company.url.as_str()),
        ("{company_name}", company.name.as_deref().unwrap_or("Unknown")),
        ("{description}", company.description.as_deref().unwrap_or("N/A")),
        ("{website_content}", content.as_str()),
    ];

    let mut prompt = String::with_capacity(template.len() + content.len());
    let mut rest = template;
    while let Some(open) = rest.find('{') {
        prompt.push_str(&rest[..open]);
        let tail = &rest[open..];
        match values.iter().find(|(placeholder, _)| tail.starts_with(placeholder)) {
            Some((placeholder, value)) => {
                prompt.push_str(value);
                rest = &tail[placeholder.len()..];
            }
            None => {
                prompt.push('{');
                rest = &tail[1..];
            }
        }
    }
    prompt.push_str(rest);
    prompt
}

/// Generates memos from a prompt template.
pub struct MemoGenerator {
    generator: Arc<dyn TextGenerator>,
    template: String,
}

impl MemoGenerator {
    pub fn new(generator: Arc<dyn TextGenerator>, template: impl Into<String>) -> Self {
        Self {
            generator,
            template: template.into(),
        }
    }

    pub fn with_default_template(generator: Arc<dyn TextGenerator>) -> Self {
        Self::new(generator, DEFAULT_MEMO_TEMPLATE)
    }

    #[instrument(skip(self, company), fields(url = %company.url))]
    pub async fn generate(&self, company: &CompanyProfile) -> Result<String, GenerationError> {
        let prompt = render_memo_prompt(&self.template, company);
        info!(prompt_chars = prompt.len(), "generating investment memo");
        self.generator.generate(&prompt).await
    }
}

/// Memo document as persisted: heading, timestamp, then the memo body.
pub fn memo_document(url: &str, memo: &str, generated_at: chrono::DateTime<chrono::Local>) -> String {
    format!(
        "# Investment Memo: {url}\n\n*Generated: {}*\n\n---\n\n{memo}",
        generated_at.format("%B %d, %Y at %I:%M %p")
    )
}
