//! Common test utilities for integration tests
//!
//! Provides shared fixtures, stub ports, and helpers used across
//! multiple integration test files.

#![allow(dead_code)]

use async_trait::async_trait;
use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use tempfile::TempDir;

use dealmemo::domain::ports::{GenerationError, TextGenerator};

/// Create a temporary directory for test isolation
pub fn temp_dir() -> TempDir {
    tempfile::tempdir().expect("Failed to create temp dir")
}

/// Write a feedback document into `dir`.
pub fn write_feedback(dir: &Path, name: &str, document: &serde_json::Value) {
    std::fs::write(dir.join(name), serde_json::to_string_pretty(document).unwrap())
        .expect("Failed to write feedback file");
}

/// Three reviews where market analysis is weak and the overview is fine.
pub fn write_sample_feedback(dir: &Path) {
    write_feedback(
        dir,
        "feedback_001.json",
        &serde_json::json!({
            "company_url": "https://scale.com",
            "overall_quality_score": 6,
            "section_feedback": {
                "market_analysis": {"rating": "wrong", "correction": "Needs TAM figures"},
                "company_overview": {"rating": "good"}
            }
        }),
    );
    write_feedback(
        dir,
        "feedback_002.json",
        &serde_json::json!({
            "company_url": "https://acme.io",
            "overall_quality_score": 5,
            "section_feedback": {
                "market_analysis": {"rating": "needs-work", "correction": "Cite sources"},
                "company_overview": {"rating": "good"}
            }
        }),
    );
    write_feedback(
        dir,
        "feedback_003.json",
        &serde_json::json!({
            "company_url": "https://example.com",
            "section_feedback": {
                "market_analysis": {"rating": "good"},
                "company_overview": {"rating": "wrong", "correction": "Wrong founding year"}
            }
        }),
    );
}

/// A well-formed rewrite reply.
pub const WELL_FORMED_REPLY: &str = "IMPROVED PROMPT:\n\
    You are a VC analyst. Cite at least 3 sources for every market claim.\n\n\
    KEY IMPROVEMENTS MADE:\n\
    1. Required sourced TAM figures in the market analysis\n\
    2. Asked for verified founding facts in the overview\n\n\
    EXPECTED IMPACT:\n\
    Market sections should carry concrete, sourced numbers.\n";

/// Text generator returning a canned reply and recording prompts.
pub struct StubGenerator {
    reply: Result<String, String>,
    calls: AtomicUsize,
    prompts: Mutex<Vec<String>>,
}

impl StubGenerator {
    pub fn replying(reply: &str) -> Self {
        Self {
            reply: Ok(reply.to_string()),
            calls: AtomicUsize::new(0),
            prompts: Mutex::new(Vec::new()),
        }
    }

    pub fn failing(message: &str) -> Self {
        Self {
            reply: Err(message.to_string()),
            calls: AtomicUsize::new(0),
            prompts: Mutex::new(Vec::new()),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn prompts(&self) -> Vec<String> {
        self.prompts.lock().unwrap().clone()
    }
}

#[async_trait]
impl TextGenerator for StubGenerator {
    async fn generate(&self, prompt: &str) -> Result<String, GenerationError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.prompts.lock().unwrap().push(prompt.to_string());
        self.reply
            .clone()
            .map_err(GenerationError::Transport)
    }
}

/// File names in `dir`, sorted.
pub fn file_names(dir: &Path) -> Vec<String> {
    let Ok(entries) = std::fs::read_dir(dir) else {
        return Vec::new();
    };
    let mut names: Vec<String> = entries
        .filter_map(Result::ok)
        .map(|entry| entry.file_name().to_string_lossy().into_owned())
        .collect();
    names.sort();
    names
}
