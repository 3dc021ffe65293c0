use async_trait::async_trait;
use serde_json::{Map, Value};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::{debug, instrument};

use crate::domain::models::{FeedbackConfig, FeedbackRecord, SectionFeedback};
use crate::domain::ports::{FeedbackSource, FeedbackSourceError};

const MIN_SCORE: f64 = 1.0;
const MAX_SCORE: f64 = 10.0;

/// Reads `<prefix>*.json` documents from a directory.
///
/// Files load in file-name order. A directory that does not exist holds no
/// records.
#[derive(Debug, Clone)]
pub struct FeedbackDirectoryLoader {
    dir: PathBuf,
    file_prefix: String,
}

impl FeedbackDirectoryLoader {
    pub fn new(dir: impl Into<PathBuf>, file_prefix: impl Into<String>) -> Self {
        Self {
            dir: dir.into(),
            file_prefix: file_prefix.into(),
        }
    }

    pub fn from_config(config: &FeedbackConfig) -> Self {
        Self::new(config.dir.clone(), config.file_prefix.clone())
    }

    fn unreadable(&self, source: std::io::Error) -> FeedbackSourceError {
        FeedbackSourceError::Unreadable {
            location: self.location(),
            source,
        }
    }

    /// Matching file paths sorted by name.
    async fn feedback_files(&self) -> Result<Vec<PathBuf>, FeedbackSourceError> {
        let mut entries = match tokio::fs::read_dir(&self.dir).await {
            Ok(entries) => entries,
            Err(err) if err.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(err) => return Err(self.unreadable(err)),
        };

        let mut files = Vec::new();
        while let Some(entry) = entries.next_entry().await.map_err(|err| self.unreadable(err))? {
            let name = entry.file_name();
            let Some(name) = name.to_str() else { continue };
            if name.starts_with(&self.file_prefix)
                && Path::new(name).extension().is_some_and(|ext| ext == "json")
                && entry.file_type().await.is_ok_and(|kind| kind.is_file())
            {
                files.push(entry.path());
            }
        }

        files.sort();
        Ok(files)
    }
}

#[async_trait]
impl FeedbackSource for FeedbackDirectoryLoader {
    fn location(&self) -> String {
        self.dir.display().to_string()
    }

    #[instrument(skip(self), fields(dir = %self.dir.display()))]
    async fn load(&self) -> Result<Vec<FeedbackRecord>, FeedbackSourceError> {
        let files = self.feedback_files().await?;
        let mut records = Vec::with_capacity(files.len());

        for path in files {
            let source_id = path
                .file_name()
                .map_or_else(|| path.display().to_string(), |name| name.to_string_lossy().into_owned());
            let contents = tokio::fs::read_to_string(&path)
                .await
                .map_err(|err| self.unreadable(err))?;

            let record = parse_record(&source_id, &contents)?;
            debug!(source_id = %record.source_id, sections = record.sections.len(), "loaded feedback record");
            records.push(record);
        }

        Ok(records)
    }
}

/// Parse and validate one feedback document.
pub fn parse_record(source_id: &str, contents: &str) -> Result<FeedbackRecord, FeedbackSourceError> {
    let malformed = |reason: String| FeedbackSourceError::Malformed {
        source_id: source_id.to_string(),
        reason,
    };

    let document: Value =
        serde_json::from_str(contents).map_err(|err| malformed(format!("invalid JSON: {err}")))?;
    let Value::Object(document) = document else {
        return Err(malformed("document is not a JSON object".to_string()));
    };

    let mut record = FeedbackRecord::new(source_id);
    record.overall_quality_score = quality_score(&document).map_err(malformed)?;
    record.sections = sections(&document).map_err(malformed)?;
    Ok(record)
}

fn quality_score(document: &Map<String, Value>) -> Result<Option<f64>, String> {
    match document.get("overall_quality_score") {
        None | Some(Value::Null) => Ok(None),
        Some(Value::Number(number)) => match number.as_f64() {
            Some(score) if score.is_finite() && (MIN_SCORE..=MAX_SCORE).contains(&score) => {
                Ok(Some(score))
            }
            _ => Err(format!(
                "overall_quality_score {number} is outside {MIN_SCORE}-{MAX_SCORE}"
            )),
        },
        Some(other) => Err(format!("overall_quality_score must be a number, got {other}")),
    }
}

fn sections(document: &Map<String, Value>) -> Result<Vec<(String, SectionFeedback)>, String> {
    let entries = match document.get("section_feedback") {
        None | Some(Value::Null) => return Ok(Vec::new()),
        Some(Value::Object(entries)) => entries,
        Some(_) => return Err("section_feedback must be an object".to_string()),
    };

    entries
        .iter()
        .map(|(section, feedback)| {
            let Value::Object(fields) = feedback else {
                return Err(format!("feedback for section '{section}' must be an object"));
            };
            Ok((
                section.clone(),
                SectionFeedback {
                    rating: optional_string(fields, "rating", section)?,
                    correction: optional_string(fields, "correction", section)?,
                },
            ))
        })
        .collect()
}

fn optional_string(fields: &Map<String, Value>, key: &str, section: &str) -> Result<Option<String>, String> {
    match fields.get(key) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(text)) => Ok(Some(text.clone())),
        Some(_) => Err(format!("'{key}' of section '{section}' must be a string")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn write(dir: &TempDir, name: &str, contents: &str) {
        std::fs::write(dir.path().join(name), contents).unwrap();
    }

    #[test]
    fn test_parse_record_keeps_section_order() {
        let record = parse_record(
            "feedback_1.json",
            r#"{
                "company_url": "https://scale.com",
                "overall_quality_score": 6,
                "section_feedback": {
                    "market_analysis": {"rating": "needs-work", "correction": "Needs TAM"},
                    "company_overview": {"rating": "good"},
                    "team": {}
                }
            }"#,
        )
        .unwrap();

        assert_eq!(record.source_id, "feedback_1.json");
        assert_eq!(record.overall_quality_score, Some(6.0));
        let ids: Vec<_> = record.sections.iter().map(|(id, _)| id.as_str()).collect();
        assert_eq!(ids, ["market_analysis", "company_overview", "team"]);
        assert_eq!(record.sections[0].1.correction.as_deref(), Some("Needs TAM"));
        assert_eq!(record.sections[2].1, SectionFeedback::default());
    }

    #[test]
    fn test_parse_record_without_sections_or_score() {
        let record = parse_record("feedback_2.json", r#"{"company_url": "x"}"#).unwrap();
        assert!(record.sections.is_empty());
        assert_eq!(record.overall_quality_score, None);
    }

    #[test]
    fn test_parse_record_rejects_bad_shapes() {
        let cases = [
            "not json",
            "[1, 2]",
            r#"{"overall_quality_score": "high"}"#,
            r#"{"overall_quality_score": 11}"#,
            r#"{"overall_quality_score": 0.5}"#,
            r#"{"section_feedback": ["market_analysis"]}"#,
            r#"{"section_feedback": {"market_analysis": "good"}}"#,
            r#"{"section_feedback": {"market_analysis": {"rating": 3}}}"#,
        ];

        for contents in cases {
            let err = parse_record("feedback_bad.json", contents).unwrap_err();
            assert!(
                matches!(err, FeedbackSourceError::Malformed { ref source_id, .. } if source_id == "feedback_bad.json"),
                "expected Malformed for {contents}"
            );
        }
    }

    #[tokio::test]
    async fn test_load_reads_matching_files_in_name_order() {
        let dir = TempDir::new().unwrap();
        write(&dir, "feedback_b.json", r#"{"overall_quality_score": 5}"#);
        write(&dir, "feedback_a.json", r#"{"overall_quality_score": 7}"#);
        write(&dir, "notes.json", r#"{"overall_quality_score": 1}"#);
        write(&dir, "feedback_c.txt", "ignored");

        let records = FeedbackDirectoryLoader::new(dir.path(), "feedback_")
            .load()
            .await
            .unwrap();

        let ids: Vec<_> = records.iter().map(|r| r.source_id.as_str()).collect();
        assert_eq!(ids, ["feedback_a.json", "feedback_b.json"]);
        assert_eq!(records[0].overall_quality_score, Some(7.0));
    }

    #[tokio::test]
    async fn test_load_empty_and_missing_directories() {
        let dir = TempDir::new().unwrap();
        let loader = FeedbackDirectoryLoader::new(dir.path(), "feedback_");
        assert!(loader.load().await.unwrap().is_empty());

        let missing = FeedbackDirectoryLoader::new(dir.path().join("nope"), "feedback_");
        assert!(missing.load().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_load_fails_on_malformed_file() {
        let dir = TempDir::new().unwrap();
        write(&dir, "feedback_1.json", r#"{"overall_quality_score": 5}"#);
        write(&dir, "feedback_2.json", "{ truncated");

        let err = FeedbackDirectoryLoader::new(dir.path(), "feedback_")
            .load()
            .await
            .unwrap_err();

        assert!(
            matches!(err, FeedbackSourceError::Malformed { ref source_id, .. } if source_id == "feedback_2.json")
        );
    }
}
