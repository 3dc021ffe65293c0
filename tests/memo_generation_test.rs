mod common;

use std::sync::Arc;

use chrono::Local;
use common::{file_names, temp_dir, StubGenerator};
use dealmemo::domain::ports::{ArtifactKind, ArtifactStore};
use dealmemo::infrastructure::artifacts::FileArtifactStore;
use dealmemo::services::{memo_document, normalize_url, CompanyProfile, MemoGenerator};

#[tokio::test]
async fn test_memo_is_generated_and_saved_once() {
    let output = temp_dir();
    let generator = Arc::new(StubGenerator::replying("## 1. EXECUTIVE SUMMARY\nScale labels data."));
    let memos = MemoGenerator::with_default_template(generator.clone());
    let company = CompanyProfile {
        url: normalize_url("www.scale.com"),
        name: Some("Scale AI".to_string()),
        description: None,
        website_content: "Scale provides training data for AI.".to_string(),
    };

    let memo = memos.generate(&company).await.unwrap();
    let store = FileArtifactStore::new(output.path());
    let kind = ArtifactKind::Memo {
        slug: company.slug(),
    };
    let path = store
        .save(&kind, "r1", &memo_document(&company.url, &memo, Local::now()))
        .await
        .unwrap();

    assert_eq!(file_names(output.path()), ["deal_memo_scale_r1.md"]);
    let saved = std::fs::read_to_string(path).unwrap();
    assert!(saved.starts_with("# Investment Memo: https://www.scale.com\n"));
    assert!(saved.ends_with("Scale labels data."));

    let prompt = &generator.prompts()[0];
    assert!(prompt.contains("Company Name: Scale AI"));
    assert!(prompt.contains("Description: N/A"));
    assert!(prompt.contains("Scale provides training data for AI."));

    assert!(store.save(&kind, "r1", "again").await.is_err());
}

#[tokio::test]
async fn test_improved_prompt_can_drive_memo_generation() {
    let generator = Arc::new(StubGenerator::replying("memo"));
    let memos = MemoGenerator::new(
        generator.clone(),
        "Improved: analyze {company_name} ({company_url}) using {website_content}",
    );

    memos
        .generate(&CompanyProfile {
            url: "https://acme.io".to_string(),
            name: None,
            description: None,
            website_content: "Acme makes anvils.".to_string(),
        })
        .await
        .unwrap();

    assert_eq!(
        generator.prompts(),
        ["Improved: analyze Unknown (https://acme.io) using Acme makes anvils.".to_string()]
    );
}
