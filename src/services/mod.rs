pub mod correction_corpus;
pub mod improvement_pipeline;
pub mod memo_generator;
pub mod pattern_aggregator;
pub mod report_renderer;
pub mod request_composer;
pub mod response_parser;

pub use correction_corpus::CorrectionCorpus;
pub use improvement_pipeline::{
    analyze_source, ImprovementOutcome, ImprovementPipeline, SavedArtifacts,
};
pub use memo_generator::{
    memo_document, normalize_url, render_memo_prompt, CompanyProfile, MemoGenerator,
    DEFAULT_MEMO_TEMPLATE,
};
pub use pattern_aggregator::PatternAggregator;
pub use report_renderer::ReportRenderer;
pub use request_composer::RequestComposer;
pub use response_parser::{
    MarkerResponseParser, EXPECTED_IMPACT_MARKER, IMPROVED_PROMPT_MARKER, KEY_IMPROVEMENTS_MARKER,
};
