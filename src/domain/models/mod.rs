pub mod analysis;
pub mod config;
pub mod feedback;
pub mod improvement;

pub use analysis::{Correction, PatternAnalysis, ProblematicSection, SectionRatings, SectionStats};
pub use config::{
    AnalysisConfig, ClaudeConfig, Config, FeedbackConfig, LoggingConfig, OutputConfig,
};
pub use feedback::{section_display_name, FeedbackRecord, Rating, SectionFeedback};
pub use improvement::{
    ImprovementArtifact, ImprovementRecord, RewriteRequest, RewriteResponse, SectionCorrections,
};
