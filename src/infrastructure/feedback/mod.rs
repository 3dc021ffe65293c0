//! Feedback record sources

pub mod directory_loader;

pub use directory_loader::FeedbackDirectoryLoader;
