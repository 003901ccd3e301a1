pub mod config;
pub mod features;
pub mod messenger;
pub mod navigation;
pub mod phishing;
pub mod report;
pub mod scoring;

pub use features::extract;
pub use phishing::analyze_url;
pub use scoring::score;
