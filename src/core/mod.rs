pub mod extractor;
pub mod orchestrator;
pub(crate) mod parse;
pub mod searcher;

pub use extractor::FeatureExtractor;
pub use orchestrator::Finder;
pub use searcher::ResultSearcher;
