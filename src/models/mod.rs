pub mod features;
pub mod search_result;

pub use features::ClothingFeatures;
pub use search_result::SearchResult;
