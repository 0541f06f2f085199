use async_trait::async_trait;
use serde_json::Value;

use crate::{error::FailureResult, files::ImageSource};

/// A hosted model that can look at an image and answer a text instruction.
#[async_trait]
pub trait VisionModel {
    fn name(&self) -> &'static str;
    /// Name of the credential, reported when it is missing
    fn credential(&self) -> &'static str;
    fn configured(&self) -> bool;

    /// Returns the first text block of the model's answer.
    async fn describe(&self, image: &ImageSource, prompt: &str) -> FailureResult<String>;
}

/// A shopping search provider returning raw, loosely typed product listings.
#[async_trait]
pub trait ShoppingEngine {
    fn name(&self) -> &'static str;
    fn credential(&self) -> &'static str;
    fn configured(&self) -> bool;

    async fn search(&self, query: &str, num: usize) -> FailureResult<Vec<Value>>;
}

pub mod claude;
pub mod serpapi;

pub use claude::Claude;
pub use serpapi::SerpApi;

pub(crate) type BoxedVisionModel = Box<dyn VisionModel + Send + Sync>;
pub(crate) type BoxedShoppingEngine = Box<dyn ShoppingEngine + Send + Sync>;
