pub(crate) mod data_url;
pub(crate) mod local;

pub use data_url::ImageSource;
