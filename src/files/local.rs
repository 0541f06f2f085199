use std::path::{Path, PathBuf};

use base64::Engine;
use normalize_path::NormalizePath;
use resolve_path::PathResolveExt;

use crate::{
    error::{Failure, FailureResult},
    files::ImageSource,
};

pub(crate) fn resolve(path: &Path) -> PathBuf {
    path.resolve().normalize()
}

/// Media type of a local image, guessed from its extension.
pub(crate) fn image_media_type(path: &Path) -> FailureResult<mime::Mime> {
    match mime_guess::from_path(path).first() {
        Some(media_type) if media_type.type_() == mime::IMAGE => Ok(media_type),
        _ => Err(Failure::InvalidInput(format!(
            "Please upload an image file: {}",
            path.display()
        ))),
    }
}

pub(crate) async fn load_image(path: &Path) -> FailureResult<ImageSource> {
    let path = resolve(path);
    let media_type = image_media_type(&path)?;

    log::info!("Reading {} image {}", media_type, path.display());
    let bytes = tokio::fs::read(&path).await.map_err(|e| {
        log::error!("Failed to read image {}: {}", path.display(), e);
        Failure::InvalidInput(format!("Failed to read image {}: {}", path.display(), e))
    })?;

    Ok(ImageSource {
        media_type: media_type.essence_str().to_string(),
        data: base64::engine::general_purpose::STANDARD.encode(&bytes),
    })
}
