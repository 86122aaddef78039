//! Profile picture storage
//!
//! Uploaded pictures are thumbnailed and written under `static/profile_pics/`
//! with a random file name. The placeholder `default.jpg` is never touched.

use std::fmt::Write as _;
use std::path::{Path, PathBuf};

use brevity_core::DEFAULT_IMAGE_FILE;
use image::{DynamicImage, ImageFormat};
use tracing::{debug, instrument, warn};

use super::error::{ServiceError, ServiceResult};

/// A picture file submitted with the account form
#[derive(Clone)]
pub struct PictureUpload {
    /// Client-side file name, used only for its extension
    pub filename: String,
    pub bytes: Vec<u8>,
}

impl std::fmt::Debug for PictureUpload {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PictureUpload")
            .field("filename", &self.filename)
            .field("len", &self.bytes.len())
            .finish()
    }
}

/// Writes and removes avatar files in one directory
#[derive(Debug, Clone)]
pub struct AvatarStore {
    dir: PathBuf,
}

impl AvatarStore {
    /// Field error for any extension other than jpg/png
    pub const EXTENSION_MESSAGE: &'static str =
        "File does not have an approved extension: jpg, png";

    /// Field error for bytes that do not decode as an image
    pub const UNREADABLE_MESSAGE: &'static str = "The uploaded file is not a readable image.";

    /// Bounding box for stored thumbnails, in pixels
    pub const THUMBNAIL_SIZE: u32 = 125;

    const ALLOWED_EXTENSIONS: [&'static str; 2] = ["jpg", "png"];

    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Lowercased approved extension of `filename`, if it has one
    pub fn extension_of(filename: &str) -> Option<&'static str> {
        let ext = Path::new(filename).extension()?.to_str()?.to_ascii_lowercase();
        Self::ALLOWED_EXTENSIONS
            .into_iter()
            .find(|allowed| *allowed == ext)
    }

    /// 16 hex characters from 8 random bytes, plus the extension
    pub fn random_name(ext: &str) -> String {
        let mut name = String::with_capacity(17 + ext.len());
        for byte in rand::random::<[u8; 8]>() {
            let _ = write!(name, "{byte:02x}");
        }
        name.push('.');
        name.push_str(ext);
        name
    }

    /// Thumbnail and store `upload`, returning the new file name
    #[instrument(skip(self, upload), fields(filename = %upload.filename, len = upload.bytes.len()))]
    pub async fn save(&self, upload: PictureUpload) -> ServiceResult<String> {
        let ext = Self::extension_of(&upload.filename)
            .ok_or_else(|| ServiceError::field("picture", Self::EXTENSION_MESSAGE))?;

        tokio::fs::create_dir_all(&self.dir)
            .await
            .map_err(|e| ServiceError::storage(format!("{}: {e}", self.dir.display())))?;

        let name = Self::random_name(ext);
        let path = self.dir.join(&name);
        let bytes = upload.bytes;

        tokio::task::spawn_blocking(move || write_thumbnail(&bytes, &path, ext))
            .await
            .map_err(|e| ServiceError::internal(format!("Thumbnail task failed: {e}")))??;

        debug!(file = %name, "Stored profile picture");
        Ok(name)
    }

    /// Delete a stored picture; the placeholder and missing files are skipped
    #[instrument(skip(self))]
    pub async fn remove(&self, image_file: &str) -> ServiceResult<()> {
        if image_file == DEFAULT_IMAGE_FILE {
            return Ok(());
        }

        // Only bare file names live in this directory
        if Path::new(image_file).file_name().and_then(|n| n.to_str()) != Some(image_file) {
            warn!("Refusing to remove picture outside the avatar directory");
            return Ok(());
        }

        match tokio::fs::remove_file(self.dir.join(image_file)).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(ServiceError::storage(format!("{image_file}: {e}"))),
        }
    }
}

/// Shrink `img` to fit a `max`×`max` box, keeping aspect ratio; smaller images are kept as is
pub fn fit_within(img: DynamicImage, max: u32) -> DynamicImage {
    if img.width() <= max && img.height() <= max {
        img
    } else {
        img.thumbnail(max, max)
    }
}

fn write_thumbnail(bytes: &[u8], path: &Path, ext: &str) -> ServiceResult<()> {
    let img = image::load_from_memory(bytes).map_err(|e| {
        warn!(error = %e, "Uploaded picture could not be decoded");
        ServiceError::field("picture", AvatarStore::UNREADABLE_MESSAGE)
    })?;

    let img = fit_within(img, AvatarStore::THUMBNAIL_SIZE);

    // JPEG has no alpha channel
    let (img, format) = if ext == "png" {
        (img, ImageFormat::Png)
    } else {
        (DynamicImage::ImageRgb8(img.to_rgb8()), ImageFormat::Jpeg)
    };

    img.save_with_format(path, format)
        .map_err(|e| ServiceError::storage(format!("{}: {e}", path.display())))
}
