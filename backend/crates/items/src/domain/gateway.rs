//! Image Hosting Gateway
//!
//! The external image host as an injected capability, so the core item
//! lifecycle is testable without a live external dependency. The real
//! adapter lives in `infra::cloudinary`.

use crate::error::ItemResult;

/// An image payload buffered in memory, ready to stream to the gateway
#[derive(Debug, Clone)]
pub struct ImageUpload {
    pub bytes: Vec<u8>,
    pub file_name: Option<String>,
    pub content_type: Option<String>,
}

/// What the gateway hands back for a stored image
#[derive(Debug, Clone)]
pub struct StoredImage {
    /// Durable https URL, stored on the item
    pub secure_url: String,
    /// Gateway identifier used for delete-by-identifier
    pub public_id: String,
}

/// Image store capability trait
#[trait_variant::make(ImageStore: Send)]
pub trait LocalImageStore {
    /// Upload an image, returning its durable URL and identifier
    async fn put(&self, upload: ImageUpload) -> ItemResult<StoredImage>;

    /// Delete a previously stored image by identifier
    async fn delete(&self, public_id: &str) -> ItemResult<()>;
}

/// Derive the gateway identifier from a stored secure URL
///
/// The gateway names images `{folder}/{stem}` where the stem is the
/// last URL path segment without its file extension.
pub fn public_id_from_url(folder: &str, url: &str) -> Option<String> {
    let last_segment = url.rsplit('/').next()?;
    if last_segment.is_empty() {
        return None;
    }

    let stem = match last_segment.rsplit_once('.') {
        Some((stem, _ext)) if !stem.is_empty() => stem,
        _ => last_segment,
    };

    Some(format!("{}/{}", folder, stem))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_public_id_from_url() {
        assert_eq!(
            public_id_from_url(
                "lostlink_images",
                "https://res.example.com/image/upload/v123/lostlink_images/abc123.jpg"
            ),
            Some("lostlink_images/abc123".to_string())
        );
    }

    #[test]
    fn test_public_id_without_extension() {
        assert_eq!(
            public_id_from_url("lostlink_images", "https://res.example.com/abc123"),
            Some("lostlink_images/abc123".to_string())
        );
    }

    #[test]
    fn test_public_id_empty_url() {
        assert_eq!(public_id_from_url("lostlink_images", ""), None);
        assert_eq!(public_id_from_url("lostlink_images", "https://host/"), None);
    }
}
