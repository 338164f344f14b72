//! Application Configuration
//!
//! Configuration for the Items application layer.

/// Items application configuration
#[derive(Debug, Clone)]
pub struct ItemsConfig {
    /// Logical gateway folder all item images land under
    pub upload_folder: String,
    /// Maximum accepted image payload in bytes
    pub max_image_bytes: usize,
}

impl Default for ItemsConfig {
    fn default() -> Self {
        Self {
            upload_folder: "lostlink_images".to_string(),
            max_image_bytes: 5 * 1024 * 1024, // 5 MiB
        }
    }
}
