//! Cloudinary Image Gateway Adapter
//!
//! Streams in-memory image buffers to the Cloudinary upload API and
//! issues delete-by-identifier requests. Requests are authenticated
//! with the account's API key plus a SHA-1 signature over the sorted
//! request parameters and the API secret, per the Cloudinary signed
//! upload protocol.

use chrono::Utc;
use serde::Deserialize;

use crate::domain::gateway::{ImageStore, ImageUpload, StoredImage};
use crate::error::{ItemError, ItemResult};
use platform::crypto::sha1_hex;

const API_BASE: &str = "https://api.cloudinary.com/v1_1";

/// Cloudinary-backed image store
#[derive(Clone)]
pub struct CloudinaryImageStore {
    http: reqwest::Client,
    cloud_name: String,
    api_key: String,
    api_secret: String,
    folder: String,
}

#[derive(Debug, Deserialize)]
struct UploadResponse {
    secure_url: String,
    public_id: String,
}

#[derive(Debug, Deserialize)]
struct DestroyResponse {
    result: String,
}

impl CloudinaryImageStore {
    pub fn new(
        cloud_name: impl Into<String>,
        api_key: impl Into<String>,
        api_secret: impl Into<String>,
        folder: impl Into<String>,
    ) -> Self {
        Self {
            http: reqwest::Client::new(),
            cloud_name: cloud_name.into(),
            api_key: api_key.into(),
            api_secret: api_secret.into(),
            folder: folder.into(),
        }
    }

    /// Sign request parameters: sha1 of `key=value&...` (sorted by key)
    /// with the API secret appended
    fn sign(&self, params: &[(&str, &str)]) -> String {
        let mut sorted: Vec<&(&str, &str)> = params.iter().collect();
        sorted.sort_by_key(|(k, _)| *k);

        let to_sign = sorted
            .iter()
            .map(|(k, v)| format!("{}={}", k, v))
            .collect::<Vec<_>>()
            .join("&");

        sha1_hex(format!("{}{}", to_sign, self.api_secret).as_bytes())
    }

    fn endpoint(&self, action: &str) -> String {
        format!("{}/{}/image/{}", API_BASE, self.cloud_name, action)
    }
}

impl ImageStore for CloudinaryImageStore {
    async fn put(&self, upload: ImageUpload) -> ItemResult<StoredImage> {
        let timestamp = Utc::now().timestamp().to_string();
        let signature = self.sign(&[("folder", &self.folder), ("timestamp", &timestamp)]);

        let mut file_part = reqwest::multipart::Part::bytes(upload.bytes)
            .file_name(upload.file_name.unwrap_or_else(|| "upload".to_string()));
        if let Some(content_type) = &upload.content_type {
            file_part = file_part
                .mime_str(content_type)
                .map_err(|e| ItemError::Upload(format!("Invalid image content type: {e}")))?;
        }

        let form = reqwest::multipart::Form::new()
            .part("file", file_part)
            .text("api_key", self.api_key.clone())
            .text("timestamp", timestamp)
            .text("folder", self.folder.clone())
            .text("signature", signature);

        let response = self
            .http
            .post(self.endpoint("upload"))
            .multipart(form)
            .send()
            .await
            .map_err(|e| ItemError::Upload(format!("Image upload request failed: {e}")))?;

        if !response.status().is_success() {
            return Err(ItemError::Upload(format!(
                "Image gateway returned status {}",
                response.status()
            )));
        }

        let body: UploadResponse = response
            .json()
            .await
            .map_err(|e| ItemError::Upload(format!("Malformed gateway response: {e}")))?;

        tracing::debug!(public_id = %body.public_id, "Image uploaded to gateway");

        Ok(StoredImage {
            secure_url: body.secure_url,
            public_id: body.public_id,
        })
    }

    async fn delete(&self, public_id: &str) -> ItemResult<()> {
        let timestamp = Utc::now().timestamp().to_string();
        let signature = self.sign(&[("public_id", public_id), ("timestamp", &timestamp)]);

        let form: [(&str, &str); 4] = [
            ("public_id", public_id),
            ("api_key", &self.api_key),
            ("timestamp", &timestamp),
            ("signature", &signature),
        ];

        let response = self
            .http
            .post(self.endpoint("destroy"))
            .form(&form)
            .send()
            .await
            .map_err(|e| ItemError::Upload(format!("Image delete request failed: {e}")))?;

        if !response.status().is_success() {
            return Err(ItemError::Upload(format!(
                "Image gateway returned status {}",
                response.status()
            )));
        }

        let body: DestroyResponse = response
            .json()
            .await
            .map_err(|e| ItemError::Upload(format!("Malformed gateway response: {e}")))?;

        // "not found" counts as deleted; anything else is a failure
        match body.result.as_str() {
            "ok" | "not found" => Ok(()),
            other => Err(ItemError::Upload(format!(
                "Image gateway refused delete: {other}"
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_signature_is_sorted_and_stable() {
        let store = CloudinaryImageStore::new("demo", "key", "secret", "lostlink_images");

        // Parameter order must not matter
        let a = store.sign(&[("folder", "lostlink_images"), ("timestamp", "100")]);
        let b = store.sign(&[("timestamp", "100"), ("folder", "lostlink_images")]);
        assert_eq!(a, b);

        // sha1("folder=lostlink_images&timestamp=100secret")
        assert_eq!(
            a,
            sha1_hex(b"folder=lostlink_images&timestamp=100secret")
        );
    }

    #[test]
    fn test_endpoints() {
        let store = CloudinaryImageStore::new("demo", "key", "secret", "lostlink_images");
        assert_eq!(
            store.endpoint("upload"),
            "https://api.cloudinary.com/v1_1/demo/image/upload"
        );
        assert_eq!(
            store.endpoint("destroy"),
            "https://api.cloudinary.com/v1_1/demo/image/destroy"
        );
    }
}
