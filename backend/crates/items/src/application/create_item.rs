//! Create Item Use Case
//!
//! Validates the posting, uploads the optional image to the gateway,
//! and persists the item. Nothing is persisted when the upload fails.

use std::sync::Arc;

use crate::application::config::ItemsConfig;
use crate::domain::entity::item::Item;
use crate::domain::gateway::{ImageStore, ImageUpload};
use crate::domain::repository::ItemRepository;
use crate::domain::value_object::{Email, item_status::ItemStatus};
use crate::error::{ItemError, ItemResult};
use kernel::id::UserId;

/// Create item input
pub struct CreateItemInput {
    pub title: String,
    pub description: String,
    pub status: String,
    pub email: String,
    pub phone: String,
    pub posted_by: String,
    /// Creating user's id, as sent in the form
    pub uid: String,
    pub image: Option<ImageUpload>,
}

/// Create item use case
pub struct CreateItemUseCase<R, G>
where
    R: ItemRepository,
    G: ImageStore,
{
    repo: Arc<R>,
    images: Arc<G>,
    config: Arc<ItemsConfig>,
}

impl<R, G> CreateItemUseCase<R, G>
where
    R: ItemRepository,
    G: ImageStore,
{
    pub fn new(repo: Arc<R>, images: Arc<G>, config: Arc<ItemsConfig>) -> Self {
        Self {
            repo,
            images,
            config,
        }
    }

    pub async fn execute(&self, input: CreateItemInput) -> ItemResult<Item> {
        // Every text field is required
        if input.title.trim().is_empty()
            || input.description.trim().is_empty()
            || input.status.trim().is_empty()
            || input.email.trim().is_empty()
            || input.phone.trim().is_empty()
            || input.posted_by.trim().is_empty()
            || input.uid.trim().is_empty()
        {
            return Err(ItemError::MissingFields);
        }

        let status = ItemStatus::parse(input.status.trim())?;
        let email = Email::new(input.email)?;
        let owner_id: UserId = input
            .uid
            .trim()
            .parse()
            .map_err(|_| ItemError::Validation("Invalid user id".to_string()))?;

        let mut item = Item::new(
            input.title.trim().to_string(),
            input.description.trim().to_string(),
            status,
            email,
            input.phone.trim().to_string(),
            input.posted_by.trim().to_string(),
            owner_id,
        );

        // Upload before persisting; a gateway failure leaves no record
        if let Some(image) = input.image {
            if image.bytes.len() > self.config.max_image_bytes {
                return Err(ItemError::Validation(format!(
                    "Image must be at most {} bytes",
                    self.config.max_image_bytes
                )));
            }

            let stored = self.images.put(image).await?;
            item.set_image(stored.secure_url);
        }

        self.repo.create(&item).await?;

        tracing::info!(
            unique_link = %item.unique_link,
            owner_id = %item.owner_id,
            has_image = item.image_url.is_some(),
            "Item created"
        );

        Ok(item)
    }
}
