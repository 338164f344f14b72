//! Update Item Use Case
//!
//! Field-level partial update, restricted to the owner or an admin.
//! Image replacement uploads the new image first; the old one is only
//! deleted once the upload has succeeded, so a gateway failure can
//! never leave the record pointing at a dead URL.

use std::sync::Arc;

use crate::application::config::ItemsConfig;
use crate::domain::entity::item::{Item, ItemPatch};
use crate::domain::gateway::{ImageStore, ImageUpload, public_id_from_url};
use crate::domain::repository::ItemRepository;
use crate::domain::value_object::{Email, item_status::ItemStatus, unique_link::UniqueLink};
use crate::error::{ItemError, ItemResult};
use kernel::identity::Identity;

/// Update item input. `None` (or empty wire values, filtered by the
/// handler) leaves the field untouched.
#[derive(Default)]
pub struct UpdateItemInput {
    pub title: Option<String>,
    pub description: Option<String>,
    pub status: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub image: Option<ImageUpload>,
}

/// Update item use case
pub struct UpdateItemUseCase<R, G>
where
    R: ItemRepository,
    G: ImageStore,
{
    repo: Arc<R>,
    images: Arc<G>,
    config: Arc<ItemsConfig>,
}

impl<R, G> UpdateItemUseCase<R, G>
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

    pub async fn execute(
        &self,
        unique_link: &str,
        caller: &Identity,
        input: UpdateItemInput,
    ) -> ItemResult<Item> {
        let link = UniqueLink::parse(unique_link).map_err(|_| ItemError::NotFound)?;

        let mut item = self
            .repo
            .find_by_unique_link(&link)
            .await?
            .ok_or(ItemError::NotFound)?;

        if !item.can_be_modified_by(caller) {
            return Err(ItemError::Forbidden);
        }

        let patch = ItemPatch {
            title: input.title,
            description: input.description,
            status: input.status.as_deref().map(ItemStatus::parse).transpose()?,
            email: input.email.map(Email::new).transpose()?,
            phone: input.phone,
        };

        if let Some(image) = input.image {
            self.replace_image(&mut item, image).await?;
        }

        item.apply(patch);
        self.repo.update(&item).await?;

        tracing::info!(
            unique_link = %item.unique_link,
            caller = %caller.user_id,
            "Item updated"
        );

        Ok(item)
    }

    /// Upload the new image, then retire the old one
    async fn replace_image(&self, item: &mut Item, image: ImageUpload) -> ItemResult<()> {
        if image.bytes.len() > self.config.max_image_bytes {
            return Err(ItemError::Validation(format!(
                "Image must be at most {} bytes",
                self.config.max_image_bytes
            )));
        }

        let stored = self.images.put(image).await?;

        // Old image goes only after the new upload succeeded; a failed
        // gateway delete leaves an orphan, which is acceptable
        if let Some(old_url) = &item.image_url {
            if let Some(public_id) = public_id_from_url(&self.config.upload_folder, old_url) {
                if let Err(e) = self.images.delete(&public_id).await {
                    tracing::warn!(
                        public_id = %public_id,
                        error = %e,
                        "Failed to delete replaced image from gateway"
                    );
                }
            }
        }

        item.set_image(stored.secure_url);
        Ok(())
    }
}
