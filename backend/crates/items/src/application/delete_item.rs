//! Delete Item Use Case
//!
//! Restricted to the owner or an admin. The gateway delete is
//! best-effort: an orphaned remote image is acceptable, an undeletable
//! item record is not.

use std::sync::Arc;

use crate::application::config::ItemsConfig;
use crate::domain::gateway::{ImageStore, public_id_from_url};
use crate::domain::repository::ItemRepository;
use crate::domain::value_object::unique_link::UniqueLink;
use crate::error::{ItemError, ItemResult};
use kernel::identity::Identity;

/// Delete item use case
pub struct DeleteItemUseCase<R, G>
where
    R: ItemRepository,
    G: ImageStore,
{
    repo: Arc<R>,
    images: Arc<G>,
    config: Arc<ItemsConfig>,
}

impl<R, G> DeleteItemUseCase<R, G>
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

    pub async fn execute(&self, unique_link: &str, caller: &Identity) -> ItemResult<()> {
        let link = UniqueLink::parse(unique_link).map_err(|_| ItemError::NotFound)?;

        let item = self
            .repo
            .find_by_unique_link(&link)
            .await?
            .ok_or(ItemError::NotFound)?;

        if !item.can_be_modified_by(caller) {
            return Err(ItemError::Forbidden);
        }

        if let Some(url) = &item.image_url {
            if let Some(public_id) = public_id_from_url(&self.config.upload_folder, url) {
                if let Err(e) = self.images.delete(&public_id).await {
                    tracing::warn!(
                        public_id = %public_id,
                        error = %e,
                        "Failed to delete image from gateway, removing item anyway"
                    );
                }
            }
        }

        self.repo.delete_by_unique_link(&link).await?;

        tracing::info!(
            unique_link = %link,
            caller = %caller.user_id,
            "Item deleted"
        );

        Ok(())
    }
}
