//! Get Item Use Case
//!
//! Lookup by public link. Public - no authorization.

use std::sync::Arc;

use crate::domain::entity::item::Item;
use crate::domain::repository::ItemRepository;
use crate::domain::value_object::unique_link::UniqueLink;
use crate::error::{ItemError, ItemResult};

/// Get item use case
pub struct GetItemUseCase<R>
where
    R: ItemRepository,
{
    repo: Arc<R>,
}

impl<R> GetItemUseCase<R>
where
    R: ItemRepository,
{
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    pub async fn execute(&self, unique_link: &str) -> ItemResult<Item> {
        let link = UniqueLink::parse(unique_link).map_err(|_| ItemError::NotFound)?;

        self.repo
            .find_by_unique_link(&link)
            .await?
            .ok_or(ItemError::NotFound)
    }
}
