//! List Items Use Case
//!
//! Every item, unfiltered and unpaginated. Public - no authorization.

use std::sync::Arc;

use crate::domain::entity::item::Item;
use crate::domain::repository::ItemRepository;
use crate::error::ItemResult;

/// List items use case
pub struct ListItemsUseCase<R>
where
    R: ItemRepository,
{
    repo: Arc<R>,
}

impl<R> ListItemsUseCase<R>
where
    R: ItemRepository,
{
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    pub async fn execute(&self) -> ItemResult<Vec<Item>> {
        self.repo.find_all().await
    }
}
