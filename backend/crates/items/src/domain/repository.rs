//! Repository Traits
//!
//! Interfaces for data persistence. Implementation is in infrastructure layer.

use crate::domain::entity::item::Item;
use crate::domain::value_object::unique_link::UniqueLink;
use crate::error::ItemResult;

/// Item repository trait (the Item Store interface)
#[trait_variant::make(ItemRepository: Send)]
pub trait LocalItemRepository {
    /// Persist a new item
    ///
    /// A unique-link collision must surface as `ItemError::LinkConflict`,
    /// never overwrite the existing record.
    async fn create(&self, item: &Item) -> ItemResult<()>;

    /// Every item, unfiltered, in store-native order
    async fn find_all(&self) -> ItemResult<Vec<Item>>;

    /// Find an item by its public link
    async fn find_by_unique_link(&self, link: &UniqueLink) -> ItemResult<Option<Item>>;

    /// Update an existing item (all mutable fields)
    async fn update(&self, item: &Item) -> ItemResult<()>;

    /// Remove an item by its public link
    async fn delete_by_unique_link(&self, link: &UniqueLink) -> ItemResult<()>;
}
