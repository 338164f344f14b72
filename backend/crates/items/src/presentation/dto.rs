//! API DTOs (Data Transfer Objects)
//!
//! Wire field names follow the original public contract (`imageURL`,
//! `postedBy`, `uniqueLink`, `uid`).

use serde::Serialize;

use crate::domain::entity::item::Item;

/// Item as serialized to clients
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemResponse {
    pub id: String,
    pub title: String,
    pub description: String,
    pub status: String,
    pub email: String,
    pub phone: String,
    /// Empty string when no image was supplied
    #[serde(rename = "imageURL")]
    pub image_url: String,
    pub posted_by: String,
    pub unique_link: String,
    pub uid: String,
    pub created_at: String,
}

impl From<Item> for ItemResponse {
    fn from(item: Item) -> Self {
        Self {
            id: item.item_id.to_string(),
            title: item.title,
            description: item.description,
            status: item.status.code().to_string(),
            email: item.email.into_db(),
            phone: item.phone,
            image_url: item.image_url.unwrap_or_default(),
            posted_by: item.posted_by,
            unique_link: item.unique_link.into_db(),
            uid: item.owner_id.to_string(),
            created_at: item.created_at.to_rfc3339(),
        }
    }
}

/// Create item response
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateItemResponse {
    pub message: String,
    pub item: ItemResponse,
}

/// Update item response
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateItemResponse {
    pub message: String,
    pub item: ItemResponse,
}

/// Delete item response
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DeleteItemResponse {
    pub message: String,
}
