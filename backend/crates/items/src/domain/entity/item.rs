//! Item Entity
//!
//! A lost/found posting. Contact fields are stored per-item, redundant
//! with the owner's profile - the posting may outlive or diverge from
//! the user's current contact info. `unique_link` and `created_at`
//! never change after creation.

use chrono::{DateTime, Utc};

use crate::domain::value_object::{
    Email, item_status::ItemStatus, unique_link::UniqueLink,
};
use kernel::id::{ItemId, UserId};
use kernel::identity::Identity;

/// Item entity
#[derive(Debug, Clone, PartialEq)]
pub struct Item {
    /// Internal UUID identifier
    pub item_id: ItemId,
    pub title: String,
    pub description: String,
    pub status: ItemStatus,
    /// Per-item contact email
    pub email: Email,
    /// Per-item contact phone
    pub phone: String,
    /// Gateway URL; `None` when no image was supplied
    pub image_url: Option<String>,
    /// Display-name snapshot taken at creation time
    pub posted_by: String,
    /// Public lookup key, immutable
    pub unique_link: UniqueLink,
    /// Creating user's id; establishes ownership for authorization
    pub owner_id: UserId,
    /// Creation timestamp, immutable
    pub created_at: DateTime<Utc>,
}

/// Partial update. `None` fields retain their prior value; callers map
/// empty wire values to `None` before building the patch.
#[derive(Debug, Default)]
pub struct ItemPatch {
    pub title: Option<String>,
    pub description: Option<String>,
    pub status: Option<ItemStatus>,
    pub email: Option<Email>,
    pub phone: Option<String>,
}

impl Item {
    /// Create a new item with server-assigned fields
    pub fn new(
        title: String,
        description: String,
        status: ItemStatus,
        email: Email,
        phone: String,
        posted_by: String,
        owner_id: UserId,
    ) -> Self {
        let unique_link = UniqueLink::generate(&email);

        Self {
            item_id: ItemId::new(),
            title,
            description,
            status,
            email,
            phone,
            image_url: None,
            posted_by,
            unique_link,
            owner_id,
            created_at: Utc::now(),
        }
    }

    /// Attach (or replace) the externally hosted image URL
    pub fn set_image(&mut self, url: String) {
        self.image_url = Some(url);
    }

    /// Apply a partial update
    pub fn apply(&mut self, patch: ItemPatch) {
        if let Some(title) = patch.title {
            self.title = title;
        }
        if let Some(description) = patch.description {
            self.description = description;
        }
        if let Some(status) = patch.status {
            self.status = status;
        }
        if let Some(email) = patch.email {
            self.email = email;
        }
        if let Some(phone) = patch.phone {
            self.phone = phone;
        }
    }

    /// Ownership/role-based authorization for update and delete
    pub fn can_be_modified_by(&self, caller: &Identity) -> bool {
        caller.can_modify(&self.owner_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kernel::id::Id;
    use kernel::identity::UserRole;

    fn sample_item() -> Item {
        Item::new(
            "Blue Backpack".to_string(),
            "Left in the library".to_string(),
            ItemStatus::Lost,
            Email::new("a@uni.edu").unwrap(),
            "555-1111".to_string(),
            "Alice".to_string(),
            Id::new(),
        )
    }

    #[test]
    fn test_new_item_has_no_image() {
        let item = sample_item();
        assert!(item.image_url.is_none());
        assert!(item.unique_link.as_str().starts_with("a-"));
    }

    #[test]
    fn test_apply_empty_patch_changes_nothing() {
        let mut item = sample_item();
        let before = item.clone();
        item.apply(ItemPatch::default());
        assert_eq!(item, before);
    }

    #[test]
    fn test_apply_partial_patch() {
        let mut item = sample_item();
        let link_before = item.unique_link.clone();

        item.apply(ItemPatch {
            status: Some(ItemStatus::Found),
            ..ItemPatch::default()
        });

        assert_eq!(item.status, ItemStatus::Found);
        assert_eq!(item.title, "Blue Backpack");
        assert_eq!(item.unique_link, link_before);
    }

    #[test]
    fn test_authorization() {
        let item = sample_item();

        let owner = Identity::new(item.owner_id, "Alice", UserRole::Standard);
        let stranger = Identity::new(Id::new(), "Bob", UserRole::Standard);
        let admin = Identity::new(Id::new(), "Root", UserRole::Admin);

        assert!(item.can_be_modified_by(&owner));
        assert!(!item.can_be_modified_by(&stranger));
        assert!(item.can_be_modified_by(&admin));
    }
}
