//! Unit tests for the items crate
//!
//! Use cases are driven against in-memory fakes of the item repository
//! and the image gateway, so neither a database nor a live image host
//! is needed.

use std::sync::{Arc, Mutex};
use std::sync::atomic::{AtomicU64, Ordering};

use crate::application::{
    CreateItemInput, CreateItemUseCase, DeleteItemUseCase, GetItemUseCase, ItemsConfig,
    ListItemsUseCase, UpdateItemInput, UpdateItemUseCase,
};
use crate::domain::entity::item::Item;
use crate::domain::gateway::{ImageStore, ImageUpload, StoredImage};
use crate::domain::repository::ItemRepository;
use crate::domain::value_object::unique_link::UniqueLink;
use crate::error::{ItemError, ItemResult};
use kernel::id::{Id, UserId};
use kernel::identity::{Identity, UserRole};

// ============================================================================
// Fakes
// ============================================================================

#[derive(Clone, Default)]
struct InMemoryItems {
    items: Arc<Mutex<Vec<Item>>>,
}

impl InMemoryItems {
    fn len(&self) -> usize {
        self.items.lock().unwrap().len()
    }
}

impl ItemRepository for InMemoryItems {
    async fn create(&self, item: &Item) -> ItemResult<()> {
        let mut items = self.items.lock().unwrap();
        if items.iter().any(|i| i.unique_link == item.unique_link) {
            return Err(ItemError::LinkConflict);
        }
        items.push(item.clone());
        Ok(())
    }

    async fn find_all(&self) -> ItemResult<Vec<Item>> {
        Ok(self.items.lock().unwrap().clone())
    }

    async fn find_by_unique_link(&self, link: &UniqueLink) -> ItemResult<Option<Item>> {
        Ok(self
            .items
            .lock()
            .unwrap()
            .iter()
            .find(|i| &i.unique_link == link)
            .cloned())
    }

    async fn update(&self, item: &Item) -> ItemResult<()> {
        let mut items = self.items.lock().unwrap();
        let slot = items
            .iter_mut()
            .find(|i| i.item_id == item.item_id)
            .ok_or(ItemError::NotFound)?;
        *slot = item.clone();
        Ok(())
    }

    async fn delete_by_unique_link(&self, link: &UniqueLink) -> ItemResult<()> {
        self.items.lock().unwrap().retain(|i| &i.unique_link != link);
        Ok(())
    }
}

/// Fake gateway recording uploads and deletes; failures are switchable
#[derive(Clone, Default)]
struct FakeImageStore {
    uploads: Arc<AtomicU64>,
    deleted: Arc<Mutex<Vec<String>>>,
    fail_put: bool,
    fail_delete: bool,
}

impl FakeImageStore {
    fn failing_put() -> Self {
        Self {
            fail_put: true,
            ..Self::default()
        }
    }

    fn failing_delete() -> Self {
        Self {
            fail_delete: true,
            ..Self::default()
        }
    }

    fn deleted_ids(&self) -> Vec<String> {
        self.deleted.lock().unwrap().clone()
    }
}

impl ImageStore for FakeImageStore {
    async fn put(&self, _upload: ImageUpload) -> ItemResult<StoredImage> {
        if self.fail_put {
            return Err(ItemError::Upload("gateway down".to_string()));
        }
        let n = self.uploads.fetch_add(1, Ordering::SeqCst);
        Ok(StoredImage {
            secure_url: format!("https://res.example.com/lostlink_images/img{}.jpg", n),
            public_id: format!("lostlink_images/img{}", n),
        })
    }

    async fn delete(&self, public_id: &str) -> ItemResult<()> {
        if self.fail_delete {
            return Err(ItemError::Upload("gateway down".to_string()));
        }
        self.deleted.lock().unwrap().push(public_id.to_string());
        Ok(())
    }
}

// ============================================================================
// Helpers
// ============================================================================

struct Harness {
    repo: InMemoryItems,
    images: FakeImageStore,
    create: CreateItemUseCase<InMemoryItems, FakeImageStore>,
    get: GetItemUseCase<InMemoryItems>,
    list: ListItemsUseCase<InMemoryItems>,
    update: UpdateItemUseCase<InMemoryItems, FakeImageStore>,
    delete: DeleteItemUseCase<InMemoryItems, FakeImageStore>,
}

fn harness_with(images: FakeImageStore) -> Harness {
    let repo = InMemoryItems::default();
    let repo_arc = Arc::new(repo.clone());
    let images_arc = Arc::new(images.clone());
    let config = Arc::new(ItemsConfig::default());

    Harness {
        repo,
        images,
        create: CreateItemUseCase::new(repo_arc.clone(), images_arc.clone(), config.clone()),
        get: GetItemUseCase::new(repo_arc.clone()),
        list: ListItemsUseCase::new(repo_arc.clone()),
        update: UpdateItemUseCase::new(repo_arc.clone(), images_arc.clone(), config.clone()),
        delete: DeleteItemUseCase::new(repo_arc, images_arc, config),
    }
}

fn harness() -> Harness {
    harness_with(FakeImageStore::default())
}

fn owner_id() -> UserId {
    Id::new()
}

fn create_input(owner: &UserId) -> CreateItemInput {
    CreateItemInput {
        title: "Blue Backpack".to_string(),
        description: "Left in the library".to_string(),
        status: "lost".to_string(),
        email: "a@uni.edu".to_string(),
        phone: "555-1111".to_string(),
        posted_by: "Alice".to_string(),
        uid: owner.to_string(),
        image: None,
    }
}

fn image() -> ImageUpload {
    ImageUpload {
        bytes: vec![0xFF, 0xD8, 0xFF, 0xE0],
        file_name: Some("backpack.jpg".to_string()),
        content_type: Some("image/jpeg".to_string()),
    }
}

fn identity(user_id: UserId, role: UserRole) -> Identity {
    Identity::new(user_id, "someone", role)
}

// ============================================================================
// Create
// ============================================================================

#[tokio::test]
async fn create_without_image_has_no_image_url() {
    let h = harness();
    let item = h.create.execute(create_input(&owner_id())).await.unwrap();
    assert!(item.image_url.is_none());
}

#[tokio::test]
async fn create_with_image_stores_gateway_url() {
    let h = harness();
    let item = h
        .create
        .execute(CreateItemInput {
            image: Some(image()),
            ..create_input(&owner_id())
        })
        .await
        .unwrap();

    let url = item.image_url.expect("image URL should be set");
    assert!(url.starts_with("https://"));
}

#[tokio::test]
async fn create_missing_field_persists_nothing() {
    let h = harness();
    let owner = owner_id();

    for input in [
        CreateItemInput {
            title: "".to_string(),
            ..create_input(&owner)
        },
        CreateItemInput {
            phone: "  ".to_string(),
            ..create_input(&owner)
        },
        CreateItemInput {
            posted_by: "".to_string(),
            ..create_input(&owner)
        },
        CreateItemInput {
            uid: "".to_string(),
            ..create_input(&owner)
        },
    ] {
        let err = h.create.execute(input).await.unwrap_err();
        assert!(matches!(err, ItemError::MissingFields));
    }
    assert_eq!(h.repo.len(), 0);
}

#[tokio::test]
async fn create_rejects_bad_status_and_uid() {
    let h = harness();
    let owner = owner_id();

    let err = h
        .create
        .execute(CreateItemInput {
            status: "misplaced".to_string(),
            ..create_input(&owner)
        })
        .await
        .unwrap_err();
    assert!(matches!(err, ItemError::Validation(_)));

    let err = h
        .create
        .execute(CreateItemInput {
            uid: "not-a-uuid".to_string(),
            ..create_input(&owner)
        })
        .await
        .unwrap_err();
    assert!(matches!(err, ItemError::Validation(_)));
}

#[tokio::test]
async fn create_upload_failure_persists_nothing() {
    let h = harness_with(FakeImageStore::failing_put());

    let err = h
        .create
        .execute(CreateItemInput {
            image: Some(image()),
            ..create_input(&owner_id())
        })
        .await
        .unwrap_err();

    assert!(matches!(err, ItemError::Upload(_)));
    assert_eq!(h.repo.len(), 0);
}

#[tokio::test]
async fn create_rejects_oversized_image() {
    let h = harness();

    let err = h
        .create
        .execute(CreateItemInput {
            image: Some(ImageUpload {
                bytes: vec![0u8; ItemsConfig::default().max_image_bytes + 1],
                ..image()
            }),
            ..create_input(&owner_id())
        })
        .await
        .unwrap_err();

    assert!(matches!(err, ItemError::Validation(_)));
    assert_eq!(h.repo.len(), 0);
}

// ============================================================================
// Read
// ============================================================================

#[tokio::test]
async fn unique_link_round_trips() {
    let h = harness();
    let created = h.create.execute(create_input(&owner_id())).await.unwrap();

    let fetched = h.get.execute(created.unique_link.as_str()).await.unwrap();
    assert_eq!(fetched, created);
}

#[tokio::test]
async fn get_unknown_link_not_found() {
    let h = harness();
    let err = h.get.execute("nobody-abc123").await.unwrap_err();
    assert!(matches!(err, ItemError::NotFound));
}

#[tokio::test]
async fn list_returns_every_item() {
    let h = harness();
    let owner = owner_id();

    h.create.execute(create_input(&owner)).await.unwrap();
    h.create
        .execute(CreateItemInput {
            title: "Red Umbrella".to_string(),
            status: "found".to_string(),
            ..create_input(&owner)
        })
        .await
        .unwrap();

    let items = h.list.execute().await.unwrap();
    assert_eq!(items.len(), 2);
}

// ============================================================================
// Update
// ============================================================================

#[tokio::test]
async fn update_with_only_status_leaves_other_fields_untouched() {
    let h = harness();
    let owner = owner_id();
    let created = h.create.execute(create_input(&owner)).await.unwrap();

    let updated = h
        .update
        .execute(
            created.unique_link.as_str(),
            &identity(owner, UserRole::Standard),
            UpdateItemInput {
                status: Some("found".to_string()),
                ..UpdateItemInput::default()
            },
        )
        .await
        .unwrap();

    assert_eq!(updated.status.code(), "found");
    assert_eq!(updated.title, created.title);
    assert_eq!(updated.description, created.description);
    assert_eq!(updated.email, created.email);
    assert_eq!(updated.phone, created.phone);
    assert_eq!(updated.posted_by, created.posted_by);
    assert_eq!(updated.unique_link, created.unique_link);
    assert_eq!(updated.created_at, created.created_at);
}

#[tokio::test]
async fn update_by_non_owner_forbidden() {
    let h = harness();
    let created = h.create.execute(create_input(&owner_id())).await.unwrap();

    let err = h
        .update
        .execute(
            created.unique_link.as_str(),
            &identity(Id::new(), UserRole::Standard),
            UpdateItemInput {
                title: Some("Stolen Backpack".to_string()),
                ..UpdateItemInput::default()
            },
        )
        .await
        .unwrap_err();

    assert!(matches!(err, ItemError::Forbidden));

    let unchanged = h.get.execute(created.unique_link.as_str()).await.unwrap();
    assert_eq!(unchanged.title, "Blue Backpack");
}

#[tokio::test]
async fn update_by_admin_allowed() {
    let h = harness();
    let created = h.create.execute(create_input(&owner_id())).await.unwrap();

    let updated = h
        .update
        .execute(
            created.unique_link.as_str(),
            &identity(Id::new(), UserRole::Admin),
            UpdateItemInput {
                description: Some("Handed to campus security".to_string()),
                ..UpdateItemInput::default()
            },
        )
        .await
        .unwrap();

    assert_eq!(updated.description, "Handed to campus security");
}

#[tokio::test]
async fn update_unknown_link_not_found() {
    let h = harness();
    let err = h
        .update
        .execute(
            "nobody-abc123",
            &identity(Id::new(), UserRole::Standard),
            UpdateItemInput::default(),
        )
        .await
        .unwrap_err();
    assert!(matches!(err, ItemError::NotFound));
}

#[tokio::test]
async fn update_replacing_image_deletes_old_one() {
    let h = harness();
    let owner = owner_id();
    let created = h
        .create
        .execute(CreateItemInput {
            image: Some(image()),
            ..create_input(&owner)
        })
        .await
        .unwrap();
    let old_url = created.image_url.clone().unwrap();

    let updated = h
        .update
        .execute(
            created.unique_link.as_str(),
            &identity(owner, UserRole::Standard),
            UpdateItemInput {
                image: Some(image()),
                ..UpdateItemInput::default()
            },
        )
        .await
        .unwrap();

    let new_url = updated.image_url.unwrap();
    assert_ne!(new_url, old_url);
    assert_eq!(h.images.deleted_ids(), vec!["lostlink_images/img0"]);
}

#[tokio::test]
async fn update_upload_failure_keeps_old_image() {
    let h = harness();
    let owner = owner_id();
    let created = h
        .create
        .execute(CreateItemInput {
            image: Some(image()),
            ..create_input(&owner)
        })
        .await
        .unwrap();
    let old_url = created.image_url.clone().unwrap();

    // Swap in a gateway that fails uploads but records deletes
    let failing = FakeImageStore {
        fail_put: true,
        deleted: h.images.deleted.clone(),
        ..FakeImageStore::default()
    };
    let update = UpdateItemUseCase::new(
        Arc::new(h.repo.clone()),
        Arc::new(failing),
        Arc::new(ItemsConfig::default()),
    );

    let err = update
        .execute(
            created.unique_link.as_str(),
            &identity(owner, UserRole::Standard),
            UpdateItemInput {
                image: Some(image()),
                ..UpdateItemInput::default()
            },
        )
        .await
        .unwrap_err();

    assert!(matches!(err, ItemError::Upload(_)));
    // Old remote image untouched, record still points at it
    assert!(h.images.deleted_ids().is_empty());
    let unchanged = h.get.execute(created.unique_link.as_str()).await.unwrap();
    assert_eq!(unchanged.image_url, Some(old_url));
}

#[tokio::test]
async fn update_old_image_delete_failure_still_commits() {
    let h = harness_with(FakeImageStore::failing_delete());
    let owner = owner_id();
    let created = h
        .create
        .execute(CreateItemInput {
            image: Some(image()),
            ..create_input(&owner)
        })
        .await
        .unwrap();

    // Gateway delete of the replaced image fails; the update proceeds
    let updated = h
        .update
        .execute(
            created.unique_link.as_str(),
            &identity(owner, UserRole::Standard),
            UpdateItemInput {
                image: Some(image()),
                ..UpdateItemInput::default()
            },
        )
        .await
        .unwrap();

    assert_ne!(updated.image_url, created.image_url);
}

// ============================================================================
// Delete
// ============================================================================

#[tokio::test]
async fn delete_by_non_owner_forbidden_and_item_remains() {
    let h = harness();
    let created = h.create.execute(create_input(&owner_id())).await.unwrap();

    let err = h
        .delete
        .execute(
            created.unique_link.as_str(),
            &identity(Id::new(), UserRole::Standard),
        )
        .await
        .unwrap_err();

    assert!(matches!(err, ItemError::Forbidden));
    assert!(h.get.execute(created.unique_link.as_str()).await.is_ok());
}

#[tokio::test]
async fn delete_by_owner_removes_item_and_image() {
    let h = harness();
    let owner = owner_id();
    let created = h
        .create
        .execute(CreateItemInput {
            image: Some(image()),
            ..create_input(&owner)
        })
        .await
        .unwrap();

    h.delete
        .execute(
            created.unique_link.as_str(),
            &identity(owner, UserRole::Standard),
        )
        .await
        .unwrap();

    let err = h.get.execute(created.unique_link.as_str()).await.unwrap_err();
    assert!(matches!(err, ItemError::NotFound));
    assert_eq!(h.images.deleted_ids(), vec!["lostlink_images/img0"]);
}

#[tokio::test]
async fn delete_by_admin_allowed() {
    let h = harness();
    let created = h.create.execute(create_input(&owner_id())).await.unwrap();

    h.delete
        .execute(
            created.unique_link.as_str(),
            &identity(Id::new(), UserRole::Admin),
        )
        .await
        .unwrap();

    assert_eq!(h.repo.len(), 0);
}

#[tokio::test]
async fn delete_gateway_failure_still_removes_record() {
    let h = harness_with(FakeImageStore::failing_delete());
    let owner = owner_id();
    let created = h
        .create
        .execute(CreateItemInput {
            image: Some(image()),
            ..create_input(&owner)
        })
        .await
        .unwrap();

    h.delete
        .execute(
            created.unique_link.as_str(),
            &identity(owner, UserRole::Standard),
        )
        .await
        .unwrap();

    assert_eq!(h.repo.len(), 0);
}

#[tokio::test]
async fn delete_unknown_link_not_found() {
    let h = harness();
    let err = h
        .delete
        .execute("nobody-abc123", &identity(Id::new(), UserRole::Admin))
        .await
        .unwrap_err();
    assert!(matches!(err, ItemError::NotFound));
}

// ============================================================================
// End-to-end scenario
// ============================================================================

#[tokio::test]
async fn blue_backpack_scenario() {
    let h = harness();
    let alice = owner_id();
    let bob = owner_id();

    // Alice posts a lost item
    let created = h.create.execute(create_input(&alice)).await.unwrap();
    assert!(created.unique_link.as_str().starts_with("a-"));

    // The link resolves to the same posting
    let fetched = h.get.execute(created.unique_link.as_str()).await.unwrap();
    assert_eq!(fetched.title, "Blue Backpack");

    // Bob may not delete it
    let err = h
        .delete
        .execute(
            created.unique_link.as_str(),
            &identity(bob, UserRole::Standard),
        )
        .await
        .unwrap_err();
    assert!(matches!(err, ItemError::Forbidden));

    // Alice may
    h.delete
        .execute(
            created.unique_link.as_str(),
            &identity(alice, UserRole::Standard),
        )
        .await
        .unwrap();

    // And the link is gone
    let err = h.get.execute(created.unique_link.as_str()).await.unwrap_err();
    assert!(matches!(err, ItemError::NotFound));
}
