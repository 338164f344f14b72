//! PostgreSQL Repository Implementations

use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::entity::item::Item;
use crate::domain::repository::ItemRepository;
use crate::domain::value_object::{
    Email, item_status::ItemStatus, unique_link::UniqueLink,
};
use crate::error::{ItemError, ItemResult};
use kernel::id::{ItemId, UserId};

/// PostgreSQL-backed item repository
#[derive(Clone)]
pub struct PgItemRepository {
    pool: PgPool,
}

impl PgItemRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// Map a unique-violation on the link index to the domain conflict
fn map_create_err(err: sqlx::Error) -> ItemError {
    if let sqlx::Error::Database(db_err) = &err {
        if db_err.code().as_deref() == Some("23505") {
            return ItemError::LinkConflict;
        }
    }
    ItemError::Database(err)
}

impl ItemRepository for PgItemRepository {
    async fn create(&self, item: &Item) -> ItemResult<()> {
        sqlx::query(
            r#"
            INSERT INTO items (
                item_id,
                title,
                description,
                status,
                email,
                phone,
                image_url,
                posted_by,
                unique_link,
                owner_id,
                created_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
            "#,
        )
        .bind(item.item_id.as_uuid())
        .bind(&item.title)
        .bind(&item.description)
        .bind(item.status.id())
        .bind(item.email.as_str())
        .bind(&item.phone)
        .bind(item.image_url.as_deref())
        .bind(&item.posted_by)
        .bind(item.unique_link.as_str())
        .bind(item.owner_id.as_uuid())
        .bind(item.created_at)
        .execute(&self.pool)
        .await
        .map_err(map_create_err)?;

        Ok(())
    }

    async fn find_all(&self) -> ItemResult<Vec<Item>> {
        let rows = sqlx::query_as::<_, ItemRow>(
            r#"
            SELECT
                item_id,
                title,
                description,
                status,
                email,
                phone,
                image_url,
                posted_by,
                unique_link,
                owner_id,
                created_at
            FROM items
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(ItemRow::into_item).collect())
    }

    async fn find_by_unique_link(&self, link: &UniqueLink) -> ItemResult<Option<Item>> {
        let row = sqlx::query_as::<_, ItemRow>(
            r#"
            SELECT
                item_id,
                title,
                description,
                status,
                email,
                phone,
                image_url,
                posted_by,
                unique_link,
                owner_id,
                created_at
            FROM items
            WHERE unique_link = $1
            "#,
        )
        .bind(link.as_str())
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(ItemRow::into_item))
    }

    async fn update(&self, item: &Item) -> ItemResult<()> {
        sqlx::query(
            r#"
            UPDATE items SET
                title = $2,
                description = $3,
                status = $4,
                email = $5,
                phone = $6,
                image_url = $7
            WHERE item_id = $1
            "#,
        )
        .bind(item.item_id.as_uuid())
        .bind(&item.title)
        .bind(&item.description)
        .bind(item.status.id())
        .bind(item.email.as_str())
        .bind(&item.phone)
        .bind(item.image_url.as_deref())
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn delete_by_unique_link(&self, link: &UniqueLink) -> ItemResult<()> {
        sqlx::query("DELETE FROM items WHERE unique_link = $1")
            .bind(link.as_str())
            .execute(&self.pool)
            .await?;

        Ok(())
    }
}

// ============================================================================
// Row types
// ============================================================================

#[derive(sqlx::FromRow)]
struct ItemRow {
    item_id: Uuid,
    title: String,
    description: String,
    status: i16,
    email: String,
    phone: String,
    image_url: Option<String>,
    posted_by: String,
    unique_link: String,
    owner_id: Uuid,
    created_at: DateTime<Utc>,
}

impl ItemRow {
    fn into_item(self) -> Item {
        Item {
            item_id: ItemId::from_uuid(self.item_id),
            title: self.title,
            description: self.description,
            status: ItemStatus::from_id(self.status),
            email: Email::from_db(self.email),
            phone: self.phone,
            image_url: self.image_url,
            posted_by: self.posted_by,
            unique_link: UniqueLink::from_db(self.unique_link),
            owner_id: UserId::from_uuid(self.owner_id),
            created_at: self.created_at,
        }
    }
}
