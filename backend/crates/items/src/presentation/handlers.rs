//! HTTP Handlers
//!
//! Create and update accept multipart form bodies (text fields plus an
//! optional `image` file part) matching the original upload contract.

use axum::extract::{Extension, Multipart, Path, State};
use axum::http::StatusCode;
use axum::Json;
use std::collections::HashMap;
use std::sync::Arc;

use crate::application::config::ItemsConfig;
use crate::application::{
    CreateItemInput, CreateItemUseCase, DeleteItemUseCase, GetItemUseCase, ListItemsUseCase,
    UpdateItemInput, UpdateItemUseCase,
};
use crate::domain::gateway::{ImageStore, ImageUpload};
use crate::domain::repository::ItemRepository;
use crate::error::{ItemError, ItemResult};
use crate::presentation::dto::{
    CreateItemResponse, DeleteItemResponse, ItemResponse, UpdateItemResponse,
};
use kernel::identity::Identity;

/// Shared state for item handlers
#[derive(Clone)]
pub struct ItemsAppState<R, G>
where
    R: ItemRepository + Clone + Send + Sync + 'static,
    G: ImageStore + Clone + Send + Sync + 'static,
{
    pub repo: Arc<R>,
    pub images: Arc<G>,
    pub config: Arc<ItemsConfig>,
}

// ============================================================================
// Multipart form collection
// ============================================================================

/// Text fields plus the optional image part of an item form
struct ItemForm {
    fields: HashMap<String, String>,
    image: Option<ImageUpload>,
}

impl ItemForm {
    /// Required-field accessor; missing maps to empty, the use case
    /// rejects it
    fn take(&mut self, name: &str) -> String {
        self.fields.remove(name).unwrap_or_default()
    }

    /// Optional-field accessor; empty wire values mean "leave as is"
    fn take_optional(&mut self, name: &str) -> Option<String> {
        self.fields
            .remove(name)
            .filter(|value| !value.trim().is_empty())
    }
}

async fn collect_form(mut multipart: Multipart) -> ItemResult<ItemForm> {
    let mut fields = HashMap::new();
    let mut image = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ItemError::Validation(format!("Malformed multipart body: {e}")))?
    {
        let Some(name) = field.name().map(str::to_string) else {
            continue;
        };

        if name == "image" {
            let file_name = field.file_name().map(str::to_string);
            let content_type = field.content_type().map(str::to_string);
            let bytes = field
                .bytes()
                .await
                .map_err(|e| ItemError::Validation(format!("Malformed multipart body: {e}")))?;

            // An empty file part means no image was attached
            if !bytes.is_empty() {
                image = Some(ImageUpload {
                    bytes: bytes.to_vec(),
                    file_name,
                    content_type,
                });
            }
        } else {
            let value = field
                .text()
                .await
                .map_err(|e| ItemError::Validation(format!("Malformed multipart body: {e}")))?;
            fields.insert(name, value);
        }
    }

    Ok(ItemForm { fields, image })
}

// ============================================================================
// Create
// ============================================================================

/// POST /api/items
pub async fn create_item<R, G>(
    State(state): State<ItemsAppState<R, G>>,
    multipart: Multipart,
) -> ItemResult<(StatusCode, Json<CreateItemResponse>)>
where
    R: ItemRepository + Clone + Send + Sync + 'static,
    G: ImageStore + Clone + Send + Sync + 'static,
{
    let mut form = collect_form(multipart).await?;

    let use_case = CreateItemUseCase::new(
        state.repo.clone(),
        state.images.clone(),
        state.config.clone(),
    );

    let input = CreateItemInput {
        title: form.take("title"),
        description: form.take("description"),
        status: form.take("status"),
        email: form.take("email"),
        phone: form.take("phone"),
        posted_by: form.take("postedBy"),
        uid: form.take("uid"),
        image: form.image,
    };

    let item = use_case.execute(input).await?;

    Ok((
        StatusCode::CREATED,
        Json(CreateItemResponse {
            message: "Item created successfully".to_string(),
            item: ItemResponse::from(item),
        }),
    ))
}

// ============================================================================
// Read
// ============================================================================

/// GET /api/items
pub async fn list_items<R, G>(
    State(state): State<ItemsAppState<R, G>>,
) -> ItemResult<Json<Vec<ItemResponse>>>
where
    R: ItemRepository + Clone + Send + Sync + 'static,
    G: ImageStore + Clone + Send + Sync + 'static,
{
    let use_case = ListItemsUseCase::new(state.repo.clone());

    let items = use_case.execute().await?;

    Ok(Json(items.into_iter().map(ItemResponse::from).collect()))
}

/// GET /api/items/{uniqueLink}
pub async fn get_item<R, G>(
    State(state): State<ItemsAppState<R, G>>,
    Path(unique_link): Path<String>,
) -> ItemResult<Json<ItemResponse>>
where
    R: ItemRepository + Clone + Send + Sync + 'static,
    G: ImageStore + Clone + Send + Sync + 'static,
{
    let use_case = GetItemUseCase::new(state.repo.clone());

    let item = use_case.execute(&unique_link).await?;

    Ok(Json(ItemResponse::from(item)))
}

// ============================================================================
// Update
// ============================================================================

/// PUT /api/items/{uniqueLink} (bearer token required)
pub async fn update_item<R, G>(
    State(state): State<ItemsAppState<R, G>>,
    Path(unique_link): Path<String>,
    Extension(caller): Extension<Identity>,
    multipart: Multipart,
) -> ItemResult<Json<UpdateItemResponse>>
where
    R: ItemRepository + Clone + Send + Sync + 'static,
    G: ImageStore + Clone + Send + Sync + 'static,
{
    let mut form = collect_form(multipart).await?;

    let use_case = UpdateItemUseCase::new(
        state.repo.clone(),
        state.images.clone(),
        state.config.clone(),
    );

    let input = UpdateItemInput {
        title: form.take_optional("title"),
        description: form.take_optional("description"),
        status: form.take_optional("status"),
        email: form.take_optional("email"),
        phone: form.take_optional("phone"),
        image: form.image,
    };

    let item = use_case.execute(&unique_link, &caller, input).await?;

    Ok(Json(UpdateItemResponse {
        message: "Item updated successfully.".to_string(),
        item: ItemResponse::from(item),
    }))
}

// ============================================================================
// Delete
// ============================================================================

/// DELETE /api/items/{uniqueLink} (bearer token required)
pub async fn delete_item<R, G>(
    State(state): State<ItemsAppState<R, G>>,
    Path(unique_link): Path<String>,
    Extension(caller): Extension<Identity>,
) -> ItemResult<Json<DeleteItemResponse>>
where
    R: ItemRepository + Clone + Send + Sync + 'static,
    G: ImageStore + Clone + Send + Sync + 'static,
{
    let use_case = DeleteItemUseCase::new(
        state.repo.clone(),
        state.images.clone(),
        state.config.clone(),
    );

    use_case.execute(&unique_link, &caller).await?;

    Ok(Json(DeleteItemResponse {
        message: "Item and image deleted successfully.".to_string(),
    }))
}
