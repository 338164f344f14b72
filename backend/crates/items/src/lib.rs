//! Items (Lost & Found Postings) Backend Module
//!
//! Clean Architecture structure:
//! - `domain/` - Business logic, entities, repository + gateway traits
//! - `application/` - Use cases
//! - `infra/` - Database and image-gateway implementations
//! - `presentation/` - HTTP handlers, DTOs, router
//!
//! ## Authorization Model
//! - Listing and lookup by public link are unauthenticated
//! - Update and delete require the caller to be the owner or an admin;
//!   the verified identity arrives via request extensions from the auth
//!   middleware
//! - Item creation is public; the posting user id travels in the form
//!
//! ## Image Lifecycle
//! - Images are uploaded to an external gateway from an in-memory
//!   buffer before the item record is written
//! - On replacement the new image is uploaded first; the old one is
//!   only deleted after the upload succeeds
//! - On item deletion the gateway delete is best-effort: an orphaned
//!   remote image is acceptable, an undeletable item record is not

pub mod application;
pub mod domain;
pub mod error;
pub mod infra;
pub mod presentation;

// Re-exports for convenience
pub use application::config::ItemsConfig;
pub use error::{ItemError, ItemResult};
pub use infra::cloudinary::CloudinaryImageStore;
pub use infra::postgres::PgItemRepository;
pub use presentation::router::{items_protected_router, items_public_router};

// Re-export kernel error types for unified error handling
pub use kernel::error::{
    app_error::{AppError, AppResult},
    kind::ErrorKind,
};

// Convenience re-exports
pub mod config {
    pub use crate::application::config::*;
}

pub mod models {
    pub use crate::domain::entity::*;
    pub use crate::domain::value_object::*;
    pub use crate::presentation::dto::*;
}

pub mod handlers {
    pub use crate::presentation::handlers::*;
}

pub mod store {
    pub use crate::infra::postgres::PgItemRepository as ItemStore;
}

pub mod router {
    pub use crate::presentation::router::*;
}

#[cfg(test)]
mod tests;
