//! # Mealie HTTP Client
//!
//! Typed wrappers around Mealie's household shopping endpoints.
//!
//! ## Modules
//!
//! - [`routes`] - Path table for the shopping endpoints
//! - [`requests`] - The [`ApiRequests`] executor seam and its `reqwest` implementation
//! - [`base`] - Generic CRUD client embedded by every entity API
//! - [`shopping`] - Shopping lists, items and the [`ShoppingApi`] facade
//! - [`types`] - Request and response shapes
//! - [`error`] - [`ApiError`]
//!
//! ## Quick Start
//!
//! ```no_run
//! use std::sync::Arc;
//! use mcp_mealie::client::{ReqwestRequests, ShoppingApi, ShoppingListItemCreate};
//!
//! # async fn example() -> anyhow::Result<()> {
//! let requests = ReqwestRequests::new("http://localhost:9000").with_token("my-api-token");
//! let api = ShoppingApi::new(Arc::new(requests));
//!
//! let lists = api.lists.list(1, -1, &[]).await?.data()?;
//! if let Some(list) = lists.items.first() {
//!     let items = vec![ShoppingListItemCreate::note(list.id.clone(), "milk")];
//!     api.items.create_many(&items).await?;
//! }
//! # Ok(())
//! # }
//! ```

pub mod base;
pub mod error;
pub mod requests;
pub mod routes;
pub mod shopping;
pub mod types;

pub use base::{BaseCrudApi, ALL_PAGES};
pub use error::ApiError;
pub use requests::{ApiRequests, ApiResponse, ReqwestRequests, RequestResponse};
pub use shopping::{ShoppingApi, ShoppingListItemsApi, ShoppingListsApi};
pub use types::*;
