//! Typed clients for household shopping lists and their items.

use std::ops::Deref;
use std::sync::Arc;

use crate::client::base::{to_body, BaseCrudApi};
use crate::client::error::ApiError;
use crate::client::requests::{ApiRequests, RequestResponse};
use crate::client::routes;
use crate::client::types::*;

pub type ShoppingListsCrud<R> =
    BaseCrudApi<R, ShoppingListCreate, ShoppingListOut, ShoppingListUpdate>;

pub type ShoppingListItemsCrud<R> =
    BaseCrudApi<R, ShoppingListItemCreate, ShoppingListItemOut, ShoppingListItemUpdateBulk>;

/// Shopping lists, plus recipe and label-setting actions on a single list.
pub struct ShoppingListsApi<R> {
    crud: ShoppingListsCrud<R>,
}

impl<R: ApiRequests> ShoppingListsApi<R> {
    pub fn new(requests: Arc<R>) -> Self {
        Self {
            crud: BaseCrudApi::new(requests, routes::SHOPPING_LISTS, routes::shopping_lists_id),
        }
    }

    /// Adds each recipe's ingredients to the list in a single request.
    pub async fn add_recipes(
        &self,
        list_id: &str,
        recipes: &[ShoppingListAddRecipeParamsBulk],
    ) -> Result<RequestResponse<ShoppingListOut>, ApiError> {
        tracing::debug!("Adding {} recipes to shopping list {}", recipes.len(), list_id);
        let body = to_body(recipes)?;
        let path = routes::shopping_list_id_add_recipe(list_id);
        Ok(self.crud.requests().post(&path, body).await?.into())
    }

    /// Removes one serving worth of the recipe's ingredients.
    pub async fn remove_recipe(
        &self,
        list_id: &str,
        recipe_id: &str,
    ) -> Result<RequestResponse<ShoppingListOut>, ApiError> {
        let params = ShoppingListRemoveRecipeParams::default();
        self.remove_recipe_with_quantity(list_id, recipe_id, params.recipe_decrement_quantity)
            .await
    }

    pub async fn remove_recipe_with_quantity(
        &self,
        list_id: &str,
        recipe_id: &str,
        decrement_quantity: f64,
    ) -> Result<RequestResponse<ShoppingListOut>, ApiError> {
        tracing::debug!(
            "Removing recipe {} (x{}) from shopping list {}",
            recipe_id,
            decrement_quantity,
            list_id
        );
        let body = to_body(&ShoppingListRemoveRecipeParams {
            recipe_decrement_quantity: decrement_quantity,
        })?;
        let path = routes::shopping_list_id_remove_recipe(list_id, recipe_id);
        Ok(self.crud.requests().post(&path, body).await?.into())
    }

    /// Replaces every label setting of the list.
    pub async fn update_label_settings(
        &self,
        list_id: &str,
        settings: &[ShoppingListMultiPurposeLabelUpdate],
    ) -> Result<RequestResponse<ShoppingListOut>, ApiError> {
        tracing::debug!(
            "Replacing {} label settings on shopping list {}",
            settings.len(),
            list_id
        );
        let body = to_body(settings)?;
        let path = routes::shopping_list_id_update_label_settings(list_id);
        Ok(self.crud.requests().put(&path, body).await?.into())
    }
}

impl<R> Deref for ShoppingListsApi<R> {
    type Target = ShoppingListsCrud<R>;

    fn deref(&self) -> &Self::Target {
        &self.crud
    }
}

/// Shopping list items, with bulk variants of create, update and delete.
///
/// Bulk calls are one request each. Chunking and partial-success handling are
/// left to the server.
pub struct ShoppingListItemsApi<R> {
    crud: ShoppingListItemsCrud<R>,
}

impl<R: ApiRequests> ShoppingListItemsApi<R> {
    pub fn new(requests: Arc<R>) -> Self {
        Self {
            crud: BaseCrudApi::new(
                requests,
                routes::SHOPPING_LIST_ITEMS,
                routes::shopping_list_items_id,
            ),
        }
    }

    pub async fn create_many(
        &self,
        items: &[ShoppingListItemCreate],
    ) -> Result<RequestResponse<ShoppingListItemsCollectionOut>, ApiError> {
        tracing::debug!("Creating {} shopping list items", items.len());
        let body = to_body(items)?;
        Ok(self
            .crud
            .requests()
            .post(routes::SHOPPING_LIST_ITEMS_CREATE_BULK, body)
            .await?
            .into())
    }

    pub async fn update_many(
        &self,
        items: &[ShoppingListItemUpdateBulk],
    ) -> Result<RequestResponse<ShoppingListItemsCollectionOut>, ApiError> {
        tracing::debug!("Updating {} shopping list items", items.len());
        let body = to_body(items)?;
        Ok(self
            .crud
            .requests()
            .put(routes::SHOPPING_LIST_ITEMS, body)
            .await?
            .into())
    }

    /// Deletes every item in one request, as `?ids=a&ids=b&`.
    pub async fn delete_many<T: Identified + Sync>(
        &self,
        items: &[T],
    ) -> Result<RequestResponse<SuccessResponse>, ApiError> {
        tracing::debug!("Deleting {} shopping list items", items.len());
        let path = format!("{}{}", routes::SHOPPING_LIST_ITEMS, delete_many_query(items));
        Ok(self.crud.requests().delete(&path).await?.into())
    }
}

impl<R> Deref for ShoppingListItemsApi<R> {
    type Target = ShoppingListItemsCrud<R>;

    fn deref(&self) -> &Self::Target {
        &self.crud
    }
}

/// `?` followed by `ids=<id>&` for each item in order. The trailing `&` stays.
fn delete_many_query<T: Identified>(items: &[T]) -> String {
    let mut query = String::from("?");
    for item in items {
        query.push_str("ids=");
        query.push_str(item.id());
        query.push('&');
    }
    query
}

/// Entry point for the shopping endpoints. Both sub-clients share one executor.
pub struct ShoppingApi<R> {
    pub lists: ShoppingListsApi<R>,
    pub items: ShoppingListItemsApi<R>,
}

impl<R: ApiRequests> ShoppingApi<R> {
    pub fn new(requests: Arc<R>) -> Self {
        Self {
            lists: ShoppingListsApi::new(Arc::clone(&requests)),
            items: ShoppingListItemsApi::new(requests),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn delete_query_keeps_order_and_trailing_ampersand() {
        assert_eq!(delete_many_query(&["b", "a", "b"]), "?ids=b&ids=a&ids=b&");
    }

    #[test]
    fn delete_query_for_no_items_is_bare_marker() {
        let none: [String; 0] = [];
        assert_eq!(delete_many_query(&none), "?");
    }
}
