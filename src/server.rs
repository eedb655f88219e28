use std::collections::HashSet;
use std::fmt::Display;
use std::future::Future;
use std::sync::Arc;
use rmcp::{
    ErrorData as McpError, RoleServer, ServerHandler,
    handler::server::{router::tool::ToolRouter, tool::Parameters},
    model::*,
    schemars,
    service::RequestContext,
    tool, tool_handler, tool_router,
};
use serde_json::{json, Value};

use crate::client::{
    ApiError, ReqwestRequests, ShoppingApi, ShoppingListAddRecipeParamsBulk,
    ShoppingListCreate, ShoppingListItemCreate, ShoppingListItemOut,
    ShoppingListItemUpdateBulk, ShoppingListOut, ALL_PAGES,
};
use crate::config::MealieConfig;

// Parameter structs for tools
#[derive(Debug, serde::Deserialize, schemars::JsonSchema)]
pub struct ListShoppingListsParams {
    #[serde(default)]
    pub page: Option<i64>,
    #[serde(default)]
    pub per_page: Option<i64>,
}

#[derive(Debug, serde::Deserialize, schemars::JsonSchema)]
pub struct ShoppingListIdParams {
    pub list_id: String,
}

#[derive(Debug, serde::Deserialize, schemars::JsonSchema)]
pub struct CreateShoppingListParams {
    pub name: String,
}

#[derive(Debug, serde::Deserialize, schemars::JsonSchema)]
pub struct RecipeToAdd {
    pub recipe_id: String,
    #[serde(default = "default_quantity")]
    pub quantity: f64,
}

fn default_quantity() -> f64 {
    1.0
}

#[derive(Debug, serde::Deserialize, schemars::JsonSchema)]
pub struct AddRecipesParams {
    pub list_id: String,
    pub recipes: Vec<RecipeToAdd>,
}

#[derive(Debug, serde::Deserialize, schemars::JsonSchema)]
pub struct RemoveRecipeParams {
    pub list_id: String,
    pub recipe_id: String,
    #[serde(default)]
    pub decrement_quantity: Option<f64>,
}

#[derive(Debug, serde::Deserialize, schemars::JsonSchema)]
pub struct NewShoppingItem {
    pub note: String,
    #[serde(default = "default_quantity")]
    pub quantity: f64,
}

#[derive(Debug, serde::Deserialize, schemars::JsonSchema)]
pub struct AddShoppingItemsParams {
    pub list_id: String,
    pub items: Vec<NewShoppingItem>,
}

#[derive(Debug, serde::Deserialize, schemars::JsonSchema)]
pub struct CheckShoppingItemsParams {
    pub list_id: String,
    pub item_ids: Vec<String>,
    #[serde(default = "default_checked")]
    pub checked: bool,
}

fn default_checked() -> bool {
    true
}

#[derive(Debug, serde::Deserialize, schemars::JsonSchema)]
pub struct DeleteShoppingItemsParams {
    pub item_ids: Vec<String>,
}

#[derive(Clone)]
pub struct MealieMcpServer {
    api: Arc<ShoppingApi<ReqwestRequests>>,
    tool_router: ToolRouter<MealieMcpServer>,
}

#[tool_router]
impl MealieMcpServer {
    pub fn new(config: &MealieConfig) -> Self {
        Self::with_requests(ReqwestRequests::from_config(config))
    }

    pub fn with_requests(requests: ReqwestRequests) -> Self {
        Self {
            api: Arc::new(ShoppingApi::new(Arc::new(requests))),
            tool_router: Self::tool_router(),
        }
    }

    pub fn api(&self) -> &ShoppingApi<ReqwestRequests> {
        &self.api
    }

    /// Fetch a single shopping list to prove the URL and token are usable.
    pub async fn test_api_access(&self) -> Result<(), anyhow::Error> {
        tracing::debug!("Testing API access by fetching shopping lists...");
        let lists = self.api.lists.list(1, 1, &[]).await?.data()?;
        tracing::info!("API access test successful - found {} shopping lists", lists.total);
        Ok(())
    }

    // Shopping list tools
    #[tool(description = "List the household's shopping lists with item counts")]
    async fn list_shopping_lists(
        &self,
        Parameters(params): Parameters<ListShoppingListsParams>,
    ) -> Result<CallToolResult, McpError> {
        let page = params.page.unwrap_or(1);
        let per_page = params.per_page.unwrap_or(ALL_PAGES);

        let result = async {
            let lists = self.api.lists.list(page, per_page, &[]).await?.data()?;
            Ok::<_, ApiError>(json!({
                "shopping_lists": lists.items.iter().map(summarize_list).collect::<Vec<_>>(),
                "page": lists.page,
                "total_pages": lists.total_pages,
                "total_count": lists.total
            }))
        }
        .await;

        match result {
            Ok(value) => success(value),
            Err(e) => failure("list shopping lists", e),
        }
    }

    #[tool(description = "Get a shopping list with its items and the recipes it was built from")]
    async fn get_shopping_list(
        &self,
        Parameters(params): Parameters<ShoppingListIdParams>,
    ) -> Result<CallToolResult, McpError> {
        let result = async {
            let list = self.api.lists.read(&params.list_id).await?.data()?;
            let mut summary = summarize_list(&list);
            summary["items"] = list.list_items.iter().map(summarize_item).collect();
            summary["recipes"] = list
                .recipe_references
                .iter()
                .map(|reference| {
                    json!({
                        "recipe_id": reference.recipe_id,
                        "name": reference.recipe.as_ref().and_then(|r| r.get("name")).cloned(),
                        "quantity": reference.recipe_quantity
                    })
                })
                .collect();
            Ok::<_, ApiError>(summary)
        }
        .await;

        match result {
            Ok(value) => success(value),
            Err(e) => failure("get shopping list", e),
        }
    }

    #[tool(description = "Create a new, empty shopping list")]
    async fn create_shopping_list(
        &self,
        Parameters(params): Parameters<CreateShoppingListParams>,
    ) -> Result<CallToolResult, McpError> {
        let payload = ShoppingListCreate {
            name: Some(params.name),
            extras: None,
        };

        let result = async {
            let list = self.api.lists.create(&payload).await?.data()?;
            Ok::<_, ApiError>(json!({
                "created": summarize_list(&list),
                "success": true
            }))
        }
        .await;

        match result {
            Ok(value) => success(value),
            Err(e) => failure("create shopping list", e),
        }
    }

    #[tool(description = "Delete a shopping list and all of its items")]
    async fn delete_shopping_list(
        &self,
        Parameters(params): Parameters<ShoppingListIdParams>,
    ) -> Result<CallToolResult, McpError> {
        match self.api.lists.delete(&params.list_id).await {
            Ok(_) => success(json!({
                "deleted": { "id": params.list_id },
                "success": true
            })),
            Err(e) => failure("delete shopping list", e),
        }
    }

    // Recipe association tools
    #[tool(description = "Add the ingredients of one or more recipes to a shopping list")]
    async fn add_recipes_to_shopping_list(
        &self,
        Parameters(params): Parameters<AddRecipesParams>,
    ) -> Result<CallToolResult, McpError> {
        let recipes: Vec<ShoppingListAddRecipeParamsBulk> = params
            .recipes
            .into_iter()
            .map(|recipe| ShoppingListAddRecipeParamsBulk {
                recipe_increment_quantity: recipe.quantity,
                ..ShoppingListAddRecipeParamsBulk::new(recipe.recipe_id)
            })
            .collect();

        let result = async {
            let list = self.api.lists.add_recipes(&params.list_id, &recipes).await?.data()?;
            Ok::<_, ApiError>(json!({
                "shopping_list": summarize_list(&list),
                "recipes_added": recipes.len(),
                "success": true
            }))
        }
        .await;

        match result {
            Ok(value) => success(value),
            Err(e) => failure("add recipes to shopping list", e),
        }
    }

    #[tool(description = "Remove a recipe's ingredients from a shopping list")]
    async fn remove_recipe_from_shopping_list(
        &self,
        Parameters(params): Parameters<RemoveRecipeParams>,
    ) -> Result<CallToolResult, McpError> {
        let result = async {
            let response = match params.decrement_quantity {
                Some(quantity) => {
                    self.api
                        .lists
                        .remove_recipe_with_quantity(&params.list_id, &params.recipe_id, quantity)
                        .await?
                }
                None => {
                    self.api
                        .lists
                        .remove_recipe(&params.list_id, &params.recipe_id)
                        .await?
                }
            };
            let list = response.data()?;
            Ok::<_, ApiError>(json!({
                "shopping_list": summarize_list(&list),
                "removed_recipe": params.recipe_id,
                "success": true
            }))
        }
        .await;

        match result {
            Ok(value) => success(value),
            Err(e) => failure("remove recipe from shopping list", e),
        }
    }

    // Item tools
    #[tool(description = "Add free-text items to a shopping list")]
    async fn add_shopping_items(
        &self,
        Parameters(params): Parameters<AddShoppingItemsParams>,
    ) -> Result<CallToolResult, McpError> {
        let items: Vec<ShoppingListItemCreate> = params
            .items
            .into_iter()
            .map(|item| ShoppingListItemCreate {
                quantity: item.quantity,
                ..ShoppingListItemCreate::note(params.list_id.clone(), item.note)
            })
            .collect();

        let result = async {
            let collection = self.api.items.create_many(&items).await?.data()?;
            Ok::<_, ApiError>(json!({
                "created": collection.created_items.iter().map(summarize_item).collect::<Vec<_>>(),
                "updated": collection.updated_items.iter().map(summarize_item).collect::<Vec<_>>(),
                "success": true
            }))
        }
        .await;

        match result {
            Ok(value) => success(value),
            Err(e) => failure("add shopping items", e),
        }
    }

    #[tool(description = "Mark shopping list items as checked (purchased) or unchecked")]
    async fn check_shopping_items(
        &self,
        Parameters(params): Parameters<CheckShoppingItemsParams>,
    ) -> Result<CallToolResult, McpError> {
        let list = match self.api.lists.read(&params.list_id).await.and_then(|r| r.data()) {
            Ok(list) => list,
            Err(e) => return failure("read shopping list", e),
        };

        let updates = mark_checked(list.list_items, &params.item_ids, params.checked);
        if updates.is_empty() {
            return failure(
                "check shopping items",
                format!("none of {:?} are on list {}", params.item_ids, params.list_id),
            );
        }

        let result = async {
            let collection = self.api.items.update_many(&updates).await?.data()?;
            Ok::<_, ApiError>(json!({
                "updated": collection.updated_items.iter().map(summarize_item).collect::<Vec<_>>(),
                "requested": params.item_ids.len(),
                "matched": updates.len(),
                "success": true
            }))
        }
        .await;

        match result {
            Ok(value) => success(value),
            Err(e) => failure("check shopping items", e),
        }
    }

    #[tool(description = "Delete shopping list items by id")]
    async fn delete_shopping_items(
        &self,
        Parameters(params): Parameters<DeleteShoppingItemsParams>,
    ) -> Result<CallToolResult, McpError> {
        match self.api.items.delete_many(params.item_ids.as_slice()).await {
            Ok(response) => success(json!({
                "deleted": params.item_ids,
                "message": response.data().ok().map(|r| r.message),
                "success": true
            })),
            Err(e) => failure("delete shopping items", e),
        }
    }
}

fn success(value: Value) -> Result<CallToolResult, McpError> {
    let text = serde_json::to_string_pretty(&value)
        .map_err(|e| McpError::internal_error(e.to_string(), None))?;
    Ok(CallToolResult::success(vec![Content::text(text)]))
}

fn failure(action: &str, error: impl Display) -> Result<CallToolResult, McpError> {
    tracing::error!("Failed to {}: {}", action, error);
    let error = json!({
        "error": format!("Failed to {}", action),
        "details": error.to_string(),
        "success": false
    });
    Ok(CallToolResult::error(vec![Content::text(error.to_string())]))
}

fn summarize_list(list: &ShoppingListOut) -> Value {
    let unchecked = list.list_items.iter().filter(|item| !item.checked).count();
    json!({
        "id": list.id,
        "name": list.name,
        "item_count": list.list_items.len(),
        "unchecked_count": unchecked,
        "recipe_count": list.recipe_references.len()
    })
}

fn summarize_item(item: &ShoppingListItemOut) -> Value {
    json!({
        "id": item.id,
        "display": item.display.as_ref().or(item.note.as_ref()),
        "quantity": item.quantity,
        "checked": item.checked
    })
}

/// Bulk updates for the items whose id was requested, with `checked` set.
fn mark_checked(
    items: Vec<ShoppingListItemOut>,
    ids: &[String],
    checked: bool,
) -> Vec<ShoppingListItemUpdateBulk> {
    let wanted: HashSet<&str> = ids.iter().map(String::as_str).collect();
    items
        .into_iter()
        .filter(|item| wanted.contains(item.id.as_str()))
        .map(|item| ShoppingListItemUpdateBulk {
            checked,
            ..ShoppingListItemUpdateBulk::from(item)
        })
        .collect()
}

#[tool_handler]
impl ServerHandler for MealieMcpServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            protocol_version: ProtocolVersion::V_2024_11_05,
            capabilities: ServerCapabilities::builder()
                .enable_tools()
                .build(),
            server_info: Implementation::from_build_env(),
            instructions: Some("This server manages Mealie household shopping lists. Available tools list, create and delete shopping lists, add or remove the ingredients of recipes, add free-text items, check items off, and delete items in bulk.".to_string()),
        }
    }

    async fn initialize(
        &self,
        _request: InitializeRequestParam,
        _context: RequestContext<RoleServer>,
    ) -> Result<InitializeResult, McpError> {
        Ok(self.get_info())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(id: &str, checked: bool) -> ShoppingListItemOut {
        serde_json::from_value(json!({
            "id": id,
            "shoppingListId": "list-1",
            "checked": checked,
            "note": format!("note {id}")
        }))
        .unwrap()
    }

    #[test]
    fn mark_checked_only_touches_requested_items() {
        let items = vec![item("a", false), item("b", false), item("c", true)];
        let updates = mark_checked(items, &["c".to_string(), "a".to_string()], true);

        let ids: Vec<&str> = updates.iter().map(|u| u.id.as_str()).collect();
        assert_eq!(ids, vec!["a", "c"]);
        assert!(updates.iter().all(|u| u.checked));
    }

    #[test]
    fn mark_checked_can_uncheck() {
        let updates = mark_checked(vec![item("a", true)], &["a".to_string()], false);
        assert_eq!(updates.len(), 1);
        assert!(!updates[0].checked);
    }

    #[test]
    fn unknown_ids_produce_no_updates() {
        assert!(mark_checked(vec![item("a", false)], &["zzz".to_string()], true).is_empty());
    }

    #[test]
    fn list_summary_counts_unchecked_items() {
        let list: ShoppingListOut = serde_json::from_value(json!({
            "id": "list-1",
            "name": "Weekly",
            "listItems": [
                { "id": "a", "shoppingListId": "list-1", "checked": false },
                { "id": "b", "shoppingListId": "list-1", "checked": true }
            ]
        }))
        .unwrap();

        let summary = summarize_list(&list);
        assert_eq!(summary["item_count"], 2);
        assert_eq!(summary["unchecked_count"], 1);
        assert_eq!(summary["name"], "Weekly");
    }
}
