//! Path table for the household shopping endpoints.
//!
//! Ids are interpolated verbatim. Nothing is escaped or validated; a malformed
//! id yields a malformed path and the server reports it.

const PREFIX: &str = "/api";

pub const SHOPPING_LISTS: &str = "/api/households/shopping/lists";
pub const SHOPPING_LIST_ITEMS: &str = "/api/households/shopping/items";
pub const SHOPPING_LIST_ITEMS_CREATE_BULK: &str = "/api/households/shopping/items/create-bulk";

pub fn shopping_lists_id(id: &str) -> String {
    format!("{PREFIX}/households/shopping/lists/{id}")
}

pub fn shopping_list_id_add_recipe(id: &str) -> String {
    format!("{PREFIX}/households/shopping/lists/{id}/recipe")
}

/// Recipe removal is an action endpoint (POST) because it carries a decrement quantity.
pub fn shopping_list_id_remove_recipe(id: &str, recipe_id: &str) -> String {
    format!("{PREFIX}/households/shopping/lists/{id}/recipe/{recipe_id}/delete")
}

pub fn shopping_list_id_update_label_settings(id: &str) -> String {
    format!("{PREFIX}/households/shopping/lists/{id}/label-settings")
}

pub fn shopping_list_items_id(id: &str) -> String {
    format!("{PREFIX}/households/shopping/items/{id}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn list_routes_embed_ids() {
        assert_eq!(shopping_lists_id("abc"), "/api/households/shopping/lists/abc");
        assert_eq!(
            shopping_list_id_add_recipe("abc"),
            "/api/households/shopping/lists/abc/recipe"
        );
        assert_eq!(
            shopping_list_id_remove_recipe("abc", "r1"),
            "/api/households/shopping/lists/abc/recipe/r1/delete"
        );
        assert_eq!(
            shopping_list_id_update_label_settings("abc"),
            "/api/households/shopping/lists/abc/label-settings"
        );
    }

    #[test]
    fn item_routes_share_the_collection_prefix() {
        assert!(SHOPPING_LIST_ITEMS_CREATE_BULK.starts_with(SHOPPING_LIST_ITEMS));
        assert_eq!(shopping_list_items_id("i9"), format!("{SHOPPING_LIST_ITEMS}/i9"));
        assert_eq!(shopping_lists_id("x"), format!("{SHOPPING_LISTS}/x"));
    }

    #[test]
    fn ids_are_not_escaped() {
        assert_eq!(
            shopping_lists_id("a b/c"),
            "/api/households/shopping/lists/a b/c"
        );
        assert_eq!(shopping_list_items_id(""), "/api/households/shopping/items/");
    }
}
