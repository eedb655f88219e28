//! Generic CRUD client shared by every entity API.
//!
//! An entity client embeds a [`BaseCrudApi`] bound to its collection route and
//! item-route function, and dereferences to it so the CRUD calls read the same
//! on every entity.

use std::marker::PhantomData;
use std::sync::Arc;

use serde::Serialize;
use serde_json::Value;

use crate::client::error::ApiError;
use crate::client::requests::{ApiRequests, RequestResponse};
use crate::client::types::PaginationData;

/// `per_page` value asking the server for every record at once.
pub const ALL_PAGES: i64 = -1;

/// CRUD operations over one entity.
///
/// `C` is the create payload, `O` the shape the server returns and `U` the
/// full update payload.
pub struct BaseCrudApi<R, C, O, U = C> {
    requests: Arc<R>,
    base_route: &'static str,
    item_route: fn(&str) -> String,
    _shapes: PhantomData<fn(C, U) -> O>,
}

impl<R, C, O, U> Clone for BaseCrudApi<R, C, O, U> {
    fn clone(&self) -> Self {
        Self {
            requests: Arc::clone(&self.requests),
            base_route: self.base_route,
            item_route: self.item_route,
            _shapes: PhantomData,
        }
    }
}

impl<R, C, O, U> BaseCrudApi<R, C, O, U>
where
    R: ApiRequests,
    C: Serialize + Sync,
    U: Serialize + Sync,
{
    pub fn new(requests: Arc<R>, base_route: &'static str, item_route: fn(&str) -> String) -> Self {
        Self {
            requests,
            base_route,
            item_route,
            _shapes: PhantomData,
        }
    }

    pub fn requests(&self) -> &Arc<R> {
        &self.requests
    }

    pub fn base_route(&self) -> &'static str {
        self.base_route
    }

    pub fn item_route(&self, id: &str) -> String {
        (self.item_route)(id)
    }

    /// Fetch one page. Extra `params` are appended after `page`/`perPage`;
    /// entries without a value are left out of the query.
    pub async fn list(
        &self,
        page: i64,
        per_page: i64,
        params: &[(&str, Option<&str>)],
    ) -> Result<RequestResponse<PaginationData<O>>, ApiError> {
        let mut query = vec![format!("page={}", page), format!("perPage={}", per_page)];
        for (key, value) in params {
            if let Some(value) = value {
                query.push(format!(
                    "{}={}",
                    urlencoding::encode(key),
                    urlencoding::encode(value)
                ));
            }
        }

        let path = format!("{}?{}", self.base_route, query.join("&"));
        Ok(self.requests.get(&path).await?.into())
    }

    pub async fn create(&self, payload: &C) -> Result<RequestResponse<O>, ApiError> {
        let body = to_body(payload)?;
        Ok(self.requests.post(self.base_route, body).await?.into())
    }

    pub async fn read(&self, id: &str) -> Result<RequestResponse<O>, ApiError> {
        Ok(self.requests.get(&self.item_route(id)).await?.into())
    }

    pub async fn update(&self, id: &str, payload: &U) -> Result<RequestResponse<O>, ApiError> {
        let body = to_body(payload)?;
        Ok(self.requests.put(&self.item_route(id), body).await?.into())
    }

    /// Partial update; `fields` is sent as given.
    pub async fn patch<P>(&self, id: &str, fields: &P) -> Result<RequestResponse<O>, ApiError>
    where
        P: Serialize + Sync + ?Sized,
    {
        let body = to_body(fields)?;
        Ok(self.requests.patch(&self.item_route(id), body).await?.into())
    }

    pub async fn delete(&self, id: &str) -> Result<RequestResponse<O>, ApiError> {
        Ok(self.requests.delete(&self.item_route(id)).await?.into())
    }
}

pub(crate) fn to_body<T: Serialize + ?Sized>(payload: &T) -> Result<Value, ApiError> {
    serde_json::to_value(payload).map_err(ApiError::Serialize)
}
