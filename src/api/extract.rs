//! Request extractors that report failures as [`ApiError`].

use axum::{
    async_trait,
    extract::{FromRequestParts, Path},
    http::request::Parts,
};

use super::error::ApiError;
use crate::store::validation::{invalid_item_id, parse_item_id};

/// The `{item_id}` path segment, parsed as an integer.
///
/// Undecodable segments and non-integers are both rejected with a 422
/// `int_parsing` detail at `["path", "item_id"]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ItemId(pub i64);

#[async_trait]
impl<S> FromRequestParts<S> for ItemId
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(raw) = Path::<String>::from_request_parts(parts, state)
            .await
            .map_err(|_| invalid_item_id())?;

        Ok(Self(parse_item_id(&raw)?))
    }
}
