use axum::{
    body::Bytes,
    extract::{rejection::PathRejection, Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde_json::{json, Map, Value};
use tracing::{debug, info};

use crate::clients::UserClient;
use crate::domain::{Page, Pagination, User, UserCreate, UserPatch, DEFAULT_LIMIT, DEFAULT_PAGE};
use crate::error::{ApiError, ApiResult, BAD_REQUEST, RESOURCE_NOT_FOUND};
use crate::http::ApiResponse;

pub const FRAMEWORK: &str = "axum";
pub const NAME_AND_EMAIL_REQUIRED: &str = "Name and email are required";
pub const NO_DATA_PROVIDED: &str = "No data provided";

pub type JsonObject = Map<String, Value>;

#[derive(Debug, Default)]
pub struct ListParams {
    pub page: Option<String>,
    pub limit: Option<String>,
}

impl ListParams {
    /// The first occurrence of a repeated key wins.
    pub fn from_pairs(pairs: &[(String, String)]) -> Self {
        let first = |key: &str| {
            pairs
                .iter()
                .find(|(k, _)| k == key)
                .map(|(_, v)| v.clone())
        };
        Self {
            page: first("page"),
            limit: first("limit"),
        }
    }

    /// Values that do not parse as integers fall back to the defaults.
    pub fn pagination(&self) -> Pagination {
        Pagination::new(
            parse_or(self.page.as_deref(), DEFAULT_PAGE),
            parse_or(self.limit.as_deref(), DEFAULT_LIMIT),
        )
    }
}

fn parse_or(value: Option<&str>, default: i64) -> i64 {
    value
        .and_then(|v| v.trim().parse().ok())
        .unwrap_or(default)
}

/// Reads a request body as a JSON object.
///
/// An empty body or a JSON value that is not an object yields `None`; bytes
/// that are not JSON at all are a bad request.
pub fn json_object(body: &[u8]) -> ApiResult<Option<JsonObject>> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(None);
    }
    match serde_json::from_slice::<Value>(body) {
        Ok(Value::Object(map)) => Ok(Some(map)),
        Ok(_) => Ok(None),
        Err(_) => Err(ApiError::BadRequest(BAD_REQUEST.to_string())),
    }
}

/// `None` when the key is absent, `Some(None)` when it is `null`.
fn string_field(map: &JsonObject, key: &str) -> ApiResult<Option<Option<String>>> {
    match map.get(key) {
        None => Ok(None),
        Some(Value::Null) => Ok(Some(None)),
        Some(Value::String(s)) => Ok(Some(Some(s.clone()))),
        Some(_) => Err(ApiError::BadRequest(BAD_REQUEST.to_string())),
    }
}

impl TryFrom<JsonObject> for UserCreate {
    type Error = ApiError;

    fn try_from(map: JsonObject) -> Result<Self, Self::Error> {
        if !map.contains_key("name") || !map.contains_key("email") {
            return Err(ApiError::BadRequest(NAME_AND_EMAIL_REQUIRED.to_string()));
        }
        Ok(UserCreate {
            name: string_field(&map, "name")?.flatten(),
            email: string_field(&map, "email")?.flatten(),
        })
    }
}

/// Keys other than `name` and `email` are accepted and ignored.
impl TryFrom<JsonObject> for UserPatch {
    type Error = ApiError;

    fn try_from(map: JsonObject) -> Result<Self, Self::Error> {
        Ok(UserPatch {
            name: string_field(&map, "name")?,
            email: string_field(&map, "email")?,
        })
    }
}

/// `{id}` segments that are not non-negative integers match no route.
fn user_id(path: Result<Path<u64>, PathRejection>) -> ApiResult<u64> {
    path.map(|Path(id)| id)
        .map_err(|_| ApiError::NotFound(RESOURCE_NOT_FOUND.to_string()))
}

pub async fn hello() -> impl IntoResponse {
    Json(json!({
        "success": true,
        "message": "Hello from the user store service!",
        "framework": FRAMEWORK,
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

pub async fn health_check() -> impl IntoResponse {
    Json(json!({
        "success": true,
        "status": "healthy",
        "framework": FRAMEWORK,
        "rust_version": env!("RUSTC_VERSION"),
    }))
}

pub async fn list_users(
    State(client): State<UserClient>,
    params: Option<Query<Vec<(String, String)>>>,
) -> ApiResult<Json<ApiResponse<Page<User>>>> {
    let pagination = params
        .map(|Query(pairs)| ListParams::from_pairs(&pairs).pagination())
        .unwrap_or_default();
    let page = client.list_users(pagination).await?;
    debug!(returned = page.items.len(), total = page.total, "Listed users");
    Ok(Json(ApiResponse::ok(page)))
}

pub async fn get_user(
    State(client): State<UserClient>,
    id: Result<Path<u64>, PathRejection>,
) -> ApiResult<Json<ApiResponse<User>>> {
    let user = client.get_user(user_id(id)?).await?;
    Ok(Json(ApiResponse::ok(user)))
}

/// A missing body, or one that is not a JSON object, has no keys at all.
pub async fn create_user(
    State(client): State<UserClient>,
    body: Bytes,
) -> ApiResult<(StatusCode, Json<ApiResponse<User>>)> {
    let map = json_object(&body)?.unwrap_or_default();
    let user = client.create_user(UserCreate::try_from(map)?).await?;
    info!(user_id = user.id, "User created");
    Ok((StatusCode::CREATED, Json(ApiResponse::ok(user))))
}

pub async fn update_user(
    State(client): State<UserClient>,
    id: Result<Path<u64>, PathRejection>,
    body: Bytes,
) -> ApiResult<Json<ApiResponse<User>>> {
    let id = user_id(id)?;
    let patch = match json_object(&body) {
        Ok(Some(map)) if !map.is_empty() => UserPatch::try_from(map),
        Ok(_) => Err(ApiError::BadRequest(NO_DATA_PROVIDED.to_string())),
        Err(e) => Err(e),
    };
    let patch = match patch {
        Ok(patch) => patch,
        Err(e) => {
            // an unknown id is reported before anything about the body
            client.get_user(id).await?;
            return Err(e);
        }
    };
    let user = client.update_user(id, patch).await?;
    info!(user_id = user.id, "User updated");
    Ok(Json(ApiResponse::ok(user)))
}

pub async fn delete_user(
    State(client): State<UserClient>,
    id: Result<Path<u64>, PathRejection>,
) -> ApiResult<Json<ApiResponse<()>>> {
    let user = client.delete_user(user_id(id)?).await?;
    info!(user_id = user.id, "User deleted");
    Ok(Json(ApiResponse::message(format!(
        "User {} deleted successfully",
        user.display_name()
    ))))
}

pub async fn not_found() -> ApiError {
    ApiError::NotFound(RESOURCE_NOT_FOUND.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn object(value: Value) -> JsonObject {
        match value {
            Value::Object(map) => map,
            other => panic!("not an object: {}", other),
        }
    }

    #[test]
    fn list_params_fall_back_on_garbage() {
        let params = ListParams {
            page: Some("abc".to_string()),
            limit: Some(" 3 ".to_string()),
        };
        assert_eq!(params.pagination(), Pagination::new(1, 3));
        assert_eq!(ListParams::default().pagination(), Pagination::default());
    }

    #[test]
    fn repeated_query_keys_take_the_first_value() {
        let pairs = vec![
            ("page".to_string(), "1".to_string()),
            ("page".to_string(), "2".to_string()),
            ("limit".to_string(), "1".to_string()),
        ];
        assert_eq!(ListParams::from_pairs(&pairs).pagination(), Pagination::new(1, 1));
    }

    #[test]
    fn json_object_distinguishes_empty_from_malformed() {
        assert_eq!(json_object(b""), Ok(None));
        assert_eq!(json_object(b"  \n"), Ok(None));
        assert_eq!(json_object(b"[1, 2]"), Ok(None));
        assert_eq!(json_object(b"{}"), Ok(Some(JsonObject::new())));
        assert_eq!(
            json_object(b"{not json"),
            Err(ApiError::BadRequest(BAD_REQUEST.to_string()))
        );
    }

    #[test]
    fn create_requires_both_keys_but_accepts_null_values() {
        assert_eq!(
            UserCreate::try_from(object(json!({ "name": "A" }))),
            Err(ApiError::BadRequest(NAME_AND_EMAIL_REQUIRED.to_string()))
        );
        assert_eq!(
            UserCreate::try_from(object(json!({ "name": "", "email": "" }))),
            Ok(UserCreate::new("", ""))
        );
        assert_eq!(
            UserCreate::try_from(object(json!({ "name": null, "email": "n@x" }))),
            Ok(UserCreate {
                name: None,
                email: Some("n@x".to_string()),
            })
        );
        assert_eq!(
            UserCreate::try_from(object(json!({ "name": 5, "email": "n@x" }))),
            Err(ApiError::BadRequest(BAD_REQUEST.to_string()))
        );
    }

    #[test]
    fn patch_keeps_present_absent_and_null_apart() {
        assert_eq!(
            UserPatch::try_from(object(json!({ "age": 5 }))),
            Ok(UserPatch::default())
        );
        assert_eq!(
            UserPatch::try_from(object(json!({ "name": null }))),
            Ok(UserPatch {
                name: Some(None),
                email: None,
            })
        );
        assert_eq!(
            UserPatch::try_from(object(json!({ "email": "e@x" }))),
            Ok(UserPatch::email("e@x"))
        );
    }
}
