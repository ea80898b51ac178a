use std::sync::Arc;

use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::{Map, Value};
use tracing::{error, warn};

use halaqa_db::Database;
use halaqa_schema::SchemaError;
use halaqa_types::api::{EnumValuesResponse, ErrorResponse, RowsQuery, TableContractResponse};

pub type AppState = Arc<AppStateInner>;

pub struct AppStateInner {
    pub db: Database,
}

const DEFAULT_LIMIT: u32 = 50;
const MAX_LIMIT: u32 = 200;

/// Error body plus status for every failing route.
#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    message: String,
}

impl ApiError {
    fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
        }
    }

    fn internal() -> Self {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, "internal error")
    }
}

impl From<SchemaError> for ApiError {
    fn from(err: SchemaError) -> Self {
        let status = match &err {
            SchemaError::UnknownTable(_) | SchemaError::UnknownEnum(_) => StatusCode::NOT_FOUND,
            _ => StatusCode::BAD_REQUEST,
        };
        Self::new(status, err.to_string())
    }
}

impl From<anyhow::Error> for ApiError {
    fn from(err: anyhow::Error) -> Self {
        let err = match err.downcast::<SchemaError>() {
            Ok(schema_err) => return schema_err.into(),
            Err(err) => err,
        };

        if let Some(rusqlite::Error::SqliteFailure(code, msg)) = err.downcast_ref::<rusqlite::Error>() {
            if code.code == rusqlite::ErrorCode::ConstraintViolation {
                warn!("Constraint violation: {:?}", msg);
                return Self::new(
                    StatusCode::CONFLICT,
                    msg.clone().unwrap_or_else(|| "constraint violation".into()),
                );
            }
        }

        error!("Store error: {:#}", err);
        Self::internal()
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(ErrorResponse { error: self.message })).into_response()
    }
}

/// Runs a store call off the async runtime.
async fn with_db<F, T>(state: &AppState, f: F) -> Result<T, ApiError>
where
    F: FnOnce(&Database) -> anyhow::Result<T> + Send + 'static,
    T: Send + 'static,
{
    let state = state.clone();
    tokio::task::spawn_blocking(move || f(&state.db))
        .await
        .map_err(|e| {
            error!("spawn_blocking join error: {}", e);
            ApiError::internal()
        })?
        .map_err(ApiError::from)
}

pub async fn table_contract(
    State(state): State<AppState>,
    Path(table): Path<String>,
) -> Result<Json<TableContractResponse>, ApiError> {
    let def = state.db.schema().table(&table)?;
    Ok(Json(TableContractResponse {
        table: def.name,
        row: def.row_shape(),
        insert: def.insert_shape(),
        update: def.update_shape(),
        relationships: def.relationships,
    }))
}

pub async fn enum_values(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> Result<Json<EnumValuesResponse>, ApiError> {
    let values = state.db.schema().enum_values(&name)?;
    Ok(Json(EnumValuesResponse {
        name,
        values: values.iter().map(|v| v.to_string()).collect(),
    }))
}

pub async fn list_rows(
    State(state): State<AppState>,
    Path(table): Path<String>,
    Query(query): Query<RowsQuery>,
) -> Result<Json<Vec<Value>>, ApiError> {
    let limit = query.limit.unwrap_or(DEFAULT_LIMIT).min(MAX_LIMIT);
    let rows = with_db(&state, move |db| db.list_json(&table, limit)).await?;
    Ok(Json(rows))
}

pub async fn insert_row(
    State(state): State<AppState>,
    Path(table): Path<String>,
    Json(payload): Json<Map<String, Value>>,
) -> Result<impl IntoResponse, ApiError> {
    let row = with_db(&state, move |db| db.insert_json(&table, payload)).await?;
    Ok((StatusCode::CREATED, Json(row)))
}

pub async fn update_row(
    State(state): State<AppState>,
    Path((table, id)): Path<(String, String)>,
    Json(patch): Json<Map<String, Value>>,
) -> Result<Json<Value>, ApiError> {
    let missing = format!("no row {} in {}", id, table);
    let row = with_db(&state, move |db| db.update_json(&table, &id, patch)).await?;
    row.map(Json)
        .ok_or_else(|| ApiError::new(StatusCode::NOT_FOUND, missing))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_schema_errors_map_to_status() {
        let unknown: ApiError = SchemaError::UnknownEnum("colour".into()).into();
        assert_eq!(unknown.status, StatusCode::NOT_FOUND);

        let invalid: ApiError = SchemaError::InvalidEnumValue {
            enum_name: "listing_status",
            value: "lost".into(),
        }
        .into();
        assert_eq!(invalid.status, StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_wrapped_schema_error_keeps_status() {
        let err = anyhow::Error::from(SchemaError::UnknownTable("sessions".into()));
        let api: ApiError = err.into();
        assert_eq!(api.status, StatusCode::NOT_FOUND);
        assert_eq!(api.message, "unknown table `sessions`");
    }

    #[test]
    fn test_constraint_violation_is_conflict() {
        let db = Database::open_in_memory().unwrap();
        let orphan = serde_json::json!({
            "user_id": "6f1c2c4e-8f0a-4d55-9d7b-0b6f9a1e2c3d",
            "role": "member",
        });
        let err = db
            .insert_json("user_roles", orphan.as_object().unwrap().clone())
            .unwrap_err();
        let api: ApiError = err.into();
        assert_eq!(api.status, StatusCode::CONFLICT);
    }
}
