use halaqa_schema::{RecordShape, Relationship};
use serde::{Deserialize, Serialize};

// -- Schema --

/// All three shapes of one table plus its foreign keys.
#[derive(Debug, Clone, Serialize)]
pub struct TableContractResponse {
    pub table: &'static str,
    pub row: RecordShape,
    pub insert: RecordShape,
    pub update: RecordShape,
    pub relationships: &'static [Relationship],
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EnumValuesResponse {
    pub name: String,
    pub values: Vec<String>,
}

// -- Rows --

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RowsQuery {
    pub limit: Option<u32>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}
