use halaqa_schema::Table;
use halaqa_types::api::{EnumValuesResponse, ErrorResponse};
use reqwest::{Client, Response};
use serde::de::DeserializeOwned;
use thiserror::Error;
use uuid::Uuid;

const DEFAULT_API_URL: &str = "http://localhost:3000";

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("server answered {status}: {message}")]
    Status { status: u16, message: String },

    #[error("could not decode response: {0}")]
    Decode(#[from] serde_json::Error),
}

/// HTTP client for the halaqa store.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: Client,
    base_url: String,
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            http: Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_owned(),
        }
    }

    /// Reads `HALAQA_API_URL`, falling back to a local server.
    pub fn from_env() -> Self {
        Self::new(std::env::var("HALAQA_API_URL").unwrap_or_else(|_| DEFAULT_API_URL.into()))
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn rows_url(&self, table: &str) -> String {
        format!("{}/tables/{}/rows", self.base_url, table)
    }

    /// Newest rows of `T`'s table, decoded into row structs.
    pub async fn fetch_rows<T: Table>(&self, limit: u32) -> Result<Vec<T>, FetchError> {
        let response = self
            .http
            .get(self.rows_url(T::DEF.name))
            .query(&[("limit", limit)])
            .send()
            .await?;
        decode(response).await
    }

    /// Fetches rows and maps each into a page record.
    pub async fn fetch_page<R, T>(&self, limit: u32) -> Result<Vec<T>, FetchError>
    where
        R: Table,
        T: From<R>,
    {
        let rows = self.fetch_rows::<R>(limit).await?;
        Ok(rows.into_iter().map(T::from).collect())
    }

    pub async fn enum_values(&self, name: &str) -> Result<Vec<String>, FetchError> {
        let url = format!("{}/schema/enums/{}", self.base_url, name);
        let response = self.http.get(url).send().await?;
        let body: EnumValuesResponse = decode(response).await?;
        Ok(body.values)
    }

    /// Explicit save of a new record.
    pub async fn insert<T: Table>(&self, row: &T::Insert) -> Result<T, FetchError> {
        let response = self
            .http
            .post(self.rows_url(T::DEF.name))
            .json(row)
            .send()
            .await?;
        decode(response).await
    }

    /// Explicit save of a partial change.
    pub async fn update<T: Table>(&self, id: &Uuid, patch: &T::Update) -> Result<T, FetchError> {
        let url = format!("{}/{}", self.rows_url(T::DEF.name), id);
        let response = self.http.patch(url).json(patch).send().await?;
        decode(response).await
    }
}

async fn decode<R: DeserializeOwned>(response: Response) -> Result<R, FetchError> {
    let status = response.status();
    let body = response.bytes().await?;

    if !status.is_success() {
        let message = serde_json::from_slice::<ErrorResponse>(&body)
            .map(|e| e.error)
            .unwrap_or_else(|_| String::from_utf8_lossy(&body).into_owned());
        return Err(FetchError::Status {
            status: status.as_u16(),
            message,
        });
    }

    Ok(serde_json::from_slice(&body)?)
}
