//! PostgREST backend of the store.
//!
//! Talks to a `/rest/v1/{table}` endpoint, as exposed by Supabase:
//!
//! - `GET ?select=*` lists a table;
//! - `POST` with `Prefer: resolution=merge-duplicates` upserts one row;
//! - `DELETE ?id=eq.{id}` removes one row.
//!
//! Every request carries the API key both as `apikey` and as a bearer token.

use engine::{RemoteError, RemoteStore, Row, Table};
use reqwest::{RequestBuilder, Response, Url};
use serde::Deserialize;
use thiserror::Error;
use tracing::debug;

#[derive(Error, Debug)]
pub enum PostgrestError {
    #[error("invalid base url: {0}")]
    InvalidBaseUrl(String),
    #[error("empty api key")]
    MissingApiKey,
}

/// Error body returned by PostgREST.
#[derive(Debug, Deserialize)]
struct ErrorResponse {
    message: String,
}

#[derive(Debug, Clone)]
pub struct PostgrestRemote {
    base_url: Url,
    api_key: String,
    http: reqwest::Client,
}

impl PostgrestRemote {
    pub fn new(base_url: &str, api_key: &str) -> Result<Self, PostgrestError> {
        let api_key = api_key.trim();
        if api_key.is_empty() {
            return Err(PostgrestError::MissingApiKey);
        }

        let mut base_url =
            Url::parse(base_url).map_err(|err| PostgrestError::InvalidBaseUrl(err.to_string()))?;
        if base_url.cannot_be_a_base() {
            return Err(PostgrestError::InvalidBaseUrl(base_url.to_string()));
        }
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }

        Ok(Self {
            base_url,
            api_key: api_key.to_string(),
            http: reqwest::Client::new(),
        })
    }

    fn endpoint(&self, table: Table) -> Result<Url, RemoteError> {
        self.base_url
            .join(&format!("rest/v1/{table}"))
            .map_err(|err| RemoteError::Transport(format!("invalid endpoint: {err}")))
    }

    fn authorized(&self, request: RequestBuilder) -> RequestBuilder {
        request
            .header("apikey", &self.api_key)
            .bearer_auth(&self.api_key)
    }
}

async fn send(request: RequestBuilder) -> Result<Response, RemoteError> {
    let res = request
        .send()
        .await
        .map_err(|err| RemoteError::Transport(err.to_string()))?;

    if res.status().is_success() {
        return Ok(res);
    }

    let status = res.status();
    let body = res
        .json::<ErrorResponse>()
        .await
        .map(|err| err.message)
        .unwrap_or_else(|_| "unknown error".to_string());

    let err = match status.as_u16() {
        401 | 403 => RemoteError::Rejected(format!("unauthorized ({status}): {body}")),
        500..=599 => RemoteError::Transport(format!("{status}: {body}")),
        _ => RemoteError::Rejected(format!("{status}: {body}")),
    };
    Err(err)
}

impl RemoteStore for PostgrestRemote {
    async fn fetch_all(&self, table: Table) -> Result<Vec<Row>, RemoteError> {
        let endpoint = self.endpoint(table)?;
        let request = self
            .authorized(self.http.get(endpoint))
            .query(&[("select", "*")]);

        let rows = send(request)
            .await?
            .json::<Vec<Row>>()
            .await
            .map_err(|err| RemoteError::Decode(err.to_string()))?;
        debug!(table = %table, rows = rows.len(), "fetched");
        Ok(rows)
    }

    async fn upsert(&self, table: Table, row: Row) -> Result<(), RemoteError> {
        let endpoint = self.endpoint(table)?;
        let request = self
            .authorized(self.http.post(endpoint))
            .header("Prefer", "resolution=merge-duplicates,return=minimal")
            .json(&row);

        send(request).await?;
        Ok(())
    }

    async fn delete(&self, table: Table, id: &str) -> Result<(), RemoteError> {
        let endpoint = self.endpoint(table)?;
        let filter = format!("eq.{id}");
        let request = self
            .authorized(self.http.delete(endpoint))
            .query(&[("id", filter.as_str())]);

        send(request).await?;
        Ok(())
    }
}
