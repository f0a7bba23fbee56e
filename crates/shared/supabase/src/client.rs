//! REST client for the tabular-data service.
//!
//! The service exposes tables at `/rest/v1/{table}` with a row-filtering
//! query language (`column=eq.value`, `column=in.(v1,v2)`,
//! `order=col.asc`). Every call is a single outbound request with a fixed
//! timeout and no retry; non-2xx responses surface as
//! [`AppError::Upstream`].

use std::time::Duration;

use reqwest::{header, Method, RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::debug;

use common::{AppError, AppResult};

use crate::config::SupabaseConfig;

/// Outbound request timeout (seconds).
const REQUEST_TIMEOUT_SECS: u64 = 10;

/// Credential tier for a call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tier {
    /// Low-privilege key; plain reads
    Read,
    /// Service-role key; writes, deletes and privileged reads
    Service,
}

/// Client for the data service's REST interface.
#[derive(Clone)]
pub struct Supabase {
    http: reqwest::Client,
    config: SupabaseConfig,
}

impl Supabase {
    pub fn new(config: SupabaseConfig) -> AppResult<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()
            .map_err(|e| AppError::internal(format!("failed to build HTTP client: {e}")))?;
        Ok(Self { http, config })
    }

    pub fn config(&self) -> &SupabaseConfig {
        &self.config
    }

    /// Fetch rows matching the query.
    pub async fn select<T: DeserializeOwned>(
        &self,
        tier: Tier,
        table: &str,
        query: &[(&str, String)],
    ) -> AppResult<Vec<T>> {
        debug!(table, ?query, "select");
        let response = self
            .request(Method::GET, table, tier)
            .query(query)
            .send()
            .await
            .map_err(transport_error)?;
        rows(response).await
    }

    /// Insert a row and return its stored representation.
    pub async fn insert<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        table: &str,
        body: &B,
    ) -> AppResult<Vec<T>> {
        debug!(table, "insert");
        let response = self
            .request(Method::POST, table, Tier::Service)
            .header("Prefer", "return=representation")
            .json(body)
            .send()
            .await
            .map_err(transport_error)?;
        rows(response).await
    }

    /// Patch rows matching the query and return their new representations.
    pub async fn update<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        table: &str,
        query: &[(&str, String)],
        body: &B,
    ) -> AppResult<Vec<T>> {
        debug!(table, ?query, "update");
        let response = self
            .request(Method::PATCH, table, Tier::Service)
            .header("Prefer", "return=representation")
            .query(query)
            .json(body)
            .send()
            .await
            .map_err(transport_error)?;
        rows(response).await
    }

    /// Delete rows matching the query, returning the deleted rows so callers
    /// can distinguish "deleted" from "nothing matched".
    pub async fn delete<T: DeserializeOwned>(
        &self,
        table: &str,
        query: &[(&str, String)],
    ) -> AppResult<Vec<T>> {
        debug!(table, ?query, "delete");
        let response = self
            .request(Method::DELETE, table, Tier::Service)
            .header("Prefer", "return=representation")
            .query(query)
            .send()
            .await
            .map_err(transport_error)?;
        rows(response).await
    }

    fn request(&self, method: Method, table: &str, tier: Tier) -> RequestBuilder {
        let key = match tier {
            Tier::Read => &self.config.anon_key,
            Tier::Service => &self.config.service_role_key,
        };
        self.http
            .request(method, format!("{}/rest/v1/{}", self.config.url, table))
            .header("apikey", key)
            .header(header::AUTHORIZATION, format!("Bearer {key}"))
    }
}

async fn rows<T: DeserializeOwned>(response: Response) -> AppResult<Vec<T>> {
    let status = response.status();
    if !status.is_success() {
        let detail = response.text().await.unwrap_or_default();
        return Err(AppError::upstream(status.as_u16(), detail));
    }
    // DELETE without representation support still answers 204
    if status == StatusCode::NO_CONTENT {
        return Ok(Vec::new());
    }
    response
        .json::<Vec<T>>()
        .await
        .map_err(|e| AppError::internal(format!("malformed response from data service: {e}")))
}

fn transport_error(err: reqwest::Error) -> AppError {
    AppError::internal(format!("data service request failed: {err}"))
}

/// Builders for the row-filter query language.
pub mod filter {
    use std::fmt::Display;

    /// `eq.{value}`
    pub fn eq(value: impl Display) -> String {
        format!("eq.{value}")
    }

    /// `in.({v1},{v2},...)`
    pub fn one_of<I>(values: I) -> String
    where
        I: IntoIterator,
        I::Item: Display,
    {
        let list = values
            .into_iter()
            .map(|v| v.to_string())
            .collect::<Vec<_>>()
            .join(",");
        format!("in.({list})")
    }

    /// `{column}.asc`
    pub fn asc(column: &str) -> String {
        format!("{column}.asc")
    }

    /// `{column}.desc`
    pub fn desc(column: &str) -> String {
        format!("{column}.desc")
    }
}

#[cfg(test)]
mod tests {
    use super::filter;
    use uuid::Uuid;

    #[test]
    fn eq_filter_renders_operator_prefix() {
        assert_eq!(filter::eq(42), "eq.42");
        assert_eq!(filter::eq("aprobada"), "eq.aprobada");
    }

    #[test]
    fn in_filter_joins_values_with_commas() {
        assert_eq!(filter::one_of([1, 2, 3]), "in.(1,2,3)");
        assert_eq!(filter::one_of(Vec::<Uuid>::new()), "in.()");
    }

    #[test]
    fn order_expressions_carry_direction() {
        assert_eq!(filter::asc("nombre"), "nombre.asc");
        assert_eq!(filter::desc("fecha_inicio"), "fecha_inicio.desc");
    }
}
