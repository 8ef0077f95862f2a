// SPDX-License-Identifier: MIT

//! HTTP client for the EVShare backend.
//!
//! Every request carries `Authorization: Bearer <token>` when a Principal
//! is published. The backend is the sole source of truth for roles; this
//! client only forwards what the session store holds.

use std::sync::Arc;
use std::time::Duration;

use reqwest::{RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

use crate::config::ClientConfig;
use crate::error::{AppError, Result};
use crate::models::envelope::decode_payload;
use crate::session::SessionStore;

/// EVShare backend API client.
#[derive(Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
    session: Arc<SessionStore>,
}

impl ApiClient {
    /// Create a client bound to the given session store.
    pub fn new(config: &ClientConfig, session: Arc<SessionStore>) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()
            .map_err(|e| AppError::Internal(anyhow::anyhow!("HTTP client init failed: {e}")))?;

        Ok(Self {
            http,
            base_url: config.api_base_url.trim_end_matches('/').to_string(),
            session,
        })
    }

    /// The session store this client reads tokens from.
    pub fn session(&self) -> &Arc<SessionStore> {
        &self.session
    }

    /// GET a payload, unwrapping the response envelope.
    pub async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        let response = self.send(self.http.get(self.url(path))).await?;
        self.read_payload(response).await
    }

    /// POST a body and decode the payload.
    pub async fn post_json<T: DeserializeOwned, B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T> {
        let response = self.send(self.http.post(self.url(path)).json(body)).await?;
        self.read_payload(response).await
    }

    /// POST a body, caring only about the status code.
    pub async fn post_no_content<B: Serialize + ?Sized>(&self, path: &str, body: &B) -> Result<()> {
        let response = self.send(self.http.post(self.url(path)).json(body)).await?;
        self.check_response(response).await?;
        Ok(())
    }

    /// PUT a body, caring only about the status code.
    pub async fn put_no_content<B: Serialize + ?Sized>(&self, path: &str, body: &B) -> Result<()> {
        let response = self.send(self.http.put(self.url(path)).json(body)).await?;
        self.check_response(response).await?;
        Ok(())
    }

    /// PUT a body and decode the payload.
    pub async fn put_json<T: DeserializeOwned, B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T> {
        let response = self.send(self.http.put(self.url(path)).json(body)).await?;
        self.read_payload(response).await
    }

    /// DELETE a resource, caring only about the status code.
    pub async fn delete(&self, path: &str) -> Result<()> {
        let response = self.send(self.http.delete(self.url(path))).await?;
        self.check_response(response).await?;
        Ok(())
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn send(&self, builder: RequestBuilder) -> Result<Response> {
        let builder = match self.session.current_principal() {
            Some(principal) => builder.bearer_auth(&principal.access_token),
            None => builder,
        };
        builder.send().await.map_err(|e| AppError::Api(e.to_string()))
    }

    async fn read_payload<T: DeserializeOwned>(&self, response: Response) -> Result<T> {
        let response = self.check_response(response).await?;
        let body: Value = response
            .json()
            .await
            .map_err(|e| AppError::Api(format!("Invalid JSON response: {e}")))?;
        decode_payload(body)
    }

    async fn check_response(&self, response: Response) -> Result<Response> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let path = response.url().path().to_string();
        let body = response.text().await.unwrap_or_default();

        match status {
            StatusCode::UNAUTHORIZED => Err(AppError::Unauthorized),
            StatusCode::FORBIDDEN => Err(AppError::Forbidden),
            StatusCode::NOT_FOUND => Err(AppError::NotFound(path)),
            StatusCode::BAD_REQUEST => Err(AppError::BadRequest(body)),
            _ => Err(AppError::Api(format!("HTTP {status}: {body}"))),
        }
    }
}
