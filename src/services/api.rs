// src/services/api.rs

//! Shared HTTP plumbing for the resource services.
//!
//! Every request is built through [`ApiClient::request`], which attaches the
//! session's bearer token when there is one. Non-success responses become
//! [`AppError::Api`] carrying the backend's error body.

use std::sync::Arc;

use reqwest::{Client, Method, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use url::Url;

use crate::auth::Session;
use crate::error::{AppError, Result};
use crate::models::{Config, ErrorResponse};
use crate::utils::{base_url, http, join_path};

/// Turn a non-success response into an [`AppError::Api`].
pub async fn check_status(response: Response) -> Result<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let url = response.url().clone();
    let body = response.text().await.unwrap_or_default();
    let body = ErrorResponse::from_body(&body);
    log::debug!("{} {} failed: {}", status.as_u16(), url, body.summary());

    Err(AppError::Api {
        status: status.as_u16(),
        body,
    })
}

/// Query parameters of a paged list endpoint.
pub fn page_query(page: u32, size: u32) -> [(&'static str, u32); 2] {
    [("page", page), ("size", size)]
}

/// HTTP client bound to the backend root URL.
pub struct ApiClient {
    client: Client,
    root_url: Url,
    session: Option<Arc<dyn Session>>,
}

impl ApiClient {
    pub fn new(client: Client, root_url: &str) -> Result<Self> {
        Ok(Self {
            client,
            root_url: base_url(root_url)?,
            session: None,
        })
    }

    /// Build from configuration, creating the HTTP client.
    pub fn from_config(config: &Config) -> Result<Self> {
        let client = http::create_client(&config.http)?;
        Self::new(client, &config.api.root_url)
    }

    /// Attach a session whose token is sent with every request.
    pub fn with_session(mut self, session: Arc<dyn Session>) -> Self {
        self.session = Some(session);
        self
    }

    /// Underlying HTTP client, for collaborators outside the REST API.
    pub fn http_client(&self) -> &Client {
        &self.client
    }

    /// Absolute URL of an endpoint path.
    pub fn endpoint(&self, path: &str) -> Result<Url> {
        Ok(join_path(&self.root_url, path)?)
    }

    /// Start a request, with the bearer token when the session has one.
    pub async fn request(&self, method: Method, path: &str) -> Result<RequestBuilder> {
        let url = self.endpoint(path)?;
        log::debug!("{} {}", method, url);

        let mut builder = self.client.request(method, url);
        if let Some(session) = &self.session {
            if let Some(token) = session.bearer_token().await? {
                builder = builder.bearer_auth(token);
            }
        }
        Ok(builder)
    }

    /// Send and check the status.
    pub async fn send(&self, builder: RequestBuilder) -> Result<Response> {
        let response = builder.send().await?;
        check_status(response).await
    }

    /// Send and decode a JSON body.
    pub async fn send_json<T: DeserializeOwned>(&self, builder: RequestBuilder) -> Result<T> {
        Ok(self.send(builder).await?.json().await?)
    }

    /// Send, ignoring any body.
    pub async fn send_empty(&self, builder: RequestBuilder) -> Result<()> {
        self.send(builder).await?;
        Ok(())
    }

    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        let builder = self.request(Method::GET, path).await?;
        self.send_json(builder).await
    }

    pub async fn get_page<T: DeserializeOwned>(&self, path: &str, page: u32, size: u32) -> Result<T> {
        let builder = self
            .request(Method::GET, path)
            .await?
            .query(&page_query(page, size));
        self.send_json(builder).await
    }

    pub async fn delete(&self, path: &str) -> Result<()> {
        let builder = self.request(Method::DELETE, path).await?;
        self.send_empty(builder).await
    }
}
