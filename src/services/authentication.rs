// src/services/authentication.rs

//! Account endpoints: sign-up, login, activation.

use std::sync::Arc;

use reqwest::Method;

use crate::error::Result;
use crate::models::{AuthenticationRequest, AuthenticationResponse, RegistrationRequest};
use crate::services::api::ApiClient;

pub struct AuthenticationService {
    api: Arc<ApiClient>,
}

impl AuthenticationService {
    pub fn new(api: Arc<ApiClient>) -> Self {
        Self { api }
    }

    /// `POST auth/register`, answered with 202 and no body.
    pub async fn register(&self, request: &RegistrationRequest) -> Result<()> {
        let builder = self
            .api
            .request(Method::POST, "auth/register")
            .await?
            .json(request);
        self.api.send_empty(builder).await
    }

    /// `POST auth/authenticate`
    pub async fn authenticate(
        &self,
        request: &AuthenticationRequest,
    ) -> Result<AuthenticationResponse> {
        let builder = self
            .api
            .request(Method::POST, "auth/authenticate")
            .await?
            .json(request);
        self.api.send_json(builder).await
    }

    /// `GET auth/activate-account?token=`
    pub async fn confirm(&self, token: &str) -> Result<()> {
        let builder = self
            .api
            .request(Method::GET, "auth/activate-account")
            .await?
            .query(&[("token", token)]);
        self.api.send_empty(builder).await
    }
}
