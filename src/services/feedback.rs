// src/services/feedback.rs

//! Feedback endpoints.

use std::sync::Arc;

use reqwest::Method;

use crate::error::Result;
use crate::models::{FeedbackRequest, FeedbackResponse, PageResponse};
use crate::services::api::ApiClient;

pub struct FeedbackService {
    api: Arc<ApiClient>,
}

impl FeedbackService {
    pub fn new(api: Arc<ApiClient>) -> Self {
        Self { api }
    }

    /// `POST feedbacks`, returns the feedback id.
    pub async fn save_feedback(&self, request: &FeedbackRequest) -> Result<i64> {
        let builder = self
            .api
            .request(Method::POST, "feedbacks")
            .await?
            .json(request);
        self.api.send_json(builder).await
    }

    /// `GET feedbacks/book/{id}`
    pub async fn find_all_feedback_by_book(
        &self,
        book_id: i64,
        page: u32,
        size: u32,
    ) -> Result<PageResponse<FeedbackResponse>> {
        self.api
            .get_page(&format!("feedbacks/book/{book_id}"), page, size)
            .await
    }
}
