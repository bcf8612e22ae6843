//! Figures, events, content categories and the AI historian.

use reqwest::Method;
use serde::{Deserialize, Serialize};
use tracing::instrument;

use black_excellence_core::{EventId, FigureId};

use super::ApiClient;
use super::types::{CategoryList, HistoricalEvent, HistoricalFigure};
use crate::error::{ApiError, ValidationError};

/// Sampling options for the AI historian. Unset fields use the defaults
/// (`temperature 0.2`, `top_p 0.7`, `max_tokens 512`, `thinking true`).
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ChatOptions {
    pub temperature: Option<f32>,
    pub top_p: Option<f32>,
    pub max_tokens: Option<u32>,
    pub thinking: Option<bool>,
}

/// Request body for `/api/ai/chat`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChatRequest<'a> {
    pub message: &'a str,
    pub temperature: f32,
    pub top_p: f32,
    pub max_tokens: u32,
    pub thinking: bool,
}

impl<'a> ChatRequest<'a> {
    pub const DEFAULT_TEMPERATURE: f32 = 0.2;
    pub const DEFAULT_TOP_P: f32 = 0.7;
    pub const DEFAULT_MAX_TOKENS: u32 = 512;
    pub const DEFAULT_THINKING: bool = true;

    /// Build a request, filling unset options with the defaults.
    #[must_use]
    pub fn new(message: &'a str, options: ChatOptions) -> Self {
        Self {
            message,
            temperature: options.temperature.unwrap_or(Self::DEFAULT_TEMPERATURE),
            top_p: options.top_p.unwrap_or(Self::DEFAULT_TOP_P),
            max_tokens: options.max_tokens.unwrap_or(Self::DEFAULT_MAX_TOKENS),
            thinking: options.thinking.unwrap_or(Self::DEFAULT_THINKING),
        }
    }
}

#[derive(Deserialize)]
struct ChatResponse {
    response: String,
}

impl ApiClient {
    // =========================================================================
    // Figures & Events
    // =========================================================================

    /// List all historical figures.
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails.
    #[instrument(skip(self))]
    pub async fn get_figures(&self) -> Result<Vec<HistoricalFigure>, ApiError> {
        self.get("/api/figures").await
    }

    /// Get one historical figure.
    ///
    /// # Errors
    ///
    /// Returns an error if the figure does not exist or the request fails.
    #[instrument(skip(self), fields(figure_id = %id))]
    pub async fn get_figure(&self, id: FigureId) -> Result<HistoricalFigure, ApiError> {
        self.get(&format!("/api/figures/{id}")).await
    }

    /// List all historical events.
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails.
    #[instrument(skip(self))]
    pub async fn get_events(&self) -> Result<Vec<HistoricalEvent>, ApiError> {
        self.get("/api/events").await
    }

    /// Get one historical event.
    ///
    /// # Errors
    ///
    /// Returns an error if the event does not exist or the request fails.
    #[instrument(skip(self), fields(event_id = %id))]
    pub async fn get_event(&self, id: EventId) -> Result<HistoricalEvent, ApiError> {
        self.get(&format!("/api/events/{id}")).await
    }

    /// Content categories of the figure catalog.
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails.
    #[instrument(skip(self))]
    pub async fn get_categories(&self) -> Result<Vec<String>, ApiError> {
        let list: CategoryList = self.get("/api/categories").await?;
        Ok(list.categories.unwrap_or_default())
    }

    // =========================================================================
    // AI Historian
    // =========================================================================

    /// Ask the AI historian a question.
    ///
    /// Blank questions are rejected without sending a request.
    ///
    /// # Errors
    ///
    /// Returns a validation error for a blank question, otherwise an error
    /// if the request fails or the backend's AI provider is unavailable.
    #[instrument(skip(self, question, options))]
    pub async fn ask_ai(&self, question: &str, options: ChatOptions) -> Result<String, ApiError> {
        let question = question.trim();
        if question.is_empty() {
            return Err(ValidationError::EmptyQuestion.into());
        }

        let body = ChatRequest::new(question, options);
        let response: ChatResponse = self
            .send(self.request(Method::POST, "/api/ai/chat")?.json(&body))
            .await?;
        Ok(response.response)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_chat_request_defaults() {
        let body = serde_json::to_value(ChatRequest::new("Who was Bessie Coleman?", ChatOptions::default()))
            .unwrap();
        assert_eq!(body["message"], "Who was Bessie Coleman?");
        assert!((body["temperature"].as_f64().unwrap() - 0.2).abs() < 1e-6);
        assert!((body["top_p"].as_f64().unwrap() - 0.7).abs() < 1e-6);
        assert_eq!(body["max_tokens"], json!(512));
        assert_eq!(body["thinking"], json!(true));
    }

    #[test]
    fn test_chat_request_overrides() {
        let options = ChatOptions {
            max_tokens: Some(128),
            thinking: Some(false),
            ..ChatOptions::default()
        };
        let request = ChatRequest::new("q", options);
        assert_eq!(request.max_tokens, 128);
        assert!(!request.thinking);
        assert!((request.temperature - ChatRequest::DEFAULT_TEMPERATURE).abs() < f32::EPSILON);
    }
}
