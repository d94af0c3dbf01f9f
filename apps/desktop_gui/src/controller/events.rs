//! UI/backend events and error modeling for desktop GUI controller.

use client_core::SearchTicket;
use shared::{
    error::RequestFailed,
    protocol::{HealthResponse, RecommendResponse},
};

#[derive(Debug)]
pub enum UiEvent {
    BackendReady {
        base_url: String,
    },
    Info(String),
    RecommendationReady {
        ticket: SearchTicket,
        reply: Result<RecommendResponse, RequestFailed>,
    },
    HealthChecked(Result<HealthResponse, RequestFailed>),
    Error(UiError),
}

impl UiEvent {
    pub fn name(&self) -> &'static str {
        match self {
            Self::BackendReady { .. } => "BackendReady",
            Self::Info(_) => "Info",
            Self::RecommendationReady { .. } => "RecommendationReady",
            Self::HealthChecked(_) => "HealthChecked",
            Self::Error(_) => "Error",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiErrorContext {
    BackendStartup,
    Configuration,
}

/// Failures that leave the app unable to search.
#[derive(Debug, Clone)]
pub struct UiError {
    context: UiErrorContext,
    message: String,
}

impl UiError {
    pub fn from_message(context: UiErrorContext, message: impl Into<String>) -> Self {
        Self {
            context,
            message: message.into(),
        }
    }

    pub fn context(&self) -> UiErrorContext {
        self.context
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}
