//! Applies backend events to the GUI state.

use client_core::SearchShell;

use crate::controller::events::UiEvent;

#[derive(Debug)]
pub struct AppState {
    pub shell: SearchShell,
    pub status: String,
    pub backend_url: Option<String>,
    /// Set when the app cannot search at all; rendered as a banner.
    pub fatal_error: Option<String>,
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            shell: SearchShell::new(),
            status: "Starting...".to_string(),
            backend_url: None,
            fatal_error: None,
        }
    }
}

pub fn apply_ui_event(state: &mut AppState, event: UiEvent) {
    match event {
        UiEvent::BackendReady { base_url } => {
            state.status = format!("Connected to {base_url}");
            state.backend_url = Some(base_url);
        }
        UiEvent::Info(message) => {
            state.status = message;
        }
        UiEvent::RecommendationReady { ticket, reply } => {
            state.shell.complete_search(ticket, reply);
        }
        UiEvent::HealthChecked(Ok(health)) => {
            state.status = health.message;
        }
        UiEvent::HealthChecked(Err(err)) => {
            tracing::warn!("health check failed: {err}");
            state.status = "Recommendation service is unreachable".to_string();
        }
        UiEvent::Error(err) => {
            tracing::error!(context = ?err.context(), "{}", err.message());
            state.status = err.message().to_string();
            state.fatal_error = Some(err.message().to_string());
        }
    }
}
