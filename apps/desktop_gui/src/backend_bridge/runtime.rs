//! Runtime bridge between UI command queue and backend event intake.

use std::{sync::Arc, thread};

use client_core::RecommendationApi;
use crossbeam_channel::{Receiver, Sender, TrySendError};

use crate::backend_bridge::commands::BackendCommand;
use crate::controller::events::{UiError, UiErrorContext, UiEvent};

/// Runs the backend worker on its own thread with a tokio runtime. Each
/// command gets its own task so a slow search never blocks a newer one.
pub fn launch(
    api: Arc<dyn RecommendationApi>,
    base_url: String,
    cmd_rx: Receiver<BackendCommand>,
    ui_tx: Sender<UiEvent>,
) {
    thread::spawn(move || {
        let _ = ui_tx.try_send(UiEvent::Info("Backend worker starting...".to_string()));
        let runtime = match tokio::runtime::Builder::new_multi_thread()
            .enable_all()
            .build()
        {
            Ok(runtime) => runtime,
            Err(err) => {
                let _ = ui_tx.try_send(UiEvent::Error(UiError::from_message(
                    UiErrorContext::BackendStartup,
                    format!("backend worker startup failure: failed to build runtime: {err}"),
                )));
                tracing::error!("failed to build backend runtime: {err}");
                return;
            }
        };

        runtime.block_on(async move {
            let _ = ui_tx.try_send(UiEvent::BackendReady { base_url });

            while let Ok(cmd) = cmd_rx.recv() {
                let api = Arc::clone(&api);
                let ui_tx = ui_tx.clone();
                match cmd {
                    BackendCommand::Recommend { ticket, query } => {
                        tokio::spawn(async move {
                            tracing::debug!(ticket = ticket.0, "requesting recommendation");
                            let reply = api.recommend(&query).await;
                            deliver(&ui_tx, UiEvent::RecommendationReady { ticket, reply });
                        });
                    }
                    BackendCommand::CheckHealth => {
                        tokio::spawn(async move {
                            deliver(&ui_tx, UiEvent::HealthChecked(api.health().await));
                        });
                    }
                }
            }
            tracing::debug!("ui command queue closed; backend worker exiting");
        });
    });
}

/// Never blocks a runtime worker on a full UI queue.
fn deliver(ui_tx: &Sender<UiEvent>, event: UiEvent) -> bool {
    let name = event.name();
    match ui_tx.try_send(event) {
        Ok(()) => true,
        Err(TrySendError::Full(_)) => {
            tracing::warn!(event = name, "ui event queue full; dropping event");
            false
        }
        Err(TrySendError::Disconnected(_)) => {
            tracing::warn!(event = name, "ui closed before event was delivered");
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    use async_trait::async_trait;
    use client_core::SearchTicket;
    use crossbeam_channel::bounded;
    use shared::{
        error::RequestFailed,
        protocol::{HealthResponse, RecommendResponse},
    };

    struct EchoApi;

    #[async_trait]
    impl RecommendationApi for EchoApi {
        async fn recommend(&self, query: &str) -> Result<RecommendResponse, RequestFailed> {
            Ok(RecommendResponse {
                recommendation_text: format!("echo: {query}"),
                related_treatments: Vec::new(),
            })
        }

        async fn health(&self) -> Result<HealthResponse, RequestFailed> {
            Err(RequestFailed::transport("offline"))
        }
    }

    fn next_event(ui_rx: &Receiver<UiEvent>) -> UiEvent {
        ui_rx
            .recv_timeout(Duration::from_secs(5))
            .expect("backend event")
    }

    #[test]
    fn worker_answers_recommend_with_matching_ticket() {
        let (cmd_tx, cmd_rx) = bounded(8);
        let (ui_tx, ui_rx) = bounded(8);
        launch(Arc::new(EchoApi), "http://test".into(), cmd_rx, ui_tx);

        assert!(matches!(next_event(&ui_rx), UiEvent::Info(_)));
        assert!(matches!(next_event(&ui_rx), UiEvent::BackendReady { .. }));

        cmd_tx
            .send(BackendCommand::Recommend {
                ticket: SearchTicket(7),
                query: "dry scalp".into(),
            })
            .expect("queue command");

        match next_event(&ui_rx) {
            UiEvent::RecommendationReady { ticket, reply } => {
                assert_eq!(ticket, SearchTicket(7));
                assert_eq!(reply.expect("reply").recommendation_text, "echo: dry scalp");
            }
            other => panic!("unexpected event: {other:?}"),
        }
    }

    #[test]
    fn worker_reports_health_failures() {
        let (cmd_tx, cmd_rx) = bounded(8);
        let (ui_tx, ui_rx) = bounded(8);
        launch(Arc::new(EchoApi), "http://test".into(), cmd_rx, ui_tx);
        cmd_tx.send(BackendCommand::CheckHealth).expect("queue command");

        loop {
            match next_event(&ui_rx) {
                UiEvent::HealthChecked(result) => {
                    assert!(result.is_err());
                    break;
                }
                UiEvent::Info(_) | UiEvent::BackendReady { .. } => continue,
                other => panic!("unexpected event: {other:?}"),
            }
        }
    }

    #[test]
    fn deliver_drops_event_when_ui_queue_is_full() {
        let (ui_tx, ui_rx) = bounded(1);
        assert!(deliver(&ui_tx, UiEvent::Info("first".into())));
        assert!(!deliver(&ui_tx, UiEvent::Info("second".into())));

        assert!(matches!(ui_rx.try_recv(), Ok(UiEvent::Info(text)) if text == "first"));
        assert!(ui_rx.try_recv().is_err());
    }

    #[test]
    fn deliver_reports_closed_ui() {
        let (ui_tx, ui_rx) = bounded(1);
        drop(ui_rx);
        assert!(!deliver(&ui_tx, UiEvent::Info("late".into())));
    }
}
