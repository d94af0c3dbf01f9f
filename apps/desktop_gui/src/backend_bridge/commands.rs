//! Backend commands queued from UI to backend worker.

use client_core::SearchTicket;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BackendCommand {
    Recommend { ticket: SearchTicket, query: String },
    CheckHealth,
}

impl BackendCommand {
    pub fn name(&self) -> &'static str {
        match self {
            BackendCommand::Recommend { .. } => "recommend",
            BackendCommand::CheckHealth => "check_health",
        }
    }
}
