//! Search shell state: query text, in-flight request, and the outcome of the
//! most recent search.

use serde::Serialize;
use shared::{
    domain::TreatmentRecord, error::RequestFailed, protocol::RecommendResponse,
};
use tracing::{debug, error, warn};

use crate::{
    presenter::{present, PrescriptionCard},
    RecommendationApi, APOLOGY_MESSAGE,
};

/// Sequence number tagging one submitted search. Only the latest ticket may
/// update the shell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct SearchTicket(pub u64);

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingSearch {
    pub ticket: SearchTicket,
    pub query: String,
}

/// Advisory message plus the optional treatment card. Always replaced as one
/// value so a stale card can never sit under a new message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SearchOutcome {
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<TreatmentRecord>,
}

impl SearchOutcome {
    pub fn failed() -> Self {
        Self {
            message: APOLOGY_MESSAGE.to_string(),
            result: None,
        }
    }

    /// A malformed first treatment is dropped and only the message survives.
    pub fn from_response(response: RecommendResponse) -> Self {
        let RecommendResponse {
            recommendation_text,
            related_treatments,
        } = response;

        let result = related_treatments.into_iter().next().and_then(|first| {
            TreatmentRecord::try_from(first)
                .map_err(|err| warn!("discarding related treatment: {err}"))
                .ok()
        });

        Self {
            message: recommendation_text,
            result,
        }
    }

    pub fn from_reply(reply: Result<RecommendResponse, RequestFailed>) -> Self {
        match reply {
            Ok(response) => Self::from_response(response),
            Err(_) => Self::failed(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchView<'a> {
    Empty,
    Loading,
    Results {
        card: Option<PrescriptionCard>,
        message: Option<&'a str>,
    },
}

#[derive(Debug, Default)]
pub struct SearchShell {
    query: String,
    in_flight: Option<SearchTicket>,
    outcome: Option<SearchOutcome>,
    last_ticket: u64,
}

impl SearchShell {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    /// Text-field binding for front ends that edit the query in place.
    pub fn query_mut(&mut self) -> &mut String {
        &mut self.query
    }

    pub fn set_query(&mut self, query: impl Into<String>) {
        self.query = query.into();
    }

    pub fn is_loading(&self) -> bool {
        self.in_flight.is_some()
    }

    pub fn in_flight(&self) -> Option<SearchTicket> {
        self.in_flight
    }

    pub fn outcome(&self) -> Option<&SearchOutcome> {
        self.outcome.as_ref()
    }

    /// Starts a search for the current query. Returns `None` without touching
    /// any state when the query is blank. A search started while another is
    /// loading supersedes it.
    pub fn begin_search(&mut self) -> Option<PendingSearch> {
        if self.query.trim().is_empty() {
            return None;
        }

        self.last_ticket += 1;
        let ticket = SearchTicket(self.last_ticket);
        if let Some(previous) = self.in_flight.replace(ticket) {
            debug!(
                superseded = previous.0,
                ticket = ticket.0,
                "search superseded by newer submission"
            );
        }
        self.outcome = None;

        Some(PendingSearch {
            ticket,
            query: self.query.clone(),
        })
    }

    /// Applies the reply for `ticket`. Returns `false` and leaves the shell
    /// untouched when the ticket is not the latest in-flight search.
    pub fn complete_search(
        &mut self,
        ticket: SearchTicket,
        reply: Result<RecommendResponse, RequestFailed>,
    ) -> bool {
        if self.in_flight != Some(ticket) {
            debug!(
                ticket = ticket.0,
                latest = self.last_ticket,
                "discarding stale recommendation reply"
            );
            return false;
        }

        if let Err(err) = &reply {
            error!(ticket = ticket.0, "{err}");
        }
        self.outcome = Some(SearchOutcome::from_reply(reply));
        self.in_flight = None;
        true
    }

    /// Runs one full search against `api`. Returns `false` when the query was
    /// blank and nothing was sent.
    pub async fn submit<A>(&mut self, api: &A) -> bool
    where
        A: RecommendationApi + ?Sized,
    {
        let Some(pending) = self.begin_search() else {
            return false;
        };
        debug!(ticket = pending.ticket.0, "submitting search");
        let reply = api.recommend(&pending.query).await;
        self.complete_search(pending.ticket, reply);
        true
    }

    pub fn view(&self) -> SearchView<'_> {
        if self.is_loading() {
            return SearchView::Loading;
        }

        let Some(outcome) = &self.outcome else {
            return SearchView::Empty;
        };
        let message = Some(outcome.message.as_str()).filter(|m| !m.is_empty());
        if outcome.result.is_none() && message.is_none() {
            return SearchView::Empty;
        }

        SearchView::Results {
            card: outcome.result.as_ref().map(present),
            message,
        }
    }
}

#[cfg(test)]
#[path = "tests/search_tests.rs"]
mod tests;
