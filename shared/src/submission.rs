use crate::client::PredictionClient;
use crate::context::{ContextBuilder, ContextForm};
use crate::error::SubmitError;
use crate::models::PredictionRequest;
use crate::presentation::PredictionView;
use crate::session::{Session, is_authorized};
use crate::transport::Transport;
use chrono::TimeZone;
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq)]
pub struct PredictionOutcome {
    pub context_id: Uuid,
    pub view: PredictionView,
}

/// Gate check and form validation, in that order. Nothing is sent when either
/// fails.
pub fn prepare_submission<Tz: TimeZone>(
    session: &Session,
    builder: &ContextBuilder<Tz>,
    form: &ContextForm,
) -> Result<(PredictionRequest, String), SubmitError> {
    let token = match session.token() {
        Some(token) if is_authorized(session) => token.to_string(),
        _ => {
            log::warn!("Prediction attempted without a session");
            return Err(SubmitError::Unauthorized);
        }
    };
    let request = builder.build_request(form)?;
    Ok((request, token))
}

/// One full submission: gate, build, send, normalize.
pub async fn submit_prediction<T: Transport, Tz: TimeZone>(
    session: &Session,
    builder: &ContextBuilder<Tz>,
    form: &ContextForm,
    client: &PredictionClient<T>,
) -> Result<PredictionOutcome, SubmitError> {
    let (request, token) = prepare_submission(session, builder, form)?;
    let response = client.submit(&request, &token).await?;
    let view = PredictionView::from_response(&response);
    log::info!(
        "Prediction {} returned {} points",
        request.context.context_id,
        view.series.len()
    );
    Ok(PredictionOutcome {
        context_id: request.context.context_id,
        view,
    })
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubmissionTicket(u64);

/// Tracks the one submission whose result the view still wants. A result
/// arriving with any other ticket is dropped.
#[derive(Debug, Default)]
pub struct SubmissionTracker {
    issued: u64,
    current: Option<SubmissionTicket>,
}

impl SubmissionTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts a submission, superseding any outstanding one.
    pub fn begin(&mut self) -> SubmissionTicket {
        self.issued += 1;
        let ticket = SubmissionTicket(self.issued);
        if let Some(previous) = self.current.replace(ticket) {
            log::debug!("Submission {} superseded by {}", previous.0, ticket.0);
        }
        ticket
    }

    pub fn is_current(&self, ticket: SubmissionTicket) -> bool {
        self.current == Some(ticket)
    }

    /// Marks `ticket` done. Returns false when it was cancelled or superseded.
    pub fn finish(&mut self, ticket: SubmissionTicket) -> bool {
        if self.is_current(ticket) {
            self.current = None;
            true
        } else {
            log::debug!("Dropping result of stale submission {}", ticket.0);
            false
        }
    }

    pub fn cancel(&mut self) {
        if let Some(ticket) = self.current.take() {
            log::info!("Cancelled submission {}", ticket.0);
        }
    }

    pub fn in_flight(&self) -> bool {
        self.current.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn finish_accepts_only_the_current_ticket() {
        let mut tracker = SubmissionTracker::new();
        let first = tracker.begin();
        let second = tracker.begin();
        assert!(tracker.in_flight());
        assert!(!tracker.finish(first));
        assert!(tracker.finish(second));
        assert!(!tracker.in_flight());
        assert!(!tracker.finish(second));
    }

    #[test]
    fn cancel_discards_outstanding_result() {
        let mut tracker = SubmissionTracker::new();
        let ticket = tracker.begin();
        tracker.cancel();
        assert!(!tracker.is_current(ticket));
        assert!(!tracker.finish(ticket));
        assert_ne!(tracker.begin(), ticket);
    }
}
