use std::sync::Arc;

use serde::Serialize;
use tracing::info;

use super::domain::{
    DispatcherId, FlightId, FlightRequest, FlightRequestId, FlightRequestStatus, FlightStatus,
};
use super::repository::{
    DispatcherDirectory, FlightRequestRepository, FlightRequestView, RepositoryError,
};

/// Service mediating the dispatch desk's review decisions against storage.
pub struct FlightRequestService<R, D> {
    requests: Arc<R>,
    dispatchers: Arc<D>,
}

impl<R, D> FlightRequestService<R, D>
where
    R: FlightRequestRepository + 'static,
    D: DispatcherDirectory + 'static,
{
    pub fn new(requests: Arc<R>, dispatchers: Arc<D>) -> Self {
        Self {
            requests,
            dispatchers,
        }
    }

    /// Apply a dispatcher's review decision to a request.
    ///
    /// Accepting cancels every rival request for the same flight; the
    /// cancellations and the acceptance persist as a single batch, rivals
    /// first. `InQueue` is not a decision and is rejected before storage is
    /// touched.
    pub async fn confirm_request(
        &self,
        request_id: FlightRequestId,
        dispatcher_id: &DispatcherId,
        decision: FlightRequestStatus,
    ) -> Result<ReviewReceipt, FlightRequestServiceError> {
        if decision == FlightRequestStatus::InQueue {
            return Err(FlightRequestServiceError::InQueueDecision);
        }

        let request = self
            .requests
            .find(request_id)
            .await?
            .ok_or(FlightRequestServiceError::RequestMissing(request_id))?;
        let dispatcher = self
            .dispatchers
            .find_by_id(dispatcher_id)
            .await?
            .ok_or_else(|| FlightRequestServiceError::DispatcherMissing(dispatcher_id.clone()))?;

        let mut target = request;
        target.status = decision;
        target.dispatcher_id = Some(dispatcher.id);

        let canceled_rivals = if decision == FlightRequestStatus::Accepted {
            let mut batch = self.rival_cancellations(target.flight.id, target.id).await?;
            let rivals = batch.len();
            batch.push(target);
            self.requests.update_all(batch).await?;
            if rivals > 0 {
                info!(
                    request_id = request_id.0,
                    rivals, "canceled rival requests for accepted flight"
                );
            }
            rivals
        } else {
            self.requests.update(target).await?;
            0
        };

        let message = if canceled_rivals > 0 {
            format!("request accepted, {canceled_rivals} rival request(s) canceled")
        } else {
            format!("request {}", decision.label())
        };

        Ok(ReviewReceipt {
            request_id,
            status: decision,
            canceled_rivals,
            message,
        })
    }

    /// Fetch a request for review. Only queued requests are retrievable this
    /// way; anything already decided is a bad request.
    pub async fn request_by_id(
        &self,
        request_id: FlightRequestId,
    ) -> Result<FlightRequestView, FlightRequestServiceError> {
        let request = self
            .requests
            .find(request_id)
            .await?
            .ok_or(FlightRequestServiceError::RequestMissing(request_id))?;

        if request.status != FlightRequestStatus::InQueue {
            return Err(FlightRequestServiceError::NotInQueue {
                status: request.status,
            });
        }

        Ok(request.view())
    }

    /// List requests as transport views.
    ///
    /// Without a filter every stored request is returned in repository order.
    /// With a filter, only requests in that status whose flight is still free
    /// are returned; callers wanting the unnarrowed set filter client-side.
    pub async fn flight_requests(
        &self,
        status: Option<FlightRequestStatus>,
    ) -> Result<Vec<FlightRequestView>, FlightRequestServiceError> {
        let requests = self.requests.all().await?;

        let views = match status {
            None => requests.iter().map(FlightRequest::view).collect(),
            Some(wanted) => requests
                .iter()
                .filter(|req| req.status == wanted && req.flight.status == FlightStatus::Free)
                .map(FlightRequest::view)
                .collect(),
        };

        Ok(views)
    }

    /// Every other request for the flight, marked canceled. The request being
    /// accepted is excluded so it transitions exactly once.
    async fn rival_cancellations(
        &self,
        flight_id: FlightId,
        keep: FlightRequestId,
    ) -> Result<Vec<FlightRequest>, FlightRequestServiceError> {
        let mut rivals: Vec<FlightRequest> = self
            .requests
            .all()
            .await?
            .into_iter()
            .filter(|req| req.flight.id == flight_id && req.id != keep)
            .collect();

        for rival in &mut rivals {
            rival.status = FlightRequestStatus::Canceled;
        }

        Ok(rivals)
    }
}

/// Outcome of a review decision, returned to the API layer.
#[derive(Debug, Clone, Serialize)]
pub struct ReviewReceipt {
    pub request_id: FlightRequestId,
    pub status: FlightRequestStatus,
    pub canceled_rivals: usize,
    pub message: String,
}

/// Error raised by the flight-request service.
#[derive(Debug, thiserror::Error)]
pub enum FlightRequestServiceError {
    #[error("in-queue is not a valid review decision")]
    InQueueDecision,
    #[error("flight request {0} doesn't exist")]
    RequestMissing(FlightRequestId),
    #[error("dispatcher {0} doesn't exist")]
    DispatcherMissing(DispatcherId),
    #[error("requests can be reviewed only while in queue (status: {})", .status.label())]
    NotInQueue { status: FlightRequestStatus },
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}
