use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use serde::Deserialize;

use super::domain::{Dispatcher, DispatcherId};
use super::repository::{DispatcherDirectory, RepositoryError};

/// Profile supplied when registering a dispatcher account.
#[derive(Debug, Clone, Deserialize)]
pub struct NewDispatcher {
    pub display_name: String,
    pub email: String,
}

static DISPATCHER_SEQUENCE: AtomicU64 = AtomicU64::new(1);

fn next_dispatcher_id() -> DispatcherId {
    let id = DISPATCHER_SEQUENCE.fetch_add(1, Ordering::Relaxed);
    DispatcherId(format!("disp-{id:06}"))
}

/// Service managing dispatcher accounts for the review desk.
pub struct DispatcherService<D> {
    directory: Arc<D>,
}

impl<D> DispatcherService<D>
where
    D: DispatcherDirectory + 'static,
{
    pub fn new(directory: Arc<D>) -> Self {
        Self { directory }
    }

    /// Register a dispatcher, rejecting emails already on file.
    pub async fn create_dispatcher(
        &self,
        profile: NewDispatcher,
    ) -> Result<Dispatcher, DispatcherServiceError> {
        let email = profile.email.trim().to_ascii_lowercase();
        let taken = self
            .directory
            .all()
            .await?
            .iter()
            .any(|dispatcher| dispatcher.email.eq_ignore_ascii_case(&email));
        if taken {
            return Err(DispatcherServiceError::EmailTaken(email));
        }

        let dispatcher = Dispatcher {
            id: next_dispatcher_id(),
            display_name: profile.display_name,
            email,
        };

        let stored = self.directory.insert(dispatcher).await?;
        Ok(stored)
    }

    /// List every dispatcher on file.
    pub async fn dispatchers(&self) -> Result<Vec<Dispatcher>, DispatcherServiceError> {
        Ok(self.directory.all().await?)
    }
}

/// Error raised by the dispatcher directory service.
#[derive(Debug, thiserror::Error)]
pub enum DispatcherServiceError {
    #[error("email {0} is already registered")]
    EmailTaken(String),
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}
