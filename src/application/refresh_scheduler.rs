// Refresh scheduler - Collapses UI churn into refresh batches
use crate::application::dashboard_store::RefreshTrigger;
use crate::application::refresh_service::RefreshService;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::time::{Instant, sleep_until};

pub struct RefreshScheduler {
    service: Arc<RefreshService>,
    debounce: Duration,
}

impl RefreshScheduler {
    pub fn new(service: Arc<RefreshService>, debounce: Duration) -> Self {
        Self { service, debounce }
    }

    /// Drives refreshes until the trigger channel closes. Structural
    /// changes fire at once and cancel any pending debounce; debounced
    /// triggers keep pushing the deadline out, so only the last one within
    /// the interval actually fires.
    pub async fn run(self, mut triggers: mpsc::UnboundedReceiver<RefreshTrigger>) {
        let mut deadline: Option<Instant> = None;
        loop {
            tokio::select! {
                trigger = triggers.recv() => match trigger {
                    Some(RefreshTrigger::Immediate) => {
                        deadline = None;
                        self.spawn_refresh();
                    }
                    Some(RefreshTrigger::Debounced) => {
                        deadline = Some(Instant::now() + self.debounce);
                    }
                    None => break,
                },
                _ = sleep_until(deadline.unwrap_or_else(Instant::now)), if deadline.is_some() => {
                    deadline = None;
                    self.spawn_refresh();
                }
            }
        }
    }

    fn spawn_refresh(&self) {
        let service = self.service.clone();
        tokio::spawn(async move {
            service.refresh_all().await;
        });
    }
}
