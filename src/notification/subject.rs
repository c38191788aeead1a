//! Subject side of the observer pair

use super::observer::{ClinicEvent, Observer};
use crate::domain::errors::NotifyError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

/// What a failing observer does to the rest of the fan-out
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FanOut {
    /// Keep notifying; collect the failure in the report
    #[default]
    Isolate,
    /// Stop at the first failure
    Abort,
}

/// One observer that failed during an isolated fan-out
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ObserverFailure {
    pub observer: String,
    pub reason: String,
}

/// Outcome of a fan-out
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FanOutReport {
    /// Observers that accepted the event
    pub delivered: usize,
    /// Observers that failed (only populated under [`FanOut::Isolate`])
    pub failures: Vec<ObserverFailure>,
}

impl FanOutReport {
    pub fn is_clean(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Ordered observer list with a failure policy
#[derive(Clone, Default)]
pub struct Subject {
    observers: Vec<Arc<dyn Observer>>,
    policy: FanOut,
}

impl Subject {
    pub fn with_policy(policy: FanOut) -> Self {
        Self {
            observers: Vec::new(),
            policy,
        }
    }

    pub fn attach(&mut self, observer: Arc<dyn Observer>) {
        self.observers.push(observer);
    }

    pub fn set_policy(&mut self, policy: FanOut) {
        self.policy = policy;
    }

    pub fn policy(&self) -> FanOut {
        self.policy
    }

    /// Number of attached observers
    pub fn count(&self) -> usize {
        self.observers.len()
    }

    /// Calls every observer once, in registration order
    ///
    /// # Errors
    ///
    /// Under [`FanOut::Abort`], returns `NotifyError::Aborted` naming the
    /// failing observer and how many observers were not reached.
    pub fn notify(&self, event: &ClinicEvent) -> Result<FanOutReport, NotifyError> {
        let mut report = FanOutReport::default();

        for (index, observer) in self.observers.iter().enumerate() {
            let reason = match observer.notify(event) {
                Ok(()) => {
                    report.delivered += 1;
                    continue;
                }
                Err(NotifyError::Delivery { reason, .. }) => reason,
                Err(other) => other.to_string(),
            };

            tracing::warn!(
                observer = observer.name(),
                error = %reason,
                policy = ?self.policy,
                "Observer failed"
            );

            match self.policy {
                FanOut::Isolate => report.failures.push(ObserverFailure {
                    observer: observer.name().to_string(),
                    reason,
                }),
                FanOut::Abort => {
                    return Err(NotifyError::Aborted {
                        observer: observer.name().to_string(),
                        reason,
                        skipped: self.observers.len() - index - 1,
                    })
                }
            }
        }

        tracing::debug!(
            event = %event,
            delivered = report.delivered,
            failed = report.failures.len(),
            "Fan-out complete"
        );
        Ok(report)
    }
}

impl fmt::Debug for Subject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let names: Vec<&str> = self.observers.iter().map(|o| o.name()).collect();
        f.debug_struct("Subject")
            .field("observers", &names)
            .field("policy", &self.policy)
            .finish()
    }
}
