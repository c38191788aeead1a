//! Notification subsystem
//!
//! Clinics are subjects: they hold observers and fan events out to them
//! synchronously, in registration order.
//!
//! - [`observer`] - the observer capability and the events it receives
//! - [`subject`] - observer list, fan-out policy and fan-out report
//! - [`notifiers`] - email and sms notifiers writing through a log sink
//!
//! # Example
//!
//! ```rust
//! use polyclinic::domain::{Clinic, ClinicKind, Patient};
//! use polyclinic::domain::ids::{ClinicId, LocationId};
//! use polyclinic::notification::EmailNotifier;
//! use std::sync::Arc;
//!
//! let mut clinic = Clinic::new(ClinicId::new(0), ClinicKind::State, "City", LocationId::new(0));
//! clinic.attach_observer(Arc::new(EmailNotifier::default()));
//!
//! let mut patient = Patient::new("Anna");
//! let report = clinic.add_patient(&mut patient).unwrap();
//! assert_eq!(report.delivered, 1);
//! ```

pub mod notifiers;
pub mod observer;
pub mod subject;

pub use notifiers::{EmailNotifier, SmsNotifier};
pub use observer::{ClinicEvent, Observer};
pub use subject::{FanOut, FanOutReport, ObserverFailure, Subject};

#[cfg(test)]
pub(crate) mod tests_support {
    use super::{ClinicEvent, Observer};
    use crate::domain::errors::NotifyError;
    use std::sync::Mutex;

    /// Observer that remembers every event it was given
    pub struct RecordingObserver {
        name: String,
        events: Mutex<Vec<ClinicEvent>>,
    }

    impl RecordingObserver {
        pub fn new(name: &str) -> Self {
            Self {
                name: name.to_string(),
                events: Mutex::new(Vec::new()),
            }
        }

        pub fn events(&self) -> Vec<ClinicEvent> {
            self.events.lock().unwrap().clone()
        }
    }

    impl Observer for RecordingObserver {
        fn name(&self) -> &str {
            &self.name
        }

        fn notify(&self, event: &ClinicEvent) -> Result<(), NotifyError> {
            self.events.lock().unwrap().push(event.clone());
            Ok(())
        }
    }

    /// Observer that always fails
    pub struct FailingObserver;

    impl Observer for FailingObserver {
        fn name(&self) -> &str {
            "failing"
        }

        fn notify(&self, _event: &ClinicEvent) -> Result<(), NotifyError> {
            Err(NotifyError::Delivery {
                observer: "failing".to_string(),
                reason: "gateway unavailable".to_string(),
            })
        }
    }
}
