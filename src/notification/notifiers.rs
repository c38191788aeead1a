//! Email and sms notifiers
//!
//! Neither talks to a real gateway: each formats its message and hands it to
//! a [`LogSink`], console by default.

use super::observer::{ClinicEvent, Observer};
use crate::domain::errors::NotifyError;
use crate::logging::singleton::{ConsoleSink, LogSink};
use std::sync::Arc;

fn deliver(
    channel: &str,
    sink: &dyn LogSink,
    event: &ClinicEvent,
) -> Result<(), NotifyError> {
    let message = match event {
        ClinicEvent::PatientAdded { clinic, patient } => {
            format!("{channel}-> patient {patient} joined clinic {clinic}")
        }
    };
    tracing::debug!(channel, event = %event, "Delivering notification");
    sink.write(&message).map_err(|e| NotifyError::Delivery {
        observer: channel.to_lowercase(),
        reason: e.to_string(),
    })
}

/// Email notifier
#[derive(Clone)]
pub struct EmailNotifier {
    sink: Arc<dyn LogSink>,
}

impl EmailNotifier {
    pub fn new(sink: Arc<dyn LogSink>) -> Self {
        Self { sink }
    }
}

impl Default for EmailNotifier {
    fn default() -> Self {
        Self::new(Arc::new(ConsoleSink))
    }
}

impl Observer for EmailNotifier {
    fn name(&self) -> &str {
        "email"
    }

    fn notify(&self, event: &ClinicEvent) -> Result<(), NotifyError> {
        deliver("EMAIL", self.sink.as_ref(), event)
    }
}

/// Sms notifier
#[derive(Clone)]
pub struct SmsNotifier {
    sink: Arc<dyn LogSink>,
}

impl SmsNotifier {
    pub fn new(sink: Arc<dyn LogSink>) -> Self {
        Self { sink }
    }
}

impl Default for SmsNotifier {
    fn default() -> Self {
        Self::new(Arc::new(ConsoleSink))
    }
}

impl Observer for SmsNotifier {
    fn name(&self) -> &str {
        "sms"
    }

    fn notify(&self, event: &ClinicEvent) -> Result<(), NotifyError> {
        deliver("SMS", self.sink.as_ref(), event)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logging::singleton::MemorySink;
    use std::io;

    struct BrokenSink;

    impl LogSink for BrokenSink {
        fn write(&self, _line: &str) -> io::Result<()> {
            Err(io::Error::new(io::ErrorKind::BrokenPipe, "closed"))
        }
    }

    fn event() -> ClinicEvent {
        ClinicEvent::PatientAdded {
            clinic: "North".to_string(),
            patient: "Pavel".to_string(),
        }
    }

    #[test]
    fn test_email_message() {
        let sink = Arc::new(MemorySink::new());
        EmailNotifier::new(sink.clone()).notify(&event()).unwrap();
        assert_eq!(sink.lines(), vec!["EMAIL-> patient Pavel joined clinic North"]);
    }

    #[test]
    fn test_sms_message() {
        let sink = Arc::new(MemorySink::new());
        SmsNotifier::new(sink.clone()).notify(&event()).unwrap();
        assert_eq!(sink.lines(), vec!["SMS-> patient Pavel joined clinic North"]);
    }

    #[test]
    fn test_sink_failure_is_delivery_error() {
        let err = SmsNotifier::new(Arc::new(BrokenSink))
            .notify(&event())
            .unwrap_err();
        assert!(matches!(err, NotifyError::Delivery { ref observer, .. } if observer == "sms"));
    }
}
