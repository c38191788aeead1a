//! Shared helpers for integration tests

#![allow(dead_code)]

use polyclinic::adapters::database::MemoryConnection;
use polyclinic::adapters::persistence::{MapperRegistry, PATIENT_TABLE};
use polyclinic::core::site::Site;
use polyclinic::domain::NotifyError;
use polyclinic::logging::singleton::MemorySink;
use polyclinic::logging::Logger;
use polyclinic::notification::{ClinicEvent, EmailNotifier, Observer, SmsNotifier};
use polyclinic::routing::Response;
use serde_json::Value;
use std::sync::{Arc, Mutex};

/// Observer that keeps every event it receives
pub struct Recorder {
    name: String,
    events: Mutex<Vec<ClinicEvent>>,
}

impl Recorder {
    pub fn new(name: &str) -> Arc<Self> {
        Arc::new(Self {
            name: name.to_string(),
            events: Mutex::new(Vec::new()),
        })
    }

    pub fn events(&self) -> Vec<ClinicEvent> {
        self.events.lock().unwrap().clone()
    }
}

impl Observer for Recorder {
    fn name(&self) -> &str {
        &self.name
    }

    fn notify(&self, event: &ClinicEvent) -> Result<(), NotifyError> {
        self.events.lock().unwrap().push(event.clone());
        Ok(())
    }
}

/// Observer that always fails
pub struct Broken;

impl Observer for Broken {
    fn name(&self) -> &str {
        "broken"
    }

    fn notify(&self, _event: &ClinicEvent) -> Result<(), NotifyError> {
        Err(NotifyError::Delivery {
            observer: "broken".to_string(),
            reason: "gateway down".to_string(),
        })
    }
}

/// A site wired to in-memory storage and in-memory sinks
pub struct Harness {
    pub site: Site,
    pub connection: Arc<MemoryConnection>,
    pub log: Arc<MemorySink>,
    pub notifications: Arc<MemorySink>,
}

impl Harness {
    pub fn new() -> Self {
        let connection = Arc::new(MemoryConnection::with_tables(&[PATIENT_TABLE]));
        let log = Arc::new(MemorySink::new());
        let notifications = Arc::new(MemorySink::new());

        let site = Site::builder()
            .mappers(MapperRegistry::new(connection.clone()))
            .logger(Arc::new(Logger::new("harness", log.clone())))
            .notifier(Arc::new(EmailNotifier::new(notifications.clone())))
            .notifier(Arc::new(SmsNotifier::new(notifications.clone())))
            .build();

        Self {
            site,
            connection,
            log,
            notifications,
        }
    }
}

/// Parses a body produced by the default JSON renderer
pub fn rendered(response: &Response) -> Value {
    serde_json::from_str(&response.body).unwrap_or_else(|e| {
        panic!("body is not rendered JSON ({e}): {}", response.body)
    })
}

/// Names in `context.objects_list`
pub fn listed_names(response: &Response) -> Vec<String> {
    rendered(response)["context"]["objects_list"]
        .as_array()
        .map(|items| {
            items
                .iter()
                .filter_map(|item| item["name"].as_str().map(str::to_string))
                .collect()
        })
        .unwrap_or_default()
}
