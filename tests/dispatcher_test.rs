//! Page flows through the dispatcher, one site per test

mod common;

use common::{listed_names, rendered, Harness};
use polyclinic::core::site::Site;
use polyclinic::domain::LocationId;
use polyclinic::routing::{DateFront, Dispatcher, Request, Status, NOT_FOUND_BODY};
use polyclinic::views::{register_routes, CLINIC_LIST_EMPTY, LOCATION_LIST_EMPTY};
use std::sync::Arc;

async fn create_location(site: &Site, name: &str) {
    let response = site
        .handle(Request::post("/create-location/").with_data("name", name))
        .await;
    assert_eq!(response.status, Status::Ok, "{}", response.body);
}

#[tokio::test]
async fn test_index_lists_locations() {
    let harness = Harness::new();
    let response = harness.site.handle(Request::get("/")).await;
    assert_eq!(response.status, Status::Ok);
    assert_eq!(rendered(&response)["view"], "index.html");
    assert!(listed_names(&response).is_empty());

    create_location(&harness.site, "North").await;
    let response = harness.site.handle(Request::get("/")).await;
    assert_eq!(listed_names(&response), vec!["North"]);
}

#[tokio::test]
async fn test_unknown_path_is_not_found() {
    let harness = Harness::new();
    let response = harness.site.handle(Request::get("/nowhere/")).await;
    assert_eq!(response.status, Status::NotFound);
    assert_eq!(response.body, NOT_FOUND_BODY);
}

#[tokio::test]
async fn test_paths_are_normalized() {
    let harness = Harness::new();
    let response = harness.site.handle(Request::get("about")).await;
    assert_eq!(response.status, Status::Ok);
    assert_eq!(rendered(&response)["view"], "about.html");
}

#[tokio::test]
async fn test_location_name_is_decoded() {
    let harness = Harness::new();
    create_location(&harness.site, "%D0%9F%D1%80%D0%B8%D0%B2%D0%B5%D1%82").await;
    let response = harness.site.handle(Request::get("/locations-list/")).await;
    assert_eq!(listed_names(&response), vec!["Привет"]);
    assert!(harness
        .log
        .lines()
        .iter()
        .any(|line| line.ends_with("harness log---> Locations list requested")));
}

#[tokio::test]
async fn test_malformed_form_value_is_bad_request() {
    let harness = Harness::new();
    let response = harness
        .site
        .handle(Request::post("/create-location/").with_data("name", "%ZZ"))
        .await;
    assert_eq!(response.status, Status::BadRequest);
    assert!(harness.site.engine().await.locations().is_empty());
}

#[tokio::test]
async fn test_nested_location_requires_existing_parent() {
    let harness = Harness::new();
    create_location(&harness.site, "City").await;

    let response = harness
        .site
        .handle(
            Request::post("/create-location/")
                .with_data("name", "Old+Town")
                .with_data("location_id", "0"),
        )
        .await;
    assert_eq!(response.status, Status::Ok);

    let response = harness
        .site
        .handle(
            Request::post("/create-location/")
                .with_data("name", "Orphan")
                .with_data("location_id", "42"),
        )
        .await;
    assert_eq!(response.status, Status::NotFound);

    let engine = harness.site.engine().await;
    let names: Vec<&str> = engine.locations().iter().map(|l| l.name.as_str()).collect();
    assert_eq!(names, vec!["City", "Old Town"]);
    assert_eq!(engine.locations()[1].parent(), Some(engine.locations()[0].id()));
}

#[tokio::test]
async fn test_create_clinic_uses_remembered_location() {
    let harness = Harness::new();
    create_location(&harness.site, "North").await;

    let form = harness
        .site
        .handle(Request::get("/create-clinic/").with_param("id", "0"))
        .await;
    let form = rendered(&form);
    assert_eq!(form["view"], "create_clinic.html");
    assert_eq!(form["context"]["name"], "North");

    let response = harness
        .site
        .handle(Request::post("/create-clinic/").with_data("name", "City+Clinic"))
        .await;
    assert_eq!(response.status, Status::Ok);
    assert_eq!(rendered(&response)["view"], "clinics_list.html");
    assert_eq!(listed_names(&response), vec!["City Clinic"]);

    let engine = harness.site.engine().await;
    let location = engine.find_location_by_id(LocationId::new(0)).unwrap();
    assert_eq!(location.clinics().len(), 1);
    assert_eq!(engine.clinics_count(location.id()).unwrap(), 1);
}

#[tokio::test]
async fn test_create_clinic_without_location() {
    let harness = Harness::new();

    let response = harness.site.handle(Request::get("/create-clinic/")).await;
    assert_eq!(response.status, Status::Ok);
    assert_eq!(response.body, LOCATION_LIST_EMPTY);

    let response = harness
        .site
        .handle(Request::post("/create-clinic/").with_data("name", "City"))
        .await;
    assert_eq!(response.status, Status::BadRequest);

    let response = harness
        .site
        .handle(Request::get("/create-clinic/").with_param("id", "7"))
        .await;
    assert_eq!(response.status, Status::NotFound);
    assert!(response.body.contains("location with id = 7"));
}

#[tokio::test]
async fn test_clinics_list() {
    let harness = Harness::new();
    let response = harness.site.handle(Request::get("/clinics-list/")).await;
    assert_eq!(response.body, CLINIC_LIST_EMPTY);

    create_location(&harness.site, "North").await;
    create_location(&harness.site, "South").await;
    for (location, name) in [("0", "A"), ("1", "B"), ("0", "C")] {
        let response = harness
            .site
            .handle(
                Request::post("/create-clinic/")
                    .with_data("name", name)
                    .with_data("location_id", location),
            )
            .await;
        assert_eq!(response.status, Status::Ok);
    }

    let response = harness
        .site
        .handle(Request::get("/clinics-list/").with_param("id", "0"))
        .await;
    assert_eq!(listed_names(&response), vec!["A", "C"]);
    assert_eq!(rendered(&response)["context"]["name"], "North");
    assert!(harness
        .log
        .lines()
        .iter()
        .any(|line| line.ends_with("Clinics list requested")));
}

#[tokio::test]
async fn test_copy_clinic() {
    let harness = Harness::new();
    create_location(&harness.site, "North").await;
    harness
        .site
        .handle(
            Request::post("/create-clinic/")
                .with_data("name", "City")
                .with_data("location_id", "0"),
        )
        .await;

    let response = harness
        .site
        .handle(Request::get("/copy-clinic/").with_param("name", "City"))
        .await;
    assert_eq!(listed_names(&response), vec!["City", "copy_City"]);

    let response = harness
        .site
        .handle(Request::get("/copy-clinic/").with_param("name", "Nowhere"))
        .await;
    assert_eq!(listed_names(&response), vec!["City", "copy_City"]);

    let response = harness.site.handle(Request::get("/copy-clinic/")).await;
    assert_eq!(response.body, CLINIC_LIST_EMPTY);
}

#[tokio::test]
async fn test_enrolling_a_patient_notifies() {
    let harness = Harness::new();
    create_location(&harness.site, "North").await;
    harness
        .site
        .handle(
            Request::post("/create-clinic/")
                .with_data("name", "City")
                .with_data("location_id", "0"),
        )
        .await;
    let response = harness
        .site
        .handle(Request::post("/create-patient/").with_data("name", "Anna"))
        .await;
    assert_eq!(response.status, Status::Ok);

    let response = harness
        .site
        .handle(
            Request::post("/add-patient/")
                .with_data("clinic_name", "City")
                .with_data("patient_name", "Anna"),
        )
        .await;
    assert_eq!(response.status, Status::Ok);
    let context = &rendered(&response)["context"];
    assert_eq!(context["clinics"][0]["patients"][0], "Anna");

    assert_eq!(
        harness.notifications.lines(),
        vec![
            "EMAIL-> patient Anna joined clinic City",
            "SMS-> patient Anna joined clinic City",
        ]
    );

    let response = harness
        .site
        .handle(
            Request::post("/add-patient/")
                .with_data("clinic_name", "Ghost")
                .with_data("patient_name", "Anna"),
        )
        .await;
    assert_eq!(response.status, Status::NotFound);
}

#[tokio::test]
async fn test_api_serializes_clinics() {
    let harness = Harness::new();
    create_location(&harness.site, "North").await;
    harness
        .site
        .handle(
            Request::post("/create-clinic/")
                .with_data("name", "City")
                .with_data("location_id", "0"),
        )
        .await;

    let response = harness.site.handle(Request::get("/api/")).await;
    let clinics: serde_json::Value = serde_json::from_str(&response.body).unwrap();
    assert_eq!(clinics[0]["name"], "City");
    assert_eq!(clinics[0]["kind"], "state");
    assert_eq!(clinics[0]["location"], 0);
}

#[tokio::test]
async fn test_visit_programs_shows_front_date() {
    let mut dispatcher = Dispatcher::new();
    let date = chrono::NaiveDate::from_ymd_opt(2025, 5, 1).unwrap();
    dispatcher.add_front(Box::new(DateFront::fixed(date)));
    register_routes(&mut dispatcher);
    let site = Site::builder().dispatcher(dispatcher).build();

    let response = site.handle(Request::get("/visit-programs/")).await;
    assert_eq!(rendered(&response)["context"]["data"], "2025-05-01");
}

#[tokio::test]
async fn test_concurrent_requests_are_serialized() {
    let site = Arc::new(Site::builder().build());
    let mut tasks = Vec::new();
    for i in 0..16 {
        let site = Arc::clone(&site);
        tasks.push(tokio::spawn(async move {
            site.handle(Request::post("/create-location/").with_data("name", &format!("L{i}")))
                .await
        }));
    }
    for task in tasks {
        assert_eq!(task.await.unwrap().status, Status::Ok);
    }

    let engine = site.engine().await;
    let mut ids: Vec<u64> = engine.locations().iter().map(|l| l.id().value()).collect();
    ids.sort_unstable();
    assert_eq!(ids, (0..16).collect::<Vec<u64>>());
}
