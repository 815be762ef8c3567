//! API Client Integration Tests
//!
//! Runs the client against an in-process axum server.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use axum::body::Bytes;
use axum::extract::RawQuery;
use axum::http::{header, HeaderMap, StatusCode};
use axum::routing::{get, patch, post};
use axum::{Json, Router};
use serde_json::{json, Value};

use lead_desk_core::endpoints::{admin, attendance, superadmin, team_leader};
use lead_desk_core::export::ExportRequest;
use lead_desk_core::filters::{FilterState, ListFilters, Refetch};
use lead_desk_core::forms::{self, FormMode, FormValues};
use lead_desk_core::models::{Lead, LeadStatus, UserAccount};
use lead_desk_core::optimistic::{flip_active, settle_active};
use lead_desk_core::resource::{EntityResource, StaffResource};
use lead_desk_core::{ApiClient, ApiConfig, ApiError, ListView, LoadState, StaticToken};

const TOKEN: &str = "t0k3n";

async fn spawn(app: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.expect("bind");
    let addr = listener.local_addr().expect("addr");
    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("serve");
    });
    format!("http://{}", addr)
}

fn client(base: &str) -> ApiClient {
    ApiClient::new(ApiConfig::new(base), Arc::new(StaticToken::new(TOKEN)))
}

fn authorized(headers: &HeaderMap) -> bool {
    headers.get(header::AUTHORIZATION).and_then(|v| v.to_str().ok()) == Some("Token t0k3n")
}

#[tokio::test]
async fn test_missing_token_never_reaches_server() {
    let hits = Arc::new(AtomicUsize::new(0));
    let counter = hits.clone();
    let app = Router::new().route(
        "/accounts/api/admin/team-leaders/",
        get(move || {
            let counter = counter.clone();
            async move {
                counter.fetch_add(1, Ordering::SeqCst);
                Json(json!([]))
            }
        }),
    );
    let base = spawn(app).await;

    let api = ApiClient::new(ApiConfig::new(&base), Arc::new(StaticToken::none()));
    let result = admin::list_team_leaders(&api).await;

    assert_eq!(result.unwrap_err(), ApiError::MissingAuth);
    assert_eq!(hits.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn test_productivity_report_sends_filters_and_token() {
    let seen_query = Arc::new(Mutex::new(None::<String>));
    let recorder = seen_query.clone();
    let app = Router::new().route(
        "/accounts/api/admin/productivity-report/",
        get(move |headers: HeaderMap, RawQuery(query): RawQuery| {
            let recorder = recorder.clone();
            async move {
                if !authorized(&headers) {
                    return (StatusCode::UNAUTHORIZED, Json(json!({"detail": "Invalid token."})));
                }
                *recorder.lock().unwrap() = query;
                (
                    StatusCode::OK,
                    Json(json!({
                        "staff_list": [{"id": 1, "name": "John Doe", "total_leads": 10, "interested": 5, "visit": 2}],
                        "counts": {"total_leads": 10, "interested": 5}
                    })),
                )
            }
        }),
    );
    let base = spawn(app).await;
    let api = client(&base);

    let filters = ListFilters {
        start_date: "2024-04-01".to_string(),
        end_date: "2024-04-30".to_string(),
        team_leader: Some(7),
    };
    let page = admin::productivity_report(&api, &filters).await.unwrap();

    assert_eq!(page.rows[0].interested_percentage(), 50);
    assert_eq!(page.counts.get("interested"), 5);
    assert_eq!(
        seen_query.lock().unwrap().as_deref(),
        Some("start_date=2024-04-01&end_date=2024-04-30&team_leader_id=7")
    );
}

#[tokio::test]
async fn test_clear_refetches_like_mount() {
    let queries = Arc::new(Mutex::new(Vec::<Option<String>>::new()));
    let recorder = queries.clone();
    let app = Router::new().route(
        "/accounts/api/admin/productivity-report/",
        get(move |RawQuery(query): RawQuery| {
            let recorder = recorder.clone();
            async move {
                recorder.lock().unwrap().push(query);
                Json(json!({"staff_list": [], "counts": {}}))
            }
        }),
    );
    let base = spawn(app).await;
    let api = client(&base);

    let mut filters = FilterState::default();
    admin::productivity_report(&api, filters.applied()).await.unwrap();

    filters.draft.start_date = "2024-01-01".to_string();
    filters.draft.team_leader = Some(2);
    assert_eq!(filters.apply(), Ok(Refetch::Filters));
    admin::productivity_report(&api, filters.applied()).await.unwrap();

    assert_eq!(filters.clear(), Refetch::Filters);
    admin::productivity_report(&api, filters.applied()).await.unwrap();

    let seen = queries.lock().unwrap().clone();
    assert_eq!(seen.len(), 3);
    assert_eq!(seen[0], None);
    assert_eq!(seen[1].as_deref(), Some("start_date=2024-01-01&team_leader_id=2"));
    assert_eq!(seen[2], seen[0]);
}

#[tokio::test]
async fn test_non_json_415_becomes_readable_error() {
    let app = Router::new().route(
        "/accounts/api/admin/add-staff/",
        post(|| async { (StatusCode::UNSUPPORTED_MEDIA_TYPE, "<h1>Unsupported</h1>") }),
    );
    let base = spawn(app).await;
    let api = client(&base);

    let schema = forms::team_leader_schema();
    let err = admin::add_staff(&api, schema.build_payload(&FormValues::default()))
        .await
        .unwrap_err();

    assert_eq!(err.status(), Some(415));
    assert_eq!(err.user_message(), "Unsupported Media Type");
}

#[tokio::test]
async fn test_field_errors_are_aggregated() {
    let app = Router::new().route(
        "/accounts/api/admin/add-staff/",
        post(|| async {
            (
                StatusCode::BAD_REQUEST,
                Json(json!({"email": ["staff with this email already exists."], "mobile": ["Enter a valid number."]})),
            )
        }),
    );
    let base = spawn(app).await;
    let api = client(&base);

    let err = admin::add_staff(&api, Default::default()).await.unwrap_err();
    assert_eq!(
        err,
        ApiError::Validation(
            "email: staff with this email already exists.; mobile: Enter a valid number.".to_string()
        )
    );
}

#[tokio::test]
async fn test_edit_sends_multipart_without_blank_password() {
    let body_seen = Arc::new(Mutex::new(String::new()));
    let recorder = body_seen.clone();
    let app = Router::new().route(
        "/accounts/api/admin/staff/edit/{id}/",
        patch(move |headers: HeaderMap, body: Bytes| {
            let recorder = recorder.clone();
            async move {
                let content_type = headers
                    .get(header::CONTENT_TYPE)
                    .and_then(|v| v.to_str().ok())
                    .unwrap_or_default()
                    .to_string();
                if !content_type.starts_with("multipart/form-data") {
                    return (StatusCode::UNSUPPORTED_MEDIA_TYPE, Json(json!({})));
                }
                *recorder.lock().unwrap() = String::from_utf8_lossy(&body).to_string();
                (StatusCode::OK, Json(json!({"message": "Staff updated"})))
            }
        }),
    );
    let base = spawn(app).await;
    let api = client(&base);

    let mut values = FormValues::default();
    values.set_text("name", "John Doe");
    values.set_text("password", "");
    let payload = forms::staff_schema(&[]).build_payload(&values);
    StaffResource.submit(&api, FormMode::Edit(12), payload).await.unwrap();

    let body = body_seen.lock().unwrap().clone();
    assert!(body.contains("name=\"name\""));
    assert!(body.contains("John Doe"));
    assert!(!body.contains("name=\"password\""));
}

#[tokio::test]
async fn test_toggle_twice_keeps_server_value() {
    let calls = Arc::new(AtomicUsize::new(0));
    let counter = calls.clone();
    let app = Router::new()
        .route(
            "/accounts/api/admin/add-staff/",
            get(|| async { Json(json!({"staff_list": [{"id": 3, "name": "Asha", "is_active": false}]})) }),
        )
        .route(
            "/accounts/api/admin/toggle-status/{id}/",
            post(move || {
                let counter = counter.clone();
                async move {
                    // Server keeps the account active on the second call
                    counter.fetch_add(1, Ordering::SeqCst);
                    Json(json!({"is_active": true, "message": "ok"}))
                }
            }),
        );
    let base = spawn(app).await;
    let api = client(&base);

    let mut view: ListView<UserAccount> = ListView::new();
    let ticket = view.begin_fetch();
    view.finish(ticket, StaffResource.list(&api, &ListFilters::default()).await);
    assert_eq!(view.state(), &LoadState::Loaded);

    for _ in 0..2 {
        let pending = flip_active(view.rows_mut(), 3).unwrap();
        let outcome = StaffResource.toggle_active(&api, 3).await;
        settle_active(pending, view.rows_mut(), outcome).unwrap();
    }

    assert_eq!(calls.load(Ordering::SeqCst), 2);
    assert!(view.rows()[0].is_active);
}

#[tokio::test]
async fn test_toggle_failure_rolls_back() {
    let app = Router::new().route(
        "/accounts/api/admin/toggle-status/{id}/",
        post(|| async { (StatusCode::INTERNAL_SERVER_ERROR, Json(json!({"message": "Could not update"}))) }),
    );
    let base = spawn(app).await;
    let api = client(&base);

    let mut rows: Vec<UserAccount> =
        vec![serde_json::from_value(json!({"id": 8, "name": "Ravi", "is_active": false})).unwrap()];
    let pending = flip_active(&mut rows, 8).unwrap();
    assert!(rows[0].is_active);

    let err = settle_active(pending, &mut rows, admin::toggle_status(&api, 8).await).unwrap_err();
    assert_eq!(err.user_message(), "Could not update");
    assert!(!rows[0].is_active);
}

#[tokio::test]
async fn test_failed_fetch_clears_previous_rows() {
    let app = Router::new().route(
        "/accounts/api/admin/leads/{tag}/",
        get(|RawQuery(query): RawQuery| async move {
            if query.is_some() {
                (StatusCode::INTERNAL_SERVER_ERROR, Json(json!({"detail": "Report failed"})))
            } else {
                (StatusCode::OK, Json(json!({"leads": [{"id": 1, "name": "John Doe", "status": "Intrested"}]})))
            }
        }),
    );
    let base = spawn(app).await;
    let api = client(&base);

    let mut view: ListView<Lead> = ListView::new();
    let ticket = view.begin_fetch();
    view.finish(ticket, admin::leads_by_tag(&api, "interested", &ListFilters::default()).await);
    assert_eq!(view.rows()[0].status, LeadStatus::Interested);

    let filters = ListFilters { start_date: "2024-02-01".into(), ..Default::default() };
    let ticket = view.begin_fetch();
    view.finish(ticket, admin::leads_by_tag(&api, "interested", &filters).await);

    assert_eq!(view.error(), Some("Report failed"));
    assert!(view.rows().is_empty());
}

#[tokio::test]
async fn test_export_uses_disposition_filename() {
    let app = Router::new().route(
        "/accounts/api/team-leader/export-leads/",
        post(|Json(body): Json<Value>| async move {
            let status = body["status"].as_str().unwrap_or_default().to_string();
            (
                [
                    (header::CONTENT_DISPOSITION, format!("attachment; filename=\"{}_march.xlsx\"", status)),
                    (header::CONTENT_TYPE, "application/vnd.ms-excel".to_string()),
                ],
                vec![0x50u8, 0x4b, 0x03, 0x04],
            )
        }),
    );
    let base = spawn(app).await;
    let api = client(&base);

    let request = ExportRequest { status: "visit".into(), start_date: None, end_date: None };
    let file = team_leader::export_leads(&api, &request).await.unwrap();
    assert_eq!(file.filename, "visit_march.xlsx");
    assert_eq!(file.content_type, "application/vnd.ms-excel");
    assert_eq!(file.bytes.len(), 4);
}

#[tokio::test]
async fn test_export_default_filename() {
    let app = Router::new().route(
        "/accounts/api/team-leader/export-leads/",
        post(|| async { vec![1u8, 2, 3] }),
    );
    let base = spawn(app).await;
    let request = ExportRequest { status: "lost".into(), start_date: None, end_date: None };
    let file = team_leader::export_leads(&client(&base), &request).await.unwrap();
    assert_eq!(file.filename, "lost_leads.xlsx");
}

#[tokio::test]
async fn test_export_not_found_or_empty() {
    let app = Router::new()
        .route(
            "/accounts/api/team-leader/export-leads/",
            post(|Json(body): Json<Value>| async move {
                if body["status"] == "lost" {
                    (StatusCode::NOT_FOUND, Vec::new())
                } else {
                    (StatusCode::OK, Vec::new())
                }
            }),
        );
    let base = spawn(app).await;
    let api = client(&base);

    for status in ["lost", "visit"] {
        let request = ExportRequest { status: status.into(), start_date: None, end_date: None };
        let err = team_leader::export_leads(&api, &request).await.unwrap_err();
        assert_eq!(err, ApiError::EmptyExport);
    }
}

#[tokio::test]
async fn test_check_in_returns_fresh_summary() {
    let checked_in = Arc::new(AtomicUsize::new(0));
    let writer = checked_in.clone();
    let reader = checked_in.clone();
    let app = Router::new()
        .route(
            "/accounts/attendance/check-in/",
            post(move || {
                let writer = writer.clone();
                async move {
                    writer.store(1, Ordering::SeqCst);
                    Json(json!({"message": "Checked in"}))
                }
            }),
        )
        .route(
            "/accounts/attendance/today/",
            get(move || {
                let reader = reader.clone();
                async move {
                    if reader.load(Ordering::SeqCst) == 1 {
                        Json(json!({"name": "Asha", "checked_in": true, "check_in_time": "09:12"}))
                    } else {
                        Json(json!({"name": "Asha", "checked_in": false}))
                    }
                }
            }),
        );
    let base = spawn(app).await;
    let api = client(&base);

    assert!(!attendance::today(&api).await.unwrap().checked_in);
    let today = attendance::check_in(&api).await.unwrap();
    assert!(today.checked_in);
    assert_eq!(today.summary(), "Checked in at 09:12");
}

#[tokio::test]
async fn test_superadmin_counts_either_shape() {
    let app = Router::new().route(
        "/accounts/api/superadmin/dashboard/",
        get(|| async { Json(json!({"counts": {"total_admins": 4, "total_staff": 31}})) }),
    );
    let base = spawn(app).await;
    let counts = superadmin::dashboard_counts(&client(&base)).await.unwrap();
    assert_eq!(counts.get("total_admins"), 4);
    assert_eq!(counts.get("total_leads"), 0);

    let app = Router::new().route(
        "/accounts/api/superadmin/dashboard/",
        get(|| async { Json(json!({"total_admins": 2})) }),
    );
    let base = spawn(app).await;
    let counts = superadmin::dashboard_counts(&client(&base)).await.unwrap();
    assert_eq!(counts.get("total_admins"), 2);
}

#[tokio::test]
async fn test_unreachable_server_is_network_error() {
    // Bind then drop to get a port nobody listens on
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let base = format!("http://{}", listener.local_addr().unwrap());
    drop(listener);

    let err = admin::list_team_leaders(&client(&base)).await.unwrap_err();
    assert!(matches!(err, ApiError::Network(_)));
}
