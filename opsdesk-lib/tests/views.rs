//! View controllers against an in-process backend.

mod common;

use std::sync::Arc;

use common::MockBackend;
use common::Reply;
use opsdesk_lib::OpsClient;
use opsdesk_lib::confirm::AlwaysConfirm;
use opsdesk_lib::model::WorkOrderInput;
use opsdesk_lib::table::SortDirection;
use opsdesk_lib::toast::ToastKind;
use opsdesk_lib::toast::Toasts;
use opsdesk_lib::views;
use opsdesk_lib::views::ViewContext;
use serde_json::json;

fn context(backend: &MockBackend, confirm: bool) -> ViewContext {
    let client = OpsClient::builder().url(&backend.url).build().unwrap();
    ViewContext::new(client, Toasts::new(), Arc::new(AlwaysConfirm(confirm)))
}

fn sites_reply() -> Reply {
    Reply::json(
        200,
        json!({"results": [
            {"id": 1, "name": "Plant B", "region": "North"},
            {"id": 2, "name": "Plant A", "region": "South"}
        ]}),
    )
}

#[tokio::test]
async fn test_sites_page_sorts_in_place() {
    let backend = MockBackend::start().await;
    backend.route("GET", "/sites?page=1&page_size=50", sites_reply());
    let ctx = context(&backend, true);

    let mut page = views::sites::page(&ctx).await.unwrap();
    let table = page.tables_mut().next().unwrap();
    assert_eq!(table.column_texts(1), vec!["Plant B", "Plant A"]);
    assert_eq!(table.sort_by(1), Some(SortDirection::Ascending));
    assert_eq!(table.column_texts(1), vec!["Plant A", "Plant B"]);

    let html = page.to_html();
    assert!(html.find("Plant A").unwrap() < html.find("Plant B").unwrap());
    assert!(html.contains(r#"data-col="1" data-asc="true""#));
}

#[tokio::test]
async fn test_declined_delete_sends_nothing() {
    let backend = MockBackend::start().await;
    let ctx = context(&backend, false);

    let deleted = views::sites::delete(&ctx, 4, "Plant D").await.unwrap();
    assert!(!deleted);
    assert!(backend.requests().is_empty());
    assert!(ctx.toasts.drain().is_empty());
}

#[tokio::test]
async fn test_confirmed_delete_reports_toast() {
    let backend = MockBackend::start().await;
    backend.route("DELETE", "/sites/4", Reply::empty(204));
    let ctx = context(&backend, true);

    assert!(views::sites::delete(&ctx, 4, "Plant D").await.unwrap());
    let toasts = ctx.toasts.drain();
    assert_eq!(toasts.len(), 1);
    assert_eq!(toasts[0].kind, ToastKind::Success);
}

#[tokio::test]
async fn test_failed_action_toasts_backend_detail() {
    let backend = MockBackend::start().await;
    backend.route(
        "POST",
        "/workorders",
        Reply::json(400, json!({"detail": "Unknown site"})),
    );
    let ctx = context(&backend, true);

    let err = views::work_orders::create(&ctx, WorkOrderInput::new(99, "Replace belt"))
        .await
        .unwrap_err();
    assert_eq!(err.message(), "Unknown site");

    let toasts = ctx.toasts.drain();
    assert_eq!(toasts[0].kind, ToastKind::Error);
    assert_eq!(toasts[0].message, "Unknown site");

    let body: serde_json::Value = serde_json::from_str(&backend.writes()[0].body).unwrap();
    assert_eq!(body["status"], "new");
    assert_eq!(body["type"], "corrective");
}

#[tokio::test]
async fn test_invalid_status_is_rejected_locally() {
    let backend = MockBackend::start().await;
    let ctx = context(&backend, true);

    assert!(views::work_orders::set_status(&ctx, 1, "exploded").await.is_err());
    assert!(backend.requests().is_empty());
    assert_eq!(ctx.toasts.drain()[0].kind, ToastKind::Error);
}

#[tokio::test]
async fn test_work_orders_show_site_names() {
    let backend = MockBackend::start().await;
    backend
        .route("GET", "/sites?page=1&page_size=100", sites_reply())
        .route(
            "GET",
            "/workorders",
            Reply::json(
                200,
                json!({"results": [
                    {"id": 7, "site_id": 2, "type": "corrective", "status": "new", "priority": "high",
                     "title": "Belt", "planned_date": null, "assigned_team": null,
                     "created_at": "2025-11-03T08:00:00"}
                ]}),
            ),
        );
    let ctx = context(&backend, true);

    let page = views::work_orders::page(&ctx).await.unwrap();
    let table = page.tables().next().unwrap();
    assert_eq!(table.column_texts(1), vec!["Plant A"]);
    assert_eq!(table.column_texts(5), vec!["—"]);
}

#[tokio::test]
async fn test_users_page_forbidden_renders_notice() {
    let backend = MockBackend::start().await;
    backend
        .route("GET", "/users", Reply::json(403, json!({"detail": "Forbidden"})))
        .route("GET", "/roles", Reply::json(200, json!({"results": []})));
    let ctx = context(&backend, true);

    let page = views::users::page(&ctx).await.unwrap();
    assert_eq!(page.tables().count(), 0);
    let notice = page.notices().next().unwrap();
    assert!(notice.ends_with("Forbidden"));
}

#[tokio::test]
async fn test_set_roles_sends_trimmed_list() {
    let backend = MockBackend::start().await;
    backend.route("PUT", "/users/5", Reply::json(200, json!({"ok": true})));
    let ctx = context(&backend, true);

    views::users::set_roles(&ctx, 5, " planner, ,viewer ").await.unwrap();
    let body: serde_json::Value = serde_json::from_str(&backend.writes()[0].body).unwrap();
    assert_eq!(body, json!({"roles": ["planner", "viewer"]}));
}

#[tokio::test]
async fn test_dashboard_charts() {
    let backend = MockBackend::start().await;
    backend
        .route(
            "GET",
            "/reports/work_orders_by_status",
            Reply::json(200, json!({"results": [{"status": "new", "count": 3}]})),
        )
        .route(
            "GET",
            "/reports/inventory_breakdown",
            Reply::json(200, json!({"ok": 8, "low": 2})),
        )
        .route(
            "GET",
            "/reports/top_products",
            Reply::json(200, json!({"results": [{"product_name": "Gearbox", "quantity": 120}]})),
        );
    let ctx = context(&backend, true);

    let page = views::dashboard::page(&ctx).await.unwrap();
    let charts: Vec<_> = page.charts().collect();
    assert_eq!(charts.len(), 3);
    assert_eq!(charts[1].points[0], ("OK".to_string(), 8.0));
    assert_eq!(charts[2].points[0], ("Gearbox".to_string(), 120.0));
}
