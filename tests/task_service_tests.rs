//! Service-layer tests for the authorization-aware task CRUD, run against a
//! throwaway SQLite database without going through HTTP.

use sea_orm::{ActiveModelTrait, Set};
use taskarr::api::types::{PageQuery, TaskRequest};
use taskarr::db::Store;
use taskarr::domain::TaskId;
use taskarr::entities::users;
use taskarr::services::{SeaOrmTaskService, TaskError, TaskService};

async fn test_store() -> Store {
    let db_path =
        std::env::temp_dir().join(format!("taskarr-svc-test-{}.db", uuid::Uuid::new_v4()));
    Store::new(&format!("sqlite:{}", db_path.display()))
        .await
        .expect("failed to open test store")
}

async fn seed_user(store: &Store, username: &str, role: users::Role) {
    let now = chrono::Utc::now().to_rfc3339();
    users::ActiveModel {
        username: Set(username.to_string()),
        password_hash: Set("unused".to_string()),
        role: Set(role),
        api_key: Set(format!("{username}-key")),
        created_at: Set(now.clone()),
        updated_at: Set(now),
        ..Default::default()
    }
    .insert(&store.conn)
    .await
    .expect("failed to seed user");
}

fn request(name: &str, description: &str, duration: i32) -> TaskRequest {
    TaskRequest {
        name: name.to_string(),
        description: description.to_string(),
        scheduled_date_time: None,
        duration_in_hour: duration,
    }
}

#[tokio::test]
async fn create_assigns_owner_and_fresh_id() {
    let store = test_store().await;
    let service = SeaOrmTaskService::new(store);

    let task = service
        .create_task("reader", &request("Write report", "Draft the quarterly report", 3))
        .await
        .unwrap();

    assert_eq!(task.owner_username, "reader");
    assert_eq!(task.duration_in_hour, 3);
    assert!(task.id.parse::<TaskId>().is_ok());
}

#[tokio::test]
async fn unknown_actor_is_an_integrity_fault() {
    let store = test_store().await;
    let service = SeaOrmTaskService::new(store);

    let err = service
        .create_task("ghost", &request("Task", "A long enough description", 2))
        .await
        .unwrap_err();

    assert!(matches!(err, TaskError::UserNotFound(name) if name == "ghost"));
}

#[tokio::test]
async fn non_owner_without_admin_is_forbidden() {
    let store = test_store().await;
    seed_user(&store, "guest", users::Role::Reader).await;
    let service = SeaOrmTaskService::new(store);

    let task = service
        .create_task("reader", &request("Task", "A long enough description", 2))
        .await
        .unwrap();
    let id: TaskId = task.id.parse().unwrap();

    assert!(matches!(
        service.get_task(id, "guest").await.unwrap_err(),
        TaskError::Forbidden
    ));
    assert!(matches!(
        service
            .update_task(id, "guest", &request("New", "Another long description", 2))
            .await
            .unwrap_err(),
        TaskError::Forbidden
    ));
    assert!(matches!(
        service.delete_task(id, "guest").await.unwrap_err(),
        TaskError::Forbidden
    ));

    // still intact for the owner
    assert!(service.get_task(id, "reader").await.is_ok());
}

#[tokio::test]
async fn admin_overrides_ownership_on_id_scoped_operations() {
    let store = test_store().await;
    let service = SeaOrmTaskService::new(store);

    let task = service
        .create_task("reader", &request("Task", "A long enough description", 2))
        .await
        .unwrap();
    let id: TaskId = task.id.parse().unwrap();

    assert!(service.get_task(id, "admin").await.is_ok());

    let updated = service
        .update_task(id, "admin", &request("Renamed", "Rewritten description here", 5))
        .await
        .unwrap();
    assert_eq!(updated.owner_username, "reader");
    assert_eq!(updated.duration_in_hour, 5);

    service.delete_task(id, "admin").await.unwrap();
    assert!(matches!(
        service.get_task(id, "reader").await.unwrap_err(),
        TaskError::NotFound(_)
    ));
}

#[tokio::test]
async fn update_round_trip_preserves_owner() {
    let store = test_store().await;
    let service = SeaOrmTaskService::new(store);

    let task = service
        .create_task("reader", &request("Before", "Original description here", 2))
        .await
        .unwrap();
    let id: TaskId = task.id.parse().unwrap();

    let mut req = request("After", "Replacement description", 4);
    req.scheduled_date_time = Some("2026-09-01T10:00:00+00:00".to_string());
    service.update_task(id, "reader", &req).await.unwrap();

    let fetched = service.get_task(id, "reader").await.unwrap();
    assert_eq!(fetched.name, "After");
    assert_eq!(fetched.description, "Replacement description");
    assert_eq!(fetched.duration_in_hour, 4);
    assert_eq!(
        fetched.scheduled_date_time.as_deref(),
        Some("2026-09-01T10:00:00+00:00")
    );
    assert_eq!(fetched.owner_username, "reader");
}

#[tokio::test]
async fn delete_is_terminal_and_repeat_delete_reports_not_found() {
    let store = test_store().await;
    let service = SeaOrmTaskService::new(store);

    let task = service
        .create_task("reader", &request("Task", "A long enough description", 2))
        .await
        .unwrap();
    let id: TaskId = task.id.parse().unwrap();

    service.delete_task(id, "reader").await.unwrap();

    assert!(matches!(
        service.get_task(id, "reader").await.unwrap_err(),
        TaskError::NotFound(_)
    ));
    assert!(matches!(
        service.delete_task(id, "reader").await.unwrap_err(),
        TaskError::NotFound(_)
    ));
}

#[tokio::test]
async fn listing_never_crosses_owners() {
    let store = test_store().await;
    let service = SeaOrmTaskService::new(store);

    for i in 0..4 {
        service
            .create_task(
                "reader",
                &request(&format!("Reader {i}"), "A long enough description", 2),
            )
            .await
            .unwrap();
    }
    service
        .create_task("admin", &request("Admin task", "A long enough description", 2))
        .await
        .unwrap();

    let reader_page = service
        .list_tasks("reader", PageQuery::default())
        .await
        .unwrap();
    assert_eq!(reader_page.total_items, 4);
    assert!(reader_page.items.iter().all(|t| t.owner_username == "reader"));

    // admin escalation does not apply to the listing
    let admin_page = service
        .list_tasks("admin", PageQuery::default())
        .await
        .unwrap();
    assert_eq!(admin_page.total_items, 1);
    assert!(admin_page.items.iter().all(|t| t.owner_username == "admin"));
}

#[tokio::test]
async fn pagination_totals_and_bounds() {
    let store = test_store().await;
    let service = SeaOrmTaskService::new(store);

    for i in 0..5 {
        service
            .create_task(
                "reader",
                &request(&format!("Task {i}"), "A long enough description", 2),
            )
            .await
            .unwrap();
    }

    let page = PageQuery { page: 0, page_size: 2 };
    let first = service.list_tasks("reader", page).await.unwrap();
    assert_eq!(first.items.len(), 2);
    assert_eq!(first.total_items, 5);
    assert_eq!(first.total_pages, 3);

    let last = service
        .list_tasks("reader", PageQuery { page: 2, page_size: 2 })
        .await
        .unwrap();
    assert_eq!(last.items.len(), 1);
}
