use std::time::Duration;

use nebula_tasks::api::create_router;
use nebula_tasks::client::{ClientError, TaskClient};
use nebula_tasks::db::Database;
use nebula_tasks::ui::{RowState, TaskListController, ViewMode};

/// Serve an API over a real socket; returns the client-facing base URL.
async fn spawn_api(db: Database) -> String {
    let app = create_router(db);
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind test listener");
    let addr = listener.local_addr().expect("Failed to read local addr");
    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("Server crashed");
    });
    format!("http://{}/api", addr)
}

async fn serve(db: Database) -> TaskClient {
    TaskClient::new(spawn_api(db).await)
}

async fn spawn_server() -> TaskClient {
    let db = Database::open_memory().expect("Failed to create in-memory database");
    db.migrate().expect("Failed to run migrations");
    serve(db).await
}

/// Controller with the exit transition shortened so tests stay fast.
fn controller(client: TaskClient) -> TaskListController {
    TaskListController::new(client).with_exit_transition(Duration::from_millis(10))
}

mod initial_load {
    use super::*;

    #[tokio::test]
    async fn empty_store_settles_into_the_empty_placeholder() {
        let ui = controller(spawn_server().await);
        assert_eq!(ui.state().view(), ViewMode::Loading);

        ui.refresh().await;

        assert_eq!(ui.state().view(), ViewMode::Empty);
        assert!(ui.state().error().is_none());
    }

    #[tokio::test]
    async fn unreachable_server_surfaces_a_banner_and_stops_loading() {
        // Port 1 is never listening.
        let ui = controller(TaskClient::new("http://127.0.0.1:1/api"));

        ui.refresh().await;

        let state = ui.state();
        assert_eq!(state.view(), ViewMode::Empty);
        assert!(state
            .error()
            .is_some_and(|e| e.starts_with("Failed to fetch tasks:")));
    }
}

mod adding {
    use super::*;

    #[tokio::test]
    async fn added_task_appears_with_store_assigned_fields() {
        let ui = controller(spawn_server().await);
        ui.refresh().await;

        ui.add_task("  Buy milk  ").await;

        let state = ui.state();
        assert_eq!(state.view(), ViewMode::List);
        assert_eq!(state.tasks().len(), 1);
        assert_eq!(state.tasks()[0].text, "Buy milk");
        assert!(state.tasks()[0].id > 0);
    }

    #[tokio::test]
    async fn whitespace_only_input_is_dropped_without_a_request() {
        let client = spawn_server().await;
        let ui = controller(client.clone());
        ui.refresh().await;

        ui.add_task("   ").await;

        let state = ui.state();
        assert_eq!(state.view(), ViewMode::Empty);
        assert!(state.error().is_none());

        let stored = client.list().await.expect("Failed to list tasks");
        assert!(stored.is_empty());
    }
}

mod editing {
    use super::*;

    #[tokio::test]
    async fn saved_edit_persists_the_new_text() {
        let ui = controller(spawn_server().await);
        ui.refresh().await;
        ui.add_task("Old text").await;
        let id = ui.state().tasks()[0].id;

        assert!(ui.begin_edit(id));
        ui.set_draft("New text");
        ui.save_edit().await;

        let state = ui.state();
        assert_eq!(state.row_state(id), RowState::Viewing);
        assert_eq!(state.tasks().len(), 1);
        assert_eq!(state.tasks()[0].id, id);
        assert_eq!(state.tasks()[0].text, "New text");
    }

    #[tokio::test]
    async fn failed_save_keeps_the_draft_on_screen() {
        let client = spawn_server().await;
        let ui = controller(client.clone());
        ui.refresh().await;
        ui.add_task("Editable").await;
        let id = ui.state().tasks()[0].id;

        assert!(ui.begin_edit(id));
        ui.set_draft("Typed but not saved");

        // The task vanishes server-side while the draft is open.
        client.delete(id).await.expect("Failed to delete task");
        ui.save_edit().await;

        let state = ui.state();
        assert!(state
            .error()
            .is_some_and(|e| e.starts_with("Failed to update task:")));
        let draft = state.editing().expect("Draft should survive the failure");
        assert_eq!(draft.id, id);
        assert_eq!(draft.text, "Typed but not saved");
    }
}

mod deleting {
    use super::*;

    #[tokio::test]
    async fn deleted_row_leaves_after_the_exit_transition() {
        let client = spawn_server().await;
        let ui = controller(client.clone());
        ui.refresh().await;
        ui.add_task("Doomed").await;
        let id = ui.state().tasks()[0].id;

        ui.delete_task(id).await;

        let state = ui.state();
        assert_eq!(state.view(), ViewMode::Empty);
        assert!(!state.is_deleting(id));
        assert!(state.error().is_none());

        let stored = client.list().await.expect("Failed to list tasks");
        assert!(stored.is_empty());
    }

    #[tokio::test]
    async fn concurrent_deletes_of_different_rows_both_complete() {
        let ui = controller(spawn_server().await);
        ui.refresh().await;
        ui.add_task("First").await;
        ui.add_task("Second").await;
        let ids: Vec<i64> = ui.state().tasks().iter().map(|t| t.id).collect();

        tokio::join!(ui.delete_task(ids[0]), ui.delete_task(ids[1]));

        let state = ui.state();
        assert_eq!(state.view(), ViewMode::Empty);
        assert!(state.error().is_none());
    }

    #[tokio::test]
    async fn second_delete_of_the_same_row_is_ignored() {
        let ui = controller(spawn_server().await);
        ui.refresh().await;
        ui.add_task("Once only").await;
        let id = ui.state().tasks()[0].id;

        // Were the second call to reach the server it would get a 404 and
        // surface a banner; the guard drops it before any request is made.
        tokio::join!(ui.delete_task(id), ui.delete_task(id));

        let state = ui.state();
        assert_eq!(state.view(), ViewMode::Empty);
        assert!(state.error().is_none());
    }

    #[tokio::test]
    async fn failed_delete_reverts_the_row() {
        let ui = controller(spawn_server().await);
        ui.refresh().await;
        ui.add_task("Still here").await;

        ui.delete_task(42).await;

        let state = ui.state();
        assert!(state
            .error()
            .is_some_and(|e| e.starts_with("Failed to delete task:")));
        assert!(!state.is_deleting(42));
        assert_eq!(state.tasks().len(), 1);
        assert_eq!(state.tasks()[0].text, "Still here");
    }
}

mod error_banner {
    use super::*;

    #[tokio::test]
    async fn refreshing_clears_the_banner() {
        let ui = controller(spawn_server().await);
        ui.refresh().await;

        ui.delete_task(42).await;
        assert!(ui.state().error().is_some());

        ui.refresh().await;
        assert!(ui.state().error().is_none());
    }

    #[tokio::test]
    async fn dismissing_clears_the_banner_without_a_refetch() {
        let ui = controller(spawn_server().await);
        ui.refresh().await;
        ui.add_task("Keep me").await;

        ui.delete_task(42).await;
        assert!(ui.state().error().is_some());

        ui.dismiss_error();

        let state = ui.state();
        assert!(state.error().is_none());
        assert_eq!(state.tasks().len(), 1);
    }
}

mod client_errors {
    use super::*;

    #[tokio::test]
    async fn updating_a_missing_task_is_not_found() {
        let client = spawn_server().await;

        let err = client
            .update(999, "anything")
            .await
            .expect_err("Update should fail");

        match err {
            ClientError::NotFound(message) => assert_eq!(message, "Task not found."),
            other => panic!("Expected NotFound, got: {:?}", other),
        }
    }

    #[tokio::test]
    async fn creating_a_blank_task_is_a_bad_request() {
        let client = spawn_server().await;

        let err = client.create("   ").await.expect_err("Create should fail");

        match err {
            ClientError::BadRequest(message) => {
                assert_eq!(message, "Task text is required and cannot be empty.")
            }
            other => panic!("Expected BadRequest, got: {:?}", other),
        }
    }

    #[tokio::test]
    async fn unreachable_server_is_a_transport_error() {
        let client = TaskClient::new("http://127.0.0.1:1/api");

        let err = client.list().await.expect_err("List should fail");

        assert!(matches!(err, ClientError::Http(_)));
    }

    #[tokio::test]
    async fn store_failure_is_a_server_error() {
        let temp_dir = tempfile::tempdir().expect("Failed to create temp dir");
        let db_path = temp_dir.path().join("tasks.db");
        let db = Database::open(db_path.clone()).expect("Failed to open database");
        db.migrate().expect("Failed to run migrations");
        let client = serve(db).await;

        // Pull the table out from under the running server.
        let raw = rusqlite::Connection::open(&db_path).expect("Failed to open raw connection");
        raw.execute_batch("DROP TABLE tasks")
            .expect("Failed to drop table");

        let err = client.list().await.expect_err("List should fail");

        // The 500 body has no message field, so the raw envelope comes through.
        match err {
            ClientError::Server(message) => {
                assert!(message.starts_with("500"), "unexpected message: {message}");
                assert!(message.contains("Failed to fetch tasks from database"));
            }
            other => panic!("Expected Server, got: {:?}", other),
        }
    }
}

mod health_check {
    use super::*;

    #[tokio::test]
    async fn succeeds_against_a_live_server() {
        let client = spawn_server().await;

        client.health().await.expect("Health check failed");
    }

    #[tokio::test]
    async fn from_env_url_points_the_client_at_the_server() {
        let db = Database::open_memory().expect("Failed to open database");
        db.migrate().expect("Failed to run migrations");
        let url = spawn_api(db).await;

        // No other test touches this variable, so there is no cross-test race.
        std::env::set_var("NEBULA_TASKS_URL", &url);
        let client = TaskClient::from_env();
        std::env::remove_var("NEBULA_TASKS_URL");

        client.health().await.expect("Health check failed");
    }
}

mod persistence {
    use super::*;

    #[tokio::test]
    async fn tasks_survive_a_server_restart() {
        let temp_dir = tempfile::tempdir().expect("Failed to create temp dir");
        let db_path = temp_dir.path().join("data").join("tasks.db");

        let db = Database::open(db_path.clone()).expect("Failed to open database");
        db.migrate().expect("Failed to run migrations");
        let client = serve(db).await;
        client
            .create("Persist me")
            .await
            .expect("Failed to create task");

        // A fresh server over the same file sees the task.
        let db = Database::open(db_path).expect("Failed to reopen database");
        db.migrate().expect("Failed to run migrations");
        let client = serve(db).await;

        let tasks = client.list().await.expect("Failed to list tasks");
        assert_eq!(tasks.len(), 1);
        assert_eq!(tasks[0].text, "Persist me");
    }
}
