//! End-to-end dashboard flows over the in-memory task gateway.

use super::helpers::{coordinator, server, titles};
use rstest::rstest;
use taskdeck::gateway::GatewayError;
use taskdeck::notification::Severity;
use taskdeck::task::{
    adapters::memory::{InMemoryTaskGateway, TaskOperation},
    domain::{SortKey, TaskDraft, TaskFilter, TaskId, TaskPatch, TaskPriority, TaskStatus},
    services::LoadStatus,
};

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn loaded_board_projects_and_summarises(server: InMemoryTaskGateway) {
    let dashboard = coordinator(&server);
    dashboard.load_tasks().await.expect("load should succeed");
    let store = dashboard.store();

    store.set_filter(TaskFilter::new().with_status(TaskStatus::Pending));
    store.set_sort(SortKey::Priority);

    assert_eq!(store.load_status(), LoadStatus::Succeeded);
    assert_eq!(titles(&store.visible()), vec!["File taxes", "Buy milk"]);
    let stats = store.stats();
    assert_eq!(
        (stats.total, stats.pending, stats.in_progress, stats.completed),
        (4, 2, 1, 1)
    );
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn edits_reach_the_view_without_reloading(server: InMemoryTaskGateway) {
    let dashboard = coordinator(&server);
    dashboard.load_tasks().await.expect("load should succeed");
    let store = dashboard.store();
    store.set_sort(SortKey::Title);

    dashboard
        .create(&TaskDraft::new("Call plumber").with_priority(TaskPriority::High))
        .await
        .expect("create should succeed");
    dashboard
        .update(
            &TaskId::new("43").expect("valid id"),
            &TaskPatch::new().with_title("Board meeting"),
        )
        .await
        .expect("update should succeed");
    dashboard
        .remove(&TaskId::new("44").expect("valid id"))
        .await
        .expect("delete should succeed");

    assert_eq!(
        titles(&store.visible()),
        vec!["Board meeting", "Buy milk", "Call plumber", "File taxes"]
    );
    assert_eq!(server.call_count(TaskOperation::List), 1);
    assert_eq!(
        titles(&store.snapshot()),
        titles(&server.tasks().expect("server tasks readable"))
    );
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn every_outcome_is_announced(server: InMemoryTaskGateway) {
    let dashboard = coordinator(&server);
    dashboard.load_tasks().await.expect("load should succeed");
    server
        .fail_next(
            TaskOperation::Update,
            GatewayError::from_response(500, br#"{"message":"database unavailable"}"#),
        )
        .expect("failure queued");
    let gym = dashboard
        .store()
        .get(&TaskId::new("44").expect("valid id"))
        .expect("gym is listed");

    let failed = dashboard.toggle_status(&gym).await;
    let retried = dashboard.toggle_status(&gym).await;

    assert!(failed.is_err());
    assert_eq!(
        retried.expect("retry should succeed").status(),
        TaskStatus::Pending
    );
    let notices: Vec<(Severity, String)> = dashboard
        .notifications()
        .active()
        .into_iter()
        .map(|notice| (notice.severity(), notice.message().to_owned()))
        .collect();
    assert_eq!(
        notices,
        vec![
            (Severity::Error, "database unavailable".to_owned()),
            (Severity::Success, "Task updated successfully".to_owned()),
        ]
    );
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn failed_reload_keeps_the_board(server: InMemoryTaskGateway) {
    let dashboard = coordinator(&server);
    dashboard.load_tasks().await.expect("load should succeed");
    server
        .fail_next(TaskOperation::List, GatewayError::Transport("offline".to_owned()))
        .expect("failure queued");

    dashboard
        .load_tasks()
        .await
        .expect_err("reload should fail");

    assert_eq!(dashboard.store().len(), 4);
    assert_eq!(
        dashboard.store().load_status(),
        LoadStatus::Failed("offline".to_owned())
    );
}
