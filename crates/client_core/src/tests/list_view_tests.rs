use std::sync::atomic::Ordering;

use super::*;
use crate::{
    navigation::RouteHistory,
    notifications::NotificationKind,
    service::mock::MockProductService,
    test_support::{arc, laptop_only, FaultyService, RecordingNotifier, ScriptedDialog},
};
use shared::domain::ProductId;

struct Harness {
    view: ProductListView,
    service: Arc<FaultyService>,
    history: Arc<RouteHistory>,
    dialog: Arc<ScriptedDialog>,
    notifier: Arc<RecordingNotifier>,
}

fn harness(store: MockProductService, confirm: bool) -> Harness {
    let service = arc(FaultyService::wrapping(store));
    let history = arc(RouteHistory::default());
    let dialog = arc(ScriptedDialog::answering(confirm));
    let notifier = arc(RecordingNotifier::default());
    let view = ProductListView::new(
        service.clone(),
        history.clone(),
        dialog.clone(),
        notifier.clone(),
    );
    Harness {
        view,
        service,
        history,
        dialog,
        notifier,
    }
}

#[tokio::test]
async fn activation_displays_loaded_rows() {
    let mut h = harness(laptop_only(), true);
    assert!(h.view.activate().await);

    assert_eq!(h.view.rows().len(), 1);
    assert_eq!(h.view.rows()[0].name, "Laptop");
    assert!(h.notifier.all().is_empty());
}

#[tokio::test]
async fn failed_load_keeps_previous_rows_and_notifies() {
    let mut h = harness(MockProductService::seeded(), true);
    h.view.load().await;
    assert_eq!(h.view.rows().len(), 3);

    h.service.fail_list.store(true, Ordering::SeqCst);
    assert!(!h.view.load().await);

    assert_eq!(h.view.rows().len(), 3);
    let note = h.notifier.last().expect("notification");
    assert_eq!(note.kind, NotificationKind::Error);
    assert_eq!(note.message, "Failed to load the product list");
}

#[tokio::test]
async fn failed_first_load_leaves_table_empty() {
    let mut h = harness(MockProductService::seeded(), true);
    h.service.fail_list.store(true, Ordering::SeqCst);
    h.view.activate().await;
    assert!(h.view.rows().is_empty());
}

#[tokio::test]
async fn confirmed_delete_reloads_without_the_row() {
    let mut h = harness(laptop_only(), true);
    h.view.activate().await;
    let laptop = h.view.rows()[0].clone();

    assert_eq!(h.view.delete(&laptop).await, DeleteOutcome::Deleted);

    assert!(h.view.rows().iter().all(|p| p.id != Some(ProductId(1))));
    let asked = h.dialog.asked();
    assert_eq!(asked.len(), 1);
    assert!(asked[0].message.contains("\"Laptop\""));
    assert_eq!(asked[0].ok_label, "Delete");
    assert_eq!(asked[0].ok_color, Some(ButtonColor::Warn));
    assert_eq!(
        h.notifier.last().map(|n| n.message),
        Some("Product deleted successfully".to_string())
    );
}

#[tokio::test]
async fn cancelled_delete_changes_nothing() {
    let mut h = harness(laptop_only(), false);
    h.view.activate().await;
    let laptop = h.view.rows()[0].clone();

    assert_eq!(h.view.delete(&laptop).await, DeleteOutcome::Cancelled);

    assert_eq!(h.view.rows().len(), 1);
    assert_eq!(h.service.list_all().await.expect("list").len(), 1);
    assert!(h.notifier.all().is_empty());
}

#[tokio::test]
async fn failed_delete_keeps_stale_rows() {
    let mut h = harness(laptop_only(), true);
    h.view.activate().await;
    let laptop = h.view.rows()[0].clone();
    h.service.fail_delete.store(true, Ordering::SeqCst);

    assert_eq!(h.view.delete(&laptop).await, DeleteOutcome::Failed);

    assert_eq!(h.view.rows().len(), 1);
    let note = h.notifier.last().expect("notification");
    assert!(note.is_error());
    assert_eq!(note.message, "Failed to delete the product");
}

#[tokio::test]
async fn unsaved_row_is_not_deleted() {
    let mut h = harness(laptop_only(), true);
    let draft = Product::new("Draft", "Never saved", 1.0, 1);
    assert_eq!(h.view.delete(&draft).await, DeleteOutcome::Skipped);
    assert!(h.dialog.asked().is_empty());
    assert!(h.notifier.all().is_empty());
}

#[tokio::test]
async fn edit_and_create_navigate() {
    let mut h = harness(laptop_only(), true);
    h.view.activate().await;
    let laptop = h.view.rows()[0].clone();

    h.view.edit(&laptop);
    assert_eq!(h.history.current(), Route::EditProduct(ProductId(1)));
    h.view.create();
    assert_eq!(h.history.current(), Route::NewProduct);
}

#[tokio::test]
async fn sorting_survives_reload() {
    let mut h = harness(MockProductService::seeded(), true);
    h.view.activate().await;
    h.view.sort_by(SortKey::Price, SortDirection::Ascending);
    let prices: Vec<f64> = h.view.rows().iter().map(|p| p.price).collect();
    assert_eq!(prices, vec![35.0, 80.0, 1200.0]);

    h.view.sort_by(SortKey::Quantity, SortDirection::Descending);
    h.view.load().await;
    let quantities: Vec<i64> = h.view.rows().iter().map(|p| p.quantity).collect();
    assert_eq!(quantities, vec![20, 15, 5]);
}

#[test]
fn table_columns_end_with_actions() {
    assert_eq!(DISPLAYED_COLUMNS.last(), Some(&"actions"));
}
