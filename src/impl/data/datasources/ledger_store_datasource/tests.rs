use super::*;
use crate::data::models::transaction_entry_model::TransactionEntryModel;
use crate::domain::logic::testkit::{accrual_entry, m, s};
use crate::entities::ComponentType;
use crate::impl_ext::standard_accounts::standard_directory;

fn model(id: u64, amount: f64) -> TransactionEntryModel {
    let alice = s("alice");
    let entry = accrual_entry(id, &alice, m(2024, 6), ComponentType::Rent, amount);
    TransactionEntryModel::from_domain(&entry, &standard_directory())
}

#[tokio::test]
async fn append_assigns_sequential_ids() {
    let store = LedgerMemoryDatasource::new();
    let stored = store
        .append_entries(vec![model(0, 160.0), model(0, 20.0)])
        .await
        .unwrap();
    assert_eq!(stored[0].transaction_id, "txn-000001");
    assert_eq!(stored[1].transaction_id, "txn-000002");

    let stored = store.append_entries(vec![model(0, 5.0)]).await.unwrap();
    assert_eq!(stored[0].transaction_id, "txn-000003");
    assert_eq!(store.all_entries().await.unwrap().len(), 3);
}

#[tokio::test]
async fn a_bad_entry_fails_the_whole_batch() {
    let store = LedgerMemoryDatasource::new();
    let mut broken = model(0, 160.0);
    broken.entries.truncate(1); // one leg missing

    let result = store
        .append_entries(vec![model(0, 20.0), broken])
        .await;
    assert!(result.is_err());
    // All-or-nothing: the valid sibling must not have landed either.
    assert!(store.all_entries().await.unwrap().is_empty());
}

#[tokio::test]
async fn imbalanced_entry_is_rejected_at_write_time() {
    let store = LedgerMemoryDatasource::new();
    let mut imbalanced = model(0, 160.0);
    imbalanced.entries[1].credit = 100.0;
    assert!(store.append_entries(vec![imbalanced]).await.is_err());
    assert!(store.all_entries().await.unwrap().is_empty());
}

#[tokio::test]
async fn payment_documents_round_through() {
    use crate::data::models::payment_document_model::PaymentDocumentModel;
    use crate::entities::{PaymentComponent, PaymentStatus};

    let store = LedgerMemoryDatasource::new();
    assert!(!store.payment_exists("p1").await.unwrap());

    let alice = s("alice");
    let payment = crate::domain::logic::testkit::payment(
        "p1",
        &alice,
        crate::domain::logic::testkit::d(2024, 6, 5),
        vec![PaymentComponent::Rent(160.0)],
    );
    store
        .upsert_payment(PaymentDocumentModel::from_domain(
            &payment,
            PaymentStatus::Allocated,
        ))
        .await
        .unwrap();
    assert!(store.payment_exists("p1").await.unwrap());
}

#[tokio::test]
async fn snapshot_round_trips_through_a_file() {
    let store = LedgerMemoryDatasource::new();
    store.append_entries(vec![model(0, 160.0)]).await.unwrap();

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("ledger.json");
    store.save_snapshot(&path).await.unwrap();

    let restored = LedgerMemoryDatasource::new();
    restored.load_snapshot(&path).await.unwrap();
    let entries = restored.all_entries().await.unwrap();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].transaction_id, "txn-000001");

    // The sequence continues past the restored entries.
    let next = restored.append_entries(vec![model(0, 20.0)]).await.unwrap();
    assert_eq!(next[0].transaction_id, "txn-000002");
}

#[tokio::test]
async fn corrupt_snapshot_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("ledger.json");
    tokio::fs::write(&path, b"{\"entries\": 42}").await.unwrap();

    let store = LedgerMemoryDatasource::new();
    assert!(store.load_snapshot(&path).await.is_err());
}
