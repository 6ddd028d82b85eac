use chrono::{DateTime, Utc};
use ledger::{Amount, Collection, KeyValueStore, Ledger, MemoryStore, SqlStore};
use migration::MigratorTrait;
use sea_orm::Database;
use uuid::Uuid;

fn memory_ledger() -> Ledger<MemoryStore> {
    Ledger::new(MemoryStore::new())
}

fn amount(s: &str) -> Amount {
    s.parse().unwrap()
}

fn at(millis: i64) -> DateTime<Utc> {
    DateTime::from_timestamp_millis(millis).unwrap()
}

#[tokio::test]
async fn list_is_empty_when_nothing_stored() {
    let ledger = memory_ledger();

    assert!(ledger.list(Collection::Expenses).await.unwrap().is_empty());
    assert!(ledger.list(Collection::Incomes).await.unwrap().is_empty());
    assert!(ledger.transactions().await.unwrap().is_empty());
}

#[tokio::test]
async fn append_then_list_round_trips() {
    let mut ledger = memory_ledger();

    let coffee = ledger
        .append(Collection::Expenses, "Coffee", amount("3.50"), at(1_000))
        .await
        .unwrap();
    let rent = ledger
        .append(Collection::Expenses, "Rent", amount("800"), at(2_000))
        .await
        .unwrap();

    let records = ledger.list(Collection::Expenses).await.unwrap();
    assert_eq!(records, vec![coffee, rent]);
}

#[tokio::test]
async fn collections_are_disjoint() {
    let mut ledger = memory_ledger();

    ledger
        .append(Collection::Expenses, "Coffee", amount("3.50"), at(1_000))
        .await
        .unwrap();

    assert_eq!(ledger.list(Collection::Expenses).await.unwrap().len(), 1);
    assert!(ledger.list(Collection::Incomes).await.unwrap().is_empty());
}

#[tokio::test]
async fn delete_removes_only_the_matching_record() {
    let mut ledger = memory_ledger();

    let coffee = ledger
        .append(Collection::Expenses, "Coffee", amount("3.50"), at(1_000))
        .await
        .unwrap();
    let rent = ledger
        .append(Collection::Expenses, "Rent", amount("800"), at(2_000))
        .await
        .unwrap();

    ledger.delete(Collection::Expenses, coffee.id).await.unwrap();

    let records = ledger.list(Collection::Expenses).await.unwrap();
    assert_eq!(records, vec![rent]);
}

#[tokio::test]
async fn delete_of_unknown_id_is_a_noop() {
    let mut ledger = memory_ledger();

    let coffee = ledger
        .append(Collection::Expenses, "Coffee", amount("3.50"), at(1_000))
        .await
        .unwrap();

    ledger
        .delete(Collection::Expenses, Uuid::new_v4())
        .await
        .unwrap();

    assert_eq!(ledger.list(Collection::Expenses).await.unwrap(), vec![coffee]);

    // Also fine on a collection that was never written.
    ledger
        .delete(Collection::Incomes, Uuid::new_v4())
        .await
        .unwrap();
    assert!(ledger.list(Collection::Incomes).await.unwrap().is_empty());
}

#[tokio::test]
async fn merge_tags_every_record_and_keeps_the_lengths() {
    let mut ledger = memory_ledger();

    for (name, millis) in [("Coffee", 1_000), ("Rent", 4_000), ("Bus", 2_000)] {
        ledger
            .append(Collection::Expenses, name, amount("5"), at(millis))
            .await
            .unwrap();
    }
    for (name, millis) in [("Salary", 3_000), ("Refund", 5_000)] {
        ledger
            .append(Collection::Incomes, name, amount("10"), at(millis))
            .await
            .unwrap();
    }

    let transactions = ledger.transactions().await.unwrap();
    assert_eq!(transactions.len(), 5);

    let expenses = transactions
        .iter()
        .filter(|t| t.collection == Collection::Expenses)
        .count();
    let incomes = transactions
        .iter()
        .filter(|t| t.collection == Collection::Incomes)
        .count();
    assert_eq!(expenses, 3);
    assert_eq!(incomes, 2);

    for pair in transactions.windows(2) {
        assert!(pair[0].record.created_time >= pair[1].record.created_time);
    }
}

#[tokio::test]
async fn coffee_then_salary_lists_salary_first() {
    let mut ledger = memory_ledger();

    ledger
        .append(Collection::Expenses, "Coffee", amount("3.50"), at(1_000))
        .await
        .unwrap();
    ledger
        .append(Collection::Incomes, "Salary", amount("1000"), at(2_000))
        .await
        .unwrap();

    let transactions = ledger.transactions().await.unwrap();
    assert_eq!(transactions.len(), 2);
    assert_eq!(transactions[0].record.name, "Salary");
    assert_eq!(transactions[0].collection, Collection::Incomes);
    assert_eq!(transactions[0].signed_cents(), 100_000);
    assert_eq!(transactions[1].record.name, "Coffee");
    assert_eq!(transactions[1].signed_cents(), -350);
}

#[tokio::test]
async fn corrupt_state_yields_an_empty_list() {
    let mut store = MemoryStore::new();
    store.set("expenses", "definitely not json").await.unwrap();

    let mut ledger = Ledger::new(store);
    assert!(ledger.list(Collection::Expenses).await.unwrap().is_empty());

    // The next write replaces the corrupt value.
    let coffee = ledger
        .append(Collection::Expenses, "Coffee", amount("3.50"), at(1_000))
        .await
        .unwrap();
    assert_eq!(ledger.list(Collection::Expenses).await.unwrap(), vec![coffee]);
}

#[tokio::test]
async fn total_sums_the_collection() {
    let mut ledger = memory_ledger();

    assert_eq!(ledger.total(Collection::Expenses).await.unwrap(), Amount::ZERO);

    ledger
        .append(Collection::Expenses, "Coffee", amount("3.50"), at(1_000))
        .await
        .unwrap();
    ledger
        .append(Collection::Expenses, "Bus", amount("1.25"), at(2_000))
        .await
        .unwrap();

    let total = ledger.total(Collection::Expenses).await.unwrap();
    assert_eq!(total.to_string(), "4.75");
    assert_eq!(ledger.total(Collection::Incomes).await.unwrap(), Amount::ZERO);
}

async fn sql_ledger_at(url: &str) -> Ledger<SqlStore> {
    let db = Database::connect(url).await.unwrap();
    migration::Migrator::up(&db, None).await.unwrap();
    Ledger::new(SqlStore::new(db))
}

#[tokio::test]
async fn sql_store_persists_across_connections() {
    let root =
        std::path::PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../../target/test_dbs");
    std::fs::create_dir_all(&root).unwrap();
    let path = root.join(format!("ledger_{}.db", Uuid::new_v4()));
    let url = format!("sqlite:{}?mode=rwc", path.display());

    let (coffee, salary) = {
        let mut ledger = sql_ledger_at(&url).await;
        let coffee = ledger
            .append(Collection::Expenses, "Coffee", amount("3.50"), at(1_000))
            .await
            .unwrap();
        let salary = ledger
            .append(Collection::Incomes, "Salary", amount("1000"), at(2_000))
            .await
            .unwrap();
        (coffee, salary)
    };

    let mut ledger = sql_ledger_at(&url).await;
    assert_eq!(ledger.list(Collection::Expenses).await.unwrap(), vec![coffee.clone()]);
    assert_eq!(ledger.list(Collection::Incomes).await.unwrap(), vec![salary]);

    ledger.delete(Collection::Expenses, coffee.id).await.unwrap();
    assert!(ledger.list(Collection::Expenses).await.unwrap().is_empty());

    std::fs::remove_file(&path).ok();
}

#[tokio::test]
async fn sql_store_works_in_memory() {
    let mut ledger = sql_ledger_at("sqlite::memory:").await;

    let coffee = ledger
        .append(Collection::Expenses, "Coffee", amount("3.50"), at(1_000))
        .await
        .unwrap();
    assert_eq!(ledger.list(Collection::Expenses).await.unwrap(), vec![coffee]);
}
