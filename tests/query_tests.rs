mod common;

use common::*;
use employees_db::index_advisor::{GENDER_LOWER_SURNAME_INDEX, GENDER_SURNAME_INDEX};
use employees_db::{
    BatchLoader, BenchmarkComparison, EmployeeStore, Gender, IndexAdvisor, IndexStatus,
    NameCatalog, QueryEngine, QueryPredicate,
};

async fn loaded_store(total: u64, special: u64) -> employees_db::InMemoryStore {
    let catalog = NameCatalog::default();
    let mut store = fresh_store();
    BatchLoader::new(1_000)
        .unwrap()
        .load(&mut store, bulk_records(&catalog, total, special), |_| {})
        .await
        .unwrap();
    store
}

#[tokio::test]
async fn test_benchmark_finds_special_subset() {
    let mut store = loaded_store(3_000, 100).await;
    let predicate = QueryPredicate::default();

    let report = QueryEngine::new(20).run(&mut store, &predicate).await.unwrap();

    assert!(report.total_matches >= 100);
    assert_eq!(report.preview.len(), 20);
    assert!(report.preview_matches());

    let expected = store.rows().iter().filter(|e| predicate.matches(e)).count() as u64;
    assert_eq!(report.total_matches, expected);
}

#[tokio::test]
async fn test_preview_is_ordered_by_surname() {
    let mut store = loaded_store(1_000, 100).await;
    let report = QueryEngine::new(500)
        .run(&mut store, &QueryPredicate::default())
        .await
        .unwrap();

    assert!(report.preview.windows(2).all(|w| w[0].surname <= w[1].surname));
    assert!(report.preview.iter().all(|e| e.gender == "Male" && e.surname.starts_with('F')));
}

#[tokio::test]
async fn test_zero_preview_still_counts() {
    let mut store = loaded_store(500, 100).await;
    let report = QueryEngine::new(0)
        .run(&mut store, &QueryPredicate::default())
        .await
        .unwrap();
    assert!(report.preview.is_empty());
    assert!(report.total_matches >= 100);
}

#[tokio::test]
async fn test_empty_table_has_no_matches() {
    let mut store = fresh_store();
    let report = QueryEngine::default()
        .run(&mut store, &QueryPredicate::new(Gender::Female, "Z"))
        .await
        .unwrap();
    assert_eq!(report.total_matches, 0);
    assert!(report.preview.is_empty());
}

#[tokio::test]
async fn test_indexes_applied_twice_without_duplicates() {
    let mut store = fresh_store();
    let advisor = IndexAdvisor::default();

    let first = advisor.apply(&mut store).await;
    assert!(first.iter().all(|o| o.status == IndexStatus::Created));

    let second = advisor.apply(&mut store).await;
    assert!(second.iter().all(|o| o.status == IndexStatus::AlreadyExists));
    assert!(IndexAdvisor::all_succeeded(&second));

    assert_eq!(
        store.index_names().await.unwrap(),
        vec![GENDER_LOWER_SURNAME_INDEX.to_string(), GENDER_SURNAME_INDEX.to_string()]
    );
}

#[tokio::test]
async fn test_failed_index_does_not_block_the_next() {
    let mut store = fresh_store();
    store.fail_index(GENDER_SURNAME_INDEX);

    let outcomes = IndexAdvisor::default().apply(&mut store).await;

    assert_eq!(outcomes.len(), 2);
    assert_eq!(outcomes[0].name, GENDER_SURNAME_INDEX);
    assert!(matches!(outcomes[0].status, IndexStatus::Failed(_)));
    assert_eq!(outcomes[1].status, IndexStatus::Created);
    assert!(!IndexAdvisor::all_succeeded(&outcomes));
    assert_eq!(
        store.index_names().await.unwrap(),
        vec![GENDER_LOWER_SURNAME_INDEX.to_string()]
    );
}

#[tokio::test]
async fn test_indexes_do_not_change_results() {
    let mut store = loaded_store(2_000, 100).await;
    let engine = QueryEngine::new(20);
    let predicate = QueryPredicate::default();

    let before = engine.run(&mut store, &predicate).await.unwrap();
    IndexAdvisor::default().apply(&mut store).await;
    let after = engine.run(&mut store, &predicate).await.unwrap();

    let comparison = BenchmarkComparison { before, after };
    assert!(comparison.same_result());
    assert!(comparison.speedup() > 0.0);
    assert_eq!(comparison.before.preview, comparison.after.preview);
}
