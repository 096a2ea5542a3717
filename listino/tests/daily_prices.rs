mod helpers;

use std::sync::Arc;
use std::time::Duration;

use helpers::{U1, U2, day, prices};
use listino::{Catalog, Finish, Listino, ListinoError};
use listino_core::AllPrintingsFile;
use listino_mock::{DynamicMockProvider, MockBehavior, MockMode, MockProvider};

#[tokio::test]
async fn merges_prices_from_every_provider() {
    let (a, ca) = DynamicMockProvider::new_with_controller("alpha");
    let (b, cb) = DynamicMockProvider::new_with_controller("beta");
    ca.set_behavior(MockBehavior::Return(prices(
        "alpha",
        &[(U1, Finish::NonFoil, 100), (U1, Finish::Foil, 300)],
    )))
    .await;
    cb.set_behavior(MockBehavior::Return(prices(
        "beta",
        &[(U1, Finish::NonFoil, 120), (U2, Finish::NonFoil, 50)],
    )))
    .await;

    let listino = Listino::builder()
        .with_provider(a)
        .with_provider(b)
        .date(day())
        .build()
        .unwrap();
    let report = listino.today_prices(&Catalog::default()).await.unwrap();

    assert_eq!(report.date, Some(day()));
    assert!(report.failures.is_empty());
    assert_eq!(report.card_count(), 2);
    assert_eq!(report.prices[U1].len(), 2);
    assert!(report.get(U1, "alpha", Finish::Foil).is_some());
    assert!(report.get(U1, "beta", Finish::Foil).is_none());
    assert_eq!(report.get(U2, "beta", Finish::NonFoil).unwrap().provider(), "beta");

    assert_eq!(ca.calls().await, vec![(0, day())]);
    assert_eq!(cb.calls().await, vec![(0, day())]);
}

#[tokio::test]
async fn one_failing_provider_does_not_hide_the_others() {
    let (ok, c_ok) = DynamicMockProvider::new_with_controller("ok");
    let (bad, c_bad) = DynamicMockProvider::new_with_controller("bad");
    c_ok.set_behavior(MockBehavior::Return(prices("ok", &[(U1, Finish::NonFoil, 99)])))
        .await;
    c_bad
        .set_behavior(MockBehavior::Fail(ListinoError::transport(
            "https://bad.test",
            "connection reset",
        )))
        .await;

    let listino = Listino::builder()
        .with_provider(bad)
        .with_provider(ok)
        .date(day())
        .build()
        .unwrap();
    let report = listino.today_prices(&Catalog::default()).await.unwrap();

    assert_eq!(report.card_count(), 1);
    assert_eq!(report.failures.len(), 1);
    match &report.failures[0] {
        ListinoError::Provider { provider, msg } => {
            assert_eq!(provider, "bad");
            assert!(msg.contains("connection reset"));
        }
        other => panic!("unexpected: {other:?}"),
    }
}

#[tokio::test]
async fn hanging_provider_times_out_alone() {
    let (slow, c_slow) = DynamicMockProvider::new_with_controller("slow");
    let (fast, c_fast) = DynamicMockProvider::new_with_controller("fast");
    c_slow.set_behavior(MockBehavior::Hang).await;
    c_fast
        .set_behavior(MockBehavior::Return(prices("fast", &[(U2, Finish::Foil, 10)])))
        .await;

    let listino = Listino::builder()
        .with_provider(slow)
        .with_provider(fast)
        .provider_timeout(Duration::from_millis(50))
        .build()
        .unwrap();
    let report = listino.today_prices(&Catalog::default()).await.unwrap();

    assert!(report.get(U2, "fast", Finish::Foil).is_some());
    assert_eq!(
        report.failures,
        vec![ListinoError::provider_timeout("slow")]
    );
}

#[tokio::test]
async fn every_provider_failing_is_an_error() {
    let (a, ca) = DynamicMockProvider::new_with_controller("a");
    let (b, cb) = DynamicMockProvider::new_with_controller("b");
    ca.set_behavior(MockBehavior::Hang).await;
    cb.set_behavior(MockBehavior::Fail(ListinoError::Http {
        url: "https://b.test".into(),
        status: 503,
    }))
    .await;

    let listino = Listino::builder()
        .with_provider(a)
        .with_provider(b)
        .provider_timeout(Duration::from_millis(30))
        .build()
        .unwrap();
    let err = listino.today_prices(&Catalog::default()).await.unwrap_err();
    match err {
        ListinoError::AllProvidersFailed(es) => {
            assert_eq!(es.len(), 2);
            assert_eq!(es[0], ListinoError::provider_timeout("a"));
            assert!(matches!(&es[1], ListinoError::Provider { provider, .. } if provider == "b"));
        }
        other => panic!("unexpected: {other:?}"),
    }
}

#[tokio::test]
async fn request_deadline_bounds_the_whole_run() {
    let (a, ca) = DynamicMockProvider::new_with_controller("a");
    ca.set_behavior(MockBehavior::Hang).await;
    let listino = Listino::builder()
        .with_provider(a)
        .provider_timeout(Duration::from_secs(60))
        .request_timeout(Duration::from_millis(30))
        .build()
        .unwrap();
    let err = listino.today_prices(&Catalog::default()).await.unwrap_err();
    assert_eq!(err, ListinoError::RequestTimeout);
}

#[tokio::test]
async fn missing_catalog_aborts_before_any_download() {
    let (a, ca) = DynamicMockProvider::new_with_controller("a");
    ca.set_behavior(MockBehavior::Return(prices("a", &[]))).await;
    let listino = Listino::builder().with_provider(a).build().unwrap();

    let dir = tempfile::tempdir().unwrap();
    let source = AllPrintingsFile::new(dir.path().join("AllPrintings.json"));
    let err = listino.today_prices_from(&source).await.unwrap_err();

    assert!(matches!(err, ListinoError::CatalogUnavailable { .. }));
    assert!(ca.calls().await.is_empty());
}

#[tokio::test]
async fn fixture_provider_runs_end_to_end() {
    let listino = Listino::builder()
        .with_provider(Arc::new(MockProvider::new()))
        .with_provider(Arc::new(MockProvider::named("mock-down").with_mode(MockMode::Fail)))
        .date(day())
        .build()
        .unwrap();
    let report = listino
        .today_prices_from(&listino_mock::catalog())
        .await
        .unwrap();

    assert_eq!(report.card_count(), 4);
    assert_eq!(report.failures.len(), 1);
    assert!(report.prices.values().all(|by_provider| by_provider.contains_key("mock")));
}

#[test]
fn builder_rejects_empty_and_duplicate_registrations() {
    let err = Listino::builder().build().err().unwrap();
    assert!(matches!(err, ListinoError::InvalidArg(_)));

    let err = Listino::builder()
        .with_provider(Arc::new(MockProvider::new()))
        .with_provider(Arc::new(MockProvider::new()))
        .build()
        .err()
        .unwrap();
    assert!(matches!(err, ListinoError::InvalidArg(msg) if msg.contains("mock")));
}

#[test]
fn date_defaults_to_today() {
    let listino = Listino::builder()
        .with_provider(Arc::new(MockProvider::new()))
        .build()
        .unwrap();
    assert_eq!(listino.provider_names(), vec!["mock"]);
    assert!(listino.config().date.is_none());
    let today = chrono::Utc::now().date_naive();
    assert!(listino.date() >= today.pred_opt().unwrap());
}
