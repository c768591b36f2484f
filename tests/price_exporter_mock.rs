mod support;

use anyhow::Result;
use carbondata::prices::{PriceExporter, PriceStore};
use serde_json::json;
use support::{asset, history, MockPriceHistorySource};
use tempfile::TempDir;

#[tokio::test]
async fn test_store_matches_expected_json() -> Result<()> {
    let dir = TempDir::new()?;
    let output = dir.path().join("coin_price_ts.json");
    let source = MockPriceHistorySource::new()
        .with_history(
            "BCT",
            history(&[("2021-01-01T00:00:00Z", 1.5), ("2021-01-02T00:00:00Z", 2.0)]),
        )
        .with_history("KLIMA", history(&[]));

    let assets = vec![asset("BCT", 12949), asset("KLIMA", 12873)];
    PriceExporter::new(&source, assets, &output).run().await?;

    let content = std::fs::read_to_string(&output)?;
    assert_eq!(
        serde_json::from_str::<serde_json::Value>(&content)?,
        json!({"BCT": {"2021-01-01": 1.5, "2021-01-02": 2.0}, "KLIMA": {}})
    );
    assert!(content.starts_with(r#"{"BCT":"#));
    Ok(())
}

#[tokio::test]
async fn test_fetches_assets_sequentially_in_definition_order() -> Result<()> {
    let source = MockPriceHistorySource::new()
        .with_history("KLIMA", history(&[]))
        .with_history("BCT", history(&[]))
        .with_history("MCO2", history(&[]));

    let assets = vec![asset("KLIMA", 12873), asset("BCT", 12949), asset("MCO2", 1)];
    let store = PriceExporter::new(&source, assets, "unused.json")
        .collect()
        .await?;

    assert_eq!(source.calls(), vec!["KLIMA", "BCT", "MCO2"]);
    assert_eq!(store.symbols().collect::<Vec<_>>(), vec!["KLIMA", "BCT", "MCO2"]);
    Ok(())
}

#[tokio::test]
async fn test_duplicate_dates_keep_last_close() -> Result<()> {
    let source = MockPriceHistorySource::new().with_history(
        "BCT",
        history(&[
            ("2021-01-01T00:00:00Z", 1.0),
            ("2021-01-02T00:00:00Z", 2.0),
            ("2021-01-01T12:00:00Z", 4.0),
        ]),
    );

    let store = PriceExporter::new(&source, vec![asset("BCT", 12949)], "unused.json")
        .collect()
        .await?;

    let bct = store.get("BCT").expect("BCT series");
    assert_eq!(bct.len(), 2);
    assert_eq!(bct["2021-01-01"], 4.0);
    assert_eq!(bct["2021-01-02"], 2.0);
    Ok(())
}

#[tokio::test]
async fn test_failed_fetch_leaves_existing_file_untouched() -> Result<()> {
    let dir = TempDir::new()?;
    let output = dir.path().join("coin_price_ts.json");
    std::fs::write(&output, r#"{"BCT":{"2020-01-01":9.0}}"#)?;

    let source = MockPriceHistorySource::new()
        .with_history("BCT", history(&[("2021-01-01T00:00:00Z", 1.5)]))
        .fail_for("KLIMA");

    let assets = vec![asset("BCT", 12949), asset("KLIMA", 12873)];
    let result = PriceExporter::new(&source, assets, &output).run().await;

    assert!(result.is_err());
    assert_eq!(source.calls(), vec!["BCT", "KLIMA"]);
    assert_eq!(std::fs::read_to_string(&output)?, r#"{"BCT":{"2020-01-01":9.0}}"#);
    Ok(())
}

#[tokio::test]
async fn test_failed_first_fetch_skips_remaining_assets() -> Result<()> {
    let dir = TempDir::new()?;
    let output = dir.path().join("coin_price_ts.json");
    let source = MockPriceHistorySource::new()
        .fail_for("BCT")
        .with_history("KLIMA", history(&[]));

    let assets = vec![asset("BCT", 12949), asset("KLIMA", 12873)];
    let result = PriceExporter::new(&source, assets, &output).run().await;

    assert!(result.is_err());
    assert_eq!(source.calls(), vec!["BCT"]);
    assert!(!output.exists());
    Ok(())
}

#[tokio::test]
async fn test_run_replaces_previous_store() -> Result<()> {
    let dir = TempDir::new()?;
    let output = dir.path().join("coin_price_ts.json");
    std::fs::write(&output, r#"{"OLD":{"2019-01-01":1.0},"BCT":{"2019-01-01":1.0}}"#)?;

    let source =
        MockPriceHistorySource::new().with_history("BCT", history(&[("2021-01-01T00:00:00Z", 1.5)]));
    PriceExporter::new(&source, vec![asset("BCT", 12949)], &output)
        .run()
        .await?;

    let store = PriceStore::load(&output)?;
    assert_eq!(store.symbols().collect::<Vec<_>>(), vec!["BCT"]);
    assert_eq!(store.get("BCT").unwrap().len(), 1);
    Ok(())
}
