use cmc_database_sqlite::{
  create_tables, establish_connection, with_tables, CoinInfo, NewCoinInfo, NewPrice, Price, UpdateOutcome,
};
use cmc_models::{CoinInfo as CoinInfoRecord, PriceRecord};
use diesel::connection::{Connection, InstrumentationEvent};
use diesel::sqlite::SqliteConnection;
use pretty_assertions::assert_eq;
use serde_json::json;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

fn setup() -> SqliteConnection {
  let mut conn = establish_connection(":memory:").unwrap();
  create_tables(&mut conn).unwrap();
  conn
}

fn price(id: i64, last_updated: &str, value: f64) -> NewPrice {
  NewPrice {
    id,
    name: format!("Coin {}", id),
    symbol: format!("C{}", id),
    slug: format!("coin-{}", id),
    cmc_rank: Some(id),
    date_added: Some("2013-04-28T00:00:00.000Z".to_string()),
    max_supply: None,
    circulating_supply: Some(1_000_000.0),
    total_supply: Some(1_000_000.0),
    last_updated: Some(last_updated.to_string()),
    price: Some(value),
    percent_change_1h: Some(0.1),
    percent_change_24h: Some(-0.5),
    percent_change_7d: Some(2.0),
    percent_change_30d: None,
    percent_change_60d: None,
    percent_change_90d: None,
  }
}

/// Count UPDATE statements issued on `conn` from now on
fn count_updates(conn: &mut SqliteConnection) -> Arc<AtomicUsize> {
  let counter = Arc::new(AtomicUsize::new(0));
  let seen = Arc::clone(&counter);
  conn.set_instrumentation(move |event: InstrumentationEvent<'_>| {
    if let InstrumentationEvent::StartQuery { query, .. } = event {
      if query.to_string().trim_start().to_uppercase().starts_with("UPDATE") {
        seen.fetch_add(1, Ordering::SeqCst);
      }
    }
  });
  counter
}

#[test]
fn test_update_all_inserts_into_empty_table() {
  let mut conn = setup();
  let batch = vec![price(1, "T1", 100.0), price(2, "T1", 200.0)];
  assert_eq!(NewPrice::update_all(&mut conn, &batch).unwrap(), UpdateOutcome::Inserted(2));
  assert_eq!(Price::count(&mut conn).unwrap(), 2);
}

#[test]
fn test_update_all_empty_batch_is_noop() {
  let mut conn = setup();
  assert_eq!(NewPrice::update_all(&mut conn, &[]).unwrap(), UpdateOutcome::Unchanged);
  assert_eq!(NewPrice::update_changed(&mut conn, &[]).unwrap(), UpdateOutcome::Unchanged);
}

#[test]
fn test_update_all_same_head_issues_no_updates() {
  let mut conn = setup();
  NewPrice::insert_all(&mut conn, &[price(1, "T1", 100.0), price(2, "T1", 200.0)]).unwrap();

  let updates = count_updates(&mut conn);
  // only the head is compared, so the changed second row is not written
  let batch = vec![price(1, "T1", 100.0), price(2, "T2", 250.0)];
  assert_eq!(NewPrice::update_all(&mut conn, &batch).unwrap(), UpdateOutcome::Unchanged);
  assert_eq!(updates.load(Ordering::SeqCst), 0);
  assert_eq!(Price::find(&mut conn, 2).unwrap().unwrap().price, Some(200.0));
}

#[test]
fn test_update_all_changed_head_rewrites_every_record() {
  let mut conn = setup();
  NewPrice::insert_all(&mut conn, &[price(1, "T1", 100.0), price(2, "T1", 200.0), price(3, "T1", 300.0)])
    .unwrap();

  let updates = count_updates(&mut conn);
  let batch = vec![price(1, "T2", 110.0), price(2, "T1", 200.0), price(3, "T2", 330.0), price(4, "T2", 40.0)];
  let outcome = NewPrice::update_all(&mut conn, &batch).unwrap();

  assert_eq!(outcome, UpdateOutcome::Refreshed { updated: 3, inserted: 1 });
  assert_eq!(updates.load(Ordering::SeqCst), 4);
  assert_eq!(Price::count(&mut conn).unwrap(), 4);
  assert_eq!(Price::last_updated_for(&mut conn, 3).unwrap().as_deref(), Some("T2"));
  assert_eq!(Price::find(&mut conn, 1).unwrap().unwrap().price, Some(110.0));
}

#[test]
fn test_full_row_replaced_not_merged() {
  let mut conn = setup();
  NewPrice::insert_all(&mut conn, &[price(1, "T1", 100.0)]).unwrap();

  let mut fresh = price(1, "T2", 120.0);
  fresh.percent_change_7d = None;
  NewPrice::update_all(&mut conn, &[fresh]).unwrap();

  let stored = Price::find(&mut conn, 1).unwrap().unwrap();
  assert_eq!(stored.percent_change_7d, None);
  assert_eq!(stored.price, Some(120.0));
}

#[test]
fn test_update_changed_rewrites_only_changed_rows() {
  let mut conn = setup();
  NewPrice::insert_all(&mut conn, &[price(1, "T1", 100.0), price(2, "T1", 200.0), price(3, "T1", 300.0)])
    .unwrap();

  let updates = count_updates(&mut conn);
  let batch = vec![price(1, "T1", 100.0), price(2, "T2", 220.0), price(3, "T1", 300.0), price(5, "T2", 5.0)];
  let outcome = NewPrice::update_changed(&mut conn, &batch).unwrap();

  assert_eq!(outcome, UpdateOutcome::Refreshed { updated: 1, inserted: 1 });
  assert_eq!(updates.load(Ordering::SeqCst), 1);
  assert_eq!(Price::ids(&mut conn).unwrap(), vec![1, 2, 3, 5]);
  assert_eq!(Price::id_list(&mut conn).unwrap(), "1,2,3,5");

  let again = NewPrice::update_changed(&mut conn, &batch).unwrap();
  assert_eq!(again, UpdateOutcome::Unchanged);
}

#[test]
fn test_insert_all_ignores_existing_ids() {
  let mut conn = setup();
  NewPrice::insert_all(&mut conn, &[price(1, "T1", 100.0)]).unwrap();
  let inserted = NewPrice::insert_all(&mut conn, &[price(1, "T9", 999.0), price(2, "T9", 2.0)]).unwrap();
  assert_eq!(inserted, 1);
  assert_eq!(Price::find(&mut conn, 1).unwrap().unwrap().last_updated.as_deref(), Some("T1"));
}

#[test]
fn test_missing_table_recovered() {
  let mut conn = establish_connection(":memory:").unwrap();
  let batch = vec![price(1, "T1", 100.0)];
  let outcome = with_tables(&mut conn, |conn| NewPrice::update_all(conn, &batch)).unwrap();
  assert_eq!(outcome, UpdateOutcome::Inserted(1));
}

#[test]
fn test_price_record_flattened() {
  let record: PriceRecord = serde_json::from_value(json!({
    "id": 1027,
    "name": "Ethereum",
    "symbol": "ETH",
    "slug": "ethereum",
    "cmc_rank": 2,
    "last_updated": "2024-03-01T12:00:00.000Z",
    "quote": {"USD": {"price": 3400.5, "percent_change_90d": 40.1}}
  }))
  .unwrap();
  let row = NewPrice::from(&record);
  assert_eq!(row.price, Some(3400.5));
  assert_eq!(row.percent_change_90d, Some(40.1));
  assert_eq!(row.max_supply, None);
}

#[test]
fn test_quote_in_missing_currency_not_substituted() {
  let record: PriceRecord = serde_json::from_value(json!({
    "id": 1,
    "name": "Bitcoin",
    "symbol": "BTC",
    "slug": "bitcoin",
    "quote": {"USD": {"price": 62000.0}}
  }))
  .unwrap();
  assert!(NewPrice::with_quote(&record, "EUR").is_none());
  assert_eq!(NewPrice::with_quote(&record, "USD").and_then(|row| row.price), Some(62000.0));
}

#[test]
fn test_info_rows() {
  let mut conn = setup();
  NewPrice::insert_all(&mut conn, &[price(1, "T1", 100.0)]).unwrap();

  let record: CoinInfoRecord = serde_json::from_value(json!({
    "id": 1,
    "name": "Bitcoin",
    "symbol": "BTC",
    "category": "coin",
    "slug": "bitcoin",
    "urls": {"website": ["https://bitcoin.org/"]},
    "platform": null,
    "contract_address": []
  }))
  .unwrap();
  let row = NewCoinInfo::from(&record);
  assert_eq!(NewCoinInfo::insert_all(&mut conn, &[row.clone(), row]).unwrap(), 1);

  let stored = CoinInfo::all(&mut conn).unwrap();
  assert_eq!(stored.len(), 1);
  assert_eq!(stored[0].urls.as_deref(), Some(r#"{"website":["https://bitcoin.org/"]}"#));
  assert_eq!(stored[0].platform, None);
  assert_eq!(CoinInfo::count(&mut conn).unwrap(), 1);
  assert!(CoinInfo::find(&mut conn, 2).unwrap().is_none());
}
