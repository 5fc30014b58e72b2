use cmc_client::CoinMarketCapClient;
use cmc_core::Config;
use cmc_database_sqlite::{establish_connection, CoinInfo, Price, UpdateOutcome};
use cmc_loaders::prelude::*;
use cmc_loaders::{
  listing_cache_name, refresh_credits, IdMapLoaderInput, InfoLoaderInput, PriceLoaderInput, ID_MAP_CACHE_NAME,
  LISTING_CACHE_NAME,
};
use serde_json::{json, Value};
use std::path::Path;
use std::sync::Arc;
use tempfile::TempDir;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn status() -> Value {
  json!({"timestamp": "2024-03-01T12:00:00.000Z", "error_code": 0, "error_message": null, "elapsed": 10, "credit_count": 1})
}

fn context_for(server: &MockServer, dir: &TempDir) -> LoaderContext {
  let config = Config::default_with_key("test_key".to_string()).with_base_url(server.uri());
  let client = Arc::new(CoinMarketCapClient::new(config).unwrap());
  LoaderContext::new(client, LoaderConfig::default())
    .with_cache(CacheConfig::default().with_directory(dir.path().join("json_files")))
    .with_database_url(database_path(dir.path()))
}

fn database_path(dir: &Path) -> String {
  dir.join("cryptodatabase.db").to_string_lossy().into_owned()
}

fn listing(price: f64) -> Value {
  listing_in("USD", price, "2024-03-01T12:00:00.000Z")
}

fn listing_in(currency: &str, price: f64, last_updated: &str) -> Value {
  json!({
    "status": status(),
    "data": [
      {
        "id": 1, "name": "Bitcoin", "symbol": "BTC", "slug": "bitcoin", "cmc_rank": 1,
        "last_updated": last_updated,
        "quote": {currency: {"price": price, "percent_change_24h": 1.5}}
      },
      {
        "id": 1027, "name": "Ethereum", "symbol": "ETH", "slug": "ethereum", "cmc_rank": 2,
        "last_updated": last_updated,
        "quote": {currency: {"price": 3400.0, "percent_change_24h": -0.4}}
      }
    ]
  })
}

fn info_entry(id: i64) -> Value {
  json!({"id": id, "name": format!("Coin {}", id), "symbol": format!("C{}", id), "slug": format!("coin-{}", id)})
}

#[tokio::test]
async fn test_same_day_listing_fetched_once() {
  let server = MockServer::start().await;
  Mock::given(method("GET"))
    .and(path("/v1/cryptocurrency/listings/latest"))
    .and(query_param("convert", "USD"))
    .respond_with(ResponseTemplate::new(200).set_body_json(listing(62000.0)))
    .expect(1)
    .mount(&server)
    .await;

  let dir = tempfile::tempdir().unwrap();
  let context = context_for(&server, &dir);
  let loader = PriceLoader::new();

  let first = loader.load(&context, PriceLoaderInput::default()).await.unwrap();
  assert!(!first.from_cache);
  assert_eq!(first.records_fetched, 2);
  assert_eq!(first.outcome, UpdateOutcome::Inserted(2));

  let second = loader.load(&context, PriceLoaderInput::default()).await.unwrap();
  assert!(second.from_cache);
  assert_eq!(second.outcome, UpdateOutcome::Unchanged);

  let stamped = context.cache.file_path(LISTING_CACHE_NAME, Some(&JsonFileCache::today_stamp()));
  assert!(stamped.exists());

  let mut conn = establish_connection(&database_path(dir.path())).unwrap();
  assert_eq!(Price::count(&mut conn).unwrap(), 2);
  assert_eq!(Price::find(&mut conn, 1).unwrap().unwrap().price, Some(62000.0));
}

#[tokio::test]
async fn test_other_currency_same_day_not_served_usd_file() {
  let server = MockServer::start().await;
  Mock::given(method("GET"))
    .and(path("/v1/cryptocurrency/listings/latest"))
    .and(query_param("convert", "USD"))
    .respond_with(ResponseTemplate::new(200).set_body_json(listing(62000.0)))
    .expect(1)
    .mount(&server)
    .await;
  Mock::given(method("GET"))
    .and(path("/v1/cryptocurrency/listings/latest"))
    .and(query_param("convert", "EUR"))
    .respond_with(ResponseTemplate::new(200).set_body_json(listing_in("EUR", 57000.0, "2024-03-01T12:05:00.000Z")))
    .expect(1)
    .mount(&server)
    .await;

  let dir = tempfile::tempdir().unwrap();
  let context = context_for(&server, &dir);
  let loader = PriceLoader::new();

  loader.load(&context, PriceLoaderInput::default()).await.unwrap();
  let eur = PriceLoaderInput { convert: Some("EUR".to_string()), per_record: true, ..Default::default() };
  let output = loader.load(&context, eur).await.unwrap();
  assert!(!output.from_cache);
  assert_eq!(output.outcome.rows_written(), 2);

  let today = JsonFileCache::today_stamp();
  assert!(context.cache.file_path(LISTING_CACHE_NAME, Some(&today)).exists());
  assert!(context.cache.file_path(&listing_cache_name("EUR"), Some(&today)).exists());

  let mut conn = establish_connection(&database_path(dir.path())).unwrap();
  assert_eq!(Price::find(&mut conn, 1).unwrap().unwrap().price, Some(57000.0));
}

#[tokio::test]
async fn test_listing_without_requested_quote_rejected() {
  let server = MockServer::start().await;
  Mock::given(method("GET"))
    .and(path("/v1/cryptocurrency/listings/latest"))
    .and(query_param("convert", "EUR"))
    .respond_with(ResponseTemplate::new(200).set_body_json(listing(62000.0)))
    .expect(1)
    .mount(&server)
    .await;

  let dir = tempfile::tempdir().unwrap();
  let context = context_for(&server, &dir);
  let input = PriceLoaderInput { convert: Some("EUR".to_string()), ..Default::default() };
  let err = PriceLoader::new().load(&context, input).await.unwrap_err();
  assert!(matches!(err, LoaderError::InvalidData(_)));

  // rejected before the database is opened
  assert!(!Path::new(&database_path(dir.path())).exists());
}

#[tokio::test]
async fn test_disabled_cache_fetches_every_time() {
  let server = MockServer::start().await;
  Mock::given(method("GET"))
    .and(path("/v1/cryptocurrency/listings/latest"))
    .respond_with(ResponseTemplate::new(200).set_body_json(listing(62000.0)))
    .expect(2)
    .mount(&server)
    .await;

  let dir = tempfile::tempdir().unwrap();
  let context = context_for(&server, &dir).with_cache(CacheConfig::default().with_enabled(false));
  let loader = PriceLoader::new();
  for _ in 0..2 {
    let output = loader.load(&context, PriceLoaderInput::default()).await.unwrap();
    assert!(!output.from_cache);
  }
  assert!(!dir.path().join("json_files").exists());
}

#[tokio::test]
async fn test_id_map_loader_joins_ids() {
  let server = MockServer::start().await;
  Mock::given(method("GET"))
    .and(path("/v1/cryptocurrency/map"))
    .and(query_param("listing_status", "active"))
    .respond_with(ResponseTemplate::new(200).set_body_json(json!({
      "status": status(),
      "data": [
        {"id": 1, "rank": 1, "name": "Bitcoin", "symbol": "BTC", "slug": "bitcoin", "is_active": 1},
        {"id": 1027, "rank": 2, "name": "Ethereum", "symbol": "ETH", "slug": "ethereum", "is_active": 1}
      ]
    })))
    .expect(1)
    .mount(&server)
    .await;

  let dir = tempfile::tempdir().unwrap();
  let context = context_for(&server, &dir);
  let loader = IdMapLoader::new();

  let output = loader.load(&context, IdMapLoaderInput::default()).await.unwrap();
  assert_eq!(output.id_list, "1,1027");
  assert_eq!(output.entries.len(), 2);

  let again = loader.load(&context, IdMapLoaderInput::default()).await.unwrap();
  assert!(again.from_cache);
  assert!(context.cache.file_path(ID_MAP_CACHE_NAME, Some(&JsonFileCache::today_stamp())).exists());
}

#[tokio::test]
async fn test_info_batch_halved_on_uri_too_long() {
  let server = MockServer::start().await;
  Mock::given(method("GET"))
    .and(path("/v2/cryptocurrency/info"))
    .and(query_param("id", "1,2,3,4"))
    .respond_with(ResponseTemplate::new(414))
    .expect(1)
    .mount(&server)
    .await;
  Mock::given(method("GET"))
    .and(path("/v2/cryptocurrency/info"))
    .and(query_param("id", "1,2"))
    .respond_with(ResponseTemplate::new(200).set_body_json(json!({
      "status": status(),
      "data": {"1": info_entry(1), "2": info_entry(2)}
    })))
    .expect(1)
    .mount(&server)
    .await;
  Mock::given(method("GET"))
    .and(path("/v2/cryptocurrency/info"))
    .and(query_param("id", "3,4"))
    .respond_with(ResponseTemplate::new(200).set_body_json(json!({
      "status": status(),
      "data": {"3": info_entry(3), "4": info_entry(4)}
    })))
    .expect(1)
    .mount(&server)
    .await;

  let dir = tempfile::tempdir().unwrap();
  let context = context_for(&server, &dir);
  let input = InfoLoaderInput { ids: Some(vec![1, 2, 3, 4]), batch_size: Some(4) };
  let output = InfoLoader::new().load(&context, input).await.unwrap();

  assert_eq!(output.requested, 4);
  assert_eq!(output.fetched, 4);
  assert_eq!(output.inserted, 4);
  assert_eq!(output.batches, 2);

  let mut conn = establish_connection(&database_path(dir.path())).unwrap();
  assert_eq!(CoinInfo::count(&mut conn).unwrap(), 4);
}

#[tokio::test]
async fn test_info_single_id_uri_too_long_fails() {
  let server = MockServer::start().await;
  Mock::given(method("GET"))
    .and(path("/v2/cryptocurrency/info"))
    .respond_with(ResponseTemplate::new(414))
    .mount(&server)
    .await;

  let dir = tempfile::tempdir().unwrap();
  let context = context_for(&server, &dir);
  let input = InfoLoaderInput { ids: Some(vec![1, 2]), batch_size: Some(2) };
  let err = InfoLoader::new().load(&context, input).await.unwrap_err();
  assert!(matches!(err, LoaderError::UriTooLong(_)));
}

#[tokio::test]
async fn test_info_failed_batch_keeps_other_batches() {
  let server = MockServer::start().await;
  Mock::given(method("GET"))
    .and(path("/v2/cryptocurrency/info"))
    .and(query_param("id", "1"))
    .respond_with(ResponseTemplate::new(200).set_body_json(json!({
      "status": status(),
      "data": {"1": info_entry(1)}
    })))
    .expect(1)
    .mount(&server)
    .await;
  Mock::given(method("GET"))
    .and(path("/v2/cryptocurrency/info"))
    .and(query_param("id", "2"))
    .respond_with(ResponseTemplate::new(500))
    .expect(1)
    .mount(&server)
    .await;

  let dir = tempfile::tempdir().unwrap();
  let context = context_for(&server, &dir);
  let input = InfoLoaderInput { ids: Some(vec![1, 2]), batch_size: Some(1) };
  let output = InfoLoader::new().load(&context, input).await.unwrap();

  assert_eq!(output.batches, 1);
  assert_eq!(output.failed_batches, 1);
  assert_eq!(output.inserted, 1);

  let mut conn = establish_connection(&database_path(dir.path())).unwrap();
  assert_eq!(CoinInfo::count(&mut conn).unwrap(), 1);
}

#[tokio::test]
async fn test_info_without_ids_reads_price_table() {
  let server = MockServer::start().await;
  let dir = tempfile::tempdir().unwrap();
  let context = context_for(&server, &dir);

  // empty database: tables are created and nothing is requested
  let output = InfoLoader::new().load(&context, InfoLoaderInput::default()).await.unwrap();
  assert_eq!(output.requested, 0);
  assert_eq!(output.batches, 0);
}

#[tokio::test]
async fn test_transport_error_surfaces() {
  let dir = tempfile::tempdir().unwrap();
  let config = Config::default_with_key("test_key".to_string()).with_base_url("http://127.0.0.1:9");
  let client = Arc::new(CoinMarketCapClient::new(config).unwrap());
  let context = LoaderContext::new(client, LoaderConfig::default())
    .with_cache(CacheConfig::default().with_directory(dir.path()))
    .with_database_url(database_path(dir.path()));

  let err = PriceLoader::new().load(&context, PriceLoaderInput::default()).await.unwrap_err();
  assert!(matches!(err, LoaderError::TransportError(_)));
}

#[tokio::test]
async fn test_refresh_credits_rewrites_file() {
  let server = MockServer::start().await;
  Mock::given(method("GET"))
    .and(path("/v1/key/info"))
    .respond_with(ResponseTemplate::new(200).set_body_json(json!({
      "status": status(),
      "data": {
        "plan": {"credit_limit_daily": 333, "credit_limit_monthly": 10000},
        "usage": {
          "current_minute": {"requests_made": 1, "requests_left": 29},
          "current_day": {"credits_used": 7, "credits_left": 326},
          "current_month": {"credits_used": 70, "credits_left": 9930}
        }
      }
    })))
    .expect(1)
    .mount(&server)
    .await;

  let dir = tempfile::tempdir().unwrap();
  let context = context_for(&server, &dir);
  let file = CreditFile::new(dir.path().join("config.ini"));
  assert_eq!(file.load().unwrap().current_day_left, 33);

  let usage = refresh_credits(&context.client, &file).await.unwrap();
  assert_eq!(usage.current_month_used, 70);
  assert_eq!(usage.last_updated, "2024-03-01T12:00:00.000Z");
  assert_eq!(file.load().unwrap(), usage);
}
