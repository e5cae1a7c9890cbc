//! End-to-end tests against a simulated admin API.
//!
//! The simulator serves 1000 orders (even ids open, odd ids closed) and 1000
//! products, pages lists 50 at a time by default, reports call-limit usage
//! on every response and rejects unknown credentials with 403.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use serde_json::{json, Value};
use shopify_client::auth::{Credential, KeysetInput, KeysetStore};
use shopify_client::rest::{ApiError, Params};
use shopify_client::{AccessToken, ApiConfig, HostUrl, ShopDomain, ShopifyApi};
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, Request, Respond, ResponseTemplate};

const CALL_LIMIT: &str = "X-Shopify-Shop-Api-Call-Limit";
const BUCKET_SIZE: u32 = 40;
const TOTAL: u64 = 1000;

/// Serves orders and products, counting every request against a bucket.
struct AdminSimulator {
    used: AtomicU32,
}

impl AdminSimulator {
    fn new(initial_usage: u32) -> Self {
        Self {
            used: AtomicU32::new(initial_usage),
        }
    }

    fn order(id: u64) -> Value {
        json!({
            "id": id,
            "name": format!("#{id}"),
            "closed_at": if id % 2 == 1 { json!("2017-01-01T00:00:00-05:00") } else { Value::Null },
        })
    }

    fn order_ids(query: &HashMap<String, String>, default_status: Option<&str>) -> Vec<u64> {
        let status = query.get("status").map(String::as_str).or(default_status);
        (1..=TOTAL)
            .filter(|id| match status {
                Some("open") => id % 2 == 0,
                Some("closed") => id % 2 == 1,
                _ => true,
            })
            .collect()
    }

    fn page<T: Clone>(items: &[T], query: &HashMap<String, String>) -> Vec<T> {
        let limit: usize = query
            .get("limit")
            .and_then(|l| l.parse().ok())
            .unwrap_or(50)
            .min(250);
        let page: usize = query
            .get("page")
            .and_then(|p| p.parse().ok())
            .unwrap_or(1)
            .max(1);
        items
            .iter()
            .skip((page - 1) * limit)
            .take(limit)
            .cloned()
            .collect()
    }

    fn route(path: &str, query: &HashMap<String, String>) -> Option<Value> {
        let products: Vec<u64> = (1..=TOTAL).collect();
        match path {
            "/admin/orders/count.json" => {
                Some(json!({ "count": Self::order_ids(query, None).len() }))
            }
            "/admin/orders.json" => {
                let ids = Self::order_ids(query, Some("open"));
                let orders: Vec<Value> = Self::page(&ids, query)
                    .into_iter()
                    .map(Self::order)
                    .collect();
                Some(json!({ "orders": orders }))
            }
            "/admin/products/count.json" => Some(json!({ "count": TOTAL })),
            "/admin/products.json" => {
                let page: Vec<Value> = Self::page(&products, query)
                    .into_iter()
                    .map(|id| json!({ "id": id, "title": format!("Product {id}") }))
                    .collect();
                Some(json!({ "products": page }))
            }
            other => {
                let id: u64 = other
                    .strip_prefix("/admin/orders/")?
                    .strip_suffix(".json")?
                    .parse()
                    .ok()?;
                (1..=TOTAL)
                    .contains(&id)
                    .then(|| json!({ "order": Self::order(id) }))
            }
        }
    }
}

impl Respond for AdminSimulator {
    fn respond(&self, request: &Request) -> ResponseTemplate {
        let used = self.used.fetch_add(1, Ordering::SeqCst) + 1;
        if used >= BUCKET_SIZE {
            return ResponseTemplate::new(429)
                .insert_header(CALL_LIMIT, format!("{BUCKET_SIZE}/{BUCKET_SIZE}").as_str())
                .set_body_json(json!({ "errors": "Exceeded 2 calls per second for api client. Reduce request rates to resume uninterrupted service." }));
        }

        let query: HashMap<String, String> = request.url.query_pairs().into_owned().collect();
        let limit = format!("{used}/{BUCKET_SIZE}");
        match Self::route(request.url.path(), &query) {
            Some(body) => ResponseTemplate::new(200)
                .insert_header(CALL_LIMIT, limit.as_str())
                .set_body_json(body),
            None => ResponseTemplate::new(404)
                .insert_header(CALL_LIMIT, limit.as_str())
                .set_body_json(json!({ "errors": "Not Found" })),
        }
    }
}

/// Starts a simulator accepting access token `yes` or basic auth `x:yes`.
async fn start_simulator(initial_usage: u32) -> MockServer {
    let server = MockServer::start().await;
    let simulator = Arc::new(AdminSimulator::new(initial_usage));

    Mock::given(header("X-Shopify-Access-Token", "yes"))
        .respond_with(SharedResponder(Arc::clone(&simulator)))
        .mount(&server)
        .await;
    Mock::given(header("Authorization", "Basic eDp5ZXM="))
        .respond_with(SharedResponder(simulator))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .respond_with(
            ResponseTemplate::new(403).set_body_json(json!({ "errors": "[API] Invalid API key or access token" })),
        )
        .mount(&server)
        .await;

    server
}

struct SharedResponder(Arc<AdminSimulator>);

impl Respond for SharedResponder {
    fn respond(&self, request: &Request) -> ResponseTemplate {
        self.0.respond(request)
    }
}

fn api_for(server: &MockServer, credential: Credential) -> ShopifyApi {
    let config = ApiConfig::builder()
        .shop(ShopDomain::new("test-shop").unwrap())
        .credential(credential)
        .host_override(HostUrl::new(server.uri()).unwrap())
        .build()
        .unwrap();
    ShopifyApi::from_config(config).unwrap()
}

fn token(value: &str) -> Credential {
    Credential::PublicToken {
        access_token: AccessToken::new(value).unwrap(),
    }
}

// ============================================================================
// Order Scenarios
// ============================================================================

#[tokio::test]
async fn test_count_orders_by_status() {
    let server = start_simulator(0).await;
    let api = api_for(&server, token("yes"));

    let open = api
        .count_orders(Params::new().with("status", "open"))
        .await
        .unwrap();
    let any = api
        .count_orders(Params::new().with("status", "any"))
        .await
        .unwrap();

    assert_eq!(open, json!(500));
    assert_eq!(any, json!(1000));
}

#[tokio::test]
async fn test_get_orders_second_page() {
    let server = start_simulator(0).await;
    let api = api_for(&server, token("yes"));

    let orders = api
        .get_orders(Params::new().with("page", 2))
        .await
        .unwrap();
    let ids: Vec<u64> = orders
        .as_array()
        .unwrap()
        .iter()
        .map(|o| o["id"].as_u64().unwrap())
        .collect();

    assert_eq!(ids.len(), 50);
    assert!(ids.windows(2).all(|w| w[0] < w[1]));
    assert_eq!(ids[0], 102);
    assert_eq!(ids[49], 200);
}

#[tokio::test]
async fn test_get_all_orders_defaults_to_open() {
    let server = start_simulator(0).await;
    let api = api_for(&server, token("yes"));

    let orders = api.get_all_orders(Params::new()).await.unwrap();

    assert_eq!(orders.len(), 500);
    assert!(orders.iter().all(|o| o["closed_at"].is_null()));
    assert_eq!(orders.last().unwrap()["name"], "#1000");
}

#[tokio::test]
async fn test_get_all_orders_with_any_status() {
    let server = start_simulator(0).await;
    let api = api_for(&server, token("yes"));

    let orders = api
        .get_all_orders(Params::new().with("status", "any"))
        .await
        .unwrap();

    assert_eq!(orders.len(), 1000);
    assert_eq!(orders[0]["name"], "#1");
    assert_eq!(orders[999]["name"], "#1000");
}

#[tokio::test]
async fn test_get_order_out_of_range_is_404() {
    let server = start_simulator(0).await;
    let api = api_for(&server, token("yes"));

    let order = api
        .get_order(Params::new().with("id", 1000))
        .await
        .unwrap();
    assert_eq!(order["name"], "#1000");

    let error = api
        .get_order(Params::new().with("id", 1004))
        .await
        .unwrap_err();
    assert!(matches!(error, ApiError::Status { code: 404, .. }));
}

#[tokio::test]
async fn test_get_all_products() {
    let server = start_simulator(0).await;
    let api = api_for(&server, token("yes"));

    let products = api.get_all_products(Params::new()).await.unwrap();

    assert_eq!(products.len(), 1000);
    assert_eq!(products[250]["id"], 251);
    assert_eq!(products[999]["title"], "Product 1000");
}

// ============================================================================
// Authentication Scenarios
// ============================================================================

#[tokio::test]
async fn test_wrong_access_token_is_403() {
    let server = start_simulator(0).await;
    let api = api_for(&server, token("no"));

    let error = api.count_orders(Params::new()).await.unwrap_err();
    assert_eq!(error.status(), Some(403));
}

#[tokio::test]
async fn test_private_app_from_keyset() {
    let server = start_simulator(0).await;
    let keysets = KeysetStore::new();
    keysets
        .register("private app", KeysetInput::private_app("x", "yes"))
        .unwrap();

    let config = ApiConfig::builder()
        .shop(ShopDomain::new("test-shop").unwrap())
        .keyset(&keysets, "private app")
        .host_override(HostUrl::new(server.uri()).unwrap())
        .build()
        .unwrap();
    let api = ShopifyApi::from_config(config).unwrap();

    assert_eq!(api.count_products(Params::new()).await.unwrap(), json!(1000));
}

#[tokio::test]
async fn test_failed_fetch_all_reports_count_failure() {
    let server = start_simulator(0).await;
    let api = api_for(&server, token("no"));

    let error = api.get_all_orders(Params::new()).await.unwrap_err();
    assert!(matches!(error, ApiError::CountFailed(_)));
    assert_eq!(error.status(), Some(403));
}

// ============================================================================
// Call Limit Scenarios
// ============================================================================

#[tokio::test]
async fn test_call_limit_header_is_tracked() {
    let server = start_simulator(20).await;
    let api = api_for(&server, token("yes"));

    api.count_orders(Params::new()).await.unwrap();
    assert_eq!(api.rate_limiter().last_usage(), 21);
}

#[tokio::test]
async fn test_throttled_call_is_retried_until_it_succeeds() {
    let server = MockServer::start().await;
    Mock::given(path("/admin/orders/count.json"))
        .respond_with(ThrottleFirst::new(2))
        .mount(&server)
        .await;
    let api = api_for(&server, token("yes"));

    let start = Instant::now();
    let count = api.count_orders(Params::new()).await.unwrap();

    assert_eq!(count, json!(7));
    assert!(start.elapsed() >= Duration::from_millis(900));
    assert_eq!(server.received_requests().await.unwrap().len(), 3);
}

#[tokio::test]
async fn test_throttle_retry_cap() {
    let server = MockServer::start().await;
    Mock::given(path("/admin/orders/count.json"))
        .respond_with(ThrottleFirst::new(10))
        .mount(&server)
        .await;
    let config = ApiConfig::builder()
        .shop(ShopDomain::new("test-shop").unwrap())
        .credential(token("yes"))
        .host_override(HostUrl::new(server.uri()).unwrap())
        .max_throttle_retries(Some(0))
        .build()
        .unwrap();
    let api = ShopifyApi::from_config(config).unwrap();

    let error = api.count_orders(Params::new()).await.unwrap_err();
    assert!(matches!(error, ApiError::Throttled { attempts: 1 }));
}

/// Answers 429 a fixed number of times, then a count of 7.
struct ThrottleFirst {
    remaining: AtomicU32,
}

impl ThrottleFirst {
    fn new(times: u32) -> Self {
        Self {
            remaining: AtomicU32::new(times),
        }
    }
}

impl Respond for ThrottleFirst {
    fn respond(&self, _request: &Request) -> ResponseTemplate {
        let throttle = self
            .remaining
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| n.checked_sub(1))
            .is_ok();
        if throttle {
            ResponseTemplate::new(429).insert_header(CALL_LIMIT, "40/40")
        } else {
            ResponseTemplate::new(200)
                .insert_header(CALL_LIMIT, "1/40")
                .set_body_json(json!({ "count": 7 }))
        }
    }
}
