use serde_json::json;
use std::sync::Arc;
use std::time::Duration;
use storefront_tracking::framework::mock::MockTransport;
use storefront_tracking::framework::{HttpTransport, RetryPolicy};
use storefront_tracking::lifecycle::{TrackingConfig, TrackingSystem};
use storefront_tracking::tracking_actor::Phase;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;
use url::Url;

fn config() -> TrackingConfig {
    TrackingConfig::default().with_endpoint(Url::parse("https://proxy.example/api/track").unwrap())
}

/// Full system over a mocked transport: the deep link pre-fills the form and
/// submits it once the delay has passed.
#[tokio::test(start_paused = true)]
async fn test_deep_link_prefills_then_submits_after_delay() {
    let mut mock = MockTransport::new();
    mock.expect_get().return_json(json!({
        "success": true,
        "order": { "orderId": "AA-2024-0047", "status": "Packaging" }
    }));
    let system = TrackingSystem::with_transport(config(), Arc::new(mock.clone()));

    let link = Url::parse("https://shop.example/?order=AA-2024-0047&email=#track").unwrap();
    let scheduled = system.activate(&link).await.expect("submission scheduled");

    let state = system.tracking_client.snapshot().await.unwrap();
    assert_eq!(state.phase, Phase::Idle);
    assert_eq!(state.form.identifier, "AA-2024-0047");
    assert_eq!(state.form.secondary_filter, "");

    tokio::time::sleep(Duration::from_millis(499)).await;
    assert_eq!(mock.attempts(), 0);

    scheduled.await.unwrap();
    let state = system.tracking_client.wait_settled().await.unwrap();
    assert_eq!(state.phase, Phase::Displayed);
    assert_eq!(state.timeline.active_index(), Some(5));
    assert_eq!(mock.requests()[0].query(), Some("orderId=AA-2024-0047"));

    mock.verify();
    system.shutdown().await.unwrap();
}

/// Navigating away resets the panel, and a link without `email` must not
/// reuse the address from an earlier lookup.
#[tokio::test]
async fn test_navigation_clears_earlier_form_input() {
    let mut mock = MockTransport::new();
    mock.expect_get().return_json(json!({
        "success": true,
        "order": { "orderId": "AA-2024-0001", "status": "Shipped" }
    }));
    mock.expect_get().return_json(json!({
        "success": true,
        "order": { "orderId": "AA-2024-0047", "status": "Printing" }
    }));
    let config = TrackingConfig {
        auto_submit_delay: Duration::ZERO,
        ..config()
    };
    let system = TrackingSystem::with_transport(config, Arc::new(mock.clone()));
    let client = &system.tracking_client;

    client.submit("AA-2024-0001", "old@example.com").await.unwrap();
    assert_eq!(client.wait_settled().await.unwrap().phase, Phase::Displayed);

    let away = Url::parse("https://shop.example/#shop").unwrap();
    assert!(system.activate(&away).await.is_none());
    let state = client.snapshot().await.unwrap();
    assert_eq!(state.phase, Phase::Idle);
    assert_eq!(state.form.identifier, "");
    assert_eq!(state.form.secondary_filter, "");
    assert!(!state.timeline.visible);

    let back = Url::parse("https://shop.example/?order=AA-2024-0047#track").unwrap();
    let scheduled = system.activate(&back).await.expect("submission scheduled");
    assert_eq!(client.snapshot().await.unwrap().form.secondary_filter, "");

    scheduled.await.unwrap();
    let state = client.wait_settled().await.unwrap();
    assert_eq!(state.details.order_id.as_deref(), Some("AA-2024-0047"));
    assert_eq!(mock.requests()[1].query(), Some("orderId=AA-2024-0047"));

    mock.verify();
    system.shutdown().await.unwrap();
}

/// Without navigating away first, the deep link still replaces the old email.
#[tokio::test]
async fn test_deep_link_without_email_blanks_the_field() {
    let mock = MockTransport::new();
    let system = TrackingSystem::with_transport(config(), Arc::new(mock.clone()));
    let client = &system.tracking_client;

    client
        .prefill(Some("AA-2024-0001".into()), Some("old@example.com".into()))
        .await
        .unwrap();

    let link = Url::parse("https://shop.example/?order=AA-2024-0047#track").unwrap();
    let scheduled = system.activate(&link).await.expect("submission scheduled");
    scheduled.abort();

    let state = client.snapshot().await.unwrap();
    assert_eq!(state.form.identifier, "AA-2024-0047");
    assert_eq!(state.form.secondary_filter, "");
    assert_eq!(mock.attempts(), 0);

    system.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_links_off_route_or_without_order_do_nothing() {
    let mock = MockTransport::new();
    let system = TrackingSystem::with_transport(config(), Arc::new(mock.clone()));

    let other_route = Url::parse("https://shop.example/?order=AA-2024-0047#shop").unwrap();
    assert!(system.activate(&other_route).await.is_none());

    let email_only = Url::parse("https://shop.example/?email=jo@example.com#track").unwrap();
    assert!(system.activate(&email_only).await.is_none());

    let state = system.tracking_client.snapshot().await.unwrap();
    assert_eq!(state.form.identifier, "");
    assert_eq!(mock.attempts(), 0);

    system.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_system_without_endpoint_starts_and_shuts_down() {
    let system = TrackingSystem::with_transport(
        TrackingConfig::default(),
        Arc::new(MockTransport::new()),
    );
    assert!(system.config().endpoint.is_none());

    assert!(system.tracking_client.submit("AA-2024-0047", "").await.is_err());
    assert_eq!(
        system.tracking_client.snapshot().await.unwrap().phase,
        Phase::Error
    );

    system.shutdown().await.unwrap();
}

/// Serves one canned HTTP response per connection and returns the request line.
async fn serve_once(listener: TcpListener, status_line: &'static str, body: String) -> String {
    let (mut socket, _) = listener.accept().await.unwrap();
    let mut buf = vec![0u8; 4096];
    let n = socket.read(&mut buf).await.unwrap();
    let request = String::from_utf8_lossy(&buf[..n]).to_string();

    let response = format!(
        "HTTP/1.1 {status_line}\r\ncontent-type: application/json\r\ncontent-length: {}\r\nconnection: close\r\n\r\n{body}",
        body.len()
    );
    socket.write_all(response.as_bytes()).await.unwrap();
    socket.shutdown().await.unwrap();
    request.lines().next().unwrap_or_default().to_string()
}

#[tokio::test]
async fn test_http_transport_end_to_end() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let endpoint = Url::parse(&format!("http://{}/api/track", listener.local_addr().unwrap())).unwrap();
    let body = json!({
        "success": true,
        "order": { "orderId": "AA-2024-0047", "status": "Shipped", "trackingNumber": "1Z999" }
    })
    .to_string();
    let server = tokio::spawn(serve_once(listener, "200 OK", body));

    let config = TrackingConfig {
        retry: RetryPolicy::new(Duration::from_secs(5), 1),
        ..TrackingConfig::default().with_endpoint(endpoint)
    };
    let system =
        TrackingSystem::with_transport(config, Arc::new(HttpTransport::new().unwrap()));

    system
        .tracking_client
        .submit("AA-2024-0047", "jo@example.com")
        .await
        .unwrap();
    let state = system.tracking_client.wait_settled().await.unwrap();

    assert_eq!(state.phase, Phase::Displayed);
    assert_eq!(state.title.as_deref(), Some("Shipped"));
    assert_eq!(state.details.tracking_number.as_deref(), Some("1Z999"));

    let request_line = server.await.unwrap();
    assert_eq!(
        request_line,
        "GET /api/track?orderId=AA-2024-0047&secondaryFilter=jo%40example.com HTTP/1.1"
    );

    system.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_http_not_found_status_uses_envelope_error() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let endpoint = Url::parse(&format!("http://{}/api/track", listener.local_addr().unwrap())).unwrap();
    let body = json!({ "success": false, "error": "No order with that number" }).to_string();
    let server = tokio::spawn(serve_once(listener, "404 Not Found", body));

    let config = TrackingConfig {
        retry: RetryPolicy::new(Duration::from_secs(5), 1),
        ..TrackingConfig::default().with_endpoint(endpoint)
    };
    let system =
        TrackingSystem::with_transport(config, Arc::new(HttpTransport::new().unwrap()));

    system.tracking_client.submit("AA-2024-0047", "").await.unwrap();
    let state = system.tracking_client.wait_settled().await.unwrap();

    assert_eq!(state.phase, Phase::Error);
    assert_eq!(state.message.as_deref(), Some("No order with that number"));

    server.await.unwrap();
    system.shutdown().await.unwrap();
}
