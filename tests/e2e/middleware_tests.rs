//! Cross-cutting HTTP layers

use lendpool_aggregator::AggregatorBuilder;

use crate::mocks::TestServer;

#[tokio::test]
async fn test_request_id_and_security_headers() {
	let server = TestServer::spawn(AggregatorBuilder::new()).await.unwrap();

	let response = reqwest::Client::new()
		.get(server.url("/health"))
		.header("x-request-id", "req-lendpool-1")
		.send()
		.await
		.unwrap();

	assert_eq!(response.status(), 200);
	let headers = response.headers();
	assert_eq!(headers["x-request-id"], "req-lendpool-1");
	assert_eq!(headers["x-content-type-options"], "nosniff");
	assert_eq!(headers["cache-control"], "no-store");

	server.abort();
}

#[tokio::test]
async fn test_cors_preflight() {
	let server = TestServer::spawn(AggregatorBuilder::new()).await.unwrap();

	let response = reqwest::Client::new()
		.request(reqwest::Method::OPTIONS, server.url("/api/aggregated-pools"))
		.header("origin", "https://app.example.com")
		.header("access-control-request-method", "GET")
		.send()
		.await
		.unwrap();

	assert!(response.status().is_success());
	assert!(response
		.headers()
		.contains_key("access-control-allow-origin"));

	server.abort();
}

#[tokio::test]
async fn test_unknown_route_is_not_found() {
	let server = TestServer::spawn(AggregatorBuilder::new()).await.unwrap();

	let response = reqwest::get(server.url("/api/v1/loans")).await.unwrap();
	assert_eq!(response.status(), 404);

	server.abort();
}
