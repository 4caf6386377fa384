//! Shared utilities for integration testing.

use std::net::SocketAddr;
use std::sync::Arc;

use timmy_api::clock::SystemClock;
use timmy_api::config::AppConfig;
use timmy_api::dispatch::Dispatcher;
use timmy_api::http::HttpServer;
use timmy_api::routes::build_route_table;
use timmy_api::users::InMemoryUserDirectory;

/// Token the test server is configured with.
pub const TEST_TOKEN: &str = "integration-test-token";

/// Boot the full server on an ephemeral port and return its address.
pub async fn spawn_app() -> SocketAddr {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind ephemeral port");
    let addr = listener.local_addr().expect("listener address");

    let mut config = AppConfig::default();
    config.listener.bind_address = addr.to_string();
    config.auth.api_token = TEST_TOKEN.to_string();

    let users = Arc::new(InMemoryUserDirectory::demo());
    let table = build_route_table(&config.auth.api_token, users, Arc::new(SystemClock))
        .expect("route table builds");
    let dispatcher = Arc::new(Dispatcher::new(table));

    let server = HttpServer::new(config, dispatcher);
    tokio::spawn(async move {
        let _ = server.run(listener).await;
    });

    addr
}

/// Client that never picks up a proxy from the environment.
pub fn client() -> reqwest::Client {
    reqwest::Client::builder()
        .no_proxy()
        .build()
        .expect("build client")
}
