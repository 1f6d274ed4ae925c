//! Shared utilities for integration and load testing.

use std::net::SocketAddr;
use std::time::Duration;
use tokio::net::TcpListener;

use shoe_size_converter::config::ConverterConfig;
use shoe_size_converter::http::HttpServer;
use shoe_size_converter::lifecycle::Shutdown;

/// Start a converter on an ephemeral port. Drop or trigger the returned
/// `Shutdown` to stop it.
pub async fn start_server(config: ConverterConfig) -> (SocketAddr, Shutdown) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    let shutdown = Shutdown::new();
    let server = HttpServer::new(config);
    let server_shutdown = shutdown.subscribe();

    tokio::spawn(async move {
        let _ = server.run(listener, server_shutdown).await;
    });

    // Wait for server to start
    tokio::time::sleep(Duration::from_millis(50)).await;
    (addr, shutdown)
}

/// A client that never reuses connections, so shutdown is not held open.
#[allow(dead_code)]
pub fn client() -> reqwest::Client {
    reqwest::Client::builder()
        .pool_max_idle_per_host(0)
        .no_proxy()
        .build()
        .unwrap()
}
