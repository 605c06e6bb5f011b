// tests/common/mod.rs
//
// Shared helpers for backend integration tests: tiny in-process upstream
// stubs bound to ephemeral ports.

#![allow(dead_code)]

use axum::Router;

/// Serve `router` on an ephemeral local port; returns the base URL.
pub async fn spawn_upstream(router: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind upstream stub");
    let addr = listener.local_addr().expect("local addr");
    tokio::spawn(async move {
        axum::serve(listener, router)
            .await
            .expect("serve upstream stub");
    });
    format!("http://{addr}")
}

/// A base URL nothing listens on: grab an ephemeral port, then release it.
pub async fn unreachable_base() -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind probe");
    let addr = listener.local_addr().expect("local addr");
    drop(listener);
    format!("http://{addr}")
}
