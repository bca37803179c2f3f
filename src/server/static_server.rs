//! Static file server
//!
//! `ServeDir` behind no-cache headers, with a linear port probe on bind.

use anyhow::{Context, Result};
use axum::http::{header, HeaderValue};
use axum::Router;
use std::future::Future;
use std::io;
use std::net::{IpAddr, SocketAddr};
use std::path::Path;
use thiserror::Error;
use tokio::net::TcpListener;
use tokio::sync::watch;
use tower_http::services::ServeDir;
use tower_http::set_header::SetResponseHeaderLayer;

use crate::report::html::DASHBOARD_FILE;
use crate::utils::config::ServerConfig;

#[derive(Debug, Error)]
pub enum ServerError {
    #[error("failed to bind {addr}: {source}")]
    Bind {
        addr: SocketAddr,
        #[source]
        source: io::Error,
    },

    #[error("port {0} is in use and no higher port exists")]
    PortsExhausted(u16),
}

/// Bind `host:port`, moving to the next port for as long as the address is taken
///
/// Returns the listener and the port it actually bound.
pub async fn bind_with_probe(host: IpAddr, port: u16) -> Result<(TcpListener, u16), ServerError> {
    let mut port = port;
    loop {
        let addr = SocketAddr::new(host, port);
        match TcpListener::bind(addr).await {
            Ok(listener) => {
                let bound = listener.local_addr().map(|a| a.port()).unwrap_or(port);
                return Ok((listener, bound));
            }
            Err(e) if e.kind() == io::ErrorKind::AddrInUse => {
                let next = port.checked_add(1).ok_or(ServerError::PortsExhausted(port))?;
                println!("Port {} is already in use. Trying port {}", port, next);
                log::warn!("{} in use, probing port {}", addr, next);
                port = next;
            }
            Err(source) => return Err(ServerError::Bind { addr, source }),
        }
    }
}

/// File-serving router rooted at `root`
pub fn router(root: &Path) -> Router {
    Router::new()
        .fallback_service(ServeDir::new(root))
        .layer(SetResponseHeaderLayer::overriding(
            header::CACHE_CONTROL,
            HeaderValue::from_static("no-cache, no-store, must-revalidate"),
        ))
        .layer(SetResponseHeaderLayer::overriding(
            header::PRAGMA,
            HeaderValue::from_static("no-cache"),
        ))
        .layer(SetResponseHeaderLayer::overriding(
            header::EXPIRES,
            HeaderValue::from_static("0"),
        ))
}

/// Serve `root` on an already bound listener until `shutdown` resolves
pub async fn serve<F>(listener: TcpListener, root: &Path, shutdown: F) -> Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    let app = router(root);
    axum::serve(listener, app.into_make_service())
        .with_graceful_shutdown(shutdown)
        .await?;
    Ok(())
}

/// Resolves once the user hits Ctrl+C
fn interrupt_signal() -> Result<impl Future<Output = ()>> {
    let (stop_tx, mut stop_rx) = watch::channel(false);

    ctrlc::set_handler(move || {
        let _ = stop_tx.send(true);
    })
    .context("failed to install Ctrl+C handler")?;

    Ok(async move {
        let _ = stop_rx.wait_for(|stopped| *stopped).await;
        println!("\nServer stopped by user");
    })
}

/// Static file server for viewing reports
pub struct StaticServer {
    config: ServerConfig,
}

impl StaticServer {
    pub fn new(config: ServerConfig) -> Self {
        Self { config }
    }

    /// Bind, announce and serve until interrupted
    ///
    /// Bind failures other than an occupied port come back as [`ServerError`].
    pub async fn start(&self) -> Result<()> {
        let (listener, port) = bind_with_probe(self.config.host, self.config.port).await?;

        let root = std::fs::canonicalize(&self.config.root)
            .with_context(|| format!("cannot serve {}", self.config.root.display()))?;

        println!("\nServer started!");
        println!("   Open: http://localhost:{}", port);
        println!("   Serving files from: {}", root.display());
        println!("   Dashboard: http://localhost:{}/{}", port, DASHBOARD_FILE);
        println!("\n   Press Ctrl+C to stop.\n");
        log::info!("listening on {}:{}", self.config.host, port);

        let shutdown = interrupt_signal()?;
        serve(listener, &root, shutdown).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use std::net::Ipv4Addr;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tower::ServiceExt;

    const LOCALHOST: IpAddr = IpAddr::V4(Ipv4Addr::LOCALHOST);

    #[tokio::test]
    async fn test_serves_files_with_no_cache_headers() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("agent_test_report.json"), r#"{"total":5}"#).unwrap();

        let response = router(dir.path())
            .oneshot(
                Request::builder()
                    .uri("/agent_test_report.json")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let headers = response.headers();
        assert_eq!(
            headers[header::CACHE_CONTROL],
            "no-cache, no-store, must-revalidate"
        );
        assert_eq!(headers[header::PRAGMA], "no-cache");
        assert_eq!(headers[header::EXPIRES], "0");

        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        assert_eq!(&body[..], br#"{"total":5}"#);
    }

    #[tokio::test]
    async fn test_missing_file_still_disables_cache() {
        let dir = tempfile::tempdir().unwrap();

        let response = router(dir.path())
            .oneshot(Request::builder().uri("/nope.html").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_eq!(response.headers()[header::PRAGMA], "no-cache");
    }

    #[tokio::test]
    async fn test_occupied_port_moves_to_next() {
        let (_taken, port) = bind_with_probe(LOCALHOST, 0).await.unwrap();

        let (_listener, bound) = bind_with_probe(LOCALHOST, port).await.unwrap();

        assert!(bound > port, "bound {bound}, occupied {port}");
    }

    #[tokio::test]
    async fn test_other_bind_errors_are_fatal() {
        // TEST-NET-1 is never assigned to a local interface
        let host = IpAddr::V4(Ipv4Addr::new(192, 0, 2, 1));

        let err = bind_with_probe(host, 8000).await.unwrap_err();

        assert!(matches!(err, ServerError::Bind { .. }));
    }

    #[tokio::test]
    async fn test_serve_until_shutdown() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("dashboard.html"), "<h1>ok</h1>").unwrap();

        let (listener, port) = bind_with_probe(LOCALHOST, 0).await.unwrap();
        let (stop_tx, stop_rx) = tokio::sync::oneshot::channel::<()>();
        let root = dir.path().to_path_buf();
        let handle = tokio::spawn(async move {
            serve(listener, &root, async move {
                let _ = stop_rx.await;
            })
            .await
        });

        let mut stream = tokio::net::TcpStream::connect((LOCALHOST, port))
            .await
            .unwrap();
        stream
            .write_all(b"GET /dashboard.html HTTP/1.1\r\nHost: localhost\r\nConnection: close\r\n\r\n")
            .await
            .unwrap();
        let mut raw = String::new();
        stream.read_to_string(&mut raw).await.unwrap();

        assert!(raw.starts_with("HTTP/1.1 200"));
        let lowered = raw.to_ascii_lowercase();
        assert!(lowered.contains("cache-control: no-cache, no-store, must-revalidate"));
        assert!(raw.ends_with("<h1>ok</h1>"));

        stop_tx.send(()).unwrap();
        handle.await.unwrap().unwrap();
    }
}
