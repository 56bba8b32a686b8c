//! Minimal HTTP stub server for exercising the fetch stage in tests.
//!
//! Speaks just enough HTTP/1.1 for `reqwest` to be satisfied. Tracks the
//! high-water mark of concurrently in-flight requests so tests can assert
//! the fetch stage's concurrency bound.

use std::net::SocketAddr;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;

pub struct StubServer {
    addr: SocketAddr,
    high_water: Arc<AtomicUsize>,
    handle: tokio::task::JoinHandle<()>,
}

impl StubServer {
    /// Body returned for every `/img/...` request.
    pub const IMAGE_BODY: &'static [u8] = b"stub image bytes";

    /// Bind to an ephemeral local port and start serving.
    ///
    /// Routes: `/img/<name>` answers 200 with [`Self::IMAGE_BODY`] after a
    /// short delay (so overlap is observable), `/slow` stalls long enough to
    /// trip any sane per-request timeout, everything else answers 404.
    pub async fn start() -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let high_water = Arc::new(AtomicUsize::new(0));
        let inflight = Arc::new(AtomicUsize::new(0));

        let high = Arc::clone(&high_water);
        let handle = tokio::spawn(async move {
            loop {
                let Ok((mut socket, _)) = listener.accept().await else {
                    break;
                };
                let high = Arc::clone(&high);
                let inflight = Arc::clone(&inflight);
                tokio::spawn(async move {
                    let mut buf = [0u8; 2048];
                    let n = socket.read(&mut buf).await.unwrap_or(0);
                    let request = String::from_utf8_lossy(&buf[..n]).into_owned();
                    let path = request
                        .split_whitespace()
                        .nth(1)
                        .unwrap_or("/")
                        .to_string();

                    let current = inflight.fetch_add(1, Ordering::SeqCst) + 1;
                    high.fetch_max(current, Ordering::SeqCst);

                    let response = if path.starts_with("/img/") {
                        tokio::time::sleep(Duration::from_millis(50)).await;
                        let mut r = format!(
                            "HTTP/1.1 200 OK\r\nContent-Length: {}\r\nConnection: close\r\n\r\n",
                            Self::IMAGE_BODY.len()
                        )
                        .into_bytes();
                        r.extend_from_slice(Self::IMAGE_BODY);
                        r
                    } else if path == "/slow" {
                        tokio::time::sleep(Duration::from_secs(30)).await;
                        b"HTTP/1.1 200 OK\r\nContent-Length: 0\r\nConnection: close\r\n\r\n"
                            .to_vec()
                    } else {
                        b"HTTP/1.1 404 Not Found\r\nContent-Length: 0\r\nConnection: close\r\n\r\n"
                            .to_vec()
                    };

                    let _ = socket.write_all(&response).await;
                    inflight.fetch_sub(1, Ordering::SeqCst);
                    let _ = socket.shutdown().await;
                });
            }
        });

        Self {
            addr,
            high_water,
            handle,
        }
    }

    pub fn base_url(&self) -> String {
        format!("http://{}", self.addr)
    }

    /// Most requests ever observed in flight at once.
    pub fn high_water(&self) -> usize {
        self.high_water.load(Ordering::SeqCst)
    }
}

impl Drop for StubServer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}
