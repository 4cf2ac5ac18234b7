// Server loop module
// Accepts connections until shutdown is requested

use std::sync::atomic::AtomicUsize;
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::sync::Notify;

use super::connection::accept_connection;
use crate::config;
use crate::logger;

/// Accept loop
///
/// Runs inside a `LocalSet`; each connection becomes its own local task.
/// Returns once `shutdown` is notified. Connections still in flight are
/// not drained.
pub async fn start_server_loop(
    listener: TcpListener,
    state: Arc<config::AppState>,
    active_connections: Arc<AtomicUsize>,
    shutdown: Arc<Notify>,
) -> Result<(), Box<dyn std::error::Error>> {
    loop {
        tokio::select! {
            accept_result = listener.accept() => {
                match accept_result {
                    Ok((stream, peer_addr)) => {
                        accept_connection(stream, peer_addr, &state, &active_connections);
                    }
                    Err(e) => {
                        logger::log_error(&format!("Failed to accept connection: {e}"));
                    }
                }
            }

            () = shutdown.notified() => {
                logger::log_shutdown();
                return Ok(());
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::basic_header;
    use crate::config::{AppState, Config};
    use crate::server::create_reusable_listener;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};

    /// Send one raw HTTP/1.1 request and read until the server closes
    async fn raw_request(addr: std::net::SocketAddr, request: String) -> String {
        let mut stream = tokio::net::TcpStream::connect(addr).await.unwrap();
        stream.write_all(request.as_bytes()).await.unwrap();
        let mut buf = Vec::new();
        stream.read_to_end(&mut buf).await.unwrap();
        String::from_utf8_lossy(&buf).into_owned()
    }

    #[tokio::test]
    async fn test_serves_over_tcp_until_shutdown() {
        let tmp = tempfile::tempdir().unwrap();
        let mut cfg = Config::load_from("this-config-does-not-exist").unwrap();
        cfg.storage.root = tmp.path().to_string_lossy().into_owned();
        cfg.logging.access_log = false;
        let state = Arc::new(AppState::new(&cfg));

        let listener = create_reusable_listener("127.0.0.1:0".parse().unwrap()).unwrap();
        let addr = listener.local_addr().unwrap();
        let shutdown = Arc::new(Notify::new());

        let local = tokio::task::LocalSet::new();
        local
            .run_until(async {
                let server = tokio::task::spawn_local(start_server_loop(
                    listener,
                    Arc::clone(&state),
                    Arc::new(AtomicUsize::new(0)),
                    Arc::clone(&shutdown),
                ));

                let auth = basic_header("wedding", "photo123");
                let put = raw_request(
                    addr,
                    format!(
                        "PUT /album/img1.jpg HTTP/1.1\r\nHost: localhost\r\nAuthorization: {auth}\r\nContent-Length: 3\r\nConnection: close\r\n\r\nABC"
                    ),
                )
                .await;
                assert!(put.starts_with("HTTP/1.1 201"), "{put}");

                let get = raw_request(
                    addr,
                    format!(
                        "GET /album/img1.jpg HTTP/1.1\r\nHost: localhost\r\nAuthorization: {auth}\r\nConnection: close\r\n\r\n"
                    ),
                )
                .await;
                assert!(get.starts_with("HTTP/1.1 200"), "{get}");
                assert!(get.ends_with("\r\n\r\nABC"), "{get}");

                shutdown.notify_one();
                server.await.unwrap().unwrap();
            })
            .await;
    }
}
