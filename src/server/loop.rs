// Server loop module
// Accepts connections until the shutdown future resolves, then drains them

use std::future::Future;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;
use tokio::sync::watch;

use super::connection::accept_connection;
use crate::config::AppState;
use crate::logger;

/// Interval between checks of the active connection count while draining
const DRAIN_POLL_INTERVAL: Duration = Duration::from_millis(10);

/// Accept loop. Must run inside a `LocalSet`: connections are `spawn_local` tasks.
///
/// When `shutdown` completes the listener stops accepting, every connection is
/// told to finish its current request and close, and the loop returns once
/// they are gone or `performance.shutdown_timeout_ms` has passed.
pub async fn start_server_loop<F>(
    listener: TcpListener,
    state: Arc<AppState>,
    shutdown: F,
) -> std::io::Result<()>
where
    F: Future<Output = ()>,
{
    let active_connections = Arc::new(AtomicUsize::new(0));
    let (stop_tx, stop_rx) = watch::channel(false);
    tokio::pin!(shutdown);

    loop {
        tokio::select! {
            accept_result = listener.accept() => {
                match accept_result {
                    Ok((stream, peer_addr)) => {
                        accept_connection(stream, peer_addr, &state, &active_connections, &stop_rx);
                    }
                    Err(e) => {
                        logger::log_error(&format!("Failed to accept connection: {e}"));
                    }
                }
            }

            () = &mut shutdown => {
                logger::log_shutdown();
                break;
            }
        }
    }

    drop(listener);
    stop_tx.send_replace(true);
    drain_connections(&active_connections, state.config.shutdown_timeout()).await;
    Ok(())
}

/// Wait until no connection is active, giving up after `timeout`
async fn drain_connections(active_connections: &AtomicUsize, timeout: Duration) {
    let drained = tokio::time::timeout(timeout, async {
        while active_connections.load(Ordering::SeqCst) > 0 {
            tokio::time::sleep(DRAIN_POLL_INTERVAL).await;
        }
    })
    .await;

    match drained {
        Ok(()) => logger::log_drain_complete(),
        Err(_) => logger::log_drain_timeout(active_connections.load(Ordering::SeqCst)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::messages::Messages;
    use crate::server::create_listener;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpStream;
    use tokio::sync::oneshot;

    async fn roundtrip(addr: std::net::SocketAddr, request: String) -> String {
        let mut stream = TcpStream::connect(addr).await.unwrap();
        stream.write_all(request.as_bytes()).await.unwrap();
        let mut response = String::new();
        stream.read_to_string(&mut response).await.unwrap();
        response.to_ascii_lowercase()
    }

    /// Spawn the loop on the current `LocalSet`; sending on the returned
    /// channel triggers shutdown
    fn spawn_server(
        config: Config,
    ) -> (
        std::net::SocketAddr,
        oneshot::Sender<()>,
        tokio::task::JoinHandle<std::io::Result<()>>,
    ) {
        let state = Arc::new(AppState::new(config, Messages::default()).unwrap());
        let listener = create_listener("127.0.0.1:0".parse().unwrap(), 16).unwrap();
        let addr = listener.local_addr().unwrap();
        let (tx, rx) = oneshot::channel::<()>();
        let server = tokio::task::spawn_local(start_server_loop(listener, state, async {
            let _ = rx.await;
        }));
        (addr, tx, server)
    }

    /// Connect and send a POST whose body is cut after `sent` bytes
    async fn start_partial_post(addr: std::net::SocketAddr, body: &str, sent: usize) -> TcpStream {
        let mut stream = TcpStream::connect(addr).await.unwrap();
        let head = format!(
            "POST /api/definitions HTTP/1.1\r\nHost: localhost\r\n\
             Content-Type: application/json\r\nContent-Length: {}\r\n\r\n",
            body.len()
        );
        stream.write_all(head.as_bytes()).await.unwrap();
        stream.write_all(&body.as_bytes()[..sent]).await.unwrap();
        stream
    }

    #[tokio::test]
    async fn test_serves_dictionary_over_tcp() {
        let local = tokio::task::LocalSet::new();
        local
            .run_until(async {
                let mut config = Config::default();
                config.cors.allowed_origin = "*".to_string();
                config.logging.access_log = false;
                let state = Arc::new(AppState::new(config, Messages::default()).unwrap());

                let listener = create_listener("127.0.0.1:0".parse().unwrap(), 16).unwrap();
                let addr = listener.local_addr().unwrap();
                let (tx, rx) = oneshot::channel::<()>();
                let server = tokio::task::spawn_local(start_server_loop(listener, state, async {
                    let _ = rx.await;
                }));

                let body = r#"{"word":"cat","definition":"a feline"}"#;
                let post = format!(
                    "POST /api/definitions HTTP/1.1\r\nHost: localhost\r\n\
                     Content-Type: application/json\r\nContent-Length: {}\r\n\
                     Connection: close\r\n\r\n{body}",
                    body.len()
                );
                let response = roundtrip(addr, post).await;
                assert!(response.starts_with("http/1.1 201"), "{response}");
                assert!(response.contains("access-control-allow-origin: *"));
                assert!(response.contains(r#""totalentries":1"#));

                let get = "GET /api/definitions?word=cat HTTP/1.1\r\nHost: localhost\r\n\
                           Connection: close\r\n\r\n"
                    .to_string();
                let response = roundtrip(addr, get).await;
                assert!(response.starts_with("http/1.1 200"), "{response}");
                assert!(response.contains(r#""definition":"a feline""#));

                tx.send(()).unwrap();
                server.await.unwrap().unwrap();
            })
            .await;
    }

    #[tokio::test]
    async fn test_in_flight_request_completes_after_shutdown() {
        let local = tokio::task::LocalSet::new();
        local
            .run_until(async {
                let mut config = Config::default();
                config.logging.access_log = false;
                let (addr, tx, server) = spawn_server(config);

                let body = r#"{"word":"cat","definition":"a feline"}"#;
                let mut stream = start_partial_post(addr, body, 10).await;
                tokio::time::sleep(Duration::from_millis(50)).await;

                tx.send(()).unwrap();
                tokio::time::sleep(Duration::from_millis(20)).await;
                stream.write_all(&body.as_bytes()[10..]).await.unwrap();

                let mut response = String::new();
                tokio::time::timeout(Duration::from_secs(5), stream.read_to_string(&mut response))
                    .await
                    .unwrap()
                    .unwrap();
                let response = response.to_ascii_lowercase();
                assert!(response.starts_with("http/1.1 201"), "{response}");

                // The loop returns only once the connection is gone
                tokio::time::timeout(Duration::from_secs(5), server)
                    .await
                    .unwrap()
                    .unwrap()
                    .unwrap();
            })
            .await;
    }

    #[tokio::test]
    async fn test_shutdown_gives_up_after_timeout() {
        let local = tokio::task::LocalSet::new();
        local
            .run_until(async {
                let mut config = Config::default();
                config.logging.access_log = false;
                config.performance.shutdown_timeout_ms = 50;
                let (addr, tx, server) = spawn_server(config);

                let body = r#"{"word":"cat","definition":"a feline"}"#;
                let _stuck = start_partial_post(addr, body, 10).await;
                tokio::time::sleep(Duration::from_millis(50)).await;

                tx.send(()).unwrap();
                tokio::time::timeout(Duration::from_secs(2), server)
                    .await
                    .unwrap()
                    .unwrap()
                    .unwrap();
            })
            .await;
    }
}
