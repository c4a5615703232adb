//! Shared helpers for action tests: a sequenced mock HTTP server,
//! canned configuration, and event-channel plumbing.

use std::sync::{Arc, Mutex};

use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};
use tokio::sync::mpsc;

use filestore_protocol::ComponentConfig;

use crate::ActionEvent;

pub(crate) fn config_for(base_url: &str) -> ComponentConfig {
    ComponentConfig {
        api_key: "key-1".into(),
        tenant_id: "tenant-1".into(),
        resource_server_url: base_url.into(),
    }
}

pub(crate) fn events_channel() -> (mpsc::Sender<ActionEvent>, mpsc::Receiver<ActionEvent>) {
    mpsc::channel(32)
}

/// Collects every event buffered on the channel.
pub(crate) fn drain(rx: &mut mpsc::Receiver<ActionEvent>) -> Vec<ActionEvent> {
    let mut events = Vec::new();
    while let Ok(event) = rx.try_recv() {
        events.push(event);
    }
    events
}

/// Returns a port nothing listens on.
pub(crate) async fn refused_port() -> u16 {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let port = listener.local_addr().unwrap().port();
    drop(listener);
    port
}

fn find_subsequence(haystack: &[u8], needle: &[u8]) -> Option<usize> {
    haystack.windows(needle.len()).position(|w| w == needle)
}

/// Reads one full HTTP request (headers plus content-length body).
async fn read_request(stream: &mut TcpStream) -> String {
    let mut buf = Vec::new();
    let mut tmp = [0u8; 8192];
    loop {
        let n = stream.read(&mut tmp).await.unwrap_or(0);
        if n == 0 {
            break;
        }
        buf.extend_from_slice(&tmp[..n]);
        if let Some(headers_end) = find_subsequence(&buf, b"\r\n\r\n") {
            let headers = String::from_utf8_lossy(&buf[..headers_end]).to_lowercase();
            let content_length = headers
                .lines()
                .find_map(|l| l.strip_prefix("content-length:"))
                .and_then(|v| v.trim().parse::<usize>().ok())
                .unwrap_or(0);
            if buf.len() >= headers_end + 4 + content_length {
                break;
            }
        }
    }
    String::from_utf8_lossy(&buf).into_owned()
}

/// Starts a mock HTTP server answering each connection with the next
/// (status, body) pair; captures every request verbatim.
pub(crate) async fn mock_server(
    responses: Vec<(u16, String)>,
) -> (String, Arc<Mutex<Vec<String>>>, tokio::task::JoinHandle<()>) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let port = listener.local_addr().unwrap().port();
    let url = format!("http://127.0.0.1:{port}");
    let captured = Arc::new(Mutex::new(Vec::new()));
    let cap = Arc::clone(&captured);

    let handle = tokio::spawn(async move {
        for (status, body) in responses {
            let Ok((mut stream, _)) = listener.accept().await else {
                return;
            };
            let req = read_request(&mut stream).await;
            cap.lock().unwrap().push(req);

            let resp = format!(
                "HTTP/1.1 {status} OK\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                body.len(),
                body
            );
            let _ = stream.write_all(resp.as_bytes()).await;
            let _ = stream.shutdown().await;
        }
    });

    (url, captured, handle)
}
