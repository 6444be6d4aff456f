//! One-shot HTTP stub for exercising the client without the real API.

use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;
use tokio::task::JoinHandle;

/// Accept one connection, answer with `status` and `body`, and resolve to
/// the raw request text. Returns the base URL (`http://127.0.0.1:<port>/api`).
pub async fn serve_once(
    status: &'static str,
    body: &'static str,
) -> (String, JoinHandle<String>) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    let handle = tokio::spawn(async move {
        let (mut stream, _) = listener.accept().await.unwrap();
        let mut buf = vec![0u8; 8192];
        let n = stream.read(&mut buf).await.unwrap();
        let request = String::from_utf8_lossy(&buf[..n]).to_string();

        let response = format!(
            concat!(
                "HTTP/1.1 {}\r\nContent-Type: application/json\r\n",
                "Content-Length: {}\r\nConnection: close\r\n\r\n{}"
            ),
            status,
            body.len(),
            body
        );
        stream.write_all(response.as_bytes()).await.unwrap();
        let _ = stream.shutdown().await;
        request
    });

    (format!("http://{}/api", addr), handle)
}

/// A base URL nothing is listening on.
pub async fn refused_base_url() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{}/api", addr)
}
