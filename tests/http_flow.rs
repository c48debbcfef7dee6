//! End-to-end tests: a real listener on an ephemeral port, raw HTTP/1.1 over TCP

use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use fileserver::{server, AppState, CliArgs, Config};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpStream;
use tokio::sync::oneshot;
use tokio::task::JoinHandle;

struct TestServer {
    addr: SocketAddr,
    state: Arc<AppState>,
    dir: tempfile::TempDir,
    shutdown: Option<oneshot::Sender<()>>,
    task: Option<JoinHandle<()>>,
}

impl TestServer {
    /// Serve `<tempdir>/root`, leaving the tempdir itself as "outside"
    async fn start(concurrency: usize) -> Self {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path().join("root");
        std::fs::create_dir(&root).unwrap();

        let mut cfg = Config::with_defaults(&CliArgs {
            port: 0,
            root,
            concurrency,
        });
        cfg.logging.access_log = false;
        let state = Arc::new(AppState::new(cfg).unwrap());

        let listener = server::create_listener("127.0.0.1:0".parse().unwrap(), concurrency).unwrap();
        let addr = listener.local_addr().unwrap();

        let (tx, rx) = oneshot::channel::<()>();
        let task = tokio::spawn(server::serve(listener, Arc::clone(&state), async {
            let _ = rx.await;
        }));

        Self {
            addr,
            state,
            dir,
            shutdown: Some(tx),
            task: Some(task),
        }
    }

    fn root(&self) -> PathBuf {
        self.dir.path().join("root")
    }

    fn outside(&self) -> PathBuf {
        self.dir.path().to_path_buf()
    }

    async fn stop(mut self) {
        if let Some(tx) = self.shutdown.take() {
            let _ = tx.send(());
        }
        if let Some(task) = self.task.take() {
            task.await.unwrap();
        }
    }
}

struct HttpResponse {
    status: u16,
    headers: Vec<(String, String)>,
    body: Vec<u8>,
}

impl HttpResponse {
    fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }
}

fn request_head(method: &str, path: &str, content_length: usize) -> String {
    format!(
        "{method} {path} HTTP/1.1\r\nHost: localhost\r\nConnection: close\r\nContent-Length: {content_length}\r\n\r\n"
    )
}

/// Send one request on a fresh connection and read until the server closes it
async fn send(addr: SocketAddr, method: &str, path: &str, body: &[u8]) -> HttpResponse {
    let mut stream = TcpStream::connect(addr).await.unwrap();
    stream
        .write_all(request_head(method, path, body.len()).as_bytes())
        .await
        .unwrap();
    stream.write_all(body).await.unwrap();

    read_response(stream).await
}

async fn read_response(mut stream: TcpStream) -> HttpResponse {
    let mut raw = Vec::new();
    tokio::time::timeout(Duration::from_secs(10), stream.read_to_end(&mut raw))
        .await
        .expect("response timed out")
        .unwrap();

    let split = raw
        .windows(4)
        .position(|w| w == b"\r\n\r\n")
        .expect("missing header terminator");
    let head = String::from_utf8(raw[..split].to_vec()).unwrap();
    let body = raw[split + 4..].to_vec();

    let mut lines = head.split("\r\n");
    let status_line = lines.next().unwrap();
    let status = status_line
        .split_whitespace()
        .nth(1)
        .and_then(|s| s.parse().ok())
        .expect("malformed status line");
    let headers = lines
        .filter_map(|line| line.split_once(':'))
        .map(|(k, v)| (k.trim().to_string(), v.trim().to_string()))
        .collect();

    HttpResponse {
        status,
        headers,
        body,
    }
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_put_then_get_round_trip() {
    let server = TestServer::start(4).await;
    // Larger than the transfer buffer so several chunks are involved
    let payload: Vec<u8> = (0..100_000u32).map(|i| (i * 7 % 256) as u8).collect();

    let put = send(server.addr, "PUT", "/artifacts/lib-1.0.jar", &payload).await;
    assert_eq!(put.status, 204);
    assert!(put.body.is_empty());

    let get = send(server.addr, "GET", "/artifacts/lib-1.0.jar", b"").await;
    assert_eq!(get.status, 200);
    assert_eq!(get.header("content-type"), Some("application/octet-stream"));
    assert_eq!(get.header("content-length"), Some("100000"));
    assert_eq!(get.body, payload);

    server.stop().await;
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_sequential_overwrite_last_write_wins() {
    let server = TestServer::start(4).await;

    assert_eq!(send(server.addr, "PUT", "/v.txt", b"first version, longer").await.status, 204);
    assert_eq!(send(server.addr, "PUT", "/v.txt", b"second").await.status, 204);

    let get = send(server.addr, "GET", "/v.txt", b"").await;
    assert_eq!(get.status, 200);
    assert_eq!(get.body, b"second");

    server.stop().await;
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_get_missing_is_not_found() {
    let server = TestServer::start(2).await;

    let get = send(server.addr, "GET", "/nothing/here.txt", b"").await;
    assert_eq!(get.status, 404);
    assert!(get.body.is_empty());

    server.stop().await;
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_get_directory_is_bad_request() {
    let server = TestServer::start(2).await;
    std::fs::create_dir_all(server.root().join("dir")).unwrap();

    assert_eq!(send(server.addr, "GET", "/dir", b"").await.status, 400);
    assert_eq!(send(server.addr, "GET", "/", b"").await.status, 400);

    server.stop().await;
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_unsupported_method_is_bad_request() {
    let server = TestServer::start(2).await;
    std::fs::write(server.root().join("keep.txt"), b"keep").unwrap();

    let delete = send(server.addr, "DELETE", "/keep.txt", b"").await;
    assert_eq!(delete.status, 400);
    assert!(delete.body.is_empty());
    assert_eq!(send(server.addr, "POST", "/keep.txt", b"").await.status, 400);
    assert_eq!(send(server.addr, "DELETE", "/missing", b"").await.status, 400);

    assert_eq!(std::fs::read(server.root().join("keep.txt")).unwrap(), b"keep");

    server.stop().await;
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_nested_put_creates_ancestors() {
    let server = TestServer::start(2).await;

    let put = send(server.addr, "PUT", "/a/b/c/file.txt", b"deep").await;
    assert_eq!(put.status, 204);
    assert!(server.root().join("a/b/c").is_dir());

    let get = send(server.addr, "GET", "/a/b/c/file.txt", b"").await;
    assert_eq!(get.status, 200);
    assert_eq!(get.body, b"deep");

    server.stop().await;
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_traversal_never_leaves_root() {
    let server = TestServer::start(2).await;
    std::fs::write(server.outside().join("secret.txt"), b"secret").unwrap();

    let get = send(server.addr, "GET", "/../secret.txt", b"").await;
    assert_eq!(get.status, 400);
    assert!(get.body.is_empty());

    let encoded = send(server.addr, "GET", "/%2e%2e/secret.txt", b"").await;
    assert_eq!(encoded.status, 400);

    // Empty bodies: an accepted write would still truncate or create the target
    let put = send(server.addr, "PUT", "/a/../../secret.txt", b"").await;
    assert_eq!(put.status, 400);
    assert_eq!(std::fs::read(server.outside().join("secret.txt")).unwrap(), b"secret");

    let put = send(server.addr, "PUT", "/../planted.txt", b"").await;
    assert_eq!(put.status, 400);
    assert!(!server.outside().join("planted.txt").exists());

    server.stop().await;
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrency_bound_queues_excess_requests() {
    let server = TestServer::start(2).await;
    std::fs::write(server.root().join("ready.txt"), b"ready").unwrap();

    // Two uploads that announce 10 bytes but only send 5 hold both slots
    let mut stalled = Vec::new();
    for name in ["one", "two"] {
        let mut stream = TcpStream::connect(server.addr).await.unwrap();
        stream
            .write_all(request_head("PUT", &format!("/{name}.bin"), 10).as_bytes())
            .await
            .unwrap();
        stream.write_all(b"12345").await.unwrap();
        stalled.push(stream);
    }

    let deadline = tokio::time::Instant::now() + Duration::from_secs(5);
    while server.state.limiter.in_flight() < 2 {
        assert!(tokio::time::Instant::now() < deadline, "uploads never started");
        tokio::time::sleep(Duration::from_millis(10)).await;
    }

    // A third request waits for a slot rather than being rejected
    let addr = server.addr;
    let queued = tokio::spawn(async move { send(addr, "GET", "/ready.txt", b"").await });
    tokio::time::sleep(Duration::from_millis(300)).await;
    assert!(!queued.is_finished());
    assert_eq!(server.state.limiter.in_flight(), 2);

    // Finishing one upload frees a slot for the queued GET
    let mut first = stalled.remove(0);
    first.write_all(b"67890").await.unwrap();
    let first = read_response(first).await;
    assert_eq!(first.status, 204);

    let get = tokio::time::timeout(Duration::from_secs(5), queued)
        .await
        .expect("queued request never ran")
        .unwrap();
    assert_eq!(get.status, 200);
    assert_eq!(get.body, b"ready");
    assert_eq!(std::fs::read(server.root().join("one.bin")).unwrap(), b"1234567890");

    let mut second = stalled.remove(0);
    second.write_all(b"abcde").await.unwrap();
    assert_eq!(read_response(second).await.status, 204);

    server.stop().await;
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_serve_stops_on_shutdown() {
    let server = TestServer::start(1).await;
    let addr = server.addr;

    server.stop().await;

    // The listener is dropped with the loop
    assert!(TcpStream::connect(addr).await.is_err());
}
