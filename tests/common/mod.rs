//! Shared utilities for integration testing.

use std::net::SocketAddr;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncReadExt, AsyncWriteExt, BufReader};
use tokio::net::TcpListener;
use tokio::task::JoinHandle;

/// A mock HTTP target that answers every request with a fixed body.
#[allow(dead_code)]
pub struct MockTarget {
    pub addr: SocketAddr,
    pub hits: Arc<AtomicUsize>,
    pub paths: Arc<Mutex<Vec<String>>>,
    pub handle: JoinHandle<()>,
}

#[allow(dead_code)]
impl MockTarget {
    pub fn hits(&self) -> usize {
        self.hits.load(Ordering::SeqCst)
    }

    /// Stop accepting; later connects are refused.
    pub async fn stop(&self) {
        self.handle.abort();
        tokio::task::yield_now().await;
    }
}

/// Start a mock HTTP target on an ephemeral port.
#[allow(dead_code)]
pub async fn start_mock_target(body: &'static str) -> MockTarget {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let hits = Arc::new(AtomicUsize::new(0));
    let paths = Arc::new(Mutex::new(Vec::new()));

    let task_hits = hits.clone();
    let task_paths = paths.clone();
    let handle = tokio::spawn(async move {
        loop {
            match listener.accept().await {
                Ok((socket, _)) => {
                    let hits = task_hits.clone();
                    let paths = task_paths.clone();
                    tokio::spawn(async move {
                        let (read, mut write) = socket.into_split();
                        let mut reader = BufReader::new(read);
                        let mut request_line = String::new();
                        if reader.read_line(&mut request_line).await.unwrap_or(0) == 0 {
                            return;
                        }
                        // Drain headers.
                        let mut line = String::new();
                        while reader.read_line(&mut line).await.unwrap_or(0) > 2 {
                            line.clear();
                        }

                        if let Some(path) = request_line.split_whitespace().nth(1) {
                            paths.lock().unwrap().push(path.to_string());
                        }
                        hits.fetch_add(1, Ordering::SeqCst);

                        let response = format!(
                            "HTTP/1.1 200 OK\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                            body.len(),
                            body
                        );
                        let _ = write.write_all(response.as_bytes()).await;
                        let _ = write.shutdown().await;
                    });
                }
                Err(_) => break,
            }
        }
    });

    MockTarget {
        addr,
        hits,
        paths,
        handle,
    }
}

/// A fake key-value store speaking just enough RESP for the probe.
#[allow(dead_code)]
pub struct FakeKvStore {
    pub addr: SocketAddr,
    pub connections: Arc<AtomicUsize>,
    pub commands: Arc<Mutex<Vec<Vec<String>>>>,
    pub handle: JoinHandle<()>,
}

#[allow(dead_code)]
impl FakeKvStore {
    pub fn connections(&self) -> usize {
        self.connections.load(Ordering::SeqCst)
    }

    /// Commands received, upper-cased name first.
    pub fn commands(&self) -> Vec<Vec<String>> {
        self.commands.lock().unwrap().clone()
    }
}

/// Start a fake key-value store on an ephemeral port.
///
/// Replies: `SMEMBERS` → empty array, `EXISTS` → 0, anything else → `+OK`.
#[allow(dead_code)]
pub async fn start_fake_kv_store() -> FakeKvStore {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let connections = Arc::new(AtomicUsize::new(0));
    let commands = Arc::new(Mutex::new(Vec::new()));

    let task_connections = connections.clone();
    let task_commands = commands.clone();
    let handle = tokio::spawn(async move {
        while let Ok((socket, _)) = listener.accept().await {
            task_connections.fetch_add(1, Ordering::SeqCst);
            let commands = task_commands.clone();
            tokio::spawn(async move {
                let (read, mut write) = socket.into_split();
                let mut reader = BufReader::new(read);
                while let Some(mut command) = read_command(&mut reader).await {
                    if let Some(name) = command.first_mut() {
                        *name = name.to_uppercase();
                    }
                    let reply: &[u8] = match command.first().map(String::as_str) {
                        Some("SMEMBERS") => b"*0\r\n",
                        Some("EXISTS") => b":0\r\n",
                        _ => b"+OK\r\n",
                    };
                    commands.lock().unwrap().push(command);
                    if write.write_all(reply).await.is_err() {
                        break;
                    }
                }
            });
        }
    });

    FakeKvStore {
        addr,
        connections,
        commands,
        handle,
    }
}

async fn read_command<R: AsyncBufRead + Unpin>(reader: &mut R) -> Option<Vec<String>> {
    let mut line = String::new();
    if reader.read_line(&mut line).await.ok()? == 0 {
        return None;
    }
    let count: usize = line.trim_end().strip_prefix('*')?.parse().ok()?;

    let mut args = Vec::with_capacity(count);
    for _ in 0..count {
        line.clear();
        reader.read_line(&mut line).await.ok()?;
        let len: usize = line.trim_end().strip_prefix('$')?.parse().ok()?;
        let mut buf = vec![0u8; len + 2];
        reader.read_exact(&mut buf).await.ok()?;
        buf.truncate(len);
        args.push(String::from_utf8_lossy(&buf).into_owned());
    }
    Some(args)
}
