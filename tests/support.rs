use std::ffi::OsStr;
use std::io::{Read, Write};
use std::net::{Shutdown, TcpListener, TcpStream};
use std::process::{Command, Output};
use std::sync::Arc;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::mpsc;
use std::thread;
use std::time::Duration;

pub struct ServerHandle {
    shutdown: mpsc::Sender<()>,
    thread: Option<thread::JoinHandle<()>>,
    pub flaky_hits: Arc<AtomicU32>,
}

impl Drop for ServerHandle {
    fn drop(&mut self) {
        let _send_result = self.shutdown.send(());
        if let Some(handle) = self.thread.take() {
            drop(handle.join());
        }
    }
}

/// Spawn a canned telemetry backend for tests: `/config`, `/bounds/<table>`
/// and paginated `/api/v1/<table>` list endpoints.
///
/// # Errors
///
/// Returns an error if the listener cannot be created or configured.
pub fn spawn_backend() -> Result<(String, ServerHandle), String> {
    let listener = TcpListener::bind("127.0.0.1:0")
        .map_err(|err| format!("bind test server failed: {}", err))?;
    let addr = listener
        .local_addr()
        .map_err(|err| format!("server addr failed: {}", err))?;
    listener
        .set_nonblocking(true)
        .map_err(|err| format!("set_nonblocking failed: {}", err))?;

    let (shutdown_tx, shutdown_rx) = mpsc::channel();
    let flaky_hits = Arc::new(AtomicU32::new(0));
    let flaky = Arc::clone(&flaky_hits);

    let handle = thread::spawn(move || {
        loop {
            if shutdown_rx.try_recv().is_ok() {
                break;
            }
            match listener.accept() {
                Ok((stream, _)) => {
                    let flaky = Arc::clone(&flaky);
                    thread::spawn(move || handle_client(stream, &flaky));
                }
                Err(err) if err.kind() == std::io::ErrorKind::WouldBlock => {
                    thread::sleep(Duration::from_millis(10));
                }
                Err(_) => break,
            }
        }
    });

    Ok((
        format!("http://{}", addr),
        ServerHandle {
            shutdown: shutdown_tx,
            thread: Some(handle),
            flaky_hits,
        },
    ))
}

fn handle_client(mut stream: TcpStream, flaky_hits: &AtomicU32) {
    let mut buffer = [0u8; 8192];
    let read = match stream.read(&mut buffer) {
        Ok(read) => read,
        Err(_) => return,
    };
    let request = String::from_utf8_lossy(buffer.get(..read).unwrap_or_default());
    let target = request
        .lines()
        .next()
        .and_then(|line| line.split_whitespace().nth(1))
        .unwrap_or("/");
    let (path, query) = match target.split_once('?') {
        Some((path, query)) => (path, query),
        None => (target, ""),
    };

    let (status, body) = route(path, query, flaky_hits);
    let status_text = match status {
        200 => "OK",
        404 => "Not Found",
        _ => "Internal Server Error",
    };
    let response = format!(
        "HTTP/1.1 {} {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
        status,
        status_text,
        body.len(),
        body
    );
    if stream.write_all(response.as_bytes()).is_err() {
        return;
    }
    drop(stream.flush());
    drop(stream.shutdown(Shutdown::Both));
}

fn query_param<'q>(query: &'q str, key: &str) -> Option<&'q str> {
    query.split('&').find_map(|pair| {
        let (name, value) = pair.split_once('=')?;
        (name == key).then_some(value)
    })
}

fn route(path: &str, query: &str, flaky_hits: &AtomicU32) -> (u16, String) {
    match path {
        "/config" => (
            200,
            r#"{
                "networks": ["mainnet", "holesky"],
                "path_features": {"/blob-timing": ["holesky"]}
            }"#
            .to_owned(),
        ),
        "/bounds/fct_block_first_seen_by_node" => {
            (200, r#"{"min_slot": 90, "max_slot": 103}"#.to_owned())
        }
        "/api/v1/fct_block_first_seen_by_node" => {
            first_seen_page(query_param(query, "page_token"))
        }
        "/api/v1/fct_state_size_daily" => {
            state_size_rows(query_param(query, "expiry_policy_eq").unwrap_or(""))
        }
        "/api/v1/fct_nodes_geo" => (
            200,
            r#"{"rows": [
                {"node_id": "n1", "client_name": "lighthouse", "country_code": "DE", "city": "Berlin"},
                {"node_id": "n2", "client_name": "prysm", "country_code": "DE", "city": "Munich"},
                {"node_id": "n3", "client_name": "prysm", "country_code": "US", "city": "Austin"},
                {"node_id": "n4", "client_name": "teku", "country_code": "ZZ"}
            ]}"#
            .to_owned(),
        ),
        "/api/v1/flaky" => {
            // Two transient failures, then success.
            let hit = flaky_hits.fetch_add(1, Ordering::SeqCst);
            if hit < 2 {
                (503, r#"{"error": "try later"}"#.to_owned())
            } else {
                (200, r#"{"rows": [{"slot": 1}]}"#.to_owned())
            }
        }
        _ => (404, r#"{"error": "no such route"}"#.to_owned()),
    }
}

/// Three pages of first-seen rows, including rows with missing fields that
/// the aggregation must skip.
fn first_seen_page(token: Option<&str>) -> (u16, String) {
    let body = match token {
        None => {
            r#"{"rows": [
                {"slot": 100, "node_id": "node-a", "client_name": "lighthouse", "seen_slot_start_diff_ms": 100.0},
                {"slot": 100, "node_id": "node-a", "client_name": "lighthouse", "seen_slot_start_diff_ms": 200.0}
            ], "next_page_token": "1"}"#
        }
        Some("1") => {
            r#"{"rows": [
                {"slot": 101, "node_id": "node-b", "client_name": "prysm", "seen_slot_start_diff_ms": 50.0},
                {"slot": 102, "node_id": "node-b", "client_name": "prysm"}
            ], "next_page_token": "2"}"#
        }
        Some("2") => {
            r#"{"rows": [
                {"slot": 103, "node_id": "node-a", "client_name": "lighthouse", "seen_slot_start_diff_ms": 80.0}
            ]}"#
        }
        Some(_) => return (404, r#"{"error": "no such page"}"#.to_owned()),
    };
    (200, body.to_owned())
}

/// Run the `slotscope` binary and capture output.
///
/// # Errors
///
/// Returns an error if the binary cannot be executed.
pub fn run_slotscope<I, S>(args: I) -> Result<Output, String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<OsStr>,
{
    let bin = slotscope_bin()?;
    Command::new(bin)
        .args(args)
        .env("RUST_LOG", "error")
        .env_remove("SLOTSCOPE_ENDPOINT")
        .output()
        .map_err(|err| format!("run slotscope failed: {}", err))
}

fn slotscope_bin() -> Result<String, String> {
    option_env!("CARGO_BIN_EXE_slotscope").map_or_else(
        || Err("CARGO_BIN_EXE_slotscope missing at compile time.".to_owned()),
        |path| Ok(path.to_owned()),
    )
}

fn state_size_rows(policy: &str) -> (u16, String) {
    let (base, step) = match policy {
        "none" => (1_000_000_000.0f64, 50_000_000.0f64),
        _ => (500_000_000.0, 10_000_000.0),
    };
    let rows: Vec<String> = (1u32..=9)
        .map(|day| {
            format!(
                r#"{{"date": "2026-08-{:02}", "size_bytes": {:.1}, "expiry_policy": "{}"}}"#,
                day,
                base + step * f64::from(day),
                policy
            )
        })
        .collect();
    (200, format!(r#"{{"rows": [{}]}}"#, rows.join(",")))
}
