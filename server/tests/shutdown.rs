//! SIGTERM stops the server gracefully.
//!
//! Lives in its own test binary because it signals the whole process.
#![cfg(unix)]

use std::sync::mpsc;
use std::sync::Arc;
use std::time::Duration;

use todo_core::{TodoStore, WriteMode};

#[test]
fn sigterm_stops_server_cleanly() {
    let dir = tempfile::tempdir().unwrap();
    let store =
        Arc::new(TodoStore::open(dir.path().join("todos.json"), WriteMode::Overwrite).unwrap());

    let std_listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = std_listener.local_addr().unwrap();
    std_listener.set_nonblocking(true).unwrap();

    let (done_tx, done_rx) = mpsc::channel();
    std::thread::spawn(move || {
        let rt = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .unwrap();
        let result = rt.block_on(async {
            let listener = tokio::net::TcpListener::from_std(std_listener).unwrap();
            todo_server::run(listener, store).await
        });
        done_tx.send(result.is_ok()).unwrap();
    });

    // Once a request is served the shutdown listeners are installed.
    let mut response = ureq::get(&format!("http://{addr}/healthcheck")).call().unwrap();
    assert_eq!(response.body_mut().read_to_string().unwrap(), "OK");
    drop(response);
    std::thread::sleep(Duration::from_millis(100));

    let status = std::process::Command::new("kill")
        .args(["-TERM", &std::process::id().to_string()])
        .status()
        .unwrap();
    assert!(status.success());

    let clean = done_rx.recv_timeout(Duration::from_secs(10)).unwrap();
    assert!(clean, "server returned an error on shutdown");
}
