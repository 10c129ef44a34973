#![allow(dead_code)]

use std::io::{self, Write};
use std::sync::{Arc, Mutex, Once};

use axum::Router;
use tokio::net::TcpListener;
use tracing_subscriber::fmt::MakeWriter;
use weave::config::Config;

pub fn init_tracing_once() {
    static INIT: Once = Once::new();
    INIT.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter("weave=debug")
            .with_test_writer()
            .try_init();
    });
}

/// Config used by every test server. The body limit is small enough that
/// tests can exceed it cheaply.
pub fn test_config() -> Config {
    Config {
        log_body_limit: 1024,
        ..Config::default()
    }
}

/// Spawns the application and returns its address.
///
/// Returned address format: `http://127.0.0.1:8492`
pub async fn spawn_app() -> String {
    spawn_router(weave::app(&test_config())).await
}

/// Serves an arbitrary router on a random port and returns its address.
pub async fn spawn_router(router: Router) -> String {
    init_tracing_once();

    // Randomly choose an available port
    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind random port at localhost");
    let port = listener.local_addr().unwrap().port();

    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });

    format!("http://127.0.0.1:{port}")
}

/// In-memory log sink for asserting on what the interceptor wrote.
#[derive(Clone, Default)]
pub struct LogCapture {
    buffer: Arc<Mutex<Vec<u8>>>,
}

impl LogCapture {
    pub fn contents(&self) -> String {
        String::from_utf8_lossy(&self.buffer.lock().unwrap()).into_owned()
    }

    /// Installs a debug-level subscriber writing into this capture for the
    /// current thread. Logs stop being captured when the guard drops.
    pub fn set_default(&self) -> tracing::subscriber::DefaultGuard {
        let subscriber = tracing_subscriber::fmt()
            .with_max_level(tracing::Level::DEBUG)
            .with_ansi(false)
            .with_writer(self.clone())
            .finish();
        tracing::subscriber::set_default(subscriber)
    }
}

impl Write for LogCapture {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.buffer.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl<'a> MakeWriter<'a> for LogCapture {
    type Writer = LogCapture;

    fn make_writer(&'a self) -> Self::Writer {
        self.clone()
    }
}
