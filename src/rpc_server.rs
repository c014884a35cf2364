//! ExtBookmarks RPC Server: JSON-RPC over stdin/stdout for the editor host.
//!
//! Protocol: one JSON object per line (newline-delimited JSON).
//! Request:  {"id":1, "method":"bookmark.add", "params":{"identifier":"ms-python.python","category":"Default"}}
//! Response: {"id":1, "result":{...}} or {"id":1, "error":"..."}
//!
//! Logs go to stderr; stdout carries protocol lines only.

use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::sync::Mutex;
use std::time::Instant;

use extbookmarks::app::App;
use extbookmarks::platform;
use extbookmarks::rpc_handler::handle_method;
use extbookmarks::services::settings_engine::{SettingsEngine, SettingsEngineTrait};

use log::{error, info, warn};
use serde_json::{json, Value};

const DB_FILE: &str = "extbookmarks.db";

/// Fixed-window rate limiter over all methods.
struct RateLimiter {
    window_start: Instant,
    request_count: u32,
    max_per_second: u32,
}

impl RateLimiter {
    fn new(max_per_second: u32) -> Self {
        Self { window_start: Instant::now(), request_count: 0, max_per_second }
    }

    fn check(&mut self) -> bool {
        if self.window_start.elapsed().as_secs() >= 1 {
            self.window_start = Instant::now();
            self.request_count = 0;
        }
        self.request_count += 1;
        self.request_count <= self.max_per_second
    }
}

/// `EXTBOOKMARKS_DATA_DIR` first, then the configured path, then the platform data dir.
fn database_path(configured: Option<&str>) -> PathBuf {
    if let Ok(dir) = std::env::var(platform::DATA_DIR_ENV) {
        return PathBuf::from(dir).join(DB_FILE);
    }
    match configured {
        Some(path) => PathBuf::from(path),
        None => platform::get_data_dir().join(DB_FILE),
    }
}

fn emit(line: &Value) -> io::Result<()> {
    let mut out = io::stdout().lock();
    writeln!(out, "{}", line)?;
    out.flush()
}

#[tokio::main(flavor = "current_thread")]
async fn main() {
    let mut settings_engine = SettingsEngine::new(None);
    let settings = settings_engine.load().unwrap_or_default();

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(settings.logging.filter.as_str()))
        .target(env_logger::Target::Stderr)
        .init();

    let db_path = database_path(settings.general.database_path.as_deref());
    let app = match App::new(&db_path.to_string_lossy(), None) {
        Ok(app) => Mutex::new(app),
        Err(e) => {
            error!("failed to initialize: {}", e);
            std::process::exit(1);
        }
    };
    info!("serving collection at {}", db_path.display());

    if emit(&json!({"event":"ready","version":env!("CARGO_PKG_VERSION")})).is_err() {
        return;
    }

    let mut rate_limiter = RateLimiter::new(200);

    let stdin = io::stdin();
    for line in stdin.lock().lines() {
        let line = match line {
            Ok(l) => l,
            Err(e) => {
                warn!("stdin closed: {}", e);
                break;
            }
        };
        if line.trim().is_empty() {
            continue;
        }

        let response = match serde_json::from_str::<Value>(&line) {
            Err(e) => json!({"id": null, "error": format!("parse error: {}", e)}),
            Ok(req) => {
                let id = req.get("id").cloned().unwrap_or(Value::Null);
                if !rate_limiter.check() {
                    json!({"id": id, "error": "rate limit exceeded"})
                } else {
                    let method = req.get("method").and_then(|v| v.as_str()).unwrap_or("");
                    let params = req.get("params").cloned().unwrap_or(json!({}));
                    match handle_method(&app, method, &params).await {
                        Ok(val) => json!({"id": id, "result": val}),
                        Err(err) => {
                            warn!("{} failed: {}", method, err);
                            json!({"id": id, "error": err})
                        }
                    }
                }
            }
        };

        if let Err(e) = emit(&response) {
            error!("stdout closed: {}", e);
            break;
        }
    }
}
