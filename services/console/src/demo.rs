//! Demo backend: serves the console's API with generated detection data

use std::collections::VecDeque;
use std::sync::Arc;
use std::time::Duration;

use axum::extract::State;
use axum::response::IntoResponse;
use axum::routing::get;
use axum::Router;
use tokio::sync::RwLock;
use tokio_util::sync::CancellationToken;

use crate::subsystem::Subsystem;

/// Rolling window of lines kept per stream, matching the real backend's tail
const WINDOW: usize = 30;

const GENERATOR_INTERVAL: Duration = Duration::from_millis(500);

struct EventTemplate {
    src: &'static str,
    dst: &'static str,
    port: u16,
    proto: &'static str,
    kind: &'static str,
    signature: Option<&'static str>,
}

const EVENTS: [EventTemplate; 6] = [
    EventTemplate {
        src: "192.168.1.100",
        dst: "8.8.8.8",
        port: 53,
        proto: "UDP",
        kind: "DNS",
        signature: None,
    },
    EventTemplate {
        src: "192.168.1.100",
        dst: "142.250.185.46",
        port: 443,
        proto: "TCP",
        kind: "TLS",
        signature: None,
    },
    EventTemplate {
        src: "10.0.0.50",
        dst: "192.168.1.100",
        port: 4444,
        proto: "TCP",
        kind: "ALERT",
        signature: Some("Reverse Shell Detected"),
    },
    EventTemplate {
        src: "192.168.1.50",
        dst: "192.168.1.1",
        port: 80,
        proto: "TCP",
        kind: "FLOW",
        signature: None,
    },
    EventTemplate {
        src: "10.0.0.99",
        dst: "192.168.1.100",
        port: 22,
        proto: "TCP",
        kind: "ALERT",
        signature: Some("SSH Brute Force"),
    },
    EventTemplate {
        src: "192.168.1.100",
        dst: "151.101.1.140",
        port: 443,
        proto: "TCP",
        kind: "HTTP",
        signature: None,
    },
];

/// In-memory log streams plus the generator's cancellation handle
#[derive(Debug, Default)]
pub struct DemoLogs {
    suricata: VecDeque<String>,
    ann: VecDeque<String>,
    hybrid: VecDeque<String>,
    generator: Option<CancellationToken>,
    seq: u64,
}

impl DemoLogs {
    /// Append a line to a stream, trimming to the rolling window
    pub fn push(&mut self, subsystem: Subsystem, line: impl Into<String>) {
        let stream = match subsystem {
            Subsystem::Suricata => &mut self.suricata,
            Subsystem::Ann => &mut self.ann,
            Subsystem::Hybrid => &mut self.hybrid,
        };
        if stream.len() >= WINDOW {
            stream.pop_front();
        }
        stream.push_back(line.into());
    }

    /// Current snapshot of a stream, oldest first
    pub fn lines(&self, subsystem: Subsystem) -> Vec<String> {
        let stream = match subsystem {
            Subsystem::Suricata => &self.suricata,
            Subsystem::Ann => &self.ann,
            Subsystem::Hybrid => &self.hybrid,
        };
        stream.iter().cloned().collect()
    }

    pub fn generator_running(&self) -> bool {
        self.generator.is_some()
    }
}

/// Thread-safe handle shared by the router and the generator task
pub type DemoHandle = Arc<RwLock<DemoLogs>>;

pub fn new_demo_handle() -> DemoHandle {
    Arc::new(RwLock::new(DemoLogs::default()))
}

/// One generated event, rendered as a line per stream
fn event_lines(seq: u64) -> (String, String, String) {
    let template = &EVENTS[(seq as usize) % EVENTS.len()];
    let src_port = 1024 + (seq * 7919) % 64511;
    let malicious = template.signature.is_some();

    let suricata = match template.signature {
        Some(signature) => format!(
            "[ALERT] {} - {}:{} -> {}:{}",
            signature, template.src, src_port, template.dst, template.port
        ),
        None => format!(
            "[{}] {} -> {}:{} ({})",
            template.kind, template.src, template.dst, template.port, template.proto
        ),
    };

    // Scores wobble with the sequence number so panels keep changing
    let jitter = (seq % 7) as f64 * 0.0131;
    let (label, ann_score) = if malicious {
        ("MALICIOUS", 0.8871 + jitter)
    } else {
        ("NORMAL", 0.0412 + jitter)
    };
    let host_score = if malicious { 0.7150 } else { 0.0200 } + jitter;
    let final_score = (ann_score + host_score) / 2.0;

    let ann = format!("[+] Prediction: {}  Score={:.4}", label, ann_score);
    let hybrid = format!(
        "[HYBRID] {}  Score={:.4}  (ANN={:.4}, Host={:.4})",
        label, final_score, ann_score, host_score
    );

    (suricata, ann, hybrid)
}

async fn generate(logs: DemoHandle, cancel: CancellationToken) {
    loop {
        {
            let mut guard = logs.write().await;
            guard.seq += 1;
            let (suricata, ann, hybrid) = event_lines(guard.seq);
            guard.push(Subsystem::Suricata, suricata);
            guard.push(Subsystem::Ann, ann);
            guard.push(Subsystem::Hybrid, hybrid);
        }

        tokio::select! {
            _ = tokio::time::sleep(GENERATOR_INTERVAL) => {}
            _ = cancel.cancelled() => break,
        }
    }
}

/// Build the demo backend router
pub fn build_router(logs: DemoHandle) -> Router {
    Router::new()
        .route("/start", get(start_handler))
        .route("/stop", get(stop_handler))
        .route("/stream_suricata", get(stream_suricata_handler))
        .route("/stream_ann", get(stream_ann_handler))
        .route("/stream_hybrid", get(stream_hybrid_handler))
        .with_state(logs)
}

async fn start_handler(State(logs): State<DemoHandle>) -> impl IntoResponse {
    let mut guard = logs.write().await;
    if guard.generator.is_none() {
        let cancel = CancellationToken::new();
        guard.generator = Some(cancel.clone());
        tokio::spawn(generate(Arc::clone(&logs), cancel));
    }
    axum::Json(serde_json::json!({"status": "running"}))
}

async fn stop_handler(State(logs): State<DemoHandle>) -> impl IntoResponse {
    if let Some(cancel) = logs.write().await.generator.take() {
        cancel.cancel();
    }
    axum::Json(serde_json::json!({"status": "stopped"}))
}

async fn stream_suricata_handler(State(logs): State<DemoHandle>) -> impl IntoResponse {
    axum::Json(logs.read().await.lines(Subsystem::Suricata))
}

async fn stream_ann_handler(State(logs): State<DemoHandle>) -> impl IntoResponse {
    axum::Json(logs.read().await.lines(Subsystem::Ann))
}

async fn stream_hybrid_handler(State(logs): State<DemoHandle>) -> impl IntoResponse {
    axum::Json(logs.read().await.lines(Subsystem::Hybrid))
}
