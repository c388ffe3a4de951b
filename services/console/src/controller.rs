//! Dashboard controller: control commands and log refresh

use std::sync::Arc;
use std::time::{SystemTime, UNIX_EPOCH};

use crate::backend_client::BackendClient;
use crate::error::ConsoleError;
use crate::state::StatusHandle;
use crate::subsystem::Subsystem;
use crate::view::View;

/// Issues control commands and refreshes the log panels.
///
/// Indicator state changes only on a successful control response; both
/// backend-reported errors and transport failures leave it untouched and are
/// surfaced through the view as an alert.
pub struct Controller {
    backend: BackendClient,
    view: Arc<dyn View>,
    status: StatusHandle,
}

impl Controller {
    pub fn new(backend: BackendClient, view: Arc<dyn View>, status: StatusHandle) -> Self {
        Self {
            backend,
            view,
            status,
        }
    }

    /// Shared indicator state, for observers
    pub fn status(&self) -> StatusHandle {
        Arc::clone(&self.status)
    }

    /// Ask the backend to start the monitored system and reflect the result
    pub async fn start_system(&self) -> crate::Result<()> {
        match self.backend.start().await {
            Ok(()) => {
                self.apply_command(true).await;
                Ok(())
            }
            Err(e) => {
                self.surface_command_error("starting", &e);
                Err(e)
            }
        }
    }

    /// Ask the backend to stop the monitored system and reflect the result
    pub async fn stop_system(&self) -> crate::Result<()> {
        match self.backend.stop().await {
            Ok(()) => {
                self.apply_command(false).await;
                Ok(())
            }
            Err(e) => {
                self.surface_command_error("stopping", &e);
                Err(e)
            }
        }
    }

    async fn apply_command(&self, running: bool) {
        let now_ms = current_epoch_ms();
        self.status.write().await.apply_command(running, now_ms);
        for subsystem in Subsystem::ALL {
            self.view.set_indicator(subsystem, running);
        }
        tracing::info!(
            "System {}",
            if running { "started" } else { "stopped" }
        );
    }

    fn surface_command_error(&self, verb: &str, err: &ConsoleError) {
        let message = match err {
            ConsoleError::Backend(reason) => format!("Error {} system: {}", verb, reason),
            other => format!("Network error: {}", other),
        };
        tracing::warn!("{}", message);
        self.view.alert(&message);
    }

    /// Fetch all three log streams and replace panel contents.
    ///
    /// The three fetches run concurrently. A failed fetch leaves that panel's
    /// previous content in place; it is not retried and not alerted.
    pub async fn refresh_logs(&self) {
        let (suricata, ann, hybrid) = tokio::join!(
            self.backend.fetch_stream(Subsystem::Suricata),
            self.backend.fetch_stream(Subsystem::Ann),
            self.backend.fetch_stream(Subsystem::Hybrid),
        );
        self.render(Subsystem::Suricata, suricata);
        self.render(Subsystem::Ann, ann);
        self.render(Subsystem::Hybrid, hybrid);
    }

    fn render(&self, subsystem: Subsystem, result: crate::Result<Vec<String>>) {
        match result {
            Ok(lines) => self.view.render_panel(subsystem, &lines),
            Err(e) => tracing::debug!("Stream fetch for '{}' failed: {}", subsystem, e),
        }
    }
}

fn current_epoch_ms() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_millis() as u64
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::io::{HttpResponse, MockHttpClient};
    use crate::state::new_status_handle;
    use crate::subsystem::IndicatorState;
    use crate::view::MockView;

    fn ok_response(body: &str) -> HttpResponse {
        HttpResponse {
            status: 200,
            body: body.to_string(),
        }
    }

    fn controller(http: MockHttpClient, view: MockView) -> Controller {
        let backend = BackendClient::new("http://127.0.0.1:7000", Arc::new(http));
        Controller::new(backend, Arc::new(view), new_status_handle())
    }

    #[tokio::test]
    async fn start_success_turns_all_indicators_on() {
        let mut http = MockHttpClient::new();
        http.expect_get()
            .withf(|url| url.ends_with("/start"))
            .returning(|_| Box::pin(async { Ok(ok_response(r#"{"status": "running"}"#)) }));

        let mut view = MockView::new();
        view.expect_set_indicator()
            .withf(|_, running| *running)
            .times(3)
            .returning(|_, _| ());

        let controller = controller(http, view);
        controller.start_system().await.unwrap();

        let status = controller.status();
        let status = status.read().await;
        for subsystem in Subsystem::ALL {
            assert_eq!(status.get(subsystem), IndicatorState::On);
        }
    }

    #[tokio::test]
    async fn stop_success_turns_all_indicators_off() {
        let mut http = MockHttpClient::new();
        http.expect_get()
            .withf(|url| url.ends_with("/stop"))
            .returning(|_| Box::pin(async { Ok(ok_response(r#"{"status": "stopped"}"#)) }));

        let mut view = MockView::new();
        view.expect_set_indicator()
            .withf(|_, running| !*running)
            .times(3)
            .returning(|_, _| ());

        let controller = controller(http, view);
        controller.stop_system().await.unwrap();

        let status = controller.status();
        let status = status.read().await;
        for subsystem in Subsystem::ALL {
            assert_eq!(status.get(subsystem), IndicatorState::Off);
        }
    }

    #[tokio::test]
    async fn backend_error_alerts_and_leaves_indicators_unchanged() {
        let mut http = MockHttpClient::new();
        http.expect_get().returning(|_| {
            Box::pin(async { Ok(ok_response(r#"{"error": "suricata refused to start"}"#)) })
        });

        let mut view = MockView::new();
        view.expect_alert()
            .withf(|message| message == "Error starting system: suricata refused to start")
            .times(1)
            .returning(|_| ());

        let controller = controller(http, view);
        let err = controller.start_system().await.unwrap_err();
        assert!(matches!(err, ConsoleError::Backend(_)));

        let status = controller.status();
        let status = status.read().await;
        for subsystem in Subsystem::ALL {
            assert_eq!(status.get(subsystem), IndicatorState::Unknown);
        }
    }

    #[tokio::test]
    async fn stop_backend_error_uses_stopping_wording() {
        let mut http = MockHttpClient::new();
        http.expect_get()
            .returning(|_| Box::pin(async { Ok(ok_response(r#"{"error": "busy"}"#)) }));

        let mut view = MockView::new();
        view.expect_alert()
            .withf(|message| message == "Error stopping system: busy")
            .times(1)
            .returning(|_| ());

        let controller = controller(http, view);
        controller.stop_system().await.unwrap_err();
    }

    #[tokio::test]
    async fn transport_failure_alerts_network_error() {
        let mut http = MockHttpClient::new();
        http.expect_get().returning(|_| {
            Box::pin(async { Err(ConsoleError::Http("connection refused".to_string())) })
        });

        let mut view = MockView::new();
        view.expect_alert()
            .withf(|message| message.starts_with("Network error:"))
            .times(1)
            .returning(|_| ());

        let controller = controller(http, view);
        let err = controller.start_system().await.unwrap_err();
        assert!(matches!(err, ConsoleError::Http(_)));

        let status = controller.status();
        let status = status.read().await;
        assert_eq!(status.get(Subsystem::Ann), IndicatorState::Unknown);
    }

    #[tokio::test]
    async fn empty_error_field_counts_as_success() {
        let mut http = MockHttpClient::new();
        http.expect_get()
            .returning(|_| Box::pin(async { Ok(ok_response(r#"{"error": ""}"#)) }));

        let mut view = MockView::new();
        view.expect_set_indicator().times(3).returning(|_, _| ());

        let controller = controller(http, view);
        controller.start_system().await.unwrap();
    }

    #[tokio::test]
    async fn refresh_replaces_each_panel_with_its_stream() {
        let mut http = MockHttpClient::new();
        http.expect_get().returning(|url| {
            let body = if url.ends_with("/stream_ann") {
                r#"["a", "b"]"#
            } else if url.ends_with("/stream_hybrid") {
                r#"[]"#
            } else {
                r#"["[ALERT] SSH Brute Force"]"#
            };
            let response = ok_response(body);
            Box::pin(async move { Ok(response) })
        });

        let mut view = MockView::new();
        view.expect_render_panel()
            .withf(|subsystem, lines| {
                *subsystem == Subsystem::Ann && lines == ["a".to_string(), "b".to_string()]
            })
            .times(1)
            .returning(|_, _| ());
        view.expect_render_panel()
            .withf(|subsystem, lines| *subsystem == Subsystem::Hybrid && lines.is_empty())
            .times(1)
            .returning(|_, _| ());
        view.expect_render_panel()
            .withf(|subsystem, lines| {
                *subsystem == Subsystem::Suricata
                    && lines == ["[ALERT] SSH Brute Force".to_string()]
            })
            .times(1)
            .returning(|_, _| ());

        let controller = controller(http, view);
        controller.refresh_logs().await;
    }

    #[tokio::test]
    async fn repeated_identical_refresh_rerenders_panels() {
        let mut http = MockHttpClient::new();
        http.expect_get()
            .returning(|_| Box::pin(async { Ok(ok_response(r#"["same"]"#)) }));

        let mut view = MockView::new();
        view.expect_render_panel()
            .withf(|_, lines| lines == ["same".to_string()])
            .times(6)
            .returning(|_, _| ());

        let controller = controller(http, view);
        controller.refresh_logs().await;
        controller.refresh_logs().await;
    }

    #[tokio::test]
    async fn failed_stream_leaves_panel_stale() {
        let mut http = MockHttpClient::new();
        http.expect_get().returning(|url| {
            if url.ends_with("/stream_hybrid") {
                Box::pin(async { Err(ConsoleError::Http("timeout".to_string())) })
            } else {
                let response = ok_response(r#"["line"]"#);
                Box::pin(async move { Ok(response) })
            }
        });

        let mut view = MockView::new();
        view.expect_render_panel()
            .withf(|subsystem, _| *subsystem != Subsystem::Hybrid)
            .times(2)
            .returning(|_, _| ());

        let controller = controller(http, view);
        controller.refresh_logs().await;
    }
}
