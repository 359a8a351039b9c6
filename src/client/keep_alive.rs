use crate::client::sink::MessageSink;
use crate::types::ClientMessage;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::oneshot;
use tokio::task::JoinHandle;
use tokio::time::Instant;

/// Background task that pings an open stream so the endpoint does not drop it while the
/// user is still typing.
///
/// The first ping goes out one full period after [`KeepAlive::spawn`]. A failed ping is
/// logged and ends the task; it never takes the process down.
pub struct KeepAlive {
    stop: Option<oneshot::Sender<()>>,
    handle: JoinHandle<()>,
}

impl KeepAlive {
    /// Starts pinging `sink` every `period`. `period` must be non-zero.
    pub fn spawn(sink: Arc<dyn MessageSink>, period: Duration) -> Self {
        let (stop_tx, mut stop_rx) = oneshot::channel::<()>();

        let handle = tokio::spawn(async move {
            let mut ticker = tokio::time::interval_at(Instant::now() + period, period);
            loop {
                tokio::select! {
                    // Fires on an explicit stop and when the `KeepAlive` is dropped.
                    _ = &mut stop_rx => return,
                    _ = ticker.tick() => {
                        tracing::info!("→ keep-alive ping");
                        if let Err(e) = sink.send(&ClientMessage::keep_alive()).await {
                            tracing::warn!("keep-alive error: {}", e);
                            return;
                        }
                    }
                }
            }
        });

        Self {
            stop: Some(stop_tx),
            handle,
        }
    }

    /// Whether the task has already exited, either stopped or after a failed ping.
    pub fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }

    /// Signals the task and waits for it to exit. No ping is sent after this returns.
    pub async fn stop(mut self) {
        if let Some(stop) = self.stop.take() {
            // The receiver is gone if the task already ended on a failed ping.
            let _ = stop.send(());
        }
        if let Err(e) = (&mut self.handle).await {
            tracing::warn!("keep-alive task ended abnormally: {}", e);
        }
    }
}
