//! Analytics runtime integration.
//!
//! Bridges the sync game loop with the async JSON-lines sink. The game loop
//! only ever pushes into an unbounded channel; the sink task owns the file.

use std::path::{Path, PathBuf};

use anyhow::Context;
use thiserror::Error;
use tokio::io::{AsyncWrite, AsyncWriteExt};
use tokio::runtime::Runtime;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use crate::config::AppConfig;
use crate::protocol::{current_timestamp_ms, AnalyticsRecord};
use crate::types::CoreEvent;

#[derive(Debug, Error)]
pub enum SinkError {
    #[error("analytics write failed: {0}")]
    Io(#[from] std::io::Error),
    #[error("analytics record encode failed: {0}")]
    Encode(#[from] serde_json::Error),
}

/// Encode one record as a JSON line (trailing newline included).
pub fn encode_line(record: &AnalyticsRecord, out: &mut Vec<u8>) -> Result<(), SinkError> {
    serde_json::to_writer(&mut *out, record)?;
    out.push(b'\n');
    Ok(())
}

/// Drain `rx` into `writer` until every sender is gone.
///
/// Returns the writer so callers (and tests) can inspect or close it.
pub async fn run_sink<W>(
    mut rx: mpsc::UnboundedReceiver<AnalyticsRecord>,
    mut writer: W,
) -> Result<W, SinkError>
where
    W: AsyncWrite + Unpin,
{
    let mut line = Vec::with_capacity(128);
    let mut written = 0u64;
    while let Some(record) = rx.recv().await {
        line.clear();
        if let Err(e) = encode_line(&record, &mut line) {
            tracing::warn!(error = %e, event = record.event_name.as_str(), "dropping analytics record");
            continue;
        }
        writer.write_all(&line).await?;
        writer.flush().await?;
        written += 1;
    }
    tracing::debug!(written, "analytics sink closed");
    Ok(writer)
}

/// Running analytics instance.
pub struct Analytics {
    rt: Runtime,
    tx: mpsc::UnboundedSender<AnalyticsRecord>,
    task: JoinHandle<()>,
}

impl Analytics {
    /// Start a sink appending to `path`.
    pub fn start(path: &Path) -> anyhow::Result<Self> {
        let rt = Runtime::new().context("failed to create tokio runtime")?;
        let file = rt
            .block_on(
                tokio::fs::OpenOptions::new()
                    .create(true)
                    .append(true)
                    .open(path),
            )
            .with_context(|| format!("failed to open analytics file {}", path.display()))?;

        let (tx, rx) = mpsc::unbounded_channel::<AnalyticsRecord>();
        let owned: PathBuf = path.to_path_buf();
        let task = rt.spawn(async move {
            if let Err(e) = run_sink(rx, file).await {
                tracing::warn!(error = %e, path = %owned.display(), "analytics sink stopped");
            }
        });
        tracing::info!(path = %path.display(), "analytics sink started");

        Ok(Self { rt, tx, task })
    }

    /// Start from configuration.
    ///
    /// Returns `Ok(None)` when analytics is disabled or no path is set.
    pub fn start_from_config(config: &AppConfig) -> anyhow::Result<Option<Self>> {
        match config.analytics_target() {
            Some(path) => Self::start(path).map(Some),
            None => Ok(None),
        }
    }

    /// Queue a record. Never blocks; a dead sink drops it.
    pub fn track(&self, record: AnalyticsRecord) {
        let _ = self.tx.send(record);
    }

    /// Queue the record for a session event, if it is a tracked one.
    pub fn track_event(&self, event: &CoreEvent) {
        if let Some(record) = AnalyticsRecord::from_core(event, current_timestamp_ms()) {
            self.track(record);
        }
    }

    /// Close the channel and wait for queued records to reach the file.
    pub fn shutdown(self) {
        let Self { rt, tx, task } = self;
        drop(tx);
        if let Err(e) = rt.block_on(task) {
            tracing::warn!(error = %e, "analytics sink task failed");
        }
    }
}
