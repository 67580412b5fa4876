use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

// Re-export types from library crates
pub use pdf_grid::{ExportOptions, ExportOutput, ExportPhase, GridStatistics, ImageInput};

/// One export job
#[derive(Debug)]
pub struct ExportRequest {
    pub inputs: Vec<ImageInput>,
    pub options: ExportOptions,
    /// Directory the finished PDF is written to
    pub output_dir: PathBuf,
}

/// Commands sent from a front end to the worker
#[derive(Debug)]
pub enum ExportCommand {
    Export(ExportRequest),
    CalculateStats {
        image_count: usize,
        options: ExportOptions,
    },
}

/// Updates sent from the worker to a front end
#[derive(Debug, Clone, PartialEq)]
pub enum ExportUpdate {
    Status {
        message: String,
    },
    Progress {
        operation: String,
        current: usize,
        total: usize,
    },
    Complete {
        path: PathBuf,
        page_count: usize,
        byte_len: usize,
    },
    StatsCalculated {
        stats: GridStatistics,
    },
    Error {
        message: String,
    },
}

/// Runs exports one at a time.
///
/// A request made while another export is in flight is dropped.
#[derive(Debug, Clone, Default)]
pub struct ExportSession {
    in_flight: Arc<AtomicBool>,
}

impl ExportSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_busy(&self) -> bool {
        self.in_flight.load(Ordering::Acquire)
    }

    /// Run an export to completion.
    ///
    /// Returns `None` without doing anything when an export is already running.
    pub async fn export(
        &self,
        request: ExportRequest,
        update_tx: &mpsc::UnboundedSender<ExportUpdate>,
    ) -> Option<pdf_grid::Result<ExportOutput>> {
        let Some(_guard) = InFlightGuard::acquire(&self.in_flight) else {
            log::warn!("Export already in progress, ignoring request");
            return None;
        };
        Some(run_export(request, update_tx).await)
    }

    /// Start an export on the runtime and return immediately.
    ///
    /// Returns `None` when an export is already running. Must be called from
    /// within a tokio runtime.
    pub fn spawn(
        &self,
        request: ExportRequest,
        update_tx: mpsc::UnboundedSender<ExportUpdate>,
    ) -> Option<JoinHandle<()>> {
        let Some(guard) = InFlightGuard::acquire(&self.in_flight) else {
            log::warn!("Export already in progress, ignoring request");
            return None;
        };
        Some(tokio::spawn(async move {
            let _guard = guard;
            let _ = run_export(request, &update_tx).await;
        }))
    }
}

/// Holds the in-flight flag; clears it on drop, including during unwinding
struct InFlightGuard {
    flag: Arc<AtomicBool>,
}

impl InFlightGuard {
    fn acquire(flag: &Arc<AtomicBool>) -> Option<Self> {
        flag.compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| Self { flag: flag.clone() })
    }
}

impl Drop for InFlightGuard {
    fn drop(&mut self) {
        self.flag.store(false, Ordering::Release);
    }
}

async fn run_export(
    request: ExportRequest,
    update_tx: &mpsc::UnboundedSender<ExportUpdate>,
) -> pdf_grid::Result<ExportOutput> {
    let ExportRequest {
        inputs,
        options,
        output_dir,
    } = request;

    let result = match pdf_grid::export_pdf(inputs, &options, |phase| send_phase(update_tx, phase))
        .await
    {
        Ok(output) => {
            let path = output_dir.join(&output.file_name);
            match write_output(&path, &output.bytes).await {
                Ok(()) => Ok((path, output)),
                Err(e) => Err(pdf_grid::GridError::Io(e)),
            }
        }
        Err(e) => Err(e),
    };

    match result {
        Ok((path, output)) => {
            log::info!("Wrote {}", path.display());
            let done = ExportPhase::Done {
                page_count: output.page_count,
                byte_len: output.bytes.len(),
            };
            let _ = update_tx.send(ExportUpdate::Status {
                message: done.to_string(),
            });
            let _ = update_tx.send(ExportUpdate::Complete {
                path,
                page_count: output.page_count,
                byte_len: output.bytes.len(),
            });
            Ok(output)
        }
        Err(e) => {
            log::error!("PDF export failed: {}", e);
            let _ = update_tx.send(ExportUpdate::Error {
                message: pdf_grid::FAILURE_HINT.to_string(),
            });
            Err(e)
        }
    }
}

/// Write `bytes` to a sibling temp file, then rename it over `path`.
///
/// The temp file is removed on failure, so `path` is either the complete
/// PDF or untouched.
async fn write_output(path: &Path, bytes: &[u8]) -> std::io::Result<()> {
    let mut temp_name = path.as_os_str().to_owned();
    temp_name.push(".tmp");
    let temp_path = PathBuf::from(temp_name);

    let result = match tokio::fs::write(&temp_path, bytes).await {
        Ok(()) => tokio::fs::rename(&temp_path, path).await,
        Err(e) => Err(e),
    };
    if result.is_err() {
        let _ = tokio::fs::remove_file(&temp_path).await;
    }
    result
}

fn send_phase(update_tx: &mpsc::UnboundedSender<ExportUpdate>, phase: &ExportPhase) {
    match phase {
        // Done is reported once the file is written; Failed as a generic
        // error after the cause is logged
        ExportPhase::Done { .. } | ExportPhase::Failed { .. } => return,
        ExportPhase::ProcessingImage { index, total } => {
            let _ = update_tx.send(ExportUpdate::Progress {
                operation: "Processing images".to_string(),
                current: index + 1,
                total: *total,
            });
        }
        _ => {}
    }
    let _ = update_tx.send(ExportUpdate::Status {
        message: phase.to_string(),
    });
}

/// Async worker task that processes export commands and sends updates
pub async fn worker_task(
    mut command_rx: mpsc::UnboundedReceiver<ExportCommand>,
    update_tx: mpsc::UnboundedSender<ExportUpdate>,
) {
    let session = ExportSession::new();
    let mut running: Vec<JoinHandle<()>> = Vec::new();

    while let Some(cmd) = command_rx.recv().await {
        match cmd {
            ExportCommand::Export(request) => {
                if let Some(handle) = session.spawn(request, update_tx.clone()) {
                    running.push(handle);
                }
            }
            ExportCommand::CalculateStats {
                image_count,
                options,
            } => {
                let stats = pdf_grid::calculate_statistics(
                    image_count,
                    &options.geometry(),
                    &options.decoration(),
                );
                let _ = update_tx.send(ExportUpdate::StatsCalculated { stats });
            }
        }
        running.retain(|handle| !handle.is_finished());
    }

    // Let any in-flight export deliver its final update
    for handle in running {
        let _ = handle.await;
    }
}
