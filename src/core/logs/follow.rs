use super::cancel::CancelToken;
use super::cursor::{initial_window, Observation, TailCursor};
use super::tail::write_lines;
use crate::domain::error::{LlmCtlError, LlmCtlResult};
use std::io::{SeekFrom, Write};
use std::path::Path;
use std::time::Duration;
use tokio::fs::File;
use tokio::io::{AsyncReadExt, AsyncSeekExt};
use tracing::{debug, trace, warn};

/// Default wait between size checks
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_millis(100);

/// Follow engine states
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FollowState {
    /// Emit the initial window and position the cursor
    Init,
    /// Wait for a tick or cancellation, then read anything new
    Polling,
    /// Cancelled; return
    Done,
}

/// Tail `path` and keep writing newly completed lines to `w` until `cancel`
/// fires, checking the file every [`DEFAULT_POLL_INTERVAL`].
pub async fn follow<W: Write + ?Sized>(
    cancel: CancelToken,
    path: impl AsRef<Path>,
    last_n: usize,
    w: &mut W,
) -> LlmCtlResult<()> {
    follow_with_interval(cancel, path, last_n, w, DEFAULT_POLL_INTERVAL).await
}

/// [`follow`] with an explicit poll interval.
///
/// Cancellation is not an error: the call returns `Ok(())` within one poll
/// interval of the token firing, or immediately if it already has. A file
/// that shrinks below the read offset is read again from the start.
pub async fn follow_with_interval<W: Write + ?Sized>(
    mut cancel: CancelToken,
    path: impl AsRef<Path>,
    last_n: usize,
    w: &mut W,
    poll_interval: Duration,
) -> LlmCtlResult<()> {
    let path = path.as_ref();
    let mut cursor = TailCursor::default();
    let mut state = FollowState::Init;

    loop {
        state = match state {
            FollowState::Init => {
                if cancel.is_cancelled() {
                    FollowState::Done
                } else {
                    cursor = emit_initial(path, last_n, w).await?;
                    debug!(
                        "Following {} from offset {} every {:?}",
                        path.display(),
                        cursor.offset(),
                        poll_interval
                    );
                    FollowState::Polling
                }
            }
            FollowState::Polling => {
                tokio::select! {
                    biased;
                    _ = cancel.cancelled() => FollowState::Done,
                    _ = tokio::time::sleep(poll_interval) => {
                        poll_once(path, &mut cursor, w).await?;
                        FollowState::Polling
                    }
                }
            }
            FollowState::Done => {
                debug!("Stopped following {}", path.display());
                return Ok(());
            }
        };
    }
}

async fn emit_initial<W: Write + ?Sized>(path: &Path, last_n: usize, w: &mut W) -> LlmCtlResult<TailCursor> {
    let mut file = File::open(path)
        .await
        .map_err(|e| LlmCtlError::log_open(path, e))?;
    let mut bytes = Vec::new();
    file.read_to_end(&mut bytes)
        .await
        .map_err(|e| LlmCtlError::log_read(path, e))?;

    let identity = match file.metadata().await {
        Ok(metadata) => file_identity(&metadata),
        Err(e) => return Err(LlmCtlError::log_read(path, e)),
    };

    let window = initial_window(&bytes, last_n);
    write_lines(w, &window.lines)?;

    Ok(TailCursor::new(bytes.len() as u64, bytes[window.consumed..].to_vec()).with_identity(identity))
}

#[cfg(unix)]
fn file_identity(metadata: &std::fs::Metadata) -> Option<u64> {
    use std::os::unix::fs::MetadataExt;
    Some(metadata.ino())
}

#[cfg(not(unix))]
fn file_identity(_metadata: &std::fs::Metadata) -> Option<u64> {
    None
}

/// One polling step: stat the file, react to growth or truncation, and write
/// any lines completed by the new bytes.
pub async fn poll_once<W: Write + ?Sized>(path: &Path, cursor: &mut TailCursor, w: &mut W) -> LlmCtlResult<()> {
    let metadata = match tokio::fs::metadata(path).await {
        Ok(metadata) => metadata,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            trace!("{} is missing, waiting for it to reappear", path.display());
            return Ok(());
        }
        Err(e) => return Err(LlmCtlError::log_read(path, e)),
    };
    let len = metadata.len();
    let modified = metadata.modified().ok();

    let replaced = cursor.replaced(file_identity(&metadata));
    let mut observation = cursor.observe(len, modified);
    if replaced {
        warn!("{} was replaced, reading the new file from the start", path.display());
        cursor.reset();
        observation = cursor.observe(len, modified);
    } else if observation == Observation::Truncated {
        warn!(
            "{} shrank from offset {} to {} bytes, reading from the start",
            path.display(),
            cursor.offset(),
            len
        );
        cursor.reset();
        observation = cursor.observe(len, modified);
    }

    match observation {
        Observation::Grown { from, to } => {
            let Some(bytes) = read_range(path, from, to).await? else {
                trace!("{} vanished before it could be read", path.display());
                return Ok(());
            };
            let lines = cursor.absorb(&bytes);
            trace!("Read {} bytes, {} complete lines", bytes.len(), lines.len());
            write_lines(w, &lines)?;
        }
        Observation::Touched => trace!("{} modified without growing", path.display()),
        Observation::Unchanged | Observation::Truncated => {}
    }

    Ok(())
}

/// Read `[from, to)`. A file that disappeared since it was stat'ed yields
/// `None`, the same as a missing file at the stat.
async fn read_range(path: &Path, from: u64, to: u64) -> LlmCtlResult<Option<Vec<u8>>> {
    let mut file = match File::open(path).await {
        Ok(file) => file,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
        Err(e) => return Err(LlmCtlError::log_open(path, e)),
    };
    file.seek(SeekFrom::Start(from))
        .await
        .map_err(|e| LlmCtlError::log_read(path, e))?;

    let mut bytes = Vec::with_capacity(to.saturating_sub(from) as usize);
    file.take(to.saturating_sub(from))
        .read_to_end(&mut bytes)
        .await
        .map_err(|e| LlmCtlError::log_read(path, e))?;
    Ok(Some(bytes))
}
