use super::cursor::initial_window;
use crate::domain::error::{LlmCtlError, LlmCtlResult};
use std::fs::File;
use std::io::{Read, Write};
use std::path::Path;
use tracing::debug;

/// Write the last `last_n` complete lines of the file at `path` to `w`, or
/// every line when `last_n` is 0.
///
/// The file is read once and closed before returning. A final line without a
/// terminator is not written.
pub fn tail<W: Write + ?Sized>(path: impl AsRef<Path>, last_n: usize, w: &mut W) -> LlmCtlResult<()> {
    let path = path.as_ref();
    let bytes = read_log(path)?;
    let window = initial_window(&bytes, last_n);

    debug!(
        "Tailing {}: {} bytes, emitting {} lines",
        path.display(),
        bytes.len(),
        window.lines.len()
    );

    write_lines(w, &window.lines)?;
    Ok(())
}

fn read_log(path: &Path) -> LlmCtlResult<Vec<u8>> {
    let mut file = File::open(path).map_err(|e| LlmCtlError::log_open(path, e))?;
    let mut bytes = Vec::new();
    file.read_to_end(&mut bytes)
        .map_err(|e| LlmCtlError::log_read(path, e))?;
    Ok(bytes)
}

/// Write each line with a `\n` terminator, then flush.
pub(crate) fn write_lines<W: Write + ?Sized>(w: &mut W, lines: &[String]) -> std::io::Result<()> {
    for line in lines {
        w.write_all(line.as_bytes())?;
        w.write_all(b"\n")?;
    }
    w.flush()
}
