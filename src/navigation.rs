// ── Navigation ────────────────────────────────────────────────────────────────
//
// Open a file in a live session, move the caret to a line, and raise the
// IDE window.  Only the file-open step is mandatory.

use crate::automation::{MainWindow, Session, SessionHost, ViewKind};

/// Open `file` in `session` and scroll to `line`.
///
/// Returns `false` only when the document could not be opened; the line jump
/// and window focus are best effort.
pub fn open_file<H: SessionHost>(host: &H, session: &H::Session, file: &str, line: u32) -> bool {
    if let Err(e) = session.open_document(file, ViewKind::Primary) {
        tracing::debug!(file, error = %e, "cannot open document");
        return false;
    }

    if let Err(e) = session.goto_line(line) {
        tracing::debug!(file, line, error = %e, "cannot move selection");
    }

    match session.main_window() {
        Ok(window) => focus(host, &window),
        Err(e) => tracing::debug!(error = %e, "no main window to focus"),
    }

    true
}

fn focus<H: SessionHost>(host: &H, window: &<H::Session as Session>::Window) {
    if let Err(e) = window.activate() {
        tracing::debug!(error = %e, "cannot activate main window");
    }
    match window.native_handle() {
        Ok(handle) => {
            if !host.set_foreground(handle) {
                tracing::debug!(?handle, "foreground request refused");
            }
        }
        Err(e) => tracing::debug!(error = %e, "no native window handle"),
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
