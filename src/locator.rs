// ── Session locator ───────────────────────────────────────────────────────────
//
// Reuse-or-launch: look for a live IDE session that already has the
// requested workspace open; otherwise start one and wait (bounded) for its
// main window.  Every failure along the way yields `None`.

use std::{thread, time::Duration};

use crate::{
    automation::{ClassId, Session, SessionHost},
    config::{WaitPolicy, MIN_POLL_INTERVAL},
};

/// Return the first running session of `class` whose workspace path equals
/// `workspace` exactly.
pub fn find_running<H: SessionHost>(
    host: &H,
    class: &ClassId,
    workspace: &str,
) -> Option<H::Session> {
    let sessions = match host.running_sessions(class) {
        Ok(sessions) => sessions,
        Err(e) => {
            tracing::debug!(error = %e, "cannot enumerate running sessions");
            return None;
        }
    };

    for session in sessions {
        match session.workspace_path() {
            Ok(path) if path == workspace => return Some(session),
            Ok(_) => {}
            Err(e) => tracing::debug!(error = %e, "skipping session without workspace"),
        }
    }

    None
}

/// Launch a new session of `class`, make it user-visible, open `workspace`,
/// then poll for the main window according to `wait`.
pub fn open_instance<H: SessionHost>(
    host: &H,
    class: &ClassId,
    workspace: &str,
    wait: &WaitPolicy,
) -> Option<H::Session> {
    let session = match host.create_instance(class) {
        Ok(s) => s,
        Err(e) => {
            tracing::debug!(%class, error = %e, "cannot create session");
            return None;
        }
    };

    // Visibility failures do not prevent navigation.
    if let Err(e) = session.set_user_visible(true) {
        tracing::debug!(error = %e, "cannot mark session user-visible");
    }

    if let Err(e) = session.open_workspace(workspace) {
        tracing::debug!(workspace, error = %e, "cannot open workspace");
        return None;
    }

    // A zero interval would never advance `elapsed`.
    let step = wait.poll_interval.max(MIN_POLL_INTERVAL);
    let mut elapsed = Duration::ZERO;
    while elapsed < wait.timeout {
        if session.main_window().is_ok() {
            tracing::info!(%class, workspace, waited_ms = elapsed.as_millis() as u64, "session ready");
            return Some(session);
        }
        thread::sleep(step);
        elapsed += step;
    }

    tracing::warn!(%class, workspace, timeout_ms = wait.timeout.as_millis() as u64, "session did not become ready");
    None
}

/// Reuse a running session bound to `workspace`, or launch one.
pub fn find_or_open<H: SessionHost>(
    host: &H,
    class: &ClassId,
    workspace: &str,
    wait: &WaitPolicy,
) -> Option<H::Session> {
    find_running(host, class, workspace).or_else(|| open_instance(host, class, workspace, wait))
}

// ── Tests ─────────────────────────────────────────────────────────────────────
