/*!
 * Opening a bundle with the desktop's default application
 */

use std::io;
use std::path::Path;
use std::process::{Child, Command, ExitStatus, Stdio};
use std::thread::{self, JoinHandle};

use tracing::debug;

use crate::clipboard::command_exists;
use crate::error::{CatselError, Result};

const NO_ARGS: &[&str] = &[];
const WINDOWS_START: &[&str] = &["/c", "start", ""];

/// Capability to hand a file to an external application
pub trait Launcher {
    /// Open `path`; the file is left in place for the application
    fn open(&self, path: &Path) -> Result<()>;
}

/// Launcher backed by the platform's "open" utility
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemLauncher;

impl SystemLauncher {
    /// Program and leading arguments used to open a file
    fn opener() -> Option<(&'static str, &'static [&'static str])> {
        if cfg!(target_os = "macos") {
            Some(("open", NO_ARGS))
        } else if cfg!(target_os = "windows") {
            Some(("cmd", WINDOWS_START))
        } else {
            ["xdg-open", "gnome-open", "kde-open"]
                .into_iter()
                .find(|cmd| command_exists(cmd))
                .map(|cmd| (cmd, NO_ARGS))
        }
    }
}

impl Launcher for SystemLauncher {
    fn open(&self, path: &Path) -> Result<()> {
        let (program, args) = Self::opener().ok_or_else(|| CatselError::OpenFailed {
            path: path.to_path_buf(),
            reason: "no opener found (tried xdg-open, gnome-open, kde-open)".to_string(),
        })?;

        debug!(program, path = %path.display(), "opening bundle");

        // Detached: the application outlives this call
        let child = Command::new(program)
            .args(args)
            .arg(path)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()
            .map_err(|e| CatselError::OpenFailed {
                path: path.to_path_buf(),
                reason: e.to_string(),
            })?;

        if let Err(e) = reap_detached(child) {
            debug!(program, error = %e, "could not start reaper thread");
        }
        Ok(())
    }
}

/// Wait for `child` on a background thread so it does not linger as a zombie
fn reap_detached(mut child: Child) -> io::Result<JoinHandle<io::Result<ExitStatus>>> {
    thread::Builder::new()
        .name("catsel-opener".to_string())
        .spawn(move || {
            let status = child.wait();
            debug!(?status, "opener exited");
            status
        })
}
