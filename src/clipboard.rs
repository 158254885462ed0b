/*!
 * Clipboard support for catsel
 *
 * Copies a bundle's text to the system clipboard through whichever
 * command-line clipboard utility the platform provides.
 */

use std::env;
use std::io::{self, Write};
use std::process::{Command, Stdio};
use std::sync::OnceLock;

use thiserror::Error;
use tracing::debug;

/// Error type for clipboard operations
#[derive(Error, Debug)]
pub enum ClipboardError {
    /// Failed to execute the command
    #[error("Command failed: {0}")]
    CommandFailed(String),

    /// No suitable clipboard mechanism was found
    #[error("No suitable clipboard mechanism found")]
    NoClipboardFound,

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
}

/// Result type for clipboard operations
pub type Result<T> = std::result::Result<T, ClipboardError>;

/// Capability to put text on a clipboard
pub trait Clipboard {
    /// Copy text to the clipboard
    fn copy_to_clipboard(&self, text: &str) -> Result<()>;
}

/// Available clipboard providers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ClipboardProvider {
    /// tmux paste buffer
    Tmux,
    /// X11 clipboard with xclip
    Xclip,
    /// X11 clipboard with xsel
    Xsel,
    /// Wayland clipboard
    Wayland,
    /// macOS clipboard
    MacOS,
    /// Windows clipboard (native or via WSL)
    Windows,
    /// Termux clipboard
    Termux,
}

impl ClipboardProvider {
    const ALL: [Self; 7] = [
        Self::Tmux,
        Self::Xclip,
        Self::Xsel,
        Self::Wayland,
        Self::MacOS,
        Self::Windows,
        Self::Termux,
    ];

    /// The utility this provider runs is on PATH
    fn available(self) -> bool {
        command_exists(self.command().0)
    }

    fn command(self) -> (&'static str, &'static [&'static str]) {
        match self {
            Self::Tmux => ("tmux", &["load-buffer", "-w", "-"]),
            Self::Xclip => ("xclip", &["-selection", "clipboard", "-in"]),
            Self::Xsel => ("xsel", &["--clipboard", "--input"]),
            Self::Wayland => ("wl-copy", &[]),
            Self::MacOS => ("pbcopy", &[]),
            Self::Windows => ("clip.exe", &[]),
            Self::Termux => ("termux-clipboard-set", &[]),
        }
    }
}

impl Clipboard for ClipboardProvider {
    fn copy_to_clipboard(&self, text: &str) -> Result<()> {
        let (cmd, args) = self.command();
        execute_clipboard_command(cmd, args, text)
    }
}

/// The clipboard of the machine we run on
///
/// Providers are probed lazily on each copy; the first one that succeeds wins.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClipboard;

impl Clipboard for SystemClipboard {
    fn copy_to_clipboard(&self, text: &str) -> Result<()> {
        let providers = determine_clipboard_providers();
        let mut last_error = None;

        for provider in providers {
            match provider.copy_to_clipboard(text) {
                Ok(()) => {
                    debug!(?provider, "copied to clipboard");
                    return Ok(());
                }
                Err(e) => {
                    debug!(?provider, error = %e, "clipboard provider failed");
                    last_error = Some(e);
                }
            }
        }

        Err(last_error.unwrap_or(ClipboardError::NoClipboardFound))
    }
}

//--------------------------------------------------------------------
// Public API
//--------------------------------------------------------------------

/// Check if a command exists on the system PATH
pub fn command_exists(command: &str) -> bool {
    let Some(paths) = env::var_os("PATH") else {
        return false;
    };
    env::split_paths(&paths).any(|dir| {
        let candidate = dir.join(command);
        candidate.is_file() || (cfg!(windows) && candidate.with_extension("exe").is_file())
    })
}

//--------------------------------------------------------------------
// Internal Implementation
//--------------------------------------------------------------------

/// Spawn `cmd`, feed `text` on stdin and wait for it
fn execute_clipboard_command(cmd: &str, args: &[&str], text: &str) -> Result<()> {
    let mut child = Command::new(cmd)
        .args(args)
        .stdin(Stdio::piped())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .spawn()
        .map_err(|e| ClipboardError::CommandFailed(format!("Failed to spawn {}: {}", cmd, e)))?;

    {
        let stdin = child.stdin.as_mut().ok_or_else(|| {
            ClipboardError::CommandFailed(format!("Failed to open stdin for {}", cmd))
        })?;
        stdin
            .write_all(text.as_bytes())
            .map_err(|e| ClipboardError::CommandFailed(format!("Failed to write to {}: {}", cmd, e)))?;
    }
    // Close stdin so the utility sees EOF
    drop(child.stdin.take());

    let status = child.wait()?;
    if status.success() {
        Ok(())
    } else {
        Err(ClipboardError::CommandFailed(format!(
            "{} exited with status: {}",
            cmd, status
        )))
    }
}

/// Platform detection cache
static PLATFORM: OnceLock<&'static str> = OnceLock::new();

/// Determine the platform (cached)
fn get_platform() -> &'static str {
    PLATFORM.get_or_init(|| {
        if cfg!(target_os = "macos") {
            "macos"
        } else if cfg!(target_os = "windows") {
            "windows"
        } else if cfg!(target_os = "android") {
            "android"
        } else if cfg!(target_os = "linux") {
            if env::var("WSL_DISTRO_NAME").is_ok() {
                "wsl"
            } else {
                "linux"
            }
        } else {
            "unknown"
        }
    })
}

/// Providers to try, in order of preference
fn determine_clipboard_providers() -> Vec<ClipboardProvider> {
    let mut providers = Vec::with_capacity(3);

    if env::var("TMUX").is_ok() && ClipboardProvider::Tmux.available() {
        providers.push(ClipboardProvider::Tmux);
    }

    match get_platform() {
        "macos" => {
            if ClipboardProvider::MacOS.available() {
                providers.push(ClipboardProvider::MacOS);
            }
        }
        "windows" | "wsl" => {
            if ClipboardProvider::Windows.available() {
                providers.push(ClipboardProvider::Windows);
            }
        }
        "linux" => {
            if env::var("WAYLAND_DISPLAY").is_ok() && ClipboardProvider::Wayland.available() {
                providers.push(ClipboardProvider::Wayland);
            }
            if ClipboardProvider::Xclip.available() {
                providers.push(ClipboardProvider::Xclip);
            }
            if ClipboardProvider::Xsel.available() {
                providers.push(ClipboardProvider::Xsel);
            }
        }
        "android" => {
            if ClipboardProvider::Termux.available() {
                providers.push(ClipboardProvider::Termux);
            }
        }
        _ => {}
    }

    providers
}

#[cfg(test)]
pub mod tests {
    use super::*;

    #[test]
    fn test_command_exists() {
        #[cfg(unix)]
        assert!(command_exists("sh"));
        assert!(!command_exists("nonexistentcommandxyz"));
    }

    #[test]
    fn test_get_platform() {
        let platform = get_platform();
        assert!(["macos", "windows", "wsl", "linux", "android", "unknown"].contains(&platform));
        assert_eq!(platform, get_platform());
    }

    #[test]
    fn test_provider_commands() {
        assert_eq!(ClipboardProvider::MacOS.command().0, "pbcopy");
        assert_eq!(
            ClipboardProvider::Xclip.command(),
            ("xclip", &["-selection", "clipboard", "-in"][..])
        );
    }

    #[test]
    fn test_probe_matches_command_run() {
        for provider in ClipboardProvider::ALL {
            assert_eq!(provider.available(), command_exists(provider.command().0));
        }
        assert_eq!(ClipboardProvider::Windows.command().0, "clip.exe");
    }

    #[test]
    fn test_only_available_providers_are_chosen() {
        for provider in determine_clipboard_providers() {
            assert!(provider.available(), "{:?} chosen but not on PATH", provider);
        }
    }

    #[cfg(unix)]
    #[test]
    fn test_failed_command_reports_error() {
        let err = execute_clipboard_command("false", &[], "text").unwrap_err();
        assert!(matches!(err, ClipboardError::CommandFailed(_)));
    }

    #[cfg(unix)]
    #[test]
    fn test_command_receives_text() {
        // `cat` stands in for a clipboard utility
        execute_clipboard_command("cat", &[], "hello").unwrap();
    }
}
