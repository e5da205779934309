//! OS clipboard bridging.
//!
//! The analysis step shuttles article text to the external AI tool through
//! the system clipboard: the formatted prompt is copied with the platform's
//! copy utility, then the paste utility is piped into `fabric`. Each
//! platform ships a different command pair:
//!
//! | Platform | Copy | Paste |
//! |----------|------|-------|
//! | macOS | `pbcopy` | `pbpaste` |
//! | Linux | `xclip -selection clipboard` | `xclip -selection clipboard -o` |
//! | Windows | `clip` | `powershell.exe -command Get-Clipboard` |

use std::error::Error;
use std::process::Stdio;

use tokio::io::AsyncWriteExt;
use tokio::process::Command;
use tracing::{debug, instrument};

/// Guidance printed when no clipboard utility is installed on Linux.
pub const XCLIP_HELP: &str = "\
xclip not found! On Linux the clipboard bridge requires xclip:

    sudo apt-get install xclip    # Ubuntu/Debian
    sudo dnf install xclip        # Fedora

Use your distribution's package manager on other systems.";

/// The clipboard copy/paste command pair for the current platform.
#[derive(Debug, Clone)]
pub struct ClipboardBridge {
    copy: &'static [&'static str],
    paste: &'static [&'static str],
}

/// Command pair for an OS name as reported by `std::env::consts::OS`.
fn commands_for(os: &str) -> Option<(&'static [&'static str], &'static [&'static str])> {
    match os {
        "macos" => Some((&["pbcopy"], &["pbpaste"])),
        "linux" => Some((
            &["xclip", "-selection", "clipboard"],
            &["xclip", "-selection", "clipboard", "-o"],
        )),
        "windows" => Some((
            &["clip"],
            &["powershell.exe", "-command", "Get-Clipboard"],
        )),
        _ => None,
    }
}

impl ClipboardBridge {
    /// Resolve the command pair for the current platform.
    ///
    /// On Linux the `xclip` binary is probed once here; a missing utility
    /// aborts the run at startup instead of failing per article.
    ///
    /// # Errors
    ///
    /// Returns an error on unsupported platforms or when the utility is not
    /// installed.
    #[instrument(level = "info")]
    pub async fn detect() -> Result<Self, Box<dyn Error>> {
        let os = std::env::consts::OS;
        let Some((copy, paste)) = commands_for(os) else {
            return Err(format!("unsupported operating system: {os}").into());
        };

        if os == "linux" {
            let probe = Command::new("xclip")
                .arg("-version")
                .stdout(Stdio::null())
                .stderr(Stdio::null())
                .status()
                .await;
            if probe.is_err() {
                return Err(XCLIP_HELP.into());
            }
        }

        debug!(os, ?copy, ?paste, "Clipboard commands resolved");
        Ok(Self { copy, paste })
    }

    /// Copy `text` to the system clipboard through the copy utility's stdin.
    pub async fn copy(&self, text: &str) -> Result<(), Box<dyn Error>> {
        let mut child = Command::new(self.copy[0])
            .args(&self.copy[1..])
            .stdin(Stdio::piped())
            .spawn()?;

        if let Some(mut stdin) = child.stdin.take() {
            stdin.write_all(text.as_bytes()).await?;
        }

        let status = child.wait().await?;
        if !status.success() {
            return Err(format!("clipboard copy command exited with {status}").into());
        }
        Ok(())
    }

    /// The paste command rendered for embedding in a shell pipeline.
    pub fn paste_pipeline(&self) -> String {
        self.paste.join(" ")
    }

    #[cfg(test)]
    pub(crate) fn for_os(os: &str) -> Option<Self> {
        commands_for(os).map(|(copy, paste)| Self { copy, paste })
    }
}
