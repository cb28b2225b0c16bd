use std::process::Command;

use tracing::{info, warn};

use super::UiLinkOpener;

/// Opens links in the system browser.
pub struct DesktopLinkOpener;

impl DesktopLinkOpener {
    fn command(url: &str) -> Command {
        #[cfg(target_os = "macos")]
        {
            let mut cmd = Command::new("open");
            cmd.arg(url);
            cmd
        }
        #[cfg(target_os = "windows")]
        {
            let mut cmd = Command::new("cmd");
            cmd.args(["/C", "start", "", url]);
            cmd
        }
        #[cfg(not(any(target_os = "macos", target_os = "windows")))]
        {
            let mut cmd = Command::new("xdg-open");
            cmd.arg(url);
            cmd
        }
    }
}

impl UiLinkOpener for DesktopLinkOpener {
    fn open_url(&self, url: &str) {
        let url = url.trim();
        if url.is_empty() {
            return;
        }
        match Self::command(url).spawn() {
            Ok(_) => info!(%url, "opened checkout"),
            Err(err) => warn!(%url, error = %err, "failed to open link"),
        }
    }
}
