use std::path::PathBuf;

use clap::Parser;
use directories::ProjectDirs;

#[derive(Debug, Parser, Clone)]
#[command(name = "tvosd", about = "TvOsd: remote-friendly on-screen menu for mpv", version)]
pub(crate) struct Cli {
    /// Path to mpv's JSON IPC socket (start mpv with --input-ipc-server=PATH)
    #[arg(long = "socket", env = "TVOSD_SOCKET")]
    pub(crate) socket: PathBuf,

    /// Key that opens and closes the menu
    #[arg(long = "toggle-key", default_value = "alt+u")]
    pub(crate) toggle_key: String,

    /// Menu command/preset configuration file (JSON)
    #[arg(long = "config-file")]
    pub(crate) config_file: Option<PathBuf>,

    /// Persisted settings file (JSON)
    #[arg(long = "settings-file")]
    pub(crate) settings_file: Option<PathBuf>,

    /// Write diagnostic logs (JSON lines; path via TVOSD_TRACE_LOG)
    #[arg(long = "logs", default_value_t = false)]
    pub(crate) logs: bool,
}

impl Cli {
    pub(crate) fn settings_path(&self) -> PathBuf {
        self.settings_file
            .clone()
            .unwrap_or_else(|| default_dir().join("settings.json"))
    }

    pub(crate) fn config_path(&self) -> PathBuf {
        self.config_file
            .clone()
            .unwrap_or_else(|| default_dir().join("tvosd.conf.json"))
    }
}

fn default_dir() -> PathBuf {
    ProjectDirs::from("", "", "tvosd")
        .map(|dirs| dirs.config_dir().to_path_buf())
        .unwrap_or_else(|| PathBuf::from("."))
}
