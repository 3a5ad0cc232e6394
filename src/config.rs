use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

pub const CONFIG_FILE_NAME: &str = "config.json";
pub const FALLBACK_CONFIG_DIR: &str = "/opt/NagiosBot";

/// Display colors per notification type. Slack accepts `good`, `warning`,
/// `danger` or a hex code; Teams wants hex.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct ColorConfig {
    #[serde(rename = "ProblemColor")]
    pub problem: String,
    #[serde(rename = "RecoveryColor")]
    pub recovery: String,
    #[serde(rename = "AcknowledgeColor")]
    pub acknowledge: String,
    #[serde(rename = "FlappingStartColor")]
    pub flapping_start: String,
    #[serde(rename = "FlappingStopColor")]
    pub flapping_stop: String,
    #[serde(rename = "FlappingDisabledColor")]
    pub flapping_disabled: String,
    #[serde(rename = "DowntimeStartColor")]
    pub downtime_start: String,
    #[serde(rename = "DowntimeStopColor")]
    pub downtime_stop: String,
    #[serde(rename = "DowntimeCancelledColor")]
    pub downtime_cancelled: String,
    #[serde(rename = "DefaultColor")]
    pub default: String,
}

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct Config {
    #[serde(rename = "Debug")]
    pub debug: bool,
    #[serde(rename = "LogPath")]
    pub log_path: String,
    #[serde(rename = "SlackHookURL")]
    pub slack_hook_url: String,
    #[serde(rename = "TeamsHookURL")]
    pub teams_hook_url: String,
    #[serde(rename = "SlackChannel")]
    pub slack_channel: String,
    #[serde(rename = "SlackUsername")]
    pub slack_username: String,
    #[serde(rename = "SlackIconURL")]
    pub slack_icon_url: String,
    #[serde(rename = "SlackNagiosLink")]
    pub slack_nagios_link: String,
    #[serde(rename = "NagiosAckURL")]
    pub nagios_ack_url: String,
    #[serde(rename = "AlertSlack")]
    pub alert_slack: bool,
    #[serde(rename = "AlertTeams")]
    pub alert_teams: bool,
    #[serde(rename = "TeamsSource")]
    pub teams_source: String,
    #[serde(flatten)]
    pub colors: ColorConfig,
}

impl Config {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        let config: Config = serde_json::from_str(&contents)
            .with_context(|| format!("Failed to parse config file {}", path.display()))?;
        Ok(config)
    }

    /// Loads `config.json` from the first directory of `search_dirs` that has one.
    pub fn load_from_dirs(search_dirs: &[PathBuf]) -> Result<(Self, PathBuf)> {
        let path = locate(search_dirs).ok_or_else(|| {
            anyhow::anyhow!(
                "{} not found in any of: {}",
                CONFIG_FILE_NAME,
                search_dirs
                    .iter()
                    .map(|d| d.display().to_string())
                    .collect::<Vec<_>>()
                    .join(", ")
            )
        })?;
        let config = Self::from_file(&path)?;
        Ok((config, path))
    }

    /// Binary directory, then working directory, then the system fallback.
    pub fn load() -> Result<(Self, PathBuf)> {
        Self::load_from_dirs(&default_search_dirs())
    }

    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        let mut out = Vec::new();
        let formatter = serde_json::ser::PrettyFormatter::with_indent(b"\t");
        let mut ser = serde_json::Serializer::with_formatter(&mut out, formatter);
        self.serialize(&mut ser)?;
        fs::write(path, out)
            .with_context(|| format!("Failed to write config file {}", path.display()))?;
        Ok(())
    }
}

pub fn default_search_dirs() -> Vec<PathBuf> {
    let mut dirs = Vec::new();
    if let Some(dir) = std::env::current_exe()
        .ok()
        .and_then(|exe| exe.parent().map(Path::to_path_buf))
    {
        dirs.push(dir);
    }
    if let Ok(cwd) = std::env::current_dir() {
        dirs.push(cwd);
    }
    dirs.push(PathBuf::from(FALLBACK_CONFIG_DIR));
    dirs
}

pub fn locate(search_dirs: &[PathBuf]) -> Option<PathBuf> {
    search_dirs
        .iter()
        .map(|dir| dir.join(CONFIG_FILE_NAME))
        .find(|candidate| candidate.is_file())
}

impl Default for ColorConfig {
    fn default() -> Self {
        Self {
            problem: "danger".to_string(),
            recovery: "good".to_string(),
            acknowledge: "#439FE0".to_string(),
            flapping_start: "warning".to_string(),
            flapping_stop: "good".to_string(),
            flapping_disabled: "#808080".to_string(),
            downtime_start: "#808080".to_string(),
            downtime_stop: "good".to_string(),
            downtime_cancelled: "good".to_string(),
            default: "#808080".to_string(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            debug: false,
            log_path: "/var/log/nagios-notify.log".to_string(),
            slack_hook_url: String::new(),
            teams_hook_url: String::new(),
            slack_channel: String::new(),
            slack_username: "Nagios".to_string(),
            slack_icon_url: String::new(),
            slack_nagios_link: String::new(),
            nagios_ack_url: String::new(),
            alert_slack: false,
            alert_teams: false,
            teams_source: "Nagios".to_string(),
            colors: ColorConfig::default(),
        }
    }
}
