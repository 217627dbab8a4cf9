//! Application configuration and record-list loading.
//!
//! `relink.ron` in the working directory overrides the defaults; a
//! missing file means defaults. The record list itself lives in the
//! site's `links.json`, grouped per channel.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::Context;
use relink_engine::{CdpSettings, SaveSettings, SourceRecord};
use serde::Deserialize;

use crate::logging::LogDestination;

const CONFIG_FILENAME: &str = "relink.ron";

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub links_path: PathBuf,
    pub channel: String,
    pub article_base: String,
    pub debugger_ws_url: String,
    pub report_dir: PathBuf,
    pub report_filename: String,
    pub journal_filename: String,
    pub log_destination: LogDestination,
    pub navigation_timeout_ms: u64,
    pub save_ready_timeout_ms: u64,
    pub save_settle_timeout_ms: u64,
    pub poll_interval_ms: u64,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            links_path: PathBuf::from("config/links.json"),
            channel: "قناتي الثانية".to_string(),
            article_base: "https://rahumi.com/article/".to_string(),
            debugger_ws_url: "ws://127.0.0.1:9222/devtools/browser".to_string(),
            report_dir: PathBuf::from("."),
            report_filename: "batch_report.txt".to_string(),
            journal_filename: "batch_report.journal".to_string(),
            log_destination: LogDestination::Both,
            navigation_timeout_ms: 15_000,
            save_ready_timeout_ms: 3_000,
            save_settle_timeout_ms: 15_000,
            poll_interval_ms: 250,
        }
    }
}

impl AppConfig {
    /// Loads `relink.ron` from the working directory, defaulting every
    /// absent field. A missing file is not an error.
    pub fn load() -> anyhow::Result<Self> {
        Self::load_from(Path::new(CONFIG_FILENAME))
    }

    pub fn load_from(path: &Path) -> anyhow::Result<Self> {
        let content = match fs::read_to_string(path) {
            Ok(text) => text,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                return Ok(Self::default());
            }
            Err(err) => {
                return Err(err).with_context(|| format!("could not read config {path:?}"))
            }
        };
        ron::from_str(&content).with_context(|| format!("could not parse config {path:?}"))
    }

    pub fn cdp_settings(&self) -> CdpSettings {
        CdpSettings {
            debugger_ws_url: self.debugger_ws_url.clone(),
            navigation_timeout: Duration::from_millis(self.navigation_timeout_ms),
            poll_interval: Duration::from_millis(self.poll_interval_ms),
        }
    }

    pub fn save_settings(&self) -> SaveSettings {
        SaveSettings {
            ready_timeout: Duration::from_millis(self.save_ready_timeout_ms),
            settle_timeout: Duration::from_millis(self.save_settle_timeout_ms),
            poll_interval: Duration::from_millis(self.poll_interval_ms),
        }
    }

    pub fn journal_path(&self) -> PathBuf {
        self.report_dir.join(&self.journal_filename)
    }
}

#[derive(Debug, Deserialize)]
struct ChannelEntry {
    #[serde(default)]
    links: Vec<LinkEntry>,
}

#[derive(Debug, Deserialize)]
struct LinkEntry {
    video_link: String,
    // Extra per-link fields (display name, ordinal) exist in the file but
    // are irrelevant to this run.
}

/// Reads the record list for one channel from `links.json`, preserving
/// file order.
pub fn load_records(path: &Path, channel: &str) -> anyhow::Result<Vec<SourceRecord>> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("could not read record list {path:?}"))?;
    let channels: HashMap<String, ChannelEntry> =
        serde_json::from_str(&content).with_context(|| format!("could not parse {path:?}"))?;
    let entry = channels
        .get(channel)
        .with_context(|| format!("channel {channel:?} not found in {path:?}"))?;
    Ok(entry
        .links
        .iter()
        .map(|link| SourceRecord::new(link.video_link.clone()))
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn missing_config_file_yields_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let cfg = AppConfig::load_from(&dir.path().join("relink.ron")).unwrap();
        assert_eq!(cfg.report_filename, "batch_report.txt");
        assert_eq!(cfg.save_settings().ready_timeout, Duration::from_secs(3));
    }

    #[test]
    fn partial_config_overrides_only_named_fields() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("relink.ron");
        fs::write(&path, r#"(channel: "قناة أخرى", poll_interval_ms: 100)"#).unwrap();

        let cfg = AppConfig::load_from(&path).unwrap();
        assert_eq!(cfg.channel, "قناة أخرى");
        assert_eq!(cfg.cdp_settings().poll_interval, Duration::from_millis(100));
        assert_eq!(cfg.report_filename, "batch_report.txt");
    }

    #[test]
    fn records_load_for_the_requested_channel_in_order() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("links.json");
        let mut file = fs::File::create(&path).unwrap();
        write!(
            file,
            r#"{{
                "قناتي الثانية": {{
                    "links": [
                        {{ "video_link": "https://youtu.be/a", "name": "الأولى", "n": 2 }},
                        {{ "video_link": "https://youtu.be/b", "n": 1 }}
                    ]
                }},
                "other": {{ "links": [] }}
            }}"#
        )
        .unwrap();

        let records = load_records(&path, "قناتي الثانية").unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].video_url, "https://youtu.be/a");
        assert_eq!(records[1].video_url, "https://youtu.be/b");

        assert!(load_records(&path, "غير موجودة").is_err());
    }
}
