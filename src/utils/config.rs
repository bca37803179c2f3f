use std::net::{IpAddr, Ipv4Addr};
use std::path::PathBuf;

/// Name of the persisted run report
pub const REPORT_FILE: &str = "agent_test_report.json";

/// Name of the scratch file used by the file operations check
pub const PROBE_FILE: &str = "temp_test_file.txt";

/// Port the static server tries first
pub const DEFAULT_PORT: u16 = 8000;

/// Test runner configuration
#[derive(Debug, Clone)]
pub struct RunnerConfig {
    /// Directory the probe file and report are written to
    pub work_dir: PathBuf,

    /// Report file name, relative to `work_dir`
    pub report_file: String,

    /// Probe file name, relative to `work_dir`
    pub probe_file: String,
}

impl RunnerConfig {
    pub fn in_dir(work_dir: impl Into<PathBuf>) -> Self {
        Self {
            work_dir: work_dir.into(),
            ..Self::default()
        }
    }

    pub fn report_path(&self) -> PathBuf {
        self.work_dir.join(&self.report_file)
    }

    pub fn probe_path(&self) -> PathBuf {
        self.work_dir.join(&self.probe_file)
    }
}

impl Default for RunnerConfig {
    fn default() -> Self {
        Self {
            work_dir: PathBuf::from("."),
            report_file: REPORT_FILE.to_string(),
            probe_file: PROBE_FILE.to_string(),
        }
    }
}

/// Static file server configuration
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Interface to bind (all interfaces by default)
    pub host: IpAddr,

    /// First port to try
    pub port: u16,

    /// Directory served as the document root
    pub root: PathBuf,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: IpAddr::V4(Ipv4Addr::UNSPECIFIED),
            port: DEFAULT_PORT,
            root: PathBuf::from("."),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_runner_paths() {
        let config = RunnerConfig::in_dir("/tmp/run");
        assert_eq!(
            config.report_path(),
            PathBuf::from("/tmp/run/agent_test_report.json")
        );
        assert_eq!(
            config.probe_path(),
            PathBuf::from("/tmp/run/temp_test_file.txt")
        );
    }

    #[test]
    fn test_server_defaults() {
        let config = ServerConfig::default();
        assert_eq!(config.port, 8000);
        assert!(config.host.is_unspecified());
    }
}
