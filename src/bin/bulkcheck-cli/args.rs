use std::path::PathBuf;
use std::time::Duration;

use clap::{Parser, ValueEnum};
use bulkcheck_lib::{PipelineSettings, ProbeOptions};
use tracing::Level;

#[derive(Parser, Debug)]
#[command(name = "bulkcheck-cli", about = "Probe a list of addresses against their mail exchangers")]
pub struct Cli {
    /// address list, one per line
    #[arg(long, env = "BULKCHECK_EMAILS_LIST")]
    pub input: PathBuf,

    /// directory receiving output-<timestamp>.csv
    #[arg(long = "output-dir", env = "BULKCHECK_OUTPUT_DIR")]
    pub output_dir: PathBuf,

    /// number of probes running at once per domain
    #[arg(long, env = "BULKCHECK_MAX_CONCURRENCY", default_value_t = bulkcheck_lib::DEFAULT_MAX_CONCURRENCY)]
    pub max_concurrency: usize,

    /// SMTP port of the mail exchangers
    #[arg(long, env = "BULKCHECK_SMTP_PORT", default_value_t = bulkcheck_lib::SMTP_PORT)]
    pub port: u16,

    /// name announced with HELO
    #[arg(long = "helo-domain", env = "BULKCHECK_HELO_DOMAIN", default_value = "localhost")]
    pub helo_domain: String,

    /// sender used in MAIL FROM
    #[arg(long = "mail-from", env = "BULKCHECK_MAIL_FROM", default_value = "TEST@DOMAIN.com")]
    pub mail_from: String,

    /// do not wait for the server banner before HELO
    #[arg(long = "skip-greeting")]
    pub skip_greeting: bool,

    /// read timeout for greeting, HELO and MAIL FROM replies
    #[arg(long = "helo-timeout-secs", default_value_t = 10)]
    pub helo_timeout_secs: u64,

    /// read timeout for the RCPT TO reply
    #[arg(long = "rcpt-timeout-secs", default_value_t = 60)]
    pub rcpt_timeout_secs: u64,

    #[arg(long = "connect-timeout-secs", default_value_t = 10)]
    pub connect_timeout_secs: u64,

    /// hard limit on one SMTP dialogue
    #[arg(long = "probe-deadline-secs", default_value_t = 120)]
    pub probe_deadline_secs: u64,

    /// how MX records are obtained
    #[arg(long = "mx-backend", value_enum, env = "BULKCHECK_MX_BACKEND", default_value_t = MxBackend::Nslookup)]
    pub mx_backend: MxBackend,

    /// trace|debug|info|warn|error
    #[arg(long = "log-level", env = "BULKCHECK_LOG", default_value = "info")]
    pub log_level: String,
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum MxBackend {
    /// run `nslookup -type=mx`
    Nslookup,
    /// query DNS directly (feature `with-dns`)
    #[cfg(feature = "with-dns")]
    Dns,
}

impl Cli {
    pub fn probe_options(&self) -> ProbeOptions {
        ProbeOptions {
            helo_domain: self.helo_domain.clone(),
            mail_from: self.mail_from.clone(),
            read_greeting: !self.skip_greeting,
            connect_timeout: Duration::from_secs(self.connect_timeout_secs),
            command_timeout: Duration::from_secs(self.helo_timeout_secs),
            rcpt_timeout: Duration::from_secs(self.rcpt_timeout_secs),
            probe_deadline: Duration::from_secs(self.probe_deadline_secs),
        }
    }

    pub fn pipeline_settings(&self) -> PipelineSettings {
        PipelineSettings {
            max_concurrency: self.max_concurrency,
            port: self.port,
        }
    }

    pub fn level(&self) -> Level {
        level_from_str(&self.log_level)
    }
}

pub fn level_from_str(s: &str) -> Level {
    match s.to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_probe_defaults() {
        let cli = Cli::try_parse_from([
            "bulkcheck-cli",
            "--input",
            "emails.txt",
            "--output-dir",
            "out",
        ])
        .expect("parse");
        assert_eq!(cli.pipeline_settings(), PipelineSettings::default());
        assert_eq!(cli.probe_options(), ProbeOptions::default());
        assert_eq!(cli.mx_backend, MxBackend::Nslookup);
    }

    #[test]
    fn identity_and_greeting_flags_reach_probe_options() {
        let cli = Cli::try_parse_from([
            "bulkcheck-cli",
            "--input",
            "emails.txt",
            "--output-dir",
            "out",
            "--helo-domain",
            "checker.example.org",
            "--mail-from",
            "bounce@example.org",
            "--skip-greeting",
            "--rcpt-timeout-secs",
            "30",
        ])
        .expect("parse");
        let options = cli.probe_options();
        assert_eq!(options.helo_command(), "HELO checker.example.org\r\n");
        assert_eq!(options.mail_from_command(), "MAIL FROM:<bounce@example.org>\r\n");
        assert!(!options.read_greeting);
        assert_eq!(options.rcpt_timeout, Duration::from_secs(30));
    }

    #[test]
    fn unknown_level_falls_back_to_info() {
        assert_eq!(level_from_str("DEBUG"), Level::DEBUG);
        assert_eq!(level_from_str("loud"), Level::INFO);
    }
}
