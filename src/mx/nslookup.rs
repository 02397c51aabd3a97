use std::process::Stdio;

use async_trait::async_trait;
use tokio::process::Command;
use tracing::{debug, trace};

use super::parser::parse_mx_output;
use super::resolver::LookupMx;
use super::{Error, MxRecord};

/// [`LookupMx`] backend running `nslookup -type=mx <domain>` and parsing its output.
#[derive(Debug, Clone)]
pub struct Nslookup {
    program: String,
}

impl Default for Nslookup {
    fn default() -> Self {
        Self {
            program: "nslookup".to_string(),
        }
    }
}

impl Nslookup {
    pub fn new() -> Self {
        Self::default()
    }

    /// Use another executable with the same command line and output format.
    pub fn with_program(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
        }
    }

    async fn query(&self, domain: &str) -> Result<String, Error> {
        let output = Command::new(&self.program)
            .arg("-type=mx")
            .arg(domain)
            .stdin(Stdio::null())
            .stderr(Stdio::null())
            .kill_on_drop(true)
            .output()
            .await
            .map_err(|err| Error::query(domain, err))?;

        // nslookup exits non-zero for NXDOMAIN but still prints the header
        if !output.status.success() {
            debug!(domain, status = %output.status, "nslookup exited with failure");
        }
        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}

#[async_trait]
impl LookupMx for Nslookup {
    async fn lookup_mx(&self, domain: &str) -> Result<Vec<MxRecord>, Error> {
        let raw = self.query(domain).await?;
        trace!(domain, output = %raw, "nslookup output");
        parse_mx_output(&raw)
    }
}
