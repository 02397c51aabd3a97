use std::sync::Arc;

use tokio::time::timeout;
use tracing::{debug, trace};

use crate::smtp_verify::error::SmtpVerifyError;
use crate::smtp_verify::options::ProbeOptions;
use crate::smtp_verify::session::{Connection, Transport};
use crate::smtp_verify::types::{ProbeResult, Resolution};

const QUIT_CMD: &str = "QUIT\r\n";

/// Runs one `HELO` / `MAIL FROM` / `RCPT TO` dialogue per address.
///
/// Every probe opens its own connection. Failures never escape: an unreachable
/// host gives [`ProbeResult::unreachable`], any later failure gives
/// [`Resolution::Undetermined`].
#[derive(Debug)]
pub struct SmtpProbe<T> {
    transport: Arc<T>,
    options: ProbeOptions,
}

impl<T> Clone for SmtpProbe<T> {
    fn clone(&self) -> Self {
        Self {
            transport: Arc::clone(&self.transport),
            options: self.options.clone(),
        }
    }
}

impl<T: Transport> SmtpProbe<T> {
    pub fn new(transport: T, options: ProbeOptions) -> Self {
        Self::with_shared(Arc::new(transport), options)
    }

    pub fn with_shared(transport: Arc<T>, options: ProbeOptions) -> Self {
        Self { transport, options }
    }

    pub fn options(&self) -> &ProbeOptions {
        &self.options
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    pub async fn probe(&self, address: &str, host: &str, port: u16) -> ProbeResult {
        let mut conn = match self.transport.connect(host, port).await {
            Ok(conn) => conn,
            Err(err) => {
                debug!(address, host, port, error = %err, "mail exchanger unreachable");
                return ProbeResult::unreachable();
            }
        };

        let deadline = self.options.probe_deadline;
        let resolution = match timeout(deadline, self.converse(&mut conn, address)).await {
            Ok(Ok(resolution)) => resolution,
            Ok(Err(err)) => {
                debug!(address, host, error = %err, "SMTP dialogue failed");
                Resolution::Undetermined
            }
            Err(_elapsed) => {
                debug!(address, host, error = %SmtpVerifyError::Deadline(deadline), "SMTP dialogue aborted");
                Resolution::Undetermined
            }
        };

        if let Err(err) = conn.write(QUIT_CMD).await {
            trace!(address, host, error = %err, "QUIT not delivered");
        }
        conn.close().await;

        ProbeResult::reachable(resolution)
    }

    async fn converse(
        &self,
        conn: &mut T::Conn,
        address: &str,
    ) -> Result<Resolution, SmtpVerifyError> {
        let options = &self.options;
        if options.read_greeting {
            let banner = conn.read_until_timeout(options.command_timeout).await?;
            trace!(address, reply = %banner.trim_end(), "greeting");
        }

        conn.write(&options.helo_command()).await?;
        let reply = conn.read_until_timeout(options.command_timeout).await?;
        trace!(address, reply = %reply.trim_end(), "HELO");

        conn.write(&options.mail_from_command()).await?;
        let reply = conn.read_until_timeout(options.command_timeout).await?;
        trace!(address, reply = %reply.trim_end(), "MAIL FROM");

        conn.write(&ProbeOptions::rcpt_command(address)).await?;
        let reply = conn.read_until_timeout(options.rcpt_timeout).await?;
        let resolution = Resolution::classify(&reply);
        debug!(address, reply = %reply.trim_end(), %resolution, "RCPT TO");
        Ok(resolution)
    }
}
