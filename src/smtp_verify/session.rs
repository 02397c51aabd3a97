//! Line-oriented transport used by the probe.
//!
//! The probe only needs to open a connection, write text and collect whatever
//! text arrives within a time window, the way a telnet client is driven.

use std::time::Duration;

use async_trait::async_trait;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpStream;
use tokio::time::{Instant, timeout, timeout_at};

use crate::smtp_verify::error::SmtpVerifyError;

/// Opens connections to mail exchangers.
#[async_trait]
pub trait Transport: Send + Sync + 'static {
    type Conn: Connection + 'static;

    async fn connect(&self, host: &str, port: u16) -> Result<Self::Conn, SmtpVerifyError>;
}

/// One open conversation with a server.
#[async_trait]
pub trait Connection: Send {
    async fn write(&mut self, text: &str) -> Result<(), SmtpVerifyError>;

    /// Returns everything received before `limit` elapses, possibly partial or
    /// empty. Stops early once a complete line arrived and the peer went quiet.
    async fn read_until_timeout(&mut self, limit: Duration) -> Result<String, SmtpVerifyError>;

    async fn close(&mut self);
}

/// Plain TCP transport.
#[derive(Debug, Clone)]
pub struct TcpTransport {
    connect_timeout: Duration,
    settle: Duration,
}

impl TcpTransport {
    pub fn new(connect_timeout: Duration) -> Self {
        Self {
            connect_timeout,
            settle: Duration::from_millis(200),
        }
    }

    /// Quiet period after a complete line before a read returns.
    pub fn with_settle(mut self, settle: Duration) -> Self {
        self.settle = settle;
        self
    }
}

#[async_trait]
impl Transport for TcpTransport {
    type Conn = TcpConnection;

    async fn connect(&self, host: &str, port: u16) -> Result<TcpConnection, SmtpVerifyError> {
        let stream = timeout(self.connect_timeout, TcpStream::connect((host, port)))
            .await
            .map_err(|_| SmtpVerifyError::ConnectTimeout {
                host: host.to_string(),
                port,
                after: self.connect_timeout,
            })?
            .map_err(|err| SmtpVerifyError::connect(host, port, err))?;
        Ok(TcpConnection {
            stream,
            settle: self.settle,
            closed: false,
        })
    }
}

#[derive(Debug)]
pub struct TcpConnection {
    stream: TcpStream,
    settle: Duration,
    closed: bool,
}

#[async_trait]
impl Connection for TcpConnection {
    async fn write(&mut self, text: &str) -> Result<(), SmtpVerifyError> {
        self.stream
            .write_all(text.as_bytes())
            .await
            .map_err(SmtpVerifyError::io)?;
        self.stream.flush().await.map_err(SmtpVerifyError::io)
    }

    async fn read_until_timeout(&mut self, limit: Duration) -> Result<String, SmtpVerifyError> {
        let deadline = Instant::now() + limit;
        let mut received = Vec::new();
        let mut buf = [0u8; 512];
        loop {
            let read = if received.ends_with(b"\n") {
                let quiet_until = (Instant::now() + self.settle).min(deadline);
                timeout_at(quiet_until, self.stream.read(&mut buf)).await
            } else {
                timeout_at(deadline, self.stream.read(&mut buf)).await
            };
            match read {
                Err(_elapsed) => break,
                Ok(Ok(0)) => break,
                Ok(Ok(n)) => received.extend_from_slice(&buf[..n]),
                Ok(Err(err)) => return Err(SmtpVerifyError::io(err)),
            }
        }
        Ok(String::from_utf8_lossy(&received).into_owned())
    }

    async fn close(&mut self) {
        if !self.closed {
            self.closed = true;
            let _ = self.stream.shutdown().await;
        }
    }
}
