use std::sync::Arc;

use anyhow::{Context, Result};
use bulkcheck_lib::{LookupMx, Nslookup, Pipeline, SmtpProbe, TcpTransport};
use tracing::info;
use tracing_subscriber::FmtSubscriber;

mod args;

use args::{Cli, MxBackend};

fn lookup_backend(backend: MxBackend) -> Result<Box<dyn LookupMx>> {
    match backend {
        MxBackend::Nslookup => Ok(Box::new(Nslookup::new())),
        #[cfg(feature = "with-dns")]
        MxBackend::Dns => {
            let lookup =
                bulkcheck_lib::DnsLookup::from_system_conf().context("init DNS resolver")?;
            Ok(Box::new(lookup))
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = <Cli as clap::Parser>::parse();

    let subscriber = FmtSubscriber::builder()
        .with_max_level(cli.level())
        .finish();
    tracing::subscriber::set_global_default(subscriber).context("install tracing subscriber")?;

    let options = cli.probe_options();
    let transport = Arc::new(TcpTransport::new(options.connect_timeout));
    let probe = SmtpProbe::with_shared(transport, options);
    let pipeline = Pipeline::new(
        lookup_backend(cli.mx_backend)?,
        probe,
        cli.pipeline_settings(),
    );

    let summary = pipeline
        .run_job(&cli.input, &cli.output_dir)
        .await
        .with_context(|| format!("bulk check of {}", cli.input.display()))?;

    info!(
        addresses = summary.addresses,
        domains = summary.domains,
        skipped_domains = summary.domains_skipped,
        results = summary.results,
        report = ?summary.report,
        "run complete"
    );
    Ok(())
}
