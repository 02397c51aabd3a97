use std::path::PathBuf;

use thiserror::Error;

/// Errors that end a whole run. Domain and address failures are absorbed
/// by the pipeline and never surface here.
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("cannot read address list {}: {source}", path.display())]
    ReadInput {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("cannot create output directory {}: {source}", path.display())]
    CreateOutputDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("cannot render report: {source}")]
    Render {
        #[source]
        source: csv::Error,
    },
    #[error("cannot write report {}: {source}", path.display())]
    WriteReport {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
