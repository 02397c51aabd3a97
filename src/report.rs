//! Semicolon-delimited report of the probe results.
//!
//! The header is `email;provider;email;` for compatibility with existing
//! consumers; the third column holds the resolution, not the address.

use std::path::{Path, PathBuf};

use chrono::{DateTime, Local};
use tokio::fs;
use tokio::io::AsyncWriteExt;

use crate::pipeline::PipelineError;
use crate::results::ResultSet;

const HEADER: [&str; 4] = ["email", "provider", "email", ""];

/// `output-<yyyyMMddHHmmssfff>.csv`
pub fn report_file_name(now: DateTime<Local>) -> String {
    format!("output-{}.csv", now.format("%Y%m%d%H%M%S%3f"))
}

fn bool_text(value: bool) -> &'static str {
    if value { "True" } else { "False" }
}

/// Addresses are written verbatim, never quoted.
pub fn render(results: &ResultSet) -> Result<Vec<u8>, csv::Error> {
    let mut wtr = csv::WriterBuilder::new()
        .delimiter(b';')
        .has_headers(false)
        .quote_style(csv::QuoteStyle::Never)
        .terminator(csv::Terminator::Any(b'\n'))
        .from_writer(Vec::new());
    wtr.write_record(HEADER)?;
    for (address, result) in results.iter() {
        wtr.write_record([
            address,
            bool_text(result.provider_reachable()),
            result.resolution().as_str(),
            "",
        ])?;
    }
    wtr.into_inner()
        .map_err(|err| csv::Error::from(err.into_error()))
}

/// Writes the report into `dir` (created when missing) and returns its path.
pub async fn write_report(
    dir: &Path,
    results: &ResultSet,
    now: DateTime<Local>,
) -> Result<PathBuf, PipelineError> {
    fs::create_dir_all(dir).await.map_err(|source| PipelineError::CreateOutputDir {
        path: dir.to_path_buf(),
        source,
    })?;
    let path = dir.join(report_file_name(now));
    let bytes = render(results).map_err(|source| PipelineError::Render { source })?;
    write_all_atomically(&path, &bytes).await.map_err(|source| PipelineError::WriteReport {
        path: path.clone(),
        source,
    })?;
    Ok(path)
}

async fn write_all_atomically(path: &Path, bytes: &[u8]) -> std::io::Result<()> {
    let tmp = path.with_extension("csv.tmp");
    {
        let mut f = fs::File::create(&tmp).await?;
        f.write_all(bytes).await?;
        f.sync_all().await?;
    }
    fs::rename(&tmp, path).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::smtp_verify::{ProbeResult, Resolution};
    use chrono::TimeZone;

    fn sample() -> ResultSet {
        let mut results = ResultSet::new();
        results.insert_first("a@x.test", ProbeResult::reachable(Resolution::Exists));
        results.insert_first("b@x.test", ProbeResult::reachable(Resolution::NotExists));
        results.insert_first("c@y.test", ProbeResult::unreachable());
        results
    }

    #[test]
    fn file_name_has_millisecond_timestamp() {
        let now = Local
            .with_ymd_and_hms(2024, 3, 9, 7, 5, 1)
            .single()
            .expect("unambiguous local time")
            + chrono::Duration::milliseconds(42);
        assert_eq!(report_file_name(now), "output-20240309070501042.csv");
    }

    #[test]
    fn renders_header_and_rows() {
        let text = String::from_utf8(render(&sample()).expect("render")).expect("utf8");
        assert_eq!(
            text,
            "email;provider;email;\n\
             a@x.test;True;Exists;\n\
             b@x.test;True;NotExists;\n\
             c@y.test;False;Undetermined;\n"
        );
        insta::assert_snapshot!(text.trim_end(), @r"
        email;provider;email;
        a@x.test;True;Exists;
        b@x.test;True;NotExists;
        c@y.test;False;Undetermined;
        ");
    }

    #[test]
    fn quoted_local_part_is_written_verbatim() {
        let mut results = ResultSet::new();
        results.insert_first(
            "\"john doe\"@x.test",
            ProbeResult::reachable(Resolution::Exists),
        );
        results.insert_first("odd;name@x.test", ProbeResult::unreachable());
        let text = String::from_utf8(render(&results).expect("render")).expect("utf8");
        assert_eq!(
            text,
            "email;provider;email;\n\
             \"john doe\"@x.test;True;Exists;\n\
             odd;name@x.test;False;Undetermined;\n"
        );
    }

    #[tokio::test]
    async fn writes_into_created_directory() {
        let tmp = tempfile::tempdir().expect("tempdir");
        let dir = tmp.path().join("reports").join("nested");
        let path = write_report(&dir, &sample(), Local::now())
            .await
            .expect("write");
        assert!(path.starts_with(&dir));
        let content = std::fs::read_to_string(&path).expect("read back");
        assert!(content.starts_with("email;provider;email;\n"));
        assert_eq!(content.lines().count(), 4);
        let leftovers: Vec<_> = std::fs::read_dir(&dir)
            .expect("list")
            .filter_map(Result::ok)
            .filter(|entry| entry.path().extension().is_some_and(|ext| ext == "tmp"))
            .collect();
        assert!(leftovers.is_empty());
    }
}
