//! Parser for the text printed by `nslookup -type=mx <domain>`.
//!
//! The output is read as a small grammar: a two-line resolver header
//! (`Server:` / `Address:`) followed by any number of lines, of which only the
//! ones carrying the `mail exchanger` marker are records. Two record layouts
//! are understood:
//!
//! ```text
//! example.com	MX preference = 10, mail exchanger = mx1.example.com
//! example.com	mail exchanger = 10 mx1.example.com.
//! ```

use super::{Error, MxRecord};

const HEADER_LINES: usize = 2;
const MX_MARKER: &str = "mail exchanger";
const PREFERENCE_PREFIX: &str = "MX preference";
const INFO_DELIMITER: char = ',';

#[derive(Debug, PartialEq, Eq)]
enum LineKind<'a> {
    /// Value field of a record line (everything after the owner name).
    Exchanger(&'a str),
    Other,
}

/// Parses every MX record found in `output`, in the order they appear.
pub fn parse_mx_output(output: &str) -> Result<Vec<MxRecord>, Error> {
    let lines: Vec<&str> = output
        .lines()
        .map(|line| line.trim_end_matches('\r'))
        .filter(|line| !line.trim().is_empty())
        .collect();

    if lines.len() < HEADER_LINES {
        return Err(Error::parse(
            output.trim(),
            format!("expected {HEADER_LINES} resolver header lines"),
        ));
    }

    let mut records = Vec::new();
    for line in &lines[HEADER_LINES..] {
        match classify_line(line)? {
            LineKind::Exchanger(value) => records.push(parse_value(line, value)?),
            LineKind::Other => {}
        }
    }
    Ok(records)
}

fn classify_line(line: &str) -> Result<LineKind<'_>, Error> {
    if !line.contains(MX_MARKER) {
        return Ok(LineKind::Other);
    }
    let value = match line.split_once('\t') {
        Some((_, value)) => value,
        None => line
            .trim_start()
            .split_once(char::is_whitespace)
            .map(|(_, value)| value)
            .ok_or_else(|| Error::parse(line, "missing field delimiter"))?,
    };
    Ok(LineKind::Exchanger(value.trim()))
}

fn parse_value(line: &str, value: &str) -> Result<MxRecord, Error> {
    if value.starts_with(PREFERENCE_PREFIX) {
        parse_split_layout(line, value)
    } else {
        parse_bind_layout(line, value)
    }
}

// MX preference = 10, mail exchanger = mx1.example.com
fn parse_split_layout(line: &str, value: &str) -> Result<MxRecord, Error> {
    let tokens: Vec<&str> = value
        .split(INFO_DELIMITER)
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .collect();
    let [preference, exchanger] = tokens.as_slice() else {
        return Err(Error::parse(line, "expected preference and exchanger tokens"));
    };

    let preference = strip_assignment(preference, PREFERENCE_PREFIX)
        .ok_or_else(|| Error::parse(line, "preference token"))?;
    let exchange = strip_assignment(exchanger, MX_MARKER)
        .ok_or_else(|| Error::parse(line, "exchanger token"))?;

    build_record(line, preference, exchange)
}

// mail exchanger = 10 mx1.example.com.
fn parse_bind_layout(line: &str, value: &str) -> Result<MxRecord, Error> {
    let rest = strip_assignment(value, MX_MARKER)
        .ok_or_else(|| Error::parse(line, "exchanger token"))?;
    let tokens: Vec<&str> = rest.split_whitespace().collect();
    let [preference, exchange] = tokens.as_slice() else {
        return Err(Error::parse(line, "expected preference and exchanger tokens"));
    };
    build_record(line, preference, exchange)
}

fn build_record(line: &str, preference: &str, exchange: &str) -> Result<MxRecord, Error> {
    let preference = preference
        .parse::<u16>()
        .map_err(|err| Error::parse(line, format!("invalid preference: {err}")))?;
    let exchange = super::resolver::normalize_exchange(exchange);
    if exchange.is_empty() {
        return Err(Error::parse(line, "empty exchanger host"));
    }
    Ok(MxRecord::new(preference, exchange))
}

/// `"<prefix> = <value>"` -> `"<value>"`, trimmed.
fn strip_assignment<'a>(token: &'a str, prefix: &str) -> Option<&'a str> {
    let rest = token.trim().strip_prefix(prefix)?;
    let rest = rest.trim_start().strip_prefix('=')?;
    Some(rest.trim())
}
