//! Output handling for CLI
//!
//! - JSON commands write one object per line: `{"status":"ok","data":...}`
//! - `service-map` writes bare lines so shell scripts can consume it
//! - UTF-8 only

use std::io::{self, Write};

use serde_json::Value;

use super::errors::CliResult;

/// Write a success response to stdout
pub fn write_response(data: Value) -> CliResult<()> {
    write_response_to(&mut io::stdout(), data)
}

/// Write a success response to any writer
pub fn write_response_to<W: Write>(writer: &mut W, data: Value) -> CliResult<()> {
    let response = serde_json::json!({
        "status": "ok",
        "data": data
    });

    serde_json::to_writer(&mut *writer, &response)?;
    writeln!(writer)?;
    writer.flush()?;

    Ok(())
}

/// Write plain lines to stdout
pub fn write_lines(lines: &[String]) -> CliResult<()> {
    write_lines_to(&mut io::stdout(), lines)
}

/// Write plain lines to any writer
pub fn write_lines_to<W: Write>(writer: &mut W, lines: &[String]) -> CliResult<()> {
    for line in lines {
        writeln!(writer, "{}", line)?;
    }
    writer.flush()?;
    Ok(())
}
