use std::io::BufRead;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Format string that makes `tmux list-panes` print records this module reads.
pub const TMUX_FORMAT: &str = "#{window_id}\t#{pane_current_path}\t#{pane_current_command}";

/// The active pane of one window.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaneRecord {
    pub window_id: String,
    #[serde(default)]
    pub path: Option<String>,
    #[serde(default)]
    pub command: Option<String>,
}

#[derive(Debug, Error)]
pub enum PaneError {
    #[error("line {line}: missing window id")]
    MissingWindowId { line: usize },

    #[error("line {line}: invalid JSON record: {source}")]
    Json {
        line: usize,
        #[source]
        source: serde_json::Error,
    },

    #[error("failed to read pane records: {0}")]
    Io(#[from] std::io::Error),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputFormat {
    Tsv,
    JsonLines,
}

fn non_empty(field: Option<&str>) -> Option<String> {
    field
        .map(|f| f.trim_end_matches(['\r', '\n']))
        .filter(|f| !f.is_empty())
        .map(String::from)
}

/// Parses one `window_id<TAB>path<TAB>command` line. Empty fields are absent.
pub fn parse_tsv_line(line: &str, line_no: usize) -> Result<PaneRecord, PaneError> {
    let mut fields = line.splitn(3, '\t');
    let window_id = fields
        .next()
        .map(str::trim)
        .filter(|id| !id.is_empty())
        .ok_or(PaneError::MissingWindowId { line: line_no })?;
    Ok(PaneRecord {
        window_id: window_id.to_string(),
        path: non_empty(fields.next()),
        command: non_empty(fields.next()),
    })
}

pub fn parse_json_line(line: &str, line_no: usize) -> Result<PaneRecord, PaneError> {
    let mut record: PaneRecord =
        serde_json::from_str(line).map_err(|source| PaneError::Json {
            line: line_no,
            source,
        })?;
    if record.window_id.trim().is_empty() {
        return Err(PaneError::MissingWindowId { line: line_no });
    }
    record.path = non_empty(record.path.as_deref());
    record.command = non_empty(record.command.as_deref());
    Ok(record)
}

/// Reads every record from `reader`, skipping blank lines. Line numbers in
/// errors are 1-based.
pub fn read_records<R: BufRead>(
    reader: R,
    format: InputFormat,
) -> Result<Vec<PaneRecord>, PaneError> {
    let mut records = Vec::new();
    for (i, line) in reader.lines().enumerate() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        let record = match format {
            InputFormat::Tsv => parse_tsv_line(&line, i + 1)?,
            InputFormat::JsonLines => parse_json_line(line.trim(), i + 1)?,
        };
        records.push(record);
    }
    log::debug!("read {} pane records", records.len());
    Ok(records)
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use super::*;

    #[test]
    fn tsv_fields() {
        let r = parse_tsv_line("@1\t/home/u/src\tnvim", 1).unwrap();
        assert_eq!(r.window_id, "@1");
        assert_eq!(r.path.as_deref(), Some("/home/u/src"));
        assert_eq!(r.command.as_deref(), Some("nvim"));

        let r = parse_tsv_line("@2\t\tpython3 -m http.server", 1).unwrap();
        assert_eq!(r.path, None);
        assert_eq!(r.command.as_deref(), Some("python3 -m http.server"));

        let r = parse_tsv_line("@3", 1).unwrap();
        assert_eq!((r.path, r.command), (None, None));
    }

    #[test]
    fn tsv_missing_window_id() {
        let err = parse_tsv_line("\t/tmp\tzsh", 4).unwrap_err();
        assert!(matches!(err, PaneError::MissingWindowId { line: 4 }));
    }

    #[test]
    fn json_lines() {
        let input = "{\"window_id\":\"@1\",\"path\":\"/a/dir\"}\n\n{\"window_id\":\"@2\",\"command\":\"htop\",\"path\":\"\"}\n";
        let records = read_records(Cursor::new(input), InputFormat::JsonLines).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].path.as_deref(), Some("/a/dir"));
        assert_eq!(records[0].command, None);
        assert_eq!(records[1].path, None);
        assert_eq!(records[1].command.as_deref(), Some("htop"));
    }

    #[test]
    fn json_error_carries_line() {
        let input = "{\"window_id\":\"@1\"}\nnot json\n";
        let err = read_records(Cursor::new(input), InputFormat::JsonLines).unwrap_err();
        assert!(matches!(err, PaneError::Json { line: 2, .. }));
    }

    #[test]
    fn tsv_records_skip_blank_lines() {
        let input = "@1\t/a/dir\tzsh\r\n\n@2\t/b/dir\tvim\n";
        let records = read_records(Cursor::new(input), InputFormat::Tsv).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].command.as_deref(), Some("zsh"));
        assert_eq!(records[1].window_id, "@2");
    }
}
