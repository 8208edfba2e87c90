use std::io::{self, Write};

use anyhow::{Context, Result};
use console::style;

use crate::naming::WindowName;

pub fn print_info(msg: &str) {
    eprintln!("{} {}", style("info").dim(), msg);
}

pub fn print_hint(msg: &str) {
    eprintln!("{} {}", style("hint").cyan(), msg);
}

/// Tab-separated `window_id name` lines; tabs and newlines in names become spaces.
pub fn write_names<W: Write>(out: &mut W, names: &[WindowName]) -> Result<()> {
    for w in names {
        writeln!(out, "{}\t{}", w.window_id, one_line(&w.name))
            .context("failed to write window names")?;
    }
    Ok(())
}

pub fn write_names_json<W: Write>(out: &mut W, names: &[WindowName]) -> Result<()> {
    serde_json::to_writer_pretty(&mut *out, names).context("failed to encode window names")?;
    writeln!(out).context("failed to write window names")?;
    Ok(())
}

pub fn write_programs<W: Write>(out: &mut W, programs: &[(String, String)]) -> Result<()> {
    for (program, name) in programs {
        writeln!(out, "{} -> {}", one_line(program), one_line(name))
            .context("failed to write program names")?;
    }
    Ok(())
}

pub fn stdout() -> io::StdoutLock<'static> {
    io::stdout().lock()
}

fn one_line(s: &str) -> String {
    s.replace(['\t', '\n', '\r'], " ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn names_are_tab_separated_single_lines() {
        let names = vec![
            WindowName {
                window_id: "@1".to_string(),
                name: "a/dir".to_string(),
            },
            WindowName {
                window_id: "@2".to_string(),
                name: "odd\tname\n".to_string(),
            },
        ];
        let mut out = Vec::new();
        write_names(&mut out, &names).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "@1\ta/dir\n@2\todd name \n");
    }

    #[test]
    fn json_output() {
        let names = vec![WindowName {
            window_id: "@1".to_string(),
            name: "nvim:app".to_string(),
        }];
        let mut out = Vec::new();
        write_names_json(&mut out, &names).unwrap();
        let v: serde_json::Value = serde_json::from_slice(&out).unwrap();
        assert_eq!(v[0]["window_id"], "@1");
        assert_eq!(v[0]["name"], "nvim:app");
    }
}
