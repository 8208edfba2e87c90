mod config;
mod exclusive;
mod icons;
mod naming;
mod panes;
mod pathfmt;
mod program;
mod substitute;
mod ui;

use std::io::{self, BufRead, IsTerminal};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};

use crate::config::Config;
use crate::exclusive::PathEntry;
use crate::naming::Naming;
use crate::panes::InputFormat;

#[derive(Debug, Parser)]
#[command(
    name = "window-namer",
    version,
    about = "Short, collision-free tmux window names from pane directories and programs"
)]
struct Cli {
    /// Path to config TOML (default: ~/.window-namer/config.toml)
    #[arg(long, env = config::CONFIG_ENV)]
    config: Option<PathBuf>,

    /// Log debug output to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Only log errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    quiet: bool,

    #[command(subcommand)]
    cmd: Option<Cmd>,
}

#[derive(Debug, Subcommand)]
enum Cmd {
    /// Name windows from pane records on stdin (default)
    Label {
        /// Read JSON lines instead of tab-separated records
        #[arg(long)]
        json_input: bool,

        /// Print a JSON array instead of `window_id<TAB>name` lines
        #[arg(long)]
        json: bool,
    },

    /// Print the shortest unique display for each `path[<TAB>tag]` line on stdin
    Paths,

    /// Show how the programs in the pane records would be named
    Programs {
        /// Read JSON lines instead of tab-separated records
        #[arg(long)]
        json_input: bool,
    },

    /// Print the `tmux list-panes -F` format that `label` reads
    Format,

    /// Write the default config
    InitConfig {
        /// Overwrite an existing config
        #[arg(long)]
        force: bool,
    },

    /// Print the effective config as TOML
    ShowConfig,

    /// Print resolved config path and exit
    WhereConfig,
}

fn main() -> Result<()> {
    let mut cli = Cli::parse();
    let config_path = config::resolve_config_path(cli.config.as_deref())?;
    let cmd = cli.cmd.take().unwrap_or(Cmd::Label {
        json_input: false,
        json: false,
    });

    // where-config and init-config must work even when the file does not parse.
    let (cfg, unreadable) = match Config::load(&config_path) {
        Ok(cfg) => (cfg, None),
        Err(err) if matches!(cmd, Cmd::WhereConfig | Cmd::InitConfig { .. }) => {
            (Config::default(), Some(err))
        }
        Err(err) => return Err(err),
    };
    init_logging(&cli, &cfg);
    log::debug!("config: {}", config_path.display());
    if let Some(err) = unreadable {
        log::warn!("ignoring unreadable config: {err:#}");
    }

    match cmd {
        Cmd::WhereConfig => {
            println!("{}", config_path.display());
            Ok(())
        }
        Cmd::ShowConfig => {
            print!("{}", cfg.to_toml()?);
            Ok(())
        }
        Cmd::InitConfig { force } => {
            if config_path.exists() && !force {
                anyhow::bail!(
                    "config already exists: {} (use --force to overwrite)",
                    config_path.display()
                );
            }
            Config::default().save(&config_path)?;
            ui::print_info(&format!("wrote {}", config_path.display()));
            Ok(())
        }
        Cmd::Format => {
            println!("{}", panes::TMUX_FORMAT);
            Ok(())
        }
        Cmd::Label { json_input, json } => {
            let naming = load_naming(&cfg)?;
            let records = read_stdin_records(json_input)?;
            let names = naming::name_windows(&records, &naming)
                .context("failed to name windows")?;
            let mut out = ui::stdout();
            if json {
                ui::write_names_json(&mut out, &names)
            } else {
                ui::write_names(&mut out, &names)
            }
        }
        Cmd::Programs { json_input } => {
            let naming = load_naming(&cfg)?;
            let records = read_stdin_records(json_input)?;
            let programs = naming::program_names(&records, &naming);
            if programs.is_empty() {
                ui::print_info("No programs running.");
                return Ok(());
            }
            ui::write_programs(&mut ui::stdout(), &programs)
        }
        Cmd::Paths => {
            let lines = read_stdin_lines()?;
            for display in resolve_path_lines(&lines)? {
                println!("{display}");
            }
            Ok(())
        }
    }
}

fn init_logging(cli: &Cli, cfg: &Config) {
    let configured = cfg.log_level();
    let default = configured.unwrap_or(log::LevelFilter::Warn);
    let mut builder =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default.to_string()));
    if cli.quiet {
        builder.filter_level(log::LevelFilter::Error);
    } else if cli.verbose {
        builder.filter_level(log::LevelFilter::Debug);
    }
    builder.target(env_logger::Target::Stderr).init();

    if configured.is_none() {
        log::warn!("unknown log level {:?} in config, using warn", cfg.log.level);
    }
}

fn load_naming(cfg: &Config) -> Result<Naming> {
    Naming::from_config(cfg).context("invalid substitution in config")
}

fn ensure_piped() -> Result<()> {
    if io::stdin().is_terminal() {
        ui::print_hint(&format!(
            "tmux list-panes -s -f '#{{pane_active}}' -F '{}' | window-namer",
            panes::TMUX_FORMAT
        ));
        anyhow::bail!("expected pane records on stdin");
    }
    Ok(())
}

fn read_stdin_records(json_input: bool) -> Result<Vec<panes::PaneRecord>> {
    ensure_piped()?;
    let format = if json_input {
        InputFormat::JsonLines
    } else {
        InputFormat::Tsv
    };
    let records = panes::read_records(io::stdin().lock(), format)?;
    Ok(records)
}

fn read_stdin_lines() -> Result<Vec<String>> {
    ensure_piped()?;
    io::stdin()
        .lock()
        .lines()
        .collect::<io::Result<Vec<_>>>()
        .context("failed to read stdin")
}

/// One display per non-blank line; a line with an empty path prints empty.
fn resolve_path_lines(lines: &[String]) -> Result<Vec<String>> {
    let entries = lines
        .iter()
        .filter(|l| !l.trim().is_empty())
        .map(|line| {
            let (path, tag) = match line.split_once('\t') {
                Some((path, tag)) => (path, Some(tag)),
                None => (line.as_str(), None),
            };
            PathEntry::new(
                Some(path).filter(|p| !p.is_empty()),
                tag.filter(|t| !t.is_empty()),
            )
        })
        .collect::<Vec<_>>();

    let mut displays = vec![String::new(); entries.len()];
    for p in exclusive::get_exclusive_paths(&entries).context("failed to resolve paths")? {
        displays[p.index] = p.display;
    }
    Ok(displays)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lines(input: &[&str]) -> Vec<String> {
        input.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn path_lines_with_tags() {
        let out = resolve_path_lines(&lines(&["a/dir", "b/dir\tp1", "", "c/dir"])).unwrap();
        assert_eq!(out, vec!["a/dir", "dir", "c/dir"]);
    }

    #[test]
    fn path_line_without_path_stays_aligned() {
        let out = resolve_path_lines(&lines(&["\tp1", "/only/path"])).unwrap();
        assert_eq!(out, vec!["", "path"]);
    }

    #[test]
    fn separator_only_path_fails() {
        assert!(resolve_path_lines(&lines(&["/"])).is_err());
    }

    #[test]
    fn cli_parses() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
        let cli = Cli::try_parse_from(["window-namer", "-v", "label", "--json"]).unwrap();
        assert!(cli.verbose);
        assert!(matches!(cli.cmd, Some(Cmd::Label { json: true, .. })));
    }
}
