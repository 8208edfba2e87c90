use std::path::PathBuf;

use serde::Serialize;

use crate::config::{Config, ProgramsConfig};
use crate::exclusive::{self, ExclusiveError, ExclusivePath, PathEntry};
use crate::icons::Icons;
use crate::panes::PaneRecord;
use crate::pathfmt;
use crate::program;
use crate::substitute::{SubstituteError, SubstituteSet};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WindowName {
    pub window_id: String,
    pub name: String,
}

#[derive(Debug, Clone)]
pub struct Naming {
    programs: ProgramsConfig,
    tilde_home: Option<PathBuf>,
    max_len: usize,
    program_subs: SubstituteSet,
    dir_subs: SubstituteSet,
    icons: Icons,
}

impl Naming {
    pub fn from_config(cfg: &Config) -> Result<Self, SubstituteError> {
        let tilde_home = if cfg.names.use_tilde {
            dirs::home_dir()
        } else {
            None
        };
        Ok(Self {
            programs: cfg.programs.clone(),
            tilde_home,
            max_len: cfg.names.max_len,
            program_subs: SubstituteSet::compile(&cfg.substitute.programs)?,
            dir_subs: SubstituteSet::compile(&cfg.substitute.dirs)?,
            icons: Icons::new(cfg.names.icon_style, &cfg.names.custom_icons),
        })
    }

    /// Overrides the directory shown as `~`; `None` disables the replacement.
    #[cfg(test)]
    pub fn with_tilde_home(mut self, home: Option<PathBuf>) -> Self {
        self.tilde_home = home;
        self
    }

    fn fix_path(&self, path: &str) -> String {
        match &self.tilde_home {
            Some(home) => pathfmt::tilde_path(path, home),
            None => path.to_string(),
        }
    }

    /// `program:display` for tagged directories, the display alone otherwise.
    fn compose(&self, tag: Option<&str>, display: &str) -> String {
        let display = self.dir_subs.apply(display);
        match tag {
            Some(tag) => format!("{}:{display}", self.program_subs.apply(tag)),
            None => display,
        }
    }

    fn finish(&self, name: &str) -> String {
        let name = self.icons.apply(name);
        pathfmt::truncate_chars(&name, self.max_len)
    }
}

struct Classified {
    program: Option<String>,
    path: Option<String>,
}

/// Names for every record that has a program or a path, in input order.
pub fn name_windows(
    records: &[PaneRecord],
    naming: &Naming,
) -> Result<Vec<WindowName>, ExclusiveError> {
    let classified = records
        .iter()
        .map(|r| Classified {
            program: program::current_program(r.command.as_deref(), &naming.programs),
            path: r
                .path
                .as_deref()
                .filter(|p| !p.is_empty())
                .map(|p| naming.fix_path(p)),
        })
        .collect::<Vec<_>>();

    let mut names: Vec<Option<String>> = vec![None; records.len()];
    let mut entries = Vec::new();
    let mut entry_slots = Vec::new();

    for (slot, c) in classified.iter().enumerate() {
        match c.program.as_deref() {
            Some(p)
                if c.path.is_none() || !program::is_dir_program(p, &naming.programs.dir_programs) =>
            {
                log::debug!("window {} runs {p:?}", records[slot].window_id);
                names[slot] = Some(naming.program_subs.apply(p));
            }
            program => match c.path.as_deref() {
                // Nothing to shorten, e.g. `/`: keep the literal path.
                Some(path) if exclusive::components(path).is_empty() => {
                    names[slot] = Some(naming.compose(program, path));
                }
                path => {
                    entries.push(PathEntry::new(path, program));
                    entry_slots.push(slot);
                }
            },
        }
    }

    for ExclusivePath { index, display } in exclusive::get_exclusive_paths(&entries)? {
        let slot = entry_slots[index];
        let name = naming.compose(classified[slot].program.as_deref(), &display);
        log::debug!("window {} shows {name:?}", records[slot].window_id);
        names[slot] = Some(name);
    }

    Ok(records
        .iter()
        .zip(names)
        .filter_map(|(r, name)| {
            name.map(|name| WindowName {
                window_id: r.window_id.clone(),
                name: naming.finish(&name),
            })
        })
        .collect())
}

/// `(program, name)` for every record running a program, for inspecting
/// substitution and icon rules.
pub fn program_names(records: &[PaneRecord], naming: &Naming) -> Vec<(String, String)> {
    records
        .iter()
        .filter_map(|r| program::current_program(r.command.as_deref(), &naming.programs))
        .map(|p| {
            let name = naming.icons.apply(&naming.program_subs.apply(&p));
            (p, name)
        })
        .collect()
}
