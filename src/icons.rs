use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IconStyle {
    #[default]
    Name,
    Icon,
    NameAndIcon,
}

// Nerd Font `nf-dev-*` glyphs.
const VIM: &str = "\u{e62b}";
const GIT: &str = "\u{e702}";
const PYTHON: &str = "\u{e73c}";
const NODE: &str = "\u{e718}";
const DOCKER: &str = "\u{e7b0}";
const KUBERNETES: &str = "\u{e81d}";
const GO: &str = "\u{e724}";
const RUST: &str = "\u{e7a8}";
const PHP: &str = "\u{e73d}";
const RUBY: &str = "\u{e739}";
const JAVA: &str = "\u{e738}";
const TERMINAL: &str = "\u{e795}";

pub fn default_icon(program: &str) -> Option<&'static str> {
    let icon = match program {
        "nvim" | "vim" | "vi" => VIM,
        "git" => GIT,
        "python" => PYTHON,
        "node" | "npm" | "yarn" => NODE,
        "docker" => DOCKER,
        "kubectl" => KUBERNETES,
        "go" => GO,
        "rust" | "cargo" => RUST,
        "php" => PHP,
        "ruby" => RUBY,
        "java" | "mvn" | "gradle" => JAVA,
        "bash" | "zsh" | "fish" | "sh" => TERMINAL,
        _ => return None,
    };
    Some(icon)
}

/// Program part of a window name: `/usr/bin/nvim:src foo` -> `nvim`.
pub fn icon_key(name: &str) -> &str {
    let first = name.split_whitespace().next().unwrap_or("");
    let program = first.split(':').next().unwrap_or(first);
    program.rsplit('/').next().unwrap_or(program)
}

/// Decodes `\uXXXX` / `\u{XXXX}` escapes; anything else is kept verbatim.
pub fn decode_escapes(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut rest = s;
    while let Some(pos) = rest.find("\\u") {
        out.push_str(&rest[..pos]);
        let after = &rest[pos + 2..];
        let (hex, consumed) = match after.strip_prefix('{') {
            Some(braced) => match braced.find('}') {
                Some(end) => (&braced[..end], end + 2),
                None => ("", 0),
            },
            None => {
                let len = after
                    .char_indices()
                    .take(4)
                    .take_while(|(_, c)| c.is_ascii_hexdigit())
                    .count();
                (&after[..len], len)
            }
        };
        match u32::from_str_radix(hex, 16).ok().and_then(char::from_u32) {
            Some(c) => {
                out.push(c);
                rest = &after[consumed..];
            }
            None => {
                out.push_str("\\u");
                rest = after;
            }
        }
    }
    out.push_str(rest);
    out
}

#[derive(Debug, Clone)]
pub struct Icons {
    style: IconStyle,
    custom: BTreeMap<String, String>,
}

impl Icons {
    pub fn new(style: IconStyle, custom: &BTreeMap<String, String>) -> Self {
        let custom = custom
            .iter()
            .map(|(k, v)| (k.clone(), decode_escapes(v)))
            .collect();
        Self { style, custom }
    }

    pub fn icon_for(&self, name: &str) -> Option<&str> {
        let key = icon_key(name);
        self.custom
            .get(key)
            .map(String::as_str)
            .or_else(|| default_icon(key))
            .filter(|icon| !icon.is_empty())
    }

    pub fn apply(&self, name: &str) -> String {
        if self.style == IconStyle::Name {
            return name.to_string();
        }
        let Some(icon) = self.icon_for(name) else {
            return name.to_string();
        };
        let styled = match self.style {
            IconStyle::Icon => icon.to_string(),
            _ => format!("{icon} {name}"),
        };
        log::debug!("applied icon to {name:?}: {styled:?}");
        styled
    }
}
