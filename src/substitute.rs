use std::sync::LazyLock;

use regex::Regex;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SubstituteError {
    #[error("invalid substitution pattern {pattern:?}: {source}")]
    Pattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },
}

static PY_GROUP_REF: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\\g<(\w+)>").expect("group reference pattern"));

/// Rewrites `\g<1>` / `\g<name>` group references to `${1}` / `${name}`.
pub fn normalize_replacement(replacement: &str) -> String {
    PY_GROUP_REF
        .replace_all(replacement, "$${${1}}")
        .into_owned()
}

/// Ordered regex rewrites, each replacing every match.
#[derive(Debug, Clone, Default)]
pub struct SubstituteSet {
    rules: Vec<(Regex, String)>,
}

impl SubstituteSet {
    pub fn compile(pairs: &[(String, String)]) -> Result<Self, SubstituteError> {
        let rules = pairs
            .iter()
            .map(|(pattern, replacement)| {
                let re = Regex::new(pattern).map_err(|source| SubstituteError::Pattern {
                    pattern: pattern.clone(),
                    source,
                })?;
                Ok((re, normalize_replacement(replacement)))
            })
            .collect::<Result<Vec<_>, SubstituteError>>()?;
        Ok(Self { rules })
    }

    pub fn apply(&self, name: &str) -> String {
        let mut name = name.to_string();
        for (re, replacement) in &self.rules {
            let next = re.replace_all(&name, replacement.as_str()).into_owned();
            if next != name {
                log::debug!("{} -> {:?}: {name:?} -> {next:?}", re.as_str(), replacement);
            }
            name = next;
        }
        name
    }
}
