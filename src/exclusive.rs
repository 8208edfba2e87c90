use std::collections::{BTreeMap, HashMap};

use thiserror::Error;

pub const SEPARATOR: char = '/';

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PathEntry<'a> {
    /// `None` means the entry takes no part in disambiguation.
    pub path: Option<&'a str>,
    pub tag: Option<&'a str>,
}

impl<'a> PathEntry<'a> {
    pub fn new(path: Option<&'a str>, tag: Option<&'a str>) -> Self {
        Self { path, tag }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExclusivePath {
    /// Position of the entry in the input slice.
    pub index: usize,
    pub display: String,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ExclusiveError {
    #[error("entry {index} has no path components: {path:?}")]
    EmptyPath { index: usize, path: String },
}

/// Non-empty segments of `path`, root first.
pub fn components(path: &str) -> Vec<&str> {
    path.split(SEPARATOR).filter(|c| !c.is_empty()).collect()
}

/// The last `len` components joined with the separator (all of them if fewer).
pub fn suffix(components: &[&str], len: usize) -> String {
    let start = components.len().saturating_sub(len);
    let sep = SEPARATOR.to_string();
    components[start..].join(sep.as_str())
}

/// Leaf component of `path`, rejecting paths made only of separators.
pub fn leaf(index: usize, path: &str) -> Result<&str, ExclusiveError> {
    components(path)
        .last()
        .copied()
        .ok_or_else(|| ExclusiveError::EmptyPath {
            index,
            path: path.to_string(),
        })
}

/// Assigns every entry that has a path its display string.
///
/// The output keeps input order and skips entries without a path. Entries are
/// validated up front: a single empty path rejects the whole batch.
pub fn get_exclusive_paths(
    entries: &[PathEntry<'_>],
) -> Result<Vec<ExclusivePath>, ExclusiveError> {
    for (index, entry) in entries.iter().enumerate() {
        if let Some(path) = entry.path {
            leaf(index, path)?;
        }
    }

    let groups = partition(entries);
    log::debug!(
        "disambiguating {} entries across {} groups",
        entries.len(),
        groups.len()
    );

    let mut out = Vec::with_capacity(entries.len());
    for (index, entry) in entries.iter().enumerate() {
        let Some(path) = entry.path else {
            continue;
        };
        let group = &groups[&entry.tag];
        let display = group.displays[group.slots[path]].clone();
        out.push(ExclusivePath { index, display });
    }
    Ok(out)
}

/// Distinct paths sharing one tag, in order of first occurrence.
#[derive(Debug, Default)]
struct Group<'a> {
    paths: Vec<&'a str>,
    slots: HashMap<&'a str, usize>,
    displays: Vec<String>,
}

fn partition<'a>(entries: &[PathEntry<'a>]) -> BTreeMap<Option<&'a str>, Group<'a>> {
    let mut groups: BTreeMap<Option<&'a str>, Group<'a>> = BTreeMap::new();
    for entry in entries {
        let Some(path) = entry.path else {
            continue;
        };
        let group = groups.entry(entry.tag).or_default();
        if !group.slots.contains_key(path) {
            group.slots.insert(path, group.paths.len());
            group.paths.push(path);
        }
    }
    for (tag, group) in groups.iter_mut() {
        group.displays = resolve(&group.paths);
        log::debug!(
            "group tag={:?} paths={:?} displays={:?}",
            tag,
            group.paths,
            group.displays
        );
    }
    groups
}

#[derive(Debug, Default)]
struct Node<'a> {
    children: HashMap<&'a str, usize>,
    /// Distinct paths whose reversed components reach this node.
    through: Vec<usize>,
    /// Some path has no components left past this node.
    terminal: bool,
}

/// Trie over reversed component sequences (leaf first).
#[derive(Debug)]
struct SuffixTrie<'a> {
    nodes: Vec<Node<'a>>,
}

impl<'a> SuffixTrie<'a> {
    fn new() -> Self {
        Self {
            nodes: vec![Node::default()],
        }
    }

    fn insert(&mut self, id: usize, components: &[&'a str]) {
        let mut cur = 0;
        for &component in components.iter().rev() {
            let next = match self.nodes[cur].children.get(component).copied() {
                Some(next) => next,
                None => {
                    let next = self.nodes.len();
                    self.nodes.push(Node::default());
                    self.nodes[cur].children.insert(component, next);
                    next
                }
            };
            self.nodes[next].through.push(id);
            cur = next;
        }
        self.nodes[cur].terminal = true;
    }

    /// Paths that share a node with a path ending there: the shorter one is a
    /// trailing match of the longer, so no suffix separates them.
    fn suffix_contained(&self, count: usize) -> Vec<bool> {
        let mut contained = vec![false; count];
        for node in &self.nodes {
            if node.terminal && node.through.len() > 1 {
                for &id in &node.through {
                    contained[id] = true;
                }
            }
        }
        contained
    }

    /// First depth at which `components` stop sharing a node with any other path.
    fn exclusive_depth(&self, components: &[&str]) -> Option<usize> {
        let mut cur = 0;
        for (depth, component) in components.iter().rev().enumerate() {
            cur = *self.nodes[cur].children.get(*component)?;
            if self.nodes[cur].through.len() == 1 {
                return Some(depth + 1);
            }
        }
        None
    }
}

/// Display strings for one group's distinct paths, index-aligned with `paths`.
fn resolve(paths: &[&str]) -> Vec<String> {
    let split: Vec<Vec<&str>> = paths.iter().map(|p| components(p)).collect();

    let mut trie = SuffixTrie::new();
    for (id, comps) in split.iter().enumerate() {
        trie.insert(id, comps);
    }
    let contained = trie.suffix_contained(paths.len());

    paths
        .iter()
        .zip(&split)
        .zip(contained)
        .map(|((path, comps), contained)| {
            if contained {
                return path.to_string();
            }
            match trie.exclusive_depth(comps) {
                Some(len) => suffix(comps, len),
                None => path.to_string(),
            }
        })
        .collect()
}
