use std::collections::BTreeMap;

use thiserror::Error;

/// Separator between key path segments (`editor.error.emptyInput`).
pub const PATH_SEPARATOR: char = '.';

const MAX_CATALOG_ENTRIES: usize = 10_000;
const MAX_KEY_BYTES: usize = 128;
const MAX_VALUE_BYTES: usize = 16 * 1024;
const MAX_DEPTH: usize = 16;

fn is_valid_key(key: &str) -> bool {
    let mut it = key.chars();
    match it.next() {
        Some(c) if c.is_ascii_alphanumeric() => {}
        _ => return false,
    }
    it.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
}

fn join_path(parent: &str, key: &str) -> String {
    if parent.is_empty() {
        key.to_string()
    } else {
        format!("{parent}{PATH_SEPARATOR}{key}")
    }
}

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("yaml parse error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("catalog root must be a mapping")]
    NotAMapping,

    #[error("invalid key `{path}`: {msg}")]
    InvalidKey { path: String, msg: String },

    #[error("invalid value at `{path}`: {msg}")]
    InvalidValue { path: String, msg: String },

    #[error("too many entries (max {max})")]
    TooManyEntries { max: usize },
}

/// A node in a [`MessageTree`]: either a display string or a nested group.
#[derive(Clone, Debug, PartialEq)]
pub enum MessageNode {
    Text(String),
    Group(MessageTree),
}

/// A nested string catalog for one language, organized by feature area
/// (`toolbar`, `editor`, `editor.error`, ...).
///
/// Catalogs are written as nested YAML mappings:
///
/// ```yaml
/// toolbar:
///   reset: "Reset"
/// editor:
///   error:
///     emptyInput: "Please input JSON data first"
/// ```
#[derive(Clone, Debug, Default, PartialEq)]
pub struct MessageTree {
    entries: BTreeMap<String, MessageNode>,
}

impl MessageTree {
    pub fn new() -> Self {
        Self {
            entries: BTreeMap::new(),
        }
    }

    /// Insert a string leaf at a dotted path, creating groups along the way.
    ///
    /// An existing leaf on the way is replaced by a group.
    pub fn insert(&mut self, path: &str, value: impl Into<String>) {
        let mut segments: Vec<&str> = path.split(PATH_SEPARATOR).collect();
        let Some(last) = segments.pop() else {
            return;
        };

        let mut tree = self;
        for seg in segments {
            let node = tree
                .entries
                .entry(seg.to_string())
                .or_insert_with(|| MessageNode::Group(MessageTree::new()));
            if let MessageNode::Text(_) = node {
                *node = MessageNode::Group(MessageTree::new());
            }
            let MessageNode::Group(child) = node else {
                unreachable!("node was just made a group");
            };
            tree = child;
        }
        tree.entries
            .insert(last.to_string(), MessageNode::Text(value.into()));
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Resolve a dotted key path to a display string.
    ///
    /// Returns `None` when a segment is missing, when the path continues past a
    /// string, when it stops on a group, or when the string it reaches is empty.
    /// Empty strings count as absent so that callers fall back to the key.
    pub fn lookup(&self, path: &str) -> Option<&str> {
        let mut segments = path.split(PATH_SEPARATOR);
        let mut node = self.entries.get(segments.next()?)?;
        for seg in segments {
            match node {
                MessageNode::Group(tree) => node = tree.entries.get(seg)?,
                MessageNode::Text(_) => return None,
            }
        }
        match node {
            MessageNode::Text(s) if !s.is_empty() => Some(s.as_str()),
            _ => None,
        }
    }

    /// Every leaf as `(path, value)`, depth first in key order.
    pub fn leaves(&self) -> Vec<(String, &str)> {
        let mut out = Vec::new();
        self.collect_leaves("", &mut out);
        out
    }

    /// Every leaf path, depth first in key order.
    pub fn leaf_paths(&self) -> Vec<String> {
        self.leaves().into_iter().map(|(path, _)| path).collect()
    }

    fn collect_leaves<'a>(&'a self, prefix: &str, out: &mut Vec<(String, &'a str)>) {
        for (key, node) in &self.entries {
            let path = join_path(prefix, key);
            match node {
                MessageNode::Text(s) => out.push((path, s.as_str())),
                MessageNode::Group(child) => child.collect_leaves(&path, out),
            }
        }
    }

    /// Parse a nested YAML mapping catalog.
    ///
    /// Keys must match `[A-Za-z0-9][A-Za-z0-9_-]*`; values must be strings or
    /// non-empty nested mappings. An empty document yields an empty tree.
    pub fn parse_yaml(src: &str) -> Result<Self, CatalogError> {
        let value: serde_yaml::Value = serde_yaml::from_str(src)?;
        match value {
            serde_yaml::Value::Null => Ok(Self::new()),
            serde_yaml::Value::Mapping(map) => {
                let mut count = 0;
                Self::from_mapping(map, "", 1, &mut count)
            }
            _ => Err(CatalogError::NotAMapping),
        }
    }

    fn from_mapping(
        map: serde_yaml::Mapping,
        prefix: &str,
        depth: usize,
        count: &mut usize,
    ) -> Result<Self, CatalogError> {
        if depth > MAX_DEPTH {
            return Err(CatalogError::InvalidKey {
                path: prefix.to_string(),
                msg: format!("nesting is too deep (max {MAX_DEPTH} levels)"),
            });
        }

        let mut tree = Self::new();
        for (k, v) in map {
            let Some(key) = k.as_str() else {
                return Err(CatalogError::InvalidKey {
                    path: join_path(prefix, &format!("{k:?}")),
                    msg: "yaml keys must be strings".to_string(),
                });
            };
            let path = join_path(prefix, key);
            if !is_valid_key(key) {
                return Err(CatalogError::InvalidKey {
                    path,
                    msg: "allowed: [A-Za-z0-9][A-Za-z0-9_-]*".to_string(),
                });
            }
            if key.len() > MAX_KEY_BYTES {
                return Err(CatalogError::InvalidKey {
                    path,
                    msg: format!("too long (max {MAX_KEY_BYTES} bytes)"),
                });
            }

            let node = match v {
                serde_yaml::Value::String(s) => {
                    if s.len() > MAX_VALUE_BYTES {
                        return Err(CatalogError::InvalidValue {
                            path,
                            msg: format!("too long (max {MAX_VALUE_BYTES} bytes)"),
                        });
                    }
                    *count += 1;
                    if *count > MAX_CATALOG_ENTRIES {
                        return Err(CatalogError::TooManyEntries {
                            max: MAX_CATALOG_ENTRIES,
                        });
                    }
                    MessageNode::Text(s)
                }
                serde_yaml::Value::Mapping(child) => {
                    // Groups without leaves would escape the parity check.
                    if child.is_empty() {
                        return Err(CatalogError::InvalidValue {
                            path,
                            msg: "group has no entries".to_string(),
                        });
                    }
                    MessageNode::Group(Self::from_mapping(child, &path, depth + 1, count)?)
                }
                _ => {
                    return Err(CatalogError::InvalidValue {
                        path,
                        msg: "must be a string or a mapping".to_string(),
                    });
                }
            };
            tree.entries.insert(key.to_string(), node);
        }
        Ok(tree)
    }
}
