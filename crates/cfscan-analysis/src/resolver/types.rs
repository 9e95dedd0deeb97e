//! Resolver types.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DeclarationKind {
    Function,
    Component,
}

/// Index of a declaration in the run's function or component list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum DeclarationId {
    Function(usize),
    Component(usize),
}

impl DeclarationId {
    pub fn kind(&self) -> DeclarationKind {
        match self {
            Self::Function(_) => DeclarationKind::Function,
            Self::Component(_) => DeclarationKind::Component,
        }
    }
}

/// A named declaration whose usages are searched for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Declaration {
    pub id: DeclarationId,
    pub name: String,
}

impl Declaration {
    pub fn function(index: usize, name: impl Into<String>) -> Self {
        Self {
            id: DeclarationId::Function(index),
            name: name.into(),
        }
    }

    pub fn component(index: usize, name: impl Into<String>) -> Self {
        Self {
            id: DeclarationId::Component(index),
            name: name.into(),
        }
    }

    pub fn kind(&self) -> DeclarationKind {
        self.id.kind()
    }

    /// Substrings whose presence counts as a usage.
    pub fn needles(&self) -> Vec<String> {
        match self.kind() {
            DeclarationKind::Function => vec![format!("{}(", self.name)],
            DeclarationKind::Component => vec![
                self.name.clone(),
                format!("createObject(\"component\", \"{}\")", self.name),
            ],
        }
    }
}

/// One searchable file: its catalog path and decoded content.
#[derive(Debug, Clone, Copy)]
pub struct CorpusFile<'a> {
    pub path: &'a str,
    pub content: &'a str,
}

/// Declaration -> files that use it, in corpus order without duplicates.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UsageMap {
    usages: FxHashMap<DeclarationId, Vec<String>>,
}

impl UsageMap {
    pub(crate) fn from_map(usages: FxHashMap<DeclarationId, Vec<String>>) -> Self {
        Self { usages }
    }

    /// Files using `id`; empty when there are none.
    pub fn usages(&self, id: DeclarationId) -> &[String] {
        self.usages.get(&id).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Remove and return the usage list of `id`.
    pub fn take(&mut self, id: DeclarationId) -> Vec<String> {
        self.usages.remove(&id).unwrap_or_default()
    }

    /// Total (declaration, file) pairs.
    pub fn edge_count(&self) -> usize {
        self.usages.values().map(Vec::len).sum()
    }

    /// Number of declarations with at least one usage.
    pub fn len(&self) -> usize {
        self.usages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.usages.is_empty()
    }
}
