//! Usage resolution - which files textually reference each declaration.
//!
//! All needles go into a single Aho-Corasick automaton, so each file is
//! scanned once regardless of how many declarations there are. Matching is
//! plain substring matching on purpose: CFML call sites are too varied
//! (dynamic invocation, string-built component paths) for anything stricter.

mod types;

pub use types::{CorpusFile, Declaration, DeclarationId, DeclarationKind, UsageMap};

use aho_corasick::{AhoCorasick, MatchKind};
use rayon::prelude::*;
use rustc_hash::{FxHashMap, FxHashSet};

use crate::model::{ComponentRecord, FunctionRecord};

/// Declarations for every named function and component, indexed by
/// position in the given sequences.
pub fn declarations<'a>(
    functions: impl IntoIterator<Item = &'a FunctionRecord>,
    components: impl IntoIterator<Item = &'a ComponentRecord>,
) -> Vec<Declaration> {
    let functions = functions
        .into_iter()
        .enumerate()
        .filter_map(|(i, f)| f.name.as_deref().map(|name| Declaration::function(i, name)));
    let components = components
        .into_iter()
        .enumerate()
        .map(|(i, c)| Declaration::component(i, c.name.as_str()));
    functions.chain(components).collect()
}

/// Find the files in `corpus` that use each declaration.
///
/// Every file is a candidate, including a declaration's own file. Usage
/// lists follow corpus order. Declarations with empty names never match.
pub fn resolve(declarations: &[Declaration], corpus: &[CorpusFile<'_>]) -> UsageMap {
    // needle text -> pattern id; owners[pattern id] -> declarations sharing it
    let mut needles: Vec<String> = Vec::new();
    let mut owners: Vec<Vec<usize>> = Vec::new();
    let mut needle_ids: FxHashMap<String, usize> = FxHashMap::default();

    for (decl_index, declaration) in declarations.iter().enumerate() {
        if declaration.name.is_empty() {
            continue;
        }
        for needle in declaration.needles() {
            let id = *needle_ids.entry(needle.clone()).or_insert_with(|| {
                needles.push(needle);
                owners.push(Vec::new());
                needles.len() - 1
            });
            if !owners[id].contains(&decl_index) {
                owners[id].push(decl_index);
            }
        }
    }

    if needles.is_empty() || corpus.is_empty() {
        return UsageMap::default();
    }

    let automaton = match AhoCorasick::builder()
        .match_kind(MatchKind::Standard)
        .build(&needles)
    {
        Ok(ac) => ac,
        Err(e) => {
            tracing::warn!(error = %e, needles = needles.len(), "failed to build usage automaton");
            return UsageMap::default();
        }
    };

    // Overlapping search: `getUser(` must also count as a use of `User`.
    let hits: Vec<Vec<usize>> = corpus
        .par_iter()
        .map(|file| {
            let mut seen: FxHashSet<usize> = FxHashSet::default();
            for m in automaton.find_overlapping_iter(file.content) {
                seen.extend(owners[m.pattern().as_usize()].iter().copied());
            }
            let mut used: Vec<usize> = seen.into_iter().collect();
            used.sort_unstable();
            used
        })
        .collect();

    let mut usages: FxHashMap<DeclarationId, Vec<String>> = FxHashMap::default();
    for (file, used) in corpus.iter().zip(hits) {
        for decl_index in used {
            usages
                .entry(declarations[decl_index].id)
                .or_default()
                .push(file.path.to_string());
        }
    }

    let map = UsageMap::from_map(usages);
    tracing::debug!(
        declarations = declarations.len(),
        needles = needles.len(),
        files = corpus.len(),
        edges = map.edge_count(),
        "usages resolved"
    );
    map
}
