//! Tag extraction - regex-located CFML tags turned into element records.
//!
//! Each tag kind is matched independently over the whole file, leftmost
//! first and non-overlapping. Unterminated `<cfquery>` blocks produce
//! nothing; every other kind is a single opening tag.

mod attributes;
mod patterns;

pub use attributes::{attr, attributes, attributes_except};

use std::ops::Range;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::model::{
    ComponentRecord, DeclarationContext, FunctionParam, FunctionRecord, IncludeRecord,
    InvokeRecord, Location, ModuleRecord, QueryParam, QueryRecord,
};
use crate::sql::SqlAnalyzer;

/// Everything extracted from one file, each list in source order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileElements {
    pub queries: Vec<QueryRecord>,
    pub functions: Vec<FunctionRecord>,
    pub components: Vec<ComponentRecord>,
    pub invokes: Vec<InvokeRecord>,
    pub includes: Vec<IncludeRecord>,
    pub modules: Vec<ModuleRecord>,
}

impl FileElements {
    /// Total number of records across all six kinds.
    pub fn len(&self) -> usize {
        self.queries.len()
            + self.functions.len()
            + self.components.len()
            + self.invokes.len()
            + self.includes.len()
            + self.modules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Stateless extractor for the six element kinds.
pub struct TagExtractor;

impl TagExtractor {
    /// Extract every element from decoded `content`. `file` is the
    /// root-relative path recorded in each location.
    pub fn extract(content: &str, file: &str) -> FileElements {
        let lines = LineIndex::new(content);
        let functions = extract_functions(content, file, &lines);
        let components = extract_components(content, file, &lines, &functions);
        let queries = extract_queries(content, file, &lines, &functions, !components.is_empty());

        FileElements {
            queries,
            functions: functions.into_iter().map(|f| f.record).collect(),
            components,
            invokes: extract_invokes(content, file, &lines),
            includes: extract_includes(content, file, &lines),
            modules: extract_modules(content, file, &lines),
        }
    }
}

/// Byte offsets of every `\n`, for offset -> line lookups.
struct LineIndex {
    newlines: Vec<usize>,
}

impl LineIndex {
    fn new(content: &str) -> Self {
        let newlines = content
            .bytes()
            .enumerate()
            .filter_map(|(i, b)| (b == b'\n').then_some(i))
            .collect();
        Self { newlines }
    }

    /// 1-based line of `offset`: one plus the newlines strictly before it.
    fn line(&self, offset: usize) -> u32 {
        let before = self.newlines.partition_point(|&nl| nl < offset);
        u32::try_from(before + 1).unwrap_or(u32::MAX)
    }
}

/// A function record plus the byte span of its body.
struct FunctionSpan {
    record: FunctionRecord,
    body: Range<usize>,
}

fn extract_functions(content: &str, file: &str, lines: &LineIndex) -> Vec<FunctionSpan> {
    let tags: Vec<(usize, usize, &str)> = patterns::FUNCTION
        .captures_iter(content)
        .filter_map(|caps| {
            let whole = caps.get(0)?;
            let attrs = caps.get(1).map_or("", |m| m.as_str());
            Some((whole.start(), whole.end(), attrs))
        })
        .collect();

    tags.iter()
        .enumerate()
        .map(|(i, &(start, end, attrs))| {
            // Body ends at the first closing tag, the next opening tag, or EOF.
            let next_open = tags.get(i + 1).map_or(content.len(), |t| t.0);
            let close = patterns::FUNCTION_CLOSE
                .find_at(content, end)
                .map_or(content.len(), |m| m.start());
            let body = end..close.min(next_open);

            let params = patterns::ARGUMENT
                .captures_iter(&content[body.clone()])
                .map(|caps| {
                    let arg = caps.get(1).map_or("", |m| m.as_str());
                    FunctionParam {
                        name: attr(arg, "name"),
                        param_type: attr(arg, "type"),
                        required: attr(arg, "required"),
                    }
                })
                .collect();

            FunctionSpan {
                record: FunctionRecord {
                    location: Location::new(file, lines.line(start)),
                    name: attr(attrs, "name"),
                    access: attr(attrs, "access"),
                    return_type: attr(attrs, "returntype"),
                    params,
                    used_in: Vec::new(),
                },
                body,
            }
        })
        .collect()
}

fn extract_components(
    content: &str,
    file: &str,
    lines: &LineIndex,
    functions: &[FunctionSpan],
) -> Vec<ComponentRecord> {
    let name = component_name(file);
    let function_names: Vec<String> = functions
        .iter()
        .filter_map(|f| f.record.name.clone())
        .collect();

    patterns::COMPONENT
        .captures_iter(content)
        .filter_map(|caps| {
            let whole = caps.get(0)?;
            let attrs = caps.get(1).map_or("", |m| m.as_str());
            Some(ComponentRecord {
                location: Location::new(file, lines.line(whole.start())),
                name: name.clone(),
                extends: attr(attrs, "extends"),
                implements: attr(attrs, "implements"),
                functions: function_names.clone(),
                used_in: Vec::new(),
            })
        })
        .collect()
}

/// Base name of `file` without its extension.
fn component_name(file: &str) -> String {
    Path::new(file)
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default()
}

fn extract_queries(
    content: &str,
    file: &str,
    lines: &LineIndex,
    functions: &[FunctionSpan],
    in_component: bool,
) -> Vec<QueryRecord> {
    let component = in_component.then(|| component_name(file));

    patterns::QUERY
        .captures_iter(content)
        .filter_map(|caps| {
            let whole = caps.get(0)?;
            let attrs = caps.get(1).map_or("", |m| m.as_str());
            let interior = caps.get(2).map_or("", |m| m.as_str());
            let sql = interior.trim().to_string();
            let analysis = SqlAnalyzer::analyze(&sql);

            let params = patterns::QUERY_PARAM
                .captures_iter(interior)
                .map(|p| {
                    let param = p.get(1).map_or("", |m| m.as_str());
                    QueryParam {
                        value: attr(param, "value"),
                        sql_type: attr(param, "cfsqltype"),
                    }
                })
                .collect();

            let function = functions
                .iter()
                .find(|f| f.body.contains(&whole.start()))
                .and_then(|f| f.record.name.clone());
            let context = (component.is_some() || function.is_some()).then(|| {
                DeclarationContext {
                    component: component.clone(),
                    function,
                }
            });

            Some(QueryRecord {
                location: Location::new(file, lines.line(whole.start())),
                name: attr(attrs, "name"),
                datasource: attr(attrs, "datasource"),
                sql,
                table: analysis.table,
                complexity: analysis.complexity,
                score: analysis.score,
                params,
                context,
            })
        })
        .collect()
}

fn extract_invokes(content: &str, file: &str, lines: &LineIndex) -> Vec<InvokeRecord> {
    patterns::INVOKE
        .captures_iter(content)
        .filter_map(|caps| {
            let whole = caps.get(0)?;
            let attrs = caps.get(1).map_or("", |m| m.as_str());
            Some(InvokeRecord {
                location: Location::new(file, lines.line(whole.start())),
                component: attr(attrs, "component"),
                method: attr(attrs, "method"),
                return_variable: attr(attrs, "returnvariable"),
                arguments: attributes_except(attrs, &["component", "method", "returnvariable"]),
            })
        })
        .collect()
}

fn extract_includes(content: &str, file: &str, lines: &LineIndex) -> Vec<IncludeRecord> {
    patterns::INCLUDE
        .captures_iter(content)
        .filter_map(|caps| {
            let whole = caps.get(0)?;
            let attrs = caps.get(1).map_or("", |m| m.as_str());
            Some(IncludeRecord {
                location: Location::new(file, lines.line(whole.start())),
                template: attr(attrs, "template"),
            })
        })
        .collect()
}

fn extract_modules(content: &str, file: &str, lines: &LineIndex) -> Vec<ModuleRecord> {
    patterns::MODULE
        .captures_iter(content)
        .filter_map(|caps| {
            let whole = caps.get(0)?;
            let attrs = caps.get(1).map_or("", |m| m.as_str());
            Some(ModuleRecord {
                location: Location::new(file, lines.line(whole.start())),
                template: attr(attrs, "template"),
                name: attr(attrs, "name"),
                attributes: attributes_except(attrs, &["template", "name"]),
            })
        })
        .collect()
}
