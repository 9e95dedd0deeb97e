//! Element records produced by tag extraction.

use serde::{Deserialize, Serialize};

use crate::sql::{Complexity, InferredTable};

/// Where a tag starts: declaring file and 1-based line.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Location {
    pub file: String,
    pub line: u32,
}

impl Location {
    pub fn new(file: impl Into<String>, line: u32) -> Self {
        Self {
            file: file.into(),
            line,
        }
    }
}

impl std::fmt::Display for Location {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}", self.file, self.line)
    }
}

/// A `key="value"` pair read off a tag.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attribute {
    pub key: String,
    pub value: String,
}

/// Enclosing declaration of a query block.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeclarationContext {
    pub component: Option<String>,
    pub function: Option<String>,
}

/// A `<cfqueryparam>` inside a query block.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueryParam {
    pub value: Option<String>,
    pub sql_type: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueryRecord {
    pub location: Location,
    pub name: Option<String>,
    pub datasource: Option<String>,
    /// Interior of the block, trimmed.
    pub sql: String,
    pub table: InferredTable,
    pub complexity: Complexity,
    /// Keyword-weighted score; -1 for text with no SELECT and no other keyword.
    pub score: i32,
    pub params: Vec<QueryParam>,
    pub context: Option<DeclarationContext>,
}

/// A `<cfargument>` of a function.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FunctionParam {
    pub name: Option<String>,
    pub param_type: Option<String>,
    pub required: Option<String>,
}

impl std::fmt::Display for FunctionParam {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}:{}",
            self.name.as_deref().unwrap_or(""),
            self.param_type.as_deref().unwrap_or("")
        )
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FunctionRecord {
    pub location: Location,
    pub name: Option<String>,
    pub access: Option<String>,
    pub return_type: Option<String>,
    pub params: Vec<FunctionParam>,
    /// Files whose content contains `name(`, in catalog order.
    pub used_in: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComponentRecord {
    pub location: Location,
    /// Declaring file's base name without extension.
    pub name: String,
    pub extends: Option<String>,
    pub implements: Option<String>,
    /// Names of the functions declared in the same file.
    pub functions: Vec<String>,
    /// Files whose content mentions the component name, in catalog order.
    pub used_in: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InvokeRecord {
    pub location: Location,
    pub component: Option<String>,
    pub method: Option<String>,
    pub return_variable: Option<String>,
    /// Every other attribute on the tag, in source order.
    pub arguments: Vec<Attribute>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IncludeRecord {
    pub location: Location,
    pub template: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModuleRecord {
    pub location: Location,
    pub template: Option<String>,
    pub name: Option<String>,
    /// Every attribute other than `template` and `name`, in source order.
    pub attributes: Vec<Attribute>,
}
