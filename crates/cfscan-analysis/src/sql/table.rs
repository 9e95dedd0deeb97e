//! Primary-table inference.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

const UNKNOWN: &str = "Unknown";
const NOT_APPLICABLE: &str = "N/A";

/// Primary table of a statement.
///
/// Serialized as a plain string. Inferred names are always lowercase, so
/// the sentinels `"Unknown"` and `"N/A"` cannot collide with a real table.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(into = "String", from = "String")]
pub enum InferredTable {
    Table(String),
    /// SQL present but no clause pattern matched.
    Unknown,
    /// Empty or whitespace-only SQL.
    NotApplicable,
}

impl InferredTable {
    pub fn as_str(&self) -> &str {
        match self {
            Self::Table(name) => name,
            Self::Unknown => UNKNOWN,
            Self::NotApplicable => NOT_APPLICABLE,
        }
    }

    pub fn name(&self) -> Option<&str> {
        match self {
            Self::Table(name) => Some(name),
            _ => None,
        }
    }
}

impl std::fmt::Display for InferredTable {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<InferredTable> for String {
    fn from(table: InferredTable) -> Self {
        match table {
            InferredTable::Table(name) => name,
            other => other.as_str().to_string(),
        }
    }
}

impl From<String> for InferredTable {
    fn from(s: String) -> Self {
        match s.as_str() {
            UNKNOWN => Self::Unknown,
            NOT_APPLICABLE => Self::NotApplicable,
            _ => Self::Table(s),
        }
    }
}

const IDENT: &str = r"([a-z_][a-z0-9_]*(?:\.[a-z_][a-z0-9_]*)*)";

/// Clause patterns in priority order; `join` is the last resort.
static CLAUSES: Lazy<Vec<Regex>> = Lazy::new(|| {
    ["from", "insert into", "update", "delete from", "join"]
        .iter()
        .map(|clause| {
            let keyword = clause.replace(' ', r"\s+");
            Regex::new(&format!(r"\b{keyword}\s+{IDENT}")).unwrap()
        })
        .collect()
});

static WHITESPACE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").unwrap());

/// Infer the primary table of `sql`.
///
/// The first clause pattern with any match wins, even when a later clause
/// would be the better answer (`INSERT INTO a SELECT ... FROM b` gives `b`).
pub fn infer_table(sql: &str) -> InferredTable {
    let trimmed = sql.trim();
    if trimmed.is_empty() {
        return InferredTable::NotApplicable;
    }
    let normalized = WHITESPACE.replace_all(trimmed, " ").to_lowercase();

    CLAUSES
        .iter()
        .find_map(|pattern| pattern.captures(&normalized))
        .and_then(|caps| caps.get(1))
        .and_then(|m| m.as_str().rsplit('.').next())
        .map(|name| InferredTable::Table(name.to_string()))
        .unwrap_or(InferredTable::Unknown)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table(name: &str) -> InferredTable {
        InferredTable::Table(name.to_string())
    }

    #[test]
    fn test_clause_kinds() {
        assert_eq!(infer_table("SELECT a FROM Orders"), table("orders"));
        assert_eq!(infer_table("INSERT INTO audit (a) VALUES (1)"), table("audit"));
        assert_eq!(infer_table("UPDATE users SET a = 1"), table("users"));
        assert_eq!(infer_table("DELETE FROM sessions"), table("sessions"));
    }

    #[test]
    fn test_from_has_priority() {
        assert_eq!(
            infer_table("INSERT INTO archive SELECT * FROM orders"),
            table("orders")
        );
        assert_eq!(
            infer_table("SELECT * FROM a INNER JOIN b ON a.id = b.id"),
            table("a")
        );
    }

    #[test]
    fn test_join_fallback() {
        assert_eq!(infer_table("... JOIN lines ON 1 = 1"), table("lines"));
    }

    #[test]
    fn test_schema_qualified() {
        assert_eq!(infer_table("select * from dbo.Customers"), table("customers"));
        assert_eq!(infer_table("select * from db.dbo.items"), table("items"));
    }

    #[test]
    fn test_whitespace_is_collapsed() {
        assert_eq!(infer_table("SELECT *\n\tFROM\n   products"), table("products"));
    }

    #[test]
    fn test_keyword_must_be_whole_word() {
        assert_eq!(infer_table("SELECT datefrom x"), InferredTable::Unknown);
    }

    #[test]
    fn test_sentinels() {
        assert_eq!(infer_table(""), InferredTable::NotApplicable);
        assert_eq!(infer_table("   \n"), InferredTable::NotApplicable);
        assert_eq!(infer_table("EXEC sp_refresh"), InferredTable::Unknown);
        assert_eq!(InferredTable::Unknown.to_string(), "Unknown");
        assert_eq!(InferredTable::NotApplicable.to_string(), "N/A");
    }

    #[test]
    fn test_serializes_as_string() {
        let json = serde_json::to_string(&table("orders")).unwrap();
        assert_eq!(json, "\"orders\"");
        let back: InferredTable = serde_json::from_str("\"N/A\"").unwrap();
        assert_eq!(back, InferredTable::NotApplicable);
    }
}
