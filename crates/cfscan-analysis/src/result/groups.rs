//! Derived views over the query list.

use serde::{Deserialize, Serialize};

use crate::model::{Location, QueryRecord};
use crate::sql::InferredTable;

/// Group name for queries without a `name` attribute.
pub const UNNAMED_QUERY: &str = "Unnamed";

/// Maximum characters kept per SQL extract in a group.
pub const SQL_EXTRACT_LIMIT: usize = 100;

/// Queries sharing one name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueryGroup {
    pub name: String,
    /// Distinct locations, first-seen order.
    pub locations: Vec<Location>,
    /// Datasource and table of the first query in the group.
    pub datasource: Option<String>,
    pub table: InferredTable,
    /// One abbreviated SQL extract per query.
    pub sql_extracts: Vec<String>,
    pub execution_count: usize,
}

/// How many queries infer a given table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableUsage {
    pub table: String,
    pub queries: usize,
}

pub(super) fn group_queries(queries: &[QueryRecord]) -> Vec<QueryGroup> {
    let mut groups: Vec<QueryGroup> = Vec::new();
    let mut index: rustc_hash::FxHashMap<&str, usize> = rustc_hash::FxHashMap::default();

    for query in queries {
        let name = query.name.as_deref().unwrap_or(UNNAMED_QUERY);
        let extract = abbreviate(&query.sql, SQL_EXTRACT_LIMIT);
        match index.get(name) {
            Some(&i) => {
                let group = &mut groups[i];
                group.execution_count += 1;
                if !group.locations.contains(&query.location) {
                    group.locations.push(query.location.clone());
                }
                group.sql_extracts.push(extract);
            }
            None => {
                index.insert(name, groups.len());
                groups.push(QueryGroup {
                    name: name.to_string(),
                    locations: vec![query.location.clone()],
                    datasource: query.datasource.clone(),
                    table: query.table.clone(),
                    sql_extracts: vec![extract],
                    execution_count: 1,
                });
            }
        }
    }
    groups
}

pub(super) fn table_usage(queries: &[QueryRecord]) -> Vec<TableUsage> {
    let mut counts: std::collections::BTreeMap<&str, usize> = std::collections::BTreeMap::new();
    for name in queries.iter().filter_map(|q| q.table.name()) {
        *counts.entry(name).or_insert(0) += 1;
    }
    counts
        .into_iter()
        .map(|(table, queries)| TableUsage {
            table: table.to_string(),
            queries,
        })
        .collect()
}

/// Trim `text` and cut it to `limit` characters, ending in `...` when cut.
pub fn abbreviate(text: &str, limit: usize) -> String {
    let text = text.trim();
    if text.chars().count() <= limit {
        return text.to_string();
    }
    let keep = limit.saturating_sub(3);
    let mut out: String = text.chars().take(keep).collect();
    out.push_str("...");
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sql::Complexity;

    fn query(name: Option<&str>, file: &str, line: u32, sql: &str, table: InferredTable) -> QueryRecord {
        QueryRecord {
            location: Location::new(file, line),
            name: name.map(str::to_string),
            datasource: Some("main".to_string()),
            sql: sql.to_string(),
            table,
            complexity: Complexity::Low,
            score: 1,
            params: vec![],
            context: None,
        }
    }

    #[test]
    fn test_group_by_name_in_first_seen_order() {
        let orders = InferredTable::Table("orders".to_string());
        let queries = vec![
            query(Some("getOrders"), "a.cfm", 3, "SELECT * FROM orders", orders.clone()),
            query(None, "a.cfm", 9, "SELECT 1", InferredTable::Unknown),
            query(Some("getOrders"), "b.cfm", 4, "SELECT id FROM orders", orders.clone()),
            query(None, "c.cfm", 1, "", InferredTable::NotApplicable),
        ];
        let groups = group_queries(&queries);

        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].name, "getOrders");
        assert_eq!(groups[0].execution_count, 2);
        assert_eq!(groups[0].locations, vec![Location::new("a.cfm", 3), Location::new("b.cfm", 4)]);
        assert_eq!(groups[0].table, orders);
        assert_eq!(groups[1].name, UNNAMED_QUERY);
        assert_eq!(groups[1].sql_extracts, vec!["SELECT 1".to_string(), String::new()]);
    }

    #[test]
    fn test_table_usage_skips_sentinels() {
        let queries = vec![
            query(None, "a.cfm", 1, "", InferredTable::Table("users".to_string())),
            query(None, "a.cfm", 2, "", InferredTable::Table("orders".to_string())),
            query(None, "a.cfm", 3, "", InferredTable::Table("users".to_string())),
            query(None, "a.cfm", 4, "", InferredTable::Unknown),
        ];
        let tables = table_usage(&queries);
        assert_eq!(
            tables,
            vec![
                TableUsage { table: "orders".to_string(), queries: 1 },
                TableUsage { table: "users".to_string(), queries: 2 },
            ]
        );
    }

    #[test]
    fn test_abbreviate() {
        assert_eq!(abbreviate("  short  ", 10), "short");
        assert_eq!(abbreviate("abcdefghijk", 10), "abcdefg...");
        assert_eq!(abbreviate("ñññññ", 5), "ñññññ");
    }
}
