//! Property tests for the extraction, SQL and resolution building blocks.

use cfscan_analysis::loader::{decode, line_count};
use cfscan_analysis::resolver::{resolve, CorpusFile, Declaration, DeclarationId};
use cfscan_analysis::sql::score;
use cfscan_analysis::{Complexity, InferredTable, SqlAnalyzer, TagExtractor};
use proptest::prelude::*;

fn column() -> impl Strategy<Value = String> {
    "[a-z][a-z0-9_]{0,8}".prop_filter("contains a keyword", |c| {
        let upper = c.to_uppercase();
        !["SELECT", "INSERT", "UPDATE", "DELETE", "JOIN", "WHERE", "HAVING", "AND", "OR"]
            .iter()
            .any(|k| upper.contains(*k))
    })
}

proptest! {
    #[test]
    fn from_orders_always_infers_orders(
        columns in prop::collection::vec(column(), 1..5),
        conditions in prop::collection::vec(column(), 0..8),
    ) {
        let mut sql = format!("SELECT {} FROM orders", columns.join(", "));
        for (i, c) in conditions.iter().enumerate() {
            sql.push_str(if i == 0 { " WHERE " } else { " AND " });
            sql.push_str(&format!("{c} = {i}"));
        }

        let analysis = SqlAnalyzer::analyze(&sql);
        prop_assert_eq!(analysis.table, InferredTable::Table("orders".to_string()));
        // SELECT, the OR inside ORDERS, one per condition.
        let expected = 2 + conditions.len() as i32;
        prop_assert_eq!(analysis.score, expected);
        prop_assert_eq!(analysis.complexity, Complexity::from_score(expected));
        prop_assert_eq!(score(&sql), expected);
    }

    #[test]
    fn function_usages_match_substring(
        name in "[a-z]{1,6}",
        contents in prop::collection::vec("[a-z() ]{0,30}", 1..8),
    ) {
        let paths: Vec<String> = (0..contents.len()).map(|i| format!("f{i}.cfm")).collect();
        let corpus: Vec<CorpusFile<'_>> = paths
            .iter()
            .zip(&contents)
            .map(|(path, content)| CorpusFile { path: path.as_str(), content: content.as_str() })
            .collect();
        let map = resolve(&[Declaration::function(0, name.clone())], &corpus);

        let needle = format!("{name}(");
        let expected: Vec<String> = paths
            .iter()
            .zip(&contents)
            .filter(|(_, content)| content.contains(&needle))
            .map(|(path, _)| path.clone())
            .collect();
        prop_assert_eq!(map.usages(DeclarationId::Function(0)), expected.as_slice());
    }

    #[test]
    fn any_bytes_decode(bytes in prop::collection::vec(any::<u8>(), 0..256)) {
        let content = decode(&bytes);
        prop_assert!(line_count(&content.text) <= bytes.len());
    }

    #[test]
    fn extraction_never_panics(content in "(<cf[a-z]{0,10}[ a-z=\"'#]{0,20}>?|[a-z \n<>/]{0,10}){0,20}") {
        let elements = TagExtractor::extract(&content, "x.cfm");
        for location in elements.queries.iter().map(|q| &q.location) {
            prop_assert!(location.line >= 1);
        }
    }

    #[test]
    fn component_name_is_file_stem(stem in "[A-Za-z][A-Za-z0-9_]{0,12}", attr_name in "[A-Za-z]{1,8}") {
        let content = format!("<cfcomponent name=\"{attr_name}\">");
        let elements = TagExtractor::extract(&content, &format!("dir/{stem}.cfc"));
        prop_assert_eq!(&elements.components[0].name, &stem);
    }
}
