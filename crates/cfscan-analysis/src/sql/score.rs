//! Keyword-weighted complexity score.

use serde::{Deserialize, Serialize};

const LOW_MAX: i32 = 5;
const MEDIUM_MAX: i32 = 15;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Complexity {
    Low,
    Medium,
    High,
}

impl Complexity {
    /// `<= 5` Low (negative scores included), `<= 15` Medium, else High.
    pub fn from_score(score: i32) -> Self {
        match score {
            s if s <= LOW_MAX => Self::Low,
            s if s <= MEDIUM_MAX => Self::Medium,
            _ => Self::High,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Low => "Low",
            Self::Medium => "Medium",
            Self::High => "High",
        }
    }
}

impl std::fmt::Display for Complexity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Score `sql`:
/// - +1 for each of SELECT, INSERT, UPDATE, DELETE that appears at all
/// - +1 per JOIN
/// - +(SELECT count - 1) for nested selects; -1 when there is no SELECT
/// - +1 per WHERE, HAVING, AND, OR, GROUP BY, ORDER BY
///
/// Keywords are counted as non-overlapping substrings of the uppercased,
/// whitespace-collapsed text, so `ORDERS` contributes an `OR` and
/// `ORDER BY` counts for both `OR` and `ORDER BY`.
pub fn score(sql: &str) -> i32 {
    let text = sql.split_whitespace().collect::<Vec<_>>().join(" ").to_uppercase();
    let count = |keyword: &str| i32::try_from(text.matches(keyword).count()).unwrap_or(i32::MAX);

    let statements = ["SELECT", "INSERT", "UPDATE", "DELETE"]
        .into_iter()
        .filter(|k| text.contains(*k))
        .count() as i32;
    let joins = count("JOIN");
    let nested = count("SELECT") - 1;
    let clauses = ["WHERE", "HAVING", "AND", "OR", "GROUP BY", "ORDER BY"]
        .into_iter()
        .map(count)
        .fold(0i32, i32::saturating_add);

    statements
        .saturating_add(joins)
        .saturating_add(nested)
        .saturating_add(clauses)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_tiers() {
        assert_eq!(Complexity::from_score(-1), Complexity::Low);
        assert_eq!(Complexity::from_score(0), Complexity::Low);
        assert_eq!(Complexity::from_score(5), Complexity::Low);
        assert_eq!(Complexity::from_score(6), Complexity::Medium);
        assert_eq!(Complexity::from_score(15), Complexity::Medium);
        assert_eq!(Complexity::from_score(16), Complexity::High);
    }

    #[test]
    fn test_score_components() {
        assert_eq!(score("SELECT * FROM t"), 1);
        assert_eq!(score("select * from a join b on 1=1 left join c on 1=1"), 3);
        // OR counted twice: the condition and the one inside ORDER BY.
        assert_eq!(
            score("SELECT a FROM t WHERE x = 1 AND y = 2 OR z = 3 GROUP BY a HAVING COUNT(*) > 1 ORDER BY a"),
            8
        );
    }

    #[test]
    fn test_subqueries() {
        let sql = "SELECT * FROM a WHERE id IN (SELECT id FROM b WHERE x IN (SELECT x FROM c))";
        // SELECT presence 1, two WHEREs, two extra SELECTs.
        assert_eq!(score(sql), 5);
    }

    #[test]
    fn test_statements_without_select_lose_a_point() {
        assert_eq!(score("DELETE FROM t"), 0);
        assert_eq!(score("INSERT INTO t (a) VALUES (1)"), 0);
        assert_eq!(score(""), -1);
    }

    #[test]
    fn test_update_at_low_boundary() {
        // UPDATE 1 + WHERE 1 + four ANDs - 1 for the missing SELECT.
        let sql = "UPDATE t SET a = 1 WHERE b = 2 AND c = 3 AND d = 4 AND e = 5 AND f = 6";
        assert_eq!(score(sql), 5);
        assert_eq!(Complexity::from_score(score(sql)), Complexity::Low);

        let one_more = format!("{sql} AND g = 7");
        assert_eq!(Complexity::from_score(score(&one_more)), Complexity::Medium);
    }

    #[test]
    fn test_keywords_count_inside_identifiers() {
        // ORDERS has an OR, BRANDS an AND, SELECTED a SELECT, UPDATED_AT an UPDATE.
        assert_eq!(score("SELECT * FROM orders"), 2);
        assert_eq!(score("SELECT selected, updated_at FROM orders, brands"), 5);
    }

    #[test]
    fn test_whitespace_is_collapsed() {
        assert_eq!(score("SELECT a FROM t GROUP\n   BY a"), 2);
        assert_eq!(score("select a from t order\tby a"), 3);
    }

    #[test]
    fn test_high_tier() {
        let mut sql = String::from("SELECT * FROM t WHERE a = 1");
        for i in 0..20 {
            sql.push_str(&format!(" AND c{i} = {i}"));
        }
        assert_eq!(Complexity::from_score(score(&sql)), Complexity::High);
    }

    proptest! {
        #[test]
        fn appending_a_clause_never_lowers_the_score(sql in "[ -~\n]{0,120}", clause in prop::sample::select(vec![
            " WHERE a = 1", " AND b = 2", " OR c = 3", " JOIN d ON 1 = 1", " ORDER BY e", " SELECT f",
        ])) {
            let before = score(&sql);
            let after = score(&format!("{sql}{clause}"));
            prop_assert!(after >= before);
            prop_assert!(Complexity::from_score(after) >= Complexity::from_score(before));
        }
    }
}
