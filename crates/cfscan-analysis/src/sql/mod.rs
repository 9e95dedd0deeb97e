//! SQL heuristics for query blocks: primary table and complexity tier.
//!
//! Neither is a parser. Table inference takes the first hit from a fixed
//! list of clause patterns; complexity is a keyword-weighted score.

mod score;
mod table;

pub use score::{score, Complexity};
pub use table::{infer_table, InferredTable};

use serde::{Deserialize, Serialize};

/// Outcome of analyzing one query's SQL text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SqlAnalysis {
    pub table: InferredTable,
    pub complexity: Complexity,
    pub score: i32,
}

pub struct SqlAnalyzer;

impl SqlAnalyzer {
    pub fn analyze(sql: &str) -> SqlAnalysis {
        let score = score(sql);
        SqlAnalysis {
            table: infer_table(sql),
            complexity: Complexity::from_score(score),
            score,
        }
    }
}
