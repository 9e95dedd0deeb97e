//! JSON reporter - the full result plus derived views.

use cfscan_core::errors::ReportError;
use serde::Serialize;

use super::Reporter;
use crate::result::{AnalysisResult, QueryGroup, TableUsage};

/// JSON with the complete result, query groups and table usage.
#[derive(Debug, Clone)]
pub struct JsonReporter {
    pub pretty: bool,
}

impl Default for JsonReporter {
    fn default() -> Self {
        Self { pretty: true }
    }
}

#[derive(Serialize)]
struct JsonReport<'a> {
    result: &'a AnalysisResult,
    query_groups: Vec<QueryGroup>,
    tables: Vec<TableUsage>,
}

impl Reporter for JsonReporter {
    fn name(&self) -> &'static str {
        "json"
    }

    fn extension(&self) -> &'static str {
        "json"
    }

    fn generate(&self, result: &AnalysisResult) -> Result<String, ReportError> {
        let report = JsonReport {
            result,
            query_groups: result.query_groups(),
            tables: result.tables(),
        };
        let rendered = if self.pretty {
            serde_json::to_string_pretty(&report)?
        } else {
            serde_json::to_string(&report)?
        };
        Ok(rendered)
    }
}
