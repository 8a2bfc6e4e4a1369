//! Data query tool for the bundled CSV dataset
//!
//! The demo ships a small spending dataset the assistant consults before
//! charting or summarizing numbers. The file is parsed line-by-line into
//! typed records; per the demo's scope there is no resilience to malformed
//! rows - missing cells simply come back empty.

use serde::{Deserialize, Serialize};
use serde_json::json;
use std::future::Future;
use std::path::PathBuf;
use std::pin::Pin;
use std::sync::Arc;
use taskboard_core::agent::{InvocationContext, Tool, ToolError, ToolExecutorFn, ToolResult};

/// One row of the dataset
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DataRecord {
    /// Transaction date (as written in the file)
    pub date: String,
    /// Top-level category
    pub category: String,
    /// Finer-grained category
    pub subcategory: String,
    /// Amount (as written in the file)
    pub amount: String,
    /// Record type (e.g. income or expense)
    #[serde(rename = "type")]
    pub record_type: String,
}

/// Typed input of the `query_data` tool
#[derive(Debug, Deserialize)]
struct QueryDataInput {
    query: String,
}

/// Parse CSV content into records
///
/// The first line is the header; columns are matched by name so their order
/// in the file does not matter. Cells are split on commas - the dataset
/// carries no quoted fields.
#[must_use]
pub fn parse_records(content: &str) -> Vec<DataRecord> {
    let mut lines = content.trim().lines();
    let Some(header) = lines.next() else {
        return Vec::new();
    };
    let columns: Vec<&str> = header.split(',').map(str::trim).collect();

    let field = |values: &[&str], name: &str| -> String {
        columns
            .iter()
            .position(|c| *c == name)
            .and_then(|i| values.get(i))
            .map_or_else(String::new, |v| (*v).trim().to_string())
    };

    lines
        .map(|line| {
            let values: Vec<&str> = line.split(',').collect();
            DataRecord {
                date: field(&values, "date"),
                category: field(&values, "category"),
                subcategory: field(&values, "subcategory"),
                amount: field(&values, "amount"),
                record_type: field(&values, "type"),
            }
        })
        .collect()
}

/// Create the `query_data` tool
///
/// Reads the dataset at `data_path` and returns all records as JSON. The
/// query string is required by the schema but only logged - the model filters
/// the returned rows itself.
///
/// Returns JSON:
/// ```json
/// [
///   {"date": "2025-01-03", "category": "Food", "subcategory": "Groceries",
///    "amount": "82.50", "type": "expense"}
/// ]
/// ```
#[must_use]
pub fn query_data_tool(data_path: PathBuf) -> (Tool, ToolExecutorFn) {
    let tool = Tool {
        name: "query_data".to_string(),
        description: "Query the database. Always call before showing a chart or graph."
            .to_string(),
        input_schema: json!({
            "type": "object",
            "properties": {
                "query": {
                    "type": "string",
                    "description": "The query to execute"
                }
            },
            "required": ["query"]
        }),
    };

    let executor = Arc::new(move |input: String, _ctx: InvocationContext| {
        let data_path = data_path.clone();
        Box::pin(async move {
            let parsed: QueryDataInput = serde_json::from_str(&input).map_err(|e| ToolError {
                message: format!("Invalid input JSON: {e}"),
            })?;
            tracing::debug!(query = %parsed.query, "query_data invoked");

            let content = tokio::fs::read_to_string(&data_path)
                .await
                .map_err(|e| ToolError {
                    message: format!("Failed to read dataset {}: {e}", data_path.display()),
                })?;

            let records = parse_records(&content);

            serde_json::to_string(&records).map_err(|e| ToolError {
                message: format!("Failed to serialize records: {e}"),
            })
        }) as Pin<Box<dyn Future<Output = ToolResult> + Send>>
    }) as ToolExecutorFn;

    (tool, executor)
}
