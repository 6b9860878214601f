use super::model::{CellValue, Table};
use crate::error::Result;

// ---------------------------------------------------------------------------
// Exclusion rule: which samples are dropped before analysis
// ---------------------------------------------------------------------------

pub const METHOD_COLUMN: &str = "method";
pub const EYE_ID_COLUMN: &str = "eye_id";

/// Rows matching *either* sentinel are excluded.
#[derive(Debug, Clone, PartialEq)]
pub struct ExclusionRule {
    /// Detector name whose samples are dropped.
    pub method: String,
    /// Eye camera whose samples are dropped.
    pub eye_id: i64,
}

impl Default for ExclusionRule {
    /// Drops the 2D detector output and everything from eye camera 1.
    fn default() -> Self {
        Self {
            method: "2d c++".to_string(),
            eye_id: 1,
        }
    }
}

impl ExclusionRule {
    fn excludes_method(&self, cell: &CellValue) -> bool {
        cell.as_str() == Some(self.method.as_str())
    }

    fn excludes_eye(&self, cell: &CellValue) -> bool {
        cell.as_f64() == Some(self.eye_id as f64)
    }
}

/// Return indices of rows that survive the rule, in table order.
///
/// A row survives when:
/// * its `method` cell is not the text `rule.method`, and
/// * its `eye_id` cell is not numerically `rule.eye_id` (`1` and `1.0` both match).
///
/// `Null` cells never match. Fails with `MissingColumn` if either column is absent.
pub fn retained_indices(table: &Table, rule: &ExclusionRule) -> Result<Vec<usize>> {
    let method_idx = table.column_index(METHOD_COLUMN)?;
    let eye_idx = table.column_index(EYE_ID_COLUMN)?;

    Ok(table
        .rows
        .iter()
        .enumerate()
        .filter(|(_, row)| !rule.excludes_method(&row[method_idx]))
        .filter(|(_, row)| !rule.excludes_eye(&row[eye_idx]))
        .map(|(i, _)| i)
        .collect())
}

/// Derive the filtered table. Pure and idempotent; row order is preserved.
pub fn exclude_rows(table: &Table, rule: &ExclusionRule) -> Result<Table> {
    let keep = retained_indices(table, rule)?;
    Ok(table.select(&keep))
}
