use std::cmp::Ordering;
use std::fmt;

use crate::error::{Error, Result};

// ---------------------------------------------------------------------------
// CellValue – a single cell of the recording table
// ---------------------------------------------------------------------------

/// A dynamically-typed cell mirroring the dtypes a CSV export usually carries.
///
/// Equality goes through [`Ord`], which compares floats with `total_cmp`, so a
/// `NaN` cell equals another `NaN` cell.
#[derive(Debug, Clone)]
pub enum CellValue {
    Text(String),
    Integer(i64),
    Float(f64),
    Bool(bool),
    /// Empty field.
    Null,
}

impl PartialEq for CellValue {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for CellValue {}

impl PartialOrd for CellValue {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for CellValue {
    fn cmp(&self, other: &Self) -> Ordering {
        use CellValue::*;
        fn discriminant(v: &CellValue) -> u8 {
            match v {
                Null => 0,
                Bool(_) => 1,
                Integer(_) => 2,
                Float(_) => 3,
                Text(_) => 4,
            }
        }
        match (self, other) {
            (Null, Null) => Ordering::Equal,
            (Bool(a), Bool(b)) => a.cmp(b),
            (Integer(a), Integer(b)) => a.cmp(b),
            (Float(a), Float(b)) => a.total_cmp(b),
            (Text(a), Text(b)) => a.cmp(b),
            _ => discriminant(self).cmp(&discriminant(other)),
        }
    }
}

impl fmt::Display for CellValue {
    /// Formats the cell the way the persister writes it.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::Text(s) => write!(f, "{s}"),
            CellValue::Integer(i) => write!(f, "{i}"),
            CellValue::Float(v) => write!(f, "{}", format_float(*v)),
            CellValue::Bool(true) => write!(f, "True"),
            CellValue::Bool(false) => write!(f, "False"),
            CellValue::Null => Ok(()),
        }
    }
}

impl CellValue {
    /// Numeric view of the cell, used for plotting and the `eye_id` match.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            CellValue::Float(v) => Some(*v),
            CellValue::Integer(i) => Some(*i as f64),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            CellValue::Text(s) => Some(s),
            _ => None,
        }
    }
}

/// Shortest round-trip representation that still reads back as a float.
fn format_float(v: f64) -> String {
    let s = v.to_string();
    if s.contains(['.', 'e', 'E']) || !v.is_finite() {
        s
    } else {
        format!("{s}.0")
    }
}

// ---------------------------------------------------------------------------
// ColumnType – inferred dtype of a whole column
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnType {
    Integer,
    Float,
    Bool,
    Text,
}

impl ColumnType {
    /// Narrowest type accepting every non-empty field. Columns with no
    /// non-empty field are `Text`.
    pub fn infer<'a>(fields: impl IntoIterator<Item = &'a str>) -> Self {
        let (mut int, mut float, mut boolean) = (true, true, true);
        let mut seen = false;
        for field in fields.into_iter().filter(|s| !s.is_empty()) {
            seen = true;
            int &= field.parse::<i64>().is_ok();
            float &= field.parse::<f64>().is_ok();
            boolean &= parse_bool(field).is_some();
            if !(int || float || boolean) {
                break;
            }
        }
        match (seen, int, float, boolean) {
            (false, ..) => ColumnType::Text,
            (_, true, _, _) => ColumnType::Integer,
            (_, _, true, _) => ColumnType::Float,
            (_, _, _, true) => ColumnType::Bool,
            _ => ColumnType::Text,
        }
    }

    /// Convert a raw field into a cell of this type. The field is known to
    /// be accepted because the type was inferred from it.
    pub fn parse(self, field: &str) -> CellValue {
        if field.is_empty() {
            return CellValue::Null;
        }
        match self {
            ColumnType::Integer => field
                .parse()
                .map(CellValue::Integer)
                .unwrap_or_else(|_| CellValue::Text(field.to_string())),
            ColumnType::Float => field
                .parse()
                .map(CellValue::Float)
                .unwrap_or_else(|_| CellValue::Text(field.to_string())),
            ColumnType::Bool => parse_bool(field)
                .map(CellValue::Bool)
                .unwrap_or_else(|| CellValue::Text(field.to_string())),
            ColumnType::Text => CellValue::Text(field.to_string()),
        }
    }
}

fn parse_bool(s: &str) -> Option<bool> {
    match s {
        "true" | "True" => Some(true),
        "false" | "False" => Some(false),
        _ => None,
    }
}

// ---------------------------------------------------------------------------
// Table – the complete loaded recording
// ---------------------------------------------------------------------------

/// A row-major table with named, typed columns.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Table {
    /// Column names in file order.
    pub headers: Vec<String>,
    /// One inferred type per header.
    pub column_types: Vec<ColumnType>,
    /// Rows in file order, one cell per header.
    pub rows: Vec<Vec<CellValue>>,
}

impl Table {
    /// A table with the given headers and no rows. Column types default to
    /// `Text`, matching what inference yields for an empty column.
    pub fn empty(headers: Vec<String>) -> Self {
        let column_types = vec![ColumnType::Text; headers.len()];
        Table {
            headers,
            column_types,
            rows: Vec::new(),
        }
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Whether the table has no rows.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Position of the column named `name`.
    pub fn column_index(&self, name: &str) -> Result<usize> {
        self.headers
            .iter()
            .position(|h| h == name)
            .ok_or_else(|| Error::MissingColumn(name.to_string()))
    }

    /// Iterate the cells of one column.
    pub fn column(&self, name: &str) -> Result<impl Iterator<Item = &CellValue>> {
        let idx = self.column_index(name)?;
        Ok(self.rows.iter().map(move |row| &row[idx]))
    }

    /// Numeric values of one column; cells without a numeric view become `NaN`.
    pub fn numeric_column(&self, name: &str) -> Result<Vec<f64>> {
        Ok(self
            .column(name)?
            .map(|cell| cell.as_f64().unwrap_or(f64::NAN))
            .collect())
    }

    /// Same headers and the same written text in every cell.
    ///
    /// Column types are not compared: a header-only file re-infers every
    /// column as `Text`, and a text column whose cells are all digits
    /// re-infers as `Integer`.
    pub fn same_data(&self, other: &Table) -> bool {
        self.headers == other.headers
            && self.rows.len() == other.rows.len()
            && self.rows.iter().zip(&other.rows).all(|(a, b)| {
                a.len() == b.len() && a.iter().zip(b).all(|(x, y)| x.to_string() == y.to_string())
            })
    }

    /// New table holding the rows at `indices`, in the order given.
    pub fn select(&self, indices: &[usize]) -> Table {
        Table {
            headers: self.headers.clone(),
            column_types: self.column_types.clone(),
            rows: indices.iter().map(|&i| self.rows[i].clone()).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn infers_narrowest_type() {
        assert_eq!(ColumnType::infer(["0", "1", ""]), ColumnType::Integer);
        assert_eq!(ColumnType::infer(["0", "1.5"]), ColumnType::Float);
        assert_eq!(ColumnType::infer(["True", "false"]), ColumnType::Bool);
        assert_eq!(ColumnType::infer(["2d c++", "1"]), ColumnType::Text);
        assert_eq!(ColumnType::infer(["", ""]), ColumnType::Text);
        assert_eq!(ColumnType::infer(std::iter::empty()), ColumnType::Text);
    }

    #[test]
    fn floats_always_carry_a_decimal_point() {
        assert_eq!(CellValue::Float(1.0).to_string(), "1.0");
        assert_eq!(CellValue::Float(-0.25).to_string(), "-0.25");
        assert_eq!(CellValue::Float(1e-7).to_string().parse::<f64>().unwrap(), 1e-7);
        assert_eq!(CellValue::Null.to_string(), "");
        assert_eq!(CellValue::Bool(true).to_string(), "True");
    }

    #[test]
    fn nan_cells_compare_equal() {
        assert_eq!(CellValue::Float(f64::NAN), CellValue::Float(f64::NAN));
        assert_ne!(CellValue::Integer(1), CellValue::Float(1.0));
    }

    #[test]
    fn missing_column_is_reported_by_name() {
        let table = Table::empty(vec!["phi".into()]);
        match table.column_index("theta") {
            Err(Error::MissingColumn(name)) => assert_eq!(name, "theta"),
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn same_data_ignores_column_types() {
        let mut text = Table::empty(vec!["n".into()]);
        text.rows = vec![vec![CellValue::Text("7".into())]];
        let mut int = text.clone();
        int.column_types = vec![ColumnType::Integer];
        int.rows = vec![vec![CellValue::Integer(7)]];

        assert_ne!(text, int);
        assert!(text.same_data(&int));

        int.rows = vec![vec![CellValue::Integer(8)]];
        assert!(!text.same_data(&int));
    }

    #[test]
    fn select_preserves_requested_order() {
        let mut table = Table::empty(vec!["n".into()]);
        table.column_types = vec![ColumnType::Integer];
        table.rows = (0..4).map(|i| vec![CellValue::Integer(i)]).collect();
        let picked = table.select(&[0, 2]);
        assert_eq!(
            picked.rows,
            vec![vec![CellValue::Integer(0)], vec![CellValue::Integer(2)]]
        );
    }
}
