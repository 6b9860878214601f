//! Property tests for the row filter and the CSV round trip.

use proptest::prelude::*;

use pupil_viewer::data::filter::{exclude_rows, retained_indices, ExclusionRule};
use pupil_viewer::data::loader::load_table;
use pupil_viewer::data::model::{CellValue, ColumnType, Table};
use pupil_viewer::data::writer::save_table;

const METHODS: [&str; 3] = ["2d c++", "pye3d 0.3.0 real-time", "3d c++"];

fn row_strategy() -> impl Strategy<Value = Vec<CellValue>> {
    (
        prop::sample::select(METHODS.to_vec()),
        0i64..3,
        -3.2f64..3.2,
        prop::option::of(-3.2f64..3.2),
    )
        .prop_map(|(method, eye, phi, theta)| {
            vec![
                CellValue::Text(method.to_string()),
                CellValue::Integer(eye),
                CellValue::Float(phi),
                theta.map(CellValue::Float).unwrap_or(CellValue::Null),
            ]
        })
}

fn table_strategy() -> impl Strategy<Value = Table> {
    prop::collection::vec(row_strategy(), 0..40).prop_map(|rows| Table {
        headers: ["method", "eye_id", "phi", "theta"].map(String::from).to_vec(),
        column_types: vec![
            ColumnType::Text,
            ColumnType::Integer,
            ColumnType::Float,
            ColumnType::Float,
        ],
        rows,
    })
}

proptest! {
    #[test]
    fn no_excluded_rows_survive(table in table_strategy()) {
        let filtered = exclude_rows(&table, &ExclusionRule::default()).unwrap();
        for row in &filtered.rows {
            prop_assert_ne!(&row[0], &CellValue::Text("2d c++".into()));
            prop_assert_ne!(&row[1], &CellValue::Integer(1));
        }
    }

    #[test]
    fn filtering_is_idempotent(table in table_strategy()) {
        let rule = ExclusionRule::default();
        let once = exclude_rows(&table, &rule).unwrap();
        let twice = exclude_rows(&once, &rule).unwrap();
        prop_assert_eq!(once, twice);
    }

    #[test]
    fn row_order_is_a_subsequence(table in table_strategy()) {
        let kept = retained_indices(&table, &ExclusionRule::default()).unwrap();
        prop_assert!(kept.windows(2).all(|w| w[0] < w[1]));
        let filtered = table.select(&kept);
        for (row, &i) in filtered.rows.iter().zip(&kept) {
            prop_assert_eq!(row, &table.rows[i]);
        }
    }

    #[test]
    fn saved_table_reloads_identically(table in table_strategy()) {
        let filtered = exclude_rows(&table, &ExclusionRule::default()).unwrap();

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("analysis").join("filtered_pupil_data.csv");
        save_table(&filtered, &path).unwrap();
        let reloaded = load_table(&path).unwrap();

        prop_assert!(reloaded.same_data(&filtered), "{:?} != {:?}", reloaded, filtered);
        prop_assert_eq!(reloaded.len(), filtered.len());
    }
}
