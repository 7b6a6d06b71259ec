use super::loader::{nsl_kdd_schema, read_table, read_table_from_path};
use super::{Cell, Table};
use crate::constants::{DIFFICULTY_COLUMN, LABEL_COLUMN, NSL_KDD_COLUMN_COUNT};
use crate::logic::error::PrepError;
use std::io::Write;

fn kdd_line(protocol: &str, label: &str, difficulty: Option<u32>) -> String {
    let mut fields = vec!["0".to_string(), protocol.to_string(), "http".to_string(), "SF".to_string()];
    fields.extend((0..37).map(|i| format!("{}", i)));
    fields.push(label.to_string());
    if let Some(d) = difficulty {
        fields.push(d.to_string());
    }
    fields.join(",")
}

#[test]
fn test_table_rejects_ragged_rows() {
    let result = Table::from_rows(&["a", "b"], vec![vec!["1", "2"], vec!["3"]]);
    assert!(matches!(result, Err(PrepError::SchemaMismatch(_))));
}

#[test]
fn test_table_rejects_duplicate_columns() {
    let result = Table::from_rows(&["a", "a"], vec![vec!["1", "2"]]);
    assert!(matches!(result, Err(PrepError::SchemaMismatch(_))));
}

#[test]
fn test_table_column_access() {
    let table = Table::from_rows(&["protocol", "bytes"], vec![vec!["tcp", "10"], vec!["udp", ""]]).unwrap();
    assert_eq!(table.shape(), (2, 2));
    assert_eq!(table.column_index("bytes"), Some(1));
    assert!(table.require_column("missing").is_err());

    let bytes: Vec<&Cell> = table.column(1).collect();
    assert_eq!(bytes, vec![&Cell::Number(10.0), &Cell::Missing]);
}

#[test]
fn test_schema_widths() {
    assert_eq!(nsl_kdd_schema(NSL_KDD_COLUMN_COUNT).unwrap().len(), 42);

    let plus = nsl_kdd_schema(NSL_KDD_COLUMN_COUNT + 1).unwrap();
    assert_eq!(plus.last().map(String::as_str), Some(DIFFICULTY_COLUMN));

    assert!(nsl_kdd_schema(10).is_err());
}

#[test]
fn test_read_headerless_plus_file() {
    let data = format!(
        "{}\n{}\n",
        kdd_line("tcp", "normal", Some(20)),
        kdd_line("udp", "neptune", Some(21))
    );

    let table = read_table(data.as_bytes(), false).unwrap();
    assert_eq!(table.shape(), (2, 43));

    let label = table.require_column(LABEL_COLUMN).unwrap();
    assert_eq!(table.rows()[1].get(label), Some(&Cell::Text("neptune".to_string())));

    let protocol = table.require_column("protocol_type").unwrap();
    assert_eq!(table.rows()[0].get(protocol), Some(&Cell::Text("tcp".to_string())));
}

#[test]
fn test_read_rejects_inconsistent_width() {
    let data = format!("{}\n{}\n", kdd_line("tcp", "normal", None), kdd_line("tcp", "normal", Some(3)));
    let result = read_table(data.as_bytes(), false);
    assert!(matches!(result, Err(PrepError::SchemaMismatch(_))));
}

#[test]
fn test_read_with_headers() {
    let data = "protocol, bytes ,label\ntcp,100,normal\nicmp,N/A,smurf\n";
    let table = read_table(data.as_bytes(), true).unwrap();

    assert_eq!(table.schema(), &["protocol", "bytes", "label"]);
    assert_eq!(table.rows()[1].get(1), Some(&Cell::Text("N/A".to_string())));
}

#[test]
fn test_read_from_path() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("KDDTrain+.txt");

    let mut file = std::fs::File::create(&path).unwrap();
    writeln!(file, "{}", kdd_line("tcp", "normal", Some(21))).unwrap();
    drop(file);

    let table = read_table_from_path(&path, false).unwrap();
    assert_eq!(table.len(), 1);

    let missing = read_table_from_path(&dir.path().join("absent.txt"), false);
    assert!(matches!(missing, Err(PrepError::Io(_))));
}
