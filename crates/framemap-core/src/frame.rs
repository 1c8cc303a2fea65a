//! Result records to an output `DataFrame`.

use std::collections::HashSet;

use framemap_model::{ResultRecord, Value};
use polars::prelude::{Column, DataFrame, IntoColumn, NamedFrom, PolarsResult, Series};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ColumnKind {
    Int,
    Float,
    Bool,
    Text,
}

/// Destination names across `records`, in first-write order.
pub fn output_columns(records: &[ResultRecord]) -> Vec<String> {
    let mut seen: HashSet<&str> = HashSet::new();
    let mut columns = Vec::new();
    for record in records {
        for field in record.fields() {
            if seen.insert(field) {
                columns.push(field.to_string());
            }
        }
    }
    columns
}

/// Materialise `records` as a `DataFrame`.
///
/// Columns follow first-write order across all records. Each column gets
/// the narrowest dtype its values fit: `Int64`, `Float64`, `Boolean`, or
/// `String` for anything mixed. Unwritten and [`NOT_SET`](framemap_model::NOT_SET)
/// cells are null.
pub fn records_to_frame(records: &[ResultRecord]) -> PolarsResult<DataFrame> {
    if records.is_empty() {
        return Ok(DataFrame::empty());
    }

    let columns: Vec<Column> = output_columns(records)
        .iter()
        .map(|name| {
            let cells: Vec<Option<&Value>> = records
                .iter()
                .map(|record| record.get(name).filter(|value| !value.is_not_set()))
                .collect();
            build_column(name, &cells)
        })
        .collect();

    DataFrame::new(columns)
}

fn build_column(name: &str, cells: &[Option<&Value>]) -> Column {
    let series = match infer_kind(cells) {
        ColumnKind::Int => {
            let values: Vec<Option<i64>> = cells.iter().map(|cell| cell.and_then(Value::as_i64)).collect();
            Series::new(name.into(), values)
        }
        ColumnKind::Float => {
            let values: Vec<Option<f64>> = cells.iter().map(|cell| cell.and_then(Value::as_f64)).collect();
            Series::new(name.into(), values)
        }
        ColumnKind::Bool => {
            let values: Vec<Option<bool>> = cells
                .iter()
                .map(|cell| match cell {
                    Some(Value::Bool(flag)) => Some(*flag),
                    _ => None,
                })
                .collect();
            Series::new(name.into(), values)
        }
        ColumnKind::Text => {
            let values: Vec<Option<String>> = cells
                .iter()
                .map(|cell| cell.map(ToString::to_string))
                .collect();
            Series::new(name.into(), values)
        }
    };
    series.into_column()
}

fn infer_kind(cells: &[Option<&Value>]) -> ColumnKind {
    let mut kind: Option<ColumnKind> = None;
    for value in cells.iter().flatten() {
        let next = match value {
            Value::Int(_) => ColumnKind::Int,
            Value::Float(_) => ColumnKind::Float,
            Value::Bool(_) => ColumnKind::Bool,
            Value::Text(_) | Value::NotSet => return ColumnKind::Text,
        };
        kind = Some(match (kind, next) {
            (None, next) => next,
            (Some(current), next) if current == next => current,
            (Some(ColumnKind::Int | ColumnKind::Float), ColumnKind::Int | ColumnKind::Float) => {
                ColumnKind::Float
            }
            _ => return ColumnKind::Text,
        });
    }
    kind.unwrap_or(ColumnKind::Text)
}

#[cfg(test)]
mod tests {
    use framemap_model::NOT_SET;
    use polars::prelude::{AnyValue, DataType};

    use super::*;

    fn record(pairs: &[(&str, Value)]) -> ResultRecord {
        pairs.iter().map(|(k, v)| (*k, v.clone())).collect()
    }

    #[test]
    fn test_empty_records_give_empty_frame() {
        let df = records_to_frame(&[]).unwrap();
        assert_eq!(df.height(), 0);
        assert_eq!(df.width(), 0);
    }

    #[test]
    fn test_column_union_in_first_write_order() {
        let records = vec![
            record(&[("family", Value::from("TANNER")), ("members", Value::Int(5))]),
            record(&[("family", Value::from("SMITH")), ("kids", Value::from(""))]),
        ];
        let df = records_to_frame(&records).unwrap();

        let names: Vec<&str> = df.get_column_names().iter().map(|n| n.as_str()).collect();
        assert_eq!(names, vec!["family", "members", "kids"]);
        assert_eq!(df.height(), 2);

        let members = df.column("members").unwrap();
        assert_eq!(members.dtype(), &DataType::Int64);
        assert_eq!(members.get(1).unwrap(), AnyValue::Null);
        let kids = df.column("kids").unwrap();
        assert_eq!(kids.get(0).unwrap(), AnyValue::Null);
        assert_eq!(kids.get(1).unwrap(), AnyValue::String(""));
    }

    #[test]
    fn test_dtype_inference() {
        let records = vec![
            record(&[
                ("n", Value::Int(1)),
                ("x", Value::Int(1)),
                ("b", Value::Bool(true)),
                ("mixed", Value::Int(1)),
                ("gap", NOT_SET),
            ]),
            record(&[
                ("n", Value::Int(2)),
                ("x", Value::Float(0.5)),
                ("b", Value::Bool(false)),
                ("mixed", Value::from("two")),
                ("gap", NOT_SET),
            ]),
        ];
        let df = records_to_frame(&records).unwrap();

        assert_eq!(df.column("n").unwrap().dtype(), &DataType::Int64);
        assert_eq!(df.column("x").unwrap().dtype(), &DataType::Float64);
        assert_eq!(df.column("b").unwrap().dtype(), &DataType::Boolean);
        assert_eq!(df.column("mixed").unwrap().dtype(), &DataType::String);
        assert_eq!(df.column("mixed").unwrap().get(0).unwrap(), AnyValue::String("1"));
        let gap = df.column("gap").unwrap();
        assert_eq!(gap.dtype(), &DataType::String);
        assert_eq!(gap.null_count(), 2);
    }
}
