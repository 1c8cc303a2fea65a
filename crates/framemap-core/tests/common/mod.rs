//! Shared fixtures for the engine integration tests.

#![allow(dead_code)]

use std::io;
use std::sync::{Arc, Mutex};

use framemap_common::any_to_string;
use framemap_core::{DatasetMapping, Mapping, SourceProvider, Value};
use polars::prelude::{AnyValue, Column, DataFrame, IntoColumn, NamedFrom, Series};

/// The four-family dataset used across the engine tests.
pub fn family_frame() -> DataFrame {
    let columns: Vec<Column> = vec![
        Series::new("fname".into(), vec!["TANNER", "SIMPSON", "BUNDY", "SMITH"]).into_column(),
        Series::new(
            "pnames".into(),
            vec!["Kate, Willie", "March, Homer", "Peggy, Al", "Jane, John"],
        )
        .into_column(),
        Series::new(
            "knames".into(),
            vec!["Lynn, Brian, Alf", "Bart, Lisa, Maggie", "Kelly, Bud", ""],
        )
        .into_column(),
        Series::new("children".into(), vec![3i64, 2, 2, 0]).into_column(),
    ];
    DataFrame::new(columns).unwrap()
}

fn has_kids(row: &framemap_core::SourceRow<'_>) -> bool {
    row.int("children").unwrap_or(0) > 0
}

fn plus_two(value: &Value) -> anyhow::Result<Value> {
    Ok(Value::Int(value.require_i64()? + 2))
}

/// Family rules gated on the row having children.
pub fn family_rules() -> Vec<Mapping> {
    vec![
        Mapping::new("fname", "family").condition(|_, row, _| Ok(has_kids(row))),
        Mapping::new("children", "members")
            .condition(|_, row, _| Ok(has_kids(row)))
            .modify_value(plus_two),
        Mapping::new("pnames", "parents").condition(|_, row, _| Ok(has_kids(row))),
        Mapping::new("knames", "kids").condition(|_, row, _| Ok(has_kids(row))),
    ]
}

/// Same rules without conditions.
pub fn family_rules_unconditional() -> Vec<Mapping> {
    vec![
        Mapping::new("fname", "family"),
        Mapping::new("children", "members").modify_value(plus_two),
        Mapping::new("pnames", "parents"),
        Mapping::new("knames", "kids"),
    ]
}

/// Provider over a fixed frame that counts `prepare` calls.
pub struct Families {
    pub frame: DataFrame,
    pub rules: Vec<Mapping>,
    pub prepared: usize,
}

impl Families {
    pub fn new(frame: DataFrame, rules: Vec<Mapping>) -> Self {
        Self {
            frame,
            rules,
            prepared: 0,
        }
    }
}

impl SourceProvider for Families {
    fn prepare(&mut self) -> anyhow::Result<DataFrame> {
        self.prepared += 1;
        Ok(self.frame.clone())
    }
}

impl DatasetMapping for Families {
    fn mappings(&self) -> &[Mapping] {
        &self.rules
    }
}

/// One line per row: `name=value|name=value`, nulls shown as `null`.
pub fn render(df: &DataFrame) -> String {
    let names: Vec<String> = df
        .get_column_names()
        .iter()
        .map(|name| name.to_string())
        .collect();
    let mut lines = Vec::with_capacity(df.height());
    for index in 0..df.height() {
        let cells: Vec<String> = names
            .iter()
            .map(|name| {
                let value = df.column(name).unwrap().get(index).unwrap();
                let text = match value {
                    AnyValue::Null => "null".to_string(),
                    other => any_to_string(other),
                };
                format!("{name}={text}")
            })
            .collect();
        lines.push(cells.join("|"));
    }
    lines.join("\n")
}

/// In-memory sink for `tracing` output.
#[derive(Clone, Default)]
pub struct LogBuffer(Arc<Mutex<Vec<u8>>>);

impl LogBuffer {
    pub fn contents(&self) -> String {
        String::from_utf8(self.0.lock().unwrap().clone()).unwrap()
    }
}

impl io::Write for LogBuffer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// Run `f` with error-level events captured into the returned buffer.
pub fn capture_errors<T>(f: impl FnOnce() -> T) -> (T, String) {
    let buffer = LogBuffer::default();
    let writer = buffer.clone();
    let subscriber = tracing_subscriber::fmt()
        .with_writer(move || writer.clone())
        .with_ansi(false)
        .with_max_level(tracing::Level::ERROR)
        .finish();
    let result = tracing::subscriber::with_default(subscriber, f);
    (result, buffer.contents())
}
