//! Built-in mapping sets selectable with `--mapping`.

use framemap_core::{Mapping, SourceRow, Value};

/// A named rule list.
#[derive(Debug, Clone, Copy)]
pub struct CatalogEntry {
    pub name: &'static str,
    pub description: &'static str,
    build: fn() -> Vec<Mapping>,
}

impl CatalogEntry {
    /// Build a fresh copy of the rule list.
    pub fn mappings(&self) -> Vec<Mapping> {
        (self.build)()
    }
}

const ENTRIES: &[CatalogEntry] = &[
    CatalogEntry {
        name: "families",
        description: "Family households with children; childless rows are dropped",
        build: families,
    },
    CatalogEntry {
        name: "families-all",
        description: "Every family row, members = children + 2",
        build: families_all,
    },
    CatalogEntry {
        name: "contacts",
        description: "Contact list: \"last, first\" names, e-mail domain, constant origin",
        build: contacts,
    },
];

/// All built-in mapping sets, in listing order.
pub fn entries() -> &'static [CatalogEntry] {
    ENTRIES
}

/// Look up a mapping set by name (case-insensitive).
pub fn find(name: &str) -> Option<&'static CatalogEntry> {
    ENTRIES
        .iter()
        .find(|entry| entry.name.eq_ignore_ascii_case(name))
}

fn has_children(row: &SourceRow<'_>) -> bool {
    row.int("children").unwrap_or(0) > 0
}

fn household_size(value: &Value) -> anyhow::Result<Value> {
    Ok(Value::Int(value.require_i64()? + 2))
}

fn families() -> Vec<Mapping> {
    vec![
        Mapping::new("fname", "family").condition(|_, row, _| Ok(has_children(row))),
        Mapping::new("children", "members")
            .condition(|_, row, _| Ok(has_children(row)))
            .modify_value(household_size),
        Mapping::new("pnames", "parents").condition(|_, row, _| Ok(has_children(row))),
        Mapping::new("knames", "kids").condition(|_, row, _| Ok(has_children(row))),
    ]
}

fn families_all() -> Vec<Mapping> {
    vec![
        Mapping::new("fname", "family"),
        Mapping::new("children", "members").modify_value(household_size),
        Mapping::new("pnames", "parents"),
        Mapping::new("knames", "kids"),
    ]
}

fn email_domain(value: &Value) -> Value {
    match value.as_text().and_then(|email| email.split_once('@')) {
        Some((_, domain)) if !domain.is_empty() => Value::from(domain),
        _ => Value::from(""),
    }
}

fn contacts() -> Vec<Mapping> {
    vec![
        Mapping::new("last", "name").modify_value(|v| Ok(Value::from(v.to_string().to_uppercase()))),
        Mapping::constant(", ", "name").appending(),
        Mapping::new("first", "name").appending(),
        Mapping::new("email", "email")
            .modify_value(|v| Ok(Value::from(v.to_string().to_lowercase())))
            .side_effect("domain", |v, _, _| Ok(email_domain(v))),
        Mapping::new("phone", "phone").condition(|v, _, _| {
            Ok(v.as_text().is_some_and(|phone| !phone.is_empty()))
        }),
        Mapping::constant("csv-import", "origin"),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_find_is_case_insensitive() {
        assert_eq!(find("Families").map(|e| e.name), Some("families"));
        assert!(find("unknown").is_none());
    }

    #[test]
    fn test_entry_names_are_unique() {
        let mut names: Vec<&str> = entries().iter().map(|e| e.name).collect();
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), entries().len());
    }

    #[test]
    fn test_rule_counts() {
        assert_eq!(find("families").unwrap().mappings().len(), 4);
        assert_eq!(find("families-all").unwrap().mappings().len(), 4);
        assert_eq!(find("contacts").unwrap().mappings().len(), 6);
    }

    #[test]
    fn test_email_domain() {
        assert_eq!(email_domain(&Value::from("al@bundy.example")), Value::from("bundy.example"));
        assert_eq!(email_domain(&Value::from("no-at-sign")), Value::from(""));
        assert_eq!(email_domain(&Value::Int(3)), Value::from(""));
    }
}
