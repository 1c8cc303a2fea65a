//! Per-row result accumulator.

use crate::value::Value;

/// Insertion-ordered map from destination field to [`Value`].
///
/// One record is built per source row. Overwriting a field keeps the
/// position of its first write, so column order always follows first-write
/// order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ResultRecord {
    entries: Vec<(String, Value)>,
}

impl ResultRecord {
    /// Create an empty record.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of fields written so far.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True when no rule has written to this record.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Look up a field.
    pub fn get(&self, field: &str) -> Option<&Value> {
        self.entries
            .iter()
            .find(|(name, _)| name == field)
            .map(|(_, value)| value)
    }

    /// Look up a field mutably.
    pub fn get_mut(&mut self, field: &str) -> Option<&mut Value> {
        self.entries
            .iter_mut()
            .find(|(name, _)| name == field)
            .map(|(_, value)| value)
    }

    /// Write a field, returning the previous value if there was one.
    pub fn insert(&mut self, field: impl Into<String>, value: Value) -> Option<Value> {
        let field = field.into();
        match self.get_mut(&field) {
            Some(slot) => Some(std::mem::replace(slot, value)),
            None => {
                self.entries.push((field, value));
                None
            }
        }
    }

    /// Field names in first-write order.
    pub fn fields(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(name, _)| name.as_str())
    }

    /// Iterate `(field, value)` pairs in first-write order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.entries.iter().map(|(name, value)| (name.as_str(), value))
    }
}

impl IntoIterator for ResultRecord {
    type Item = (String, Value);
    type IntoIter = std::vec::IntoIter<(String, Value)>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

impl<K: Into<String>> FromIterator<(K, Value)> for ResultRecord {
    fn from_iter<I: IntoIterator<Item = (K, Value)>>(iter: I) -> Self {
        let mut record = Self::new();
        for (field, value) in iter {
            record.insert(field, value);
        }
        record
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_overwrite_keeps_first_position() {
        let mut record = ResultRecord::new();
        assert_eq!(record.insert("family", Value::from("TANNER")), None);
        record.insert("members", Value::Int(5));
        let previous = record.insert("family", Value::from("SMITH"));

        assert_eq!(previous, Some(Value::from("TANNER")));
        assert_eq!(record.fields().collect::<Vec<_>>(), vec!["family", "members"]);
        assert_eq!(record.get("family"), Some(&Value::from("SMITH")));
        assert_eq!(record.len(), 2);
    }

    #[test]
    fn test_empty_record() {
        let record = ResultRecord::new();
        assert!(record.is_empty());
        assert_eq!(record.get("family"), None);
    }

    #[test]
    fn test_from_iter_dedupes_fields() {
        let record: ResultRecord = vec![
            ("a", Value::Int(1)),
            ("b", Value::Int(2)),
            ("a", Value::Int(3)),
        ]
        .into_iter()
        .collect();
        let pairs: Vec<(String, Value)> = record.into_iter().collect();
        assert_eq!(
            pairs,
            vec![("a".to_string(), Value::Int(3)), ("b".to_string(), Value::Int(2))]
        );
    }
}
