//! Mapping rules and their callbacks.
//!
//! A [`Mapping`] copies one source column (or a literal) into one
//! destination field. Conditions, modifications and side effects are
//! attached with builder methods before the rule is first used.

use std::fmt;
use std::sync::Arc;

use framemap_model::{ResultRecord, SourceRow, Value};

type ConditionFn = dyn Fn(&Value, &SourceRow<'_>, &ResultRecord) -> anyhow::Result<bool> + Send + Sync;
type RowFn = dyn Fn(&Value, &SourceRow<'_>, &ResultRecord) -> anyhow::Result<Value> + Send + Sync;
type ValueFn = dyn Fn(&Value) -> anyhow::Result<Value> + Send + Sync;

/// Predicate deciding whether a rule fires for a row.
#[derive(Clone)]
pub struct Condition(Arc<ConditionFn>);

impl Condition {
    pub fn new<F>(func: F) -> Self
    where
        F: Fn(&Value, &SourceRow<'_>, &ResultRecord) -> anyhow::Result<bool> + Send + Sync + 'static,
    {
        Self(Arc::new(func))
    }

    pub fn evaluate(
        &self,
        value: &Value,
        row: &SourceRow<'_>,
        results: &ResultRecord,
    ) -> anyhow::Result<bool> {
        (self.0)(value, row, results)
    }
}

/// Value rewrite applied before the destination is written.
///
/// The variant is fixed by the builder method that attached it:
/// [`Mapping::modify`] sees the row and record, [`Mapping::modify_value`]
/// only the value.
#[derive(Clone)]
pub enum Modification {
    Row(Arc<RowFn>),
    ValueOnly(Arc<ValueFn>),
}

impl Modification {
    pub fn row<F>(func: F) -> Self
    where
        F: Fn(&Value, &SourceRow<'_>, &ResultRecord) -> anyhow::Result<Value> + Send + Sync + 'static,
    {
        Self::Row(Arc::new(func))
    }

    pub fn value_only<F>(func: F) -> Self
    where
        F: Fn(&Value) -> anyhow::Result<Value> + Send + Sync + 'static,
    {
        Self::ValueOnly(Arc::new(func))
    }

    pub fn apply(
        &self,
        value: &Value,
        row: &SourceRow<'_>,
        results: &ResultRecord,
    ) -> anyhow::Result<Value> {
        match self {
            Self::Row(func) => func(value, row, results),
            Self::ValueOnly(func) => func(value),
        }
    }

    /// Number of arguments the callback takes.
    pub fn arity(&self) -> usize {
        match self {
            Self::Row(_) => 3,
            Self::ValueOnly(_) => 1,
        }
    }
}

/// Write to an auxiliary destination, run after the primary write.
#[derive(Clone)]
pub struct SideEffect {
    column: String,
    func: Arc<RowFn>,
}

impl SideEffect {
    pub fn new<F>(column: impl Into<String>, func: F) -> Self
    where
        F: Fn(&Value, &SourceRow<'_>, &ResultRecord) -> anyhow::Result<Value> + Send + Sync + 'static,
    {
        Self {
            column: column.into(),
            func: Arc::new(func),
        }
    }

    /// Destination field written by this side effect.
    pub fn column(&self) -> &str {
        &self.column
    }

    pub fn apply(
        &self,
        value: &Value,
        row: &SourceRow<'_>,
        results: &ResultRecord,
    ) -> anyhow::Result<Value> {
        (self.func)(value, row, results)
    }
}

/// One column-mapping rule.
///
/// # Example
///
/// ```
/// use framemap_core::Mapping;
///
/// let rule = Mapping::new("children", "members")
///     .condition(|_, row, _| Ok(row.int("children").unwrap_or(0) > 0))
///     .modify_value(|v| Ok((v.require_i64()? + 2).into()));
/// assert_eq!(rule.destination(), "members");
/// assert!(rule.has_condition());
/// ```
#[derive(Clone)]
pub struct Mapping {
    source: String,
    destination: String,
    append: bool,
    constant: bool,
    condition: Option<Condition>,
    modification: Option<Modification>,
    side_effects: Vec<SideEffect>,
}

impl Mapping {
    /// Map source column `source` into `destination`.
    pub fn new(source: impl Into<String>, destination: impl Into<String>) -> Self {
        Self::with_flags(source, destination, false, false)
    }

    /// Write the literal `value` into `destination` for every row.
    pub fn constant(value: impl Into<String>, destination: impl Into<String>) -> Self {
        Self::with_flags(value, destination, false, true)
    }

    /// Full constructor mirroring the rule's four properties.
    pub fn with_flags(
        source: impl Into<String>,
        destination: impl Into<String>,
        append: bool,
        constant: bool,
    ) -> Self {
        Self {
            source: source.into(),
            destination: destination.into(),
            append,
            constant,
            condition: None,
            modification: None,
            side_effects: Vec::new(),
        }
    }

    /// Add the produced value onto the existing destination value instead of
    /// overwriting it.
    #[must_use]
    pub fn appending(mut self) -> Self {
        self.append = true;
        self
    }

    /// Only fire when `func` returns true.
    #[must_use]
    pub fn condition<F>(mut self, func: F) -> Self
    where
        F: Fn(&Value, &SourceRow<'_>, &ResultRecord) -> anyhow::Result<bool> + Send + Sync + 'static,
    {
        self.condition = Some(Condition::new(func));
        self
    }

    /// Rewrite the value with access to the row and the record so far.
    #[must_use]
    pub fn modify<F>(mut self, func: F) -> Self
    where
        F: Fn(&Value, &SourceRow<'_>, &ResultRecord) -> anyhow::Result<Value> + Send + Sync + 'static,
    {
        self.modification = Some(Modification::row(func));
        self
    }

    /// Rewrite the value from the value alone.
    #[must_use]
    pub fn modify_value<F>(mut self, func: F) -> Self
    where
        F: Fn(&Value) -> anyhow::Result<Value> + Send + Sync + 'static,
    {
        self.modification = Some(Modification::value_only(func));
        self
    }

    /// Also write `func(value, row, record)` into `column`. Side effects run
    /// in the order they were attached.
    #[must_use]
    pub fn side_effect<F>(mut self, column: impl Into<String>, func: F) -> Self
    where
        F: Fn(&Value, &SourceRow<'_>, &ResultRecord) -> anyhow::Result<Value> + Send + Sync + 'static,
    {
        self.side_effects.push(SideEffect::new(column, func));
        self
    }

    /// Attach several prepared side effects at once.
    #[must_use]
    pub fn side_effects(mut self, effects: impl IntoIterator<Item = SideEffect>) -> Self {
        self.side_effects.extend(effects);
        self
    }

    /// Source column name, or the literal for constant rules.
    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn destination(&self) -> &str {
        &self.destination
    }

    pub fn is_append(&self) -> bool {
        self.append
    }

    pub fn is_constant(&self) -> bool {
        self.constant
    }

    pub fn has_condition(&self) -> bool {
        self.condition.is_some()
    }

    pub fn condition_fn(&self) -> Option<&Condition> {
        self.condition.as_ref()
    }

    pub fn modification(&self) -> Option<&Modification> {
        self.modification.as_ref()
    }

    pub fn side_effect_list(&self) -> &[SideEffect] {
        &self.side_effects
    }
}

impl fmt::Debug for Mapping {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let side_effects: Vec<&str> = self.side_effects.iter().map(SideEffect::column).collect();
        f.debug_struct("Mapping")
            .field("source", &self.source)
            .field("destination", &self.destination)
            .field("append", &self.append)
            .field("constant", &self.constant)
            .field("condition", &self.condition.is_some())
            .field(
                "modification",
                &self.modification.as_ref().map(Modification::arity),
            )
            .field("side_effects", &side_effects)
            .finish()
    }
}
