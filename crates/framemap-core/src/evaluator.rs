//! Single rule, single row.

use framemap_model::{NOT_SET, ResultRecord, SourceRow, Value};
use tracing::error;

use crate::error::{CallbackKind, MappingError, Result};
use crate::rule::Mapping;

/// What happened when a rule ran against a row.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RuleOutcome {
    /// The rule wrote its destination (and ran its side effects).
    pub written: bool,
    /// A missing-source-column diagnostic was emitted.
    pub reported_missing: bool,
}

/// Run `rule` against `row`, updating `results` in place.
///
/// Steps, in order: acquire the value (literal, trimmed source text, or
/// [`NOT_SET`] when the column is absent), gate on the condition, apply the
/// modification unless the value is [`NOT_SET`], write or append the
/// destination, then run side effects.
pub fn evaluate_rule(
    rule: &Mapping,
    row: &SourceRow<'_>,
    results: &mut ResultRecord,
) -> Result<RuleOutcome> {
    let mut outcome = RuleOutcome::default();

    let mut value = if rule.is_constant() {
        Value::Text(rule.source().to_string())
    } else {
        match row.text(rule.source()) {
            Some(text) => Value::Text(text),
            None => {
                // A rule without a condition always needs its column.
                let required = match rule.condition_fn() {
                    Some(_) => check_condition(rule, &NOT_SET, row, results)?,
                    None => true,
                };
                if required {
                    error!(
                        source_column = %rule.source(),
                        destination = %rule.destination(),
                        row = row.index(),
                        "missing source column: \"{}\"",
                        rule.source()
                    );
                    outcome.reported_missing = true;
                }
                NOT_SET
            }
        }
    };

    if rule.has_condition() && !check_condition(rule, &value, row, results)? {
        return Ok(outcome);
    }

    if let Some(modification) = rule.modification()
        && !value.is_not_set()
    {
        value = modification
            .apply(&value, row, results)
            .map_err(|source| callback_error(CallbackKind::Modification, rule.destination(), row, source))?;
    }

    if rule.is_append() {
        let Some(existing) = results.get_mut(rule.destination()) else {
            return Err(MappingError::AppendWithoutPriorWrite {
                destination: rule.destination().to_string(),
                row: row.index(),
            });
        };
        let combined = existing
            .try_append(&value)
            .map_err(|source| MappingError::IncompatibleAppend {
                destination: rule.destination().to_string(),
                row: row.index(),
                source,
            })?;
        *existing = combined;
    } else {
        results.insert(rule.destination(), value.clone());
    }
    outcome.written = true;

    for effect in rule.side_effect_list() {
        let produced = effect
            .apply(&value, row, results)
            .map_err(|source| callback_error(CallbackKind::SideEffect, effect.column(), row, source))?;
        results.insert(effect.column(), produced);
    }

    Ok(outcome)
}

fn check_condition(
    rule: &Mapping,
    value: &Value,
    row: &SourceRow<'_>,
    results: &ResultRecord,
) -> Result<bool> {
    match rule.condition_fn() {
        Some(condition) => condition
            .evaluate(value, row, results)
            .map_err(|source| callback_error(CallbackKind::Condition, rule.destination(), row, source)),
        None => Ok(true),
    }
}

fn callback_error(
    kind: CallbackKind,
    destination: &str,
    row: &SourceRow<'_>,
    source: anyhow::Error,
) -> MappingError {
    MappingError::Callback {
        kind,
        destination: destination.to_string(),
        row: row.index(),
        source,
    }
}

#[cfg(test)]
mod tests {
    use polars::prelude::{Column, DataFrame, IntoColumn, NamedFrom, Series};

    use super::*;

    fn frame() -> DataFrame {
        let columns: Vec<Column> = vec![
            Series::new("fname".into(), vec![" TANNER "]).into_column(),
            Series::new("children".into(), vec![3i64]).into_column(),
            Series::new("pnames".into(), vec!["Kate, Willie"]).into_column(),
        ];
        DataFrame::new(columns).unwrap()
    }

    #[test]
    fn test_source_value_is_trimmed_text() {
        let df = frame();
        let row = SourceRow::new(&df, 0);
        let mut record = ResultRecord::new();

        let outcome = evaluate_rule(&Mapping::new("fname", "family"), &row, &mut record).unwrap();

        assert!(outcome.written);
        assert!(!outcome.reported_missing);
        assert_eq!(record.get("family"), Some(&Value::from("TANNER")));
    }

    #[test]
    fn test_constant_is_never_looked_up() {
        let df = frame();
        let row = SourceRow::new(&df, 0);
        let mut record = ResultRecord::new();

        // "fname" exists as a column but must be used verbatim.
        evaluate_rule(&Mapping::constant("fname", "kind"), &row, &mut record).unwrap();

        assert_eq!(record.get("kind"), Some(&Value::from("fname")));
    }

    #[test]
    fn test_false_condition_skips_everything() {
        let df = frame();
        let row = SourceRow::new(&df, 0);
        let mut record = ResultRecord::new();
        let rule = Mapping::new("fname", "family")
            .condition(|_, _, _| Ok(false))
            .modify_value(|_| anyhow::bail!("must not run"))
            .side_effect("other", |_, _, _| anyhow::bail!("must not run"));

        let outcome = evaluate_rule(&rule, &row, &mut record).unwrap();

        assert!(!outcome.written);
        assert!(record.is_empty());
    }

    #[test]
    fn test_missing_column_writes_sentinel() {
        let df = frame();
        let row = SourceRow::new(&df, 0);
        let mut record = ResultRecord::new();
        let rule = Mapping::new("knames", "kids").modify_value(|_| anyhow::bail!("must not run"));

        let outcome = evaluate_rule(&rule, &row, &mut record).unwrap();

        assert!(outcome.written);
        assert!(outcome.reported_missing);
        assert_eq!(record.get("kids"), Some(&NOT_SET));
    }

    #[test]
    fn test_missing_column_with_false_condition_is_silent() {
        let df = frame();
        let row = SourceRow::new(&df, 0);
        let mut record = ResultRecord::new();
        let rule = Mapping::new("knames", "kids").condition(|v, _, _| Ok(!v.is_not_set()));

        let outcome = evaluate_rule(&rule, &row, &mut record).unwrap();

        assert_eq!(outcome, RuleOutcome::default());
        assert!(record.is_empty());
    }

    #[test]
    fn test_modification_sees_record_so_far() {
        let df = frame();
        let row = SourceRow::new(&df, 0);
        let mut record = ResultRecord::new();
        evaluate_rule(&Mapping::new("fname", "family"), &row, &mut record).unwrap();

        let rule = Mapping::new("pnames", "parents").modify(|v, _, results| {
            let family = results.get("family").map(ToString::to_string).unwrap_or_default();
            Ok(Value::from(format!("{v} {family}")))
        });
        evaluate_rule(&rule, &row, &mut record).unwrap();

        assert_eq!(record.get("parents"), Some(&Value::from("Kate, Willie TANNER")));
    }

    #[test]
    fn test_append_concatenates() {
        let df = frame();
        let row = SourceRow::new(&df, 0);
        let mut record = ResultRecord::new();
        evaluate_rule(&Mapping::new("pnames", "everyone"), &row, &mut record).unwrap();
        evaluate_rule(&Mapping::constant(" & kids", "everyone").appending(), &row, &mut record)
            .unwrap();

        assert_eq!(record.get("everyone"), Some(&Value::from("Kate, Willie & kids")));
        assert_eq!(record.len(), 1);
    }

    #[test]
    fn test_append_without_prior_write_fails() {
        let df = frame();
        let row = SourceRow::new(&df, 0);
        let mut record = ResultRecord::new();

        let err = evaluate_rule(&Mapping::new("fname", "family").appending(), &row, &mut record)
            .unwrap_err();

        assert!(matches!(
            err,
            MappingError::AppendWithoutPriorWrite { ref destination, row: 0 } if destination == "family"
        ));
        assert!(record.is_empty());
    }

    #[test]
    fn test_side_effects_use_produced_value() {
        let df = frame();
        let row = SourceRow::new(&df, 0);
        let mut record = ResultRecord::new();
        let rule = Mapping::new("children", "members")
            .modify_value(|v| Ok(Value::Int(v.require_i64()? + 2)))
            .side_effect("household", |v, _, _| Ok(Value::Bool(v.require_i64()? > 2)))
            .side_effect("summary", |_, _, results| {
                let flag = results.get("household").cloned().unwrap_or_default();
                Ok(Value::from(format!("household={flag}")))
            });

        evaluate_rule(&rule, &row, &mut record).unwrap();

        assert_eq!(
            record.fields().collect::<Vec<_>>(),
            vec!["members", "household", "summary"]
        );
        assert_eq!(record.get("members"), Some(&Value::Int(5)));
        assert_eq!(record.get("summary"), Some(&Value::from("household=true")));
    }

    #[test]
    fn test_condition_error_is_reported_with_kind() {
        let df = frame();
        let row = SourceRow::new(&df, 0);
        let mut record = ResultRecord::new();
        let rule = Mapping::new("fname", "family").condition(|_, _, _| anyhow::bail!("bad rule"));

        let err = evaluate_rule(&rule, &row, &mut record).unwrap_err();

        match err {
            MappingError::Callback { kind, destination, row, source } => {
                assert_eq!(kind, CallbackKind::Condition);
                assert_eq!(destination, "family");
                assert_eq!(row, 0);
                assert_eq!(source.to_string(), "bad rule");
            }
            other => panic!("unexpected error: {other}"),
        }
    }
}
