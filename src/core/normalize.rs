//! Permissive row normalization for imported files.
//!
//! Every row is handled on its own and ends up either as a canonical
//! [`CompanyRecord`] or as a [`SkipReason`]; a bad row never fails the import.

use crate::domain::model::{AliasTable, CompanyRecord, ImportReport, RowOutcome, SkipReason};
use serde_json::{Map, Value};
use std::collections::HashSet;

/// Budget tokens that mean "no value", compared case-insensitively after cleanup.
pub const BUDGET_SENTINELS: &[&str] = &["FREE", "NONE", "NAN", "NULL", "N/A", "NA"];

/// Scalar text of a value, or `None` for null, booleans, arrays and objects.
fn scalar_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.trim().to_string()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

/// First candidate key whose value is a non-empty scalar.
pub fn extract_text(row: &Map<String, Value>, candidates: &[String]) -> Option<String> {
    candidates
        .iter()
        .filter_map(|key| row.get(key))
        .filter_map(scalar_text)
        .find(|text| !text.is_empty())
}

/// Cleans a budget token: trims, then drops `$` and thousands separators.
/// Returns `None` for sentinels and anything that is not a finite number.
pub fn parse_lenient_number(raw: &str) -> Option<f64> {
    let cleaned: String = raw.trim().chars().filter(|c| !matches!(c, '$' | ',')).collect();
    let cleaned = cleaned.trim();

    if cleaned.is_empty() {
        return None;
    }
    if BUDGET_SENTINELS
        .iter()
        .any(|sentinel| cleaned.eq_ignore_ascii_case(sentinel))
    {
        return None;
    }

    cleaned.parse::<f64>().ok().filter(|n| n.is_finite())
}

/// First candidate key that yields a usable number.
pub fn extract_budget(row: &Map<String, Value>, candidates: &[String]) -> Option<f64> {
    candidates
        .iter()
        .filter_map(|key| row.get(key))
        .filter_map(scalar_text)
        .find_map(|text| parse_lenient_number(&text))
}

pub fn normalize_row(row: &Value, aliases: &AliasTable) -> RowOutcome {
    let Value::Object(row) = row else {
        return RowOutcome::Skipped(SkipReason::NotAnObject);
    };

    let Some(id) = extract_text(row, &aliases.id) else {
        return RowOutcome::Skipped(SkipReason::MissingField("id"));
    };
    let Some(name) = extract_text(row, &aliases.name) else {
        return RowOutcome::Skipped(SkipReason::MissingField("name"));
    };
    let Some(address) = extract_text(row, &aliases.address) else {
        return RowOutcome::Skipped(SkipReason::MissingField("address"));
    };
    let budget = extract_budget(row, &aliases.budget).unwrap_or(0.0);

    RowOutcome::Normalized(CompanyRecord {
        id,
        name,
        address,
        budget,
    })
}

/// Normalizes all rows in order. The first row with a given id wins; later
/// repeats are skipped so the result can be loaded into a store as-is.
pub fn normalize_rows(rows: &[Value], aliases: &AliasTable) -> ImportReport {
    let mut report = ImportReport::default();
    let mut seen: HashSet<String> = HashSet::new();

    for (index, row) in rows.iter().enumerate() {
        let outcome = match normalize_row(row, aliases) {
            RowOutcome::Normalized(record) if !seen.insert(record.id.clone()) => {
                RowOutcome::Skipped(SkipReason::DuplicateId(record.id))
            }
            outcome => outcome,
        };

        match outcome {
            RowOutcome::Normalized(record) => report.records.push(record),
            RowOutcome::Skipped(reason) => {
                tracing::debug!("Skipping row {}: {}", index + 1, reason);
                report.skipped.push(reason);
            }
        }
    }

    report
}
