//! # In-Memory Query Evaluation
//!
//! Evaluates a [`QuerySpec`] against key-pair records: conjunctive
//! criterion matching, optional single-field sort, then offset/limit
//! paging. A criterion naming an unknown field fails the whole query with
//! `BadRequest` rather than silently matching nothing.

use idhub_core::{
    Criterion, CriterionOperator, KeyPairResource, QuerySpec, ServiceError, ServiceResult,
    SortOrder,
};
use serde_json::Value;

/// Fields of [`KeyPairResource`] addressable from a criterion or sort.
const QUERYABLE_FIELDS: [&str; 5] = [
    "id",
    "participant_context_id",
    "key_id",
    "state",
    "group_name",
];

/// Apply a query to a snapshot of records.
pub fn apply(
    records: Vec<KeyPairResource>,
    query: &QuerySpec,
) -> ServiceResult<Vec<KeyPairResource>> {
    let mut matched = Vec::new();

    'records: for record in records {
        for criterion in &query.filter {
            if !matches(&record, criterion)? {
                continue 'records;
            }
        }
        matched.push(record);
    }

    if let Some(sort_field) = &query.sort_field {
        let mut keyed = matched
            .into_iter()
            .map(|record| {
                let key = sort_key(&field_value(&record, sort_field)?);
                Ok((key, record))
            })
            .collect::<ServiceResult<Vec<_>>>()?;
        keyed.sort_by(|(a, _), (b, _)| a.cmp(b));
        if query.sort_order == SortOrder::Desc {
            keyed.reverse();
        }
        matched = keyed.into_iter().map(|(_, record)| record).collect();
    }

    Ok(matched
        .into_iter()
        .skip(query.offset)
        .take(query.limit)
        .collect())
}

/// Evaluate one criterion against a record.
fn matches(record: &KeyPairResource, criterion: &Criterion) -> ServiceResult<bool> {
    let value = field_value(record, &criterion.operand_left)?;

    match criterion.operator {
        CriterionOperator::Eq => Ok(value == criterion.operand_right),
        CriterionOperator::In => match &criterion.operand_right {
            Value::Array(options) => Ok(options.contains(&value)),
            _ => Err(ServiceError::bad_request(format!(
                "criterion on '{}': in operator requires an array operand",
                criterion.operand_left
            ))),
        },
        CriterionOperator::Like => match (&value, &criterion.operand_right) {
            (Value::String(value), Value::String(pattern)) => Ok(like_match(value, pattern)),
            _ => Err(ServiceError::bad_request(format!(
                "criterion on '{}': like operator requires string operands",
                criterion.operand_left
            ))),
        },
    }
}

/// Read a queryable field off a record as JSON.
fn field_value(record: &KeyPairResource, field: &str) -> ServiceResult<Value> {
    match field {
        "id" => Ok(Value::String(record.id.as_str().to_string())),
        "participant_context_id" => Ok(Value::String(
            record.participant_context_id.as_str().to_string(),
        )),
        "key_id" => Ok(Value::String(record.key_id.as_str().to_string())),
        "state" => Ok(Value::String(record.state.as_str().to_string())),
        "group_name" => Ok(record
            .group_name
            .clone()
            .map(Value::String)
            .unwrap_or(Value::Null)),
        other => Err(ServiceError::bad_request(format!(
            "unknown query field: {other} (queryable: {})",
            QUERYABLE_FIELDS.join(", ")
        ))),
    }
}

/// Collate a field value for sorting. Null sorts first.
fn sort_key(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// SQL-ish `like` with `%` wildcards at either end of the pattern.
fn like_match(value: &str, pattern: &str) -> bool {
    match (pattern.strip_prefix('%'), pattern.strip_suffix('%')) {
        (Some(rest), Some(_)) => {
            // Both ends wildcarded; strip the trailing % off the prefix-stripped rest.
            match rest.strip_suffix('%') {
                Some(core) => value.contains(core),
                None => value.ends_with(rest), // pattern was exactly "%"
            }
        }
        (Some(suffix), None) => value.ends_with(suffix),
        (None, Some(prefix)) => value.starts_with(prefix),
        (None, None) => value == pattern,
    }
}
