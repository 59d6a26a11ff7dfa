use crate::utils::error::{RegistryError, Result};

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

pub fn validate_path(field_name: &str, path: &str) -> Result<()> {
    if path.is_empty() {
        return Err(RegistryError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Path cannot be empty".to_string(),
        });
    }

    if path.contains('\0') {
        return Err(RegistryError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Path contains null bytes".to_string(),
        });
    }

    Ok(())
}

/// 分隔符必須是單一字元，且不能和 CSV 或換行衝突
pub fn validate_delimiter(field_name: &str, delimiter: &str) -> Result<char> {
    let mut chars = delimiter.chars();
    let ch = match (chars.next(), chars.next()) {
        (Some(ch), None) => ch,
        _ => {
            return Err(RegistryError::InvalidConfigValueError {
                field: field_name.to_string(),
                value: delimiter.to_string(),
                reason: "Delimiter must be exactly one character".to_string(),
            })
        }
    };

    if matches!(ch, '"' | ',' | '\n' | '\r') {
        return Err(RegistryError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: delimiter.to_string(),
            reason: "Delimiter cannot be a quote, comma or line break".to_string(),
        });
    }

    Ok(ch)
}

/// Required record fields: rejects empty and whitespace-only values.
pub fn validate_non_empty_string(field_name: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(RegistryError::validation(
            field_name,
            "cannot be empty or whitespace-only",
        ));
    }
    Ok(())
}

/// Strict budget parsing for user-entered values. Import uses the permissive
/// extractor in `core::normalize` instead.
pub fn parse_budget(value: &str) -> Result<f64> {
    match value.trim().parse::<f64>() {
        Ok(budget) if budget.is_finite() => Ok(budget),
        _ => Err(RegistryError::InvalidBudget {
            value: value.to_string(),
        }),
    }
}
