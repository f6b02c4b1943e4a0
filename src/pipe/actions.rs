//! Built-in pipe actions: leaf validators and transformers.
//!
//! Every constructor returns a boxed [`Action`] with a default message and a
//! stable validation tag. Wrap any action with [`message`] to override its
//! message, or use [`custom`] for ad-hoc checks.

use regex::Regex;
use serde_json::Value;
use stillwater::Validation;

use crate::error::Issues;
use crate::{err, ok};

use super::Action;

/// Replaces the message of every issue the wrapped action produces.
pub fn message<T: 'static>(action: Action<T>, message: impl Into<String>) -> Action<T> {
    let message = message.into();
    Box::new(move |value, info| match action(value, info) {
        Validation::Failure(issues) => {
            let rewritten = issues
                .into_iter()
                .map(|issue| issue.with_message(message.clone()))
                .collect();
            err(Issues::from_vec(rewritten))
        }
        success => success,
    })
}

/// Wraps a closure as an action.
pub fn custom<T, F>(check: F) -> Action<T>
where
    F: Fn(&T, &crate::ValidateInfo) -> crate::Parsed<T> + Send + Sync + 'static,
{
    Box::new(check)
}

/// Requires at least `min` characters (Unicode scalar values).
pub fn min_length(min: usize) -> Action<String> {
    Box::new(move |value, info| {
        let len = value.chars().count();
        if len < min {
            err(Issues::single(info.issue(
                "min_length",
                format!("length must be at least {}, got {}", min, len),
                &Value::String(value.clone()),
            )))
        } else {
            ok(value.clone())
        }
    })
}

/// Requires at most `max` characters (Unicode scalar values).
pub fn max_length(max: usize) -> Action<String> {
    Box::new(move |value, info| {
        let len = value.chars().count();
        if len > max {
            err(Issues::single(info.issue(
                "max_length",
                format!("length must be at most {}, got {}", max, len),
                &Value::String(value.clone()),
            )))
        } else {
            ok(value.clone())
        }
    })
}

/// Requires the string to match a compiled regex.
pub fn pattern(regex: Regex) -> Action<String> {
    Box::new(move |value, info| {
        if regex.is_match(value) {
            ok(value.clone())
        } else {
            err(Issues::single(info.issue(
                "pattern",
                format!("must match pattern '{}'", regex.as_str()),
                &Value::String(value.clone()),
            )))
        }
    })
}

/// Requires a plausible email address.
pub fn email() -> Action<String> {
    let regex = Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").unwrap();
    Box::new(move |value, info| {
        if regex.is_match(value) {
            ok(value.clone())
        } else {
            err(Issues::single(info.issue(
                "email",
                "must be a valid email address",
                &Value::String(value.clone()),
            )))
        }
    })
}

/// Requires the string to start with `prefix`.
pub fn starts_with(prefix: impl Into<String>) -> Action<String> {
    let prefix = prefix.into();
    Box::new(move |value, info| {
        if value.starts_with(&prefix) {
            ok(value.clone())
        } else {
            err(Issues::single(info.issue(
                "starts_with",
                format!("must start with '{}'", prefix),
                &Value::String(value.clone()),
            )))
        }
    })
}

/// Requires the string to end with `suffix`.
pub fn ends_with(suffix: impl Into<String>) -> Action<String> {
    let suffix = suffix.into();
    Box::new(move |value, info| {
        if value.ends_with(&suffix) {
            ok(value.clone())
        } else {
            err(Issues::single(info.issue(
                "ends_with",
                format!("must end with '{}'", suffix),
                &Value::String(value.clone()),
            )))
        }
    })
}

/// Requires the string to contain `substring`.
pub fn contains(substring: impl Into<String>) -> Action<String> {
    let substring = substring.into();
    Box::new(move |value, info| {
        if value.contains(&substring) {
            ok(value.clone())
        } else {
            err(Issues::single(info.issue(
                "contains",
                format!("must contain '{}'", substring),
                &Value::String(value.clone()),
            )))
        }
    })
}

/// Transformer: trims surrounding whitespace.
pub fn to_trimmed() -> Action<String> {
    Box::new(|value, _| ok(value.trim().to_string()))
}

/// Transformer: lowercases the string.
pub fn to_lowercase() -> Action<String> {
    Box::new(|value, _| ok(value.to_lowercase()))
}

/// Requires a number of at least `min` (inclusive).
pub fn min_value(min: f64) -> Action<f64> {
    Box::new(move |value, info| {
        if *value < min {
            err(Issues::single(info.issue(
                "min_value",
                format!("must be at least {}, got {}", min, value),
                &Value::from(*value),
            )))
        } else {
            ok(*value)
        }
    })
}

/// Requires a number of at most `max` (inclusive).
pub fn max_value(max: f64) -> Action<f64> {
    Box::new(move |value, info| {
        if *value > max {
            err(Issues::single(info.issue(
                "max_value",
                format!("must be at most {}, got {}", max, value),
                &Value::from(*value),
            )))
        } else {
            ok(*value)
        }
    })
}

/// Requires at least `min` elements in a sequence output.
pub fn min_size(min: usize) -> Action<Vec<Value>> {
    Box::new(move |value, info| {
        if value.len() < min {
            err(Issues::single(info.issue(
                "min_size",
                format!("must have at least {} items, got {}", min, value.len()),
                &Value::Array(value.clone()),
            )))
        } else {
            ok(value.clone())
        }
    })
}

/// Requires at most `max` elements in a sequence output.
pub fn max_size(max: usize) -> Action<Vec<Value>> {
    Box::new(move |value, info| {
        if value.len() > max {
            err(Issues::single(info.issue(
                "max_size",
                format!("must have at most {} items, got {}", max, value.len()),
                &Value::Array(value.clone()),
            )))
        } else {
            ok(value.clone())
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Reason;
    use crate::info::ParseInfo;
    use crate::pipe::{run, Pipe};
    use serde_json::json;

    fn string_info() -> crate::ValidateInfo {
        ParseInfo::new().validate_info(Reason::String)
    }

    fn number_info() -> crate::ValidateInfo {
        ParseInfo::new().validate_info(Reason::Number)
    }

    #[test]
    fn test_min_length() {
        let action = min_length(3);
        assert!(action(&"abc".to_string(), &string_info()).is_success());

        let failure = action(&"ab".to_string(), &string_info());
        let issues = failure.into_result().unwrap_err();
        assert_eq!(issues.first().validation, "min_length");
        assert_eq!(issues.first().reason, Reason::String);
        assert_eq!(issues.first().input, json!("ab"));
    }

    #[test]
    fn test_max_length_counts_chars() {
        let action = max_length(3);
        assert!(action(&"äöü".to_string(), &string_info()).is_success());
        assert!(action(&"äöüß".to_string(), &string_info()).is_failure());
    }

    #[test]
    fn test_pattern() {
        let action = pattern(Regex::new(r"^\d+$").unwrap());
        assert!(action(&"123".to_string(), &string_info()).is_success());
        assert!(action(&"abc".to_string(), &string_info()).is_failure());
    }

    #[test]
    fn test_email() {
        let action = email();
        assert!(action(&"ada@example.com".to_string(), &string_info()).is_success());
        assert!(action(&"not-an-email".to_string(), &string_info()).is_failure());
        assert!(action(&"a b@example.com".to_string(), &string_info()).is_failure());
    }

    #[test]
    fn test_affix_checks() {
        assert!(starts_with("re")(&"retry".to_string(), &string_info()).is_success());
        assert!(ends_with("ing")(&"parsing".to_string(), &string_info()).is_success());
        assert!(contains("@")(&"a@b".to_string(), &string_info()).is_success());
        assert!(contains("@")(&"ab".to_string(), &string_info()).is_failure());
    }

    #[test]
    fn test_transform_then_validate_order_is_observable() {
        let trimmed_first: Pipe<String> = Pipe::new().with(to_trimmed()).with(min_length(2));
        let validated_first: Pipe<String> = Pipe::new().with(min_length(2)).with(to_trimmed());

        let input = " a ".to_string();
        assert!(run(input.clone(), &trimmed_first, &string_info()).is_failure());
        assert!(run(input, &validated_first, &string_info()).is_success());
    }

    #[test]
    fn test_min_max_value() {
        assert!(min_value(0.0)(&1.5, &number_info()).is_success());
        let issues = min_value(0.0)(&-1.0, &number_info())
            .into_result()
            .unwrap_err();
        assert_eq!(issues.first().validation, "min_value");
        assert_eq!(issues.first().input, json!(-1.0));

        assert!(max_value(10.0)(&10.0, &number_info()).is_success());
        assert!(max_value(10.0)(&10.5, &number_info()).is_failure());
    }

    #[test]
    fn test_size_bounds() {
        let info = ParseInfo::new().validate_info(Reason::Array);
        let items = vec![json!(1), json!(2)];
        assert!(min_size(2)(&items, &info).is_success());
        assert!(min_size(3)(&items, &info).is_failure());
        assert!(max_size(2)(&items, &info).is_success());
        assert!(max_size(1)(&items, &info).is_failure());
    }

    #[test]
    fn test_message_override() {
        let action = message(min_length(5), "username too short");
        let issues = action(&"ab".to_string(), &string_info())
            .into_result()
            .unwrap_err();
        assert_eq!(issues.first().message, "username too short");
        assert_eq!(issues.first().validation, "min_length");
    }

    #[test]
    fn test_custom() {
        let action = custom(|value: &String, info| {
            if value == "magic" {
                ok(value.clone())
            } else {
                err(Issues::single(info.issue(
                    "custom",
                    "not magic",
                    &json!(value.clone()),
                )))
            }
        });
        assert!(action(&"magic".to_string(), &string_info()).is_success());
        assert!(action(&"mundane".to_string(), &string_info()).is_failure());
    }
}
