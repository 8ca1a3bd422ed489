//! Inline request validation.
//!
//! Request bodies arrive as untyped JSON so that a missing field, a field of
//! the wrong type and an empty string all produce the same client error
//! instead of a deserializer rejection. Unknown keys, including a
//! client-supplied `id`, are ignored.

use serde_json::{Number, Value};

use crate::error::ValidationError;
use crate::types::{PostFields, UserFields};

impl PostFields {
    /// Both `title` and `content` must be non-empty strings.
    pub fn from_json(body: &Value) -> Result<Self, ValidationError> {
        let title = non_empty_str(body, "title").ok_or(ValidationError::POST)?;
        let content = non_empty_str(body, "content").ok_or(ValidationError::POST)?;
        Ok(Self {
            title: title.to_string(),
            content: content.to_string(),
        })
    }
}

impl UserFields {
    /// `name` and `lastName` must be non-empty strings; `age` must be a
    /// non-zero whole number.
    pub fn from_json(body: &Value) -> Result<Self, ValidationError> {
        let name = non_empty_str(body, "name").ok_or(ValidationError::USER)?;
        let last_name = non_empty_str(body, "lastName").ok_or(ValidationError::USER)?;
        let age = match body.get("age") {
            Some(Value::Number(n)) => whole_number(n).ok_or(ValidationError::USER)?,
            _ => return Err(ValidationError::USER),
        };
        // Zero is falsy and has always been rejected alongside a missing age.
        if age == 0 {
            return Err(ValidationError::USER);
        }
        Ok(Self {
            name: name.to_string(),
            last_name: last_name.to_string(),
            age,
        })
    }
}

fn non_empty_str<'a>(body: &'a Value, key: &str) -> Option<&'a str> {
    body.get(key)
        .and_then(Value::as_str)
        .filter(|s| !s.is_empty())
}

/// Accepts `30` and `30.0`, rejects `30.5` and values outside `i64`.
fn whole_number(n: &Number) -> Option<i64> {
    if let Some(i) = n.as_i64() {
        return Some(i);
    }
    let f = n.as_f64()?;
    if f.fract() == 0.0 && f >= i64::MIN as f64 && f < i64::MAX as f64 {
        Some(f as i64)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn post_accepts_title_and_content() {
        let fields = PostFields::from_json(&json!({"title": "A", "content": "B"})).unwrap();
        assert_eq!(fields.title, "A");
        assert_eq!(fields.content, "B");
    }

    #[test]
    fn post_ignores_client_id() {
        let fields =
            PostFields::from_json(&json!({"id": 99, "title": "A", "content": "B"})).unwrap();
        assert_eq!(
            fields,
            PostFields {
                title: "A".to_string(),
                content: "B".to_string()
            }
        );
    }

    #[test]
    fn post_rejects_empty_title() {
        let err = PostFields::from_json(&json!({"title": "", "content": "B"})).unwrap_err();
        assert_eq!(err.message(), "Invalid title or content");
    }

    #[test]
    fn post_rejects_missing_content() {
        assert!(PostFields::from_json(&json!({"title": "A"})).is_err());
    }

    #[test]
    fn post_rejects_non_string_fields() {
        assert!(PostFields::from_json(&json!({"title": 1, "content": "B"})).is_err());
        assert!(PostFields::from_json(&json!({"title": "A", "content": ["B"]})).is_err());
    }

    #[test]
    fn post_rejects_non_object_body() {
        assert!(PostFields::from_json(&json!(["A", "B"])).is_err());
        assert!(PostFields::from_json(&Value::Null).is_err());
    }

    #[test]
    fn user_accepts_valid_fields() {
        let fields =
            UserFields::from_json(&json!({"name": "Ada", "lastName": "Lovelace", "age": 36}))
                .unwrap();
        assert_eq!(fields.name, "Ada");
        assert_eq!(fields.last_name, "Lovelace");
        assert_eq!(fields.age, 36);
    }

    #[test]
    fn user_accepts_whole_float_age() {
        let fields =
            UserFields::from_json(&json!({"name": "Ada", "lastName": "L", "age": 36.0})).unwrap();
        assert_eq!(fields.age, 36);
    }

    #[test]
    fn user_rejects_zero_age() {
        let err = UserFields::from_json(&json!({"name": "Ada", "lastName": "L", "age": 0}))
            .unwrap_err();
        assert_eq!(err.message(), "Invalid name or lastName or age");
    }

    #[test]
    fn user_rejects_fractional_age() {
        assert!(UserFields::from_json(&json!({"name": "Ada", "lastName": "L", "age": 1.5})).is_err());
    }

    #[test]
    fn user_rejects_string_age() {
        assert!(UserFields::from_json(&json!({"name": "Ada", "lastName": "L", "age": "36"})).is_err());
    }

    #[test]
    fn user_rejects_snake_case_last_name() {
        assert!(
            UserFields::from_json(&json!({"name": "Ada", "last_name": "L", "age": 36})).is_err()
        );
    }

    #[test]
    fn user_rejects_empty_name() {
        assert!(UserFields::from_json(&json!({"name": "", "lastName": "L", "age": 36})).is_err());
    }
}
