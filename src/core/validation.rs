use std::fmt;
use std::fmt::{Display, Formatter};
use serde::Serialize;

// FieldError describes a single rejected field of an incoming request
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

impl FieldError {
    pub fn new(field: &str, message: &str) -> Self {
        Self {
            field: field.to_string(),
            message: message.to_string(),
        }
    }
}

impl Display for FieldError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.field, self.message)
    }
}

// Validate is implemented by every request shape accepted by the transport layer
pub trait Validate {
    fn validate(&self) -> Result<(), Vec<FieldError>>;
}

pub(crate) fn require_present<T>(field: &str, value: &Option<T>, errors: &mut Vec<FieldError>) {
    if value.is_none() {
        errors.push(FieldError::new(field, "must not be null"));
    }
}

pub(crate) fn require_not_blank(field: &str, value: &Option<String>, errors: &mut Vec<FieldError>) {
    match value {
        Some(s) if !s.trim().is_empty() => {}
        _ => errors.push(FieldError::new(field, "must not be blank")),
    }
}

pub(crate) fn into_result(errors: Vec<FieldError>) -> Result<(), Vec<FieldError>> {
    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

#[cfg(test)]
mod tests {
    use crate::core::validation::{FieldError, into_result, require_not_blank, require_present};

    #[tokio::test]
    async fn test_should_reject_missing_value() {
        let mut errors = vec![];
        require_present::<i64>("isbn", &None, &mut errors);
        require_present("book_id", &Some(1), &mut errors);
        assert_eq!(vec![FieldError::new("isbn", "must not be null")], errors);
    }

    #[tokio::test]
    async fn test_should_reject_blank_value() {
        let mut errors = vec![];
        require_not_blank("title", &None, &mut errors);
        require_not_blank("author", &Some("   ".to_string()), &mut errors);
        require_not_blank("other", &Some("x".to_string()), &mut errors);
        assert_eq!(2, errors.len());
        assert_eq!("title", errors[0].field.as_str());
        assert_eq!("author must not be blank", errors[1].to_string());
    }

    #[tokio::test]
    async fn test_should_build_result() {
        assert!(into_result(vec![]).is_ok());
        assert!(into_result(vec![FieldError::new("title", "must not be blank")]).is_err());
    }
}
