use super::error::DomainError;

pub(crate) const MAX_TITLE_CHARS: usize = 100;
pub(crate) const MAX_CONTENT_CHARS: usize = 5000;

/// Titles are required and limited to [`MAX_TITLE_CHARS`] characters.
pub(crate) fn validate_title(title: &str) -> Result<(), DomainError> {
    if title.trim().is_empty() {
        return Err(DomainError::Validation {
            field: "title",
            message: "must not be empty",
        });
    }
    if title.chars().count() > MAX_TITLE_CHARS {
        return Err(DomainError::Validation {
            field: "title",
            message: "must be at most 100 characters",
        });
    }
    Ok(())
}

pub(crate) fn validate_positive_id(field: &'static str, value: i64) -> Result<(), DomainError> {
    if value <= 0 {
        return Err(DomainError::Validation {
            field,
            message: "must be > 0",
        });
    }
    Ok(())
}

pub(crate) fn validate_optional_content(content: Option<&str>) -> Result<(), DomainError> {
    match content {
        Some(content) => check_content_length(content),
        None => Ok(()),
    }
}

pub(crate) fn validate_required_content(content: &str) -> Result<(), DomainError> {
    if content.trim().is_empty() {
        return Err(DomainError::Validation {
            field: "content",
            message: "must not be empty",
        });
    }
    check_content_length(content)
}

fn check_content_length(content: &str) -> Result<(), DomainError> {
    if content.chars().count() > MAX_CONTENT_CHARS {
        return Err(DomainError::Validation {
            field: "content",
            message: "must be at most 5000 characters",
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn title_boundaries() {
        assert!(validate_title(&"a".repeat(MAX_TITLE_CHARS)).is_ok());
        assert!(validate_title(&"a".repeat(MAX_TITLE_CHARS + 1)).is_err());
        assert!(validate_title("").is_err());
        assert!(validate_title(" \t\n").is_err());
    }

    #[test]
    fn title_length_counts_chars_not_bytes() {
        assert!(validate_title(&"ж".repeat(MAX_TITLE_CHARS)).is_ok());
    }

    #[test]
    fn content_boundaries() {
        assert!(validate_required_content(&"a".repeat(MAX_CONTENT_CHARS)).is_ok());
        assert!(validate_required_content(&"a".repeat(MAX_CONTENT_CHARS + 1)).is_err());
        assert!(validate_required_content("   ").is_err());
    }

    #[test]
    fn optional_content_accepts_absent_and_empty() {
        assert!(validate_optional_content(None).is_ok());
        assert!(validate_optional_content(Some("")).is_ok());
        assert!(validate_optional_content(Some(&"a".repeat(MAX_CONTENT_CHARS + 1))).is_err());
    }

    #[test]
    fn errors_name_the_failing_field() {
        match validate_required_content("") {
            Err(DomainError::Validation { field, .. }) => assert_eq!(field, "content"),
            other => panic!("expected content validation error, got {other:?}"),
        }
    }
}
