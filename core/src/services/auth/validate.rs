//! Input validation rules for the account lifecycle

use once_cell::sync::Lazy;
use regex::Regex;

use crate::domain::entities::account::CompanyType;
use crate::errors::ValidationError;

use super::identity::is_email;

/// Permitted characters in person names: letters, spaces, apostrophes, hyphens
static NAME_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z\s'-]+$").expect("name regex is valid"));

/// Bounds for person names
pub const NAME_MIN: usize = 2;
pub const NAME_MAX: usize = 50;

/// Bounds for passwords
pub const PASSWORD_MIN: usize = 6;
pub const PASSWORD_MAX: usize = 100;

/// Validate a person name (given or family) against length and charset rules
pub fn validate_person_name(field: &str, value: &str) -> Result<(), ValidationError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::RequiredField {
            field: field.to_string(),
        });
    }
    let len = trimmed.chars().count();
    if len < NAME_MIN || len > NAME_MAX {
        return Err(ValidationError::InvalidLength {
            field: field.to_string(),
            min: NAME_MIN,
            max: NAME_MAX,
        });
    }
    if !NAME_REGEX.is_match(trimmed) {
        return Err(ValidationError::PatternMismatch {
            field: field.to_string(),
        });
    }
    Ok(())
}

/// Validate email syntax
pub fn validate_email(email: &str) -> Result<(), ValidationError> {
    if email.trim().is_empty() {
        return Err(ValidationError::RequiredField {
            field: "email".to_string(),
        });
    }
    if !is_email(email) {
        return Err(ValidationError::InvalidEmail);
    }
    Ok(())
}

/// Validate a password and its confirmation
pub fn validate_password(password: &str, confirm: &str) -> Result<(), ValidationError> {
    let len = password.chars().count();
    if len < PASSWORD_MIN || len > PASSWORD_MAX {
        return Err(ValidationError::InvalidLength {
            field: "password".to_string(),
            min: PASSWORD_MIN,
            max: PASSWORD_MAX,
        });
    }
    if password != confirm {
        return Err(ValidationError::PasswordMismatch);
    }
    Ok(())
}

/// Parse a company type submitted as a string
pub fn parse_company_type(value: &str) -> Result<CompanyType, ValidationError> {
    CompanyType::parse(value.trim()).ok_or(ValidationError::InvalidCompanyType)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_person_name_rules() {
        assert!(validate_person_name("name", "Ada").is_ok());
        assert!(validate_person_name("name", "O'Neil-Smith").is_ok());
        assert!(validate_person_name("name", "De la Cruz").is_ok());

        assert_eq!(
            validate_person_name("name", ""),
            Err(ValidationError::RequiredField { field: "name".to_string() })
        );
        assert_eq!(
            validate_person_name("name", "A"),
            Err(ValidationError::InvalidLength { field: "name".to_string(), min: 2, max: 50 })
        );
        assert_eq!(
            validate_person_name("name", &"a".repeat(51)),
            Err(ValidationError::InvalidLength { field: "name".to_string(), min: 2, max: 50 })
        );
        assert_eq!(
            validate_person_name("name", "Ada99"),
            Err(ValidationError::PatternMismatch { field: "name".to_string() })
        );
    }

    #[test]
    fn test_email_rules() {
        assert!(validate_email("ada@example.com").is_ok());
        assert_eq!(validate_email(""), Err(ValidationError::RequiredField { field: "email".to_string() }));
        assert_eq!(validate_email("nope"), Err(ValidationError::InvalidEmail));
    }

    #[test]
    fn test_password_rules() {
        assert!(validate_password("secret1", "secret1").is_ok());
        assert_eq!(
            validate_password("short", "short"),
            Err(ValidationError::InvalidLength { field: "password".to_string(), min: 6, max: 100 })
        );
        assert_eq!(
            validate_password(&"p".repeat(101), &"p".repeat(101)),
            Err(ValidationError::InvalidLength { field: "password".to_string(), min: 6, max: 100 })
        );
        assert_eq!(
            validate_password("secret1", "secret2"),
            Err(ValidationError::PasswordMismatch)
        );
    }

    #[test]
    fn test_company_type_parsing() {
        assert_eq!(parse_company_type("sales"), Ok(crate::domain::entities::account::CompanyType::Sales));
        assert_eq!(parse_company_type(" real-estate "), Ok(crate::domain::entities::account::CompanyType::RealEstate));
        assert_eq!(parse_company_type("retail"), Err(ValidationError::InvalidCompanyType));
    }
}
