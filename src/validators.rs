/// Input validation helpers for profile and registration fields.
use lazy_static::lazy_static;
use regex::Regex;
use validator::ValidateEmail;

lazy_static! {
    static ref USERNAME_RE: Regex = Regex::new(r"^\w{3,30}$").unwrap();
    static ref MOBILE_RE: Regex = Regex::new(r"^[0-9]{10,15}$").unwrap();
}

/// Validates username format: 3-30 word characters.
pub fn validate_username(username: &str) -> bool {
    USERNAME_RE.is_match(username)
}

/// Validates email format and the stored length cap.
pub fn validate_email(email: &str) -> bool {
    email.len() <= 100 && email.validate_email()
}

/// Validates bio length.
pub fn validate_bio(bio: &str) -> bool {
    bio.chars().count() <= 200
}

/// Validates mobile number: 10-15 digits.
pub fn validate_mobile(mobile: &str) -> bool {
    MOBILE_RE.is_match(mobile)
}

/// Validates a picture/photo URL scheme.
pub fn validate_picture_url(url: &str) -> bool {
    url.starts_with("http://") || url.starts_with("https://")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_username_valid() {
        assert!(validate_username("abc"));
        assert!(validate_username("user_123"));
        assert!(validate_username(&"a".repeat(30)));
    }

    #[test]
    fn test_validate_username_invalid() {
        assert!(!validate_username("ab"));
        assert!(!validate_username(&"a".repeat(31)));
        assert!(!validate_username("user-name"));
        assert!(!validate_username("user name"));
        assert!(!validate_username(""));
    }

    #[test]
    fn test_validate_email_valid() {
        assert!(validate_email("user@example.com"));
        assert!(validate_email("user+tag@example.co.uk"));
    }

    #[test]
    fn test_validate_email_invalid() {
        assert!(!validate_email("invalid-email"));
        assert!(!validate_email("@example.com"));
        let local = "a".repeat(95);
        assert!(!validate_email(&format!("{}@example.com", local)));
    }

    #[test]
    fn test_validate_bio() {
        assert!(validate_bio(""));
        assert!(validate_bio(&"b".repeat(200)));
        assert!(!validate_bio(&"b".repeat(201)));
    }

    #[test]
    fn test_validate_mobile() {
        assert!(validate_mobile("0123456789"));
        assert!(validate_mobile(&"9".repeat(15)));
        assert!(!validate_mobile("123456789"));
        assert!(!validate_mobile(&"9".repeat(16)));
        assert!(!validate_mobile("01234abcde"));
        assert!(!validate_mobile("+41791234567"));
    }

    #[test]
    fn test_validate_picture_url() {
        assert!(validate_picture_url("http://example.com/a.png"));
        assert!(validate_picture_url("https://example.com/a.png"));
        assert!(!validate_picture_url("ftp://example.com/a.png"));
        assert!(!validate_picture_url("example.com/a.png"));
    }
}
