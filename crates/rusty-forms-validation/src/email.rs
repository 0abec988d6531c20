//! Email validation

use email_address::EmailAddress;

/// RFC 5322 address syntax
pub fn is_valid_email(email: &str) -> bool {
    EmailAddress::is_valid(email)
}
