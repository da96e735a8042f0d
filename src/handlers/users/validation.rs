use std::net::{Ipv4Addr, Ipv6Addr};

use once_cell::sync::Lazy;
use regex::Regex;

use crate::database::models::UserInput;
use crate::error::ApiError;

pub const NAMES_REQUIRED: &str = "FirstName and LastName are required.";
pub const EMAIL_REQUIRED: &str = "Email is required.";
pub const EMAIL_INVALID: &str = "Email format is invalid.";
pub const EMAIL_REQUIRED_AND_VALID: &str = "Email is required and must be valid.";

const NAME_MAX: usize = 100;
const PHONE_MAX: usize = 20;
const DEPARTMENT_MAX: usize = 100;

/// Local part: a dot-atom (ASCII atext or any non-ASCII character) or a
/// quoted string with backslash escapes
static LOCAL_PART_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r##"^(?:(?:[A-Za-z0-9!#$%&'*+/=?^_`{|}~-]|[^\x00-\x7F])+(?:\.(?:[A-Za-z0-9!#$%&'*+/=?^_`{|}~-]|[^\x00-\x7F])+)*|"(?:[^"\\\r\n]|\\[^\r\n])*")$"##,
    )
    .expect("compile local-part regex")
});

/// Hostname-style domain labels
static DOMAIN_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"^[A-Za-z0-9](?:[A-Za-z0-9-]{0,61}[A-Za-z0-9])?(?:\.[A-Za-z0-9](?:[A-Za-z0-9-]{0,61}[A-Za-z0-9])?)*$",
    )
    .expect("compile domain regex")
});

/// Fields of a user body that passed validation.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidUser {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone_number: Option<String>,
    pub department: Option<String>,
}

fn is_domain(domain: &str) -> bool {
    match domain.strip_prefix('[').and_then(|d| d.strip_suffix(']')) {
        Some(literal) => match literal.strip_prefix("IPv6:") {
            Some(v6) => v6.parse::<Ipv6Addr>().is_ok(),
            None => literal.parse::<Ipv4Addr>().is_ok(),
        },
        None => DOMAIN_REGEX.is_match(domain),
    }
}

/// Lenient address parse. Accepts surrounding whitespace and the
/// `Display Name <local@domain>` form, returning the bare address.
/// The local part may be quoted; the domain may be a `[...]` IP literal.
pub fn parse_email(input: &str) -> Option<String> {
    let mut candidate = input.trim();

    if let Some(inner) = candidate.strip_suffix('>') {
        let open = inner.rfind('<')?;
        candidate = inner[open + 1..].trim();
    }

    // Quoted local parts may contain '@', the domain never does
    let (local, domain) = candidate.rsplit_once('@')?;
    if LOCAL_PART_REGEX.is_match(local) && is_domain(domain) {
        Some(candidate.to_string())
    } else {
        None
    }
}

/// Valid only if the parsed address is exactly the input, so anything the
/// lenient parser would silently strip is rejected.
pub fn is_valid_email(input: &str) -> bool {
    parse_email(input).as_deref() == Some(input)
}

fn is_blank(value: &Option<String>) -> bool {
    value.as_deref().map_or(true, |v| v.trim().is_empty())
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

/// Checks for a create body, first failure wins.
pub fn validate_create(input: UserInput) -> Result<ValidUser, ApiError> {
    if is_blank(&input.first_name) || is_blank(&input.last_name) {
        return Err(ApiError::bad_request(NAMES_REQUIRED));
    }
    if is_blank(&input.email) {
        return Err(ApiError::bad_request(EMAIL_REQUIRED));
    }
    let email = input.email.clone().unwrap_or_default();
    if !is_valid_email(&email) {
        return Err(ApiError::bad_request(EMAIL_INVALID));
    }

    into_valid(input, email)
}

/// Checks for an update body, first failure wins.
pub fn validate_update(input: UserInput) -> Result<ValidUser, ApiError> {
    if is_blank(&input.first_name) || is_blank(&input.last_name) {
        return Err(ApiError::bad_request(NAMES_REQUIRED));
    }
    let email = input.email.clone().unwrap_or_default();
    if email.trim().is_empty() || !is_valid_email(&email) {
        return Err(ApiError::bad_request(EMAIL_REQUIRED_AND_VALID));
    }

    into_valid(input, email)
}

fn into_valid(input: UserInput, email: String) -> Result<ValidUser, ApiError> {
    let user = ValidUser {
        first_name: input.first_name.unwrap_or_default(),
        last_name: input.last_name.unwrap_or_default(),
        email,
        phone_number: non_blank(input.phone_number),
        department: non_blank(input.department),
    };
    check_lengths(&user)?;
    Ok(user)
}

fn too_long(value: &str, max: usize) -> bool {
    value.chars().count() > max
}

fn check_lengths(user: &ValidUser) -> Result<(), ApiError> {
    if too_long(&user.first_name, NAME_MAX) || too_long(&user.last_name, NAME_MAX) {
        return Err(ApiError::bad_request(format!(
            "FirstName and LastName must be at most {} characters.",
            NAME_MAX
        )));
    }
    if user.phone_number.as_deref().is_some_and(|p| too_long(p, PHONE_MAX)) {
        return Err(ApiError::bad_request(format!(
            "PhoneNumber must be at most {} characters.",
            PHONE_MAX
        )));
    }
    if user.department.as_deref().is_some_and(|d| too_long(d, DEPARTMENT_MAX)) {
        return Err(ApiError::bad_request(format!(
            "Department must be at most {} characters.",
            DEPARTMENT_MAX
        )));
    }
    Ok(())
}
