//! Contact extraction from the page query string

use serde::{Deserialize, Serialize};
use url::form_urlencoded;

/// Query parameter carrying the visitor's email
pub const EMAIL_PARAM: &str = "email";
/// Query parameter carrying the visitor's first name
pub const FIRST_NAME_PARAM: &str = "first_name";
/// Query parameter carrying the visitor's last name
pub const LAST_NAME_PARAM: &str = "last_name";

/// Optional identity captured at load time
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactInfo {
    /// Visitor email
    pub email: Option<String>,
    /// Visitor first name
    pub first_name: Option<String>,
    /// Visitor last name
    pub last_name: Option<String>,
}

impl ContactInfo {
    /// True when no field was supplied
    #[inline]
    #[must_use]
    pub fn is_anonymous(&self) -> bool {
        self.email.is_none() && self.first_name.is_none() && self.last_name.is_none()
    }
}

/// Parse contact fields out of a location search string
///
/// Accepts the string with or without its leading `?`. Values are
/// form-decoded and otherwise used verbatim; for repeated keys the first
/// occurrence wins. Missing keys yield `None`.
#[must_use]
pub fn extract_contact(location_search: &str) -> ContactInfo {
    let query = location_search.strip_prefix('?').unwrap_or(location_search);
    let mut contact = ContactInfo::default();

    for (key, value) in form_urlencoded::parse(query.as_bytes()) {
        let slot = match key.as_ref() {
            EMAIL_PARAM => &mut contact.email,
            FIRST_NAME_PARAM => &mut contact.first_name,
            LAST_NAME_PARAM => &mut contact.last_name,
            _ => continue,
        };
        if slot.is_none() {
            *slot = Some(value.into_owned());
        }
    }

    contact
}
