//! Registration field rules

use rb_auth::Role;
use rb_common::{Error, Result};

use crate::domain::entities::ProfileFields;

fn present(field: Option<String>) -> Option<String> {
    field
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

/// Collect the fields `role` requires; blank counts as missing
pub fn profile_fields(
    role: Role,
    first_name: Option<String>,
    surname: Option<String>,
    name: Option<String>,
) -> Result<ProfileFields> {
    match role {
        Role::Customer => match (present(first_name), present(surname)) {
            (Some(first_name), Some(surname)) => Ok(ProfileFields::Customer {
                first_name,
                surname,
            }),
            _ => Err(Error::Validation(
                "first_name and surname required for customer".to_string(),
            )),
        },
        Role::Restaurant => present(name)
            .map(|name| ProfileFields::Restaurant { name })
            .ok_or_else(|| Error::Validation("name required for restaurant".to_string())),
    }
}
