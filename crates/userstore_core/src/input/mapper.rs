//! Field-map to `UserDraft` conversion.

use crate::input::{FieldMap, FIELD_EMAIL, FIELD_ID, FIELD_NAME};
use crate::model::user::{UserDraft, UserId};
use std::error::Error;
use std::fmt::{Display, Formatter};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MapError {
    /// `id` was present but not an integer.
    InvalidId(String),
}

impl Display for MapError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidId(value) => write!(f, "invalid user id `{value}`"),
        }
    }
}

impl Error for MapError {}

/// Builds a draft from whichever of `id`/`first_name`/`email` are present.
///
/// Absent keys stay `None`. Text values are trimmed.
pub fn map_user_data(fields: &FieldMap) -> Result<UserDraft, MapError> {
    let id = fields
        .get(FIELD_ID)
        .map(String::as_str)
        .map(parse_id)
        .transpose()?;

    Ok(UserDraft {
        id,
        name: fields.get(FIELD_NAME).map(|value| value.trim().to_string()),
        email: fields.get(FIELD_EMAIL).map(|value| value.trim().to_string()),
    })
}

fn parse_id(value: &str) -> Result<UserId, MapError> {
    value
        .trim()
        .parse::<UserId>()
        .map_err(|_| MapError::InvalidId(value.to_string()))
}

#[cfg(test)]
mod tests {
    use super::{map_user_data, MapError};
    use crate::input::field_map;
    use crate::model::user::UserDraft;

    #[test]
    fn maps_all_present_fields() {
        let fields = field_map([("id", "7"), ("first_name", " Ann "), ("email", "ann@x.io")]);
        assert_eq!(
            map_user_data(&fields).unwrap(),
            UserDraft::with_id(7, "Ann", "ann@x.io")
        );
    }

    #[test]
    fn absent_keys_stay_unset_and_empty_values_stay_present() {
        let draft = map_user_data(&field_map([("first_name", "")])).unwrap();
        assert_eq!(draft.id, None);
        assert_eq!(draft.name.as_deref(), Some(""));
        assert_eq!(draft.email, None);
    }

    #[test]
    fn non_integer_id_is_an_error() {
        let err = map_user_data(&field_map([("id", "seven")])).unwrap_err();
        assert_eq!(err, MapError::InvalidId("seven".to_string()));
    }
}
