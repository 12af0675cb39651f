//! Placeholder rule for null strings on form-encoded bodies.
//!
//! A form-encoded body cannot tell an omitted field from an empty one, so
//! payload string fields sent that way replace null/empty with
//! [`NULL_PLACEHOLDER`] on the way out and turn it back into `None` on the
//! way in. JSON bodies and error descriptors carry real optionals and do not
//! use this rule.
//!
//! Genuine user data equal to the placeholder reads back as `None`. That
//! collision is accepted, not guarded against.
//!
//! # Example
//!
//! ```
//! use trellis_rest::{get_post_value, set_post_value};
//!
//! assert_eq!(get_post_value(&set_post_value(Some(""))), None);
//! assert_eq!(get_post_value(&set_post_value(Some("hello"))), Some("hello".to_string()));
//! ```

/// Token standing in for a null or empty string.
pub const NULL_PLACEHOLDER: &str = "__trellis:null__";

/// Outgoing transform: null or empty becomes the placeholder.
pub fn set_post_value(value: Option<&str>) -> String {
    match value {
        None | Some("") => NULL_PLACEHOLDER.to_string(),
        Some(v) => v.to_string(),
    }
}

/// Incoming transform: the placeholder becomes `None`.
pub fn get_post_value(value: &str) -> Option<String> {
    if value == NULL_PLACEHOLDER {
        None
    } else {
        Some(value.to_string())
    }
}

/// serde adapter applying the rule to an `Option<String>` field.
///
/// ```
/// use serde::{Deserialize, Serialize};
///
/// #[derive(Serialize, Deserialize)]
/// struct CustomerForm {
///     last_name: String,
///     #[serde(with = "trellis_rest::post_value::option", default)]
///     middle_name: Option<String>,
/// }
/// ```
pub mod option {
    use serde::{Deserialize, Deserializer, Serializer};

    use super::{get_post_value, set_post_value};

    pub fn serialize<S>(value: &Option<String>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&set_post_value(value.as_deref()))
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        Ok(get_post_value(&raw))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::{Deserialize, Serialize};

    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    struct CustomerForm {
        last_name: String,
        #[serde(with = "super::option", default)]
        middle_name: Option<String>,
    }

    mod transform_tests {
        use super::*;

        #[test]
        fn test_empty_becomes_none() {
            assert_eq!(get_post_value(&set_post_value(Some(""))), None);
        }

        #[test]
        fn test_null_becomes_none() {
            assert_eq!(set_post_value(None), NULL_PLACEHOLDER);
            assert_eq!(get_post_value(&set_post_value(None)), None);
        }

        #[test]
        fn test_value_passes_through() {
            assert_eq!(set_post_value(Some("hello")), "hello");
            assert_eq!(
                get_post_value(&set_post_value(Some("hello"))),
                Some("hello".to_string())
            );
        }

        #[test]
        fn test_whitespace_is_data() {
            assert_eq!(get_post_value(&set_post_value(Some(" "))), Some(" ".to_string()));
        }

        #[test]
        fn test_placeholder_as_user_data_collides() {
            assert_eq!(get_post_value(NULL_PLACEHOLDER), None);
        }
    }

    mod form_tests {
        use super::*;

        #[test]
        fn test_form_round_trip_with_null() {
            let form = CustomerForm {
                last_name: "Lovelace".to_string(),
                middle_name: None,
            };
            let body = serde_urlencoded::to_string(&form).unwrap();
            assert!(body.contains("middleName="));
            let back: CustomerForm = serde_urlencoded::from_str(&body).unwrap();
            assert_eq!(back, form);
        }

        #[test]
        fn test_form_round_trip_with_value() {
            let form = CustomerForm {
                last_name: "Lovelace".to_string(),
                middle_name: Some("Augusta".to_string()),
            };
            let body = serde_urlencoded::to_string(&form).unwrap();
            assert!(body.contains("middleName=Augusta"));
            let back: CustomerForm = serde_urlencoded::from_str(&body).unwrap();
            assert_eq!(back, form);
        }

        #[test]
        fn test_form_empty_string_reads_back_as_none() {
            let form = CustomerForm {
                last_name: "Lovelace".to_string(),
                middle_name: Some(String::new()),
            };
            let body = serde_urlencoded::to_string(&form).unwrap();
            let back: CustomerForm = serde_urlencoded::from_str(&body).unwrap();
            assert_eq!(back.middle_name, None);
        }

        #[test]
        fn test_omitted_field_defaults_to_none() {
            let back: CustomerForm = serde_urlencoded::from_str("lastName=Lovelace").unwrap();
            assert_eq!(back.middle_name, None);
        }
    }
}
