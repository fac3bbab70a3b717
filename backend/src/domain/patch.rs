//! Tri-state field updates for nullable columns.
//!
//! A partial update must distinguish "leave the field alone" from "clear the
//! field". JSON expresses both (`{}` vs `{"bio": null}`), and [`Patch`]
//! keeps the distinction through to the store adapters.

use serde::{Deserialize, Deserializer};

/// Requested change to a nullable field.
///
/// Use with `#[serde(default)]` so an omitted key deserialises to
/// [`Patch::Absent`].
///
/// # Examples
/// ```
/// use blog_backend::domain::Patch;
/// use serde::Deserialize;
///
/// #[derive(Deserialize)]
/// struct Changes {
///     #[serde(default)]
///     bio: Patch<String>,
/// }
///
/// let omitted: Changes = serde_json::from_str("{}").unwrap();
/// let cleared: Changes = serde_json::from_str(r#"{"bio":null}"#).unwrap();
/// assert_eq!(omitted.bio, Patch::Absent);
/// assert_eq!(cleared.bio, Patch::Null);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Patch<T> {
    /// Leave the stored value untouched.
    #[default]
    Absent,
    /// Clear the stored value.
    Null,
    /// Replace the stored value.
    Value(T),
}

impl<T> Patch<T> {
    /// Whether the field was omitted.
    pub fn is_absent(&self) -> bool {
        matches!(self, Self::Absent)
    }

    /// Borrow the payload.
    pub fn as_ref(&self) -> Patch<&T> {
        match self {
            Self::Absent => Patch::Absent,
            Self::Null => Patch::Null,
            Self::Value(value) => Patch::Value(value),
        }
    }

    /// Convert into the nested option shape Diesel changesets use:
    /// `None` skips the column, `Some(None)` writes `NULL`.
    pub fn into_change(self) -> Option<Option<T>> {
        match self {
            Self::Absent => None,
            Self::Null => Some(None),
            Self::Value(value) => Some(Some(value)),
        }
    }

    /// Apply the change to an in-memory field.
    pub fn apply_to(self, target: &mut Option<T>) {
        match self {
            Self::Absent => {}
            Self::Null => *target = None,
            Self::Value(value) => *target = Some(value),
        }
    }
}

impl<'de, T> Deserialize<'de> for Patch<T>
where
    T: Deserialize<'de>,
{
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        Option::<T>::deserialize(deserializer).map(|value| match value {
            Some(value) => Self::Value(value),
            None => Self::Null,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use serde_json::json;

    #[derive(Debug, Deserialize)]
    struct Probe {
        #[serde(default)]
        field: Patch<String>,
    }

    #[rstest]
    #[case(json!({}), Patch::Absent)]
    #[case(json!({ "field": null }), Patch::Null)]
    #[case(json!({ "field": "x" }), Patch::Value("x".to_owned()))]
    fn deserialises_three_states(#[case] input: serde_json::Value, #[case] expected: Patch<String>) {
        let probe: Probe = serde_json::from_value(input).expect("deserialise probe");
        assert_eq!(probe.field, expected);
    }

    #[rstest]
    fn apply_to_respects_absence() {
        let mut stored = Some("kept".to_owned());
        Patch::<String>::Absent.apply_to(&mut stored);
        assert_eq!(stored.as_deref(), Some("kept"));

        Patch::<String>::Null.apply_to(&mut stored);
        assert_eq!(stored, None);

        Patch::Value("new".to_owned()).apply_to(&mut stored);
        assert_eq!(stored.as_deref(), Some("new"));
    }

    #[rstest]
    fn into_change_uses_nested_options() {
        assert_eq!(Patch::<i32>::Absent.into_change(), None);
        assert_eq!(Patch::<i32>::Null.into_change(), Some(None));
        assert_eq!(Patch::Value(1).into_change(), Some(Some(1)));
    }
}
