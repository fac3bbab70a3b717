//! Integer identifiers for the persisted entities.
//!
//! Each entity gets its own newtype so a `PostId` can never be handed to a
//! port expecting a `UserId`. Identifiers are assigned by the store and are
//! serialised as bare integers.

use std::fmt;

use serde::{Deserialize, Serialize};

macro_rules! entity_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(
            Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
        )]
        #[serde(transparent)]
        pub struct $name(i32);

        impl $name {
            /// Wrap a store-assigned identifier.
            #[must_use]
            pub const fn new(value: i32) -> Self {
                Self(value)
            }

            /// The raw integer value.
            #[must_use]
            pub const fn get(self) -> i32 {
                self.0
            }
        }

        impl From<i32> for $name {
            fn from(value: i32) -> Self {
                Self(value)
            }
        }

        impl From<$name> for i32 {
            fn from(value: $name) -> Self {
                value.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

entity_id! {
    /// Identifier of a [`crate::domain::User`].
    UserId
}

entity_id! {
    /// Identifier of a [`crate::domain::Post`].
    PostId
}

entity_id! {
    /// Identifier of a [`crate::domain::Comment`].
    CommentId
}

entity_id! {
    /// Identifier of a [`crate::domain::Tag`].
    TagId
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn ids_serialise_as_bare_integers() {
        let value = serde_json::to_value(PostId::new(7)).expect("serialise id");
        assert_eq!(value, serde_json::json!(7));

        let parsed: UserId = serde_json::from_value(serde_json::json!(3)).expect("parse id");
        assert_eq!(parsed, UserId::new(3));
    }

    #[rstest]
    fn display_matches_raw_value() {
        assert_eq!(TagId::new(42).to_string(), "42");
        assert_eq!(i32::from(CommentId::from(9)), 9);
    }
}
