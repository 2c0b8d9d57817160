//! Newtype IDs for Slack entity references.
//!
//! Slack identifies everything with opaque strings. The `define_id!` macro
//! wraps them so a channel ID can never be passed where a message timestamp
//! is expected.

/// Macro to define a type-safe string ID wrapper.
///
/// Creates a newtype wrapper around `String` with:
/// - `Serialize`/`Deserialize` with `#[serde(transparent)]`
/// - `Debug`, `Clone`, `PartialEq`, `Eq`, `Hash`
/// - Conversion methods: `new()`, `as_str()`, `into_inner()`
/// - `From<String>`, `From<&str>` and `Display` implementations
///
/// # Example
///
/// ```rust
/// # use editable_request_core::define_id;
/// define_id!(TeamId);
/// define_id!(AppId);
///
/// let team = TeamId::new("T0123");
/// let app = AppId::new("A0123");
///
/// // These are different types, so this won't compile:
/// // let _: TeamId = app;
/// assert_eq!(team.as_str(), "T0123");
/// ```
#[macro_export]
macro_rules! define_id {
    ($name:ident) => {
        #[derive(
            Debug, Clone, PartialEq, Eq, Hash, ::serde::Serialize, ::serde::Deserialize,
        )]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Create a new ID from any string-like value.
            #[must_use]
            pub fn new(id: impl Into<String>) -> Self {
                Self(id.into())
            }

            /// Borrow the underlying string.
            #[must_use]
            pub fn as_str(&self) -> &str {
                &self.0
            }

            /// Consume the wrapper and return the underlying string.
            #[must_use]
            pub fn into_inner(self) -> String {
                self.0
            }
        }

        impl ::core::fmt::Display for $name {
            fn fmt(&self, f: &mut ::core::fmt::Formatter<'_>) -> ::core::fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<String> for $name {
            fn from(id: String) -> Self {
                Self(id)
            }
        }

        impl From<&str> for $name {
            fn from(id: &str) -> Self {
                Self(id.to_owned())
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }
    };
}

// Slack entity IDs
define_id!(ChannelId);
define_id!(UserId);
define_id!(ViewId);
define_id!(TriggerId);

// Message timestamp. Unique within a channel, so `(ChannelId, MessageTs)`
// addresses exactly one message.
define_id!(MessageTs);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_id_display_is_raw_value() {
        let channel = ChannelId::new("C024BE91L");
        assert_eq!(channel.to_string(), "C024BE91L");
    }

    #[test]
    fn test_id_serializes_transparently() {
        let user = UserId::from("U061F7AUR");
        let json = serde_json::to_string(&user).expect("serialize");
        assert_eq!(json, "\"U061F7AUR\"");

        let parsed: UserId = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(parsed, user);
    }

    #[test]
    fn test_timestamp_keeps_precision() {
        let ts: MessageTs = serde_json::from_str("\"1503435956.000247\"").expect("deserialize");
        assert_eq!(ts.as_str(), "1503435956.000247");
    }
}
