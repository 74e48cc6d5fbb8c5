//! Integer tag fields whose value sets live in the embedding application.

use serde::{Deserialize, Serialize};

/// An opaque 64-bit tag carried through the bridge verbatim.
///
/// The valid value sets for `type_code`, `source_type` and `security_type`
/// are enumerations defined by the application on the managed side of the
/// boundary. This library transports them without interpretation; closing
/// them into Rust enums would couple us to a foreign release cycle.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Default,
)]
#[serde(transparent)]
pub struct TagCode(pub i64);

impl TagCode {
    /// The raw tag value.
    pub fn value(self) -> i64 {
        self.0
    }
}

impl From<i64> for TagCode {
    fn from(value: i64) -> Self {
        Self(value)
    }
}

impl std::fmt::Display for TagCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tag_roundtrips_raw_value() {
        let tag = TagCode::from(42);
        assert_eq!(tag.value(), 42);
        assert_eq!(tag, TagCode(42));
    }

    #[test]
    fn test_tag_serde_is_transparent() {
        let tag = TagCode(7);
        let json = serde_json::to_string(&tag).expect("serialize");
        assert_eq!(json, "7");
        let back: TagCode = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(back, tag);
    }
}
