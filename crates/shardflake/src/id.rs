use core::fmt;

/// The three fields of an ID, as laid out by a [`BitLayout`].
///
/// Callers normally treat IDs as opaque sortable integers. `IdParts` exists
/// for inspection and debugging: [`BitLayout::decode`] produces it and
/// [`BitLayout::encode`] consumes it.
///
/// [`BitLayout`]: crate::BitLayout
/// [`BitLayout::decode`]: crate::BitLayout::decode
/// [`BitLayout::encode`]: crate::BitLayout::encode
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct IdParts {
    /// Whole timestamp units elapsed since the epoch.
    pub timestamp: u64,
    /// The producer that minted the ID.
    pub shard: u64,
    /// Position within the timestamp unit.
    pub sequence: u64,
}

impl fmt::Display for IdParts {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "timestamp={} shard={} sequence={}",
            self.timestamp, self.shard, self.sequence
        )
    }
}

#[cfg(all(test, feature = "serde"))]
mod tests {
    use super::*;

    #[test]
    fn id_parts_serialize_as_named_fields() {
        let parts = IdParts {
            timestamp: 10,
            shard: 3,
            sequence: 1,
        };
        let json = serde_json::to_string(&parts).unwrap();
        assert_eq!(json, r#"{"timestamp":10,"shard":3,"sequence":1}"#);
        assert_eq!(serde_json::from_str::<IdParts>(&json).unwrap(), parts);
    }
}
