use derive_more::{Display, FromStr};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Overlay template for partial identifier input.
///
/// Short fragments replace the tail of this pattern, so `"12345"` and
/// `"FFFFEEEEDDDDCCCCBBBBAAAA99912345"` coerce to the same id.
const OVERLAY_TEMPLATE: &str = "FFFFEEEEDDDDCCCCBBBBAAAA99998888";

///
/// RecordId
///
/// Platform identifier of one record. The nil value means "no id"; context
/// resolution and save paths branch on that instead of wrapping ids in
/// `Option` everywhere.
///

#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    Deserialize,
    Display,
    Eq,
    FromStr,
    Hash,
    Ord,
    PartialEq,
    PartialOrd,
    Serialize,
)]
#[repr(transparent)]
pub struct RecordId(Uuid);

impl RecordId {
    pub const UNSET: Self = Self(Uuid::nil());

    #[must_use]
    pub const fn new(id: Uuid) -> Self {
        Self(id)
    }

    #[must_use]
    pub const fn is_unset(&self) -> bool {
        self.0.is_nil()
    }

    #[must_use]
    pub const fn as_uuid(&self) -> Uuid {
        self.0
    }

    /// coerce
    /// Best-effort interpretation of arbitrary text as an id.
    ///
    /// Accepts every textual uuid form; anything shorter is overlaid onto
    /// the tail of [`OVERLAY_TEMPLATE`] and parsed as 32 hex digits.
    /// Unusable input degrades to [`Self::UNSET`], never to an error.
    #[must_use]
    pub fn coerce(input: &str) -> Self {
        let input = input.trim();
        if input.is_empty() {
            return Self::UNSET;
        }

        if let Ok(id) = Uuid::try_parse(input) {
            return Self(id);
        }

        if input.len() > OVERLAY_TEMPLATE.len() {
            return Self::UNSET;
        }

        let overlaid = format!(
            "{}{input}",
            &OVERLAY_TEMPLATE[..OVERLAY_TEMPLATE.len() - input.len()]
        );

        Uuid::try_parse(&overlaid).map_or(Self::UNSET, Self)
    }
}

impl From<Uuid> for RecordId {
    fn from(id: Uuid) -> Self {
        Self(id)
    }
}

///
/// TESTS
///
