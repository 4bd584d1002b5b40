use crate::error::StageError;
use serde::{Deserialize, Serialize};
use std::fmt;

///
/// ProcessingStage
///
/// Pipeline position of one operation. Wire codes are fixed by the
/// platform: 10/20 before the main operation, 30 the operation itself,
/// 40/50 after it.
///

#[derive(
    Clone, Copy, Debug, Deserialize, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize,
)]
pub enum ProcessingStage {
    BeforeOuter,
    BeforeInner,
    Main,
    AfterInner,
    AfterOuter,
}

impl ProcessingStage {
    #[must_use]
    pub const fn code(self) -> u8 {
        match self {
            Self::BeforeOuter => 10,
            Self::BeforeInner => 20,
            Self::Main => 30,
            Self::AfterInner => 40,
            Self::AfterOuter => 50,
        }
    }

    pub const fn from_code(code: u8) -> Result<Self, StageError> {
        match code {
            10 => Ok(Self::BeforeOuter),
            20 => Ok(Self::BeforeInner),
            30 => Ok(Self::Main),
            40 => Ok(Self::AfterInner),
            50 => Ok(Self::AfterOuter),
            other => Err(StageError(other)),
        }
    }

    /// Stages that run before the main operation has produced output.
    #[must_use]
    pub const fn is_before_main(self) -> bool {
        matches!(self, Self::BeforeOuter | Self::BeforeInner)
    }
}

impl TryFrom<u8> for ProcessingStage {
    type Error = StageError;

    fn try_from(code: u8) -> Result<Self, Self::Error> {
        Self::from_code(code)
    }
}

impl fmt::Display for ProcessingStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::BeforeOuter => "before-outer",
            Self::BeforeInner => "before-inner",
            Self::Main => "main",
            Self::AfterInner => "after-inner",
            Self::AfterOuter => "after-outer",
        };
        write!(f, "{label}")
    }
}
