// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::ImportError;
use serde::{Deserialize, Serialize};

/// The stage an import run is in.
///
/// Runs move strictly forward:
/// `Idle -> Parsing -> Validating -> Uploading -> Done`, or to `Failed`
/// from any non-terminal stage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ImportStage {
    /// Nothing has started.
    #[default]
    Idle,
    /// Reading rows from the input.
    Parsing,
    /// Mapping and validating rows.
    Validating,
    /// Submitting valid rows.
    Uploading,
    /// Finished normally.
    Done,
    /// Aborted by a fatal error.
    Failed,
}

impl ImportStage {
    /// Converts this stage to its string representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Parsing => "parsing",
            Self::Validating => "validating",
            Self::Uploading => "uploading",
            Self::Done => "done",
            Self::Failed => "failed",
        }
    }

    /// Returns `true` for `Done` and `Failed`.
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Done | Self::Failed)
    }

    /// Returns `true` if a run may move from `self` to `next`.
    #[must_use]
    pub const fn can_transition_to(self, next: Self) -> bool {
        match (self, next) {
            (Self::Idle, Self::Parsing)
            | (Self::Parsing, Self::Validating)
            | (Self::Validating, Self::Uploading | Self::Done)
            | (Self::Uploading, Self::Done) => true,
            (from, Self::Failed) => !from.is_terminal(),
            _ => false,
        }
    }

    /// Moves to `next`.
    ///
    /// # Errors
    ///
    /// Returns `ImportError::InvalidStageTransition` if the move is not allowed.
    pub fn advance(self, next: Self) -> Result<Self, ImportError> {
        if self.can_transition_to(next) {
            Ok(next)
        } else {
            Err(ImportError::InvalidStageTransition {
                from: self,
                to: next,
            })
        }
    }
}

impl std::fmt::Display for ImportStage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
