//! Item state machine.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Pipeline stage a failure is attributed to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Stage {
    /// Resolving the coordinate to a local file
    Locate,
    /// Unpacking the archive
    Extract,
    /// Walking the unpacked tree
    Discover,
    /// Parsing one schema document
    Parse,
    /// Rendering or writing one generated file
    Emit,
}

impl Stage {
    /// Whether a failure in this stage ends the whole item.
    pub fn is_item_level(self) -> bool {
        matches!(self, Stage::Locate | Stage::Extract | Stage::Discover)
    }

    /// Lowercase stage name.
    pub fn as_str(self) -> &'static str {
        match self {
            Stage::Locate => "locate",
            Stage::Extract => "extract",
            Stage::Discover => "discover",
            Stage::Parse => "parse",
            Stage::Emit => "emit",
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { f.write_str(self.as_str()) }
}

/// Where an artifact item is in `PENDING → LOCATED → EXTRACTED → DISCOVERED → DONE`.
///
/// `Failed` is terminal and reachable from every non-terminal state. Document
/// failures do not move an item to `Failed`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", tag = "state", content = "stage")]
pub enum ItemState {
    /// Not started
    Pending,
    /// Archive resolved to a local file
    Located,
    /// Archive unpacked
    Extracted,
    /// Schema documents discovered
    Discovered,
    /// Every discovered document was attempted
    Done,
    /// Item aborted at the given stage
    Failed(Stage),
}

impl ItemState {
    /// Whether no further transition is possible.
    pub fn is_terminal(self) -> bool { matches!(self, ItemState::Done | ItemState::Failed(_)) }

    /// State after the stage following `self` succeeds.
    pub fn advance(self) -> Self {
        match self {
            ItemState::Pending => ItemState::Located,
            ItemState::Located => ItemState::Extracted,
            ItemState::Extracted => ItemState::Discovered,
            ItemState::Discovered | ItemState::Done => ItemState::Done,
            failed @ ItemState::Failed(_) => failed,
        }
    }

    /// Stage that runs next from this state, if any.
    pub fn next_stage(self) -> Option<Stage> {
        match self {
            ItemState::Pending => Some(Stage::Locate),
            ItemState::Located => Some(Stage::Extract),
            ItemState::Extracted => Some(Stage::Discover),
            ItemState::Discovered | ItemState::Done | ItemState::Failed(_) => None,
        }
    }

    /// Terminal failure at the stage that would run next.
    pub fn fail(self) -> Self {
        match self.next_stage() {
            Some(stage) => ItemState::Failed(stage),
            None => self,
        }
    }
}

impl fmt::Display for ItemState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ItemState::Pending => f.write_str("pending"),
            ItemState::Located => f.write_str("located"),
            ItemState::Extracted => f.write_str("extracted"),
            ItemState::Discovered => f.write_str("discovered"),
            ItemState::Done => f.write_str("done"),
            ItemState::Failed(stage) => write!(f, "failed ({})", stage),
        }
    }
}
