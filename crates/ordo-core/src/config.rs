//! Runtime configuration for ordered collections.
//!
//! Every field has a default, so partial JSON documents are accepted.

use crate::{error::InternalError, types::OrderIndex};
use serde::{Deserialize, Serialize};

///
/// TieBreak
///
/// How children sharing a stored index are ranked when the canonical order
/// is rebuilt.
///

#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TieBreak {
    /// Keep the order in which the store supplied the duplicates.
    #[default]
    FetchOrder,

    /// Rank duplicates by child key. Stable across invocations.
    ChildKey,
}

///
/// OrderConfig
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct OrderConfig {
    /// Largest number of children one parent may hold.
    pub max_children: usize,
    pub tie_break: TieBreak,
    pub debug: bool,
}

impl Default for OrderConfig {
    fn default() -> Self {
        Self {
            max_children: OrderIndex::CAPACITY,
            tie_break: TieBreak::default(),
            debug: false,
        }
    }
}

impl OrderConfig {
    /// Parse and validate a JSON config document.
    pub fn from_json_str(json: &str) -> Result<Self, InternalError> {
        let config: Self = serde_json::from_str(json)
            .map_err(|err| InternalError::config_unsupported(format!("invalid config: {err}")))?;
        config.validate()?;

        Ok(config)
    }

    pub fn validate(&self) -> Result<(), InternalError> {
        if self.max_children == 0 {
            return Err(InternalError::config_unsupported(
                "max_children must be at least 1",
            ));
        }
        if self.max_children > OrderIndex::CAPACITY {
            return Err(InternalError::config_unsupported(format!(
                "max_children {} exceeds index capacity {}",
                self.max_children,
                OrderIndex::CAPACITY
            )));
        }

        Ok(())
    }

    #[must_use]
    pub const fn with_tie_break(mut self, tie_break: TieBreak) -> Self {
        self.tie_break = tie_break;
        self
    }

    #[must_use]
    pub const fn with_max_children(mut self, max_children: usize) -> Self {
        self.max_children = max_children;
        self
    }
}

///
/// TESTS
///
