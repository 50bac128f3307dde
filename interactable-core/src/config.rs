//! Registry configuration
//!
//! Loaded from JSON so hosts can ship defaults alongside their other settings:
//!
//! ```json
//! {
//!   "default_modifiers": { "ctrl_or_meta": false, "shift": false },
//!   "listeners": ["onClick", "onKeyUp"]
//! }
//! ```
//!
//! Every field is optional.

use serde::{Deserialize, Serialize};

use crate::bindings::ALL_LISTENERS;
use crate::descriptor::ModifierState;
use crate::error::InteractionError;

/// Settings applied by [`InteractionsBuilder::with_config`](crate::InteractionsBuilder::with_config)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct InteractionsConfig {
    /// Modifier state assumed by key registrations made without options
    pub default_modifiers: ModifierState,
    /// Handler names produced by `create_default_bindings`
    pub listeners: Vec<String>,
}

impl Default for InteractionsConfig {
    fn default() -> Self {
        Self {
            default_modifiers: ModifierState::default(),
            listeners: ALL_LISTENERS.iter().map(|s| (*s).to_string()).collect(),
        }
    }
}

impl InteractionsConfig {
    /// Parse a JSON document; missing fields keep their defaults
    pub fn from_json(json: &str) -> Result<Self, InteractionError> {
        Ok(serde_json::from_str(json)?)
    }
}
