//! Core types for interactable
//!
//! This crate maps UI events (kind + key + modifier state) to callbacks registered once
//! during an element's setup, and hands the element a set of named handlers to attach.
//!
//! # Core Concepts
//!
//! - **EventDescriptor**: The structural key a callback is registered under
//! - **InteractionsBuilder**: Setup-phase registry, rejects duplicate registrations
//! - **Interactions**: Frozen registry that dispatches live events
//! - **Bindings**: Handler name -> function forwarding to `dispatch`
//! - **CallbackSet**: Bulk registration with click fallbacks for touch and Enter
//!
//! # Basic Example
//!
//! ```
//! use interactable_core::prelude::*;
//!
//! let mut builder = InteractionsBuilder::<UiEvent>::new();
//! builder
//!     .register_click(|_| println!("clicked"))?
//!     .register_key_down("s", |_| println!("s pressed"))?
//!     .register_key_down_with("s", |_| println!("saved"), KeyOptions::new().ctrl_or_meta(true))?
//!     .register_generic_key_down(|e| println!("typed {:?}", e.key))?;
//!
//! let interactions = builder.build();
//! let bindings = interactions.create_bindings(["onClick", "onKeyDown"]);
//!
//! // The UI runtime calls whichever handler it attached the event to
//! bindings.invoke("onKeyDown", &UiEvent::key_down("s").with_ctrl());
//! # Ok::<(), InteractionError>(())
//! ```
//!
//! # Dispatch Order
//!
//! For keyboard events `dispatch` performs two lookups: the exact key, then the any-key
//! descriptor with the same kind and modifiers. Both callbacks may run for one event,
//! the specific one first. Click and touch events ignore key and modifiers.

pub mod bindings;
pub mod callbacks;
pub mod chord;
pub mod config;
pub mod descriptor;
pub mod error;
pub mod event;
pub mod hash;
pub mod registry;
#[cfg(feature = "crossterm")]
pub mod terminal;
pub mod testing;

// Descriptor exports
pub use descriptor::{EventDescriptor, EventKind, KeyOptions, ModifierState, Modifiers};

// Event exports
pub use event::{describe, AsEventKey, InteractionEvent, UiEvent};

// Registry exports
pub use bindings::{Bindings, ALL_LISTENERS};
pub use callbacks::{throttled, CallbackSet, Throttle};
pub use registry::{Callback, Interactions, InteractionsBuilder};

// Config and errors
pub use config::InteractionsConfig;
pub use error::InteractionError;

pub use chord::{parse_chord, KeyChord};
pub use hash::{simple_hash, try_simple_hash};

// Testing exports
pub use testing::CallRecorder;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::bindings::{Bindings, ALL_LISTENERS};
    pub use crate::callbacks::CallbackSet;
    pub use crate::config::InteractionsConfig;
    pub use crate::descriptor::{EventDescriptor, EventKind, KeyOptions, ModifierState};
    pub use crate::error::InteractionError;
    pub use crate::event::{InteractionEvent, UiEvent};
    pub use crate::registry::{Callback, Interactions, InteractionsBuilder};
}
