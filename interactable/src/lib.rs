//! interactable: register UI interaction callbacks once, dispatch live events to them
//!
//! An element registers its click, keyboard and touch callbacks during setup, then asks
//! for named bindings (`onClick`, `onKeyDown`, ...) to attach to the UI runtime. Every
//! binding forwards to the same dispatch, which picks the callback(s) from the live
//! event's type, key and modifier state.
//!
//! # Example
//! ```
//! use interactable::prelude::*;
//!
//! let mut builder = InteractionsBuilder::<UiEvent>::new();
//! builder
//!     .register_key_down_with("s", |_| println!("saved"), KeyOptions::new().ctrl_or_meta(true))?
//!     .register_key_down("s", |_| println!("typed s"))?;
//!
//! let bindings = builder.build().create_default_bindings();
//! bindings.invoke("onKeyDown", &UiEvent::key_down("s").with_meta());
//! # Ok::<(), InteractionError>(())
//! ```
//!
//! Custom event types implement [`InteractionEvent`], by hand or with the derive:
//!
//! ```
//! use interactable::prelude::*;
//!
//! #[derive(InteractionEvent)]
//! struct Key {
//!     #[event(kind)]
//!     kind: &'static str,
//!     #[event(key)]
//!     key: char,
//!     #[event(ctrl)]
//!     ctrl: bool,
//! }
//!
//! let descriptor = interactable::describe(&Key { kind: "keydown", key: 'S', ctrl: true });
//! assert_eq!(descriptor.map(|d| d.to_string()).as_deref(), Some("keydown ctrl+s"));
//! ```

// Re-export everything from core
pub use interactable_core::*;

// Re-export derive macros
pub use interactable_macros::InteractionEvent;

/// Prelude for convenient imports
pub mod prelude {
    // Traits
    pub use interactable_core::{AsEventKey, InteractionEvent};

    // Registry
    pub use interactable_core::{
        Bindings, Callback, CallbackSet, Interactions, InteractionsBuilder, ALL_LISTENERS,
    };

    // Descriptors and events
    pub use interactable_core::{EventDescriptor, EventKind, KeyOptions, ModifierState, UiEvent};

    // Config and errors
    pub use interactable_core::{InteractionError, InteractionsConfig};

    // Derive macros
    pub use interactable_macros::InteractionEvent;
}
