//! Test utilities for code built on interactable
//!
//! - [`click`], [`key_down`], [`key_up`], [`touch_start`], [`touch_end`]: build
//!   [`UiEvent`]s, keyboard ones from chord strings (e.g. `key_down("ctrl+s")`)
//! - [`CallRecorder`]: hands out labelled callbacks and records which ones ran
//! - Assertion macros for verifying fired callbacks
//!
//! # Example
//!
//! ```
//! use interactable_core::testing::{key_down, CallRecorder};
//! use interactable_core::{InteractionsBuilder, UiEvent};
//!
//! let recorder = CallRecorder::new();
//! let mut builder = InteractionsBuilder::<UiEvent>::new();
//! builder.register_key_down_with(
//!     "s",
//!     recorder.callback("save"),
//!     interactable_core::KeyOptions::new().ctrl_or_meta(true),
//! )?;
//! let interactions = builder.build();
//!
//! interactions.dispatch(&key_down("ctrl+s"));
//! assert_eq!(recorder.calls(), vec!["save"]);
//! # Ok::<(), interactable_core::InteractionError>(())
//! ```

use std::cell::RefCell;
use std::rc::Rc;

use crate::chord::parse_chord;
use crate::descriptor::EventKind;
use crate::event::UiEvent;

/// A click event
pub fn click() -> UiEvent {
    UiEvent::click()
}

pub fn touch_start() -> UiEvent {
    UiEvent::touch_start()
}

pub fn touch_end() -> UiEvent {
    UiEvent::touch_end()
}

/// A key-down event from a chord string
///
/// The ctrl-or-meta modifier is reported as `ctrlKey`.
///
/// # Panics
///
/// Panics if the chord cannot be parsed.
pub fn key_down(chord: &str) -> UiEvent {
    keyboard(EventKind::KeyDown, chord)
}

/// A key-up event from a chord string
///
/// # Panics
///
/// Panics if the chord cannot be parsed.
pub fn key_up(chord: &str) -> UiEvent {
    keyboard(EventKind::KeyUp, chord)
}

fn keyboard(kind: EventKind, chord: &str) -> UiEvent {
    let parsed = parse_chord(chord).unwrap_or_else(|| panic!("Invalid key chord: {:?}", chord));
    UiEvent {
        ctrl_key: parsed.modifiers.ctrl_or_meta(),
        shift_key: parsed.modifiers.shift(),
        ..UiEvent::keyboard(kind, parsed.key)
    }
}

/// Records which labelled callbacks ran, in order
///
/// Clones share the same log.
#[derive(Debug, Clone, Default)]
pub struct CallRecorder {
    calls: Rc<RefCell<Vec<String>>>,
}

impl CallRecorder {
    pub fn new() -> Self {
        Self::default()
    }

    /// A callback that appends `label` to the log each time it runs
    pub fn callback<E>(&self, label: &str) -> Box<dyn Fn(&E)> {
        let calls = Rc::clone(&self.calls);
        let label = label.to_string();
        Box::new(move |_: &E| calls.borrow_mut().push(label.clone()))
    }

    /// Labels recorded so far
    pub fn calls(&self) -> Vec<String> {
        self.calls.borrow().clone()
    }

    /// Drain the log
    pub fn take(&self) -> Vec<String> {
        std::mem::take(&mut *self.calls.borrow_mut())
    }

    /// How many times `label` was recorded
    pub fn count(&self, label: &str) -> usize {
        self.calls.borrow().iter().filter(|c| *c == label).count()
    }

    pub fn len(&self) -> usize {
        self.calls.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.calls.borrow().is_empty()
    }
}

/// Assert that a labelled callback ran.
///
/// # Example
///
/// ```
/// use interactable_core::{assert_fired, testing::CallRecorder};
///
/// let recorder = CallRecorder::new();
/// recorder.callback::<()>("save")(&());
/// assert_fired!(recorder, "save");
/// ```
#[macro_export]
macro_rules! assert_fired {
    ($recorder:expr, $label:expr) => {
        assert!(
            $recorder.count($label) > 0,
            "Expected callback `{}` to fire, but got: {:?}",
            $label,
            $recorder.calls()
        );
    };
    ($recorder:expr, $label:expr, $times:expr) => {
        assert_eq!(
            $recorder.count($label),
            $times,
            "Expected callback `{}` to fire {} time(s), log: {:?}",
            $label,
            $times,
            $recorder.calls()
        );
    };
}

/// Assert that a labelled callback did NOT run.
#[macro_export]
macro_rules! assert_not_fired {
    ($recorder:expr, $label:expr) => {
        assert!(
            $recorder.count($label) == 0,
            "Expected callback `{}` NOT to fire, but it did: {:?}",
            $label,
            $recorder.calls()
        );
    };
}

/// Count how many times a labelled callback ran.
#[macro_export]
macro_rules! count_fired {
    ($recorder:expr, $label:expr) => {
        $recorder.count($label)
    };
}
