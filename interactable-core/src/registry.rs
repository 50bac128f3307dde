//! Interaction registry: register callbacks once, then dispatch live events to them
//!
//! Registration happens on an [`InteractionsBuilder`]. [`InteractionsBuilder::build`]
//! freezes the table into an [`Interactions`], which can only dispatch. A registry
//! cannot be changed after its first dispatch.

use std::collections::HashMap;
use std::fmt;
use std::rc::Rc;

use tracing::{debug, trace, warn};

use crate::bindings::{Bindings, ALL_LISTENERS};
use crate::chord::parse_chord;
use crate::config::InteractionsConfig;
use crate::descriptor::{EventDescriptor, EventKind, KeyOptions, ModifierState};
use crate::error::InteractionError;
use crate::event::{describe, InteractionEvent, UiEvent};

/// A registered callback
///
/// Reference counted so one closure can serve several descriptors (a click handler that
/// also answers Enter and touch-end, for instance).
pub type Callback<E> = Rc<dyn Fn(&E)>;

type HandlerTable<E> = HashMap<EventDescriptor, Callback<E>>;

/// Setup-phase registry
///
/// # Example
/// ```
/// use interactable_core::{InteractionsBuilder, KeyOptions, UiEvent};
///
/// let mut builder = InteractionsBuilder::<UiEvent>::new();
/// builder
///     .register_click(|_| println!("clicked"))?
///     .register_key_down_with("s", |_| println!("saved"), KeyOptions::new().ctrl_or_meta(true))?;
///
/// // Same descriptor twice is a programming error
/// assert!(builder.register_click(|_| {}).is_err());
///
/// let interactions = builder.build();
/// interactions.dispatch(&UiEvent::key_down("s").with_ctrl());
/// # Ok::<(), interactable_core::InteractionError>(())
/// ```
pub struct InteractionsBuilder<E = UiEvent> {
    handlers: HandlerTable<E>,
    default_modifiers: ModifierState,
    listeners: Vec<String>,
}

impl<E> Default for InteractionsBuilder<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E> fmt::Debug for InteractionsBuilder<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("InteractionsBuilder")
            .field("descriptors", &self.handlers.keys().collect::<Vec<_>>())
            .field("default_modifiers", &self.default_modifiers)
            .finish()
    }
}

impl<E> InteractionsBuilder<E> {
    /// Create an empty builder with no modifiers assumed by default
    pub fn new() -> Self {
        Self {
            handlers: HashMap::new(),
            default_modifiers: ModifierState::default(),
            listeners: default_listeners(),
        }
    }

    /// Apply a loaded configuration
    pub fn with_config(mut self, config: &InteractionsConfig) -> Self {
        self.default_modifiers = config.default_modifiers;
        self.listeners = config.listeners.clone();
        self
    }

    /// Modifier state used by key registrations that pass no options
    pub fn with_default_modifiers(mut self, modifiers: ModifierState) -> Self {
        self.default_modifiers = modifiers;
        self
    }

    pub fn default_modifiers(&self) -> ModifierState {
        self.default_modifiers
    }

    /// Register a shared callback under an explicit descriptor
    ///
    /// All `register_*` helpers funnel through here. Fails without touching the table
    /// when the descriptor is already taken.
    pub fn register(
        &mut self,
        descriptor: EventDescriptor,
        callback: Callback<E>,
    ) -> Result<&mut Self, InteractionError> {
        if self.handlers.contains_key(&descriptor) {
            warn!(
                descriptor = %descriptor,
                encoded = %descriptor.encode(),
                "Rejected duplicate interaction registration"
            );
            return Err(InteractionError::duplicate(&descriptor));
        }
        debug!(
            kind = %descriptor.kind(),
            key = descriptor.key(),
            ctrl_or_meta = descriptor.modifiers().ctrl_or_meta(),
            shift = descriptor.modifiers().shift(),
            encoded = %descriptor.encode(),
            "Registered interaction"
        );
        self.handlers.insert(descriptor, callback);
        Ok(self)
    }

    /// Register a click handler
    pub fn register_click(
        &mut self,
        f: impl Fn(&E) + 'static,
    ) -> Result<&mut Self, InteractionError> {
        self.register(EventDescriptor::new(EventKind::Click), Rc::new(f))
    }

    /// Register a key-down handler for `key` with the default modifier state
    pub fn register_key_down(
        &mut self,
        key: &str,
        f: impl Fn(&E) + 'static,
    ) -> Result<&mut Self, InteractionError> {
        self.register_key_down_with(key, f, KeyOptions::default())
    }

    /// Register a key-down handler for `key` with explicit modifiers
    pub fn register_key_down_with(
        &mut self,
        key: &str,
        f: impl Fn(&E) + 'static,
        options: KeyOptions,
    ) -> Result<&mut Self, InteractionError> {
        let descriptor = self.key_descriptor(EventKind::KeyDown, key, options);
        self.register(descriptor, Rc::new(f))
    }

    /// Register a key-up handler for `key` with the default modifier state
    pub fn register_key_up(
        &mut self,
        key: &str,
        f: impl Fn(&E) + 'static,
    ) -> Result<&mut Self, InteractionError> {
        self.register_key_up_with(key, f, KeyOptions::default())
    }

    /// Register a key-up handler for `key` with explicit modifiers
    pub fn register_key_up_with(
        &mut self,
        key: &str,
        f: impl Fn(&E) + 'static,
        options: KeyOptions,
    ) -> Result<&mut Self, InteractionError> {
        let descriptor = self.key_descriptor(EventKind::KeyUp, key, options);
        self.register(descriptor, Rc::new(f))
    }

    /// Register an Enter key-up handler
    pub fn register_enter(
        &mut self,
        f: impl Fn(&E) + 'static,
    ) -> Result<&mut Self, InteractionError> {
        self.register_key_up("enter", f)
    }

    pub fn register_enter_with(
        &mut self,
        f: impl Fn(&E) + 'static,
        options: KeyOptions,
    ) -> Result<&mut Self, InteractionError> {
        self.register_key_up_with("enter", f, options)
    }

    /// Register a key-down handler that fires for any key
    ///
    /// It runs after the key-specific handler, if any, for key-down events whose modifier
    /// state matches the default.
    pub fn register_generic_key_down(
        &mut self,
        f: impl Fn(&E) + 'static,
    ) -> Result<&mut Self, InteractionError> {
        self.register_key_down("", f)
    }

    pub fn register_touch_start(
        &mut self,
        f: impl Fn(&E) + 'static,
    ) -> Result<&mut Self, InteractionError> {
        self.register(EventDescriptor::new(EventKind::TouchStart), Rc::new(f))
    }

    pub fn register_touch_end(
        &mut self,
        f: impl Fn(&E) + 'static,
    ) -> Result<&mut Self, InteractionError> {
        self.register(EventDescriptor::new(EventKind::TouchEnd), Rc::new(f))
    }

    /// Register a keyboard handler from a chord string such as `"ctrl+shift+s"`
    ///
    /// The chord's modifiers are used as given; the default modifier state does not apply.
    pub fn register_chord(
        &mut self,
        kind: EventKind,
        chord: &str,
        f: impl Fn(&E) + 'static,
    ) -> Result<&mut Self, InteractionError> {
        if !kind.is_keyboard() {
            return Err(InteractionError::InvalidArgument(format!(
                "chords only apply to keyboard events, got {kind}"
            )));
        }
        let parsed = parse_chord(chord).ok_or_else(|| {
            InteractionError::InvalidArgument(format!("unrecognized key chord {chord:?}"))
        })?;
        let descriptor = EventDescriptor::keyed(kind, &parsed.key, parsed.modifiers);
        self.register(descriptor, Rc::new(f))
    }

    /// Whether a callback is registered under `descriptor`
    pub fn is_registered(&self, descriptor: &EventDescriptor) -> bool {
        self.handlers.contains_key(descriptor)
    }

    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }

    /// Freeze the table
    pub fn build(self) -> Interactions<E> {
        debug!(handlers = self.handlers.len(), "Interactions built");
        Interactions {
            handlers: Rc::new(self.handlers),
            listeners: self.listeners.into(),
        }
    }

    fn key_descriptor(&self, kind: EventKind, key: &str, options: KeyOptions) -> EventDescriptor {
        EventDescriptor::keyed(kind, key, options.resolve(self.default_modifiers))
    }

    pub(crate) fn insert_distinct(&mut self, descriptor: EventDescriptor, callback: Callback<E>) {
        debug_assert!(!self.handlers.contains_key(&descriptor));
        self.handlers.insert(descriptor, callback);
    }
}

/// Frozen registry, ready for dispatch
///
/// Cloning is cheap and shares the table; bindings hold such clones.
pub struct Interactions<E = UiEvent> {
    handlers: Rc<HandlerTable<E>>,
    listeners: Rc<[String]>,
}

impl<E> Clone for Interactions<E> {
    fn clone(&self) -> Self {
        Self {
            handlers: Rc::clone(&self.handlers),
            listeners: Rc::clone(&self.listeners),
        }
    }
}

impl<E> fmt::Debug for Interactions<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Interactions")
            .field("descriptors", &self.handlers.keys().collect::<Vec<_>>())
            .field("listeners", &self.listeners)
            .finish()
    }
}

impl<E> Interactions<E> {
    /// Start a new registry
    pub fn builder() -> InteractionsBuilder<E> {
        InteractionsBuilder::new()
    }

    pub fn is_registered(&self, descriptor: &EventDescriptor) -> bool {
        self.handlers.contains_key(descriptor)
    }

    /// All descriptors with a registered callback, in no particular order
    pub fn descriptors(&self) -> impl Iterator<Item = &EventDescriptor> {
        self.handlers.keys()
    }

    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }

    /// Handler names used by [`create_default_bindings`](Self::create_default_bindings)
    pub fn listeners(&self) -> &[String] {
        &self.listeners
    }
}

impl<E: InteractionEvent> Interactions<E> {
    /// Invoke the callbacks matching a live event
    ///
    /// Looks up the exact descriptor first. For keyboard events it then looks up the
    /// any-key descriptor with the same kind and modifiers, so up to two callbacks run,
    /// specific before generic. Unmatched and unknown events are ignored.
    pub fn dispatch(&self, event: &E) {
        let Some(descriptor) = describe(event) else {
            trace!(event_type = event.event_type(), "Ignoring unhandled event type");
            return;
        };

        self.invoke(&descriptor, event);

        if descriptor.kind().is_keyboard() && !descriptor.is_wildcard() {
            self.invoke(&descriptor.wildcard(), event);
        }
    }

    fn invoke(&self, descriptor: &EventDescriptor, event: &E) {
        match self.handlers.get(descriptor) {
            Some(callback) => {
                trace!(descriptor = %descriptor, "Invoking interaction handler");
                callback(event);
            }
            None => trace!(descriptor = %descriptor, "No interaction handler"),
        }
    }
}

impl<E: InteractionEvent + 'static> Interactions<E> {
    /// Named handlers that all forward to [`dispatch`](Self::dispatch)
    ///
    /// ```
    /// use interactable_core::{Interactions, UiEvent};
    /// use std::cell::Cell;
    /// use std::rc::Rc;
    ///
    /// let clicks = Rc::new(Cell::new(0));
    /// let counter = Rc::clone(&clicks);
    ///
    /// let mut builder = Interactions::<UiEvent>::builder();
    /// builder.register_click(move |_| counter.set(counter.get() + 1))?;
    /// let bindings = builder.build().create_bindings(["onClick", "onKeyUp"]);
    ///
    /// bindings.invoke("onClick", &UiEvent::click());
    /// // Names only decide attachment; the event type decides the handler
    /// bindings.invoke("onKeyUp", &UiEvent::click());
    /// assert_eq!(clicks.get(), 2);
    /// # Ok::<(), interactable_core::InteractionError>(())
    /// ```
    pub fn create_bindings<I, S>(&self, names: I) -> Bindings<E>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Bindings::new(self, names)
    }

    /// Bindings for every configured listener name
    pub fn create_default_bindings(&self) -> Bindings<E> {
        Bindings::new(self, self.listeners.iter().cloned())
    }
}

fn default_listeners() -> Vec<String> {
    ALL_LISTENERS.iter().map(|name| (*name).to_string()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::descriptor::Modifiers;
    use crate::testing::CallRecorder;

    #[test]
    fn test_click_fires_once() {
        let recorder = CallRecorder::new();
        let mut builder = InteractionsBuilder::<UiEvent>::new();
        builder.register_click(recorder.callback("click")).unwrap();
        let interactions = builder.build();

        interactions.dispatch(&UiEvent::click());

        assert_eq!(recorder.calls(), vec!["click"]);
    }

    #[test]
    fn test_duplicate_click_keeps_first() {
        let recorder = CallRecorder::new();
        let mut builder = InteractionsBuilder::<UiEvent>::new();
        builder.register_click(recorder.callback("f")).unwrap();

        let err = builder.register_click(recorder.callback("g")).unwrap_err();
        assert!(err.is_duplicate());
        assert_eq!(builder.len(), 1);

        builder.build().dispatch(&UiEvent::click());
        assert_eq!(recorder.calls(), vec!["f"]);
    }

    #[test]
    fn test_keyed_click_collides_with_plain_click() {
        let recorder = CallRecorder::new();
        let mut builder = InteractionsBuilder::<UiEvent>::new();
        builder.register_click(recorder.callback("plain")).unwrap();

        let keyed = EventDescriptor::keyed(EventKind::Click, "x", Modifiers::CTRL_OR_META);
        let err = builder
            .register(keyed, Rc::new(recorder.callback::<UiEvent>("keyed")))
            .unwrap_err();
        assert!(matches!(err, InteractionError::DuplicateRegistration { .. }));
        assert_eq!(builder.len(), 1);

        builder.build().dispatch(&UiEvent::click().with_ctrl());
        assert_eq!(recorder.calls(), vec!["plain"]);
    }

    #[test]
    fn test_distinct_descriptors_both_register() {
        let mut builder = InteractionsBuilder::<UiEvent>::new();
        builder
            .register_key_down("s", |_| {})
            .unwrap()
            .register_key_down_with("s", |_| {}, KeyOptions::new().ctrl_or_meta(true))
            .unwrap()
            .register_key_up("s", |_| {})
            .unwrap();
        assert_eq!(builder.len(), 3);
    }

    #[test]
    fn test_key_case_is_normalized_for_duplicates() {
        let mut builder = InteractionsBuilder::<UiEvent>::new();
        builder.register_key_up("Enter", |_| {}).unwrap();
        assert!(builder.register_enter(|_| {}).unwrap_err().is_duplicate());
    }

    #[test]
    fn test_ctrl_and_plain_are_separate() {
        let recorder = CallRecorder::new();
        let mut builder = InteractionsBuilder::<UiEvent>::new();
        builder
            .register_key_down("s", recorder.callback("f1"))
            .unwrap()
            .register_key_down_with(
                "s",
                recorder.callback("f2"),
                KeyOptions::new().ctrl_or_meta(true),
            )
            .unwrap();
        let interactions = builder.build();

        interactions.dispatch(&UiEvent::key_down("s"));
        assert_eq!(recorder.take(), vec!["f1"]);

        interactions.dispatch(&UiEvent::key_down("s").with_ctrl());
        assert_eq!(recorder.take(), vec!["f2"]);
    }

    #[test]
    fn test_specific_then_generic() {
        let recorder = CallRecorder::new();
        let mut builder = InteractionsBuilder::<UiEvent>::new();
        builder
            .register_generic_key_down(recorder.callback("generic"))
            .unwrap()
            .register_key_down("d", recorder.callback("specific"))
            .unwrap();
        let interactions = builder.build();

        interactions.dispatch(&UiEvent::key_down("d"));
        assert_eq!(recorder.take(), vec!["specific", "generic"]);

        interactions.dispatch(&UiEvent::key_down("x"));
        assert_eq!(recorder.take(), vec!["generic"]);
    }

    #[test]
    fn test_generic_respects_modifiers() {
        let recorder = CallRecorder::new();
        let mut builder = InteractionsBuilder::<UiEvent>::new();
        builder
            .register_generic_key_down(recorder.callback("generic"))
            .unwrap();
        let interactions = builder.build();

        interactions.dispatch(&UiEvent::key_down("x").with_shift());
        assert!(recorder.is_empty());
    }

    #[test]
    fn test_empty_live_key_fires_generic_once() {
        let recorder = CallRecorder::new();
        let mut builder = InteractionsBuilder::<UiEvent>::new();
        builder
            .register_generic_key_down(recorder.callback("generic"))
            .unwrap();
        builder.build().dispatch(&UiEvent::new("keydown"));
        assert_eq!(recorder.calls(), vec!["generic"]);
    }

    #[test]
    fn test_unmatched_dispatch_is_noop() {
        let recorder = CallRecorder::new();
        let mut builder = InteractionsBuilder::<UiEvent>::new();
        builder.register_click(recorder.callback("click")).unwrap();
        let interactions = builder.build();

        interactions.dispatch(&UiEvent::touch_start());
        interactions.dispatch(&UiEvent::key_up("q"));
        interactions.dispatch(&UiEvent::new("scroll"));

        assert!(recorder.is_empty());
    }

    #[test]
    fn test_enter_with_ctrl_only_matches_ctrl() {
        let recorder = CallRecorder::new();
        let mut builder = InteractionsBuilder::<UiEvent>::new();
        builder
            .register_enter_with(
                recorder.callback("ctrl-enter"),
                KeyOptions::new().ctrl_or_meta(true),
            )
            .unwrap();
        let interactions = builder.build();

        interactions.dispatch(&UiEvent::key_up("Enter"));
        interactions.dispatch(&UiEvent::key_up("Enter").with_meta());

        assert_eq!(recorder.calls(), vec!["ctrl-enter"]);
    }

    #[test]
    fn test_default_modifiers_apply_to_key_registrations() {
        let mut builder = InteractionsBuilder::<UiEvent>::new().with_default_modifiers(
            ModifierState {
                ctrl_or_meta: true,
                shift: false,
            },
        );
        builder.register_key_down("k", |_| {}).unwrap();
        builder.register_click(|_| {}).unwrap();

        let interactions = builder.build();
        assert!(interactions.is_registered(&EventDescriptor::keyed(
            EventKind::KeyDown,
            "k",
            Modifiers::CTRL_OR_META
        )));
        assert!(interactions.is_registered(&EventDescriptor::new(EventKind::Click)));
    }

    #[test]
    fn test_register_chord() {
        let recorder = CallRecorder::new();
        let mut builder = InteractionsBuilder::<UiEvent>::new();
        builder
            .register_chord(EventKind::KeyDown, "ctrl+shift+z", recorder.callback("redo"))
            .unwrap();
        let interactions = builder.build();

        interactions.dispatch(&UiEvent::key_down("Z").with_ctrl());
        interactions.dispatch(&UiEvent::key_down("Z").with_ctrl().with_shift());

        assert_eq!(recorder.calls(), vec!["redo"]);
    }

    #[test]
    fn test_register_chord_rejects_bad_input() {
        let mut builder = InteractionsBuilder::<UiEvent>::new();
        let err = builder
            .register_chord(EventKind::KeyDown, "alt+x", |_| {})
            .unwrap_err();
        assert!(matches!(err, InteractionError::InvalidArgument(_)));

        let err = builder
            .register_chord(EventKind::Click, "x", |_| {})
            .unwrap_err();
        assert!(matches!(err, InteractionError::InvalidArgument(_)));
        assert!(builder.is_empty());
    }

    #[test]
    fn test_touch_registrations() {
        let recorder = CallRecorder::new();
        let mut builder = InteractionsBuilder::<UiEvent>::new();
        builder
            .register_touch_start(recorder.callback("start"))
            .unwrap()
            .register_touch_end(recorder.callback("end"))
            .unwrap();
        assert!(builder
            .register_touch_end(recorder.callback("again"))
            .unwrap_err()
            .is_duplicate());

        let interactions = builder.build();
        interactions.dispatch(&UiEvent::touch_start());
        interactions.dispatch(&UiEvent::touch_end());

        assert_eq!(recorder.calls(), vec!["start", "end"]);
    }
}
