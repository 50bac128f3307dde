//! Bulk registration from a set of optional callbacks, and callback wrappers

use std::cell::Cell;
use std::fmt;
use std::rc::Rc;
use std::time::{Duration, Instant};

use crate::descriptor::{EventDescriptor, EventKind, Modifiers};
use crate::error::InteractionError;
use crate::event::UiEvent;
use crate::registry::{Callback, Interactions, InteractionsBuilder};

/// The optional handlers an interactive element accepts
///
/// `on_key_down` and `on_key_up` fire for any key. When `on_click` is set it also stands
/// in for `on_touch_end` and `on_enter` unless those are given.
///
/// ```
/// use interactable_core::{CallbackSet, Interactions, UiEvent};
/// use std::cell::Cell;
/// use std::rc::Rc;
///
/// let hits = Rc::new(Cell::new(0));
/// let counter = Rc::clone(&hits);
///
/// let interactions: Interactions =
///     CallbackSet::new().on_click(move |_: &UiEvent| counter.set(counter.get() + 1)).build();
///
/// interactions.dispatch(&UiEvent::click());
/// interactions.dispatch(&UiEvent::touch_end());
/// interactions.dispatch(&UiEvent::key_up("Enter"));
/// assert_eq!(hits.get(), 3);
/// ```
pub struct CallbackSet<E = UiEvent> {
    pub on_click: Option<Callback<E>>,
    pub on_enter: Option<Callback<E>>,
    pub on_key_down: Option<Callback<E>>,
    pub on_key_up: Option<Callback<E>>,
    pub on_touch_start: Option<Callback<E>>,
    pub on_touch_end: Option<Callback<E>>,
}

impl<E> Default for CallbackSet<E> {
    fn default() -> Self {
        Self {
            on_click: None,
            on_enter: None,
            on_key_down: None,
            on_key_up: None,
            on_touch_start: None,
            on_touch_end: None,
        }
    }
}

impl<E> fmt::Debug for CallbackSet<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CallbackSet")
            .field("on_click", &self.on_click.is_some())
            .field("on_enter", &self.on_enter.is_some())
            .field("on_key_down", &self.on_key_down.is_some())
            .field("on_key_up", &self.on_key_up.is_some())
            .field("on_touch_start", &self.on_touch_start.is_some())
            .field("on_touch_end", &self.on_touch_end.is_some())
            .finish()
    }
}

impl<E> CallbackSet<E> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn on_click(mut self, f: impl Fn(&E) + 'static) -> Self {
        self.on_click = Some(Rc::new(f));
        self
    }

    pub fn on_enter(mut self, f: impl Fn(&E) + 'static) -> Self {
        self.on_enter = Some(Rc::new(f));
        self
    }

    pub fn on_key_down(mut self, f: impl Fn(&E) + 'static) -> Self {
        self.on_key_down = Some(Rc::new(f));
        self
    }

    pub fn on_key_up(mut self, f: impl Fn(&E) + 'static) -> Self {
        self.on_key_up = Some(Rc::new(f));
        self
    }

    pub fn on_touch_start(mut self, f: impl Fn(&E) + 'static) -> Self {
        self.on_touch_start = Some(Rc::new(f));
        self
    }

    pub fn on_touch_end(mut self, f: impl Fn(&E) + 'static) -> Self {
        self.on_touch_end = Some(Rc::new(f));
        self
    }

    /// Descriptor/callback pairs after applying the click fallbacks
    fn resolve(self) -> Vec<(EventDescriptor, Callback<E>)> {
        let mut on_touch_end = self.on_touch_end;
        let mut on_enter = self.on_enter;
        if let Some(click) = &self.on_click {
            if on_touch_end.is_none() {
                on_touch_end = Some(Rc::clone(click));
            }
            if on_enter.is_none() {
                on_enter = Some(Rc::clone(click));
            }
        }

        let any_key = |kind| EventDescriptor::keyed(kind, "", Modifiers::empty());
        [
            (EventDescriptor::new(EventKind::Click), self.on_click),
            (
                EventDescriptor::keyed(EventKind::KeyUp, "enter", Modifiers::empty()),
                on_enter,
            ),
            (any_key(EventKind::KeyDown), self.on_key_down),
            (any_key(EventKind::KeyUp), self.on_key_up),
            (EventDescriptor::new(EventKind::TouchStart), self.on_touch_start),
            (EventDescriptor::new(EventKind::TouchEnd), on_touch_end),
        ]
        .into_iter()
        .filter_map(|(descriptor, callback)| callback.map(|cb| (descriptor, cb)))
        .collect()
    }

    /// Register every present callback on an existing builder
    ///
    /// Fails on the first descriptor the builder already has a handler for.
    pub fn register_into(
        self,
        builder: &mut InteractionsBuilder<E>,
    ) -> Result<(), InteractionError> {
        for (descriptor, callback) in self.resolve() {
            builder.register(descriptor, callback)?;
        }
        Ok(())
    }

    /// Build a fresh registry holding exactly these callbacks
    pub fn build(self) -> Interactions<E> {
        let mut builder = InteractionsBuilder::new();
        // Every entry of `resolve` has its own descriptor
        for (descriptor, callback) in self.resolve() {
            builder.insert_distinct(descriptor, callback);
        }
        builder.build()
    }
}

impl<E> Interactions<E> {
    /// Build a registry from a callback set, applying the click fallbacks
    pub fn from_callbacks(callbacks: CallbackSet<E>) -> Self {
        callbacks.build()
    }
}

/// A throttle window that several callbacks can share
///
/// Every wrapper handed out by one `Throttle` (or a clone of it) draws from the same
/// window: once any of them fires, all of them are blocked until `window` has passed.
/// The window starts when the `Throttle` is created, so a call arriving sooner than
/// `window` afterwards is dropped too. A zero window lets every call through.
///
/// ```
/// use interactable_core::callbacks::Throttle;
/// use std::time::Duration;
///
/// let save_throttle = Throttle::new(Duration::from_secs(60));
/// let from_button = save_throttle.wrap(|_: &()| println!("saved"));
/// let from_shortcut = save_throttle.wrap(|_: &()| println!("saved"));
///
/// // Neither fires inside the first minute
/// from_button(&());
/// from_shortcut(&());
/// ```
#[derive(Clone)]
pub struct Throttle {
    window: Duration,
    last_fired: Rc<Cell<Instant>>,
    clock: Rc<dyn Fn() -> Instant>,
}

impl fmt::Debug for Throttle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Throttle")
            .field("window", &self.window)
            .field("last_fired", &self.last_fired.get())
            .finish()
    }
}

impl Throttle {
    pub fn new(window: Duration) -> Self {
        Self::with_clock(window, Rc::new(Instant::now))
    }

    fn with_clock(window: Duration, clock: Rc<dyn Fn() -> Instant>) -> Self {
        Self {
            window,
            last_fired: Rc::new(Cell::new(clock())),
            clock,
        }
    }

    pub fn window(&self) -> Duration {
        self.window
    }

    /// Claim the window if it has elapsed
    ///
    /// Returns `true`, and restarts the window, when a call may go through now.
    pub fn try_fire(&self) -> bool {
        let now = (self.clock)();
        if self.window.is_zero() || now.duration_since(self.last_fired.get()) > self.window {
            self.last_fired.set(now);
            true
        } else {
            false
        }
    }

    /// Wrap a callback so it only runs when this window allows it
    pub fn wrap<E: 'static>(&self, f: impl Fn(&E) + 'static) -> impl Fn(&E) + 'static {
        let throttle = self.clone();
        move |event: &E| {
            if throttle.try_fire() {
                f(event);
            }
        }
    }
}

/// Wrap a callback so it fires at most once per `window`
///
/// Shorthand for a [`Throttle`] used by a single callback.
///
/// ```
/// use interactable_core::callbacks::throttled;
/// use std::cell::Cell;
/// use std::rc::Rc;
/// use std::time::Duration;
///
/// let hits = Rc::new(Cell::new(0));
/// let counter = Rc::clone(&hits);
/// let save = throttled(Duration::from_secs(60), move |_: &()| counter.set(counter.get() + 1));
///
/// save(&());
/// assert_eq!(hits.get(), 0);
/// ```
pub fn throttled<E: 'static>(
    window: Duration,
    f: impl Fn(&E) + 'static,
) -> impl Fn(&E) + 'static {
    Throttle::new(window).wrap(f)
}
