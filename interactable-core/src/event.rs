//! Live events as seen by a registry

use serde::{Deserialize, Serialize};
use std::borrow::Cow;

use crate::descriptor::{EventDescriptor, EventKind, Modifiers};

/// Anything a UI runtime can hand to [`Interactions::dispatch`](crate::Interactions::dispatch)
///
/// Mirrors the DOM event surface the registry reads: `type`, and for keyboard events
/// `key`, `ctrlKey`, `metaKey` and `shiftKey`. Implement it by hand, or use
/// `#[derive(InteractionEvent)]` from `interactable-macros`.
///
/// # Example
/// ```
/// use interactable_core::InteractionEvent;
///
/// struct Tap;
///
/// impl InteractionEvent for Tap {
///     fn event_type(&self) -> &str {
///         "touchend"
///     }
/// }
/// ```
pub trait InteractionEvent {
    /// DOM event type, e.g. `"click"` or `"keyup"`
    fn event_type(&self) -> &str;

    /// Key value for keyboard events
    fn key(&self) -> Option<Cow<'_, str>> {
        None
    }

    fn ctrl_key(&self) -> bool {
        false
    }

    fn meta_key(&self) -> bool {
        false
    }

    fn shift_key(&self) -> bool {
        false
    }
}

impl<E: InteractionEvent + ?Sized> InteractionEvent for &E {
    fn event_type(&self) -> &str {
        (**self).event_type()
    }

    fn key(&self) -> Option<Cow<'_, str>> {
        (**self).key()
    }

    fn ctrl_key(&self) -> bool {
        (**self).ctrl_key()
    }

    fn meta_key(&self) -> bool {
        (**self).meta_key()
    }

    fn shift_key(&self) -> bool {
        (**self).shift_key()
    }
}

/// Field types usable as the key of a derived [`InteractionEvent`]
pub trait AsEventKey {
    fn as_event_key(&self) -> Option<Cow<'_, str>>;
}

impl AsEventKey for str {
    fn as_event_key(&self) -> Option<Cow<'_, str>> {
        Some(Cow::Borrowed(self))
    }
}

impl AsEventKey for String {
    fn as_event_key(&self) -> Option<Cow<'_, str>> {
        Some(Cow::Borrowed(self.as_str()))
    }
}

impl AsEventKey for char {
    fn as_event_key(&self) -> Option<Cow<'_, str>> {
        Some(Cow::Owned(self.to_string()))
    }
}

impl<T: AsEventKey + ?Sized> AsEventKey for &T {
    fn as_event_key(&self) -> Option<Cow<'_, str>> {
        (**self).as_event_key()
    }
}

impl<T: AsEventKey> AsEventKey for Option<T> {
    fn as_event_key(&self) -> Option<Cow<'_, str>> {
        self.as_ref().and_then(AsEventKey::as_event_key)
    }
}

/// Derive the descriptor a live event should be looked up under
///
/// Returns `None` for event types no registry handles. Key and modifiers are only read
/// from keyboard events.
pub fn describe<E: InteractionEvent + ?Sized>(event: &E) -> Option<EventDescriptor> {
    let kind = EventKind::from_type(event.event_type())?;
    if !kind.is_keyboard() {
        return Some(EventDescriptor::new(kind));
    }
    let key = event.key().unwrap_or_default();
    let modifiers = Modifiers::from_flags(event.ctrl_key() || event.meta_key(), event.shift_key());
    Some(EventDescriptor::keyed(kind, &key, modifiers))
}

/// A plain event record
///
/// Deserializes from the DOM-shaped JSON a browser bridge would forward:
///
/// ```
/// use interactable_core::UiEvent;
///
/// let event: UiEvent =
///     serde_json::from_str(r#"{"type":"keydown","key":"s","ctrlKey":true}"#).unwrap();
/// assert_eq!(event, UiEvent::key_down("s").with_ctrl());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct UiEvent {
    #[serde(rename = "type")]
    pub event_type: String,
    pub key: Option<String>,
    pub ctrl_key: bool,
    pub meta_key: bool,
    pub shift_key: bool,
}

impl UiEvent {
    /// An event of the given type with no key or modifiers
    pub fn new(event_type: impl Into<String>) -> Self {
        Self {
            event_type: event_type.into(),
            ..Self::default()
        }
    }

    /// A keyboard event of the given kind
    pub fn keyboard(kind: EventKind, key: impl Into<String>) -> Self {
        Self {
            key: Some(key.into()),
            ..Self::new(kind.as_str())
        }
    }

    pub fn click() -> Self {
        Self::new(EventKind::Click.as_str())
    }

    pub fn key_down(key: impl Into<String>) -> Self {
        Self::keyboard(EventKind::KeyDown, key)
    }

    pub fn key_up(key: impl Into<String>) -> Self {
        Self::keyboard(EventKind::KeyUp, key)
    }

    pub fn touch_start() -> Self {
        Self::new(EventKind::TouchStart.as_str())
    }

    pub fn touch_end() -> Self {
        Self::new(EventKind::TouchEnd.as_str())
    }

    pub fn with_ctrl(mut self) -> Self {
        self.ctrl_key = true;
        self
    }

    pub fn with_meta(mut self) -> Self {
        self.meta_key = true;
        self
    }

    pub fn with_shift(mut self) -> Self {
        self.shift_key = true;
        self
    }
}

impl InteractionEvent for UiEvent {
    fn event_type(&self) -> &str {
        &self.event_type
    }

    fn key(&self) -> Option<Cow<'_, str>> {
        self.key.as_deref().map(Cow::Borrowed)
    }

    fn ctrl_key(&self) -> bool {
        self.ctrl_key
    }

    fn meta_key(&self) -> bool {
        self.meta_key
    }

    fn shift_key(&self) -> bool {
        self.shift_key
    }
}
