//! Event descriptors: the structural key callbacks are registered under

use bitflags::bitflags;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::hash::simple_hash;

/// The event kinds an interaction registry understands
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EventKind {
    Click,
    KeyDown,
    KeyUp,
    TouchStart,
    TouchEnd,
}

impl EventKind {
    /// All kinds, in registration-method order
    pub const ALL: [EventKind; 5] = [
        EventKind::Click,
        EventKind::KeyDown,
        EventKind::KeyUp,
        EventKind::TouchStart,
        EventKind::TouchEnd,
    ];

    /// The DOM event type string (`"click"`, `"keydown"`, ...)
    pub fn as_str(&self) -> &'static str {
        match self {
            EventKind::Click => "click",
            EventKind::KeyDown => "keydown",
            EventKind::KeyUp => "keyup",
            EventKind::TouchStart => "touchstart",
            EventKind::TouchEnd => "touchend",
        }
    }

    /// Parse a DOM event type string. Unknown types yield `None`.
    pub fn from_type(event_type: &str) -> Option<Self> {
        match event_type {
            "click" => Some(EventKind::Click),
            "keydown" => Some(EventKind::KeyDown),
            "keyup" => Some(EventKind::KeyUp),
            "touchstart" => Some(EventKind::TouchStart),
            "touchend" => Some(EventKind::TouchEnd),
            _ => None,
        }
    }

    /// Whether events of this kind carry a key and modifier state
    pub fn is_keyboard(&self) -> bool {
        matches!(self, EventKind::KeyDown | EventKind::KeyUp)
    }
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

bitflags! {
    /// Modifier state relevant to matching
    ///
    /// Control and Meta are folded together so a binding works on every platform.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct Modifiers: u8 {
        const CTRL_OR_META = 0b01;
        const SHIFT = 0b10;
    }
}

impl Modifiers {
    /// Build from the two flags
    pub fn from_flags(ctrl_or_meta: bool, shift: bool) -> Self {
        let mut modifiers = Modifiers::empty();
        modifiers.set(Modifiers::CTRL_OR_META, ctrl_or_meta);
        modifiers.set(Modifiers::SHIFT, shift);
        modifiers
    }

    pub fn ctrl_or_meta(&self) -> bool {
        self.contains(Modifiers::CTRL_OR_META)
    }

    pub fn shift(&self) -> bool {
        self.contains(Modifiers::SHIFT)
    }
}

/// Modifier state assumed when a registration does not say otherwise
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ModifierState {
    pub ctrl_or_meta: bool,
    pub shift: bool,
}

impl From<ModifierState> for Modifiers {
    fn from(state: ModifierState) -> Self {
        Modifiers::from_flags(state.ctrl_or_meta, state.shift)
    }
}

/// Per-registration modifier options; unset fields fall back to the registry default
///
/// ```
/// use interactable_core::{KeyOptions, ModifierState, Modifiers};
///
/// let opts = KeyOptions::new().ctrl_or_meta(true);
/// assert_eq!(opts.resolve(ModifierState::default()), Modifiers::CTRL_OR_META);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct KeyOptions {
    pub ctrl_or_meta: Option<bool>,
    pub shift: Option<bool>,
}

impl KeyOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn ctrl_or_meta(mut self, enabled: bool) -> Self {
        self.ctrl_or_meta = Some(enabled);
        self
    }

    pub fn shift(mut self, enabled: bool) -> Self {
        self.shift = Some(enabled);
        self
    }

    /// Fill unset fields from `defaults`
    pub fn resolve(&self, defaults: ModifierState) -> Modifiers {
        Modifiers::from_flags(
            self.ctrl_or_meta.unwrap_or(defaults.ctrl_or_meta),
            self.shift.unwrap_or(defaults.shift),
        )
    }
}

/// Kind, lowercased key and modifiers of an event
///
/// Registries key their callback tables on this value directly. The key is empty for
/// non-keyboard kinds and for "any key" registrations.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct EventDescriptor {
    kind: EventKind,
    key: String,
    modifiers: Modifiers,
}

impl EventDescriptor {
    /// A descriptor with no key and no modifiers
    pub fn new(kind: EventKind) -> Self {
        Self {
            kind,
            key: String::new(),
            modifiers: Modifiers::empty(),
        }
    }

    /// A keyed descriptor; the key is lowercased
    ///
    /// Click and touch kinds carry no key or modifiers, so both are dropped for them and
    /// the result equals [`EventDescriptor::new`].
    pub fn keyed(kind: EventKind, key: &str, modifiers: Modifiers) -> Self {
        if !kind.is_keyboard() {
            return Self::new(kind);
        }
        Self {
            kind,
            key: key.to_lowercase(),
            modifiers,
        }
    }

    pub fn kind(&self) -> EventKind {
        self.kind
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn modifiers(&self) -> Modifiers {
        self.modifiers
    }

    /// Whether this descriptor matches any key
    pub fn is_wildcard(&self) -> bool {
        self.key.is_empty()
    }

    /// Same kind and modifiers, empty key
    pub fn wildcard(&self) -> Self {
        Self {
            kind: self.kind,
            key: String::new(),
            modifiers: self.modifiers,
        }
    }

    /// Stable string encoding of this descriptor
    ///
    /// Hashes `"{kind} {key} {ctrl_or_meta} {shift}"` with [`simple_hash`]. Used as the
    /// identifier in logs and errors.
    ///
    /// ```
    /// use interactable_core::{EventDescriptor, EventKind};
    ///
    /// let a = EventDescriptor::new(EventKind::Click);
    /// assert_eq!(a.encode(), a.clone().encode());
    /// ```
    pub fn encode(&self) -> String {
        simple_hash(&format!(
            "{} {} {} {}",
            self.kind,
            self.key,
            self.modifiers.ctrl_or_meta(),
            self.modifiers.shift()
        ))
    }
}

impl fmt::Display for EventDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.kind)?;
        if !self.kind.is_keyboard() {
            return Ok(());
        }
        f.write_str(" ")?;
        if self.modifiers.ctrl_or_meta() {
            f.write_str("ctrl+")?;
        }
        if self.modifiers.shift() {
            f.write_str("shift+")?;
        }
        if self.key.is_empty() {
            f.write_str("<any>")
        } else {
            f.write_str(&self.key)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    const KEYS: &[&str] = &[
        "", "enter", "escape", "tab", "backspace", "arrowup", "arrowdown", "a", "d", "r", "s",
        "u", "z", "1", " ",
    ];

    const FLAGS: [(bool, bool); 4] = [(false, false), (true, false), (false, true), (true, true)];

    fn every_descriptor() -> Vec<EventDescriptor> {
        let mut all = Vec::new();
        for kind in EventKind::ALL {
            for key in KEYS {
                for (ctrl, shift) in FLAGS {
                    all.push(EventDescriptor::keyed(
                        kind,
                        key,
                        Modifiers::from_flags(ctrl, shift),
                    ));
                }
            }
        }
        all
    }

    #[test]
    fn test_encode_is_deterministic() {
        for d in every_descriptor() {
            assert_eq!(d.encode(), d.encode());
        }
    }

    #[test]
    fn test_composite_hash_has_no_collisions_in_practical_space() {
        let mut composites = Vec::new();
        for kind in EventKind::ALL {
            for key in KEYS {
                for (ctrl, shift) in FLAGS {
                    composites.push(format!("{kind} {key} {ctrl} {shift}"));
                }
            }
        }
        let hashed: HashSet<String> = composites.iter().map(|c| simple_hash(c)).collect();
        assert_eq!(hashed.len(), composites.len());
        assert_eq!(hashed.len(), 300);
    }

    #[test]
    fn test_distinct_descriptors_encode_distinctly() {
        let all = every_descriptor();
        let distinct: HashSet<&EventDescriptor> = all.iter().collect();
        let encoded: HashSet<String> = distinct.iter().map(|d| d.encode()).collect();
        assert_eq!(encoded.len(), distinct.len());
    }

    #[test]
    fn test_non_keyboard_kinds_drop_key_and_modifiers() {
        for kind in [EventKind::Click, EventKind::TouchStart, EventKind::TouchEnd] {
            let d = EventDescriptor::keyed(kind, "x", Modifiers::CTRL_OR_META | Modifiers::SHIFT);
            assert_eq!(d, EventDescriptor::new(kind));
            assert_eq!(d.key(), "");
            assert_eq!(d.modifiers(), Modifiers::empty());
        }
    }

    #[test]
    fn test_encode_matches_composite_hash() {
        let d = EventDescriptor::keyed(EventKind::KeyDown, "S", Modifiers::CTRL_OR_META);
        assert_eq!(d.encode(), simple_hash("keydown s true false"));
        assert_eq!(
            EventDescriptor::new(EventKind::Click).encode(),
            simple_hash("click  false false")
        );
    }

    #[test]
    fn test_key_is_lowercased() {
        let upper = EventDescriptor::keyed(EventKind::KeyUp, "Enter", Modifiers::empty());
        let lower = EventDescriptor::keyed(EventKind::KeyUp, "enter", Modifiers::empty());
        assert_eq!(upper, lower);
        assert_eq!(upper.key(), "enter");
    }

    #[test]
    fn test_wildcard_keeps_kind_and_modifiers() {
        let d = EventDescriptor::keyed(EventKind::KeyDown, "s", Modifiers::SHIFT);
        let w = d.wildcard();
        assert!(w.is_wildcard());
        assert_eq!(w.kind(), EventKind::KeyDown);
        assert_eq!(w.modifiers(), Modifiers::SHIFT);
    }

    #[test]
    fn test_kind_round_trips_through_type_string() {
        for kind in EventKind::ALL {
            assert_eq!(EventKind::from_type(kind.as_str()), Some(kind));
        }
        assert_eq!(EventKind::from_type("mouseover"), None);
    }

    #[test]
    fn test_key_options_fall_back_to_defaults() {
        let defaults = ModifierState {
            ctrl_or_meta: true,
            shift: false,
        };
        assert_eq!(KeyOptions::new().resolve(defaults), Modifiers::CTRL_OR_META);
        assert_eq!(
            KeyOptions::new().ctrl_or_meta(false).shift(true).resolve(defaults),
            Modifiers::SHIFT
        );
    }

    #[test]
    fn test_display() {
        assert_eq!(EventDescriptor::new(EventKind::Click).to_string(), "click");
        let d = EventDescriptor::keyed(
            EventKind::KeyDown,
            "s",
            Modifiers::CTRL_OR_META | Modifiers::SHIFT,
        );
        assert_eq!(d.to_string(), "keydown ctrl+shift+s");
        assert_eq!(d.wildcard().to_string(), "keydown ctrl+shift+<any>");
    }
}
