//! Named handler bindings for attaching a registry to a UI element

use std::collections::HashMap;
use std::fmt;
use std::rc::Rc;

use crate::event::InteractionEvent;
use crate::registry::{Callback, Interactions};

/// Handler names most interactive elements attach
pub const ALL_LISTENERS: &[&str] = &[
    "onClick",
    "onKeyDown",
    "onKeyUp",
    "onTouchStart",
    "onTouchEnd",
];

/// Handler name -> handler, every handler forwarding to the same registry
///
/// The name only decides where a UI tree attaches the handler. Which callback runs is
/// decided by the event's own type, so every entry behaves the same.
pub struct Bindings<E> {
    handlers: HashMap<String, Callback<E>>,
}

impl<E> fmt::Debug for Bindings<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.handlers.keys()).finish()
    }
}

impl<E: InteractionEvent + 'static> Bindings<E> {
    pub(crate) fn new<I, S>(interactions: &Interactions<E>, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let handlers = names
            .into_iter()
            .map(|name| {
                let registry = interactions.clone();
                let handler: Callback<E> = Rc::new(move |event: &E| registry.dispatch(event));
                (name.into(), handler)
            })
            .collect();
        Self { handlers }
    }
}

impl<E> Bindings<E> {
    /// The handler attached under `name`
    pub fn handler(&self, name: &str) -> Option<Callback<E>> {
        self.handlers.get(name).cloned()
    }

    /// Run the handler attached under `name`
    ///
    /// Returns `false` when no handler has that name.
    pub fn invoke(&self, name: &str, event: &E) -> bool {
        match self.handlers.get(name) {
            Some(handler) => {
                handler(event);
                true
            }
            None => false,
        }
    }

    pub fn contains(&self, name: &str) -> bool {
        self.handlers.contains_key(name)
    }

    /// Bound handler names, in no particular order
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.handlers.keys().map(|s| s.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Callback<E>)> {
        self.handlers.iter().map(|(name, h)| (name.as_str(), h))
    }

    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }
}

impl<E> IntoIterator for Bindings<E> {
    type Item = (String, Callback<E>);
    type IntoIter = std::collections::hash_map::IntoIter<String, Callback<E>>;

    fn into_iter(self) -> Self::IntoIter {
        self.handlers.into_iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::UiEvent;
    use crate::registry::InteractionsBuilder;
    use crate::testing::CallRecorder;

    fn registry(recorder: &CallRecorder) -> Interactions<UiEvent> {
        let mut builder = InteractionsBuilder::<UiEvent>::new();
        builder
            .register_click(recorder.callback("click"))
            .unwrap()
            .register_key_down("d", recorder.callback("down"))
            .unwrap()
            .register_key_up("u", recorder.callback("up"))
            .unwrap()
            .register_enter(recorder.callback("enter"))
            .unwrap();
        builder.build()
    }

    #[test]
    fn test_every_name_gets_a_handler() {
        let recorder = CallRecorder::new();
        let bindings = registry(&recorder).create_bindings(["onClick", "onKeyDown", "onKeyUp"]);

        assert_eq!(bindings.len(), 3);
        let mut names: Vec<_> = bindings.names().collect();
        names.sort_unstable();
        assert_eq!(names, vec!["onClick", "onKeyDown", "onKeyUp"]);
    }

    #[test]
    fn test_handlers_route_by_event_type() {
        let recorder = CallRecorder::new();
        let bindings = registry(&recorder).create_bindings(["onClick", "onKeyDown", "onKeyUp"]);

        bindings.invoke("onClick", &UiEvent::click());
        bindings.invoke("onKeyDown", &UiEvent::key_down("d"));
        bindings.invoke("onKeyUp", &UiEvent::key_up("u"));
        bindings.invoke("onKeyUp", &UiEvent::key_up("Enter"));

        assert_eq!(recorder.calls(), vec!["click", "down", "up", "enter"]);
    }

    #[test]
    fn test_name_does_not_filter() {
        let recorder = CallRecorder::new();
        let bindings = registry(&recorder).create_bindings(["onKeyDown"]);

        bindings.invoke("onKeyDown", &UiEvent::click());
        assert_eq!(recorder.calls(), vec!["click"]);
    }

    #[test]
    fn test_unknown_name() {
        let recorder = CallRecorder::new();
        let bindings = registry(&recorder).create_bindings(["onClick"]);

        assert!(!bindings.invoke("onBlur", &UiEvent::click()));
        assert!(bindings.handler("onBlur").is_none());
        assert!(recorder.is_empty());
    }

    #[test]
    fn test_repeated_names_collapse() {
        let recorder = CallRecorder::new();
        let bindings = registry(&recorder).create_bindings(["onClick", "onClick"]);
        assert_eq!(bindings.len(), 1);
    }

    #[test]
    fn test_default_bindings_use_all_listeners() {
        let recorder = CallRecorder::new();
        let bindings = registry(&recorder).create_default_bindings();
        for name in ALL_LISTENERS {
            assert!(bindings.contains(name), "{name}");
        }
    }

    #[test]
    fn test_handler_outlives_registry_handle() {
        let recorder = CallRecorder::new();
        let handler = {
            let bindings = registry(&recorder).create_bindings(["onClick"]);
            bindings.handler("onClick").unwrap()
        };
        handler(&UiEvent::click());
        assert_eq!(recorder.calls(), vec!["click"]);
    }
}
