//! Dispatch crossterm terminal events through a registry
//!
//! Key presses and repeats become `keydown`, releases become `keyup`, and a left mouse
//! button release becomes `click`. Most terminals only report presses; enable
//! `PushKeyboardEnhancementFlags(KeyboardEnhancementFlags::REPORT_EVENT_TYPES)` to get
//! releases and with them `keyup` and Enter handlers.

use std::borrow::Cow;

use crossterm::event::{
    Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEventKind,
};

use crate::event::InteractionEvent;

impl InteractionEvent for Event {
    fn event_type(&self) -> &str {
        match self {
            Event::Key(key) => match key.kind {
                KeyEventKind::Press | KeyEventKind::Repeat => "keydown",
                KeyEventKind::Release => "keyup",
            },
            Event::Mouse(mouse) => match mouse.kind {
                MouseEventKind::Up(MouseButton::Left) => "click",
                MouseEventKind::Up(_) => "mouseup",
                MouseEventKind::Down(_) => "mousedown",
                MouseEventKind::Drag(_) | MouseEventKind::Moved => "mousemove",
                MouseEventKind::ScrollDown
                | MouseEventKind::ScrollUp
                | MouseEventKind::ScrollLeft
                | MouseEventKind::ScrollRight => "wheel",
            },
            Event::FocusGained => "focus",
            Event::FocusLost => "blur",
            Event::Paste(_) => "paste",
            Event::Resize(_, _) => "resize",
        }
    }

    fn key(&self) -> Option<Cow<'_, str>> {
        match self {
            Event::Key(key) => dom_key(key),
            _ => None,
        }
    }

    fn ctrl_key(&self) -> bool {
        modifiers(self).contains(KeyModifiers::CONTROL)
    }

    fn meta_key(&self) -> bool {
        modifiers(self).intersects(KeyModifiers::SUPER | KeyModifiers::META)
    }

    fn shift_key(&self) -> bool {
        modifiers(self).contains(KeyModifiers::SHIFT)
    }
}

fn modifiers(event: &Event) -> KeyModifiers {
    match event {
        Event::Key(key) => key.modifiers,
        Event::Mouse(mouse) => mouse.modifiers,
        _ => KeyModifiers::NONE,
    }
}

/// DOM `key` value for a crossterm key code
fn dom_key(key: &KeyEvent) -> Option<Cow<'static, str>> {
    let name = match key.code {
        KeyCode::Char(c) => return Some(Cow::Owned(c.to_string())),
        KeyCode::F(n) => return Some(Cow::Owned(format!("F{n}"))),
        KeyCode::Enter => "Enter",
        KeyCode::Esc => "Escape",
        KeyCode::Tab | KeyCode::BackTab => "Tab",
        KeyCode::Backspace => "Backspace",
        KeyCode::Delete => "Delete",
        KeyCode::Insert => "Insert",
        KeyCode::Up => "ArrowUp",
        KeyCode::Down => "ArrowDown",
        KeyCode::Left => "ArrowLeft",
        KeyCode::Right => "ArrowRight",
        KeyCode::Home => "Home",
        KeyCode::End => "End",
        KeyCode::PageUp => "PageUp",
        KeyCode::PageDown => "PageDown",
        KeyCode::CapsLock => "CapsLock",
        KeyCode::ScrollLock => "ScrollLock",
        KeyCode::NumLock => "NumLock",
        KeyCode::PrintScreen => "PrintScreen",
        KeyCode::Pause => "Pause",
        KeyCode::Menu => "ContextMenu",
        _ => return None,
    };
    Some(Cow::Borrowed(name))
}
