//! Key chord strings like `"ctrl+s"` or `"shift+enter"`

use crate::descriptor::Modifiers;

/// A key plus the modifiers that must be held
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct KeyChord {
    /// Lowercased DOM key value (`"enter"`, `"arrowup"`, `"s"`, `" "`)
    pub key: String,
    pub modifiers: Modifiers,
}

/// Parse a chord string into a DOM key value and modifiers
///
/// Modifiers are joined with `+`: `ctrl`/`control`/`meta`/`cmd`/`super` map to
/// ctrl-or-meta, `shift` to shift. Terminal-style names are translated to DOM key
/// names (`esc` -> `escape`, `up` -> `arrowup`, `space` -> `" "`). Returns `None` for
/// an empty chord, an unknown modifier, or `alt`, which registries do not track.
///
/// ```
/// use interactable_core::chord::parse_chord;
/// use interactable_core::Modifiers;
///
/// let chord = parse_chord("ctrl+S").unwrap();
/// assert_eq!(chord.key, "s");
/// assert_eq!(chord.modifiers, Modifiers::CTRL_OR_META);
/// ```
pub fn parse_chord(chord: &str) -> Option<KeyChord> {
    let chord = chord.trim().to_lowercase();

    if chord.is_empty() {
        return None;
    }

    // "+" on its own, or as the final key ("ctrl++")
    let (prefix, key_part) = match chord.strip_suffix("++") {
        Some(rest) => (Some(rest), "+"),
        None if chord == "+" => (None, "+"),
        None => match chord.rsplit_once('+') {
            Some((prefix, key)) => (Some(prefix), key.trim()),
            None => (None, chord.as_str()),
        },
    };

    let mut modifiers = Modifiers::empty();
    if let Some(prefix) = prefix {
        for part in prefix.split('+') {
            match part.trim() {
                "ctrl" | "control" | "meta" | "cmd" | "super" => {
                    modifiers |= Modifiers::CTRL_OR_META
                }
                "shift" => modifiers |= Modifiers::SHIFT,
                _ => return None,
            }
        }
    }

    let key = match key_part {
        "" => return None,
        "esc" | "escape" => "escape",
        "enter" | "return" => "enter",
        "tab" => "tab",
        "backspace" => "backspace",
        "delete" | "del" => "delete",
        "insert" | "ins" => "insert",
        "up" | "arrowup" => "arrowup",
        "down" | "arrowdown" => "arrowdown",
        "left" | "arrowleft" => "arrowleft",
        "right" | "arrowright" => "arrowright",
        "home" => "home",
        "end" => "end",
        "pageup" | "pgup" => "pageup",
        "pagedown" | "pgdn" => "pagedown",
        "space" => " ",
        other => other,
    };

    Some(KeyChord {
        key: key.to_string(),
        modifiers,
    })
}
