//! Key classification
//!
//! Works on `KeyboardEvent.key` values. Older engines report Space as
//! `"Spacebar"` instead of `" "`.

use activate_dom::Event;

/// Modern Space key value
pub const SPACE: &str = " ";

/// Space key value reported by legacy engines
pub const LEGACY_SPACE: &str = "Spacebar";

pub fn is_space_key(key: &str) -> bool {
    key == SPACE || key == LEGACY_SPACE
}

pub fn is_enter_key(key: &str) -> bool {
    key.eq_ignore_ascii_case("enter")
}

/// Space press or release. Events without a key are never Space.
pub fn is_space(event: &Event) -> bool {
    event.key.as_deref().is_some_and(is_space_key)
}

/// Enter press or release. Events without a key are never Enter.
pub fn is_enter(event: &Event) -> bool {
    event.key.as_deref().is_some_and(is_enter_key)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_space() {
        assert!(is_space(&Event::key_up(" ")));
        assert!(is_space(&Event::key_up("Spacebar")));
        assert!(!is_space(&Event::key_up("spacebar")));
        assert!(!is_space(&Event::key_up("Space")));
        assert!(!is_space(&Event::key_up_unidentified()));
    }

    #[test]
    fn test_enter() {
        assert!(is_enter(&Event::key_down("Enter")));
        assert!(is_enter(&Event::key_down("enter")));
        assert!(is_enter(&Event::key_down("ENTER")));
        assert!(!is_enter(&Event::key_down("NumpadEnter")));
        assert!(!is_enter(&Event::key_down("Unidentified")));
        assert!(!is_enter(&Event::key_down_unidentified()));
        assert!(!is_enter(&Event::click()));
    }
}
