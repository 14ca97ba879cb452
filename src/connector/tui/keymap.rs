use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::domain::InputEvent;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeyAction {
    Input(InputEvent),
    CursorLeft,
    CursorRight,
    CursorHome,
    CursorEnd,
    Quit,
}

/// Modifiers that turn Enter into the submit chord. Shift needs enhanced key
/// reporting; Alt reaches us from any terminal.
const SUBMIT_MODIFIERS: KeyModifiers = KeyModifiers::SHIFT.union(KeyModifiers::ALT);

fn is_chord_shape(key: &KeyEvent) -> bool {
    key.code == KeyCode::Enter && key.modifiers.intersects(SUBMIT_MODIFIERS)
}

/// Shift+Enter or Alt+Enter, pressed (not repeated or released).
pub fn is_submit_chord(key: &KeyEvent) -> bool {
    is_chord_shape(key) && key.kind == KeyEventKind::Press
}

/// Translate a key press into an action on a buffer of `len` chars with the
/// cursor at `cursor`.
///
/// Plain Enter is a newline: prompts are free-form multi-line text, and only
/// the Shift+Enter or Alt+Enter chord means "done".
pub fn map_key(key: &KeyEvent, cursor: usize, len: usize) -> Option<KeyAction> {
    if key.kind == KeyEventKind::Release {
        return None;
    }

    if is_chord_shape(key) {
        return is_submit_chord(key).then_some(KeyAction::Input(InputEvent::SubmitTriggered));
    }

    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
    let alt = key.modifiers.contains(KeyModifiers::ALT);

    let action = match key.code {
        KeyCode::Esc => KeyAction::Quit,
        KeyCode::Char('c') if ctrl => KeyAction::Quit,
        KeyCode::Char('u') if ctrl => KeyAction::Input(InputEvent::Delete { position: 0, len }),
        KeyCode::Char(_) if ctrl || alt => return None,
        KeyCode::Char(c) => KeyAction::Input(InputEvent::Insert {
            position: cursor,
            text: c.to_string(),
        }),
        KeyCode::Enter => KeyAction::Input(InputEvent::Insert {
            position: cursor,
            text: "\n".to_string(),
        }),
        KeyCode::Backspace if cursor > 0 => KeyAction::Input(InputEvent::Delete {
            position: cursor - 1,
            len: 1,
        }),
        KeyCode::Delete if cursor < len => KeyAction::Input(InputEvent::Delete {
            position: cursor,
            len: 1,
        }),
        KeyCode::Left => KeyAction::CursorLeft,
        KeyCode::Right => KeyAction::CursorRight,
        KeyCode::Home => KeyAction::CursorHome,
        KeyCode::End => KeyAction::CursorEnd,
        _ => return None,
    };

    Some(action)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyEventState;

    fn key(code: KeyCode, modifiers: KeyModifiers) -> KeyEvent {
        KeyEvent::new(code, modifiers)
    }

    fn with_kind(code: KeyCode, modifiers: KeyModifiers, kind: KeyEventKind) -> KeyEvent {
        KeyEvent {
            code,
            modifiers,
            kind,
            state: KeyEventState::NONE,
        }
    }

    #[test]
    fn shift_enter_submits() {
        let action = map_key(&key(KeyCode::Enter, KeyModifiers::SHIFT), 0, 0);
        assert_eq!(action, Some(KeyAction::Input(InputEvent::SubmitTriggered)));
    }

    #[test]
    fn alt_enter_submits_without_enhanced_keys() {
        // Legacy terminals deliver ESC CR, which arrives as Enter with ALT.
        let alt = key(KeyCode::Enter, KeyModifiers::ALT);
        assert!(is_submit_chord(&alt));
        assert_eq!(
            map_key(&alt, 5, 5),
            Some(KeyAction::Input(InputEvent::SubmitTriggered))
        );

        let plain = key(KeyCode::Enter, KeyModifiers::NONE);
        assert!(!is_submit_chord(&plain));
        assert_ne!(
            map_key(&plain, 5, 5),
            Some(KeyAction::Input(InputEvent::SubmitTriggered))
        );
    }

    #[test]
    fn plain_enter_inserts_newline() {
        let action = map_key(&key(KeyCode::Enter, KeyModifiers::NONE), 3, 3);
        assert_eq!(
            action,
            Some(KeyAction::Input(InputEvent::Insert {
                position: 3,
                text: "\n".into()
            }))
        );
    }

    #[test]
    fn only_the_press_of_the_chord_submits() {
        let release = with_kind(KeyCode::Enter, KeyModifiers::SHIFT, KeyEventKind::Release);
        let repeat = with_kind(KeyCode::Enter, KeyModifiers::SHIFT, KeyEventKind::Repeat);
        let alt_repeat = with_kind(KeyCode::Enter, KeyModifiers::ALT, KeyEventKind::Repeat);
        assert_eq!(map_key(&release, 0, 0), None);
        assert_eq!(map_key(&repeat, 0, 0), None);
        assert_eq!(map_key(&alt_repeat, 0, 0), None);
        assert!(!is_submit_chord(&repeat));
    }

    #[test]
    fn navigation_keys_never_submit() {
        for code in [
            KeyCode::Up,
            KeyCode::Down,
            KeyCode::Left,
            KeyCode::Right,
            KeyCode::Home,
            KeyCode::End,
            KeyCode::Tab,
        ] {
            let action = map_key(&key(code, KeyModifiers::NONE), 0, 0);
            assert_ne!(action, Some(KeyAction::Input(InputEvent::SubmitTriggered)));
            let action = map_key(&key(code, KeyModifiers::SHIFT), 0, 0);
            assert_ne!(action, Some(KeyAction::Input(InputEvent::SubmitTriggered)));
        }
    }

    #[test]
    fn typing_inserts_at_cursor() {
        let action = map_key(&key(KeyCode::Char('Z'), KeyModifiers::SHIFT), 2, 5);
        assert_eq!(
            action,
            Some(KeyAction::Input(InputEvent::Insert {
                position: 2,
                text: "Z".into()
            }))
        );
    }

    #[test]
    fn backspace_and_delete_respect_bounds() {
        assert_eq!(map_key(&key(KeyCode::Backspace, KeyModifiers::NONE), 0, 4), None);
        assert_eq!(
            map_key(&key(KeyCode::Backspace, KeyModifiers::NONE), 2, 4),
            Some(KeyAction::Input(InputEvent::Delete { position: 1, len: 1 }))
        );
        assert_eq!(map_key(&key(KeyCode::Delete, KeyModifiers::NONE), 4, 4), None);
        assert_eq!(
            map_key(&key(KeyCode::Delete, KeyModifiers::NONE), 0, 4),
            Some(KeyAction::Input(InputEvent::Delete { position: 0, len: 1 }))
        );
    }

    #[test]
    fn control_shortcuts() {
        assert_eq!(
            map_key(&key(KeyCode::Char('c'), KeyModifiers::CONTROL), 0, 0),
            Some(KeyAction::Quit)
        );
        assert_eq!(
            map_key(&key(KeyCode::Char('u'), KeyModifiers::CONTROL), 3, 7),
            Some(KeyAction::Input(InputEvent::Delete { position: 0, len: 7 }))
        );
        assert_eq!(map_key(&key(KeyCode::Char('x'), KeyModifiers::CONTROL), 0, 0), None);
        assert_eq!(map_key(&key(KeyCode::Esc, KeyModifiers::NONE), 0, 0), Some(KeyAction::Quit));
    }
}
