//! Event handling utilities

use crossterm::event::{KeyCode, KeyModifiers};

/// Key mapping for pages that do not capture typed text (reading, cover,
/// index, and audio views).
pub fn reading_key_to_action(key: KeyCode) -> Option<Action> {
    match key {
        KeyCode::Right | KeyCode::Char('l') | KeyCode::Char(' ') => Some(Action::NextPage),
        KeyCode::Left | KeyCode::Char('h') => Some(Action::PrevPage),
        KeyCode::Char('j') | KeyCode::Down => Some(Action::Down),
        KeyCode::Char('k') | KeyCode::Up => Some(Action::Up),
        KeyCode::Enter => Some(Action::Select),
        KeyCode::Esc => Some(Action::Back),
        KeyCode::Char('i') => Some(Action::OpenIndex),
        KeyCode::Char('c') => Some(Action::OpenCover),
        // Presentation settings
        KeyCode::Char('+') | KeyCode::Char('=') => Some(Action::FontBigger),
        KeyCode::Char('-') => Some(Action::FontSmaller),
        KeyCode::Char('f') => Some(Action::CycleFamily),
        KeyCode::Char('.') => Some(Action::LineLooser),
        KeyCode::Char(',') => Some(Action::LineTighter),
        KeyCode::Char('q') => Some(Action::Quit),
        _ => None,
    }
}

/// Key mapping with modifiers (for Ctrl combinations). These work on every
/// page, including the ones that capture typed text.
pub fn key_with_modifier_to_action(key: KeyCode, modifiers: KeyModifiers) -> Option<Action> {
    if modifiers.contains(KeyModifiers::CONTROL) {
        match key {
            KeyCode::Char('q') | KeyCode::Char('c') => Some(Action::Quit),
            KeyCode::Char('n') => Some(Action::NextPage),
            KeyCode::Char('p') => Some(Action::PrevPage),
            _ => None,
        }
    } else {
        None
    }
}

/// Actions that can be taken in the app
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    // Page navigation
    NextPage,
    PrevPage,
    OpenIndex,
    OpenCover,

    // Row movement
    Up,
    Down,

    // Selection
    Select,
    Back,

    // Presentation settings
    FontBigger,
    FontSmaller,
    CycleFamily,
    LineLooser,
    LineTighter,

    Quit,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn arrows_turn_pages() {
        assert_eq!(reading_key_to_action(KeyCode::Right), Some(Action::NextPage));
        assert_eq!(reading_key_to_action(KeyCode::Left), Some(Action::PrevPage));
        assert_eq!(reading_key_to_action(KeyCode::Char(' ')), Some(Action::NextPage));
    }

    #[test]
    fn vim_movement_rows() {
        assert_eq!(reading_key_to_action(KeyCode::Char('j')), Some(Action::Down));
        assert_eq!(reading_key_to_action(KeyCode::Char('k')), Some(Action::Up));
    }

    #[test]
    fn front_matter_shortcuts() {
        assert_eq!(reading_key_to_action(KeyCode::Char('i')), Some(Action::OpenIndex));
        assert_eq!(reading_key_to_action(KeyCode::Char('c')), Some(Action::OpenCover));
    }

    #[test]
    fn settings_keys_adjust_presentation() {
        assert_eq!(reading_key_to_action(KeyCode::Char('+')), Some(Action::FontBigger));
        assert_eq!(reading_key_to_action(KeyCode::Char('=')), Some(Action::FontBigger));
        assert_eq!(reading_key_to_action(KeyCode::Char('-')), Some(Action::FontSmaller));
        assert_eq!(reading_key_to_action(KeyCode::Char('f')), Some(Action::CycleFamily));
    }

    #[test]
    fn unknown_key_returns_none() {
        assert_eq!(reading_key_to_action(KeyCode::Char('x')), None);
    }

    #[test]
    fn ctrl_combinations_navigate_and_quit() {
        assert_eq!(
            key_with_modifier_to_action(KeyCode::Char('q'), KeyModifiers::CONTROL),
            Some(Action::Quit)
        );
        assert_eq!(
            key_with_modifier_to_action(KeyCode::Char('n'), KeyModifiers::CONTROL),
            Some(Action::NextPage)
        );
        assert_eq!(
            key_with_modifier_to_action(KeyCode::Char('q'), KeyModifiers::NONE),
            None
        );
    }
}
