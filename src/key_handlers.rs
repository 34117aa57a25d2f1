// src/key_handlers.rs

use crate::app::App;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Applies one key event to the app. Returns the submitted text when the
/// key produced an accepted submission, so the caller can spawn the fetch.
pub fn handle_chat_input(key: KeyEvent, app: &mut App) -> Option<String> {
    match key.code {
        KeyCode::Esc => {
            app.should_quit = true;
            None
        }
        KeyCode::Enter => app.submit(),
        KeyCode::Backspace => {
            app.backspace();
            None
        }
        KeyCode::PageUp => {
            app.scroll_up();
            None
        }
        KeyCode::PageDown => {
            app.scroll_down();
            None
        }
        KeyCode::Char(c) => {
            if key.modifiers.contains(KeyModifiers::CONTROL) {
                match c {
                    'c' => app.should_quit = true,
                    'u' => app.scroll_up(),
                    'd' => app.scroll_down(),
                    _ => {}
                }
                None
            } else {
                app.push_char(c);
                None
            }
        }
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::FetchState;

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn typing_builds_the_input_buffer() {
        let mut app = App::new();
        for c in "hey".chars() {
            assert_eq!(handle_chat_input(press(KeyCode::Char(c)), &mut app), None);
        }
        assert_eq!(app.input, "hey");

        handle_chat_input(press(KeyCode::Backspace), &mut app);
        assert_eq!(app.input, "he");
    }

    #[test]
    fn enter_submits_non_blank_input() {
        let mut app = App::new();
        app.input = "hello".to_string();

        let submitted = handle_chat_input(press(KeyCode::Enter), &mut app);
        assert_eq!(submitted, Some("hello".to_string()));
        assert_eq!(app.fetch_state, FetchState::Pending);
    }

    #[test]
    fn enter_on_blank_input_does_nothing() {
        let mut app = App::new();
        app.input = "   ".to_string();

        assert_eq!(handle_chat_input(press(KeyCode::Enter), &mut app), None);
        assert!(app.conversation.is_empty());
        assert_eq!(app.fetch_state, FetchState::Idle);
    }

    #[test]
    fn enter_while_pending_is_dropped() {
        let mut app = App::new();
        app.input = "first".to_string();
        handle_chat_input(press(KeyCode::Enter), &mut app);

        app.input = "second".to_string();
        assert_eq!(handle_chat_input(press(KeyCode::Enter), &mut app), None);
        assert_eq!(app.conversation.len(), 1);
    }

    #[test]
    fn escape_and_ctrl_c_request_quit() {
        let mut app = App::new();
        handle_chat_input(press(KeyCode::Esc), &mut app);
        assert!(app.should_quit);

        let mut app = App::new();
        handle_chat_input(
            KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL),
            &mut app,
        );
        assert!(app.should_quit);
    }
}
