use crate::app::App;
use crate::app_state::AppState;
use crate::controller::Submission;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use log::debug;

const PAGE_ROWS: u16 = 5;

/// Routes a key press to the handler for the current screen.
pub async fn handle_key(key: KeyEvent, app: &mut App) {
    // Any key dismisses the visible notice.
    app.dismiss_notice();

    match app.state {
        AppState::Login | AppState::Register => handle_auth_input(key, app),
        AppState::Chat => handle_chat_input(key, app).await,
        AppState::QuitConfirm => handle_quit_confirm_input(key, app),
        AppState::Quit => {}
    }
}

pub fn handle_auth_input(key: KeyEvent, app: &mut App) {
    match key.code {
        KeyCode::Esc => match app.state {
            AppState::Register => app.show_login(),
            _ => app.confirm_quit(),
        },
        KeyCode::Tab | KeyCode::Up | KeyCode::Down => {
            app.form.focus = app.form.focus.toggle();
        }
        KeyCode::Enter => match app.state {
            AppState::Register => app.register(),
            _ => app.login(),
        },
        KeyCode::Backspace => {
            app.form.focused_mut().pop();
        }
        KeyCode::Char(c) if key.modifiers.contains(KeyModifiers::CONTROL) => match c {
            'c' => app.confirm_quit(),
            'r' if app.state == AppState::Login => app.show_register(),
            'l' if app.state == AppState::Register => app.show_login(),
            _ => {}
        },
        KeyCode::Char(c) => app.form.focused_mut().push(c),
        _ => {}
    }
}

pub async fn handle_chat_input(key: KeyEvent, app: &mut App) {
    let Some(chat) = app.chat.clone() else {
        app.show_login();
        return;
    };

    match key.code {
        KeyCode::Esc => app.confirm_quit(),
        KeyCode::Enter => {
            if let Submission::Accepted(id) = chat.send_input().await {
                debug!("Sent message {}", id);
                app.scroll.jump_to_bottom();
            }
        }
        KeyCode::Up => chat.recall_previous().await,
        KeyCode::Down => chat.recall_next().await,
        KeyCode::PageUp => app.scroll.scroll_up(PAGE_ROWS),
        KeyCode::PageDown => app.scroll.scroll_down(PAGE_ROWS),
        KeyCode::End => app.scroll.jump_to_bottom(),
        KeyCode::Backspace => chat.state().lock().await.pop_char(),
        KeyCode::Char(c) if key.modifiers.contains(KeyModifiers::CONTROL) => match c {
            'c' => app.confirm_quit(),
            'e' => app.export().await,
            'l' => app.logout(),
            'v' => chat.toggle_dictation().await,
            'u' => app.scroll.scroll_up(PAGE_ROWS),
            'd' => app.scroll.scroll_down(PAGE_ROWS),
            _ => {}
        },
        KeyCode::Char(c) => chat.state().lock().await.push_char(c),
        _ => {}
    }
}

pub fn handle_quit_confirm_input(key: KeyEvent, app: &mut App) {
    match key.code {
        KeyCode::Char('y') | KeyCode::Enter => {
            app.state = AppState::Quit;
        }
        KeyCode::Char('n') | KeyCode::Esc => {
            app.cancel_quit();
        }
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::credentials::CredentialStore;
    use crate::models::Notice;
    use crate::storage::{FlakyStore, MemoryStore};
    use std::sync::Arc;

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn ctrl(c: char) -> KeyEvent {
        KeyEvent::new(KeyCode::Char(c), KeyModifiers::CONTROL)
    }

    async fn type_text(app: &mut App, text: &str) {
        for c in text.chars() {
            handle_key(press(KeyCode::Char(c)), app).await;
        }
    }

    fn logged_in_app() -> App {
        let store = Arc::new(MemoryStore::new());
        let creds = CredentialStore::new(store.clone());
        creds.register("a@x.com", "pw").unwrap();
        creds.login("a@x.com", "pw").unwrap();
        App::new(store, Config::default()).unwrap()
    }

    #[tokio::test]
    async fn test_register_and_login_by_keyboard() {
        let mut app = App::new(Arc::new(MemoryStore::new()), Config::default()).unwrap();

        handle_key(ctrl('r'), &mut app).await;
        assert_eq!(app.state, AppState::Register);
        type_text(&mut app, "a@x.com").await;
        handle_key(press(KeyCode::Tab), &mut app).await;
        type_text(&mut app, "pw1").await;
        handle_key(press(KeyCode::Enter), &mut app).await;
        assert_eq!(app.state, AppState::Login);

        type_text(&mut app, "a@x.com").await;
        handle_key(press(KeyCode::Tab), &mut app).await;
        type_text(&mut app, "pw2").await;
        handle_key(press(KeyCode::Enter), &mut app).await;
        assert_eq!(app.notice, Some(Notice::InvalidCredentials));

        handle_key(press(KeyCode::Backspace), &mut app).await;
        type_text(&mut app, "1").await;
        handle_key(press(KeyCode::Enter), &mut app).await;
        assert_eq!(app.state, AppState::Chat);
    }

    #[tokio::test(start_paused = true)]
    async fn test_typing_and_enter_submits() {
        let mut app = logged_in_app();
        type_text(&mut app, "hello").await;
        handle_key(press(KeyCode::Enter), &mut app).await;

        let chat = app.chat.clone().unwrap();
        let state = chat.state();
        let guard = state.lock().await;
        assert_eq!(guard.input(), "");
        assert_eq!(guard.messages()[0].text, "hello");
        assert!(guard.is_reply_pending());
    }

    #[tokio::test(start_paused = true)]
    async fn test_up_arrow_recalls_last_submission() {
        let mut app = logged_in_app();
        type_text(&mut app, "hello").await;
        handle_key(press(KeyCode::Enter), &mut app).await;
        handle_key(press(KeyCode::Up), &mut app).await;

        let chat = app.chat.clone().unwrap();
        assert_eq!(chat.state().lock().await.input(), "hello");
    }

    #[tokio::test]
    async fn test_dictation_toggle_without_speech_shows_notice() {
        let mut app = logged_in_app();
        handle_key(ctrl('v'), &mut app).await;
        let chat = app.chat.clone().unwrap();
        assert_eq!(
            chat.state().lock().await.take_notices(),
            vec![Notice::SpeechUnsupported]
        );
    }

    #[tokio::test]
    async fn test_quit_confirm_flow() {
        let mut app = logged_in_app();
        handle_key(press(KeyCode::Esc), &mut app).await;
        assert_eq!(app.state, AppState::QuitConfirm);
        handle_key(press(KeyCode::Char('n')), &mut app).await;
        assert_eq!(app.state, AppState::Chat);
        handle_key(press(KeyCode::Esc), &mut app).await;
        handle_key(press(KeyCode::Char('y')), &mut app).await;
        assert_eq!(app.state, AppState::Quit);
    }

    #[tokio::test]
    async fn test_logout_with_failing_storage_stays_in_chat() {
        let store = Arc::new(FlakyStore::default());
        let creds = CredentialStore::new(store.clone());
        creds.register("a@x.com", "pw").unwrap();
        creds.login("a@x.com", "pw").unwrap();
        let mut app = App::new(store.clone(), Config::default()).unwrap();

        store.fail_writes(true);
        handle_key(ctrl('l'), &mut app).await;
        assert_eq!(app.state, AppState::Chat);
        assert!(app.chat.is_some());
        assert!(matches!(app.notice, Some(Notice::StorageFailed(_))));

        type_text(&mut app, "x").await;
        assert_eq!(app.notice, None);
        let chat = app.chat.clone().unwrap();
        assert_eq!(chat.state().lock().await.input(), "x");
    }
}
