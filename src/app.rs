use crate::app_state::{AppState, AuthField};
use crate::config::Config;
use crate::constants::EXPORT_DIR_NAME;
use crate::controller::ChatController;
use crate::credentials::CredentialStore;
use crate::errors::{ParrotError, ParrotResult};
use crate::export::export_transcript;
use crate::models::Notice;
use crate::scroll::ScrollTracker;
use crate::speech::UnavailableRecognizer;
use crate::status_indicator::StatusIndicator;
use crate::storage::KeyValueStore;
use log::{info, warn};
use std::collections::VecDeque;
use std::sync::Arc;

#[derive(Debug, Default)]
pub struct AuthForm {
    pub email: String,
    pub password: String,
    pub focus: AuthField,
}

impl AuthForm {
    pub fn focused_mut(&mut self) -> &mut String {
        match self.focus {
            AuthField::Email => &mut self.email,
            AuthField::Password => &mut self.password,
        }
    }

    pub fn clear(&mut self) {
        *self = AuthForm::default();
    }
}

pub struct App {
    pub state: AppState,
    pub previous_state: AppState,
    pub config: Config,
    pub store: Arc<dyn KeyValueStore>,
    pub credentials: CredentialStore,
    pub form: AuthForm,
    pub chat: Option<ChatController>,
    pub scroll: ScrollTracker,
    pub status_indicator: StatusIndicator,
    pub notice: Option<Notice>,
    queued_notices: VecDeque<Notice>,
}

impl App {
    /// Starts on the chat screen when a session token is already stored,
    /// otherwise on the login screen.
    pub fn new(store: Arc<dyn KeyValueStore>, config: Config) -> ParrotResult<App> {
        let credentials = CredentialStore::new(store.clone());
        let mut app = App {
            state: AppState::Login,
            previous_state: AppState::Login,
            scroll: ScrollTracker::new(config.scroll_threshold),
            config,
            store,
            credentials,
            form: AuthForm::default(),
            chat: None,
            status_indicator: StatusIndicator::new(),
            notice: None,
            queued_notices: VecDeque::new(),
        };

        if app.credentials.is_authenticated()? {
            match app.credentials.current_user()? {
                Some(user) => app.open_chat(&user.email)?,
                None => {
                    warn!("Session token present without a user record, logging out");
                    app.credentials.logout()?;
                }
            }
        }

        Ok(app)
    }

    fn open_chat(&mut self, email: &str) -> ParrotResult<()> {
        let controller = ChatController::open(
            self.store.clone(),
            email,
            Box::new(UnavailableRecognizer),
            &self.config,
        )?;
        self.chat = Some(controller);
        self.scroll = ScrollTracker::new(self.config.scroll_threshold);
        self.state = AppState::Chat;
        Ok(())
    }

    pub fn show_register(&mut self) {
        self.form.clear();
        self.state = AppState::Register;
    }

    pub fn show_login(&mut self) {
        self.form.clear();
        self.state = AppState::Login;
    }

    /// Shows `notice` now, or after the ones already waiting.
    pub fn show_notice(&mut self, notice: Notice) {
        if self.notice.is_none() {
            self.notice = Some(notice);
        } else {
            self.queued_notices.push_back(notice);
        }
    }

    pub fn show_notices(&mut self, notices: impl IntoIterator<Item = Notice>) {
        for notice in notices {
            self.show_notice(notice);
        }
    }

    /// Replaces the visible notice with the next queued one.
    pub fn dismiss_notice(&mut self) {
        self.notice = self.queued_notices.pop_front();
    }

    pub fn register(&mut self) {
        match self
            .credentials
            .register(self.form.email.trim(), &self.form.password)
        {
            Ok(()) => {
                self.show_login();
                self.show_notice(Notice::Registered);
            }
            Err(e) => {
                warn!("Registration failed: {}", e);
                self.show_notice(Notice::StorageFailed(e.to_string()));
            }
        }
    }

    pub fn login(&mut self) {
        let email = self.form.email.trim().to_string();
        let result = self
            .credentials
            .login(&email, &self.form.password)
            .and_then(|user| self.open_chat(&user.email));
        match result {
            Ok(()) => self.form.clear(),
            Err(ParrotError::InvalidCredentials) => self.show_notice(Notice::InvalidCredentials),
            Err(e) => {
                warn!("Login failed: {}", e);
                self.show_notice(Notice::StorageFailed(e.to_string()));
            }
        }
    }

    /// Drops the in-memory conversation; the stored copy stays for next login.
    /// If the session token cannot be removed the chat stays open.
    pub fn logout(&mut self) {
        if let Err(e) = self.credentials.logout() {
            warn!("Logout failed: {}", e);
            self.show_notice(Notice::StorageFailed(e.to_string()));
            return;
        }
        self.shutdown();
        self.chat = None;
        info!("Logged out");
        self.show_login();
    }

    pub async fn export(&mut self) {
        let Some(chat) = &self.chat else {
            return;
        };
        let messages = chat.state().lock().await.messages().to_vec();
        let dir = self.config.data_path().join(EXPORT_DIR_NAME);

        let notice = match export_transcript(&dir, &messages) {
            Ok(path) => Notice::Exported(path),
            Err(e) => Notice::ExportFailed(e.to_string()),
        };
        self.show_notice(notice);
    }

    pub fn confirm_quit(&mut self) {
        self.previous_state = self.state;
        self.state = AppState::QuitConfirm;
    }

    pub fn cancel_quit(&mut self) {
        self.state = self.previous_state;
    }

    pub fn shutdown(&self) {
        if let Some(chat) = &self.chat {
            chat.shutdown();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::TOKEN_KEY;
    use crate::storage::{FlakyStore, MemoryStore};

    fn app_with(store: Arc<MemoryStore>) -> App {
        App::new(store, Config::default()).unwrap()
    }

    #[tokio::test]
    async fn test_register_login_logout_flow() {
        let store = Arc::new(MemoryStore::new());
        let mut app = app_with(store.clone());
        assert_eq!(app.state, AppState::Login);

        app.show_register();
        app.form.email = "a@x.com".into();
        app.form.password = "pw1".into();
        app.register();
        assert_eq!(app.state, AppState::Login);
        assert_eq!(app.notice, Some(Notice::Registered));
        assert!(app.form.email.is_empty());
        app.dismiss_notice();

        app.form.email = "a@x.com".into();
        app.form.password = "pw2".into();
        app.login();
        assert_eq!(app.state, AppState::Login);
        assert_eq!(app.notice, Some(Notice::InvalidCredentials));

        app.form.password = "pw1".into();
        app.login();
        assert_eq!(app.state, AppState::Chat);
        assert!(app.chat.is_some());

        app.logout();
        assert_eq!(app.state, AppState::Login);
        assert!(app.chat.is_none());
        assert_eq!(store.get(TOKEN_KEY).unwrap(), None);
    }

    #[tokio::test]
    async fn test_existing_session_opens_chat() {
        let store = Arc::new(MemoryStore::new());
        let creds = CredentialStore::new(store.clone());
        creds.register("a@x.com", "pw").unwrap();
        creds.login("a@x.com", "pw").unwrap();

        let app = app_with(store);
        assert_eq!(app.state, AppState::Chat);
        let chat = app.chat.as_ref().unwrap();
        assert_eq!(chat.state().lock().await.email(), "a@x.com");
    }

    #[tokio::test]
    async fn test_orphan_token_is_cleared() {
        let store = Arc::new(MemoryStore::new());
        store.set(TOKEN_KEY, "fake-jwt-token").unwrap();

        let app = app_with(store.clone());
        assert_eq!(app.state, AppState::Login);
        assert_eq!(store.get(TOKEN_KEY).unwrap(), None);
    }

    #[tokio::test]
    async fn test_quit_confirm_returns_to_previous_screen() {
        let mut app = app_with(Arc::new(MemoryStore::new()));
        app.show_register();
        app.confirm_quit();
        assert_eq!(app.state, AppState::QuitConfirm);
        app.cancel_quit();
        assert_eq!(app.state, AppState::Register);
    }

    #[tokio::test]
    async fn test_export_empty_chat_reports_failure() {
        let dir = tempfile::tempdir().unwrap();
        let store = Arc::new(MemoryStore::new());
        let creds = CredentialStore::new(store.clone());
        creds.register("a@x.com", "pw").unwrap();
        creds.login("a@x.com", "pw").unwrap();

        let config = Config {
            data_dir: dir.path().to_string_lossy().to_string(),
            ..Config::default()
        };
        let mut app = App::new(store, config).unwrap();
        app.export().await;
        assert!(matches!(app.notice, Some(Notice::ExportFailed(_))));
    }

    #[tokio::test]
    async fn test_notices_are_shown_in_order() {
        let mut app = app_with(Arc::new(MemoryStore::new()));
        app.show_notices([Notice::SpeechUnsupported, Notice::NoSpeech]);
        app.show_notice(Notice::Registered);

        assert_eq!(app.notice, Some(Notice::SpeechUnsupported));
        app.dismiss_notice();
        assert_eq!(app.notice, Some(Notice::NoSpeech));
        app.dismiss_notice();
        assert_eq!(app.notice, Some(Notice::Registered));
        app.dismiss_notice();
        assert_eq!(app.notice, None);
    }

    #[tokio::test]
    async fn test_failed_logout_keeps_chat_open() {
        let store = Arc::new(FlakyStore::default());
        let creds = CredentialStore::new(store.clone());
        creds.register("a@x.com", "pw").unwrap();
        creds.login("a@x.com", "pw").unwrap();
        let mut app = App::new(store.clone(), Config::default()).unwrap();

        store.fail_writes(true);
        app.logout();
        assert_eq!(app.state, AppState::Chat);
        assert!(app.chat.is_some());
        assert!(matches!(app.notice, Some(Notice::StorageFailed(_))));
        assert_eq!(store.get(TOKEN_KEY).unwrap().as_deref(), Some("fake-jwt-token"));

        store.fail_writes(false);
        app.dismiss_notice();
        app.logout();
        assert_eq!(app.state, AppState::Login);
        assert!(app.chat.is_none());
    }

    #[tokio::test]
    async fn test_failed_register_and_login_show_notice() {
        let store = Arc::new(FlakyStore::default());
        let mut app = App::new(store.clone(), Config::default()).unwrap();
        store.fail_writes(true);

        app.show_register();
        app.form.email = "a@x.com".into();
        app.form.password = "pw".into();
        app.register();
        assert_eq!(app.state, AppState::Register);
        assert!(matches!(app.notice, Some(Notice::StorageFailed(_))));

        store.fail_writes(false);
        app.dismiss_notice();
        app.register();
        store.fail_writes(true);
        app.dismiss_notice();

        app.form.email = "a@x.com".into();
        app.form.password = "pw".into();
        app.login();
        assert_eq!(app.state, AppState::Login);
        assert!(app.chat.is_none());
        assert!(matches!(app.notice, Some(Notice::StorageFailed(_))));
    }
}
