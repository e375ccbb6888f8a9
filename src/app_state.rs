/// Represents the different screens of the application
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppState {
    Login,
    Register,
    Chat,
    QuitConfirm,
    Quit,
}

/// Which field of the login/register form has focus
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AuthField {
    #[default]
    Email,
    Password,
}

impl AuthField {
    pub fn toggle(self) -> Self {
        match self {
            AuthField::Email => AuthField::Password,
            AuthField::Password => AuthField::Email,
        }
    }
}
