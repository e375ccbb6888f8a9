// UI Constants
pub const APP_TITLE: &str = "Chatbot";
pub const INPUT_PLACEHOLDER: &str = "Send a message...";
pub const LISTENING_HINT: &str = "Listening... Speak now";
pub const SPINNER_FRAMES: [&str; 4] = ["◐", "◓", "◑", "◒"];

// Storage Constants
pub const TOKEN_KEY: &str = "token";
pub const USER_KEY: &str = "user";
pub const MESSAGES_KEY_PREFIX: &str = "messages_";
pub const HISTORY_KEY_PREFIX: &str = "history_";
pub const SESSION_TOKEN: &str = "fake-jwt-token";
pub const STORE_FILE_NAME: &str = "store.json";
pub const EXPORT_DIR_NAME: &str = "exports";

// Message id Constants
pub const MESSAGE_ID_LEN: usize = 7;
pub const PLACEHOLDER_ID_PREFIX: &str = "typing-";
pub const RESPONSE_ID_PREFIX: &str = "response-";
