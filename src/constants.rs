// UI Constants
pub const HEAVY_DOWN_AND_RIGHT: char = '┏';
pub const HEAVY_DOWN_AND_LEFT: char = '┓';
pub const HEAVY_HORIZONTAL: char = '━';

pub const TYPING_CURSOR: char = '|';
pub const SPINNER_FRAMES: [&str; 4] = ["◐", "◓", "◑", "◒"];
pub const TICK_RATE_MS: u64 = 80;
pub const SCROLL_STEP: u16 = 5;

// API Constants
pub const DEFAULT_ENDPOINT: &str = "http://localhost:8000/rag";
pub const REQUEST_SUMMARY_CHARS: usize = 50;

// Reveal timing
pub const DEFAULT_WORD_DELAY_MS: u64 = 50;
pub const DEFAULT_CURSOR_LINGER_MS: u64 = 1000;
pub const MAX_DELAY_MS: u64 = 5000;

// Files
pub const APP_DIR_NAME: &str = "qa-chat";
pub const CONFIG_FILE_NAME: &str = "config.json";
pub const LOG_BASENAME: &str = "qa-chat";
pub const LOG_ROTATE_BYTES: u64 = 1_000_000;
pub const LOG_FILES_KEPT: usize = 3;
