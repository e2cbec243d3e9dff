// src/locale.rs

use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Language of every user-facing string the client prints.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    #[default]
    En,
    Vi,
}

#[derive(Debug)]
pub struct Strings {
    pub title: &'static str,
    pub welcome_title: &'static str,
    pub welcome_body: &'static str,
    pub thinking: &'static str,
    pub fallback: &'static str,
    pub you: &'static str,
    pub assistant: &'static str,
    pub welcome_hint: &'static str,
    pub chat_hint: &'static str,
    pub quit_title: &'static str,
    pub quit_prompt: &'static str,
    pub suggestions: &'static [&'static str],
}

static EN: Strings = Strings {
    title: "Legal Assistant",
    welcome_title: "Welcome!",
    welcome_body: "Ask any question about the law and the assistant will look it up for you. Pick a suggestion or type your own question below.",
    thinking: "AI is thinking...",
    fallback: "There was an error connecting to the assistant. Please try again later.",
    you: "you",
    assistant: "assistant",
    welcome_hint: "Up/Down to pick a suggestion, Enter to ask, Esc to quit.",
    chat_hint: "Type your question and press Enter. PgUp/PgDn to scroll, Esc to quit.",
    quit_title: "Confirm Quit",
    quit_prompt: "Are you sure you want to quit?\n\nPress 'y' to confirm or 'n' to cancel.",
    suggestions: &[
        "What documents do I need to register a marriage?",
        "What is the fine for running a red light?",
        "What are the conditions for founding a company?",
    ],
};

static VI: Strings = Strings {
    title: "Trợ lý pháp luật",
    welcome_title: "Xin chào!",
    welcome_body: "Hãy đặt câu hỏi về pháp luật, trợ lý sẽ tra cứu giúp bạn. Chọn một gợi ý hoặc nhập câu hỏi của bạn bên dưới.",
    thinking: "AI đang suy nghĩ...",
    fallback: "Đã có lỗi khi kết nối tới trợ lý. Vui lòng thử lại sau.",
    you: "bạn",
    assistant: "trợ lý",
    welcome_hint: "Lên/Xuống để chọn gợi ý, Enter để hỏi, Esc để thoát.",
    chat_hint: "Nhập câu hỏi rồi nhấn Enter. PgUp/PgDn để cuộn, Esc để thoát.",
    quit_title: "Xác nhận thoát",
    quit_prompt: "Bạn có chắc muốn thoát?\n\nNhấn 'y' để thoát hoặc 'n' để ở lại.",
    suggestions: &[
        "Thủ tục đăng ký kết hôn gồm những giấy tờ gì?",
        "Mức phạt khi vượt đèn đỏ là bao nhiêu?",
        "Điều kiện để thành lập doanh nghiệp là gì?",
    ],
};

impl Locale {
    pub fn strings(self) -> &'static Strings {
        match self {
            Locale::En => &EN,
            Locale::Vi => &VI,
        }
    }
}

impl FromStr for Locale {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "en" | "english" => Ok(Locale::En),
            "vi" | "vietnamese" => Ok(Locale::Vi),
            other => Err(format!("unknown locale '{}'", other)),
        }
    }
}
