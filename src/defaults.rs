//! Central place for all default values and fixed user-facing text.
//! Update these and the whole app picks them up.

use std::time::Duration;

pub struct Defaults;

impl Defaults {
    pub const APP_TITLE: &'static str = "YouTube Script Cloner";

    /* Gemini API */
    pub const API_BASE: &'static str = "https://generativelanguage.googleapis.com";
    pub const MODEL: &'static str = "gemini-2.5-flash";

    /* Logging */
    pub const LOG_FILE: &'static str = "script-cloner.log";
    pub const LOG_FILTER: &'static str = "info";

    /* TUI timing */
    pub const POLL_INTERVAL: Duration = Duration::from_millis(100);
    pub const COPY_CONFIRM: Duration = Duration::from_secs(2);

    /* User-facing messages */
    pub const MSG_EMPTY_SCRIPT: &'static str = "대본 내용을 입력해주세요.";
    pub const MSG_ANALYSIS_FAILED: &'static str =
        "대본 분석에 실패했습니다. 내용을 확인하고 다시 시도해주세요.";
    pub const MSG_INVALID_ANALYSIS: &'static str =
        "분석 결과 형식이 올바르지 않습니다. 다시 시도해주세요.";
    pub const MSG_GENERATION_FAILED: &'static str =
        "새 대본 작성에 실패했습니다. 잠시 후 다시 시도해주세요.";
    pub const GENERATION_FALLBACK: &'static str = "대본 생성에 실패했습니다.";
}
