use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::AppError;

/// OneSky 导出动作
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Action {
    /// 所有语言合并在一个 i18next 多语言 JSON 里
    #[default]
    MultilingualFile,
    /// 单个语言的翻译文件
    LocaleFile,
}

impl Action {
    pub fn as_str(&self) -> &'static str {
        match self {
            Action::MultilingualFile => "MULTILINGUAL_FILE",
            Action::LocaleFile => "LOCALE_FILE",
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Action {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "MULTILINGUAL_FILE" => Ok(Action::MultilingualFile),
            "LOCALE_FILE" => Ok(Action::LocaleFile),
            other => Err(AppError::config(format!(
                "unknown action '{}', expected MULTILINGUAL_FILE or LOCALE_FILE",
                other
            ))),
        }
    }
}
