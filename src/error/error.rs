use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    /// 配置缺失或非法，发生在任何网络请求之前
    #[error("Configuration error: {0}")]
    Config(String),

    /// OneSky 返回的业务错误，或者网络/解码失败
    #[error("Remote service error: {0}")]
    RemoteService(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Operation cancelled")]
    Cancelled,
}

impl AppError {
    pub fn config(msg: impl Into<String>) -> Self {
        AppError::Config(msg.into())
    }

    pub fn remote(msg: impl Into<String>) -> Self {
        AppError::RemoteService(msg.into())
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(err: validator::ValidationErrors) -> Self {
        AppError::Config(err.to_string())
    }
}

impl From<reqwest::Error> for AppError {
    fn from(err: reqwest::Error) -> Self {
        // URL 里带着 api_key 和 dev_hash，不能出现在错误信息中
        let err = err.without_url();
        let mut message = err.to_string();
        let mut source = std::error::Error::source(&err);
        while let Some(cause) = source {
            message.push_str(": ");
            message.push_str(&cause.to_string());
            source = cause.source();
        }
        AppError::RemoteService(message)
    }
}

pub type AppResult<T> = Result<T, AppError>;
