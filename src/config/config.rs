use config::{Config, Environment, File};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use validator::{Validate, ValidationError};

use crate::error::{AppError, AppResult};
use crate::model::Action;

pub const DEFAULT_API_BASE: &str = "https://platform.api.onesky.io/1";
pub const ENV_PREFIX: &str = "ONESKY";

/// 未校验的选项：来自配置文件、环境变量和命令行
#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[validate(schema(function = "validate_locale"))]
pub struct RawOptions {
    #[validate(
        required(message = "please specify public and secret keys"),
        length(min = 1, message = "please specify public and secret keys")
    )]
    pub public_key: Option<String>,
    #[validate(
        required(message = "please specify public and secret keys"),
        length(min = 1, message = "please specify public and secret keys")
    )]
    pub secret_key: Option<String>,
    #[validate(
        required(message = "please specify project id"),
        length(min = 1, message = "please specify project id")
    )]
    pub project_id: Option<String>,
    pub action: Option<String>,
    #[validate(
        required(message = "please specify source file name"),
        length(min = 1, message = "please specify source file name")
    )]
    pub source_file: Option<String>,
    pub locale: Option<String>,
    pub output_file: Option<String>,
    pub output_dir: Option<String>,
    #[serde(default)]
    pub locales: bool,
    pub api_base: Option<String>,
    pub timeout_secs: Option<u64>,
}

fn validate_locale(opts: &RawOptions) -> Result<(), ValidationError> {
    let wants_locale = opts
        .action
        .as_deref()
        .map(|a| a.trim().eq_ignore_ascii_case(Action::LocaleFile.as_str()))
        .unwrap_or(false);

    if wants_locale && non_empty(&opts.locale).is_none() {
        let mut err = ValidationError::new("locale_required");
        err.message = Some("please specify locale".into());
        return Err(err);
    }
    Ok(())
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.is_empty())
}

/// 校验后的配置
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchConfig {
    pub public_key: String,
    pub secret_key: String,
    pub project_id: String,
    pub action: Action,
    pub source_file: String,
    /// 仅 LOCALE_FILE 时存在
    pub locale: Option<String>,
    pub output_file: PathBuf,
    pub output_dir: PathBuf,
    pub locales: bool,
    pub api_base: String,
    pub timeout_secs: Option<u64>,
}

impl RawOptions {
    /// 按 文件 < 环境变量 < overrides 的优先级加载
    pub fn load(path: &Path, overrides: RawOptions) -> AppResult<Self> {
        let builder = Config::builder()
            .add_source(File::from(path).required(false))
            .add_source(Environment::with_prefix(ENV_PREFIX));

        let builder = overrides
            .apply_to(builder)
            .map_err(|e| AppError::config(format!("invalid override: {}", e)))?;

        let config = builder
            .build()
            .map_err(|e| AppError::config(format!("Failed to load config: {}", e)))?;

        config
            .try_deserialize::<RawOptions>()
            .map_err(|e| AppError::config(format!("Failed to deserialize config: {}", e)))
    }

    fn apply_to(
        self,
        builder: config::ConfigBuilder<config::builder::DefaultState>,
    ) -> Result<config::ConfigBuilder<config::builder::DefaultState>, config::ConfigError> {
        builder
            .set_override_option("public_key", self.public_key)?
            .set_override_option("secret_key", self.secret_key)?
            .set_override_option("project_id", self.project_id)?
            .set_override_option("action", self.action)?
            .set_override_option("source_file", self.source_file)?
            .set_override_option("locale", self.locale)?
            .set_override_option("output_file", self.output_file)?
            .set_override_option("output_dir", self.output_dir)?
            // 命令行只能打开，不能关闭
            .set_override_option("locales", self.locales.then_some(true))?
            .set_override_option("api_base", self.api_base)?
            .set_override_option("timeout_secs", self.timeout_secs.map(|secs| secs as i64))
    }

    /// 校验并填充默认值，不做任何 IO
    pub fn into_config(self) -> AppResult<FetchConfig> {
        self.validate()?;

        let action = match non_empty(&self.action) {
            Some(action) => action.parse::<Action>()?,
            None => Action::default(),
        };

        let required = |value: Option<String>, what: &str| {
            value
                .filter(|v| !v.is_empty())
                .ok_or_else(|| AppError::config(format!("please specify {}", what)))
        };

        let source_file = required(self.source_file, "source file name")?;
        let output_file = non_empty(&self.output_file)
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(format!("{}.i18n.json", source_file)));

        let locale = match action {
            Action::LocaleFile => Some(required(self.locale, "locale")?),
            Action::MultilingualFile => None,
        };

        Ok(FetchConfig {
            public_key: required(self.public_key, "public and secret keys")?,
            secret_key: required(self.secret_key, "public and secret keys")?,
            project_id: required(self.project_id, "project id")?,
            action,
            source_file,
            locale,
            output_file,
            output_dir: non_empty(&self.output_dir).map(PathBuf::from).unwrap_or_default(),
            locales: self.locales,
            api_base: non_empty(&self.api_base)
                .unwrap_or(DEFAULT_API_BASE)
                .trim_end_matches('/')
                .to_string(),
            timeout_secs: self.timeout_secs.filter(|secs| *secs > 0),
        })
    }
}
