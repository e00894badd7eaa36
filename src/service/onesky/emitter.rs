use serde_json::Value;
use std::collections::HashMap;
use std::path::{Component, Path};

use crate::config::FetchConfig;
use crate::error::{AppError, AppResult};
use crate::model::VirtualFile;
use crate::util::path::short_lang_code;

pub const LOCALE_FILE_NAME: &str = "messages.json";

/// 根据配置生成输出文件：合并成一个文件，或者每个语言一个 messages.json
pub fn emit_outputs(config: &FetchConfig, payload: &Value) -> AppResult<Vec<VirtualFile>> {
    let files = if config.locales {
        emit_per_locale(config, payload)?
    } else {
        vec![VirtualFile::pretty_json(&config.output_file, payload)?]
    };

    for file in &files {
        tracing::info!("📝 emit {}", file.path.display());
    }
    Ok(files)
}

fn emit_per_locale(config: &FetchConfig, payload: &Value) -> AppResult<Vec<VirtualFile>> {
    let locales = payload.as_object().ok_or_else(|| {
        AppError::remote("expected an object keyed by locale for per-locale output")
    })?;

    let mut seen: HashMap<&str, &str> = HashMap::new();
    let mut files = Vec::with_capacity(locales.len());

    for (locale, messages) in locales {
        let lang = locale_dir(locale)?;
        if let Some(previous) = seen.insert(lang, locale) {
            tracing::warn!("⚠️  {} and {} both map to {}/, {} wins", previous, locale, lang, locale);
        }

        let path = config.output_dir.join(lang).join(LOCALE_FILE_NAME);
        files.push(VirtualFile::pretty_json(path, messages)?);
    }

    Ok(files)
}

/// 语言目录必须是单独一层普通目录名，不能是绝对路径、`..` 或带分隔符
fn locale_dir(locale: &str) -> AppResult<&str> {
    let lang = short_lang_code(locale);
    let mut components = Path::new(lang).components();
    match (components.next(), components.next()) {
        (Some(Component::Normal(_)), None) => Ok(lang),
        _ => Err(AppError::remote(format!(
            "locale key '{}' does not map to a directory name",
            locale
        ))),
    }
}
