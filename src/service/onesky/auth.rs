use reqwest::Url;

use crate::config::FetchConfig;
use crate::error::{AppError, AppResult};
use crate::model::Action;
use crate::util::hash;
use crate::util::time::Clock;

pub const MULTILINGUAL_FILE_FORMAT: &str = "I18NEXT_MULTILINGUAL_JSON";

/// OneSky 翻译导出接口
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endpoint {
    /// GET /projects/{id}/translations
    Translations,
    /// GET /projects/{id}/translations/multilingual
    Multilingual,
}

impl Endpoint {
    pub fn for_action(action: Action) -> Self {
        match action {
            Action::LocaleFile => Endpoint::Translations,
            Action::MultilingualFile => Endpoint::Multilingual,
        }
    }

    pub fn path(&self, project_id: &str) -> String {
        match self {
            Endpoint::Translations => format!("/projects/{}/translations", project_id),
            Endpoint::Multilingual => format!("/projects/{}/translations/multilingual", project_id),
        }
    }
}

/// 签名参数
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Signature {
    pub timestamp: i64,
    pub dev_hash: String,
}

impl Signature {
    pub fn new(timestamp: i64, secret_key: &str) -> Self {
        Self {
            timestamp,
            dev_hash: hash::dev_hash(timestamp, secret_key),
        }
    }
}

/// 拼出带签名的 URL。`params` 追加在认证参数之后，`source_file_name` 放在最后
pub fn build_authenticated_url(
    api_base: &str,
    endpoint: &str,
    public_key: &str,
    params: &[(&str, &str)],
    source_file: &str,
    signature: &Signature,
) -> AppResult<Url> {
    let timestamp = signature.timestamp.to_string();

    let mut query: Vec<(&str, &str)> = vec![
        ("api_key", public_key),
        ("timestamp", timestamp.as_str()),
        ("dev_hash", signature.dev_hash.as_str()),
    ];
    query.extend_from_slice(params);
    query.push(("source_file_name", source_file));

    let base = format!("{}{}", api_base.trim_end_matches('/'), endpoint);
    Url::parse_with_params(&base, &query)
        .map_err(|e| AppError::config(format!("invalid api base '{}': {}", api_base, e)))
}

/// 按配置选择接口和参数，时间戳取自 `clock`
pub fn request_url(config: &FetchConfig, clock: &dyn Clock) -> AppResult<Url> {
    let signature = Signature::new(clock.unix_timestamp(), &config.secret_key);
    let endpoint = Endpoint::for_action(config.action);

    let params: Vec<(&str, &str)> = match endpoint {
        Endpoint::Translations => {
            let locale = config
                .locale
                .as_deref()
                .ok_or_else(|| AppError::config("please specify locale"))?;
            vec![("locale", locale)]
        }
        Endpoint::Multilingual => vec![("file_format", MULTILINGUAL_FILE_FORMAT)],
    };

    build_authenticated_url(
        &config.api_base,
        &endpoint.path(&config.project_id),
        &config.public_key,
        &params,
        &config.source_file,
        &signature,
    )
}

/// 日志用，去掉 api_key 和 dev_hash
pub fn redacted(url: &Url) -> String {
    let mut safe = url.clone();
    let pairs: Vec<(String, String)> = url
        .query_pairs()
        .map(|(k, v)| {
            let value = match k.as_ref() {
                "api_key" | "dev_hash" => "***".to_string(),
                _ => v.into_owned(),
            };
            (k.into_owned(), value)
        })
        .collect();
    safe.query_pairs_mut().clear().extend_pairs(pairs);
    safe.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::RawOptions;
    use crate::util::time::MockClock;
    use std::collections::HashMap;

    fn fixed_clock(ts: i64) -> MockClock {
        let mut clock = MockClock::new();
        clock.expect_unix_timestamp().return_const(ts);
        clock
    }

    fn config(action: Option<&str>, locale: Option<&str>) -> FetchConfig {
        RawOptions {
            public_key: Some("pub-key".into()),
            secret_key: Some("abc".into()),
            project_id: Some("314".into()),
            action: action.map(Into::into),
            locale: locale.map(Into::into),
            source_file: Some("en.json".into()),
            ..Default::default()
        }
        .into_config()
        .unwrap()
    }

    fn query(url: &Url) -> HashMap<String, String> {
        url.query_pairs().into_owned().collect()
    }

    #[test]
    fn signature_hashes_timestamp_then_secret() {
        let sig = Signature::new(1000, "abc");
        assert_eq!(sig.dev_hash, hash::md5_hex(b"1000abc"));
    }

    #[test]
    fn multilingual_url_has_file_format() {
        let url = request_url(&config(None, None), &fixed_clock(1000)).unwrap();

        assert_eq!(url.host_str(), Some("platform.api.onesky.io"));
        assert_eq!(url.path(), "/1/projects/314/translations/multilingual");

        let q = query(&url);
        assert_eq!(q["api_key"], "pub-key");
        assert_eq!(q["timestamp"], "1000");
        assert_eq!(q["dev_hash"], hash::md5_hex(b"1000abc"));
        assert_eq!(q["file_format"], MULTILINGUAL_FILE_FORMAT);
        assert_eq!(q["source_file_name"], "en.json");
        assert!(!q.contains_key("locale"));
    }

    #[test]
    fn locale_url_has_locale() {
        let url = request_url(&config(Some("LOCALE_FILE"), Some("zh-TW")), &fixed_clock(1000)).unwrap();

        assert_eq!(url.path(), "/1/projects/314/translations");
        let q = query(&url);
        assert_eq!(q["locale"], "zh-TW");
        assert!(!q.contains_key("file_format"));
    }

    #[test]
    fn same_timestamp_gives_same_url() {
        let config = config(None, None);
        let a = request_url(&config, &fixed_clock(1234)).unwrap();
        let b = request_url(&config, &fixed_clock(1234)).unwrap();
        let c = request_url(&config, &fixed_clock(1235)).unwrap();
        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn query_values_are_encoded() {
        let url = build_authenticated_url(
            "https://example.test/1",
            "/projects/1/translations",
            "k",
            &[],
            "dir/my file&x.json",
            &Signature::new(1, "s"),
        )
        .unwrap();
        assert_eq!(query(&url)["source_file_name"], "dir/my file&x.json");
        assert!(!url.as_str().contains("my file"));
    }

    #[test]
    fn bad_api_base_is_config_error() {
        let err = build_authenticated_url("not a url", "/x", "k", &[], "f", &Signature::new(1, "s"))
            .unwrap_err();
        assert!(matches!(err, AppError::Config(_)));
    }

    #[test]
    fn redacted_hides_credentials() {
        let url = request_url(&config(None, None), &fixed_clock(1000)).unwrap();
        let text = redacted(&url);
        assert!(!text.contains("pub-key"));
        assert!(!text.contains(&hash::md5_hex(b"1000abc")));
        assert!(text.contains("timestamp=1000"));
    }
}
