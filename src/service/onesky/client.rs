use reqwest::Client;
use serde_json::Value;
use std::sync::Arc;

use crate::config::FetchConfig;
use crate::error::{AppError, AppResult};
use crate::model::ResponseEnvelope;
use crate::service::onesky::auth;
use crate::util::time::{Clock, SystemClock};

const USER_AGENT: &str = concat!("onesky-sync/", env!("CARGO_PKG_VERSION"));

/// OneSky 平台 API 客户端，每次调用只发一个 GET，不重试
#[derive(Clone)]
pub struct OneSkyClient {
    http: Client,
    clock: Arc<dyn Clock>,
}

impl OneSkyClient {
    pub fn new() -> AppResult<Self> {
        let http = Client::builder()
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| AppError::remote(format!("Failed to build HTTP client: {}", e)))?;
        Ok(Self::with_parts(http, Arc::new(SystemClock)))
    }

    pub fn with_parts(http: Client, clock: Arc<dyn Clock>) -> Self {
        Self { http, clock }
    }

    /// 拉取翻译并拆掉 `{meta, data}` 外壳
    pub async fn fetch_translations(&self, config: &FetchConfig) -> AppResult<Value> {
        let url = auth::request_url(config, self.clock.as_ref())?;
        tracing::info!("📥 fetching {} for project {}", config.action, config.project_id);
        tracing::debug!("GET {}", auth::redacted(&url));

        let response = self.http.get(url).send().await?;
        let status = response.status();
        let bytes = response.bytes().await?;

        let envelope = match ResponseEnvelope::from_bytes(&bytes) {
            Ok(envelope) => envelope,
            Err(_) if !status.is_success() => {
                return Err(AppError::remote(format!("HTTP status {}", status)));
            }
            Err(e) => return Err(e),
        };

        // HTTP 失败优先；只有 meta 自己也报错时才用服务端的 message
        if !status.is_success() && !envelope.is_service_error() {
            return Err(AppError::remote(format!("HTTP status {}", status)));
        }

        let payload = envelope.into_payload().map_err(|e| {
            tracing::error!("❌ OneSky rejected the request: {}", e);
            e
        })?;

        tracing::info!("✅ received {} bytes (HTTP {})", bytes.len(), status.as_u16());
        Ok(payload)
    }
}

impl std::fmt::Debug for OneSkyClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OneSkyClient").finish_non_exhaustive()
    }
}
