use std::future::Future;
use std::time::Duration;

use crate::config::FetchConfig;
use crate::error::{AppError, AppResult};
use crate::model::{StageOutput, VirtualFile};
use crate::service::onesky::{emitter, OneSkyClient};

/// 构建流水线中的一步：透传上游文件，并追加从 OneSky 拉下来的翻译文件
#[derive(Debug, Clone)]
pub struct TranslationStage {
    config: FetchConfig,
    client: OneSkyClient,
}

impl TranslationStage {
    pub fn new(config: FetchConfig, client: OneSkyClient) -> Self {
        Self { config, client }
    }

    /// 出错时不会返回任何新文件
    pub async fn run(&self, inputs: Vec<VirtualFile>) -> AppResult<StageOutput> {
        let payload = self.client.fetch_translations(&self.config).await?;
        let produced = emitter::emit_outputs(&self.config, &payload)?;

        tracing::info!(
            "✅ stage finished: {} passed through, {} produced",
            inputs.len(),
            produced.len()
        );

        Ok(StageOutput {
            passthrough: inputs,
            produced,
        })
    }

    /// `run` 外面套上可选超时，`cancel` 完成时放弃请求
    pub async fn run_bounded<C>(&self, inputs: Vec<VirtualFile>, cancel: C) -> AppResult<StageOutput>
    where
        C: Future<Output = ()>,
    {
        let bounded = async {
            match self.config.timeout_secs {
                Some(secs) => {
                    match tokio::time::timeout(Duration::from_secs(secs), self.run(inputs)).await {
                        Ok(result) => result,
                        Err(_) => Err(AppError::remote(format!("request timed out after {} s", secs))),
                    }
                }
                None => self.run(inputs).await,
            }
        };

        tokio::select! {
            result = bounded => result,
            _ = cancel => {
                tracing::warn!("🛑 cancelled, no files written");
                Err(AppError::Cancelled)
            }
        }
    }
}
