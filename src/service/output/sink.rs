use std::path::{Path, PathBuf};
use tokio::fs;

use crate::error::AppResult;
use crate::model::VirtualFile;

/// 把文件写到目标目录下（相当于构建工具的 dest）
#[derive(Debug, Clone)]
pub struct OutputSink {
    root: PathBuf,
}

impl OutputSink {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// 绝对路径原样使用，相对路径挂到 root 下
    pub fn resolve(&self, path: &Path) -> PathBuf {
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.root.join(path)
        }
    }

    pub async fn write_all(&self, files: &[VirtualFile]) -> AppResult<Vec<PathBuf>> {
        let mut written = Vec::with_capacity(files.len());

        for file in files {
            let target = self.resolve(&file.path);
            if let Some(parent) = target.parent() {
                if !parent.as_os_str().is_empty() {
                    fs::create_dir_all(parent).await?;
                }
            }
            fs::write(&target, &file.contents).await?;
            tracing::debug!("wrote {} ({} bytes)", target.display(), file.contents.len());
            written.push(target);
        }

        Ok(written)
    }
}
