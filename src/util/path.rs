use std::path::{Path, PathBuf};
use tokio::fs;
use walkdir::WalkDir;

use crate::error::AppResult;
use crate::model::VirtualFile;

/// 收集上游文件。目录递归读取，路径相对于该目录；单个文件只保留文件名
pub async fn collect_inputs(paths: &[PathBuf]) -> AppResult<Vec<VirtualFile>> {
    let mut files = Vec::new();

    for root in paths {
        let metadata = fs::metadata(root).await?;

        if metadata.is_file() {
            let name = root.file_name().map(PathBuf::from).unwrap_or_else(|| root.clone());
            files.push(VirtualFile::new(name, fs::read(root).await?));
            continue;
        }

        let mut entries: Vec<PathBuf> = Vec::new();
        for entry in WalkDir::new(root).sort_by_file_name() {
            let entry = entry.map_err(std::io::Error::from)?;
            if entry.file_type().is_file() {
                entries.push(entry.into_path());
            }
        }

        for path in entries {
            let relative = relative_to(&path, root);
            files.push(VirtualFile::new(relative, fs::read(&path).await?));
        }
    }

    tracing::debug!("collected {} input file(s)", files.len());
    Ok(files)
}

fn relative_to(path: &Path, root: &Path) -> PathBuf {
    path.strip_prefix(root)
        .map(Path::to_path_buf)
        .unwrap_or_else(|_| path.to_path_buf())
}

/// 语言代码取第一个 '-' 之前的部分，如 en-US -> en
pub fn short_lang_code(locale: &str) -> &str {
    locale.split('-').next().unwrap_or(locale)
}
