use std::path::PathBuf;

/// 流水线中的一个文件：相对路径 + 内容
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VirtualFile {
    pub path: PathBuf,
    pub contents: Vec<u8>,
}

impl VirtualFile {
    pub fn new(path: impl Into<PathBuf>, contents: impl Into<Vec<u8>>) -> Self {
        Self {
            path: path.into(),
            contents: contents.into(),
        }
    }

    /// 2 空格缩进的 JSON 文件
    pub fn pretty_json(
        path: impl Into<PathBuf>,
        value: &serde_json::Value,
    ) -> serde_json::Result<Self> {
        let contents = serde_json::to_vec_pretty(value)?;
        Ok(Self::new(path, contents))
    }
}

/// 一次阶段执行的结果：原样透传的输入 + 新生成的文件
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StageOutput {
    pub passthrough: Vec<VirtualFile>,
    pub produced: Vec<VirtualFile>,
}

impl StageOutput {
    /// 按透传在前、新文件在后的顺序合并
    pub fn into_combined(self) -> Vec<VirtualFile> {
        let mut files = self.passthrough;
        files.extend(self.produced);
        files
    }
}
