use crate::error::FileError;
use crate::models::candidate::CandidateFile;
use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use tokio::fs;

/// 根据扩展名推断文件类型
pub fn guess_media_type(path: &Path) -> String {
    mime_guess::from_path(path)
        .first_or_octet_stream()
        .essence_str()
        .to_string()
}

/// 从磁盘读取单个文件并转换为 CandidateFile
pub async fn load_candidate(path: &Path) -> Result<CandidateFile> {
    let content = fs::read(path)
        .await
        .map_err(|e| FileError::read_failed(path.display().to_string(), e))?;

    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .with_context(|| format!("无法获取文件名: {}", path.display()))?;

    Ok(CandidateFile::new(name, guess_media_type(path), content))
}

/// 加载用户给出的所有路径
///
/// 目录只扫描第一层，按文件名排序；单个文件读取失败只记录警告。
/// 不在这里过滤类型：类型校验属于 `ItemValidator`。
pub async fn load_candidates(paths: &[PathBuf]) -> Result<Vec<CandidateFile>> {
    let mut candidates = Vec::new();

    for path in paths {
        let metadata = fs::metadata(path)
            .await
            .with_context(|| format!("路径不存在: {}", path.display()))?;

        let files = if metadata.is_dir() {
            list_directory(path).await?
        } else {
            vec![path.clone()]
        };

        for file in files {
            match load_candidate(&file).await {
                Ok(candidate) => {
                    tracing::debug!(
                        "已读取: {} ({} 字节)",
                        candidate.name(),
                        candidate.size()
                    );
                    candidates.push(candidate);
                }
                Err(e) => {
                    tracing::warn!("读取文件失败 {}: {}", file.display(), e);
                }
            }
        }
    }

    Ok(candidates)
}

async fn list_directory(folder: &Path) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    let mut entries = fs::read_dir(folder)
        .await
        .with_context(|| format!("无法读取文件夹: {}", folder.display()))?;

    while let Some(entry) = entries.next_entry().await? {
        let path = entry.path();
        if entry.file_type().await?.is_file() {
            files.push(path);
        }
    }

    if files.is_empty() {
        tracing::warn!("在文件夹 {} 中没有找到文件", folder.display());
    }

    files.sort();
    Ok(files)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_guess_media_type() {
        assert_eq!(guess_media_type(Path::new("boleto.pdf")), "application/pdf");
        assert_eq!(guess_media_type(Path::new("boleto.PDF")), "application/pdf");
        assert_eq!(guess_media_type(Path::new("notes.txt")), "text/plain");
        assert_eq!(
            guess_media_type(Path::new("no_extension")),
            "application/octet-stream"
        );
    }

    #[tokio::test]
    async fn test_load_directory_sorted() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("b.pdf"), b"%PDF-b").unwrap();
        std::fs::write(dir.path().join("a.pdf"), b"%PDF-aa").unwrap();
        std::fs::create_dir(dir.path().join("nested")).unwrap();

        let candidates = load_candidates(&[dir.path().to_path_buf()]).await.unwrap();

        let names: Vec<&str> = candidates.iter().map(|c| c.name()).collect();
        assert_eq!(names, vec!["a.pdf", "b.pdf"]);
        assert_eq!(candidates[0].size(), 7);
        assert_eq!(candidates[0].media_type(), "application/pdf");
    }

    #[tokio::test]
    async fn test_load_missing_file_reports_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_candidate(&dir.path().join("gone.pdf")).await.unwrap_err();

        let file_error = err.downcast_ref::<FileError>().unwrap();
        assert!(matches!(file_error, FileError::NotFound { path } if path.ends_with("gone.pdf")));
    }

    #[tokio::test]
    async fn test_missing_path_is_error() {
        let dir = tempfile::tempdir().unwrap();
        let result = load_candidates(&[dir.path().join("missing.pdf")]).await;
        assert!(result.is_err());
    }
}
