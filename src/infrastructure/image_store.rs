//! 图片存储 - 基础设施层
//!
//! 每次运行对应 `<root>/<时间戳>/` 一个目录，图片以 `<标题>.png` 命名

use std::fs;
use std::path::{Path, PathBuf};

use chrono::{NaiveDate, NaiveDateTime};
use tracing::{debug, info, warn};

use crate::error::ExtractionError;

/// 单次运行的图片目录
#[derive(Debug, Clone)]
pub struct ImageStore {
    /// 相对路径，用于拼接图片标签，如 `images/20240101120000`
    relative_dir: String,
    dir: PathBuf,
}

impl ImageStore {
    /// 创建（或复用）`root/stamp` 目录
    pub fn create(root: impl AsRef<Path>, stamp: &str) -> Result<Self, ExtractionError> {
        let root = root.as_ref();
        let dir = root.join(stamp);
        fs::create_dir_all(&dir).map_err(|source| ExtractionError::OutputDirFailed {
            path: dir.clone(),
            source,
        })?;
        debug!("图片目录: {}", dir.display());

        let relative_dir = format!(
            "{}/{}",
            root.to_string_lossy().trim_end_matches(['/', '\\']),
            stamp
        );
        Ok(Self { relative_dir, dir })
    }

    /// 以当前时间作为目录名创建
    pub fn for_now(root: impl AsRef<Path>, format: &str) -> Result<Self, ExtractionError> {
        let stamp = chrono::Local::now().format(format).to_string();
        Self::create(root, &stamp)
    }

    pub fn relative_dir(&self) -> &str {
        &self.relative_dir
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// 标题对应的图片路径
    pub fn image_path(&self, title: &str) -> PathBuf {
        self.dir.join(format!("{}.png", file_stem(title)))
    }

    /// 写入图片；文件已存在时不覆盖，始终返回图片路径
    pub fn save_if_absent(&self, title: &str, bytes: &[u8]) -> Result<PathBuf, ExtractionError> {
        let path = self.image_path(title);
        if path.exists() {
            debug!("图片已存在，跳过写入: {}", path.display());
            return Ok(path);
        }

        fs::write(&path, bytes).map_err(|source| ExtractionError::ImageWriteFailed {
            path: path.clone(),
            source,
        })?;
        debug!("写入图片: {} ({} 字节)", path.display(), bytes.len());
        Ok(path)
    }
}

/// 标题中的路径分隔符替换为 `_`
pub fn file_stem(title: &str) -> String {
    title.replace(['/', '\\'], "_")
}

/// 目录名是否为按 `format` 生成的运行时间戳
pub fn is_run_dir_name(name: &str, format: &str) -> bool {
    NaiveDateTime::parse_from_str(name, format).is_ok()
        || NaiveDate::parse_from_str(name, format).is_ok()
}

/// 只保留最近的 `keep` 个运行目录（含本次运行的 `current`）
///
/// 只处理名称符合 `format` 的目录，`current` 永远不会被删除。
/// 返回删除的目录数；删除失败只记录警告
pub fn prune_runs(root: &Path, format: &str, current: &Path, keep: usize) -> usize {
    let entries = match fs::read_dir(root) {
        Ok(entries) => entries,
        Err(e) => {
            warn!("无法读取图片根目录 {}: {}", root.display(), e);
            return 0;
        }
    };

    let current_name = current.file_name();
    let mut runs: Vec<PathBuf> = entries
        .flatten()
        .filter(|entry| entry.path().is_dir())
        .filter(|entry| Some(entry.file_name().as_os_str()) != current_name)
        .filter(|entry| {
            entry
                .file_name()
                .to_str()
                .is_some_and(|name| is_run_dir_name(name, format))
        })
        .map(|entry| entry.path())
        .collect();

    // 本次运行占一个名额
    let keep_others = keep.saturating_sub(1);
    if runs.len() <= keep_others {
        return 0;
    }

    runs.sort();
    let stale = runs.len() - keep_others;
    let mut removed = 0;
    for path in runs.into_iter().take(stale) {
        match fs::remove_dir_all(&path) {
            Ok(()) => removed += 1,
            Err(e) => warn!("删除旧图片目录失败 {}: {}", path.display(), e),
        }
    }
    info!("🧹 清理了 {} 个旧图片目录", removed);
    removed
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_existing_image_is_not_rewritten() {
        let tmp = tempfile::tempdir().unwrap();
        let store = ImageStore::create(tmp.path(), "20240101120000").unwrap();

        let first = store.save_if_absent("2.介绍", b"first").unwrap();
        let second = store.save_if_absent("2.介绍", b"second").unwrap();

        assert_eq!(first, second);
        assert_eq!(fs::read(&first).unwrap(), b"first");
        assert!(first.ends_with("2.介绍.png"));
    }

    #[test]
    fn test_create_is_idempotent() {
        let tmp = tempfile::tempdir().unwrap();
        let root = tmp.path().join("images");

        let store = ImageStore::create(&root, "20240101120000").unwrap();
        ImageStore::create(&root, "20240101120000").unwrap();

        assert!(store.dir().is_dir());
        assert!(store.relative_dir().ends_with("images/20240101120000"));
    }

    #[test]
    fn test_title_with_separator() {
        assert_eq!(file_stem("1.输入/输出"), "1.输入_输出");
    }

    const FORMAT: &str = "%Y%m%d%H%M%S";

    #[test]
    fn test_prune_keeps_newest_runs() {
        let tmp = tempfile::tempdir().unwrap();
        for stamp in ["20240101000000", "20240102000000"] {
            ImageStore::create(tmp.path(), stamp).unwrap();
        }
        let current = ImageStore::create(tmp.path(), "20240103000000").unwrap();

        assert_eq!(prune_runs(tmp.path(), FORMAT, current.dir(), 2), 1);
        assert!(!tmp.path().join("20240101000000").exists());
        assert!(tmp.path().join("20240102000000").exists());
        assert!(current.dir().exists());
        assert_eq!(prune_runs(tmp.path(), FORMAT, current.dir(), 2), 0);
    }

    #[test]
    fn test_prune_never_removes_current_run() {
        let tmp = tempfile::tempdir().unwrap();
        ImageStore::create(tmp.path(), "20240101000000").unwrap();
        // 固定的目录名可能比旧目录排序更靠前
        let current = ImageStore::create(tmp.path(), "20000101000000").unwrap();
        current.save_if_absent("1.a", b"png").unwrap();

        assert_eq!(prune_runs(tmp.path(), FORMAT, current.dir(), 0), 1);
        assert!(current.image_path("1.a").exists());
        assert!(!tmp.path().join("20240101000000").exists());
    }

    #[test]
    fn test_prune_skips_non_run_dirs() {
        let tmp = tempfile::tempdir().unwrap();
        fs::create_dir(tmp.path().join("src")).unwrap();
        fs::create_dir(tmp.path().join("2024-old")).unwrap();
        ImageStore::create(tmp.path(), "20230101000000").unwrap();
        let current = ImageStore::create(tmp.path(), "20240101000000").unwrap();

        assert_eq!(prune_runs(tmp.path(), FORMAT, current.dir(), 1), 1);
        assert!(tmp.path().join("src").is_dir());
        assert!(tmp.path().join("2024-old").is_dir());
        assert!(!tmp.path().join("20230101000000").exists());
    }

    #[test]
    fn test_run_dir_name() {
        assert!(is_run_dir_name("20240101120000", FORMAT));
        assert!(is_run_dir_name("20240101", "%Y%m%d"));
        assert!(!is_run_dir_name("images", FORMAT));
        assert!(!is_run_dir_name("2024", FORMAT));
    }
}
