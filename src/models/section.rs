use std::path::{Path, PathBuf};

use indexmap::{IndexMap, IndexSet};

use crate::models::EmbeddedImage;

/// 一个标题及其下方的内容
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Section {
    pub title: String,
    pub body_text: String,
    /// 该标题下遇到的第一张图片
    pub image: Option<EmbeddedImage>,
}

impl Section {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Default::default()
        }
    }
}

/// word 文档的提取结果，按标题索引
///
/// 同一标题只保留第一次写入的文字和图片
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExtractedAnswers {
    titles: IndexSet<String>,
    texts: IndexMap<String, String>,
    images: IndexMap<String, PathBuf>,
}

impl ExtractedAnswers {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_title(&mut self, title: &str) {
        if !self.titles.contains(title) {
            self.titles.insert(title.to_string());
        }
    }

    /// 写入文字；标题已有文字时忽略，返回是否写入
    pub fn record_text(&mut self, title: &str, text: impl Into<String>) -> bool {
        if self.texts.contains_key(title) {
            return false;
        }
        self.add_title(title);
        self.texts.insert(title.to_string(), text.into());
        true
    }

    /// 写入图片路径；标题已有图片时忽略，返回是否写入
    pub fn record_image(&mut self, title: &str, path: impl Into<PathBuf>) -> bool {
        if self.images.contains_key(title) {
            return false;
        }
        self.add_title(title);
        self.images.insert(title.to_string(), path.into());
        true
    }

    /// 按出现顺序排列的不重复标题
    pub fn titles(&self) -> impl Iterator<Item = &str> {
        self.titles.iter().map(String::as_str)
    }

    pub fn text(&self, title: &str) -> Option<&str> {
        self.texts.get(title).map(String::as_str)
    }

    pub fn image(&self, title: &str) -> Option<&Path> {
        self.images.get(title).map(PathBuf::as_path)
    }

    pub fn text_count(&self) -> usize {
        self.texts.len()
    }

    pub fn image_count(&self) -> usize {
        self.images.len()
    }

    /// 第一个以 `prefix` 开头的标题及其文字
    pub fn find_text_by_prefix(&self, prefix: &str) -> Option<(&str, &str)> {
        self.texts
            .iter()
            .find(|(title, _)| title.starts_with(prefix))
            .map(|(title, text)| (title.as_str(), text.as_str()))
    }

    /// 第一个以 `prefix` 开头的、有图片的标题
    pub fn find_image_by_prefix(&self, prefix: &str) -> Option<(&str, &Path)> {
        self.images
            .iter()
            .find(|(title, _)| title.starts_with(prefix))
            .map(|(title, path)| (title.as_str(), path.as_path()))
    }
}
