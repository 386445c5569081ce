use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::ConfigError;

/// 默认配置文件名（位于当前工作目录）
pub const CONFIG_FILE_NAME: &str = "qa_import.toml";

/// 程序配置文件
#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct Config {
    /// 图片根目录（相对于当前工作目录）
    pub image_root: String,
    /// 每次运行的图片子目录名格式
    pub run_dir_format: String,
    /// 问题列的表头
    pub question_headers: Vec<String>,
    /// 答案列的表头
    pub answer_headers: Vec<String>,
    /// 序号列的表头
    pub serial_headers: Vec<String>,
    /// excel 答案中指向 word 文件的标记
    pub document_marker: String,
    /// 图片标签的 class
    pub image_class: String,
    /// 输出 JSON 文件
    pub output_json: Option<PathBuf>,
    /// 保留最近几次运行的图片目录，None 表示不清理
    pub keep_runs: Option<usize>,
    /// 是否显示详细日志
    pub verbose_logging: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            image_root: "images".to_string(),
            run_dir_format: "%Y%m%d%H%M%S".to_string(),
            question_headers: vec!["问题".to_string(), "question".to_string()],
            answer_headers: vec!["答案".to_string(), "answer".to_string()],
            serial_headers: vec!["序号".to_string(), "serial number".to_string()],
            document_marker: ".docx".to_string(),
            image_class: "global-width".to_string(),
            output_json: None,
            keep_runs: None,
            verbose_logging: false,
        }
    }
}

impl Config {
    /// 从 TOML 文件加载配置，缺省字段使用默认值
    pub fn from_toml_file(path: &Path) -> Result<Self, ConfigError> {
        let content =
            fs::read_to_string(path).map_err(|source| ConfigError::ConfigFileReadFailed {
                path: path.to_path_buf(),
                source,
            })?;

        toml::from_str(&content).map_err(|source| ConfigError::ConfigFileParseFailed {
            path: path.to_path_buf(),
            source,
        })
    }

    /// 当前目录存在 `qa_import.toml` 时加载它，否则使用默认配置
    pub fn load() -> Result<Self, ConfigError> {
        let path = Path::new(CONFIG_FILE_NAME);
        if path.exists() {
            Self::from_toml_file(path)
        } else {
            Ok(Self::default())
        }
    }
}
