use std::path::PathBuf;

use thiserror::Error;

/// 应用程序错误类型
#[derive(Debug, Error)]
pub enum AppError {
    /// 配置错误（输入文件组合、配置文件）
    #[error("配置错误: {0}")]
    Config(#[from] ConfigError),
    /// word 文档解析错误
    #[error("提取错误: {0}")]
    Extraction(#[from] ExtractionError),
    /// excel 表格解析错误
    #[error("表格错误: {0}")]
    Spreadsheet(#[from] SpreadsheetError),
    /// 输出文件错误
    #[error("文件错误: {0}")]
    File(#[from] FileError),
}

/// 配置错误
///
/// 在任何文件读写之前抛出，终止整个导入
#[derive(Debug, Error)]
pub enum ConfigError {
    /// 不支持的文件后缀
    #[error("暂未支持该类型文件的数据解析: {path}")]
    UnsupportedExtension { path: PathBuf },
    /// 文件数量或组合不合法
    #[error("解析异常，请检查文件路径 (共 {count} 个文件, excel: {spreadsheets}, word: {documents})")]
    InvalidInputCombination {
        count: usize,
        spreadsheets: usize,
        documents: usize,
    },
    /// 没有传入任何文件
    #[error("没有传入任何文件")]
    NoInput,
    /// 读取配置文件失败
    #[error("读取配置文件失败 ({path}): {source}")]
    ConfigFileReadFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// 解析配置文件失败
    #[error("TOML解析失败 ({path}): {source}")]
    ConfigFileParseFailed {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

/// word 文档提取错误
#[derive(Debug, Error)]
pub enum ExtractionError {
    /// 打开 docx 压缩包失败
    #[error("无法打开 word 文件 ({path}): {source}")]
    OpenFailed {
        path: PathBuf,
        #[source]
        source: zip::result::ZipError,
    },
    /// docx 中缺少必需的部件
    #[error("word 文件缺少部件: {part}")]
    MissingPart { part: String },
    /// 读取部件失败
    #[error("读取部件失败 ({part}): {source}")]
    PartReadFailed {
        part: String,
        #[source]
        source: std::io::Error,
    },
    /// XML 解析失败
    #[error("XML解析失败 ({part}): {source}")]
    XmlParseFailed {
        part: String,
        #[source]
        source: quick_xml::Error,
    },
    /// 图片引用的关系不存在
    #[error("图片关系不存在: {rel_id}")]
    MissingRelationship { rel_id: String },
    /// 图片元素没有 r:embed
    #[error("图片缺少 r:embed 引用 (段落 {paragraph})")]
    MissingEmbed { paragraph: usize },
    /// 关系指向的图片部件不存在
    #[error("图片部件不存在: {part}")]
    ImagePartMissing { part: String },
    /// 创建图片目录失败
    #[error("创建图片目录失败 ({path}): {source}")]
    OutputDirFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// 写入图片失败
    #[error("写入图片失败 ({path}): {source}")]
    ImageWriteFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// excel 表格错误
#[derive(Debug, Error)]
pub enum SpreadsheetError {
    /// 打开工作簿失败
    #[error("无法打开 excel 文件 ({path}): {source}")]
    OpenFailed {
        path: PathBuf,
        #[source]
        source: calamine::Error,
    },
    /// 工作簿中没有工作表
    #[error("excel 文件中没有工作表: {path}")]
    NoWorksheet { path: PathBuf },
}

/// 输出文件错误
#[derive(Debug, Error)]
pub enum FileError {
    /// 写入文件失败
    #[error("写入文件失败 ({path}): {source}")]
    WriteFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// JSON 序列化失败
    #[error("JSON序列化失败: {0}")]
    SerializeFailed(#[from] serde_json::Error),
}

/// 表格行格式错误
///
/// 不是致命错误：导入时记录警告并跳过该行
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RowError {
    /// 表头中没有该字段
    #[error("第 {row} 行缺少字段: {field}")]
    MissingField { row: usize, field: &'static str },
    /// 问题为空
    #[error("第 {row} 行问题为空")]
    EmptyQuestion { row: usize },
}

// ========== 便捷构造函数 ==========

impl ExtractionError {
    /// 创建 XML 解析错误
    pub fn xml(part: impl Into<String>, source: quick_xml::Error) -> Self {
        ExtractionError::XmlParseFailed {
            part: part.into(),
            source,
        }
    }

    /// 创建部件读取错误
    pub fn part_read(part: impl Into<String>, source: std::io::Error) -> Self {
        ExtractionError::PartReadFailed {
            part: part.into(),
            source,
        }
    }
}

// ========== Result 类型别名 ==========

/// 应用程序结果类型
pub type AppResult<T> = Result<T, AppError>;
