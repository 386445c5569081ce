//! # QA Import
//!
//! 从 excel 和 word 文件中解析问答数据
//!
//! ## 三种输入
//!
//! 1. 一个 excel 文件和一个 word 文件：excel 中问题的答案需要按序号到 word 中查找，
//!    答案可能是图文并茂，也可能只有图或只有文字
//! 2. 一个 excel 文件：问题和答案都在 excel 中，答案是纯文字
//! 3. 一个 word 文件：标题为问题，标题下的内容为答案
//!
//! excel 支持 `.xlsx` 和 `.xls`；word 只支持 `.docx`。
//!
//! ## 架构设计
//!
//! ### ① 基础设施层（Infrastructure）
//! - `infrastructure/` - 读取 docx / xlsx，管理本次运行的图片目录
//!
//! ### ② 业务能力层（Services）
//! - `DocumentExtractor` - 按标题拆分 word，提取文字和图片
//! - `RowPairer` - 按序号前缀把 excel 行和 word 章节配对
//! - `QaSink` - 问答列表的去向（数据库占位 / JSON 文件）
//!
//! ### ③ 编排层（Orchestration）
//! - `orchestrator/input_mode` - 按后缀名确定导入模式
//! - `orchestrator/importer` - 按模式调度各个服务
//!
//! ## 模块结构

pub mod config;
pub mod error;
pub mod infrastructure;
pub mod models;
pub mod orchestrator;
pub mod services;
pub mod utils;

// 重新导出常用类型
pub use config::Config;
pub use error::{AppError, AppResult};
pub use models::{ExtractedAnswers, QaPair};
pub use orchestrator::{InputMode, QaImporter};
pub use services::{DatabaseSink, DocumentExtractor, JsonFileSink, QaSink, RowPairer};
