//! 编排层（Orchestration Layer）
//!
//! ## 职责
//!
//! 本层负责判断导入模式并按顺序调度各个服务，不做具体的解析和配对。
//!
//! ## 模块划分
//!
//! ### `input_mode` - 输入分类
//! - 按后缀名区分 excel 和 word
//! - 确定三种导入模式之一，其余组合为配置错误
//!
//! ### `importer` - 问答导入器
//! - 创建本次运行的图片目录
//! - 调用 word 提取、excel 读取和行配对
//! - 跳过格式错误的行并输出统计
//!
//! ## 层次关系
//!
//! ```text
//! importer (处理 1~2 个文件)
//!     ↓
//! services (能力层：extract / pair / sink)
//!     ↓
//! infrastructure (基础设施：docx / xlsx / 图片目录)
//! ```

pub mod importer;
pub mod input_mode;

// 重新导出主要类型
pub use importer::QaImporter;
pub use input_mode::{FileKind, InputMode};
