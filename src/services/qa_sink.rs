//! 问答存储服务 - 业务能力层
//!
//! 只负责把组装好的问答列表交给下游，不关心它们从哪里来

use std::fs;
use std::path::PathBuf;

use tracing::{debug, info};

use crate::error::{AppResult, FileError};
use crate::models::QaPair;

/// 问答列表的去向
pub trait QaSink {
    fn save(&mut self, pairs: &[QaPair]) -> AppResult<()>;
}

/// 数据库存储，暂不实现
#[derive(Debug, Default)]
pub struct DatabaseSink;

impl QaSink for DatabaseSink {
    fn save(&mut self, pairs: &[QaPair]) -> AppResult<()> {
        debug!("数据库存储暂未实现，跳过 {} 组问答", pairs.len());
        Ok(())
    }
}

/// 以 JSON 数组写入文件
pub struct JsonFileSink {
    path: PathBuf,
}

impl JsonFileSink {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl QaSink for JsonFileSink {
    fn save(&mut self, pairs: &[QaPair]) -> AppResult<()> {
        let json = serde_json::to_string_pretty(pairs).map_err(FileError::from)?;
        fs::write(&self.path, json).map_err(|source| FileError::WriteFailed {
            path: self.path.clone(),
            source,
        })?;
        info!("💾 已写入 {} 组问答: {}", pairs.len(), self.path.display());
        Ok(())
    }
}
