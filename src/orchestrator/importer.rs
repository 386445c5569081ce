//! 问答导入器 - 编排层
//!
//! ## 职责
//!
//! 按输入模式调度各个服务，把 1~2 个文件变成一个问答列表。
//!
//! ## 流程
//!
//! 1. **分类**：按后缀名确定模式，配置错误在任何文件读写之前返回
//! 2. **提取 word**：创建本次运行的图片目录，提取章节文字和图片
//! 3. **读取 excel**：逐行校验，格式不对的行记录警告后跳过
//! 4. **组装**：excel 行与 word 章节配对，或直接使用单元格 / 章节内容
//! 5. **清理**：按配置只保留最近几次运行的图片目录

use std::path::Path;

use tracing::{debug, info, warn};

use crate::config::Config;
use crate::error::AppResult;
use crate::infrastructure::{prune_runs, read_paragraphs, read_rows, ImageStore};
use crate::models::{ExtractedAnswers, QaPair, QaRow};
use crate::orchestrator::input_mode::InputMode;
use crate::services::{DocumentExtractor, RowPairer};
use crate::utils::logging::{log_summary, truncate_text};

/// 导入统计
#[derive(Debug, Default)]
struct ImportStats {
    pairs: usize,
    skipped_rows: usize,
}

/// 问答导入器
pub struct QaImporter {
    config: Config,
    run_stamp: Option<String>,
}

impl QaImporter {
    pub fn new(config: Config) -> Self {
        Self {
            config,
            run_stamp: None,
        }
    }

    /// 固定图片目录名，不使用当前时间
    pub fn with_run_stamp(mut self, stamp: impl Into<String>) -> Self {
        self.run_stamp = Some(stamp.into());
        self
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// 解析传入的文件，返回问答列表
    pub fn run<P: AsRef<Path>>(&self, paths: &[P]) -> AppResult<Vec<QaPair>> {
        let mode = InputMode::classify(paths)?;
        info!("📋 导入模式: {}", mode);

        let mut stats = ImportStats::default();
        let mut run_dir = None;
        let pairs = match &mode {
            InputMode::Paired {
                spreadsheet,
                document,
            } => {
                // 先解析 word 再解析 excel
                let store = self.open_store()?;
                run_dir = Some(store.dir().to_path_buf());
                let answers = self.extract_document(document, &store)?;
                let rows = self.read_qa_rows(spreadsheet, &mut stats)?;
                let pairer = RowPairer::new(&self.config, store.relative_dir());
                rows.iter().map(|row| pairer.pair(row, &answers)).collect()
            }
            InputMode::SpreadsheetOnly { spreadsheet } => self
                .read_qa_rows(spreadsheet, &mut stats)?
                .into_iter()
                .map(|row| QaPair::new(row.question, row.answer))
                .collect(),
            InputMode::DocumentOnly { document } => {
                let store = self.open_store()?;
                run_dir = Some(store.dir().to_path_buf());
                let answers = self.extract_document(document, &store)?;
                let pairer = RowPairer::new(&self.config, store.relative_dir());
                section_pairs(&pairer, &answers)
            }
        };
        stats.pairs = pairs.len();

        if let (Some(current), Some(keep)) = (&run_dir, self.config.keep_runs) {
            prune_runs(
                Path::new(&self.config.image_root),
                &self.config.run_dir_format,
                current,
                keep,
            );
        }

        log_summary(&mode.to_string(), stats.pairs, stats.skipped_rows);
        Ok(pairs)
    }

    fn open_store(&self) -> AppResult<ImageStore> {
        let store = match &self.run_stamp {
            Some(stamp) => ImageStore::create(&self.config.image_root, stamp)?,
            None => ImageStore::for_now(&self.config.image_root, &self.config.run_dir_format)?,
        };
        Ok(store)
    }

    fn extract_document(&self, path: &Path, store: &ImageStore) -> AppResult<ExtractedAnswers> {
        info!("📄 正在解析 word: {}", path.display());
        let paragraphs = read_paragraphs(path)?;
        let answers = DocumentExtractor::new(store).extract(&paragraphs)?;
        Ok(answers)
    }

    /// 读取并校验 excel 行，格式不对的行跳过
    fn read_qa_rows(&self, path: &Path, stats: &mut ImportStats) -> AppResult<Vec<QaRow>> {
        info!("📊 正在解析 excel: {}", path.display());
        let sheet_rows = read_rows(path)?;

        let mut rows = Vec::with_capacity(sheet_rows.len());
        for sheet_row in &sheet_rows {
            if sheet_row.is_blank() {
                debug!("第 {} 行为空，跳过", sheet_row.line);
                continue;
            }
            match QaRow::from_sheet_row(sheet_row, &self.config) {
                Ok(row) => {
                    debug!(
                        "第 {} 行: {}",
                        row.line,
                        truncate_text(&row.question, 40)
                    );
                    rows.push(row);
                }
                Err(e) => {
                    warn!("⚠️ 跳过格式错误的行: {}", e);
                    stats.skipped_rows += 1;
                }
            }
        }

        info!("✓ excel 中找到 {} 个问题", rows.len());
        Ok(rows)
    }
}

/// 仅 word 模式：标题为问题，章节内容为答案；没有内容的章节跳过
fn section_pairs(pairer: &RowPairer, answers: &ExtractedAnswers) -> Vec<QaPair> {
    answers
        .titles()
        .filter_map(|title| {
            let answer = pairer.section_answer(title, answers);
            if answer.is_empty() {
                debug!("章节 {} 没有文字或图片答案，跳过", title);
                None
            } else {
                Some(QaPair::new(title, answer))
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{AppError, ConfigError};

    fn importer(image_root: &Path) -> QaImporter {
        let config = Config {
            image_root: image_root.to_string_lossy().into_owned(),
            ..Config::default()
        };
        QaImporter::new(config).with_run_stamp("20240101120000")
    }

    #[test]
    fn test_config_error_before_any_io() {
        let tmp = tempfile::tempdir().unwrap();
        let root = tmp.path().join("images");
        let importer = importer(&root);

        let err = importer
            .run(&["a.xlsx", "b.docx", "c.docx"])
            .unwrap_err();
        assert!(matches!(err, AppError::Config(ConfigError::InvalidInputCombination { .. })));

        let err = importer.run(&["answers.txt"]).unwrap_err();
        assert!(matches!(err, AppError::Config(ConfigError::UnsupportedExtension { .. })));

        assert!(!root.exists());
    }

    #[test]
    fn test_missing_spreadsheet_does_not_create_run_dir() {
        let tmp = tempfile::tempdir().unwrap();
        let root = tmp.path().join("images");

        let err = importer(&root)
            .run(&[tmp.path().join("missing.xlsx")])
            .unwrap_err();

        assert!(matches!(err, AppError::Spreadsheet(_)));
        assert!(!root.exists());
    }

    #[test]
    fn test_section_pairs_skip_empty_sections() {
        let pairer = RowPairer::new(&Config::default(), "images/run");
        let mut answers = ExtractedAnswers::new();
        answers.add_title("1.空章节");
        answers.record_text("2.有内容", "内容");

        let pairs = section_pairs(&pairer, &answers);

        assert_eq!(pairs, vec![QaPair::new("2.有内容", "<p>内容</p>")]);
    }
}
