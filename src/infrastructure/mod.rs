//! 基础设施层：持有外部资源（docx、xlsx、图片目录），只暴露能力

pub mod docx_reader;
pub mod image_store;
pub mod xlsx_reader;

pub use docx_reader::{read_paragraphs, DocxReader};
pub use image_store::{prune_runs, ImageStore};
pub use xlsx_reader::{read_rows, rows_from_range};
