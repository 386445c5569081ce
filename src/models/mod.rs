pub mod document;
pub mod qa_pair;
pub mod row;
pub mod section;

pub use document::{DocParagraph, EmbeddedImage};
pub use qa_pair::QaPair;
pub use row::{CellValue, QaRow, SheetRow};
pub use section::{ExtractedAnswers, Section};
