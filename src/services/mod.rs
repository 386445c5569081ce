pub mod document_extractor;
pub mod qa_sink;
pub mod row_pairer;

pub use document_extractor::{contains_cjk, split_sections, DocumentExtractor};
pub use qa_sink::{DatabaseSink, JsonFileSink, QaSink};
pub use row_pairer::{serial_prefix, text_markup, RowPairer};
