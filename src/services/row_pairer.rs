//! 行配对服务 - 业务能力层
//!
//! excel 的答案单元格可能直接是文字，也可能只是一个 word 文件的引用。
//! 后一种情况按行的序号生成前缀（如 `2.`），在 word 的标题中查找答案

use tracing::debug;

use crate::config::Config;
use crate::infrastructure::image_store::file_stem;
use crate::models::{ExtractedAnswers, QaPair, QaRow};
use crate::utils::logging::truncate_text;

/// 由序号生成标题前缀
///
/// 序号为空、非数字时默认为 `0.`；小数向零截断
pub fn serial_prefix(serial_number: Option<f64>) -> String {
    let number = serial_number
        .filter(|n| n.is_finite())
        .map(|n| n.trunc() as i64)
        .unwrap_or(0);
    format!("{}.", number)
}

/// 行配对服务
pub struct RowPairer {
    document_marker: String,
    image_class: String,
    relative_img_path: String,
}

impl RowPairer {
    /// `relative_img_path` 为本次运行图片目录的相对路径
    pub fn new(config: &Config, relative_img_path: impl Into<String>) -> Self {
        Self {
            document_marker: config.document_marker.clone(),
            image_class: config.image_class.clone(),
            relative_img_path: relative_img_path.into(),
        }
    }

    /// 答案是否引用了外部 word 文件
    pub fn references_document(&self, answer: &str) -> bool {
        answer.contains(&self.document_marker)
    }

    /// 组装一行的问答
    ///
    /// 找不到对应章节时答案对应部分为空，不报错
    pub fn pair(&self, row: &QaRow, answers: &ExtractedAnswers) -> QaPair {
        if !self.references_document(&row.answer) {
            return QaPair::new(row.question.as_str(), row.answer.as_str());
        }

        let prefix = serial_prefix(row.serial_number);
        let text = answers
            .find_text_by_prefix(&prefix)
            .map(|(_, text)| text_markup(text))
            .unwrap_or_default();
        let image = answers
            .find_image_by_prefix(&prefix)
            .map(|(title, _)| self.image_markup(title))
            .unwrap_or_default();

        if text.is_empty() && image.is_empty() {
            debug!("第 {} 行: 前缀 {} 没有找到对应章节", row.line, prefix);
        }

        let answer = text + &image;
        debug!(
            "第 {} 行: 前缀 {} → {}",
            row.line,
            prefix,
            truncate_text(&answer, 60)
        );
        QaPair::new(row.question.as_str(), answer)
    }

    /// 某个章节的完整答案（文字 + 图片）
    pub fn section_answer(&self, title: &str, answers: &ExtractedAnswers) -> String {
        let text = answers.text(title).map(text_markup).unwrap_or_default();
        let image = answers
            .image(title)
            .map(|_| self.image_markup(title))
            .unwrap_or_default();
        text + &image
    }

    /// 图片标签
    pub fn image_markup(&self, title: &str) -> String {
        format!(
            r#"<img class="{}" src="/{}/{}.png" alt="{}"/>"#,
            self.image_class,
            self.relative_img_path,
            file_stem(title),
            title
        )
    }
}

/// 文字答案包装为段落
pub fn text_markup(text: &str) -> String {
    format!("<p>{}</p>", text)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pairer() -> RowPairer {
        RowPairer::new(&Config::default(), "images/20240101120000")
    }

    fn row(answer: &str, serial_number: Option<f64>) -> QaRow {
        QaRow {
            line: 2,
            question: "什么是X？".to_string(),
            answer: answer.to_string(),
            serial_number,
        }
    }

    fn answers() -> ExtractedAnswers {
        let mut answers = ExtractedAnswers::new();
        answers.record_text("1.1 介绍", "第一节");
        answers.record_text("2.intro", "第二节");
        answers.record_image("2.intro", "/tmp/2.intro.png");
        answers.record_image("0.默认", "/tmp/0.默认.png");
        answers
    }

    #[test]
    fn test_serial_prefix() {
        assert_eq!(serial_prefix(Some(2.0)), "2.");
        assert_eq!(serial_prefix(Some(3.7)), "3.");
        assert_eq!(serial_prefix(Some(-0.5)), "0.");
        assert_eq!(serial_prefix(Some(f64::INFINITY)), "0.");
        assert_eq!(serial_prefix(None), "0.");
    }

    #[test]
    fn test_plain_answer_is_verbatim() {
        let pair = pairer().pair(&row("plain text answer", Some(2.0)), &answers());

        assert_eq!(pair, QaPair::new("什么是X？", "plain text answer"));
    }

    #[test]
    fn test_document_answer_text_and_image() {
        let pair = pairer().pair(&row("see ref.docx", Some(2.0)), &answers());

        assert_eq!(
            pair.answer,
            r#"<p>第二节</p><img class="global-width" src="/images/20240101120000/2.intro.png" alt="2.intro"/>"#
        );
    }

    #[test]
    fn test_prefix_is_leftmost_substring() {
        // "1.1 介绍" 以 "1." 开头
        let pair = pairer().pair(&row("见.docx", Some(1.0)), &answers());
        assert_eq!(pair.answer, "<p>第一节</p>");

        // "1.1 介绍" 不以 "11." 开头
        let pair = pairer().pair(&row("见.docx", Some(11.0)), &answers());
        assert_eq!(pair.answer, "");
    }

    #[test]
    fn test_blank_serial_defaults_to_zero() {
        let pair = pairer().pair(&row("见.docx", None), &answers());

        assert_eq!(
            pair.answer,
            r#"<img class="global-width" src="/images/20240101120000/0.默认.png" alt="0.默认"/>"#
        );
    }

    #[test]
    fn test_section_answer() {
        let pairer = pairer();
        let answers = answers();

        assert_eq!(pairer.section_answer("1.1 介绍", &answers), "<p>第一节</p>");
        assert!(pairer
            .section_answer("2.intro", &answers)
            .starts_with("<p>第二节</p><img "));
        assert_eq!(pairer.section_answer("不存在", &answers), "");
    }
}
