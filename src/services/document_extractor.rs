//! 文档提取服务 - 业务能力层
//!
//! 把按标题组织的 word 段落拆成章节，写出每个章节的第一张图片，
//! 并建立 标题 → 文字、标题 → 图片路径 两张表

use tracing::{debug, info};

use crate::error::ExtractionError;
use crate::infrastructure::ImageStore;
use crate::models::{DocParagraph, ExtractedAnswers, Section};

/// 文字中是否含有 CJK 统一表意文字（U+4E00..=U+9FFF）
///
/// 只有含中文的正文才算作文字答案
pub fn contains_cjk(text: &str) -> bool {
    text.chars().any(|c| ('\u{4e00}'..='\u{9fff}').contains(&c))
}

/// 按标题拆分段落
///
/// 图片归属于出现时所在的章节（标题段落自身的图片属于新章节），
/// 每个章节只保留第一张；第一个标题之前的内容不属于任何章节
pub fn split_sections(paragraphs: &[DocParagraph]) -> Vec<Section> {
    let mut sections = Vec::new();
    let mut current: Option<Section> = None;

    for (index, paragraph) in paragraphs.iter().enumerate() {
        if paragraph.is_heading() {
            sections.extend(current.take());
            current = Some(Section::new(paragraph.text.trim()));
        }

        if paragraph.is_body() {
            match current.as_mut() {
                Some(section) => section.body_text.push_str(&paragraph.text),
                None if !paragraph.text.is_empty() => {
                    debug!("段落 {} 位于第一个标题之前，已忽略", index)
                }
                None => {}
            }
        }

        if let Some(image) = &paragraph.image {
            match current.as_mut() {
                Some(section) if section.image.is_none() => section.image = Some(image.clone()),
                Some(section) => debug!(
                    "章节 {} 中的第二张图片 {} 已忽略",
                    section.title, image.part_name
                ),
                None => debug!("图片 {} 位于第一个标题之前，已忽略", image.part_name),
            }
        }
    }
    sections.extend(current);

    sections
}

/// 文档提取服务
pub struct DocumentExtractor<'a> {
    store: &'a ImageStore,
}

impl<'a> DocumentExtractor<'a> {
    pub fn new(store: &'a ImageStore) -> Self {
        Self { store }
    }

    /// 提取章节的文字和图片
    ///
    /// 同名标题只保留第一次出现的文字和图片；已存在的图片文件不会被覆盖
    pub fn extract(&self, paragraphs: &[DocParagraph]) -> Result<ExtractedAnswers, ExtractionError> {
        let sections = split_sections(paragraphs);
        let mut answers = ExtractedAnswers::new();

        for section in &sections {
            answers.add_title(&section.title);

            if let Some(image) = &section.image {
                if answers.image(&section.title).is_none() {
                    let path = self.store.save_if_absent(&section.title, &image.bytes)?;
                    answers.record_image(&section.title, path);
                }
            }

            if contains_cjk(&section.body_text) {
                answers.record_text(&section.title, section.body_text.as_str());
            } else if !section.body_text.is_empty() {
                debug!("章节 {} 的正文不含中文，不作为文字答案", section.title);
            }
        }

        info!(
            "📄 word 提取完成: {} 个章节, {} 段文字, {} 张图片",
            sections.len(),
            answers.text_count(),
            answers.image_count()
        );
        Ok(answers)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::EmbeddedImage;
    use std::fs;

    fn heading(text: &str) -> DocParagraph {
        DocParagraph::new("Heading 1", text)
    }

    fn normal(text: &str) -> DocParagraph {
        DocParagraph::new("Normal", text)
    }

    fn image(name: &str) -> EmbeddedImage {
        EmbeddedImage {
            rel_id: format!("rId-{}", name),
            part_name: format!("word/media/{}.png", name),
            bytes: name.as_bytes().to_vec(),
        }
    }

    #[test]
    fn test_contains_cjk() {
        assert!(contains_cjk("知识"));
        assert!(contains_cjk("abc 的 def"));
        assert!(!contains_cjk("plain english text"));
        assert!(!contains_cjk("かな カナ 한글"));
        assert!(!contains_cjk(""));
    }

    #[test]
    fn test_images_attach_to_their_own_section() {
        // 第一个章节没有图片，第二个章节有两张
        let paragraphs = vec![
            heading("1.没有图片"),
            normal("第一章内容"),
            heading("2.两张图片"),
            normal("第二章").with_image(image("a")),
            normal("内容").with_image(image("b")),
            heading("3.标题带图").with_image(image("c")),
        ];

        let sections = split_sections(&paragraphs);

        assert_eq!(sections.len(), 3);
        assert_eq!(sections[0].image, None);
        assert_eq!(sections[1].body_text, "第二章内容");
        assert_eq!(sections[1].image.as_ref().unwrap().part_name, "word/media/a.png");
        assert_eq!(sections[2].image.as_ref().unwrap().part_name, "word/media/c.png");
        assert_eq!(sections[2].body_text, "");
    }

    #[test]
    fn test_preamble_is_dropped() {
        let paragraphs = vec![
            normal("前言").with_image(image("p")),
            heading("1.正文"),
            normal("内容"),
            DocParagraph::new("List Paragraph", "列表不计入"),
        ];

        let sections = split_sections(&paragraphs);

        assert_eq!(sections.len(), 1);
        assert_eq!(sections[0].body_text, "内容");
        assert_eq!(sections[0].image, None);
    }

    #[test]
    fn test_extract_tables() {
        let tmp = tempfile::tempdir().unwrap();
        let store = ImageStore::create(tmp.path(), "run").unwrap();
        let paragraphs = vec![
            heading("1.中文"),
            normal("这是答案"),
            heading("2.English only"),
            normal("no ideographs here, however long the paragraph happens to be"),
            heading("3.图片").with_image(image("pic")),
        ];

        let answers = DocumentExtractor::new(&store).extract(&paragraphs).unwrap();

        assert_eq!(answers.titles().count(), 3);
        assert_eq!(answers.text("1.中文"), Some("这是答案"));
        assert_eq!(answers.text("2.English only"), None);
        assert_eq!(answers.text_count(), 1);
        assert_eq!(answers.image_count(), 1);
        let path = answers.image("3.图片").unwrap();
        assert_eq!(fs::read(path).unwrap(), b"pic");
    }

    #[test]
    fn test_duplicate_title_first_wins() {
        let tmp = tempfile::tempdir().unwrap();
        let store = ImageStore::create(tmp.path(), "run").unwrap();
        let paragraphs = vec![
            heading("1.重复"),
            normal("第一次").with_image(image("first")),
            heading("1.重复"),
            normal("第二次").with_image(image("second")),
        ];

        let answers = DocumentExtractor::new(&store).extract(&paragraphs).unwrap();

        assert_eq!(answers.text("1.重复"), Some("第一次"));
        assert_eq!(fs::read(answers.image("1.重复").unwrap()).unwrap(), b"first");
    }

    #[test]
    fn test_existing_image_wins() {
        let tmp = tempfile::tempdir().unwrap();
        let store = ImageStore::create(tmp.path(), "run").unwrap();
        fs::write(store.image_path("1.已有"), b"old").unwrap();
        let paragraphs = vec![heading("1.已有").with_image(image("new"))];

        let answers = DocumentExtractor::new(&store).extract(&paragraphs).unwrap();

        let path = answers.image("1.已有").unwrap();
        assert_eq!(fs::read(path).unwrap(), b"old");
    }

    #[test]
    fn test_at_most_one_entry_per_heading() {
        let tmp = tempfile::tempdir().unwrap();
        let store = ImageStore::create(tmp.path(), "run").unwrap();
        let mut paragraphs = Vec::new();
        for i in 0..5 {
            paragraphs.push(heading(&format!("{}.标题", i)));
            paragraphs.push(normal("内容").with_image(image(&i.to_string())));
            paragraphs.push(normal("更多内容").with_image(image("extra")));
        }

        let answers = DocumentExtractor::new(&store).extract(&paragraphs).unwrap();

        assert_eq!(answers.text_count(), 5);
        assert_eq!(answers.image_count(), 5);
        assert_eq!(fs::read_dir(store.dir()).unwrap().count(), 5);
    }
}
