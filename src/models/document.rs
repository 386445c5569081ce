/// word 文档中的一个正文段落
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct DocParagraph {
    /// 样式显示名，如 `Heading 1`、`Normal`
    pub style_name: String,
    pub text: String,
    /// 段落中的第一张图片
    pub image: Option<EmbeddedImage>,
}

impl DocParagraph {
    pub fn new(style_name: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            style_name: style_name.into(),
            text: text.into(),
            image: None,
        }
    }

    pub fn with_image(mut self, image: EmbeddedImage) -> Self {
        self.image = Some(image);
        self
    }

    /// 标题段落：样式名包含 `Heading`
    pub fn is_heading(&self) -> bool {
        self.style_name.contains("Heading")
    }

    /// 正文段落：样式名包含 `Normal`
    pub fn is_body(&self) -> bool {
        self.style_name.contains("Normal")
    }
}

/// 段落中嵌入的图片
#[derive(Clone, PartialEq, Eq, Default)]
pub struct EmbeddedImage {
    /// 关系ID（r:embed）
    pub rel_id: String,
    /// 压缩包中的部件名，如 `word/media/image1.png`
    pub part_name: String,
    pub bytes: Vec<u8>,
}

impl std::fmt::Debug for EmbeddedImage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EmbeddedImage")
            .field("rel_id", &self.rel_id)
            .field("part_name", &self.part_name)
            .field("len", &self.bytes.len())
            .finish()
    }
}
