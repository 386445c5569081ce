//! word 文档读取 - 基础设施层
//!
//! 只负责把 `.docx` 压缩包读成有序的正文段落（样式名、文字、第一张图片），
//! 不关心标题和答案的含义

use std::collections::HashMap;
use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};

use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader as XmlReader;
use tracing::debug;
use zip::result::ZipError;
use zip::ZipArchive;

use crate::error::ExtractionError;
use crate::models::{DocParagraph, EmbeddedImage};

const DOCUMENT_PART: &str = "word/document.xml";
const STYLES_PART: &str = "word/styles.xml";
const RELS_PART: &str = "word/_rels/document.xml.rels";
const DEFAULT_STYLE_NAME: &str = "Normal";

/// docx 读取器，持有打开的压缩包
pub struct DocxReader {
    path: PathBuf,
    archive: ZipArchive<File>,
}

impl DocxReader {
    /// 打开 docx 文件
    pub fn open(path: &Path) -> Result<Self, ExtractionError> {
        let open_failed = |source: ZipError| ExtractionError::OpenFailed {
            path: path.to_path_buf(),
            source,
        };
        let file = File::open(path).map_err(|e| open_failed(ZipError::Io(e)))?;
        let archive = ZipArchive::new(file).map_err(open_failed)?;

        Ok(Self {
            path: path.to_path_buf(),
            archive,
        })
    }

    /// 按文档顺序读取正文段落（不含表格中的段落）
    pub fn paragraphs(&mut self) -> Result<Vec<DocParagraph>, ExtractionError> {
        let document = self
            .read_part(DOCUMENT_PART)?
            .ok_or_else(|| ExtractionError::MissingPart {
                part: DOCUMENT_PART.to_string(),
            })?;
        let styles = match self.read_part(STYLES_PART)? {
            Some(xml) => parse_styles(&xml)?,
            None => StyleTable::default(),
        };
        let relationships = match self.read_part(RELS_PART)? {
            Some(xml) => parse_relationships(&xml)?,
            None => HashMap::new(),
        };

        let raw_paragraphs = parse_document(&document)?;
        debug!(
            "读取 {}: {} 个段落, {} 个样式, {} 个关系",
            self.path.display(),
            raw_paragraphs.len(),
            styles.names.len(),
            relationships.len()
        );

        let mut paragraphs = Vec::with_capacity(raw_paragraphs.len());
        for raw in raw_paragraphs {
            let image = match raw.image_rel {
                Some(rel_id) => Some(self.load_image(&relationships, rel_id)?),
                None => None,
            };
            paragraphs.push(DocParagraph {
                style_name: styles.resolve(raw.style_id.as_deref()),
                text: raw.text,
                image,
            });
        }

        Ok(paragraphs)
    }

    fn load_image(
        &mut self,
        relationships: &HashMap<String, Relationship>,
        rel_id: String,
    ) -> Result<EmbeddedImage, ExtractionError> {
        let relationship = relationships
            .get(&rel_id)
            .filter(|rel| !rel.external)
            .ok_or_else(|| ExtractionError::MissingRelationship {
                rel_id: rel_id.clone(),
            })?;
        let part_name = resolve_part_name(&relationship.target);
        let bytes = self
            .read_part(&part_name)?
            .ok_or_else(|| ExtractionError::ImagePartMissing {
                part: part_name.clone(),
            })?;

        Ok(EmbeddedImage {
            rel_id,
            part_name,
            bytes,
        })
    }

    /// 读取部件，部件不存在时返回 None
    fn read_part(&mut self, name: &str) -> Result<Option<Vec<u8>>, ExtractionError> {
        let mut entry = match self.archive.by_name(name) {
            Ok(entry) => entry,
            Err(ZipError::FileNotFound) => return Ok(None),
            Err(source) => {
                return Err(ExtractionError::OpenFailed {
                    path: self.path.clone(),
                    source,
                })
            }
        };
        let mut buffer = Vec::new();
        entry
            .read_to_end(&mut buffer)
            .map_err(|e| ExtractionError::part_read(name, e))?;
        Ok(Some(buffer))
    }
}

/// 读取 docx 文件中的所有正文段落
pub fn read_paragraphs(path: &Path) -> Result<Vec<DocParagraph>, ExtractionError> {
    DocxReader::open(path)?.paragraphs()
}

/// document.xml 中未解析样式和图片的段落
#[derive(Debug, Default, PartialEq, Eq)]
struct RawParagraph {
    style_id: Option<String>,
    text: String,
    image_rel: Option<String>,
}

#[derive(Debug)]
struct Relationship {
    target: String,
    external: bool,
}

/// 样式ID → 样式显示名
#[derive(Debug, Default)]
struct StyleTable {
    names: HashMap<String, String>,
    default_paragraph: Option<String>,
}

impl StyleTable {
    fn resolve(&self, style_id: Option<&str>) -> String {
        match style_id {
            Some(id) => self.names.get(id).cloned().unwrap_or_else(|| id.to_string()),
            None => self
                .default_paragraph
                .as_ref()
                .and_then(|id| self.names.get(id))
                .cloned()
                .unwrap_or_else(|| DEFAULT_STYLE_NAME.to_string()),
        }
    }
}

fn local_name(name: &[u8]) -> &[u8] {
    match name.iter().rposition(|b| *b == b':') {
        Some(pos) => &name[pos + 1..],
        None => name,
    }
}

fn attr_value(e: &BytesStart, key: &[u8]) -> Option<String> {
    e.attributes()
        .flatten()
        .find(|attr| local_name(attr.key.as_ref()) == key)
        .and_then(|attr| attr.decode_and_unescape_value(&XmlReader::from_str("")).ok().map(|v| v.into_owned()))
}

/// Word 内置样式在 styles.xml 中以小写存储，显示名首字母大写
fn ui_style_name(name: &str) -> String {
    match name {
        "caption" | "footer" | "header" | "title" => {
            let mut chars = name.chars();
            chars
                .next()
                .map(|first| first.to_ascii_uppercase().to_string() + chars.as_str())
                .unwrap_or_default()
        }
        _ => match name.strip_prefix("heading ") {
            Some(level) => format!("Heading {}", level),
            None => name.to_string(),
        },
    }
}

fn parse_styles(xml: &[u8]) -> Result<StyleTable, ExtractionError> {
    let mut reader = XmlReader::from_reader(xml);
    reader.trim_text(true);
    let mut buf = Vec::new();
    let mut table = StyleTable::default();
    let mut current: Option<(String, bool)> = None;

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(ref e)) if local_name(e.name().as_ref()) == b"style" => {
                let is_paragraph = attr_value(e, b"type").as_deref() == Some("paragraph");
                let is_default = matches!(attr_value(e, b"default").as_deref(), Some("1" | "true"));
                current = attr_value(e, b"styleId").map(|id| (id, is_paragraph && is_default));
            }
            Ok(Event::Empty(ref e)) if local_name(e.name().as_ref()) == b"name" => {
                if let (Some((id, is_default)), Some(name)) = (&current, attr_value(e, b"val")) {
                    if *is_default && table.default_paragraph.is_none() {
                        table.default_paragraph = Some(id.clone());
                    }
                    table.names.insert(id.clone(), ui_style_name(&name));
                }
            }
            Ok(Event::End(ref e)) if local_name(e.name().as_ref()) == b"style" => {
                current = None;
            }
            Ok(Event::Eof) => break,
            Err(err) => return Err(ExtractionError::xml(STYLES_PART, err)),
            _ => {}
        }
        buf.clear();
    }

    Ok(table)
}

fn parse_relationships(xml: &[u8]) -> Result<HashMap<String, Relationship>, ExtractionError> {
    let mut reader = XmlReader::from_reader(xml);
    reader.trim_text(true);
    let mut buf = Vec::new();
    let mut relationships = HashMap::new();

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(ref e)) | Ok(Event::Empty(ref e))
                if local_name(e.name().as_ref()) == b"Relationship" =>
            {
                if let (Some(id), Some(target)) = (attr_value(e, b"Id"), attr_value(e, b"Target")) {
                    let external = attr_value(e, b"TargetMode").as_deref() == Some("External");
                    relationships.insert(id, Relationship { target, external });
                }
            }
            Ok(Event::Eof) => break,
            Err(err) => return Err(ExtractionError::xml(RELS_PART, err)),
            _ => {}
        }
        buf.clear();
    }

    Ok(relationships)
}

/// 关系目标相对于 `word/` 目录，以 `/` 开头时为包内绝对路径
fn resolve_part_name(target: &str) -> String {
    let (mut segments, rest) = match target.strip_prefix('/') {
        Some(absolute) => (Vec::new(), absolute),
        None => (vec!["word"], target),
    };
    for segment in rest.split('/') {
        match segment {
            "" | "." => {}
            ".." => {
                segments.pop();
            }
            other => segments.push(other),
        }
    }
    segments.join("/")
}

/// 解析 document.xml 的状态
#[derive(Default)]
struct BodyState {
    paragraphs: Vec<RawParagraph>,
    current: Option<RawParagraph>,
    table_depth: usize,
    paragraph_depth: usize,
    run_depth: usize,
    in_paragraph_props: bool,
    in_text: bool,
    /// 正在读取段落中的第一个 pic:pic
    in_picture: bool,
    picture_seen: bool,
    picture_embed: Option<String>,
}

impl BodyState {
    fn start_paragraph(&mut self) {
        if self.paragraph_depth == 0 && self.table_depth == 0 {
            self.current = Some(RawParagraph::default());
            self.picture_seen = false;
        }
        self.paragraph_depth += 1;
    }

    fn end_paragraph(&mut self) {
        self.paragraph_depth = self.paragraph_depth.saturating_sub(1);
        if self.paragraph_depth == 0 {
            if let Some(paragraph) = self.current.take() {
                self.paragraphs.push(paragraph);
            }
        }
    }

    /// 只收集顶层段落自身的文字（不含文本框中的段落）
    fn push_text(&mut self, text: &str) {
        if self.paragraph_depth == 1 && self.run_depth > 0 {
            if let Some(paragraph) = self.current.as_mut() {
                paragraph.text.push_str(text);
            }
        }
    }

    fn start_picture(&mut self) {
        if self.current.is_some() && !self.picture_seen {
            self.in_picture = true;
            self.picture_seen = true;
            self.picture_embed = None;
        }
    }

    fn blip(&mut self, e: &BytesStart) {
        if self.in_picture && self.picture_embed.is_none() {
            self.picture_embed = attr_value(e, b"embed");
        }
    }

    fn end_picture(&mut self) -> Result<(), ExtractionError> {
        if !self.in_picture {
            return Ok(());
        }
        self.in_picture = false;
        let paragraph_index = self.paragraphs.len();
        let embed = self
            .picture_embed
            .take()
            .ok_or(ExtractionError::MissingEmbed {
                paragraph: paragraph_index,
            })?;
        if let Some(paragraph) = self.current.as_mut() {
            paragraph.image_rel = Some(embed);
        }
        Ok(())
    }
}

fn parse_document(xml: &[u8]) -> Result<Vec<RawParagraph>, ExtractionError> {
    let mut reader = XmlReader::from_reader(xml);
    reader.trim_text(false);
    let mut buf = Vec::new();
    let mut state = BodyState::default();

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(ref e)) => match local_name(e.name().as_ref()) {
                b"tbl" => state.table_depth += 1,
                b"p" => state.start_paragraph(),
                b"pPr" => state.in_paragraph_props = state.paragraph_depth == 1,
                b"r" => state.run_depth += 1,
                b"t" => state.in_text = true,
                b"pic" => state.start_picture(),
                b"blip" => state.blip(e),
                _ => {}
            },
            Ok(Event::Empty(ref e)) => match local_name(e.name().as_ref()) {
                b"p" => {
                    state.start_paragraph();
                    state.end_paragraph();
                }
                b"pStyle" if state.in_paragraph_props => {
                    if let Some(paragraph) = state.current.as_mut() {
                        paragraph.style_id = attr_value(e, b"val");
                    }
                }
                b"tab" => state.push_text("\t"),
                b"br" | b"cr" => state.push_text("\n"),
                b"blip" => state.blip(e),
                b"pic" => {
                    state.start_picture();
                    state.end_picture()?;
                }
                _ => {}
            },
            Ok(Event::Text(ref t)) if state.in_text => {
                let text = t
                    .unescape()
                    .map_err(|err| ExtractionError::xml(DOCUMENT_PART, err))?;
                state.push_text(&text);
            }
            Ok(Event::End(ref e)) => match local_name(e.name().as_ref()) {
                b"tbl" => state.table_depth = state.table_depth.saturating_sub(1),
                b"p" => state.end_paragraph(),
                b"pPr" => state.in_paragraph_props = false,
                b"r" => state.run_depth = state.run_depth.saturating_sub(1),
                b"t" => state.in_text = false,
                b"pic" => state.end_picture()?,
                _ => {}
            },
            Ok(Event::Eof) => break,
            Err(err) => return Err(ExtractionError::xml(DOCUMENT_PART, err)),
            _ => {}
        }
        buf.clear();
    }

    Ok(state.paragraphs)
}
