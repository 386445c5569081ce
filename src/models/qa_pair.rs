use serde::ser::{Serialize, SerializeMap, Serializer};

/// 一组问答
///
/// 序列化为单键对象 `{问题: 答案}`，列表中重复的问题不合并
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QaPair {
    pub question: String,
    pub answer: String,
}

impl QaPair {
    pub fn new(question: impl Into<String>, answer: impl Into<String>) -> Self {
        Self {
            question: question.into(),
            answer: answer.into(),
        }
    }
}

impl Serialize for QaPair {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut map = serializer.serialize_map(Some(1))?;
        map.serialize_entry(&self.question, &self.answer)?;
        map.end()
    }
}
