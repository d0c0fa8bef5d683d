//! `model`：切分树（decomposition tree）。
//!
//! 约定：
//! - 叶子节点：`prefix/suffix` 都不存在，`word` 一定是词典可识别的词
//! - 切分节点：`prefix/suffix` 同时存在，二者的 span 拼起来等于本节点的 span
//! - “半切分”（只有一个子节点）在类型上无法构造
use serde::Serialize;

/// 节点所代表的词。
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Word {
    /// 词典可识别的词（即输入片段本身）
    Known(String),
    /// 连接点：本身不是词，只负责把两个合法的子切分连起来
    Junction,
}

impl Word {
    /// 序列化/展示用文本；连接点为空串。
    pub fn as_str(&self) -> &str {
        match self {
            Word::Known(s) => s,
            Word::Junction => "",
        }
    }

    pub fn is_junction(&self) -> bool {
        matches!(self, Word::Junction)
    }
}

/// 一次二分：`prefix + suffix` 覆盖父节点的整个 span。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Split {
    pub prefix: Node,
    pub suffix: Node,
}

/// 切分树节点。
///
/// 节点只由 `Segmenter` 生成；之后除 annotator 写入释义（`defns`）外只读。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Node {
    word: Word,
    split: Option<Box<Split>>,
    /// 释义（由 annotator 填充；None 表示未标注）
    defns: Option<Vec<String>>,
}

impl Node {
    /// 叶子节点。
    pub fn leaf(word: impl Into<String>) -> Self {
        Self {
            word: Word::Known(word.into()),
            split: None,
            defns: None,
        }
    }

    /// 切分节点：`word` 为 `Word::Junction` 时表示本 span 不是词。
    pub fn join(word: Word, prefix: Node, suffix: Node) -> Self {
        Self {
            word,
            split: Some(Box::new(Split { prefix, suffix })),
            defns: None,
        }
    }

    pub fn word(&self) -> &Word {
        &self.word
    }

    pub fn prefix(&self) -> Option<&Node> {
        self.split.as_deref().map(|s| &s.prefix)
    }

    pub fn suffix(&self) -> Option<&Node> {
        self.split.as_deref().map(|s| &s.suffix)
    }

    pub(crate) fn split_mut(&mut self) -> Option<&mut Split> {
        self.split.as_deref_mut()
    }

    pub fn is_leaf(&self) -> bool {
        self.split.is_none()
    }

    pub fn defns(&self) -> Option<&[String]> {
        self.defns.as_deref()
    }

    /// 写入释义（覆盖旧值）。只改 `defns`，不碰 `word`。
    pub(crate) fn annotate(&mut self, defns: Vec<String>) {
        self.defns = Some(defns);
    }

    /// 从左到右收集叶子文本。
    pub fn leaves(&self) -> Vec<&str> {
        let mut out = Vec::new();
        self.collect_leaves(&mut out);
        out
    }

    fn collect_leaves<'a>(&'a self, out: &mut Vec<&'a str>) {
        match self.split.as_deref() {
            Some(split) => {
                split.prefix.collect_leaves(out);
                split.suffix.collect_leaves(out);
            }
            None => out.push(self.word.as_str()),
        }
    }

    /// 本节点覆盖的输入片段（叶子拼接）。
    pub fn span(&self) -> String {
        self.leaves().concat()
    }

    /// 中序（prefix -> self -> suffix）遍历所有节点。
    pub fn for_each<'a>(&'a self, f: &mut impl FnMut(&'a Node)) {
        if let Some(split) = self.split.as_deref() {
            split.prefix.for_each(f);
        }
        f(self);
        if let Some(split) = self.split.as_deref() {
            split.suffix.for_each(f);
        }
    }
}

/// JSON 形状：`{"word", "defns"?, "prefix"?, "suffix"?}`。
#[derive(Serialize)]
struct NodeRepr<'a> {
    word: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    defns: Option<&'a [String]>,
    #[serde(skip_serializing_if = "Option::is_none")]
    prefix: Option<&'a Node>,
    #[serde(skip_serializing_if = "Option::is_none")]
    suffix: Option<&'a Node>,
}

impl Serialize for Node {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        NodeRepr {
            word: self.word.as_str(),
            defns: self.defns(),
            prefix: self.prefix(),
            suffix: self.suffix(),
        }
        .serialize(serializer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample() -> Node {
        Node::join(
            Word::Junction,
            Node::join(Word::Known("ab".into()), Node::leaf("a"), Node::leaf("b")),
            Node::leaf("c"),
        )
    }

    #[test]
    fn leaves_are_read_left_to_right() {
        let tree = sample();
        assert_eq!(tree.leaves(), vec!["a", "b", "c"]);
        assert_eq!(tree.span(), "abc");
        assert_eq!(tree.prefix().map(Node::span).as_deref(), Some("ab"));
    }

    #[test]
    fn for_each_is_in_order() {
        let tree = sample();
        let mut seen = Vec::new();
        tree.for_each(&mut |n| seen.push(n.word().as_str().to_owned()));
        assert_eq!(seen, vec!["a", "ab", "b", "", "c"]);
    }

    #[test]
    fn json_omits_absent_fields() {
        let mut tree = sample();
        if let Some(split) = tree.split_mut() {
            split.suffix.annotate(vec!["see".into()]);
        }
        let v = serde_json::to_value(&tree).unwrap();
        assert_eq!(
            v,
            json!({
                "word": "",
                "prefix": {
                    "word": "ab",
                    "prefix": { "word": "a" },
                    "suffix": { "word": "b" }
                },
                "suffix": { "word": "c", "defns": ["see"] }
            })
        );
    }
}
