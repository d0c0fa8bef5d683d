//! `segmenter`：把一个（复合）词递归二分成切分树。
//!
//! 算法：
//! - 长度 <= 1：合法则为叶子，否则不存在
//! - 否则从左到右枚举每个切分点，两半都走同一个带缓存的解析
//!   - 两半都存在：切分候选，按 `Score` 比例取严格更优者（同分保留更靠左的切分）
//!   - 任一半不存在且整串合法：叶子候选，只在没有任何切分候选时采用
//!
//! 长度和切分点都按字符（`char`）计，切分点总是落在字符边界上。

use std::collections::HashMap;

use tracing::trace;

use crate::dictionary::Validity;
use crate::model::{Node, Word};
use crate::score::Score;

/// 带缓存的切分器。一个实例绑定一个 `Validity`，缓存不跨实例共享。
///
/// 缓存通过 `&mut self` 修改；需要跨线程共享时由调用方加锁（见 `Engine`）。
pub struct Segmenter<V> {
    valid: V,
    /// input -> 解析结果（None 表示“无合法切分”，同样会被缓存）
    memo: HashMap<String, Option<(Node, Score)>>,
}

impl<V> Segmenter<V>
where
    V: Validity,
{
    pub fn new(valid: V) -> Self {
        Self {
            valid,
            memo: HashMap::new(),
        }
    }

    /// 切分 `input`；不存在合法切分时返回 None。
    pub fn split(&mut self, input: &str) -> Option<Node> {
        self.resolve(input)?;
        self.node(input)
    }

    /// 已缓存的子串数量。
    pub fn cached(&self) -> usize {
        self.memo.len()
    }

    /// 确保 `s` 已解析并缓存，返回其分数。
    fn resolve(&mut self, s: &str) -> Option<Score> {
        if let Some(hit) = self.memo.get(s) {
            return hit.as_ref().map(|(_, score)| *score);
        }
        let result = self.decompose(s);
        trace!(input = s, found = result.is_some(), "segment resolved");
        let score = result.as_ref().map(|(_, score)| *score);
        self.memo.insert(s.to_owned(), result);
        score
    }

    fn node(&self, s: &str) -> Option<Node> {
        self.memo.get(s)?.as_ref().map(|(node, _)| node.clone())
    }

    /// 取出一个已解析且存在切分的子串的树。
    ///
    /// 只在 `resolve(s)` 刚返回 `Some` 之后调用，此时缓存里一定有该树。
    fn resolved_node(&self, s: &str) -> Node {
        self.node(s)
            .expect("resolve() returned Some, so the memo holds a tree for this span")
    }

    fn decompose(&mut self, s: &str) -> Option<(Node, Score)> {
        let valid = self.valid.is_valid(s);

        // Case 0：太短无法再分
        let mut bounds = s.char_indices().map(|(i, _)| i).skip(1).peekable();
        if bounds.peek().is_none() {
            return valid.then(|| (Node::leaf(s), Score::LEAF));
        }

        let mut leaf = false;
        let mut best: Option<(Node, Score)> = None;

        for i in bounds {
            let (prefix, suffix) = s.split_at(i);
            let prefix_score = self.resolve(prefix);
            let suffix_score = self.resolve(suffix);

            match (prefix_score, suffix_score) {
                // Case 2：合法切分；整串不是词时本节点为连接点
                (Some(p), Some(q)) => {
                    let score = Score::join(valid, p, q);
                    if best.as_ref().is_some_and(|(_, incumbent)| !score.beats(incumbent)) {
                        continue;
                    }
                    let word = if valid {
                        Word::Known(s.to_owned())
                    } else {
                        Word::Junction
                    };
                    let node =
                        Node::join(word, self.resolved_node(prefix), self.resolved_node(suffix));
                    best = Some((node, score));
                }
                // Case 1：整串是词，但这个切分点给不出两半
                _ => leaf |= valid,
            }
        }

        best.or_else(|| leaf.then(|| (Node::leaf(s), Score::LEAF)))
    }
}
