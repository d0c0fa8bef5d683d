//! `score`：候选切分的打分。
//!
//! 分数是 (matched, total)：子树中“可识别词”节点数 / 节点总数。
//! 不存在的子树记为 (0, 1)。比例越高越好。

use crate::model::Node;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Score {
    pub matched: u32,
    pub total: u32,
}

impl Score {
    /// 不存在的切分。
    pub const ABSENT: Score = Score {
        matched: 0,
        total: 1,
    };

    /// 叶子节点：自身是词，两个子节点都按不存在计，即 (1, 3)。
    pub const LEAF: Score = Score::join(true, Score::ABSENT, Score::ABSENT);

    /// 递归计算任意（可能不存在的）子树的分数。
    pub fn of(node: Option<&Node>) -> Score {
        match node {
            None => Score::ABSENT,
            Some(n) => Score::join(
                !n.word().is_junction(),
                Score::of(n.prefix()),
                Score::of(n.suffix()),
            ),
        }
    }

    /// 由两个子树的分数合成父节点分数，O(1)。
    pub const fn join(known: bool, prefix: Score, suffix: Score) -> Score {
        Score {
            matched: known as u32 + prefix.matched + suffix.matched,
            total: 1 + prefix.total + suffix.total,
        }
    }

    pub fn ratio(&self) -> f64 {
        f64::from(self.matched) / f64::from(self.total)
    }

    /// 比例严格更高。交叉相乘比较，与实数除法的序一致且没有舍入问题。
    pub fn beats(&self, other: &Score) -> bool {
        u64::from(self.matched) * u64::from(other.total)
            > u64::from(other.matched) * u64::from(self.total)
    }
}
