//! core 层错误类型。

use crate::translator::BoxError;

/// 标注（查释义）过程中的终止性错误。
///
/// “查无此词”不是错误，不会出现在这里。
#[derive(Debug, thiserror::Error)]
pub enum AnnotateError {
    /// 释义提供方失败；之后的查询全部跳过
    #[error("查询释义失败（{word}）：{source}")]
    Provider {
        word: String,
        #[source]
        source: BoxError,
    },

    /// 遍历过程中被取消（超时也走这里）
    #[error("遍历过程中被取消")]
    Cancelled,
}

/// 输入校验错误。
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum InputError {
    #[error("输入为空")]
    Empty,

    #[error("输入过长：{len} 个字符（上限 {max}）")]
    TooLong { len: usize, max: usize },

    #[error("非法字符：{0:?}")]
    NotALetter(char),
}
