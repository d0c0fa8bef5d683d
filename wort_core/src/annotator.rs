//! `annotator`：中序遍历切分树，为每个词节点查释义。
//!
//! 规则：
//! - 遍历顺序 prefix -> 自身 -> suffix，连接点（空词）不查询
//! - 每个词节点查询前先检查取消；已取消则不再访问后续节点，结束后报 `Cancelled`
//! - 查无此词：跳过；提供方出错：记为终止错误，之后不再查询（也不再检查取消）
//! - 同一次遍历内同一个词只查一次
//! - 重复标注是安全的：查到就覆盖，查不到不清除旧释义

use std::collections::HashMap;

use tracing::{debug, warn};

use crate::cancel::CancelToken;
use crate::error::AnnotateError;
use crate::model::{Node, Word};
use crate::translator::Translator;

/// 标注整棵树；返回第一个终止错误，或在没有错误时报告取消。
pub fn annotate<T>(tree: &mut Node, translator: &T, cancel: &CancelToken) -> Result<(), AnnotateError>
where
    T: Translator + ?Sized,
{
    let mut walk = Walk {
        translator,
        cancel,
        seen: HashMap::new(),
        failure: None,
        cancelled: false,
    };
    walk.visit(tree);

    match walk.failure {
        Some(err) => Err(err),
        None if walk.cancelled => Err(AnnotateError::Cancelled),
        None => Ok(()),
    }
}

struct Walk<'a, T: ?Sized> {
    translator: &'a T,
    cancel: &'a CancelToken,
    /// word -> 查询结果（None 为查无此词）
    seen: HashMap<String, Option<Vec<String>>>,
    failure: Option<AnnotateError>,
    cancelled: bool,
}

impl<T> Walk<'_, T>
where
    T: Translator + ?Sized,
{
    /// 返回 false 表示已取消，调用方应立即停止。
    fn visit(&mut self, node: &mut Node) -> bool {
        if let Some(split) = node.split_mut() {
            if !self.visit(&mut split.prefix) {
                return false;
            }
        }
        if !self.lookup(node) {
            return false;
        }
        match node.split_mut() {
            Some(split) => self.visit(&mut split.suffix),
            None => true,
        }
    }

    fn lookup(&mut self, node: &mut Node) -> bool {
        let word = match node.word() {
            Word::Known(w) if !w.is_empty() => w.clone(),
            _ => return true,
        };
        if self.failure.is_some() {
            return true;
        }
        if self.cancel.is_cancelled() {
            debug!(word = %word, "annotation cancelled");
            self.cancelled = true;
            return false;
        }

        let outcome = match self.seen.get(&word) {
            Some(outcome) => outcome.clone(),
            None => match self.translator.translate(&word) {
                Ok(outcome) => {
                    debug!(word = %word, found = outcome.is_some(), "looked up");
                    self.seen.insert(word.clone(), outcome.clone());
                    outcome
                }
                Err(source) => {
                    warn!(word = %word, error = %source, "translation provider failed");
                    self.failure = Some(AnnotateError::Provider { word, source });
                    return true;
                }
            },
        };

        if let Some(defns) = outcome {
            node.annotate(defns);
        }
        true
    }
}
