use std::time::Duration;

use parking_lot::Mutex;
use tracing::debug;

use crate::annotator::annotate;
use crate::cancel::CancelToken;
use crate::dictionary::Validity;
use crate::error::{AnnotateError, InputError};
use crate::model::Node;
use crate::segmenter::Segmenter;
use crate::translator::Translator;

/// `Engine::split_and_annotate` 的错误。
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    #[error(transparent)]
    Input(#[from] InputError),

    #[error(transparent)]
    Annotate(#[from] AnnotateError),
}

/// 引擎：输入校验 -> 归一化（小写）-> 切分 -> 查释义。
///
/// 结构上对应一次请求的流水线：
/// - segmenter（带缓存，整个引擎生命周期内复用；加锁后可跨线程共享）
/// - translator（每次请求一个带超时的 `CancelToken`）
pub struct Engine<V, T> {
    segmenter: Mutex<Segmenter<V>>,
    /// 释义提供方
    translator: T,
    /// 单次标注的超时
    timeout: Duration,
    /// 输入最大字符数
    max_input_len: usize,
}

impl<V, T> Engine<V, T>
where
    V: Validity,
    T: Translator,
{
    pub fn new(valid: V, translator: T) -> Self {
        Self {
            segmenter: Mutex::new(Segmenter::new(valid)),
            translator,
            timeout: Duration::from_secs(5),
            max_input_len: 64,
        }
    }

    /// 设置单次标注的超时（从开始遍历起计时）。
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// 限制输入长度（按字符计）；0 会被当作 1。
    pub fn max_input_len(mut self, n: usize) -> Self {
        self.max_input_len = n.max(1);
        self
    }

    /// 非空、不超长、只含字母（含变音字母和 ß）。
    pub fn validate_input(&self, input: &str) -> Result<(), InputError> {
        if input.is_empty() {
            return Err(InputError::Empty);
        }
        let len = input.chars().count();
        if len > self.max_input_len {
            return Err(InputError::TooLong {
                len,
                max: self.max_input_len,
            });
        }
        match input.chars().find(|c| !c.is_alphabetic()) {
            Some(c) => Err(InputError::NotALetter(c)),
            None => Ok(()),
        }
    }

    /// 校验并切分（不查释义）。
    pub fn split(&self, input: &str) -> Result<Option<Node>, InputError> {
        self.validate_input(input)?;
        let word = input.to_lowercase();
        let mut segmenter = self.segmenter.lock();
        let tree = segmenter.split(&word);
        debug!(word = %word, found = tree.is_some(), cached = segmenter.cached(), "split");
        Ok(tree)
    }

    /// 切分后在超时内查释义。没有合法切分时返回 `Ok(None)`。
    pub fn split_and_annotate(&self, input: &str) -> Result<Option<Node>, EngineError> {
        let Some(mut tree) = self.split(input)? else {
            return Ok(None);
        };
        let cancel = CancelToken::with_timeout(self.timeout);
        annotate(&mut tree, &self.translator, &cancel)?;
        Ok(Some(tree))
    }
}
