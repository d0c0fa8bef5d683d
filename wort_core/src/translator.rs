//! `translator`：释义提供方抽象。
//!
//! 典型实现是 `wort_dict::dictd::DictdTranslator`（走 DICT 协议查网络词典）。

/// 提供方的错误类型（网络/协议等，core 不关心具体类型）。
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Translator：把一个词翻译成若干条释义。
///
/// 约定：
/// - `Ok(None)` 表示“查无此词”，不是错误
/// - `Err(_)` 是真正的失败，annotator 会就此停止后续查询
/// - 同一个词可以被反复查询；去重由调用方（annotator）负责
pub trait Translator {
    fn translate(&self, word: &str) -> Result<Option<Vec<String>>, BoxError>;
}

impl<F> Translator for F
where
    F: Fn(&str) -> Result<Option<Vec<String>>, BoxError>,
{
    fn translate(&self, word: &str) -> Result<Option<Vec<String>>, BoxError> {
        self(word)
    }
}

/// 不查释义：所有词都是“查无此词”。
#[derive(Debug, Clone, Copy, Default)]
pub struct NoTranslation;

impl Translator for NoTranslation {
    fn translate(&self, _word: &str) -> Result<Option<Vec<String>>, BoxError> {
        Ok(None)
    }
}
