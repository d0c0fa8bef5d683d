/// 词合法性判定：core 不关心词表来自文件/内存/网络。
///
/// 约定：
/// - 必须是纯函数，对任意字符串（包括空串）都有定义
/// - 空串一律返回 false
/// - 大小写归一化由实现自己负责；`Segmenter` 不改动大小写
pub trait Validity {
    fn is_valid(&self, s: &str) -> bool;
}

impl<F> Validity for F
where
    F: Fn(&str) -> bool,
{
    fn is_valid(&self, s: &str) -> bool {
        self(s)
    }
}
