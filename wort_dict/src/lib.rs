use std::{
    collections::HashSet,
    fs, io,
    path::{Path, PathBuf},
};

use wort_core::dictionary::Validity;

pub mod dictd;

#[derive(Debug, thiserror::Error)]
pub enum DictError {
    #[error("读取词表 {} 失败：{source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// 词表：普通词 + 前缀 + 后缀（后两者是可以参与组合的连接成分）。
///
/// 文件格式（简化版）：
///
/// - 每行一个词，读入时统一转小写
/// - 空行与 `#` 开头的注释行被忽略
pub struct WordList {
    words: HashSet<String>,
    prefixes: HashSet<String>,
    suffixes: HashSet<String>,
}

impl WordList {
    pub fn from_paths(
        words: impl AsRef<Path>,
        prefixes: impl AsRef<Path>,
        suffixes: impl AsRef<Path>,
    ) -> Result<Self, DictError> {
        Ok(Self {
            words: set_from_path(words.as_ref())?,
            prefixes: set_from_path(prefixes.as_ref())?,
            suffixes: set_from_path(suffixes.as_ref())?,
        })
    }

    pub fn from_strs(words: &str, prefixes: &str, suffixes: &str) -> Self {
        Self {
            words: set_from_str(words),
            prefixes: set_from_str(prefixes),
            suffixes: set_from_str(suffixes),
        }
    }

    /// 大小写不敏感：先转小写再查三个集合。
    pub fn is_valid(&self, s: &str) -> bool {
        if s.is_empty() {
            return false;
        }
        let s = s.to_lowercase();
        self.words.contains(&s) || self.prefixes.contains(&s) || self.suffixes.contains(&s)
    }

    /// (词, 前缀, 后缀) 条目数。
    pub fn counts(&self) -> (usize, usize, usize) {
        (self.words.len(), self.prefixes.len(), self.suffixes.len())
    }
}

impl Validity for WordList {
    fn is_valid(&self, s: &str) -> bool {
        WordList::is_valid(self, s)
    }
}

fn set_from_path(path: &Path) -> Result<HashSet<String>, DictError> {
    let s = fs::read_to_string(path).map_err(|source| DictError::Io {
        path: path.to_owned(),
        source,
    })?;
    Ok(set_from_str(&s))
}

fn set_from_str(s: &str) -> HashSet<String> {
    s.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(str::to_lowercase)
        .collect()
}
