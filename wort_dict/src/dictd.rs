//! `dictd`：DICT 协议（RFC 2229）客户端，作为 `Translator` 提供德英释义。
//!
//! 每次查询新建一条 TCP 连接：生产环境通常是本机 dictd，响应都很小，
//! 长连接收益不大；短连接也方便在负载均衡后面轮询多个 dictd。

use std::{
    collections::BTreeSet,
    io::{self, BufRead, BufReader, Write},
    net::{TcpStream, ToSocketAddrs},
    time::Duration,
};

use tracing::{debug, info};
use wort_core::translator::{BoxError, Translator};

#[derive(Debug, thiserror::Error)]
pub enum DictdError {
    #[error("dictd I/O 错误：{0}")]
    Io(#[from] io::Error),

    #[error("dictd 协议错误（{code}）：{line}")]
    Protocol { code: u16, line: String },
}

/// DICT 协议翻译器。
#[derive(Debug, Clone)]
pub struct DictdTranslator {
    /// `host:port`
    server: String,
    /// 依次查询的词典（例如 `fd-deu-eng`）
    databases: Vec<String>,
    /// 连接/读写超时；None 表示不设
    io_timeout: Option<Duration>,
}

impl DictdTranslator {
    pub fn new<I, S>(server: impl Into<String>, databases: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            server: server.into(),
            databases: databases.into_iter().map(Into::into).collect(),
            io_timeout: None,
        }
    }

    pub fn with_io_timeout(mut self, timeout: Duration) -> Self {
        self.io_timeout = Some(timeout);
        self
    }

    /// 在所有词典里查 `word`，返回原始定义文本（每条一个字符串）。
    pub fn define(&self, word: &str) -> Result<Vec<String>, DictdError> {
        let stream = self.connect()?;
        let mut reader = BufReader::new(stream.try_clone()?);
        let mut writer = stream;

        let (code, line) = read_status(&mut reader)?;
        if code != 220 {
            return Err(DictdError::Protocol { code, line });
        }

        let mut texts = Vec::new();
        for db in &self.databases {
            info!(word, db = %db, "looking up");
            write!(writer, "DEFINE {} \"{}\"\r\n", db, quote(word))?;
            writer.flush()?;
            loop {
                let (code, line) = read_status(&mut reader)?;
                match code {
                    // n definitions retrieved
                    150 => continue,
                    151 => texts.push(read_text(&mut reader)?),
                    250 => break,
                    // 550 invalid database / 552 no match：跳过这个词典
                    550 | 552 => {
                        debug!(word, db = %db, code, "database skipped");
                        break;
                    }
                    _ => return Err(DictdError::Protocol { code, line }),
                }
            }
        }

        // 对端先关掉也无所谓
        let _ = writer.write_all(b"QUIT\r\n");
        Ok(texts)
    }

    fn connect(&self) -> Result<TcpStream, DictdError> {
        let Some(timeout) = self.io_timeout else {
            return Ok(TcpStream::connect(&self.server)?);
        };

        let mut last_err = None;
        for addr in self.server.to_socket_addrs()? {
            match TcpStream::connect_timeout(&addr, timeout) {
                Ok(stream) => {
                    stream.set_read_timeout(Some(timeout))?;
                    stream.set_write_timeout(Some(timeout))?;
                    return Ok(stream);
                }
                Err(err) => last_err = Some(err),
            }
        }
        Err(last_err
            .unwrap_or_else(|| {
                io::Error::new(io::ErrorKind::NotFound, format!("无法解析地址：{}", self.server))
            })
            .into())
    }
}

impl Translator for DictdTranslator {
    fn translate(&self, word: &str) -> Result<Option<Vec<String>>, BoxError> {
        if word.is_empty() {
            return Ok(None);
        }
        let defns = clean_definitions(word, &self.define(word)?);
        debug!(word, n = defns.len(), "translated");
        Ok((!defns.is_empty()).then_some(defns))
    }
}

/// 读一行状态：`NNN text`。
fn read_status(reader: &mut impl BufRead) -> Result<(u16, String), DictdError> {
    let mut line = String::new();
    if reader.read_line(&mut line)? == 0 {
        return Err(DictdError::Io(io::Error::new(
            io::ErrorKind::UnexpectedEof,
            "连接被对端关闭",
        )));
    }
    let line = line.trim_end_matches(['\r', '\n']).to_owned();
    let code = line
        .get(..3)
        .and_then(|c| c.parse::<u16>().ok())
        .ok_or_else(|| DictdError::Protocol {
            code: 0,
            line: line.clone(),
        })?;
    Ok((code, line))
}

/// 读一段以单独一行 `.` 结尾的文本，并还原行首的 `..`。
fn read_text(reader: &mut impl BufRead) -> Result<String, DictdError> {
    let mut text = String::new();
    let mut line = String::new();
    loop {
        line.clear();
        if reader.read_line(&mut line)? == 0 {
            return Err(DictdError::Io(io::Error::new(
                io::ErrorKind::UnexpectedEof,
                "定义文本未结束",
            )));
        }
        let l = line.trim_end_matches(['\r', '\n']);
        if l == "." {
            return Ok(text);
        }
        let l = l.strip_prefix('.').filter(|rest| rest.starts_with('.')).unwrap_or(l);
        text.push_str(l);
        text.push('\n');
    }
}

fn quote(word: &str) -> String {
    word.replace('\\', "\\\\").replace('"', "\\\"")
}

/// 把原始定义文本整理成可读的释义列表。
///
/// - 按行、再按 `;` 拆分，去首尾空白
/// - 丢弃空串、与原词相同（忽略大小写）的条目
/// - 丢弃含 `{`、`<`、`/`、`(` 的条目（german-english 的原始标注不好读）
/// - 去重，按长度升序（同长按字典序）
pub fn clean_definitions(word: &str, texts: &[String]) -> Vec<String> {
    let word = word.to_lowercase();
    let set: BTreeSet<&str> = texts
        .iter()
        .flat_map(|t| t.lines())
        .flat_map(|line| line.split(';'))
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .filter(|s| s.to_lowercase() != word)
        .filter(|s| !s.contains(['{', '<', '/', '(']))
        .collect();

    let mut out: Vec<String> = set.into_iter().map(str::to_owned).collect();
    out.sort_by_key(|s| s.chars().count());
    out
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use super::*;

    #[test]
    fn clean_definitions_filters_and_sorts() {
        let texts = vec![
            "Haus /haʊs/ <n>\n   house; home\n  building".to_owned(),
            "haus\nhouse {n}\nhome; dynasty (royal)".to_owned(),
        ];
        assert_eq!(
            clean_definitions("Haus", &texts),
            vec!["home", "house", "building"]
        );
    }

    #[test]
    fn clean_definitions_empty() {
        assert!(clean_definitions("x", &[]).is_empty());
        assert!(clean_definitions("x", &["X\n;\n".to_owned()]).is_empty());
    }

    #[test]
    fn read_text_undoes_dot_stuffing() {
        let mut r = Cursor::new("line one\r\n..hidden\r\n.\r\nrest\r\n");
        assert_eq!(read_text(&mut r).unwrap(), "line one\n.hidden\n");
    }

    #[test]
    fn read_status_parses_code() {
        let mut r = Cursor::new("552 no match\r\n");
        assert_eq!(read_status(&mut r).unwrap(), (552, "552 no match".to_owned()));

        let mut r = Cursor::new("garbage\r\n");
        assert!(matches!(
            read_status(&mut r),
            Err(DictdError::Protocol { code: 0, .. })
        ));
    }

    #[test]
    fn quote_escapes() {
        assert_eq!(quote(r#"a"b\c"#), r#"a\"b\\c"#);
    }
}
