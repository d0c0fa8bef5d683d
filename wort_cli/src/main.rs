use std::{
    io::{self, BufRead, Write},
    path::PathBuf,
    time::Duration,
};

use clap::Parser;
use serde_json::json;
use tracing::{error, info, warn};
use wort_core::{
    Engine,
    translator::{BoxError, NoTranslation, Translator},
};
use wort_dict::{WordList, dictd::DictdTranslator};

/// 德语复合词切分（可选 DICT 协议查释义）
#[derive(Parser, Debug)]
#[command(name = "wort")]
#[command(about = "Split German compound words into a tree of sub-words")]
struct Args {
    /// 普通词词表
    #[arg(long, default_value = "db/de_words.txt", env = "WORT_WORDS")]
    words: PathBuf,

    /// 前缀词表
    #[arg(long, default_value = "db/de_prefixes.txt", env = "WORT_PREFIXES")]
    prefixes: PathBuf,

    /// 后缀词表
    #[arg(long, default_value = "db/de_suffixes.txt", env = "WORT_SUFFIXES")]
    suffixes: PathBuf,

    /// dictd 服务地址（host:port）
    #[arg(long, default_value = "all.dict.org:2628", env = "WORT_DICTD_SERVER")]
    dictd_server: String,

    /// 要查询的 dictd 词典（逗号分隔）
    #[arg(
        long,
        default_value = "fd-deu-eng,german-english",
        value_delimiter = ',',
        env = "WORT_DICTD_DICT"
    )]
    dictd_dict: Vec<String>,

    /// 单个词查释义的超时（毫秒）
    #[arg(long, default_value = "5000", env = "WORT_TIMEOUT_MS")]
    timeout_ms: u64,

    /// 输入最大字符数
    #[arg(long, default_value = "64", env = "WORT_MAX_LEN")]
    max_len: usize,

    /// 只切分，不查释义
    #[arg(long)]
    no_translate: bool,

    /// 缩进输出 JSON
    #[arg(long)]
    pretty: bool,

    /// 要切分的词；为空时从 stdin 逐行读取
    #[arg(value_name = "WORD")]
    words_to_split: Vec<String>,
}

/// 释义来源：dictd 或关闭（`--no-translate`）。
enum Provider {
    Dictd(DictdTranslator),
    Off(NoTranslation),
}

impl Translator for Provider {
    fn translate(&self, word: &str) -> Result<Option<Vec<String>>, BoxError> {
        match self {
            Provider::Dictd(d) => d.translate(word),
            Provider::Off(off) => off.translate(word),
        }
    }
}

fn main() -> io::Result<()> {
    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("wort_cli=info".parse().expect("valid directive"))
                .add_directive("wort_dict=info".parse().expect("valid directive")),
        )
        .init();

    let args = Args::parse();

    let dict = match WordList::from_paths(&args.words, &args.prefixes, &args.suffixes) {
        Ok(dict) => dict,
        Err(err) => {
            error!(%err, "dictionary creation failed");
            return Err(io::Error::other(err));
        }
    };
    let (words, prefixes, suffixes) = dict.counts();
    info!(words, prefixes, suffixes, "dictionary loaded");

    let timeout = Duration::from_millis(args.timeout_ms);
    let provider = if args.no_translate {
        Provider::Off(NoTranslation)
    } else {
        info!(server = %args.dictd_server, dicts = ?args.dictd_dict, "using dictd");
        Provider::Dictd(
            DictdTranslator::new(args.dictd_server.clone(), args.dictd_dict.clone())
                .with_io_timeout(timeout),
        )
    };
    let engine = Engine::new(dict, provider)
        .timeout(timeout)
        .max_input_len(args.max_len);

    let mut out = io::stdout().lock();
    if !args.words_to_split.is_empty() {
        for word in &args.words_to_split {
            writeln!(out, "{}", render(&engine, word, args.pretty))?;
        }
        return Ok(());
    }
    repl(&engine, &mut out, args.pretty)
}

fn repl(engine: &Engine<WordList, Provider>, out: &mut impl Write, pretty: bool) -> io::Result<()> {
    writeln!(out, "wort | 输入一个词后回车；输入 :q 退出。")?;
    let stdin = io::stdin();
    let mut line = String::new();
    loop {
        line.clear();
        write!(out, "wort> ")?;
        out.flush()?;
        if stdin.lock().read_line(&mut line)? == 0 {
            break;
        }
        let input = line.trim();
        if input.is_empty() {
            continue;
        }
        if input == ":q" || input == ":quit" || input == ":exit" {
            break;
        }
        writeln!(out, "{}", render(engine, input, pretty))?;
    }
    Ok(())
}

/// 切分 + 查释义，输出 JSON；出错时输出 `{"err": ...}`。
fn render(engine: &Engine<WordList, Provider>, word: &str, pretty: bool) -> String {
    let value = match engine.split_and_annotate(word) {
        Ok(tree) => {
            info!(word, found = tree.is_some(), "split");
            serde_json::to_value(&tree)
        }
        Err(err) => {
            warn!(word, %err, "split failed");
            Ok(json!({ "err": err.to_string() }))
        }
    };
    let value = value.unwrap_or_else(|err| json!({ "err": err.to_string() }));
    if pretty {
        serde_json::to_string_pretty(&value).unwrap_or_default()
    } else {
        value.to_string()
    }
}

#[cfg(test)]
mod tests {
    use std::net::TcpListener;

    use serde_json::Value;

    use super::*;

    fn engine(provider: Provider) -> Engine<WordList, Provider> {
        Engine::new(WordList::from_strs("Haus\nTür\n", "", ""), provider)
    }

    fn parse(s: &str) -> Value {
        serde_json::from_str(s).unwrap()
    }

    #[test]
    fn found_tree_is_encoded() {
        let engine = engine(Provider::Off(NoTranslation));
        assert_eq!(
            parse(&render(&engine, "Haustür", false)),
            json!({
                "word": "",
                "prefix": { "word": "haus" },
                "suffix": { "word": "tür" }
            })
        );
    }

    #[test]
    fn unsplittable_word_is_null() {
        let engine = engine(Provider::Off(NoTranslation));
        assert_eq!(render(&engine, "xyz", false), "null");
    }

    #[test]
    fn invalid_input_is_an_error_blob() {
        let engine = engine(Provider::Off(NoTranslation));
        let v = parse(&render(&engine, "number1", false));
        assert_eq!(v, json!({ "err": "非法字符：'1'" }));
    }

    #[test]
    fn provider_failure_is_an_error_blob() {
        // 绑定后立即释放端口，连接会被拒绝
        let addr = {
            let listener = TcpListener::bind("127.0.0.1:0").unwrap();
            listener.local_addr().unwrap().to_string()
        };
        let dictd = DictdTranslator::new(addr, ["fd-deu-eng"])
            .with_io_timeout(Duration::from_secs(1));
        let engine = engine(Provider::Dictd(dictd));

        let v = parse(&render(&engine, "Haus", false));
        let err = v["err"].as_str().unwrap();
        assert!(err.starts_with("查询释义失败（haus）"), "{err}");
        assert_eq!(v.as_object().map(|o| o.len()), Some(1));
    }

    #[test]
    fn pretty_output_spans_lines() {
        let engine = engine(Provider::Off(NoTranslation));
        let out = render(&engine, "Haustür", true);
        assert!(out.contains('\n'));
        assert_eq!(parse(&out)["suffix"]["word"], "tür");
    }
}
