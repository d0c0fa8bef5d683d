//! `wort_core`：复合词切分的纯逻辑层，不做任何 I/O。
//!
//! 设计目标：
//! - **核心可复用**：CLI/服务端都能复用同一套逻辑
//! - **分层清晰**：engine -> segmenter（切分）-> annotator（查释义）-> 输出（`Node`，可序列化为 JSON）
//! - **依赖收窄**：只通过 `Validity`（词是否合法）和 `Translator`（查释义）两个接口与外部交互
pub mod annotator;
pub mod cancel;
pub mod dictionary;
pub mod engine;
pub mod error;
pub mod model;
pub mod score;
pub mod segmenter;
pub mod translator;

pub use crate::annotator::annotate;
pub use crate::cancel::CancelToken;
pub use crate::engine::{Engine, EngineError};
pub use crate::model::{Node, Word};
pub use crate::segmenter::Segmenter;
