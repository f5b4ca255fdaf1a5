//! HCLファイルを並列にJSONへ変換するライブラリ
//!
//! 識別子（ファイルパス）のリストを固定数のワーカーに配り、結果を
//! パスをキーとする1つのJSONオブジェクトに集約する。1件でも失敗すれば
//! 残りのワーカーをキャンセルし、全ワーカーの終了を待ってから最初の
//! エラーだけを返す。

pub mod cli;
pub mod converter;
pub mod core;
pub mod engine;
pub mod file_scanner;
pub mod services;
pub mod storage;

pub use crate::converter::{Converter, HclConverter};
pub use crate::core::{ConversionOptions, ConvertError, ConvertResult};
pub use crate::engine::{bulk_convert, BulkEngine};
