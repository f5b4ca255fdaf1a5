use crate::core::{ConversionOptions, ConvertResult};
use std::sync::Arc;

pub mod hcl_converter;

pub use hcl_converter::HclConverter;

/// 単一ドキュメントの変換バックエンドのトレイト
///
/// 同じ入力に対して常に同じ出力を返し、並行して呼び出されても
/// 共有状態を持たないこと。失敗時のエラーには `label` を含める。
pub trait Converter: Send + Sync {
    /// 内容を変換してJSONバイト列を返す
    fn convert(
        &self,
        content: &[u8],
        label: &str,
        options: &ConversionOptions,
    ) -> ConvertResult<Vec<u8>>;

    /// 変換元フォーマットの名前を取得
    fn format_name(&self) -> &'static str;
}

// Converter for Arc<C>
impl<C: Converter + ?Sized> Converter for Arc<C> {
    fn convert(
        &self,
        content: &[u8],
        label: &str,
        options: &ConversionOptions,
    ) -> ConvertResult<Vec<u8>> {
        self.as_ref().convert(content, label, options)
    }

    fn format_name(&self) -> &'static str {
        self.as_ref().format_name()
    }
}

// Converter for Box<dyn Converter>
impl Converter for Box<dyn Converter> {
    fn convert(
        &self,
        content: &[u8],
        label: &str,
        options: &ConversionOptions,
    ) -> ConvertResult<Vec<u8>> {
        self.as_ref().convert(content, label, options)
    }

    fn format_name(&self) -> &'static str {
        self.as_ref().format_name()
    }
}
