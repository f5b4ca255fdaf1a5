use super::Converter;
use crate::core::{ConversionOptions, ConvertError, ConvertResult};
use ::hcl::eval::{Context, Evaluate};

/// HCLをJSONへ変換するConverter実装
#[derive(Clone, Debug, Default)]
pub struct HclConverter;

impl HclConverter {
    pub fn new() -> Self {
        Self
    }

    fn parse_body(content: &[u8], label: &str) -> ConvertResult<::hcl::Body> {
        let text = std::str::from_utf8(content)
            .map_err(|e| ConvertError::format(label, format!("invalid UTF-8: {e}")))?;

        ::hcl::parse(text).map_err(|e| ConvertError::format(label, format!("parse config: {e}")))
    }
}

impl Converter for HclConverter {
    fn convert(
        &self,
        content: &[u8],
        label: &str,
        options: &ConversionOptions,
    ) -> ConvertResult<Vec<u8>> {
        let mut body = Self::parse_body(content, label)?;

        if options.simplify {
            // 変数や未知の関数を含む式は評価に失敗し、元の式のまま残る
            let ctx = Context::new();
            if let Err(errors) = body.evaluate_in_place(&ctx) {
                tracing::trace!(label, %errors, "unevaluated expressions left as-is");
            }
        }

        let value: serde_json::Value = ::hcl::from_body(body)
            .map_err(|e| ConvertError::format(label, format!("convert body: {e}")))?;

        serde_json::to_vec(&value).map_err(|e| ConvertError::aggregation(label, e))
    }

    fn format_name(&self) -> &'static str {
        "hcl"
    }
}
