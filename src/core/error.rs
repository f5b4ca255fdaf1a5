// 一括変換用のカスタムエラー型定義

use thiserror::Error;

/// 一括変換の結果型
pub type ConvertResult<T> = Result<T, ConvertError>;

/// 一括変換で発生するエラー
///
/// バッチは全件成功か全体失敗のどちらかで、最初に観測された失敗だけが
/// 呼び出し元に返る。複数の入力が失敗した場合でも報告されるのは1件のみ。
#[derive(Error, Debug)]
pub enum ConvertError {
    /// 入力内容を取得できなかった
    #[error("failed to open file: {path}: {source}")]
    Access {
        path: String,
        #[source]
        source: anyhow::Error,
    },

    /// Converterが内容を不正と判断した
    #[error("failed to convert file: {label}: {message}")]
    Format { label: String, message: String },

    /// 集約結果の構築・シリアライズに失敗した
    #[error("failed to aggregate output: {context}: {source}")]
    Aggregation {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    /// 入力パスの収集に失敗した
    #[error("failed to stat file: {path}: {source}")]
    Discovery {
        path: String,
        #[source]
        source: anyhow::Error,
    },

    #[error("duplicate identifier in batch: {identifier}")]
    DuplicateIdentifier { identifier: String },

    #[error("invalid configuration: {message}")]
    Configuration { message: String },

    /// 外部からのキャンセル
    #[error("batch cancelled")]
    Cancelled,

    /// 変換処理のブロッキングタスクがパニックした
    #[error("failed to convert file: {identifier}: converter task failed: {source}")]
    ConverterTask {
        identifier: String,
        #[source]
        source: tokio::task::JoinError,
    },

    #[error("worker task failed: {source}")]
    Task {
        #[source]
        source: tokio::task::JoinError,
    },
}

impl ConvertError {
    pub fn access(path: impl Into<String>, source: anyhow::Error) -> Self {
        Self::Access {
            path: path.into(),
            source,
        }
    }

    pub fn format(label: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Format {
            label: label.into(),
            message: message.into(),
        }
    }

    pub fn aggregation(context: impl Into<String>, source: serde_json::Error) -> Self {
        Self::Aggregation {
            context: context.into(),
            source,
        }
    }

    pub fn discovery(path: impl Into<String>, source: anyhow::Error) -> Self {
        Self::Discovery {
            path: path.into(),
            source,
        }
    }

    pub fn duplicate(identifier: impl Into<String>) -> Self {
        Self::DuplicateIdentifier {
            identifier: identifier.into(),
        }
    }

    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    pub fn converter_task(identifier: impl Into<String>, source: tokio::task::JoinError) -> Self {
        Self::ConverterTask {
            identifier: identifier.into(),
            source,
        }
    }

    pub fn task(source: tokio::task::JoinError) -> Self {
        Self::Task { source }
    }

    /// エラーの原因となった入力の識別子
    pub fn identifier(&self) -> Option<&str> {
        match self {
            Self::Access { path, .. } | Self::Discovery { path, .. } => Some(path),
            Self::Format { label, .. } => Some(label),
            Self::DuplicateIdentifier { identifier } | Self::ConverterTask { identifier, .. } => {
                Some(identifier)
            }
            Self::Aggregation { .. }
            | Self::Configuration { .. }
            | Self::Cancelled
            | Self::Task { .. } => None,
        }
    }

    /// エラー分類名（ログ出力用）
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Access { .. } => "access",
            Self::Format { .. } => "format",
            Self::Aggregation { .. } => "aggregation",
            Self::Discovery { .. } => "discovery",
            Self::DuplicateIdentifier { .. } => "duplicate_identifier",
            Self::Configuration { .. } => "configuration",
            Self::Cancelled => "cancelled",
            Self::ConverterTask { .. } => "converter_task",
            Self::Task { .. } => "task",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_access_error_message_names_path() {
        let error = ConvertError::access(
            "testdata/missing.tf",
            anyhow::anyhow!("No such file or directory"),
        );

        assert_eq!(
            error.to_string(),
            "failed to open file: testdata/missing.tf: No such file or directory"
        );
        assert_eq!(error.identifier(), Some("testdata/missing.tf"));
        assert_eq!(error.kind(), "access");
    }

    #[test]
    fn test_format_error_carries_converter_context() {
        let error = ConvertError::format("bad.conf", "bad.conf:1,1-8: Argument expected");

        assert!(error.to_string().contains("bad.conf:1,1-8"));
        assert_eq!(error.identifier(), Some("bad.conf"));
    }

    #[test]
    fn test_aggregation_error_has_no_identifier() {
        let source = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let error = ConvertError::aggregation("final output", source);

        assert_eq!(error.identifier(), None);
        assert_eq!(error.kind(), "aggregation");
    }

    #[tokio::test]
    async fn test_converter_task_error_names_identifier() {
        let join_error = tokio::task::spawn_blocking(|| panic!("boom"))
            .await
            .unwrap_err();
        let error = ConvertError::converter_task("modules/main.tf", join_error);

        assert_eq!(error.identifier(), Some("modules/main.tf"));
        assert_eq!(error.kind(), "converter_task");
        assert!(error
            .to_string()
            .starts_with("failed to convert file: modules/main.tf: converter task failed"));
    }

    #[test]
    fn test_duplicate_identifier_error() {
        let error = ConvertError::duplicate("a.tf");

        assert_eq!(error.to_string(), "duplicate identifier in batch: a.tf");
        assert_eq!(error.identifier(), Some("a.tf"));
    }
}
