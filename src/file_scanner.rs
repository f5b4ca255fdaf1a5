use crate::core::{ConvertError, ConvertResult};
use std::path::Path;
use walkdir::WalkDir;

pub struct FileScanner;

impl FileScanner {
    /// 引数のパスから変換対象のファイル一覧を作る
    ///
    /// ディレクトリは再帰的に走査して拡張子が一致する通常ファイルを集め、
    /// ファイルはそのまま追加する。
    pub fn collect(paths: &[String], extension: &str) -> ConvertResult<Vec<String>> {
        let mut file_paths = Vec::new();

        for path in paths {
            if Self::is_directory(path)? {
                file_paths.extend(Self::scan_directory(Path::new(path), extension)?);
            } else {
                file_paths.push(path.clone());
            }
        }

        Ok(file_paths)
    }

    pub fn is_directory(path: &str) -> ConvertResult<bool> {
        let metadata =
            std::fs::metadata(path).map_err(|e| ConvertError::discovery(path, e.into()))?;
        Ok(metadata.is_dir())
    }

    pub fn scan_directory(directory: &Path, extension: &str) -> ConvertResult<Vec<String>> {
        let wanted = extension.trim_start_matches('.');
        let mut file_paths = Vec::new();

        for entry in WalkDir::new(directory).sort_by_file_name() {
            let entry = entry.map_err(|e| {
                ConvertError::discovery(directory.to_string_lossy(), e.into())
            })?;

            if entry.file_type().is_file() && Self::has_extension(entry.path(), wanted) {
                file_paths.push(entry.path().to_string_lossy().to_string());
            }
        }

        Ok(file_paths)
    }

    fn has_extension(path: &Path, wanted: &str) -> bool {
        path.extension().is_some_and(|ext| ext == wanted)
    }
}
