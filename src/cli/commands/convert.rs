use crate::cli::args::RunOptions;
use crate::cli::pretty;
use crate::converter::{Converter, HclConverter};
use crate::core::{ConversionOptions, ConvertError};
use crate::engine::BulkEngine;
use crate::file_scanner::FileScanner;
use crate::services::{DefaultBulkConfig, LoggingProgressReporter};
use crate::storage::LocalFileSource;
use anyhow::{Context, Result};
use std::io::{Read, Write};

/// Execute convert command
///
/// No paths (or a single "-") converts stdin, a single file is converted on its
/// own, anything else goes through the bulk pipeline keyed by file path.
pub async fn execute_convert<I, W>(
    input: I,
    output: &mut W,
    paths: &[String],
    options: &RunOptions,
) -> Result<()>
where
    I: Read,
    W: Write,
{
    let converted = convert_paths(input, paths, options).await?;
    write_output(output, &converted, options.pretty)
}

async fn convert_paths<I: Read>(input: I, paths: &[String], options: &RunOptions) -> Result<Vec<u8>> {
    let conversion = ConversionOptions {
        simplify: options.simplify,
    };

    if let [path] = paths {
        if path.is_empty() || path == "-" {
            return convert_reader(input, "", &conversion);
        }
        if !FileScanner::is_directory(path)? {
            return Ok(convert_file(path, &conversion).await?);
        }
    } else if paths.is_empty() {
        return convert_reader(input, "", &conversion);
    }

    let files = FileScanner::collect(paths, &options.extension)?;
    tracing::debug!(files = files.len(), "collected input files");

    let config = DefaultBulkConfig::default().with_concurrency(options.concurrency);

    let engine = BulkEngine::new(
        HclConverter::new(),
        LocalFileSource::new(),
        config,
        LoggingProgressReporter::quiet(),
    );

    Ok(engine.convert(files, conversion).await?)
}

/// 標準入力などのリーダーから読み込んで変換
fn convert_reader<I: Read>(
    mut input: I,
    label: &str,
    options: &ConversionOptions,
) -> Result<Vec<u8>> {
    let mut buf = Vec::new();
    input
        .read_to_end(&mut buf)
        .context("failed to read file")?;

    Ok(HclConverter::new().convert(&buf, label, options)?)
}

/// 単一ファイルを変換
async fn convert_file(path: &str, options: &ConversionOptions) -> Result<Vec<u8>, ConvertError> {
    let content = tokio::fs::read(path)
        .await
        .map_err(|e| ConvertError::access(path, e.into()))?;

    HclConverter::new().convert(&content, path, options)
}

fn write_output<W: Write>(output: &mut W, converted: &[u8], pretty: bool) -> Result<()> {
    if !pretty {
        return output.write_all(converted).context("failed to write");
    }

    let indented = pretty::indent(converted, b"    ").context("failed to indent file")?;
    output.write_all(&indented).context("failed to write")
}
