use clap::{ArgAction, Parser};

/// `--concurrency` のデフォルト値
pub const DEFAULT_CONCURRENCY: i64 = 10;

#[derive(Parser, Debug)]
#[command(name = "hcl2json")]
#[command(about = "Converts HCL files to JSON")]
#[command(version)]
pub struct Cli {
    /// Files or directories to convert; reads stdin when omitted or "-"
    pub paths: Vec<String>,

    /// If true attempt to simplify expressions which don't contain any variables or unknown functions
    #[arg(long)]
    pub simplify: bool,

    /// If true the resulting JSON is pretty-printed
    #[arg(long, default_value_t = true, action = ArgAction::Set)]
    pub pretty: bool,

    /// Convert files with extension when recursively scanning directories
    #[arg(long, default_value = ".tf")]
    pub extension: String,

    /// Number of files to convert concurrently
    #[arg(short, long, default_value_t = DEFAULT_CONCURRENCY, allow_negative_numbers = true)]
    pub concurrency: i64,

    /// Enable debug logging on stderr
    #[arg(short, long)]
    pub verbose: bool,
}

impl Cli {
    /// 実行用オプションへ変換
    pub fn run_options(&self) -> RunOptions {
        RunOptions {
            simplify: self.simplify,
            pretty: self.pretty,
            extension: self.extension.clone(),
            concurrency: self.concurrency,
        }
    }
}

/// convertコマンドの実行オプション
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunOptions {
    pub simplify: bool,
    pub pretty: bool,
    pub extension: String,
    pub concurrency: i64,
}

impl Default for RunOptions {
    fn default() -> Self {
        Self {
            simplify: false,
            pretty: true,
            extension: ".tf".to_string(),
            concurrency: DEFAULT_CONCURRENCY,
        }
    }
}
