use anyhow::Result;
use clap::Parser;
use hcl2json::cli::{execute_convert, Cli};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    // RUST_LOG が設定されていればそれを優先する
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        if cli.verbose {
            EnvFilter::new("hcl2json=debug")
        } else {
            EnvFilter::new("hcl2json=warn")
        }
    });

    // 標準出力はJSON専用なのでログは標準エラーへ
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    if let Err(error) = run(&cli).await {
        eprintln!("{error:#}");
        std::process::exit(1);
    }
}

async fn run(cli: &Cli) -> Result<()> {
    let stdin = std::io::stdin();
    let mut stdout = std::io::stdout().lock();

    execute_convert(stdin.lock(), &mut stdout, &cli.paths, &cli.run_options()).await
}
