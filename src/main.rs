use anyhow::Result;
use clap::Parser;
use paper_review::cli::{Cli, Command};
use paper_review::orchestrator::{extract_all, preprocess_all};
use paper_review::{logger, App, Config};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // 加载配置
    let mut config = Config::load(cli.config.as_deref())?;

    // 初始化日志
    logger::init(cli.verbose || config.verbose_logging);

    match cli.command {
        Command::Extract(args) => {
            let (input, output) = args.resolve(&config.pdf_dir, &config.text_dir);
            extract_all(&input, &output).await?;
        }
        Command::Preprocess(args) => {
            let (input, output) = args.resolve(&config.text_dir, &config.preprocessed_dir);
            preprocess_all(&input, &output).await?;
        }
        Command::Evaluate(args) => {
            args.apply(&mut config);
            config.validate()?;
            App::initialize(config)?.run(args.only.as_deref()).await?;
        }
    }

    Ok(())
}
