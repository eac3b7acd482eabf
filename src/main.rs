use anyhow::Result;
use clap::Parser;
use upsell_stats::cli::Cli;
use upsell_stats::utils::logging;
use upsell_stats::{App, Config};

fn main() -> Result<()> {
    let cli = Cli::parse();

    // 先校验参数，失败时不读取任何文件
    let mode = cli.command.clone().into_mode()?;

    // 加载配置
    let config = cli.apply(Config::load(cli.config.as_deref())?);

    // 初始化日志
    logging::init(config.verbose_logging);

    App::new(config).run(&mode)?;

    Ok(())
}
