use anyhow::{Context, Result};
use barcode_batch_submit::utils::logging;
use barcode_batch_submit::{App, Config};
use std::path::PathBuf;

#[tokio::main]
async fn main() -> Result<()> {
    // 加载配置
    let config = Config::load().context("加载配置失败")?;

    // 初始化日志
    logging::init(config.verbose_logging);

    // 命令行参数：PDF 文件或目录
    let paths: Vec<PathBuf> = std::env::args().skip(1).map(PathBuf::from).collect();
    if paths.is_empty() {
        anyhow::bail!("用法: barcode_batch_submit <文件或目录>...");
    }

    // 初始化并运行应用
    let summary = App::initialize(config).await?.run(&paths).await?;

    if summary.total > 0 && summary.failed == summary.total {
        tracing::warn!("⚠️ 所有文件都处理失败，请检查识别服务");
    }

    Ok(())
}
