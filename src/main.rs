use clap::Parser;
use sandbox_mailer::utils::logger;
use sandbox_mailer::{app, CliConfig, EmailSender};
use std::io::Write;

#[tokio::main(flavor = "current_thread")]
async fn main() {
    let config = CliConfig::parse();

    // 初始化日誌
    if config.log_json {
        logger::init_json_logger(config.verbose);
    } else {
        logger::init_cli_logger(config.verbose);
    }

    tracing::info!("Starting send-test-email");

    // 啟動時一次解析完所有設定，缺金鑰時在發送前就失敗
    let settings = match config.resolve() {
        Ok(settings) => settings,
        Err(e) => {
            tracing::error!("❌ Configuration validation failed: {}", e);
            std::process::exit(app::report_failure(&mut std::io::stderr(), &e));
        }
    };
    tracing::debug!("Resolved settings: {:?}", settings);

    let sender = match EmailSender::with_timeout(
        settings.api_base.clone(),
        settings.credentials.clone(),
        settings.timeout,
    ) {
        Ok(sender) => sender,
        Err(e) => {
            tracing::error!("❌ Failed to build HTTP client: {}", e);
            std::process::exit(app::report_failure(&mut std::io::stderr(), &e));
        }
    };

    let mut stdout = std::io::stdout();
    let code = app::run(&sender, &settings.message, &mut stdout, &mut std::io::stderr()).await;
    let _ = stdout.flush();

    std::process::exit(code);
}
