use clap::Parser;
use modelcall::core::encoding::to_pretty_bytes;
use modelcall::core::ConfigProvider;
use modelcall::utils::error::{CallError, ErrorSeverity};
use modelcall::utils::{logger, validation::Validate};
use modelcall::{CliConfig, HttpModelService, LocalStorage, ModelCall};

fn report_and_exit(e: &CallError) -> ! {
    tracing::error!(
        "❌ buildModel call failed: {} (Category: {:?}, Severity: {:?})",
        e,
        e.category(),
        e.severity()
    );
    tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());

    eprintln!("❌ {}", e.user_friendly_message());
    eprintln!("💡 建議: {}", e.recovery_suggestion());

    let exit_code = match e.severity() {
        ErrorSeverity::Medium => 2, // 可重試
        ErrorSeverity::High => 1,
        ErrorSeverity::Critical => 3,
    };
    std::process::exit(exit_code);
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = CliConfig::parse();

    if cli.log_json {
        logger::init_json_logger(cli.verbose);
    } else {
        logger::init_cli_logger(cli.verbose);
    }

    tracing::info!("Starting modelcall");
    if cli.verbose {
        tracing::debug!("CLI config: {:?}", cli);
    }

    let config = match cli.resolve().and_then(|config| config.validate().map(|_| config)) {
        Ok(config) => config,
        Err(e) => report_and_exit(&e),
    };

    let service = match HttpModelService::new(config.host_and_port(), config.timeout_seconds()) {
        Ok(service) => service,
        Err(e) => report_and_exit(&e),
    };
    tracing::info!("🎯 Model service endpoint: {}", service.endpoint());
    let ascii_only = config.ascii_only();
    let call = ModelCall::new(LocalStorage::default(), config, service);

    if cli.dry_run {
        let request = match call.prepare().await {
            Ok(request) => request,
            Err(e) => report_and_exit(&e),
        };
        let pretty = to_pretty_bytes(&request, ascii_only)?;
        println!("{}", String::from_utf8_lossy(&pretty));
        return Ok(());
    }

    match call.run().await {
        Ok(outcome) => {
            tracing::info!(
                "✅ Sent {} bytes, HTTP {}, received {} bytes",
                outcome.request_bytes,
                outcome.http_status,
                outcome.response_bytes
            );
            tracing::info!("📁 Response saved to: {}", outcome.output_path);
            println!("📁 Response saved to: {}", outcome.output_path);
            if outcome.summary.is_error() {
                eprintln!(
                    "⚠️ Model service reported {} error(s)",
                    outcome.summary.errors.len()
                );
            }
        }
        Err(e) => report_and_exit(&e),
    }

    Ok(())
}
