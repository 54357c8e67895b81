use std::sync::Arc;

use estimate_intake::advice::{MaterialConsultant, create_provider};
use estimate_intake::config::IntakeConfig;
use estimate_intake::console::Console;
use estimate_intake::delivery::LogDispatcher;
use estimate_intake::intake::StepController;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Logs go to stderr so they never interleave with the form on stdout.
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let config = IntakeConfig::from_env()?;

    eprintln!("Estimate Intake v{}", env!("CARGO_PKG_VERSION"));

    let consultant = match &config.advice {
        Some(advice) => match create_provider(advice) {
            Ok(provider) => MaterialConsultant::new(provider),
            Err(e) => {
                tracing::warn!("Material advice disabled: {}", e);
                MaterialConsultant::offline()
            }
        },
        None => MaterialConsultant::offline(),
    };
    match (&config.advice, consultant.is_online()) {
        (Some(advice), true) => eprintln!("   Material advice: {}", advice.model),
        _ => eprintln!("   Material advice: off (set GEMINI_API_KEY to enable)"),
    }
    eprintln!("   Type 'help' for commands. 'quit' to exit.\n");

    let controller = Arc::new(StepController::new(
        Arc::new(LogDispatcher::new()),
        config.submit_delay,
    ));

    let console = Console::new(controller, consultant);
    console.run().await?;

    tracing::info!("Shutting down");
    Ok(())
}
