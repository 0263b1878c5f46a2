use std::process::ExitCode;
use std::sync::Arc;

use aqi_advisor::config::LoggingConfig;
use aqi_advisor::{AdvisorConfig, AdvisoryGenerator, GeminiClient, OpenWeatherClient, ReportService, logging, web};

#[tokio::main]
async fn main() -> ExitCode {
    let config = match AdvisorConfig::load() {
        Ok(config) => config,
        Err(e) => {
            logging::init(&LoggingConfig::default());
            tracing::error!("Error: {:#}", e);
            return ExitCode::FAILURE;
        }
    };
    logging::init(&config.logging);

    let openweather = match OpenWeatherClient::new(&config.openweather) {
        Ok(client) => Arc::new(client),
        Err(e) => {
            tracing::error!("Error: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let advisor = match GeminiClient::new(&config.gemini) {
        Ok(client) => AdvisoryGenerator::new(Arc::new(client)),
        Err(e) => {
            tracing::error!("Error configuring Gemini API: {}", e);
            AdvisoryGenerator::unconfigured()
        }
    };

    if advisor.is_configured() {
        tracing::info!("Gemini model '{}' configured", config.gemini.model);
    } else {
        tracing::warn!("Gemini model unavailable, recommendations will use the fallback text");
    }

    let service = Arc::new(ReportService::new(openweather.clone(), openweather, advisor));

    if let Err(e) = web::run(&config.server, service).await {
        tracing::error!("{:#}", e);
        return ExitCode::FAILURE;
    }
    ExitCode::SUCCESS
}
