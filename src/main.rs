use anyhow::Context;
use clap::Parser;
use shark_habitat::app::{
    load_hotspots, remote_provider, to_pretty_json, PredictionService, PredictionView,
};
use shark_habitat::config::cli::{CliConfig, Command};
use shark_habitat::config::{LogFormat, ProviderKind, Settings};
use shark_habitat::utils::error::{ErrorSeverity, PredictError};
use shark_habitat::utils::{logger, validation::Validate};
use shark_habitat::PredictionResult;

fn exit_code(severity: ErrorSeverity) -> i32 {
    match severity {
        ErrorSeverity::Low => 0,
        ErrorSeverity::Medium => 2,
        ErrorSeverity::High => 1,
        ErrorSeverity::Critical => 3,
    }
}

fn report_and_exit(e: &PredictError) -> ! {
    tracing::error!(
        "❌ {} (Category: {:?}, Severity: {:?})",
        e,
        e.category(),
        e.severity()
    );
    tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());
    eprintln!("❌ {}", e.user_friendly_message());
    eprintln!("💡 {}", e.recovery_suggestion());
    std::process::exit(exit_code(e.severity()));
}

fn print_prediction(result: &PredictionResult, json: bool) -> anyhow::Result<()> {
    if json {
        let view = PredictionView::from(result);
        println!("{}", to_pretty_json(&view).context("encoding prediction")?);
        return Ok(());
    }

    match result.probability {
        Some(probability) => println!("🦈 Habitat suitability: {}", probability),
        None => println!("❌ Prediction unavailable"),
    }
    if let Some(estimate) = result.service_probability {
        println!("   Service estimate: {}", estimate);
    }
    println!("   {}", result.message);
    println!(
        "   Nearest zone: {} ({:.0} km)",
        result.nearest_zone_name, result.distance_km
    );
    if let (Some(chl), Some(sst)) = (result.chlorophyll, result.sea_surface_temperature) {
        println!("   Chlorophyll: {:.2} mg/m³, SST: {:.2} °C", chl, sst);
    }
    Ok(())
}

async fn run(cli: &CliConfig, settings: &Settings) -> anyhow::Result<()> {
    match &cli.command {
        Command::Predict {
            lat,
            lon,
            json,
            check,
        } => {
            if *check && settings.provider == ProviderKind::Remote {
                let checked = match remote_provider(settings) {
                    Ok(provider) => provider.health_check().await,
                    Err(e) => Err(e),
                };
                match checked {
                    Ok(message) => tracing::info!("✅ Service reachable: {}", message),
                    Err(e) => tracing::warn!("⚠️ Service health check failed: {}", e),
                }
            }

            let service = match PredictionService::from_settings(settings) {
                Ok(service) => service,
                Err(e) => report_and_exit(&e),
            };

            let result = match service.predict_coordinates(*lat, *lon).await {
                Ok(result) => result,
                Err(e) => report_and_exit(&e),
            };

            print_prediction(&result, *json)?;
            if !result.is_success() {
                std::process::exit(exit_code(ErrorSeverity::Medium));
            }
        }
        Command::Zones { geojson } => {
            let registry = match settings.registry() {
                Ok(registry) => registry,
                Err(e) => report_and_exit(&e),
            };

            if *geojson {
                let overlay = registry.to_feature_collection();
                println!("{}", to_pretty_json(&overlay).context("encoding zones")?);
            } else {
                for (index, zone) in registry.iter().enumerate() {
                    println!(
                        "{:>2}. {} [{}] {}",
                        index + 1,
                        zone.name,
                        zone.species,
                        zone.coordinates
                    );
                }
            }
        }
        Command::Hotspots => {
            let overlay = load_hotspots(settings).await;
            println!("{}", to_pretty_json(&overlay).context("encoding hotspots")?);
        }
    }

    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = CliConfig::parse();

    let settings = match cli.settings() {
        Ok(settings) => settings,
        Err(e) => {
            logger::init_cli_logger(cli.verbose);
            report_and_exit(&e);
        }
    };

    // 初始化日誌
    match settings.log_format {
        LogFormat::Compact => logger::init_cli_logger(settings.verbose),
        LogFormat::Json => logger::init_json_logger(settings.verbose),
    }

    tracing::info!("Starting shark-habitat CLI");
    if settings.verbose {
        tracing::debug!("Effective settings: {:?}", settings);
    }

    // 驗證配置
    if let Err(e) = settings.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        report_and_exit(&e);
    }

    run(&cli, &settings).await
}
