use anyhow::Context;
use clap::Parser;
use site_geofence::utils::{logger, validation::Validate};
use site_geofence::{format_radius, CheckinGate, CliConfig, FixedLocation, GeofenceError, SiteConfig};

const DENIED_EXIT_CODE: i32 = 4;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = CliConfig::parse();

    if config.json_logs {
        logger::init_json_logger();
    } else {
        logger::init_cli_logger(config.verbose);
    }

    tracing::debug!("CLI config: {:?}", config);

    if let Err(e) = config.validate() {
        tracing::error!("Configuration validation failed: {}", e);
        eprintln!("❌ {}", e.user_friendly_message());
        std::process::exit(e.exit_code());
    }

    let site = match SiteConfig::from_file(&config.site).and_then(|site| {
        site.validate()?;
        Ok(site)
    }) {
        Ok(site) => site,
        Err(e) => fail(e),
    };

    let gate = CheckinGate::new(FixedLocation::new(config.device()));
    let admission = match gate.check(site.project()).await {
        Ok(admission) => admission,
        Err(e) => fail(e),
    };

    if config.json {
        let rendered =
            serde_json::to_string_pretty(&admission).context("failed to render admission")?;
        println!("{}", rendered);
    } else if admission.is_admitted() {
        println!(
            "✅ Inside project range: {:.1} m from center (limit {} m)",
            admission.distance_meters,
            format_radius(admission.radius_meters)
        );
    } else if let Some(message) = admission.denial_message() {
        println!("❌ {}", message);
    }

    if !admission.is_admitted() {
        std::process::exit(DENIED_EXIT_CODE);
    }

    Ok(())
}

fn fail(e: GeofenceError) -> ! {
    tracing::error!(
        "Check failed: {} (Category: {:?}, Severity: {:?})",
        e,
        e.category(),
        e.severity()
    );
    eprintln!("❌ {}", e.user_friendly_message());
    eprintln!("💡 {}", e.recovery_suggestion());
    std::process::exit(e.exit_code());
}

