use clap::Parser;
use pcasp_credores::config::{Command, ValidateArgs};
use pcasp_credores::utils::{logger, validation::Validate};
use pcasp_credores::{
    AppConfig, CliConfig, LocalStorage, ValidationEngine, ValidationPipeline, ValidatorError,
};
use std::path::Path;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = CliConfig::parse();

    if cli.log_json {
        logger::init_json_logger(cli.verbose);
    } else {
        logger::init_cli_logger(cli.verbose);
    }

    tracing::info!("Starting pcasp-credores");
    if cli.verbose {
        tracing::debug!("CLI config: {:?}", cli);
    }

    let config = match cli.app_config().and_then(|config| {
        config.validate()?;
        Ok(config)
    }) {
        Ok(config) => config,
        Err(e) => fail(e),
    };

    let result = match cli.command() {
        Command::Serve(_) => pcasp_credores::web::serve(config).await,
        Command::Validate(args) => run_batch(config, args).await,
    };

    if let Err(e) = result {
        fail(e);
    }

    Ok(())
}

async fn run_batch(config: AppConfig, args: ValidateArgs) -> pcasp_credores::Result<()> {
    let output_path = Path::new(&args.output).join(&config.output.file_name);
    let output_path = output_path.to_string_lossy().to_string();

    // Paths are taken as given on the command line, relative to the working directory.
    let storage = LocalStorage::new(".".to_string());
    let pipeline = ValidationPipeline::new(storage, args.input.clone(), output_path)
        .with_rules(config.rules.clone());
    let engine = ValidationEngine::new(pipeline);

    let output = engine.run().await?;

    println!("✅ Validação concluída");
    println!(
        "   Credores: {} | Corretos: {} | Divergentes: {}",
        output.report.comparisons.len(),
        output.report.correct_count(),
        output.report.divergent_count()
    );
    println!("📁 Resultado salvo em: {}", output.output_path);

    Ok(())
}

fn fail(e: ValidatorError) -> ! {
    tracing::error!(
        "❌ {} (Category: {:?}, Severity: {:?})",
        e,
        e.category(),
        e.severity()
    );
    tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());

    eprintln!("❌ {}", e.user_friendly_message());
    eprintln!("💡 {}", e.recovery_suggestion());
    std::process::exit(e.exit_code());
}
