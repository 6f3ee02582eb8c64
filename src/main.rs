use clap::Parser;
use pom_synth::cli::commands::{GenerateArgs, cmd_generate, cmd_locators};
use pom_synth::cli::config::{Cli, Commands, ModelOverrides, load_config};

fn init_logging(verbose: u8) {
    let default_level = match verbose {
        0 => "pom_synth=warn",
        1 => "pom_synth=info",
        2 => "pom_synth=debug",
        _ => "pom_synth=trace",
    };
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let config = load_config(cli.config.as_deref());
    let overrides = ModelOverrides::from(&cli);

    let result = match &cli.command {
        Commands::Generate {
            hierarchy,
            mode,
            class_name,
            package,
            base_class,
            strategy,
            output,
        } => {
            let args = GenerateArgs {
                hierarchy: hierarchy.clone(),
                mode: mode.clone(),
                class_name: class_name.clone(),
                package: package.clone(),
                base_class: base_class.clone(),
                strategy: strategy.clone(),
                output: output.clone(),
            };
            cmd_generate(&args, &config, &overrides, cli.trace.as_deref())
        }
        Commands::Locators { hierarchy, mode } => {
            cmd_locators(hierarchy, mode.as_deref(), &config)
        }
    };

    if let Err(e) = result {
        eprintln!("generation failed: {}", e);
        std::process::exit(1);
    }
}
