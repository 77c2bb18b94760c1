use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;

use quadlab::configuration::Configuration;
use quadlab::quadrature::method::Method;
use quadlab::study::IntegrationStudy;

#[derive(Parser)]
#[command(
    name = "quadlab",
    version,
    about = "Approximate a definite integral with the classical quadrature rules"
)]
struct Cli {
    /// JSON configuration file; flags below override its values
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Function of x, e.g. "x**2" or "sin(x)/x"
    #[arg(short = 'f', long = "function")]
    expression: Option<String>,

    /// Lower limit of integration
    #[arg(short, allow_negative_numbers = true)]
    a: Option<f64>,

    /// Upper limit of integration
    #[arg(short, allow_negative_numbers = true)]
    b: Option<f64>,

    /// Number of subintervals
    #[arg(short)]
    n: Option<usize>,

    /// Method to run; repeat for several (default: all)
    #[arg(short, long = "method")]
    methods: Vec<Method>,

    /// Print the full report, geometry included, as JSON
    #[arg(long)]
    json: bool,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing_subscriber::filter::LevelFilter::WARN.into()),
        )
        .init();

    let cli = Cli::parse();
    let configuration = load_configuration(&cli)?;
    let report = IntegrationStudy::new(configuration)
        .run()
        .context("integration failed")?;

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print!("{}", report);
    }
    Ok(())
}

fn load_configuration(cli: &Cli) -> Result<Configuration> {
    let mut configuration = match &cli.config {
        Some(path) => Configuration::from_reader(path)
            .with_context(|| format!("loading {}", path.display()))?,
        None => Configuration::new(),
    };

    if let Some(expression) = &cli.expression {
        configuration = configuration.with_expression(expression);
    }
    let a = cli.a.unwrap_or(configuration.lower());
    let b = cli.b.unwrap_or(configuration.upper());
    configuration = configuration.with_interval(a, b);
    if let Some(n) = cli.n {
        configuration = configuration.with_subdivisions(n);
    }
    if !cli.methods.is_empty() {
        configuration = configuration.with_methods(cli.methods.clone());
    }

    Ok(configuration.validated()?)
}
