use std::path::{Path, PathBuf};

use clap::{Args, Parser, Subcommand};
use schematics_core::{DiscoveryOutcome, validate_collections};
use schematics_discovery::config::DiscoverConfig;
use schematics_discovery::discover_with_config;
use schematics_discovery::output::{
    OutputFormat, format_collections, format_report, format_schematic,
};
use schematics_discovery::report::DiscoveryReport;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "schematics")]
#[command(about = "List installed schematics collections and their parameters")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// List every collection and its generators.
    List(ListArgs),
    /// Show the parameters of one generator (`collection:schematic`).
    Show(ShowArgs),
    /// Print a discovery summary including dropped generators.
    Report(ReportArgs),
}

#[derive(Debug, Args)]
struct DiscoverArgs {
    /// Project directory containing the package directory.
    #[arg(default_value = ".")]
    base: PathBuf,
    /// YAML configuration file.
    #[arg(long)]
    config: Option<PathBuf>,
    /// Package directory relative to the project (default: node_modules).
    #[arg(long)]
    package_dir: Option<String>,
    /// Comma-separated generator names to hide (replaces the configured list).
    #[arg(long)]
    reserve: Option<String>,
    /// Comma-separated packages to skip.
    #[arg(long)]
    exclude: Option<String>,
    /// Number of parallel resolution jobs.
    #[arg(long)]
    jobs: Option<usize>,
    /// Output format.
    #[arg(long, default_value = "table")]
    format: OutputFormat,
    /// Log debug details to stderr.
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Debug, Args)]
struct ListArgs {
    #[command(flatten)]
    discover: DiscoverArgs,
    /// Fail if the result has structural problems (duplicate names, ...).
    #[arg(long)]
    strict: bool,
}

#[derive(Debug, Args)]
struct ShowArgs {
    /// Generator to show, as `collection:schematic`.
    target: String,
    #[command(flatten)]
    discover: DiscoverArgs,
}

#[derive(Debug, Args)]
struct ReportArgs {
    #[command(flatten)]
    discover: DiscoverArgs,
}

fn main() {
    let cli = Cli::parse();

    let verbose = match &cli.command {
        Command::List(args) => args.discover.verbose,
        Command::Show(args) => args.discover.verbose,
        Command::Report(args) => args.discover.verbose,
    };
    init_tracing(verbose);

    let result = match cli.command {
        Command::List(args) => run_list(args),
        Command::Show(args) => run_show(args),
        Command::Report(args) => run_report(args),
    };

    if let Err(err) = result {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

fn run_list(args: ListArgs) -> Result<(), String> {
    let outcome = discover(&args.discover)?;

    if args.strict {
        let errors = validate_collections(&outcome.collections);
        if !errors.is_empty() {
            let messages: Vec<String> = errors.iter().map(ToString::to_string).collect();
            return Err(format!("validation failed: {}", messages.join("; ")));
        }
    }

    print!(
        "{}",
        format_collections(&outcome.collections, args.discover.format)?
    );
    Ok(())
}

fn run_show(args: ShowArgs) -> Result<(), String> {
    let (collection, schematic) = parse_target(&args.target)?;
    let outcome = discover(&args.discover)?;

    let found = outcome
        .collection(collection)
        .ok_or_else(|| format!("collection '{collection}' not found"))?
        .find(schematic)
        .ok_or_else(|| format!("schematic '{schematic}' not found in '{collection}'"))?;

    print!("{}", format_schematic(found, args.discover.format)?);
    Ok(())
}

fn run_report(args: ReportArgs) -> Result<(), String> {
    let outcome = discover(&args.discover)?;
    let report = DiscoveryReport::from_outcome(&args.discover.base, &outcome);
    print!("{}", format_report(&report, args.discover.format)?);
    Ok(())
}

fn discover(args: &DiscoverArgs) -> Result<DiscoveryOutcome, String> {
    let config = build_config(args)?;
    discover_with_config(&args.base, &config).map_err(|err| err.to_string())
}

fn build_config(args: &DiscoverArgs) -> Result<DiscoverConfig, String> {
    let mut config = match &args.config {
        Some(path) => load_config(path)?,
        None => DiscoverConfig::default(),
    };

    if let Some(dir) = &args.package_dir {
        config.package_dir = dir.clone();
    }
    if let Some(reserve) = &args.reserve {
        config.reserved_names = parse_csv_list(reserve);
    }
    if let Some(exclude) = &args.exclude {
        config.exclude.extend(parse_csv_list(exclude));
    }
    if args.jobs.is_some() {
        config.jobs = args.jobs;
    }

    Ok(config)
}

fn load_config(path: &Path) -> Result<DiscoverConfig, String> {
    DiscoverConfig::load(path)
        .map_err(|err| format!("Failed to load config '{}': {err}", path.display()))
}

/// Splits `collection:schematic`; the collection may itself contain a scope.
fn parse_target(target: &str) -> Result<(&str, &str), String> {
    match target.rsplit_once(':') {
        Some((collection, schematic)) if !collection.is_empty() && !schematic.is_empty() => {
            Ok((collection, schematic))
        }
        _ => Err(format!(
            "invalid target '{target}', expected collection:schematic"
        )),
    }
}

fn parse_csv_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .map(ToOwned::to_owned)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::{parse_csv_list, parse_target};

    #[test]
    fn test_parse_csv_list_trims_and_drops_empty() {
        let parsed = parse_csv_list(" ng-add, init, ,setup ");
        assert_eq!(parsed, vec!["ng-add", "init", "setup"]);
    }

    #[test]
    fn test_parse_target_splits_on_last_colon() {
        assert_eq!(
            parse_target("@nrwl/react:library"),
            Ok(("@nrwl/react", "library"))
        );
        assert!(parse_target("library").is_err());
        assert!(parse_target(":library").is_err());
        assert!(parse_target("@nrwl/react:").is_err());
    }
}
