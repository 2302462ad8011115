use std::path::PathBuf;
use std::process::ExitCode;

use clap::{value_parser, Arg, ArgAction, ArgMatches, Command};
use eff_cli::commands::{self, failure_message};
use eff_cli::{CliResult, DashboardConfig, InputSource};
use tracing_subscriber::EnvFilter;

fn cli() -> Command {
    let input = Arg::new("input")
        .required(true)
        .help("JSON file, fixture name, or - for stdin");

    Command::new("eff")
        .version(eff_cli::VERSION)
        .about("EFF - Earned Future Financing assessment dashboard")
        .subcommand_required(true)
        .arg(
            Arg::new("config")
                .long("config")
                .global(true)
                .value_parser(value_parser!(PathBuf))
                .help("Dashboard config file (defaults to ./eff.toml if present)"),
        )
        .arg(
            Arg::new("fixtures-dir")
                .long("fixtures-dir")
                .global(true)
                .value_parser(value_parser!(PathBuf))
                .help("Directory of example assessment JSON files"),
        )
        .subcommand(Command::new("list").about("List example fixtures"))
        .subcommand(
            Command::new("detect")
                .about("Report whether a payload is canonical or a legacy bundle")
                .arg(input.clone()),
        )
        .subcommand(
            Command::new("adapt")
                .about("Print the canonical eff_assessment_v1 JSON")
                .arg(input.clone())
                .arg(
                    Arg::new("compact")
                        .long("compact")
                        .action(ArgAction::SetTrue)
                        .help("Single-line JSON output"),
                ),
        )
        .subcommand(
            Command::new("show")
                .about("Render the assessment as a text dashboard")
                .arg(input),
        )
}

fn init_tracing() {
    let filter = EnvFilter::try_from_env("EFF_LOG")
        .or_else(|_| EnvFilter::try_from_default_env())
        .unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn load_config(matches: &ArgMatches) -> CliResult<DashboardConfig> {
    let explicit = matches.get_one::<PathBuf>("config").map(PathBuf::as_path);
    let config = DashboardConfig::discover(explicit)?;
    Ok(match matches.get_one::<PathBuf>("fixtures-dir") {
        Some(dir) => config.with_fixtures_dir(dir),
        None => config,
    })
}

fn run(matches: &ArgMatches) -> CliResult<String> {
    let Some((name, args)) = matches.subcommand() else {
        return Ok(String::new());
    };
    // global flags are propagated into the subcommand's matches
    let config = load_config(args)?;
    let source = || {
        let arg = args.get_one::<String>("input").map_or("-", String::as_str);
        InputSource::resolve(arg, &config.fixtures_dir)
    };

    match name {
        "list" => commands::list(&config),
        "detect" => Ok(format!("{}\n", commands::detect(&source()?)?)),
        "adapt" => commands::adapt(&source()?, args.get_flag("compact")),
        "show" => commands::show(&source()?, &config),
        _ => Ok(String::new()),
    }
}

fn main() -> ExitCode {
    init_tracing();
    let matches = cli().get_matches();

    match run(&matches) {
        Ok(output) => {
            print!("{output}");
            ExitCode::SUCCESS
        }
        Err(err) => {
            tracing::debug!(error = ?err, "command failed");
            eprintln!("{}", failure_message(&err));
            eprintln!("{err}");
            ExitCode::FAILURE
        }
    }
}
