use clap::{Arg, Command};
use std::path::PathBuf;

fn main() {
    let cli = Command::new("cirrus")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Declarative GraphQL API infrastructure synthesizer")
        .arg_required_else_help(true)
        .arg(
            Arg::new("log-level")
                .long("log-level")
                .global(true)
                .default_value("warn")
                .help("Log filter when CIRRUS_LOG is unset"),
        )
        .subcommand(
            Command::new("check")
                .about("Validate the app manifest and every environment's stack")
                .arg(app_arg()),
        )
        .subcommand(
            Command::new("synth")
                .about("Synthesize the cloud assembly")
                .arg(app_arg())
                .arg(
                    Arg::new("out")
                        .long("out")
                        .default_value("assembly")
                        .value_parser(clap::value_parser!(PathBuf))
                        .help("Output directory for the assembly"),
                ),
        )
        .subcommand(
            Command::new("template")
                .about("Print one environment's deployment template")
                .arg(app_arg())
                .arg(
                    Arg::new("env")
                        .long("env")
                        .required(true)
                        .help("Environment name"),
                ),
        );

    let matches = cli.get_matches();
    cirrus_cli::logging::init(
        matches
            .get_one::<String>("log-level")
            .map_or("warn", String::as_str),
    );

    let result = match matches.subcommand() {
        Some(("check", args)) => cirrus_cli::commands::check(app_path(args)),
        Some(("synth", args)) => {
            let out = args
                .get_one::<PathBuf>("out")
                .expect("defaulted by clap");
            cirrus_cli::commands::synth(app_path(args), out)
        }
        Some(("template", args)) => {
            let env = args.get_one::<String>("env").expect("required by clap");
            cirrus_cli::commands::template(app_path(args), env)
        }
        _ => Ok(()),
    };

    if let Err(err) = result {
        eprintln!("error: {err:#}");
        std::process::exit(1);
    }
}

fn app_arg() -> Arg {
    Arg::new("app")
        .long("app")
        .default_value("cirrus.yaml")
        .value_parser(clap::value_parser!(PathBuf))
        .help("Path to the app manifest")
}

fn app_path(args: &clap::ArgMatches) -> &std::path::Path {
    args.get_one::<PathBuf>("app")
        .expect("defaulted by clap")
        .as_path()
}
