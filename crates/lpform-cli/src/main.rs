use clap::{Parser, Subcommand};
use lpform_client::{navigation, FormSession, GatewayConfig, SolveGateway, SolveRequest, SubmitOutcome};
use lpform_model::{render_iterations, Method, ObjectiveType, ProblemSpec, SolutionSummary, SolveResult};
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "lpform")]
#[command(about = "Build linear programs, send them to a solver and inspect every tableau", long_about = None)]
struct Cli {
    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print a new problem file with default coefficients
    New {
        /// Number of decision variables (1-10)
        #[arg(long, default_value_t = 2)]
        variables: usize,
        /// Number of constraints (1-10)
        #[arg(long, default_value_t = 2)]
        constraints: usize,
        /// Minimize instead of maximize
        #[arg(long)]
        minimize: bool,
        /// Solver method (simplexe, deux-phases, big-m)
        #[arg(short, long, default_value = "simplexe")]
        method: String,
    },
    /// Check a problem file and print the exact solve request
    Request {
        /// The problem file (request JSON)
        file: PathBuf,
    },
    /// Send a problem to the solver and show the result
    Solve {
        /// The problem file (request JSON)
        file: PathBuf,
        /// Base URL of the solving service
        #[arg(long, env = "LPFORM_SOLVER_URL", default_value = lpform_client::DEFAULT_SOLVER_URL)]
        solver_url: String,
        /// Also print the results URL
        #[arg(short, long)]
        link: bool,
    },
    /// Render a result from a results URL or its `data` parameter
    Show {
        /// Results URL, query string or raw `data` value
        data: String,
    },
}

fn setup_logger(verbose: u8) {
    use fern::colors::{Color, ColoredLevelConfig};
    let colors = ColoredLevelConfig::new()
        .debug(Color::White)
        .info(Color::Green)
        .warn(Color::BrightYellow)
        .error(Color::BrightRed);

    let level = match verbose {
        0 => log::LevelFilter::Warn,
        1 => log::LevelFilter::Debug,
        _ => log::LevelFilter::Trace,
    };

    let result = fern::Dispatch::new()
        .format(move |out, message, record| {
            out.finish(format_args!(
                "{} | {:5} | {}",
                chrono::Local::now().format("%Y-%m-%d %H:%M:%S%.3f"),
                colors.color(record.level()),
                message
            ))
        })
        .level(level)
        .chain(std::io::stderr())
        .apply();
    if let Err(e) = result {
        eprintln!("Could not set up logging: {}", e);
    }
}

fn load_problem(file: &Path) -> ProblemSpec {
    let source = match std::fs::read_to_string(file) {
        Ok(s) => s,
        Err(e) => {
            eprintln!("Error reading file: {}", e);
            std::process::exit(1);
        }
    };

    let request = match SolveRequest::from_json(&source) {
        Ok(r) => r,
        Err(e) => {
            eprintln!("Invalid problem file: {}", e);
            std::process::exit(1);
        }
    };

    match ProblemSpec::try_from(request) {
        Ok(spec) => spec,
        Err(e) => {
            eprintln!("Invalid problem: {}", e);
            std::process::exit(1);
        }
    }
}

fn print_result(result: &SolveResult) {
    print!("{}", SolutionSummary::new(result));
    for grid in render_iterations(result) {
        println!();
        print!("{}", grid);
    }
}

fn main() {
    let cli = Cli::parse();
    setup_logger(cli.verbose);

    match cli.command {
        Commands::New {
            variables,
            constraints,
            minimize,
            method,
        } => {
            let method: Method = match method.parse() {
                Ok(m) => m,
                Err(e) => {
                    eprintln!("{}", e);
                    std::process::exit(1);
                }
            };
            let objective_type = if minimize {
                ObjectiveType::Minimize
            } else {
                ObjectiveType::Maximize
            };

            let spec = ProblemSpec::new()
                .with_variable_count(variables)
                .with_constraint_count(constraints)
                .with_objective_type(objective_type)
                .with_method(method);
            if spec.num_variables() != variables || spec.num_constraints() != constraints {
                eprintln!("Variables and constraints must be between 1 and 10");
                std::process::exit(1);
            }

            match serde_json::to_string_pretty(&SolveRequest::from(&spec)) {
                Ok(text) => println!("{}", text),
                Err(e) => {
                    eprintln!("Error: {}", e);
                    std::process::exit(1);
                }
            }
        }
        Commands::Request { file } => {
            let spec = load_problem(&file);
            match SolveRequest::from(&spec).to_json() {
                Ok(text) => println!("{}", text),
                Err(e) => {
                    eprintln!("Error: {}", e);
                    std::process::exit(1);
                }
            }
        }
        Commands::Solve {
            file,
            solver_url,
            link,
        } => {
            let mut session = FormSession::with_problem(load_problem(&file));
            let gateway = SolveGateway::http(GatewayConfig::new(solver_url));

            let url = match session.submit(&gateway) {
                Ok(SubmitOutcome::Navigate(url)) => url,
                Ok(SubmitOutcome::Failed(notice)) => {
                    eprint!("{}", notice);
                    std::process::exit(1);
                }
                Err(e) => {
                    eprintln!("Error: {}", e);
                    std::process::exit(1);
                }
            };

            // The URL is what the results view would receive; render from it
            match navigation::decode_url(&url) {
                Some(result) => print_result(&result),
                None => {
                    eprintln!("No result to display.");
                    std::process::exit(1);
                }
            }
            if link {
                println!();
                println!("{}", url);
            }
        }
        Commands::Show { data } => {
            let result = if data.contains('?') || data.starts_with("data=") {
                navigation::decode_url(&data)
            } else {
                navigation::decode(&data)
            };
            match result {
                Some(result) => print_result(&result),
                None => println!("No result to display. Solve a problem first."),
            }
        }
    }
}
