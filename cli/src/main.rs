mod problem;

use problem::{Problem, RightHandSide};
use sle_gauss::SLEError;
use sle_gauss::report::{EquationReport, SystemReport, solve_matrix_equation, solve_system};

use clap::Parser;

use std::error::Error;
use std::path::PathBuf;
use std::{fs, process};

#[derive(Parser, Debug)]
#[command(
    name = "sle-gauss-cli",
    version,
    about = "Solve linear systems by Gauss-Jordan reduction"
)]
struct Cli {
    /// Print the report as JSON instead of text.
    #[arg(long)]
    json: bool,

    /// Print every elementary row operation before the solution.
    #[arg(long)]
    steps: bool,

    /// JSON problem file with `coefficients`, `rhs` and an optional `config`.
    path: PathBuf,
}

fn print_system(report: &SystemReport, steps: bool) {
    if steps {
        for step in &report.steps {
            println!("{}", step.description);
            for (row, rhs) in step.matrix.iter().zip(&step.rhs) {
                println!("  [ {} | {} ]", row.join("  "), rhs);
            }
        }
        println!();
    }

    println!("Status: {} (rank {})", report.status, report.classification.rank);
    for line in &report.pivot_lines {
        println!("  {}", line);
    }
    for line in &report.solution {
        println!("{}", line);
    }
}

fn print_equation(report: &EquationReport, steps: bool) {
    for (j, column) in report.columns.iter().enumerate() {
        println!("== Right-hand side {} ==", j + 1);
        print_system(column, steps);
        println!();
    }

    let rank = report
        .overall
        .rank
        .map_or_else(|| "differs across columns".to_string(), |r| r.to_string());
    println!(
        "Overall: {} (consistent: {}, rank: {})",
        report.overall.status, report.overall.consistent, rank
    );
}

fn run(cli: Cli) -> Result<(), Box<dyn Error>> {
    let problem = Problem::from_json(&fs::read_to_string(&cli.path)?)?;
    log::debug!("Loaded problem from {}", cli.path.display());

    match problem.rhs {
        RightHandSide::Vector(rhs) => {
            let report = solve_system(&problem.coefficients, &rhs, &problem.config)?;
            if cli.json {
                println!("{}", report.to_json()?);
            } else {
                print_system(&report, cli.steps);
            }
        }
        RightHandSide::Matrix(rhs) => {
            let report = solve_matrix_equation(&problem.coefficients, &rhs, &problem.config)?;
            if cli.json {
                println!("{}", report.to_json()?);
            } else {
                print_equation(&report, cli.steps);
            }
        }
    }

    Ok(())
}

fn main() {
    // Log to stderr (if you run with `RUST_LOG=debug`).
    env_logger::init();

    let cli = Cli::parse();
    if let Err(err) = run(cli) {
        log::error!("{}", err);
        eprintln!("Error: {}", err);

        // Malformed systems exit with 2, everything else with 1.
        let invalid_input = err
            .downcast_ref::<SLEError>()
            .is_some_and(SLEError::is_validation);
        process::exit(if invalid_input { 2 } else { 1 });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use clap::error::ErrorKind;

    #[test]
    fn test_parse_flags() {
        let cli = Cli::try_parse_from(["sle-gauss-cli", "--json", "problem.json"]).unwrap();
        assert!(cli.json);
        assert!(!cli.steps);
        assert_eq!(cli.path, PathBuf::from("problem.json"));

        let cli = Cli::try_parse_from(["sle-gauss-cli", "problem.json", "--steps"]).unwrap();
        assert!(cli.steps);
    }

    #[test]
    fn test_rejects_bad_arguments() {
        let unknown = Cli::try_parse_from(["sle-gauss-cli", "--verbose", "p.json"]).unwrap_err();
        assert_eq!(unknown.kind(), ErrorKind::UnknownArgument);

        let missing = Cli::try_parse_from(["sle-gauss-cli", "--json"]).unwrap_err();
        assert_eq!(missing.kind(), ErrorKind::MissingRequiredArgument);

        assert!(Cli::try_parse_from(["sle-gauss-cli", "a.json", "b.json"]).is_err());
    }

    #[test]
    fn test_help_is_generated() {
        let help = Cli::try_parse_from(["sle-gauss-cli", "--help"]).unwrap_err();
        assert_eq!(help.kind(), ErrorKind::DisplayHelp);
        assert!(help.to_string().contains("--steps"));
    }

    #[test]
    fn test_cli_definition() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }
}
