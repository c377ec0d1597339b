use std::fs;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use anyhow::{Context, Result, ensure};
use bnb::config::BnbConfig;
use bnb::io::cli::Cli;
use bnb::io::output::SolveOutput;
use bnb::io::report::ConsoleReport;
use bnb::{BnbOptimizer, io};
use clap::Parser as ClapParser;
use log::{info, warn};
use mkp_rs::entities::MKProblem;
use mkp_rs::eval::Report;
use mkp_rs::io::export::export_solution;
use mkp_rs::io::{Dataset, read_dataset};

fn main() -> Result<()> {
    let args = Cli::parse();
    io::init_logger(args.log_level)?;

    let config = match &args.config_file {
        None => {
            warn!("[MAIN] No config file provided, use --config-file to provide a custom config");
            BnbConfig::default()
        }
        Some(config_file) => {
            let file = File::open(config_file)
                .with_context(|| format!("could not open config file: {}", config_file.display()))?;
            let reader = BufReader::new(file);
            serde_json::from_reader(reader).context("incorrect config file format")?
        }
    };

    info!("[MAIN] Successfully parsed BnbConfig: {config:?}");

    let dataset = read_dataset(&args.input_file)?;

    if args.list_groups {
        println!("Available groups:");
        for (i, group) in dataset.groups().iter().enumerate() {
            println!("{}. {}", i + 1, group);
        }
        return Ok(());
    }

    if !args.solution_folder.exists() {
        fs::create_dir_all(&args.solution_folder).with_context(|| {
            format!(
                "could not create solution folder: {}",
                args.solution_folder.display()
            )
        })?;
    }

    let groups: Vec<Option<&str>> = match (&args.group, dataset.groups()) {
        (Some(group), _) => vec![Some(group.as_str())],
        (None, groups) if groups.is_empty() => vec![None],
        (None, groups) => groups.into_iter().map(Some).collect(),
    };

    for group in groups {
        solve_group(&dataset, group, &args, config, &args.solution_folder)?;
    }

    Ok(())
}

fn solve_group(
    dataset: &Dataset,
    group: Option<&str>,
    args: &Cli,
    config: BnbConfig,
    output_folder: &Path,
) -> Result<()> {
    let catalog = dataset.catalog(group)?;
    let title = group.unwrap_or(&dataset.name);
    info!("[MAIN] solving '{}' ({} items)", title, catalog.len());

    let problem = MKProblem::new(&catalog, args.num_bins, args.max_weight, args.max_price)?;
    let outcome = BnbOptimizer::new(problem, config).solve();
    ensure!(
        problem.is_feasible(&outcome.solution.assignment),
        "optimizer returned an infeasible assignment"
    );

    let report = Report::new(&catalog, &outcome.solution);
    println!(
        "{}",
        ConsoleReport {
            title,
            report: &report,
            optimal: outcome.is_optimal(),
        }
    );

    let stem = file_stem(&dataset.name, group);
    {
        let output = SolveOutput {
            dataset: dataset.name.clone(),
            solution: export_solution(&catalog, &outcome.solution),
            termination: outcome.termination.clone(),
            statistics: outcome.statistics.clone(),
            config,
        };
        let solution_path = output_folder.join(format!("sol_{stem}.json"));
        io::write_json(&output, &solution_path)?;
    }
    {
        let export_path = output_folder.join(format!("sol_{stem}.csv"));
        io::write_csv_export(&report.rows(), &export_path)?;
    }

    Ok(())
}

/// File name friendly identifier of a solve.
fn file_stem(dataset: &str, group: Option<&str>) -> String {
    let raw = match group {
        Some(g) => format!("{dataset}_{g}"),
        None => dataset.to_string(),
    };
    raw.chars()
        .map(|c| match c.is_alphanumeric() || c == '-' || c == '_' {
            true => c,
            false => '_',
        })
        .collect()
}
