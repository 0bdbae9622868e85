use std::io::Read;
use std::process::ExitCode;

use anyhow::Context;
use clap::Parser;
use tracing::{error, info};

use trial_schedule::config::{CliConfig, Command};
use trial_schedule::generator::TrialGenerator;
use trial_schedule::logger;
use trial_schedule::scheduler::{audit_schedule, ScheduleKpi, ScheduleRequest, TrialScheduler};

fn main() -> anyhow::Result<ExitCode> {
    let config = CliConfig::parse();
    logger::init_cli_logger(config.verbose);

    match config.command {
        Command::Solve {
            input,
            pretty,
            sorted,
            strict,
            kpi,
            audit,
        } => {
            let json = read_input(&input)?;
            let request = ScheduleRequest::from_json(&json)
                .with_context(|| format!("failed to parse request from '{input}'"))?;

            let output = match TrialScheduler::new()
                .with_sorted_entries(sorted)
                .schedule(&request)
            {
                Ok(output) => output,
                Err(e) => {
                    for v in e.validation_errors() {
                        error!(kind = ?v.kind, "{}", v.message);
                    }
                    eprintln!("{e}");
                    return Ok(ExitCode::FAILURE);
                }
            };

            if kpi {
                let k = ScheduleKpi::calculate(&output, &request);
                info!(
                    placement_rate = k.placement_rate,
                    slot_utilization = k.slot_utilization,
                    avg_arena_utilization = k.avg_arena_utilization(),
                    peak_concurrency = k.peak_concurrency,
                    "schedule KPIs"
                );
            }

            if audit {
                let violations = audit_schedule(&output, &request);
                for v in &violations {
                    error!(kind = ?v.violation_type, entity = %v.entity_id, "{}", v.message);
                }
                if !violations.is_empty() {
                    return Ok(ExitCode::from(3));
                }
            }

            print_json(&output, pretty)?;

            if strict && !output.is_complete() {
                return Ok(ExitCode::from(2));
            }
            Ok(ExitCode::SUCCESS)
        }
        Command::Generate {
            seed,
            difficulty,
            competitors,
            pretty,
        } => {
            let mut generator_config = difficulty.generator_config();
            if let Some(n) = competitors {
                generator_config.num_competitors = n;
            }
            let request = TrialGenerator::new(generator_config, seed).generate();
            info!(
                seed,
                competitors = request.competitors.len(),
                arenas = request.arenas.len(),
                "generated schedule request"
            );
            print_json(&request, pretty)?;
            Ok(ExitCode::SUCCESS)
        }
    }
}

fn read_input(input: &str) -> anyhow::Result<String> {
    if input == "-" {
        let mut buf = String::new();
        std::io::stdin()
            .read_to_string(&mut buf)
            .context("failed to read request from stdin")?;
        Ok(buf)
    } else {
        std::fs::read_to_string(input).with_context(|| format!("failed to read '{input}'"))
    }
}

fn print_json<T: serde::Serialize>(value: &T, pretty: bool) -> anyhow::Result<()> {
    let json = if pretty {
        serde_json::to_string_pretty(value)?
    } else {
        serde_json::to_string(value)?
    };
    println!("{json}");
    Ok(())
}
