use crate::RunArgs;
use crate::utils;
use chrono::Local;
use colored::Colorize;
use vmflow_cloud::{PassInput, PassReport, PassStatus, RunReport, SectionOutcome};
use vmflow_config::{FILE_TIMESTAMP_FORMAT, archive_config_files};

pub async fn handle(args: &RunArgs, no_archive: bool, json: bool) -> anyhow::Result<()> {
    let settings = utils::resolve_settings(args)?;
    let passes = utils::load_passes(&settings, &utils::selected_providers(args));
    let orchestrator = utils::build_orchestrator(&settings);

    let inputs: Vec<PassInput<'_>> = passes.iter().map(utils::LoadedPass::input).collect();
    let report = orchestrator.run(&inputs).await;

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print_report(&report);
    }

    if settings.archive && !no_archive {
        let stamp = Local::now().format(FILE_TIMESTAMP_FORMAT).to_string();
        archive_config_files(&[&settings.azure_config, &settings.gcp_config], &stamp)?;
    }

    let errors = report.run_errors();
    if !errors.is_empty() {
        anyhow::bail!("{} run error(s): {}", errors.len(), errors.join("; "));
    }

    Ok(())
}

fn print_report(report: &RunReport) {
    for pass in &report.passes {
        print_pass(pass);
    }

    let created: usize = report.passes.iter().map(PassReport::created).sum();
    println!();
    println!("{}", format!("{} VM(s) created", created).bold());
}

fn print_pass(pass: &PassReport) {
    println!();
    println!("{}", format!("[{}]", pass.provider).cyan().bold());

    match pass.status {
        PassStatus::MissingConfig => {
            println!("  {}", "skipped: no configuration file".yellow());
            return;
        }
        PassStatus::InvalidConfig => {
            let error = pass.error.as_deref().unwrap_or_default();
            println!("  {}", format!("skipped: {}", error).red());
            return;
        }
        PassStatus::Unsupported => {
            println!(
                "  {}",
                format!("Unsupported cloud provider: {}", pass.provider).red()
            );
            return;
        }
        PassStatus::Completed => {}
    }

    if pass.sections.is_empty() {
        println!("  {}", "no sections".dimmed());
    }

    for section in &pass.sections {
        match &section.outcome {
            SectionOutcome::Created { record, port } => {
                println!(
                    "  {} {} → {}",
                    "✓".green(),
                    section.section.green(),
                    record.display().to_string().cyan()
                );
                if let Some(port) = port {
                    if port.opened {
                        println!("      port {} opened", port.port);
                    } else {
                        println!(
                            "      {}",
                            format!("WARNING: port {} not opened: {}", port.port, port.info)
                                .yellow()
                        );
                    }
                }
            }
            SectionOutcome::Rejected { error } => {
                println!("  {} {}: {}", "✗".red(), section.section, error);
            }
            SectionOutcome::CreateFailed { info } => {
                println!(
                    "  {} {}: create command failed: {}",
                    "✗".red(),
                    section.section,
                    info.trim()
                );
            }
            SectionOutcome::DocumentationFailed { error } => {
                println!(
                    "  {} {}: {}",
                    "✗".red().bold(),
                    section.section,
                    format!("VM created but not documented: {}", error).red()
                );
            }
        }
    }
}
