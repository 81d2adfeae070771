use crate::RunArgs;
use crate::utils;
use colored::Colorize;
use vmflow_cloud::{ProviderKind, command_line};

/// Dry run: configuration checks and read-only queries only
pub async fn handle(args: &RunArgs) -> anyhow::Result<()> {
    let settings = utils::resolve_settings(args)?;
    let passes = utils::load_passes(&settings, &utils::selected_providers(args));
    let orchestrator = utils::build_orchestrator(&settings);

    println!("{}", "Planning VM creation (nothing will be created)".blue());

    for pass in &passes {
        println!();
        println!("{}", format!("[{}]", pass.provider).cyan().bold());

        if let Some(error) = &pass.error {
            println!("  {}", format!("skipped: {}", error).red());
            continue;
        }

        let Some(config) = &pass.config else {
            match pass.provider.parse::<ProviderKind>() {
                Ok(_) => println!("  {}", "skipped: no configuration file".yellow()),
                Err(e) => println!("  {}", e.to_string().red()),
            }
            continue;
        };

        let planned = match orchestrator.plan_pass(&pass.provider, config).await {
            Ok(planned) => planned,
            Err(e) => {
                println!("  {}", e.to_string().red());
                continue;
            }
        };

        for section in planned {
            match section.plan {
                Ok(plan) => {
                    println!("  {} {}", "✓".green(), section.section.green());
                    println!("      {}", command_line(&plan.create_command));
                    if let Some(port) = plan.open_port {
                        println!("      {}", command_line(&port.command));
                    }
                }
                Err(e) => {
                    println!("  {} {}: {}", "✗".red(), section.section, e);
                }
            }
        }
    }

    Ok(())
}
