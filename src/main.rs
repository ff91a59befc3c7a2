use clap::Parser;
use colored::*;
use eyre::{Context, Result};
use log::info;
use std::collections::HashMap;
use std::fs;
use std::path::Path;

use promptreg::prompt::{format_documents, load_documents};
use promptreg::{FormatOptions, TemplateRegistry};

mod cli;
mod config;

use cli::Cli;
use cli::commands::{Commands, FormatArgs};
use config::Config;

fn setup_logging(config: &Config) -> Result<()> {
    let log_file = config.log_file_path();
    if let Some(log_dir) = log_file.parent() {
        fs::create_dir_all(log_dir).context("Failed to create log directory")?;
    }

    let target = Box::new(
        fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&log_file)
            .context("Failed to open log file")?,
    );

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(config.log_level.as_str()))
        .target(env_logger::Target::Pipe(target))
        .init();

    info!("Logging initialized, writing to: {}", log_file.display());
    Ok(())
}

/// Build the registry from built-ins and/or the configured template source
fn build_registry(cli: &Cli, config: &Config) -> Result<TemplateRegistry> {
    let include_builtin = config.include_builtin && !cli.no_builtin;
    let source = cli.dir.as_ref().or(config.templates_dir.as_ref());

    let mut registry = if include_builtin {
        TemplateRegistry::builtin()
    } else {
        TemplateRegistry::default()
    };

    if let Some(source) = source {
        let loaded = config
            .loader()?
            .load(source)
            .with_context(|| format!("Failed to load templates from {}", source.display()))?;
        registry = registry.merged_with(loaded);
    }

    if registry.is_empty() {
        eyre::bail!("No templates available: pass --dir or enable the built-in templates");
    }

    info!("Registry ready with {} template(s)", registry.len());
    Ok(registry)
}

fn run_application(cli: &Cli, config: &Config) -> Result<()> {
    if cli.is_verbose() {
        eprintln!("{}", "Verbose mode enabled".yellow());
    }

    match &cli.command {
        Commands::List { json } => handle_list_command(&build_registry(cli, config)?, *json, cli.is_verbose()),
        Commands::Show { name } => handle_show_command(&build_registry(cli, config)?, name),
        Commands::Render { name, vars } => handle_render_command(&build_registry(cli, config)?, name, vars),
        Commands::Compose {
            name,
            input,
            vars,
            docs,
            format,
        } => handle_compose_command(&build_registry(cli, config)?, name, input, vars, docs.as_deref(), *format),
        // Formatting documents needs no templates
        Commands::Context { docs, format } => handle_context_command(docs, *format),
    }
}

fn handle_list_command(registry: &TemplateRegistry, json: bool, verbose: bool) -> Result<()> {
    info!("Listing {} templates", registry.len());

    if json {
        let entries: Vec<_> = registry
            .iter()
            .map(|t| {
                serde_json::json!({
                    "name": t.name(),
                    "digest": t.digest(),
                    "bytes": t.len(),
                    "variables": t.variables(),
                })
            })
            .collect();
        println!("{}", serde_json::to_string_pretty(&entries)?);
        return Ok(());
    }

    for template in registry.iter() {
        println!(
            "{:<32} {} {:>7} bytes",
            template.name().green(),
            template.digest().dimmed(),
            template.len()
        );
        if verbose {
            let vars = template.variables();
            if !vars.is_empty() {
                println!("  {} {}", "variables:".cyan(), vars.join(", "));
            }
        }
    }
    Ok(())
}

fn handle_show_command(registry: &TemplateRegistry, name: &str) -> Result<()> {
    info!("Showing template: {}", name);
    let text = registry.get(name)?;
    print!("{}", text);
    Ok(())
}

fn handle_render_command(registry: &TemplateRegistry, name: &str, vars: &[(String, String)]) -> Result<()> {
    info!("Rendering template: {} with {} variable(s)", name, vars.len());
    let vars: HashMap<String, String> = vars.iter().cloned().collect();
    let rendered = registry
        .render(name, &vars)
        .with_context(|| format!("Failed to render {}", name))?;
    print!("{}", rendered);
    Ok(())
}

fn handle_compose_command(
    registry: &TemplateRegistry,
    name: &str,
    input: &str,
    vars: &[(String, String)],
    docs: Option<&Path>,
    format: FormatArgs,
) -> Result<()> {
    info!("Composing messages from template: {}", name);
    let vars: HashMap<String, String> = vars.iter().cloned().collect();
    let messages = match docs {
        Some(path) => {
            let documents =
                load_documents(path).with_context(|| format!("Failed to load documents from {}", path.display()))?;
            info!("Including {} document(s) from {}", documents.len(), path.display());
            registry.compose_with_documents(name, &vars, &documents, &FormatOptions::from(format), input)
        }
        None => registry.compose(name, &vars, input),
    }
    .with_context(|| format!("Failed to compose {}", name))?;
    println!("{}", serde_json::to_string_pretty(&messages)?);
    Ok(())
}

fn handle_context_command(docs: &Path, format: FormatArgs) -> Result<()> {
    info!("Formatting documents from: {}", docs.display());
    let documents =
        load_documents(docs).with_context(|| format!("Failed to load documents from {}", docs.display()))?;
    let text = format_documents(&documents, &FormatOptions::from(format))?;
    println!("{}", text);
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = Config::load(cli.config.as_ref()).context("Failed to load configuration")?;

    setup_logging(&config).context("Failed to setup logging")?;

    info!("Starting with config from: {:?}", cli.config);

    run_application(&cli, &config).context("Application failed")?;

    Ok(())
}
