mod cli;

use std::io::{BufRead, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{CommandFactory, Parser};
use clap_complete::generate;

use cli::{Cli, Command};
use maplaunch::channel::MethodChannel;
use maplaunch::config::Config;
use maplaunch::error::LaunchError;
use maplaunch::launcher::adb::AdbLauncher;
use maplaunch::launcher::dry_run::DryRunLauncher;
use maplaunch::launcher::AppLauncher;
use maplaunch::logging::init_logging;
use maplaunch::map::{LaunchRequest, MapType};
use maplaunch::output::{Formatter, OutputFormat};
use maplaunch::registry::ProviderRegistry;
use maplaunch::resolver::LaunchResolver;

/// Exit status for malformed caller input (unknown map type).
const EXIT_USAGE: i32 = 2;

fn parse_map(resolver: &LaunchResolver, map: &str) -> Option<MapType> {
    match map.parse::<MapType>() {
        Ok(map_type) => Some(map_type),
        Err(e) => {
            match resolver.suggest(map) {
                Some(suggestion) => eprintln!("{} (did you mean '{}'?)", e, suggestion),
                None => eprintln!("{}", e),
            }
            None
        }
    }
}

fn launch(
    resolver: &LaunchResolver,
    formatter: &Formatter,
    map: &str,
    url: String,
    directions: bool,
) -> Result<i32> {
    let map_type = match parse_map(resolver, map) {
        Some(map_type) => map_type,
        None => return Ok(EXIT_USAGE),
    };

    match resolver.launch(&LaunchRequest::new(map_type, url.clone())) {
        Ok(()) => {
            formatter.format_launched(map_type, &url, &mut std::io::stdout())?;
            Ok(0)
        }
        Err(LaunchError::NotAvailable { installed }) => {
            let name = resolver
                .registry()
                .find(map_type)
                .map_or_else(|| map_type.to_string(), |p| p.map_name.clone());
            eprintln!("{} is not installed on a device", name);
            if directions {
                if installed.is_empty() {
                    eprintln!("No supported maps are installed");
                } else {
                    eprintln!("Installed maps: {}", installed.join(", "));
                }
            }
            Ok(1)
        }
        Err(e @ LaunchError::Platform(_)) => {
            eprintln!("Failed to launch '{}': {}", map_type, e);
            Ok(1)
        }
    }
}

fn serve(resolver: LaunchResolver) -> Result<i32> {
    let channel = MethodChannel::new(resolver);
    let stdin = std::io::stdin();
    let mut stdout = std::io::stdout().lock();

    for line in stdin.lock().lines() {
        let line = line.context("reading request")?;
        if line.trim().is_empty() {
            continue;
        }
        let response = channel.handle_line(&line);
        writeln!(stdout, "{}", serde_json::to_string(&response)?)?;
        stdout.flush()?;
    }

    Ok(0)
}

fn doctor(resolver: &LaunchResolver) -> Result<i32> {
    let launcher = resolver.launcher();
    println!("maplaunch doctor\n");
    println!("Launcher:");

    if launcher.is_available() {
        println!("  \u{2713} {:<14} available", launcher.name());
        match launcher.status() {
            Ok(state) => println!("  \u{2713} {:<14} {}", "device", state),
            Err(e) => println!("  \u{2717} {:<14} error: {}", "device", e),
        }
    } else {
        println!("  \u{2717} {:<14} unavailable", launcher.name());
    }

    println!("\nMaps:");
    let installed = match launcher.list_installed_package_ids() {
        Ok(ids) => ids,
        Err(e) => {
            println!("  \u{2717} cannot list installed packages: {}", e);
            Default::default()
        }
    };

    let registry = resolver.registry();
    if let Some(primary) = registry.primary() {
        println!("  primary: {} ({})", primary.map_name, primary.package_name);
    }

    let mut count = 0;
    for provider in registry.providers() {
        let mark = if installed.contains(&provider.package_name) {
            count += 1;
            '\u{2713}'
        } else {
            '\u{2717}'
        };
        println!(
            "  {} {:<14} {:<18} {}",
            mark, provider.map_type, provider.map_name, provider.package_name
        );
    }

    println!(
        "\nTotal: {} of {} maps installed",
        count,
        registry.providers().len()
    );
    Ok(0)
}

/// `--no-color` wins; otherwise `[output] color = false` turns colour off.
fn color_disabled(flag: bool, config: &Config) -> bool {
    flag || config.color == Some(false)
}

fn run(command: Command, launcher: &dyn AppLauncher, formatter: &Formatter) -> Result<i32> {
    let registry = ProviderRegistry::builtin();
    let resolver = LaunchResolver::new(&registry, launcher);
    let mut stdout = std::io::stdout();

    match command {
        Command::Maps => {
            formatter.format_list(registry.providers(), &mut stdout)?;
            Ok(0)
        }
        Command::List => {
            formatter.format_list(&resolver.installed_providers(), &mut stdout)?;
            Ok(0)
        }
        Command::Available { map } => {
            let available = resolver.is_available(&map);
            formatter.format_available(&map, available, &mut stdout)?;
            Ok(if available { 0 } else { 1 })
        }
        Command::Launch { map, url } => launch(&resolver, formatter, &map, url, false),
        Command::Directions { map, url } => launch(&resolver, formatter, &map, url, true),
        Command::Serve => serve(resolver),
        Command::Doctor => doctor(&resolver),
        Command::Completions { shell } => {
            let mut cmd = Cli::command();
            generate(shell, &mut cmd, "maplaunch", &mut stdout);
            Ok(0)
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = Config::load(cli.config.as_deref())?;
    let no_color = color_disabled(cli.no_color, &config);
    init_logging(cli.verbose, !no_color);

    let format = cli.format.or(config.format).unwrap_or(OutputFormat::Table);
    let formatter = Formatter::new(format, no_color);

    let adb_path = cli
        .adb
        .or(config.adb_path)
        .unwrap_or_else(|| PathBuf::from("adb"));
    let serial = cli.serial.or(config.serial);
    let adb = AdbLauncher::new(adb_path, serial);

    let code = if cli.dry_run {
        let dry_run = DryRunLauncher::new(Box::new(adb));
        let code = run(cli.command, &dry_run, &formatter)?;
        for start in dry_run.starts() {
            eprintln!(
                "dry run: would open {} in {}",
                start.url,
                start.package.as_deref().unwrap_or("default handler")
            );
        }
        code
    } else {
        run(cli.command, &adb, &formatter)?
    };

    if code != 0 {
        std::process::exit(code);
    }
    Ok(())
}
