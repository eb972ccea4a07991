use ccfix_build::{Fixer, ToolchainConfig};
use clap::Parser;
use miette::Result;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "fix-compile-commands")]
#[command(author, version, about = "Inline response files and add toolchain includes to compile_commands.json")]
struct Cli {
    /// Build directory containing compile_commands.json
    builddir: PathBuf,

    /// TOML file overriding the MinGW/MSVC toolchain paths
    #[arg(long)]
    config: Option<PathBuf>,
}

fn main() -> Result<()> {
    miette::set_hook(Box::new(|_| {
        Box::new(
            miette::MietteHandlerOpts::new()
                .terminal_links(true)
                .unicode(true)
                .build(),
        )
    }))?;

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => ToolchainConfig::from_file(path)?,
        None => ToolchainConfig::default(),
    };

    let report = Fixer::with_config(config).fix(&cli.builddir)?;
    log::info!(
        "{} entries, {} response files, {} mingw, {} msvc; original kept in {}",
        report.entries,
        report.response_files,
        report.mingw_entries,
        report.msvc_entries,
        report.backup.display()
    );

    println!("FIXED");
    Ok(())
}
