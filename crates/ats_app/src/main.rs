mod app;
mod commands;
mod config;
mod effects;
mod logging;
#[cfg(test)]
mod test_support;
mod ui;

use std::path::PathBuf;

use anyhow::Context;
use ats_core::Msg;
use clap::Parser;

use crate::commands::Command;
use crate::config::AppConfig;
use crate::logging::LogDestination;

/// Send a resume and a job posting link to the analysis service, then read,
/// copy or save the generated report and application email.
#[derive(Debug, Parser)]
#[command(name = "ats-client", version, about)]
struct Cli {
    /// Base URL of the analysis service.
    #[arg(long, env = "ATS_API_URL")]
    api_url: Option<String>,

    /// Directory the email draft is saved into.
    #[arg(long)]
    output_dir: Option<PathBuf>,

    /// Optional RON config file.
    #[arg(long, default_value = config::DEFAULT_CONFIG_FILE)]
    config: PathBuf,

    #[arg(long, value_enum, default_value_t = LogDestination::File)]
    log: LogDestination,

    /// Log at debug level.
    #[arg(short, long)]
    verbose: bool,

    /// Resume to open at startup.
    #[arg(long)]
    resume: Option<PathBuf>,

    /// Job posting to analyze at startup.
    #[arg(long, requires = "resume")]
    job_link: Option<String>,

    /// Copy the email to the clipboard once results arrive. On X11 and
    /// Wayland the clipboard is served by this process, so without a
    /// clipboard manager the text is gone once the client exits.
    #[arg(long, requires = "job_link")]
    copy: bool,

    /// Save the email once results arrive.
    #[arg(long, requires = "job_link")]
    save: bool,
}

impl Cli {
    fn startup(&self) -> app::Startup {
        let mut startup = app::Startup::default();
        if let Some(path) = &self.resume {
            startup.commands.push(Command::Open(path.clone()));
        }
        if let Some(link) = &self.job_link {
            startup.commands.push(Command::Analyze(link.clone()));
        }
        if self.copy {
            startup.after_results.push(Msg::CopyClicked);
        }
        if self.save {
            startup.after_results.push(Msg::DownloadClicked);
        }
        startup
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    logging::initialize(cli.log, cli.verbose);

    let mut config = AppConfig::load(&cli.config)
        .with_context(|| format!("loading config from {}", cli.config.display()))?;
    if let Some(api_url) = &cli.api_url {
        config.api_url = api_url.clone();
    }
    if let Some(output_dir) = &cli.output_dir {
        config.output_dir = output_dir.clone();
    }

    app::run_app(config, cli.startup())
}
