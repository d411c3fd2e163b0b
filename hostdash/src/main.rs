//! Entry point for the hostdash TUI. Parses args, resolves the profile and runs the App.

use std::io::{self, Write};
use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;

use hostdash::app::App;
use hostdash::client::{load_thresholds, parse_base_url, HttpApi};
use hostdash::clock::SystemClock;
use hostdash::config::{init_tracing, DashboardConfig, LogFormat, DEFAULT_POLL_SECS};
use hostdash::profiles::{
    default_log_path, load_profiles, save_profiles, ProfileEntry, ProfileRequest, ResolveProfile,
};
use hostdash::scheduler::Scheduler;
use hostdash::session::Session;
use hostdash::sink::TracingSink;

#[derive(Debug, Parser)]
#[command(name = "hostdash", version, about = "Terminal dashboard for a /monitor/api server")]
struct Cli {
    /// Server base URL, e.g. http://HOST:8000
    #[arg(env = "HOSTDASH_URL")]
    url: Option<String>,

    /// Named connection profile (created on first use)
    #[arg(short = 'P', long)]
    profile: Option<String>,

    /// Overwrite an existing profile without asking
    #[arg(long)]
    save: bool,

    /// Seconds between metric polls
    #[arg(short, long, env = "HOSTDASH_INTERVAL")]
    interval: Option<u64>,

    #[arg(long, env = "HOSTDASH_LOG_LEVEL", default_value = "info")]
    log_level: String,

    /// pretty or json
    #[arg(long, env = "HOSTDASH_LOG_FORMAT", default_value = "pretty")]
    log_format: LogFormat,

    /// Log file for TUI mode (default: <config dir>/hostdash.log)
    #[arg(long)]
    log_file: Option<PathBuf>,

    /// No TUI; samples and alerts go to the log on stderr
    #[arg(long)]
    headless: bool,

    /// Resolve (and save) the profile, print the target and exit
    #[arg(long)]
    dry_run: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // stderr is the screen in TUI mode
    let log_file = if cli.headless || cli.dry_run {
        None
    } else {
        Some(cli.log_file.clone().unwrap_or_else(default_log_path))
    };
    init_tracing(&cli.log_level, cli.log_format, log_file.as_deref())?;

    let Some(target) = resolve_target(&cli)? else {
        return Ok(());
    };
    let base = parse_base_url(&target.url)?;
    let secs = target.interval_secs.unwrap_or(DEFAULT_POLL_SECS);
    let config = DashboardConfig::default().with_poll_secs(secs);

    if cli.dry_run {
        println!("{} every {}s", base, config.poll_interval.as_secs());
        return Ok(());
    }

    let api = Arc::new(HttpApi::new(base.as_str(), config.request_timeout)?);
    let thresholds = load_thresholds(api.as_ref()).await;
    let session = Session::new(thresholds, config.history_cap, config.cooldown_ms);
    tracing::info!(server = %base, poll_secs = secs, "starting dashboard");

    if cli.headless {
        let scheduler = Scheduler::new(api, Arc::new(SystemClock), TracingSink, session, config);
        scheduler
            .run_until(async {
                if let Err(e) = tokio::signal::ctrl_c().await {
                    tracing::error!(error = %e, "cannot listen for ctrl-c, stopping");
                }
            })
            .await?;
        return Ok(());
    }

    App::new(base.as_str(), thresholds, config.history_cap)
        .run(api, session, config)
        .await
}

/// Turn url/profile arguments into a connection target, persisting new or
/// changed profiles. `None` means the user aborted.
fn resolve_target(cli: &Cli) -> anyhow::Result<Option<ProfileEntry>> {
    let profiles_file = load_profiles();
    let req = ProfileRequest {
        profile_name: cli.profile.clone(),
        url: cli.url.clone(),
        interval_secs: cli.interval,
    };
    let mut profiles_mut = profiles_file.clone();

    let entry = match req.resolve(&profiles_file) {
        ResolveProfile::Direct(entry) => {
            if let Some(name) = cli.profile.as_ref() {
                match profiles_mut.profiles.get(name) {
                    None => {
                        // New profile: auto-save immediately
                        profiles_mut.profiles.insert(name.clone(), entry.clone());
                        save_profiles(&profiles_mut)?;
                    }
                    Some(existing) if *existing != entry => {
                        let overwrite = cli.save
                            || prompt_yes_no(&format!("Overwrite existing profile '{name}'? [y/N]: "));
                        if overwrite {
                            profiles_mut.profiles.insert(name.clone(), entry.clone());
                            save_profiles(&profiles_mut)?;
                        }
                    }
                    Some(_) => {}
                }
            }
            entry
        }
        ResolveProfile::Loaded(entry) => entry,
        ResolveProfile::PromptSelect(names) => {
            eprintln!("Select profile:");
            for (i, n) in names.iter().enumerate() {
                eprintln!("  {}. {}", i + 1, n);
            }
            let line = prompt_string("Enter number (or blank to abort): ")?;
            let picked = line
                .trim()
                .parse::<usize>()
                .ok()
                .and_then(|idx| idx.checked_sub(1))
                .and_then(|idx| names.get(idx))
                .and_then(|name| profiles_mut.profiles.get(name));
            match picked {
                Some(entry) => {
                    let mut entry = entry.clone();
                    if cli.interval.is_some() {
                        entry.interval_secs = cli.interval;
                    }
                    entry
                }
                None => return Ok(None),
            }
        }
        ResolveProfile::PromptCreate(name) => {
            eprintln!("Profile '{name}' does not exist yet.");
            let url = prompt_string("Enter server URL (http://HOST:PORT): ")?;
            if url.trim().is_empty() {
                return Ok(None);
            }
            let entry = ProfileEntry {
                url: url.trim().to_string(),
                interval_secs: cli.interval,
            };
            profiles_mut.profiles.insert(name, entry.clone());
            save_profiles(&profiles_mut)?;
            entry
        }
        ResolveProfile::None => {
            eprintln!("No URL provided and no profiles to select.");
            return Ok(None);
        }
    };
    Ok(Some(entry))
}

fn prompt_yes_no(prompt: &str) -> bool {
    match prompt_string(prompt) {
        Ok(line) => matches!(line.trim().to_ascii_lowercase().as_str(), "y" | "yes"),
        Err(_) => false,
    }
}

fn prompt_string(prompt: &str) -> io::Result<String> {
    eprint!("{prompt}");
    let _ = io::stderr().flush();
    let mut line = String::new();
    io::stdin().read_line(&mut line)?;
    Ok(line)
}
