//! Entry point for the statsock TUI. Parses args, resolves the profile and runs the App.

use std::env;
use std::io::{self, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Context;
use statsock::app::App;
use statsock::config::{
    config_path, load_config, save_config, ConfigFile, ProfileEntry, ProfileRequest,
    ResolveProfile,
};
use statsock::endpoint::{stream_url, DEFAULT_BASE};
use statsock::history::{HistoryBuffer, DEFAULT_CAPACITY};
use statsock::logging;
use statsock::theme::ThemeState;
use statsock::ws::{Backoff, NoReconnect, ReconnectPolicy, StreamTarget};

const USAGE: &str = "[--tls-ca CERT_PEM|-t CERT_PEM] [--profile NAME|-P NAME] [--save] [--history N] [--reconnect] [--log-file PATH] [--dry-run] [http://HOST:PORT]";

#[derive(Debug, Default)]
struct ParsedArgs {
    url: Option<String>,
    tls_ca: Option<String>,
    profile: Option<String>,
    save: bool,
    history: Option<usize>,
    reconnect: bool,
    log_file: Option<PathBuf>,
    dry_run: bool,
}

#[derive(Debug)]
enum ArgsError {
    Help(String),
    Invalid(String),
}

fn parse_args<I: IntoIterator<Item = String>>(args: I) -> Result<ParsedArgs, ArgsError> {
    let mut it = args.into_iter();
    let prog = it.next().unwrap_or_else(|| "statsock".into());
    let usage = || format!("Usage: {prog} {USAGE}");
    let mut out = ParsedArgs::default();

    while let Some(arg) = it.next() {
        match arg.as_str() {
            "-h" | "--help" => return Err(ArgsError::Help(usage())),
            "--tls-ca" | "-t" => out.tls_ca = it.next(),
            "--profile" | "-P" => out.profile = it.next(),
            "--save" => out.save = true,
            "--reconnect" => out.reconnect = true,
            "--dry-run" => out.dry_run = true,
            "--log-file" => out.log_file = it.next().map(PathBuf::from),
            "--history" => {
                let v = it.next().unwrap_or_default();
                out.history = Some(parse_history(&v).map_err(|m| {
                    ArgsError::Invalid(format!("{m}\n{}", usage()))
                })?);
            }
            _ if arg.starts_with("--tls-ca=") => {
                if let Some((_, v)) = arg.split_once('=') {
                    if !v.is_empty() {
                        out.tls_ca = Some(v.to_string());
                    }
                }
            }
            _ if arg.starts_with("--profile=") => {
                if let Some((_, v)) = arg.split_once('=') {
                    if !v.is_empty() {
                        out.profile = Some(v.to_string());
                    }
                }
            }
            _ if arg.starts_with("--history=") => {
                let v = arg.split_once('=').map(|(_, v)| v).unwrap_or_default();
                out.history = Some(parse_history(v).map_err(|m| {
                    ArgsError::Invalid(format!("{m}\n{}", usage()))
                })?);
            }
            _ if arg.starts_with('-') => {
                return Err(ArgsError::Invalid(format!(
                    "Unknown option '{arg}'. {}",
                    usage()
                )));
            }
            _ => {
                if out.url.is_none() {
                    out.url = Some(arg);
                } else {
                    return Err(ArgsError::Invalid(format!(
                        "Unexpected argument. {}",
                        usage()
                    )));
                }
            }
        }
    }
    Ok(out)
}

fn parse_history(v: &str) -> Result<usize, String> {
    match v.parse::<usize>() {
        Ok(n) if n > 0 => Ok(n),
        _ => Err(format!("--history expects a positive number, got '{v}'")),
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    let parsed = match parse_args(env::args()) {
        Ok(v) => v,
        Err(ArgsError::Help(msg)) => {
            println!("{msg}");
            return ExitCode::SUCCESS;
        }
        Err(ArgsError::Invalid(msg)) => {
            eprintln!("{msg}");
            return ExitCode::from(2);
        }
    };
    match run(parsed).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("statsock: {e:#}");
            ExitCode::FAILURE
        }
    }
}

async fn run(parsed: ParsedArgs) -> anyhow::Result<()> {
    let log_file = parsed
        .log_file
        .clone()
        .or_else(|| env::var_os(logging::LOG_FILE_ENV).map(PathBuf::from));
    logging::init(log_file.as_deref())?;

    let mut cfg = load_config();
    let req = ProfileRequest {
        profile_name: parsed.profile.clone(),
        url: parsed.url.clone(),
        tls_ca: parsed.tls_ca.clone(),
        history: parsed.history,
    };
    let entry = match req.resolve(&cfg) {
        ResolveProfile::Direct(entry) => {
            if let Some(name) = parsed.profile.as_deref() {
                remember_profile(&mut cfg, name, &entry, parsed.save);
            }
            entry
        }
        ResolveProfile::Loaded(entry) => entry,
        ResolveProfile::PromptSelect(names) => match prompt_select(&cfg, &names)? {
            Some(entry) => entry,
            None => return Ok(()),
        },
        ResolveProfile::PromptCreate(name) => {
            eprintln!("Profile '{name}' does not exist yet.");
            let url = prompt_string("Enter dashboard URL (http://HOST:PORT or ws://...): ")?;
            if url.trim().is_empty() {
                return Ok(());
            }
            let ca = prompt_string("Enter TLS CA path (or leave blank): ")?;
            let entry = ProfileEntry {
                url: url.trim().to_string(),
                tls_ca: Some(ca.trim().to_string()).filter(|c| !c.is_empty()),
                history: parsed.history,
            };
            cfg.profiles.insert(name, entry.clone());
            save_config(&cfg).context("saving profile")?;
            entry
        }
        ResolveProfile::None => ProfileEntry {
            url: DEFAULT_BASE.to_string(),
            tls_ca: parsed.tls_ca.clone(),
            history: parsed.history,
        },
    };

    let url = stream_url(&entry.url)?;
    if parsed.dry_run {
        println!("{url}");
        return Ok(());
    }

    let policy: Box<dyn ReconnectPolicy> = if parsed.reconnect {
        Box::new(Backoff::default())
    } else {
        Box::new(NoReconnect)
    };
    let history = HistoryBuffer::new(entry.history.unwrap_or(DEFAULT_CAPACITY));
    let mut app = App::new(history, ThemeState::load(config_path()));
    app.run(
        StreamTarget {
            url,
            tls_ca: entry.tls_ca,
        },
        policy,
    )
    .await
}

/// New profiles are saved right away; changed ones only with --save or on confirmation.
fn remember_profile(cfg: &mut ConfigFile, name: &str, entry: &ProfileEntry, save: bool) {
    let write = match cfg.profiles.get(name) {
        None => true,
        Some(existing) if existing == entry => false,
        Some(_) => save || prompt_yes_no(&format!("Overwrite existing profile '{name}'? [y/N]: ")),
    };
    if write {
        cfg.profiles.insert(name.to_string(), entry.clone());
        if let Err(e) = save_config(cfg) {
            eprintln!("warning: could not save profile '{name}': {e}");
        }
    }
}

fn prompt_select(cfg: &ConfigFile, names: &[String]) -> io::Result<Option<ProfileEntry>> {
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
        .and_then(|name| cfg.profiles.get(name))
        .cloned();
    Ok(picked)
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
