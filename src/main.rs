use anyhow::{Context, Result};
use colormine::command::{parse_command, Command, CommandError, HELP};
use colormine::{log_debug, log_error, log_info, log_warn, Config, LogLevel, PickerSession};
use std::io::{self, BufRead, Write};
use std::path::PathBuf;

fn main() -> Result<()> {
    let result = run_app();
    let _ = colormine::logger::finalize_logs();
    result
}

fn run_app() -> Result<()> {
    let args: Vec<String> = std::env::args().collect();
    let stream_flag = args.contains(&"--stream-logs".to_string());
    let verbose = args.contains(&"--verbose".to_string());
    let config_dir = args
        .iter()
        .position(|a| a == "--config-dir")
        .map(|i| args.get(i + 1).map(PathBuf::from).context("--config-dir needs a directory"))
        .transpose()?;

    if std::env::var_os("COLORMINE_TRACE").is_some() {
        tracing_subscriber::fmt()
            .with_max_level(tracing::Level::TRACE)
            .with_writer(io::stderr)
            .init();
    }

    let config = match config_dir {
        Some(dir) => Config::with_dir(dir)?,
        None => Config::new()?,
    };
    let mut settings = config.load()?;
    let stream_logs = stream_flag || settings.stream_logs;
    let min_level = if verbose { LogLevel::Debug } else { LogLevel::Info };

    colormine::logger::init_logger(
        config.logs_dir.clone(),
        "colormine",
        settings.log_retention_count,
        stream_logs,
        min_level,
    )?;

    log_info!("ColorMine started");
    if let Some(log_path) = colormine::logger::get_log_path() {
        log_info!("Log file: {}", log_path.display());
    }
    log_info!("Config: {}", config.config_path().display());
    log_info!("Center switch policy: {:?}", settings.center_switch);

    let session = PickerSession::new(settings.center_switch);
    let updates = session.subscribe();
    let events = session.events();

    let stdin = io::stdin();
    let mut out = io::stdout().lock();
    writeln!(out, "{}", session.snapshot())?;

    for line in stdin.lock().lines() {
        let line = match line {
            Ok(line) => line,
            Err(e) => {
                log_error!("Failed to read from stdin: {}", e);
                return Err(e).context("Failed to read from stdin");
            }
        };

        match parse_command(&line) {
            Ok(Command::Event(event)) => {
                log_debug!("Event: {:?}", event);
                events.send(event).context("Picker event queue closed")?;
                session.pump();
            }
            Ok(Command::Hex(code)) => {
                if let Err(e) = session.set_hex(&code) {
                    writeln!(out, "error: {}", e)?;
                    log_warn!("Rejected hex '{}': {}", code, e);
                }
            }
            Ok(Command::Policy(policy)) => {
                session.set_center_switch(policy);
                settings.center_switch = policy;
                log_info!("Center switch policy: {:?}", policy);
                match config.save(&settings) {
                    Ok(()) => writeln!(out, "policy: {:?}", policy)?,
                    Err(e) => {
                        writeln!(out, "error: {:#}", e)?;
                        log_error!("Failed to save settings: {:#}", e);
                    }
                }
            }
            Ok(Command::Show) => writeln!(out, "{}", session.snapshot())?,
            Ok(Command::Help) => writeln!(out, "{}", HELP)?,
            Ok(Command::Quit) => break,
            Err(CommandError::Empty) => {}
            Err(e) => {
                writeln!(out, "error: {}", e)?;
                log_warn!("Rejected command '{}': {}", line.trim(), e);
            }
        }

        for snapshot in updates.try_iter() {
            writeln!(out, "{}", snapshot)?;
        }
        out.flush()?;
    }

    log_info!("Final color: {}", session.snapshot().hex);
    Ok(())
}
