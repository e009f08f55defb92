use clap::Parser;
use color_eyre::Result;
use distui::{App, AppConfig, AppEvent, Args, OutputFormat, ParameterMap, Theme};
use ratatui::DefaultTerminal;
use std::sync::mpsc::channel;
use std::time::Duration;

fn render(terminal: &mut DefaultTerminal, app: &mut App) -> Result<()> {
    terminal.draw(|frame| frame.render_widget(app, frame.area()))?;
    Ok(())
}

/// Runs the picker until the user confirms (`Some`) or cancels (`None`).
fn run(mut terminal: DefaultTerminal, config: &AppConfig, debug: bool) -> Result<Option<ParameterMap>> {
    let (tx, rx) = channel::<AppEvent>();
    let theme = Theme::from_config(&config.theme)?;
    let mut app = App::new_with_config(tx.clone(), theme, config);
    if debug && config.debug.show_counters {
        app.enable_debug();
    }
    let poll_interval = Duration::from_millis(config.performance.event_poll_interval_ms);
    render(&mut terminal, &mut app)?;

    loop {
        if crossterm::event::poll(poll_interval)? {
            match crossterm::event::read()? {
                crossterm::event::Event::Key(key) => tx.send(AppEvent::Key(key))?,
                crossterm::event::Event::Resize(cols, rows) => {
                    tx.send(AppEvent::Resize(cols, rows))?
                }
                _ => {}
            }
        }

        let updated = match rx.recv_timeout(Duration::from_millis(0)) {
            Ok(event) => {
                match event {
                    AppEvent::Exit => return Ok(None),
                    AppEvent::Confirmed(result) => return Ok(Some(result)),
                    event => {
                        if let Some(event) = app.event(&event) {
                            tx.send(event)?;
                        }
                    }
                }
                true
            }
            Err(std::sync::mpsc::RecvTimeoutError::Timeout) => false,
            Err(std::sync::mpsc::RecvTimeoutError::Disconnected) => return Ok(None),
        };

        if updated {
            render(&mut terminal, &mut app)?;
        }
    }
}

fn handle_early_exit_flags(args: &Args) -> Result<Option<()>> {
    if args.clear_cache {
        match distui::CacheManager::new(distui::APP_NAME) {
            Ok(cache) => {
                match cache.clear_all() {
                    Ok(removed) => println!("Cache cleared successfully ({} files)", removed),
                    Err(e) => {
                        eprintln!("Error clearing cache: {}", e);
                        std::process::exit(1);
                    }
                }
                return Ok(Some(()));
            }
            Err(_e) => {
                println!("No cache to clear");
                return Ok(Some(()));
            }
        }
    }

    if args.generate_config {
        match distui::ConfigManager::new(distui::APP_NAME) {
            Ok(config) => match config.write_default_config(args.force) {
                Ok(path) => {
                    println!("Wrote default configuration to {}", path.display());
                    return Ok(Some(()));
                }
                Err(e) => {
                    eprintln!("Error writing config: {}", e);
                    std::process::exit(1);
                }
            },
            Err(e) => {
                eprintln!("Error initializing config manager: {}", e);
                std::process::exit(1);
            }
        }
    }

    Ok(None)
}

/// Command-line flags win over the config file.
fn apply_args(config: &mut AppConfig, args: &Args) -> Result<OutputFormat> {
    if let Some(dir) = &args.export_dir {
        config.export.directory = Some(dir.clone());
    }
    if args.debug {
        config.debug.enabled = true;
    }
    match args.format {
        Some(format) => Ok(format),
        None => config.output_format(),
    }
}

fn main() -> Result<()> {
    let args = Args::parse();

    if let Some(()) = handle_early_exit_flags(&args)? {
        return Ok(());
    }

    color_eyre::install()?;

    let mut config = match AppConfig::load(distui::APP_NAME) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error loading config: {}", e);
            std::process::exit(1);
        }
    };
    let format = apply_args(&mut config, &args)?;

    if config.debug.enabled {
        let cache = distui::CacheManager::new(distui::APP_NAME)?;
        distui::logging::init(&cache, &config.debug.log_level)?;
    }

    let terminal = ratatui::init();
    let result = run(terminal, &config, config.debug.enabled);
    ratatui::restore();

    match result {
        Ok(Some(parameters)) => {
            println!("{}", parameters.render(format));
            Ok(())
        }
        Ok(None) => std::process::exit(1),
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_args_override_config() {
        let args = Args {
            format: Some(OutputFormat::Text),
            export_dir: Some(PathBuf::from("/tmp/plots")),
            debug: true,
            ..Args::default()
        };
        let mut config = AppConfig::default();
        let format = apply_args(&mut config, &args).unwrap();
        assert_eq!(format, OutputFormat::Text);
        assert_eq!(config.export.directory, Some(PathBuf::from("/tmp/plots")));
        assert!(config.debug.enabled);
    }

    #[test]
    fn test_format_falls_back_to_config() {
        let mut config = AppConfig::default();
        config.output.format = "text".to_string();
        let format = apply_args(&mut config, &Args::default()).unwrap();
        assert_eq!(format, OutputFormat::Text);
        assert_eq!(config.export.directory, None);
    }
}
