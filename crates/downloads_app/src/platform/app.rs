use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};
use std::sync::mpsc::{self, RecvTimeoutError};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

use anyhow::Context;
use app_logging::{app_debug, app_info, app_warn};
use downloads_core::{update, AppState, Msg};
use downloads_engine::{EngineHandle, ReqwestProjectApi};

use super::config;
use super::effects::EffectRunner;
use super::ui::commands::{self, Command, HELP};
use super::ui::render;

const LOG_FILENAME: &str = "downloads.log";
const POLL_INTERVAL: Duration = Duration::from_millis(50);

pub fn run_app() -> anyhow::Result<()> {
    let config_path = std::env::args_os().nth(1).map(PathBuf::from);
    let config = config::load(config_path.as_deref())?;

    app_logging::initialize(
        config.log_destination.into(),
        config.log_level.into(),
        Path::new(LOG_FILENAME),
    )
    .context("failed to install logger")?;
    app_info!(
        "Starting downloads client against {} (saving to {})",
        config.api_base_url,
        config.download_dir.display()
    );

    let api = ReqwestProjectApi::new(config.api_settings()).context("invalid backend url")?;
    let engine = EngineHandle::new(Arc::new(api)).context("failed to start engine runtime")?;

    let mut shell = Shell {
        state: AppState::new(),
        runner: EffectRunner::new(engine),
        out: io::stdout(),
    };
    let lines = spawn_input_reader();

    shell.dispatch(Msg::RefreshRequested)?;

    loop {
        while let Some(msg) = shell.runner.poll() {
            shell.dispatch(msg)?;
        }
        match lines.recv_timeout(POLL_INTERVAL) {
            Ok(line) => {
                if !shell.handle_line(&line)? {
                    break;
                }
            }
            Err(RecvTimeoutError::Timeout) => {}
            Err(RecvTimeoutError::Disconnected) => {
                app_debug!("Input closed");
                break;
            }
        }
    }

    app_info!("Shutting down");
    Ok(())
}

struct Shell {
    state: AppState,
    runner: EffectRunner,
    out: io::Stdout,
}

impl Shell {
    fn dispatch(&mut self, msg: Msg) -> io::Result<()> {
        let state = std::mem::take(&mut self.state);
        let (mut state, effects) = update(state, msg);
        let redraw = state.consume_dirty();
        self.state = state;
        self.runner.enqueue(effects);
        if redraw {
            self.redraw()?;
        }
        Ok(())
    }

    fn redraw(&mut self) -> io::Result<()> {
        let text = render::render(&self.state.view());
        let mut out = self.out.lock();
        writeln!(out)?;
        write!(out, "{text}> ")?;
        out.flush()
    }

    /// Returns `false` when the user asked to quit.
    fn handle_line(&mut self, line: &str) -> io::Result<bool> {
        let view = self.state.view();
        if view.alert.is_some() {
            self.dispatch(Msg::AlertDismissed)?;
            return Ok(true);
        }
        match commands::parse(line, &view) {
            Ok(Command::Dispatch(msg)) => self.dispatch(msg)?,
            Ok(Command::Redraw) => self.redraw()?,
            Ok(Command::Help) => {
                writeln!(self.out, "{HELP}")?;
                self.redraw()?;
            }
            Ok(Command::Quit) => return Ok(false),
            Err(message) => {
                let mut out = self.out.lock();
                write!(out, "{message}\n> ")?;
                out.flush()?;
            }
        }
        Ok(true)
    }
}

fn spawn_input_reader() -> mpsc::Receiver<String> {
    let (tx, rx) = mpsc::channel();
    thread::spawn(move || {
        for line in io::stdin().lock().lines() {
            match line {
                Ok(line) => {
                    if tx.send(line).is_err() {
                        break;
                    }
                }
                Err(err) => {
                    app_warn!("Failed to read input: {}", err);
                    break;
                }
            }
        }
    });
    rx
}
