use std::io::{self, BufRead, Write};
use std::sync::mpsc;
use std::thread;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use devfeed_core::{update, AppState, Msg, Route};
use devfeed_engine::{EngineHandle, ThemeStore};
use feed_logging::{feed_debug, feed_info};

use crate::command::{self, Command, HELP};
use crate::config::AppConfig;
use crate::effects::EffectRunner;
use crate::render::render;

const TICK_INTERVAL: Duration = Duration::from_millis(75);

pub enum AppEvent {
    Msg(Msg),
    Line(String),
    InputClosed,
}

/// Milliseconds since the front end started; the only clock the core sees.
#[derive(Debug, Clone, Copy)]
struct Clock(Instant);

impl Clock {
    fn now_ms(self) -> u64 {
        u64::try_from(self.0.elapsed().as_millis()).unwrap_or(u64::MAX)
    }
}

pub fn run_browse(config: &AppConfig) -> Result<()> {
    let store = ThemeStore::new(&config.state_dir);
    let engine = EngineHandle::new(config.fetch_settings(), store.clone())
        .context("failed to start the fetch engine")?;

    let (event_tx, event_rx) = mpsc::channel::<AppEvent>();
    let (msg_tx, msg_rx) = mpsc::channel::<Msg>();
    let runner = EffectRunner::new(engine, msg_tx.clone());
    let clock = Clock(Instant::now());

    // Mount home before any user input can reach the core.
    let mut state = AppState::new();
    for msg in [Msg::ThemeRestored(store.load()), Msg::Navigate(Route::Home)] {
        let (next, effects) = update(state, msg);
        state = next;
        runner.run(effects);
    }
    println!("{HELP}");

    forward_msgs(msg_rx, event_tx.clone());
    spawn_ticker(clock, msg_tx);
    spawn_stdin_reader(event_tx);

    while let Ok(event) = event_rx.recv() {
        let msgs = match event {
            AppEvent::Msg(msg) => vec![msg],
            AppEvent::Line(line) => match command::parse(&line) {
                Ok(Command::Quit) => break,
                Ok(Command::Help) => {
                    println!("{HELP}");
                    continue;
                }
                Ok(command) => command.into_msgs(clock.now_ms()),
                Err(message) => {
                    if !message.is_empty() {
                        println!("{message}");
                    }
                    continue;
                }
            },
            AppEvent::InputClosed => break,
        };

        for msg in msgs {
            let (next, effects) = update(state, msg);
            state = next;
            runner.run(effects);
        }

        if state.consume_dirty() {
            print!("{}", render(&state.view()));
            print!("> ");
            let _ = io::stdout().flush();
        }
    }

    feed_info!("browse session ended");
    Ok(())
}

fn forward_msgs(msg_rx: mpsc::Receiver<Msg>, event_tx: mpsc::Sender<AppEvent>) {
    thread::spawn(move || {
        while let Ok(msg) = msg_rx.recv() {
            if event_tx.send(AppEvent::Msg(msg)).is_err() {
                break;
            }
        }
    });
}

fn spawn_ticker(clock: Clock, msg_tx: mpsc::Sender<Msg>) {
    thread::spawn(move || {
        while msg_tx.send(Msg::Tick { now_ms: clock.now_ms() }).is_ok() {
            thread::sleep(TICK_INTERVAL);
        }
    });
}

fn spawn_stdin_reader(event_tx: mpsc::Sender<AppEvent>) {
    thread::spawn(move || {
        let stdin = io::stdin();
        for line in stdin.lock().lines() {
            match line {
                Ok(line) => {
                    if event_tx.send(AppEvent::Line(line)).is_err() {
                        return;
                    }
                }
                Err(err) => {
                    feed_debug!("stdin closed: {}", err);
                    break;
                }
            }
        }
        let _ = event_tx.send(AppEvent::InputClosed);
    });
}
