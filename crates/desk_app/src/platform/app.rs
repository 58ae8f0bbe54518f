use std::io;
use std::sync::mpsc;
use std::thread;

use anyhow::Context;
use desk_client::{MarkdownReportConverter, ReportConverter};
use desk_core::{update, AppState, Msg, Page};
use desk_logging::{desk_debug, desk_info, desk_warn};

use super::effects::EffectRunner;
use super::logging;
use super::settings::{self, AppSettings};
use super::ui::input::{self, InputAction};
use super::ui::terminal::TerminalSurface;
use super::ui::{render, Surface, UiCommand};

/// Everything the main loop reacts to, in arrival order.
pub enum AppEvent {
    Input(String),
    InputClosed,
    Core(Msg),
    Ui(UiCommand),
}

pub fn run_app() -> anyhow::Result<()> {
    let settings_path = settings::settings_path();
    let loaded = settings::load_settings(&settings_path);
    let app_settings = match &loaded {
        Ok(Some(settings)) => settings.clone(),
        _ => AppSettings::default(),
    };
    logging::initialize(app_settings.log_destination, app_settings.level());
    match loaded {
        Ok(Some(_)) => desk_info!("Loaded settings from {:?}", settings_path),
        Ok(None) => desk_info!("No settings at {:?}; using defaults", settings_path),
        Err(err) => desk_warn!("{err}; using defaults"),
    }

    let (event_tx, event_rx) = mpsc::channel::<AppEvent>();
    let runner = EffectRunner::new(app_settings.client_settings(), event_tx.clone())
        .context("failed to start backend client")?;
    spawn_input_reader(event_tx)?;

    let mut surface = TerminalSurface::new(io::stdout());
    surface.write_line("Research Desk")?;
    surface.write_help()?;

    let mut app = App::new(runner, Box::new(MarkdownReportConverter));
    app.dispatch(Msg::Navigate(Page::Home.name().to_string()), &mut surface);
    surface.write_prompt()?;

    for event in event_rx {
        match event {
            AppEvent::Input(line) => {
                let action = input::parse_line(&line, app.state.is_awaiting_delete_confirmation());
                match action {
                    InputAction::Send(msgs) => {
                        for msg in msgs {
                            app.dispatch(msg, &mut surface);
                        }
                    }
                    InputAction::Help => surface.write_help()?,
                    InputAction::Quit => break,
                    InputAction::Unknown(command) => {
                        surface.write_line(&format!("Unknown command: {command} (try `help`)"))?
                    }
                }
                surface.write_prompt()?;
            }
            AppEvent::InputClosed => break,
            AppEvent::Core(msg) => app.dispatch(msg, &mut surface),
            AppEvent::Ui(command) => surface.apply(command),
        }
    }

    desk_info!("Research desk shutting down");
    Ok(())
}

fn spawn_input_reader(events: mpsc::Sender<AppEvent>) -> io::Result<()> {
    thread::Builder::new()
        .name("desk-input".to_string())
        .spawn(move || {
            for line in io::stdin().lines() {
                match line {
                    Ok(line) => {
                        if events.send(AppEvent::Input(line)).is_err() {
                            return;
                        }
                    }
                    Err(err) => {
                        desk_warn!("Failed to read input: {err}");
                        break;
                    }
                }
            }
            let _ = events.send(AppEvent::InputClosed);
        })?;
    Ok(())
}

struct App {
    state: AppState,
    runner: EffectRunner,
    converter: Box<dyn ReportConverter>,
}

impl App {
    fn new(runner: EffectRunner, converter: Box<dyn ReportConverter>) -> Self {
        Self {
            state: AppState::new(),
            runner,
            converter,
        }
    }

    fn dispatch(&mut self, msg: Msg, surface: &mut dyn Surface) {
        desk_debug!("dispatch {:?}", msg);
        let state = std::mem::take(&mut self.state);
        let (mut state, effects) = update(state, msg);
        let mut commands = if state.consume_dirty() {
            render::render(&state.view(), self.converter.as_ref())
        } else {
            Vec::new()
        };
        self.state = state;
        commands.extend(self.runner.run(effects));
        surface.apply_all(commands);
    }
}
