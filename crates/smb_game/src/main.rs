//! Super Mario Bros -- headless runner.
//!
//! Loads the config, level and records, clicks "Start game", then feeds a
//! replay (or idle input) through the app one fixed tick at a time:
//!
//!   1. apply the scripted input for this tick to `InputState`
//!   2. `App::tick` -- session, world step, screen transitions
//!   3. log the events the tick raised and clear per-tick input
//!
//! With `realtime` set, ticks are paced by `FrameClock`; otherwise the run
//! goes as fast as it can. A finished game with a qualifying score is saved
//! to the records table under the name "PLAYER".

mod app;
mod block;
mod camera;
mod collision;
mod config;
mod enemy;
mod entity;
mod events;
mod level;
mod menu;
mod player;
mod records;
mod replay;
mod session;
mod sprite;
mod text;
mod world;

use std::path::Path;
use std::time::Duration;

use app::{App, Screen};
use config::{load_config_from_path, validate_config, GameConfig};
use level::load_level_from_path;
use menu::{MenuItem, NEW_RECORD_TEXT, OK_BUTTON_INSET};
use records::HighScoreTable;
use replay::{load_replay_from_path, ReplayStep};
use session::SessionEvent;
use smb_core::time::FrameClock;
use smb_core::{InputState, Rect};
use text::{layout_text, Justify, MonospaceMetrics};

const RECORD_NAME: &str = "PLAYER";
const RECORDS_MARGIN: f32 = 100.0;

fn main() -> Result<(), String> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    log::info!("Super Mario Bros headless runner starting...");

    let config = match std::env::args().nth(1) {
        Some(path) => load_config_from_path(Path::new(&path))?,
        None => GameConfig::default(),
    };
    validate_config(&config)?;

    let level = load_level_from_path(&config.level_path, config.view_height)?;
    let backdrop: Vec<String> = level
        .decorations
        .iter()
        .map(|d| format!("{} at ({}, {})", d.image_name(), d.x, d.bottom))
        .collect();
    log::debug!("Backdrop images: {}", backdrop.join(", "));
    let records = HighScoreTable::load(&config.records_path)?;
    let steps = match &config.replay_path {
        Some(path) => load_replay_from_path(path)?.expanded_steps(),
        None => vec![ReplayStep::default(); config.idle_ticks as usize],
    };
    log::info!("Running {} scripted ticks", steps.len());

    let metrics = MonospaceMetrics::default();
    let mut app = App::new(
        level,
        config.session_settings(),
        records,
        config.records_path.clone(),
        &metrics,
    );
    check_screen_text(&metrics, &config, app.help_text())?;
    for item in MenuItem::ALL {
        if let Some(button) = app.menu().button(item) {
            log::debug!("Menu button '{}' at {:?}", button.label().trim(), button.rect());
        }
    }
    let mut input = InputState::new();

    let start = app
        .menu()
        .button(MenuItem::StartGame)
        .map(|button| button.rect().center())
        .ok_or_else(|| "Main menu has no start button".to_string())?;
    run_step(
        &mut app,
        &mut input,
        &ReplayStep {
            click: Some(start),
            ..Default::default()
        },
    )?;

    let mut clock = FrameClock::new(config.fps);
    for (tick, step) in steps.iter().enumerate() {
        if !app.is_running() || app.screen() != Screen::Game {
            break;
        }
        if config.realtime {
            wait_for_tick(&mut clock);
        }
        run_step(&mut app, &mut input, step)?;
        if tick % config.fps as usize == 0 {
            if let Some(session) = app.session() {
                let hud = session.hud();
                let sprites = session.world().renderables();
                let world = session.world();
                let camera = world.camera();
                let player_image = sprites
                    .last()
                    .map(|sprite| sprite.key.image_name())
                    .unwrap_or_default();
                let on_screen = camera.to_screen(world.player().rect());
                log::debug!(
                    "tick {tick}: world {} score {} time {} coins {} lives {} paused {}, {} sprites",
                    hud.world,
                    hud.score,
                    hud.time,
                    hud.coins,
                    hud.lives,
                    hud.paused,
                    sprites.len()
                );
                log::debug!(
                    "player {:?} {player_image} at screen ({}, {}) in {}x{} view, {} px to level end",
                    world.player().state(),
                    on_screen.x,
                    on_screen.y,
                    camera.view_width(),
                    camera.view_height(),
                    session.level().level_end - world.player().rect().left()
                );
            }
        }
    }

    match app.screen() {
        Screen::NewRecord => {
            log::info!("Game finished with score {}", app.last_score());
            let name = ReplayStep {
                text: RECORD_NAME.to_string(),
                ..Default::default()
            };
            run_step(&mut app, &mut input, &name)?;
            if app.screen() == Screen::NewRecord {
                let field = app.name_input();
                let cursor = if field.cursor_visible() { "_" } else { "" };
                log::debug!("Name entry: {}{cursor}", field.value());
                let ok = ReplayStep {
                    click: Some(app.ok_button().rect().center()),
                    ..Default::default()
                };
                run_step(&mut app, &mut input, &ok)?;
            } else {
                log::info!("Score did not beat the top record");
            }
        }
        Screen::Game => {
            let score = app.session().map_or(0, |session| session.score());
            log::info!("Replay ended mid-game with score {score}");
        }
        other => log::info!("Run ended on {other:?} screen"),
    }

    let records_box = Rect::new(
        0.0,
        0.0,
        config.view_width - RECORDS_MARGIN,
        config.view_height - OK_BUTTON_INSET - RECORDS_MARGIN,
    );
    let table = app.records().lines().join("\n");
    match layout_text(&table, &metrics, &records_box, Justify::Center) {
        Ok(lines) => {
            for line in lines {
                log::info!("{}", line.text);
            }
        }
        Err(e) => log::warn!("Records table does not fit on screen: {e}"),
    }
    Ok(())
}

fn run_step(app: &mut App, input: &mut InputState, step: &ReplayStep) -> Result<(), String> {
    step.apply(input);
    for event in app.tick(input)? {
        log_event(&event);
    }
    input.end_frame();
    Ok(())
}

fn log_event(event: &SessionEvent) {
    match event {
        SessionEvent::Game(game) => log::debug!("{game:?}"),
        SessionEvent::LifeLost { lives_left } => log::info!("Life lost, {lives_left} left"),
        other => log::debug!("{other:?}"),
    }
    if let Some(cue) = event.sound_cue() {
        let channel = if cue.is_music() { "music" } else { "sound" };
        log::trace!("{channel} cue {}", cue.file_name());
    }
}

/// The help and new-record screens are fixed text; make sure they fit the view.
fn check_screen_text(
    metrics: &MonospaceMetrics,
    config: &GameConfig,
    help: &str,
) -> Result<(), String> {
    let view = Rect::new(0.0, 0.0, config.view_width, config.view_height);
    for text in [help, NEW_RECORD_TEXT] {
        layout_text(text, metrics, &view, Justify::Center)?;
    }
    Ok(())
}

fn wait_for_tick(clock: &mut FrameClock) {
    loop {
        clock.begin_frame();
        if clock.should_step() {
            return;
        }
        std::thread::sleep(Duration::from_secs_f64(clock.time_to_next_tick()));
    }
}
