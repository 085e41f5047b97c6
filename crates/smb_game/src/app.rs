//! Top-level screen flow: menu, game, records, help and new-record entry.

use smb_core::{InputState, Key};
use std::path::PathBuf;

use crate::level::LevelData;
use crate::menu::{ok_button, Button, MainMenu, MenuItem, HELP_TEXT};
use crate::records::HighScoreTable;
use crate::session::{Session, SessionEvent, SessionSettings};
use crate::text::{GlyphMetrics, TextInput};

pub const MAX_NAME_LEN: usize = 16;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    Menu,
    Game,
    Records,
    Help,
    NewRecord,
}

pub struct App {
    screen: Screen,
    running: bool,
    level: LevelData,
    settings: SessionSettings,
    menu: MainMenu,
    ok_button: Button,
    records: HighScoreTable,
    records_path: PathBuf,
    session: Option<Session>,
    name_input: TextInput,
    last_score: u32,
}

impl App {
    pub fn new(
        level: LevelData,
        settings: SessionSettings,
        records: HighScoreTable,
        records_path: PathBuf,
        metrics: &impl GlyphMetrics,
    ) -> Self {
        Self {
            screen: Screen::Menu,
            running: true,
            menu: MainMenu::new(settings.view_width, metrics),
            ok_button: ok_button(settings.view_width, settings.view_height, metrics),
            level,
            settings,
            records,
            records_path,
            session: None,
            name_input: TextInput::new(MAX_NAME_LEN),
            last_score: 0,
        }
    }

    pub fn screen(&self) -> Screen {
        self.screen
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn menu(&self) -> &MainMenu {
        &self.menu
    }

    pub fn ok_button(&self) -> &Button {
        &self.ok_button
    }

    pub fn session(&self) -> Option<&Session> {
        self.session.as_ref()
    }

    pub fn records(&self) -> &HighScoreTable {
        &self.records
    }

    pub fn name_input(&self) -> &TextInput {
        &self.name_input
    }

    pub fn help_text(&self) -> &'static str {
        HELP_TEXT
    }

    /// Score of the most recent finished or abandoned game.
    pub fn last_score(&self) -> u32 {
        self.last_score
    }

    /// Run one tick of whichever screen is showing.
    pub fn tick(&mut self, input: &InputState) -> Result<Vec<SessionEvent>, String> {
        match self.screen {
            Screen::Menu => self.menu_tick(input)?,
            Screen::Game => return self.game_tick(input),
            Screen::Records | Screen::Help => {
                if self.ok_clicked(input) {
                    self.screen = Screen::Menu;
                }
            }
            Screen::NewRecord => self.new_record_tick(input)?,
        }
        Ok(Vec::new())
    }

    fn menu_tick(&mut self, input: &InputState) -> Result<(), String> {
        let Some(point) = input.snapshot().click else {
            return Ok(());
        };
        match self.menu.clicked(point) {
            Some(MenuItem::StartGame) => self.start_game()?,
            Some(MenuItem::HighScores) => self.screen = Screen::Records,
            Some(MenuItem::Help) => self.screen = Screen::Help,
            Some(MenuItem::Quit) => {
                log::info!("Quit selected");
                self.running = false;
            }
            None => {}
        }
        Ok(())
    }

    fn start_game(&mut self) -> Result<(), String> {
        self.session = Some(Session::new(self.level.clone(), self.settings)?);
        self.screen = Screen::Game;
        Ok(())
    }

    fn game_tick(&mut self, input: &InputState) -> Result<Vec<SessionEvent>, String> {
        let Some(session) = self.session.as_mut() else {
            self.screen = Screen::Menu;
            return Ok(Vec::new());
        };

        if input.is_just_released(Key::Escape) {
            self.last_score = session.score();
            self.session = None;
            self.screen = Screen::Menu;
            return Ok(Vec::new());
        }
        if input.is_just_released(Key::R) {
            session.reload()?;
        }
        if input.is_just_released(Key::P) {
            session.toggle_pause();
        }

        let events = session.tick(input.snapshot())?;
        if session.is_finished() {
            self.last_score = session.score();
            self.session = None;
            self.name_input.clear();
            self.screen = Screen::NewRecord;
        }
        Ok(events)
    }

    fn new_record_tick(&mut self, input: &InputState) -> Result<(), String> {
        if !self.records.qualifies(self.last_score) {
            self.screen = Screen::Menu;
            return Ok(());
        }
        self.name_input
            .update(input.typed_text(), input.is_just_pressed(Key::Backspace));
        if self.ok_clicked(input) {
            let name = self.name_input.value().to_string();
            log::info!("New record: {name} with {}", self.last_score);
            self.records.insert_top(name, self.last_score);
            self.records.save(&self.records_path)?;
            self.name_input.clear();
            self.screen = Screen::Menu;
        }
        Ok(())
    }

    fn ok_clicked(&self, input: &InputState) -> bool {
        input
            .snapshot()
            .click
            .is_some_and(|point| self.ok_button.in_focus(point))
    }
}
