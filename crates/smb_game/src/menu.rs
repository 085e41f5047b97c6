//! Menu buttons and the static screens around the game.

use glam::Vec2;
use smb_core::Rect;

use crate::text::GlyphMetrics;

pub const MENU_TOP: f32 = 60.0;
pub const MENU_SPACING: f32 = 84.0;
/// Distance of the OK button's top edge from the bottom of the view.
pub const OK_BUTTON_INSET: f32 = 64.0;

pub const HELP_TEXT: &str = "CONTROLS\n\nMOVE: ARROWS/WASD\nJUMP: UP/W\nP: PAUSE\nR: RESTART LEVEL\nESC: BACK TO MENU";
pub const NEW_RECORD_TEXT: &str = "Congratulations\nYou have the highest score\nPlease enter your name";

/// A text button centred horizontally on the screen.
#[derive(Debug, Clone, PartialEq)]
pub struct Button {
    label: String,
    rect: Rect,
}

impl Button {
    pub fn centered(screen_width: f32, y: f32, label: &str, metrics: &impl GlyphMetrics) -> Self {
        let size = metrics.text_size(label);
        Self {
            label: label.to_string(),
            rect: Rect::new(screen_width / 2.0 - size.x / 2.0, y, size.x, size.y),
        }
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn rect(&self) -> &Rect {
        &self.rect
    }

    /// Strictly inside: a point on the border does not count.
    pub fn in_focus(&self, point: Vec2) -> bool {
        self.rect.contains_point(point)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuItem {
    StartGame,
    HighScores,
    Help,
    Quit,
}

impl MenuItem {
    pub const ALL: [MenuItem; 4] = [
        MenuItem::StartGame,
        MenuItem::HighScores,
        MenuItem::Help,
        MenuItem::Quit,
    ];

    pub fn label(self) -> &'static str {
        match self {
            MenuItem::StartGame => "  Start game  ",
            MenuItem::HighScores => "  High scores  ",
            MenuItem::Help => "  Help  ",
            MenuItem::Quit => "  Quit  ",
        }
    }
}

#[derive(Debug, Clone)]
pub struct MainMenu {
    buttons: Vec<(MenuItem, Button)>,
}

impl MainMenu {
    pub fn new(screen_width: f32, metrics: &impl GlyphMetrics) -> Self {
        let buttons = MenuItem::ALL
            .iter()
            .enumerate()
            .map(|(i, item)| {
                let y = MENU_TOP + MENU_SPACING * i as f32;
                (*item, Button::centered(screen_width, y, item.label(), metrics))
            })
            .collect();
        Self { buttons }
    }

    pub fn button(&self, item: MenuItem) -> Option<&Button> {
        self.buttons
            .iter()
            .find(|(candidate, _)| *candidate == item)
            .map(|(_, button)| button)
    }

    pub fn clicked(&self, point: Vec2) -> Option<MenuItem> {
        self.buttons
            .iter()
            .find(|(_, button)| button.in_focus(point))
            .map(|(item, _)| *item)
    }
}

pub fn ok_button(screen_width: f32, screen_height: f32, metrics: &impl GlyphMetrics) -> Button {
    Button::centered(
        screen_width,
        screen_height - OK_BUTTON_INSET,
        "    OK    ",
        metrics,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::text::MonospaceMetrics;

    fn metrics() -> MonospaceMetrics {
        MonospaceMetrics {
            advance: 10.0,
            line_height: 40.0,
        }
    }

    #[test]
    fn buttons_are_centred_and_spaced() {
        let menu = MainMenu::new(1008.0, &metrics());
        let start = menu.button(MenuItem::StartGame).expect("start button");
        assert_eq!(start.rect().y, MENU_TOP);
        assert_eq!(start.rect().center().x, 504.0);

        let quit = menu.button(MenuItem::Quit).expect("quit button");
        assert_eq!(quit.rect().y, MENU_TOP + MENU_SPACING * 3.0);
    }

    #[test]
    fn click_inside_selects_item() {
        let menu = MainMenu::new(1008.0, &metrics());
        let help = menu.button(MenuItem::Help).expect("help button");
        assert_eq!(menu.clicked(help.rect().center()), Some(MenuItem::Help));
        assert_eq!(menu.clicked(Vec2::new(5.0, 5.0)), None);
    }

    #[test]
    fn click_on_border_is_ignored() {
        let ok = ok_button(1008.0, 460.0, &metrics());
        let rect = *ok.rect();
        assert_eq!(rect.top(), 396.0);
        assert!(!ok.in_focus(Vec2::new(rect.left(), rect.center().y)));
        assert!(ok.in_focus(rect.center()));
    }
}
