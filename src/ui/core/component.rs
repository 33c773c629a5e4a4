use super::actions::Action;
use crossterm::event::KeyEvent;
use ratatui::{layout::Rect, Frame};

/// A piece of the screen that turns input into [`Action`]s and reacts to them.
pub trait Component {
    fn handle_key_events(&mut self, key: KeyEvent) -> Action;

    /// React to an action; return what is left for the next component.
    fn update(&mut self, action: Action) -> Action {
        action
    }

    fn render(&mut self, f: &mut Frame, rect: Rect);
}
