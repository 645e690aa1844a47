use crate::gui::app::AppMsg;
use gtk::gdk;
use gtk4 as gtk;
use wheelkit::arbiter::Interaction;
use wheelkit::wheel::Direction;

pub fn key_to_msg(key: gdk::Key) -> Option<AppMsg> {
    match key {
        gdk::Key::Right | gdk::Key::KP_Right => {
            Some(AppMsg::Navigate(Direction::Next, Interaction::Keyboard))
        }
        gdk::Key::Left | gdk::Key::KP_Left => {
            Some(AppMsg::Navigate(Direction::Previous, Interaction::Keyboard))
        }
        gdk::Key::Escape => Some(AppMsg::Close),
        _ => None,
    }
}
