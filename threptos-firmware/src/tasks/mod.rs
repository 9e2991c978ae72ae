//! Embassy tasks

mod buttons;
mod game;

pub use buttons::buttons_task;
pub use game::game_task;
