// Custom jump keybinds for one or two players, in gameplay and editor playtest

pub mod engine;
pub mod game;
