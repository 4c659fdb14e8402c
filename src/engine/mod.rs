// Engine modules: frame timing and jump input

pub mod game_loop;
pub mod input;
