use anyhow::Result;
use custom_jump::engine::game_loop::GameLoop;
use custom_jump::engine::input::{EventOutcome, KeybindEvent, PlayerSlot, PlayerStatus, SettingsStore};
use custom_jump::game::PlayLayer;
use log::info;
use std::path::Path;
use std::rc::Rc;
use winit::{
    event::{ElementState, Event, WindowEvent},
    event_loop::EventLoop,
    keyboard::{KeyCode, ModifiersState, PhysicalKey},
    window::WindowBuilder,
};

fn main() -> Result<()> {
    // Initialize logger
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .init();

    info!("Starting custom jump demo...");

    let settings = match std::env::args().nth(1) {
        Some(path) => SettingsStore::load_or_default(Path::new(&path)),
        None => {
            info!("No settings file given, using stock binds");
            SettingsStore::with_defaults()
        }
    };

    let mut game_loop = GameLoop::new();
    let mut layer = PlayLayer::new(Rc::new(settings), true);
    let mut modifiers = ModifiersState::empty();

    let event_loop = EventLoop::new()?;
    let window = WindowBuilder::new()
        .with_title("Custom Jump")
        .with_inner_size(winit::dpi::LogicalSize::new(640, 360))
        .with_resizable(true)
        .build(&event_loop)?;

    info!("Escape: pause | F1: kill/revive player 1 | F2: toggle level complete");

    event_loop.run(move |event, elwt| {
        match event {
            Event::WindowEvent {
                event: WindowEvent::CloseRequested,
                ..
            } => {
                info!("Close requested, shutting down...");
                elwt.exit();
            }
            Event::WindowEvent {
                event: WindowEvent::ModifiersChanged(new_modifiers),
                ..
            } => {
                modifiers = new_modifiers.state();
            }
            Event::WindowEvent {
                event: WindowEvent::KeyboardInput { event: key_event, .. },
                ..
            } => {
                if key_event.state == ElementState::Pressed && !key_event.repeat {
                    match key_event.physical_key {
                        PhysicalKey::Code(KeyCode::Escape) => {
                            game_loop.toggle_pause();
                            layer.toggle_pause();
                            return;
                        }
                        PhysicalKey::Code(KeyCode::F1) => {
                            if layer.state().players[PlayerSlot::One.index()]
                                == Some(PlayerStatus::Alive)
                            {
                                layer.kill_player(PlayerSlot::One);
                            } else {
                                layer.reset_level();
                            }
                            return;
                        }
                        PhysicalKey::Code(KeyCode::F2) => {
                            if layer.state().level_completed {
                                layer.reset_level();
                            } else {
                                layer.complete_level();
                            }
                            return;
                        }
                        _ => {}
                    }
                }

                let timestamp = game_loop.input_timestamp();
                if let Some(keybind_event) =
                    KeybindEvent::from_key_event(&key_event, modifiers, Some(timestamp))
                {
                    if layer.handle_key(&keybind_event) == EventOutcome::Stop {
                        log::debug!("Consumed {:?}", keybind_event.keybind);
                    }
                }
            }
            Event::AboutToWait => {
                // The host runs update/postUpdate every frame, even with no physics steps
                let steps = game_loop.begin_frame();
                let dt = steps as f64 * game_loop.fixed_timestep();
                layer.set_input_time(game_loop.input_timestamp());
                layer.update(dt);
                layer.post_update(dt);
                layer.state_mut().queue.drain();

                window.request_redraw();
            }
            _ => {}
        }
    }).map_err(|e| anyhow::anyhow!("Event loop error: {}", e))?;

    Ok(())
}
