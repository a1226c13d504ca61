use anyhow::{Context, Result};
use clap::Parser;
use winit::event_loop::EventLoop;

use dog_grid::app::App;
use dog_grid::cli::Cli;
use dog_grid::composer::compose_with;
use dog_grid::config::Config;
use dog_grid::scene::write_scene_dump;

fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();
    let config = Config::from_cli(&cli)?;

    if let Some(path) = &cli.dump_scene {
        let state = config.initial_state();
        let scene = compose_with(&config.composer_config(), &state);
        return write_scene_dump(path, &state, &scene);
    }

    let event_loop = EventLoop::new().context("Failed to create event loop")?;
    let mut app = App::new(config);

    log::info!("Dog Grid - Controls: WASD, Space/Shift, Q/E, Escape to quit");
    event_loop.run_app(&mut app).context("Event loop terminated with an error")?;

    Ok(())
}
