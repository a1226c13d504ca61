pub mod clock;
pub mod display_context;
pub mod events;
pub mod gpu_context;
pub mod scene_loop;
pub mod scheduler;
pub mod surface_renderer;
pub mod timer;
