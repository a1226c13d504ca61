mod draw_list;
mod dump;
mod node;

pub use draw_list::{DrawItem, DrawList, FigureBatch, LightInstance};
pub use dump::{write_scene_dump, SceneDump};
pub use node::{NodeKind, SceneNode};
