// HTML materialization for the repository panel
pub mod cards;
pub mod colors;
pub mod escape;

pub use cards::Renderer;
pub use colors::language_color;
