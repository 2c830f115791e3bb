pub mod assets;
pub mod layout;
pub mod renderer;

pub use assets::{FoodMarker, load_food_marker};
pub use layout::BoardLayout;
pub use renderer::Renderer;
