pub mod analysis;
pub mod audio;
pub mod constants;
pub mod error;
pub mod flow;
pub mod frame;
pub mod palette;
pub mod particles;
pub mod render;
pub mod settings;

pub use analysis::*;
pub use audio::*;
pub use constants::*;
pub use error::*;
pub use flow::*;
pub use frame::*;
pub use palette::*;
pub use particles::*;
pub use render::*;
pub use settings::*;
