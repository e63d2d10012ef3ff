pub mod vault;
pub mod model_bridge;

pub use vault::*;
pub use model_bridge::*;
