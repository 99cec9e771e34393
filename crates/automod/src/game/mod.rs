mod phase;
mod position;
mod state;

pub use phase::*;
pub use position::*;
pub use state::*;
