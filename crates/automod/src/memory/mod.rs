pub mod layout;
mod view;

#[cfg(test)]
pub mod mock;

pub use view::{GameRam, ProcessRam};

#[cfg(test)]
pub use mock::{MockRam, MockRamBuilder};
