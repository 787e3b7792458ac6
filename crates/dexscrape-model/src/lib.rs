pub mod literal;
pub mod moves;
pub mod species;

pub use literal::*;
pub use moves::*;
pub use species::*;
