mod entities;
pub use entities::*;
