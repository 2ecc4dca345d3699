pub mod case;
pub mod enums;
pub mod meeting;

pub use case::*;
pub use enums::*;
pub use meeting::*;
