pub mod enums;
pub mod narrative;
pub mod patient;
pub mod verdict;

pub use enums::*;
pub use narrative::*;
pub use patient::*;
pub use verdict::*;
