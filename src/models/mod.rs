pub mod publication;
pub mod report;
pub mod roster;

pub use publication::*;
pub use report::*;
pub use roster::*;
