pub mod advice;
pub mod journal;
pub mod situation;
pub mod user;

pub use advice::*;
pub use journal::*;
pub use situation::*;
pub use user::*;
