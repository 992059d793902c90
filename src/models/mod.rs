pub mod template;

pub use template::{EmailType, UnknownEmailType};
