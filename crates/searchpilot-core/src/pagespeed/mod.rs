mod reader;
mod types;

pub use reader::ResponseReader;
pub use types::*;
