pub mod convert;
pub mod extract;
pub mod init;
pub mod list;
pub mod lookup;
pub mod translate;
pub mod trim;
pub mod update;

mod command_result;

pub use command_result::*;
