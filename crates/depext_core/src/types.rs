pub use self::asset::*;
pub use self::code::*;
pub use self::compilation::*;
pub use self::entrypoint::*;
pub use self::external::*;
pub use self::module::*;

mod asset;
mod code;
mod compilation;
mod entrypoint;
mod external;
mod module;
