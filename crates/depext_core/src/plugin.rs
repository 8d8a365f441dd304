pub use externals_plugin::*;
pub use process_assets_plugin::*;

mod externals_plugin;
mod process_assets_plugin;
