use std::collections::HashMap;
use std::path::PathBuf;

use indexmap::IndexMap;

use super::asset::AssetInfo;
use super::asset::OutputAsset;
use super::code::Code;
use super::entrypoint::Entrypoint;

/// View of a finished compilation handed to asset-stage plugins.
///
/// Everything here is produced by the host compiler; the only mutation the
/// host exposes at this stage is [`Compilation::emit_asset`], which
/// registers a synthesized artifact into the output set.
#[derive(Debug, Default)]
pub struct Compilation {
  /// Entry points in configuration order.
  pub entrypoints: IndexMap<String, Entrypoint>,
  /// Finished output assets keyed by output path.
  assets: HashMap<String, OutputAsset>,
  /// The configured output directory.
  pub output_dir: PathBuf,
}

impl Compilation {
  pub fn new(output_dir: impl Into<PathBuf>) -> Self {
    Self {
      entrypoints: IndexMap::new(),
      assets: HashMap::new(),
      output_dir: output_dir.into(),
    }
  }

  pub fn add_entrypoint(&mut self, entrypoint: Entrypoint) {
    self.entrypoints.insert(entrypoint.name.clone(), entrypoint);
  }

  pub fn get_asset(&self, path: &str) -> Option<&OutputAsset> {
    self.assets.get(path)
  }

  pub fn emit_asset(&mut self, path: impl Into<String>, code: Code, info: AssetInfo) {
    self.assets.insert(path.into(), OutputAsset { code, info });
  }

  pub fn asset_paths(&self) -> impl Iterator<Item = &String> {
    self.assets.keys()
  }
}
