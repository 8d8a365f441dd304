use serde::Deserialize;
use serde::Serialize;

use super::code::Code;

/// Metadata the host compiler attaches to a finished output asset.
///
/// Every field is optional on the host side; older hosts may not populate
/// any of them, so absent metadata deserializes to the defaults.
#[derive(Debug, Default, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AssetInfo {
  /// Hash of the asset contents, when the host computed one.
  pub content_hash: Option<String>,
  /// Hash of the chunk the asset was rendered from.
  pub chunk_hash: Option<String>,
  /// The asset only exists to patch a running development session.
  pub hot_module_replacement: bool,
  /// The asset is a development-only artifact.
  pub development: bool,
}

/// A finished output asset registered with the compilation, keyed by its
/// output path.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct OutputAsset {
  pub code: Code,
  pub info: AssetInfo,
}
