use std::collections::BTreeSet;

use anyhow::Context;
use depext_core::types::AssetInfo;
use depext_core::types::Code;
use depext_core::types::Compilation;
use indexmap::IndexMap;
use serde::Serialize;

use crate::assets::AssetKind;
use crate::assets::ManifestAsset;

/// File name the manifest is registered under, inside the output directory.
pub const MANIFEST_FILENAME: &str = "assets.json";

#[derive(Debug, Default, Clone, PartialEq, Serialize)]
pub struct ScriptAsset {
  pub src: String,
  pub ver: Option<String>,
  pub gzip_size: usize,
  /// Handles of the externalized dependencies this script needs at
  /// runtime, sorted lexicographically. Only ever populated on an entry
  /// point's primary script.
  pub deps: Vec<String>,
  pub in_footer: bool,
}

#[derive(Debug, Default, Clone, PartialEq, Serialize)]
pub struct StyleAsset {
  pub src: String,
  pub ver: Option<String>,
  pub gzip_size: usize,
  pub media: String,
}

/// The persisted manifest: per asset type, handle to asset payload.
///
/// Insertion order is kept so the serialized output is deterministic for a
/// given compilation.
#[derive(Debug, Default, Clone, PartialEq, Serialize)]
pub struct AssetsManifest {
  pub script: IndexMap<String, ScriptAsset>,
  pub style: IndexMap<String, StyleAsset>,
}

impl AssetsManifest {
  /// Folds one entry point's enumerated assets and dependency handles in.
  ///
  /// The dependency list is attached only to the asset whose handle equals
  /// the entry-point name, i.e. its primary script; auxiliary split-chunk
  /// scripts stay dependency-free. Scripts are flagged for deferred footer
  /// placement, styles carry the `all` media query.
  pub fn add_entrypoint_assets(
    &mut self,
    entrypoint_name: &str,
    assets: Vec<ManifestAsset>,
    external_handles: &BTreeSet<String>,
  ) {
    for asset in assets {
      match asset.kind {
        AssetKind::Script => {
          let deps = if asset.handle == entrypoint_name {
            external_handles.iter().cloned().collect()
          } else {
            Vec::new()
          };

          self.script.insert(
            asset.handle,
            ScriptAsset {
              src: asset.src,
              ver: asset.ver,
              gzip_size: asset.gzip_size,
              deps,
              in_footer: true,
            },
          );
        }
        AssetKind::Style => {
          self.style.insert(
            asset.handle,
            StyleAsset {
              src: asset.src,
              ver: asset.ver,
              gzip_size: asset.gzip_size,
              media: "all".into(),
            },
          );
        }
      }
    }
  }

  /// Serializes the manifest and registers it with the compilation at a
  /// fixed path, computed relative to the configured output directory.
  pub fn emit(&self, compilation: &mut Compilation) -> Result<(), anyhow::Error> {
    let manifest_path = compilation.output_dir.join(MANIFEST_FILENAME);
    let manifest_filename = pathdiff::diff_paths(&manifest_path, &compilation.output_dir)
      .unwrap_or_else(|| MANIFEST_FILENAME.into());

    let json =
      serde_json::to_string_pretty(self).context("failed to serialize the assets manifest")?;

    compilation.emit_asset(
      manifest_filename.to_string_lossy().into_owned(),
      Code::from(json),
      AssetInfo::default(),
    );

    Ok(())
  }
}
