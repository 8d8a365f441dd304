use std::collections::HashSet;
use std::io::Write;
use std::sync::LazyLock;

use depext_core::types::Compilation;
use depext_core::types::Entrypoint;
use flate2::write::GzEncoder;
use flate2::Compression;
use percent_encoding::utf8_percent_encode;
use percent_encoding::AsciiSet;
use percent_encoding::NON_ALPHANUMERIC;
use regex::Regex;

/// Output files that participate in the manifest, by extension. The
/// extension may be followed by a query string or end the path.
static MANIFEST_EXTENSION: LazyLock<Regex> =
  LazyLock::new(|| Regex::new(r"\.(css|js|mjs)(\?|$)").expect("extension pattern is valid"));

/// The encode set of JavaScript's `encodeURIComponent`: everything but
/// alphanumerics and `-_.!~*'()`.
const COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
  .remove(b'-')
  .remove(b'_')
  .remove(b'.')
  .remove(b'!')
  .remove(b'~')
  .remove(b'*')
  .remove(b'\'')
  .remove(b'(')
  .remove(b')');

/// Manifest asset types. `.js` and `.mjs` outputs are scripts, `.css`
/// outputs are styles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AssetKind {
  Script,
  Style,
}

impl AssetKind {
  /// Classifies an output path by extension, or `None` for paths that do
  /// not participate in the manifest.
  pub fn from_output_path(path: &str) -> Option<Self> {
    let captures = MANIFEST_EXTENSION.captures(path)?;
    match captures.get(1).map(|m| m.as_str()) {
      Some("css") => Some(AssetKind::Style),
      Some(_) => Some(AssetKind::Script),
      None => None,
    }
  }
}

/// One output file of an entry point, before the assembler attaches
/// type-specific placement metadata.
#[derive(Debug, Clone, PartialEq)]
pub struct ManifestAsset {
  /// Entry-point name, suffixed `-N` for the Nth same-kind file.
  pub handle: String,
  pub kind: AssetKind,
  /// URL-encoded output path.
  pub src: String,
  /// Cache-busting token assigned by the host; opaque.
  pub ver: Option<String>,
  /// Byte length of the gzip-compressed asset payload.
  pub gzip_size: usize,
}

/// URL-encodes an output path.
///
/// Paths are used in unexpected ways; everything from the first `?` is
/// treated as the query string and kept verbatim, embedded `?` included.
/// The remaining `/`-separated segments are percent-encoded individually so
/// separators survive.
pub fn url_encode_path(file_path: &str) -> String {
  let (url_path, query_string) = match file_path.find('?') {
    Some(query_start) => file_path.split_at(query_start),
    None => (file_path, ""),
  };

  let encoded_path = url_path
    .split('/')
    .map(|segment| utf8_percent_encode(segment, COMPONENT).to_string())
    .collect::<Vec<_>>()
    .join("/");

  format!("{encoded_path}{query_string}")
}

/// Enumerates the manifest assets of one entry point.
///
/// Hot-update and development-only files are dropped; files the host
/// attached no metadata to are kept, since older hosts never populate it.
/// Paths are deduplicated after encoding (chunk splitting can emit the
/// same file into several places), and paths with no registered compiled
/// asset are skipped rather than failing the enumeration.
pub fn entrypoint_assets(
  entrypoint: &Entrypoint,
  compilation: &Compilation,
) -> Result<Vec<ManifestAsset>, anyhow::Error> {
  let mut assets = Vec::new();
  let mut seen_paths: HashSet<String> = HashSet::new();
  let mut script_count = 0usize;
  let mut style_count = 0usize;

  for file in entrypoint.files() {
    // Metadata filtering consults the registry by the raw path; the final
    // asset lookup below uses the encoded one.
    if let Some(asset) = compilation.get_asset(&file) {
      if asset.info.hot_module_replacement || asset.info.development {
        continue;
      }
    }

    let encoded_path = url_encode_path(&file);

    if !seen_paths.insert(encoded_path.clone()) {
      continue;
    }

    let Some(kind) = AssetKind::from_output_path(&encoded_path) else {
      continue;
    };

    let Some(asset) = compilation.get_asset(&encoded_path) else {
      tracing::debug!(path = %encoded_path, "no compiled asset registered for path, skipping");
      continue;
    };

    let count = match kind {
      AssetKind::Script => &mut script_count,
      AssetKind::Style => &mut style_count,
    };
    let handle = if *count == 0 {
      entrypoint.name.clone()
    } else {
      format!("{}-{}", entrypoint.name, *count)
    };
    let ver = asset
      .info
      .content_hash
      .clone()
      .or_else(|| asset.info.chunk_hash.clone());

    assets.push(ManifestAsset {
      handle,
      kind,
      src: encoded_path,
      ver,
      gzip_size: gzip_size(asset.code.bytes())?,
    });
    *count += 1;
  }

  Ok(assets)
}

fn gzip_size(bytes: &[u8]) -> Result<usize, anyhow::Error> {
  let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
  encoder.write_all(bytes)?;
  Ok(encoder.finish()?.len())
}
