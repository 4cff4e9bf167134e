// Font loading and fallback resolution
//
// Probe order: explicit path, bundled assets next to the executable,
// OS-standard font locations, then the face embedded in the binary.
// A bad font path is therefore never fatal; it only changes glyph shapes.

use once_cell::sync::Lazy;
use parking_lot::Mutex;
use rusttype::Font;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::constants::{BUNDLED_FONT_DIR, BUNDLED_FONT_FILES, SYSTEM_FONT_CANDIDATES};
use crate::error::{PhotomarkError, Result};

static FONT_CACHE: Lazy<Mutex<HashMap<PathBuf, Arc<Font<'static>>>>> =
    Lazy::new(|| Mutex::new(HashMap::new()));

static EMBEDDED_FONT: Lazy<Arc<Font<'static>>> = Lazy::new(|| {
    let bytes: &'static [u8] = include_bytes!("../../assets/fonts/DejaVuSans.ttf");
    Arc::new(Font::try_from_bytes(bytes).expect("embedded font face parses"))
});

/// Load and cache a single font file. Fails with `FontLoad` when the file
/// is missing or not a parseable TrueType face.
pub fn load_font(path: &Path) -> Result<Arc<Font<'static>>> {
    if let Some(f) = FONT_CACHE.lock().get(path) {
        return Ok(Arc::clone(f));
    }

    let bytes = std::fs::read(path)
        .map_err(|e| PhotomarkError::FontLoad(format!("failed to read {}: {}", path.display(), e)))?;
    let font = Font::try_from_vec(bytes)
        .ok_or_else(|| PhotomarkError::FontLoad(format!("failed to parse {}", path.display())))?;

    let font = Arc::new(font);
    FONT_CACHE.lock().insert(path.to_path_buf(), Arc::clone(&font));
    Ok(font)
}

/// Resolve a usable font, starting from an optional explicit path and
/// walking the fallback chain. Always succeeds; the embedded face is the
/// last resort.
pub fn resolve_font(explicit: Option<&Path>) -> Arc<Font<'static>> {
    if let Some(path) = explicit {
        match load_font(path) {
            Ok(font) => return font,
            Err(e) => log::warn!("Font '{}' unavailable, falling back: {}", path.display(), e),
        }
    }

    for candidate in bundled_candidates() {
        if candidate.exists() {
            if let Ok(font) = load_font(&candidate) {
                return font;
            }
        }
    }

    for candidate in SYSTEM_FONT_CANDIDATES {
        let path = Path::new(candidate);
        if path.exists() {
            if let Ok(font) = load_font(path) {
                return font;
            }
        }
    }

    log::warn!("No font file found on disk, using the embedded default face");
    Arc::clone(&EMBEDDED_FONT)
}

/// Bundled font paths: beside the executable first, then the source tree
/// (useful for `cargo run` and tests).
fn bundled_candidates() -> Vec<PathBuf> {
    let mut dirs = Vec::new();
    if let Ok(exe) = std::env::current_exe() {
        if let Some(dir) = exe.parent() {
            dirs.push(dir.join(BUNDLED_FONT_DIR));
        }
    }
    dirs.push(PathBuf::from(env!("CARGO_MANIFEST_DIR")).join(BUNDLED_FONT_DIR));

    let mut paths = Vec::new();
    for dir in dirs {
        for name in BUNDLED_FONT_FILES {
            paths.push(dir.join(name));
        }
    }
    paths
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_always_yields_a_font() {
        let font = resolve_font(None);
        // A usable face reports sane vertical metrics.
        let vm = font.v_metrics(rusttype::Scale::uniform(40.0));
        assert!(vm.ascent > 0.0);
    }

    #[test]
    fn test_bogus_explicit_path_falls_back() {
        let font = resolve_font(Some(Path::new("/nonexistent/no-such-font.ttf")));
        let vm = font.v_metrics(rusttype::Scale::uniform(40.0));
        assert!(vm.ascent > 0.0, "fallback chain must still produce a font");
    }

    #[test]
    fn test_load_font_errors_on_missing_file() {
        let err = load_font(Path::new("/nonexistent/no-such-font.ttf"));
        assert!(matches!(err, Err(PhotomarkError::FontLoad(_))));
    }

    #[test]
    fn test_load_font_errors_on_non_font_file() {
        let tmp = tempfile::NamedTempFile::new().unwrap();
        std::fs::write(tmp.path(), b"definitely not a truetype file").unwrap();
        let err = load_font(tmp.path());
        assert!(matches!(err, Err(PhotomarkError::FontLoad(_))));
    }

    #[test]
    fn test_cache_returns_same_face() {
        let bundled = PathBuf::from(env!("CARGO_MANIFEST_DIR"))
            .join(BUNDLED_FONT_DIR)
            .join("DejaVuSans.ttf");
        let a = load_font(&bundled).unwrap();
        let b = load_font(&bundled).unwrap();
        assert!(Arc::ptr_eq(&a, &b), "second load must hit the cache");
    }
}
