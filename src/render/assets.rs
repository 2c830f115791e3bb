use anyhow::{Context, Result};
use log::{info, warn};
use std::path::Path;

/// How the food cell is drawn
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum FoodMarker {
    /// Solid red block, used when no sprite is available
    #[default]
    Solid,
    /// Glyph loaded from a sprite file
    Sprite(String),
}

/// Load the optional food sprite.
///
/// The sprite file is UTF-8 text; its first non-whitespace character is the
/// glyph. Any problem with the file falls back to the solid marker.
pub fn load_food_marker(path: Option<&Path>) -> FoodMarker {
    let Some(path) = path else {
        return FoodMarker::Solid;
    };

    match read_sprite(path) {
        Ok(glyph) => {
            info!("Loaded food sprite {:?} from {:?}", glyph, path);
            FoodMarker::Sprite(glyph)
        }
        Err(err) => {
            warn!("Using solid food marker: {:#}", err);
            FoodMarker::Solid
        }
    }
}

fn read_sprite(path: &Path) -> Result<String> {
    let contents = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read food sprite {:?}", path))?;
    let glyph = contents
        .chars()
        .find(|c| !c.is_whitespace())
        .with_context(|| format!("Food sprite {:?} is empty", path))?;
    Ok(glyph.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::{NamedTempFile, TempDir};

    #[test]
    fn test_no_path_is_solid() {
        assert_eq!(load_food_marker(None), FoodMarker::Solid);
    }

    #[test]
    fn test_sprite_takes_first_glyph() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "  \n@ apple").unwrap();

        let marker = load_food_marker(Some(file.path()));
        assert_eq!(marker, FoodMarker::Sprite("@".to_string()));
    }

    #[test]
    fn test_missing_or_empty_sprite_degrades() {
        let dir = TempDir::new().unwrap();
        let missing = dir.path().join("apple.txt");
        assert_eq!(load_food_marker(Some(&missing)), FoodMarker::Solid);

        let empty = NamedTempFile::new().unwrap();
        assert_eq!(load_food_marker(Some(empty.path())), FoodMarker::Solid);
    }
}
