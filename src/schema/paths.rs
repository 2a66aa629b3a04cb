//! Filesystem layout of one game.
//!
//! ```text
//! <games>/<name>/
//!     <name>.json          game config
//!     AllSets.json         set catalog
//!     AllCards.json        card catalog
//!     Background.<ext>
//!     CardBack.<ext>
//!     decks/<deck>.<ext>
//!     sets/<set>/<card>.<ext>
//! ```

use std::path::{Path, PathBuf};

use super::config::SchemaConfig;
use crate::cards::CardRecord;

pub const ALL_SETS_FILE_NAME: &str = "AllSets.json";
pub const ALL_CARDS_FILE_NAME: &str = "AllCards.json";
pub const BACKGROUND_IMAGE_FILE_NAME: &str = "Background";
pub const CARD_BACK_IMAGE_FILE_NAME: &str = "CardBack";

/// Where a game's files live on disk.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GamePaths {
    name: String,
    base: PathBuf,
}

impl GamePaths {
    /// Layout for game `name` under the `games` directory.
    pub fn new(games_dir: impl AsRef<Path>, name: impl Into<String>) -> Self {
        let name = name.into();
        let base = games_dir.as_ref().join(&name);
        Self { name, base }
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The game's own directory.
    #[must_use]
    pub fn base(&self) -> &Path {
        &self.base
    }

    #[must_use]
    pub fn config_file(&self) -> PathBuf {
        self.base.join(format!("{}.json", self.name))
    }

    #[must_use]
    pub fn sets_file(&self) -> PathBuf {
        self.base.join(ALL_SETS_FILE_NAME)
    }

    #[must_use]
    pub fn cards_file(&self) -> PathBuf {
        self.base.join(ALL_CARDS_FILE_NAME)
    }

    #[must_use]
    pub fn decks_dir(&self) -> PathBuf {
        self.base.join("decks")
    }

    #[must_use]
    pub fn deck_file(&self, deck_name: &str, config: &SchemaConfig) -> PathBuf {
        self.decks_dir()
            .join(format!("{}.{}", deck_name, config.deck_file_type))
    }

    #[must_use]
    pub fn background_image(&self, config: &SchemaConfig) -> PathBuf {
        self.base.join(format!(
            "{}.{}",
            BACKGROUND_IMAGE_FILE_NAME, config.background_image_file_type
        ))
    }

    #[must_use]
    pub fn card_back_image(&self, config: &SchemaConfig) -> PathBuf {
        self.base.join(format!(
            "{}.{}",
            CARD_BACK_IMAGE_FILE_NAME, config.card_back_image_file_type
        ))
    }

    /// Local cache path of a card's image.
    #[must_use]
    pub fn card_image(&self, card: &CardRecord, config: &SchemaConfig) -> PathBuf {
        self.base
            .join("sets")
            .join(&card.set_code)
            .join(format!(
                "{}.{}",
                config.card_image_file_name(card),
                config.card_image_file_type
            ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_layout() {
        let paths = GamePaths::new("/games", "Standard");
        assert_eq!(paths.base(), Path::new("/games/Standard"));
        assert_eq!(paths.config_file(), Path::new("/games/Standard/Standard.json"));
        assert_eq!(paths.sets_file(), Path::new("/games/Standard/AllSets.json"));
        assert_eq!(paths.cards_file(), Path::new("/games/Standard/AllCards.json"));
        assert_eq!(paths.decks_dir(), Path::new("/games/Standard/decks"));
    }

    #[test]
    fn test_file_types_follow_config() {
        let paths = GamePaths::new("/games", "Standard");
        let mut config = SchemaConfig::default();
        assert_eq!(
            paths.background_image(&config),
            Path::new("/games/Standard/Background.png")
        );

        config.card_back_image_file_type = "jpg".to_string();
        config.deck_file_type = "dec".to_string();
        assert_eq!(
            paths.card_back_image(&config),
            Path::new("/games/Standard/CardBack.jpg")
        );
        assert_eq!(
            paths.deck_file("Burn", &config),
            Path::new("/games/Standard/decks/Burn.dec")
        );
    }

    #[test]
    fn test_card_image_path() {
        let paths = GamePaths::new("/games", "Standard");
        let config = SchemaConfig::default();
        let card = CardRecord::new("7", "Goblin", "M10");
        assert_eq!(
            paths.card_image(&card, &config),
            Path::new("/games/Standard/sets/M10/7.png")
        );
    }
}
