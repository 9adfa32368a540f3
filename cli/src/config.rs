use std::path::Path;

pub(crate) use xo_engine::config::{ConfigManager, FileContentConfigProvider, Validate, YamlConfigSerializer};
use serde::{Deserialize, Serialize};
use xo_engine::games::SessionRng;
use xo_engine::games::tictactoe::GameSettings;

pub const CONFIG_FILE: &str = "xo_config.yaml";

pub fn get_config_manager(
    path: Option<&Path>,
) -> ConfigManager<FileContentConfigProvider, Config, YamlConfigSerializer> {
    ConfigManager::from_yaml_file(path.unwrap_or_else(|| Path::new(CONFIG_FILE)))
}

#[derive(Debug, PartialEq, Serialize, Deserialize, Clone, Default)]
pub struct Config {
    pub game: GameSettings,
    pub players: PlayersConfig,
    pub archive: ArchiveConfig,
}

impl Validate for Config {
    fn validate(&self) -> Result<(), String> {
        self.game.validate()?;
        self.players.validate()?;
        self.archive.validate()?;
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum FirstPlayer {
    #[default]
    Human,
    Bot,
    Random,
}

impl FirstPlayer {
    pub fn bot_moves_first(&self, rng: &mut SessionRng) -> bool {
        match self {
            FirstPlayer::Human => false,
            FirstPlayer::Bot => true,
            FirstPlayer::Random => rng.random_bool(),
        }
    }
}

#[derive(Debug, PartialEq, Serialize, Deserialize, Clone)]
pub struct PlayersConfig {
    pub human_name: String,
    pub bot_name: String,
    #[serde(default)]
    pub first_player: FirstPlayer,
}

impl Default for PlayersConfig {
    fn default() -> Self {
        Self {
            human_name: "Player".to_string(),
            bot_name: "Bot".to_string(),
            first_player: FirstPlayer::Human,
        }
    }
}

impl Validate for PlayersConfig {
    fn validate(&self) -> Result<(), String> {
        if self.human_name.trim().is_empty() {
            return Err("human_name must not be empty".to_string());
        }
        if self.bot_name.trim().is_empty() {
            return Err("bot_name must not be empty".to_string());
        }
        if self.human_name == self.bot_name {
            return Err("human_name and bot_name must differ".to_string());
        }
        Ok(())
    }
}

#[derive(Debug, PartialEq, Serialize, Deserialize, Clone)]
pub struct ArchiveConfig {
    pub save: bool,
    pub location: String,
}

impl Default for ArchiveConfig {
    fn default() -> Self {
        Self {
            save: true,
            location: "xo_games".to_string(),
        }
    }
}

impl Validate for ArchiveConfig {
    fn validate(&self) -> Result<(), String> {
        if self.location.trim().is_empty() {
            return Err("archive location must not be empty".to_string());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        assert!(Config::default().validate().is_ok());
    }

    #[test]
    fn test_missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let manager = get_config_manager(Some(dir.path().join("absent.yaml").as_path()));
        assert_eq!(manager.get_config().unwrap(), Config::default());
    }

    #[test]
    fn test_load_from_yaml() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("xo.yaml");
        std::fs::write(
            &path,
            "game:\n  board_size: 5\n  win_condition: 4\n\
             players:\n  human_name: Ann\n  bot_name: Robo\n  first_player: random\n\
             archive:\n  save: false\n  location: past\n",
        )
        .unwrap();

        let config = get_config_manager(Some(path.as_path())).get_config().unwrap();
        assert_eq!(config.game, GameSettings { board_size: 5, win_condition: 4 });
        assert_eq!(config.players.human_name, "Ann");
        assert_eq!(config.players.first_player, FirstPlayer::Random);
        assert!(!config.archive.save);
        assert_eq!(config.archive.location, "past");
    }

    #[test]
    fn test_first_player_defaults_to_human_when_omitted() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("xo.yaml");
        std::fs::write(
            &path,
            "game:\n  board_size: 3\n  win_condition: 3\n\
             players:\n  human_name: Ann\n  bot_name: Robo\n\
             archive:\n  save: true\n  location: past\n",
        )
        .unwrap();

        let config = get_config_manager(Some(path.as_path())).get_config().unwrap();
        assert_eq!(config.players.first_player, FirstPlayer::Human);
    }

    #[test]
    fn test_validation_rejects_bad_values() {
        let mut config = Config::default();
        config.players.bot_name = config.players.human_name.clone();
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.game.win_condition = 4;
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.archive.location = "  ".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_first_player_choice() {
        let mut rng = SessionRng::new(3);
        assert!(!FirstPlayer::Human.bot_moves_first(&mut rng));
        assert!(FirstPlayer::Bot.bot_moves_first(&mut rng));
    }

    #[test]
    fn test_saved_config_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("xo.yaml");
        let mut config = Config::default();
        config.game = GameSettings { board_size: 7, win_condition: 5 };

        get_config_manager(Some(path.as_path())).set_config(&config).unwrap();
        assert_eq!(get_config_manager(Some(path.as_path())).get_config().unwrap(), config);
    }
}
