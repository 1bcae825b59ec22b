//! JSON-file persistence for saved characters and the last entry
//!
//! Two files under one data directory, mirroring the two records the
//! overlay keeps: `characters.json` (named characters with their inputs)
//! and `last_entry.json` (the most recent submission). Missing or
//! unreadable files degrade to empty state; writes propagate I/O errors.

use std::fs;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

const CHARACTERS_FILE: &str = "characters.json";
const LAST_ENTRY_FILE: &str = "last_entry.json";

/// Environment variable overriding the default data directory
pub const DATA_DIR_ENV: &str = "TUNNEL_DATA_DIR";
const DEFAULT_DATA_DIR: &str = "tunnel-data";

/// A saved character: a name bound to its calculation inputs
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Character {
    pub name: String,
    pub player_id: u32,
    pub level: u32,
}

/// The most recently submitted inputs
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct LastEntry {
    pub player_id: u32,
    pub level: u32,
    pub name: String,
}

/// File-backed store rooted at a data directory
pub struct CharacterStore {
    dir: PathBuf,
}

impl CharacterStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Store rooted at `$TUNNEL_DATA_DIR`, or `./tunnel-data` when unset
    pub fn from_env() -> Self {
        let dir = std::env::var(DATA_DIR_ENV).unwrap_or_else(|_| DEFAULT_DATA_DIR.to_string());
        Self::new(dir)
    }

    /// All saved characters, sorted by name
    ///
    /// Entries with empty names are dropped on load; a corrupt file reads
    /// as empty rather than failing the calculation that asked.
    pub fn characters(&self) -> Vec<Character> {
        let mut characters = self.load_characters();
        characters.sort_by(|a, b| a.name.to_lowercase().cmp(&b.name.to_lowercase()));
        characters
    }

    /// Look up a character by name, case-insensitively
    pub fn find(&self, name: &str) -> Option<Character> {
        self.load_characters()
            .into_iter()
            .find(|character| names_match(&character.name, name))
    }

    /// Insert or replace a character, keyed by case-insensitive name
    pub fn save(&self, character: &Character) -> Result<(), Box<dyn std::error::Error>> {
        let name = character.name.trim();
        if name.is_empty() {
            return Err("Character name must not be empty".into());
        }

        let normalized = Character {
            name: name.to_string(),
            player_id: character.player_id,
            level: character.level,
        };

        let mut characters = self.load_characters();
        match characters
            .iter_mut()
            .find(|existing| names_match(&existing.name, name))
        {
            Some(existing) => *existing = normalized,
            None => characters.push(normalized),
        }

        self.write_characters(&characters)
    }

    /// Remove a character by name; returns whether anything was deleted
    pub fn remove(&self, name: &str) -> Result<bool, Box<dyn std::error::Error>> {
        let mut characters = self.load_characters();
        let before = characters.len();
        characters.retain(|character| !names_match(&character.name, name));

        if characters.len() == before {
            return Ok(false);
        }

        self.write_characters(&characters)?;
        Ok(true)
    }

    /// The most recently persisted entry, if any
    pub fn last_entry(&self) -> Option<LastEntry> {
        let json = fs::read_to_string(self.dir.join(LAST_ENTRY_FILE)).ok()?;
        match serde_json::from_str(&json) {
            Ok(entry) => Some(entry),
            Err(e) => {
                tracing::warn!("Unable to read saved entry: {}", e);
                None
            }
        }
    }

    pub fn set_last_entry(&self, entry: &LastEntry) -> Result<(), Box<dyn std::error::Error>> {
        fs::create_dir_all(&self.dir)?;
        let json = serde_json::to_string_pretty(entry)?;
        fs::write(self.dir.join(LAST_ENTRY_FILE), json)?;
        Ok(())
    }

    fn load_characters(&self) -> Vec<Character> {
        let json = match fs::read_to_string(self.dir.join(CHARACTERS_FILE)) {
            Ok(json) => json,
            Err(_) => return Vec::new(),
        };

        let characters: Vec<Character> = match serde_json::from_str(&json) {
            Ok(characters) => characters,
            Err(e) => {
                tracing::warn!("Unable to read saved characters: {}", e);
                return Vec::new();
            }
        };

        characters
            .into_iter()
            .filter(|character| !character.name.trim().is_empty())
            .collect()
    }

    fn write_characters(&self, characters: &[Character]) -> Result<(), Box<dyn std::error::Error>> {
        fs::create_dir_all(&self.dir)?;
        let json = serde_json::to_string_pretty(characters)?;
        fs::write(self.dir.join(CHARACTERS_FILE), json)?;
        Ok(())
    }
}

fn names_match(a: &str, b: &str) -> bool {
    a.trim().eq_ignore_ascii_case(b.trim())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn character(name: &str, player_id: u32, level: u32) -> Character {
        Character {
            name: name.to_string(),
            player_id,
            level,
        }
    }

    #[test]
    fn test_save_and_find_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let store = CharacterStore::new(dir.path());

        store.save(&character("Miner", 57, 10)).unwrap();

        let found = store.find("miner").expect("case-insensitive lookup");
        assert_eq!(found.player_id, 57);
        assert_eq!(found.level, 10);
    }

    #[test]
    fn test_save_upserts_by_name() {
        let dir = tempfile::tempdir().unwrap();
        let store = CharacterStore::new(dir.path());

        store.save(&character("Miner", 57, 10)).unwrap();
        store.save(&character("MINER", 57, 11)).unwrap();

        let characters = store.characters();
        assert_eq!(characters.len(), 1);
        assert_eq!(characters[0].level, 11);
    }

    #[test]
    fn test_characters_sorted_by_name() {
        let dir = tempfile::tempdir().unwrap();
        let store = CharacterStore::new(dir.path());

        store.save(&character("zed", 1, 1)).unwrap();
        store.save(&character("Abe", 2, 2)).unwrap();

        let names: Vec<String> = store
            .characters()
            .into_iter()
            .map(|character| character.name)
            .collect();
        assert_eq!(names, ["Abe", "zed"]);
    }

    #[test]
    fn test_remove_reports_whether_deleted() {
        let dir = tempfile::tempdir().unwrap();
        let store = CharacterStore::new(dir.path());

        store.save(&character("Miner", 57, 10)).unwrap();

        assert!(store.remove("miner").unwrap());
        assert!(!store.remove("miner").unwrap());
        assert!(store.characters().is_empty());
    }

    #[test]
    fn test_rejects_empty_name() {
        let dir = tempfile::tempdir().unwrap();
        let store = CharacterStore::new(dir.path());

        assert!(store.save(&character("   ", 1, 1)).is_err());
    }

    #[test]
    fn test_corrupt_file_reads_as_empty() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join(CHARACTERS_FILE), "not json").unwrap();

        let store = CharacterStore::new(dir.path());
        assert!(store.characters().is_empty());

        // A corrupt file must not block new saves
        store.save(&character("Miner", 57, 10)).unwrap();
        assert_eq!(store.characters().len(), 1);
    }

    #[test]
    fn test_last_entry_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let store = CharacterStore::new(dir.path());

        assert!(store.last_entry().is_none());

        let entry = LastEntry {
            player_id: 57,
            level: 10,
            name: "Miner".to_string(),
        };
        store.set_last_entry(&entry).unwrap();

        assert_eq!(store.last_entry(), Some(entry));
    }
}
