//! Domain models: locations, players, and the ephemeral quiz/score payloads.

use serde::{Deserialize, Serialize};

/// A quiz location. Owned by the repository; read-only for the core.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Location {
  pub id: i64,
  pub location_name: String,
  pub nation: String,
  pub hints: Vec<String>,
  pub interesting_facts: Vec<String>,
  /// Trivia snippets.
  pub knowledge_bits: Vec<String>,
}

/// Location data before the repository assigns an id (seeds, TOML bank).
#[derive(Clone, Debug, Deserialize, PartialEq, Eq)]
pub struct NewLocation {
  pub location_name: String,
  pub nation: String,
  #[serde(default)] pub hints: Vec<String>,
  #[serde(default)] pub interesting_facts: Vec<String>,
  #[serde(default)] pub knowledge_bits: Vec<String>,
}

impl NewLocation {
  /// Name of the first missing required field, if any.
  pub fn missing_field(&self) -> Option<&'static str> {
    if self.location_name.trim().is_empty() { return Some("location_name"); }
    if self.nation.trim().is_empty() { return Some("nation"); }
    if self.hints.is_empty() { return Some("hints"); }
    if self.interesting_facts.is_empty() { return Some("interesting_facts"); }
    if self.knowledge_bits.is_empty() { return Some("knowledge_bits"); }
    None
  }

  pub fn with_id(self, id: i64) -> Location {
    Location {
      id,
      location_name: self.location_name,
      nation: self.nation,
      hints: self.hints,
      interesting_facts: self.interesting_facts,
      knowledge_bits: self.knowledge_bits,
    }
  }
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Player {
  pub id: i64,
  pub player_name: String,
  pub referral_code: String,
  pub best_score: i64,
}

/// Answer choice shown to the player; no hints or facts leak through it.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct LocationOption {
  pub id: i64,
  pub location_name: String,
  pub nation: String,
}

impl From<&Location> for LocationOption {
  fn from(l: &Location) -> Self {
    Self { id: l.id, location_name: l.location_name.clone(), nation: l.nation.clone() }
  }
}

/// Generated per request, never persisted. `id` and `correct_id` are both the target's id.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct QuizQuestion {
  pub id: i64,
  pub hints: Vec<String>,
  pub options: Vec<LocationOption>,
  pub correct_id: i64,
  pub interesting_fact: String,
  pub knowledge_bit: String,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct ScoreUpdateResult {
  pub player_name: String,
  pub best_score: i64,
  pub is_personal_best: bool,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct LeaderboardEntry {
  pub player_name: String,
  pub best_score: i64,
}

impl From<&Player> for LeaderboardEntry {
  fn from(p: &Player) -> Self {
    Self { player_name: p.player_name.clone(), best_score: p.best_score }
  }
}
