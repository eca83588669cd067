//! Error kinds surfaced by the store and the core operations.

/// Failures reported by a `GameRepo` implementation.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RepoError {
  #[error("Player name already registered: {0}")]
  DuplicateName(String),
  #[error("Referral code already in use: {0}")]
  DuplicateCode(String),
  #[error("Player not found: id={0}")]
  PlayerNotFound(i64),
  /// Connectivity failure of a backing store. `MemoryStore` never fails this
  /// way; persistent `GameRepo` implementations report it.
  #[allow(dead_code)]
  #[error("Storage unavailable: {0}")]
  Unavailable(String),
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GameError {
  #[error("No locations available")]
  NoLocations,
  #[error("Location {location_id} has no hints")]
  EmptyHints { location_id: i64 },
  #[error("Location {location_id} has no interesting facts")]
  EmptyFacts { location_id: i64 },
  #[error("Location {location_id} has no knowledge bits")]
  EmptyTrivia { location_id: i64 },
  #[error("Player name already registered")]
  DuplicateName(String),
  #[error("Invalid player name: {0}")]
  InvalidName(String),
  #[error("Player not found")]
  PlayerNotFound(String),
  #[error("Invalid request: {0}")]
  InvalidRequest(String),
  #[error("Could not allocate a unique referral code")]
  DuplicateCode,
  #[error(transparent)]
  Repo(RepoError),
}

impl From<RepoError> for GameError {
  fn from(e: RepoError) -> Self {
    match e {
      RepoError::DuplicateName(name) => GameError::DuplicateName(name),
      RepoError::DuplicateCode(_) => GameError::DuplicateCode,
      other => GameError::Repo(other),
    }
  }
}

impl GameError {
  /// Stable snake_case tag for clients that branch on the failure kind.
  pub fn kind(&self) -> &'static str {
    match self {
      GameError::NoLocations => "no_locations",
      GameError::EmptyHints { .. } => "empty_hints",
      GameError::EmptyFacts { .. } => "empty_facts",
      GameError::EmptyTrivia { .. } => "empty_trivia",
      GameError::DuplicateName(_) => "duplicate_name",
      GameError::InvalidName(_) => "invalid_name",
      GameError::PlayerNotFound(_) => "player_not_found",
      GameError::InvalidRequest(_) => "invalid_request",
      GameError::DuplicateCode => "duplicate_code",
      GameError::Repo(_) => "repository",
    }
  }

  /// True for errors caused by the caller's input rather than the server.
  pub fn is_client_error(&self) -> bool {
    matches!(
      self,
      GameError::DuplicateName(_)
        | GameError::InvalidName(_)
        | GameError::PlayerNotFound(_)
        | GameError::InvalidRequest(_)
    )
  }
}
