//! Question generation and answer verification.
//!
//! `generate_question` is pure over the catalog and the random source, so it can
//! be driven with a seeded `StdRng` in tests and `thread_rng()` in production.

use rand::seq::SliceRandom;
use rand::Rng;
use tracing::{debug, instrument};

use crate::domain::{Location, LocationOption, QuizQuestion};
use crate::error::GameError;

pub const MAX_DECOYS: usize = 3;
pub const MAX_HINTS: usize = 2;

#[instrument(level = "debug", skip_all, fields(catalog = locations.len()))]
pub fn generate_question<R: Rng + ?Sized>(
  locations: &[Location],
  rng: &mut R,
) -> Result<QuizQuestion, GameError> {
  let target = locations.choose(rng).ok_or(GameError::NoLocations)?;

  let pool: Vec<&Location> = locations.iter().filter(|l| l.id != target.id).collect();
  let decoys = pool.choose_multiple(rng, MAX_DECOYS.min(pool.len()));

  let mut options: Vec<LocationOption> = std::iter::once(target)
    .chain(decoys.copied())
    .map(LocationOption::from)
    .collect();
  options.shuffle(rng);

  if target.hints.is_empty() {
    return Err(GameError::EmptyHints { location_id: target.id });
  }
  let hints: Vec<String> = target
    .hints
    .choose_multiple(rng, MAX_HINTS.min(target.hints.len()))
    .cloned()
    .collect();

  let interesting_fact = target
    .interesting_facts
    .choose(rng)
    .cloned()
    .ok_or(GameError::EmptyFacts { location_id: target.id })?;
  let knowledge_bit = target
    .knowledge_bits
    .choose(rng)
    .cloned()
    .ok_or(GameError::EmptyTrivia { location_id: target.id })?;

  debug!(target: "quiz", target_id = target.id, options = options.len(), hints = hints.len(), "Question generated");
  Ok(QuizQuestion {
    id: target.id,
    hints,
    options,
    correct_id: target.id,
    interesting_fact,
    knowledge_bit,
  })
}

/// Stateless check: the client echoes back the question id it was given.
pub fn verify_answer(question_id: i64, answer_id: i64) -> bool {
  question_id == answer_id
}
