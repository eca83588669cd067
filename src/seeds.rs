//! Built-in location catalog, used when no TOML bank supplies locations.

use crate::domain::NewLocation;

fn entry(name: &str, nation: &str, hints: [&str; 2], facts: [&str; 2], bits: [&str; 2]) -> NewLocation {
  NewLocation {
    location_name: name.into(),
    nation: nation.into(),
    hints: hints.iter().map(|s| s.to_string()).collect(),
    interesting_facts: facts.iter().map(|s| s.to_string()).collect(),
    knowledge_bits: bits.iter().map(|s| s.to_string()).collect(),
  }
}

/// Five well-known cities that keep the game playable out of the box.
pub fn sample_locations() -> Vec<NewLocation> {
  vec![
    entry(
      "New York City",
      "United States",
      [
        "Often referred to as 'The Big Apple'",
        "Home to a famous green statue in the harbor",
      ],
      [
        "The subway system has over 470 stations, the most in the world",
        "Before 1904, Times Square was called Longacre Square",
      ],
      [
        "The Empire State Building was the tallest building in the world for nearly 40 years",
        "More than 800 languages are spoken in this city, making it the most linguistically diverse in the world",
      ],
    ),
    entry(
      "Tokyo",
      "Japan",
      [
        "World's largest metropolitan area by population",
        "Famous for its cherry blossoms and technology districts",
      ],
      [
        "Was previously known as Edo until 1868",
        "Has over 12,000 automated vending machines throughout the city",
      ],
      [
        "The Tsukiji fish market handles over 2,000 tons of seafood daily",
        "Contains over 100 universities and colleges",
      ],
    ),
    entry(
      "Paris",
      "France",
      [
        "Known worldwide as the 'City of Love'",
        "Famous for its iron lattice tower visible throughout the city",
      ],
      [
        "The Eiffel Tower was built for the 1889 World's Fair and was meant to be temporary",
        "Has more than 470 parks and gardens within the city limits",
      ],
      [
        "The Louvre museum would take approximately 100 days to see every piece of art",
        "There are over 6,100 streets in this city",
      ],
    ),
    entry(
      "Cairo",
      "Egypt",
      [
        "The largest city in Africa and the Middle East",
        "Located near some of the world's most famous ancient monuments",
      ],
      [
        "Known as 'The City of a Thousand Minarets' due to its Islamic architecture",
        "The metro system is one of only two in Africa",
      ],
      [
        "The city was founded in 969 CE",
        "Ancient pyramids are visible from certain tall buildings in the city",
      ],
    ),
    entry(
      "Sydney",
      "Australia",
      [
        "Famous for its distinctive opera house designed to look like sails",
        "Built around one of the world's largest natural harbors",
      ],
      [
        "The iconic Opera House has over one million roof tiles",
        "The Sydney Harbour Bridge is nicknamed 'The Coathanger'",
      ],
      [
        "The city has over 100 beaches including the famous Bondi Beach",
        "It was founded as a British penal colony in 1788",
      ],
    ),
  ]
}
