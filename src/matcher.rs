use crate::store::Flight;

/// Filters `flights` to those whose flight number contains `query` as a
/// case-insensitive substring, preserving store order.
///
/// The test is plain containment after Unicode lowercasing of both sides: not
/// anchored, not tokenized, not fuzzy, and no re-ranking of the matches. Any
/// characters in `query` are taken literally. An empty match set is a normal
/// outcome. Callers are expected to reject the empty query before calling;
/// if it does arrive here, it matches every record, since every string
/// contains the empty string.
pub fn filter<'a>(query: &str, flights: &'a [Flight]) -> Vec<&'a Flight> {
    let needle = query.to_lowercase();
    flights
        .iter()
        .filter(|flight| flight.flight_number.to_lowercase().contains(&needle))
        .collect()
}
