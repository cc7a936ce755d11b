pub mod duration;
pub mod station;
pub mod time;
pub mod users;

use std::collections::HashMap;
use std::hash::Hash;
use std::time::Instant;

/// Most frequent value in the iterator; ties break toward the value seen
/// first (standard mode semantics). `None` on an empty iterator.
pub(crate) fn mode_by<T, I>(values: I) -> Option<T>
where
    T: Eq + Hash,
    I: IntoIterator<Item = T>,
{
    // value → (count, index of first occurrence)
    let mut tallies: HashMap<T, (usize, usize)> = HashMap::new();
    for (idx, value) in values.into_iter().enumerate() {
        let entry = tallies.entry(value).or_insert((0, idx));
        entry.0 += 1;
    }
    tallies
        .into_iter()
        .max_by(|(_, (count_a, first_a)), (_, (count_b, first_b))| {
            count_a.cmp(count_b).then(first_b.cmp(first_a))
        })
        .map(|(value, _)| value)
}

/// Close out a reporter section: its own wall-clock time plus the divider.
/// The timing is cosmetic output, mirroring the analysis transcript format.
pub(crate) fn finish_section(started: Instant) {
    println!("\nThis took {:.4} seconds.", started.elapsed().as_secs_f64());
    println!("{}", "-".repeat(40));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mode_picks_most_frequent() {
        assert_eq!(mode_by([3, 1, 3, 2, 3, 1]), Some(3));
    }

    #[test]
    fn mode_tie_breaks_to_first_seen() {
        assert_eq!(mode_by(["b", "a", "a", "b"]), Some("b"));
        assert_eq!(mode_by([7]), Some(7));
    }

    #[test]
    fn mode_of_nothing_is_none() {
        assert_eq!(mode_by(Vec::<u32>::new()), None);
    }
}
