//! Per-run collision tracking.

use super::BaseFilename;
use std::collections::HashMap;

/// Counts how often each base file name was produced during one run
///
/// The first claim of a name gets it unchanged; each further claim gets
/// the next suffix from [`collision_suffix`].
#[derive(Debug, Default)]
pub struct FilenameRegistry {
    counts: HashMap<String, usize>,
}

impl FilenameRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one more use of `base` and return the file name to use
    pub fn claim(&mut self, base: &BaseFilename) -> String {
        let key = base.to_string();
        let counter = match self.counts.get_mut(&key) {
            Some(count) => {
                *count += 1;
                *count
            }
            None => {
                self.counts.insert(key.clone(), 0);
                0
            }
        };

        match collision_suffix(counter) {
            Some(suffix) => base.with_suffix(&suffix),
            None => key,
        }
    }
}

/// Suffix for the `counter`-th repeat of a name
///
/// Counter 0 is the original and has no suffix. Letters are bijective
/// base 26 with `A` as zero, so 1..=25 give `B`..`Z`, then 26 gives `AA`,
/// 27 gives `AB` and so on without ever running out.
pub fn collision_suffix(counter: usize) -> Option<String> {
    if counter == 0 {
        return None;
    }

    let mut letters = Vec::new();
    let mut n = counter;
    loop {
        letters.push(b'A' + (n % 26) as u8);
        if n < 26 {
            break;
        }
        n = n / 26 - 1;
    }
    letters.reverse();

    Some(letters.into_iter().map(char::from).collect())
}

/// Whether `letters` is something [`collision_suffix`] can produce
///
/// Every run of capitals qualifies except a lone `A`, which is counter 0.
pub(super) fn is_collision_suffix(letters: &str) -> bool {
    !letters.is_empty() && letters != "A" && letters.bytes().all(|b| b.is_ascii_uppercase())
}
