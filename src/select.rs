//! Comparator-driven top-K selection.
//!
//! Selecting a single best element is a linear scan; selecting `n > 1` copies
//! the candidates, sorts them descending and truncates. Both keep the first
//! candidate among comparator-equal maxima, so `best_n_of(.., 1, ..)` and the
//! head of `best_n_of(.., k, ..)` always agree with `best_of`.

use std::cmp::Ordering;

use crate::error::{Result, TrieError};

/// The greatest item under `cmp`, or `None` if `items` is empty.
///
/// Ties resolve to the earliest item.
pub fn best_of<T, I, F>(items: I, mut cmp: F) -> Option<T>
where
    I: IntoIterator<Item = T>,
    F: FnMut(&T, &T) -> Ordering,
{
    let mut items = items.into_iter();
    let first = items.next()?;
    Some(items.fold(first, |best, item| {
        if cmp(&item, &best) == Ordering::Greater {
            item
        } else {
            best
        }
    }))
}

/// Up to `n` greatest items under `cmp`, in descending order.
///
/// Returns [`TrieError::ZeroCount`] when `n` is zero. Comparator-equal items
/// keep their input order.
pub fn best_n_of<T, I, F>(items: I, n: usize, mut cmp: F) -> Result<Vec<T>>
where
    I: IntoIterator<Item = T>,
    F: FnMut(&T, &T) -> Ordering,
{
    if n == 0 {
        return Err(TrieError::ZeroCount);
    }
    if n == 1 {
        return Ok(best_of(items, cmp).into_iter().collect());
    }

    let mut all: Vec<T> = items.into_iter().collect();
    // Stable sort, so equal items stay in input order.
    all.sort_by(|a, b| cmp(b, a));
    all.truncate(n);
    Ok(all)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_best_of() {
        assert_eq!(best_of(vec![3, 9, 1, 4], |a, b| a.cmp(b)), Some(9));
        assert_eq!(best_of(vec![3, 9, 1, 4], |a, b| b.cmp(a)), Some(1));
        assert_eq!(best_of(Vec::<u32>::new(), |a, b| a.cmp(b)), None);
    }

    #[test]
    fn test_best_of_prefers_first_on_tie() {
        let items = vec![(1, 'a'), (5, 'b'), (5, 'c'), (2, 'd')];
        assert_eq!(best_of(items, |a, b| a.0.cmp(&b.0)), Some((5, 'b')));
    }

    #[test]
    fn test_best_n_of() {
        let items = vec![4, 8, 1, 9, 3];
        assert_eq!(best_n_of(items.clone(), 3, |a, b| a.cmp(b)).unwrap(), vec![9, 8, 4]);
        assert_eq!(best_n_of(items.clone(), 1, |a, b| a.cmp(b)).unwrap(), vec![9]);
        assert_eq!(
            best_n_of(items.clone(), 10, |a, b| a.cmp(b)).unwrap(),
            vec![9, 8, 4, 3, 1]
        );
        assert_eq!(best_n_of(items, 0, |a, b| a.cmp(b)), Err(TrieError::ZeroCount));
    }

    #[test]
    fn test_best_n_of_empty() {
        for n in [1, 2, 5] {
            assert!(best_n_of(Vec::<u8>::new(), n, |a, b| a.cmp(b)).unwrap().is_empty());
        }
    }

    #[test]
    fn test_paths_agree_on_ties() {
        let items = vec![(2, 'a'), (7, 'b'), (7, 'c'), (7, 'd'), (1, 'e')];
        let single = best_n_of(items.clone(), 1, |a, b| a.0.cmp(&b.0)).unwrap();
        let many = best_n_of(items, 3, |a, b| a.0.cmp(&b.0)).unwrap();
        assert_eq!(single[0], many[0]);
        assert_eq!(many, vec![(7, 'b'), (7, 'c'), (7, 'd')]);
    }
}
