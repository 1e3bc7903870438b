//! linear time intersection of two sorted coordinate arrays

use num_traits::Float;

/// Merge two ascending sequences, keeping only the points of either sequence that
/// fall inside the overlap of their ranges.
///
/// The output is ascending and free of duplicates. Two candidates are considered
/// duplicates only if they compare exactly equal; see [`intersect_with_tolerance`]
/// for merging points that differ by round-off.
///
/// ```
/// let out = eosgrid::intersect(&[1., 2., 3., 4., 5.], &[3.5, 4.5, 5.5, 6.]);
/// assert_eq!(out, vec![3.5, 4., 4.5, 5.]);
///
/// assert!(eosgrid::intersect(&[1., 2., 3.], &[10., 11., 12.]).is_empty());
/// ```
pub fn intersect<T: Float>(a: &[T], b: &[T]) -> Vec<T> {
    intersect_with_tolerance(a, b, T::zero())
}

/// Same as [`intersect`], but a candidate is also dropped when it lies within
/// `rel_tol * max(|x|, |last|)` of the most recently emitted value.
///
/// A `rel_tol` of zero gives exact-equality deduplication.
pub fn intersect_with_tolerance<T: Float>(a: &[T], b: &[T], rel_tol: T) -> Vec<T> {
    let (a_first, a_last, b_first, b_last) = match (a.first(), a.last(), b.first(), b.last()) {
        (Some(a0), Some(a1), Some(b0), Some(b1)) => (*a0, *a1, *b0, *b1),
        _ => return Vec::new(),
    };

    let lo = a_first.max(b_first);
    let hi = a_last.min(b_last);

    if lo > hi {
        return Vec::new();
    }

    let mut out: Vec<T> = Vec::with_capacity(a.len() + b.len());
    let (mut i, mut j) = (0, 0);

    while i < a.len() || j < b.len() {
        let take_a = match (a.get(i), b.get(j)) {
            (Some(x), Some(y)) => x <= y,
            (Some(_), None) => true,
            _ => false,
        };

        let candidate = if take_a {
            i += 1;
            a[i - 1]
        } else {
            j += 1;
            b[j - 1]
        };

        if candidate < lo {
            continue;
        }
        // both inputs are sorted, nothing after this can be inside the overlap
        if candidate > hi {
            break;
        }

        match out.last() {
            Some(&last) if is_duplicate(candidate, last, rel_tol) => {}
            _ => out.push(candidate),
        }
    }

    out
}

/// Left fold of [`intersect`] over any number of axes.
///
/// Returns an empty vector when the iterator is empty.
pub fn intersect_all<'a, T, I>(axes: I) -> Vec<T>
where
    T: Float + 'a,
    I: IntoIterator<Item = &'a [T]>,
{
    let mut iter = axes.into_iter();

    let first = match iter.next() {
        Some(first) => first.to_vec(),
        None => return Vec::new(),
    };

    iter.fold(first, |acc, next| intersect(&acc, next))
}

fn is_duplicate<T: Float>(candidate: T, last: T, rel_tol: T) -> bool {
    if candidate == last {
        return true;
    }

    rel_tol > T::zero() && (candidate - last).abs() <= rel_tol * candidate.abs().max(last.abs())
}
