mod raw;

pub use raw::{PrecedesRaw, sort_raw};

use std::cmp::Ordering;
use std::error::Error;
use std::fmt;

/// Result of a precedence function applied to two elements.
///
/// The discriminants match the wire encoding used by raw callers:
/// `0` second outranks first, `1` first outranks second, `2` equal.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum Precedence {
    SecondHigher = 0,
    FirstHigher = 1,
    Equal = 2,
}

impl Precedence {
    /// Ascending convention: the first element outranks the second exactly
    /// when it compares `Greater`, so larger values end up last.
    #[inline]
    pub fn ascending(ord: Ordering) -> Self {
        match ord {
            Ordering::Greater => Self::FirstHigher,
            Ordering::Equal => Self::Equal,
            Ordering::Less => Self::SecondHigher,
        }
    }

    #[inline]
    pub fn descending(ord: Ordering) -> Self {
        Self::ascending(ord.reverse())
    }
}

/// Argument and allocation failures surfaced by the sort.
///
/// All of these are detected before any element is moved, so on failure the
/// buffer is unchanged.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum SortError {
    /// The raw buffer pointer was null.
    NullBuffer,
    /// `right < left`.
    InvertedRange { left: usize, right: usize },
    /// `right` does not index into the supplied slice.
    RangeOutOfBounds { right: usize, len: usize },
    /// A scratch or key buffer could not be allocated.
    AllocationFailed { bytes: usize },
}

impl fmt::Display for SortError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Self::NullBuffer => write!(f, "buffer reference cannot be null"),
            Self::InvertedRange { left, right } => {
                write!(f, "right ({right}) must be greater or equal to left ({left})")
            }
            Self::RangeOutOfBounds { right, len } => {
                write!(f, "right ({right}) is out of bounds for a buffer of {len} elements")
            }
            Self::AllocationFailed { bytes } => {
                write!(f, "unable to allocate {bytes} bytes of scratch memory")
            }
        }
    }
}

impl Error for SortError {}

/// Sorts `data[left..=right]` in place into ascending rank order as defined
/// by `precedes`.
///
/// Hybrid merge sort: ranges are split recursively at their midpoint and
/// merged back; ranges of at most 10 elements are handled by binary-insertion
/// sort. Among equal elements the relative output order follows the merge and
/// insertion tie-break rules, not the input order.
///
/// `T: Copy` because elements are moved as raw byte blocks through the
/// type-erased engine ([`sort_raw`]).
pub fn sort_by<T, F>(
    data: &mut [T],
    left: usize,
    right: usize,
    mut precedes: F,
) -> Result<(), SortError>
where
    T: Copy,
    F: FnMut(&T, &T) -> Precedence,
{
    if right >= data.len() {
        return Err(SortError::RangeOutOfBounds {
            right,
            len: data.len(),
        });
    }

    // SAFETY: the range is in bounds, the pointer comes from a live slice,
    // and the adapter only ever sees addresses of elements of that slice.
    unsafe {
        raw::sort_raw(
            data.as_mut_ptr().cast::<u8>(),
            size_of::<T>(),
            left,
            right,
            &mut |a, b| precedes(&*a.cast::<T>(), &*b.cast::<T>()),
        )
    }
}

#[cfg(test)]
mod tests {
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    use super::*;

    fn precedes_i32(a: &i32, b: &i32) -> Precedence {
        Precedence::ascending(a.cmp(b))
    }

    fn precedes_f64(a: &f64, b: &f64) -> Precedence {
        if a == b {
            Precedence::Equal
        } else if a > b {
            Precedence::FirstHigher
        } else {
            Precedence::SecondHigher
        }
    }

    fn precedes_str(a: &&str, b: &&str) -> Precedence {
        Precedence::ascending(a.cmp(b))
    }

    fn sorted_i32(mut data: Vec<i32>) -> Vec<i32> {
        let right = data.len() - 1;
        sort_by(&mut data, 0, right, precedes_i32).unwrap();
        data
    }

    #[test]
    fn int_arrays() {
        assert_eq!(sorted_i32(vec![0, -12, -12]), vec![-12, -12, 0]);
        assert_eq!(sorted_i32(vec![-12, -12, -12]), vec![-12, -12, -12]);
        assert_eq!(sorted_i32(vec![4, 0, -12]), vec![-12, 0, 4]);
        assert_eq!(sorted_i32(vec![-12, 0, 4]), vec![-12, 0, 4]);
        assert_eq!(sorted_i32(vec![4, -12, 0]), vec![-12, 0, 4]);
        assert_eq!(
            sorted_i32(vec![413, 4, 0, 10, -12, -123]),
            vec![-123, -12, 0, 4, 10, 413]
        );
    }

    #[test]
    fn single_element_is_noop() {
        let mut data = vec![7];
        sort_by(&mut data, 0, 0, precedes_i32).unwrap();
        assert_eq!(data, vec![7]);
    }

    #[test]
    fn string_arrays() {
        let cases: [[&str; 3]; 5] = [
            ["cbaz", "abba", "balp"],
            ["cbaz", "abba", "abba"],
            ["abba", "abba", "abba"],
            ["cbaz", "balp", "abba"],
            ["abba", "balp", "cbaz"],
        ];
        for case in cases {
            let mut data = case.to_vec();
            let mut expected = case.to_vec();
            expected.sort_unstable();
            sort_by(&mut data, 0, 2, precedes_str).unwrap();
            assert_eq!(data, expected, "input={case:?}");
        }
    }

    #[test]
    fn empty_string_sorts_first() {
        let mut data = vec!["", "abba", "balp"];
        sort_by(&mut data, 0, 2, precedes_str).unwrap();
        assert_eq!(data, vec!["", "abba", "balp"]);

        let mut data = vec!["abba", "balp", ""];
        sort_by(&mut data, 0, 2, precedes_str).unwrap();
        assert_eq!(data, vec!["", "abba", "balp"]);
    }

    #[test]
    fn double_arrays() {
        let cases: [[f64; 3]; 5] = [
            [0.0001, -48.4, -48.4],
            [-48.4, -48.4, -48.4],
            [1.123, 0.0001, -48.4],
            [-48.4, 0.0001, 1.123],
            [1.123, -48.4, 0.0001],
        ];
        for case in cases {
            let mut data = case.to_vec();
            let mut expected = case.to_vec();
            expected.sort_unstable_by(|a, b| a.partial_cmp(b).unwrap());
            sort_by(&mut data, 0, 2, precedes_f64).unwrap();
            assert_eq!(data, expected, "input={case:?}");
        }
    }

    #[test]
    fn descending_comparator() {
        let mut data = vec![413, 4, 0, 10, -12, -123];
        sort_by(&mut data, 0, 5, |a: &i32, b: &i32| {
            Precedence::descending(a.cmp(b))
        })
        .unwrap();
        assert_eq!(data, vec![413, 10, 4, 0, -12, -123]);
    }

    #[test]
    fn equal_keys_permute_by_tie_break_rules() {
        // (key, id) pairs under a key-only comparator: the id permutation
        // pins the equal-key behavior of both stages. The merge drains the
        // right run on ties while insertion places a key right after the
        // first equal match it probes, so the order among equals is fixed
        // but is not the input order.
        let by_key = |a: &(u32, usize), b: &(u32, usize)| Precedence::ascending(a.0.cmp(&b.0));

        let mut all_equal: Vec<(u32, usize)> = (0..6).map(|id| (7, id)).collect();
        sort_by(&mut all_equal, 0, 5, by_key).unwrap();
        let ids: Vec<usize> = all_equal.iter().map(|&(_, id)| id).collect();
        assert_eq!(ids, vec![5, 3, 1, 0, 2, 4]);

        let mut alternating: Vec<(u32, usize)> = [1, 0, 1, 0, 1, 0]
            .iter()
            .enumerate()
            .map(|(id, &key)| (key, id))
            .collect();
        sort_by(&mut alternating, 0, 5, by_key).unwrap();
        let ids: Vec<usize> = alternating.iter().map(|&(_, id)| id).collect();
        assert_eq!(ids, vec![1, 3, 5, 0, 4, 2]);

        // Above the partition threshold the same rules compose across the
        // recursive merges.
        let mut twelve: Vec<(u32, usize)> = (0..12).map(|id| (7, id)).collect();
        sort_by(&mut twelve, 0, 11, by_key).unwrap();
        let ids: Vec<usize> = twelve.iter().map(|&(_, id)| id).collect();
        assert_eq!(ids, vec![11, 9, 7, 6, 8, 10, 5, 3, 1, 0, 2, 4]);
    }

    #[test]
    fn partial_range_leaves_rest_untouched() {
        let mut data = vec![9, 5, 3, 8, 1, 7];
        sort_by(&mut data, 1, 4, precedes_i32).unwrap();
        assert_eq!(data, vec![9, 1, 3, 5, 8, 7]);
    }

    #[test]
    fn inverted_range_is_rejected() {
        let mut data = vec![3, 2, 1];
        assert_eq!(
            sort_by(&mut data, 2, 1, precedes_i32),
            Err(SortError::InvertedRange { left: 2, right: 1 })
        );
        assert_eq!(data, vec![3, 2, 1]);
    }

    #[test]
    fn out_of_bounds_range_is_rejected() {
        let mut data = vec![3, 2, 1];
        assert_eq!(
            sort_by(&mut data, 0, 3, precedes_i32),
            Err(SortError::RangeOutOfBounds { right: 3, len: 3 })
        );

        let mut empty: Vec<i32> = Vec::new();
        assert_eq!(
            sort_by(&mut empty, 0, 0, precedes_i32),
            Err(SortError::RangeOutOfBounds { right: 0, len: 0 })
        );
    }

    #[test]
    fn null_buffer_is_rejected() {
        let mut precedes = |_: *const u8, _: *const u8| Precedence::Equal;
        let result = unsafe { sort_raw(std::ptr::null_mut(), 0, 0, 0, &mut precedes) };
        assert_eq!(result, Err(SortError::NullBuffer));
    }

    #[test]
    fn raw_stride_over_u32_bytes() {
        let mut data: [u32; 5] = [5, 1, 4, 2, 3];
        let mut precedes = |a: *const u8, b: *const u8| {
            // SAFETY: the engine only hands back in-range element addresses.
            let (a, b) = unsafe { (a.cast::<u32>().read(), b.cast::<u32>().read()) };
            Precedence::ascending(a.cmp(&b))
        };
        unsafe {
            sort_raw(
                data.as_mut_ptr().cast::<u8>(),
                size_of::<u32>(),
                0,
                4,
                &mut precedes,
            )
            .unwrap();
        }
        assert_eq!(data, [1, 2, 3, 4, 5]);
    }

    #[test]
    fn matches_std_sort_across_threshold_sizes() {
        let mut rng = StdRng::seed_from_u64(0x5EED_2026);
        for &size in &[2_usize, 3, 9, 10, 11, 21, 64, 127, 1000] {
            let data: Vec<i64> = (0..size).map(|_| rng.random_range(-500..500)).collect();

            let mut actual = data.clone();
            sort_by(&mut actual, 0, size - 1, |a, b| Precedence::ascending(a.cmp(b))).unwrap();

            let mut expected = data;
            expected.sort_unstable();
            assert_eq!(actual, expected, "size={size}");
        }
    }

    #[test]
    fn duplicate_heavy_input_keeps_multiset() {
        let mut rng = StdRng::seed_from_u64(0xD0D1_2026);
        for &size in &[16_usize, 100, 512] {
            let data: Vec<u64> = (0..size).map(|_| (rng.random::<u64>() % 8) * 13).collect();

            let mut actual = data.clone();
            sort_by(&mut actual, 0, size - 1, |a, b| Precedence::ascending(a.cmp(b))).unwrap();

            let mut expected = data;
            expected.sort_unstable();
            assert_eq!(actual, expected, "size={size}");
        }
    }

    #[test]
    fn sorting_sorted_input_is_idempotent() {
        let mut rng = StdRng::seed_from_u64(0x1D3_2026);
        let mut data: Vec<i32> = (0..200).map(|_| rng.random_range(-50..50)).collect();
        data.sort_unstable();

        let expected = data.clone();
        sort_by(&mut data, 0, 199, precedes_i32).unwrap();
        assert_eq!(data, expected);
    }
}
