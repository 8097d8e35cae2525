use std::ptr;

use crate::{Precedence, SortError};

/// Ranges of at most this many elements are handed to binary-insertion sort
/// instead of being partitioned further.
const SMALL_RANGE_MAX: usize = 10;

/// Type-erased precedence function over raw element addresses.
pub type PrecedesRaw<'a> = dyn FnMut(*const u8, *const u8) -> Precedence + 'a;

/// Sorts elements `[left, right]` of a raw buffer of `stride`-byte elements.
///
/// The buffer contents are never interpreted: every comparison goes through
/// `precedes` and every element move is a raw `stride`-byte copy. No element
/// outside `[left, right]` is read or written.
///
/// Fails with [`SortError::NullBuffer`] before any dereference when `buf` is
/// null, with [`SortError::InvertedRange`] when `right < left`, and with
/// [`SortError::AllocationFailed`] when a merge scratch buffer or insertion
/// key slot cannot be allocated. On failure the buffer is unchanged.
///
/// # Safety
///
/// `buf` must either be null or point to a buffer valid for reads and writes
/// covering elements `left..=right` at the given stride, and `precedes` must
/// only be handed addresses derived from that buffer (which this function
/// guarantees). The element region must not be accessed through any other
/// reference for the duration of the call.
pub unsafe fn sort_raw(
    buf: *mut u8,
    stride: usize,
    left: usize,
    right: usize,
    precedes: &mut PrecedesRaw<'_>,
) -> Result<(), SortError> {
    if buf.is_null() {
        return Err(SortError::NullBuffer);
    }
    if right < left {
        return Err(SortError::InvertedRange { left, right });
    }
    unsafe { sort_range(buf, stride, left, right, precedes) }
}

unsafe fn sort_range(
    buf: *mut u8,
    stride: usize,
    left: usize,
    right: usize,
    precedes: &mut PrecedesRaw<'_>,
) -> Result<(), SortError> {
    if left < right {
        let mid = (left + right) / 2;

        if right - left + 1 <= SMALL_RANGE_MAX {
            unsafe { binary_insertion_sort(buf, stride, left, right, precedes)? };
        } else {
            unsafe {
                sort_range(buf, stride, left, mid, precedes)?;
                sort_range(buf, stride, mid + 1, right, precedes)?;
            }
        }

        // Runs unconditionally, also after the insertion-sort leaf: a sorted
        // range split at any point is still a pair of sorted runs, so the
        // merge keeps the contract on both paths.
        unsafe { merge(buf, stride, left, mid, right, precedes)? };
    }
    Ok(())
}

/// Merges the adjacent sorted runs `[left, mid]` and `[mid + 1, right]`
/// through a scratch buffer of exactly the merged range's size.
unsafe fn merge(
    buf: *mut u8,
    stride: usize,
    left: usize,
    mid: usize,
    right: usize,
    precedes: &mut PrecedesRaw<'_>,
) -> Result<(), SortError> {
    let len = right - left + 1;
    let mut scratch = alloc_bytes(len * stride)?;
    let out = scratch.as_mut_ptr();

    let mut i = left;
    let mut j = mid + 1;
    let mut k = 0_usize;

    unsafe {
        while i <= mid && j <= right {
            let lhs = buf.add(i * stride);
            let rhs = buf.add(j * stride);
            let slot = out.add(k * stride);

            if precedes(lhs, rhs) == Precedence::SecondHigher {
                ptr::copy(lhs, slot, stride);
                i += 1;
            } else {
                // On ties the right run is drained first.
                ptr::copy(rhs, slot, stride);
                j += 1;
            }
            k += 1;
        }

        while i <= mid {
            ptr::copy(buf.add(i * stride), out.add(k * stride), stride);
            i += 1;
            k += 1;
        }
        while j <= right {
            ptr::copy(buf.add(j * stride), out.add(k * stride), stride);
            j += 1;
            k += 1;
        }

        ptr::copy(out, buf.add(left * stride), len * stride);
    }
    Ok(())
}

/// Sorts `[left, right]` by repeated binary-search insertion; requires
/// `left < right`.
unsafe fn binary_insertion_sort(
    buf: *mut u8,
    stride: usize,
    left: usize,
    right: usize,
    precedes: &mut PrecedesRaw<'_>,
) -> Result<(), SortError> {
    let mut key = alloc_bytes(stride)?;
    let tmp = key.as_mut_ptr();

    for i in (left + 1)..=right {
        unsafe {
            let pos = binary_search(buf.add(i * stride), buf, stride, left, i - 1, precedes);

            ptr::copy(buf.add(i * stride), tmp, stride);
            // Open the insertion slot with one overlapping move of
            // [pos, i - 1] up to [pos + 1, i].
            ptr::copy(
                buf.add(pos * stride),
                buf.add((pos + 1) * stride),
                (i - pos) * stride,
            );
            ptr::copy(tmp, buf.add(pos * stride), stride);
        }
    }
    Ok(())
}

/// Returns the index in the sorted run `[left, right]` at which `key` must be
/// inserted. Biased: a key equal to an existing element lands immediately
/// after it, so keys processed left to right keep their arrival order among
/// equals.
unsafe fn binary_search(
    key: *const u8,
    buf: *mut u8,
    stride: usize,
    left: usize,
    right: usize,
    precedes: &mut PrecedesRaw<'_>,
) -> usize {
    if right <= left {
        let probe = unsafe { buf.add(left * stride) };
        // Equal also goes after the probe here.
        return match precedes(key, probe) {
            Precedence::SecondHigher => left,
            _ => left + 1,
        };
    }

    let mid = (left + right) / 2;
    let probe = unsafe { buf.add(mid * stride) };

    match precedes(key, probe) {
        Precedence::Equal => mid + 1,
        Precedence::FirstHigher => unsafe {
            binary_search(key, buf, stride, mid + 1, right, precedes)
        },
        Precedence::SecondHigher => unsafe {
            binary_search(key, buf, stride, left, mid, precedes)
        },
    }
}

/// Scratch allocation that reports failure instead of aborting. The returned
/// `Vec` is only ever written through its raw pointer, within capacity.
fn alloc_bytes(bytes: usize) -> Result<Vec<u8>, SortError> {
    let mut scratch = Vec::new();
    scratch
        .try_reserve_exact(bytes)
        .map_err(|_| SortError::AllocationFailed { bytes })?;
    Ok(scratch)
}
