//! Stable sorting that tolerates inconsistent comparators.
//!
//! The visual ordering used throughout this crate is not a total order
//! (see [`ill_defined_cmp`]), and the standard library sorts are allowed to
//! detect and reject comparators that violate the total-order contract. This
//! plain merge sort keeps whatever order the comparator implies locally and
//! never inspects it for consistency.
//!
//! [`ill_defined_cmp`]: super::ill_defined_cmp

use std::cmp::Ordering;

/// Stable merge sort by an arbitrary comparator.
pub fn stable_sort_by<T: Clone, F>(items: &mut [T], mut cmp: F)
where
    F: FnMut(&T, &T) -> Ordering,
{
    let len = items.len();
    if len < 2 {
        return;
    }
    let mut buf: Vec<T> = items.to_vec();
    let mut width = 1;
    while width < len {
        let mut start = 0;
        while start < len {
            let mid = (start + width).min(len);
            let end = (start + 2 * width).min(len);
            merge(&items[start..mid], &items[mid..end], &mut buf[start..end], &mut cmp);
            start = end;
        }
        items.clone_from_slice(&buf);
        width *= 2;
    }
}

fn merge<T: Clone, F>(left: &[T], right: &[T], out: &mut [T], cmp: &mut F)
where
    F: FnMut(&T, &T) -> Ordering,
{
    let (mut i, mut j, mut k) = (0, 0, 0);
    while i < left.len() && j < right.len() {
        if cmp(&right[j], &left[i]) == Ordering::Less {
            out[k] = right[j].clone();
            j += 1;
        } else {
            out[k] = left[i].clone();
            i += 1;
        }
        k += 1;
    }
    while i < left.len() {
        out[k] = left[i].clone();
        i += 1;
        k += 1;
    }
    while j < right.len() {
        out[k] = right[j].clone();
        j += 1;
        k += 1;
    }
}
