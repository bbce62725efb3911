//! Sort interpreters
//!
//! Each sort runs over a private copy of the initial array and records one
//! event per comparison, exchange and finalised position. Operands are
//! positions, never values.

use super::validate::Algorithm;
use crate::trace::{Action, TraceBuilder};

pub fn generate(algorithm: Algorithm, array: &[i64], out: &mut TraceBuilder) {
    let mut work = array.to_vec();
    match algorithm {
        Algorithm::Bubble => bubble(&mut work, out),
        Algorithm::Insertion => insertion(&mut work, out),
        Algorithm::Selection => selection(&mut work, out),
        Algorithm::Merge => merge(&mut work, out),
        Algorithm::Quick => quick(&mut work, out),
    }
}

fn pos(i: usize) -> i64 {
    i as i64
}

fn bubble(a: &mut [i64], out: &mut TraceBuilder) {
    let n = a.len();
    for pass in 0..n.saturating_sub(1) {
        for i in 0..n - pass - 1 {
            let pair = [pos(i), pos(i + 1)];
            out.emit(Action::Compare, &pair);
            if a[i] > a[i + 1] {
                out.emit(Action::Swap, &pair);
                a.swap(i, i + 1);
            } else {
                out.emit(Action::NoSwap, &pair);
            }
        }
        out.emit(Action::MarkSorted, &[pos(n - pass - 1)]);
    }
}

fn insertion(a: &mut [i64], out: &mut TraceBuilder) {
    for i in 1..a.len() {
        // Marks the key against its left neighbour before shifting.
        out.emit(Action::Compare, &[pos(i), pos(i - 1)]);
        let mut j = i;
        while j > 0 && a[j - 1] > a[j] {
            let pair = [pos(j - 1), pos(j)];
            out.emit(Action::Compare, &pair);
            out.emit(Action::Swap, &pair);
            a.swap(j - 1, j);
            j -= 1;
        }
        out.emit(Action::MarkSorted, &[pos(i)]);
    }
}

fn selection(a: &mut [i64], out: &mut TraceBuilder) {
    let n = a.len();
    for i in 0..n.saturating_sub(1) {
        let mut min = i;
        for j in i + 1..n {
            let pair = [pos(min), pos(j)];
            out.emit(Action::Compare, &pair);
            // Same tag whether or not the minimum moves.
            out.emit(Action::NoSwap, &pair);
            if a[j] < a[min] {
                min = j;
            }
        }
        if min != i {
            out.emit(Action::Swap, &[pos(i), pos(min)]);
            a.swap(i, min);
        }
        out.emit(Action::MarkSorted, &[pos(i)]);
    }
}

/// Bottom-up merge sort. `swap` means the right run's element was taken and
/// `no_swap` the left run's; neither is a physical exchange of the two slots.
fn merge(a: &mut [i64], out: &mut TraceBuilder) {
    let n = a.len();
    let mut width = 1;
    while width < n {
        let mut left = 0;
        while left + width < n {
            let mid = left + width - 1;
            let right = (left + 2 * width - 1).min(n - 1);

            let mut merged = Vec::with_capacity(right - left + 1);
            let (mut i, mut j) = (left, mid + 1);
            while i <= mid && j <= right {
                let pair = [pos(i), pos(j)];
                out.emit(Action::Compare, &pair);
                if a[i] <= a[j] {
                    merged.push(a[i]);
                    i += 1;
                    out.emit(Action::NoSwap, &pair);
                } else {
                    merged.push(a[j]);
                    j += 1;
                    out.emit(Action::Swap, &pair);
                }
            }
            merged.extend_from_slice(&a[i..=mid]);
            merged.extend_from_slice(&a[j..=right]);
            a[left..=right].copy_from_slice(&merged);

            left += 2 * width;
        }
        width *= 2;
    }
}

/// Iterative quick sort with the last element of each range as pivot.
fn quick(a: &mut [i64], out: &mut TraceBuilder) {
    if a.len() < 2 {
        return;
    }
    let mut ranges = vec![(0usize, a.len() - 1)];
    while let Some((low, high)) = ranges.pop() {
        if low >= high {
            continue;
        }
        let pivot = a[high];
        out.emit(Action::Compare, &[pos(high)]);

        let mut store = low;
        for j in low..high {
            out.emit(Action::Compare, &[pos(j), pos(high)]);
            if a[j] < pivot {
                if store != j {
                    out.emit(Action::Swap, &[pos(store), pos(j)]);
                    a.swap(store, j);
                } else {
                    out.emit(Action::NoSwap, &[pos(j), pos(high)]);
                }
                store += 1;
            } else {
                out.emit(Action::NoSwap, &[pos(j), pos(high)]);
            }
        }

        // Emitted even when store == high.
        out.emit(Action::Swap, &[pos(store), pos(high)]);
        a.swap(store, high);
        out.emit(Action::MarkSorted, &[pos(store)]);

        if store + 1 < high {
            ranges.push((store + 1, high));
        }
        if low + 1 < store {
            ranges.push((low, store - 1));
        }
    }
}
