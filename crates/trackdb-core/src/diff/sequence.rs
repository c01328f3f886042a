//! Longest-common-subsequence alignment of two token sequences.
//!
//! Produces run-length hunks (unchanged / removed / added) like a line-based
//! text diff. Common leading and trailing runs are stripped in whole
//! `stride`-sized blocks first, so a block (one row of cells) is never split
//! between the trimmed and the aligned region. The rest is aligned with
//! Hirschberg's divide and conquer, which keeps memory linear in the input
//! length.
//!
//! The result is mirror-symmetric: aligning `(b, a)` yields the same hunks as
//! `(a, b)` with removed and added exchanged. The lexicographically smaller
//! sequence is always aligned as the first one and the hunks are mirrored
//! back when the arguments came in the other order.

use std::cmp::Ordering;

/// Kind of a hunk.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HunkKind {
    Unchanged,
    /// Present only in the first sequence
    Removed,
    /// Present only in the second sequence
    Added,
}

/// A run of `count` consecutive tokens of the same kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Hunk {
    pub kind: HunkKind,
    pub count: usize,
}

impl Hunk {
    /// The same run seen from the other sequence.
    pub fn mirrored(self) -> Self {
        let kind = match self.kind {
            HunkKind::Removed => HunkKind::Added,
            HunkKind::Added => HunkKind::Removed,
            HunkKind::Unchanged => HunkKind::Unchanged,
        };
        Self { kind, ..self }
    }
}

#[derive(Default)]
struct HunkBuilder {
    hunks: Vec<Hunk>,
}

impl HunkBuilder {
    fn push(&mut self, kind: HunkKind, count: usize) {
        if count == 0 {
            return;
        }
        match self.hunks.last_mut() {
            Some(last) if last.kind == kind => last.count += count,
            _ => self.hunks.push(Hunk { kind, count }),
        }
    }
}

/// Align `a` against `b`.
///
/// Runs in `O(n·m)` time and `O(n + m)` memory over the region left after
/// trimming the common prefix and suffix. `stride` of 0 is treated as 1.
pub fn align<T: Ord>(a: &[T], b: &[T], stride: usize) -> Vec<Hunk> {
    match a.cmp(b) {
        Ordering::Greater => align_ordered(b, a, stride)
            .into_iter()
            .map(Hunk::mirrored)
            .collect(),
        _ => align_ordered(a, b, stride),
    }
}

fn align_ordered<T: Ord>(a: &[T], b: &[T], stride: usize) -> Vec<Hunk> {
    let stride = stride.max(1);

    let prefix = round_down(
        a.iter().zip(b).take_while(|(x, y)| x == y).count(),
        stride,
    );
    let (a_rest, b_rest) = (&a[prefix..], &b[prefix..]);
    let suffix = round_down(
        a_rest
            .iter()
            .rev()
            .zip(b_rest.iter().rev())
            .take_while(|(x, y)| x == y)
            .count(),
        stride,
    );
    let a_mid = &a_rest[..a_rest.len() - suffix];
    let b_mid = &b_rest[..b_rest.len() - suffix];

    let mut out = HunkBuilder::default();
    out.push(HunkKind::Unchanged, prefix);
    align_middle(a_mid, b_mid, &mut out);
    out.push(HunkKind::Unchanged, suffix);
    out.hunks
}

fn round_down(n: usize, stride: usize) -> usize {
    n - n % stride
}

fn align_middle<T: Ord>(a: &[T], b: &[T], out: &mut HunkBuilder) {
    let (n, m) = (a.len(), b.len());
    if n == 0 || m == 0 {
        out.push(HunkKind::Removed, n);
        out.push(HunkKind::Added, m);
        return;
    }
    if n == 1 {
        match b.iter().position(|y| *y == a[0]) {
            Some(j) => {
                out.push(HunkKind::Added, j);
                out.push(HunkKind::Unchanged, 1);
                out.push(HunkKind::Added, m - j - 1);
            }
            None => {
                out.push(HunkKind::Removed, 1);
                out.push(HunkKind::Added, m);
            }
        }
        return;
    }

    let mid = n / 2;
    let head = lcs_lengths(a[..mid].iter(), b.iter());
    let tail = lcs_lengths(a[mid..].iter().rev(), b.iter().rev());
    // Leftmost split of b that keeps the total common length maximal
    let split = (0..=m)
        .max_by(|&x, &y| {
            let (sx, sy) = (head[x] + tail[m - x], head[y] + tail[m - y]);
            sx.cmp(&sy).then(y.cmp(&x))
        })
        .unwrap_or(0);

    align_middle(&a[..mid], &b[..split], out);
    align_middle(&a[mid..], &b[split..], out);
}

/// `lengths[j]` is the LCS length of all of `a` and the first `j` tokens of
/// `b`. Keeps only one row of the table.
fn lcs_lengths<'a, T, A, B>(a: A, b: B) -> Vec<usize>
where
    T: Ord + 'a,
    A: Iterator<Item = &'a T>,
    B: Iterator<Item = &'a T> + Clone,
{
    let m = b.clone().count();
    let mut prev = vec![0usize; m + 1];
    let mut curr = vec![0usize; m + 1];
    for x in a {
        for (j, y) in b.clone().enumerate() {
            curr[j + 1] = if x == y {
                prev[j] + 1
            } else {
                prev[j + 1].max(curr[j])
            };
        }
        std::mem::swap(&mut prev, &mut curr);
    }
    prev
}
