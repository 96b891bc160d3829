/// Scoring for [`smith_waterman_path`]. `Default` is the plain configuration:
/// +1 for equal frames, -1 for a mismatch or a gap.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SmithWatermanOptions {
    pub match_score: i32,
    pub mismatch_penalty: i32,
    pub gap_penalty: i32,
}

impl Default for SmithWatermanOptions {
    fn default() -> Self {
        Self {
            match_score: 1,
            mismatch_penalty: 1,
            gap_penalty: 1,
        }
    }
}

const STOP: u8 = 0;
const DIAG: u8 = 1;
const UP: u8 = 2;
const LEFT: u8 = 3;

/// Best local alignment between `a` and `b`.
///
/// Returns the diagonal steps of the traceback as `(index into a, index into b)`
/// pairs, strictly increasing in both coordinates. Gap steps produce no pair.
/// Ties pick the first maximal cell in row-major order, and during traceback
/// prefer diagonal over up over left, so the result is deterministic.
pub fn smith_waterman_path<T: PartialEq>(
    a: &[T],
    b: &[T],
    options: &SmithWatermanOptions,
) -> Vec<(usize, usize)> {
    let n = a.len();
    let m = b.len();
    if n == 0 || m == 0 {
        return Vec::new();
    }

    // i64 cells hold any sum of i32 options
    let match_score = i64::from(options.match_score);
    let mismatch = -i64::from(options.mismatch_penalty);
    let gap = i64::from(options.gap_penalty);

    let width = m + 1;
    let mut h = vec![0i64; (n + 1) * width];
    let mut bp = vec![STOP; (n + 1) * width];
    let mut best = 0i64;
    let mut best_cell = (0usize, 0usize);

    for i in 1..=n {
        for j in 1..=m {
            let substitution = if a[i - 1] == b[j - 1] {
                match_score
            } else {
                mismatch
            };
            let diag = h[(i - 1) * width + (j - 1)].saturating_add(substitution);
            let up = h[(i - 1) * width + j].saturating_sub(gap);
            let left = h[i * width + (j - 1)].saturating_sub(gap);

            let (mut score, mut step) = (0, STOP);
            if diag > score {
                score = diag;
                step = DIAG;
            }
            if up > score {
                score = up;
                step = UP;
            }
            if left > score {
                score = left;
                step = LEFT;
            }

            h[i * width + j] = score;
            bp[i * width + j] = step;
            if score > best {
                best = score;
                best_cell = (i, j);
            }
        }
    }

    let (mut i, mut j) = best_cell;
    let mut path = Vec::with_capacity(n.min(m));
    while i > 0 && j > 0 && h[i * width + j] > 0 {
        match bp[i * width + j] {
            DIAG => {
                path.push((i - 1, j - 1));
                i -= 1;
                j -= 1;
            }
            UP => i -= 1,
            LEFT => j -= 1,
            _ => break,
        }
    }
    path.reverse();
    path
}
