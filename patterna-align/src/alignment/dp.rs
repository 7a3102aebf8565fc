//! Global alignment dynamic program shared by the pairwise and profile aligners
//!
//! Both sides are indexed from -1 (the empty prefix) to `len - 1`; internally
//! that is shifted by one so cell `(i + 1, j + 1)` holds prefix `(i, j)`.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Objective {
    Maximize,
    Minimize,
}

impl Objective {
    fn improves(self, candidate: i64, current: i64) -> bool {
        match self {
            Objective::Maximize => candidate > current,
            Objective::Minimize => candidate < current,
        }
    }
}

/// One column of the finished alignment
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    /// Row item `i` and column item `j` share the column
    Both(usize, usize),
    /// Row item against a gap on the column side
    RowOnly(usize),
    /// Column item against a gap on the row side
    ColOnly(usize),
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum Traceback {
    Diagonal,
    Up,
    Left,
    None,
}

/// Cost model for one run of the program
pub trait DpModel {
    /// Score of the empty-versus-empty prefix
    fn origin(&self) -> i64;

    /// Score of row items `0..=i` against nothing
    fn row_boundary(&self, i: usize) -> i64;

    /// Score of column items `0..=j` against nothing
    fn col_boundary(&self, j: usize) -> i64;

    fn diagonal(&self, i: usize, j: usize) -> i64;

    /// Added when either side takes a gap
    fn gap(&self) -> i64;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DpPath {
    pub steps: Vec<Step>,
    pub score: i64,
}

impl DpPath {
    /// Result positions where the row side holds a gap
    pub fn row_gaps(&self) -> Vec<usize> {
        self.steps
            .iter()
            .enumerate()
            .filter(|(_, s)| matches!(s, Step::ColOnly(_)))
            .map(|(k, _)| k)
            .collect()
    }

    /// Result positions where the column side holds a gap
    pub fn col_gaps(&self) -> Vec<usize> {
        self.steps
            .iter()
            .enumerate()
            .filter(|(_, s)| matches!(s, Step::RowOnly(_)))
            .map(|(k, _)| k)
            .collect()
    }
}

/// Fill the score table and trace the optimal path back from the last cell.
///
/// Ties prefer the diagonal, then consuming a row item alone, then consuming
/// a column item alone.
pub fn global_path<M: DpModel>(model: &M, rows: usize, cols: usize, objective: Objective) -> DpPath {
    let mut score = vec![vec![0i64; cols + 1]; rows + 1];
    let mut traceback = vec![vec![Traceback::None; cols + 1]; rows + 1];

    score[0][0] = model.origin();
    for i in 0..rows {
        score[i + 1][0] = model.row_boundary(i);
        traceback[i + 1][0] = Traceback::Up;
    }
    for j in 0..cols {
        score[0][j + 1] = model.col_boundary(j);
        traceback[0][j + 1] = Traceback::Left;
    }

    let gap = model.gap();
    for i in 1..=rows {
        for j in 1..=cols {
            let mut best = score[i - 1][j - 1] + model.diagonal(i - 1, j - 1);
            let mut direction = Traceback::Diagonal;

            let up = score[i - 1][j] + gap;
            if objective.improves(up, best) {
                best = up;
                direction = Traceback::Up;
            }

            let left = score[i][j - 1] + gap;
            if objective.improves(left, best) {
                best = left;
                direction = Traceback::Left;
            }

            score[i][j] = best;
            traceback[i][j] = direction;
        }
    }

    let steps = trace(&traceback, rows, cols);
    DpPath {
        steps,
        score: score[rows][cols],
    }
}

fn trace(traceback: &[Vec<Traceback>], rows: usize, cols: usize) -> Vec<Step> {
    let mut steps = Vec::with_capacity(rows + cols);
    let (mut i, mut j) = (rows, cols);

    while i > 0 && j > 0 {
        match traceback[i][j] {
            Traceback::Diagonal => {
                steps.push(Step::Both(i - 1, j - 1));
                i -= 1;
                j -= 1;
            }
            Traceback::Up => {
                steps.push(Step::RowOnly(i - 1));
                i -= 1;
            }
            Traceback::Left | Traceback::None => {
                steps.push(Step::ColOnly(j - 1));
                j -= 1;
            }
        }
    }

    // leftover prefix of whichever side is not exhausted
    while i > 0 {
        steps.push(Step::RowOnly(i - 1));
        i -= 1;
    }
    while j > 0 {
        steps.push(Step::ColOnly(j - 1));
        j -= 1;
    }

    steps.reverse();
    steps
}
