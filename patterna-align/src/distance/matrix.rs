//! Symmetric pairwise distance matrix over a set of rows
use itertools::Itertools;
use patterna_core::{PatternaError, PatternaResult};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::ops::Index;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DistanceMatrix {
    size: usize,
    values: Vec<f64>,
}

impl DistanceMatrix {
    /// All-zero matrix for `size` rows
    pub fn zeros(size: usize) -> Self {
        Self {
            size,
            values: vec![0.0; size * size],
        }
    }

    /// Fill the matrix from a pairwise function evaluated once per unordered pair.
    ///
    /// With `parallel` set, cells are computed on the rayon pool; each cell is
    /// written exactly once, so the result is identical to the sequential path.
    pub fn from_fn<F>(size: usize, parallel: bool, distance: F) -> Self
    where
        F: Fn(usize, usize) -> f64 + Sync,
    {
        let pairs: Vec<(usize, usize)> = (0..size).tuple_combinations().collect();

        let cells: Vec<(usize, usize, f64)> = if parallel {
            pairs
                .par_iter()
                .map(|&(i, j)| (i, j, distance(i, j)))
                .collect()
        } else {
            pairs
                .iter()
                .map(|&(i, j)| (i, j, distance(i, j)))
                .collect()
        };

        let mut matrix = Self::zeros(size);
        for (i, j, d) in cells {
            matrix.values[i * size + j] = d;
            matrix.values[j * size + i] = d;
        }
        matrix
    }

    /// Build from explicit rows, checking shape, symmetry and sign
    pub fn from_rows(rows: Vec<Vec<f64>>) -> PatternaResult<Self> {
        let size = rows.len();
        if let Some(bad) = rows.iter().position(|r| r.len() != size) {
            return Err(PatternaError::invalid_input(format!(
                "distance matrix row {} has {} columns, expected {}",
                bad,
                rows[bad].len(),
                size
            )));
        }

        let values: Vec<f64> = rows.into_iter().flatten().collect();
        let matrix = Self { size, values };

        for i in 0..size {
            if matrix.get(i, i) != 0.0 {
                return Err(PatternaError::invalid_input(format!(
                    "distance matrix diagonal at {} is {}, expected 0",
                    i,
                    matrix.get(i, i)
                )));
            }
            for j in (i + 1)..size {
                let d = matrix.get(i, j);
                if d.is_nan() || d < 0.0 {
                    return Err(PatternaError::invalid_input(format!(
                        "distance ({}, {}) must be non-negative, got {}",
                        i, j, d
                    )));
                }
                if (d - matrix.get(j, i)).abs() > 1e-12 {
                    return Err(PatternaError::invalid_input(format!(
                        "distance matrix is not symmetric at ({}, {})",
                        i, j
                    )));
                }
            }
        }

        Ok(matrix)
    }

    pub fn size(&self) -> usize {
        self.size
    }

    pub fn is_empty(&self) -> bool {
        self.size == 0
    }

    pub fn get(&self, i: usize, j: usize) -> f64 {
        self.values[i * self.size + j]
    }

    pub fn row(&self, i: usize) -> &[f64] {
        &self.values[i * self.size..(i + 1) * self.size]
    }

    /// Indices whose distance to `i` is at most `radius`, `i` included, ascending
    pub fn neighbors_within(&self, i: usize, radius: f64) -> Vec<usize> {
        self.row(i)
            .iter()
            .enumerate()
            .filter(|(_, &d)| d <= radius)
            .map(|(j, _)| j)
            .collect()
    }
}

impl Index<(usize, usize)> for DistanceMatrix {
    type Output = f64;

    fn index(&self, (i, j): (usize, usize)) -> &f64 {
        &self.values[i * self.size + j]
    }
}
