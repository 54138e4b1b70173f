// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Minimum-cost assignment for rectangular cost matrices.
//!
//! O(n³) Hungarian algorithm with dual potentials. The matcher feeds it
//! `1 - IOU` costs, so the minimum-cost assignment is the maximum-IOU
//! pairing over all shapes at once rather than a greedy nearest match.

/// Solve the assignment problem for a `rows x cols` cost matrix.
///
/// Returns, for each row, the column it was assigned to. When `rows > cols`
/// the surplus rows are left unassigned. An empty matrix yields an empty
/// assignment.
pub fn solve(cost: &[Vec<f64>]) -> Vec<Option<usize>> {
    let rows = cost.len();
    let cols = if rows > 0 { cost[0].len() } else { 0 };
    if rows == 0 || cols == 0 {
        return vec![None; rows];
    }

    if rows > cols {
        // The core loop requires rows <= cols; transpose and invert.
        let transposed: Vec<Vec<f64>> = (0..cols)
            .map(|j| (0..rows).map(|i| cost[i][j]).collect())
            .collect();
        let by_col = solve(&transposed);
        let mut by_row = vec![None; rows];
        for (j, assigned) in by_col.into_iter().enumerate() {
            if let Some(i) = assigned {
                by_row[i] = Some(j);
            }
        }
        return by_row;
    }

    // Dual potentials, 1-indexed. p[j] is the row assigned to column j,
    // 0 meaning unassigned; column 0 is the virtual start column.
    let n = rows;
    let m = cols;
    let mut u = vec![0.0_f64; n + 1];
    let mut v = vec![0.0_f64; m + 1];
    let mut p = vec![0_usize; m + 1];
    let mut way = vec![0_usize; m + 1];

    for i in 1..=n {
        p[0] = i;
        let mut j0 = 0_usize;
        let mut minv = vec![f64::INFINITY; m + 1];
        let mut used = vec![false; m + 1];

        // Grow an alternating tree until a free column is reached.
        loop {
            used[j0] = true;
            let i0 = p[j0];
            let mut delta = f64::INFINITY;
            let mut j1 = 0_usize;

            for j in 1..=m {
                if used[j] {
                    continue;
                }
                let cur = cost[i0 - 1][j - 1] - u[i0] - v[j];
                if cur < minv[j] {
                    minv[j] = cur;
                    way[j] = j0;
                }
                if minv[j] < delta {
                    delta = minv[j];
                    j1 = j;
                }
            }

            for j in 0..=m {
                if used[j] {
                    u[p[j]] += delta;
                    v[j] -= delta;
                } else {
                    minv[j] -= delta;
                }
            }

            j0 = j1;
            if p[j0] == 0 {
                break;
            }
        }

        // Augment along the found path.
        loop {
            let j1 = way[j0];
            p[j0] = p[j1];
            j0 = j1;
            if j0 == 0 {
                break;
            }
        }
    }

    let mut assignment = vec![None; rows];
    for j in 1..=m {
        if p[j] != 0 {
            assignment[p[j] - 1] = Some(j - 1);
        }
    }
    assignment
}

#[cfg(test)]
mod tests {
    use super::*;

    fn total_cost(cost: &[Vec<f64>], assignment: &[Option<usize>]) -> f64 {
        assignment
            .iter()
            .enumerate()
            .filter_map(|(i, j)| j.map(|j| cost[i][j]))
            .sum()
    }

    #[test]
    fn test_empty() {
        assert!(solve(&[]).is_empty());
    }

    #[test]
    fn test_identity_is_optimal() {
        let cost = vec![
            vec![0.0, 1.0, 1.0],
            vec![1.0, 0.0, 1.0],
            vec![1.0, 1.0, 0.0],
        ];
        assert_eq!(solve(&cost), vec![Some(0), Some(1), Some(2)]);
    }

    #[test]
    fn test_anti_diagonal() {
        let cost = vec![
            vec![1.0, 1.0, 0.0],
            vec![1.0, 0.0, 1.0],
            vec![0.0, 1.0, 1.0],
        ];
        assert_eq!(solve(&cost), vec![Some(2), Some(1), Some(0)]);
    }

    #[test]
    fn test_greedy_is_suboptimal() {
        // Greedy on row 0 would take column 0 (cost 1), forcing row 1 into
        // cost 10; the optimal pairing crosses over.
        let cost = vec![vec![1.0, 2.0], vec![1.5, 10.0]];
        let assignment = solve(&cost);
        assert_eq!(assignment, vec![Some(1), Some(0)]);
        assert!((total_cost(&cost, &assignment) - 3.5).abs() < 1e-12);
    }

    #[test]
    fn test_wide_matrix() {
        // More columns than rows: every row assigned, one column left over.
        let cost = vec![vec![4.0, 1.0, 3.0], vec![2.0, 0.5, 5.0]];
        let assignment = solve(&cost);
        assert_eq!(assignment, vec![Some(1), Some(0)]);
    }

    #[test]
    fn test_tall_matrix() {
        // More rows than columns: exactly `cols` rows get an assignment.
        let cost = vec![vec![1.0], vec![0.5], vec![2.0]];
        let assignment = solve(&cost);
        assert_eq!(assignment, vec![None, Some(0), None]);
    }

    #[test]
    fn test_known_3x3_optimum() {
        let cost = vec![
            vec![4.0, 1.0, 3.0],
            vec![2.0, 0.0, 5.0],
            vec![3.0, 2.0, 2.0],
        ];
        let assignment = solve(&cost);
        // Optimum is 1 + 2 + 2 = 5.
        assert!((total_cost(&cost, &assignment) - 5.0).abs() < 1e-12);
        assert_eq!(assignment, vec![Some(1), Some(0), Some(2)]);
    }
}
