//! Exact row reduction
//!
//! Brings `[A | b]` to reduced row-echelon form over arbitrary-precision
//! rationals, detects inconsistent rows and splits the columns into pivot
//! and free columns.

use super::error::SolveError;
use super::system::LinearSystem;
use num_rational::BigRational;
use num_traits::{Signed, ToPrimitive, Zero};

/// `[A | b]` in reduced row-echelon form
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReducedSystem {
    /// `rows[r]` has `columns + 1` entries, the last one is the augmented value
    rows: Vec<Vec<BigRational>>,
    /// Pivot column of each leading row, ascending
    pivots: Vec<usize>,
    /// Columns without a pivot, ascending
    free: Vec<usize>,
    columns: usize,
}

impl ReducedSystem {
    pub fn rows(&self) -> &[Vec<BigRational>] {
        &self.rows
    }

    pub fn pivots(&self) -> &[usize] {
        &self.pivots
    }

    pub fn free_columns(&self) -> &[usize] {
        &self.free
    }

    pub fn columns(&self) -> usize {
        self.columns
    }

    pub fn rank(&self) -> usize {
        self.pivots.len()
    }

    /// Coefficient of `column` in reduced row `row`
    pub fn coefficient(&self, row: usize, column: usize) -> &BigRational {
        &self.rows[row][column]
    }

    /// Augmented value of reduced row `row`
    pub fn rhs(&self, row: usize) -> &BigRational {
        &self.rows[row][self.columns]
    }

    /// Read the solution off the pivot rows when no column is free
    ///
    /// Every value must be a non-negative integer. Callers still re-check
    /// `A·x = b` against the original system.
    pub fn unique_solution(&self) -> Result<Vec<u64>, SolveError> {
        debug_assert!(self.free.is_empty());

        let mut counts = vec![0u64; self.columns];
        for (row, &column) in self.pivots.iter().enumerate() {
            let value = self.rhs(row);
            let count = if value.is_integer() && !value.is_negative() {
                value.to_integer().to_u64()
            } else {
                None
            };
            counts[column] = count.ok_or_else(|| {
                SolveError::NonIntegerOrNegativeUniqueSolution {
                    column,
                    value: value.clone(),
                }
            })?;
        }
        Ok(counts)
    }
}

/// Gauss-Jordan elimination of `[A | b]`
pub fn reduce(system: &LinearSystem) -> Result<ReducedSystem, SolveError> {
    let columns = system.actions();
    let mut rows = system.augmented();
    let mut pivots = Vec::new();
    let mut lead = 0;

    for column in 0..columns {
        if lead == rows.len() {
            break;
        }

        let Some(found) = (lead..rows.len()).find(|&r| !rows[r][column].is_zero()) else {
            continue;
        };
        rows.swap(lead, found);

        let pivot = rows[lead][column].clone();
        for entry in rows[lead].iter_mut() {
            *entry = &*entry / &pivot;
        }

        let pivot_row = rows[lead].clone();
        for (r, row) in rows.iter_mut().enumerate() {
            if r == lead || row[column].is_zero() {
                continue;
            }
            let factor = row[column].clone();
            for (entry, pivot_entry) in row.iter_mut().zip(&pivot_row) {
                *entry = &*entry - &factor * pivot_entry;
            }
        }

        pivots.push(column);
        lead += 1;
    }

    // Only rows below the rank can have an all-zero left-hand side
    for (r, row) in rows.iter().enumerate() {
        if row[..columns].iter().all(Zero::is_zero) && !row[columns].is_zero() {
            return Err(SolveError::InconsistentSystem { row: r });
        }
    }

    let free = (0..columns).filter(|c| !pivots.contains(c)).collect();

    Ok(ReducedSystem {
        rows,
        pivots,
        free,
        columns,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use num_bigint::BigInt;

    fn rat(n: i64, d: i64) -> BigRational {
        BigRational::new(BigInt::from(n), BigInt::from(d))
    }

    #[test]
    fn test_reduce_identity() {
        let system = LinearSystem::build(&[3, 4], &[vec![0], vec![1]]).unwrap();
        let reduced = reduce(&system).unwrap();
        assert_eq!(reduced.pivots(), &[0, 1]);
        assert!(reduced.free_columns().is_empty());
        assert_eq!(reduced.unique_solution().unwrap(), vec![3, 4]);
    }

    #[test]
    fn test_reduce_free_column() {
        let system = LinearSystem::build(&[5, 5], &[vec![0], vec![1], vec![0, 1]]).unwrap();
        let reduced = reduce(&system).unwrap();
        assert_eq!(reduced.pivots(), &[0, 1]);
        assert_eq!(reduced.free_columns(), &[2]);
        assert_eq!(reduced.rank(), 2);
        assert_eq!(*reduced.coefficient(0, 2), rat(1, 1));
        assert_eq!(*reduced.rhs(1), rat(5, 1));
    }

    #[test]
    fn test_reduce_produces_fractions() {
        // x0 + x1 = 1, x1 + x2 = 1, x0 + x2 = 1 -> every x = 1/2
        let system =
            LinearSystem::build(&[1, 1, 1], &[vec![0, 2], vec![0, 1], vec![1, 2]]).unwrap();
        let reduced = reduce(&system).unwrap();
        assert!(reduced.free_columns().is_empty());
        assert_eq!(*reduced.rhs(0), rat(1, 2));

        let err = reduced.unique_solution().unwrap_err();
        assert_eq!(
            err,
            SolveError::NonIntegerOrNegativeUniqueSolution {
                column: 0,
                value: rat(1, 2)
            }
        );
    }

    #[test]
    fn test_reduce_negative_unique_solution() {
        // x0 + x1 = 1, x1 = 2 -> x0 = -1
        let system = LinearSystem::build(&[1, 2], &[vec![0], vec![0, 1]]).unwrap();
        let reduced = reduce(&system).unwrap();
        assert!(matches!(
            reduced.unique_solution(),
            Err(SolveError::NonIntegerOrNegativeUniqueSolution { column: 0, .. })
        ));
    }

    #[test]
    fn test_reduce_inconsistent() {
        let system = LinearSystem::build(&[1], &[vec![]]).unwrap();
        assert_eq!(
            reduce(&system).unwrap_err(),
            SolveError::InconsistentSystem { row: 0 }
        );

        // Two counters always move together but need different values
        let system = LinearSystem::build(&[2, 3], &[vec![0, 1]]).unwrap();
        assert_eq!(
            reduce(&system).unwrap_err(),
            SolveError::InconsistentSystem { row: 1 }
        );
    }
}
