//! Affine parameterization of the solution space
//!
//! Every press count `x_j` is written as `const_j + Σ_i coeff_{j,i}·t_i`
//! over the free parameters `t`, one parameter per free column.

use super::elimination::ReducedSystem;
use super::error::SolveError;
use num_bigint::BigInt;
use num_rational::BigRational;
use num_traits::{One, Zero};

/// `constant + Σ coefficients[i]·t_i`
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct AffineExpr {
    constant: BigRational,
    coefficients: Vec<BigRational>,
}

impl AffineExpr {
    /// The zero expression over `parameters` free parameters
    pub fn zero(parameters: usize) -> Self {
        AffineExpr {
            constant: BigRational::zero(),
            coefficients: vec![BigRational::zero(); parameters],
        }
    }

    pub fn constant_of(value: BigRational, parameters: usize) -> Self {
        AffineExpr {
            constant: value,
            coefficients: vec![BigRational::zero(); parameters],
        }
    }

    /// The bare parameter `t_index`
    pub fn parameter(index: usize, parameters: usize) -> Self {
        let mut expr = AffineExpr::zero(parameters);
        expr.coefficients[index] = BigRational::one();
        expr
    }

    pub fn constant(&self) -> &BigRational {
        &self.constant
    }

    pub fn coefficients(&self) -> &[BigRational] {
        &self.coefficients
    }

    pub fn coefficient(&self, index: usize) -> &BigRational {
        &self.coefficients[index]
    }

    pub fn parameters(&self) -> usize {
        self.coefficients.len()
    }

    pub fn is_constant(&self) -> bool {
        self.coefficients.iter().all(Zero::is_zero)
    }

    /// Indices of parameters with a non-zero coefficient
    pub fn dependencies(&self) -> Vec<usize> {
        self.coefficients
            .iter()
            .enumerate()
            .filter(|(_, c)| !c.is_zero())
            .map(|(i, _)| i)
            .collect()
    }

    /// `self += factor · other`
    pub fn add_scaled(&mut self, other: &AffineExpr, factor: &BigRational) {
        debug_assert_eq!(self.parameters(), other.parameters());
        self.constant += factor * &other.constant;
        for (mine, theirs) in self.coefficients.iter_mut().zip(&other.coefficients) {
            *mine += factor * theirs;
        }
    }

    /// Exact value at an integer parameter point
    pub fn evaluate(&self, point: &[i64]) -> BigRational {
        debug_assert_eq!(self.parameters(), point.len());
        self.coefficients
            .iter()
            .zip(point)
            .filter(|(c, _)| !c.is_zero())
            .fold(self.constant.clone(), |acc, (c, &t)| {
                acc + c * BigRational::from_integer(BigInt::from(t))
            })
    }

    /// Value at `point` with parameter `skip` treated as zero
    pub fn evaluate_without(&self, point: &[i64], skip: usize) -> BigRational {
        let value = self.evaluate(point);
        value - &self.coefficients[skip] * BigRational::from_integer(BigInt::from(point[skip]))
    }
}

/// Every variable as an affine function of the free parameters
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Parameterization {
    variables: Vec<AffineExpr>,
    objective: AffineExpr,
    free_columns: Vec<usize>,
}

impl Parameterization {
    /// Expression for press count `x_column`
    pub fn variable(&self, column: usize) -> &AffineExpr {
        &self.variables[column]
    }

    pub fn variables(&self) -> &[AffineExpr] {
        &self.variables
    }

    /// `Σ_j x_j(t)`
    pub fn objective(&self) -> &AffineExpr {
        &self.objective
    }

    /// Column of each free parameter, in parameter order
    pub fn free_columns(&self) -> &[usize] {
        &self.free_columns
    }

    pub fn parameters(&self) -> usize {
        self.free_columns.len()
    }
}

/// Back-substitute through the pivot rows of a reduced system
pub fn parameterize(reduced: &ReducedSystem) -> Result<Parameterization, SolveError> {
    let parameters = reduced.free_columns().len();
    let mut slots: Vec<Option<AffineExpr>> = vec![None; reduced.columns()];

    for (index, &column) in reduced.free_columns().iter().enumerate() {
        slots[column] = Some(AffineExpr::parameter(index, parameters));
    }

    for (row, &pivot) in reduced.pivots().iter().enumerate() {
        let mut expr = AffineExpr::constant_of(reduced.rhs(row).clone(), parameters);
        for (index, &column) in reduced.free_columns().iter().enumerate() {
            let coeff = reduced.coefficient(row, column);
            if !coeff.is_zero() {
                expr.add_scaled(&AffineExpr::parameter(index, parameters), &-coeff);
            }
        }
        slots[pivot] = Some(expr);
    }

    let variables = slots
        .into_iter()
        .enumerate()
        .map(|(column, slot)| slot.ok_or(SolveError::InternalParameterizationError { column }))
        .collect::<Result<Vec<_>, _>>()?;

    check_rows(reduced, &variables)?;

    let mut objective = AffineExpr::zero(parameters);
    let one = BigRational::one();
    for expr in &variables {
        objective.add_scaled(expr, &one);
    }

    Ok(Parameterization {
        variables,
        objective,
        free_columns: reduced.free_columns().to_vec(),
    })
}

/// Every reduced row must hold identically in `t`, not only at one point
fn check_rows(reduced: &ReducedSystem, variables: &[AffineExpr]) -> Result<(), SolveError> {
    let parameters = reduced.free_columns().len();

    for (row, &pivot) in reduced.pivots().iter().enumerate() {
        let mut lhs = AffineExpr::zero(parameters);
        for (column, expr) in variables.iter().enumerate() {
            let coeff = reduced.coefficient(row, column);
            if !coeff.is_zero() {
                lhs.add_scaled(expr, coeff);
            }
        }
        if lhs != AffineExpr::constant_of(reduced.rhs(row).clone(), parameters) {
            return Err(SolveError::InternalParameterizationError { column: pivot });
        }
    }
    Ok(())
}
