//! Операции над матрицами

use super::types::{ExecutionMode, Matrix, MatrixError};
use ndarray::{Array2, ArrayView1, ArrayViewMut1, Zip};
use rand::Rng;
use rand_distr::{Distribution, Uniform};

/// Допустимая абсолютная погрешность при сравнении результатов
pub const TOLERANCE: f64 = 1e-6;

/// Диапазон случайных значений элементов (включительно)
pub const VALUE_RANGE: (f64, f64) = (-1.0, 1.0);

/// Четыре входные матрицы одинакового размера
#[derive(Debug, Clone)]
pub struct MatrixInputs {
    pub a: Matrix,
    pub b: Matrix,
    pub d: Matrix,
    pub e: Matrix,
}

/// Генерирует матрицу size×size со значениями из VALUE_RANGE
pub fn generate_matrix<R: Rng + ?Sized>(rng: &mut R, size: usize) -> Result<Matrix, MatrixError> {
    if size == 0 {
        return Err(MatrixError::Empty);
    }
    let dist = Uniform::new_inclusive(VALUE_RANGE.0, VALUE_RANGE.1);
    let data = Array2::from_shape_fn((size, size), |_| dist.sample(&mut *rng));
    Matrix::from_array(data)
}

/// Генерирует A, B, D, E одного размера из одного источника случайности
pub fn generate_inputs<R: Rng + ?Sized>(rng: &mut R, size: usize) -> Result<MatrixInputs, MatrixError> {
    Ok(MatrixInputs {
        a: generate_matrix(rng, size)?,
        b: generate_matrix(rng, size)?,
        d: generate_matrix(rng, size)?,
        e: generate_matrix(rng, size)?,
    })
}

fn check_shapes(a: &Matrix, b: &Matrix, d: &Matrix, e: &Matrix) -> Result<usize, MatrixError> {
    let size = a.size();
    for (operand, m) in [("B", b), ("D", d), ("E", e)] {
        if m.size() != size {
            return Err(MatrixError::ShapeMismatch {
                operand,
                expected: size,
                actual: m.size(),
            });
        }
    }
    Ok(size)
}

fn compute_row(
    c: ArrayViewMut1<'_, f64>,
    a: ArrayView1<'_, f64>,
    b: ArrayView1<'_, f64>,
    d: ArrayView1<'_, f64>,
    e: ArrayView1<'_, f64>,
) {
    Zip::from(c)
        .and(a)
        .and(b)
        .and(d)
        .and(e)
        .for_each(|c, &a, &b, &d, &e| {
            *c = (a + 2.0 * b) * d - e * d;
        });
}

/// Вычисляет C = (A + 2B)·D - E·D поэлементно.
///
/// В параллельном режиме каждая строка C записывается ровно одной задачей
/// rayon; вызов возвращается только после завершения всех строк.
pub fn compute_matrix_c(
    a: &Matrix,
    b: &Matrix,
    d: &Matrix,
    e: &Matrix,
    mode: ExecutionMode,
) -> Result<Matrix, MatrixError> {
    let size = check_shapes(a, b, d, e)?;
    let mut c = Array2::<f64>::zeros((size, size));

    let rows = Zip::from(c.rows_mut())
        .and(a.as_array().rows())
        .and(b.as_array().rows())
        .and(d.as_array().rows())
        .and(e.as_array().rows());

    match mode {
        ExecutionMode::Sequential => rows.for_each(compute_row),
        ExecutionMode::Parallel => rows.par_for_each(compute_row),
    }

    Matrix::from_array(c)
}

/// Параллельное вычисление на отдельном пуле из `workers` потоков
pub fn compute_matrix_c_with_workers(
    a: &Matrix,
    b: &Matrix,
    d: &Matrix,
    e: &Matrix,
    workers: usize,
) -> Result<Matrix, MatrixError> {
    if workers == 0 {
        return Err(MatrixError::InvalidWorkers);
    }
    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(workers)
        .build()
        .map_err(|err| MatrixError::ThreadPool(err.to_string()))?;
    pool.install(|| compute_matrix_c(a, b, d, e, ExecutionMode::Parallel))
}

/// Политика допуска при сравнении элементов
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Tolerance {
    /// |x - y| <= abs
    Absolute(f64),
    /// |x - y| <= abs или |x - y| <= rel * max(|x|, |y|)
    AbsoluteOrRelative { abs: f64, rel: f64 },
}

impl Default for Tolerance {
    fn default() -> Self {
        Tolerance::Absolute(TOLERANCE)
    }
}

impl Tolerance {
    /// NaN не совпадает ни с чем
    pub fn accepts(&self, x: f64, y: f64) -> bool {
        let diff = (x - y).abs();
        match *self {
            Tolerance::Absolute(abs) => diff <= abs,
            Tolerance::AbsoluteOrRelative { abs, rel } => {
                diff <= abs || diff <= rel * x.abs().max(y.abs())
            }
        }
    }
}

/// Итог поэлементного сравнения двух матриц
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ComparisonReport {
    /// Количество элементов вне допуска
    pub mismatches: usize,
    /// Максимальная абсолютная разница
    pub max_diff: f64,
}

impl ComparisonReport {
    pub fn is_match(&self) -> bool {
        self.mismatches == 0
    }
}

/// Сравнивает две матрицы поэлементно с заданным допуском
pub fn compare_results(
    lhs: &Matrix,
    rhs: &Matrix,
    tolerance: Tolerance,
) -> Result<ComparisonReport, MatrixError> {
    if lhs.size() != rhs.size() {
        return Err(MatrixError::ShapeMismatch {
            operand: "rhs",
            expected: lhs.size(),
            actual: rhs.size(),
        });
    }

    let mut report = ComparisonReport {
        mismatches: 0,
        max_diff: 0.0,
    };
    Zip::from(lhs.as_array())
        .and(rhs.as_array())
        .for_each(|&x, &y| {
            if !tolerance.accepts(x, y) {
                report.mismatches += 1;
            }
            report.max_diff = report.max_diff.max((x - y).abs());
        });
    Ok(report)
}

/// true, если все элементы совпадают в пределах TOLERANCE
pub fn matrices_equal(lhs: &Matrix, rhs: &Matrix) -> Result<bool, MatrixError> {
    Ok(compare_results(lhs, rhs, Tolerance::default())?.is_match())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{rngs::StdRng, SeedableRng};

    fn scalar(v: f64) -> Matrix {
        Matrix::from_rows(vec![vec![v]]).unwrap()
    }

    #[test]
    fn single_element_scenario() {
        let (a, b, d, e) = (scalar(1.0), scalar(0.5), scalar(2.0), scalar(3.0));
        for mode in [ExecutionMode::Sequential, ExecutionMode::Parallel] {
            let c = compute_matrix_c(&a, &b, &d, &e, mode).unwrap();
            assert_eq!(c.size(), 1);
            assert_eq!(c[(0, 0)], -2.0);
        }
    }

    #[test]
    fn zero_inputs_give_zero_result() {
        let z = Matrix::zeros(2).unwrap();
        for mode in [ExecutionMode::Sequential, ExecutionMode::Parallel] {
            let c = compute_matrix_c(&z, &z, &z, &z, mode).unwrap();
            assert_eq!(c, z);
        }
    }

    #[test]
    fn each_position_uses_its_own_inputs() {
        let a = Matrix::from_rows(vec![vec![1.0, 2.0], vec![3.0, 4.0]]).unwrap();
        let b = Matrix::from_rows(vec![vec![0.0, 1.0], vec![0.5, -1.0]]).unwrap();
        let d = Matrix::from_rows(vec![vec![2.0, -1.0], vec![1.0, 0.5]]).unwrap();
        let e = Matrix::from_rows(vec![vec![1.0, 0.0], vec![2.0, 4.0]]).unwrap();
        let c = compute_matrix_c(&a, &b, &d, &e, ExecutionMode::Sequential).unwrap();
        let expected = Matrix::from_rows(vec![vec![0.0, -4.0], vec![2.0, -1.0]]).unwrap();
        assert_eq!(c, expected);
    }

    #[test]
    fn shape_mismatch_is_rejected() {
        let a = Matrix::zeros(3).unwrap();
        let b = Matrix::zeros(2).unwrap();
        for mode in [ExecutionMode::Sequential, ExecutionMode::Parallel] {
            let err = compute_matrix_c(&a, &b, &a, &a, mode).unwrap_err();
            assert_eq!(
                err,
                MatrixError::ShapeMismatch {
                    operand: "B",
                    expected: 3,
                    actual: 2
                }
            );
        }
        let err = compute_matrix_c(&a, &a, &a, &b, ExecutionMode::Sequential).unwrap_err();
        assert!(matches!(err, MatrixError::ShapeMismatch { operand: "E", .. }));
    }

    #[test]
    fn zero_workers_rejected() {
        let z = Matrix::zeros(2).unwrap();
        assert_eq!(
            compute_matrix_c_with_workers(&z, &z, &z, &z, 0),
            Err(MatrixError::InvalidWorkers)
        );
    }

    #[test]
    fn generated_values_stay_in_range() {
        let mut rng = StdRng::seed_from_u64(7);
        let m = generate_matrix(&mut rng, 20).unwrap();
        assert_eq!(m.size(), 20);
        assert!(m
            .as_array()
            .iter()
            .all(|&v| (VALUE_RANGE.0..=VALUE_RANGE.1).contains(&v)));
        assert_eq!(generate_matrix(&mut rng, 0), Err(MatrixError::Empty));
    }

    #[test]
    fn seeded_generation_is_reproducible() {
        let first = generate_inputs(&mut StdRng::seed_from_u64(99), 4).unwrap();
        let second = generate_inputs(&mut StdRng::seed_from_u64(99), 4).unwrap();
        assert_eq!(first.a, second.a);
        assert_eq!(first.e, second.e);
        assert_ne!(first.a, first.b);
    }

    #[test]
    fn tolerance_boundary() {
        let zero = scalar(0.0);
        assert!(matrices_equal(&zero, &scalar(1e-6)).unwrap());
        assert!(matrices_equal(&scalar(-1e-6), &zero).unwrap());
        assert!(!matrices_equal(&zero, &scalar(2e-6)).unwrap());
    }

    #[test]
    fn report_counts_mismatches() {
        let lhs = Matrix::from_rows(vec![vec![0.0, 1.0], vec![2.0, 3.0]]).unwrap();
        let rhs = Matrix::from_rows(vec![vec![0.0, 1.5], vec![2.0, 3.25]]).unwrap();
        let report = compare_results(&lhs, &rhs, Tolerance::default()).unwrap();
        assert_eq!(report.mismatches, 2);
        assert_eq!(report.max_diff, 0.5);
        assert!(!report.is_match());
    }

    #[test]
    fn nan_never_matches() {
        let nan = scalar(f64::NAN);
        assert!(!matrices_equal(&nan, &nan).unwrap());
    }

    #[test]
    fn relative_tolerance_scales_with_magnitude() {
        let lhs = scalar(1.0e9);
        let rhs = scalar(1.0e9 + 1.0);
        assert!(!compare_results(&lhs, &rhs, Tolerance::default())
            .unwrap()
            .is_match());
        let hybrid = Tolerance::AbsoluteOrRelative {
            abs: TOLERANCE,
            rel: 1e-6,
        };
        assert!(compare_results(&lhs, &rhs, hybrid).unwrap().is_match());
        assert!(hybrid.accepts(0.0, 1e-6));
        assert!(!hybrid.accepts(0.0, 2e-6));
    }

    #[test]
    fn comparing_different_sizes_fails() {
        let err = matrices_equal(&Matrix::zeros(2).unwrap(), &Matrix::zeros(3).unwrap());
        assert_eq!(
            err,
            Err(MatrixError::ShapeMismatch {
                operand: "rhs",
                expected: 2,
                actual: 3
            })
        );
    }
}
