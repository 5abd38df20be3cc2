//! Модуль для работы с матрицами
//! 
//! Предоставляет:
//! - Типы матриц и ошибки
//! - Генерацию, поэлементное вычисление и сравнение
//! - Табличный вывод

mod types;
pub mod operations;
pub mod format;

pub use types::{ExecutionMode, Matrix, MatrixError};
pub use operations::{
    compare_results, compute_matrix_c, compute_matrix_c_with_workers, generate_inputs,
    generate_matrix, matrices_equal, ComparisonReport, MatrixInputs, Tolerance, TOLERANCE,
    VALUE_RANGE,
};
pub use format::{print_matrix, render_matrix};
