//! Поэлементное вычисление C = (A + 2B)·D - E·D над квадратными матрицами
//! в последовательном и параллельном режимах

pub mod matrix;
pub mod utils;

// Реэкспорт основных типов для удобства
pub use matrix::{ExecutionMode, Matrix, MatrixError};
