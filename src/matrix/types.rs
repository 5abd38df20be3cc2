//! Типы матриц и связанные структуры

use ndarray::{Array2, ArrayView1};
use std::ops::Index;
use thiserror::Error;

/// Ошибки построения и обработки матриц
#[derive(Error, Debug, Clone, PartialEq)]
pub enum MatrixError {
    #[error("Матрица должна содержать хотя бы одну строку и один столбец")]
    Empty,

    #[error("Матрица должна быть квадратной, получено {rows}x{cols}")]
    NotSquare { rows: usize, cols: usize },

    #[error("Строка {row} имеет длину {actual}, ожидалось {expected}")]
    RaggedRows {
        row: usize,
        expected: usize,
        actual: usize,
    },

    #[error("Длина данных {actual} не соответствует матрице {size}x{size} ({expected} элементов)")]
    BadLength {
        size: usize,
        expected: usize,
        actual: usize,
    },

    #[error("Несовпадение размеров матрицы {operand}: ожидалось {expected}x{expected}, получено {actual}x{actual}")]
    ShapeMismatch {
        operand: &'static str,
        expected: usize,
        actual: usize,
    },

    #[error("Количество потоков должно быть больше нуля")]
    InvalidWorkers,

    #[error("Не удалось создать пул потоков: {0}")]
    ThreadPool(String),
}

/// Режим выполнения поэлементного вычисления
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExecutionMode {
    /// Обход строк по порядку в текущем потоке
    Sequential,
    /// Строки распределяются по пулу потоков rayon
    Parallel,
}

/// Квадратная матрица m×m (m >= 1), неизменяемая после создания
#[derive(Debug, Clone, PartialEq)]
pub struct Matrix {
    data: Array2<f64>,
}

impl Matrix {
    /// Оборачивает готовый массив, проверяя, что он квадратный и непустой
    pub fn from_array(data: Array2<f64>) -> Result<Self, MatrixError> {
        let (rows, cols) = data.dim();
        if rows == 0 || cols == 0 {
            return Err(MatrixError::Empty);
        }
        if rows != cols {
            return Err(MatrixError::NotSquare { rows, cols });
        }
        Ok(Self { data })
    }

    /// Создает матрицу size×size из плоского вектора (построчно)
    pub fn from_vec(size: usize, values: Vec<f64>) -> Result<Self, MatrixError> {
        if size == 0 {
            return Err(MatrixError::Empty);
        }
        let expected = size * size;
        let actual = values.len();
        let data = Array2::from_shape_vec((size, size), values).map_err(|_| {
            MatrixError::BadLength {
                size,
                expected,
                actual,
            }
        })?;
        Self::from_array(data)
    }

    /// Создает матрицу из вектора строк
    pub fn from_rows(rows: Vec<Vec<f64>>) -> Result<Self, MatrixError> {
        let size = rows.len();
        let cols = rows.first().map(Vec::len).ok_or(MatrixError::Empty)?;
        for (row, values) in rows.iter().enumerate() {
            if values.len() != cols {
                return Err(MatrixError::RaggedRows {
                    row,
                    expected: cols,
                    actual: values.len(),
                });
            }
        }
        if cols == 0 {
            return Err(MatrixError::Empty);
        }
        if cols != size {
            return Err(MatrixError::NotSquare { rows: size, cols });
        }
        Self::from_vec(size, rows.into_iter().flatten().collect())
    }

    /// Нулевая матрица size×size
    pub fn zeros(size: usize) -> Result<Self, MatrixError> {
        if size == 0 {
            return Err(MatrixError::Empty);
        }
        Ok(Self {
            data: Array2::zeros((size, size)),
        })
    }

    /// Размерность m
    pub fn size(&self) -> usize {
        self.data.nrows()
    }

    pub fn get(&self, row: usize, col: usize) -> Option<f64> {
        self.data.get((row, col)).copied()
    }

    pub fn rows(&self) -> impl Iterator<Item = ArrayView1<'_, f64>> {
        self.data.rows().into_iter()
    }

    pub fn as_array(&self) -> &Array2<f64> {
        &self.data
    }
}

impl Index<(usize, usize)> for Matrix {
    type Output = f64;

    fn index(&self, (row, col): (usize, usize)) -> &f64 {
        &self.data[[row, col]]
    }
}
