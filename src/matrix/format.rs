//! Табличный вывод матриц

use super::types::Matrix;
use prettytable::{format, Cell, Row, Table};

/// Ширина ячейки и число знаков после запятой
pub const CELL_WIDTH: usize = 7;
pub const CELL_PRECISION: usize = 3;

/// Отрисовывает матрицу в виде таблицы с рамкой между всеми строками
pub fn render_matrix(matrix: &Matrix) -> String {
    let mut table = Table::new();
    table.set_format(*format::consts::FORMAT_DEFAULT);

    for row in matrix.rows() {
        let cells = row
            .iter()
            .map(|value| {
                Cell::new(&format!(
                    "{:>width$.prec$}",
                    value,
                    width = CELL_WIDTH,
                    prec = CELL_PRECISION
                ))
            })
            .collect();
        table.add_row(Row::new(cells));
    }

    table.to_string()
}

pub fn print_matrix(title: &str, matrix: &Matrix) {
    println!("{}", title);
    print!("{}", render_matrix(matrix));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn renders_bordered_fixed_width_cells() {
        let m = Matrix::from_rows(vec![vec![-2.0, 0.5], vec![1.0, 10.25]]).unwrap();
        let text = render_matrix(&m);
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines.len(), 5);
        assert_eq!(lines[0], "+---------+---------+");
        assert_eq!(lines[1], "|  -2.000 |   0.500 |");
        assert_eq!(lines[2], "+---------+---------+");
        assert_eq!(lines[3], "|   1.000 |  10.250 |");
        assert_eq!(lines[4], "+---------+---------+");
    }
}
