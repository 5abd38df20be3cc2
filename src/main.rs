//! Сравнение последовательного и параллельного вычисления C = (A + 2B)·D - E·D

use anyhow::{Context, Result};
use parallel_matrix::{
    matrix::{
        compute_matrix_c,
        generate_inputs,
        matrices_equal,
        print_matrix,
        ExecutionMode,
        MatrixInputs,
        TOLERANCE,
    },
    utils::measure_time,
};

const MATRIX_SIZE: usize = 5;

fn main() -> Result<()> {
    println!("Размер матриц: {}x{}", MATRIX_SIZE, MATRIX_SIZE);
    println!("Потоков в пуле rayon: {}", rayon::current_num_threads());

    let mut rng = rand::thread_rng();
    let MatrixInputs { a, b, d, e } = generate_inputs(&mut rng, MATRIX_SIZE)
        .context("Не удалось сгенерировать входные матрицы")?;

    for (name, matrix) in [("A", &a), ("B", &b), ("D", &d), ("E", &e)] {
        print_matrix(&format!("\nМатрица {}:", name), matrix);
    }
    println!();

    let (sequential, sequential_duration) =
        measure_time(|| compute_matrix_c(&a, &b, &d, &e, ExecutionMode::Sequential));
    let sequential = sequential.context("Ошибка последовательного вычисления")?;
    print_matrix(
        &format!("Последовательное вычисление: {} мкс", sequential_duration.as_micros()),
        &sequential,
    );
    println!();

    let (parallel, parallel_duration) =
        measure_time(|| compute_matrix_c(&a, &b, &d, &e, ExecutionMode::Parallel));
    let parallel = parallel.context("Ошибка параллельного вычисления")?;
    print_matrix(
        &format!("Параллельное вычисление: {} мкс", parallel_duration.as_micros()),
        &parallel,
    );
    println!();

    // Расхождение только сообщается, код выхода остается нулевым
    if matrices_equal(&sequential, &parallel).context("Не удалось сравнить результаты")? {
        println!("Результаты последовательного и параллельного вычисления совпадают (допуск {:e}).", TOLERANCE);
    } else {
        println!("Ошибка: результаты последовательного и параллельного вычисления не совпадают!");
    }

    Ok(())
}
