//! Замер масштабирования параллельного вычисления по размеру и числу потоков
use anyhow::{Context, Result};
use indicatif::{ProgressBar, ProgressStyle};
use parallel_matrix::{
    matrix::{compare_results, compute_matrix_c, generate_inputs, ExecutionMode, MatrixInputs, Tolerance},
    utils::measure_time,
};
use prettytable::{row, Table};
use rand::{rngs::StdRng, SeedableRng};

const SIZES: [usize; 3] = [100, 500, 1000];
const WORKER_COUNTS: [usize; 4] = [1, 2, 4, 8];
const SEED: u64 = 0x5EED;

fn main() -> Result<()> {
    println!("Замер масштабирования: размеры {:?}, потоки {:?}\n", SIZES, WORKER_COUNTS);

    let mut rng = StdRng::seed_from_u64(SEED);
    let total_runs = (SIZES.len() * WORKER_COUNTS.len()) as u64;

    let pb = ProgressBar::new(total_runs);
    pb.set_style(ProgressStyle::default_bar()
        .template("{spinner:.green} [{elapsed_precise}] [{wide_bar:.cyan/blue}] {pos}/{len} {msg}")
        .context("Некорректный шаблон прогресс-бара")?
        .progress_chars("#>-"));

    let mut table = Table::new();
    table.add_row(row!["Размер", "Потоки", "Последовательно, мкс", "Параллельно, мкс", "Ускорение", "Совпадение"]);

    for &size in &SIZES {
        let MatrixInputs { a, b, d, e } = generate_inputs(&mut rng, size)
            .with_context(|| format!("Не удалось сгенерировать матрицы {}x{}", size, size))?;

        let (sequential, sequential_duration) =
            measure_time(|| compute_matrix_c(&a, &b, &d, &e, ExecutionMode::Sequential));
        let sequential = sequential.context("Ошибка последовательного вычисления")?;

        for &workers in &WORKER_COUNTS {
            pb.set_message(format!("{}x{}, потоков: {}", size, size, workers));

            // Пул создается вне замера времени
            let pool = rayon::ThreadPoolBuilder::new()
                .num_threads(workers)
                .build()
                .context("Не удалось создать пул потоков")?;
            let (parallel, parallel_duration) = measure_time(|| {
                pool.install(|| compute_matrix_c(&a, &b, &d, &e, ExecutionMode::Parallel))
            });
            let parallel = parallel
                .with_context(|| format!("Ошибка параллельного вычисления на {} потоках", workers))?;

            let report = compare_results(&sequential, &parallel, Tolerance::default())?;
            let speedup = sequential_duration.as_secs_f64()
                / parallel_duration.as_secs_f64().max(f64::EPSILON);
            let status = if report.is_match() { "да" } else { "нет" };

            table.add_row(row![
                size,
                workers,
                sequential_duration.as_micros(),
                parallel_duration.as_micros(),
                format!("{:.2}x", speedup),
                status
            ]);
            pb.inc(1);
        }
    }

    pb.finish_with_message("Замер завершен");
    println!();
    table.printstd();

    Ok(())
}
