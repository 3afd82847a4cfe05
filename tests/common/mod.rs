//! Shared helpers for integration tests: synthetic data and CSV fixtures.

#![allow(dead_code)]

use std::fmt::Write as _;
use std::fs;
use std::path::Path;

use rand::{Rng, SeedableRng};
use rand_xoshiro::Xoshiro256PlusPlus;

/// Uniform random features in `[-1, 1)`, row-major `rows x cols`.
pub fn random_features(rows: usize, cols: usize, seed: u64) -> Vec<Vec<f32>> {
    let mut rng = Xoshiro256PlusPlus::seed_from_u64(seed);
    (0..rows)
        .map(|_| (0..cols).map(|_| rng.gen_range(-1.0..1.0)).collect())
        .collect()
}

/// Noisy linear targets over the features; learnable by a small forest.
pub fn linear_targets(features: &[Vec<f32>], seed: u64, noise: f32) -> Vec<f32> {
    let mut rng = Xoshiro256PlusPlus::seed_from_u64(seed);
    features
        .iter()
        .map(|row| {
            let signal: f32 = row
                .iter()
                .enumerate()
                .map(|(j, &v)| (j as f32 + 1.0) * v)
                .sum();
            signal + rng.gen_range(-noise..noise)
        })
        .collect()
}

/// Write a feature table as CSV with headers `f0, f1, ...`.
pub fn write_features_csv(path: &Path, rows: &[Vec<f32>]) {
    let cols = rows.first().map_or(0, Vec::len);
    let mut out = String::new();
    let header: Vec<String> = (0..cols).map(|j| format!("f{j}")).collect();
    out.push_str(&header.join(","));
    out.push('\n');
    for row in rows {
        let cells: Vec<String> = row.iter().map(|v| format!("{v}")).collect();
        out.push_str(&cells.join(","));
        out.push('\n');
    }
    fs::write(path, out).unwrap();
}

/// Write a single-column label table as CSV.
pub fn write_labels_csv(path: &Path, name: &str, values: &[f32]) {
    let mut out = String::new();
    writeln!(out, "{name}").unwrap();
    for v in values {
        writeln!(out, "{v}").unwrap();
    }
    fs::write(path, out).unwrap();
}

/// Split row indices: every fifth row goes to the test set.
pub fn split_rows(rows: usize) -> (Vec<usize>, Vec<usize>) {
    let mut train = Vec::new();
    let mut test = Vec::new();
    for r in 0..rows {
        if r % 5 == 0 {
            test.push(r);
        } else {
            train.push(r);
        }
    }
    (train, test)
}

pub fn select<T: Clone>(items: &[T], indices: &[usize]) -> Vec<T> {
    indices.iter().map(|&i| items[i].clone()).collect()
}
