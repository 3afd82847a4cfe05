//! Quality smoke tests: the trainer should actually learn.

mod common;

use capboost::data::Table;
use capboost::model::GBDTModel;
use capboost::training::{GBDTParams, Rmse};
use ndarray::Array2;

use common::{linear_targets, random_features, select, split_rows};

fn to_table(rows: &[Vec<f32>]) -> Table {
    let n_rows = rows.len();
    let n_cols = rows.first().map_or(0, Vec::len);
    let mut values = Array2::zeros((n_cols, n_rows));
    for (r, row) in rows.iter().enumerate() {
        for (c, &v) in row.iter().enumerate() {
            values[[c, r]] = v;
        }
    }
    let names = (0..n_cols).map(|j| format!("f{j}")).collect();
    Table::new(names, values)
}

fn run_synthetic_regression(rows: usize, cols: usize, trees: u32, depth: u32, seed: u64) -> f64 {
    let features = random_features(rows, cols, seed);
    let targets = linear_targets(&features, seed ^ 0x0BAD_5EED, 0.05);
    let (train_idx, test_idx) = split_rows(rows);

    let x_train = to_table(&select(&features, &train_idx));
    let x_test = to_table(&select(&features, &test_idx));
    let y_train = select(&targets, &train_idx);
    let y_test = select(&targets, &test_idx);

    let params = GBDTParams {
        n_trees: trees,
        max_depth: depth,
        learning_rate: 0.1,
        seed,
        ..Default::default()
    };
    let model = GBDTModel::train(&x_train, &y_train, params).unwrap();
    let preds = model.predict(&x_test).unwrap();
    Rmse.compute(&preds, &y_test)
}

#[test]
fn quality_smoke_synthetic_regression() {
    let rmse = run_synthetic_regression(2_000, 8, 150, 6, 42);
    // Always predicting the target mean scores roughly 8 here.
    assert!(rmse < 2.5, "rmse too high: {rmse}");
}

#[test]
fn quality_smoke_learns_single_feature_step() {
    let features: Vec<Vec<f32>> = (0..100).map(|i| vec![i as f32 / 100.0]).collect();
    let targets: Vec<f32> = features
        .iter()
        .map(|row| if row[0] < 0.5 { -10.0 } else { 10.0 })
        .collect();

    let x = to_table(&features);
    let params = GBDTParams {
        n_trees: 30,
        max_depth: 2,
        learning_rate: 0.3,
        ..Default::default()
    };
    let model = GBDTModel::train(&x, &targets, params).unwrap();
    let preds = model.predict(&x).unwrap();
    let rmse = Rmse.compute(&preds, &targets);
    assert!(rmse < 0.5, "rmse too high: {rmse}");
}

#[test]
fn quality_smoke_subsampled_training_still_learns() {
    let features = random_features(1_000, 4, 17);
    let targets = linear_targets(&features, 18, 0.05);
    let x = to_table(&features);

    let params = GBDTParams {
        n_trees: 80,
        max_depth: 5,
        learning_rate: 0.1,
        subsample: 0.8,
        seed: 17,
        ..Default::default()
    };
    let model = GBDTModel::train(&x, &targets, params).unwrap();
    let preds = model.predict(&x).unwrap();

    let baseline = {
        let mean = targets.iter().sum::<f32>() / targets.len() as f32;
        let constant = vec![mean; targets.len()];
        Rmse.compute(&constant, &targets)
    };
    let rmse = Rmse.compute(&preds, &targets);
    assert!(rmse < baseline * 0.3, "rmse {rmse} vs baseline {baseline}");
}
