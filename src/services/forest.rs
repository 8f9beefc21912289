use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Error types for forest training and inference
#[derive(Debug, Error)]
pub enum ForestError {
    #[error("training set is empty or misshapen")]
    EmptyDataset,
    #[error("feature count mismatch: model expects {expected}, got {got}")]
    FeatureMismatch { expected: usize, got: usize },
}

/// Training hyperparameters for a [`ForestRegressor`].
#[derive(Debug, Clone)]
pub struct ForestParams {
    pub n_trees: usize,
    pub max_depth: usize,
    pub min_samples_split: usize,
    /// Number of candidate features examined per split; `None` examines all.
    pub feature_subsample: Option<usize>,
    pub seed: u64,
}

impl Default for ForestParams {
    fn default() -> Self {
        Self {
            n_trees: 100,
            max_depth: 10,
            min_samples_split: 2,
            feature_subsample: None,
            seed: 42,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
enum TreeNode {
    Leaf {
        value: f64,
    },
    Split {
        feature: usize,
        threshold: f64,
        left: usize,
        right: usize,
    },
}

/// A single CART regression tree stored as a node arena.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegressionTree {
    nodes: Vec<TreeNode>,
}

impl RegressionTree {
    fn fit(
        features: &[Vec<f64>],
        targets: &[f64],
        indices: &mut [usize],
        params: &ForestParams,
        n_features: usize,
        rng: &mut StdRng,
    ) -> Self {
        let mut nodes = Vec::new();
        build_node(
            &mut nodes, features, targets, indices, 0, params, n_features, rng,
        );
        Self { nodes }
    }

    fn predict(&self, features: &[f64]) -> f64 {
        let mut index = 0;
        loop {
            match &self.nodes[index] {
                TreeNode::Leaf { value } => return *value,
                TreeNode::Split {
                    feature,
                    threshold,
                    left,
                    right,
                } => {
                    index = if features[*feature] <= *threshold {
                        *left
                    } else {
                        *right
                    };
                }
            }
        }
    }

    #[cfg(test)]
    fn n_nodes(&self) -> usize {
        self.nodes.len()
    }
}

/// Bootstrap-aggregated ensemble of regression trees.
///
/// Trees are fit on bootstrap resamples with variance-reduction splits; the
/// prediction is the mean of the per-tree predictions. The fitted model is
/// immutable and (de)serializable, so a trained ensemble can be persisted as
/// a JSON artifact and loaded back without retraining.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ForestRegressor {
    n_features: usize,
    trees: Vec<RegressionTree>,
}

impl ForestRegressor {
    /// Fits the forest on dense row-major features and per-row targets.
    pub fn fit(
        features: &[Vec<f64>],
        targets: &[f64],
        params: &ForestParams,
    ) -> Result<Self, ForestError> {
        if features.is_empty() || features.len() != targets.len() || params.n_trees == 0 {
            return Err(ForestError::EmptyDataset);
        }
        let n_features = features[0].len();
        if n_features == 0 || features.iter().any(|row| row.len() != n_features) {
            return Err(ForestError::EmptyDataset);
        }

        let mut rng = StdRng::seed_from_u64(params.seed);
        let n_rows = features.len();
        let mut trees = Vec::with_capacity(params.n_trees);

        for _ in 0..params.n_trees {
            let mut bootstrap: Vec<usize> =
                (0..n_rows).map(|_| rng.random_range(0..n_rows)).collect();
            trees.push(RegressionTree::fit(
                features,
                targets,
                &mut bootstrap,
                params,
                n_features,
                &mut rng,
            ));
        }

        Ok(Self { n_features, trees })
    }

    /// Predicts the target for one encoded feature vector.
    ///
    /// A width mismatch is the per-request runtime failure the caller is
    /// expected to recover from by falling back; it never panics.
    pub fn predict(&self, features: &[f64]) -> Result<f64, ForestError> {
        if features.len() != self.n_features {
            return Err(ForestError::FeatureMismatch {
                expected: self.n_features,
                got: features.len(),
            });
        }
        let total: f64 = self.trees.iter().map(|tree| tree.predict(features)).sum();
        Ok(total / self.trees.len() as f64)
    }

    pub fn n_features(&self) -> usize {
        self.n_features
    }
}

#[allow(clippy::too_many_arguments)]
fn build_node(
    nodes: &mut Vec<TreeNode>,
    features: &[Vec<f64>],
    targets: &[f64],
    indices: &mut [usize],
    depth: usize,
    params: &ForestParams,
    n_features: usize,
    rng: &mut StdRng,
) -> usize {
    let mean = indices.iter().map(|&i| targets[i]).sum::<f64>() / indices.len() as f64;

    if depth >= params.max_depth || indices.len() < params.min_samples_split {
        nodes.push(TreeNode::Leaf { value: mean });
        return nodes.len() - 1;
    }

    let Some((feature, threshold)) = best_split(features, targets, indices, params, n_features, rng)
    else {
        nodes.push(TreeNode::Leaf { value: mean });
        return nodes.len() - 1;
    };

    indices.sort_by(|&a, &b| features[a][feature].total_cmp(&features[b][feature]));
    let split_at = indices.partition_point(|&i| features[i][feature] <= threshold);
    if split_at == 0 || split_at == indices.len() {
        nodes.push(TreeNode::Leaf { value: mean });
        return nodes.len() - 1;
    }

    // Reserve the slot so child indices land after the parent.
    let node_index = nodes.len();
    nodes.push(TreeNode::Leaf { value: mean });

    let (left_indices, right_indices) = indices.split_at_mut(split_at);
    let left = build_node(
        nodes,
        features,
        targets,
        left_indices,
        depth + 1,
        params,
        n_features,
        rng,
    );
    let right = build_node(
        nodes,
        features,
        targets,
        right_indices,
        depth + 1,
        params,
        n_features,
        rng,
    );

    nodes[node_index] = TreeNode::Split {
        feature,
        threshold,
        left,
        right,
    };
    node_index
}

/// Finds the (feature, threshold) pair minimizing the summed squared error of
/// the two children. Returns `None` when no split improves on the parent.
fn best_split(
    features: &[Vec<f64>],
    targets: &[f64],
    indices: &[usize],
    params: &ForestParams,
    n_features: usize,
    rng: &mut StdRng,
) -> Option<(usize, f64)> {
    let candidates: Vec<usize> = match params.feature_subsample {
        Some(k) if k < n_features => {
            rand::seq::index::sample(rng, n_features, k).into_iter().collect()
        }
        _ => (0..n_features).collect(),
    };

    let total_sum: f64 = indices.iter().map(|&i| targets[i]).sum();
    let total_sq: f64 = indices.iter().map(|&i| targets[i] * targets[i]).sum();
    let n = indices.len() as f64;
    let parent_sse = total_sq - total_sum * total_sum / n;

    let mut best: Option<(usize, f64)> = None;
    let mut best_cost = parent_sse - 1e-12;

    let mut column: Vec<(f64, f64)> = Vec::with_capacity(indices.len());
    for &feature in &candidates {
        column.clear();
        column.extend(indices.iter().map(|&i| (features[i][feature], targets[i])));
        column.sort_by(|a, b| a.0.total_cmp(&b.0));

        let mut left_sum = 0.0;
        let mut left_sq = 0.0;
        for i in 1..column.len() {
            left_sum += column[i - 1].1;
            left_sq += column[i - 1].1 * column[i - 1].1;

            // Only split where the feature value actually changes.
            if column[i - 1].0 >= column[i].0 {
                continue;
            }

            let left_n = i as f64;
            let right_n = n - left_n;
            let right_sum = total_sum - left_sum;
            let right_sq = total_sq - left_sq;

            let cost = (left_sq - left_sum * left_sum / left_n)
                + (right_sq - right_sum * right_sum / right_n);

            if cost < best_cost {
                best_cost = cost;
                best = Some((feature, (column[i - 1].0 + column[i].0) / 2.0));
            }
        }
    }

    best
}

#[cfg(test)]
mod tests {
    use super::*;

    fn step_dataset() -> (Vec<Vec<f64>>, Vec<f64>) {
        // y depends only on feature 0: 1.0 below 5, 9.0 at or above.
        let mut xs = Vec::new();
        let mut ys = Vec::new();
        for i in 0..40 {
            let x0 = i as f64 * 0.25;
            xs.push(vec![x0, 1.0]);
            ys.push(if x0 < 5.0 { 1.0 } else { 9.0 });
        }
        (xs, ys)
    }

    #[test]
    fn forest_learns_a_step_function() {
        let (xs, ys) = step_dataset();
        let params = ForestParams {
            n_trees: 10,
            max_depth: 4,
            ..ForestParams::default()
        };
        let forest = ForestRegressor::fit(&xs, &ys, &params).unwrap();

        let low = forest.predict(&[1.0, 1.0]).unwrap();
        let high = forest.predict(&[9.0, 1.0]).unwrap();
        assert!(low < 2.5, "expected low-side prediction, got {low}");
        assert!(high > 7.5, "expected high-side prediction, got {high}");
    }

    #[test]
    fn predict_rejects_wrong_width() {
        let (xs, ys) = step_dataset();
        let forest = ForestRegressor::fit(&xs, &ys, &ForestParams::default()).unwrap();

        let err = forest.predict(&[1.0]).unwrap_err();
        assert!(matches!(
            err,
            ForestError::FeatureMismatch {
                expected: 2,
                got: 1
            }
        ));
    }

    #[test]
    fn fit_rejects_empty_or_misshapen_input() {
        let err = ForestRegressor::fit(&[], &[], &ForestParams::default()).unwrap_err();
        assert!(matches!(err, ForestError::EmptyDataset));

        let xs = vec![vec![1.0, 2.0], vec![3.0]];
        let err = ForestRegressor::fit(&xs, &[1.0, 2.0], &ForestParams::default()).unwrap_err();
        assert!(matches!(err, ForestError::EmptyDataset));
    }

    #[test]
    fn constant_target_yields_single_leaf_trees() {
        let xs: Vec<Vec<f64>> = (0..20).map(|i| vec![i as f64]).collect();
        let ys = vec![3.5; 20];
        let params = ForestParams {
            n_trees: 3,
            ..ForestParams::default()
        };
        let forest = ForestRegressor::fit(&xs, &ys, &params).unwrap();

        assert!((forest.predict(&[4.0]).unwrap() - 3.5).abs() < 1e-9);
        assert!(forest.trees.iter().all(|t| t.n_nodes() == 1));
    }

    #[test]
    fn fitted_forest_round_trips_through_json() {
        let (xs, ys) = step_dataset();
        let params = ForestParams {
            n_trees: 5,
            max_depth: 4,
            ..ForestParams::default()
        };
        let forest = ForestRegressor::fit(&xs, &ys, &params).unwrap();

        let json = serde_json::to_string(&forest).unwrap();
        let restored: ForestRegressor = serde_json::from_str(&json).unwrap();

        let sample = [3.0, 1.0];
        assert_eq!(
            forest.predict(&sample).unwrap(),
            restored.predict(&sample).unwrap()
        );
    }
}
