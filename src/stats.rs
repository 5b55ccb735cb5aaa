//! Descriptive statistics over the costs of a result set, plus the
//! relative-solution-quality arithmetic used by the plots and tables.

use itertools::Itertools;

use crate::io::result_reader::TourResult;

/// The run with minimum cost; ties keep the earliest run in file order.
pub fn best(results: &[TourResult]) -> Option<&TourResult> {
    // min_by_key already keeps the first of equal elements
    results.iter().min_by_key(|r| r.cost)
}

/// The run with maximum cost; ties keep the earliest run in file order.
pub fn worst(results: &[TourResult]) -> Option<&TourResult> {
    // max_by_key keeps the last of equal elements, so this is spelled out
    let mut worst: Option<&TourResult> = None;
    for result in results {
        match worst {
            Some(w) if result.cost <= w.cost => {}
            _ => worst = Some(result),
        }
    }
    worst
}

pub fn mean(costs: &[u64]) -> Option<f64> {
    if costs.is_empty() {
        return None;
    }
    Some(costs.iter().sum::<u64>() as f64 / costs.len() as f64)
}

/// The p-quantile of an ascending-sorted sequence, with linear interpolation
/// between order statistics (the numpy `quantile` default).
///
/// Requires `sorted` to be non-empty and `p` in `[0, 1]`.
pub fn quantile(sorted: &[f64], p: f64) -> f64 {
    debug_assert!(!sorted.is_empty());
    debug_assert!((0.0..=1.0).contains(&p));

    let rank = p * (sorted.len() - 1) as f64;
    let lo = rank.floor() as usize;
    let hi = rank.ceil() as usize;
    let fraction = rank - lo as f64;

    sorted[lo] + (sorted[hi] - sorted[lo]) * fraction
}

/// Order statistics of one cost sequence.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CostSummary {
    pub runs: usize,
    pub min: u64,
    pub max: u64,
    pub mean: f64,
    pub median: f64,
    pub q1: f64,
    pub q3: f64,
}

impl CostSummary {
    pub fn describe(costs: &[u64]) -> Option<Self> {
        let (min, max) = costs.iter().copied().minmax().into_option()?;

        let mut sorted: Vec<f64> = costs.iter().map(|&c| c as f64).collect();
        sorted.sort_by(f64::total_cmp);

        Some(Self {
            runs: costs.len(),
            min,
            max,
            mean: mean(costs)?,
            median: quantile(&sorted, 0.5),
            q1: quantile(&sorted, 0.25),
            q3: quantile(&sorted, 0.75),
        })
    }
}

/// Normalized deviation of a cost from the known optimum, as a fraction:
/// `|cost - optimum| / optimum`. Non-negative, zero iff the cost equals the
/// optimum, strictly increasing in the absolute distance from the optimum.
pub fn relative_quality(cost: f64, optimum: u64) -> f64 {
    (cost - optimum as f64).abs() / optimum as f64
}

pub fn relative_quality_percent(cost: f64, optimum: u64) -> f64 {
    relative_quality(cost, optimum) * 100.0
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RunComparison {
    /// Mean-cost RSQ of run A, in percent.
    pub rsq_a: f64,
    /// Mean-cost RSQ of run B, in percent.
    pub rsq_b: f64,
    /// `(1 - rsq_b / rsq_a) * 100`: positive when run B sits closer to the
    /// optimum than run A, negative when it sits further away. `None` when
    /// run A is exactly optimal but run B is not: there is no baseline
    /// deviation to express B's regression against, so no percentage exists.
    /// When both runs are exactly optimal the delta is 0.
    pub delta_percent: Option<f64>,
}

/// Compares the mean relative solution quality of two runs on the same
/// instance. Returns `None` if either run is empty.
pub fn compare_runs(costs_a: &[u64], costs_b: &[u64], optimum: u64) -> Option<RunComparison> {
    let rsq_a = relative_quality_percent(mean(costs_a)?, optimum);
    let rsq_b = relative_quality_percent(mean(costs_b)?, optimum);

    let delta_percent = if rsq_a == 0.0 {
        // an optimal baseline leaves nothing to divide by
        (rsq_b == 0.0).then_some(0.0)
    } else {
        Some((1.0 - rsq_b / rsq_a) * 100.0)
    };

    Some(RunComparison {
        rsq_a,
        rsq_b,
        delta_percent,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn results(costs: &[u64]) -> Vec<TourResult> {
        costs
            .iter()
            .enumerate()
            .map(|(i, &cost)| TourResult {
                circuit: vec![i as u32],
                cost,
            })
            .collect()
    }

    #[test]
    fn best_and_worst_bound_every_run() {
        let rs = results(&[7, 3, 9, 3, 9, 5]);
        let best = best(&rs).unwrap();
        let worst = worst(&rs).unwrap();

        for r in &rs {
            assert!(best.cost <= r.cost);
            assert!(worst.cost >= r.cost);
        }
    }

    #[test]
    fn ties_keep_the_earliest_run() {
        let rs = results(&[5, 3, 3, 9, 9]);

        // circuits encode the original file position
        assert_eq!(best(&rs).unwrap().circuit, vec![1]);
        assert_eq!(worst(&rs).unwrap().circuit, vec![3]);
    }

    #[test]
    fn best_of_spec_example() {
        let rs = vec![
            TourResult {
                circuit: vec![0, 1],
                cost: 5,
            },
            TourResult {
                circuit: vec![1, 0],
                cost: 7,
            },
        ];

        assert_eq!(best(&rs).unwrap().circuit, vec![0, 1]);
        assert_eq!(best(&rs).unwrap().cost, 5);
    }

    #[test]
    fn empty_input_has_no_extrema() {
        assert!(best(&[]).is_none());
        assert!(worst(&[]).is_none());
        assert!(mean(&[]).is_none());
        assert!(CostSummary::describe(&[]).is_none());
    }

    #[test]
    fn summary_of_known_sequence() {
        let summary = CostSummary::describe(&[1, 2, 3, 4]).unwrap();

        assert_eq!(summary.runs, 4);
        assert_eq!(summary.min, 1);
        assert_eq!(summary.max, 4);
        assert_eq!(summary.mean, 2.5);
        assert_eq!(summary.median, 2.5);
        assert_eq!(summary.q1, 1.75);
        assert_eq!(summary.q3, 3.25);
    }

    #[test]
    fn quantile_interpolates_linearly() {
        let sorted = [10.0, 20.0, 30.0];

        assert_eq!(quantile(&sorted, 0.0), 10.0);
        assert_eq!(quantile(&sorted, 0.25), 15.0);
        assert_eq!(quantile(&sorted, 0.5), 20.0);
        assert_eq!(quantile(&sorted, 1.0), 30.0);
    }

    #[test]
    fn quantile_of_single_value() {
        assert_eq!(quantile(&[42.0], 0.25), 42.0);
        assert_eq!(quantile(&[42.0], 0.75), 42.0);
    }

    #[test]
    fn rsq_is_zero_exactly_at_the_optimum() {
        assert_eq!(relative_quality(1610.0, 1610), 0.0);
        assert!(relative_quality(1611.0, 1610) > 0.0);
        assert!(relative_quality(1609.0, 1610) > 0.0);
    }

    #[test]
    fn rsq_grows_with_distance_from_the_optimum() {
        let near = relative_quality(1650.0, 1610);
        let far = relative_quality(1800.0, 1610);
        assert!(far > near);
    }

    #[test]
    fn rsq_percent_of_double_the_optimum_is_hundred() {
        assert_eq!(relative_quality_percent(200.0, 100), 100.0);
    }

    #[test]
    fn comparison_is_positive_when_b_is_closer() {
        // A averages 120 (rsq 20%), B averages 110 (rsq 10%)
        let cmp = compare_runs(&[120], &[110], 100).unwrap();

        assert_eq!(cmp.rsq_a, 20.0);
        assert_eq!(cmp.rsq_b, 10.0);
        assert_eq!(cmp.delta_percent, Some(50.0));
    }

    #[test]
    fn comparison_is_negative_when_b_is_further() {
        let cmp = compare_runs(&[110], &[120], 100).unwrap();
        assert_eq!(cmp.delta_percent, Some(-100.0));
    }

    #[test]
    fn comparison_of_two_optimal_runs() {
        let cmp = compare_runs(&[100, 100], &[100], 100).unwrap();
        assert_eq!(cmp.delta_percent, Some(0.0));
    }

    #[test]
    fn comparison_against_an_optimal_baseline_has_no_percentage() {
        let cmp = compare_runs(&[100], &[150], 100).unwrap();

        assert_eq!(cmp.rsq_a, 0.0);
        assert_eq!(cmp.rsq_b, 50.0);
        assert_eq!(cmp.delta_percent, None);
    }

    #[test]
    fn comparison_of_empty_run_is_none() {
        assert!(compare_runs(&[], &[100], 100).is_none());
    }
}
