//! Derivative-free minimization used for coefficient estimation.

/// Options for the Nelder-Mead simplex search.
#[derive(Debug, Clone)]
pub struct SimplexOptions {
    /// Maximum number of iterations.
    pub max_iter: usize,
    /// Convergence tolerance on the simplex value spread.
    pub tolerance: f64,
    /// Relative size of the initial simplex.
    pub initial_step: f64,
}

impl Default for SimplexOptions {
    fn default() -> Self {
        Self {
            max_iter: 1000,
            tolerance: 1e-8,
            initial_step: 0.05,
        }
    }
}

/// Outcome of a simplex search.
#[derive(Debug, Clone)]
pub struct SimplexOutcome {
    /// Best point found.
    pub point: Vec<f64>,
    /// Objective value at the best point.
    pub value: f64,
    /// Iterations performed.
    pub iterations: usize,
    /// Whether the spread dropped below the tolerance.
    pub converged: bool,
}

// Standard Nelder-Mead coefficients.
const REFLECT: f64 = 1.0;
const EXPAND: f64 = 2.0;
const CONTRACT: f64 = 0.5;
const SHRINK: f64 = 0.5;

/// Minimize `objective` starting from `initial`, clamping every candidate
/// point into `bounds` (one `(min, max)` pair per dimension).
pub fn minimize<F>(
    objective: F,
    initial: &[f64],
    bounds: &[(f64, f64)],
    opts: SimplexOptions,
) -> SimplexOutcome
where
    F: Fn(&[f64]) -> f64,
{
    let n = initial.len();
    if n == 0 {
        return SimplexOutcome {
            point: vec![],
            value: f64::NAN,
            iterations: 0,
            converged: false,
        };
    }
    debug_assert_eq!(bounds.len(), n);

    let clamp = |point: &mut [f64]| {
        for (x, &(lo, hi)) in point.iter_mut().zip(bounds) {
            *x = x.clamp(lo, hi);
        }
    };

    // Seed the simplex with the initial point plus one perturbed vertex
    // per dimension.
    let mut simplex: Vec<Vec<f64>> = Vec::with_capacity(n + 1);
    simplex.push(initial.to_vec());
    for i in 0..n {
        let mut vertex = initial.to_vec();
        let step = if initial[i].abs() > 1e-10 {
            opts.initial_step * initial[i].abs()
        } else {
            opts.initial_step
        };
        vertex[i] += step;
        clamp(&mut vertex);
        simplex.push(vertex);
    }
    let mut values: Vec<f64> = simplex.iter().map(|v| objective(v)).collect();

    let mut iterations = 0;
    let mut converged = false;

    while iterations < opts.max_iter {
        iterations += 1;

        let mut order: Vec<usize> = (0..=n).collect();
        order.sort_by(|&a, &b| {
            values[a]
                .partial_cmp(&values[b])
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        let best = order[0];
        let second_worst = order[n - 1];
        let worst = order[n];

        if values[worst] - values[best] < opts.tolerance {
            converged = true;
            break;
        }

        // Centroid of all vertices except the worst
        let mut centroid = vec![0.0; n];
        for (i, vertex) in simplex.iter().enumerate() {
            if i == worst {
                continue;
            }
            for (c, &x) in centroid.iter_mut().zip(vertex) {
                *c += x;
            }
        }
        for c in &mut centroid {
            *c /= n as f64;
        }

        let blend = |towards: &[f64], factor: f64| -> Vec<f64> {
            let mut point: Vec<f64> = centroid
                .iter()
                .zip(towards)
                .map(|(c, t)| c + factor * (t - c))
                .collect();
            clamp(&mut point);
            point
        };

        let reflected = blend(&simplex[worst], -REFLECT);
        let reflected_value = objective(&reflected);

        if reflected_value < values[best] {
            // Try stretching further in the same direction
            let expanded = blend(&reflected, EXPAND);
            let expanded_value = objective(&expanded);
            if expanded_value < reflected_value {
                simplex[worst] = expanded;
                values[worst] = expanded_value;
            } else {
                simplex[worst] = reflected;
                values[worst] = reflected_value;
            }
            continue;
        }

        if reflected_value < values[second_worst] {
            simplex[worst] = reflected;
            values[worst] = reflected_value;
            continue;
        }

        // Contract towards the better of the worst vertex and its reflection
        let towards = if reflected_value < values[worst] {
            &reflected
        } else {
            &simplex[worst]
        };
        let contracted = blend(towards, CONTRACT);
        let contracted_value = objective(&contracted);
        if contracted_value < values[worst].min(reflected_value) {
            simplex[worst] = contracted;
            values[worst] = contracted_value;
            continue;
        }

        // Shrink everything towards the best vertex
        let anchor = simplex[best].clone();
        for (i, vertex) in simplex.iter_mut().enumerate() {
            if i == best {
                continue;
            }
            for (x, &a) in vertex.iter_mut().zip(&anchor) {
                *x = a + SHRINK * (*x - a);
            }
            clamp(vertex);
            values[i] = objective(vertex);
        }
    }

    let best = values
        .iter()
        .enumerate()
        .min_by(|(_, a), (_, b)| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal))
        .map(|(i, _)| i)
        .unwrap_or(0);

    SimplexOutcome {
        point: simplex[best].clone(),
        value: values[best],
        iterations,
        converged,
    }
}
