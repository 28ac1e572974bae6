//! Closed-form and recursive finite-difference weights on a centred grid.
//!
//! All functions return Taylor weights `w[k]` for offsets `k = -r..=r`
//! (index `k + r`), i.e. `f^(d)(0) ≈ Σ w[k] f(k)` for unit spacing.
//!
//! First and second derivatives follow the closed forms of Khan & Ohba,
//! "Closed-form expressions for the finite difference approximations of
//! first and higher derivatives based on Taylor series", J. Comput. Appl.
//! Math. 107 (1999) 179–193. Higher derivatives use Fornberg's recursion
//! ("Generation of finite difference formulas on arbitrarily spaced grids",
//! Math. Comp. 51 (1988)), symmetrised afterwards.

/// `(N!)^2 / ((N-k)! (N+k)!)` for `k = 0..=n`, built by a ratio recurrence so
/// large `n` never overflows.
fn factorial_ratios(n: usize) -> Vec<f64> {
    let mut ratios = Vec::with_capacity(n + 1);
    let mut r = 1.0f64;
    ratios.push(r);
    for k in 1..=n {
        r *= (n - k + 1) as f64 / (n + k) as f64;
        ratios.push(r);
    }
    ratios
}

#[inline]
fn alternating(k: usize) -> f64 {
    if k % 2 == 1 {
        1.0
    } else {
        -1.0
    }
}

/// First-derivative weights accurate to `O(h^(2n))`, radius `n`.
///
/// `w[±k] = ±(-1)^(k+1) (N!)^2 / (k (N-k)! (N+k)!)`, `w[0] = 0`.
pub fn first_derivative(n: usize) -> Vec<f64> {
    let ratios = factorial_ratios(n);
    let mut w = vec![0.0; 2 * n + 1];
    for k in 1..=n {
        let c = alternating(k) * ratios[k] / k as f64;
        w[n + k] = c;
        w[n - k] = -c;
    }
    w
}

/// Second-derivative weights accurate to `O(h^(2n))`, radius `n`.
///
/// `w[±k] = 2 (-1)^(k+1) (N!)^2 / (k^2 (N-k)! (N+k)!)`, `w[0] = -Σ_{k≠0} w[k]`.
pub fn second_derivative(n: usize) -> Vec<f64> {
    let ratios = factorial_ratios(n);
    let mut w = vec![0.0; 2 * n + 1];
    let mut side_sum = 0.0;
    for k in 1..=n {
        let kf = k as f64;
        let c = 2.0 * alternating(k) * ratios[k] / (kf * kf);
        w[n + k] = c;
        w[n - k] = c;
        side_sum += c;
    }
    w[n] = -2.0 * side_sum;
    w
}

/// Weights for the `order`-th derivative on the grid `-radius..=radius`
/// using Fornberg's recursion.
///
/// The result is projected onto the exact parity of the derivative
/// (antisymmetric for odd orders, symmetric for even orders) to remove
/// round-off asymmetry.
pub fn fornberg(order: usize, radius: usize) -> Vec<f64> {
    let x: Vec<f64> = (0..=2 * radius)
        .map(|i| i as f64 - radius as f64)
        .collect();
    let n = x.len() - 1;
    let m = order;
    // c[j][k]: weight of node j for the k-th derivative.
    let mut c = vec![vec![0.0f64; m + 1]; n + 1];
    c[0][0] = 1.0;
    let mut c1 = 1.0;
    let mut c4 = x[0];
    for i in 1..=n {
        let mn = i.min(m);
        let mut c2 = 1.0;
        let c5 = c4;
        c4 = x[i];
        for j in 0..i {
            let c3 = x[i] - x[j];
            c2 *= c3;
            if j == i - 1 {
                for k in (1..=mn).rev() {
                    c[i][k] = c1 * (k as f64 * c[i - 1][k - 1] - c5 * c[i - 1][k]) / c2;
                }
                c[i][0] = -c1 * c5 * c[i - 1][0] / c2;
            }
            for k in (1..=mn).rev() {
                c[j][k] = (c4 * c[j][k] - k as f64 * c[j][k - 1]) / c3;
            }
            c[j][0] = c4 * c[j][0] / c3;
        }
        c1 = c2;
    }

    let mut w: Vec<f64> = c.iter().map(|row| row[m]).collect();
    let odd = order % 2 == 1;
    for k in 1..=radius {
        let (lo, hi) = (w[radius - k], w[radius + k]);
        if odd {
            let a = 0.5 * (hi - lo);
            w[radius + k] = a;
            w[radius - k] = -a;
        } else {
            let s = 0.5 * (hi + lo);
            w[radius + k] = s;
            w[radius - k] = s;
        }
    }
    if odd {
        w[radius] = 0.0;
    }
    w
}
