/// Composite trapezoidal rule of `f` over `[a, b]` with `n` equal subintervals.
///
/// The nodes are `a + i (b - a) / n` for `i = 0..=n`, and the result is
/// `0.5 h Σ (f(x_i) + f(x_{i+1}))`, summed pairwise in node order.
pub fn trapezoid<F>(f: F, a: f64, b: f64, n: usize) -> f64
where
    F: Fn(f64) -> f64,
{
    if n == 0 {
        return 0.0;
    }
    let h = (b - a) / n as f64;
    let node = |i: usize| if i == n { b } else { a + i as f64 * h };

    let mut previous = f(node(0));
    let mut sum = 0.0;
    for i in 1..=n {
        let current = f(node(i));
        sum += previous + current;
        previous = current;
    }
    0.5 * h * sum
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::PI;

    const TOLERANCE: f64 = 1e-9;

    fn f64_approx_equal(a: f64, b: f64) -> bool {
        (a - b).abs() < TOLERANCE
    }

    #[test]
    fn constant_integrand_is_exact() {
        assert!(f64_approx_equal(trapezoid(|_| 1.0, 0.0, 2.0 * PI, 100), 2.0 * PI));
    }

    #[test]
    fn linear_integrand_is_exact() {
        assert!(f64_approx_equal(trapezoid(|x| 3.0 * x + 1.0, 0.0, 2.0, 7), 8.0));
    }

    #[test]
    fn periodic_integrand_converges_quickly() {
        let value = trapezoid(|t| t.cos().powi(2), 0.0, 2.0 * PI, 100);
        assert!(f64_approx_equal(value, PI));
    }

    #[test]
    fn zero_subdivisions_yield_zero() {
        assert_eq!(trapezoid(|_| 1.0, 0.0, 1.0, 0), 0.0);
    }
}
