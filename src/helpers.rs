/// Asserts that two floats differ by at most `tol` (default `1e-12`).
#[cfg(test)]
macro_rules! assert_approx_eq {
    ($left: expr, $right: expr, $tol: expr) => {{
        let (left, right, tol) = ($left, $right, $tol);
        let delta = (left - right).abs();
        assert!(delta <= tol, "`{}` is not within {:e} of `{}` (off by {:1.1e})", left, tol, right, delta);
    }};
    ($left: expr, $right: expr) => {
        assert_approx_eq!($left, $right, 1e-12)
    };
}
