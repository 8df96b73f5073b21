use std::f64::consts::PI;

/// Error function.
///
/// Evaluated from the series `2/√π · e^(-x²) · Σ x^(2n+1)·2ⁿ / (1·3·…·(2n+1))`, whose terms are
/// all positive, so there is no cancellation for the moderate arguments used by cursor motion.
pub fn erf(x: f64) -> f64 {
    if x.is_nan() {
        return f64::NAN;
    }
    let ax = x.abs();
    if ax >= 6.0 {
        return x.signum();
    }

    let x2 = ax * ax;
    let mut term = ax;
    let mut sum = ax;
    for n in 1..400 {
        term *= 2.0 * x2 / f64::from(2 * n + 1);
        sum += term;
        if term <= sum * 1e-17 {
            break;
        }
    }

    let v = (2.0 / PI.sqrt()) * (-x2).exp() * sum;
    v.min(1.0).copysign(x)
}

/// Inverse error function on `[-1, 1]`.
///
/// Returns `±inf` at `±1` and `NaN` outside the domain. Odd: `erfinv(-y) == -erfinv(y)`.
pub fn erfinv(y: f64) -> f64 {
    if y.is_nan() || y.abs() > 1.0 {
        return f64::NAN;
    }
    if y == 0.0 {
        return 0.0;
    }
    if y.abs() == 1.0 {
        return f64::INFINITY.copysign(y);
    }

    let a = y.abs();
    let mut x = erfinv_initial(a);

    // Newton on erf(x) - a.
    for _ in 0..2 {
        let slope = (2.0 / PI.sqrt()) * (-x * x).exp();
        if slope == 0.0 {
            break;
        }
        x -= (erf(x) - a) / slope;
    }

    x.copysign(y)
}

// Giles' single-precision approximation, used as the Newton starting point.
fn erfinv_initial(a: f64) -> f64 {
    let mut w = -((1.0 - a) * (1.0 + a)).ln();
    let p = if w < 5.0 {
        w -= 2.5;
        [
            3.432_739_39e-7,
            -3.523_387_7e-6,
            -4.391_506_54e-6,
            2.185_808_7e-4,
            -1.253_725_03e-3,
            -4.177_681_64e-3,
            2.466_407_27e-1,
            1.501_409_41,
        ]
        .iter()
        .fold(2.810_226_36e-8, |p, c| c + p * w)
    } else {
        w = w.sqrt() - 3.0;
        [
            1.009_505_58e-4,
            1.349_343_22e-3,
            -3.673_428_44e-3,
            5.739_507_73e-3,
            -7.622_461_3e-3,
            9.438_870_47e-3,
            1.001_674_06,
            2.832_976_82,
        ]
        .iter()
        .fold(-2.002_142_57e-4, |p, c| c + p * w)
    };
    p * a
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/math.rs"]
mod tests;
