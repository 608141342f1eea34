//! Modified Bessel functions `I0, I1, K0, K1`, needed only by the Bessel
//! disk generator's rotation curve. Polynomial/rational
//! approximations from Abramowitz & Stegun 9.8; no crate in the
//! dependency graph supplies these (see DESIGN.md).

/// `I0(x)`, the zeroth-order modified Bessel function of the first kind.
pub fn i0(x: f64) -> f64 {
    let ax = x.abs();
    if ax < 3.75 {
        let t = (x / 3.75).powi(2);
        1.0 + t
            * (3.5156229
                + t * (3.0899424
                    + t * (1.2067492 + t * (0.2659732 + t * (0.0360768 + t * 0.0045813)))))
    } else {
        let t = 3.75 / ax;
        (ax.exp() / ax.sqrt())
            * (0.39894228
                + t * (0.01328592
                    + t * (0.00225319
                        + t * (-0.00157565
                            + t * (0.00916281
                                + t * (-0.02057706
                                    + t * (0.02635537 + t * (-0.01647633 + t * 0.00392377))))))))
    }
}

/// `I1(x)`, the first-order modified Bessel function of the first kind.
pub fn i1(x: f64) -> f64 {
    let ax = x.abs();
    let result = if ax < 3.75 {
        let t = (x / 3.75).powi(2);
        ax * (0.5
            + t * (0.87890594
                + t * (0.51498869
                    + t * (0.15084934 + t * (0.02658733 + t * (0.00301532 + t * 0.00032411))))))
    } else {
        let t = 3.75 / ax;
        let poly = 0.39894228
            + t * (-0.03988024
                + t * (-0.00362018
                    + t * (0.00163801
                        + t * (-0.01031555
                            + t * (0.02282967 + t * (-0.02895312 + t * (0.01787654 - t * 0.00420059)))))));
        (ax.exp() / ax.sqrt()) * poly
    };
    result.copysign(x)
}

/// `K0(x)`, the zeroth-order modified Bessel function of the second kind.
/// Defined for `x > 0`.
pub fn k0(x: f64) -> f64 {
    debug_assert!(x > 0.0, "K0 is only defined for positive arguments");
    if x <= 2.0 {
        let t = x * x / 4.0;
        -(x / 2.0).ln() * i0(x)
            + (-0.57721566
                + t * (0.42278420
                    + t * (0.23069756
                        + t * (0.03488590 + t * (0.00262698 + t * (0.00010750 + t * 0.00000740))))))
    } else {
        let t = 2.0 / x;
        ((-x).exp() / x.sqrt())
            * (1.25331414
                + t * (-0.07832358
                    + t * (0.02189568
                        + t * (-0.01062446
                            + t * (0.00587872 + t * (-0.00251540 + t * 0.00053208))))))
    }
}

/// `K1(x)`, the first-order modified Bessel function of the second kind.
/// Defined for `x > 0`.
pub fn k1(x: f64) -> f64 {
    debug_assert!(x > 0.0, "K1 is only defined for positive arguments");
    if x <= 2.0 {
        let t = x * x / 4.0;
        (x / 2.0).ln() * i1(x)
            + (1.0 / x)
                * (1.0
                    + t * (0.15443144
                        + t * (-0.67278579
                            + t * (-0.18156897
                                + t * (-0.01919402 + t * (-0.00110404 + t * -0.00004686))))))
    } else {
        let t = 2.0 / x;
        ((-x).exp() / x.sqrt())
            * (1.25331414
                + t * (0.23498619
                    + t * (-0.03655620
                        + t * (0.01504268
                            + t * (-0.00780353 + t * (0.00325614 - t * 0.00068245))))))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn i0_at_zero_is_one() {
        assert!((i0(0.0) - 1.0).abs() < 1e-12);
    }

    #[test]
    fn i1_at_zero_is_zero() {
        assert!(i1(0.0).abs() < 1e-12);
    }

    #[test]
    fn k0_decreases_with_x() {
        assert!(k0(0.5) > k0(1.0));
        assert!(k0(1.0) > k0(2.5));
    }

    #[test]
    fn bessel_product_decays_like_1_over_x_for_large_y() {
        // Asymptotically I0(y)K0(y) - I1(y)K1(y) ~ 1/(2y) for large y; this
        // is exactly the combination the Bessel rotation curve needs to
        // stay finite, so just check it keeps shrinking.
        let y1 = 3.0;
        let y2 = 6.0;
        let v1 = i0(y1) * k0(y1) - i1(y1) * k1(y1);
        let v2 = i0(y2) * k0(y2) - i1(y2) * k1(y2);
        assert!(v1 > 0.0 && v2 > 0.0);
        assert!(v2 < v1);
    }
}
