//! 2D SPH smoothing kernels.
//!
//! Standard Müller-style kernels reduced to two dimensions: poly6 for
//! density estimation, the spiky gradient for pressure forces and the
//! viscosity Laplacian for velocity smoothing. Every kernel has compact
//! support: it is exactly zero at and beyond the smoothing radius `h`.

use bevy::prelude::*;
use std::f32::consts::PI;

/// SPH kernel functions over a 2D support disc of radius `h`.
pub struct SphKernels;

impl SphKernels {
    /// Normalization constant of the poly6 kernel, `4 / (π h⁸)`.
    #[inline]
    pub fn poly6_coefficient(h: f32) -> f32 {
        4.0 / (PI * h.powi(8))
    }

    /// Normalization constant of the spiky gradient, `-30 / (π h⁵)`.
    #[inline]
    pub fn spiky_gradient_coefficient(h: f32) -> f32 {
        -30.0 / (PI * h.powi(5))
    }

    /// Normalization constant of the viscosity Laplacian, `40 / (π h⁵)`.
    #[inline]
    pub fn viscosity_laplacian_coefficient(h: f32) -> f32 {
        40.0 / (PI * h.powi(5))
    }

    /// Poly6 kernel for density estimation.
    /// W(r, h) = (4 / πh⁸) * (h² - r²)³ for r ≤ h
    #[inline]
    pub fn poly6(r_sq: f32, h: f32) -> f32 {
        Self::poly6_with_coeff(r_sq, h, Self::poly6_coefficient(h))
    }

    /// Poly6 kernel with precomputed coefficient.
    #[inline]
    pub fn poly6_with_coeff(r_sq: f32, h: f32, coeff: f32) -> f32 {
        if r_sq >= h * h {
            return 0.0;
        }
        let diff = h * h - r_sq;
        coeff * diff * diff * diff
    }

    /// Gradient of the spiky kernel for pressure forces.
    /// ∇W(r, h) = -(30 / πh⁵) * (h - |r|)² * (r / |r|) for 0 < |r| ≤ h
    #[inline]
    pub fn spiky_gradient(r: Vec2, h: f32) -> Vec2 {
        Self::spiky_gradient_with_coeff(r, h, Self::spiky_gradient_coefficient(h))
    }

    /// Spiky gradient with precomputed coefficient.
    #[inline]
    pub fn spiky_gradient_with_coeff(r: Vec2, h: f32, coeff: f32) -> Vec2 {
        let r_len = r.length();
        if r_len >= h || r_len < 1e-6 {
            return Vec2::ZERO;
        }
        let diff = h - r_len;
        coeff * diff * diff * (r / r_len)
    }

    /// Laplacian of the viscosity kernel.
    /// ∇²W(r, h) = (40 / πh⁵) * (h - |r|) for |r| ≤ h
    #[inline]
    pub fn viscosity_laplacian(r_len: f32, h: f32) -> f32 {
        Self::viscosity_laplacian_with_coeff(r_len, h, Self::viscosity_laplacian_coefficient(h))
    }

    /// Viscosity Laplacian with precomputed coefficient.
    #[inline]
    pub fn viscosity_laplacian_with_coeff(r_len: f32, h: f32, coeff: f32) -> f32 {
        if r_len >= h {
            return 0.0;
        }
        coeff * (h - r_len)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_poly6_kernel() {
        let h = 16.0;

        // At r=0, kernel is maximal
        let w_0 = SphKernels::poly6(0.0, h);
        assert!(w_0 > 0.0);

        // At r=h, kernel is 0
        let w_h = SphKernels::poly6(h * h, h);
        assert!(w_h.abs() < 1e-12);

        // Kernel decreases with distance
        let w_half = SphKernels::poly6(0.25 * h * h, h);
        assert!(w_half < w_0);
        assert!(w_half > w_h);
    }

    #[test]
    fn test_poly6_integrates_to_one() {
        // Numerically integrate W over its 2D support in polar form:
        // ∫₀ʰ W(r) 2πr dr should come out near 1.
        let h = 16.0;
        let steps = 20_000;
        let dr = h / steps as f32;

        let mut integral = 0.0;
        for k in 0..steps {
            let r = (k as f32 + 0.5) * dr;
            integral += SphKernels::poly6(r * r, h) * 2.0 * PI * r * dr;
        }

        assert!((integral - 1.0).abs() < 1e-2, "integral was {integral}");
    }

    #[test]
    fn test_spiky_gradient() {
        let h = 1.0;

        // At r=0 the gradient has no defined direction and is zero
        let grad_0 = SphKernels::spiky_gradient(Vec2::ZERO, h);
        assert!(grad_0.length() < 1e-6);

        // At and beyond r=h the gradient vanishes
        let grad_h = SphKernels::spiky_gradient(Vec2::new(h, 0.0), h);
        assert!(grad_h.length() < 1e-6);

        // The gradient points from i toward j for r = p_i - p_j
        let r = Vec2::new(0.5, 0.0);
        let grad = SphKernels::spiky_gradient(r, h);
        assert!(grad.x < 0.0);
        assert!(grad.y.abs() < 1e-6);
    }

    #[test]
    fn test_spiky_gradient_antisymmetric() {
        let h = 16.0;
        let r = Vec2::new(5.0, -3.0);

        let forward = SphKernels::spiky_gradient(r, h);
        let backward = SphKernels::spiky_gradient(-r, h);

        assert!((forward + backward).length() < 1e-6);
    }

    #[test]
    fn test_viscosity_laplacian() {
        let h = 16.0;

        // Positive inside the support, decreasing toward the radius
        let near = SphKernels::viscosity_laplacian(1.0, h);
        let far = SphKernels::viscosity_laplacian(h * 0.9, h);
        assert!(near > far);
        assert!(far > 0.0);

        // Zero at and beyond the radius
        assert_eq!(SphKernels::viscosity_laplacian(h, h), 0.0);
        assert_eq!(SphKernels::viscosity_laplacian(h * 2.0, h), 0.0);
    }

    #[test]
    fn test_precomputed_coefficients_match() {
        let h = 16.0;
        let r = Vec2::new(4.0, 3.0);
        let r_sq = r.length_squared();

        assert_eq!(
            SphKernels::poly6(r_sq, h),
            SphKernels::poly6_with_coeff(r_sq, h, SphKernels::poly6_coefficient(h)),
        );
        assert_eq!(
            SphKernels::spiky_gradient(r, h),
            SphKernels::spiky_gradient_with_coeff(r, h, SphKernels::spiky_gradient_coefficient(h)),
        );
        assert_eq!(
            SphKernels::viscosity_laplacian(5.0, h),
            SphKernels::viscosity_laplacian_with_coeff(
                5.0,
                h,
                SphKernels::viscosity_laplacian_coefficient(h),
            ),
        );
    }
}
