//! Simulation parameters and the equation of state.
//!
//! All configuration is explicit: the scheduler snapshots [`SphParams`]
//! into an [`SphUniform`] once per frame and hands that to both passes,
//! so no kernel ever reads mutable process-wide state.

use bevy::prelude::*;

use super::kernel::SphKernels;

/// Parameters controlling the fluid simulation.
///
/// The defaults reproduce the reference configuration: a 600×600 domain
/// with 1024 particles splashing under strong gravity. All values are
/// read-only for the duration of a frame.
#[derive(Resource, Clone, Debug, Reflect)]
#[reflect(Resource)]
pub struct SphParams {
    /// Viscosity coefficient. Higher values damp relative motion harder.
    pub viscosity: f32,

    /// Mass of a single particle.
    pub particle_mass: f32,

    /// Smoothing kernel radius (h). Particles farther apart than this do
    /// not interact.
    pub smoothing_radius: f32,

    /// Gravity acceleration vector.
    pub gravity: Vec2,

    /// Fixed integration timestep in seconds.
    pub time_step: f32,

    /// Maximum particle speed; velocities are clamped to this magnitude
    /// after every integration step.
    pub max_speed: f32,

    /// Rest density of the fluid; the equation of state pivots here.
    pub rest_density: f32,

    /// Stiffness of the equation of state.
    pub gas_constant: f32,

    /// Velocity scale applied on wall collision, in `[0, 1)`.
    pub damping: f32,

    /// Domain extents; particles live in `[0, x) × [0, y)`.
    pub domain: Vec2,

    /// Number of particles, fixed for the simulation's lifetime.
    pub particle_count: usize,

    /// Lanes per dispatch group.
    pub group_size: usize,

    /// Full two-pass simulation steps per rendered frame.
    pub steps_per_frame: u32,

    /// Clamp negative pressures to zero, so particles at or below rest
    /// density exert no pressure force. When false, below-rest densities
    /// produce an attractive correction instead.
    pub clamp_negative_pressure: bool,

    /// Lower bound applied to a density before forces are divided by it.
    pub density_floor: f32,
}

impl Default for SphParams {
    fn default() -> Self {
        Self {
            viscosity: 10.0,
            particle_mass: 1.0,
            smoothing_radius: 16.0,
            gravity: Vec2::new(0.0, -200.0),
            time_step: 0.005,
            max_speed: 200.0,
            rest_density: 8.0,
            gas_constant: 200.0,
            damping: 0.6,
            domain: Vec2::new(600.0, 600.0),
            particle_count: 1024,
            group_size: 256,
            steps_per_frame: 1,
            clamp_negative_pressure: true,
            density_floor: 1e-6,
        }
    }
}

impl SphParams {
    /// Sets the particle count.
    pub fn with_particle_count(mut self, count: usize) -> Self {
        self.particle_count = count;
        self
    }

    /// Sets the gravity vector.
    pub fn with_gravity(mut self, gravity: Vec2) -> Self {
        self.gravity = gravity;
        self
    }

    /// Sets the viscosity coefficient.
    pub fn with_viscosity(mut self, viscosity: f32) -> Self {
        self.viscosity = viscosity;
        self
    }

    /// Sets the equation-of-state stiffness.
    pub fn with_gas_constant(mut self, gas_constant: f32) -> Self {
        self.gas_constant = gas_constant;
        self
    }

    /// Sets the rest density.
    pub fn with_rest_density(mut self, rest_density: f32) -> Self {
        self.rest_density = rest_density;
        self
    }

    /// Checks every numeric precondition the passes rely on.
    ///
    /// A failure here is fatal at startup: the simulation must not run
    /// with a configuration the kernels cannot handle.
    pub fn validate(&self) -> Result<(), String> {
        if self.particle_count == 0 {
            return Err("particle_count must be nonzero".into());
        }
        if self.group_size == 0 {
            return Err("group_size must be nonzero".into());
        }
        if self.steps_per_frame == 0 {
            return Err("steps_per_frame must be nonzero".into());
        }
        if !(self.smoothing_radius > 0.0) {
            return Err(format!(
                "smoothing_radius must be positive, got {}",
                self.smoothing_radius
            ));
        }
        if !(self.particle_mass > 0.0) {
            return Err(format!("particle_mass must be positive, got {}", self.particle_mass));
        }
        if !(self.time_step > 0.0) {
            return Err(format!("time_step must be positive, got {}", self.time_step));
        }
        if !(self.max_speed > 0.0) {
            return Err(format!("max_speed must be positive, got {}", self.max_speed));
        }
        if !(self.density_floor > 0.0) {
            return Err(format!("density_floor must be positive, got {}", self.density_floor));
        }
        if !(self.domain.x > 0.0 && self.domain.y > 0.0) {
            return Err(format!("domain extents must be positive, got {}", self.domain));
        }
        if !(0.0..1.0).contains(&self.damping) {
            return Err(format!("damping must lie in [0, 1), got {}", self.damping));
        }
        Ok(())
    }
}

/// Per-frame parameter block handed to both passes.
///
/// `#[repr(C)]` and `Pod`, so the same bytes could be bound as a GPU
/// uniform; the kernel coefficients are precomputed once per frame.
#[repr(C)]
#[derive(Clone, Copy, Debug, bytemuck::Pod, bytemuck::Zeroable)]
pub struct SphUniform {
    pub viscosity: f32,
    pub particle_mass: f32,
    pub smoothing_radius: f32,
    pub smoothing_radius_sq: f32,

    pub gravity: [f32; 2],
    pub time_step: f32,
    pub max_speed: f32,

    pub rest_density: f32,
    pub gas_constant: f32,
    pub damping: f32,
    pub density_floor: f32,

    pub domain: [f32; 2],
    pub poly6_coeff: f32,
    pub spiky_grad_coeff: f32,

    pub visc_lap_coeff: f32,
    pub particle_count: u32,
    pub clamp_negative_pressure: u32,
    pub _padding: f32,
}

impl SphUniform {
    pub fn from_params(params: &SphParams) -> Self {
        let h = params.smoothing_radius;

        Self {
            viscosity: params.viscosity,
            particle_mass: params.particle_mass,
            smoothing_radius: h,
            smoothing_radius_sq: h * h,
            gravity: params.gravity.to_array(),
            time_step: params.time_step,
            max_speed: params.max_speed,
            rest_density: params.rest_density,
            gas_constant: params.gas_constant,
            damping: params.damping,
            density_floor: params.density_floor,
            domain: params.domain.to_array(),
            poly6_coeff: SphKernels::poly6_coefficient(h),
            spiky_grad_coeff: SphKernels::spiky_gradient_coefficient(h),
            visc_lap_coeff: SphKernels::viscosity_laplacian_coefficient(h),
            particle_count: params.particle_count as u32,
            clamp_negative_pressure: params.clamp_negative_pressure as u32,
            _padding: 0.0,
        }
    }

    /// Equation of state: `pressure = gas_constant × (density − rest_density)`,
    /// clamped to zero below rest density when the clamp policy is on.
    #[inline]
    pub fn pressure(&self, density: f32) -> f32 {
        let pressure = self.gas_constant * (density - self.rest_density);
        if self.clamp_negative_pressure != 0 {
            pressure.max(0.0)
        } else {
            pressure
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_uniform_layout() {
        // 20 four-byte fields; stride a multiple of 16 for uniform binding
        assert_eq!(std::mem::size_of::<SphUniform>(), 80);
    }

    #[test]
    fn test_uniform_precomputes_coefficients() {
        let params = SphParams::default();
        let uniform = SphUniform::from_params(&params);
        let h = params.smoothing_radius;

        assert_eq!(uniform.smoothing_radius_sq, h * h);
        assert_eq!(uniform.poly6_coeff, SphKernels::poly6_coefficient(h));
        assert_eq!(uniform.spiky_grad_coeff, SphKernels::spiky_gradient_coefficient(h));
        assert_eq!(uniform.visc_lap_coeff, SphKernels::viscosity_laplacian_coefficient(h));
    }

    #[test]
    fn test_pressure_equation_of_state() {
        let params = SphParams::default().with_rest_density(8.0).with_gas_constant(200.0);
        let uniform = SphUniform::from_params(&params);

        // At rest density, pressure vanishes
        assert_eq!(uniform.pressure(8.0), 0.0);

        // Above rest density, pressure pushes outward
        assert_eq!(uniform.pressure(10.0), 200.0 * 2.0);

        // Below rest density, the default policy clamps to zero
        assert_eq!(uniform.pressure(2.0), 0.0);
    }

    #[test]
    fn test_pressure_without_clamp() {
        let params = SphParams {
            clamp_negative_pressure: false,
            ..SphParams::default()
        };
        let uniform = SphUniform::from_params(&params);

        assert!(uniform.pressure(2.0) < 0.0);
    }

    #[test]
    fn test_validate_accepts_defaults() {
        assert!(SphParams::default().validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_bad_configs() {
        assert!(SphParams::default().with_particle_count(0).validate().is_err());

        let zero_group = SphParams {
            group_size: 0,
            ..SphParams::default()
        };
        assert!(zero_group.validate().is_err());

        let negative_radius = SphParams {
            smoothing_radius: -1.0,
            ..SphParams::default()
        };
        assert!(negative_radius.validate().is_err());

        let nan_timestep = SphParams {
            time_step: f32::NAN,
            ..SphParams::default()
        };
        assert!(nan_timestep.validate().is_err());

        let bouncy = SphParams {
            damping: 1.0,
            ..SphParams::default()
        };
        assert!(bouncy.validate().is_err());
    }
}
