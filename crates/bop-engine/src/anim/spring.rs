use serde::Deserialize;

/// Physical parameters of a [`Spring`].
///
/// Critical damping is `2 * sqrt(stiffness * mass)`; the defaults sit just
/// under it (damping ratio ≈ 0.9), so a released card overshoots by a hair
/// and settles in well under a second without ringing.
#[derive(Debug, Copy, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SpringParams {
    pub stiffness: f32,
    pub damping: f32,
    pub mass: f32,
    /// Distance from target below which the spring may rest.
    pub rest_delta: f32,
    /// Speed below which the spring may rest.
    pub rest_speed: f32,
}

impl Default for SpringParams {
    fn default() -> Self {
        Self { stiffness: 180.0, damping: 24.0, mass: 1.0, rest_delta: 0.01, rest_speed: 0.05 }
    }
}

impl SpringParams {
    /// Damping ratio ζ; `1.0` is critical.
    pub fn damping_ratio(&self) -> f32 {
        self.damping / (2.0 * (self.stiffness * self.mass).sqrt())
    }
}

/// Integration sub-step (seconds). Keeps stiff springs stable at low frame rates.
const SUBSTEP: f32 = 1.0 / 240.0;

/// Damped spring pulling `value` toward `target`.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Spring {
    value: f32,
    velocity: f32,
    target: f32,
    params: SpringParams,
    settled: bool,
}

impl Spring {
    pub fn new(value: f32, target: f32, params: SpringParams) -> Self {
        let mut s = Self { value, velocity: 0.0, target, params, settled: false };
        s.try_settle();
        s
    }

    #[inline]
    pub fn value(&self) -> f32 {
        self.value
    }

    #[inline]
    pub fn velocity(&self) -> f32 {
        self.velocity
    }

    #[inline]
    pub fn target(&self) -> f32 {
        self.target
    }

    #[inline]
    pub fn is_settled(&self) -> bool {
        self.settled
    }

    /// Advances by `dt` seconds. Returns `true` once settled on the target.
    pub fn step(&mut self, dt: f32) -> bool {
        if self.settled || dt <= 0.0 {
            return self.settled;
        }

        let SpringParams { stiffness, damping, mass, .. } = self.params;
        let mass = mass.max(f32::EPSILON);

        let mut remaining = dt;
        while remaining > 0.0 {
            let h = remaining.min(SUBSTEP);
            let displacement = self.value - self.target;
            let accel = (-stiffness * displacement - damping * self.velocity) / mass;
            // Semi-implicit Euler: velocity first, then position.
            self.velocity += accel * h;
            self.value += self.velocity * h;
            remaining -= h;
        }

        self.try_settle();
        self.settled
    }

    fn try_settle(&mut self) {
        if (self.value - self.target).abs() <= self.params.rest_delta
            && self.velocity.abs() <= self.params.rest_speed
        {
            self.value = self.target;
            self.velocity = 0.0;
            self.settled = true;
        }
    }
}
