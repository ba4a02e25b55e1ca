//! Scalar ODE integration for the slow-response moisture classes.
//!
//! The spread and danger equations are explicit algebra and never go through
//! here. Only the 100-hr and 1000-hr moisture states are advanced by
//! integrating dy/dt = f(t, y) across one observation interval.
use crate::error::SolverError;

/// Right-hand side of a scalar ODE dy/dt = f(t, y).
pub trait ScalarOde {
    fn rhs(&self, t: f64, y: f64) -> f64;
}

/// Integrates a [`ScalarOde`] from `t0` to `t1` and returns y(t1).
pub trait EquationSolver: Send + Sync {
    fn integrate(
        &self,
        system: &dyn ScalarOde,
        t0: f64,
        y0: f64,
        t1: f64,
    ) -> Result<f64, SolverError>;
}

/// First-order relaxation toward a boundary value that moves linearly from
/// `boundary_start` at t=0 to `boundary_end` at t=`duration`.
#[derive(Debug, Clone, Copy)]
pub struct RelaxationOde {
    pub boundary_start: f64,
    pub boundary_end: f64,
    pub duration: f64,
    /// response coefficient [1/day]
    pub response: f64,
}

impl RelaxationOde {
    pub fn boundary(&self, t: f64) -> f64 {
        if self.duration <= 0.0 {
            return self.boundary_end;
        }
        let w = (t / self.duration).clamp(0.0, 1.0);
        self.boundary_start + (self.boundary_end - self.boundary_start) * w
    }
}

impl ScalarOde for RelaxationOde {
    fn rhs(&self, t: f64, y: f64) -> f64 {
        (self.boundary(t) - y) * self.response
    }
}

/// Classic fixed-step fourth order Runge-Kutta.
#[derive(Debug, Clone, Copy)]
pub struct RungeKutta4 {
    pub steps: usize,
}

impl Default for RungeKutta4 {
    fn default() -> Self {
        // hourly steps over a daily interval
        Self { steps: 24 }
    }
}

impl EquationSolver for RungeKutta4 {
    fn integrate(
        &self,
        system: &dyn ScalarOde,
        t0: f64,
        y0: f64,
        t1: f64,
    ) -> Result<f64, SolverError> {
        if self.steps == 0 || !t0.is_finite() || !t1.is_finite() || t1 < t0 {
            return Err(SolverError::InvalidSetup {
                t0,
                t1,
                steps: self.steps,
            });
        }
        let diverged = |reason: String| SolverError::NonConvergence { t0, t1, y0, reason };
        if !y0.is_finite() {
            return Err(diverged("initial value is not finite".into()));
        }

        let h = (t1 - t0) / self.steps as f64;
        let mut t = t0;
        let mut y = y0;
        for step in 0..self.steps {
            let k1 = system.rhs(t, y);
            let k2 = system.rhs(t + 0.5 * h, y + 0.5 * h * k1);
            let k3 = system.rhs(t + 0.5 * h, y + 0.5 * h * k2);
            let k4 = system.rhs(t + h, y + h * k3);
            y += h / 6.0 * (k1 + 2.0 * k2 + 2.0 * k3 + k4);
            t = t0 + (step + 1) as f64 * h;
            if !y.is_finite() {
                return Err(diverged(format!("non-finite state at t={t}")));
            }
        }
        Ok(y)
    }
}
