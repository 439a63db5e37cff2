//! Constant-velocity Kalman filter on a 2-D point.
//!
//! State is `[x, y, vx, vy]`, the measurement is `[x, y]`.

use nalgebra::{Matrix2, Matrix2x4, Matrix4, Vector2, Vector4};

/// Initial variance of every state component.
const INITIAL_VARIANCE: f64 = 1000.0;
/// Variance of a centroid measurement.
const MEASUREMENT_VARIANCE: f64 = 10.0;
/// Variance added to every state component per step.
const PROCESS_VARIANCE: f64 = 1.0;

/// Filter mean and covariance.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct KalmanState {
    pub mean: Vector4<f64>,
    pub covariance: Matrix4<f64>,
}

impl KalmanState {
    pub fn position(&self) -> (f64, f64) {
        (self.mean[0], self.mean[1])
    }

    pub fn velocity(&self) -> (f64, f64) {
        (self.mean[2], self.mean[3])
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct KalmanFilter {
    motion_mat: Matrix4<f64>,
    update_mat: Matrix2x4<f64>,
    process_cov: Matrix4<f64>,
    measurement_cov: Matrix2<f64>,
    initial_variance: f64,
}

impl Default for KalmanFilter {
    fn default() -> Self {
        Self::new(INITIAL_VARIANCE, PROCESS_VARIANCE, MEASUREMENT_VARIANCE)
    }
}

impl KalmanFilter {
    pub fn new(initial_variance: f64, process_variance: f64, measurement_variance: f64) -> Self {
        #[rustfmt::skip]
        let motion_mat = Matrix4::new(
            1.0, 0.0, 1.0, 0.0,
            0.0, 1.0, 0.0, 1.0,
            0.0, 0.0, 1.0, 0.0,
            0.0, 0.0, 0.0, 1.0,
        );
        #[rustfmt::skip]
        let update_mat = Matrix2x4::new(
            1.0, 0.0, 0.0, 0.0,
            0.0, 1.0, 0.0, 0.0,
        );

        Self {
            motion_mat,
            update_mat,
            process_cov: Matrix4::identity() * process_variance,
            measurement_cov: Matrix2::identity() * measurement_variance,
            initial_variance,
        }
    }

    /// Start a track at rest at `(x, y)`.
    pub fn initiate(&self, x: f64, y: f64) -> KalmanState {
        KalmanState {
            mean: Vector4::new(x, y, 0.0, 0.0),
            covariance: Matrix4::identity() * self.initial_variance,
        }
    }

    /// Advance one time step.
    pub fn predict(&self, state: &KalmanState) -> KalmanState {
        let mean = self.motion_mat * state.mean;
        let covariance =
            self.motion_mat * state.covariance * self.motion_mat.transpose() + self.process_cov;
        KalmanState { mean, covariance }
    }

    /// Project the state into measurement space.
    pub fn project(&self, state: &KalmanState) -> (Vector2<f64>, Matrix2<f64>) {
        let mean = self.update_mat * state.mean;
        let covariance =
            self.update_mat * state.covariance * self.update_mat.transpose() + self.measurement_cov;
        (mean, covariance)
    }

    /// Fuse a position measurement.
    ///
    /// Returns `None` when the innovation covariance is singular.
    pub fn update(&self, state: &KalmanState, x: f64, y: f64) -> Option<KalmanState> {
        let (projected_mean, projected_cov) = self.project(state);
        let s_inv = projected_cov.try_inverse()?;

        // K = P * H^T * S^-1
        let kalman_gain = state.covariance * self.update_mat.transpose() * s_inv;
        let innovation = Vector2::new(x, y) - projected_mean;
        let mean = state.mean + kalman_gain * innovation;

        // Joseph form keeps the covariance symmetric.
        let i_kh = Matrix4::identity() - kalman_gain * self.update_mat;
        let covariance = i_kh * state.covariance * i_kh.transpose()
            + kalman_gain * self.measurement_cov * kalman_gain.transpose();

        Some(KalmanState { mean, covariance })
    }
}
