//! Pinhole camera calibration.
//!
//! A [`Camera`] pairs an intrinsic calibration (the pixel-to-ray map of the
//! sensor) with an extrinsic pose (the placement of the sensor in space,
//! expressed as a 3D frame). Both halves are immutable and shared by handle,
//! matching the frame-sharing convention of the [`geometry`] module: many
//! skeleton models may reference one calibration without copying it.
//!
//! [`geometry`]: crate::geometry

use nalgebra::{Vector2, Vector3};
use std::sync::Arc;

use crate::geometry::FrameHandle;

/// Shared handle to an immutable intrinsic calibration.
pub type IntrinsicsHandle = Arc<Intrinsics>;

/// Shared handle to an immutable extrinsic pose.
pub type ExtrinsicsHandle = Arc<Extrinsics>;

/// Shared handle to an immutable camera.
pub type CameraHandle = Arc<Camera>;

/// The intrinsic calibration of a pinhole camera.
///
/// Focal lengths and the principal point are in pixels. The distortion
/// coefficients follow the usual radial-tangential five-parameter layout and
/// are carried opaquely for consumers that undistort images upstream.
#[derive(Clone, Debug, PartialEq)]
pub struct Intrinsics {
    focal: (f64, f64),
    principal: (f64, f64),
    skew: f64,
    distortion: [f64; 5],
}

impl Intrinsics {
    pub fn new(fx: f64, fy: f64, cx: f64, cy: f64) -> Self {
        Intrinsics {
            focal: (fx, fy),
            principal: (cx, cy),
            skew: 0.0,
            distortion: [0.0; 5],
        }
    }

    pub fn with_skew(self, skew: f64) -> Self {
        Intrinsics { skew, ..self }
    }

    pub fn with_distortion(self, distortion: [f64; 5]) -> Self {
        Intrinsics { distortion, ..self }
    }

    pub fn focal(&self) -> (f64, f64) {
        self.focal
    }

    pub fn principal(&self) -> (f64, f64) {
        self.principal
    }

    pub fn skew(&self) -> f64 {
        self.skew
    }

    pub fn distortion(&self) -> &[f64; 5] {
        &self.distortion
    }

    /// Maps a pixel to the camera-space viewing ray through it, normalized to
    /// unit depth.
    pub fn backproject(&self, u: f64, v: f64) -> Vector3<f64> {
        let (fx, fy) = self.focal;
        let (cx, cy) = self.principal;
        let y = (v - cy) / fy;
        let x = (u - cx - self.skew * y) / fx;
        Vector3::new(x, y, 1.0)
    }

    /// Maps a camera-space point in front of the camera to its pixel.
    pub fn project(&self, point: &Vector3<f64>) -> Vector2<f64> {
        let (fx, fy) = self.focal;
        let (cx, cy) = self.principal;
        let x = point[0] / point[2];
        let y = point[1] / point[2];
        Vector2::new(fx * x + self.skew * y + cx, fy * y + cy)
    }
}

/// The extrinsic pose of a camera: the frame whose origin is the optical
/// center and whose third axis is the viewing direction.
#[derive(Clone, Debug, PartialEq)]
pub struct Extrinsics {
    frame: FrameHandle<3>,
}

impl Extrinsics {
    pub fn new(frame: FrameHandle<3>) -> Self {
        Extrinsics { frame }
    }

    pub fn frame(&self) -> &FrameHandle<3> {
        &self.frame
    }
}

/// A calibrated pinhole camera.
#[derive(Clone, Debug)]
pub struct Camera {
    intrinsics: IntrinsicsHandle,
    extrinsics: ExtrinsicsHandle,
}

impl Camera {
    pub fn new(intrinsics: IntrinsicsHandle, extrinsics: ExtrinsicsHandle) -> Self {
        Camera {
            intrinsics,
            extrinsics,
        }
    }

    pub fn intrinsics(&self) -> &IntrinsicsHandle {
        &self.intrinsics
    }

    pub fn extrinsics(&self) -> &ExtrinsicsHandle {
        &self.extrinsics
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;
    use nalgebra::{Vector2, Vector3};

    use crate::camera::Intrinsics;

    #[test]
    fn principal_point_backprojects_to_the_axis() {
        let intrinsics = Intrinsics::new(800.0, 800.0, 320.0, 240.0);
        assert_relative_eq!(
            intrinsics.backproject(320.0, 240.0),
            Vector3::new(0.0, 0.0, 1.0),
            epsilon = 1.0e-12
        );
    }

    #[test]
    fn projection_round_trip() {
        let intrinsics = Intrinsics::new(800.0, 640.0, 320.0, 240.0).with_skew(2.0);
        let pixel = Vector2::new(411.5, 198.25);
        let ray = intrinsics.backproject(pixel[0], pixel[1]);
        assert_relative_eq!(intrinsics.project(&ray), pixel, epsilon = 1.0e-9);
        assert_relative_eq!(intrinsics.project(&(ray * 7.0)), pixel, epsilon = 1.0e-9);
    }

    #[test]
    fn distortion_is_carried_opaquely() {
        let distortion = [0.1, -0.05, 0.001, -0.002, 0.0003];
        let intrinsics = Intrinsics::new(800.0, 800.0, 320.0, 240.0).with_distortion(distortion);
        assert_eq!(intrinsics.distortion(), &distortion);
    }
}
