//! Projective skeleton models.
//!
//! Projective storage is `(u, v, r)`: a disc of radius `r` centered at pixel
//! `(u, v)` in the model's 2D image frame. A storage vector lifts to a line
//! in the four-dimensional space of spheres `(x, y, z, radius)`: under
//! perspective projection the disc is the silhouette of a pencil of spheres
//! through the camera center whose radius grows along the viewing ray, while
//! under orthographic projection the radius is constant along the ray. That
//! lift is what linearizes the projection algebra for higher-level
//! algorithms.

use approx::abs_diff_eq;
use nalgebra::{Matrix2, SVector, Vector2, Vector3, Vector4};

use crate::camera::CameraHandle;
use crate::geometry::{Frame, FrameHandle, HyperEllipse, HyperSphere, Line, Point};
use crate::skeleton::model::{Model, ModelError, ModelKind, ToObject, ToStorage};

const INCLUSION_EPSILON: f64 = 1.0e-9;

/// The perspective projective model. Holds the camera whose intrinsics map
/// pixels to viewing rays and whose extrinsics place the 3D frame.
#[derive(Clone, Debug)]
pub struct Perspective {
    frame2: FrameHandle<2>,
    frame3: FrameHandle<3>,
    camera: CameraHandle,
}

impl Perspective {
    pub fn new(camera: CameraHandle) -> Self {
        let frame3 = camera.extrinsics().frame().clone();
        Perspective {
            frame2: Frame::<2>::canonical(),
            frame3,
            camera,
        }
    }

    pub fn with_frames(camera: CameraHandle, frame2: FrameHandle<2>, frame3: FrameHandle<3>) -> Self {
        Perspective {
            frame2,
            frame3,
            camera,
        }
    }

    pub fn camera(&self) -> &CameraHandle {
        &self.camera
    }

    fn silhouette(&self, storage: &SVector<f64, 3>) -> HyperEllipse<2> {
        let ray = self.camera.intrinsics().backproject(storage[0], storage[1]);
        let radius = storage[2];
        let radial = Vector2::new(ray[0], ray[1]);
        let axes = if radial.norm() <= 1.0e-12 {
            Matrix2::identity() * radius
        } else {
            // First-order obliquity: the silhouette stretches radially away
            // from the principal point by the norm of the viewing ray.
            let major = radial.normalize();
            let minor = Vector2::new(-major[1], major[0]);
            Matrix2::from_columns(&[major * radius * ray.norm(), minor * radius])
        };
        HyperEllipse::new(
            Point::new(Vector2::new(storage[0], storage[1])),
            axes,
            self.frame2.clone(),
        )
    }

    fn lift(&self, storage: &SVector<f64, 3>) -> Line<4> {
        let ray = self
            .camera
            .intrinsics()
            .backproject(storage[0], storage[1])
            .normalize();
        let direction3 = self.frame3.basis() * ray;
        let mut origin = Vector4::zeros();
        origin.fixed_rows_mut::<3>(0).copy_from(self.frame3.origin());
        let mut direction = Vector4::zeros();
        direction.fixed_rows_mut::<3>(0).copy_from(&direction3);
        direction[3] = storage[2];
        Line::new(Point::new(origin), direction.normalize(), Frame::<4>::canonical())
    }
}

/// The orthographic projective model. Pixels lift along the viewing axis of
/// the 3D frame and the radius does not depend on depth.
#[derive(Clone, Debug)]
pub struct Orthographic {
    frame2: FrameHandle<2>,
    frame3: FrameHandle<3>,
}

impl Orthographic {
    pub fn new(frame3: FrameHandle<3>) -> Self {
        Orthographic {
            frame2: Frame::<2>::canonical(),
            frame3,
        }
    }

    pub fn with_frames(frame2: FrameHandle<2>, frame3: FrameHandle<3>) -> Self {
        Orthographic { frame2, frame3 }
    }

    fn lift(&self, storage: &SVector<f64, 3>) -> Line<4> {
        let anchor = self
            .frame3
            .to_global(&Vector3::new(storage[0], storage[1], 0.0));
        let mut origin = Vector4::zeros();
        origin.fixed_rows_mut::<3>(0).copy_from(&anchor);
        origin[3] = storage[2];
        let mut direction = Vector4::zeros();
        direction
            .fixed_rows_mut::<3>(0)
            .copy_from(&self.frame3.axis(2));
        Line::new(Point::new(origin), direction.normalize(), Frame::<4>::canonical())
    }
}

/// A projective skeleton model: perspective or orthographic.
///
/// The enum is the conversion surface of the model family; variants opt into
/// the combinations that are geometrically meaningful for them and the rest
/// report [`ModelError::Unsupported`].
#[derive(Clone, Debug)]
pub enum Projective {
    Perspective(Perspective),
    Orthographic(Orthographic),
}

impl Projective {
    pub fn frame2(&self) -> &FrameHandle<2> {
        match self {
            Projective::Perspective(perspective) => &perspective.frame2,
            Projective::Orthographic(orthographic) => &orthographic.frame2,
        }
    }

    pub fn frame3(&self) -> &FrameHandle<3> {
        match self {
            Projective::Perspective(perspective) => &perspective.frame3,
            Projective::Orthographic(orthographic) => &orthographic.frame3,
        }
    }

    /// Flattens the 4D line lift of a storage vector into the 8-vector
    /// `[origin; direction]` intermediate used by projection algebra.
    pub fn to_r8(&self, storage: &SVector<f64, 3>) -> Result<SVector<f64, 8>, ModelError> {
        let line: Line<4> = self.to_object(storage)?;
        let mut flat = SVector::<f64, 8>::zeros();
        flat.fixed_rows_mut::<4>(0).copy_from(line.origin().coords());
        flat.fixed_rows_mut::<4>(4).copy_from(line.direction());
        Ok(flat)
    }
}

impl From<Perspective> for Projective {
    fn from(perspective: Perspective) -> Self {
        Projective::Perspective(perspective)
    }
}

impl From<Orthographic> for Projective {
    fn from(orthographic: Orthographic) -> Self {
        Projective::Orthographic(orthographic)
    }
}

impl Model for Projective {
    type Storage = SVector<f64, 3>;

    fn kind(&self) -> ModelKind {
        match self {
            Projective::Perspective(_) => ModelKind::Perspective,
            Projective::Orthographic(_) => ModelKind::Orthographic,
        }
    }

    fn size(&self, storage: &Self::Storage) -> f64 {
        storage[2]
    }

    fn resize(&self, storage: &Self::Storage, size: f64) -> Self::Storage {
        let mut resized = *storage;
        resized[2] = size;
        resized
    }

    // Containment in the image plane; both variants compare discs there.
    fn included(&self, inner: &Self::Storage, outer: &Self::Storage) -> bool {
        let offset = inner.fixed_rows::<2>(0) - outer.fixed_rows::<2>(0);
        let reach = offset.norm() + inner[2];
        reach <= outer[2] || abs_diff_eq!(reach, outer[2], epsilon = INCLUSION_EPSILON)
    }
}

impl ToStorage<HyperSphere<2>> for Projective {
    fn to_storage(&self, _: &HyperSphere<2>) -> Result<Self::Storage, ModelError> {
        // Projective storage is produced in image space by skeletonization,
        // never from Euclidean spheres.
        Err(ModelError::Unsupported {
            model: self.kind(),
            object: "hypersphere",
        })
    }
}

impl ToObject<Point<2>> for Projective {
    fn to_object(&self, storage: &Self::Storage) -> Result<Point<2>, ModelError> {
        Ok(Point::new(Vector2::new(storage[0], storage[1])))
    }
}

impl ToObject<HyperSphere<2>> for Projective {
    fn to_object(&self, storage: &Self::Storage) -> Result<HyperSphere<2>, ModelError> {
        Ok(HyperSphere::new(
            Point::new(Vector2::new(storage[0], storage[1])),
            storage[2],
            self.frame2().clone(),
        ))
    }
}

impl ToObject<HyperEllipse<2>> for Projective {
    fn to_object(&self, storage: &Self::Storage) -> Result<HyperEllipse<2>, ModelError> {
        match self {
            Projective::Perspective(perspective) => Ok(perspective.silhouette(storage)),
            Projective::Orthographic(_) => Err(ModelError::Unsupported {
                model: self.kind(),
                object: "hyperellipse",
            }),
        }
    }
}

impl ToObject<Line<4>> for Projective {
    fn to_object(&self, storage: &Self::Storage) -> Result<Line<4>, ModelError> {
        match self {
            Projective::Perspective(perspective) => Ok(perspective.lift(storage)),
            Projective::Orthographic(orthographic) => Ok(orthographic.lift(storage)),
        }
    }
}
