//! Euclidean skeleton models.

use approx::abs_diff_eq;
use nalgebra::SVector;

use crate::geometry::{FrameHandle, HyperSphere, Point};
use crate::skeleton::model::{Model, ModelError, ModelKind, ToObject, ToStorage};

/// Containment is tolerant to this absolute error so that spheres produced
/// by `resize` compare as included in themselves.
const INCLUSION_EPSILON: f64 = 1.0e-9;

/// The plain Euclidean model: nodes are maximal hyperspheres stored as
/// `[center; radius]` in the model's frame.
#[derive(Clone, Debug)]
pub struct Classic<const D: usize> {
    frame: FrameHandle<D>,
}

pub type Classic2 = Classic<2>;
pub type Classic3 = Classic<3>;

impl<const D: usize> Classic<D> {
    pub fn new(frame: FrameHandle<D>) -> Self {
        Classic { frame }
    }

    pub fn frame(&self) -> &FrameHandle<D> {
        &self.frame
    }
}

macro_rules! impl_classic {
    ($dim:literal, $stor:literal) => {
        impl Model for Classic<$dim> {
            type Storage = SVector<f64, $stor>;

            fn kind(&self) -> ModelKind {
                ModelKind::Euclidean
            }

            fn size(&self, storage: &Self::Storage) -> f64 {
                storage[$dim]
            }

            fn resize(&self, storage: &Self::Storage, size: f64) -> Self::Storage {
                let mut resized = *storage;
                resized[$dim] = size;
                resized
            }

            fn included(&self, inner: &Self::Storage, outer: &Self::Storage) -> bool {
                let offset = inner.fixed_rows::<$dim>(0) - outer.fixed_rows::<$dim>(0);
                let reach = offset.norm() + inner[$dim];
                reach <= outer[$dim] || abs_diff_eq!(reach, outer[$dim], epsilon = INCLUSION_EPSILON)
            }
        }

        impl ToStorage<HyperSphere<$dim>> for Classic<$dim> {
            fn to_storage(&self, sphere: &HyperSphere<$dim>) -> Result<Self::Storage, ModelError> {
                let center = self.frame.to_local(&sphere.center_global());
                let mut storage = Self::Storage::zeros();
                storage.fixed_rows_mut::<$dim>(0).copy_from(&center);
                storage[$dim] = sphere.radius();
                Ok(storage)
            }
        }

        impl ToObject<Point<$dim>> for Classic<$dim> {
            fn to_object(&self, storage: &Self::Storage) -> Result<Point<$dim>, ModelError> {
                Ok(Point::new(storage.fixed_rows::<$dim>(0).into_owned()))
            }
        }

        impl ToObject<HyperSphere<$dim>> for Classic<$dim> {
            fn to_object(&self, storage: &Self::Storage) -> Result<HyperSphere<$dim>, ModelError> {
                Ok(HyperSphere::new(
                    Point::new(storage.fixed_rows::<$dim>(0).into_owned()),
                    storage[$dim],
                    self.frame.clone(),
                ))
            }
        }
    };
}
impl_classic!(2, 3);
impl_classic!(3, 4);
