//! Eye landmark types.
//!
//! The landmark model reports a dense face mesh. The gaze estimator needs
//! only five points around one eye; [`EyeLandmark`] names them and records
//! where they sit in the 478-point face-mesh topology (468 mesh points plus
//! 10 iris points).

use serde::{Deserialize, Serialize};

/// A normalized 2D point. `(0.0, 0.0)` is the top-left of the frame.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point2D {
    pub x: f64,
    pub y: f64,
}

impl Point2D {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Whether both coordinates lie in `[0.0, 1.0]`.
    pub fn is_normalized(&self) -> bool {
        (0.0..=1.0).contains(&self.x) && (0.0..=1.0).contains(&self.y)
    }
}

/// The five landmarks the gaze estimator reads.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EyeLandmark {
    IrisCenter,
    InnerCorner,
    OuterCorner,
    TopLid,
    BottomLid,
}

impl EyeLandmark {
    pub const ALL: [EyeLandmark; 5] = [
        EyeLandmark::IrisCenter,
        EyeLandmark::InnerCorner,
        EyeLandmark::OuterCorner,
        EyeLandmark::TopLid,
        EyeLandmark::BottomLid,
    ];

    /// Index of this landmark in the refined face mesh (right eye).
    pub fn mesh_index(self) -> usize {
        match self {
            EyeLandmark::IrisCenter => 468,
            EyeLandmark::InnerCorner => 133,
            EyeLandmark::OuterCorner => 33,
            EyeLandmark::TopLid => 159,
            EyeLandmark::BottomLid => 145,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            EyeLandmark::IrisCenter => "iris_center",
            EyeLandmark::InnerCorner => "inner_corner",
            EyeLandmark::OuterCorner => "outer_corner",
            EyeLandmark::TopLid => "top_lid",
            EyeLandmark::BottomLid => "bottom_lid",
        }
    }
}

/// One eye's landmarks for one detected face.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LandmarkSet {
    pub iris_center: Point2D,
    pub inner_corner: Point2D,
    pub outer_corner: Point2D,
    pub top_lid: Point2D,
    pub bottom_lid: Point2D,
}

impl LandmarkSet {
    /// Pick the eye landmarks out of a full face mesh.
    ///
    /// Returns `None` when the mesh is too short to contain the iris points.
    pub fn from_mesh(mesh: &[Point2D]) -> Option<Self> {
        let at = |lm: EyeLandmark| mesh.get(lm.mesh_index()).copied();
        Some(Self {
            iris_center: at(EyeLandmark::IrisCenter)?,
            inner_corner: at(EyeLandmark::InnerCorner)?,
            outer_corner: at(EyeLandmark::OuterCorner)?,
            top_lid: at(EyeLandmark::TopLid)?,
            bottom_lid: at(EyeLandmark::BottomLid)?,
        })
    }

    pub fn get(&self, landmark: EyeLandmark) -> Point2D {
        match landmark {
            EyeLandmark::IrisCenter => self.iris_center,
            EyeLandmark::InnerCorner => self.inner_corner,
            EyeLandmark::OuterCorner => self.outer_corner,
            EyeLandmark::TopLid => self.top_lid,
            EyeLandmark::BottomLid => self.bottom_lid,
        }
    }

    /// Landmarks that fall outside the normalized frame.
    pub fn out_of_frame(&self) -> Vec<EyeLandmark> {
        EyeLandmark::ALL
            .into_iter()
            .filter(|lm| !self.get(*lm).is_normalized())
            .collect()
    }

    /// Build a set whose geometry yields exactly the requested gaze vector.
    ///
    /// The eye box spans `[0.4, 0.6]` horizontally and `[0.45, 0.55]`
    /// vertically; the iris is placed at `(gaze_x, gaze_y)` inside it. Used by
    /// synthetic sources and tests.
    pub fn for_gaze(gaze_x: f64, gaze_y: f64) -> Self {
        let inner = Point2D::new(0.4, 0.5);
        let outer = Point2D::new(0.6, 0.5);
        let top = Point2D::new(0.5, 0.45);
        let bottom = Point2D::new(0.5, 0.55);
        let width = outer.x - inner.x;
        let height = bottom.y - top.y;
        Self {
            iris_center: Point2D::new(inner.x + gaze_x * width, top.y + gaze_y * height),
            inner_corner: inner,
            outer_corner: outer,
            top_lid: top,
            bottom_lid: bottom,
        }
    }
}
