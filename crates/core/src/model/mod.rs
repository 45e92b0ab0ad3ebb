//! Projecting 3D models onto the screen. A [Mesh] is pure geometry in model
//! space. A [MeshProjector] glues a mesh to an [Anchor] (where the model
//! currently is in the world), and answers screen-space questions about it
//! through a [Scene] (what the world and camera currently look like).

pub mod mesh;

use crate::{
    model::mesh::Mesh,
    render::{
        camera::Camera,
        config::{ScreenConfig, ScreenMode},
        unit::{ScreenPoint, ScreenRect, ScreenTriangle},
        LineSurface,
    },
};
use anyhow::Context;
use derive_more::Display;
use log::{debug, trace};
use nalgebra::Point3;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fmt;
use validator::Validate;

/// Where a model sits in the world for the current frame. `x` and `y` are in
/// world units on the ground plane (so `y` here maps to world **`z`**, since
/// world `y` is height), and `plane` is the floor level.
#[derive(
    Copy,
    Clone,
    Debug,
    Default,
    Display,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
)]
#[display(fmt = "({}, {}, {})", x, y, plane)]
#[serde(default)]
pub struct Pose {
    pub x: i32,
    pub y: i32,
    pub plane: i32,
}

impl Pose {
    pub const fn new(x: i32, y: i32, plane: i32) -> Self {
        Self { x, y, plane }
    }
}

/// Something that a model is attached to, e.g. a character or an object. The
/// pose can change from frame to frame.
pub trait Anchor {
    /// The anchor's pose as of the last [Anchor::refresh]
    fn pose(&self) -> Pose;

    /// Pull the latest pose from wherever it lives. Called once at the start
    /// of every public [MeshProjector] query.
    fn refresh(&mut self) {}
}

/// Read access to the state of the world for the current frame. The
/// projector never caches anything from here, so every query sees the latest
/// camera.
pub trait Scene {
    /// Ground height of the world at the given position, in the same units as
    /// mesh heights
    fn tile_height(&self, x: i32, y: i32, plane: i32) -> i32;

    /// The camera for the current frame
    fn camera(&self) -> Camera;

    fn screen_mode(&self) -> ScreenMode;

    /// A rectangle of screen that's covered up by interface, if one is
    /// currently visible. Face picking avoids anything under it.
    fn exclusion_rect(&self) -> Option<ScreenRect>;
}

/// A single model vertex after projection
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectedVertex {
    /// Screen position, or [ScreenPoint::OFF_SCREEN] if not visible
    pub point: ScreenPoint,
    /// Did the vertex land inside the view frustum?
    pub visible: bool,
}

impl ProjectedVertex {
    const HIDDEN: Self = Self {
        point: ScreenPoint::OFF_SCREEN,
        visible: false,
    };

    /// Visibility as `1` or `0`
    pub fn visible_flag(&self) -> u8 {
        self.visible as u8
    }
}

/// A [Mesh] attached to an [Anchor], ready to be projected onto the screen.
///
/// Every public query takes the scene for the current frame and refreshes
/// the anchor once before doing any work. Nothing is cached between queries,
/// since the camera and the anchor both move constantly.
#[derive(Clone, Debug)]
pub struct MeshProjector<A: Anchor> {
    mesh: Mesh,
    anchor: A,
    screen: ScreenConfig,
}

impl<A: Anchor> MeshProjector<A> {
    /// Create a projector with the default [ScreenConfig]
    pub fn new(mesh: Mesh, anchor: A) -> Self {
        Self {
            mesh,
            anchor,
            screen: ScreenConfig::default(),
        }
    }

    /// Create a projector with a custom screen layout. Returns an error if
    /// the config is invalid.
    pub fn with_screen_config(
        mesh: Mesh,
        anchor: A,
        screen: ScreenConfig,
    ) -> anyhow::Result<Self> {
        screen.validate().context("invalid screen config")?;
        Ok(Self {
            mesh,
            anchor,
            screen,
        })
    }

    pub fn mesh(&self) -> &Mesh {
        &self.mesh
    }

    pub fn anchor(&self) -> &A {
        &self.anchor
    }

    pub fn screen_config(&self) -> &ScreenConfig {
        &self.screen
    }

    /// Project every vertex of the mesh onto the screen. The output has one
    /// entry per vertex, in vertex order.
    pub fn project_vertices(
        &mut self,
        scene: &impl Scene,
    ) -> Vec<ProjectedVertex> {
        self.anchor.refresh();
        self.project_all(scene)
    }

    /// Get the screen triangle of every face that's fully visible, in face
    /// order
    pub fn triangles(&mut self, scene: &impl Scene) -> Vec<ScreenTriangle> {
        let projected = self.project_vertices(scene);
        self.visible_triangles(&projected).map(|(_, tri)| tri).collect()
    }

    /// Is the given screen point on any visible face of the model?
    pub fn contains(&mut self, scene: &impl Scene, point: ScreenPoint) -> bool {
        let projected = self.project_vertices(scene);
        let hit = self
            .visible_triangles(&projected)
            .find(|(_, tri)| tri.contains(point));
        trace!("Hit test at {} => {:?}", point, hit.map(|(face, _)| face));
        hit.is_some()
    }

    /// Draw the outline of every visible face onto the surface. Each face
    /// gets three lines: a-b, b-c, then c-a.
    pub fn draw_wireframe(
        &mut self,
        scene: &impl Scene,
        surface: &mut impl LineSurface,
    ) {
        let projected = self.project_vertices(scene);
        for (_, tri) in self.visible_triangles(&projected) {
            for (from, to) in tri.edges().iter() {
                surface.draw_line(from.x, from.y, to.x, to.y);
            }
        }
    }

    /// Find the first face in `start..end` whose center is somewhere
    /// clickable: not under the exclusion rect (if there is one), and on
    /// screen according to the current [ScreenMode]. This uses the anchor's
    /// current pose, without a refresh.
    pub fn first_on_screen_index(
        &self,
        scene: &impl Scene,
        start: usize,
        end: usize,
    ) -> Option<usize> {
        let camera = scene.camera();
        let mode = scene.screen_mode();
        let exclusion = scene.exclusion_rect();
        let (pose, height) = self.pose_and_height(scene);

        let end = end.min(self.mesh.num_faces());
        (start..end).find(|&face| {
            let center = self.mesh.face_centroid(face);
            let point = ScreenPoint::or_off_screen(
                camera.project(Self::to_world(pose, height, center)),
            );
            let excluded = exclusion.map_or(false, |rect| rect.contains(point));
            !excluded && self.screen.is_on_screen(mode, point)
        })
    }

    /// Pick a random on-screen face. The search starts at a random face and
    /// wraps around, so every face gets checked once. Returns `None` if no
    /// face is on screen.
    pub fn next_triangle(
        &mut self,
        scene: &impl Scene,
        rng: &mut impl Rng,
    ) -> Option<usize> {
        self.anchor.refresh();
        self.random_on_screen_index(scene, rng)
    }

    /// Get the screen position of the center of a face, if it's on screen.
    /// Returns `None` for an out-of-range index.
    pub fn centroid(
        &mut self,
        scene: &impl Scene,
        index: usize,
    ) -> Option<ScreenPoint> {
        if index >= self.mesh.num_faces() {
            return None;
        }
        self.anchor.refresh();
        self.face_centroid_on_screen(scene, index)
    }

    /// Get the screen position of the center of the whole model, if it's on
    /// screen. The center is the average of the face centers, not of the
    /// vertices, so big faces don't count for more than small ones.
    pub fn center_point(&mut self, scene: &impl Scene) -> Option<ScreenPoint> {
        let num_faces = self.mesh.num_faces();
        if num_faces == 0 {
            return None;
        }
        self.anchor.refresh();

        let sum = (0..num_faces)
            .map(|face| self.mesh.face_centroid(face))
            .fold([0i64; 3], |acc, c| {
                [acc[0] + c.x as i64, acc[1] + c.y as i64, acc[2] + c.z as i64]
            });
        let n = num_faces as i64;
        let center = Point3::new(
            (sum[0] / n) as i32,
            (sum[1] / n) as i32,
            (sum[2] / n) as i32,
        );

        let (pose, height) = self.pose_and_height(scene);
        let point = scene.camera().project(Self::to_world(pose, height, center));
        trace!("Center point of {} => {:?}", self.mesh, point);
        self.on_screen(scene, point)
    }

    /// Like [Self::next_triangle], but gives the screen position of the
    /// chosen face's center
    pub fn next_point(
        &mut self,
        scene: &impl Scene,
        rng: &mut impl Rng,
    ) -> Option<ScreenPoint> {
        self.anchor.refresh();
        let face = self.random_on_screen_index(scene, rng)?;
        self.face_centroid_on_screen(scene, face)
    }

    /// Wraparound scan from a random starting face
    fn random_on_screen_index(
        &self,
        scene: &impl Scene,
        rng: &mut impl Rng,
    ) -> Option<usize> {
        let num_faces = self.mesh.num_faces();
        if num_faces == 0 {
            debug!("No faces to pick from");
            return None;
        }

        let start = rng.gen_range(0..num_faces);
        let found = self
            .first_on_screen_index(scene, start, num_faces)
            .or_else(|| self.first_on_screen_index(scene, 0, start));
        if found.is_none() {
            debug!("No on-screen face out of {}", num_faces);
        }
        found
    }

    fn face_centroid_on_screen(
        &self,
        scene: &impl Scene,
        face: usize,
    ) -> Option<ScreenPoint> {
        let (pose, height) = self.pose_and_height(scene);
        let center = self.mesh.face_centroid(face);
        let point = scene.camera().project(Self::to_world(pose, height, center));
        self.on_screen(scene, point)
    }

    fn on_screen(
        &self,
        scene: &impl Scene,
        point: Option<ScreenPoint>,
    ) -> Option<ScreenPoint> {
        let mode = scene.screen_mode();
        point.filter(|&point| self.screen.is_on_screen(mode, point))
    }

    fn pose_and_height(&self, scene: &impl Scene) -> (Pose, i32) {
        let pose = self.anchor.pose();
        (pose, scene.tile_height(pose.x, pose.y, pose.plane))
    }

    /// Model space to world space. The pose's `y` goes onto world `z`.
    fn to_world(pose: Pose, height: i32, local: Point3<i32>) -> Point3<i64> {
        Point3::new(
            local.x as i64 + pose.x as i64,
            local.y as i64 + height as i64,
            local.z as i64 + pose.y as i64,
        )
    }

    /// Project all vertices with the anchor's current pose
    fn project_all(&self, scene: &impl Scene) -> Vec<ProjectedVertex> {
        let camera = scene.camera();
        let (pose, height) = self.pose_and_height(scene);
        let projected: Vec<_> = (0..self.mesh.num_vertices())
            .map(|i| {
                let world = Self::to_world(pose, height, self.mesh.vertex(i));
                match camera.project(world) {
                    Some(point) => ProjectedVertex {
                        point,
                        visible: true,
                    },
                    None => ProjectedVertex::HIDDEN,
                }
            })
            .collect();
        trace!(
            "Projected {} at {}: {}/{} vertices visible",
            self.mesh,
            pose,
            projected.iter().filter(|v| v.visible).count(),
            projected.len()
        );
        projected
    }

    /// Every face whose three vertices are all visible, with its index
    fn visible_triangles<'a>(
        &'a self,
        projected: &'a [ProjectedVertex],
    ) -> impl Iterator<Item = (usize, ScreenTriangle)> + 'a {
        (0..self.mesh.num_faces()).filter_map(move |face| {
            let [a, b, c] = self
                .mesh
                .face_indices(face)
                .map(|i| projected[i as usize]);
            if a.visible && b.visible && c.visible {
                Some((face, ScreenTriangle::new(a.point, b.point, c.point)))
            } else {
                None
            }
        })
    }
}

/// Projectors are equal when their meshes are, regardless of anchor. See
/// [Mesh] for what mesh equality means.
impl<A: Anchor> PartialEq for MeshProjector<A> {
    fn eq(&self, other: &Self) -> bool {
        self.mesh == other.mesh
    }
}

impl<A: Anchor> fmt::Display for MeshProjector<A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} @ {}", self.mesh, self.anchor.pose())
    }
}
