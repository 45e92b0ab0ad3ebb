//! A frozen, single-frame [Scene] built from config. Live integrations
//! implement [Scene] and [Anchor] against real game state. This is for
//! everything else: tests, benchmarks, and replaying a captured frame from
//! the command line.

use crate::{
    model::{Anchor, Pose, Scene},
    render::{
        camera::Camera,
        config::{ScreenConfig, ScreenMode},
        unit::ScreenRect,
    },
};
use anyhow::Context;
use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

/// Everything needed to describe one frame of the world. All fields have
/// defaults, so a config file only needs to specify what it cares about.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, Validate)]
#[validate(schema(function = "validate_exclusion", skip_on_field_errors = false))]
#[serde(default)]
pub struct SceneConfig {
    pub camera: Camera,

    #[validate]
    pub screen: ScreenConfig,

    pub screen_mode: ScreenMode,

    /// Ground height used for every tile. Static scenes are flat.
    pub ground_height: i32,

    /// Screen rectangle covered by interface, if any
    pub exclusion: Option<ScreenRect>,

    /// Pose of the model anchor, for use with [StaticAnchor]
    pub anchor: Pose,
}

/// An exclusion rect with negative size would never contain anything, which
/// is almost certainly a typo
fn validate_exclusion(config: &SceneConfig) -> Result<(), ValidationError> {
    match config.exclusion {
        Some(rect) if rect.width < 0 || rect.height < 0 => {
            Err(ValidationError::new("negative_exclusion_size"))
        }
        _ => Ok(()),
    }
}

/// A [Scene] that never changes
#[derive(Clone, Debug)]
pub struct StaticScene {
    config: SceneConfig,
}

impl StaticScene {
    /// Build a scene from config. Returns an error if the config is invalid.
    pub fn new(config: SceneConfig) -> anyhow::Result<Self> {
        config.validate().context("invalid scene config")?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &SceneConfig {
        &self.config
    }

    /// An anchor sitting at the configured pose
    pub fn anchor(&self) -> StaticAnchor {
        StaticAnchor(self.config.anchor)
    }
}

impl Scene for StaticScene {
    fn tile_height(&self, _x: i32, _y: i32, _plane: i32) -> i32 {
        self.config.ground_height
    }

    fn camera(&self) -> Camera {
        self.config.camera
    }

    fn screen_mode(&self) -> ScreenMode {
        self.config.screen_mode
    }

    fn exclusion_rect(&self) -> Option<ScreenRect> {
        self.config.exclusion
    }
}

/// An [Anchor] that never moves
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct StaticAnchor(pub Pose);

impl Anchor for StaticAnchor {
    fn pose(&self) -> Pose {
        self.0
    }
}
