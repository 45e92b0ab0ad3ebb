use crate::render::unit::{ScreenPoint, ScreenRect};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};
use validator::{Validate, ValidationError};

/// How the game client is laid out on screen. This changes what counts as
/// "on screen" when picking points and faces.
#[derive(
    Copy,
    Clone,
    Debug,
    PartialEq,
    Eq,
    Display,
    EnumIter,
    EnumString,
    Serialize,
    Deserialize,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum ScreenMode {
    /// The game view is a fixed-size rectangle, with the rest of the client
    /// covered by interface. Only points well within that rectangle count.
    Fixed,
    /// The game view fills the client. Anything that projects counts.
    Resizable,
}

impl Default for ScreenMode {
    fn default() -> Self {
        Self::Resizable
    }
}

/// Static facts about the screen layout. These don't change frame to frame,
/// unlike the camera.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize, Validate)]
#[validate(schema(function = "validate_inset", skip_on_field_errors = false))]
#[serde(default)]
pub struct ScreenConfig {
    /// Width of the game view in [ScreenMode::Fixed], in pixels. Points at or
    /// right of this x are off screen.
    #[validate(range(min = 1, max = 100000))]
    pub fixed_width: i32,

    /// Height of the game view in [ScreenMode::Fixed], in pixels. Points at or
    /// below this y are off screen.
    #[validate(range(min = 1, max = 100000))]
    pub fixed_height: i32,

    /// Points within this many pixels of the top or left edge of the fixed
    /// game view are considered off screen. The right and bottom edges don't
    /// get an inset.
    #[validate(range(min = 0))]
    pub fixed_inset: i32,
}

impl ScreenConfig {
    /// The rectangle that on-screen points have to fall in, in
    /// [ScreenMode::Fixed]
    pub fn fixed_bounds(&self) -> ScreenRect {
        ScreenRect::new(
            self.fixed_inset,
            self.fixed_inset,
            self.fixed_width - self.fixed_inset,
            self.fixed_height - self.fixed_inset,
        )
    }

    /// Would the given projected point be visible on screen in the given mode?
    /// In fixed mode it has to be inside [Self::fixed_bounds]. In resizable
    /// mode it just can't be [ScreenPoint::OFF_SCREEN].
    pub fn is_on_screen(&self, mode: ScreenMode, point: ScreenPoint) -> bool {
        match mode {
            ScreenMode::Fixed => self.fixed_bounds().contains(point),
            ScreenMode::Resizable => point != ScreenPoint::OFF_SCREEN,
        }
    }
}

impl Default for ScreenConfig {
    fn default() -> Self {
        Self {
            fixed_width: 516,
            fixed_height: 388,
            fixed_inset: 4,
        }
    }
}

/// The inset has to leave at least one pixel of the fixed view on screen
fn validate_inset(config: &ScreenConfig) -> Result<(), ValidationError> {
    if config.fixed_inset >= config.fixed_width
        || config.fixed_inset >= config.fixed_height
    {
        return Err(ValidationError::new("fixed_inset_too_large"));
    }
    Ok(())
}
