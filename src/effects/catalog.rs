use std::fmt;

use crate::effects::appear::{
    fade_in_steps, slide_in_from_left_steps, slide_in_from_top_steps, zoom_in_steps,
};
use crate::effects::disappear::{
    fade_out_steps, slide_out_to_bottom_steps, slide_out_to_right_steps, zoom_out_steps,
};
use crate::effects::emphasis::{
    DEFAULT_BOUNCE_AMPLITUDE, DEFAULT_PULSE_MAX_SCALE, DEFAULT_SHAKE_AMPLITUDE, MAX_PULSE_SCALE,
    bounce_steps, flash_steps, pulse_steps, shake_steps, spin_steps, swing_steps, tada_steps,
};
use crate::effects::schedule::{FrameStep, render_steps};
use crate::foundation::core::{FrameSequence, Image};
use crate::foundation::error::{AnimlabError, AnimlabResult};

/// Group of effects with structurally similar schedules.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EffectFamily {
    /// The image enters the frame.
    Appear,
    /// The image leaves the frame.
    Disappear,
    /// The image stays in frame and moves in place.
    Emphasis,
}

impl EffectFamily {
    /// Stable lowercase name.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Appear => "appear",
            Self::Disappear => "disappear",
            Self::Emphasis => "emphasis",
        }
    }
}

impl fmt::Display for EffectFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Closed set of effects, each variant carrying its own parameters.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Effect {
    /// Alpha ramp from transparent to opaque.
    FadeIn,
    /// Slide in from beyond the left edge.
    SlideInFromLeft,
    /// Slide in from beyond the top edge.
    SlideInFromTop,
    /// Grow from a speck to full size.
    ZoomIn,
    /// Alpha ramp from opaque to transparent.
    FadeOut,
    /// Slide out past the right edge.
    SlideOutToRight,
    /// Slide out past the bottom edge.
    SlideOutToBottom,
    /// Shrink from full size to a speck.
    ZoomOut,
    /// Grow to `max_scale` and back.
    Pulse {
        /// Peak scale factor.
        max_scale: f64,
    },
    /// Horizontal sine wobble.
    Shake {
        /// Peak horizontal offset in pixels, clamped to a quarter of the width.
        amplitude: u32,
    },
    /// Vertical sine hop.
    Bounce {
        /// Peak vertical offset in pixels, clamped to a quarter of the height.
        amplitude: u32,
    },
    /// Full counter-clockwise turn.
    Spin,
    /// Grow, shrink, then wiggle.
    Tada,
    /// Blink on and off.
    Flash,
    /// Pendulum rotation.
    Swing,
}

impl Effect {
    /// Family this effect belongs to.
    pub fn family(self) -> EffectFamily {
        match self {
            Self::FadeIn | Self::SlideInFromLeft | Self::SlideInFromTop | Self::ZoomIn => {
                EffectFamily::Appear
            }
            Self::FadeOut | Self::SlideOutToRight | Self::SlideOutToBottom | Self::ZoomOut => {
                EffectFamily::Disappear
            }
            Self::Pulse { .. }
            | Self::Shake { .. }
            | Self::Bounce { .. }
            | Self::Spin
            | Self::Tada
            | Self::Flash
            | Self::Swing => EffectFamily::Emphasis,
        }
    }

    /// Frame schedule for a `width x height` source and a requested frame count `n`.
    pub fn steps(self, width: u32, height: u32, n: u32) -> Vec<FrameStep> {
        match self {
            Self::FadeIn => fade_in_steps(n),
            Self::SlideInFromLeft => slide_in_from_left_steps(width, n),
            Self::SlideInFromTop => slide_in_from_top_steps(height, n),
            Self::ZoomIn => zoom_in_steps(n),
            Self::FadeOut => fade_out_steps(n),
            Self::SlideOutToRight => slide_out_to_right_steps(width, n),
            Self::SlideOutToBottom => slide_out_to_bottom_steps(height, n),
            Self::ZoomOut => zoom_out_steps(n),
            Self::Pulse { max_scale } => pulse_steps(max_scale, n),
            Self::Shake { amplitude } => shake_steps(width, amplitude, n),
            Self::Bounce { amplitude } => bounce_steps(height, amplitude, n),
            Self::Spin => spin_steps(n),
            Self::Tada => tada_steps(n),
            Self::Flash => flash_steps(n),
            Self::Swing => swing_steps(n),
        }
    }

    /// Render the effect over `image` with requested frame count `n`.
    pub fn generate(self, image: &Image, n: u32, parallel: bool) -> FrameSequence {
        let steps = self.steps(image.width(), image.height(), n);
        render_steps(image, &steps, parallel)
    }

    /// Validate `overrides` and apply them to the parameters this effect actually uses.
    pub fn with_overrides(self, overrides: &EffectOverrides) -> AnimlabResult<Self> {
        overrides.validate()?;
        Ok(self.apply_validated(overrides))
    }

    /// Apply overrides the caller has already passed through [`EffectOverrides::validate`].
    pub(crate) fn apply_validated(self, overrides: &EffectOverrides) -> Self {
        match self {
            Self::Pulse { max_scale } => Self::Pulse {
                max_scale: overrides.max_scale.unwrap_or(max_scale),
            },
            Self::Shake { amplitude } => Self::Shake {
                amplitude: overrides.amplitude.unwrap_or(amplitude),
            },
            Self::Bounce { amplitude } => Self::Bounce {
                amplitude: overrides.amplitude.unwrap_or(amplitude),
            },
            other => other,
        }
    }

    /// Parameters of this effect expressed as overrides (`None` where unused).
    pub fn params(self) -> EffectOverrides {
        match self {
            Self::Pulse { max_scale } => EffectOverrides {
                max_scale: Some(max_scale),
                ..EffectOverrides::default()
            },
            Self::Shake { amplitude } | Self::Bounce { amplitude } => EffectOverrides {
                amplitude: Some(amplitude),
                ..EffectOverrides::default()
            },
            _ => EffectOverrides::default(),
        }
    }
}

/// Optional per-request parameter overrides. Fields an effect does not use are ignored.
#[derive(Clone, Copy, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct EffectOverrides {
    /// Shake/bounce peak offset in pixels.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub amplitude: Option<u32>,
    /// Pulse peak scale factor, `0 < max_scale <= MAX_PULSE_SCALE`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_scale: Option<f64>,
}

impl EffectOverrides {
    /// Reject values no effect can use.
    pub fn validate(&self) -> AnimlabResult<()> {
        if let Some(s) = self.max_scale
            && (s.is_nan() || s <= 0.0 || s > MAX_PULSE_SCALE)
        {
            return Err(AnimlabError::invalid_parameter(format!(
                "max_scale must be in (0, {MAX_PULSE_SCALE}] (got {s})"
            )));
        }
        Ok(())
    }
}

/// One catalog entry.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct EffectSpec {
    /// Stable snake_case identifier.
    pub id: &'static str,
    /// Human-readable name.
    pub label: &'static str,
    /// Effect with its default parameters.
    pub effect: Effect,
}

impl EffectSpec {
    /// Family of the entry's effect.
    pub fn family(&self) -> EffectFamily {
        self.effect.family()
    }
}

const ENTRIES: [EffectSpec; 15] = [
    EffectSpec {
        id: "fade_in",
        label: "Fade in",
        effect: Effect::FadeIn,
    },
    EffectSpec {
        id: "slide_in_from_left",
        label: "Slide in from left",
        effect: Effect::SlideInFromLeft,
    },
    EffectSpec {
        id: "slide_in_from_top",
        label: "Slide in from top",
        effect: Effect::SlideInFromTop,
    },
    EffectSpec {
        id: "zoom_in",
        label: "Zoom in",
        effect: Effect::ZoomIn,
    },
    EffectSpec {
        id: "fade_out",
        label: "Fade out",
        effect: Effect::FadeOut,
    },
    EffectSpec {
        id: "slide_out_to_right",
        label: "Slide out to right",
        effect: Effect::SlideOutToRight,
    },
    EffectSpec {
        id: "slide_out_to_bottom",
        label: "Slide out to bottom",
        effect: Effect::SlideOutToBottom,
    },
    EffectSpec {
        id: "zoom_out",
        label: "Zoom out",
        effect: Effect::ZoomOut,
    },
    EffectSpec {
        id: "pulse",
        label: "Pulse",
        effect: Effect::Pulse {
            max_scale: DEFAULT_PULSE_MAX_SCALE,
        },
    },
    EffectSpec {
        id: "shake",
        label: "Shake",
        effect: Effect::Shake {
            amplitude: DEFAULT_SHAKE_AMPLITUDE,
        },
    },
    EffectSpec {
        id: "bounce",
        label: "Bounce",
        effect: Effect::Bounce {
            amplitude: DEFAULT_BOUNCE_AMPLITUDE,
        },
    },
    EffectSpec {
        id: "spin",
        label: "Spin",
        effect: Effect::Spin,
    },
    EffectSpec {
        id: "tada",
        label: "Tada",
        effect: Effect::Tada,
    },
    EffectSpec {
        id: "flash",
        label: "Flash",
        effect: Effect::Flash,
    },
    EffectSpec {
        id: "swing",
        label: "Swing",
        effect: Effect::Swing,
    },
];

static GLOBAL: EffectCatalog = EffectCatalog { entries: &ENTRIES };

/// Read-only registry of every effect, in appear, disappear, emphasis order.
#[derive(Debug)]
pub struct EffectCatalog {
    entries: &'static [EffectSpec],
}

impl EffectCatalog {
    /// The process-wide catalog.
    pub fn global() -> &'static Self {
        &GLOBAL
    }

    /// Look up an entry by id. Surrounding whitespace is ignored; matching is otherwise exact.
    pub fn resolve(&self, id: &str) -> AnimlabResult<&'static EffectSpec> {
        let id = id.trim();
        self.entries
            .iter()
            .find(|e| e.id == id)
            .ok_or_else(|| AnimlabError::unknown_effect(id))
    }

    /// All entries in catalog order.
    pub fn iter(&self) -> impl Iterator<Item = &'static EffectSpec> {
        self.entries.iter()
    }

    /// `(id, family)` pairs in catalog order.
    pub fn list(&self) -> Vec<(&'static str, EffectFamily)> {
        self.iter().map(|e| (e.id, e.family())).collect()
    }

    /// Entries of one family, in catalog order.
    pub fn in_family(&self, family: EffectFamily) -> Vec<&'static EffectSpec> {
        self.iter().filter(|e| e.family() == family).collect()
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Return `true` when the catalog holds no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// `(id, family)` for every catalog entry.
pub fn list_effects() -> Vec<(&'static str, EffectFamily)> {
    EffectCatalog::global().list()
}

/// Catalog entries of one family.
pub fn effects_in_family(family: EffectFamily) -> Vec<&'static EffectSpec> {
    EffectCatalog::global().in_family(family)
}

#[cfg(test)]
#[path = "../../tests/unit/effects/catalog.rs"]
mod tests;
