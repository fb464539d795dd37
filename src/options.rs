use crate::geometry::Width;
use crate::style::StyleEncoder;
use crate::syntax::Token;
use once_cell::sync::Lazy;
use parking_lot::RwLock;
use std::sync::Arc;
use thiserror::Error;

/// The constraints of a single render.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serialization", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serialization", serde(default))]
pub struct RenderOptions {
    /// Spaces per level of nesting.
    pub indent: Width,
    /// The desired maximum line width.
    pub max_width: Width,
    /// The desired maximum amount of non-indentation text on a line. At most `max_width`.
    pub ribbon_width: Width,
    /// How many levels of containers to display before eliding their contents. `None` is
    /// unbounded.
    pub max_depth: Option<usize>,
    /// How many elements of each sequence or mapping to display. `None` is unbounded.
    pub max_seq_len: Option<usize>,
    /// Sort the keys of every mapping, not just the unordered ones.
    pub sort_keys: bool,
    /// How to display token styles. `None` means plain text.
    #[cfg_attr(feature = "serialization", serde(skip))]
    pub style_encoder: Option<Arc<dyn StyleEncoder>>,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("ribbon width {ribbon_width} is larger than max width {max_width}")]
    RibbonTooWide {
        ribbon_width: Width,
        max_width: Width,
    },
    #[error("max width and ribbon width must be positive")]
    ZeroWidth,
    #[error("the style encoder has no style for {0}")]
    MissingStyle(Token),
}

impl Default for RenderOptions {
    fn default() -> Self {
        RenderOptions {
            indent: 4,
            max_width: 79,
            ribbon_width: 71,
            max_depth: None,
            max_seq_len: Some(1000),
            sort_keys: false,
            style_encoder: None,
        }
    }
}

impl RenderOptions {
    /// Set the max width, shrinking the ribbon width if needed to stay within it.
    pub fn with_width(self, max_width: Width) -> RenderOptions {
        RenderOptions {
            max_width,
            ribbon_width: self.ribbon_width.min(max_width),
            ..self
        }
    }

    pub fn with_style_encoder(self, encoder: impl StyleEncoder + 'static) -> RenderOptions {
        RenderOptions {
            style_encoder: Some(Arc::new(encoder)),
            ..self
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_width == 0 || self.ribbon_width == 0 {
            return Err(ConfigError::ZeroWidth);
        }
        if self.ribbon_width > self.max_width {
            return Err(ConfigError::RibbonTooWide {
                ribbon_width: self.ribbon_width,
                max_width: self.max_width,
            });
        }
        if let Some(encoder) = &self.style_encoder {
            if let Some(token) = Token::ALL
                .iter()
                .find(|token| encoder.encode(**token).is_none())
            {
                return Err(ConfigError::MissingStyle(*token));
            }
        }
        Ok(())
    }
}

/// A partial update to the default [`RenderOptions`]. Fields left as `None` keep their current
/// value, even if that makes the result invalid: narrowing `max_width` below the current
/// `ribbon_width` must supply a `ribbon_width` too.
#[derive(Clone, Debug, Default)]
pub struct DefaultsUpdate {
    pub indent: Option<Width>,
    pub max_width: Option<Width>,
    pub ribbon_width: Option<Width>,
    pub max_depth: Option<Option<usize>>,
    pub max_seq_len: Option<Option<usize>>,
    pub sort_keys: Option<bool>,
    pub style_encoder: Option<Option<Arc<dyn StyleEncoder>>>,
}

impl DefaultsUpdate {
    /// Apply the update to `options`, without validating the result.
    pub fn apply(self, options: &RenderOptions) -> RenderOptions {
        RenderOptions {
            indent: self.indent.unwrap_or(options.indent),
            max_width: self.max_width.unwrap_or(options.max_width),
            ribbon_width: self.ribbon_width.unwrap_or(options.ribbon_width),
            max_depth: self.max_depth.unwrap_or(options.max_depth),
            max_seq_len: self.max_seq_len.unwrap_or(options.max_seq_len),
            sort_keys: self.sort_keys.unwrap_or(options.sort_keys),
            style_encoder: self
                .style_encoder
                .unwrap_or_else(|| options.style_encoder.clone()),
        }
    }
}

static DEFAULTS: Lazy<RwLock<RenderOptions>> = Lazy::new(|| RwLock::new(RenderOptions::default()));

/// The options used by [`pformat`](crate::pformat).
pub fn get_defaults() -> RenderOptions {
    DEFAULTS.read().clone()
}

/// Merge `update` into the default options. Nothing changes if the result would be invalid.
pub fn set_defaults(update: DefaultsUpdate) -> Result<(), ConfigError> {
    let mut defaults = DEFAULTS.write();
    let updated = update.apply(&defaults);
    updated.validate()?;
    tracing::debug!(
        max_width = updated.max_width,
        ribbon_width = updated.ribbon_width,
        "updated default render options"
    );
    *defaults = updated;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        let options = RenderOptions::default();
        assert_eq!(options.max_width, 79);
        assert_eq!(options.ribbon_width, 71);
        assert_eq!(options.validate(), Ok(()));
    }

    #[test]
    fn invalid_widths() {
        let options = RenderOptions {
            ribbon_width: 100,
            ..RenderOptions::default()
        };
        assert_eq!(
            options.validate(),
            Err(ConfigError::RibbonTooWide {
                ribbon_width: 100,
                max_width: 79
            })
        );
        let options = RenderOptions {
            max_width: 0,
            ribbon_width: 0,
            ..RenderOptions::default()
        };
        assert_eq!(options.validate(), Err(ConfigError::ZeroWidth));
    }

    #[test]
    fn missing_style_is_invalid() {
        let encoder = crate::style::AnsiEncoder::default().without_style(Token::Operator);
        let options = RenderOptions::default().with_style_encoder(encoder);
        assert_eq!(
            options.validate(),
            Err(ConfigError::MissingStyle(Token::Operator))
        );
    }

    #[test]
    fn update_merges_supplied_fields() {
        let base = RenderOptions::default();
        let updated = DefaultsUpdate {
            max_width: Some(40),
            max_depth: Some(Some(3)),
            ..DefaultsUpdate::default()
        }
        .apply(&base);
        assert_eq!(updated.max_width, 40);
        assert_eq!(updated.ribbon_width, 71);
        assert_eq!(updated.max_depth, Some(3));
        assert_eq!(updated.max_seq_len, Some(1000));
        assert_eq!(updated.indent, 4);
        assert_eq!(
            updated.validate(),
            Err(ConfigError::RibbonTooWide {
                ribbon_width: 71,
                max_width: 40
            })
        );
    }

    #[test]
    fn narrowing_then_widening_keeps_the_ribbon() {
        let narrow = DefaultsUpdate {
            max_width: Some(20),
            ribbon_width: Some(20),
            ..DefaultsUpdate::default()
        }
        .apply(&RenderOptions::default());
        let wide = DefaultsUpdate {
            max_width: Some(100),
            ..DefaultsUpdate::default()
        }
        .apply(&narrow);
        assert_eq!((wide.max_width, wide.ribbon_width), (100, 20));
        assert_eq!(wide.validate(), Ok(()));
    }
}
