use crate::fallback::RenderFallback;
use crate::theme::ResolvedTheme;
use quire_model::Element;
use quire_style::{looks_like_color, resolve_color};
use quire_types::Color;

/// What a renderer knows about the slot it is drawing into.
///
/// The theme is resolved once per pass and borrowed everywhere. `width` is
/// the space available to the element, already narrowed for any enclosing
/// section padding and column share.
#[derive(Debug, Clone, Copy)]
pub struct RenderContext<'a> {
    pub theme: &'a ResolvedTheme,
    pub width: f32,
    pub depth: usize,
    pub element_id: Option<&'a str>,
    pub margin_bottom: Option<f32>,
}

impl<'a> RenderContext<'a> {
    pub fn root(theme: &'a ResolvedTheme, width: f32) -> Self {
        Self {
            theme,
            width: width.max(0.0),
            depth: 0,
            element_id: None,
            margin_bottom: None,
        }
    }

    /// The context for rendering `element` inside this one.
    pub fn for_element<'b>(&self, element: &'b Element) -> RenderContext<'b>
    where
        'a: 'b,
    {
        RenderContext {
            theme: self.theme,
            width: self.width,
            depth: self.depth,
            element_id: element.id_str(),
            margin_bottom: element.kind.margin_bottom(),
        }
    }

    /// The context for children of the current element, one level deeper and
    /// `width` wide.
    pub fn nested(&self, width: f32) -> Self {
        Self {
            width: width.max(0.0),
            depth: self.depth + 1,
            ..*self
        }
    }

    /// Resolves an authored color, falling back to `fallback` when absent.
    pub fn color(&self, value: Option<&str>, fallback: Color) -> Color {
        if let Some(raw) = value.map(str::trim).filter(|v| !v.is_empty()) {
            if !looks_like_color(raw) {
                RenderFallback::UnparseableColor { value: raw.to_string() }.report();
            }
        }
        resolve_color(value, fallback)
    }
}
