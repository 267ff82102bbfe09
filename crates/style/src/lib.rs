pub mod border;
pub mod dimension;
pub mod font;
pub mod normalize;
pub mod parsers;
pub mod sanitize;
pub mod text;
pub mod theme;

pub use border::{Border, BorderStyle};
pub use dimension::{Margins, Orientation, PaperSize};
pub use font::{FontStyle, FontWeight};
pub use normalize::{DEFAULT_HEX, looks_like_color, resolve_color, to_hex};
pub use parsers::StyleParseError;
pub use sanitize::sanitize_colors;
pub use text::TextAlign;
pub use theme::Theme;
