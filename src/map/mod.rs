pub mod scene;
pub mod surface;

pub use scene::{
    Annotation, AnnotationStyle, FLAG_TITLE, Glyph, LINE_STYLE, LineOverlay, LineStyle, MapScene,
    SELECTED_SPOT_TITLE, Tint,
};
pub use surface::{MapSurface, RecordingSurface, present};
