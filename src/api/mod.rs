pub mod illustration;
pub mod story;
pub mod theme;

pub use illustration::{
    handle_canvas, handle_illustration, handle_render_to_canvas, CanvasQuery, ErrorResponse,
    IllustrationQuery, RenderRequest,
};
pub use illustration::{
    __path_handle_canvas, __path_handle_illustration, __path_handle_render_to_canvas,
};
pub use story::{
    handle_choice, handle_get_game, handle_restart_game, handle_story_node, ChoiceRequest,
    GameResponse,
};
pub use story::{
    __path_handle_choice, __path_handle_get_game, __path_handle_restart_game,
    __path_handle_story_node,
};
pub use theme::{handle_theme, PaletteColors, ThemeResponse, __path_handle_theme};
