use axum::{
    extract::{Query, State},
    response::Json,
};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use utoipa::{IntoParams, ToSchema};

use super::illustration::resolve_theme;
use crate::error::ApiError;
use crate::models::{BackgroundTheme, ColorScheme, ThemeSettings};

#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ThemeQuery {
    pub background: Option<BackgroundTheme>,
    pub color: Option<ColorScheme>,
}

/// Resolved theme
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ThemeResponse {
    pub background: BackgroundTheme,
    pub color: ColorScheme,
    /// Palette colors as `#rrggbb`
    pub palette: PaletteColors,
    /// CSS custom properties for the client
    pub css_variables: BTreeMap<String, String>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct PaletteColors {
    pub background: String,
    pub foreground: String,
}

/// Resolve theme flags
///
/// Missing flags fall back to the configured default theme.
#[utoipa::path(
    get,
    path = "/api/theme",
    params(ThemeQuery),
    responses(
        (status = 200, description = "Resolved theme", body = ThemeResponse),
    ),
    tag = "Theme"
)]
pub async fn handle_theme(
    State(default_theme): State<ThemeSettings>,
    Query(query): Query<ThemeQuery>,
) -> Result<Json<ThemeResponse>, ApiError> {
    let theme = resolve_theme(default_theme, query.background, query.color);
    let palette = theme
        .palette()
        .map_err(|e| ApiError::Internal(e.to_string()))?;

    Ok(Json(ThemeResponse {
        background: theme.background,
        color: theme.color,
        palette: PaletteColors {
            background: palette.background().to_hex(),
            foreground: palette.foreground().to_hex(),
        },
        css_variables: theme.css_variables(),
    }))
}
