use crate::errors::AppError;
use crate::models::{ClientParams, HealthResponse, SubscribeForm};
use crate::page::Page;
use crate::state::AppState;
use crate::submit::submit;
use crate::timezone::ClientTimezone;
use crate::ui::{load_template, render_page};
use crate::weekday::today_in;
use axum::{
    Form, Json,
    extract::{Query, State},
    response::Html,
};
use tracing::debug;

pub async fn index(
    State(state): State<AppState>,
    Query(params): Query<ClientParams>,
) -> Result<Html<String>, AppError> {
    let template = load_template(state.settings.asset_dir.as_deref()).await?;
    let page = load_page(&state, &params);
    Ok(Html(render_page(&template, &page)))
}

/// Runs a submission of the `subscription` form and answers with the page in
/// its resulting state. Never redirects.
pub async fn subscribe(
    State(state): State<AppState>,
    Query(params): Query<ClientParams>,
    Form(form): Form<SubscribeForm>,
) -> Result<Html<String>, AppError> {
    let template = load_template(state.settings.asset_dir.as_deref()).await?;
    let mut page = load_page(&state, &params);

    page.number.set_value(form.number);
    page.timezone.reset();
    if !form.timezone.is_empty() && !page.timezone.select(&form.timezone) {
        debug!("submitted timezone `{}` is not offered", form.timezone);
    }

    // The outcome is already applied to `page`.
    let _ = submit(&mut page, &state.client).await;

    Ok(Html(render_page(&template, &page)))
}

pub async fn health() -> Json<HealthResponse> {
    debug!("checking health");
    Json(HealthResponse { ok: true })
}

fn load_page(state: &AppState, params: &ClientParams) -> Page {
    let client_zone = ClientTimezone::from_reported(params.tz.as_deref());
    let today = today_in(client_zone.zone().or(state.server_zone));
    Page::load(today, &client_zone)
}
