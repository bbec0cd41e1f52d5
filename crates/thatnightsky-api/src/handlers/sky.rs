use std::sync::Arc;

use axum::{extract::State, Json};
use thatnightsky_astro::SkySettings;
use thatnightsky_core::models::{ObserverContext, QueryInput, SkyData};
use thatnightsky_pipeline::{ChartPlan, ChartResult};

use crate::dto::{ObserverRequest, SkyRequest};
use crate::error::ApiError;
use crate::state::{ApiPipeline, AppState};

pub async fn sky_for_address(
    State(state): State<Arc<AppState>>,
    Json(request): Json<SkyRequest>,
) -> Result<Json<ChartResult>, ApiError> {
    let lang = request.lang.unwrap_or(state.default_lang);
    tracing::info!(
        address = %request.address,
        when = %request.when,
        narrative = request.narrative,
        lang = %lang,
        "Processing sky request"
    );

    let mut settings = state.settings;
    if let Some(magnitude) = request.limiting_magnitude {
        settings = settings.with_limiting_magnitude(magnitude);
    }

    let plan = ChartPlan::new(QueryInput::new(request.address, request.when))
        .with_lang(lang)
        .with_narrative(request.narrative)
        .with_settings(settings);

    let pipeline = state.pipeline(lang).clone();
    let observer = pipeline.resolve_observer(&plan.query).await?;
    let sky = compute_off_runtime(pipeline.clone(), observer, plan.settings).await?;
    let narrative = pipeline.narrative_for(&sky, &plan).await;

    Ok(Json(ChartResult { sky, narrative }))
}

pub async fn sky_for_observer(
    State(state): State<Arc<AppState>>,
    Json(request): Json<ObserverRequest>,
) -> Result<Json<SkyData>, ApiError> {
    tracing::info!(
        latitude = request.latitude,
        longitude = request.longitude,
        instant = %request.instant,
        "Processing observer request"
    );

    let observer = ObserverContext::new(
        request.latitude,
        request.longitude,
        request.instant,
        request.address_display,
    )?;

    let mut settings = state.settings;
    if let Some(magnitude) = request.limiting_magnitude {
        settings = settings.with_limiting_magnitude(magnitude);
    }

    let pipeline = state.pipeline(state.default_lang).clone();
    let sky = compute_off_runtime(pipeline, observer, settings).await?;
    Ok(Json(sky))
}

// The star loop is CPU bound over the whole catalogue.
async fn compute_off_runtime(
    pipeline: Arc<ApiPipeline>,
    observer: ObserverContext,
    settings: SkySettings,
) -> Result<SkyData, ApiError> {
    run_blocking(move || pipeline.compute_for_observer(&observer, settings)).await
}

async fn run_blocking<T, F>(work: F) -> Result<T, ApiError>
where
    F: FnOnce() -> thatnightsky_core::error::Result<T> + Send + 'static,
    T: Send + 'static,
{
    match tokio::task::spawn_blocking(work).await {
        Ok(result) => Ok(result?),
        Err(e) => {
            tracing::error!(error = %e, "Sky computation task failed");
            Err(ApiError::internal("Internal error").with_details(e.to_string()))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;
    use thatnightsky_core::error::NightSkyError;

    #[tokio::test(flavor = "current_thread")]
    async fn test_blocking_work_leaves_runtime_thread() {
        let caller = std::thread::current().id();
        let worker = run_blocking(|| Ok(std::thread::current().id())).await.unwrap();
        assert_ne!(worker, caller);
    }

    #[tokio::test]
    async fn test_blocking_errors_keep_their_status() {
        let err = run_blocking::<(), _>(|| {
            Err(NightSkyError::InvalidObserver {
                reason: "latitude 91".into(),
            })
        })
        .await
        .unwrap_err();
        assert_eq!(err.status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_panicking_work_is_internal_error() {
        let err = run_blocking::<(), _>(|| panic!("star loop")).await.unwrap_err();
        assert_eq!(err.status, StatusCode::INTERNAL_SERVER_ERROR);
    }
}
