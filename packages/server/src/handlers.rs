//! HTTP handler functions for the population map API.

use actix_web::{HttpResponse, web};
use webgis_map::classify;
use webgis_map::session::Event;
use webgis_map_models::HeatmapStyle;
use webgis_server_models::{
    ApiHealth, ApiLegend, ApiMapConfig, SelectRegionBody, SelectSubRegionBody,
    SubRegionQueryParams,
};

use crate::AppState;

/// `GET /api/health`
pub async fn health(state: web::Data<AppState>) -> HttpResponse {
    HttpResponse::Ok().json(ApiHealth {
        healthy: true,
        version: env!("CARGO_PKG_VERSION").to_string(),
        regions_loaded: state.data.regions().is_some(),
        roads_loaded: state.data.roads().is_some(),
    })
}

/// `GET /api/config`
///
/// Returns the initial map center and zoom.
pub async fn map_config(state: web::Data<AppState>) -> HttpResponse {
    HttpResponse::Ok().json(ApiMapConfig {
        center: state.config.map.center,
        default_zoom: state.config.map.default_zoom,
    })
}

/// `GET /api/legend`
pub async fn legend() -> HttpResponse {
    HttpResponse::Ok().json(ApiLegend {
        legend: classify::legend(),
        heatmap: HeatmapStyle::default(),
    })
}

/// `GET /api/regions`
///
/// Lists every region name, sorted.
pub async fn regions(state: web::Data<AppState>) -> HttpResponse {
    HttpResponse::Ok().json(state.data.index().regions_sorted())
}

/// `GET /api/sub-regions?region=...`
///
/// Lists the sub-regions to offer for a region (all of them for `"all"`).
pub async fn sub_regions(
    state: web::Data<AppState>,
    params: web::Query<SubRegionQueryParams>,
) -> HttpResponse {
    HttpResponse::Ok().json(state.data.index().sub_regions_for(&params.region))
}

/// `GET /api/view`
///
/// Full compositions for the current state, for the first render or a
/// page reload.
pub async fn view(state: web::Data<AppState>) -> HttpResponse {
    let current = state.current();
    HttpResponse::Ok().json(state.data.view(&current))
}

/// `POST /api/select/region`
pub async fn select_region(
    state: web::Data<AppState>,
    body: web::Json<SelectRegionBody>,
) -> HttpResponse {
    let body = body.into_inner();
    HttpResponse::Ok().json(state.apply(&Event::SelectRegion(body.region)))
}

/// `POST /api/select/sub-region`
pub async fn select_sub_region(
    state: web::Data<AppState>,
    body: web::Json<SelectSubRegionBody>,
) -> HttpResponse {
    let body = body.into_inner();
    HttpResponse::Ok().json(state.apply(&Event::SelectSubRegion(body.sub_region)))
}

/// `POST /api/heatmap/toggle`
pub async fn toggle_heatmap(state: web::Data<AppState>) -> HttpResponse {
    HttpResponse::Ok().json(state.apply(&Event::ToggleHeatmap))
}

/// `POST /api/reset`
pub async fn reset(state: web::Data<AppState>) -> HttpResponse {
    HttpResponse::Ok().json(state.apply(&Event::Reset))
}
