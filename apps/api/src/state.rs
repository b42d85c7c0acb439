use peerloop_application::OrgChartService;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub org_chart_service: OrgChartService,
    pub frontend_url: String,
}
