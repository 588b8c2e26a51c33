use st_inference::SummaryGenerator;

pub struct AppState {
    pub generator: SummaryGenerator,
}
