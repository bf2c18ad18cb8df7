use sa_parsers::AnalysisPipeline;

pub struct AppState {
    pub pipeline: AnalysisPipeline,
}
