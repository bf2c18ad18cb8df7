pub mod cache;
pub mod error;
pub mod text;
pub mod types;

pub use error::Error;
pub use types::{
    Analysis, AnalyzeRequest, AnalyzeResponse, ArticleContent, ArticleMeta, ArticleMetrics,
    DebugInfo, MetricValue, ParsedArticle, Platform, Provider,
};

pub type Result<T> = std::result::Result<T, Error>;
