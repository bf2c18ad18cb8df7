pub mod parsers;
pub mod pipeline;

pub use parsers::{parser_for, ArticleParser, WechatParser, XiaohongshuParser};
pub use pipeline::{AnalysisPipeline, FetchedPage, HttpFetcher, PageFetcher};
