pub mod logger;
pub mod map_pipeline;
