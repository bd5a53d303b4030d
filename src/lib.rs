pub mod feed;
pub mod http;
pub mod match_log;
pub mod season;
pub mod standings;
pub mod table_export;
