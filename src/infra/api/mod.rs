pub mod http;

pub use http::{HttpClient, MockHttpClient, Query, RecordedRequest, ReqwestHttpClient};
