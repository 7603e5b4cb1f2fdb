pub mod method;
pub mod response;
pub mod service_request;
pub mod uri;
