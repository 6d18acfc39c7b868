pub mod http;
pub mod mongo;
