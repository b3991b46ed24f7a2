// ABOUTME: Exec session lifecycle and the byte proxy that runs over its hijacked connection

pub mod exec;
pub mod proxy;

pub use exec::ExecSession;
pub use proxy::StreamProxy;
