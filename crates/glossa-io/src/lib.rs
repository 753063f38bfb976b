pub mod ws;

pub use ws::{Responder, handle_message, serve};
