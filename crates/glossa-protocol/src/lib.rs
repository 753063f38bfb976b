pub mod error;
pub mod protocol;
pub mod request;
pub mod response;

pub use error::ProtocolError;
pub use protocol::LexiconProtocol;
pub use request::{Aspect, Request};
pub use response::{
    Response, ResponseDefinition, ResponseExample, ResponseSynonymSet, ResponseTranslation,
};
