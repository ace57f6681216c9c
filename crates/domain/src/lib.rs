#![warn(clippy::pedantic)]
#![allow(clippy::missing_errors_doc)]

mod balanced;
mod catalog;
mod client;
mod error;
mod export;
mod generator;
mod name;
mod overload;
mod plan;
mod profile;
mod service;
mod session;

pub use balanced::*;
pub use catalog::*;
pub use client::*;
pub use error::*;
pub use export::*;
pub use generator::*;
pub use name::*;
pub use overload::*;
pub use plan::*;
pub use profile::*;
pub use service::*;
pub use session::*;
