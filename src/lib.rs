//! Imace console client: bootstrap and line-command front end over the
//! `imace-app` view engine.

pub mod bootstrap;
pub mod console;
