//! Client side of the crop diversification service.
//!
//! - [`i18n`]: bilingual (English/Kannada) text lookup and the persisted
//!   language preference
//! - [`recommendations`]: region form and the `/recommendations` flow
//! - [`chat`]: transcript and the `/chat` flow
//! - [`request_flow`]: single in-flight request state machine both flows use

pub mod api;
pub mod chat;
pub mod config;
pub mod i18n;
pub mod notification;
pub mod recommendations;
pub mod request_flow;
