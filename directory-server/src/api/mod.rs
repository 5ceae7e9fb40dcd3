//! HTTP API
//!
//! One module per resource, each exposing `router()`:
//!
//! | Module | Prefix | Access |
//! |--------|--------|--------|
//! | [`health`] | /health | public |
//! | [`auth`] | /api/auth | login/register public, me authenticated |
//! | [`register`] | /api/register | public supplier self-registration |
//! | [`suppliers`] | /api/suppliers | authenticated, writes admin |
//! | [`tags`] | /api/tags | authenticated |
//! | [`reports`] | /api/reports | create authenticated, triage admin |
//! | [`lookup`] | /api/lookup | authenticated |
//! | [`partner`] | /api/partner | read public, logo upload admin |

pub mod auth;
pub mod health;
pub mod lookup;
pub mod partner;
pub mod register;
pub mod reports;
pub mod suppliers;
pub mod tags;
