//! User registration & authentication HTTP backend.
//!
//! Layered hexagonally: `domain` holds the entities, ports, and the
//! registration service; `application` the use cases; `adapters::http` the
//! request schema, controllers, and the error normalizer; `infrastructure`
//! the configuration loader, the PBKDF2 password hasher, and the Postgres
//! repository.

pub mod adapters;
pub mod application;
pub mod domain;
pub mod infrastructure;
