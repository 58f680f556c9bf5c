// Copyright 2026 the Inlay Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Web backend for inlay.
//!
//! This crate provides a [`ViewHost`] that embeds surfaces in the DOM:
//!
//! - [`DomViewHost`]: `<div>` containers plus a registry of surface elements
//! - [`DomContainer`]: one container per hosting context
//! - [`DomViewError`]: failures reported through
//!   [`ViewError`](inlay_core::error::ViewError)

#![no_std]

extern crate alloc;

mod dom;

pub use dom::{DomContainer, DomViewError, DomViewHost, VIEW_CLASS_ATTRIBUTE};
pub use inlay_core::host::ViewHost;
