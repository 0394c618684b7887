// SPDX-License-Identifier: MPL-2.0
//! Localization support built on Fluent.
//!
//! Locale files live under `assets/i18n/` and are embedded into the binary.
//! The active locale is resolved from CLI arguments, then the config file,
//! then the OS locale, falling back to `en-US`.

pub mod fluent;

pub use fluent::I18n;
