//! Core plumbing for taglabel.
//!
//! This crate provides the pieces every taglabel widget is built from:
//!
//! - **Signal/Slot System**: type-safe event notification ([`Signal`])
//! - **Property System**: change-detecting configuration cells ([`Property`])
//! - **Identity**: process-unique widget ids ([`WidgetId`])
//! - **Errors**: precondition failures ([`LabelError`])
//! - **Logging**: `tracing` targets and performance spans ([`logging`])
//!
//! # Example
//!
//! ```
//! use taglabel_core::{Property, Signal};
//!
//! struct Counter {
//!     value: Property<i32>,
//!     value_changed: Signal<i32>,
//! }
//!
//! impl Counter {
//!     fn increment(&self) {
//!         let new_value = self.value.get() + 1;
//!         if self.value.set(new_value) {
//!             self.value_changed.emit(new_value);
//!         }
//!     }
//! }
//!
//! let counter = Counter { value: Property::new(0), value_changed: Signal::new() };
//! counter.increment();
//! assert_eq!(counter.value.get(), 1);
//! ```

pub mod error;
pub mod id;
pub mod logging;
pub mod property;
pub mod signal;

pub use error::{LabelError, LabelResult, check_width};
pub use id::WidgetId;
pub use logging::PerfSpan;
pub use property::Property;
pub use signal::{ConnectionId, Signal};
